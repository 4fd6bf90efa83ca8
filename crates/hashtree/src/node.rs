//! The labeled hash tree
//!
//! A [`Node`] is one of five shapes. Interior nodes own their children, so a
//! tree is acyclic by construction and is freed when its root is dropped.
//! Pruned nodes carry only the digest of the subtree they replace, which is
//! what lets a discloser hide data without changing the root digest.

use crate::error::{Error, Result};
use crate::tree::{hash_empty, hash_fork, hash_labeled, hash_leaf};
use hashtree_types::{printable_ascii, Digest, Label};
use std::collections::BTreeMap;
use std::fmt;

/// Default limit on tree nesting for checks on untrusted input
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// A node of a labeled hash tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// No children; hashes to a fixed domain-separated digest
    Empty,
    /// Unlabeled binary branch
    Fork(Box<Node>, Box<Node>),
    /// A single labeled edge to one child
    Labeled(Label, Box<Node>),
    /// Terminal node holding certified data
    Leaf(Vec<u8>),
    /// A redacted subtree, known only by its digest
    Pruned(Digest),
}

impl Node {
    /// Create an empty node
    pub fn empty() -> Self {
        Node::Empty
    }

    /// Create a fork of two subtrees
    pub fn fork(left: Node, right: Node) -> Self {
        Node::Fork(Box::new(left), Box::new(right))
    }

    /// Create a labeled edge to `child`
    pub fn labeled(label: impl Into<Label>, child: Node) -> Self {
        Node::Labeled(label.into(), Box::new(child))
    }

    /// Create a leaf holding `value`
    pub fn leaf(value: impl Into<Vec<u8>>) -> Self {
        Node::Leaf(value.into())
    }

    /// Create a pruned node standing in for a subtree with `digest`
    pub fn pruned(digest: Digest) -> Self {
        Node::Pruned(digest)
    }

    /// Build one fork level from labeled entries in canonical order
    ///
    /// Entries are sorted by label bytes (a repeated label keeps the last
    /// entry) and folded into a balanced fork structure, so the same set of
    /// entries always produces the same digest. No entries gives `Empty`.
    pub fn from_labeled<I, L>(entries: I) -> Self
    where
        I: IntoIterator<Item = (L, Node)>,
        L: Into<Label>,
    {
        let sorted: BTreeMap<Label, Node> = entries
            .into_iter()
            .map(|(label, node)| (label.into(), node))
            .collect();
        let edges = sorted
            .into_iter()
            .map(|(label, node)| Node::labeled(label, node))
            .collect();
        balanced_forks(edges)
    }

    /// Compute the digest of this (sub)tree
    ///
    /// Pruned nodes contribute their stored digest verbatim. Recursive: run
    /// [`Node::check_depth`] first on trees from untrusted sources.
    pub fn digest(&self) -> Digest {
        match self {
            Node::Empty => hash_empty(),
            Node::Fork(left, right) => hash_fork(&left.digest(), &right.digest()),
            Node::Labeled(label, child) => hash_labeled(label, &child.digest()),
            Node::Leaf(value) => hash_leaf(value),
            Node::Pruned(digest) => *digest,
        }
    }

    /// Replace this subtree with its digest
    pub fn to_pruned(&self) -> Node {
        match self {
            Node::Pruned(digest) => Node::Pruned(*digest),
            other => Node::Pruned(other.digest()),
        }
    }

    /// Check that the reconstructed digest equals the authenticated one
    ///
    /// Rejects trees nested deeper than [`DEFAULT_MAX_DEPTH`] before hashing.
    pub fn verify_root_digest(&self, expected: &Digest) -> Result<()> {
        self.check_depth(DEFAULT_MAX_DEPTH)?;
        let actual = self.digest();
        if &actual != expected {
            return Err(Error::DigestMismatch {
                expected: expected.to_hex(),
                actual: actual.to_hex(),
            });
        }
        Ok(())
    }

    /// Number of nodes on the longest root-to-leaf chain
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self, 1usize)];
        while let Some((node, depth)) = stack.pop() {
            max = max.max(depth);
            push_children(node, depth, &mut stack);
        }
        max
    }

    /// Fail if the tree is nested deeper than `max_depth`
    ///
    /// Iterative, and stops at the first node past the limit, so it is safe
    /// to run on untrusted input before anything recursive touches it.
    pub fn check_depth(&self, max_depth: usize) -> Result<()> {
        let mut stack = vec![(self, 1usize)];
        while let Some((node, depth)) = stack.pop() {
            if depth > max_depth {
                return Err(Error::TreeTooDeep { max_depth });
            }
            push_children(node, depth, &mut stack);
        }
        Ok(())
    }

    /// Labels reachable from this node without crossing another label
    pub fn labels(&self) -> Vec<&Label> {
        let mut labels = Vec::new();
        collect_labels(self, &mut labels);
        labels
    }

    /// Every disclosed leaf together with its full path
    pub fn list_paths(&self) -> Vec<(Vec<Label>, &[u8])> {
        let mut paths = Vec::new();
        let mut prefix = Vec::new();
        collect_paths(self, &mut prefix, &mut paths);
        paths
    }
}

fn push_children<'a>(node: &'a Node, depth: usize, stack: &mut Vec<(&'a Node, usize)>) {
    match node {
        Node::Fork(left, right) => {
            stack.push((&**left, depth + 1));
            stack.push((&**right, depth + 1));
        }
        Node::Labeled(_, child) => stack.push((&**child, depth + 1)),
        Node::Empty | Node::Leaf(_) | Node::Pruned(_) => {}
    }
}

fn balanced_forks(mut nodes: Vec<Node>) -> Node {
    match nodes.len() {
        0 => Node::Empty,
        1 => nodes.pop().unwrap_or(Node::Empty),
        len => {
            let right = nodes.split_off(len / 2);
            Node::fork(balanced_forks(nodes), balanced_forks(right))
        }
    }
}

fn collect_labels<'a>(node: &'a Node, labels: &mut Vec<&'a Label>) {
    match node {
        Node::Fork(left, right) => {
            collect_labels(left, labels);
            collect_labels(right, labels);
        }
        Node::Labeled(label, _) => labels.push(label),
        Node::Empty | Node::Leaf(_) | Node::Pruned(_) => {}
    }
}

fn collect_paths<'a>(
    node: &'a Node,
    prefix: &mut Vec<Label>,
    paths: &mut Vec<(Vec<Label>, &'a [u8])>,
) {
    match node {
        Node::Fork(left, right) => {
            collect_paths(left, prefix, paths);
            collect_paths(right, prefix, paths);
        }
        Node::Labeled(label, child) => {
            prefix.push(label.clone());
            collect_paths(child, prefix, paths);
            prefix.pop();
        }
        Node::Leaf(value) => paths.push((prefix.clone(), value.as_slice())),
        Node::Empty | Node::Pruned(_) => {}
    }
}

fn write_node(node: &Node, level: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let indent = "  ".repeat(level);
    match node {
        Node::Empty => writeln!(f, "{}Empty", indent),
        Node::Fork(left, right) => {
            writeln!(f, "{}Fork", indent)?;
            write_node(left, level + 1, f)?;
            write_node(right, level + 1, f)
        }
        Node::Labeled(label, child) => {
            writeln!(f, "{}Labeled({})", indent, label)?;
            write_node(child, level + 1, f)
        }
        Node::Leaf(value) => {
            match printable_ascii(value) {
                Some(text) => writeln!(f, "{}Leaf(\"{}\")", indent, text),
                None => writeln!(f, "{}Leaf(0x{})", indent, hex::encode(value)),
            }
        }
        Node::Pruned(digest) => writeln!(f, "{}Pruned({})", indent, digest),
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(self, 0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::fork(
            Node::labeled("a", Node::leaf("x")),
            Node::labeled("b", Node::fork(Node::labeled("c", Node::leaf("y")), Node::Empty)),
        )
    }

    #[test]
    fn test_digest_is_stable() {
        let tree = sample();
        assert_eq!(tree.digest(), tree.digest());
        assert_eq!(tree.clone().digest(), tree.digest());
    }

    #[test]
    fn test_pruned_returns_digest_verbatim() {
        let digest = Digest::from_bytes([7u8; 32]);
        assert_eq!(Node::pruned(digest).digest(), digest);
    }

    #[test]
    fn test_pruning_preserves_digest() {
        let tree = sample();
        let pruned = Node::fork(
            Node::labeled("a", Node::leaf("x")),
            Node::labeled(
                "b",
                Node::fork(Node::labeled("c", Node::leaf("y")), Node::Empty).to_pruned(),
            ),
        );
        assert_eq!(tree.digest(), pruned.digest());
        assert_eq!(tree.to_pruned().digest(), tree.digest());
    }

    #[test]
    fn test_verify_root_digest() {
        let tree = sample();
        assert!(tree.verify_root_digest(&tree.digest()).is_ok());

        let tampered = Node::fork(
            Node::labeled("a", Node::leaf("z")),
            Node::labeled("b", Node::fork(Node::labeled("c", Node::leaf("y")), Node::Empty)),
        );
        let err = tampered.verify_root_digest(&tree.digest()).unwrap_err();
        assert!(matches!(err, Error::DigestMismatch { .. }));
        assert!(err.to_string().contains(&tree.digest().to_hex()));
    }

    #[test]
    fn test_verify_root_digest_rejects_deep_tree() {
        let mut deep = Node::leaf("bottom");
        for _ in 0..DEFAULT_MAX_DEPTH {
            deep = Node::labeled("x", deep);
        }
        let err = deep.verify_root_digest(&Digest::from_bytes([0; 32])).unwrap_err();
        assert!(matches!(
            err,
            Error::TreeTooDeep {
                max_depth: DEFAULT_MAX_DEPTH
            }
        ));
    }

    #[test]
    fn test_depth() {
        assert_eq!(Node::Empty.depth(), 1);
        assert_eq!(Node::labeled("a", Node::leaf("x")).depth(), 2);
        assert_eq!(sample().depth(), 5);
    }

    #[test]
    fn test_check_depth() {
        let mut deep = Node::leaf("bottom");
        for _ in 0..1000 {
            deep = Node::labeled("x", deep);
        }
        assert!(deep.check_depth(1001).is_ok());
        assert!(matches!(
            deep.check_depth(1000),
            Err(Error::TreeTooDeep { max_depth: 1000 })
        ));
    }

    #[test]
    fn test_labels_stop_at_labeled_edges() {
        let labels: Vec<String> = sample().labels().iter().map(|l| l.to_string()).collect();
        assert_eq!(labels, vec!["a", "b"]);
        assert!(Node::leaf("x").labels().is_empty());
    }

    #[test]
    fn test_list_paths() {
        let tree = Node::fork(
            sample(),
            Node::labeled("hidden", Node::pruned(Digest::from_bytes([0; 32]))),
        );
        let paths: Vec<(Vec<Label>, Vec<u8>)> = tree
            .list_paths()
            .into_iter()
            .map(|(path, value)| (path, value.to_vec()))
            .collect();
        assert_eq!(
            paths,
            vec![
                (vec![Label::from("a")], b"x".to_vec()),
                (vec![Label::from("b"), Label::from("c")], b"y".to_vec()),
            ]
        );
    }

    #[test]
    fn test_from_labeled_is_canonical() {
        let forward = Node::from_labeled(vec![
            ("a", Node::leaf("1")),
            ("b", Node::leaf("2")),
            ("c", Node::leaf("3")),
        ]);
        let backward = Node::from_labeled(vec![
            ("c", Node::leaf("3")),
            ("a", Node::leaf("1")),
            ("b", Node::leaf("2")),
        ]);
        assert_eq!(forward, backward);
        assert_eq!(forward.digest(), backward.digest());

        let expected = Node::fork(
            Node::labeled("a", Node::leaf("1")),
            Node::fork(
                Node::labeled("b", Node::leaf("2")),
                Node::labeled("c", Node::leaf("3")),
            ),
        );
        assert_eq!(forward, expected);
    }

    #[test]
    fn test_from_labeled_edge_cases() {
        assert_eq!(Node::from_labeled(Vec::<(&str, Node)>::new()), Node::Empty);
        assert_eq!(
            Node::from_labeled(vec![("a", Node::leaf("old")), ("a", Node::leaf("new"))]),
            Node::labeled("a", Node::leaf("new"))
        );
    }

    #[test]
    fn test_display() {
        let tree = Node::fork(
            Node::labeled("a", Node::leaf("x")),
            Node::labeled([0xffu8], Node::leaf(vec![0x00u8, 0x01])),
        );
        assert_eq!(
            tree.to_string(),
            "Fork\n  Labeled(a)\n    Leaf(\"x\")\n  Labeled(ff)\n    Leaf(0x0001)\n"
        );
    }
}
