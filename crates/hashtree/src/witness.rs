//! Witness construction
//!
//! A witness is a pruning of a tree that still answers lookups for a chosen
//! set of paths. Every fork level on the way to a requested path keeps its
//! labels visible, so absence can still be proven, while the children of
//! labels nobody asked for are replaced by their digests.

use crate::node::Node;

impl Node {
    /// Prune everything not needed to answer lookups for `paths`
    ///
    /// The witness has the same digest as `self`, and looking up any of the
    /// requested paths in it gives the same result as in `self`. A subtree
    /// at the end of a requested path is kept whole. Recursive: run
    /// [`Node::check_depth`] first on trees from untrusted sources.
    pub fn witness<P, L>(&self, paths: &[P]) -> Node
    where
        P: AsRef<[L]>,
        L: AsRef<[u8]>,
    {
        let remaining: Vec<&[L]> = paths.iter().map(|path| path.as_ref()).collect();
        witness_level(self, &remaining)
    }
}

fn witness_level<L: AsRef<[u8]>>(node: &Node, paths: &[&[L]]) -> Node {
    if paths.iter().any(|path| path.is_empty()) {
        return node.clone();
    }
    match node {
        Node::Fork(left, right) => {
            Node::fork(witness_level(left, paths), witness_level(right, paths))
        }
        Node::Labeled(label, child) => {
            let tails: Vec<&[L]> = paths
                .iter()
                .filter_map(|path| match path.split_first() {
                    Some((head, tail)) if head.as_ref() == label.as_bytes() => Some(tail),
                    _ => None,
                })
                .collect();
            if tails.is_empty() {
                Node::Labeled(label.clone(), Box::new(child.to_pruned()))
            } else {
                Node::Labeled(label.clone(), Box::new(witness_level(child, &tails)))
            }
        }
        Node::Empty | Node::Leaf(_) | Node::Pruned(_) => node.clone(),
    }
}
