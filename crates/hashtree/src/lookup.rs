//! Path lookups over a possibly pruned tree
//!
//! A lookup walks one label per step and classifies the outcome:
//! - `Found`: the path ends at a disclosed value
//! - `Absent`: the tree proves nothing exists at the path
//! - `Unknown`: a pruned subtree could be hiding the path
//! - `Error`: the path cannot exist in a tree of this shape
//!
//! `Unknown` always wins over `Absent`. A lookup reports absence only when
//! every position that could have held the label was actually inspected.

use crate::error::LookupError;
use crate::node::Node;
use hashtree_types::Label;

/// The kind of a non-found lookup outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupResultType {
    /// Guaranteed not to be in the tree
    Absent,
    /// Could be hidden behind a pruned subtree
    Unknown,
    /// The path is not valid for this tree shape
    Error,
}

impl LookupResultType {
    /// Fixed human-readable description of the outcome
    pub fn description(&self) -> &'static str {
        match self {
            LookupResultType::Absent => "not found, not present in the tree",
            LookupResultType::Unknown => "not found, could be pruned",
            LookupResultType::Error => "error, can not exist in the tree",
        }
    }
}

impl std::fmt::Display for LookupResultType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// Outcome of a path lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupResult<T> {
    /// The path ends at a disclosed node
    Found(T),
    /// The tree proves there is nothing at the path
    Absent,
    /// The path runs into a pruned subtree
    Unknown,
    /// The path is incompatible with the tree's shape
    Error,
}

impl<T> LookupResult<T> {
    /// Whether the lookup found a value
    pub fn is_found(&self) -> bool {
        matches!(self, LookupResult::Found(_))
    }

    /// The found value, if any
    pub fn found(self) -> Option<T> {
        match self {
            LookupResult::Found(value) => Some(value),
            _ => None,
        }
    }

    /// The non-found kind, or `None` for `Found`
    pub fn kind(&self) -> Option<LookupResultType> {
        match self {
            LookupResult::Found(_) => None,
            LookupResult::Absent => Some(LookupResultType::Absent),
            LookupResult::Unknown => Some(LookupResultType::Unknown),
            LookupResult::Error => Some(LookupResultType::Error),
        }
    }

    /// Treat anything but `Found` as a failure at `path`
    pub fn into_result<L: AsRef<[u8]>>(self, path: &[L]) -> Result<T, LookupError> {
        match self {
            LookupResult::Found(value) => Ok(value),
            LookupResult::Absent => Err(LookupError::absent(owned_path(path))),
            LookupResult::Unknown => Err(LookupError::unknown(owned_path(path))),
            LookupResult::Error => Err(LookupError::error(owned_path(path))),
        }
    }
}

fn owned_path<L: AsRef<[u8]>>(path: &[L]) -> Vec<Label> {
    path.iter().map(|label| Label::from(label.as_ref())).collect()
}

/// Result of searching one fork level for a label
#[derive(Clone, Copy)]
enum LabelSearch<'a> {
    Found(&'a Node),
    Absent,
    Unknown,
}

fn find_label<'a>(node: &'a Node, label: &[u8]) -> LabelSearch<'a> {
    match node {
        Node::Labeled(candidate, child) if candidate.as_bytes() == label => {
            LabelSearch::Found(&**child)
        }
        Node::Labeled(..) | Node::Empty | Node::Leaf(_) => LabelSearch::Absent,
        Node::Pruned(_) => LabelSearch::Unknown,
        Node::Fork(left, right) => {
            let left = find_label(left, label);
            if let LabelSearch::Found(child) = left {
                return LabelSearch::Found(child);
            }
            // a pruned branch on either side keeps the answer open
            match (left, find_label(right, label)) {
                (_, LabelSearch::Found(child)) => LabelSearch::Found(child),
                (LabelSearch::Unknown, _) | (_, LabelSearch::Unknown) => LabelSearch::Unknown,
                _ => LabelSearch::Absent,
            }
        }
    }
}

/// Look up the subtree at `path`
///
/// Ends with `Found` for any disclosed node, and with `Unknown` when the
/// path itself leads to a pruned node.
pub fn lookup_subtree<'a, L: AsRef<[u8]>>(
    tree: &'a Node,
    path: &[L],
) -> LookupResult<&'a Node> {
    let mut node = tree;
    for label in path {
        node = match node {
            Node::Leaf(_) | Node::Empty => return LookupResult::Error,
            _ => match find_label(node, label.as_ref()) {
                LabelSearch::Found(child) => child,
                LabelSearch::Absent => return LookupResult::Absent,
                LabelSearch::Unknown => return LookupResult::Unknown,
            },
        };
    }
    match node {
        Node::Pruned(_) => LookupResult::Unknown,
        disclosed => LookupResult::Found(disclosed),
    }
}

/// Look up the value at `path`
pub fn lookup<'a, L: AsRef<[u8]>>(tree: &'a Node, path: &[L]) -> LookupResult<&'a [u8]> {
    match lookup_subtree(tree, path) {
        LookupResult::Found(Node::Leaf(value)) => LookupResult::Found(value.as_slice()),
        LookupResult::Found(Node::Empty) => LookupResult::Absent,
        LookupResult::Found(Node::Pruned(_)) | LookupResult::Unknown => LookupResult::Unknown,
        LookupResult::Found(Node::Fork(..) | Node::Labeled(..)) | LookupResult::Error => {
            LookupResult::Error
        }
        LookupResult::Absent => LookupResult::Absent,
    }
}

impl Node {
    /// Look up the value at `path`; see [`lookup`]
    pub fn lookup<L: AsRef<[u8]>>(&self, path: &[L]) -> LookupResult<&[u8]> {
        lookup(self, path)
    }

    /// Look up the subtree at `path`; see [`lookup_subtree`]
    pub fn lookup_subtree<L: AsRef<[u8]>>(&self, path: &[L]) -> LookupResult<&Node> {
        lookup_subtree(self, path)
    }

    /// Look up the value at `path`, failing on any non-found outcome
    pub fn lookup_value<L: AsRef<[u8]>>(&self, path: &[L]) -> Result<&[u8], LookupError> {
        lookup(self, path).into_result(path)
    }
}
