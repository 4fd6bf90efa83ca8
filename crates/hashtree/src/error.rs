//! Error types for hashtree

use crate::lookup::LookupResultType;
use crate::path::render_path;
use hashtree_types::Label;
use thiserror::Error;

/// Errors that can occur while checking a hash tree
#[derive(Error, Debug)]
pub enum Error {
    /// Reconstructed root digest differs from the authenticated one
    #[error("Digest mismatch: expected {expected}, got {actual}")]
    DigestMismatch { expected: String, actual: String },

    /// Tree nesting exceeds the configured limit
    #[error("Tree too deep: exceeds maximum depth of {max_depth}")]
    TreeTooDeep { max_depth: usize },

    /// A lookup that was required to succeed did not
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Result type for hash tree operations
pub type Result<T> = std::result::Result<T, Error>;

/// A non-found lookup outcome together with the path that produced it
///
/// `lookup` itself never returns this; callers build it when a path they
/// expected to be present comes back without a value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("lookup error (path: {}): {kind}", render_path(.path))]
pub struct LookupError {
    /// Why the lookup did not find a value
    pub kind: LookupResultType,
    /// The queried path
    pub path: Vec<Label>,
}

impl LookupError {
    /// Create a lookup error of the given kind
    pub fn new(kind: LookupResultType, path: impl Into<Vec<Label>>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    /// The path is provably not in the tree
    pub fn absent(path: impl Into<Vec<Label>>) -> Self {
        Self::new(LookupResultType::Absent, path)
    }

    /// The path may be hidden behind a pruned subtree
    pub fn unknown(path: impl Into<Vec<Label>>) -> Self {
        Self::new(LookupResultType::Unknown, path)
    }

    /// The path cannot exist in a tree of this shape
    pub fn error(path: impl Into<Vec<Label>>) -> Self {
        Self::new(LookupResultType::Error, path)
    }
}
