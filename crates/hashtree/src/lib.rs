//! Labeled hash trees for state certificates
//!
//! This crate implements the tree half of certificate verification:
//! reconstructing a tree's root digest with domain-separated hashing, and
//! answering path lookups that stay sound when parts of the tree have been
//! pruned away.
//!
//! ```
//! use hashtree::{LookupResult, Node};
//!
//! let tree = Node::fork(
//!     Node::labeled("a", Node::leaf("x")),
//!     Node::labeled("b", Node::leaf("y")).to_pruned(),
//! );
//! assert_eq!(tree.lookup(&["a"]), LookupResult::Found(&b"x"[..]));
//! assert_eq!(tree.lookup(&["b"]), LookupResult::Unknown);
//! ```

pub mod error;
pub mod lookup;
pub mod node;
pub mod path;
pub mod tree;
pub mod witness;

pub use error::{Error, LookupError, Result};
pub use hashtree_types::{Digest, Label};
pub use lookup::{lookup, lookup_subtree, LookupResult, LookupResultType};
pub use node::{Node, DEFAULT_MAX_DEPTH};
pub use path::render_path;
pub use tree::{hash_empty, hash_fork, hash_labeled, hash_leaf};
