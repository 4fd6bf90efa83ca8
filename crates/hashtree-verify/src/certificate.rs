//! Certificates and the signature seam
//!
//! Decoding certificate bytes and the signature scheme itself live outside
//! this crate. A [`Certificate`] arrives with its tree already decoded, and
//! signature checking is delegated to a [`SignatureVerifier`].

use hashtree::{Digest, Node};

/// A decoded state certificate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    /// The (possibly pruned) state tree
    pub tree: Node,
    /// Signature over the tree's root digest
    pub signature: Vec<u8>,
}

impl Certificate {
    /// Create a certificate from a decoded tree and its signature
    pub fn new(tree: Node, signature: impl Into<Vec<u8>>) -> Self {
        Self {
            tree,
            signature: signature.into(),
        }
    }
}

/// Checks a signature over a root digest
///
/// Implementations wrap a concrete scheme. Closures with the same shape
/// implement this trait directly.
pub trait SignatureVerifier {
    /// Whether `signature` authenticates `root_digest` under `public_key`
    fn verify(&self, root_digest: &Digest, signature: &[u8], public_key: &[u8]) -> bool;
}

impl<F> SignatureVerifier for F
where
    F: Fn(&Digest, &[u8], &[u8]) -> bool,
{
    fn verify(&self, root_digest: &Digest, signature: &[u8], public_key: &[u8]) -> bool {
        self(root_digest, signature, public_key)
    }
}
