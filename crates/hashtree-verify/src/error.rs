//! Error types for hashtree-verify

use hashtree::LookupError;
use thiserror::Error;

/// Errors that can occur while verifying a certificate
///
/// Every variant rejects the certificate outright; none of them is retryable.
#[derive(Error, Debug)]
pub enum Error {
    /// The tree does not hash to the expected root
    #[error("Digest mismatch: expected {expected}, got {actual}")]
    DigestMismatch { expected: String, actual: String },

    /// The tree is nested deeper than the policy allows
    #[error("Tree too deep: exceeds maximum depth of {max_depth}")]
    TreeTooDeep { max_depth: usize },

    /// The signature does not authenticate the root digest
    #[error("Invalid signature over root digest {0}")]
    InvalidSignature(String),

    /// The policy skips the signature check without pinning a root digest
    #[error("Root digest not authenticated: signature check skipped and no expected root set")]
    Unauthenticated,

    /// A required path was not found in a verified tree
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl From<hashtree::Error> for Error {
    fn from(err: hashtree::Error) -> Self {
        match err {
            hashtree::Error::DigestMismatch { expected, actual } => {
                Error::DigestMismatch { expected, actual }
            }
            hashtree::Error::TreeTooDeep { max_depth } => Error::TreeTooDeep { max_depth },
            hashtree::Error::Lookup(e) => Error::Lookup(e),
        }
    }
}

/// Result type for verification operations
pub type Result<T> = std::result::Result<T, Error>;
