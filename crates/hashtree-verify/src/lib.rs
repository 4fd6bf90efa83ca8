//! State certificate verification
//!
//! This crate ties a decoded certificate tree to its signature: it rebuilds
//! the root digest, checks it against a pinned digest and/or the signature,
//! and only then hands out a [`VerifiedTree`] that answers lookups.
//!
//! The signature scheme is supplied by the caller through
//! [`SignatureVerifier`]; key selection and rotation are the caller's concern.

pub mod certificate;
pub mod error;
pub mod verify;

pub use certificate::{Certificate, SignatureVerifier};
pub use error::{Error, Result};
pub use verify::{VerificationPolicy, VerifiedTree, Verifier, DEFAULT_MAX_DEPTH};

// Re-export the tree types callers need to build and query certificates
pub use hashtree::{Digest, Label, LookupError, LookupResult, LookupResultType, Node};
