//! Core types for certified hash trees
//!
//! This crate provides the value types shared by the tree engine and the
//! certificate verifier: the fixed-width [`Digest`] and the edge [`Label`].

pub mod encoding;
pub mod error;
pub mod label;

pub use encoding::{Digest, DIGEST_SIZE};
pub use error::{Error, Result};
pub use label::{printable_ascii, Label};
