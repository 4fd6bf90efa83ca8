//! Edge labels
//!
//! A [`Label`] names one edge of a labeled hash tree. Labels compare by exact
//! bytes. The derived ordering is lexicographic and is only used to build
//! trees canonically; lookups never depend on it.

use std::fmt;

/// The bytes as text, if every one of them is printable ASCII (0x20..=0x7E)
pub fn printable_ascii(bytes: &[u8]) -> Option<&str> {
    if bytes.iter().all(|b| (0x20..=0x7e).contains(b)) {
        std::str::from_utf8(bytes).ok()
    } else {
        None
    }
}

/// An opaque byte string identifying a child edge
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Label(Vec<u8>);

impl Label {
    /// Create a label from raw bytes
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Label(bytes.into())
    }

    /// Get the label bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Convert into the underlying bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Length of the label in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the label has no bytes
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the label renders as text rather than hex
    pub fn is_printable(&self) -> bool {
        printable_ascii(&self.0).is_some()
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label(s.as_bytes().to_vec())
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Label(s.into_bytes())
    }
}

impl From<&[u8]> for Label {
    fn from(bytes: &[u8]) -> Self {
        Label(bytes.to_vec())
    }
}

impl From<Vec<u8>> for Label {
    fn from(bytes: Vec<u8>) -> Self {
        Label(bytes)
    }
}

impl<const N: usize> From<[u8; N]> for Label {
    fn from(bytes: [u8; N]) -> Self {
        Label(bytes.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Label {
    fn from(bytes: &[u8; N]) -> Self {
        Label(bytes.to_vec())
    }
}

impl AsRef<[u8]> for Label {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq<[u8]> for Label {
    fn eq(&self, other: &[u8]) -> bool {
        self.0 == other
    }
}

impl PartialEq<str> for Label {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.as_bytes()
    }
}

/// Text when every byte is printable ASCII, lowercase hex otherwise.
impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match printable_ascii(&self.0) {
            Some(text) => f.write_str(text),
            None => f.write_str(&hex::encode(&self.0)),
        }
    }
}
