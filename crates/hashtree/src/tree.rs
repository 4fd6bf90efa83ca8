//! Domain-separated hashing for labeled hash trees
//!
//! Every node kind hashes under its own domain separator so that the bytes of
//! one kind can never be reinterpreted as another:
//! - Empty: SHA256(ds("ic-hashtree-empty"))
//! - Fork: SHA256(ds("ic-hashtree-fork") || left || right)
//! - Labeled: SHA256(ds("ic-hashtree-labeled") || label || child)
//! - Leaf: SHA256(ds("ic-hashtree-leaf") || value)
//!
//! where `ds(s)` is a single length byte followed by `s`.

use hashtree_types::{Digest, Label};
use sha2::{Digest as _, Sha256};

/// Domain separator for empty subtrees
pub const DOMAIN_EMPTY: &str = "ic-hashtree-empty";

/// Domain separator for forks
pub const DOMAIN_FORK: &str = "ic-hashtree-fork";

/// Domain separator for labeled edges
pub const DOMAIN_LABELED: &str = "ic-hashtree-labeled";

/// Domain separator for leaves
pub const DOMAIN_LEAF: &str = "ic-hashtree-leaf";

fn hasher_for_domain(domain: &str) -> Sha256 {
    debug_assert!(domain.len() <= u8::MAX as usize);
    let mut hasher = Sha256::new();
    hasher.update([domain.len() as u8]);
    hasher.update(domain.as_bytes());
    hasher
}

fn finish(hasher: Sha256) -> Digest {
    Digest::from_bytes(hasher.finalize().into())
}

/// Digest of an empty subtree
pub fn hash_empty() -> Digest {
    finish(hasher_for_domain(DOMAIN_EMPTY))
}

/// Digest of a fork from its children's digests
pub fn hash_fork(left: &Digest, right: &Digest) -> Digest {
    let mut hasher = hasher_for_domain(DOMAIN_FORK);
    hasher.update(left.as_bytes());
    hasher.update(right.as_bytes());
    finish(hasher)
}

/// Digest of a labeled edge from its label and the child's digest
pub fn hash_labeled(label: &Label, child: &Digest) -> Digest {
    let mut hasher = hasher_for_domain(DOMAIN_LABELED);
    hasher.update(label.as_bytes());
    hasher.update(child.as_bytes());
    finish(hasher)
}

/// Digest of a leaf value
pub fn hash_leaf(value: &[u8]) -> Digest {
    let mut hasher = hasher_for_domain(DOMAIN_LEAF);
    hasher.update(value);
    finish(hasher)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sha256(data: &[u8]) -> [u8; 32] {
        Sha256::digest(data).into()
    }

    #[test]
    fn test_hash_leaf_format() {
        let mut raw = vec![16u8];
        raw.extend_from_slice(b"ic-hashtree-leaf");
        raw.extend_from_slice(b"hello");
        assert_eq!(hash_leaf(b"hello").as_bytes(), &sha256(&raw));
    }

    #[test]
    fn test_hash_empty_format() {
        let mut raw = vec![17u8];
        raw.extend_from_slice(b"ic-hashtree-empty");
        assert_eq!(hash_empty().as_bytes(), &sha256(&raw));
    }

    #[test]
    fn test_hash_fork_order_matters() {
        let left = hash_leaf(b"left");
        let right = hash_leaf(b"right");
        assert_ne!(hash_fork(&left, &right), hash_fork(&right, &left));
    }

    #[test]
    fn test_domains_do_not_collide() {
        // the same 64 bytes hashed as a leaf and as a fork must differ
        let left = hash_leaf(b"l");
        let right = hash_leaf(b"r");
        let mut concat = left.as_bytes().to_vec();
        concat.extend_from_slice(right.as_bytes());
        assert_ne!(hash_leaf(&concat), hash_fork(&left, &right));

        let label = Label::from("x");
        assert_ne!(hash_labeled(&label, &left), hash_leaf(b"x"));
    }
}
