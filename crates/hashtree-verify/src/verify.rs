//! High-level verification API
//!
//! [`Verifier`] turns a decoded [`Certificate`] into a [`VerifiedTree`]. The
//! only way to query a certificate through this crate is via a
//! `VerifiedTree`, so no lookup result is ever read from a tree whose root
//! digest has not been checked.

use crate::certificate::{Certificate, SignatureVerifier};
use crate::error::{Error, Result};
use hashtree::{Digest, Label, LookupResult, Node};

pub use hashtree::DEFAULT_MAX_DEPTH;

/// Policy for verifying certificates
#[derive(Debug, Clone)]
pub struct VerificationPolicy {
    /// Maximum nesting depth accepted before any recursive processing
    pub max_depth: usize,
    /// Verify the signature over the root digest
    pub verify_signature: bool,
    /// Root digest the tree must reconstruct to, when known in advance
    pub expected_root: Option<Digest>,
}

impl Default for VerificationPolicy {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            verify_signature: true,
            expected_root: None,
        }
    }
}

impl VerificationPolicy {
    /// Require the tree to reconstruct to `root`
    pub fn with_expected_root(mut self, root: Digest) -> Self {
        self.expected_root = Some(root);
        self
    }

    /// Set the maximum accepted tree depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Skip signature verification
    ///
    /// Only accepted together with `expected_root`; a policy that checks
    /// neither is rejected by [`Verifier::verify`].
    pub fn skip_signature(mut self) -> Self {
        self.verify_signature = false;
        self
    }
}

/// Verifies certificates against one public key
pub struct Verifier<V> {
    public_key: Vec<u8>,
    signature_verifier: V,
    policy: VerificationPolicy,
}

impl<V: SignatureVerifier> Verifier<V> {
    /// Create a verifier with the default policy
    pub fn new(public_key: impl Into<Vec<u8>>, signature_verifier: V) -> Self {
        Self {
            public_key: public_key.into(),
            signature_verifier,
            policy: VerificationPolicy::default(),
        }
    }

    /// Replace the verification policy
    pub fn with_policy(mut self, policy: VerificationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The active policy
    pub fn policy(&self) -> &VerificationPolicy {
        &self.policy
    }

    /// Verify a certificate
    ///
    /// Checks, in order: tree depth, the pinned root digest (if any), and the
    /// signature over the reconstructed root digest. Any failure rejects the
    /// whole certificate, and so does a policy that would leave the root
    /// digest unauthenticated.
    pub fn verify(&self, certificate: Certificate) -> Result<VerifiedTree> {
        let Certificate { tree, signature } = certificate;

        if !self.policy.verify_signature && self.policy.expected_root.is_none() {
            tracing::warn!("Refusing to verify: signature check skipped and no root pinned");
            return Err(Error::Unauthenticated);
        }

        let root_digest = self.reconstruct(&tree)?;

        if self.policy.verify_signature {
            if !self
                .signature_verifier
                .verify(&root_digest, &signature, &self.public_key)
            {
                tracing::warn!("Signature rejected for root digest {}", root_digest);
                return Err(Error::InvalidSignature(root_digest.to_hex()));
            }
            tracing::debug!("Signature verified for root digest {}", root_digest);
        } else {
            tracing::warn!("Signature verification disabled by policy, relying on pinned root");
        }

        Ok(VerifiedTree { tree, root_digest })
    }

    /// Verify a tree against a root digest the caller already authenticated
    pub fn verify_tree(&self, tree: Node, expected_root: &Digest) -> Result<VerifiedTree> {
        let root_digest = self.reconstruct(&tree)?;
        check_root(&root_digest, expected_root)?;
        Ok(VerifiedTree { tree, root_digest })
    }

    fn reconstruct(&self, tree: &Node) -> Result<Digest> {
        tree.check_depth(self.policy.max_depth).map_err(|e| {
            tracing::warn!("Rejecting tree: {}", e);
            Error::from(e)
        })?;

        let root_digest = tree.digest();
        tracing::debug!("Reconstructed root digest {}", root_digest);

        if let Some(expected) = &self.policy.expected_root {
            check_root(&root_digest, expected)?;
        }
        Ok(root_digest)
    }
}

fn check_root(actual: &Digest, expected: &Digest) -> Result<()> {
    if actual != expected {
        tracing::warn!("Root digest {} does not match expected {}", actual, expected);
        return Err(Error::DigestMismatch {
            expected: expected.to_hex(),
            actual: actual.to_hex(),
        });
    }
    Ok(())
}

/// A tree whose root digest has been authenticated
///
/// Immutable; share it by reference across threads for concurrent lookups.
#[derive(Debug, Clone)]
pub struct VerifiedTree {
    tree: Node,
    root_digest: Digest,
}

impl VerifiedTree {
    /// The authenticated root digest
    pub fn root_digest(&self) -> &Digest {
        &self.root_digest
    }

    /// The underlying tree
    pub fn tree(&self) -> &Node {
        &self.tree
    }

    /// Look up the value at `path`
    pub fn lookup<L: AsRef<[u8]>>(&self, path: &[L]) -> LookupResult<&[u8]> {
        self.tree.lookup(path)
    }

    /// Look up the value at `path`, failing on any non-found outcome
    pub fn lookup_value<L: AsRef<[u8]>>(&self, path: &[L]) -> Result<&[u8]> {
        Ok(self.tree.lookup_value(path)?)
    }

    /// Look up the subtree at `path`
    pub fn lookup_subtree<L: AsRef<[u8]>>(&self, path: &[L]) -> LookupResult<&Node> {
        self.tree.lookup_subtree(path)
    }

    /// Every disclosed leaf together with its full path
    pub fn list_paths(&self) -> Vec<(Vec<Label>, &[u8])> {
        self.tree.list_paths()
    }

    /// Release the tree
    pub fn into_tree(self) -> Node {
        self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accept_all(_: &Digest, _: &[u8], _: &[u8]) -> bool {
        true
    }

    fn reject_all(_: &Digest, _: &[u8], _: &[u8]) -> bool {
        false
    }

    fn tree() -> Node {
        Node::from_labeled(vec![("time", Node::leaf(vec![0x01])), ("status", Node::leaf("ok"))])
    }

    #[test]
    fn test_default_policy() {
        let policy = VerificationPolicy::default();
        assert_eq!(policy.max_depth, DEFAULT_MAX_DEPTH);
        assert!(policy.verify_signature);
        assert!(policy.expected_root.is_none());
    }

    #[test]
    fn test_policy_builders() {
        let root = Digest::from_bytes([1; 32]);
        let policy = VerificationPolicy::default()
            .with_expected_root(root)
            .with_max_depth(8)
            .skip_signature();
        assert_eq!(policy.expected_root, Some(root));
        assert_eq!(policy.max_depth, 8);
        assert!(!policy.verify_signature);
    }

    #[test]
    fn test_verify_accepts_good_signature() {
        let verifier = Verifier::new(b"key".to_vec(), accept_all);
        let verified = verifier.verify(Certificate::new(tree(), b"sig".to_vec())).unwrap();
        assert_eq!(verified.root_digest(), &tree().digest());
        assert_eq!(verified.lookup(&["status"]), LookupResult::Found(&b"ok"[..]));
    }

    #[test]
    fn test_verify_rejects_bad_signature() {
        let verifier = Verifier::new(b"key".to_vec(), reject_all);
        let err = verifier.verify(Certificate::new(tree(), b"sig".to_vec())).unwrap_err();
        assert!(matches!(err, Error::InvalidSignature(_)));
    }

    #[test]
    fn test_skip_signature_needs_pinned_root() {
        let verifier = Verifier::new(b"key".to_vec(), reject_all)
            .with_policy(VerificationPolicy::default().skip_signature());
        let err = verifier.verify(Certificate::new(tree(), Vec::new())).unwrap_err();
        assert!(matches!(err, Error::Unauthenticated));

        let verifier = verifier.with_policy(
            VerificationPolicy::default()
                .skip_signature()
                .with_expected_root(tree().digest()),
        );
        assert!(verifier.verify(Certificate::new(tree(), Vec::new())).is_ok());
    }

    #[test]
    fn test_pinned_root_checked_before_signature() {
        let policy = VerificationPolicy::default().with_expected_root(Digest::from_bytes([0; 32]));
        let verifier = Verifier::new(b"key".to_vec(), accept_all).with_policy(policy);
        let err = verifier.verify(Certificate::new(tree(), Vec::new())).unwrap_err();
        assert!(matches!(err, Error::DigestMismatch { .. }));
    }

    #[test]
    fn test_verify_tree() {
        let verifier = Verifier::new(Vec::new(), reject_all);
        let root = tree().digest();
        assert!(verifier.verify_tree(tree(), &root).is_ok());

        let err = verifier
            .verify_tree(tree(), &Digest::from_bytes([9; 32]))
            .unwrap_err();
        assert!(matches!(err, Error::DigestMismatch { .. }));
    }
}
