//! The digest/signature capability.
//!
//! Ledger logic only ever talks to [`CryptoScheme`]. Two schemes ship here:
//!
//! - [`ReferenceScheme`]: byte-sum placeholder arithmetic. It is
//!   NOT secure and exists to exercise validation plumbing.
//! - [`Ed25519Scheme`]: Blake3 digests and Ed25519 signatures.

use ed25519_dalek::{Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey};

use crate::error::CoreError;
use crate::types::{Digest, PrivateKey, PublicKey, Signature};

/// Hashing and signing primitives used by every validator.
///
/// `digest` must be deterministic. `derive_public_key` and `sign` may reject
/// malformed key material; `verify` reports malformed input as `false`.
pub trait CryptoScheme: Send + Sync {
    /// Hash arbitrary bytes.
    fn digest(&self, data: &[u8]) -> Digest;

    /// Derive the public half of a private key.
    fn derive_public_key(&self, private_key: &PrivateKey) -> Result<PublicKey, CoreError>;

    /// Sign a payload.
    fn sign(&self, payload: &[u8], private_key: &PrivateKey) -> Result<Signature, CoreError>;

    /// Check a signature over a payload.
    fn verify(&self, payload: &[u8], public_key: &PublicKey, signature: &Signature) -> bool;
}

impl<T: CryptoScheme + ?Sized> CryptoScheme for std::sync::Arc<T> {
    fn digest(&self, data: &[u8]) -> Digest {
        (**self).digest(data)
    }

    fn derive_public_key(&self, private_key: &PrivateKey) -> Result<PublicKey, CoreError> {
        (**self).derive_public_key(private_key)
    }

    fn sign(&self, payload: &[u8], private_key: &PrivateKey) -> Result<Signature, CoreError> {
        (**self).sign(payload, private_key)
    }

    fn verify(&self, payload: &[u8], public_key: &PublicKey, signature: &Signature) -> bool {
        (**self).verify(payload, public_key, signature)
    }
}

/// Placeholder byte-sum scheme.
///
/// - digest: decimal rendering of the byte sum
/// - public key: every private key byte plus one
/// - signature: `digest(digest(payload) || digest(public_key))`
///
/// Anyone holding the public key can forge signatures.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceScheme;

impl ReferenceScheme {
    /// Invert the public key transform.
    pub fn recover_private_key(public_key: &PublicKey) -> PrivateKey {
        PrivateKey::from_bytes(
            public_key
                .as_bytes()
                .iter()
                .map(|b| b.wrapping_sub(1))
                .collect::<Vec<u8>>(),
        )
    }

    fn signature_for(&self, payload: &[u8], public_key: &PublicKey) -> Signature {
        let mut material = self.digest(payload).0;
        material.extend_from_slice(self.digest(public_key.as_bytes()).as_bytes());
        Signature(self.digest(&material).0)
    }
}

impl CryptoScheme for ReferenceScheme {
    fn digest(&self, data: &[u8]) -> Digest {
        let sum = data
            .iter()
            .fold(0u64, |acc, b| acc.wrapping_add(u64::from(*b)));
        Digest(sum.to_string().into_bytes())
    }

    fn derive_public_key(&self, private_key: &PrivateKey) -> Result<PublicKey, CoreError> {
        Ok(PublicKey(
            private_key
                .as_bytes()
                .iter()
                .map(|b| b.wrapping_add(1))
                .collect(),
        ))
    }

    fn sign(&self, payload: &[u8], private_key: &PrivateKey) -> Result<Signature, CoreError> {
        let public_key = self.derive_public_key(private_key)?;
        Ok(self.signature_for(payload, &public_key))
    }

    fn verify(&self, payload: &[u8], public_key: &PublicKey, signature: &Signature) -> bool {
        self.signature_for(payload, public_key) == *signature
    }
}

/// Blake3 digests with Ed25519 signatures over the raw payload.
///
/// Private keys are 32-byte Ed25519 seeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Scheme;

/// Length of an Ed25519 seed.
pub const ED25519_SEED_LEN: usize = ed25519_dalek::SECRET_KEY_LENGTH;

/// Length of an Ed25519 public key.
pub const ED25519_PUBLIC_KEY_LEN: usize = ed25519_dalek::PUBLIC_KEY_LENGTH;

impl Ed25519Scheme {
    /// Generate a new random private key.
    pub fn generate_private_key() -> PrivateKey {
        let mut rng = rand::thread_rng();
        let signing_key = SigningKey::generate(&mut rng);
        PrivateKey::from(signing_key.to_bytes())
    }

    fn signing_key(private_key: &PrivateKey) -> Result<SigningKey, CoreError> {
        let seed: [u8; ED25519_SEED_LEN] =
            private_key
                .as_bytes()
                .try_into()
                .map_err(|_| CoreError::InvalidPrivateKey {
                    expected: ED25519_SEED_LEN,
                    got: private_key.len(),
                })?;
        Ok(SigningKey::from_bytes(&seed))
    }
}

impl CryptoScheme for Ed25519Scheme {
    fn digest(&self, data: &[u8]) -> Digest {
        Digest(blake3::hash(data).as_bytes().to_vec())
    }

    fn derive_public_key(&self, private_key: &PrivateKey) -> Result<PublicKey, CoreError> {
        let signing_key = Self::signing_key(private_key)?;
        Ok(PublicKey(signing_key.verifying_key().to_bytes().to_vec()))
    }

    fn sign(&self, payload: &[u8], private_key: &PrivateKey) -> Result<Signature, CoreError> {
        let signing_key = Self::signing_key(private_key)?;
        Ok(Signature(signing_key.sign(payload).to_bytes().to_vec()))
    }

    fn verify(&self, payload: &[u8], public_key: &PublicKey, signature: &Signature) -> bool {
        let Ok(key_bytes) = <[u8; ED25519_PUBLIC_KEY_LEN]>::try_from(public_key.as_bytes()) else {
            return false;
        };
        let Ok(verifying_key) = VerifyingKey::from_bytes(&key_bytes) else {
            return false;
        };
        let Ok(sig) = DalekSignature::from_slice(signature.as_bytes()) else {
            return false;
        };
        verifying_key.verify(payload, &sig).is_ok()
    }
}
