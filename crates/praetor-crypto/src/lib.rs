//! Praetor Crypto - deterministic keys and intent signatures
//!
//! Every agent's ed25519 keypair is derived from a fixed one-way hash of
//! `"seed:<agent_id>"`, so runs are reproducible without persisted key
//! material. The signature primitive itself (ed25519-dalek) is treated as
//! a trusted library; this crate only wraps derivation, signing, and
//! verification.

use ed25519_dalek::{Signature as Ed25519Signature, Signer, SigningKey, Verifier};
pub use ed25519_dalek::VerifyingKey;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Crypto operation errors
#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),
    #[error("Invalid signature format: {0}")]
    InvalidSignatureFormat(String),
}

pub type CryptoResult<T> = std::result::Result<T, CryptoError>;

/// Prefix for the key derivation seed string.
const SEED_PREFIX: &str = "seed:";

/// A key pair for signing intents
#[derive(Clone)]
pub struct KeyPair {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
}

impl KeyPair {
    /// Derive the deterministic keypair for an agent id.
    pub fn derive(agent_id: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(format!("{SEED_PREFIX}{agent_id}").as_bytes());
        let seed: [u8; 32] = hasher.finalize().into();
        Self::from_bytes(&seed)
    }

    /// Create from existing secret key bytes
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(bytes);
        let verifying_key = signing_key.verifying_key();
        Self {
            signing_key,
            verifying_key,
        }
    }

    /// Get the verifying key (public)
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// Get the public key as hex string
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.verifying_key.as_bytes())
    }

    /// Sign a message, returning the raw 64-byte signature.
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        self.signing_key.sign(message).to_vec()
    }
}

/// Verify a raw signature against a public key and message.
///
/// A malformed or mismatched signature is `false`, not an error: bad
/// signatures are an expected, policed input.
pub fn verify(public_key: &VerifyingKey, message: &[u8], signature: &[u8]) -> bool {
    let Ok(sig_bytes) = <[u8; 64]>::try_from(signature) else {
        return false;
    };
    let signature = Ed25519Signature::from_bytes(&sig_bytes);
    public_key.verify(message, &signature).is_ok()
}

/// Parse a hex-encoded public key back into a verifying key.
pub fn verifying_key_from_hex(key_hex: &str) -> CryptoResult<VerifyingKey> {
    let bytes =
        hex::decode(key_hex).map_err(|e| CryptoError::InvalidKeyFormat(e.to_string()))?;
    let key_bytes: [u8; 32] = bytes
        .try_into()
        .map_err(|_| CryptoError::InvalidKeyFormat("public key must be 32 bytes".to_string()))?;
    VerifyingKey::from_bytes(&key_bytes).map_err(|e| CryptoError::InvalidKeyFormat(e.to_string()))
}
