use ed25519_dalek::{Signer, SigningKey, VerifyingKey};

use crate::codec::{decode_base64_url, encode_base64_url, CodecError};

/// Size of Ed25519 private key in bytes
pub const PRIVATE_KEY_SIZE: usize = 32;
/// Size of Ed25519 public key in bytes
pub const PUBLIC_KEY_SIZE: usize = 32;
/// Size of an Ed25519 signature in bytes
pub const SIGNATURE_SIZE: usize = 64;

/// Errors that can occur during key operations
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("invalid public key size, expected 32, got {0}")]
    InvalidSize(usize),
    #[error("invalid public key: {0}")]
    InvalidPoint(#[from] ed25519_dalek::SignatureError),
    #[error("public key decode error: {0}")]
    Decode(#[from] CodecError),
}

/// Public key of a signer
///
/// A thin wrapper around an Ed25519 `VerifyingKey`. Its base64url form is the
/// principal identifier carried as the first element of an EdSig key path.
///
/// # Examples
///
/// ```ignore
/// let secret_key = SecretKey::from([7u8; PRIVATE_KEY_SIZE]);
/// let pid = secret_key.public().to_base64_url();
/// let recovered = PublicKey::from_base64_url(&pid)?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(VerifyingKey);

impl TryFrom<&[u8]> for PublicKey {
    type Error = KeyError;
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let buff: [u8; PUBLIC_KEY_SIZE] = bytes
            .try_into()
            .map_err(|_| KeyError::InvalidSize(bytes.len()))?;
        Ok(PublicKey(VerifyingKey::from_bytes(&buff)?))
    }
}

impl PublicKey {
    /// Parse a public key from its base64url encoding (a principal identifier)
    pub fn from_base64_url(s: &str) -> Result<Self, KeyError> {
        let bytes = decode_base64_url(s)?;
        Self::try_from(bytes.as_slice())
    }

    /// Encode as base64url, i.e. the principal identifier for this key
    pub fn to_base64_url(&self) -> String {
        encode_base64_url(self.to_bytes())
    }

    /// Convert public key to raw bytes
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.0.to_bytes()
    }

    /// Verify an Ed25519 signature on a message.
    ///
    /// Uses strict verification, so small-order keys and non-canonical
    /// signatures are rejected along with plain mismatches.
    pub fn verify(
        &self,
        msg: &[u8],
        signature: &ed25519_dalek::Signature,
    ) -> Result<(), ed25519_dalek::SignatureError> {
        self.0.verify_strict(msg, signature)
    }
}

/// Secret key of a signer
///
/// Only clients and test fixtures hold one; the server verifies and never signs.
#[derive(Debug, Clone)]
pub struct SecretKey(SigningKey);

impl From<[u8; PRIVATE_KEY_SIZE]> for SecretKey {
    fn from(secret: [u8; PRIVATE_KEY_SIZE]) -> Self {
        Self(SigningKey::from_bytes(&secret))
    }
}

impl SecretKey {
    /// Derive the public key from this secret key
    pub fn public(&self) -> PublicKey {
        PublicKey(self.0.verifying_key())
    }

    /// Convert secret key to raw bytes
    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_SIZE] {
        self.0.to_bytes()
    }

    /// Sign a message with this secret key using Ed25519.
    ///
    /// Returns a detached signature that can be verified with the corresponding public key.
    pub fn sign(&self, msg: &[u8]) -> ed25519_dalek::Signature {
        self.0.sign(msg)
    }
}
