//! Cryptographic primitives for EdSig
//!
//! Every signer is an Ed25519 keypair. The public half, base64url encoded, is
//! the signer's principal identifier (`pid`): it names the key that verifies
//! the signature and the `personas/<pid>/` namespace the signer owns.

mod keys;

pub use ed25519_dalek::Signature;
pub use keys::{KeyError, PublicKey, SecretKey, PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE, SIGNATURE_SIZE};
