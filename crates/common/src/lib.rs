/**
 * Wire encodings shared by the EdSig headers:
 *  base64url and the lenient `k=v,k=v` parameter set.
 */
pub mod codec;
/**
 * Ed25519 key types.
 *  Public keys double as principal identifiers
 *  once base64url encoded.
 */
pub mod crypto;
/**
 * The EdSig protocol.
 *  - Canonical request and content messages
 *  - Verification of `Authorization` and `X-Certification`
 *  - Header construction for signers
 */
pub mod edsig;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

pub mod prelude {
    pub use crate::codec::{decode_base64_url, encode_base64_url, parse_kv_set, CodecError};
    pub use crate::crypto::{PublicKey, SecretKey, Signature};
    pub use crate::edsig::{
        Authorization, Certification, ContentRecord, EdSigError, KeyPath, SignatureRole,
    };
}
