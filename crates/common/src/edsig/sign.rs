//! Header construction for signers.
//!
//! Messages are built with the same functions the verifier uses, so a header
//! produced here verifies as long as the request arrives unchanged.

use http::HeaderMap;

use super::{request_message, ContentRecord, KeyPath, EDSIG_SCHEME};
use crate::codec::encode_base64_url;
use crate::crypto::SecretKey;

/// `EdSig kp=<key path>,sig=<base64url signature over message>`
pub fn create_edsig_header(secret: &SecretKey, key_path: &KeyPath, message: &[u8]) -> String {
    let signature = secret.sign(message);
    format!(
        "{} kp={},sig={}",
        EDSIG_SCHEME,
        key_path,
        encode_base64_url(signature.to_bytes())
    )
}

/// `Authorization` header value for a request.
///
/// `headers` must already hold the `content-length`, `content-type`, `date`
/// and `host` values that will be sent.
pub fn sign_request(
    secret: &SecretKey,
    key_path: &KeyPath,
    method: &str,
    path_and_query: &str,
    headers: &HeaderMap,
    body: &[u8],
) -> String {
    let message = request_message(method, path_and_query, headers, body);
    create_edsig_header(secret, key_path, &message)
}

/// `X-Certification` header value for a content record.
///
/// The record's `created` value must be sent as `X-Created`, otherwise the
/// server stamps its own time and the certification no longer matches.
pub fn sign_content(secret: &SecretKey, key_path: &KeyPath, record: &ContentRecord) -> String {
    create_edsig_header(secret, key_path, &record.to_message())
}
