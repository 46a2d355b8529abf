//! Encodings used inside EdSig header values.
//!
//! Keys and signatures travel as base64url (RFC 4648 §5) without padding.
//! Decoding is forgiving: padded input and the standard `+`/`/` alphabet are
//! both accepted, since clients built on plain base64 libraries emit either.

use std::collections::HashMap;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE_NO_PAD};
use base64::engine::DecodePaddingMode;
use base64::Engine;

/// url-safe alphabet, padding optional on decode
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("malformed base64url input: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Encode bytes as unpadded base64url.
pub fn encode_base64_url(bytes: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode base64url, padded or not. `+` and `/` are read as `-` and `_`.
pub fn decode_base64_url(s: &str) -> Result<Vec<u8>, CodecError> {
    let normalized: String = s
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            c => c,
        })
        .collect();
    Ok(URL_SAFE_LENIENT.decode(normalized)?)
}

/// Parse a `key=value,key=value` parameter set.
///
/// Each field is split on its first `=`, and both sides are trimmed. Fields
/// with no `=` or with an empty value are dropped rather than rejected, so a
/// trailing `,` or a dangling `kp=` never fails the parse on its own. A later
/// duplicate key replaces an earlier one.
pub fn parse_kv_set(s: &str) -> HashMap<String, String> {
    s.split(',')
        .filter_map(|field| {
            let (key, value) = field.split_once('=')?;
            let value = value.trim();
            if value.is_empty() {
                return None;
            }
            Some((key.trim().to_string(), value.to_string()))
        })
        .collect()
}
