use http::{HeaderMap, HeaderValue};

use super::{
    Authorization, Certification, EdSigCredential, EdSigError, KeyPath, AUTHORIZATION_HEADER,
    CERTIFICATION_HEADER, EDSIG_SCHEME,
};
use crate::codec::{decode_base64_url, parse_kv_set};
use crate::crypto::Signature;

/// Verify the `Authorization` header against a request canonical message.
///
/// No header at all is an anonymous request and yields `Ok(None)`. A header
/// that is present but does not verify is always an error; callers must not
/// fold the two cases together.
pub fn verify_request_signature(
    headers: &HeaderMap,
    message: &[u8],
) -> Result<Option<Authorization>, EdSigError> {
    let Some(value) = headers.get(AUTHORIZATION_HEADER) else {
        tracing::debug!("no authorization header");
        return Ok(None);
    };

    let credential = verify_header(value, message)?;
    tracing::debug!(pid = %credential.pid(), "request signature verified");
    Ok(Some(Authorization(credential)))
}

/// Verify the `X-Certification` header against a content canonical message.
///
/// Unlike request authentication, a missing header is an error.
pub fn verify_content_signature(
    headers: &HeaderMap,
    message: &[u8],
) -> Result<Certification, EdSigError> {
    let value = headers
        .get(CERTIFICATION_HEADER)
        .ok_or(EdSigError::MissingCertification)?;

    let credential = verify_header(value, message)?;
    tracing::debug!(pid = %credential.pid(), "content certification verified");
    Ok(Certification(credential))
}

fn verify_header(value: &HeaderValue, message: &[u8]) -> Result<EdSigCredential, EdSigError> {
    let header = value
        .to_str()
        .map_err(|_| EdSigError::MalformedInput("header is not visible ASCII".into()))?;

    let result = parse_header(header).and_then(|credential| {
        credential
            .public_key
            .verify(message, &credential.signature)
            .map_err(|_| EdSigError::SignatureMismatch)?;
        Ok(credential)
    });

    if let Err(e) = &result {
        tracing::warn!(code = e.code(), "EdSig verification rejected: {}", e);
    }
    result
}

/// `EdSig kp=<key path>,sig=<signature>` into its parts, without verifying.
fn parse_header(header: &str) -> Result<EdSigCredential, EdSigError> {
    let header = header.trim();
    let (scheme, params) = header
        .split_once(char::is_whitespace)
        .unwrap_or((header, ""));

    if scheme != EDSIG_SCHEME {
        return Err(EdSigError::UnsupportedScheme(scheme.to_string()));
    }
    let params = params.trim();
    if params.is_empty() {
        return Err(EdSigError::MissingParameter);
    }

    let kvset = parse_kv_set(params);
    let key_path: KeyPath = kvset
        .get("kp")
        .ok_or_else(|| EdSigError::MalformedKeyPath("missing kp parameter".into()))?
        .parse()?;
    let public_key = key_path.root_key()?;

    let sig = kvset
        .get("sig")
        .ok_or_else(|| EdSigError::MalformedInput("missing sig parameter".into()))?;
    let sig_bytes = decode_base64_url(sig)
        .map_err(|e| EdSigError::MalformedInput(format!("sig: {}", e)))?;
    let signature = Signature::from_slice(&sig_bytes)
        .map_err(|_| EdSigError::MalformedInput(format!("sig: {} bytes", sig_bytes.len())))?;

    Ok(EdSigCredential {
        scheme: scheme.to_string(),
        public_key,
        signature,
        key_path,
        header: header.to_string(),
    })
}
