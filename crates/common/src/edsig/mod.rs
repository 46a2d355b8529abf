//! EdSig: Ed25519 signatures over canonicalized HTTP data
//!
//! A writer proves two independent things on every upload:
//!
//! - **Request authentication** (`Authorization` header): the signer vouches
//!   for this exact request, bound to method, original URL, a fixed header
//!   allow-list and a CRC32C of the body.
//! - **Content certification** (`X-Certification` header): the signer vouches
//!   for the stored bytes under a path, independent of the request that
//!   carried them, so the certification can be persisted and rechecked later.
//!
//! Both headers share one format:
//!
//! ```text
//! EdSig kp=<root>[:<child>...],sig=<base64url signature>
//! ```
//!
//! where `<root>` is the signer's base64url public key and principal
//! identifier (`pid`).

mod canonical;
mod sign;
mod verify;

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use crate::crypto::{PublicKey, Signature};

pub use canonical::{content_hash, request_message, ContentRecord};
pub use canonical::{CONTENT_SIGNED_HEADERS, REQUEST_SIGNED_HEADERS};
pub use sign::{create_edsig_header, sign_content, sign_request};
pub use verify::{verify_content_signature, verify_request_signature};

/// Scheme token that must open every EdSig header value
pub const EDSIG_SCHEME: &str = "EdSig";

/// Request authentication header
pub const AUTHORIZATION_HEADER: &str = "authorization";
/// Content certification header
pub const CERTIFICATION_HEADER: &str = "x-certification";
/// Body hash, always computed locally and never trusted from a client
pub const CONTENT_HASH_HEADER: &str = "x-content-hash";
/// Creation timestamp bound into content certification
pub const CREATED_HEADER: &str = "x-created";

/// Which of the two EdSig checks produced a value or an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureRole {
    Request,
    Content,
}

impl fmt::Display for SignatureRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureRole::Request => write!(f, "authentication"),
            SignatureRole::Content => write!(f, "certification"),
        }
    }
}

/// Every way an EdSig check can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EdSigError {
    #[error("unsupported auth scheme: {0:?}")]
    UnsupportedScheme(String),
    #[error("missing required second EdSig parameter")]
    MissingParameter,
    #[error("malformed key path: {0}")]
    MalformedKeyPath(String),
    #[error("malformed EdSig input: {0}")]
    MalformedInput(String),
    #[error("EdSig signature check failed")]
    SignatureMismatch,
    #[error("content certification header is missing")]
    MissingCertification,
    #[error("EdSig {role} principal does not match path owner {owner}")]
    PrincipalMismatch { role: SignatureRole, owner: String },
}

impl EdSigError {
    /// Stable machine-readable code, one per kind.
    pub fn code(&self) -> &'static str {
        match self {
            EdSigError::UnsupportedScheme(_) => "unsupported_scheme",
            EdSigError::MissingParameter => "missing_parameter",
            EdSigError::MalformedKeyPath(_) => "malformed_key_path",
            EdSigError::MalformedInput(_) => "malformed_input",
            EdSigError::SignatureMismatch => "signature_mismatch",
            EdSigError::MissingCertification => "missing_certification",
            EdSigError::PrincipalMismatch { .. } => "principal_mismatch",
        }
    }
}

/// Colon separated key chain, `root[:child...]`.
///
/// The root is the principal identifier and the only element used for
/// verification; child elements are carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    /// Key path consisting of a single root key
    pub fn root(key: &PublicKey) -> Self {
        KeyPath(vec![key.to_base64_url()])
    }

    /// The principal identifier, i.e. the first element
    pub fn pid(&self) -> &str {
        &self.0[0]
    }

    pub fn elements(&self) -> &[String] {
        &self.0
    }

    /// Decode the root element as the public key that signed
    pub fn root_key(&self) -> Result<PublicKey, EdSigError> {
        PublicKey::from_base64_url(self.pid())
            .map_err(|e| EdSigError::MalformedKeyPath(format!("root key: {}", e)))
    }
}

impl FromStr for KeyPath {
    type Err = EdSigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let elements: Vec<String> = s.split(':').map(str::to_string).collect();
        if elements.iter().any(|e| e.is_empty()) {
            return Err(EdSigError::MalformedKeyPath(format!(
                "empty element in {:?}",
                s
            )));
        }
        Ok(KeyPath(elements))
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(":"))
    }
}

/// A verified EdSig header: who signed, with what, and the raw header value.
#[derive(Debug, Clone)]
pub struct EdSigCredential {
    scheme: String,
    public_key: PublicKey,
    signature: Signature,
    key_path: KeyPath,
    header: String,
}

impl EdSigCredential {
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn key_path(&self) -> &KeyPath {
        &self.key_path
    }

    /// Principal identifier of the signer
    pub fn pid(&self) -> &str {
        self.key_path.pid()
    }

    /// The header value exactly as received
    pub fn header_value(&self) -> &str {
        &self.header
    }

    fn ensure_owner(&self, owner: &str, role: SignatureRole) -> Result<(), EdSigError> {
        if self.pid() != owner {
            tracing::warn!(%role, pid = %self.pid(), %owner, "EdSig principal mismatch");
            return Err(EdSigError::PrincipalMismatch {
                role,
                owner: owner.to_string(),
            });
        }
        Ok(())
    }
}

/// Verified request authentication. Lives for one request.
#[derive(Debug, Clone)]
pub struct Authorization(EdSigCredential);

impl Authorization {
    /// Fails with `PrincipalMismatch` unless the signer owns `owner`.
    pub fn ensure_principal(&self, owner: &str) -> Result<(), EdSigError> {
        self.0.ensure_owner(owner, SignatureRole::Request)
    }
}

impl Deref for Authorization {
    type Target = EdSigCredential;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Verified content certification. Lives for one write and ends up in metadata.
#[derive(Debug, Clone)]
pub struct Certification(EdSigCredential);

impl Certification {
    /// Fails with `PrincipalMismatch` unless the certifier owns `owner`.
    pub fn ensure_principal(&self, owner: &str) -> Result<(), EdSigError> {
        self.0.ensure_owner(owner, SignatureRole::Content)
    }
}

impl Deref for Certification {
    type Target = EdSigCredential;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::SecretKey;

    #[test]
    fn test_key_path_parse() {
        let kp: KeyPath = "root:child:grandchild".parse().unwrap();
        assert_eq!(kp.pid(), "root");
        assert_eq!(kp.elements().len(), 3);
        assert_eq!(kp.to_string(), "root:child:grandchild");
    }

    #[test]
    fn test_key_path_rejects_empty_elements() {
        for bad in ["", ":child", "root:", "root::child"] {
            assert!(
                matches!(bad.parse::<KeyPath>(), Err(EdSigError::MalformedKeyPath(_))),
                "{:?} should not parse",
                bad
            );
        }
    }

    #[test]
    fn test_key_path_root_key() {
        let public = SecretKey::from([5u8; 32]).public();
        let kp = KeyPath::root(&public);
        assert_eq!(kp.root_key().unwrap(), public);

        let kp: KeyPath = "bob".parse().unwrap();
        assert!(matches!(kp.root_key(), Err(EdSigError::MalformedKeyPath(_))));
    }

    #[test]
    fn test_error_codes_are_distinct() {
        let errors = [
            EdSigError::UnsupportedScheme("Basic".into()),
            EdSigError::MissingParameter,
            EdSigError::MalformedKeyPath("x".into()),
            EdSigError::MalformedInput("x".into()),
            EdSigError::SignatureMismatch,
            EdSigError::MissingCertification,
            EdSigError::PrincipalMismatch {
                role: SignatureRole::Request,
                owner: "alice".into(),
            },
        ];
        let mut codes: Vec<_> = errors.iter().map(EdSigError::code).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }
}
