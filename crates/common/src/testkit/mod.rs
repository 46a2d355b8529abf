//! Deterministic signers for tests
//!
//! Keys are derived from a fixed seed byte, so a test names its signers and
//! gets the same principal identifiers on every run. Nothing here is reachable
//! from production builds; enable the `testkit` feature from dev-dependencies.
//!
//! # Example
//!
//! ```rust,ignore
//! use common::testkit::TestSigner;
//!
//! let alice = TestSigner::alice();
//! let mut headers = HeaderMap::new();
//! headers.insert("host", HeaderValue::from_static("localhost"));
//! alice.certify_into(&mut headers, &format!("/personas/{}/a.txt", alice.pid()), b"hi");
//! alice.authorize_into(&mut headers, "POST", &format!("/personas/{}/a.txt", alice.pid()), b"hi");
//! ```
use http::{HeaderMap, HeaderValue};

use crate::crypto::SecretKey;
use crate::edsig::{
    sign_content, sign_request, ContentRecord, KeyPath, AUTHORIZATION_HEADER,
    CERTIFICATION_HEADER,
};

/// A named keypair fixture
#[derive(Debug, Clone)]
pub struct TestSigner {
    /// The name of this signer (for debugging)
    pub name: String,
    secret: SecretKey,
    key_path: KeyPath,
}

impl TestSigner {
    /// Create a signer whose secret key is `seed` repeated.
    pub fn new(name: impl Into<String>, seed: u8) -> Self {
        let secret = SecretKey::from([seed; 32]);
        let key_path = KeyPath::root(&secret.public());
        Self {
            name: name.into(),
            secret,
            key_path,
        }
    }

    pub fn alice() -> Self {
        Self::new("alice", 0xa1)
    }

    pub fn bob() -> Self {
        Self::new("bob", 0xb0)
    }

    /// Principal identifier (base64url public key)
    pub fn pid(&self) -> String {
        self.key_path.pid().to_string()
    }

    pub fn secret(&self) -> &SecretKey {
        &self.secret
    }

    pub fn key_path(&self) -> &KeyPath {
        &self.key_path
    }

    /// Sign the request described by `headers` and insert `Authorization`.
    ///
    /// Call this last: every header the request message covers must already be set.
    pub fn authorize_into(
        &self,
        headers: &mut HeaderMap,
        method: &str,
        path_and_query: &str,
        body: &[u8],
    ) {
        let value = sign_request(
            &self.secret,
            &self.key_path,
            method,
            path_and_query,
            headers,
            body,
        );
        headers.insert(AUTHORIZATION_HEADER, header_value(&value));
    }

    /// Certify `body` under `content_path` and insert `X-Certification`.
    ///
    /// If `headers` has no `x-created`, one is stamped and inserted so the
    /// server snapshots the same value. Returns the certified record.
    pub fn certify_into(
        &self,
        headers: &mut HeaderMap,
        content_path: &str,
        body: &[u8],
    ) -> ContentRecord {
        let record = ContentRecord::snapshot(content_path, headers, body);
        if !headers.contains_key("x-created") {
            headers.insert("x-created", header_value(&record.created));
        }
        let value = sign_content(&self.secret, &self.key_path, &record);
        headers.insert(CERTIFICATION_HEADER, header_value(&value));
        record
    }
}

fn header_value(value: &str) -> HeaderValue {
    HeaderValue::from_str(value).expect("EdSig header values are ASCII")
}
