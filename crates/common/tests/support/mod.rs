//! Shared fixtures for the EdSig integration tests
#![allow(dead_code)]

use common::crypto::SecretKey;
use common::edsig::KeyPath;
use http::{HeaderMap, HeaderValue};

/// A signer with a fixed key, so principal identifiers are stable across runs
pub fn signer(seed: u8) -> (SecretKey, KeyPath) {
    let secret = SecretKey::from([seed; 32]);
    let key_path = KeyPath::root(&secret.public());
    (secret, key_path)
}

/// The headers a client sends with an upload of `body`
pub fn upload_headers(body: &[u8], content_type: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("host", HeaderValue::from_static("personas.example.com"));
    headers.insert("date", HeaderValue::from_static("Mon, 01 Jun 2020 12:00:00 GMT"));
    headers.insert("content-type", HeaderValue::from_static(content_type));
    headers.insert(
        "content-length",
        HeaderValue::from_str(&body.len().to_string()).unwrap(),
    );
    headers.insert(
        "x-created",
        HeaderValue::from_static("2020-06-01T12:00:00.000Z"),
    );
    headers
}

pub fn header_value(value: &str) -> HeaderValue {
    HeaderValue::from_str(value).unwrap()
}
