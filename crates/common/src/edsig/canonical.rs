//! Canonical messages: the exact bytes an EdSig signature covers.
//!
//! Both message kinds are newline-joined lines with no trailing newline. Field
//! order is fixed, and a missing header still occupies its line (empty) so
//! that positions never shift.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use crc_fast::{CrcAlgorithm, Digest};
use http::HeaderMap;

use super::{Certification, CONTENT_HASH_HEADER, CREATED_HEADER};

/// Headers covered by request authentication, in signing order.
/// `x-content-hash` is always the locally computed body hash.
pub const REQUEST_SIGNED_HEADERS: [&str; 5] = [
    "content-length",
    "content-type",
    "date",
    "host",
    CONTENT_HASH_HEADER,
];

/// Headers covered by content certification, in signing order.
pub const CONTENT_SIGNED_HEADERS: [&str; 4] = [
    "content-length",
    "content-type",
    CREATED_HEADER,
    CONTENT_HASH_HEADER,
];

/// `CRC32C <decimal digest>` of the body.
pub fn content_hash(body: &[u8]) -> String {
    let mut digest = Digest::new(CrcAlgorithm::Crc32Iscsi);
    digest.update(body);
    format!("CRC32C {}", digest.finalize() as u32)
}

/// Build the request canonical message:
///
/// ```text
/// METHOD path?query
/// content-length
/// content-type
/// date
/// host
/// CRC32C <digest>
/// ```
///
/// `path_and_query` must be the URL as the client sent it, including any
/// mount prefix. Any `x-content-hash` header on the request is ignored.
pub fn request_message(
    method: &str,
    path_and_query: &str,
    headers: &HeaderMap,
    body: &[u8],
) -> Vec<u8> {
    let hash = content_hash(body);
    let mut message = Vec::with_capacity(128 + path_and_query.len());
    message.extend_from_slice(method.as_bytes());
    message.push(b' ');
    message.extend_from_slice(path_and_query.as_bytes());

    for name in REQUEST_SIGNED_HEADERS {
        message.push(b'\n');
        if name == CONTENT_HASH_HEADER {
            message.extend_from_slice(hash.as_bytes());
        } else if let Some(value) = headers.get(name) {
            message.extend_from_slice(value.as_bytes());
        }
    }

    message
}

/// The certified view of one write.
///
/// Taken once per write with [`ContentRecord::snapshot`]. The same record
/// builds the content canonical message and the persisted metadata, so a
/// certification that verified here verifies again against what was stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRecord {
    pub path: String,
    pub content_length: Option<String>,
    pub content_type: Option<String>,
    pub created: String,
    pub content_hash: String,
}

impl ContentRecord {
    /// Snapshot a write, stamping `x-created` with the current time if absent.
    pub fn snapshot(path: &str, headers: &HeaderMap, body: &[u8]) -> Self {
        Self::snapshot_at(path, headers, body, Utc::now())
    }

    /// Snapshot a write using `now` as the fallback creation time.
    pub fn snapshot_at(path: &str, headers: &HeaderMap, body: &[u8], now: DateTime<Utc>) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        };

        let created = header(CREATED_HEADER).unwrap_or_else(|| {
            let created = now.to_rfc3339_opts(SecondsFormat::Millis, true);
            tracing::debug!(%path, %created, "no x-created header, stamping write");
            created
        });

        Self {
            path: path.to_string(),
            content_length: header("content-length"),
            content_type: header("content-type"),
            created,
            content_hash: content_hash(body),
        }
    }

    /// Build the content canonical message:
    ///
    /// ```text
    /// path
    /// content-length
    /// content-type
    /// x-created
    /// CRC32C <digest>
    /// ```
    pub fn to_message(&self) -> Vec<u8> {
        [
            self.path.as_str(),
            self.content_length.as_deref().unwrap_or(""),
            self.content_type.as_deref().unwrap_or(""),
            self.created.as_str(),
            self.content_hash.as_str(),
        ]
        .join("\n")
        .into_bytes()
    }

    /// Object metadata recorded alongside a certified write.
    pub fn metadata(&self, certification: &Certification) -> BTreeMap<String, String> {
        BTreeMap::from([
            (
                "certification".to_string(),
                certification.header_value().to_string(),
            ),
            ("content-hash".to_string(), self.content_hash.clone()),
            ("created".to_string(), self.created.clone()),
        ])
    }
}
