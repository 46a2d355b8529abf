//! Shared helpers for the HTTP integration tests.

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderMap, HeaderValue, Request, Response};
use axum::Router;
use bytes::Bytes;
use tower::ServiceExt;

use common::testkit::TestSigner;
use media_store::{
    MediaBackend, MediaObject, MediaStore, RemoteObjectStore, Result as StoreResult, SaveOptions,
};
use persona_daemon::http_server::{self, Config};
use persona_daemon::ServiceState;

pub const HOST: &str = "localhost:3030";

/// App over an in-memory bucket, controller mounted at `prefix`
pub fn app(prefix: &str) -> (Router, MediaStore) {
    let store = MediaStore::new(RemoteObjectStore::memory("personas.bucket"));
    (app_with_store(prefix, store.clone()), store)
}

pub fn app_with_store(prefix: &str, store: MediaStore) -> Router {
    let addr: SocketAddr = "127.0.0.1:3030".parse().unwrap();
    let config = Config::new(addr, prefix);
    http_server::router(&config, ServiceState::new(store))
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Bytes {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// A fully signed upload
pub struct Upload {
    pub uri: String,
    pub content_path: String,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Upload {
    /// Upload of `body` to `<prefix>/personas/<owner>/<subpath>`
    pub fn new(prefix: &str, owner: &str, subpath: &str, body: &[u8]) -> Self {
        let content_path = format!("/personas/{owner}/{subpath}");
        Self {
            uri: format!("{}{}", prefix.trim_end_matches('/'), content_path),
            content_path,
            content_type: "application/json",
            body: body.to_vec(),
        }
    }

    /// Headers every signed request carries before signing
    pub fn base_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("host", HeaderValue::from_static(HOST));
        headers.insert("content-type", HeaderValue::from_static(self.content_type));
        headers.insert(
            "content-length",
            HeaderValue::from_str(&self.body.len().to_string()).unwrap(),
        );
        headers.insert(
            "date",
            HeaderValue::from_static("Tue, 01 Jan 2030 00:00:00 GMT"),
        );
        headers
    }

    /// Certified by `certifier`, authenticated by `authenticator`
    pub fn signed_by(&self, authenticator: &TestSigner, certifier: &TestSigner) -> Request<Body> {
        let mut headers = self.base_headers();
        certifier.certify_into(&mut headers, &self.content_path, &self.body);
        authenticator.authorize_into(&mut headers, "POST", &self.uri, &self.body);
        self.request(headers)
    }

    pub fn request(&self, headers: HeaderMap) -> Request<Body> {
        let mut request = Request::builder()
            .method("POST")
            .uri(&self.uri)
            .body(Body::from(self.body.clone()))
            .unwrap();
        *request.headers_mut() = headers;
        request
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Backend that counts every call and stores nothing
#[derive(Debug, Default, Clone)]
pub struct CountingBackend {
    pub calls: Arc<AtomicUsize>,
}

impl CountingBackend {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl MediaBackend for CountingBackend {
    fn bucket(&self) -> &str {
        "counting"
    }

    async fn save(&self, _key: &str, _body: Bytes, _options: SaveOptions) -> StoreResult<()> {
        self.hit();
        Ok(())
    }

    async fn fetch(&self, key: &str) -> StoreResult<MediaObject> {
        self.hit();
        Err(media_store::MediaStoreError::NotFound(key.to_string()))
    }

    async fn list(&self, _prefix: &str) -> StoreResult<Vec<String>> {
        self.hit();
        Ok(vec![])
    }

    async fn delete(&self, _keys: &BTreeSet<String>) -> StoreResult<()> {
        self.hit();
        Ok(())
    }
}
