//! Shared test utilities for the frontpage test suite.
//!
//! Provides the fixture content directory and an in-memory [`Transport`] that
//! records every request it receives.
//!
//! # Usage
//!
//! ```text
//! use crate::test_helpers::*;
//!
//! let transport = MockTransport::ok(r#"{"headingLine1": "Hi"}"#)
//!     .route("/latest-news", Reply::Status(500));
//! let source = RemoteSource::new(&remote, transport.clone());
//! // ... resolve ...
//! assert_eq!(transport.request_count(), 2);
//! ```

use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use crate::content::{StaticSource, Transport, TransportError, TransportResponse};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    copy_dir_recursive(&fixtures_dir(), tmp.path()).unwrap();
    tmp
}

pub fn fixtures_dir() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content")
}

/// The fixture locale document, loaded as a static source.
pub fn fixture_source() -> StaticSource {
    StaticSource::load(&fixtures_dir().join("en.json")).unwrap()
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// In-memory transport
// =========================================================================

/// What the mock answers with.
#[derive(Debug, Clone)]
pub enum Reply {
    Body(String),
    Status(u16),
    Network(String),
}

/// One recorded request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub url: String,
    pub bearer: Option<String>,
}

/// Transport answering from canned replies.
///
/// Clones share the request log, so a test can keep one clone and hand the
/// other to the source under test.
#[derive(Debug, Clone)]
pub struct MockTransport {
    fallback: Reply,
    routes: Vec<(String, Reply)>,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl MockTransport {
    pub fn new(fallback: Reply) -> Self {
        Self {
            fallback,
            routes: Vec::new(),
            requests: Arc::default(),
        }
    }

    /// Every request gets a 200 with `body`.
    pub fn ok(body: &str) -> Self {
        Self::new(Reply::Body(body.to_string()))
    }

    /// Every request gets an empty response with `status`.
    pub fn status(status: u16) -> Self {
        Self::new(Reply::Status(status))
    }

    /// Every request fails before a response arrives.
    pub fn network(message: &str) -> Self {
        Self::new(Reply::Network(message.to_string()))
    }

    /// Answer URLs ending in `suffix` with `reply` instead of the fallback.
    pub fn route(mut self, suffix: &str, reply: Reply) -> Self {
        self.routes.push((suffix.to_string(), reply));
        self
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }

    pub fn bearers(&self) -> Vec<Option<String>> {
        self.requests().into_iter().map(|r| r.bearer).collect()
    }
}

impl Transport for MockTransport {
    fn get(&self, url: &str, bearer: Option<&str>) -> Result<TransportResponse, TransportError> {
        self.requests.lock().unwrap().push(Request {
            url: url.to_string(),
            bearer: bearer.map(str::to_string),
        });
        let reply = self
            .routes
            .iter()
            .find(|(suffix, _)| url.ends_with(suffix.as_str()))
            .map(|(_, reply)| reply)
            .unwrap_or(&self.fallback);
        match reply {
            Reply::Body(body) => Ok(TransportResponse {
                status: 200,
                body: body.clone(),
            }),
            Reply::Status(status) => Ok(TransportResponse {
                status: *status,
                body: String::new(),
            }),
            Reply::Network(message) => Err(TransportError(message.clone())),
        }
    }
}
