//! Content sources: where the homepage's text, links and image paths come from.
//!
//! A [`ContentSource`] answers three kinds of question for a dot-delimited
//! [`ContentKey`]:
//!
//! | Operation | Leaf shape | Result |
//! |-----------|------------|--------|
//! | [`resolve_scalar`](ContentSource::resolve_scalar) | string | the string, verbatim |
//! | [`resolve_collection`](ContentSource::resolve_collection) | array or object | ordered [`Record`]s |
//! | [`resolve_record`](ContentSource::resolve_record) | object | one [`Record`] |
//!
//! Two interchangeable implementations exist:
//!
//! - [`StaticSource`]: the bundled locale document, loaded once and immutable.
//! - [`RemoteSource`]: persisted queries against a headless CMS, fetched
//!   fresh on every call.
//!
//! Which one a build uses is decided once, by [`SourceKind::select`], from the
//! resolved configuration.
//!
//! ## Collections
//!
//! Collections keep source order and are never deduplicated. Object leaves
//! (the i18n `key → label` form) become one record per entry:
//!
//! ```text
//! { "a": "Pensions", "b": "ISAs" }   →   [{key: a, label: Pensions}, {key: b, label: ISAs}]
//! [ "Pensions", {"label": "ISAs"} ]  →   [{label: Pensions}, {label: ISAs}]
//! ```
//!
//! ## Failure
//!
//! The static source fails with [`ContentError::KeyNotFound`] for absent keys.
//! The remote source never fails any other way than
//! [`ContentError::Unavailable`], tagged with an [`UnavailableCause`] so callers
//! can tell a 500 from a dropped connection while still treating both as
//! "no content".

mod local;
mod remote;

pub use local::StaticSource;
pub use remote::{
    HttpTransport, PERSISTED_QUERIES, QueryRoute, QueryTarget, ROUTES, RemoteSource, Transport,
    TransportError, TransportResponse, persisted_query_url, target_for,
};

use crate::config::{DataSource, RemoteConfig, SiteConfig};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// A raw content record: field name → JSON value, in source order.
pub type Record = serde_json::Map<String, Value>;

/// A parsed dot-delimited content path such as `hero.headingLine1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentKey {
    raw: String,
}

impl ContentKey {
    /// Parse a dot path. Empty keys and empty segments (`a..b`, `.a`) are rejected.
    pub fn parse(raw: &str) -> Result<Self, ContentError> {
        if raw.is_empty() || raw.split('.').any(str::is_empty) {
            return Err(ContentError::InvalidKey(raw.to_string()));
        }
        Ok(Self {
            raw: raw.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.raw.split('.')
    }

    /// First segment: the section or persisted query the key belongs to.
    pub fn head(&self) -> &str {
        self.segments().next().unwrap_or_default()
    }

    /// Segments after the first, possibly none.
    pub fn rest(&self) -> impl Iterator<Item = &str> {
        self.segments().skip(1)
    }
}

impl FromStr for ContentKey {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContentError {
    #[error("content key not found: {0}")]
    KeyNotFound(String),
    #[error("content at '{key}' is not a {expected}")]
    WrongKind { key: String, expected: &'static str },
    #[error("invalid content key '{0}'")]
    InvalidKey(String),
    #[error("content unavailable for '{key}': {cause}")]
    Unavailable { key: String, cause: UnavailableCause },
}

impl ContentError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }

    /// Why remote content was unavailable, if that is what happened.
    pub fn cause(&self) -> Option<&UnavailableCause> {
        match self {
            Self::Unavailable { cause, .. } => Some(cause),
            _ => None,
        }
    }
}

/// Why a remote resolution produced no content.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnavailableCause {
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("response has no field '{0}'")]
    MissingField(String),
}

/// Errors that prevent a source from being constructed at all.
#[derive(Error, Debug)]
pub enum SourceLoadError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("JSON error in content document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("content document root must be an object")]
    NotAnObject,
    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Capability shared by every content backend.
///
/// Implementations must be `Send + Sync`: the page composer resolves
/// independent slots on rayon workers.
pub trait ContentSource: Send + Sync {
    /// Resolve a string leaf.
    fn resolve_scalar(&self, key: &ContentKey) -> Result<String, ContentError>;

    /// Resolve an ordered collection of records.
    fn resolve_collection(&self, key: &ContentKey) -> Result<Vec<Record>, ContentError>;

    /// Resolve a single record (a content fragment).
    fn resolve_record(&self, key: &ContentKey) -> Result<Record, ContentError>;

    /// Human-readable identifier for logs and `status` output.
    fn describe(&self) -> String;
}

/// Which backend a build resolves content from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Static,
    Remote,
}

impl SourceKind {
    /// Select the backend from configuration.
    ///
    /// - `mock` → static, regardless of host
    /// - `remote` → remote
    /// - `auto` → remote when a non-empty host is configured, static otherwise
    pub fn select(remote: &RemoteConfig) -> Self {
        match remote.data_source {
            DataSource::Mock => Self::Static,
            DataSource::Remote => Self::Remote,
            DataSource::Auto if remote.host().is_some() => Self::Remote,
            DataSource::Auto => Self::Static,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Static => "static document",
            Self::Remote => "remote CMS",
        })
    }
}

/// Build the content source a configuration selects.
///
/// The static variant reads `<content_dir>/<locale>.json`.
pub fn open_source(
    config: &SiteConfig,
    content_dir: &Path,
) -> Result<Box<dyn ContentSource>, SourceLoadError> {
    let kind = SourceKind::select(&config.remote);
    tracing::debug!(%kind, "selected content source");
    match kind {
        SourceKind::Static => {
            let source = StaticSource::load(&content_dir.join(config.document_name()))?;
            Ok(Box::new(source))
        }
        SourceKind::Remote => {
            let transport = HttpTransport::new(config.remote.timeout_secs)?;
            Ok(Box::new(RemoteSource::new(&config.remote, transport)))
        }
    }
}

// ============================================================================
// Shared leaf handling
// ============================================================================

/// Walk `segments` from `root`. Numeric segments index into arrays.
pub(crate) fn walk<'a, 'k>(
    root: &'a Value,
    segments: impl IntoIterator<Item = &'k str>,
) -> Option<&'a Value> {
    segments.into_iter().try_fold(root, |node, segment| match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

pub(crate) fn scalar_from(value: &Value, key: &ContentKey) -> Result<String, ContentError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        _ => Err(wrong_kind(key, "string")),
    }
}

pub(crate) fn record_from(value: &Value, key: &ContentKey) -> Result<Record, ContentError> {
    match value {
        Value::Object(map) => Ok(map.clone()),
        _ => Err(wrong_kind(key, "record")),
    }
}

pub(crate) fn collection_from(
    value: &Value,
    key: &ContentKey,
) -> Result<Vec<Record>, ContentError> {
    to_records(value).ok_or_else(|| wrong_kind(key, "collection of records"))
}

/// Convert an array or object leaf into ordered records.
///
/// Returns `None` for scalar leaves and for collections holding anything
/// other than strings and objects.
pub(crate) fn to_records(value: &Value) -> Option<Vec<Record>> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Object(map) => Some(map.clone()),
                Value::String(label) => Some(labelled(None, label)),
                _ => None,
            })
            .collect(),
        Value::Object(entries) => entries
            .iter()
            .map(|(entry_key, item)| match item {
                Value::String(label) => Some(labelled(Some(entry_key), label)),
                Value::Object(map) => {
                    let mut record = Record::new();
                    record.insert("key".to_string(), Value::String(entry_key.clone()));
                    for (field, v) in map {
                        record.insert(field.clone(), v.clone());
                    }
                    Some(record)
                }
                _ => None,
            })
            .collect(),
        _ => None,
    }
}

fn labelled(key: Option<&String>, label: &str) -> Record {
    let mut record = Record::new();
    if let Some(key) = key {
        record.insert("key".to_string(), Value::String(key.clone()));
    }
    record.insert("label".to_string(), Value::String(label.to_string()));
    record
}

fn wrong_kind(key: &ContentKey, expected: &'static str) -> ContentError {
    ContentError::WrongKind {
        key: key.to_string(),
        expected,
    }
}
