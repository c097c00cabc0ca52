//! Bundled locale document backend.

use super::{
    ContentError, ContentKey, ContentSource, Record, SourceLoadError, collection_from,
    record_from, scalar_from, walk,
};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Content backed by an immutable JSON document loaded at startup.
#[derive(Debug, Clone)]
pub struct StaticSource {
    document: Value,
    origin: Option<PathBuf>,
}

impl StaticSource {
    /// Load a locale document from disk.
    pub fn load(path: &Path) -> Result<Self, SourceLoadError> {
        let content = fs::read_to_string(path).map_err(|source| SourceLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut source = Self::from_json(&content)?;
        source.origin = Some(path.to_path_buf());
        tracing::debug!(path = %path.display(), "loaded content document");
        Ok(source)
    }

    /// Parse a locale document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SourceLoadError> {
        Self::from_value(serde_json::from_str(json)?)
    }

    pub fn from_value(document: Value) -> Result<Self, SourceLoadError> {
        if !document.is_object() {
            return Err(SourceLoadError::NotAnObject);
        }
        Ok(Self {
            document,
            origin: None,
        })
    }

    fn lookup(&self, key: &ContentKey) -> Result<&Value, ContentError> {
        walk(&self.document, key.segments())
            .ok_or_else(|| ContentError::KeyNotFound(key.to_string()))
    }
}

impl ContentSource for StaticSource {
    fn resolve_scalar(&self, key: &ContentKey) -> Result<String, ContentError> {
        scalar_from(self.lookup(key)?, key)
    }

    fn resolve_collection(&self, key: &ContentKey) -> Result<Vec<Record>, ContentError> {
        collection_from(self.lookup(key)?, key)
    }

    fn resolve_record(&self, key: &ContentKey) -> Result<Record, ContentError> {
        record_from(self.lookup(key)?, key)
    }

    fn describe(&self) -> String {
        match &self.origin {
            Some(path) => format!("static document {}", path.display()),
            None => "static document (in memory)".to_string(),
        }
    }
}
