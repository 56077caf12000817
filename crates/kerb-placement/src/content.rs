//! Content cache service
//!
//! Registry of content ids the host application has loaded (models, mixins,
//! stencil textures). It is owned by the application root and passed to
//! generation by reference; strategies never reach for a global.

use crate::placement::ContentRef;
use kerb_core::{KerbError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metadata for one registered piece of content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentEntry {
    pub id: String,
    /// Where the host loaded it from (URL, asset path)
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// TOML manifest format: a list of `[[content]]` tables
#[derive(Debug, Deserialize)]
pub struct ContentFile {
    #[serde(default)]
    pub content: Vec<ContentEntry>,
}

/// Known content, keyed by id
#[derive(Debug, Default)]
pub struct ContentCache {
    entries: HashMap<String, ContentEntry>,
}

impl ContentCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cache from a TOML manifest
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ContentFile = toml::from_str(content)
            .map_err(|e| KerbError::ParseError(format!("content manifest: {}", e)))?;
        let mut cache = Self::new();
        for entry in file.content {
            cache.register(entry);
        }
        Ok(cache)
    }

    /// Register (or replace) an entry
    pub fn register(&mut self, entry: ContentEntry) {
        self.entries.insert(entry.id.clone(), entry);
    }

    /// Register bare ids with no metadata
    pub fn register_ids<S: AsRef<str>>(&mut self, ids: impl IntoIterator<Item = S>) {
        for id in ids {
            let id = id.as_ref().to_string();
            self.register(ContentEntry {
                id,
                source: None,
                tags: Vec::new(),
            });
        }
    }

    pub fn get(&self, id: &str) -> Option<&ContentEntry> {
        self.entries.get(id)
    }

    pub fn contains(&self, content: &ContentRef) -> bool {
        self.entries.contains_key(content.as_str())
    }

    /// Resolve a reference, reporting unknown ids as errors
    pub fn resolve(&self, content: &ContentRef) -> Result<&ContentEntry> {
        self.entries
            .get(content.as_str())
            .ok_or_else(|| KerbError::InvalidContentRef(content.to_string()))
    }

    /// All entries carrying a tag
    pub fn by_tag(&self, tag: &str) -> Vec<&ContentEntry> {
        self.entries
            .values()
            .filter(|e| e.tags.iter().any(|t| t == tag))
            .collect()
    }

    pub fn remove(&mut self, id: &str) -> Option<ContentEntry> {
        self.entries.remove(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
