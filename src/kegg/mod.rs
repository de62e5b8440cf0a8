//! KEGG REST collaborator
//!
//! Text is obtained through [`TextFetcher`] (transport + on-disk cache) and
//! turned into graph inputs through [`KeggSource`]. [`KeggClient`] implements
//! both the raw KEGG commands and `KeggSource` on top of any fetcher;
//! [`HttpFetcher`] is the blocking HTTP implementation.

pub mod cache;
pub mod client;
pub mod config;
pub mod fetcher;

use crate::graph::NodeId;
use crate::parser::{ColumnRecord, ParseError};
use thiserror::Error;

pub use cache::{slugify, ResponseCache};
pub use client::{is_database_key, DrugInteraction, KeggClient, Sequence, SequenceFormat};
pub use config::KeggConfig;
pub use fetcher::HttpFetcher;

/// KEGG collaborator errors
#[derive(Error, Debug)]
pub enum KeggError {
    #[error("Request to {url} failed with status {status}: {reason}")]
    Transport {
        url: String,
        status: u16,
        reason: String,
    },

    #[error("Empty response for '{0}'")]
    EmptyResponse(String),

    #[error("Invalid KEGG key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type KeggResult<T> = Result<T, KeggError>;

impl KeggError {
    pub(crate) fn invalid_key(key: &str, reason: impl Into<String>) -> Self {
        KeggError::InvalidKey {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Source of raw response text
pub trait TextFetcher {
    /// Text for `url`, served from the cache under `cache_key` unless
    /// `force_refresh` is set. Empty text is an error.
    fn fetch_text(&self, url: &str, cache_key: &str, force_refresh: bool) -> KeggResult<String>;
}

/// Source of graph inputs
pub trait KeggSource {
    /// Parsed INFO record of a database
    fn fetch_metadata(&self, category: &str) -> KeggResult<DatabaseInfo>;

    /// Index-aligned `(source, target)` node lists of the LINK relation
    fn fetch_link(&self, source: &str, target: &str) -> KeggResult<(Vec<NodeId>, Vec<NodeId>)>;
}

/// Parsed INFO response of a database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseInfo {
    pub database: String,
    pub fields: ColumnRecord,
}

impl DatabaseInfo {
    pub fn new(database: impl Into<String>, fields: ColumnRecord) -> Self {
        DatabaseInfo {
            database: database.into(),
            fields,
        }
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.fields.get(key).map(Vec::as_slice)
    }

    /// Databases this one is cross-referenced with; empty when none are listed
    pub fn linked_db(&self) -> &[String] {
        self.get("linked db").unwrap_or(&[])
    }

    pub fn links_to(&self, database: &str) -> bool {
        self.linked_db().iter().any(|db| db == database)
    }
}
