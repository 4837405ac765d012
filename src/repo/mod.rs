//! Triangle repository seam.
//!
//! One async trait, two interchangeable backends: a SQLite-backed live
//! store and an in-memory fixture store. Callers must not be able to tell
//! them apart except by latency and data content.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::model::Triangle;

pub mod fixture;
pub mod sqlite;

/// A backing-store call failed. The message names the logical operation;
/// the raw driver error never crosses this boundary (it is logged at the
/// point of failure instead).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct StorageError {
    message: String,
}

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Selector-list projection of a completed triangle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriangleOption {
    pub value: String,
    pub label: String,
}

/// Read-only query surface over a triangle collection. Lookups that find
/// nothing return `Ok(None)`; only backing-store failures are errors.
#[async_trait]
pub trait TriangleRepository: Send + Sync {
    /// All records, newest first by creation time.
    async fn find_all(&self) -> Result<Vec<Triangle>, StorageError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Triangle>, StorageError>;

    /// Exact match on display name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Triangle>, StorageError>;

    /// Triangles of one valuation run, ordered by lane position.
    async fn find_by_valuation_id(
        &self,
        valuation_id: &str,
    ) -> Result<Vec<Triangle>, StorageError>;

    /// `{value, label}` projection of every completed triangle, newest
    /// first by creation time. Feeds comparison-selector lists.
    async fn find_all_completed(&self) -> Result<Vec<TriangleOption>, StorageError>;
}

#[derive(Clone, Copy, Debug)]
pub enum RepoKind {
    Sqlite,
    Fixture,
}

impl RepoKind {
    pub fn from_config(cfg: &Config) -> Self {
        match cfg.repo_backend.as_str() {
            "sqlite" => RepoKind::Sqlite,
            _ => RepoKind::Fixture,
        }
    }

    pub fn build(self, cfg: &Config) -> Result<Box<dyn TriangleRepository + Send + Sync>> {
        match self {
            RepoKind::Sqlite => Ok(Box::new(sqlite::SqliteTriangleStore::open(&cfg.sqlite_path)?)),
            RepoKind::Fixture => Ok(Box::new(fixture::FixtureTriangleStore::with_delay_ms(
                cfg.fixture_delay_ms,
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_keeps_only_the_message() {
        let err = StorageError::new("failed to fetch triangle with id t-1");
        assert_eq!(err.to_string(), "failed to fetch triangle with id t-1");
        assert_eq!(err.message(), "failed to fetch triangle with id t-1");
    }

    #[test]
    fn kind_defaults_to_fixture() {
        let cfg = Config::default();
        assert!(matches!(RepoKind::from_config(&cfg), RepoKind::Fixture));
        let cfg = Config { repo_backend: "sqlite".into(), ..Config::default() };
        assert!(matches!(RepoKind::from_config(&cfg), RepoKind::Sqlite));
    }
}
