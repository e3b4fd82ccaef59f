//! Column-name vocabularies used to locate retention time, retention index
//! and comment columns in arbitrary tables.
//!
//! A [`ColumnKeys`] value can be passed explicitly to a loader. The
//! process-wide registry behind [`possible_rt_keys`] and friends is seeded
//! from the embedded default vocabulary and may be extended before loading;
//! extending it never changes datasets that were already loaded.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{OnceLock, PoisonError, RwLock};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum KeysError {
    #[error("Failed to read column keys: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse column keys: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Sets of case-sensitive column names recognized for each role
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnKeys {
    #[serde(default)]
    pub retention_time: BTreeSet<String>,

    #[serde(default)]
    pub retention_index: BTreeSet<String>,

    #[serde(default)]
    pub comment: BTreeSet<String>,
}

impl ColumnKeys {
    /// Create an empty vocabulary
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the embedded default vocabulary
    ///
    /// # Errors
    ///
    /// Returns `KeysError::ParseError` if the embedded JSON is malformed.
    pub fn load_embedded() -> Result<Self, KeysError> {
        // Validated at compile time via build.rs
        const EMBEDDED_KEYS: &str = include_str!("../../keys/default_keys.json");
        Self::from_json(EMBEDDED_KEYS)
    }

    /// Load a vocabulary from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `KeysError::ReadError` if the file cannot be read or
    /// `KeysError::ParseError` if it is not valid JSON of the expected shape.
    pub fn load_from_file(path: &Path) -> Result<Self, KeysError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a vocabulary from JSON. Missing groups are empty.
    ///
    /// # Errors
    ///
    /// Returns `KeysError::ParseError` on malformed JSON.
    pub fn from_json(json: &str) -> Result<Self, KeysError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add every key of `other` to this vocabulary
    pub fn merge(&mut self, other: &ColumnKeys) {
        self.retention_time
            .extend(other.retention_time.iter().cloned());
        self.retention_index
            .extend(other.retention_index.iter().cloned());
        self.comment.extend(other.comment.iter().cloned());
    }

    /// First header (in table order) recognized as a retention time column
    #[must_use]
    pub fn find_rt_column(&self, headers: &[String]) -> Option<usize> {
        find_column(&self.retention_time, headers)
    }

    /// First header (in table order) recognized as a retention index column
    #[must_use]
    pub fn find_ri_column(&self, headers: &[String]) -> Option<usize> {
        find_column(&self.retention_index, headers)
    }

    /// Like [`ColumnKeys::find_ri_column`], never returning `rt_column`
    #[must_use]
    pub fn find_ri_column_besides(&self, headers: &[String], rt_column: usize) -> Option<usize> {
        headers
            .iter()
            .enumerate()
            .position(|(i, h)| i != rt_column && self.retention_index.contains(h.trim()))
    }

    /// First header (in table order) recognized as a comment column
    #[must_use]
    pub fn find_comment_column(&self, headers: &[String]) -> Option<usize> {
        find_column(&self.comment, headers)
    }

    /// Snapshot of the process-wide registry
    #[must_use]
    pub fn global() -> Self {
        registry()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn find_column(keys: &BTreeSet<String>, headers: &[String]) -> Option<usize> {
    headers.iter().position(|h| keys.contains(h.trim()))
}

fn registry() -> &'static RwLock<ColumnKeys> {
    static REGISTRY: OnceLock<RwLock<ColumnKeys>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let keys = ColumnKeys::load_embedded().unwrap_or_else(|e| {
            error!(error = %e, "Embedded column keys are invalid, starting empty");
            ColumnKeys::new()
        });
        RwLock::new(keys)
    })
}

fn update_registry(f: impl FnOnce(&mut ColumnKeys)) {
    let mut guard = registry().write().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard);
}

/// Register additional retention time column names
pub fn add_possible_rt_keys<I, S>(keys: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    update_registry(|registry| {
        registry
            .retention_time
            .extend(keys.into_iter().map(Into::into));
    });
}

/// Register additional retention index column names
pub fn add_possible_ri_keys<I, S>(keys: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    update_registry(|registry| {
        registry
            .retention_index
            .extend(keys.into_iter().map(Into::into));
    });
}

/// Register additional comment column names
pub fn add_possible_comment_keys<I, S>(keys: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    update_registry(|registry| {
        registry.comment.extend(keys.into_iter().map(Into::into));
    });
}

/// Merge a whole vocabulary (e.g. loaded with `--keys`) into the registry
pub fn extend_possible_keys(keys: &ColumnKeys) {
    update_registry(|registry| registry.merge(keys));
}

/// Copy of the currently recognized retention time column names
#[must_use]
pub fn possible_rt_keys() -> BTreeSet<String> {
    ColumnKeys::global().retention_time
}

/// Copy of the currently recognized retention index column names
#[must_use]
pub fn possible_ri_keys() -> BTreeSet<String> {
    ColumnKeys::global().retention_index
}

/// Copy of the currently recognized comment column names
#[must_use]
pub fn possible_comment_keys() -> BTreeSet<String> {
    ColumnKeys::global().comment
}
