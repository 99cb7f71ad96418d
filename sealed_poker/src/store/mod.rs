//! Durable table snapshots.
//!
//! The actor persists the aggregate after every committed command so that
//! reads stay consistent with the last committed write across restarts.
//! Anything that can serialize a [`TableRecord`] can back the table; the
//! default is a single JSON file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::game::Table;

/// Storage-layer faults. Fatal to the single operation that hit them,
/// never to the table.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("snapshot io: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot encoding: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// One persisted table state, stamped with its commit time.
#[derive(Debug, Deserialize, Serialize)]
pub struct TableRecord {
    pub saved_at: DateTime<Utc>,
    pub table: Table,
}

impl TableRecord {
    #[must_use]
    pub fn new(table: &Table) -> Self {
        Self {
            saved_at: Utc::now(),
            table: table.clone(),
        }
    }
}

/// A place to keep the latest committed table state.
pub trait SnapshotStore: Send {
    /// Load the last saved record, or `None` for a fresh store.
    fn load(&self) -> Result<Option<TableRecord>, StoreError>;

    /// Replace the stored record.
    fn save(&self, record: &TableRecord) -> Result<(), StoreError>;
}

/// File-backed store writing pretty-printed JSON.
///
/// Writes go to a sibling temp file first and are renamed into place, so
/// a crash mid-write cannot leave a torn record behind.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Option<TableRecord>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }

    fn save(&self, record: &TableRecord) -> Result<(), StoreError> {
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(record)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
