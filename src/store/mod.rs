//! Flag record storage.
//!
//! The gateway only needs two capabilities from a store: insert rows and
//! get their ids back, and delete rows by id. Id allocation and consistency
//! for concurrent writes on the same row belong to the store.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │          FlagGateway         │
//! └──────────────┬───────────────┘
//!                │ RecordStore
//!        ┌───────┴────────┐
//!        ▼                ▼
//! ┌─────────────┐  ┌─────────────┐
//! │  GristStore │  │ MemoryStore │
//! │ (REST API)  │  │   (dev)     │
//! └─────────────┘  └─────────────┘
//! ```

mod grist;
mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

pub use grist::{GristStore, DEFAULT_TABLE};
pub use memory::MemoryStore;

/// One row of the flags table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FlagRow {
    /// Caption resource the flag points at
    pub path: String,

    /// Offset into the track as `HH:MM:SS.mmm`
    pub timestamp: String,

    /// Free-form annotation
    pub text: String,
}

/// Row-oriented store holding flag records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert rows and return their ids in submission order.
    async fn add_records(&self, rows: Vec<FlagRow>) -> Result<Vec<i64>, StoreError>;

    /// Delete rows by id.
    async fn delete_records(&self, ids: &[i64]) -> Result<(), StoreError>;

    /// Human-readable description for startup logs.
    fn describe(&self) -> String;
}
