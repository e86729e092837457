use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{FlagRow, RecordStore};
use crate::error::StoreError;

/// In-process flag table.
///
/// Ids start at 1 and are never reused. Rows are lost on restart, so this
/// is only meant for local development and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryTable>,
}

#[derive(Debug, Default)]
struct MemoryTable {
    last_id: i64,
    rows: BTreeMap<i64, FlagRow>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a row by id.
    pub async fn get(&self, id: i64) -> Option<FlagRow> {
        self.inner.read().await.rows.get(&id).cloned()
    }

    /// Number of rows currently stored.
    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn add_records(&self, rows: Vec<FlagRow>) -> Result<Vec<i64>, StoreError> {
        let mut table = self.inner.write().await;
        let mut ids = Vec::with_capacity(rows.len());

        for row in rows {
            table.last_id += 1;
            let id = table.last_id;
            table.rows.insert(id, row);
            ids.push(id);
        }

        Ok(ids)
    }

    async fn delete_records(&self, ids: &[i64]) -> Result<(), StoreError> {
        let mut table = self.inner.write().await;

        // All-or-nothing: check every id before removing any.
        if let Some(missing) = ids.iter().find(|id| !table.rows.contains_key(*id)) {
            return Err(StoreError::RecordNotFound(*missing));
        }
        for id in ids {
            table.rows.remove(id);
        }

        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}
