//! Grist-backed flag table.
//!
//! Talks to the Grist REST API:
//!
//! ```text
//! POST {url}/api/docs/{doc}/tables/{table}/records       {"records":[{"fields":{..}}]}
//! POST {url}/api/docs/{doc}/tables/{table}/data/delete   [id, ...]
//! ```

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{FlagRow, RecordStore};
use crate::error::StoreError;

/// Default table name for flags.
pub const DEFAULT_TABLE: &str = "Flags";

/// Flag table stored in a Grist document.
#[derive(Clone)]
pub struct GristStore {
    client: Client,
    base_url: String,
    doc_id: String,
    table: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct AddRecordsRequest<'a> {
    records: Vec<NewRecord<'a>>,
}

#[derive(Serialize)]
struct NewRecord<'a> {
    fields: &'a FlagRow,
}

#[derive(Deserialize)]
struct AddRecordsResponse {
    records: Vec<RecordId>,
}

#[derive(Deserialize)]
struct RecordId {
    id: i64,
}

impl GristStore {
    /// Create a store for `table` in document `doc_id` on the server at `base_url`.
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        doc_id: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            doc_id: doc_id.into(),
            table: table.into(),
            api_key: None,
        }
    }

    /// Authenticate requests with a bearer API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn table_url(&self, suffix: &str) -> String {
        format!(
            "{}/api/docs/{}/tables/{}/{}",
            self.base_url,
            urlencoding::encode(&self.doc_id),
            urlencoding::encode(&self.table),
            suffix
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

#[async_trait]
impl RecordStore for GristStore {
    async fn add_records(&self, rows: Vec<FlagRow>) -> Result<Vec<i64>, StoreError> {
        let body = AddRecordsRequest {
            records: rows.iter().map(|fields| NewRecord { fields }).collect(),
        };

        let response = self
            .authorize(self.client.post(self.table_url("records")))
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(StoreError::Upstream(format!("{}: {}", status, detail)));
        }

        let parsed: AddRecordsResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        let ids: Vec<i64> = parsed.records.into_iter().map(|r| r.id).collect();
        debug!(table = %self.table, count = ids.len(), "Added records");
        Ok(ids)
    }

    async fn delete_records(&self, ids: &[i64]) -> Result<(), StoreError> {
        let response = self
            .authorize(self.client.post(self.table_url("data/delete")))
            .json(&ids)
            .send()
            .await
            .map_err(|e| StoreError::Upstream(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            debug!(table = %self.table, ?ids, "Deleted records");
            return Ok(());
        }

        let detail = response.text().await.unwrap_or_default();

        // Grist answers 400 "Invalid row id" or 404 for rows that are gone
        let missing_row = status == StatusCode::NOT_FOUND
            || (status == StatusCode::BAD_REQUEST && detail.contains("row id"));
        match ids {
            [id] if missing_row => Err(StoreError::RecordNotFound(*id)),
            _ => Err(StoreError::Upstream(format!("{}: {}", status, detail))),
        }
    }

    fn describe(&self) -> String {
        format!("grist {} doc={} table={}", self.base_url, self.doc_id, self.table)
    }
}
