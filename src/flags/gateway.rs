use std::sync::Arc;

use tracing::{debug, info, warn};

use super::signer::FlagSigner;
use super::timestamp::format_millis;
use crate::error::{GatewayError, StoreError};
use crate::store::{FlagRow, RecordStore};

/// Creates and retracts flags.
///
/// Every delete goes through [`FlagSigner::verify`] first; the store never
/// sees an id that did not come out of a valid token.
pub struct FlagGateway {
    store: Arc<dyn RecordStore>,
    signer: FlagSigner,
}

impl FlagGateway {
    pub fn new(store: Arc<dyn RecordStore>, signer: FlagSigner) -> Self {
        Self { store, signer }
    }

    pub fn signer(&self) -> &FlagSigner {
        &self.signer
    }

    /// Store a flag and return the token that can later retract it.
    ///
    /// The row is not rolled back if anything after the insert fails.
    pub async fn create(
        &self,
        target_path: &str,
        raw_timestamp_ms: i64,
        text: &str,
    ) -> Result<String, GatewayError> {
        let row = FlagRow {
            path: target_path.to_string(),
            timestamp: format_millis(raw_timestamp_ms),
            text: text.to_string(),
        };
        let timestamp = row.timestamp.clone();

        let ids = self.store.add_records(vec![row]).await?;
        // Ids are matched to rows by position; a length mismatch means the
        // store broke that contract.
        let id = match ids.as_slice() {
            [id] => *id,
            _ => {
                return Err(StoreError::IdCountMismatch {
                    submitted: 1,
                    returned: ids.len(),
                }
                .into())
            }
        };

        info!(id, path = %target_path, %timestamp, "Flag created");
        Ok(self.signer.mint(id))
    }

    /// Retract the flag a token was minted for.
    ///
    /// Returns the deleted record id.
    pub async fn delete(&self, token: &str) -> Result<i64, GatewayError> {
        let id = self.signer.verify(token).map_err(|e| {
            warn!("Rejected flag token");
            e
        })?;

        debug!(id, "Flag token verified");
        self.store.delete_records(&[id]).await?;

        info!(id, "Flag deleted");
        Ok(id)
    }
}
