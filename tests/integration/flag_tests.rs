//! Flag submission and retraction tests.
//!
//! Tests verify:
//! - Submitted flags land in the store with a formatted timestamp
//! - The returned token retracts exactly that flag
//! - Forged, tampered and cross-id tokens are rejected without touching the store

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use tokio::sync::Mutex;
use tower::ServiceExt;

use caption_gateway::error::StoreError;
use caption_gateway::{FlagRow, FlagSigner, RecordStore};

use super::test_utils::{
    body_json, delete, post_json, router_with, talk_content, test_app, TEST_SECRET,
};

// =============================================================================
// Scripted Store
// =============================================================================

/// Store that hands out a fixed id and records every call.
struct ScriptedStore {
    next_id: i64,
    added: Mutex<Vec<FlagRow>>,
    deleted: Mutex<Vec<i64>>,
}

impl ScriptedStore {
    fn returning(id: i64) -> Self {
        Self {
            next_id: id,
            added: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl RecordStore for ScriptedStore {
    async fn add_records(&self, rows: Vec<FlagRow>) -> Result<Vec<i64>, StoreError> {
        let ids = (0..rows.len() as i64).map(|i| self.next_id + i).collect();
        self.added.lock().await.extend(rows);
        Ok(ids)
    }

    async fn delete_records(&self, ids: &[i64]) -> Result<(), StoreError> {
        self.deleted.lock().await.extend_from_slice(ids);
        Ok(())
    }

    fn describe(&self) -> String {
        "scripted".to_string()
    }
}

// =============================================================================
// End-to-end
// =============================================================================

#[tokio::test]
async fn test_create_and_delete_flag_scenario() {
    let store = Arc::new(ScriptedStore::returning(42));
    let router = router_with(Arc::new(talk_content()), store.clone());

    let response = router
        .clone()
        .oneshot(post_json(
            "/flags/conf24/opening/en",
            serde_json::json!({ "timestamp": 65000, "text": "typo" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let token = body_json(response).await["flagId"]
        .as_str()
        .unwrap()
        .to_string();
    assert_eq!(token, FlagSigner::new(TEST_SECRET).mint(42));
    assert!(token.starts_with("flag-42-"));

    let added = store.added.lock().await.clone();
    assert_eq!(
        added,
        vec![FlagRow {
            path: "conf24/opening.en.vtt".to_string(),
            timestamp: "00:01:05.000".to_string(),
            text: "typo".to_string(),
        }]
    );

    // Forged signature
    let response = router
        .clone()
        .oneshot(delete("/flags/conf24/opening/en/flag-42-deadbeef"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Valid signature for 42 presented as 43
    let signature = token.rsplit('-').next().unwrap();
    let response = router
        .clone()
        .oneshot(delete(&format!(
            "/flags/conf24/opening/en/flag-43-{}",
            signature
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(store.deleted.lock().await.is_empty());

    // The real token
    let response = router
        .oneshot(delete(&format!("/flags/conf24/opening/en/{}", token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!({ "ok": true }));
    assert_eq!(*store.deleted.lock().await, vec![42]);
}

#[tokio::test]
async fn test_invalid_tokens_share_one_response() {
    let app = test_app(talk_content());
    let signer = FlagSigner::new(TEST_SECRET);
    let other = FlagSigner::new("another-secret");

    let mut bodies = Vec::new();
    for token in [
        "garbage".to_string(),
        "flag-1-deadbeef".to_string(),
        other.mint(1),
        format!("flag-2-{}", signer.mint(1).rsplit('-').next().unwrap()),
    ] {
        let response = app
            .router
            .clone()
            .oneshot(delete(&format!("/flags/conf24/opening/en/{}", token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "token {}", token);
        bodies.push(body_json(response).await);
    }

    assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(bodies[0]["error"], "invalid_flag");
}

// =============================================================================
// Memory store round trips
// =============================================================================

#[tokio::test]
async fn test_flag_lifecycle_against_memory_store() {
    let app = test_app(talk_content());

    let response = app
        .router
        .clone()
        .oneshot(post_json(
            "/flags/conf24/opening/en",
            serde_json::json!({ "timestamp": 3_723_004.9, "text": "speaker name misspelled" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let token = body_json(response).await["flagId"]
        .as_str()
        .unwrap()
        .to_string();

    let row = app.store.get(1).await.unwrap();
    assert_eq!(row.timestamp, "01:02:03.004");
    assert_eq!(row.text, "speaker name misspelled");

    let response = app
        .router
        .clone()
        .oneshot(delete(&format!("/flags/conf24/opening/en/{}", token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(app.store.is_empty().await);

    // Second retraction reaches the store, which no longer has the row
    let response = app
        .router
        .oneshot(delete(&format!("/flags/conf24/opening/en/{}", token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["error"], "store_error");
}

#[tokio::test]
async fn test_token_not_bound_to_route_segments() {
    let app = test_app(talk_content());

    let response = app
        .router
        .clone()
        .oneshot(post_json(
            "/flags/conf24/opening/en",
            serde_json::json!({ "timestamp": 0, "text": "x" }),
        ))
        .await
        .unwrap();
    let token = body_json(response).await["flagId"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .router
        .oneshot(delete(&format!("/flags/other/talk/de/{}", token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_negative_timestamp_wraps() {
    let app = test_app(talk_content());

    let response = app
        .router
        .oneshot(post_json(
            "/flags/conf24/opening/en",
            serde_json::json!({ "timestamp": -1000, "text": "before start" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.store.get(1).await.unwrap().timestamp, "23:59:59.000");
}

#[tokio::test]
async fn test_flag_for_unknown_track_is_accepted() {
    let app = test_app(talk_content());

    let response = app
        .router
        .oneshot(post_json(
            "/flags/nope/nothing/xx",
            serde_json::json!({ "timestamp": 1, "text": "?" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.store.get(1).await.unwrap().path, "nope/nothing.xx.vtt");
    assert_eq!(app.content.request_count(), 0);
}

#[tokio::test]
async fn test_malformed_body_rejected_before_store() {
    let app = test_app(talk_content());

    let response = app
        .router
        .oneshot(post_json(
            "/flags/conf24/opening/en",
            serde_json::json!({ "timestamp": "soon", "text": "x" }),
        ))
        .await
        .unwrap();
    assert!(response.status().is_client_error());
    assert!(app.store.is_empty().await);
}
