//! HTTP request handlers for the captions API.
//!
//! # Endpoints
//!
//! - `GET /videos/{event}/{slug}/{lang}` - Playback links for a talk
//! - `GET /captions/{event}/{slug}/{lang}` - Caption track passthrough
//! - `POST /flags/{event}/{slug}/{lang}` - Submit a flag
//! - `DELETE /flags/{event}/{slug}/{lang}/{flag_id}` - Retract a flag
//! - `GET /health` - Health check endpoint

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::content::{caption_document_path, ContentSource};
use crate::error::{ContentError, FlagError, GatewayError};
use crate::flags::{millis_from_json, FlagGateway, FlagSigner};
use crate::media::{CaptionProxy, VideoLinks, VideoResolver, VTT_CONTENT_TYPE};
use crate::store::RecordStore;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state.
///
/// Everything inside is immutable after startup; handlers only read it.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<VideoResolver>,
    pub captions: Arc<CaptionProxy>,
    pub flags: Arc<FlagGateway>,
}

impl AppState {
    /// Wire the three services onto their collaborators.
    pub fn new(
        content: Arc<dyn ContentSource>,
        store: Arc<dyn RecordStore>,
        signer: FlagSigner,
    ) -> Self {
        Self {
            resolver: Arc::new(VideoResolver::new(Arc::clone(&content))),
            captions: Arc::new(CaptionProxy::new(content)),
            flags: Arc::new(FlagGateway::new(store, signer)),
        }
    }
}

// =============================================================================
// Request Parameters
// =============================================================================

/// Path parameters shared by the video, caption and flag routes.
#[derive(Debug, Deserialize)]
pub struct TrackPathParams {
    pub event: String,
    pub slug: String,
    pub lang: String,
}

/// Path parameters for flag deletion.
#[derive(Debug, Deserialize)]
pub struct FlagPathParams {
    pub event: String,
    pub slug: String,
    pub lang: String,

    /// Token returned when the flag was created
    pub flag_id: String,
}

/// Body of a flag submission.
#[derive(Debug, Deserialize)]
pub struct CreateFlagRequest {
    /// Offset into the track in milliseconds
    pub timestamp: f64,

    /// Annotation text
    pub text: String,
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type identifier (e.g., "not_found", "invalid_flag")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code (included for convenience)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ErrorResponse {
    pub fn with_status(
        error: impl Into<String>,
        message: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: Some(status.as_u16()),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Response to a flag submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFlagResponse {
    /// Token that retracts this flag
    pub flag_id: String,
}

/// Response to a flag retraction.
#[derive(Debug, Serialize)]
pub struct DeleteFlagResponse {
    pub ok: bool,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Any failure a handler can surface.
#[derive(Debug)]
pub enum ApiError {
    Content(ContentError),
    Gateway(GatewayError),
}

impl From<ContentError> for ApiError {
    fn from(err: ContentError) -> Self {
        ApiError::Content(err)
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        ApiError::Gateway(err)
    }
}

/// Convert ApiError to HTTP response.
///
/// 4xx errors are logged at WARN level, 5xx errors at ERROR level.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::Content(err @ ContentError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "not_found", err.to_string())
            }
            ApiError::Content(err @ ContentError::MalformedContent(_)) => {
                (StatusCode::BAD_GATEWAY, "malformed_content", err.to_string())
            }
            ApiError::Content(err @ ContentError::Upstream(_)) => {
                (StatusCode::BAD_GATEWAY, "content_error", err.to_string())
            }

            // One message for every token failure
            ApiError::Gateway(GatewayError::Flag(FlagError::Invalid)) => (
                StatusCode::FORBIDDEN,
                "invalid_flag",
                FlagError::Invalid.to_string(),
            ),

            // A vanished row is not special-cased
            ApiError::Gateway(GatewayError::Store(err)) => {
                (StatusCode::BAD_GATEWAY, "store_error", err.to_string())
            }
        };

        if status.is_server_error() {
            error!(
                error_type = error_type,
                status = status.as_u16(),
                "Request failed: {}",
                message
            );
        } else {
            warn!(
                error_type = error_type,
                status = status.as_u16(),
                "Request rejected: {}",
                message
            );
        }

        let body = ErrorResponse::with_status(error_type, message, status);
        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Resolve playback links for a talk.
pub async fn video_handler(
    State(state): State<AppState>,
    Path(params): Path<TrackPathParams>,
) -> Result<Json<VideoLinks>, ApiError> {
    let links = state
        .resolver
        .resolve(&params.event, &params.slug, &params.lang)
        .await?;
    Ok(Json(links))
}

/// Serve a caption track verbatim.
pub async fn captions_handler(
    State(state): State<AppState>,
    Path(params): Path<TrackPathParams>,
) -> Result<Response, ApiError> {
    let data = state
        .captions
        .fetch(&params.event, &params.slug, &params.lang)
        .await?;

    Ok(([(header::CONTENT_TYPE, VTT_CONTENT_TYPE)], data).into_response())
}

/// Store a flag and hand back its retraction token.
pub async fn create_flag_handler(
    State(state): State<AppState>,
    Path(params): Path<TrackPathParams>,
    Json(body): Json<CreateFlagRequest>,
) -> Result<Json<CreateFlagResponse>, ApiError> {
    let target_path = caption_document_path(&params.event, &params.slug, &params.lang);

    let flag_id = state
        .flags
        .create(&target_path, millis_from_json(body.timestamp), &body.text)
        .await?;

    Ok(Json(CreateFlagResponse { flag_id }))
}

/// Retract a flag by its token.
///
/// The event, slug and language segments are not bound into the token.
pub async fn delete_flag_handler(
    State(state): State<AppState>,
    Path(params): Path<FlagPathParams>,
) -> Result<Json<DeleteFlagResponse>, ApiError> {
    state.flags.delete(&params.flag_id).await?;
    Ok(Json(DeleteFlagResponse { ok: true }))
}
