//! HTTP server layer.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │     /videos   /captions   /flags   (event, slug, lang)          │
//! │                                                                 │
//! │  ┌─────────────────────────┐  ┌──────────────────────────────┐  │
//! │  │        handlers         │  │           routes             │  │
//! │  │ (params, error mapping) │  │     (router, CORS, trace)    │  │
//! │  └─────────────────────────┘  └──────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    captions_handler, create_flag_handler, delete_flag_handler, health_handler, video_handler,
    ApiError, AppState, CreateFlagRequest, CreateFlagResponse, DeleteFlagResponse, ErrorResponse,
    FlagPathParams, HealthResponse, TrackPathParams,
};
pub use routes::{create_router, RouterConfig};
