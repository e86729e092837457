//! # Caption Gateway
//!
//! HTTP backend for a captions player. It finds the video for a talk, serves
//! the talk's caption tracks, and lets viewers flag caption problems without
//! an account.
//!
//! ## Features
//!
//! - **Video lookup**: reads a talk page from the content repository and
//!   extracts its `youtube:` id
//! - **Caption passthrough**: serves WebVTT tracks byte for byte
//! - **Stateless flag retraction**: each flag comes back with an
//!   HMAC-SHA256 token; only that token can delete it, and the server keeps
//!   no record of issued tokens
//! - **Local development**: point the service at a content checkout on disk
//!   and an in-memory flag table
//!
//! ## Architecture
//!
//! - [`content`] - Content repository access (HTTP or local directory)
//! - [`store`] - Flag record store (Grist or in-memory)
//! - [`flags`] - Token signing, timestamp rendering, create/delete workflow
//! - [`media`] - Video resolver and caption proxy
//! - [`server`] - Axum routes, handlers and CORS
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use caption_gateway::{
//!     create_router, AppState, FlagSigner, LocalContentSource, MemoryStore, RouterConfig,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let state = AppState::new(
//!         Arc::new(LocalContentSource::new("./content")),
//!         Arc::new(MemoryStore::new()),
//!         FlagSigner::new("dev-secret"),
//!     );
//!     let router = create_router(state, RouterConfig::new());
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await.unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod config;
pub mod content;
pub mod error;
pub mod flags;
pub mod media;
pub mod server;
pub mod store;

// Re-export commonly used types
pub use config::{Cli, Command, ServeConfig, SignConfig, SignOutputFormat, VerifyConfig};
pub use content::{ContentSource, HttpContentSource, LocalContentSource};
pub use error::{ContentError, FlagError, GatewayError, StoreError};
pub use flags::{format_millis, format_seconds, FlagGateway, FlagSigner};
pub use media::{extract_video_id, CaptionProxy, VideoLinks, VideoResolver};
pub use server::{create_router, ApiError, AppState, ErrorResponse, RouterConfig};
pub use store::{FlagRow, GristStore, MemoryStore, RecordStore};
