//! Content repository access.
//!
//! Talk pages and caption tracks live in a content repository as plain
//! files. Production reads them over HTTP; local development points the
//! service at a checkout on disk instead.
//!
//! # Layout
//!
//! ```text
//! {event}/{slug}.md            talk page (front matter carries `youtube: <id>`)
//! {event}/{slug}.{lang}.vtt    caption track
//! ```

mod local;
mod remote;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::ContentError;

pub use local::LocalContentSource;
pub use remote::{HttpContentSource, DEFAULT_CONTENT_BASE_URL};

/// Read-only access to documents by repository-relative path.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch a document verbatim.
    async fn get(&self, path: &str) -> Result<Bytes, ContentError>;

    /// Human-readable description for startup logs.
    fn describe(&self) -> String;
}

/// Path of the talk page for `(event, slug)`.
pub fn video_document_path(event: &str, slug: &str) -> String {
    format!("{}/{}.md", event, slug)
}

/// Path of the caption track for `(event, slug, lang)`.
pub fn caption_document_path(event: &str, slug: &str, lang: &str) -> String {
    format!("{}/{}.{}.vtt", event, slug, lang)
}

/// Whether a repository path stays inside the repository root.
///
/// Request segments are opaque, so `..`, `.`, empty segments and absolute
/// paths are refused before any backend sees them.
pub fn is_contained_path(path: &str) -> bool {
    !path.is_empty()
        && !path.starts_with('/')
        && !path.contains('\\')
        && path
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}
