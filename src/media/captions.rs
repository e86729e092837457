use std::sync::Arc;

use bytes::Bytes;
use tracing::debug;

use crate::content::{caption_document_path, ContentSource};
use crate::error::ContentError;

/// Content type for caption tracks.
pub const VTT_CONTENT_TYPE: &str = "text/vtt; charset=utf-8";

/// Passes caption tracks through from the content repository untouched.
pub struct CaptionProxy {
    source: Arc<dyn ContentSource>,
}

impl CaptionProxy {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self { source }
    }

    /// Fetch the caption track for `(event, slug, lang)` byte for byte.
    pub async fn fetch(&self, event: &str, slug: &str, lang: &str) -> Result<Bytes, ContentError> {
        let path = caption_document_path(event, slug, lang);
        let data = self.source.get(&path).await?;
        debug!(%path, size = data.len(), "Fetched captions");
        Ok(data)
    }
}
