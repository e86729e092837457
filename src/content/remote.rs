use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

use super::{is_contained_path, ContentSource};
use crate::error::ContentError;

/// Default raw-file endpoint of the content repository.
pub const DEFAULT_CONTENT_BASE_URL: &str =
    "https://raw.githubusercontent.com/captions-player/content/main/";

/// Content repository served over HTTP (e.g. a raw-file endpoint of a git host).
#[derive(Clone)]
pub struct HttpContentSource {
    client: Client,
    base_url: Url,
}

impl HttpContentSource {
    /// Create a source rooted at `base_url`.
    ///
    /// A trailing slash is added if missing so relative paths resolve
    /// underneath the base rather than replacing its last segment.
    pub fn new(client: Client, base_url: &str) -> Result<Self, url::ParseError> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        Ok(Self {
            client,
            base_url: Url::parse(&normalized)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn document_url(&self, path: &str) -> Result<Url, ContentError> {
        if !is_contained_path(path) {
            return Err(ContentError::NotFound(path.to_string()));
        }

        let encoded = path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");

        self.base_url
            .join(&encoded)
            .map_err(|e| ContentError::Upstream(format!("bad content path {}: {}", path, e)))
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn get(&self, path: &str) -> Result<Bytes, ContentError> {
        let url = self.document_url(path)?;
        debug!(%url, "Fetching content");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ContentError::Upstream(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(ContentError::NotFound(path.to_string())),
            status if !status.is_success() => Err(ContentError::Upstream(format!(
                "{} fetching {}",
                status, path
            ))),
            _ => response
                .bytes()
                .await
                .map_err(|e| ContentError::Upstream(e.to_string())),
        }
    }

    fn describe(&self) -> String {
        self.base_url.to_string()
    }
}
