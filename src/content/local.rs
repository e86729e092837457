use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use super::{is_contained_path, ContentSource};
use crate::error::ContentError;

/// Content repository checked out on the local filesystem.
///
/// Used in place of [`HttpContentSource`](super::HttpContentSource) for
/// local development and tests.
#[derive(Debug, Clone)]
pub struct LocalContentSource {
    root: PathBuf,
}

impl LocalContentSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl ContentSource for LocalContentSource {
    async fn get(&self, path: &str) -> Result<Bytes, ContentError> {
        if !is_contained_path(path) {
            return Err(ContentError::NotFound(path.to_string()));
        }

        let file = self.root.join(path);
        debug!(file = %file.display(), "Reading local content");

        match tokio::fs::read(&file).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(ContentError::NotFound(path.to_string()))
            }
            // Reading a directory is a miss, not a server fault
            Err(_) if file.is_dir() => Err(ContentError::NotFound(path.to_string())),
            Err(e) => Err(ContentError::Upstream(format!("{}: {}", file.display(), e))),
        }
    }

    fn describe(&self) -> String {
        format!("local {}", self.root.display())
    }
}
