use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::content::{video_document_path, ContentSource};
use crate::error::ContentError;

/// Watch URL prefix for resolved video ids.
pub const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";

const VIDEO_KEY: &str = "youtube:";

/// Everything a player needs to start a talk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoLinks {
    /// Playback URL on the video platform
    pub video_url: String,

    /// Relative URL of the caption track on this service
    pub vtt_url: String,

    /// Relative URL for submitting flags on this service
    pub flagging_url: String,
}

/// Find the video id in a talk page.
///
/// Looks for `youtube:` followed by optional blanks, an optional quote and a
/// run of ASCII letters, digits, `_` or `-`. The first occurrence with a
/// non-empty id wins.
pub fn extract_video_id(text: &str) -> Option<&str> {
    let mut rest = text;

    while let Some(pos) = rest.find(VIDEO_KEY) {
        let after = rest[pos + VIDEO_KEY.len()..].trim_start_matches([' ', '\t']);
        let after = after
            .strip_prefix('"')
            .or_else(|| after.strip_prefix('\''))
            .unwrap_or(after);

        let len = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
            .unwrap_or(after.len());
        if len > 0 {
            return Some(&after[..len]);
        }

        rest = &rest[pos + VIDEO_KEY.len()..];
    }

    None
}

/// Join path segments into a relative URL, percent-encoding each one.
fn relative_url(segments: &[&str]) -> String {
    segments.iter().fold(String::new(), |mut url, segment| {
        url.push('/');
        url.push_str(&urlencoding::encode(segment));
        url
    })
}

/// Turns `(event, slug)` into playback links.
pub struct VideoResolver {
    source: Arc<dyn ContentSource>,
}

impl VideoResolver {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self { source }
    }

    /// Resolve the talk page for `(event, slug)`.
    ///
    /// `lang` only shapes the returned caption and flag URLs; whether a
    /// track exists in that language is not checked here.
    pub async fn resolve(
        &self,
        event: &str,
        slug: &str,
        lang: &str,
    ) -> Result<VideoLinks, ContentError> {
        let path = video_document_path(event, slug);
        let document = self.source.get(&path).await?;
        let text = String::from_utf8_lossy(&document);

        let video_id =
            extract_video_id(&text).ok_or_else(|| ContentError::MalformedContent(path.clone()))?;
        debug!(%path, video_id, "Resolved video");

        Ok(VideoLinks {
            video_url: format!("{}{}", YOUTUBE_WATCH_URL, video_id),
            vtt_url: relative_url(&["captions", event, slug, lang]),
            flagging_url: relative_url(&["flags", event, slug, lang]),
        })
    }
}
