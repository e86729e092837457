//! Talk playback: video lookup and caption passthrough.

mod captions;
mod resolver;

pub use captions::{CaptionProxy, VTT_CONTENT_TYPE};
pub use resolver::{extract_video_id, VideoLinks, VideoResolver, YOUTUBE_WATCH_URL};
