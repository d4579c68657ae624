use crate::fetch::http_get_bytes;
use anyhow::{Context, Result};
use tracing::debug;

const THUMBNAIL_WIDTH: u32 = 320;
const THUMBNAIL_HEIGHT: u32 = 180;

/// Decoded RGBA pixels ready for an image widget.
#[derive(Clone)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl std::fmt::Debug for Thumbnail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Thumbnail")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba.len())
            .finish()
    }
}

/// Fill `{id}` in the configured template.
pub fn thumbnail_url(template: &str, video_id: &str) -> String {
    template.replace("{id}", video_id)
}

pub fn decode_thumbnail(bytes: &[u8]) -> Result<Thumbnail> {
    let image = image::load_from_memory(bytes).context("failed to decode thumbnail")?;
    let scaled = image.thumbnail(THUMBNAIL_WIDTH, THUMBNAIL_HEIGHT).to_rgba8();
    let (width, height) = scaled.dimensions();
    Ok(Thumbnail {
        width,
        height,
        rgba: scaled.into_raw(),
    })
}

pub fn fetch_thumbnail(template: &str, video_id: &str) -> Result<Thumbnail> {
    let url = thumbnail_url(template, video_id);
    debug!(video = video_id, %url, "Fetching thumbnail");
    let bytes = http_get_bytes(&url)?;
    decode_thumbnail(&bytes).with_context(|| format!("thumbnail for {video_id}"))
}
