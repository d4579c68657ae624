//! Video catalog: the validated list of videos, its pagination, and the
//! sidebar of "other videos" shown next to the player.

mod source;
mod thumbnail;

pub use source::{VideoSource, parse_video_list, required_caption_files, validate_videos};
pub use thumbnail::{Thumbnail, fetch_thumbnail, thumbnail_url};

use serde::{Deserialize, Serialize};

/// Shown in the catalog, the sidebar and both panes when nothing validated.
pub const NO_VIDEOS_PLACEHOLDER: &str = "No valid videos found. Check that every video folder \
     contains the source caption file and one file per target language, and that the caption \
     server is reachable.";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoEntry {
    pub id: String,
    pub title: String,
}

/// Shorten `title` to at most `max_chars` characters, ending in `...` when cut.
pub fn truncate_title(title: &str, max_chars: usize) -> String {
    let count = title.chars().count();
    if count <= max_chars {
        return title.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = title.chars().take(keep).collect();
    out.push_str("...");
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNav {
    First,
    Previous,
    Next,
    Last,
}

/// Validated videos plus the current catalog page (1-based).
#[derive(Debug, Clone)]
pub struct Catalog {
    videos: Vec<VideoEntry>,
    page: usize,
    per_page: usize,
}

impl Catalog {
    pub fn new(videos: Vec<VideoEntry>, per_page: usize) -> Self {
        Self {
            videos,
            page: 1,
            per_page: per_page.max(1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    pub fn videos(&self) -> &[VideoEntry] {
        &self.videos
    }

    pub fn get(&self, id: &str) -> Option<&VideoEntry> {
        self.videos.iter().find(|video| video.id == id)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// At least one page, even when empty.
    pub fn total_pages(&self) -> usize {
        self.videos.len().div_ceil(self.per_page).max(1)
    }

    pub fn page_items(&self) -> &[VideoEntry] {
        let start = ((self.page - 1) * self.per_page).min(self.videos.len());
        let end = (start + self.per_page).min(self.videos.len());
        &self.videos[start..end]
    }

    pub fn can_go_back(&self) -> bool {
        self.page > 1
    }

    pub fn can_go_forward(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Move to another page, clamped to `1..=total_pages`. Returns whether the
    /// page changed.
    pub fn navigate(&mut self, nav: PageNav) -> bool {
        let total = self.total_pages();
        let next = match nav {
            PageNav::First => 1,
            PageNav::Previous => self.page.saturating_sub(1).max(1),
            PageNav::Next => (self.page + 1).min(total),
            PageNav::Last => total,
        };
        let changed = next != self.page;
        self.page = next;
        changed
    }

    /// Every video except the one currently playing.
    pub fn sidebar<'a>(&'a self, current_id: Option<&'a str>) -> impl Iterator<Item = &'a VideoEntry> + 'a {
        self.videos
            .iter()
            .filter(move |video| Some(video.id.as_str()) != current_id)
    }

    /// Shown in the sidebar when it lists no other video.
    pub fn empty_sidebar_text(&self) -> &'static str {
        if self.is_empty() {
            NO_VIDEOS_PLACEHOLDER
        } else {
            "No other videos"
        }
    }

    /// Shown in a transcript pane that has no lines.
    pub fn empty_pane_text(&self) -> &'static str {
        if self.is_empty() {
            NO_VIDEOS_PLACEHOLDER
        } else {
            "No subtitles available"
        }
    }

    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages())
    }
}
