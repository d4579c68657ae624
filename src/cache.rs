//! Per-video resume state.
//!
//! Files are stored under `.cache/` using a hash of the video id as the
//! directory name to avoid filesystem issues. Each directory holds a small
//! `resume.toml` with the last language, highlighted cue and playhead.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

pub const CACHE_DIR: &str = ".cache";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeEntry {
    pub language: String,
    #[serde(default)]
    pub last_cue_id: Option<u32>,
    #[serde(default)]
    pub playhead_seconds: f64,
}

/// Resume state store rooted at a cache directory.
#[derive(Debug, Clone)]
pub struct ViewerCache {
    root: PathBuf,
}

impl Default for ViewerCache {
    fn default() -> Self {
        Self::new(CACHE_DIR)
    }
}

impl ViewerCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn hash_dir(&self, video_id: &str) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(video_id.as_bytes());
        let hash = format!("{:x}", hasher.finalize());
        self.root.join(hash)
    }

    fn resume_path(&self, video_id: &str) -> PathBuf {
        self.hash_dir(video_id).join("resume.toml")
    }

    /// Load the resume entry for a video, if present and readable.
    pub fn load(&self, video_id: &str) -> Option<ResumeEntry> {
        let path = self.resume_path(video_id);
        let data = fs::read_to_string(&path).ok()?;
        match toml::from_str::<ResumeEntry>(&data) {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(path = %path.display(), "Ignoring unreadable resume entry: {err}");
                None
            }
        }
    }

    /// Persist the resume entry. Errors are logged and otherwise ignored to
    /// keep the UI responsive.
    pub fn save(&self, video_id: &str, entry: &ResumeEntry) {
        let path = self.resume_path(video_id);
        if let Some(parent) = path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                warn!(path = %parent.display(), "Failed to create cache dir: {err}");
                return;
            }
        }
        match toml::to_string(entry) {
            Ok(contents) => {
                if let Err(err) = fs::write(&path, contents) {
                    warn!(path = %path.display(), "Failed to write resume entry: {err}");
                } else {
                    debug!(video = video_id, cue = ?entry.last_cue_id, "Saved resume entry");
                }
            }
            Err(err) => warn!("Failed to serialize resume entry: {err}"),
        }
    }
}
