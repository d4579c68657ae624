use super::VideoEntry;
use crate::config::AppConfig;
use crate::fetch::{CaptionLocation, CaptionStore, RetryPolicy, http_get_json};
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Where the list of candidate videos comes from.
#[derive(Debug, Clone)]
pub enum VideoSource {
    /// `GET {base}/api/videos` returning `[{"id": .., "title": ..}]`.
    Api { base_url: String, policy: RetryPolicy },
    /// One subdirectory per video under the captions root.
    Directory { root: std::path::PathBuf },
}

impl VideoSource {
    /// The API when configured, else the local captions directory.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let api = config.api_base_url.trim();
        if !api.is_empty() {
            return Ok(VideoSource::Api {
                base_url: api.trim_end_matches('/').to_string(),
                policy: RetryPolicy::from_config(config),
            });
        }
        match CaptionLocation::parse(&config.captions_base) {
            CaptionLocation::Local { root } => Ok(VideoSource::Directory { root }),
            CaptionLocation::Http { base_url } => bail!(
                "api_base_url is empty and captions_base {base_url} is remote; cannot list videos"
            ),
        }
    }

    pub fn list_videos(&self) -> Result<Vec<VideoEntry>> {
        match self {
            VideoSource::Api { base_url, policy } => {
                let url = format!("{base_url}/api/videos");
                let value = http_get_json(&url, *policy)?;
                Ok(parse_video_list(&value))
            }
            VideoSource::Directory { root } => scan_video_dirs(root),
        }
    }
}

/// Keep entries whose `id` and `title` are non-empty strings. A payload that is
/// not an array yields nothing.
pub fn parse_video_list(value: &serde_json::Value) -> Vec<VideoEntry> {
    let Some(rows) = value.as_array() else {
        warn!("Invalid /api/videos response: expected an array");
        return Vec::new();
    };
    let videos: Vec<VideoEntry> = rows
        .iter()
        .filter_map(|row| {
            let id = string_field(row, "id")?;
            let title = string_field(row, "title")?;
            Some(VideoEntry { id, title })
        })
        .collect();
    if videos.len() != rows.len() {
        warn!(
            skipped = rows.len() - videos.len(),
            "Skipped invalid video entries from /api/videos"
        );
    }
    videos
}

fn string_field(row: &serde_json::Value, key: &str) -> Option<String> {
    row.get(key)
        .and_then(|value| value.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn scan_video_dirs(root: &Path) -> Result<Vec<VideoEntry>> {
    let entries =
        fs::read_dir(root).with_context(|| format!("failed to list {}", root.display()))?;
    let mut videos = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(id) = path.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
            continue;
        };
        let title = fs::read_to_string(path.join("title.txt"))
            .ok()
            .and_then(|raw| raw.lines().next().map(|line| line.trim().to_string()))
            .filter(|line| !line.is_empty())
            .unwrap_or_else(|| format!("New French Learning Video ({id})"));
        videos.push(VideoEntry { id, title });
    }
    videos.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(videos)
}

/// Keep only videos whose source file and every target-language file can be
/// fetched. The phonetic file is optional.
pub fn validate_videos(
    candidates: Vec<VideoEntry>,
    store: &CaptionStore,
    required_files: &[String],
) -> Vec<VideoEntry> {
    let total = candidates.len();
    let valid: Vec<VideoEntry> = candidates
        .into_iter()
        .filter(|video| {
            let missing: Vec<&str> = required_files
                .iter()
                .filter(|file| !store.exists(&video.id, file))
                .map(String::as_str)
                .collect();
            if missing.is_empty() {
                true
            } else {
                warn!(video = %video.id, ?missing, "Excluding video with missing caption files");
                false
            }
        })
        .collect();
    info!(valid = valid.len(), total, "Validated video catalog");
    valid
}

/// Source file followed by each configured target-language file.
pub fn required_caption_files(config: &AppConfig) -> Vec<String> {
    std::iter::once(config.source_file.clone())
        .chain(config.target_languages.iter().map(|lang| lang.caption_file()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;
    use std::time::Duration;

    fn temp_root(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "subsync-catalog-{name}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("temp dir");
        dir
    }

    #[test]
    fn parse_drops_entries_without_string_fields() {
        let payload = json!([
            {"id": "abc", "title": "Premier"},
            {"id": 7, "title": "Numeric id"},
            {"id": "def"},
            {"id": "ghi", "title": "  "},
            {"id": "jkl", "title": "Dernier"}
        ]);
        let ids: Vec<_> = parse_video_list(&payload).into_iter().map(|v| v.id).collect();
        assert_eq!(ids, vec!["abc", "jkl"]);
    }

    #[test]
    fn parse_non_array_is_empty() {
        assert!(parse_video_list(&json!({"error": "Texts directory not found"})).is_empty());
    }

    #[test]
    fn directory_scan_and_validation() {
        let root = temp_root("scan");
        for (id, files) in [
            ("aaa", vec!["original.fr.srt", "pt.srt", "en.srt"]),
            ("bbb", vec!["original.fr.srt", "pt.srt"]),
        ] {
            fs::create_dir_all(root.join(id)).expect("video dir");
            for file in files {
                fs::write(root.join(id).join(file), "1\n00:00:00,000 --> 00:00:01,000\nx\n")
                    .expect("write");
            }
        }
        fs::write(root.join("aaa/title.txt"), "Une vraie vidéo\nignored\n").expect("title");
        fs::write(root.join("stray.txt"), "not a video").expect("stray");

        let source = VideoSource::Directory { root: root.clone() };
        let listed = source.list_videos().expect("scan");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].title, "Une vraie vidéo");
        assert_eq!(listed[1].title, "New French Learning Video (bbb)");

        let store = CaptionStore::new(
            CaptionLocation::Local { root: root.clone() },
            RetryPolicy {
                attempts: 1,
                delay: Duration::ZERO,
            },
        )
        .expect("store");
        let required = required_caption_files(&AppConfig::default());
        let valid = validate_videos(listed, &store, &required);
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].id, "aaa");
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn no_valid_videos_is_an_empty_list() {
        let root = temp_root("none");
        fs::create_dir_all(root.join("ccc")).expect("video dir");
        let store = CaptionStore::new(
            CaptionLocation::Local { root: root.clone() },
            RetryPolicy {
                attempts: 1,
                delay: Duration::ZERO,
            },
        )
        .expect("store");
        let listed = VideoSource::Directory { root: root.clone() }
            .list_videos()
            .expect("scan");
        let required = required_caption_files(&AppConfig::default());
        assert!(validate_videos(listed, &store, &required).is_empty());
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn required_files_follow_config() {
        let files = required_caption_files(&AppConfig::default());
        assert_eq!(files, vec!["original.fr.srt", "pt.srt", "en.srt"]);
    }
}
