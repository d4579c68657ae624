//! Caption and catalog I/O.
//!
//! Caption files live either behind an HTTP base URL or in a local directory
//! tree laid out as `<root>/<video id>/<file>`. Both go through the same retry
//! policy; nothing above this layer retries.

use crate::config::AppConfig;
use anyhow::{Context, Result, anyhow, bail};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            attempts: config.fetch_retries.max(1),
            delay: config.fetch_retry_delay(),
        }
    }
}

/// Outcome of a single attempt, deciding whether another one is worthwhile.
#[derive(Debug)]
pub enum Attempt<T> {
    Done(T),
    Retry(anyhow::Error),
    Fatal(anyhow::Error),
}

/// Run `op` up to `policy.attempts` times, sleeping `policy.delay` between
/// retriable failures.
pub fn with_retry<T>(
    policy: RetryPolicy,
    what: &str,
    mut op: impl FnMut(u32) -> Attempt<T>,
) -> Result<T> {
    let attempts = policy.attempts.max(1);
    let mut last_error = None;
    for attempt in 1..=attempts {
        match op(attempt) {
            Attempt::Done(value) => return Ok(value),
            Attempt::Fatal(err) => return Err(err.context(format!("{what} failed"))),
            Attempt::Retry(err) => {
                if attempt < attempts {
                    warn!(attempt, attempts, "{what} failed, retrying: {err:#}");
                    if !policy.delay.is_zero() {
                        thread::sleep(policy.delay);
                    }
                }
                last_error = Some(err);
            }
        }
    }
    let err = last_error.unwrap_or_else(|| anyhow!("no attempts made"));
    Err(err.context(format!("{what} failed after {attempts} attempts")))
}

fn http_client() -> Result<Client> {
    Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .context("failed to build HTTP client")
}

fn is_retriable_status(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

/// GET `url` as text with the retry policy. A 4xx other than 429 fails
/// immediately.
pub fn http_get_text(client: &Client, url: &str, policy: RetryPolicy) -> Result<String> {
    with_retry(policy, &format!("GET {url}"), |attempt| {
        debug!(url, attempt, "HTTP GET");
        match client.get(url).send() {
            Ok(resp) => {
                let status = resp.status();
                if status.is_success() {
                    match resp.text() {
                        Ok(body) => Attempt::Done(body),
                        Err(err) => Attempt::Retry(anyhow!("reading body: {err}")),
                    }
                } else if is_retriable_status(status) {
                    Attempt::Retry(anyhow!("status {status}"))
                } else {
                    Attempt::Fatal(anyhow!("status {status}"))
                }
            }
            Err(err) if err.is_builder() => Attempt::Fatal(anyhow!("invalid request: {err}")),
            Err(err) => Attempt::Retry(anyhow!("request failed: {err}")),
        }
    })
}

/// Where caption files are read from.
#[derive(Debug, Clone)]
pub enum CaptionLocation {
    Http { base_url: String },
    Local { root: PathBuf },
}

impl CaptionLocation {
    /// URLs (`http://`, `https://`) are remote, anything else is a directory.
    pub fn parse(base: &str) -> Self {
        let trimmed = base.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            CaptionLocation::Http {
                base_url: trimmed.trim_end_matches('/').to_string(),
            }
        } else {
            CaptionLocation::Local {
                root: PathBuf::from(trimmed),
            }
        }
    }
}

/// Fetches raw caption text for a video.
pub struct CaptionStore {
    location: CaptionLocation,
    policy: RetryPolicy,
    client: Option<Client>,
}

impl CaptionStore {
    pub fn new(location: CaptionLocation, policy: RetryPolicy) -> Result<Self> {
        let client = match location {
            CaptionLocation::Http { .. } => Some(http_client()?),
            CaptionLocation::Local { .. } => None,
        };
        Ok(Self {
            location,
            policy,
            client,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            CaptionLocation::parse(&config.captions_base),
            RetryPolicy::from_config(config),
        )
    }

    /// `path` is `<video id>/<file name>`.
    pub fn fetch_caption_file(&self, path: &str) -> Result<String> {
        if path.split('/').any(|part| part == ".." || part.is_empty()) {
            bail!("invalid caption path {path:?}");
        }
        match (&self.location, &self.client) {
            (CaptionLocation::Http { base_url }, Some(client)) => {
                http_get_text(client, &format!("{base_url}/{path}"), self.policy)
            }
            (CaptionLocation::Http { .. }, None) => Err(anyhow!("HTTP client not initialized")),
            (CaptionLocation::Local { root }, _) => {
                let file = root.join(path);
                with_retry(self.policy, &format!("reading {}", file.display()), |_| {
                    match fs::read(&file) {
                        Ok(bytes) => Attempt::Done(String::from_utf8_lossy(&bytes).into_owned()),
                        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                            Attempt::Fatal(anyhow!("{} not found", file.display()))
                        }
                        Err(err) => Attempt::Retry(err.into()),
                    }
                })
            }
        }
    }

    pub fn fetch_for_video(&self, video_id: &str, file_name: &str) -> Result<String> {
        self.fetch_caption_file(&format!("{video_id}/{file_name}"))
    }

    /// Whether a caption file can be read. Used for catalog validation, so a
    /// missing file is a plain `false`.
    pub fn exists(&self, video_id: &str, file_name: &str) -> bool {
        match self.fetch_for_video(video_id, file_name) {
            Ok(_) => true,
            Err(err) => {
                debug!(video = video_id, file = file_name, "Caption file unavailable: {err:#}");
                false
            }
        }
    }
}

/// Fetch bytes (thumbnails) with a single attempt.
pub fn http_get_bytes(url: &str) -> Result<Vec<u8>> {
    let client = http_client()?;
    let resp = client
        .get(url)
        .send()
        .with_context(|| format!("GET {url} failed"))?;
    let status = resp.status();
    if !status.is_success() {
        bail!("GET {url} returned {status}");
    }
    let bytes = resp
        .bytes()
        .with_context(|| format!("reading body of {url}"))?;
    Ok(bytes.to_vec())
}

/// GET a JSON document with the retry policy.
pub fn http_get_json(url: &str, policy: RetryPolicy) -> Result<serde_json::Value> {
    let client = http_client()?;
    let body = http_get_text(&client, url, policy)?;
    serde_json::from_str(&body).with_context(|| format!("{url} returned invalid JSON"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn policy(attempts: u32) -> RetryPolicy {
        RetryPolicy {
            attempts,
            delay: Duration::ZERO,
        }
    }

    fn temp_root(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "subsync-fetch-{name}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("temp dir");
        dir
    }

    #[test]
    fn retry_stops_after_configured_attempts() {
        let calls = Cell::new(0);
        let result: Result<()> = with_retry(policy(3), "op", |_| {
            calls.set(calls.get() + 1);
            Attempt::Retry(anyhow!("boom"))
        });
        assert!(result.is_err());
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn retry_returns_first_success() {
        let result = with_retry(policy(3), "op", |attempt| {
            if attempt < 2 {
                Attempt::Retry(anyhow!("flaky"))
            } else {
                Attempt::Done(attempt)
            }
        });
        assert_eq!(result.expect("success"), 2);
    }

    #[test]
    fn fatal_errors_are_not_retried() {
        let calls = Cell::new(0);
        let result: Result<()> = with_retry(policy(5), "op", |_| {
            calls.set(calls.get() + 1);
            Attempt::Fatal(anyhow!("404"))
        });
        assert!(result.is_err());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn location_parses_urls_and_paths() {
        assert!(matches!(
            CaptionLocation::parse("http://localhost:8000/texts/"),
            CaptionLocation::Http { ref base_url } if base_url == "http://localhost:8000/texts"
        ));
        assert!(matches!(
            CaptionLocation::parse("captions"),
            CaptionLocation::Local { .. }
        ));
    }

    #[test]
    fn local_store_reads_and_reports_missing_files() {
        let root = temp_root("local");
        fs::create_dir_all(root.join("abc")).expect("video dir");
        fs::write(root.join("abc/original.fr.srt"), "1\n00:00:01,000 --> 00:00:02,000\nSalut\n")
            .expect("write");
        let store = CaptionStore::new(CaptionLocation::Local { root: root.clone() }, policy(3))
            .expect("store");

        let text = store.fetch_for_video("abc", "original.fr.srt").expect("read");
        assert!(text.contains("Salut"));
        assert!(store.exists("abc", "original.fr.srt"));
        assert!(!store.exists("abc", "pt.srt"));
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn parent_segments_are_rejected() {
        let store = CaptionStore::new(
            CaptionLocation::Local {
                root: PathBuf::from("."),
            },
            policy(1),
        )
        .expect("store");
        assert!(store.fetch_caption_file("../secret/pt.srt").is_err());
    }
}
