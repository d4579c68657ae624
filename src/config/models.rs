use serde::Deserialize;
use std::time::Duration;

/// High-level app configuration; deserializable from TOML.
#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default = "crate::config::defaults::default_font_size")]
    pub font_size: u32,
    #[serde(default = "crate::config::defaults::default_line_spacing")]
    pub line_spacing: f32,
    #[serde(default = "crate::config::defaults::default_window_width")]
    pub window_width: f32,
    #[serde(default = "crate::config::defaults::default_window_height")]
    pub window_height: f32,
    #[serde(default = "crate::config::defaults::default_day_highlight")]
    pub day_highlight: HighlightColor,
    #[serde(default = "crate::config::defaults::default_night_highlight")]
    pub night_highlight: HighlightColor,
    #[serde(default = "crate::config::defaults::default_recenter_settle_ms")]
    pub recenter_settle_ms: u64,
    #[serde(default = "crate::config::defaults::default_recenter_animation_ms")]
    pub recenter_animation_ms: u64,
    #[serde(default = "crate::config::defaults::default_mirror_guard_ms")]
    pub mirror_guard_ms: u64,
    #[serde(default = "crate::config::defaults::default_user_idle_ms")]
    pub user_idle_ms: u64,
    #[serde(default = "crate::config::defaults::default_highlight_exit_ms")]
    pub highlight_exit_ms: u64,
    #[serde(default = "crate::config::defaults::default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "crate::config::defaults::default_videos_per_page")]
    pub videos_per_page: usize,
    #[serde(default = "crate::config::defaults::default_title_max_chars")]
    pub title_max_chars: usize,
    #[serde(default = "crate::config::defaults::default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "crate::config::defaults::default_show_thumbnails")]
    pub show_thumbnails: bool,
    #[serde(default = "crate::config::defaults::default_thumbnail_url_template")]
    pub thumbnail_url_template: String,
    #[serde(default = "crate::config::defaults::default_captions_base")]
    pub captions_base: String,
    #[serde(default = "crate::config::defaults::default_source_file")]
    pub source_file: String,
    #[serde(default = "crate::config::defaults::default_phonetic_file")]
    pub phonetic_file: String,
    #[serde(default = "crate::config::defaults::default_source_language_name")]
    pub source_language_name: String,
    #[serde(default = "crate::config::defaults::default_target_languages")]
    pub target_languages: Vec<TargetLanguage>,
    #[serde(default = "crate::config::defaults::default_target_language")]
    pub target_language: String,
    #[serde(default = "crate::config::defaults::default_phonetic_placeholder")]
    pub phonetic_placeholder: String,
    #[serde(default = "crate::config::defaults::default_fetch_retries")]
    pub fetch_retries: u32,
    #[serde(default = "crate::config::defaults::default_fetch_retry_delay_ms")]
    pub fetch_retry_delay_ms: u64,
    #[serde(default = "crate::config::defaults::default_export_dir")]
    pub export_dir: String,
    #[serde(default = "crate::config::defaults::default_log_level")]
    pub log_level: LogLevel,
    #[serde(default = "crate::config::defaults::default_key_toggle_play_pause")]
    pub key_toggle_play_pause: String,
    #[serde(default = "crate::config::defaults::default_key_recenter")]
    pub key_recenter: String,
    #[serde(default = "crate::config::defaults::default_key_safe_quit")]
    pub key_safe_quit: String,
    #[serde(default = "crate::config::defaults::default_key_next_cue")]
    pub key_next_cue: String,
    #[serde(default = "crate::config::defaults::default_key_prev_cue")]
    pub key_prev_cue: String,
    #[serde(default = "crate::config::defaults::default_key_export_flashcards")]
    pub key_export_flashcards: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            theme: ThemeMode::Night,
            font_size: crate::config::defaults::default_font_size(),
            line_spacing: crate::config::defaults::default_line_spacing(),
            window_width: crate::config::defaults::default_window_width(),
            window_height: crate::config::defaults::default_window_height(),
            day_highlight: crate::config::defaults::default_day_highlight(),
            night_highlight: crate::config::defaults::default_night_highlight(),
            recenter_settle_ms: crate::config::defaults::default_recenter_settle_ms(),
            recenter_animation_ms: crate::config::defaults::default_recenter_animation_ms(),
            mirror_guard_ms: crate::config::defaults::default_mirror_guard_ms(),
            user_idle_ms: crate::config::defaults::default_user_idle_ms(),
            highlight_exit_ms: crate::config::defaults::default_highlight_exit_ms(),
            tick_interval_ms: crate::config::defaults::default_tick_interval_ms(),
            videos_per_page: crate::config::defaults::default_videos_per_page(),
            title_max_chars: crate::config::defaults::default_title_max_chars(),
            api_base_url: crate::config::defaults::default_api_base_url(),
            show_thumbnails: crate::config::defaults::default_show_thumbnails(),
            thumbnail_url_template: crate::config::defaults::default_thumbnail_url_template(),
            captions_base: crate::config::defaults::default_captions_base(),
            source_file: crate::config::defaults::default_source_file(),
            phonetic_file: crate::config::defaults::default_phonetic_file(),
            source_language_name: crate::config::defaults::default_source_language_name(),
            target_languages: crate::config::defaults::default_target_languages(),
            target_language: crate::config::defaults::default_target_language(),
            phonetic_placeholder: crate::config::defaults::default_phonetic_placeholder(),
            fetch_retries: crate::config::defaults::default_fetch_retries(),
            fetch_retry_delay_ms: crate::config::defaults::default_fetch_retry_delay_ms(),
            export_dir: crate::config::defaults::default_export_dir(),
            log_level: crate::config::defaults::default_log_level(),
            key_toggle_play_pause: crate::config::defaults::default_key_toggle_play_pause(),
            key_recenter: crate::config::defaults::default_key_recenter(),
            key_safe_quit: crate::config::defaults::default_key_safe_quit(),
            key_next_cue: crate::config::defaults::default_key_next_cue(),
            key_prev_cue: crate::config::defaults::default_key_prev_cue(),
            key_export_flashcards: crate::config::defaults::default_key_export_flashcards(),
        }
    }
}

impl AppConfig {
    /// Timing knobs consumed by the sync engine.
    pub fn sync_timings(&self) -> crate::sync::SyncTimings {
        crate::sync::SyncTimings {
            recenter_settle: Duration::from_millis(self.recenter_settle_ms),
            recenter_animation: Duration::from_millis(
                self.recenter_animation_ms.min(self.recenter_settle_ms),
            ),
            mirror_guard: Duration::from_millis(self.mirror_guard_ms),
            user_idle: Duration::from_millis(self.user_idle_ms),
            highlight_exit: Duration::from_millis(self.highlight_exit_ms),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn fetch_retry_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_retry_delay_ms)
    }

    /// Name of the target language with `code`, falling back to the code itself.
    pub fn language_name(&self, code: &str) -> String {
        self.target_languages
            .iter()
            .find(|lang| lang.code == code)
            .map(|lang| lang.name.clone())
            .unwrap_or_else(|| code.to_string())
    }

    /// The configured target language, or the first known one if the
    /// configured code is not in the list.
    pub fn effective_target_language(&self) -> String {
        if self
            .target_languages
            .iter()
            .any(|lang| lang.code == self.target_language)
        {
            return self.target_language.clone();
        }
        self.target_languages
            .first()
            .map(|lang| lang.code.clone())
            .unwrap_or_else(|| self.target_language.clone())
    }
}

/// Theme mode.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    Day,
    Night,
}

impl Default for ThemeMode {
    fn default() -> Self {
        ThemeMode::Night
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ThemeMode::Day => "Day",
            ThemeMode::Night => "Night",
        };
        write!(f, "{}", label)
    }
}

/// One selectable translation shown in the right-hand pane.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, serde::Serialize)]
pub struct TargetLanguage {
    pub code: String,
    pub name: String,
}

impl TargetLanguage {
    pub fn caption_file(&self) -> String {
        format!("{}.srt", self.code)
    }
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, Copy, serde::Deserialize, serde::Serialize)]
pub struct HighlightColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Debug
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
