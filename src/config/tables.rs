use super::defaults;
use super::models::{AppConfig, HighlightColor, LogLevel, TargetLanguage, ThemeMode};
use serde::Deserialize;

/// Table names recognised in the grouped config layout.
pub(super) const TABLE_NAMES: [&str; 6] =
    ["appearance", "sync", "catalog", "captions", "logging", "keys"];

#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    appearance: AppearanceConfig,
    #[serde(default)]
    sync: SyncConfig,
    #[serde(default)]
    catalog: CatalogConfig,
    #[serde(default)]
    captions: CaptionsConfig,
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    keys: KeysConfig,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            theme: tables.appearance.theme,
            font_size: tables.appearance.font_size,
            line_spacing: tables.appearance.line_spacing,
            window_width: tables.appearance.window_width,
            window_height: tables.appearance.window_height,
            day_highlight: tables.appearance.day_highlight,
            night_highlight: tables.appearance.night_highlight,
            recenter_settle_ms: tables.sync.recenter_settle_ms,
            recenter_animation_ms: tables.sync.recenter_animation_ms,
            mirror_guard_ms: tables.sync.mirror_guard_ms,
            user_idle_ms: tables.sync.user_idle_ms,
            highlight_exit_ms: tables.sync.highlight_exit_ms,
            tick_interval_ms: tables.sync.tick_interval_ms,
            videos_per_page: tables.catalog.videos_per_page,
            title_max_chars: tables.catalog.title_max_chars,
            api_base_url: tables.catalog.api_base_url,
            show_thumbnails: tables.catalog.show_thumbnails,
            thumbnail_url_template: tables.catalog.thumbnail_url_template,
            captions_base: tables.captions.captions_base,
            source_file: tables.captions.source_file,
            phonetic_file: tables.captions.phonetic_file,
            source_language_name: tables.captions.source_language_name,
            target_languages: tables.captions.target_languages,
            target_language: tables.captions.target_language,
            phonetic_placeholder: tables.captions.phonetic_placeholder,
            fetch_retries: tables.captions.fetch_retries,
            fetch_retry_delay_ms: tables.captions.fetch_retry_delay_ms,
            export_dir: tables.captions.export_dir,
            log_level: tables.logging.log_level,
            key_toggle_play_pause: tables.keys.toggle_play_pause,
            key_recenter: tables.keys.recenter,
            key_safe_quit: tables.keys.safe_quit,
            key_next_cue: tables.keys.next_cue,
            key_prev_cue: tables.keys.prev_cue,
            key_export_flashcards: tables.keys.export_flashcards,
        }
    }
}

impl From<&AppConfig> for ConfigTables {
    fn from(config: &AppConfig) -> Self {
        ConfigTables {
            appearance: AppearanceConfig {
                theme: config.theme,
                font_size: config.font_size,
                line_spacing: config.line_spacing,
                window_width: config.window_width,
                window_height: config.window_height,
                day_highlight: config.day_highlight,
                night_highlight: config.night_highlight,
            },
            sync: SyncConfig {
                recenter_settle_ms: config.recenter_settle_ms,
                recenter_animation_ms: config.recenter_animation_ms,
                mirror_guard_ms: config.mirror_guard_ms,
                user_idle_ms: config.user_idle_ms,
                highlight_exit_ms: config.highlight_exit_ms,
                tick_interval_ms: config.tick_interval_ms,
            },
            catalog: CatalogConfig {
                videos_per_page: config.videos_per_page,
                title_max_chars: config.title_max_chars,
                api_base_url: config.api_base_url.clone(),
                show_thumbnails: config.show_thumbnails,
                thumbnail_url_template: config.thumbnail_url_template.clone(),
            },
            captions: CaptionsConfig {
                captions_base: config.captions_base.clone(),
                source_file: config.source_file.clone(),
                phonetic_file: config.phonetic_file.clone(),
                source_language_name: config.source_language_name.clone(),
                target_languages: config.target_languages.clone(),
                target_language: config.target_language.clone(),
                phonetic_placeholder: config.phonetic_placeholder.clone(),
                fetch_retries: config.fetch_retries,
                fetch_retry_delay_ms: config.fetch_retry_delay_ms,
                export_dir: config.export_dir.clone(),
            },
            logging: LoggingConfig {
                log_level: config.log_level,
            },
            keys: KeysConfig {
                toggle_play_pause: config.key_toggle_play_pause.clone(),
                recenter: config.key_recenter.clone(),
                safe_quit: config.key_safe_quit.clone(),
                next_cue: config.key_next_cue.clone(),
                prev_cue: config.key_prev_cue.clone(),
                export_flashcards: config.key_export_flashcards.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct AppearanceConfig {
    #[serde(default)]
    theme: ThemeMode,
    #[serde(default = "defaults::default_font_size")]
    font_size: u32,
    #[serde(default = "defaults::default_line_spacing")]
    line_spacing: f32,
    #[serde(default = "defaults::default_window_width")]
    window_width: f32,
    #[serde(default = "defaults::default_window_height")]
    window_height: f32,
    #[serde(default = "defaults::default_day_highlight")]
    day_highlight: HighlightColor,
    #[serde(default = "defaults::default_night_highlight")]
    night_highlight: HighlightColor,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        AppearanceConfig {
            theme: ThemeMode::default(),
            font_size: defaults::default_font_size(),
            line_spacing: defaults::default_line_spacing(),
            window_width: defaults::default_window_width(),
            window_height: defaults::default_window_height(),
            day_highlight: defaults::default_day_highlight(),
            night_highlight: defaults::default_night_highlight(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct SyncConfig {
    #[serde(default = "defaults::default_recenter_settle_ms")]
    recenter_settle_ms: u64,
    #[serde(default = "defaults::default_recenter_animation_ms")]
    recenter_animation_ms: u64,
    #[serde(default = "defaults::default_mirror_guard_ms")]
    mirror_guard_ms: u64,
    #[serde(default = "defaults::default_user_idle_ms")]
    user_idle_ms: u64,
    #[serde(default = "defaults::default_highlight_exit_ms")]
    highlight_exit_ms: u64,
    #[serde(default = "defaults::default_tick_interval_ms")]
    tick_interval_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            recenter_settle_ms: defaults::default_recenter_settle_ms(),
            recenter_animation_ms: defaults::default_recenter_animation_ms(),
            mirror_guard_ms: defaults::default_mirror_guard_ms(),
            user_idle_ms: defaults::default_user_idle_ms(),
            highlight_exit_ms: defaults::default_highlight_exit_ms(),
            tick_interval_ms: defaults::default_tick_interval_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct CatalogConfig {
    #[serde(default = "defaults::default_videos_per_page")]
    videos_per_page: usize,
    #[serde(default = "defaults::default_title_max_chars")]
    title_max_chars: usize,
    #[serde(default = "defaults::default_api_base_url")]
    api_base_url: String,
    #[serde(default = "defaults::default_show_thumbnails")]
    show_thumbnails: bool,
    #[serde(default = "defaults::default_thumbnail_url_template")]
    thumbnail_url_template: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            videos_per_page: defaults::default_videos_per_page(),
            title_max_chars: defaults::default_title_max_chars(),
            api_base_url: defaults::default_api_base_url(),
            show_thumbnails: defaults::default_show_thumbnails(),
            thumbnail_url_template: defaults::default_thumbnail_url_template(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct CaptionsConfig {
    #[serde(default = "defaults::default_captions_base")]
    captions_base: String,
    #[serde(default = "defaults::default_source_file")]
    source_file: String,
    #[serde(default = "defaults::default_phonetic_file")]
    phonetic_file: String,
    #[serde(default = "defaults::default_source_language_name")]
    source_language_name: String,
    #[serde(default = "defaults::default_target_languages")]
    target_languages: Vec<TargetLanguage>,
    #[serde(default = "defaults::default_target_language")]
    target_language: String,
    #[serde(default = "defaults::default_phonetic_placeholder")]
    phonetic_placeholder: String,
    #[serde(default = "defaults::default_fetch_retries")]
    fetch_retries: u32,
    #[serde(default = "defaults::default_fetch_retry_delay_ms")]
    fetch_retry_delay_ms: u64,
    #[serde(default = "defaults::default_export_dir")]
    export_dir: String,
}

impl Default for CaptionsConfig {
    fn default() -> Self {
        CaptionsConfig {
            captions_base: defaults::default_captions_base(),
            source_file: defaults::default_source_file(),
            phonetic_file: defaults::default_phonetic_file(),
            source_language_name: defaults::default_source_language_name(),
            target_languages: defaults::default_target_languages(),
            target_language: defaults::default_target_language(),
            phonetic_placeholder: defaults::default_phonetic_placeholder(),
            fetch_retries: defaults::default_fetch_retries(),
            fetch_retry_delay_ms: defaults::default_fetch_retry_delay_ms(),
            export_dir: defaults::default_export_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct KeysConfig {
    #[serde(default = "defaults::default_key_toggle_play_pause")]
    toggle_play_pause: String,
    #[serde(default = "defaults::default_key_recenter")]
    recenter: String,
    #[serde(default = "defaults::default_key_safe_quit")]
    safe_quit: String,
    #[serde(default = "defaults::default_key_next_cue")]
    next_cue: String,
    #[serde(default = "defaults::default_key_prev_cue")]
    prev_cue: String,
    #[serde(default = "defaults::default_key_export_flashcards")]
    export_flashcards: String,
}

impl Default for KeysConfig {
    fn default() -> Self {
        KeysConfig {
            toggle_play_pause: defaults::default_key_toggle_play_pause(),
            recenter: defaults::default_key_recenter(),
            safe_quit: defaults::default_key_safe_quit(),
            next_cue: defaults::default_key_next_cue(),
            prev_cue: defaults::default_key_prev_cue(),
            export_flashcards: defaults::default_key_export_flashcards(),
        }
    }
}
