pub(crate) fn default_font_size() -> u32 {
    18
}

pub(crate) fn default_line_spacing() -> f32 {
    1.3
}

pub(crate) fn default_window_width() -> f32 {
    1280.0
}

pub(crate) fn default_window_height() -> f32 {
    820.0
}

pub(crate) fn default_day_highlight() -> crate::config::HighlightColor {
    crate::config::HighlightColor {
        r: 0.2,
        g: 0.4,
        b: 0.7,
        a: 0.15,
    }
}

pub(crate) fn default_night_highlight() -> crate::config::HighlightColor {
    crate::config::HighlightColor {
        r: 0.8,
        g: 0.8,
        b: 0.5,
        a: 0.2,
    }
}

pub(crate) fn default_recenter_settle_ms() -> u64 {
    600
}

pub(crate) fn default_recenter_animation_ms() -> u64 {
    250
}

pub(crate) fn default_mirror_guard_ms() -> u64 {
    50
}

pub(crate) fn default_user_idle_ms() -> u64 {
    4000
}

pub(crate) fn default_highlight_exit_ms() -> u64 {
    300
}

pub(crate) fn default_tick_interval_ms() -> u64 {
    16
}

pub(crate) fn default_videos_per_page() -> usize {
    6
}

pub(crate) fn default_title_max_chars() -> usize {
    30
}

pub(crate) fn default_api_base_url() -> String {
    "http://localhost:8000".to_string()
}

pub(crate) fn default_show_thumbnails() -> bool {
    true
}

pub(crate) fn default_thumbnail_url_template() -> String {
    "https://img.youtube.com/vi/{id}/0.jpg".to_string()
}

pub(crate) fn default_captions_base() -> String {
    "http://localhost:8000/texts".to_string()
}

pub(crate) fn default_source_file() -> String {
    "original.fr.srt".to_string()
}

pub(crate) fn default_phonetic_file() -> String {
    "phonetic.fr.srt".to_string()
}

pub(crate) fn default_source_language_name() -> String {
    "Français".to_string()
}

pub(crate) fn default_target_languages() -> Vec<crate::config::TargetLanguage> {
    vec![
        crate::config::TargetLanguage {
            code: "pt".to_string(),
            name: "Português".to_string(),
        },
        crate::config::TargetLanguage {
            code: "en".to_string(),
            name: "English".to_string(),
        },
    ]
}

pub(crate) fn default_target_language() -> String {
    "pt".to_string()
}

pub(crate) fn default_phonetic_placeholder() -> String {
    "Phonetic transcription not available".to_string()
}

pub(crate) fn default_fetch_retries() -> u32 {
    3
}

pub(crate) fn default_fetch_retry_delay_ms() -> u64 {
    1000
}

pub(crate) fn default_export_dir() -> String {
    "exports".to_string()
}

pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::Debug
}

pub(crate) fn default_key_toggle_play_pause() -> String {
    "space".to_string()
}

pub(crate) fn default_key_recenter() -> String {
    "c".to_string()
}

pub(crate) fn default_key_safe_quit() -> String {
    "q".to_string()
}

pub(crate) fn default_key_next_cue() -> String {
    "f".to_string()
}

pub(crate) fn default_key_prev_cue() -> String {
    "s".to_string()
}

pub(crate) fn default_key_export_flashcards() -> String {
    "ctrl+e".to_string()
}
