mod constants;
mod session;
mod ui;

use crate::cache::ViewerCache;
use crate::config::{AppConfig, HighlightColor, ThemeMode, save_config};
use crate::sync::{HighlightTracker, PlaybackClock, SyncScrollCoordinator};
use iced::{Color, Task};
use std::path::PathBuf;
use tracing::{debug, warn};

use super::messages::{Component, Message};
use super::update::Effect;

pub(crate) use constants::*;
pub(in crate::app) use session::ViewerSession;
pub(in crate::app) use ui::CatalogState;

/// Core application state composed of sub-models.
pub struct App {
    pub(super) config: AppConfig,
    pub(super) config_path: PathBuf,
    pub(super) cache: ViewerCache,
    pub(super) catalog: CatalogState,
    pub(super) session: Option<ViewerSession>,
    pub(super) clock: PlaybackClock,
    pub(super) tracker: HighlightTracker,
    pub(super) coordinator: SyncScrollCoordinator,
    pub(super) show_settings: bool,
    pub(super) status: Option<String>,
}

impl App {
    pub(super) fn bootstrap(
        mut config: AppConfig,
        config_path: PathBuf,
        cache: ViewerCache,
    ) -> (App, Task<Message>) {
        clamp_config(&mut config);
        let timings = config.sync_timings();
        let mut app = App {
            catalog: CatalogState::new(config.videos_per_page),
            config,
            config_path,
            cache,
            session: None,
            clock: PlaybackClock::new(),
            tracker: HighlightTracker::new(timings),
            coordinator: SyncScrollCoordinator::new(timings),
            show_settings: false,
            status: None,
        };
        let task = app.run_effect(Effect::LoadVideos);
        (app, task)
    }

    pub(super) fn save_config(&self) {
        if let Err(err) = save_config(&self.config_path, &self.config) {
            warn!(path = %self.config_path.display(), "Failed to save config: {err:#}");
        } else {
            debug!(path = %self.config_path.display(), "Saved config");
        }
    }

    pub(super) fn persist_resume(&self) {
        if let Some(session) = self.session.as_ref().filter(|s| !s.loading && s.error.is_none()) {
            self.cache.save(&session.video.id, &session.resume_entry());
        }
    }

    /// Persist and tear down the current session, if any. Ticks scheduled for
    /// it become stale.
    pub(super) fn end_session(&mut self) {
        self.persist_resume();
        if let Some(mut session) = self.session.take() {
            session.destroy_player();
        }
        self.clock.advance();
    }

    pub(super) fn fallback_pane_width(&self) -> f32 {
        self.config.window_width * PANE_WIDTH_FRACTION
    }

    pub(super) fn relayout_session(&mut self) {
        let font_size = self.config.font_size as f32;
        let line_spacing = self.config.line_spacing;
        let fallback = self.fallback_pane_width();
        if let Some(session) = self.session.as_mut() {
            session.relayout(font_size, line_spacing, fallback);
        }
    }

    pub(super) fn highlight_color(&self) -> Color {
        let base = if matches!(self.config.theme, ThemeMode::Night) {
            self.config.night_highlight
        } else {
            self.config.day_highlight
        };
        Color {
            r: base.r,
            g: base.g,
            b: base.b,
            a: base.a,
        }
    }
}

pub(crate) fn apply_component(
    mut color: HighlightColor,
    component: Component,
    value: f32,
) -> HighlightColor {
    let clamped = value.clamp(0.0, 1.0);
    match component {
        Component::R => color.r = clamped,
        Component::G => color.g = clamped,
        Component::B => color.b = clamped,
        Component::A => color.a = clamped,
    }
    color
}

fn clamp_config(config: &mut AppConfig) {
    fn normalize_key_binding(value: &mut String, fallback: &str) {
        let normalized = value.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            *value = fallback.to_string();
        } else {
            *value = normalized;
        }
    }

    config.font_size = config.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
    config.line_spacing = config.line_spacing.clamp(MIN_LINE_SPACING, MAX_LINE_SPACING);
    config.window_width = config.window_width.clamp(640.0, 7680.0);
    config.window_height = config.window_height.clamp(480.0, 4320.0);
    config.videos_per_page = config.videos_per_page.clamp(1, 60);
    config.title_max_chars = config.title_max_chars.max(4);
    config.tick_interval_ms = config.tick_interval_ms.clamp(4, 250);
    config.fetch_retries = config.fetch_retries.clamp(1, 10);
    config.target_language = config.effective_target_language();

    normalize_key_binding(&mut config.key_toggle_play_pause, "space");
    normalize_key_binding(&mut config.key_recenter, "c");
    normalize_key_binding(&mut config.key_safe_quit, "q");
    normalize_key_binding(&mut config.key_next_cue, "f");
    normalize_key_binding(&mut config.key_prev_cue, "s");
    normalize_key_binding(&mut config.key_export_flashcards, "ctrl+e");
}

#[cfg(test)]
pub(in crate::app) mod test_support {
    use super::session::PaneMetrics;
    use super::*;
    use crate::catalog::VideoEntry;
    use crate::sync::{PanePair, PlaybackState, PlaybackWidget};
    use crate::transcript::parse_srt;

    /// Player whose time only moves when the test says so.
    pub(in crate::app) struct ManualPlayer {
        pub(in crate::app) seconds: f64,
        pub(in crate::app) state: PlaybackState,
    }

    impl PlaybackWidget for ManualPlayer {
        fn seek_to(&mut self, seconds: f64) {
            self.seconds = seconds;
        }
        fn play(&mut self) {
            self.state = PlaybackState::Playing;
        }
        fn pause(&mut self) {
            self.state = PlaybackState::Paused;
        }
        fn destroy(&mut self) {}
        fn current_time(&self) -> f64 {
            self.seconds
        }
        fn playback_state(&self) -> PlaybackState {
            self.state
        }
    }

    pub(in crate::app) const CAPTIONS: &str = "1\n00:00:00,000 --> 00:00:02,000\nPremière ligne\n\n2\n00:00:02,000 --> 00:00:04,000\nDeuxième ligne\n\n3\n00:00:04,000 --> 00:00:06,000\nTroisième ligne\n\n4\n00:00:08,000 --> 00:00:10,000\nQuatrième ligne\n";

    pub(in crate::app) fn build_test_app(name: &str) -> App {
        let dir = std::env::temp_dir().join(format!("subsync-app-{name}-{}", std::process::id()));
        let mut config = AppConfig::default();
        config.api_base_url = String::new();
        config.captions_base = dir.join("texts").to_string_lossy().into_owned();
        let (app, _task) = App::bootstrap(
            config,
            dir.join("config.toml"),
            ViewerCache::new(dir.join("cache")),
        );
        app
    }

    /// App with a loaded session on `CAPTIONS` and a manual player.
    pub(in crate::app) fn build_session_app(name: &str) -> App {
        let mut app = build_test_app(name);
        let generation = app.clock.advance();
        let mut session = ViewerSession::new(
            generation,
            VideoEntry {
                id: "vid".to_string(),
                title: "Vidéo".to_string(),
            },
            "pt".to_string(),
            None,
        );
        session.source_cues = parse_srt(CAPTIONS);
        session.target_cues.insert("pt".to_string(), parse_srt(CAPTIONS));
        session.rebuild("n/a");
        session.loading = false;
        session.player = Some(Box::new(ManualPlayer {
            seconds: 0.0,
            state: PlaybackState::Unstarted,
        }));
        session.metrics = PanePair::new(
            PaneMetrics {
                offset_y: 0.0,
                viewport_width: 400.0,
                viewport_height: 60.0,
                content_height: None,
            },
            PaneMetrics {
                offset_y: 0.0,
                viewport_width: 400.0,
                viewport_height: 60.0,
                content_height: None,
            },
        );
        app.session = Some(session);
        app.relayout_session();
        app
    }
}
