use super::super::messages::LoadedCaptions;
use super::super::state::{App, ViewerSession};
use super::Effect;
use crate::catalog::{Catalog, PageNav, Thumbnail, VideoEntry};
use crate::sync::{ClockPlayer, PlaybackWidget};
use crate::transcript::Cue;
use iced::widget::image;
use std::time::Instant;
use tracing::{debug, info, warn};

impl App {
    pub(super) fn handle_videos_loaded(
        &mut self,
        videos: Vec<VideoEntry>,
        error: Option<String>,
        effects: &mut Vec<Effect>,
    ) {
        self.catalog.loading = false;
        if let Some(err) = error {
            warn!("Video list unavailable: {err}");
            self.catalog.error = Some(err);
        }
        info!(count = videos.len(), "Catalog loaded");
        self.catalog.catalog = Catalog::new(videos, self.config.videos_per_page);
        if self.config.show_thumbnails && !self.catalog.catalog.is_empty() {
            let ids = self
                .catalog
                .catalog
                .videos()
                .iter()
                .map(|video| video.id.clone())
                .collect();
            effects.push(Effect::LoadThumbnails(ids));
        }
    }

    pub(super) fn handle_thumbnail_loaded(&mut self, video_id: String, thumbnail: Option<Thumbnail>) {
        let Some(thumbnail) = thumbnail else {
            return;
        };
        let handle = image::Handle::from_rgba(thumbnail.width, thumbnail.height, thumbnail.rgba);
        self.catalog.thumbnails.insert(video_id, handle);
    }

    pub(super) fn handle_catalog_navigate(&mut self, nav: PageNav) {
        if self.catalog.catalog.navigate(nav) {
            debug!(?nav, page = self.catalog.catalog.page(), "Catalog page changed");
        }
    }

    pub(super) fn handle_select_video(&mut self, video_id: String, effects: &mut Vec<Effect>) {
        let Some(video) = self.catalog.catalog.get(&video_id).cloned() else {
            warn!(video = %video_id, "Selected video is not in the catalog");
            return;
        };
        if self
            .session
            .as_ref()
            .is_some_and(|session| session.video.id == video.id && session.error.is_none())
        {
            debug!(video = %video.id, "Video already open");
            return;
        }

        // The old player must be gone before the new session exists.
        self.end_session();
        let generation = self.clock.advance();
        let resume = self.cache.load(&video.id);
        let language = resume
            .as_ref()
            .map(|entry| entry.language.clone())
            .filter(|code| self.config.target_languages.iter().any(|l| &l.code == code))
            .unwrap_or_else(|| self.config.effective_target_language());

        info!(video = %video.id, %language, generation, "Opening video");
        self.status = None;
        self.session = Some(ViewerSession::new(
            generation,
            video.clone(),
            language.clone(),
            resume,
        ));
        effects.push(Effect::LoadCaptions {
            generation,
            video_id: video.id,
            language,
        });
    }

    pub(super) fn handle_back_to_catalog(&mut self, effects: &mut Vec<Effect>) {
        if self.session.is_none() {
            return;
        }
        info!("Returning to catalog");
        self.end_session();
        effects.push(Effect::SaveConfig);
    }

    pub(super) fn handle_captions_loaded(
        &mut self,
        generation: u64,
        video_id: String,
        language: String,
        captions: Option<LoadedCaptions>,
        error: Option<String>,
        effects: &mut Vec<Effect>,
    ) {
        if !self.clock.is_current(generation) {
            debug!(video = %video_id, generation, "Dropping stale caption load");
            return;
        }
        let placeholder = self.config.phonetic_placeholder.clone();
        let Some(session) = self.session.as_mut().filter(|s| s.video.id == video_id) else {
            return;
        };
        session.loading = false;

        let captions = match (captions, error) {
            (Some(captions), None) => captions,
            (_, error) => {
                let message = error.unwrap_or_else(|| "captions unavailable".to_string());
                warn!(video = %video_id, "Failed to load captions: {message}");
                session.error = Some(message);
                session.recenter_enabled = false;
                return;
            }
        };

        session.source_cues = captions.source;
        session.phonetic_cues = captions.phonetic;
        session.target_cues.insert(language.clone(), captions.target);
        session.language = language;
        session.rebuild(&placeholder);

        let mut player = ClockPlayer::new(session.duration());
        if let Some(resume) = session
            .resume
            .take()
            .filter(|resume| resume.language == session.language)
        {
            info!(
                video = %video_id,
                playhead = resume.playhead_seconds,
                cue = ?resume.last_cue_id,
                "Resuming where the video was left"
            );
            player.seek_to(resume.playhead_seconds);
            session.playhead_seconds = resume.playhead_seconds;
            if let Some(cue_id) = resume.last_cue_id {
                session.sync.last_highlighted_cue_id = Some(cue_id);
                self.tracker.apply(cue_id, &mut session.panes, Instant::now());
            }
        }
        session.player = Some(Box::new(player));

        if session.aligned.is_empty() {
            self.status = Some("This video has no subtitles".to_string());
        }
        self.relayout_session();
        effects.push(Effect::SaveResume);
    }

    pub(super) fn handle_language_selected(&mut self, code: String, effects: &mut Vec<Effect>) {
        if !self.config.target_languages.iter().any(|lang| lang.code == code) {
            warn!(language = %code, "Unknown target language");
            return;
        }
        self.config.target_language = code.clone();
        effects.push(Effect::SaveConfig);

        // A session still loading its first captions picks the language up
        // from the config when it opens next time. A target reload in flight
        // is superseded below by the new generation.
        if self
            .session
            .as_ref()
            .is_none_or(|s| s.language == code || s.awaiting_first_load())
        {
            return;
        }
        let generation = self.clock.advance();
        let placeholder = self.config.phonetic_placeholder.clone();
        let Some(session) = self.session.as_mut() else {
            return;
        };
        info!(video = %session.video.id, from = %session.language, to = %code, "Switching target language");
        session.language = code.clone();
        session.generation = generation;

        if session.target_cues.contains_key(&code) {
            session.loading = false;
            let carried = session.sync.last_highlighted_cue_id();
            session.rebuild(&placeholder);
            self.carry_highlight(carried);
            self.relayout_session();
            self.recenter_session(false, Instant::now(), effects);
        } else {
            session.loading = true;
            effects.push(Effect::LoadTargetCaptions {
                generation,
                video_id: session.video.id.clone(),
                language: code,
            });
        }
    }

    pub(super) fn handle_target_captions_loaded(
        &mut self,
        generation: u64,
        language: String,
        cues: Vec<Cue>,
        error: Option<String>,
        effects: &mut Vec<Effect>,
    ) {
        if !self.clock.is_current(generation) {
            debug!(%language, generation, "Dropping stale target caption load");
            return;
        }
        let placeholder = self.config.phonetic_placeholder.clone();
        let Some(session) = self.session.as_mut().filter(|s| s.language == language) else {
            return;
        };
        session.loading = false;
        if let Some(err) = error {
            warn!(%language, "Target captions unavailable: {err}");
            self.status = Some(format!(
                "{} subtitles unavailable",
                self.config.language_name(&language)
            ));
        } else {
            session.target_cues.insert(language, cues);
        }
        let carried = session.sync.last_highlighted_cue_id();
        session.rebuild(&placeholder);
        self.carry_highlight(carried);
        self.relayout_session();
        self.recenter_session(false, Instant::now(), effects);
    }

    /// Keep the cue that was highlighted before the panes were rebuilt, so
    /// switching language does not jump back to the first line.
    fn carry_highlight(&mut self, cue_id: Option<u32>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(cue_id) = cue_id.filter(|id| session.aligned.iter().any(|sub| sub.id == *id))
        else {
            return;
        };
        session.sync.last_highlighted_cue_id = Some(cue_id);
        self.tracker.apply(cue_id, &mut session.panes, Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::test_support::{CAPTIONS, build_session_app, build_test_app};
    use crate::catalog::NO_VIDEOS_PLACEHOLDER;
    use crate::sync::ScrollPhase;
    use crate::transcript::parse_srt;

    fn videos(n: usize) -> Vec<VideoEntry> {
        (0..n)
            .map(|i| VideoEntry {
                id: format!("v{i}"),
                title: format!("Vidéo {i}"),
            })
            .collect()
    }

    fn captions() -> LoadedCaptions {
        LoadedCaptions {
            source: parse_srt(CAPTIONS),
            target: parse_srt(CAPTIONS),
            phonetic: Vec::new(),
        }
    }

    #[test]
    fn empty_catalog_requests_no_thumbnails() {
        let mut app = build_test_app("catalog-empty");
        let mut effects = Vec::new();
        app.handle_videos_loaded(Vec::new(), None, &mut effects);
        assert!(!app.catalog.loading);
        assert!(app.catalog.catalog.is_empty());
        assert!(effects.is_empty());
        assert_eq!(app.catalog.catalog.empty_sidebar_text(), NO_VIDEOS_PLACEHOLDER);
    }

    #[test]
    fn session_on_empty_catalog_shows_placeholder_in_sidebar_and_panes() {
        let mut app = build_session_app("catalog-empty-session");
        app.handle_videos_loaded(Vec::new(), None, &mut Vec::new());
        if let Some(session) = app.session.as_mut() {
            session.panes.target.lines.clear();
        }

        let session = app.session.as_ref().expect("session");
        let catalog = &app.catalog.catalog;
        assert_eq!(catalog.sidebar(Some(session.video.id.as_str())).count(), 0);
        assert_eq!(catalog.empty_sidebar_text(), NO_VIDEOS_PLACEHOLDER);
        assert!(session.panes.target.is_empty());
        assert_eq!(catalog.empty_pane_text(), NO_VIDEOS_PLACEHOLDER);
    }

    #[test]
    fn selecting_a_video_starts_a_new_generation() {
        let mut app = build_test_app("catalog-select");
        app.handle_videos_loaded(videos(8), None, &mut Vec::new());
        let before = app.clock.generation();

        let mut effects = Vec::new();
        app.handle_select_video("v3".to_string(), &mut effects);

        let session = app.session.as_ref().expect("session");
        assert_eq!(session.video.id, "v3");
        assert!(session.loading);
        assert_eq!(session.generation, before + 1);
        assert!(matches!(
            effects.as_slice(),
            [Effect::LoadCaptions { generation, .. }] if *generation == before + 1
        ));
    }

    #[test]
    fn unknown_video_is_ignored() {
        let mut app = build_test_app("catalog-unknown");
        app.handle_videos_loaded(videos(2), None, &mut Vec::new());
        let mut effects = Vec::new();
        app.handle_select_video("missing".to_string(), &mut effects);
        assert!(app.session.is_none());
        assert!(effects.is_empty());
    }

    #[test]
    fn stale_caption_results_are_dropped() {
        let mut app = build_test_app("catalog-stale");
        app.handle_videos_loaded(videos(3), None, &mut Vec::new());
        app.handle_select_video("v0".to_string(), &mut Vec::new());
        let old_generation = app.clock.generation();
        app.handle_select_video("v1".to_string(), &mut Vec::new());

        app.handle_captions_loaded(
            old_generation,
            "v0".to_string(),
            "pt".to_string(),
            Some(captions()),
            None,
            &mut Vec::new(),
        );
        let session = app.session.as_ref().expect("session");
        assert_eq!(session.video.id, "v1");
        assert!(session.loading);
        assert!(session.aligned.is_empty());
    }

    #[test]
    fn loaded_captions_build_panes_and_player() {
        let mut app = build_test_app("catalog-loaded");
        app.handle_videos_loaded(videos(1), None, &mut Vec::new());
        app.handle_select_video("v0".to_string(), &mut Vec::new());
        let generation = app.clock.generation();

        app.handle_captions_loaded(
            generation,
            "v0".to_string(),
            "pt".to_string(),
            Some(captions()),
            None,
            &mut Vec::new(),
        );
        let session = app.session.as_ref().expect("session");
        assert!(!session.loading);
        assert_eq!(session.aligned.len(), 4);
        assert_eq!(session.panes.target.lines.len(), 4);
        assert!(session.player.is_some());
        assert!(session.recenter_enabled);
    }

    #[test]
    fn caption_error_is_shown_on_the_session() {
        let mut app = build_test_app("catalog-error");
        app.handle_videos_loaded(videos(1), None, &mut Vec::new());
        app.handle_select_video("v0".to_string(), &mut Vec::new());
        let generation = app.clock.generation();
        app.handle_captions_loaded(
            generation,
            "v0".to_string(),
            "pt".to_string(),
            None,
            Some("HTTP 404".to_string()),
            &mut Vec::new(),
        );
        let session = app.session.as_ref().expect("session");
        assert_eq!(session.error.as_deref(), Some("HTTP 404"));
        assert!(!session.recenter_enabled);
    }

    #[test]
    fn language_switch_loads_missing_cues_and_keeps_highlight() {
        let mut app = build_session_app("catalog-language");
        let now = Instant::now();
        if let Some(session) = app.session.as_mut() {
            session.sync.last_highlighted_cue_id = Some(3);
            app.tracker.apply(3, &mut session.panes, now);
        }

        let mut effects = Vec::new();
        app.handle_language_selected("en".to_string(), &mut effects);
        let generation = app.clock.generation();
        assert!(
            effects
                .iter()
                .any(|effect| matches!(effect, Effect::LoadTargetCaptions { language, .. } if language == "en"))
        );
        assert!(app.session.as_ref().is_some_and(|s| s.loading));

        app.handle_target_captions_loaded(
            generation,
            "en".to_string(),
            parse_srt(CAPTIONS),
            None,
            &mut Vec::new(),
        );
        let session = app.session.as_ref().expect("session");
        assert!(!session.loading);
        assert_eq!(session.language, "en");
        assert_eq!(session.sync.last_highlighted_cue_id(), Some(3));
        assert_eq!(session.panes.target.active_line(), Some(2));
        assert_eq!(app.config.target_language, "en");
    }

    #[test]
    fn switching_back_uses_cached_cues() {
        let mut app = build_session_app("catalog-cached");
        let mut effects = Vec::new();
        app.handle_language_selected("en".to_string(), &mut effects);
        let generation = app.clock.generation();
        app.handle_target_captions_loaded(
            generation,
            "en".to_string(),
            Vec::new(),
            None,
            &mut Vec::new(),
        );

        let mut back = Vec::new();
        app.handle_language_selected("pt".to_string(), &mut back);
        assert!(
            !back
                .iter()
                .any(|effect| matches!(effect, Effect::LoadTargetCaptions { .. }))
        );
        let session = app.session.as_ref().expect("session");
        assert!(!session.loading);
        assert_eq!(session.panes.target.lines.len(), 4);
    }

    #[test]
    fn reselecting_during_a_target_reload_follows_the_latest_choice() {
        let mut app = build_session_app("catalog-reload-race");
        let mut effects = Vec::new();
        app.handle_language_selected("en".to_string(), &mut effects);
        let en_generation = app.clock.generation();

        let mut back = Vec::new();
        app.handle_language_selected("pt".to_string(), &mut back);
        assert!(app.clock.generation() > en_generation);
        assert!(
            !back
                .iter()
                .any(|effect| matches!(effect, Effect::LoadTargetCaptions { .. }))
        );

        app.handle_target_captions_loaded(
            en_generation,
            "en".to_string(),
            parse_srt(CAPTIONS),
            None,
            &mut Vec::new(),
        );
        let session = app.session.as_ref().expect("session");
        assert_eq!(session.language, "pt");
        assert_eq!(app.config.target_language, "pt");
        assert!(!session.loading);
        assert!(!session.target_cues.contains_key("en"));
        assert_eq!(session.panes.target.lines.len(), 4);
    }

    #[test]
    fn choosing_a_language_before_the_first_load_only_updates_config() {
        let mut app = build_test_app("catalog-first-load");
        app.handle_videos_loaded(videos(1), None, &mut Vec::new());
        app.handle_select_video("v0".to_string(), &mut Vec::new());
        let generation = app.clock.generation();

        let mut effects = Vec::new();
        app.handle_language_selected("en".to_string(), &mut effects);
        assert!(matches!(effects.as_slice(), [Effect::SaveConfig]));
        assert_eq!(app.clock.generation(), generation);
        assert_eq!(app.config.target_language, "en");
        assert!(app.session.as_ref().is_some_and(|s| s.loading));
    }

    #[test]
    fn language_switch_recenters_on_the_carried_line() {
        let mut app = build_session_app("catalog-recenter");
        let now = Instant::now();
        if let Some(session) = app.session.as_mut() {
            session.target_cues.insert("en".to_string(), parse_srt(CAPTIONS));
            session.sync.last_highlighted_cue_id = Some(4);
            app.tracker.apply(4, &mut session.panes, now);
        }

        app.handle_language_selected("en".to_string(), &mut Vec::new());
        let session = app.session.as_ref().expect("session");
        assert_eq!(session.panes.target.active_line(), Some(3));
        assert!(matches!(session.sync.phase(), ScrollPhase::Recentering { .. }));
    }
}
