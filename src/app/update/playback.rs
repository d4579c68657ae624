use super::super::state::App;
use super::Effect;
use crate::sync::{PlaybackState, TickOutcome};
use crate::transcript::PaneRole;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, trace, warn};

impl App {
    /// One frame of the sync loop: sample the player, advance scroll timers,
    /// recompute the highlight and recenter when nobody else is scrolling.
    pub(super) fn handle_tick(&mut self, generation: u64, now: Instant, effects: &mut Vec<Effect>) {
        if !self.clock.is_current(generation) {
            trace!(generation, current = self.clock.generation(), "Dropping stale tick");
            return;
        }
        let coordinator = self.coordinator;
        let tracker = self.tracker;
        let Some(session) = self
            .session
            .as_mut()
            .filter(|s| !s.loading && s.error.is_none())
        else {
            return;
        };

        let sample = self.clock.sample(session.player.as_deref());
        if sample.state != session.playback_state {
            debug!(from = %session.playback_state, to = %sample.state, "Playback state changed");
            if matches!(sample.state, PlaybackState::Paused | PlaybackState::Ended) {
                effects.push(Effect::SaveResume);
            }
        }
        session.playhead_seconds = sample.seconds;
        session.playback_state = sample.state;

        let polled = coordinator.poll(&mut session.sync, now, sample.state.is_playing());
        Self::push_scroll(session, polled.commands, effects);

        let outcome = tracker.tick(
            sample.seconds,
            &session.aligned,
            &mut session.panes,
            &mut session.sync,
            sample.state,
            now,
        );
        match outcome {
            TickOutcome::Disabled => session.recenter_enabled = false,
            TickOutcome::Active { recenter, .. } => {
                session.recenter_enabled = true;
                if recenter || polled.recenter_due {
                    let from = session.current_offsets();
                    let to = session.recenter_targets();
                    let commands = coordinator.recenter(&mut session.sync, from, to, now);
                    Self::push_scroll(session, commands, effects);
                }
            }
        }
    }

    pub(super) fn handle_toggle_play_pause(&mut self, effects: &mut Vec<Effect>) {
        let Some(player) = self
            .session
            .as_mut()
            .filter(|s| !s.loading)
            .and_then(|s| s.player.as_mut())
        else {
            return;
        };
        match player.playback_state() {
            PlaybackState::Playing => {
                player.pause();
                info!("Paused playback");
                effects.push(Effect::SaveResume);
            }
            PlaybackState::Ended => {
                player.seek_to(0.0);
                player.play();
                info!("Restarted playback from the beginning");
            }
            _ => {
                player.play();
                info!("Started playback");
            }
        }
    }

    /// Click-to-seek: jump to the line's cue, play, highlight it and recenter.
    pub(super) fn handle_line_clicked(&mut self, pane: PaneRole, index: usize, effects: &mut Vec<Effect>) {
        let now = Instant::now();
        let Some(start) = self
            .session
            .as_ref()
            .and_then(|s| s.panes.get(pane).lines.get(index))
            .map(|line| line.start_seconds)
        else {
            debug!(%pane, index, "Click on a line that is no longer rendered");
            return;
        };
        info!(%pane, index, start, "Seeking to clicked line");
        self.seek_and_highlight(start, true, now);
        self.recenter_session(true, now, effects);
    }

    /// Move to the next or previous aligned cue, keeping the play state.
    pub(super) fn handle_step_cue(&mut self, forward: bool, effects: &mut Vec<Effect>) {
        let now = Instant::now();
        let Some(start) = self.session.as_ref().and_then(|session| {
            let current = session.active_index();
            let next = match (current, forward) {
                (None, _) => 0,
                (Some(idx), true) => (idx + 1).min(session.aligned.len().saturating_sub(1)),
                (Some(idx), false) => idx.saturating_sub(1),
            };
            session.aligned.get(next).map(|sub| sub.start_seconds)
        }) else {
            return;
        };
        debug!(forward, start, "Stepping to adjacent cue");
        self.seek_and_highlight(start, false, now);
        self.recenter_session(true, now, effects);
    }

    fn seek_and_highlight(&mut self, seconds: f64, play: bool, now: Instant) {
        let tracker = self.tracker;
        let Some(session) = self.session.as_mut().filter(|s| !s.loading) else {
            return;
        };
        let Some(player) = session.player.as_mut() else {
            return;
        };
        player.seek_to(seconds);
        if play {
            player.play();
        }
        let state = player.playback_state();
        session.playhead_seconds = seconds;
        session.playback_state = state;
        tracker.tick(
            seconds,
            &session.aligned,
            &mut session.panes,
            &mut session.sync,
            state,
            now,
        );
    }

    pub(super) fn handle_toggle_phonetic(&mut self, index: usize) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if index >= session.aligned.len() {
            return;
        }
        session.phonetic_open = if session.phonetic_open == Some(index) {
            None
        } else {
            Some(index)
        };
        debug!(index, open = session.phonetic_open.is_some(), "Toggled phonetic line");
    }

    pub(super) fn handle_hide_phonetic(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.phonetic_open = None;
        }
    }

    pub(super) fn handle_export_flashcards(&mut self, effects: &mut Vec<Effect>) {
        if self.session.as_ref().is_some_and(|s| !s.loading) {
            info!("Exporting flashcards");
            effects.push(Effect::ExportFlashcards);
        }
    }

    pub(super) fn handle_flashcards_exported(&mut self, path: Option<PathBuf>, error: Option<String>) {
        self.status = match (path, error) {
            (Some(path), None) => {
                info!(path = %path.display(), "Flashcards exported");
                Some(format!("Flashcards saved to {}", path.display()))
            }
            (_, error) => {
                let message = error.unwrap_or_else(|| "unknown error".to_string());
                warn!("Flashcard export failed: {message}");
                Some(format!("Flashcard export failed: {message}"))
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::test_support::{ManualPlayer, build_session_app};
    use crate::sync::ScrollPhase;
    use std::time::Duration;

    fn set_player(app: &mut App, seconds: f64, state: PlaybackState) {
        if let Some(session) = app.session.as_mut() {
            session.player = Some(Box::new(ManualPlayer { seconds, state }));
        }
    }

    fn generation(app: &App) -> u64 {
        app.session.as_ref().map(|s| s.generation).unwrap_or_default()
    }

    #[test]
    fn tick_highlights_active_cue_and_recenters_while_playing() {
        let mut app = build_session_app("playback-tick");
        set_player(&mut app, 4.5, PlaybackState::Playing);

        let mut effects = Vec::new();
        app.handle_tick(generation(&app), Instant::now(), &mut effects);

        let session = app.session.as_ref().expect("session");
        assert_eq!(session.sync.last_highlighted_cue_id(), Some(3));
        assert_eq!(session.panes.source.active_line(), Some(2));
        assert_eq!(session.panes.target.active_line(), Some(2));
        assert!(matches!(session.sync.phase(), ScrollPhase::Recentering { .. }));
        assert!(session.recenter_enabled);
    }

    #[test]
    fn gap_between_cues_keeps_previous_highlight() {
        let mut app = build_session_app("playback-gap");
        set_player(&mut app, 5.0, PlaybackState::Paused);
        app.handle_tick(generation(&app), Instant::now(), &mut Vec::new());
        set_player(&mut app, 7.0, PlaybackState::Paused);
        app.handle_tick(generation(&app), Instant::now(), &mut Vec::new());

        let session = app.session.as_ref().expect("session");
        assert_eq!(session.sync.last_highlighted_cue_id(), Some(3));
        assert_eq!(session.sync.phase(), &ScrollPhase::Idle);
    }

    #[test]
    fn stale_ticks_are_ignored() {
        let mut app = build_session_app("playback-stale");
        set_player(&mut app, 4.5, PlaybackState::Playing);
        let stale = generation(&app) - 1;
        let mut effects = Vec::new();
        app.handle_tick(stale, Instant::now(), &mut effects);

        let session = app.session.as_ref().expect("session");
        assert_eq!(session.sync.last_highlighted_cue_id(), None);
        assert!(effects.is_empty());
    }

    #[test]
    fn user_scroll_suppresses_autoscroll_until_idle() {
        let mut app = build_session_app("playback-idle");
        set_player(&mut app, 4.5, PlaybackState::Playing);
        app.handle_pane_scrolled(PaneRole::Source, 0.0, 400.0, 60.0, 0.0, &mut Vec::new());

        let soon = Instant::now() + Duration::from_millis(100);
        app.handle_tick(generation(&app), soon, &mut Vec::new());
        let session = app.session.as_ref().expect("session");
        assert!(session.sync.is_user_scrolling());
        assert_eq!(session.sync.phase(), &ScrollPhase::Idle);

        let later = Instant::now() + Duration::from_secs(5);
        app.handle_tick(generation(&app), later, &mut Vec::new());
        let session = app.session.as_ref().expect("session");
        assert!(!session.sync.is_user_scrolling());
        assert!(matches!(session.sync.phase(), ScrollPhase::Recentering { .. }));
    }

    #[test]
    fn pausing_saves_resume_data() {
        let mut app = build_session_app("playback-pause");
        set_player(&mut app, 1.0, PlaybackState::Playing);
        let mut effects = Vec::new();
        app.handle_toggle_play_pause(&mut effects);
        assert!(matches!(effects.as_slice(), [Effect::SaveResume]));
        let state = app
            .session
            .as_ref()
            .and_then(|s| s.player.as_ref())
            .map(|p| p.playback_state());
        assert_eq!(state, Some(PlaybackState::Paused));
    }

    #[test]
    fn clicking_a_line_seeks_plays_and_highlights() {
        let mut app = build_session_app("playback-click");
        let mut effects = Vec::new();
        app.handle_line_clicked(PaneRole::Target, 3, &mut effects);

        let session = app.session.as_ref().expect("session");
        let player = session.player.as_ref().expect("player");
        assert_eq!(player.current_time(), 8.0);
        assert_eq!(player.playback_state(), PlaybackState::Playing);
        assert_eq!(session.sync.last_highlighted_cue_id(), Some(4));
        assert_eq!(session.panes.source.active_line(), Some(3));
        assert!(matches!(session.sync.phase(), ScrollPhase::Recentering { .. }));
    }

    #[test]
    fn stepping_walks_the_aligned_cues() {
        let mut app = build_session_app("playback-step");
        app.handle_step_cue(true, &mut Vec::new());
        assert_eq!(
            app.session.as_ref().and_then(|s| s.sync.last_highlighted_cue_id()),
            Some(1)
        );
        app.handle_step_cue(true, &mut Vec::new());
        app.handle_step_cue(true, &mut Vec::new());
        app.handle_step_cue(true, &mut Vec::new());
        app.handle_step_cue(true, &mut Vec::new());
        assert_eq!(
            app.session.as_ref().and_then(|s| s.sync.last_highlighted_cue_id()),
            Some(4)
        );
        app.handle_step_cue(false, &mut Vec::new());
        assert_eq!(
            app.session.as_ref().and_then(|s| s.sync.last_highlighted_cue_id()),
            Some(3)
        );
    }

    #[test]
    fn phonetic_toggle_opens_one_line_at_a_time() {
        let mut app = build_session_app("playback-phonetic");
        app.handle_toggle_phonetic(1);
        app.handle_toggle_phonetic(2);
        assert_eq!(app.session.as_ref().and_then(|s| s.phonetic_open), Some(2));
        app.handle_toggle_phonetic(2);
        assert_eq!(app.session.as_ref().and_then(|s| s.phonetic_open), None);
        app.handle_toggle_phonetic(1);
        app.handle_hide_phonetic();
        assert_eq!(app.session.as_ref().and_then(|s| s.phonetic_open), None);
        app.handle_toggle_phonetic(99);
        assert_eq!(app.session.as_ref().and_then(|s| s.phonetic_open), None);
    }

    #[test]
    fn export_result_is_reported_in_status() {
        let mut app = build_session_app("playback-export");
        let mut effects = Vec::new();
        app.handle_export_flashcards(&mut effects);
        assert!(matches!(effects.as_slice(), [Effect::ExportFlashcards]));

        app.handle_flashcards_exported(None, Some("disk full".to_string()));
        assert!(app.status.as_deref().is_some_and(|s| s.contains("disk full")));
    }
}
