use super::super::state::{App, ViewerSession};
use super::Effect;
use crate::sync::ScrollCommand;
use crate::transcript::PaneRole;
use std::time::Instant;
use tracing::{debug, trace};

/// Reported offsets within this distance of the recorded one are not a scroll.
const SAME_OFFSET_PX: f32 = 1.0;

impl App {
    pub(super) fn handle_pane_scrolled(
        &mut self,
        pane: PaneRole,
        offset_y: f32,
        viewport_width: f32,
        viewport_height: f32,
        content_height: f32,
        effects: &mut Vec<Effect>,
    ) {
        let coordinator = self.coordinator;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !offset_y.is_finite() {
            return;
        }

        let metrics = session.metrics.get_mut(pane);
        let width_changed = (metrics.viewport_width - viewport_width).abs() >= 1.0;
        // Viewport and content size changes also arrive as scroll events.
        let offset_moved = (metrics.offset_y - offset_y).abs() > SAME_OFFSET_PX;
        metrics.offset_y = offset_y;
        metrics.viewport_width = viewport_width;
        metrics.viewport_height = viewport_height;
        metrics.content_height = (content_height > 0.0).then_some(content_height);
        trace!(%pane, offset_y, viewport_height, content_height, "Pane scrolled");

        if width_changed {
            self.relayout_session();
        }
        if !offset_moved {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.panes.get(pane).is_empty() || session.panes.get(pane.other()).is_empty() {
            debug!(%pane, "Mirroring skipped: pane has no rendered lines");
            return;
        }
        if let Some(command) =
            coordinator.on_pane_scrolled(&mut session.sync, pane, offset_y, Instant::now())
        {
            Self::push_scroll(session, vec![command], effects);
        }
    }

    pub(super) fn handle_manual_recenter(&mut self, effects: &mut Vec<Effect>) {
        self.recenter_session(true, Instant::now(), effects);
    }

    /// Move both panes so the active cue is centered. A manual recenter also
    /// cancels the pending inactivity timer.
    pub(super) fn recenter_session(&mut self, manual: bool, now: Instant, effects: &mut Vec<Effect>) {
        let coordinator = self.coordinator;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.recenter_enabled {
            debug!("Recenter unavailable: no cues loaded");
            return;
        }
        let from = session.current_offsets();
        let to = session.recenter_targets();
        let commands = if manual {
            coordinator.manual_recenter(&mut session.sync, from, to, now)
        } else {
            coordinator.recenter(&mut session.sync, from, to, now)
        };
        Self::push_scroll(session, commands, effects);
    }

    /// Queue scroll writes and record them as the panes' new offsets.
    pub(super) fn push_scroll(
        session: &mut ViewerSession,
        commands: Vec<ScrollCommand>,
        effects: &mut Vec<Effect>,
    ) {
        if commands.is_empty() {
            return;
        }
        for command in &commands {
            session.metrics.get_mut(command.pane).offset_y = command.offset_y;
        }
        effects.push(Effect::Scroll(commands));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::test_support::build_session_app;
    use crate::sync::ScrollPhase;

    fn scrolled(effects: &[Effect]) -> Vec<ScrollCommand> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::Scroll(commands) => Some(commands.clone()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    #[test]
    fn user_scroll_on_source_is_mirrored_to_target() {
        let mut app = build_session_app("scroll-mirror");
        let mut effects = Vec::new();
        app.handle_pane_scrolled(PaneRole::Source, 30.0, 400.0, 60.0, 200.0, &mut effects);

        assert_eq!(
            scrolled(&effects),
            vec![ScrollCommand {
                pane: PaneRole::Target,
                offset_y: 30.0
            }]
        );
        let session = app.session.as_ref().expect("session");
        assert_eq!(session.metrics.target.offset_y, 30.0);
        assert!(session.sync.is_user_scrolling());

        // The write comes back as the target's own scroll event.
        let mut echo = Vec::new();
        app.handle_pane_scrolled(PaneRole::Target, 30.0, 400.0, 60.0, 200.0, &mut echo);
        assert!(echo.is_empty());
    }

    #[test]
    fn resize_without_offset_change_is_not_a_user_scroll() {
        let mut app = build_session_app("scroll-resize");
        let mut effects = Vec::new();
        app.handle_pane_scrolled(PaneRole::Source, 0.0, 300.0, 60.0, 250.0, &mut effects);

        assert!(scrolled(&effects).is_empty());
        let session = app.session.as_ref().expect("session");
        assert!(!session.sync.is_user_scrolling());
        assert_eq!(session.sync.phase(), &ScrollPhase::Idle);
        assert_eq!(session.metrics.source.viewport_width, 300.0);
        assert_eq!(session.metrics.source.content_height, Some(250.0));
    }

    #[test]
    fn empty_panes_make_mirroring_a_no_op() {
        let mut app = build_session_app("scroll-empty");
        if let Some(session) = app.session.as_mut() {
            session.panes.target.lines.clear();
        }
        let mut effects = Vec::new();
        app.handle_pane_scrolled(PaneRole::Source, 30.0, 400.0, 60.0, 200.0, &mut effects);
        assert!(effects.is_empty());
        let session = app.session.as_ref().expect("session");
        assert_eq!(session.metrics.source.offset_y, 30.0);
        assert!(!session.sync.is_user_scrolling());
    }

    #[test]
    fn manual_recenter_clears_user_scrolling() {
        let mut app = build_session_app("scroll-manual");
        let now = Instant::now();
        if let Some(session) = app.session.as_mut() {
            app.tracker.apply(4, &mut session.panes, now);
            session.sync.user_idle_deadline = Some(now + std::time::Duration::from_secs(4));
        }
        let mut effects = Vec::new();
        app.recenter_session(true, now, &mut effects);

        let session = app.session.as_ref().expect("session");
        assert!(!session.sync.is_user_scrolling());
        assert!(matches!(session.sync.phase(), ScrollPhase::Recentering { .. }));
    }

    #[test]
    fn recenter_is_ignored_without_cues() {
        let mut app = build_session_app("scroll-disabled");
        if let Some(session) = app.session.as_mut() {
            session.recenter_enabled = false;
        }
        let mut effects = Vec::new();
        app.handle_manual_recenter(&mut effects);
        assert!(effects.is_empty());
    }
}
