use super::super::messages::Component;
use super::super::state::{
    App, MAX_FONT_SIZE, MAX_LINE_SPACING, MIN_FONT_SIZE, MIN_LINE_SPACING, apply_component,
};
use super::Effect;
use std::time::Instant;
use tracing::{debug, info};

impl App {
    pub(super) fn handle_font_size_changed(&mut self, size: u32, effects: &mut Vec<Effect>) {
        let clamped = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        if clamped != self.config.font_size {
            debug!(
                old = self.config.font_size,
                new = clamped,
                "Font size changed"
            );
            self.config.font_size = clamped;
            self.recenter_after_layout_change(effects);
            effects.push(Effect::SaveConfig);
        }
    }

    pub(super) fn handle_line_spacing_changed(&mut self, spacing: f32, effects: &mut Vec<Effect>) {
        if !spacing.is_finite() {
            return;
        }
        self.config.line_spacing = spacing.clamp(MIN_LINE_SPACING, MAX_LINE_SPACING);
        debug!(
            line_spacing = self.config.line_spacing,
            "Line spacing changed"
        );
        self.recenter_after_layout_change(effects);
        effects.push(Effect::SaveConfig);
    }

    pub(super) fn handle_toggle_theme(&mut self, effects: &mut Vec<Effect>) {
        let next = match self.config.theme {
            crate::config::ThemeMode::Night => crate::config::ThemeMode::Day,
            crate::config::ThemeMode::Day => crate::config::ThemeMode::Night,
        };
        info!(
            night_mode = matches!(next, crate::config::ThemeMode::Night),
            "Toggled theme"
        );
        self.config.theme = next;
        effects.push(Effect::SaveConfig);
    }

    pub(super) fn handle_toggle_settings(&mut self) {
        self.show_settings = !self.show_settings;
        debug!(open = self.show_settings, "Toggled settings panel");
    }

    pub(super) fn handle_day_highlight_changed(
        &mut self,
        component: Component,
        value: f32,
        effects: &mut Vec<Effect>,
    ) {
        self.config.day_highlight = apply_component(self.config.day_highlight, component, value);
        debug!(?component, value, "Day highlight updated");
        effects.push(Effect::SaveConfig);
    }

    pub(super) fn handle_night_highlight_changed(
        &mut self,
        component: Component,
        value: f32,
        effects: &mut Vec<Effect>,
    ) {
        self.config.night_highlight =
            apply_component(self.config.night_highlight, component, value);
        debug!(?component, value, "Night highlight updated");
        effects.push(Effect::SaveConfig);
    }

    pub(super) fn handle_window_resized(
        &mut self,
        width: f32,
        height: f32,
        effects: &mut Vec<Effect>,
    ) {
        if !width.is_finite() || !height.is_finite() {
            return;
        }
        let width = width.clamp(320.0, 7680.0);
        let height = height.clamp(240.0, 4320.0);

        let changed = (self.config.window_width - width).abs() >= 1.0
            || (self.config.window_height - height).abs() >= 1.0;
        if changed {
            self.config.window_width = width;
            self.config.window_height = height;
            debug!(width, height, "Window size changed");
            self.recenter_after_layout_change(effects);
            effects.push(Effect::SaveConfig);
        }
    }

    /// Line boxes moved; re-estimate them and, unless the user is browsing,
    /// bring the active cue back to the middle.
    fn recenter_after_layout_change(&mut self, effects: &mut Vec<Effect>) {
        self.relayout_session();
        let browsing = self
            .session
            .as_ref()
            .is_none_or(|session| session.sync.is_user_scrolling());
        if !browsing {
            self.recenter_session(false, Instant::now(), effects);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::test_support::{build_session_app, build_test_app};
    use crate::sync::ScrollPhase;

    #[test]
    fn font_size_change_relayouts_and_recenters_active_cue() {
        let mut app = build_session_app("appearance-font");
        let now = Instant::now();
        if let Some(session) = app.session.as_mut() {
            app.tracker.apply(4, &mut session.panes, now);
        }
        let before = app
            .session
            .as_ref()
            .map(|s| s.layouts.source.content_height())
            .unwrap_or_default();

        let mut effects = Vec::new();
        app.handle_font_size_changed(app.config.font_size + 8, &mut effects);

        let session = app.session.as_ref().expect("session");
        assert!(session.layouts.source.content_height() > before);
        assert!(matches!(
            session.sync.phase(),
            ScrollPhase::Recentering { .. }
        ));
        assert!(
            effects
                .iter()
                .any(|effect| matches!(effect, Effect::SaveConfig))
        );
    }

    #[test]
    fn font_size_is_clamped_and_unchanged_size_is_ignored() {
        let mut app = build_test_app("appearance-clamp");
        let mut effects = Vec::new();
        app.handle_font_size_changed(1000, &mut effects);
        assert_eq!(app.config.font_size, MAX_FONT_SIZE);
        assert_eq!(effects.len(), 1);

        let mut again = Vec::new();
        app.handle_font_size_changed(MAX_FONT_SIZE, &mut again);
        assert!(again.is_empty());
    }

    #[test]
    fn layout_change_leaves_browsing_user_alone() {
        let mut app = build_session_app("appearance-browsing");
        let now = Instant::now();
        if let Some(session) = app.session.as_mut() {
            app.tracker.apply(4, &mut session.panes, now);
            session.sync.user_idle_deadline = Some(now + std::time::Duration::from_secs(4));
        }
        let mut effects = Vec::new();
        app.handle_line_spacing_changed(2.0, &mut effects);
        let session = app.session.as_ref().expect("session");
        assert_eq!(session.sync.phase(), &ScrollPhase::Idle);
        assert!(matches!(effects.as_slice(), [Effect::SaveConfig]));
    }

    #[test]
    fn theme_toggle_persists_config() {
        let mut app = build_test_app("appearance-theme");
        let initial = app.config.theme;
        let mut effects = Vec::new();
        app.handle_toggle_theme(&mut effects);
        assert_ne!(app.config.theme, initial);
        assert!(matches!(effects.as_slice(), [Effect::SaveConfig]));
        app.handle_toggle_theme(&mut effects);
        assert_eq!(app.config.theme, initial);
    }
}
