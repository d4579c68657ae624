use super::scroll::ScrollAnimation;
use crate::transcript::PaneRole;
use std::time::Instant;

/// One value per transcript pane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanePair<T> {
    pub source: T,
    pub target: T,
}

impl<T> PanePair<T> {
    pub fn new(source: T, target: T) -> Self {
        Self { source, target }
    }

    pub fn get(&self, pane: PaneRole) -> &T {
        match pane {
            PaneRole::Source => &self.source,
            PaneRole::Target => &self.target,
        }
    }

    pub fn get_mut(&mut self, pane: PaneRole) -> &mut T {
        match pane {
            PaneRole::Source => &mut self.source,
            PaneRole::Target => &mut self.target,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(PaneRole, &T) -> U) -> PanePair<U> {
        PanePair {
            source: f(PaneRole::Source, &self.source),
            target: f(PaneRole::Target, &self.target),
        }
    }
}

/// Who is currently moving the panes.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrollPhase {
    Idle,
    /// A user scroll on `source` was copied onto the other pane; scroll events
    /// are ignored until `until`.
    Mirroring { source: PaneRole, until: Instant },
    /// Both panes are being moved to center the active cue.
    Recentering {
        animation: ScrollAnimation,
        until: Instant,
    },
}

/// Per-session synchronization record, reset on every video or language load.
#[derive(Debug, Clone)]
pub struct SyncState {
    pub(crate) phase: ScrollPhase,
    /// Pending "user stopped scrolling" deadline; `Some` while user-scrolling.
    pub(crate) user_idle_deadline: Option<Instant>,
    /// Offset we just wrote to a pane, whose scroll event must not be mirrored.
    pub(crate) expected_echo: Option<(PaneRole, f32)>,
    pub(crate) last_highlighted_cue_id: Option<u32>,
}

impl Default for SyncState {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncState {
    pub fn new() -> Self {
        Self {
            phase: ScrollPhase::Idle,
            user_idle_deadline: None,
            expected_echo: None,
            last_highlighted_cue_id: None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn is_auto_scrolling(&self) -> bool {
        !matches!(self.phase, ScrollPhase::Idle)
    }

    pub fn is_user_scrolling(&self) -> bool {
        self.user_idle_deadline.is_some()
    }

    /// Autoscroll may only move the panes when nobody else is.
    pub fn allows_autoscroll(&self) -> bool {
        !self.is_auto_scrolling() && !self.is_user_scrolling()
    }

    pub fn last_highlighted_cue_id(&self) -> Option<u32> {
        self.last_highlighted_cue_id
    }

    pub fn phase(&self) -> &ScrollPhase {
        &self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn fresh_state_allows_autoscroll() {
        let state = SyncState::new();
        assert!(state.allows_autoscroll());
        assert_eq!(state.last_highlighted_cue_id(), None);
    }

    #[test]
    fn reset_clears_everything() {
        let now = Instant::now();
        let mut state = SyncState::new();
        state.phase = ScrollPhase::Mirroring {
            source: PaneRole::Source,
            until: now + Duration::from_millis(50),
        };
        state.user_idle_deadline = Some(now);
        state.last_highlighted_cue_id = Some(4);
        assert!(!state.allows_autoscroll());
        state.reset();
        assert!(state.allows_autoscroll());
        assert_eq!(state.last_highlighted_cue_id(), None);
    }

    #[test]
    fn pane_pair_indexes_by_role() {
        let mut pair = PanePair::new(1, 2);
        *pair.get_mut(PaneRole::Target) += 10;
        assert_eq!(*pair.get(PaneRole::Source), 1);
        assert_eq!(*pair.get(PaneRole::Target), 12);
        assert_eq!(pair.map(|_, v| v * 2), PanePair::new(2, 24));
    }
}
