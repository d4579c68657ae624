use super::SyncTimings;
use super::state::{PanePair, ScrollPhase, SyncState};
use crate::transcript::PaneRole;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};

/// Offsets closer than this are considered the same scroll position.
const SAME_OFFSET_PX: f32 = 1.0;

/// A scroll write the host must apply to a pane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCommand {
    pub pane: PaneRole,
    pub offset_y: f32,
}

#[derive(Debug, Default, PartialEq)]
pub struct PollOutcome {
    pub commands: Vec<ScrollCommand>,
    /// The user-inactivity deadline fired while playing.
    pub recenter_due: bool,
}

/// Eased movement of both panes toward their recenter targets.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollAnimation {
    from: PanePair<f32>,
    to: PanePair<Option<f32>>,
    started_at: Instant,
    duration: Duration,
    completed: bool,
}

impl ScrollAnimation {
    fn new(from: PanePair<f32>, to: PanePair<Option<f32>>, started_at: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            started_at,
            duration,
            completed: false,
        }
    }

    /// Offsets for `now`; `None` once the final frame has been emitted.
    fn frame(&mut self, now: Instant) -> Option<Vec<ScrollCommand>> {
        if self.completed {
            return None;
        }
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (now.saturating_duration_since(self.started_at).as_secs_f32()
                / self.duration.as_secs_f32())
            .clamp(0.0, 1.0)
        };
        if progress >= 1.0 {
            self.completed = true;
        }
        let eased = ease_in_out(progress);
        let commands = [PaneRole::Source, PaneRole::Target]
            .into_iter()
            .filter_map(|pane| {
                let to = (*self.to.get(pane))?;
                let from = *self.from.get(pane);
                Some(ScrollCommand {
                    pane,
                    offset_y: from + (to - from) * eased,
                })
            })
            .collect();
        Some(commands)
    }
}

fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Scroll offset that vertically centers a line of `line_height` at
/// `line_top` (content space) in a viewport, clamped to the scrollable range.
pub fn center_offset(line_top: f32, line_height: f32, viewport_height: f32, content_height: f32) -> f32 {
    let target = line_top - (viewport_height - line_height) / 2.0;
    let max = (content_height - viewport_height).max(0.0);
    if target.is_finite() { target.clamp(0.0, max) } else { 0.0 }
}

/// Mirrors user scrolling between the panes and schedules recentering.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncScrollCoordinator {
    timings: SyncTimings,
}

impl SyncScrollCoordinator {
    pub fn new(timings: SyncTimings) -> Self {
        Self { timings }
    }

    /// A pane reported a new scroll offset. Returns the mirrored write for the
    /// other pane when the event came from the user.
    pub fn on_pane_scrolled(
        &self,
        state: &mut SyncState,
        pane: PaneRole,
        offset_y: f32,
        now: Instant,
    ) -> Option<ScrollCommand> {
        if let Some((echo_pane, echo_offset)) = state.expected_echo {
            if echo_pane == pane && (echo_offset - offset_y).abs() <= SAME_OFFSET_PX {
                state.expected_echo = None;
                trace!(%pane, offset_y, "Absorbed mirrored scroll echo");
                return None;
            }
        }
        if state.is_auto_scrolling() {
            trace!(%pane, offset_y, "Ignoring scroll while auto-scrolling");
            return None;
        }

        let other = pane.other();
        state.phase = ScrollPhase::Mirroring {
            source: pane,
            until: now + self.timings.mirror_guard,
        };
        state.user_idle_deadline = Some(now + self.timings.user_idle);
        state.expected_echo = Some((other, offset_y));
        debug!(%pane, offset_y, "User scroll; mirroring onto {other} pane");
        Some(ScrollCommand {
            pane: other,
            offset_y,
        })
    }

    /// Start moving both panes toward `to`. Panes with no target (nothing
    /// rendered) are left alone; if neither has one this is a no-op.
    pub fn recenter(
        &self,
        state: &mut SyncState,
        from: PanePair<f32>,
        to: PanePair<Option<f32>>,
        now: Instant,
    ) -> Vec<ScrollCommand> {
        if to.source.is_none() && to.target.is_none() {
            debug!("Recenter skipped: no highlighted line in either pane");
            return Vec::new();
        }
        let already_there = [PaneRole::Source, PaneRole::Target].into_iter().all(|pane| {
            to.get(pane)
                .is_none_or(|target| (target - from.get(pane)).abs() <= SAME_OFFSET_PX)
        });
        if already_there {
            return Vec::new();
        }

        let mut animation = ScrollAnimation::new(from, to, now, self.timings.recenter_animation);
        let first = animation.frame(now).unwrap_or_default();
        state.phase = ScrollPhase::Recentering {
            animation,
            until: now + self.timings.recenter_settle,
        };
        debug!(source = ?to.source, target = ?to.target, "Recentering panes");
        first
            .into_iter()
            .filter(|cmd| (cmd.offset_y - from.get(cmd.pane)).abs() > SAME_OFFSET_PX)
            .collect()
    }

    /// User asked for a recenter: stop waiting for inactivity and recenter now,
    /// whatever the playback state.
    pub fn manual_recenter(
        &self,
        state: &mut SyncState,
        from: PanePair<f32>,
        to: PanePair<Option<f32>>,
        now: Instant,
    ) -> Vec<ScrollCommand> {
        if state.user_idle_deadline.take().is_some() {
            info!("Manual recenter cancelled pending inactivity timer");
        }
        self.recenter(state, from, to, now)
    }

    /// Advance timers and animations. Called on every clock tick.
    pub fn poll(&self, state: &mut SyncState, now: Instant, playing: bool) -> PollOutcome {
        let mut outcome = PollOutcome::default();

        let finished = match &mut state.phase {
            ScrollPhase::Idle => false,
            ScrollPhase::Mirroring { until, .. } => now >= *until,
            ScrollPhase::Recentering { animation, until } => {
                if let Some(commands) = animation.frame(now) {
                    outcome.commands = commands;
                }
                now >= *until
            }
        };
        if finished {
            if matches!(state.phase, ScrollPhase::Mirroring { .. })
                && state.expected_echo.take().is_some()
            {
                trace!("Mirror guard ended before its echo arrived");
            }
            state.phase = ScrollPhase::Idle;
        }

        if let Some(deadline) = state.user_idle_deadline {
            if now >= deadline {
                state.user_idle_deadline = None;
                if playing {
                    info!("Scroll inactivity elapsed while playing; recentering");
                    outcome.recenter_due = true;
                } else {
                    debug!("Scroll inactivity elapsed while not playing");
                }
            }
        }

        outcome
    }
}
