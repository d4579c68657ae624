use super::SyncTimings;
use super::clock::PlaybackState;
use super::state::{PanePair, SyncState};
use crate::transcript::{AlignedSubtitle, LineHighlight, TranscriptPane};
use std::time::{Duration, Instant};
use tracing::trace;

/// Result of one highlight pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// No cues loaded; recentering is unavailable.
    Disabled,
    Active {
        cue_id: u32,
        /// Position of the active cue in the aligned list.
        index: usize,
        /// `false` when the cue was chosen by the carry-over fallback.
        matched: bool,
        /// The active cue differs from the previous tick's.
        changed: bool,
        /// Both panes should be recentered on the active cue.
        recenter: bool,
    },
}

impl TickOutcome {
    pub fn cue_id(self) -> Option<u32> {
        match self {
            TickOutcome::Disabled => None,
            TickOutcome::Active { cue_id, .. } => Some(cue_id),
        }
    }
}

/// Index of the cue to highlight at `now_seconds`: the first cue whose
/// half-open interval contains it, else the cue carrying `last_id`, else the
/// first cue. `None` only for an empty list.
pub fn active_index(now_seconds: f64, cues: &[AlignedSubtitle], last_id: Option<u32>) -> Option<usize> {
    if cues.is_empty() {
        return None;
    }
    cues.iter()
        .position(|cue| cue.contains(now_seconds))
        .or_else(|| last_id.and_then(|id| cues.iter().position(|cue| cue.id == id)))
        .or(Some(0))
}

/// Maps playback time to the active cue and keeps line highlights current.
#[derive(Debug, Clone, Copy)]
pub struct HighlightTracker {
    exit_delay: Duration,
}

impl Default for HighlightTracker {
    fn default() -> Self {
        Self::new(SyncTimings::default())
    }
}

impl HighlightTracker {
    pub fn new(timings: SyncTimings) -> Self {
        Self {
            exit_delay: timings.highlight_exit,
        }
    }

    pub fn tick(
        &self,
        now_seconds: f64,
        cues: &[AlignedSubtitle],
        panes: &mut PanePair<TranscriptPane>,
        state: &mut SyncState,
        playback: PlaybackState,
        now: Instant,
    ) -> TickOutcome {
        self.expire_exits(panes, now);
        let previous = state.last_highlighted_cue_id;
        let Some(index) = active_index(now_seconds, cues, previous) else {
            return TickOutcome::Disabled;
        };
        let cue = &cues[index];
        let matched = cue.contains(now_seconds);

        self.apply(cue.id, panes, now);
        state.last_highlighted_cue_id = Some(cue.id);

        let changed = previous != Some(cue.id);
        if changed {
            trace!(cue_id = cue.id, index, matched, now_seconds, "Active cue changed");
        }

        TickOutcome::Active {
            cue_id: cue.id,
            index,
            matched,
            changed,
            recenter: playback.is_playing() && state.allows_autoscroll(),
        }
    }

    /// Mark `cue_id` active in both panes; any other highlighted line starts
    /// its exit fade. Re-applying the same cue is a no-op.
    pub fn apply(&self, cue_id: u32, panes: &mut PanePair<TranscriptPane>, now: Instant) {
        for pane in [&mut panes.source, &mut panes.target] {
            let active = pane.line_for_cue(cue_id);
            for (idx, line) in pane.lines.iter_mut().enumerate() {
                if Some(idx) == active {
                    line.highlight = LineHighlight::Active;
                } else if line.highlight == LineHighlight::Active {
                    line.highlight = LineHighlight::Exiting {
                        until: now + self.exit_delay,
                    };
                }
            }
        }
    }

    /// Clear exit fades whose delay has passed.
    pub fn expire_exits(&self, panes: &mut PanePair<TranscriptPane>, now: Instant) {
        for pane in [&mut panes.source, &mut panes.target] {
            for line in &mut pane.lines {
                if let LineHighlight::Exiting { until } = line.highlight {
                    if now >= until {
                        line.highlight = LineHighlight::None;
                    }
                }
            }
        }
    }
}
