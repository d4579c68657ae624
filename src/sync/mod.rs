//! Time synchronization and dual-pane scroll coordination.
//!
//! Everything in here is independent of the GUI toolkit: time arrives as
//! explicit `Instant`s and scroll writes leave as `ScrollCommand`s, so the
//! reducer in `app::update` decides how to apply them.

mod clock;
mod highlight;
mod scroll;
mod state;

pub use clock::{ClockPlayer, PlaybackClock, PlaybackSample, PlaybackState, PlaybackWidget};
pub use highlight::{HighlightTracker, TickOutcome, active_index};
pub use scroll::{PollOutcome, ScrollCommand, SyncScrollCoordinator, center_offset};
pub use state::{PanePair, ScrollPhase, SyncState};

use std::time::Duration;

/// Fixed delays of the sync engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncTimings {
    /// How long a programmatic recenter holds the auto-scrolling phase.
    pub recenter_settle: Duration,
    /// Length of the eased scroll toward the recenter target.
    pub recenter_animation: Duration,
    /// How long a mirrored write suppresses the other pane's handler.
    pub mirror_guard: Duration,
    /// Quiet period after user scrolling before autoscroll resumes.
    pub user_idle: Duration,
    /// Fade-out time of a line losing its highlight.
    pub highlight_exit: Duration,
}

impl Default for SyncTimings {
    fn default() -> Self {
        Self {
            recenter_settle: Duration::from_millis(600),
            recenter_animation: Duration::from_millis(250),
            mirror_guard: Duration::from_millis(50),
            user_idle: Duration::from_millis(4000),
            highlight_exit: Duration::from_millis(300),
        }
    }
}
