//! Playback time source.
//!
//! The viewer only needs three things from a player: seek, play/pause, and a
//! way to read the current time and state. `PlaybackWidget` is that surface;
//! `ClockPlayer` implements it with a wall clock so transcripts can be played
//! back without an embedded video surface.

use std::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Unstarted,
    Playing,
    Paused,
    Ended,
    Buffering,
}

impl PlaybackState {
    pub fn is_playing(self) -> bool {
        self == PlaybackState::Playing
    }
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PlaybackState::Unstarted => "Unstarted",
            PlaybackState::Playing => "Playing",
            PlaybackState::Paused => "Paused",
            PlaybackState::Ended => "Ended",
            PlaybackState::Buffering => "Buffering",
        };
        write!(f, "{}", label)
    }
}

/// Capabilities the sync engine needs from a video player.
pub trait PlaybackWidget: Send {
    fn seek_to(&mut self, seconds: f64);
    fn play(&mut self);
    fn pause(&mut self);
    /// Release the player. Further calls are no-ops.
    fn destroy(&mut self);
    fn current_time(&self) -> f64;
    fn playback_state(&self) -> PlaybackState;
}

/// A player that advances with wall-clock time.
#[derive(Debug, Clone)]
pub struct ClockPlayer {
    duration: f64,
    /// Position at `started_at`, or the frozen position when not playing.
    position: f64,
    started_at: Option<Instant>,
    state: PlaybackState,
    destroyed: bool,
}

impl ClockPlayer {
    /// `duration` is usually the end of the last cue.
    pub fn new(duration_seconds: f64) -> Self {
        Self {
            duration: if duration_seconds.is_finite() {
                duration_seconds.max(0.0)
            } else {
                0.0
            },
            position: 0.0,
            started_at: None,
            state: PlaybackState::Unstarted,
            destroyed: false,
        }
    }

    pub fn current_time_at(&self, now: Instant) -> f64 {
        let elapsed = match (self.state, self.started_at) {
            (PlaybackState::Playing, Some(started)) => {
                now.saturating_duration_since(started).as_secs_f64()
            }
            _ => 0.0,
        };
        (self.position + elapsed).min(self.duration)
    }

    pub fn playback_state_at(&self, now: Instant) -> PlaybackState {
        if self.state == PlaybackState::Playing && self.current_time_at(now) >= self.duration {
            PlaybackState::Ended
        } else {
            self.state
        }
    }

    pub fn play_at(&mut self, now: Instant) {
        if self.destroyed || self.state == PlaybackState::Playing {
            return;
        }
        if self.state == PlaybackState::Ended || self.position >= self.duration {
            self.position = 0.0;
        }
        self.started_at = Some(now);
        self.state = PlaybackState::Playing;
        debug!(position = self.position, "Clock player started");
    }

    pub fn pause_at(&mut self, now: Instant) {
        if self.destroyed || self.state != PlaybackState::Playing {
            return;
        }
        let ended = self.playback_state_at(now) == PlaybackState::Ended;
        self.position = self.current_time_at(now);
        self.started_at = None;
        self.state = if ended {
            PlaybackState::Ended
        } else {
            PlaybackState::Paused
        };
        debug!(position = self.position, "Clock player paused");
    }

    pub fn seek_to_at(&mut self, seconds: f64, now: Instant) {
        if self.destroyed {
            return;
        }
        let target = if seconds.is_finite() {
            seconds.clamp(0.0, self.duration)
        } else {
            0.0
        };
        self.position = target;
        if self.state == PlaybackState::Playing {
            self.started_at = Some(now);
        } else if self.state == PlaybackState::Ended {
            self.state = PlaybackState::Paused;
        }
        debug!(seconds = target, "Clock player seek");
    }
}

impl PlaybackWidget for ClockPlayer {
    fn seek_to(&mut self, seconds: f64) {
        self.seek_to_at(seconds, Instant::now());
    }

    fn play(&mut self) {
        self.play_at(Instant::now());
    }

    fn pause(&mut self) {
        self.pause_at(Instant::now());
    }

    fn destroy(&mut self) {
        self.started_at = None;
        self.state = PlaybackState::Unstarted;
        self.destroyed = true;
    }

    fn current_time(&self) -> f64 {
        if self.destroyed {
            return 0.0;
        }
        self.current_time_at(Instant::now())
    }

    fn playback_state(&self) -> PlaybackState {
        if self.destroyed {
            return PlaybackState::Unstarted;
        }
        self.playback_state_at(Instant::now())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSample {
    pub seconds: f64,
    pub state: PlaybackState,
}

/// Owns the tick generation. Every new session advances it so that ticks
/// scheduled for a previous video are recognized and dropped.
#[derive(Debug, Default)]
pub struct PlaybackClock {
    generation: u64,
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Read the player. A missing player reads as time zero, unstarted.
    pub fn sample(&self, widget: Option<&dyn PlaybackWidget>) -> PlaybackSample {
        match widget {
            Some(widget) => {
                let seconds = widget.current_time();
                PlaybackSample {
                    seconds: if seconds.is_finite() { seconds } else { 0.0 },
                    state: widget.playback_state(),
                }
            }
            None => PlaybackSample {
                seconds: 0.0,
                state: PlaybackState::Unstarted,
            },
        }
    }
}
