use crate::cache::ResumeEntry;
use crate::catalog::VideoEntry;
use crate::sync::{PanePair, PlaybackState, PlaybackWidget, SyncState, center_offset};
use crate::transcript::{
    AlignedSubtitle, Cue, PaneLayout, PaneRole, TranscriptPane, align_subtitles, render_pane,
};
use std::collections::HashMap;
use tracing::{debug, info};

/// Scroll geometry of one pane as last reported by its widget.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PaneMetrics {
    pub(in crate::app) offset_y: f32,
    pub(in crate::app) viewport_width: f32,
    pub(in crate::app) viewport_height: f32,
    pub(in crate::app) content_height: Option<f32>,
}

/// Everything tied to the currently open video. Dropped wholesale when
/// another video is selected.
pub struct ViewerSession {
    pub(in crate::app) generation: u64,
    pub(in crate::app) video: VideoEntry,
    pub(in crate::app) language: String,
    pub(in crate::app) loading: bool,
    pub(in crate::app) error: Option<String>,
    pub(in crate::app) player: Option<Box<dyn PlaybackWidget>>,
    pub(in crate::app) source_cues: Vec<Cue>,
    pub(in crate::app) phonetic_cues: Vec<Cue>,
    pub(in crate::app) target_cues: HashMap<String, Vec<Cue>>,
    pub(in crate::app) aligned: Vec<AlignedSubtitle>,
    pub(in crate::app) panes: PanePair<TranscriptPane>,
    pub(in crate::app) layouts: PanePair<PaneLayout>,
    pub(in crate::app) metrics: PanePair<PaneMetrics>,
    pub(in crate::app) sync: SyncState,
    pub(in crate::app) phonetic_open: Option<usize>,
    pub(in crate::app) recenter_enabled: bool,
    pub(in crate::app) playhead_seconds: f64,
    pub(in crate::app) playback_state: PlaybackState,
    pub(in crate::app) resume: Option<ResumeEntry>,
}

impl ViewerSession {
    pub(in crate::app) fn new(
        generation: u64,
        video: VideoEntry,
        language: String,
        resume: Option<ResumeEntry>,
    ) -> Self {
        Self {
            generation,
            video,
            language,
            loading: true,
            error: None,
            player: None,
            source_cues: Vec::new(),
            phonetic_cues: Vec::new(),
            target_cues: HashMap::new(),
            aligned: Vec::new(),
            panes: PanePair::new(
                TranscriptPane::empty(PaneRole::Source),
                TranscriptPane::empty(PaneRole::Target),
            ),
            layouts: PanePair::new(
                PaneLayout::estimate(&TranscriptPane::empty(PaneRole::Source), 1.0, 1.0, 0.0),
                PaneLayout::estimate(&TranscriptPane::empty(PaneRole::Target), 1.0, 1.0, 0.0),
            ),
            metrics: PanePair::default(),
            sync: SyncState::new(),
            phonetic_open: None,
            recenter_enabled: false,
            playhead_seconds: 0.0,
            playback_state: PlaybackState::Unstarted,
            resume,
        }
    }

    /// The first caption load has not finished yet.
    pub(in crate::app) fn awaiting_first_load(&self) -> bool {
        self.loading && self.player.is_none()
    }

    /// Replace the aligned list and both panes from the cached cues of the
    /// current language. Highlight and scroll state start over.
    pub(in crate::app) fn rebuild(&mut self, phonetic_placeholder: &str) {
        let target = self
            .target_cues
            .get(&self.language)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        self.aligned = align_subtitles(
            &self.source_cues,
            target,
            &self.phonetic_cues,
            phonetic_placeholder,
        );
        self.panes = PanePair::new(
            render_pane(PaneRole::Source, &self.source_cues),
            render_pane(PaneRole::Target, target),
        );
        self.sync.reset();
        self.phonetic_open = None;
        self.recenter_enabled = !self.aligned.is_empty();
        debug!(
            video = %self.video.id,
            language = %self.language,
            cues = self.aligned.len(),
            "Rebuilt transcript panes"
        );
    }

    pub(in crate::app) fn relayout(&mut self, font_size: f32, line_spacing: f32, fallback_width: f32) {
        let metrics = self.metrics;
        self.layouts = self.panes.map(|role, pane| {
            let reported = metrics.get(role).viewport_width;
            let width = if reported > 0.0 { reported } else { fallback_width };
            PaneLayout::estimate(pane, font_size, line_spacing, width)
        });
    }

    /// End of the last cue; the length of the transcript.
    pub(in crate::app) fn duration(&self) -> f64 {
        self.source_cues
            .iter()
            .map(|cue| cue.end_seconds)
            .fold(0.0, f64::max)
    }

    pub(in crate::app) fn current_offsets(&self) -> PanePair<f32> {
        self.metrics.map(|_, metrics| metrics.offset_y)
    }

    /// Offsets that center the active line of each pane. `None` for a pane
    /// with no active line or no reported viewport yet.
    pub(in crate::app) fn recenter_targets(&self) -> PanePair<Option<f32>> {
        let mut targets = PanePair::new(None, None);
        for role in [PaneRole::Source, PaneRole::Target] {
            let pane = self.panes.get(role);
            let metrics = self.metrics.get(role);
            if pane.is_empty() || metrics.viewport_height <= 0.0 {
                debug!(pane = %role, "Pane not ready for recenter");
                continue;
            }
            let Some(idx) = pane.active_line() else {
                continue;
            };
            let layout = self.layouts.get(role);
            let Some((top, height)) = layout.line_box(idx, metrics.content_height) else {
                continue;
            };
            let content = metrics.content_height.unwrap_or(layout.content_height());
            *targets.get_mut(role) =
                Some(center_offset(top, height, metrics.viewport_height, content));
        }
        targets
    }

    /// Index into `aligned` of the last highlighted cue.
    pub(in crate::app) fn active_index(&self) -> Option<usize> {
        let id = self.sync.last_highlighted_cue_id()?;
        self.aligned.iter().position(|sub| sub.id == id)
    }

    pub(in crate::app) fn resume_entry(&self) -> ResumeEntry {
        ResumeEntry {
            language: self.language.clone(),
            last_cue_id: self.sync.last_highlighted_cue_id(),
            playhead_seconds: self.playhead_seconds,
        }
    }

    pub(in crate::app) fn destroy_player(&mut self) {
        if let Some(mut player) = self.player.take() {
            player.destroy();
            info!(video = %self.video.id, "Destroyed player");
        }
    }
}
