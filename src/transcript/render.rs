//! Transcript panes: the rendered, clickable line list for one language.
//!
//! A pane is rebuilt wholesale whenever a video or language loads. Highlight
//! state lives on the lines themselves and is mutated by the highlight
//! tracker on every tick.

use super::markup::display_text;
use super::srt::Cue;
use std::time::Instant;

/// Vertical padding inside a line container, in logical pixels.
pub(crate) const LINE_PADDING_PX: f32 = 8.0;
/// Gap between consecutive lines.
pub(crate) const LINE_SPACING_PX: f32 = 4.0;
/// Padding around the pane's column.
pub(crate) const PANE_PADDING_PX: f32 = 8.0;
/// Width reserved for the `[P]` toggle on source lines.
pub(crate) const PHONETIC_TOGGLE_WIDTH_PX: f32 = 36.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaneRole {
    Source,
    Target,
}

impl PaneRole {
    pub fn other(self) -> Self {
        match self {
            PaneRole::Source => PaneRole::Target,
            PaneRole::Target => PaneRole::Source,
        }
    }
}

impl std::fmt::Display for PaneRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PaneRole::Source => "source",
            PaneRole::Target => "target",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineHighlight {
    #[default]
    None,
    Active,
    /// Fading out; cleared once `until` passes.
    Exiting { until: Instant },
}

impl LineHighlight {
    pub fn is_highlighted(self) -> bool {
        !matches!(self, LineHighlight::None)
    }
}

#[derive(Debug, Clone)]
pub struct TranscriptLine {
    pub cue_id: u32,
    pub start_seconds: f64,
    pub text: String,
    pub highlight: LineHighlight,
}

#[derive(Debug, Clone)]
pub struct TranscriptPane {
    pub role: PaneRole,
    pub lines: Vec<TranscriptLine>,
}

impl TranscriptPane {
    pub fn empty(role: PaneRole) -> Self {
        Self {
            role,
            lines: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// First line carrying `cue_id`; ids are not unique across files, so the
    /// first occurrence wins.
    pub fn line_for_cue(&self, cue_id: u32) -> Option<usize> {
        self.lines.iter().position(|line| line.cue_id == cue_id)
    }

    pub fn active_line(&self) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.highlight == LineHighlight::Active)
    }
}

/// Build a fresh pane from parsed cues, replacing any previous content.
pub fn render_pane(role: PaneRole, cues: &[Cue]) -> TranscriptPane {
    TranscriptPane {
        role,
        lines: cues
            .iter()
            .map(|cue| TranscriptLine {
                cue_id: cue.id,
                start_seconds: cue.start_seconds,
                text: display_text(&cue.text),
                highlight: LineHighlight::None,
            })
            .collect(),
    }
}

/// Estimated vertical geometry of a pane's lines in content space.
#[derive(Debug, Clone, PartialEq)]
pub struct PaneLayout {
    tops: Vec<f32>,
    heights: Vec<f32>,
    content_height: f32,
}

impl PaneLayout {
    /// Estimate line boxes from text length and font metrics. Keep the
    /// padding constants in sync with `app/view.rs`.
    pub fn estimate(
        pane: &TranscriptPane,
        font_size: f32,
        line_spacing: f32,
        viewport_width: f32,
    ) -> Self {
        let font_size = font_size.max(1.0);
        let line_height = font_size * line_spacing.max(0.8);
        let mut text_width = viewport_width - PANE_PADDING_PX * 2.0 - LINE_PADDING_PX * 2.0;
        if pane.role == PaneRole::Source {
            text_width -= PHONETIC_TOGGLE_WIDTH_PX;
        }
        let glyph_width = font_size * 0.55;
        let max_units_per_line = (text_width.max(1.0) / glyph_width).max(8.0);

        let mut tops = Vec::with_capacity(pane.lines.len());
        let mut heights = Vec::with_capacity(pane.lines.len());
        let mut cursor = PANE_PADDING_PX;
        for (idx, line) in pane.lines.iter().enumerate() {
            if idx > 0 {
                cursor += LINE_SPACING_PX;
            }
            let rows = wrapped_rows(&line.text, max_units_per_line);
            let height = rows * line_height + LINE_PADDING_PX * 2.0;
            tops.push(cursor);
            heights.push(height);
            cursor += height;
        }

        Self {
            tops,
            heights,
            content_height: cursor + PANE_PADDING_PX,
        }
    }

    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    /// `(top, height)` of a line. When the widget has reported its real
    /// content height the estimate is scaled to match it.
    pub fn line_box(&self, idx: usize, measured_content_height: Option<f32>) -> Option<(f32, f32)> {
        let top = *self.tops.get(idx)?;
        let height = *self.heights.get(idx)?;
        let scale = match measured_content_height {
            Some(measured) if measured.is_finite() && measured > 0.0 && self.content_height > 0.0 => {
                measured / self.content_height
            }
            _ => 1.0,
        };
        Some((top * scale, height * scale))
    }
}

fn wrapped_rows(text: &str, max_units_per_line: f32) -> f32 {
    let mut rows = 1.0f32;
    let mut units_on_row = 0.0f32;
    for ch in text.chars() {
        if ch == '\n' {
            rows += 1.0;
            units_on_row = 0.0;
            continue;
        }
        let units = if ch.is_whitespace() {
            0.45
        } else if ch.is_ascii_punctuation() {
            0.55
        } else if ch.is_ascii() {
            1.0
        } else {
            1.1
        };
        if units_on_row + units > max_units_per_line {
            rows += 1.0;
            units_on_row = units;
        } else {
            units_on_row += units;
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::parse_srt;

    fn pane(role: PaneRole) -> TranscriptPane {
        render_pane(
            role,
            &parse_srt(
                "1\n00:00:00,000 --> 00:00:01,000\nUn<br>deux\n\n2\n00:00:01,000 --> 00:00:02,000\nTrois\n\n2\n00:00:02,000 --> 00:00:03,000\nQuatre\n",
            ),
        )
    }

    #[test]
    fn render_converts_markup_and_keeps_order() {
        let pane = pane(PaneRole::Source);
        assert_eq!(pane.lines.len(), 3);
        assert_eq!(pane.lines[0].text, "Un\ndeux");
        assert_eq!(pane.lines[2].start_seconds, 2.0);
        assert!(pane.lines.iter().all(|l| l.highlight == LineHighlight::None));
    }

    #[test]
    fn duplicate_ids_resolve_to_first_line() {
        assert_eq!(pane(PaneRole::Target).line_for_cue(2), Some(1));
        assert_eq!(pane(PaneRole::Target).line_for_cue(9), None);
    }

    #[test]
    fn layout_lines_are_stacked_top_to_bottom() {
        let layout = PaneLayout::estimate(&pane(PaneRole::Target), 18.0, 1.3, 600.0);
        let (top0, h0) = layout.line_box(0, None).expect("line 0");
        let (top1, _) = layout.line_box(1, None).expect("line 1");
        assert!(top1 >= top0 + h0);
        assert!(layout.content_height() > top1);
        // Two text rows for the line containing a break.
        let (_, h1) = layout.line_box(1, None).expect("line 1");
        assert!(h0 > h1);
    }

    #[test]
    fn layout_scales_to_measured_height() {
        let layout = PaneLayout::estimate(&pane(PaneRole::Target), 18.0, 1.3, 600.0);
        let doubled = layout.content_height() * 2.0;
        let (top, _) = layout.line_box(2, None).expect("line 2");
        let (scaled_top, _) = layout.line_box(2, Some(doubled)).expect("scaled");
        assert!((scaled_top - top * 2.0).abs() < 1e-3);
    }

    #[test]
    fn narrow_panes_wrap_long_lines() {
        let mut long = pane(PaneRole::Target);
        long.lines[1].text = "mot ".repeat(80);
        let wide = PaneLayout::estimate(&long, 18.0, 1.3, 2000.0);
        let narrow = PaneLayout::estimate(&long, 18.0, 1.3, 300.0);
        assert!(narrow.line_box(1, None).unwrap().1 > wide.line_box(1, None).unwrap().1);
    }
}
