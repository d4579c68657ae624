//! Caption parsing, cross-language alignment and pane rendering.

mod align;
mod markup;
mod render;
mod srt;

pub use align::{AlignedSubtitle, align_subtitles};
pub use markup::{display_text, phonetic_display_text};
pub use render::{
    LineHighlight, PaneLayout, PaneRole, TranscriptLine, TranscriptPane, render_pane,
};
pub(crate) use render::{
    LINE_PADDING_PX, LINE_SPACING_PX, PANE_PADDING_PX, PHONETIC_TOGGLE_WIDTH_PX,
};
pub use srt::{Cue, LINE_BREAK, parse_srt};
