use crate::sync::ScrollCommand;

mod appearance;
mod catalog;
mod core;
mod playback;
mod scroll;

/// Describes work that must be performed outside the pure reducer.
#[derive(Debug)]
pub(super) enum Effect {
    SaveConfig,
    SaveResume,
    LoadVideos,
    LoadThumbnails(Vec<String>),
    LoadCaptions {
        generation: u64,
        video_id: String,
        language: String,
    },
    LoadTargetCaptions {
        generation: u64,
        video_id: String,
        language: String,
    },
    Scroll(Vec<ScrollCommand>),
    ExportFlashcards,
    QuitSafely,
}
