use crate::catalog::{PageNav, Thumbnail, VideoEntry};
use crate::transcript::{Cue, PaneRole};
use iced::keyboard::{Key, Modifiers};
use std::path::PathBuf;
use std::time::Instant;

/// Caption files of one video, parsed.
#[derive(Debug, Clone)]
pub struct LoadedCaptions {
    pub source: Vec<Cue>,
    pub target: Vec<Cue>,
    pub phonetic: Vec<Cue>,
}

/// Messages emitted by the UI.
#[derive(Debug, Clone)]
pub enum Message {
    VideosLoaded {
        videos: Vec<VideoEntry>,
        error: Option<String>,
    },
    ThumbnailLoaded {
        video_id: String,
        thumbnail: Option<Thumbnail>,
    },
    CatalogNavigate(PageNav),
    SelectVideo(String),
    BackToCatalog,
    CaptionsLoaded {
        generation: u64,
        video_id: String,
        language: String,
        captions: Option<LoadedCaptions>,
        error: Option<String>,
    },
    TargetCaptionsLoaded {
        generation: u64,
        language: String,
        cues: Vec<Cue>,
        error: Option<String>,
    },
    LanguageSelected(String),
    Tick {
        generation: u64,
        now: Instant,
    },
    PaneScrolled {
        pane: PaneRole,
        offset_y: f32,
        viewport_width: f32,
        viewport_height: f32,
        content_height: f32,
    },
    LineClicked {
        pane: PaneRole,
        index: usize,
    },
    TogglePhonetic(usize),
    HidePhonetic,
    Recenter,
    TogglePlayPause,
    NextCue,
    PreviousCue,
    ExportFlashcards,
    FlashcardsExported {
        path: Option<PathBuf>,
        error: Option<String>,
    },
    ToggleTheme,
    ToggleSettings,
    FontSizeChanged(u32),
    LineSpacingChanged(f32),
    DayHighlightChanged(Component, f32),
    NightHighlightChanged(Component, f32),
    WindowResized {
        width: f32,
        height: f32,
    },
    KeyPressed {
        key: Key,
        modifiers: Modifiers,
    },
    PollSystemSignals,
    SafeQuit,
}

#[derive(Debug, Clone, Copy)]
pub enum Component {
    R,
    G,
    B,
    A,
}
