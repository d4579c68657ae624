use super::super::super::messages::Message;
use super::super::super::state::App;
use super::super::Effect;
use tracing::info;

impl App {
    pub(super) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::VideosLoaded { videos, error } => {
                self.handle_videos_loaded(videos, error, &mut effects)
            }
            Message::ThumbnailLoaded {
                video_id,
                thumbnail,
            } => self.handle_thumbnail_loaded(video_id, thumbnail),
            Message::CatalogNavigate(nav) => self.handle_catalog_navigate(nav),
            Message::SelectVideo(video_id) => self.handle_select_video(video_id, &mut effects),
            Message::BackToCatalog => self.handle_back_to_catalog(&mut effects),
            Message::CaptionsLoaded {
                generation,
                video_id,
                language,
                captions,
                error,
            } => self.handle_captions_loaded(
                generation,
                video_id,
                language,
                captions,
                error,
                &mut effects,
            ),
            Message::TargetCaptionsLoaded {
                generation,
                language,
                cues,
                error,
            } => self.handle_target_captions_loaded(
                generation,
                language,
                cues,
                error,
                &mut effects,
            ),
            Message::LanguageSelected(code) => self.handle_language_selected(code, &mut effects),
            Message::Tick { generation, now } => self.handle_tick(generation, now, &mut effects),
            Message::PaneScrolled {
                pane,
                offset_y,
                viewport_width,
                viewport_height,
                content_height,
            } => self.handle_pane_scrolled(
                pane,
                offset_y,
                viewport_width,
                viewport_height,
                content_height,
                &mut effects,
            ),
            Message::LineClicked { pane, index } => {
                self.handle_line_clicked(pane, index, &mut effects)
            }
            Message::TogglePhonetic(index) => self.handle_toggle_phonetic(index),
            Message::HidePhonetic => self.handle_hide_phonetic(),
            Message::Recenter => self.handle_manual_recenter(&mut effects),
            Message::TogglePlayPause => self.handle_toggle_play_pause(&mut effects),
            Message::NextCue => self.handle_step_cue(true, &mut effects),
            Message::PreviousCue => self.handle_step_cue(false, &mut effects),
            Message::ExportFlashcards => self.handle_export_flashcards(&mut effects),
            Message::FlashcardsExported { path, error } => {
                self.handle_flashcards_exported(path, error)
            }
            Message::ToggleTheme => self.handle_toggle_theme(&mut effects),
            Message::ToggleSettings => self.handle_toggle_settings(),
            Message::FontSizeChanged(size) => self.handle_font_size_changed(size, &mut effects),
            Message::LineSpacingChanged(spacing) => {
                self.handle_line_spacing_changed(spacing, &mut effects)
            }
            Message::DayHighlightChanged(component, value) => {
                self.handle_day_highlight_changed(component, value, &mut effects)
            }
            Message::NightHighlightChanged(component, value) => {
                self.handle_night_highlight_changed(component, value, &mut effects)
            }
            Message::WindowResized { width, height } => {
                self.handle_window_resized(width, height, &mut effects)
            }
            Message::KeyPressed { key, modifiers } => {
                if let Some(shortcut) = self.shortcut_message_for_key(key, modifiers) {
                    effects.extend(self.reduce(shortcut));
                }
            }
            Message::PollSystemSignals => self.handle_poll_system_signals(&mut effects),
            Message::SafeQuit => {
                info!("Safe quit requested");
                effects.push(Effect::QuitSafely);
            }
        }

        effects
    }

    fn handle_poll_system_signals(&mut self, effects: &mut Vec<Effect>) {
        if crate::take_sigint_requested() {
            info!("SIGINT received; quitting safely");
            effects.push(Effect::QuitSafely);
        }
    }
}
