use super::messages::{Component, Message};
use super::state::{
    App, CATALOG_COLUMNS, CATALOG_THUMBNAIL_HEIGHT_PX, MAX_FONT_SIZE, MAX_LINE_SPACING,
    MIN_FONT_SIZE, MIN_LINE_SPACING, SIDEBAR_WIDTH_PX, ViewerSession, scroll_id,
};
use crate::catalog::{NO_VIDEOS_PLACEHOLDER, PageNav, VideoEntry, truncate_title};
use crate::config::{HighlightColor, TargetLanguage};
use crate::transcript::{
    LINE_PADDING_PX, LINE_SPACING_PX, LineHighlight, PANE_PADDING_PX, PHONETIC_TOGGLE_WIDTH_PX,
    PaneRole, TranscriptLine, TranscriptPane, phonetic_display_text,
};
use iced::alignment::Vertical;
use iced::widget::text::{LineHeight, Wrapping};
use iced::widget::{
    Column, Row, button, column, container, horizontal_space, image, mouse_area, pick_list, row,
    scrollable, slider, text,
};
use iced::{Background, Color, Element, Length};

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let body = match self.session.as_ref() {
            Some(session) => self.viewer(session),
            None => self.catalog_view(),
        };

        let mut content: Column<'_, Message> = column![body].spacing(8).height(Length::Fill);
        if let Some(status) = self.status.as_deref() {
            content = content.push(text(status).size(14.0));
        }

        let mut layout: Row<'_, Message> =
            row![container(content).width(Length::Fill).padding(12)].spacing(16);
        if self.show_settings {
            layout = layout.push(self.settings_panel());
        }
        layout.into()
    }

    fn theme_controls(&self) -> Row<'_, Message> {
        let theme_label = if matches!(self.config.theme, crate::config::ThemeMode::Night) {
            "Day Mode"
        } else {
            "Night Mode"
        };
        row![
            button(theme_label).on_press(Message::ToggleTheme),
            button(if self.show_settings {
                "Hide Settings"
            } else {
                "Show Settings"
            })
            .on_press(Message::ToggleSettings),
        ]
        .spacing(10)
    }

    fn catalog_view(&self) -> Element<'_, Message> {
        let header = row![
            text("Videos").size(24.0),
            horizontal_space(),
            self.theme_controls()
        ]
        .align_y(Vertical::Center);

        let catalog = &self.catalog.catalog;
        let body: Element<'_, Message> = if self.catalog.loading {
            text("Loading videos...").into()
        } else if catalog.is_empty() {
            let mut placeholder = column![text(NO_VIDEOS_PLACEHOLDER)].spacing(8);
            if let Some(err) = self.catalog.error.as_deref() {
                placeholder = placeholder.push(text(format!("Error: {err}")).size(14.0));
            }
            placeholder.into()
        } else {
            let mut grid = Column::new().spacing(16);
            for chunk in catalog.page_items().chunks(CATALOG_COLUMNS) {
                let mut cards = Row::new().spacing(16);
                for video in chunk {
                    cards = cards.push(self.video_card(video));
                }
                for _ in chunk.len()..CATALOG_COLUMNS {
                    cards = cards.push(horizontal_space().width(Length::FillPortion(1)));
                }
                grid = grid.push(cards);
            }
            scrollable(grid).height(Length::Fill).into()
        };

        let nav = row![
            button("First").on_press_maybe(
                catalog
                    .can_go_back()
                    .then_some(Message::CatalogNavigate(PageNav::First))
            ),
            button("Previous").on_press_maybe(
                catalog
                    .can_go_back()
                    .then_some(Message::CatalogNavigate(PageNav::Previous))
            ),
            text(catalog.page_label()),
            button("Next").on_press_maybe(
                catalog
                    .can_go_forward()
                    .then_some(Message::CatalogNavigate(PageNav::Next))
            ),
            button("Last").on_press_maybe(
                catalog
                    .can_go_forward()
                    .then_some(Message::CatalogNavigate(PageNav::Last))
            ),
        ]
        .spacing(10)
        .align_y(Vertical::Center);

        column![header, body, nav]
            .spacing(16)
            .height(Length::Fill)
            .into()
    }

    fn video_card<'a>(&'a self, video: &'a VideoEntry) -> Element<'a, Message> {
        let preview: Element<'_, Message> = match self.catalog.thumbnails.get(&video.id) {
            Some(handle) => image(handle.clone())
                .height(Length::Fixed(CATALOG_THUMBNAIL_HEIGHT_PX))
                .into(),
            None => container(text("▶").size(32.0))
                .center_x(Length::Fill)
                .center_y(Length::Fixed(CATALOG_THUMBNAIL_HEIGHT_PX))
                .into(),
        };
        button(
            column![
                preview,
                text(truncate_title(&video.title, self.config.title_max_chars))
            ]
            .spacing(6)
            .width(Length::Fill),
        )
        .on_press(Message::SelectVideo(video.id.clone()))
        .width(Length::FillPortion(1))
        .into()
    }

    fn viewer<'a>(&'a self, session: &'a ViewerSession) -> Element<'a, Message> {
        let selected = self
            .config
            .target_languages
            .iter()
            .find(|lang| lang.code == session.language)
            .cloned();
        let language_picker = pick_list(
            self.config.target_languages.as_slice(),
            selected,
            |lang: TargetLanguage| Message::LanguageSelected(lang.code),
        );

        let ready = !session.loading && session.error.is_none();
        let play_label = if session.playback_state.is_playing() {
            "Pause"
        } else {
            "Play"
        };
        let controls = row![
            button("Back").on_press(Message::BackToCatalog),
            text(truncate_title(&session.video.title, self.config.title_max_chars)).size(18.0),
            horizontal_space(),
            text(format!("{}:", self.config.source_language_name)),
            language_picker,
            button("⏮").on_press_maybe(ready.then_some(Message::PreviousCue)),
            button(play_label).on_press_maybe(ready.then_some(Message::TogglePlayPause)),
            button("⏭").on_press_maybe(ready.then_some(Message::NextCue)),
            button("Recenter")
                .on_press_maybe((ready && session.recenter_enabled).then_some(Message::Recenter)),
            button("Export").on_press_maybe(ready.then_some(Message::ExportFlashcards)),
            text(format!(
                "{} / {}",
                format_timestamp(session.playhead_seconds),
                format_timestamp(session.duration())
            )),
            self.theme_controls(),
        ]
        .spacing(10)
        .align_y(Vertical::Center)
        .width(Length::Fill);

        let panes = row![
            self.transcript_pane(session, PaneRole::Source),
            self.transcript_pane(session, PaneRole::Target),
        ]
        .spacing(12)
        .height(Length::Fill);

        let main = row![self.sidebar(session), panes]
            .spacing(12)
            .height(Length::Fill);

        column![controls, main]
            .spacing(12)
            .height(Length::Fill)
            .into()
    }

    fn sidebar<'a>(&'a self, session: &'a ViewerSession) -> Element<'a, Message> {
        let mut list = Column::new().spacing(6);
        let mut any = false;
        for video in self.catalog.catalog.sidebar(Some(session.video.id.as_str())) {
            any = true;
            list = list.push(
                button(text(truncate_title(&video.title, self.config.title_max_chars)).size(14.0))
                    .on_press(Message::SelectVideo(video.id.clone()))
                    .width(Length::Fill),
            );
        }
        if !any {
            list = list.push(text(self.catalog.catalog.empty_sidebar_text()).size(14.0));
        }

        column![
            text("Other videos").size(16.0),
            scrollable(list).height(Length::Fill)
        ]
        .spacing(8)
        .width(Length::Fixed(SIDEBAR_WIDTH_PX))
        .into()
    }

    fn transcript_pane<'a>(&'a self, session: &'a ViewerSession, role: PaneRole) -> Element<'a, Message> {
        let title = match role {
            PaneRole::Source => self.config.source_language_name.clone(),
            PaneRole::Target => self.config.language_name(&session.language),
        };
        let pane = session.panes.get(role);

        let body: Element<'_, Message> = if let Some(err) = session.error.as_deref() {
            container(text(format!("Could not load subtitles: {err}")))
                .padding(PANE_PADDING_PX)
                .into()
        } else if session.loading {
            container(text("Loading subtitles..."))
                .padding(PANE_PADDING_PX)
                .into()
        } else if pane.is_empty() {
            container(text(self.catalog.catalog.empty_pane_text()))
                .padding(PANE_PADDING_PX)
                .into()
        } else {
            let lines = pane
                .lines
                .iter()
                .enumerate()
                .map(|(idx, line)| self.transcript_line(session, pane, idx, line));
            scrollable(
                Column::with_children(lines)
                    .spacing(LINE_SPACING_PX)
                    .padding(PANE_PADDING_PX)
                    .width(Length::Fill),
            )
            .id(scroll_id(role))
            .on_scroll(move |viewport| Message::PaneScrolled {
                pane: role,
                offset_y: viewport.absolute_offset().y,
                viewport_width: viewport.bounds().width,
                viewport_height: viewport.bounds().height,
                content_height: viewport.content_bounds().height,
            })
            .height(Length::Fill)
            .into()
        };

        column![text(title).size(16.0), body]
            .spacing(8)
            .width(Length::FillPortion(1))
            .height(Length::Fill)
            .into()
    }

    fn transcript_line<'a>(
        &'a self,
        session: &'a ViewerSession,
        pane: &'a TranscriptPane,
        idx: usize,
        line: &'a TranscriptLine,
    ) -> Element<'a, Message> {
        let font_size = self.config.font_size as f32;
        let line_height = LineHeight::Relative(self.config.line_spacing);
        let mut body = column![
            text(line.text.as_str())
                .size(font_size)
                .line_height(line_height)
                .wrapping(Wrapping::WordOrGlyph)
                .width(Length::Fill)
        ]
        .spacing(4)
        .width(Length::Fill);

        if pane.role == PaneRole::Source && session.phonetic_open == Some(idx) {
            if let Some(sub) = session.aligned.get(idx) {
                body = body.push(
                    text(phonetic_display_text(&sub.phonetic_text))
                        .size(font_size * 0.85)
                        .line_height(line_height)
                        .wrapping(Wrapping::WordOrGlyph),
                );
            }
        }

        let clickable = mouse_area(body).on_press(Message::LineClicked {
            pane: pane.role,
            index: idx,
        });
        let mut content = Row::new().spacing(0).align_y(Vertical::Center);
        if pane.role == PaneRole::Source {
            content = content.push(
                button(text("P").size(12.0))
                    .on_press(Message::TogglePhonetic(idx))
                    .width(Length::Fixed(PHONETIC_TOGGLE_WIDTH_PX)),
            );
        }
        content = content.push(clickable);

        let background = match line.highlight {
            LineHighlight::None => None,
            LineHighlight::Active => Some(self.highlight_color()),
            LineHighlight::Exiting { .. } => {
                let color = self.highlight_color();
                Some(Color {
                    a: color.a * 0.4,
                    ..color
                })
            }
        };
        container(content)
            .padding([LINE_PADDING_PX, LINE_PADDING_PX])
            .width(Length::Fill)
            .style(move |_theme| container::Style {
                background: background.map(Background::Color),
                ..container::Style::default()
            })
            .into()
    }

    fn color_row<'a>(
        &self,
        label: &'a str,
        color: HighlightColor,
        msg: impl Fn(Component, f32) -> Message + Copy + 'a,
    ) -> Row<'a, Message> {
        row![
            text(label),
            slider(0.0..=1.0, color.r, move |v| msg(Component::R, v)).step(0.01),
            slider(0.0..=1.0, color.g, move |v| msg(Component::G, v)).step(0.01),
            slider(0.0..=1.0, color.b, move |v| msg(Component::B, v)).step(0.01),
            slider(0.0..=1.0, color.a, move |v| msg(Component::A, v)).step(0.01),
        ]
        .spacing(6)
        .align_y(Vertical::Center)
    }

    fn settings_panel(&self) -> Element<'_, Message> {
        let font_slider = slider(
            MIN_FONT_SIZE as f32..=MAX_FONT_SIZE as f32,
            self.config.font_size as f32,
            |value| Message::FontSizeChanged(value.round() as u32),
        );
        let line_spacing_slider = slider(
            MIN_LINE_SPACING..=MAX_LINE_SPACING,
            self.config.line_spacing,
            Message::LineSpacingChanged,
        )
        .step(0.05);

        let panel = column![
            text("Viewer Settings").size(20.0),
            row![text(format!("Font: {}", self.config.font_size)), font_slider]
                .spacing(8)
                .align_y(Vertical::Center),
            row![
                text(format!("Line spacing: {:.2}", self.config.line_spacing)),
                line_spacing_slider
            ]
            .spacing(8)
            .align_y(Vertical::Center),
            text("Highlight Colors").size(18.0),
            self.color_row("Day highlight", self.config.day_highlight, |c, v| {
                Message::DayHighlightChanged(c, v)
            }),
            self.color_row(
                "Night highlight",
                self.config.night_highlight,
                |c, v| { Message::NightHighlightChanged(c, v) }
            ),
        ]
        .spacing(12)
        .width(Length::Fixed(280.0));

        container(panel).padding(12).into()
    }
}

fn format_timestamp(seconds: f64) -> String {
    let total = if seconds.is_finite() {
        seconds.max(0.0) as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_render_as_minutes_and_seconds() {
        assert_eq!(format_timestamp(0.0), "00:00");
        assert_eq!(format_timestamp(75.9), "01:15");
        assert_eq!(format_timestamp(f64::NAN), "00:00");
        assert_eq!(format_timestamp(-3.0), "00:00");
    }
}
