use crate::transcript::PaneRole;
use iced::widget::scrollable::Id as ScrollId;
use once_cell::sync::Lazy;

/// Limits for viewer controls.
pub(crate) const MIN_FONT_SIZE: u32 = 12;
pub(crate) const MAX_FONT_SIZE: u32 = 36;
pub(crate) const MIN_LINE_SPACING: f32 = 0.8;
pub(crate) const MAX_LINE_SPACING: f32 = 2.5;
pub(crate) const SIDEBAR_WIDTH_PX: f32 = 220.0;
pub(crate) const CATALOG_COLUMNS: usize = 3;
pub(crate) const CATALOG_THUMBNAIL_HEIGHT_PX: f32 = 120.0;
/// Share of the window width taken by one transcript pane before the first
/// viewport report arrives.
pub(crate) const PANE_WIDTH_FRACTION: f32 = 0.4;
pub(crate) static SOURCE_SCROLL_ID: Lazy<ScrollId> = Lazy::new(|| ScrollId::new("source-pane"));
pub(crate) static TARGET_SCROLL_ID: Lazy<ScrollId> = Lazy::new(|| ScrollId::new("target-pane"));

pub(crate) fn scroll_id(pane: PaneRole) -> ScrollId {
    match pane {
        PaneRole::Source => SOURCE_SCROLL_ID.clone(),
        PaneRole::Target => TARGET_SCROLL_ID.clone(),
    }
}
