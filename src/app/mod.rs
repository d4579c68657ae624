mod messages;
mod state;
mod update;
mod view;

pub use state::App;

use crate::cache::ViewerCache;
use crate::config::AppConfig;
use iced::{Size, Theme, window};
use std::path::PathBuf;

/// Launch the viewer window; the catalog starts loading immediately.
pub fn run_app(config: AppConfig, config_path: PathBuf, cache: ViewerCache) -> iced::Result {
    let window_settings = window::Settings {
        size: Size::new(config.window_width, config.window_height),
        ..window::Settings::default()
    };

    iced::application("Subtitle Sync Viewer", App::update, App::view)
        .window(window_settings)
        .subscription(App::subscription)
        .theme(|app: &App| {
            if matches!(app.config.theme, crate::config::ThemeMode::Night) {
                Theme::Dark
            } else {
                Theme::Light
            }
        })
        .run_with(move || App::bootstrap(config, config_path, cache))
}
