use super::super::super::messages::{LoadedCaptions, Message};
use super::super::super::state::{App, scroll_id};
use super::super::Effect;
use crate::catalog::{VideoSource, fetch_thumbnail, required_caption_files, validate_videos};
use crate::fetch::CaptionStore;
use crate::flashcards::export_flashcards;
use crate::transcript::parse_srt;
use anyhow::{Result, anyhow};
use iced::Event;
use iced::Task;
use iced::event;
use iced::keyboard;
use iced::widget::scrollable::{self, AbsoluteOffset};
use iced::window;
use std::path::PathBuf;
use tracing::{info, warn};

impl App {
    pub(in crate::app) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::SaveConfig => {
                self.save_config();
                Task::none()
            }
            Effect::SaveResume => {
                self.persist_resume();
                Task::none()
            }
            Effect::LoadVideos => {
                self.catalog.loading = true;
                self.catalog.error = None;
                let config = self.config.clone();
                info!(
                    api = %config.api_base_url,
                    captions = %config.captions_base,
                    "Dispatching catalog load task"
                );
                Task::perform(
                    async move {
                        match run_blocking(move || load_validated_videos(&config)).await {
                            Ok(videos) => Message::VideosLoaded {
                                videos,
                                error: None,
                            },
                            Err(err) => Message::VideosLoaded {
                                videos: Vec::new(),
                                error: Some(format!("{err:#}")),
                            },
                        }
                    },
                    |message| message,
                )
            }
            Effect::LoadThumbnails(video_ids) => {
                let template = self.config.thumbnail_url_template.clone();
                Task::batch(video_ids.into_iter().map(|video_id| {
                    let template = template.clone();
                    Task::perform(
                        async move {
                            let id = video_id.clone();
                            let fetched =
                                run_blocking(move || fetch_thumbnail(&template, &id)).await;
                            let thumbnail = match fetched {
                                Ok(thumbnail) => Some(thumbnail),
                                Err(err) => {
                                    warn!(video = %video_id, "Thumbnail unavailable: {err:#}");
                                    None
                                }
                            };
                            Message::ThumbnailLoaded {
                                video_id,
                                thumbnail,
                            }
                        },
                        |message| message,
                    )
                }))
            }
            Effect::LoadCaptions {
                generation,
                video_id,
                language,
            } => {
                let config = self.config.clone();
                info!(video = %video_id, %language, generation, "Loading captions");
                Task::perform(
                    async move {
                        let (id, lang) = (video_id.clone(), language.clone());
                        match run_blocking(move || load_captions(&config, &id, &lang)).await {
                            Ok(captions) => Message::CaptionsLoaded {
                                generation,
                                video_id,
                                language,
                                captions: Some(captions),
                                error: None,
                            },
                            Err(err) => Message::CaptionsLoaded {
                                generation,
                                video_id,
                                language,
                                captions: None,
                                error: Some(format!("{err:#}")),
                            },
                        }
                    },
                    |message| message,
                )
            }
            Effect::LoadTargetCaptions {
                generation,
                video_id,
                language,
            } => {
                let config = self.config.clone();
                info!(video = %video_id, %language, generation, "Loading target captions");
                Task::perform(
                    async move {
                        let file = format!("{language}.srt");
                        let result = run_blocking(move || {
                            CaptionStore::from_config(&config)
                                .and_then(|store| store.fetch_for_video(&video_id, &file))
                        })
                        .await;
                        match result {
                            Ok(raw) => Message::TargetCaptionsLoaded {
                                generation,
                                language,
                                cues: parse_srt(&raw),
                                error: None,
                            },
                            Err(err) => Message::TargetCaptionsLoaded {
                                generation,
                                language,
                                cues: Vec::new(),
                                error: Some(format!("{err:#}")),
                            },
                        }
                    },
                    |message| message,
                )
            }
            Effect::Scroll(commands) => Task::batch(commands.into_iter().map(|command| {
                scrollable::scroll_to(
                    scroll_id(command.pane),
                    AbsoluteOffset {
                        x: 0.0,
                        y: command.offset_y,
                    },
                )
            })),
            Effect::ExportFlashcards => {
                let Some(session) = self.session.as_ref().filter(|s| !s.aligned.is_empty()) else {
                    self.status = Some("Nothing to export yet".to_string());
                    return Task::none();
                };
                let dir = PathBuf::from(&self.config.export_dir);
                let video = session.video.clone();
                let language = session.language.clone();
                let aligned = session.aligned.clone();
                let title_max_chars = self.config.title_max_chars;
                Task::perform(
                    async move {
                        let exported = run_blocking(move || {
                            export_flashcards(
                                &dir,
                                &video.id,
                                &video.title,
                                &language,
                                &aligned,
                                title_max_chars,
                            )
                        })
                        .await;
                        match exported {
                            Ok(path) => Message::FlashcardsExported {
                                path: Some(path),
                                error: None,
                            },
                            Err(err) => Message::FlashcardsExported {
                                path: None,
                                error: Some(format!("{err:#}")),
                            },
                        }
                    },
                    |message| message,
                )
            }
            Effect::QuitSafely => {
                self.save_config();
                self.end_session();
                iced::exit()
            }
        }
    }
}

/// Run blocking I/O (the `reqwest` blocking client, file writes) off the
/// async executor.
async fn run_blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| anyhow!("background task failed: {err}"))?
}

/// List candidate videos and keep the ones with all required caption files.
fn load_validated_videos(config: &crate::config::AppConfig) -> Result<Vec<crate::catalog::VideoEntry>> {
    let source = VideoSource::from_config(config)?;
    let store = CaptionStore::from_config(config)?;
    let candidates = source.list_videos()?;
    Ok(validate_videos(
        candidates,
        &store,
        &required_caption_files(config),
    ))
}

/// Fetch and parse the source, target and (optional) phonetic files.
fn load_captions(
    config: &crate::config::AppConfig,
    video_id: &str,
    language: &str,
) -> Result<LoadedCaptions> {
    let store = CaptionStore::from_config(config)?;
    let source = parse_srt(&store.fetch_for_video(video_id, &config.source_file)?);
    let target = parse_srt(&store.fetch_for_video(video_id, &format!("{language}.srt"))?);
    let phonetic = match store.fetch_for_video(video_id, &config.phonetic_file) {
        Ok(raw) => parse_srt(&raw),
        Err(err) => {
            info!(video = video_id, "No phonetic transcription: {err:#}");
            Vec::new()
        }
    };
    Ok(LoadedCaptions {
        source,
        target,
        phonetic,
    })
}

pub(super) fn runtime_event_to_message(
    event: Event,
    status: event::Status,
    _window_id: window::Id,
) -> Option<Message> {
    if status == event::Status::Captured {
        return None;
    }
    match event {
        Event::Window(iced::window::Event::Resized(size)) => Some(Message::WindowResized {
            width: size.width,
            height: size.height,
        }),
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            Some(Message::KeyPressed { key, modifiers })
        }
        _ => None,
    }
}
