//! Flashcard export of the current video's aligned subtitles.
//!
//! Output is an Anki-importable tab-separated file: the front is the source
//! line, the back the phonetic line and the translation separated by `<br>`.

use crate::catalog::truncate_title;
use crate::transcript::{AlignedSubtitle, display_text, phonetic_display_text};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const MISSING_TRANSLATION: &str = "Translation not available";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

pub fn cards_from_subtitles(subtitles: &[AlignedSubtitle]) -> Vec<Flashcard> {
    subtitles
        .iter()
        .filter_map(|sub| {
            let front = display_text(&sub.source_text);
            if front.is_empty() {
                return None;
            }
            let phonetic = phonetic_display_text(&sub.phonetic_text);
            let target = display_text(&sub.target_text);
            let target = if target.is_empty() {
                MISSING_TRANSLATION.to_string()
            } else {
                target
            };
            Some(Flashcard {
                front,
                back: format!("{phonetic}\n{target}"),
            })
        })
        .collect()
}

fn field(text: &str) -> String {
    text.replace('\t', " ")
        .replace("\r\n", "\n")
        .replace('\n', "<br>")
}

pub fn render_tsv(deck_name: &str, cards: &[Flashcard]) -> String {
    let mut out = String::new();
    out.push_str("#separator:tab\n#html:true\n");
    out.push_str(&format!("#deck:{}\n", field(deck_name)));
    for card in cards {
        out.push_str(&field(&card.front));
        out.push('\t');
        out.push_str(&field(&card.back));
        out.push('\n');
    }
    out
}

/// File-system safe stem for an export file.
fn file_stem(video_id: &str, language: &str) -> String {
    let safe: String = video_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("{safe}-{language}-flashcards")
}

/// Write the deck for a video to `dir` and return the file path.
pub fn export_flashcards(
    dir: &Path,
    video_id: &str,
    video_title: &str,
    language: &str,
    subtitles: &[AlignedSubtitle],
    title_max_chars: usize,
) -> Result<PathBuf> {
    let cards = cards_from_subtitles(subtitles);
    let deck_name = format!("{} French Flashcards", truncate_title(video_title, title_max_chars));
    let contents = render_tsv(&deck_name, &cards);
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(format!("{}.tsv", file_stem(video_id, language)));
    fs::write(&path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), cards = cards.len(), "Exported flashcards");
    Ok(path)
}
