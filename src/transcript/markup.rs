//! Cue markup to display text.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static BREAK_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid regex"));
static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Render cue markup (`<br>` breaks, inline tags, entities) as plain text.
pub fn display_text(markup: &str) -> String {
    let text = if markup.contains('<') || markup.contains('&') {
        // Wide width so html2text never hard-wraps; the pane wraps.
        match html2text::from_read(markup.as_bytes(), 10_000) {
            Ok(clean) => clean,
            Err(err) => {
                tracing::debug!("html2text failed on cue markup: {err}");
                strip_tags(markup)
            }
        }
    } else {
        markup.to_string()
    };
    tidy(&text)
}

/// Phonetic lines use `|` as an extra line separator.
pub fn phonetic_display_text(markup: &str) -> String {
    display_text(markup)
        .split('|')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_tags(markup: &str) -> String {
    let with_breaks = BREAK_TAG.replace_all(markup, "\n");
    ANY_TAG
        .replace_all(&with_breaks, "")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
}

fn tidy(text: &str) -> String {
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
        .nfc()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(display_text("Bonjour"), "Bonjour");
    }

    #[test]
    fn line_break_marker_becomes_newline() {
        let text = display_text("Bonjour<br>Merci");
        assert_eq!(text.lines().collect::<Vec<_>>(), vec!["Bonjour", "Merci"]);
    }

    #[test]
    fn decomposed_accents_are_composed() {
        assert_eq!(display_text("ca\u{0301}fe"), "c\u{e1}fe");
    }

    #[test]
    fn fallback_strips_tags() {
        assert_eq!(strip_tags("<i>Oui</i><br/>non &amp; si"), "Oui\nnon & si");
    }

    #[test]
    fn phonetic_pipes_split_lines() {
        assert_eq!(phonetic_display_text("bɔ̃.ʒuʁ | mɛʁ.si"), "bɔ̃.ʒuʁ\nmɛʁ.si");
    }
}
