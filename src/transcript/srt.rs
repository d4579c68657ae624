//! SRT caption parsing.
//!
//! The parser is a single forward scan with one "cue being built" slot. It is
//! lenient about blank lines and CRLF endings, and never fails: malformed
//! timing lines are reported through `tracing` and the affected cue is kept as
//! a zero-length interval so positional alignment with other languages holds.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

/// Marker used to join multi-line cue text; the text is treated as markup.
pub const LINE_BREAK: &str = "<br>";

static INDEX_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").expect("valid regex"));
static TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(\d+):)?(\d{1,2}):(\d{1,2}(?:[.,]\d+)?)$").expect("valid regex")
});

/// One timed caption entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    pub id: u32,
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub text: String,
}

impl Cue {
    /// Half-open interval test used by the highlight tracker.
    pub fn contains(&self, seconds: f64) -> bool {
        seconds >= self.start_seconds && seconds < self.end_seconds
    }
}

#[derive(Debug)]
enum Timing {
    Missing,
    Malformed,
    Parsed { start: f64, end: f64 },
}

struct PendingCue {
    id: u32,
    timing: Timing,
    text: String,
}

/// Parse an SRT payload into cues in file order.
pub fn parse_srt(raw: &str) -> Vec<Cue> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut cues: Vec<Cue> = Vec::new();
    let mut current: Option<PendingCue> = None;

    for line in raw.lines().map(str::trim) {
        if INDEX_LINE.is_match(line) {
            if let Ok(id) = line.parse::<u32>() {
                if let Some(done) = current.take() {
                    flush(done, &mut cues);
                }
                current = Some(PendingCue {
                    id,
                    timing: Timing::Missing,
                    text: String::new(),
                });
                continue;
            }
        }

        if line.contains("-->") {
            let Some(cue) = current.as_mut() else {
                warn!(line, "Timing line before any cue index; ignoring");
                continue;
            };
            cue.timing = match parse_timing_line(line) {
                Some((start, end)) => Timing::Parsed { start, end },
                None => {
                    warn!(cue = cue.id, line, "Malformed timing line");
                    Timing::Malformed
                }
            };
            continue;
        }

        if line.is_empty() {
            continue;
        }

        if let Some(cue) = current.as_mut() {
            if !cue.text.is_empty() {
                cue.text.push_str(LINE_BREAK);
            }
            cue.text.push_str(line);
        }
    }

    if let Some(done) = current.take() {
        flush(done, &mut cues);
    }
    cues
}

fn flush(pending: PendingCue, cues: &mut Vec<Cue>) {
    let previous_end = cues.last().map(|cue| cue.end_seconds).unwrap_or(0.0);
    let (start_seconds, end_seconds) = match pending.timing {
        Timing::Parsed { start, end } => (start, end.max(start)),
        Timing::Missing => {
            warn!(cue = pending.id, "Cue has no timing line; collapsing to zero length");
            (previous_end, previous_end)
        }
        Timing::Malformed => (previous_end, previous_end),
    };
    cues.push(Cue {
        id: pending.id,
        start_seconds,
        end_seconds,
        text: pending.text,
    });
}

fn parse_timing_line(line: &str) -> Option<(f64, f64)> {
    let (left, right) = line.split_once("-->")?;
    let start = parse_timestamp(left.trim())?;
    // Anything after the end stamp (cue settings) is ignored.
    let end = parse_timestamp(right.split_whitespace().next()?)?;
    Some((start, end))
}

/// `HH:MM:SS,mmm` (or `MM:SS.mmm`) to total seconds.
fn parse_timestamp(raw: &str) -> Option<f64> {
    let caps = TIMESTAMP.captures(raw)?;
    let hours: f64 = match caps.get(1) {
        Some(h) => h.as_str().parse::<u32>().ok()? as f64,
        None => 0.0,
    };
    let minutes = caps.get(2)?.as_str().parse::<u32>().ok()? as f64;
    let seconds = caps.get(3)?.as_str().replace(',', ".").parse::<f64>().ok()?;
    let total = hours * 3600.0 + minutes * 60.0 + seconds;
    total.is_finite().then_some(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "1\n00:00:01,000 --> 00:00:02,500\nBonjour\n\n2\n00:00:02,500 --> 00:00:05,000\nComment ça va ?\nTrès bien.\n\n3\n00:01:00,250 --> 01:00:00,000\nAu revoir\n";

    #[test]
    fn parses_single_cue_scenario() {
        let cues = parse_srt("1\n00:00:01,000 --> 00:00:02,500\nBonjour\n");
        assert_eq!(
            cues,
            vec![Cue {
                id: 1,
                start_seconds: 1.0,
                end_seconds: 2.5,
                text: "Bonjour".to_string(),
            }]
        );
    }

    #[test]
    fn empty_input_yields_no_cues() {
        assert!(parse_srt("").is_empty());
        assert!(parse_srt("\n\n  \n").is_empty());
    }

    #[test]
    fn cue_count_matches_index_lines() {
        let cues = parse_srt(SAMPLE);
        let index_lines = SAMPLE
            .lines()
            .filter(|line| !line.is_empty() && line.chars().all(|c| c.is_ascii_digit()))
            .count();
        assert_eq!(cues.len(), index_lines);
        assert!(cues.iter().all(|cue| cue.start_seconds <= cue.end_seconds));
    }

    #[test]
    fn multi_line_text_is_joined_with_line_break_marker() {
        let cues = parse_srt(SAMPLE);
        assert_eq!(cues[1].text, "Comment ça va ?<br>Très bien.");
    }

    #[test]
    fn hours_and_minutes_convert_to_seconds() {
        let cues = parse_srt(SAMPLE);
        assert!((cues[2].start_seconds - 60.25).abs() < 1e-9);
        assert!((cues[2].end_seconds - 3600.0).abs() < 1e-9);
    }

    #[test]
    fn handles_crlf_and_bom() {
        let cues = parse_srt("\u{feff}1\r\n00:00:00,500 --> 00:00:01,000\r\nSalut\r\n");
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "Salut");
        assert!((cues[0].start_seconds - 0.5).abs() < 1e-9);
    }

    #[test]
    fn malformed_timestamp_collapses_to_previous_end() {
        let cues = parse_srt(
            "1\n00:00:01,000 --> 00:00:02,000\nA\n\n2\n00:xx:03,000 --> 00:00:04,000\nB\n\n3\n00:00:04,000 --> 00:00:05,000\nC\n",
        );
        assert_eq!(cues.len(), 3);
        assert_eq!(cues[1].start_seconds, 2.0);
        assert_eq!(cues[1].end_seconds, 2.0);
        assert!(!cues[1].contains(2.0));
        assert!(cues.iter().all(|cue| cue.start_seconds.is_finite()));
    }

    #[test]
    fn inverted_interval_is_clamped() {
        let cues = parse_srt("1\n00:00:05,000 --> 00:00:04,000\nBackwards\n");
        assert_eq!(cues[0].start_seconds, 5.0);
        assert_eq!(cues[0].end_seconds, 5.0);
    }

    #[test]
    fn text_before_first_index_is_ignored() {
        let cues = parse_srt("WEBVTT\n\n1\n00:00:01.000 --> 00:00:02.000 align:start\nHi\n");
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "Hi");
        assert_eq!(cues[0].end_seconds, 2.0);
    }
}
