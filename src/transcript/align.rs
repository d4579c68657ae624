use super::srt::Cue;
use tracing::warn;

/// A source cue paired positionally with its translation and phonetic line.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedSubtitle {
    pub id: u32,
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub source_text: String,
    pub target_text: String,
    pub phonetic_text: String,
}

impl AlignedSubtitle {
    pub fn contains(&self, seconds: f64) -> bool {
        seconds >= self.start_seconds && seconds < self.end_seconds
    }
}

/// Zip cues by index. The source list decides the length and timing; missing
/// target lines become empty text and missing phonetic lines the placeholder.
pub fn align_subtitles(
    source: &[Cue],
    target: &[Cue],
    phonetic: &[Cue],
    phonetic_placeholder: &str,
) -> Vec<AlignedSubtitle> {
    if source.len() != target.len() {
        warn!(
            source = source.len(),
            target = target.len(),
            "Source and target cue counts differ; alignment is positional"
        );
    }
    if !phonetic.is_empty() && phonetic.len() != source.len() {
        warn!(
            source = source.len(),
            phonetic = phonetic.len(),
            "Source and phonetic cue counts differ; alignment is positional"
        );
    }

    source
        .iter()
        .enumerate()
        .map(|(idx, cue)| AlignedSubtitle {
            id: cue.id,
            start_seconds: cue.start_seconds,
            end_seconds: cue.end_seconds,
            source_text: cue.text.clone(),
            target_text: target
                .get(idx)
                .map(|other| other.text.clone())
                .unwrap_or_default(),
            phonetic_text: phonetic
                .get(idx)
                .map(|p| p.text.clone())
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| phonetic_placeholder.to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cue(id: u32, start: f64, end: f64, text: &str) -> Cue {
        Cue {
            id,
            start_seconds: start,
            end_seconds: end,
            text: text.to_string(),
        }
    }

    #[test]
    fn zips_by_position_not_id() {
        let source = vec![cue(1, 0.0, 1.0, "Bonjour"), cue(2, 1.0, 2.0, "Merci")];
        let target = vec![cue(7, 5.0, 6.0, "Olá"), cue(8, 6.0, 7.0, "Obrigado")];
        let aligned = align_subtitles(&source, &target, &[], "n/a");
        assert_eq!(aligned.len(), 2);
        assert_eq!(aligned[1].id, 2);
        assert_eq!(aligned[1].start_seconds, 1.0);
        assert_eq!(aligned[1].target_text, "Obrigado");
    }

    #[test]
    fn missing_entries_degrade_to_placeholders() {
        let source = vec![cue(1, 0.0, 1.0, "Un"), cue(2, 1.0, 2.0, "Deux")];
        let target = vec![cue(1, 0.0, 1.0, "One")];
        let phonetic = vec![cue(1, 0.0, 1.0, "œ̃")];
        let aligned = align_subtitles(&source, &target, &phonetic, "none");
        assert_eq!(aligned[1].target_text, "");
        assert_eq!(aligned[1].phonetic_text, "none");
        assert_eq!(aligned[0].phonetic_text, "œ̃");
    }

    #[test]
    fn length_follows_source() {
        let source = vec![cue(1, 0.0, 1.0, "Un")];
        let target = vec![cue(1, 0.0, 1.0, "One"), cue(2, 1.0, 2.0, "Two")];
        assert_eq!(align_subtitles(&source, &target, &[], "-").len(), 1);
        assert!(align_subtitles(&[], &target, &[], "-").is_empty());
    }
}
