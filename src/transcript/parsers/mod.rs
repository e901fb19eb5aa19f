//! Transcript format parsers and the dispatcher choosing between them.
//!
//! Every registered format scores the content by counting the timestamp
//! tokens it recognizes. The strictly highest score wins and the
//! first-registered format wins ties. When every score is zero the content
//! is opaque: it is shown as-is and never synchronized.

mod lrc;
mod srt;

pub use lrc::LrcParser;
pub use srt::SrtParser;

use super::{Document, TranscriptFormat};
use std::sync::LazyLock;
use tracing::{debug, warn};

/// A transcript format: scoring plus tokenizing.
///
/// Implementations are pure functions of the input text.
pub trait FormatParser: Send + Sync {
    /// The format this parser reads.
    fn format(&self) -> TranscriptFormat;

    /// Confidence score: the number of timestamp tokens recognized.
    fn score(&self, content: &str) -> usize;

    /// Split the content into a header blob and ordered lines.
    fn parse(&self, content: &str) -> Document;
}

static REGISTRY: LazyLock<Vec<Box<dyn FormatParser>>> =
    LazyLock::new(|| vec![Box::new(LrcParser::new()), Box::new(SrtParser::new())]);

/// All registered parsers, in priority order.
pub fn registry() -> &'static [Box<dyn FormatParser>] {
    &REGISTRY
}

/// The registered parser for a format.
pub fn parser_for(format: TranscriptFormat) -> Option<&'static dyn FormatParser> {
    registry()
        .iter()
        .find(|p| p.format() == format)
        .map(|p| p.as_ref())
}

/// Score of every registered format, in registry order.
pub fn scores(content: &str) -> Vec<(TranscriptFormat, usize)> {
    registry()
        .iter()
        .map(|p| (p.format(), p.score(content)))
        .collect()
}

/// Pick the parser with the strictly highest non-zero score.
pub fn detect(content: &str) -> Option<(&'static dyn FormatParser, usize)> {
    let mut best: Option<(&'static dyn FormatParser, usize)> = None;

    for parser in registry() {
        let score = parser.score(content);
        let current = best.map(|(_, s)| s).unwrap_or(0);
        if score > current {
            best = Some((parser.as_ref(), score));
        }
    }

    best
}

/// Parse content with the best-scoring format, or return it as opaque.
pub fn parse_document(content: &str) -> Document {
    let Some((parser, score)) = detect(content) else {
        debug!("No transcript format recognized, rendering as-is");
        return Document::opaque(content);
    };

    debug!("Detected {} transcript ({} tokens)", parser.format(), score);
    let document = parser.parse(content);
    check_ordering(&document);
    document
}

/// Log when timed lines are not in non-decreasing order.
fn check_ordering(document: &Document) {
    let mut previous = None;
    for (index, line) in document.timed_lines() {
        if let (Some(prev), Some(ts)) = (previous, line.timestamp) {
            if ts < prev {
                warn!(
                    "Line {} starts at {} before the previous line ({}); sync index will be reordered",
                    index, ts, prev
                );
            }
        }
        previous = line.timestamp.or(previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_order() {
        let formats: Vec<_> = registry().iter().map(|p| p.format()).collect();
        assert_eq!(formats, vec![TranscriptFormat::Lrc, TranscriptFormat::Srt]);
        assert!(parser_for(TranscriptFormat::Srt).is_some());
    }

    #[test]
    fn test_detect_lrc() {
        let (parser, score) = detect("[00:01.00]Hello\n[00:03.50]World").unwrap();
        assert_eq!(parser.format(), TranscriptFormat::Lrc);
        assert_eq!(score, 2);
    }

    #[test]
    fn test_detect_srt() {
        let content = "1\n00:00:01,000 --> 00:00:02,000\nHi\n\n2\n00:00:03,000 --> 00:00:04,000\nThere\n";
        let (parser, score) = detect(content).unwrap();
        assert_eq!(parser.format(), TranscriptFormat::Srt);
        assert_eq!(score, 2);
    }

    #[test]
    fn test_highest_score_wins() {
        // one LRC marker inside an SRT body, two SRT cues
        let content = "1\n00:00:01,000 --> 00:00:02,000\n[00:09]quoted\n\n2\n00:00:03,000 --> 00:00:04,000\nThere\n";
        let (parser, _) = detect(content).unwrap();
        assert_eq!(parser.format(), TranscriptFormat::Srt);
    }

    #[test]
    fn test_tie_goes_to_first_registered() {
        let content = "[00:05]lrc line\n\n1\n00:00:01,000 --> 00:00:02,000\nsrt line\n";
        assert_eq!(
            scores(content),
            vec![(TranscriptFormat::Lrc, 1), (TranscriptFormat::Srt, 1)]
        );
        let (parser, _) = detect(content).unwrap();
        assert_eq!(parser.format(), TranscriptFormat::Lrc);
    }

    #[test]
    fn test_unrecognized_is_opaque() {
        let content = "Just some notes.\nNo timestamps here: 12:30 or [bracketed].";
        assert!(scores(content).iter().all(|(_, s)| *s == 0));
        assert!(detect(content).is_none());

        let doc = parse_document(content);
        assert!(doc.is_opaque());
        assert!(doc.lines.is_empty());
        assert_eq!(doc.header, content);
    }

    #[test]
    fn test_empty_content() {
        let doc = parse_document("");
        assert!(doc.is_opaque());
        assert!(doc.lines.is_empty());
    }
}
