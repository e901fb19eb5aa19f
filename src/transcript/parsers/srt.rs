//! SubRip (SRT) parser.
//!
//! Tokenizes on cue headers: a sequence number row followed by a
//! `hh:mm:ss,mmm --> hh:mm:ss,mmm` timing row. Only the start time drives
//! synchronization; the sequence number and end time are kept for display.

use super::FormatParser;
use crate::transcript::models::RowIndex;
use crate::transcript::{Document, LineModel, RowSpan, TimeCode, TranscriptFormat};
use regex::Regex;
use tracing::warn;

/// SRT transcript parser.
pub struct SrtParser {
    cue_regex: Regex,
}

impl SrtParser {
    pub fn new() -> Self {
        let cue_regex = Regex::new(
            r"(?m)^(\d+)[ \t]*\r?\n(\d+):(\d{2}):(\d{2}),(\d{3}) --> (\d+:\d{2}:\d{2},\d{3})",
        )
        .expect("Invalid regex");

        Self { cue_regex }
    }
}

impl Default for SrtParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatParser for SrtParser {
    fn format(&self) -> TranscriptFormat {
        TranscriptFormat::Srt
    }

    fn score(&self, content: &str) -> usize {
        self.cue_regex.find_iter(content).count()
    }

    fn parse(&self, content: &str) -> Document {
        let rows = RowIndex::new(content);
        let cues: Vec<_> = self.cue_regex.captures_iter(content).collect();

        let header_end = cues
            .first()
            .and_then(|c| c.get(0))
            .map_or(content.len(), |m| m.start());

        let mut lines = Vec::with_capacity(cues.len());

        for (i, caps) in cues.iter().enumerate() {
            let Some(header) = caps.get(0) else { continue };
            let block_end = cues
                .get(i + 1)
                .and_then(|c| c.get(0))
                .map_or(content.len(), |m| m.start());

            // Anything after the end stamp on the timing row (cue settings)
            // is not part of the body.
            let body_start = content[header.end()..block_end]
                .find('\n')
                .map_or(block_end, |nl| header.end() + nl + 1);

            let text = content[body_start..block_end].trim().to_string();

            let timing_row = rows.row_of(header.end());
            let span = if text.is_empty() {
                RowSpan::new(timing_row + 1, timing_row + 1)
            } else {
                rows.content_span(content, body_start, block_end)
            };

            let start = TimeCode::from_srt_parts(&caps[2], &caps[3], &caps[4], &caps[5]);
            let mut line = match start {
                Ok(ts) => LineModel::timed(ts, text, span),
                Err(e) => {
                    warn!("Row {}: {}; keeping the cue untimed", timing_row + 1, e);
                    LineModel::untimed(text, span)
                }
            };

            line.sequence = caps[1].parse().ok();
            line.end = match TimeCode::parse_srt(&caps[6]) {
                Ok(end) => Some(end),
                Err(e) => {
                    warn!("Row {}: bad end time: {}", timing_row + 1, e);
                    None
                }
            };

            lines.push(line);
        }

        Document {
            format: Some(TranscriptFormat::Srt),
            header: content[..header_end].to_string(),
            header_rows: rows.row_of(header_end),
            lines,
        }
    }
}
