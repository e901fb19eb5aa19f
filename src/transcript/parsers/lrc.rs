//! LRC parser.
//!
//! Tokenizes on bracketed `[hh:]mm:ss[.fraction]` markers. Text before the
//! first marker is header; each marker starts one entry whose text runs up
//! to the next marker, so an entry may span several rows.

use super::FormatParser;
use crate::transcript::models::RowIndex;
use crate::transcript::{Document, LineModel, RowSpan, TimeCode, TranscriptFormat};
use regex::Regex;
use tracing::warn;

/// LRC transcript parser.
pub struct LrcParser {
    marker_regex: Regex,
}

impl LrcParser {
    pub fn new() -> Self {
        let marker_regex =
            Regex::new(r"\[(?:(\d+):)?(\d+):(\d+(?:\.\d+)?)\]").expect("Invalid regex");

        Self { marker_regex }
    }
}

impl Default for LrcParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatParser for LrcParser {
    fn format(&self) -> TranscriptFormat {
        TranscriptFormat::Lrc
    }

    fn score(&self, content: &str) -> usize {
        self.marker_regex.find_iter(content).count()
    }

    fn parse(&self, content: &str) -> Document {
        let rows = RowIndex::new(content);
        let markers: Vec<_> = self.marker_regex.captures_iter(content).collect();

        let header_end = markers
            .first()
            .and_then(|c| c.get(0))
            .map_or(content.len(), |m| m.start());

        let mut lines = Vec::with_capacity(markers.len());

        for (i, caps) in markers.iter().enumerate() {
            let Some(marker) = caps.get(0) else { continue };
            let text_end = markers
                .get(i + 1)
                .and_then(|c| c.get(0))
                .map_or(content.len(), |m| m.start());

            let text = content[marker.end()..text_end].trim().to_string();

            // The entry owns its marker row plus every row its text reaches.
            let marker_row = rows.row_of(marker.start());
            let body = rows.content_span(content, marker.end(), text_end);
            let span = if text.is_empty() {
                RowSpan::new(marker_row, marker_row + 1)
            } else {
                RowSpan::new(marker_row, body.end)
            };

            let timestamp = TimeCode::from_lrc_parts(
                caps.get(1).map(|m| m.as_str()),
                &caps[2],
                &caps[3],
            );

            let line = match timestamp {
                Ok(ts) => LineModel::timed(ts, text, span),
                Err(e) => {
                    warn!("Row {}: {}; keeping the line untimed", marker_row + 1, e);
                    LineModel::untimed(text, span)
                }
            };
            lines.push(line);
        }

        Document {
            format: Some(TranscriptFormat::Lrc),
            header: content[..header_end].to_string(),
            header_rows: rows.row_of(header_end),
            lines,
        }
    }
}
