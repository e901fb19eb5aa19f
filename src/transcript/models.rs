//! Data models for parsed transcripts.

use super::TimeCode;
use serde::{Deserialize, Serialize};

/// Structural family of a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptFormat {
    Lrc,
    Srt,
}

impl std::str::FromStr for TranscriptFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lrc" => Ok(TranscriptFormat::Lrc),
            "srt" | "subrip" => Ok(TranscriptFormat::Srt),
            _ => Err(format!("Unknown transcript format: {}. Use lrc or srt.", s)),
        }
    }
}

impl std::fmt::Display for TranscriptFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranscriptFormat::Lrc => write!(f, "lrc"),
            TranscriptFormat::Srt => write!(f, "srt"),
        }
    }
}

/// Half-open range of zero-based rows, relative to the first row of the
/// transcript text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSpan {
    pub start: usize,
    pub end: usize,
}

impl RowSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Number of rows covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Shift the span by an absolute row offset.
    pub fn offset(&self, rows: usize) -> Self {
        Self::new(self.start + rows, self.end + rows)
    }
}

/// One parsed transcript entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineModel {
    /// Start of the entry. `None` for untimed content.
    pub timestamp: Option<TimeCode>,
    /// Normalized `mm:ss` label of `timestamp`.
    pub label: Option<String>,
    /// Display text, trimmed.
    pub text: String,
    /// Rows of the source text this entry was read from.
    pub rows: RowSpan,
    /// End time (SRT only, never used for synchronization).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<TimeCode>,
    /// Cue sequence number (SRT only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u64>,
}

impl LineModel {
    /// Create a timed entry; the label is derived from the timestamp.
    pub fn timed(timestamp: TimeCode, text: String, rows: RowSpan) -> Self {
        Self {
            timestamp: Some(timestamp),
            label: Some(timestamp.label()),
            text,
            rows,
            end: None,
            sequence: None,
        }
    }

    /// Create an entry without a timestamp.
    pub fn untimed(text: String, rows: RowSpan) -> Self {
        Self {
            timestamp: None,
            label: None,
            text,
            rows,
            end: None,
            sequence: None,
        }
    }

    pub fn is_timed(&self) -> bool {
        self.timestamp.is_some()
    }
}

/// A parsed transcript: leading header blob plus ordered lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Detected format, `None` for opaque content.
    pub format: Option<TranscriptFormat>,
    /// Content preceding the first recognized token.
    pub header: String,
    /// Rows consumed by the header.
    pub header_rows: usize,
    /// Entries in parse order.
    pub lines: Vec<LineModel>,
}

impl Document {
    /// Content no parser recognized. Shown as-is, never synchronized.
    pub fn opaque(content: &str) -> Self {
        Self {
            format: None,
            header: content.to_string(),
            header_rows: RowIndex::new(content).row_count(),
            lines: Vec::new(),
        }
    }

    pub fn is_opaque(&self) -> bool {
        self.format.is_none()
    }

    /// Lines carrying a timestamp, with their index in `lines`.
    pub fn timed_lines(&self) -> impl Iterator<Item = (usize, &LineModel)> {
        self.lines.iter().enumerate().filter(|(_, l)| l.is_timed())
    }

    /// Whether any line can take part in synchronization.
    pub fn is_synchronizable(&self) -> bool {
        !self.is_opaque() && self.timed_lines().next().is_some()
    }

    /// Timestamp of the last timed line.
    pub fn duration(&self) -> Option<TimeCode> {
        self.lines.iter().filter_map(|l| l.timestamp).max()
    }
}

/// Byte offset to row lookup over a source text.
#[derive(Debug, Clone)]
pub(crate) struct RowIndex {
    newlines: Vec<usize>,
}

impl RowIndex {
    pub(crate) fn new(text: &str) -> Self {
        Self {
            newlines: text
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i)
                .collect(),
        }
    }

    /// Row containing the byte at `offset`.
    pub(crate) fn row_of(&self, offset: usize) -> usize {
        self.newlines.partition_point(|&nl| nl < offset)
    }

    /// Rows in the text, counting a trailing partial row.
    pub(crate) fn row_count(&self) -> usize {
        self.newlines.len() + 1
    }

    /// Rows covered by the trimmed content of `text[start..end]`.
    ///
    /// An all-whitespace slice yields an empty span at the row holding
    /// `start`.
    pub(crate) fn content_span(&self, text: &str, start: usize, end: usize) -> RowSpan {
        let slice = &text[start..end];
        let trimmed_end = slice.trim_end();
        let trimmed = trimmed_end.trim_start();
        if trimmed.is_empty() {
            let row = self.row_of(start);
            return RowSpan::new(row, row);
        }

        let first = start + (trimmed_end.len() - trimmed.len());
        let last = start + trimmed_end.len() - 1;
        RowSpan::new(self.row_of(first), self.row_of(last) + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_index() {
        let text = "a\nbb\n\nccc";
        let index = RowIndex::new(text);
        assert_eq!(index.row_count(), 4);
        assert_eq!(index.row_of(0), 0);
        assert_eq!(index.row_of(1), 0); // the newline itself
        assert_eq!(index.row_of(2), 1);
        assert_eq!(index.row_of(6), 3);
    }

    #[test]
    fn test_content_span() {
        let text = "x\n  hello\n world \n\n";
        let index = RowIndex::new(text);
        let span = index.content_span(text, 1, text.len());
        assert_eq!(span, RowSpan::new(1, 3));

        let blank = index.content_span(text, 17, text.len());
        assert!(blank.is_empty());
    }

    #[test]
    fn test_opaque_document() {
        let doc = Document::opaque("just\nnotes");
        assert!(doc.is_opaque());
        assert!(!doc.is_synchronizable());
        assert_eq!(doc.header_rows, 2);
        assert!(doc.lines.is_empty());
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("LRC".parse::<TranscriptFormat>().unwrap(), TranscriptFormat::Lrc);
        assert_eq!("subrip".parse::<TranscriptFormat>().unwrap(), TranscriptFormat::Srt);
        assert!("vtt".parse::<TranscriptFormat>().is_err());
    }
}
