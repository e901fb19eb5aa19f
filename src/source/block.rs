//! Transcript blocks embedded in markdown notes.

use regex::Regex;
use serde::Serialize;

/// Body of a transcript block, split into the optional media directive and
/// the transcript text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptBlock {
    /// Path named by a leading `source <path>` row.
    pub media: Option<String>,
    /// Transcript text following the directive.
    pub text: String,
}

impl TranscriptBlock {
    pub fn has_directive(&self) -> bool {
        self.media.is_some()
    }
}

/// A transcript block located inside a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteBlock {
    /// Zero-based row of the opening marker.
    pub marker_row: usize,
    /// Zero-based row of the closing fence, if the block is closed.
    pub closing_row: Option<usize>,
    pub block: TranscriptBlock,
}

impl NoteBlock {
    /// Absolute row of the first transcript row, after the marker and the
    /// media directive.
    pub fn transcript_row(&self) -> usize {
        self.marker_row + 1 + usize::from(self.block.has_directive())
    }
}

/// Finds transcript blocks and splits off their media directive.
pub struct BlockReader {
    marker: String,
    directive_regex: Regex,
}

impl BlockReader {
    pub fn new(marker: impl Into<String>) -> Self {
        let directive_regex = Regex::new(r"(?i)^source[ \t]+(.*)$").expect("Invalid regex");

        Self {
            marker: marker.into(),
            directive_regex,
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Split a block body into directive and transcript.
    ///
    /// Only the first row is checked for a directive.
    pub fn split(&self, body: &str) -> TranscriptBlock {
        let (first, rest) = match body.split_once('\n') {
            Some((first, rest)) => (first, rest),
            None => (body, ""),
        };

        let media = self
            .directive_regex
            .captures(first.trim_end_matches('\r'))
            .map(|caps| caps[1].trim().to_string())
            .filter(|path| !path.is_empty());

        match media {
            Some(path) => TranscriptBlock {
                media: Some(path),
                text: rest.to_string(),
            },
            None => TranscriptBlock {
                media: None,
                text: body.to_string(),
            },
        }
    }

    /// Extract the first transcript block of a note.
    ///
    /// Later blocks are ignored. An unclosed block runs to the end of the
    /// note.
    pub fn extract(&self, note: &str) -> Option<NoteBlock> {
        let rows: Vec<&str> = note.split('\n').collect();
        let marker_row = rows
            .iter()
            .position(|row| row.trim().starts_with(self.marker.as_str()))?;

        let closing_row = rows
            .iter()
            .enumerate()
            .skip(marker_row + 1)
            .find(|(_, row)| row.trim_end_matches('\r').trim() == "```")
            .map(|(i, _)| i);

        let body_end = closing_row.unwrap_or(rows.len());
        let body = rows
            .get(marker_row + 1..body_end)
            .map(|body| body.join("\n"))
            .unwrap_or_default();

        Some(NoteBlock {
            marker_row,
            closing_row,
            block: self.split(&body),
        })
    }
}

impl Default for BlockReader {
    fn default() -> Self {
        Self::new(super::DEFAULT_MARKER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOTE: &str = "# Song\n\nSome notes.\n\n```lrc\nsource audio/song.mp3\n[00:01]One\n[00:02]Two\n```\n\nAfter.\n";

    #[test]
    fn test_split_directive() {
        let reader = BlockReader::default();
        let block = reader.split("Source ~/music/a.flac\n[00:01]Hi");

        assert_eq!(block.media.as_deref(), Some("~/music/a.flac"));
        assert_eq!(block.text, "[00:01]Hi");
    }

    #[test]
    fn test_split_without_directive() {
        let reader = BlockReader::default();
        let block = reader.split("[00:01]Hi\nsource not-first.mp3");

        assert_eq!(block.media, None);
        assert_eq!(block.text, "[00:01]Hi\nsource not-first.mp3");
    }

    #[test]
    fn test_split_bare_keyword_is_not_a_directive() {
        let reader = BlockReader::default();
        assert_eq!(reader.split("source \n[00:01]Hi").media, None);
        assert_eq!(reader.split("sourced.mp3").media, None);
    }

    #[test]
    fn test_extract_first_block() {
        let reader = BlockReader::default();
        let found = reader.extract(NOTE).unwrap();

        assert_eq!(found.marker_row, 4);
        assert_eq!(found.closing_row, Some(8));
        assert_eq!(found.block.media.as_deref(), Some("audio/song.mp3"));
        assert_eq!(found.block.text, "[00:01]One\n[00:02]Two");
        assert_eq!(found.transcript_row(), 6);
    }

    #[test]
    fn test_extract_ignores_later_blocks() {
        let reader = BlockReader::default();
        let note = "```lrc\n[00:01]first\n```\n```lrc\n[00:09]second\n```";
        let found = reader.extract(note).unwrap();

        assert_eq!(found.marker_row, 0);
        assert_eq!(found.block.text, "[00:01]first");
        assert_eq!(found.transcript_row(), 1);
    }

    #[test]
    fn test_extract_unclosed_and_missing() {
        let reader = BlockReader::new("```subs");
        let found = reader.extract("intro\n```subs\n1\n00:00:01,000 --> 00:00:02,000\nHi").unwrap();
        assert_eq!(found.closing_row, None);
        assert_eq!(found.block.text, "1\n00:00:01,000 --> 00:00:02,000\nHi");

        assert!(reader.extract("no blocks here").is_none());
    }
}
