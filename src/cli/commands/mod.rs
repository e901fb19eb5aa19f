//! CLI command implementations.

mod at;
mod config;
mod detect;
mod follow;
mod locate;
mod show;

pub use at::run_at;
pub use config::run_config;
pub use detect::run_detect;
pub use follow::run_follow;
pub use locate::run_locate;
pub use show::run_show;

use crate::config::Settings;
use crate::source::{BlockReader, NoteBlock};
use crate::transcript::{parse_document, Document, TimeCode};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A transcript read from disk, either a whole file or a block of a note.
pub(crate) struct LoadedTranscript {
    pub path: PathBuf,
    /// Full file content.
    pub content: String,
    /// The note block, when the transcript came from one.
    pub block: Option<NoteBlock>,
    pub document: Document,
}

impl LoadedTranscript {
    /// Absolute file row of the first transcript row.
    pub fn first_row(&self) -> usize {
        self.block.as_ref().map_or(0, |b| b.transcript_row())
    }

    pub fn media_directive(&self) -> Option<&str> {
        self.block.as_ref().and_then(|b| b.block.media.as_deref())
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.path.parent()
    }

    /// `rows a-b` label for a line, in one-based file rows.
    pub fn rows_label(&self, line: usize) -> String {
        let Some(model) = self.document.lines.get(line) else {
            return String::new();
        };
        let rows = model.rows.offset(self.first_row());
        if rows.len() <= 1 {
            format!("[{}]", rows.start + 1)
        } else {
            format!("[{}-{}]", rows.start + 1, rows.end)
        }
    }
}

/// Read a transcript file or the first transcript block of a note.
pub(crate) fn load_transcript(file: &str, settings: &Settings) -> Result<LoadedTranscript> {
    let path = Settings::expand_path(file);
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let reader = BlockReader::new(settings.document.block_marker.as_str());
    let block = reader.extract(&content);

    let document = match &block {
        Some(found) => {
            debug!(
                "Transcript block at row {} of {}",
                found.marker_row + 1,
                path.display()
            );
            parse_document(&found.block.text)
        }
        None => parse_document(&content),
    };

    Ok(LoadedTranscript {
        path,
        content,
        block,
        document,
    })
}

/// Parse a playback time argument.
pub(crate) fn parse_time(input: &str) -> Result<TimeCode> {
    input
        .parse::<TimeCode>()
        .map_err(|e| anyhow::anyhow!("Invalid time {:?}: {}", input, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_note_block() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.md");
        std::fs::write(
            &path,
            "# Song\n```lrc\nsource song.mp3\n[00:01]One\n[00:02]Two\n```\n",
        )
        .unwrap();

        let loaded = load_transcript(path.to_str().unwrap(), &Settings::default()).unwrap();
        assert_eq!(loaded.document.lines.len(), 2);
        assert_eq!(loaded.media_directive(), Some("song.mp3"));
        assert_eq!(loaded.first_row(), 3);
        assert_eq!(loaded.rows_label(1), "[5]");
        assert_eq!(loaded.base_dir(), Some(dir.path()));
    }

    #[test]
    fn test_load_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.lrc");
        std::fs::write(&path, "[ti:x]\n[00:01]One\n").unwrap();

        let loaded = load_transcript(path.to_str().unwrap(), &Settings::default()).unwrap();
        assert!(loaded.block.is_none());
        assert_eq!(loaded.rows_label(0), "[2]");
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("01:02.5").unwrap(), TimeCode::from_millis(62_500));
        assert!(parse_time("soon").is_err());
    }
}
