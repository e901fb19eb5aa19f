//! Maps transcript row spans back to positions in the containing note.
//!
//! Only the first occurrence of the block marker is considered. A note with
//! several transcript blocks resolves every span against the first one.

use crate::error::{LrcsyncError, Result};
use crate::transcript::RowSpan;
use serde::Serialize;

/// Zero-based line and column in a note.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A selection in a note. `from == to` is a collapsed cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceRange {
    pub from: Position,
    pub to: Position,
}

impl SourceRange {
    pub fn cursor(at: Position) -> Self {
        Self { from: at, to: at }
    }

    pub fn is_collapsed(&self) -> bool {
        self.from == self.to
    }
}

impl std::fmt::Display for SourceRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.from.line + 1,
            self.from.column,
            self.to.line + 1,
            self.to.column
        )
    }
}

/// Translates relative row spans into absolute note positions.
#[derive(Debug, Clone)]
pub struct SourceOffsetMapper {
    /// Absolute row of the first transcript row.
    body_start: usize,
    /// Character length of every row of the note.
    row_lengths: Vec<usize>,
}

impl SourceOffsetMapper {
    /// Anchor the mapper on the first row starting with `marker`.
    ///
    /// The transcript begins on the next row, or one row later when the block
    /// opens with a media directive.
    pub fn locate(document: &str, marker: &str, has_directive: bool) -> Result<Self> {
        let marker_row = document
            .split('\n')
            .position(|row| row.trim().starts_with(marker))
            .ok_or_else(|| {
                LrcsyncError::OutOfRangeOffset(format!("Block marker {} not found", marker))
            })?;

        Ok(Self {
            body_start: marker_row + 1 + usize::from(has_directive),
            row_lengths: row_lengths(document),
        })
    }

    /// Mapper for a document that is the transcript itself.
    pub fn whole(document: &str) -> Self {
        Self {
            body_start: 0,
            row_lengths: row_lengths(document),
        }
    }

    /// Absolute row of the first transcript row.
    pub fn body_start(&self) -> usize {
        self.body_start
    }

    /// Absolute rows covered by a span.
    pub fn rows(&self, span: RowSpan) -> RowSpan {
        span.offset(self.body_start)
    }

    /// Selection covering the whole rows of `span`.
    pub fn select(&self, span: RowSpan) -> Result<SourceRange> {
        let rows = self.rows(span);
        let out_of_range = || {
            LrcsyncError::OutOfRangeOffset(format!(
                "Rows {}..{} past the end of the note ({} rows)",
                rows.start,
                rows.end,
                self.row_lengths.len()
            ))
        };

        if rows.is_empty() {
            if rows.start >= self.row_lengths.len() {
                return Err(out_of_range());
            }
            return Ok(SourceRange::cursor(Position::new(rows.start, 0)));
        }

        let last = rows.end - 1;
        let width = *self.row_lengths.get(last).ok_or_else(out_of_range)?;

        Ok(SourceRange {
            from: Position::new(rows.start, 0),
            to: Position::new(last, width),
        })
    }

    /// Like [`select`](Self::select), falling back to a cursor at the first
    /// transcript row.
    pub fn select_or_default(&self, span: RowSpan) -> SourceRange {
        self.select(span).unwrap_or_else(|e| {
            tracing::debug!("{}; placing cursor at the block start", e);
            SourceRange::cursor(Position::new(self.default_row(), 0))
        })
    }

    fn default_row(&self) -> usize {
        self.body_start.min(self.row_lengths.len().saturating_sub(1))
    }
}

fn row_lengths(document: &str) -> Vec<usize> {
    document
        .split('\n')
        .map(|row| row.trim_end_matches('\r').chars().count())
        .collect()
}

/// Locate and select in one step. A missing marker places the cursor at the
/// top of the note.
pub fn resolve_selection(
    document: &str,
    marker: &str,
    has_directive: bool,
    span: RowSpan,
) -> SourceRange {
    match SourceOffsetMapper::locate(document, marker, has_directive) {
        Ok(mapper) => mapper.select_or_default(span),
        Err(e) => {
            tracing::debug!("{}; placing cursor at the top", e);
            SourceRange::cursor(Position::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOTE: &str = "# Title\n\n```lrc\nsource a.mp3\n[00:01]One\n[00:02]Two\nand more\n```\n";

    #[test]
    fn test_locate_with_directive() {
        let mapper = SourceOffsetMapper::locate(NOTE, "```lrc", true).unwrap();
        assert_eq!(mapper.body_start(), 4);

        let mapper = SourceOffsetMapper::locate(NOTE, "```lrc", false).unwrap();
        assert_eq!(mapper.body_start(), 3);
    }

    #[test]
    fn test_select_rows() {
        let mapper = SourceOffsetMapper::locate(NOTE, "```lrc", true).unwrap();

        let range = mapper.select(RowSpan::new(1, 3)).unwrap();
        assert_eq!(range.from, Position::new(5, 0));
        assert_eq!(range.to, Position::new(6, "and more".len()));
        assert_eq!(range.to_string(), "6:0-7:8");
    }

    #[test]
    fn test_empty_span_is_a_cursor() {
        let mapper = SourceOffsetMapper::locate(NOTE, "```lrc", false).unwrap();
        let range = mapper.select(RowSpan::new(2, 2)).unwrap();
        assert!(range.is_collapsed());
        assert_eq!(range.from, Position::new(5, 0));
    }

    #[test]
    fn test_span_past_end() {
        let mapper = SourceOffsetMapper::locate(NOTE, "```lrc", true).unwrap();
        let err = mapper.select(RowSpan::new(20, 21)).unwrap_err();
        assert!(matches!(err, LrcsyncError::OutOfRangeOffset(_)));

        let fallback = mapper.select_or_default(RowSpan::new(20, 21));
        assert_eq!(fallback, SourceRange::cursor(Position::new(4, 0)));
    }

    #[test]
    fn test_missing_marker() {
        let err = SourceOffsetMapper::locate("plain text", "```lrc", false).unwrap_err();
        assert!(matches!(err, LrcsyncError::OutOfRangeOffset(_)));

        let range = resolve_selection("plain text", "```lrc", false, RowSpan::new(0, 1));
        assert_eq!(range, SourceRange::cursor(Position::default()));
    }

    #[test]
    fn test_whole_document_maps_rows_directly() {
        let content = "[ti:Song]\n[00:01]One\n[00:02]Two\nand more\n";
        let doc = crate::transcript::parse_document(content);
        let mapper = SourceOffsetMapper::whole(content);
        assert_eq!(mapper.body_start(), 0);

        let range = mapper.select(doc.lines[1].rows).unwrap();
        assert_eq!(range.to_string(), "3:0-4:8");

        let fallback = mapper.select_or_default(RowSpan::new(9, 10));
        assert_eq!(fallback, SourceRange::cursor(Position::new(0, 0)));
    }

    #[test]
    fn test_parsed_rows_map_to_note_rows() {
        let reader = crate::source::BlockReader::default();
        let block = reader.extract(NOTE).unwrap();
        let doc = crate::transcript::parse_document(&block.block.text);
        let mapper =
            SourceOffsetMapper::locate(NOTE, "```lrc", block.block.has_directive()).unwrap();
        let rows: Vec<&str> = NOTE.lines().collect();

        for line in &doc.lines {
            let range = mapper.select(line.rows).unwrap();
            assert!(rows[range.from.line].contains(line.label.as_deref().unwrap()));
        }
        assert_eq!(mapper.body_start(), block.transcript_row());
    }
}
