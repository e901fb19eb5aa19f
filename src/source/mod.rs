//! Where a transcript lives: the note block holding it, the media file it
//! follows, and the mapping from parsed rows back to note positions.

mod block;
mod media;
mod offset;

pub use block::{BlockReader, NoteBlock, TranscriptBlock};
pub use media::{resolve, MediaKind, MediaSource};
pub use offset::{resolve_selection, Position, SourceOffsetMapper, SourceRange};

/// Default fence opening a transcript block.
pub const DEFAULT_MARKER: &str = "```lrc";
