//! Transcript module for lrcsync.
//!
//! Parses timestamped transcript text into ordered, timed lines.
//!
//! # Formats
//!
//! - **LRC**: `[mm:ss.xx]` markers, optionally with an hours field.
//! - **SRT**: numbered SubRip cues with `hh:mm:ss,mmm` start/end stamps.
//!
//! Use [`parse_document`] to pick the format automatically.

mod models;
pub mod parsers;
mod timecode;

pub use models::{Document, LineModel, RowSpan, TranscriptFormat};
pub use parsers::{detect, parse_document, scores, FormatParser, LrcParser, SrtParser};
pub use timecode::TimeCode;
