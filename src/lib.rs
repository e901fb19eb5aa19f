//! lrcsync - lyrics that follow the audio
//!
//! Parses timestamped transcripts and keeps a rendered view in step with an
//! external playback clock.
//!
//! # Overview
//!
//! - Parse LRC (`[mm:ss.xx]`) and SRT (SubRip) transcripts, picking the
//!   format by counting the timestamps each one recognizes
//! - Find the line active at any playback time
//! - Drive highlight, scroll and sentence-mode pause effects from player
//!   time updates
//! - Map every parsed line back to the rows of the note it came from
//!
//! # Architecture
//!
//! - `transcript` - Timecodes, line models, format parsers and dispatch
//! - `sync` - Interval search and the highlight state machine
//! - `source` - Note blocks, media directives and source offsets
//! - `render` - Per-line rendering assembled in document order
//! - `session` - One view bound to one player, fed by an event channel
//! - `config` - Settings file
//!
//! # Example
//!
//! ```rust
//! use lrcsync::sync::SyncIndex;
//! use lrcsync::transcript::{parse_document, TimeCode};
//!
//! let document = parse_document("[00:01.00]Hello\n[00:03.50]World");
//! let index = SyncIndex::from_document(&document);
//!
//! let entry = index.find(TimeCode::from_millis(2000)).unwrap();
//! assert_eq!(document.lines[index.lines_of(entry)[0]].text, "Hello");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod render;
pub mod session;
pub mod source;
pub mod sync;
pub mod transcript;

pub use error::{LrcsyncError, Result};
