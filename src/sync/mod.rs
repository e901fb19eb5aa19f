//! Playback synchronization for lyrics views.
//!
//! A [`SyncIndex`] maps playback time to the active entry. A
//! [`PlaybackSynchronizer`] turns time updates into highlight, scroll and
//! pause effects against a [`Player`] and a [`LyricsView`].

mod search;
mod synchronizer;

pub use search::{find_active, SyncIndex};
pub use synchronizer::{
    on_play, on_time_update, PlaybackSynchronizer, SyncEffect, SyncOptions, SyncState,
};

use crate::transcript::TimeCode;

/// A media player the synchronizer can drive.
pub trait Player: Send {
    fn play(&mut self);

    fn pause(&mut self);

    fn seek(&mut self, to: TimeCode);

    fn current_time(&self) -> TimeCode;

    fn is_playing(&self) -> bool;
}

/// A rendered list of transcript lines, addressed by document line index.
pub trait LyricsView: Send {
    fn highlight(&mut self, line: usize);

    fn unhighlight(&mut self, line: usize);

    fn scroll_to_center(&mut self, line: usize);
}
