//! Highlight transitions driven by playback time.

use super::{LyricsView, Player, SyncIndex};
use crate::transcript::{Document, TimeCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Mode flags for a synchronizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncOptions {
    /// Scroll each newly highlighted line to the center of the view.
    pub auto_scroll: bool,
    /// Pause playback at every line boundary until the user resumes.
    pub sentence_mode: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            auto_scroll: true,
            sentence_mode: false,
        }
    }
}

/// Mutable highlight state of one view.
///
/// `active` and `shown` are index entries, not document lines. They only
/// differ while a sentence-mode pause hides the new highlight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncState {
    /// Entry containing the playback position.
    pub active: Option<usize>,
    /// Entry currently highlighted in the view.
    pub shown: Option<usize>,
    /// Playback was paused at a line boundary and not resumed yet.
    pub paused_for_sentence: bool,
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncEffect {
    Unhighlight(usize),
    Highlight(usize),
    ScrollToCenter(usize),
    PausePlayback,
}

/// Compute the effects of a time update.
///
/// `playing` is whether the player is running when the update arrives.
pub fn on_time_update(
    state: &mut SyncState,
    index: &SyncIndex,
    options: SyncOptions,
    now: TimeCode,
    explicit_seek: bool,
    playing: bool,
) -> Vec<SyncEffect> {
    let candidate = index.find(now);
    if candidate == state.active {
        // a seek onto an entry held back by a sentence pause still shows it
        return if explicit_seek {
            reveal(state, index, options)
        } else {
            Vec::new()
        };
    }

    debug!(
        "Active entry {:?} -> {:?} at {} (seek: {})",
        state.active, candidate, now, explicit_seek
    );

    if options.sentence_mode && playing && state.active.is_some() && !explicit_seek {
        state.active = candidate;
        state.paused_for_sentence = true;
        return vec![SyncEffect::PausePlayback];
    }

    state.active = candidate;
    if state.paused_for_sentence && !explicit_seek {
        return Vec::new();
    }

    reveal(state, index, options)
}

/// Compute the effects of an explicit play action.
///
/// Clears a sentence-mode pause and shows the highlight it held back.
pub fn on_play(state: &mut SyncState, index: &SyncIndex, options: SyncOptions) -> Vec<SyncEffect> {
    state.paused_for_sentence = false;
    reveal(state, index, options)
}

/// Move the visible highlight onto the active entry.
fn reveal(state: &mut SyncState, index: &SyncIndex, options: SyncOptions) -> Vec<SyncEffect> {
    if state.shown == state.active {
        return Vec::new();
    }

    let mut effects = Vec::new();
    if let Some(previous) = state.shown {
        effects.extend(index.lines_of(previous).iter().map(|&l| SyncEffect::Unhighlight(l)));
    }
    if let Some(current) = state.active {
        let lines = index.lines_of(current);
        effects.extend(lines.iter().map(|&l| SyncEffect::Highlight(l)));
        if options.auto_scroll {
            if let Some(&first) = lines.first() {
                effects.push(SyncEffect::ScrollToCenter(first));
            }
        }
    }

    state.shown = state.active;
    effects
}

/// Keeps one view's highlight in step with a player.
#[derive(Debug, Clone)]
pub struct PlaybackSynchronizer {
    index: SyncIndex,
    state: SyncState,
    options: SyncOptions,
}

impl PlaybackSynchronizer {
    pub fn new(index: SyncIndex, options: SyncOptions) -> Self {
        Self {
            index,
            state: SyncState::default(),
            options,
        }
    }

    pub fn for_document(document: &Document, options: SyncOptions) -> Self {
        Self::new(SyncIndex::from_document(document), options)
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Lines of the active entry.
    pub fn active_lines(&self) -> &[usize] {
        self.state.active.map(|entry| self.index.lines_of(entry)).unwrap_or(&[])
    }

    /// Handle a time update from the player.
    pub fn on_time_update(
        &mut self,
        now: TimeCode,
        explicit_seek: bool,
        player: &mut dyn Player,
        view: &mut dyn LyricsView,
    ) {
        let effects = on_time_update(
            &mut self.state,
            &self.index,
            self.options,
            now,
            explicit_seek,
            player.is_playing(),
        );
        apply(&effects, player, view);
    }

    /// Jump the player and update the highlight without waiting for a tick.
    pub fn seek(&mut self, target: TimeCode, player: &mut dyn Player, view: &mut dyn LyricsView) {
        player.seek(target);
        self.on_time_update(target, true, player, view);
    }

    /// Seek to the start of a document line. Returns `false` for untimed
    /// lines, which are left alone.
    pub fn seek_to_line(
        &mut self,
        line: usize,
        player: &mut dyn Player,
        view: &mut dyn LyricsView,
    ) -> bool {
        let Some(target) = self
            .index
            .entry_of_line(line)
            .and_then(|entry| self.index.timestamp_of(entry))
        else {
            return false;
        };

        self.seek(target, player, view);
        true
    }

    /// Explicit play action: start the player and re-arm sentence mode.
    pub fn resume(&mut self, player: &mut dyn Player, view: &mut dyn LyricsView) {
        player.play();
        let effects = on_play(&mut self.state, &self.index, self.options);
        apply(&effects, player, view);
    }
}

fn apply(effects: &[SyncEffect], player: &mut dyn Player, view: &mut dyn LyricsView) {
    for effect in effects {
        match *effect {
            SyncEffect::Unhighlight(line) => view.unhighlight(line),
            SyncEffect::Highlight(line) => view.highlight(line),
            SyncEffect::ScrollToCenter(line) => view.scroll_to_center(line),
            SyncEffect::PausePlayback => player.pause(),
        }
    }
}
