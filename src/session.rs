//! A lyrics view bound to one document and one player.
//!
//! The session owns the highlight state for its view. Player events are
//! applied strictly in arrival order, and once the view is torn down every
//! further event is ignored.

use crate::source::{self, MediaSource};
use crate::sync::{LyricsView, PlaybackSynchronizer, Player, SyncOptions, SyncState};
use crate::transcript::{Document, TimeCode};
use std::path::Path;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Something the player or the user did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    /// Periodic time update from the player.
    Tick(TimeCode),
    /// The user moved the playback position.
    Seek(TimeCode),
    /// The user activated a line's timestamp.
    SeekToLine(usize),
    /// The user pressed play.
    Play,
    /// The user pressed pause.
    Pause,
    /// The view is going away.
    Teardown,
}

/// Binds a parsed document, its highlight state, a player and a view.
pub struct LyricsSession<P: Player, V: LyricsView> {
    document: Document,
    synchronizer: Option<PlaybackSynchronizer>,
    media: Option<MediaSource>,
    notice: Option<String>,
    player: P,
    view: V,
    torn_down: bool,
}

impl<P: Player, V: LyricsView> LyricsSession<P, V> {
    /// Open a session.
    ///
    /// A media directive that cannot be resolved disables synchronization for
    /// this document and leaves a notice in place of the player.
    #[instrument(skip(document, player, view), fields(lines = document.lines.len()))]
    pub async fn open(
        document: Document,
        media_directive: Option<&str>,
        base_dir: Option<&Path>,
        options: SyncOptions,
        player: P,
        view: V,
    ) -> Self {
        let mut media = None;
        let mut notice = None;

        if let Some(directive) = media_directive {
            match source::resolve(directive, base_dir).await {
                Ok(resolved) => {
                    info!("Following {} ({})", resolved.path.display(), resolved.kind);
                    media = Some(resolved);
                }
                Err(e) => {
                    warn!("Synchronization disabled: {}", e);
                    notice = Some(e.to_string());
                }
            }
        }

        let synchronizer = match notice {
            Some(_) => None,
            None => Some(PlaybackSynchronizer::for_document(&document, options)),
        };

        if document.is_opaque() {
            debug!("Opaque document, nothing to highlight");
        }

        Self {
            document,
            synchronizer,
            media,
            notice,
            player,
            view,
            torn_down: false,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn media(&self) -> Option<&MediaSource> {
        self.media.as_ref()
    }

    /// Inline notice shown instead of the player.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_synchronized(&self) -> bool {
        self.synchronizer.is_some() && !self.torn_down
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn state(&self) -> Option<SyncState> {
        self.synchronizer.as_ref().map(|s| s.state())
    }

    /// Document lines currently active.
    pub fn active_lines(&self) -> &[usize] {
        self.synchronizer.as_ref().map(|s| s.active_lines()).unwrap_or(&[])
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Apply one event. Returns `false` once the session is torn down.
    pub fn handle(&mut self, event: PlayerEvent) -> bool {
        if self.torn_down {
            debug!("Ignoring {:?} after teardown", event);
            return false;
        }

        if event == PlayerEvent::Teardown {
            self.torn_down = true;
            self.synchronizer = None;
            debug!("Session torn down");
            return false;
        }

        let Some(sync) = self.synchronizer.as_mut() else {
            return true;
        };

        match event {
            PlayerEvent::Tick(now) => {
                sync.on_time_update(now, false, &mut self.player, &mut self.view);
            }
            PlayerEvent::Seek(target) => sync.seek(target, &mut self.player, &mut self.view),
            PlayerEvent::SeekToLine(line) => {
                if !sync.seek_to_line(line, &mut self.player, &mut self.view) {
                    debug!("Line {} has no timestamp", line);
                }
            }
            PlayerEvent::Play => sync.resume(&mut self.player, &mut self.view),
            PlayerEvent::Pause => self.player.pause(),
            PlayerEvent::Teardown => {}
        }

        true
    }

    /// Drain events in order until teardown or until every sender is gone.
    pub async fn run(&mut self, mut events: mpsc::Receiver<PlayerEvent>) -> usize {
        let mut handled = 0;
        while let Some(event) = events.recv().await {
            handled += 1;
            if !self.handle(event) {
                break;
            }
        }
        handled
    }
}
