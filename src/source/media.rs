//! Media source resolution for transcript directives.
//!
//! Supports both audio and video files.

use crate::error::{LrcsyncError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Supported audio file extensions.
const AUDIO_EXTENSIONS: &[&str] = &[
    "mp3", "wav", "flac", "aac", "ogg", "opus", "m4a", "wma", "aiff", "alac",
];

/// Supported video file extensions.
const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mkv", "avi", "mov", "webm", "flv", "wmv", "m4v", "mpeg", "mpg", "3gp",
];

/// Kind of media a directive points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    /// Classify a path by its extension.
    pub fn of(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Audio)
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Video)
        } else {
            None
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Audio => write!(f, "audio"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

/// A media file backing a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaSource {
    pub path: PathBuf,
    pub kind: MediaKind,
}

impl MediaSource {
    /// Display title, taken from the file stem.
    pub fn title(&self) -> String {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Unknown")
            .to_string()
    }
}

/// Resolve a `source` directive to an existing media file.
///
/// `~` is expanded and relative paths are joined to `base_dir` (the
/// directory of the note holding the block).
pub async fn resolve(directive: &str, base_dir: Option<&Path>) -> Result<MediaSource> {
    let expanded = shellexpand::tilde(directive.trim());
    let mut path = PathBuf::from(expanded.as_ref());
    if path.is_relative() {
        if let Some(base) = base_dir {
            path = base.join(path);
        }
    }

    let Some(kind) = MediaKind::of(&path) else {
        return Err(LrcsyncError::UnresolvedMediaSource(format!(
            "Not a recognized audio or video file: {}",
            directive
        )));
    };

    match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => Ok(MediaSource { path, kind }),
        Ok(_) => Err(LrcsyncError::UnresolvedMediaSource(format!(
            "Not a file: {}",
            path.display()
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(
            LrcsyncError::UnresolvedMediaSource(format!("File not found: {}", path.display())),
        ),
        Err(e) => Err(LrcsyncError::UnresolvedMediaSource(format!(
            "{}: {}",
            path.display(),
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_media_kind() {
        assert_eq!(MediaKind::of(Path::new("audio.mp3")), Some(MediaKind::Audio));
        assert_eq!(MediaKind::of(Path::new("audio.WAV")), Some(MediaKind::Audio));
        assert_eq!(MediaKind::of(Path::new("/path/to/clip.MKV")), Some(MediaKind::Video));
        assert_eq!(MediaKind::of(Path::new("document.pdf")), None);
        assert_eq!(MediaKind::of(Path::new("no_extension")), None);
    }

    #[tokio::test]
    async fn test_resolve_relative_to_note() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("audio")).unwrap();
        std::fs::write(dir.path().join("audio/song.mp3"), b"").unwrap();

        let media = assert_ok!(resolve("audio/song.mp3", Some(dir.path())).await);
        assert_eq!(media.kind, MediaKind::Audio);
        assert_eq!(media.title(), "song");
        assert_eq!(media.path, dir.path().join("audio/song.mp3"));
    }

    #[tokio::test]
    async fn test_resolve_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = assert_err!(resolve("gone.flac", Some(dir.path())).await);
        assert!(matches!(err, LrcsyncError::UnresolvedMediaSource(_)));
    }

    #[tokio::test]
    async fn test_resolve_rejects_non_media() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"").unwrap();
        std::fs::create_dir(dir.path().join("folder.mp4")).unwrap();

        let err = resolve("notes.txt", Some(dir.path())).await.unwrap_err();
        assert!(matches!(err, LrcsyncError::UnresolvedMediaSource(_)));

        let err = resolve("folder.mp4", Some(dir.path())).await.unwrap_err();
        assert!(matches!(err, LrcsyncError::UnresolvedMediaSource(_)));
    }
}
