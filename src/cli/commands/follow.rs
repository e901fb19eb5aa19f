//! Follow command implementation.
//!
//! Runs a wall-clock player against the transcript and prints highlight
//! changes as they happen. Commands are read from stdin, one per line.

use super::{load_transcript, parse_time};
use crate::cli::output::content_preview;
use crate::cli::Output;
use crate::config::Settings;
use crate::session::{LyricsSession, PlayerEvent};
use crate::sync::{LyricsView, Player, SyncOptions};
use crate::transcript::{Document, TimeCode};
use anyhow::Result;
use console::style;
use indicatif::ProgressBar;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;
use tracing::debug;

/// Playback keeps running this long after the last line starts.
const TAIL: Duration = Duration::from_secs(3);

/// Rows shown on each side of a centered line.
const CONTEXT_ROWS: usize = 1;

/// Player driven by the wall clock instead of decoded audio.
#[derive(Debug)]
pub(crate) struct ClockPlayer {
    /// Position when the clock was last started or moved.
    base: TimeCode,
    /// When the clock was last started, if running.
    started: Option<Instant>,
}

impl ClockPlayer {
    pub fn new() -> Self {
        Self {
            base: TimeCode::ZERO,
            started: None,
        }
    }
}

impl Default for ClockPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for ClockPlayer {
    fn play(&mut self) {
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
    }

    fn pause(&mut self) {
        self.base = self.current_time();
        self.started = None;
    }

    fn seek(&mut self, to: TimeCode) {
        self.base = to;
        if self.started.is_some() {
            self.started = Some(Instant::now());
        }
    }

    fn current_time(&self) -> TimeCode {
        let elapsed = self
            .started
            .map_or(0, |at| u64::try_from(at.elapsed().as_millis()).unwrap_or(u64::MAX));
        TimeCode::from_millis(self.base.as_millis().saturating_add(elapsed))
    }

    fn is_playing(&self) -> bool {
        self.started.is_some()
    }
}

/// Prints highlight changes above a progress bar.
pub(crate) struct TerminalView {
    rows: Vec<String>,
    bar: ProgressBar,
}

impl TerminalView {
    fn new(document: &Document, bar: ProgressBar) -> Self {
        let rows = document
            .lines
            .iter()
            .map(|line| {
                format!(
                    "{} {}",
                    line.label.as_deref().unwrap_or("--:--"),
                    line.text.replace('\n', " / ")
                )
            })
            .collect();
        Self { rows, bar }
    }

    fn row(&self, line: usize) -> &str {
        self.rows.get(line).map_or("", String::as_str)
    }
}

impl LyricsView for TerminalView {
    fn highlight(&mut self, line: usize) {
        self.bar
            .println(format!("{} {}", style(">").green().bold(), style(self.row(line)).bold()));
    }

    fn unhighlight(&mut self, line: usize) {
        debug!("Unhighlight line {}", line);
    }

    fn scroll_to_center(&mut self, line: usize) {
        let first = line.saturating_sub(CONTEXT_ROWS);
        let last = (line + CONTEXT_ROWS).min(self.rows.len().saturating_sub(1));
        for idx in (first..=last).filter(|&i| i != line) {
            let marker = if idx < line { "^" } else { "v" };
            self.bar
                .println(format!("  {} {}", style(marker).dim(), style(self.row(idx)).dim()));
        }
    }
}

/// A line typed on stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FollowCommand {
    Play,
    Pause,
    Seek(TimeCode),
    Line(usize),
    Quit,
}

fn parse_command(input: &str) -> Option<FollowCommand> {
    if input.trim().is_empty() {
        return input.contains(' ').then_some(FollowCommand::Pause);
    }

    let mut parts = input.split_whitespace();
    let command = parts.next()?.to_lowercase();
    let argument = parts.next();

    match (command.as_str(), argument) {
        ("p" | "play", None) => Some(FollowCommand::Play),
        ("pause", None) => Some(FollowCommand::Pause),
        ("s" | "seek", Some(time)) => time.parse().ok().map(FollowCommand::Seek),
        ("l" | "line", Some(line)) => line.parse().ok().map(FollowCommand::Line),
        ("q" | "quit", None) => Some(FollowCommand::Quit),
        _ => None,
    }
}

/// Run the follow command.
pub async fn run_follow(
    file: &str,
    sentence: bool,
    no_scroll: bool,
    start: Option<&str>,
    settings: &Settings,
) -> Result<()> {
    let loaded = load_transcript(file, settings)?;
    let document = loaded.document.clone();

    if !document.is_synchronizable() {
        Output::warning("Nothing to follow: the transcript has no timed lines");
        return Ok(());
    }

    let defaults = settings.sync_options();
    let options = SyncOptions {
        auto_scroll: defaults.auto_scroll && !no_scroll,
        sentence_mode: defaults.sentence_mode || sentence,
    };
    let start = start.map(parse_time).transpose()?;

    let end = document
        .duration()
        .unwrap_or(TimeCode::ZERO)
        .as_millis()
        .saturating_add(TAIL.as_millis() as u64);
    let bar = Output::playback_bar(end);
    let view = TerminalView::new(&document, bar.clone());

    let mut session = LyricsSession::open(
        document,
        loaded.media_directive(),
        loaded.base_dir(),
        options,
        ClockPlayer::new(),
        view,
    )
    .await;

    if let Some(notice) = session.notice() {
        bar.finish_and_clear();
        Output::warning(notice);
        Output::info("Synchronization is disabled for this transcript");
        return Ok(());
    }

    if let Some(media) = session.media() {
        Output::kv("Media", &format!("{} ({})", media.title(), media.kind));
    }
    Output::info(
        "Commands: p = play, pause = pause, s <time> = seek, l <n> = jump to line, q = quit",
    );

    if let Some(at) = start {
        session.handle(PlayerEvent::Seek(at));
    }
    session.handle(PlayerEvent::Play);

    let mut ticker =
        tokio::time::interval(Duration::from_millis(settings.playback.tick_interval_ms));
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = session.player().current_time();
                session.handle(PlayerEvent::Tick(now));

                bar.set_position(now.as_millis().min(end));
                let status = if session.player().is_playing() { "" } else { " (paused)" };
                let active = session
                    .active_lines()
                    .first()
                    .map(|&l| content_preview(&session.document().lines[l].text, 40))
                    .unwrap_or_default();
                bar.set_message(format!("{}{} {}", now, status, active));

                if now.as_millis() >= end {
                    break;
                }
                if !stdin_open && !session.player().is_playing() {
                    bar.println("Paused with no input left to resume");
                    break;
                }
            }
            line = stdin.next_line(), if stdin_open => {
                let Some(line) = line? else {
                    stdin_open = false;
                    continue;
                };
                match parse_command(&line) {
                    Some(FollowCommand::Play) => {
                        session.handle(PlayerEvent::Play);
                    }
                    Some(FollowCommand::Pause) => {
                        session.handle(PlayerEvent::Pause);
                    }
                    Some(FollowCommand::Seek(at)) => {
                        session.handle(PlayerEvent::Seek(at));
                    }
                    Some(FollowCommand::Line(idx)) => {
                        session.handle(PlayerEvent::SeekToLine(idx));
                    }
                    Some(FollowCommand::Quit) => break,
                    None => bar.println(format!(
                        "{} unknown command: {}",
                        style(">>").yellow(),
                        line.trim()
                    )),
                }
            }
        }
    }

    session.handle(PlayerEvent::Teardown);
    bar.finish_and_clear();
    Output::success(&format!("Stopped at {}", session.player().current_time()));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("p"), Some(FollowCommand::Play));
        assert_eq!(parse_command("PLAY"), Some(FollowCommand::Play));
        assert_eq!(parse_command(" "), Some(FollowCommand::Pause));
        assert_eq!(parse_command("pause"), Some(FollowCommand::Pause));
        assert_eq!(
            parse_command("s 01:30"),
            Some(FollowCommand::Seek(TimeCode::from_millis(90_000)))
        );
        assert_eq!(parse_command("l 3"), Some(FollowCommand::Line(3)));
        assert_eq!(parse_command("q"), Some(FollowCommand::Quit));
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("s"), None);
        assert_eq!(parse_command("s later"), None);
        assert_eq!(parse_command("dance"), None);
    }

    #[test]
    fn test_clock_player_paused() {
        let mut player = ClockPlayer::new();
        assert!(!player.is_playing());

        player.seek(TimeCode::from_millis(4000));
        assert_eq!(player.current_time(), TimeCode::from_millis(4000));
        assert!(!player.is_playing());
    }

    #[tokio::test]
    async fn test_clock_player_advances_while_playing() {
        let mut player = ClockPlayer::new();
        player.seek(TimeCode::from_millis(1000));
        player.play();
        tokio::time::sleep(Duration::from_millis(30)).await;

        let running = player.current_time();
        assert!(running >= TimeCode::from_millis(1030));

        player.pause();
        let paused = player.current_time();
        assert!(paused >= running);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(player.current_time(), paused);
    }

    #[test]
    fn test_terminal_view_rows() {
        let doc = crate::transcript::parse_document("[00:01]a\nb\n[00:02]c");
        let view = TerminalView::new(&doc, ProgressBar::hidden());
        assert_eq!(view.row(0), "00:01 a / b");
        assert_eq!(view.row(5), "");
    }
}
