//! At command implementation.

use super::{load_transcript, parse_time};
use crate::cli::Output;
use crate::config::Settings;
use crate::sync::SyncIndex;
use anyhow::Result;

/// Run the at command.
pub fn run_at(file: &str, time: &str, settings: &Settings) -> Result<()> {
    let loaded = load_transcript(file, settings)?;
    let at = parse_time(time)?;
    let index = SyncIndex::from_document(&loaded.document);

    if index.is_empty() {
        Output::warning("The transcript has no timed lines");
        return Ok(());
    }

    match index.find(at) {
        Some(entry) => {
            for &idx in index.lines_of(entry) {
                let line = &loaded.document.lines[idx];
                Output::line(line.label.as_deref(), &loaded.rows_label(idx), &line.text, true);
            }
        }
        None => Output::info(&format!("{} is before the first line", at)),
    }

    Ok(())
}
