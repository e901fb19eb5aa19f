//! Locate command implementation.

use super::load_transcript;
use crate::cli::Output;
use crate::config::Settings;
use crate::source::{resolve_selection, SourceOffsetMapper};
use anyhow::Result;

/// Run the locate command.
pub fn run_locate(note: &str, line: usize, settings: &Settings) -> Result<()> {
    let loaded = load_transcript(note, settings)?;
    let marker = settings.document.block_marker.as_str();

    let Some(model) = loaded.document.lines.get(line) else {
        anyhow::bail!(
            "Line {} does not exist ({} lines)",
            line,
            loaded.document.lines.len()
        );
    };

    let range = match &loaded.block {
        Some(found) => resolve_selection(
            &loaded.content,
            marker,
            found.block.has_directive(),
            model.rows,
        ),
        None => SourceOffsetMapper::whole(&loaded.content).select_or_default(model.rows),
    };

    Output::kv("Range", &range.to_string());
    let rows: Vec<&str> = loaded.content.lines().collect();
    for row in range.from.line..=range.to.line {
        if let Some(text) = rows.get(row) {
            println!("{:>5} | {}", row + 1, text);
        }
    }

    Ok(())
}
