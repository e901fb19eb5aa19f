//! Detect command implementation.

use super::load_transcript;
use crate::cli::Output;
use crate::config::Settings;
use crate::transcript::{detect, scores};
use anyhow::Result;

/// Run the detect command.
pub fn run_detect(file: &str, settings: &Settings) -> Result<()> {
    let loaded = load_transcript(file, settings)?;
    let text = match &loaded.block {
        Some(found) => {
            Output::info(&format!(
                "Reading the transcript block at row {}",
                found.marker_row + 1
            ));
            found.block.text.as_str()
        }
        None => loaded.content.as_str(),
    };

    Output::header("Scores");
    for (format, score) in scores(text) {
        Output::kv(&format.to_string(), &score.to_string());
    }
    println!();

    match detect(text) {
        Some((parser, score)) => Output::success(&format!(
            "Detected {} ({} timestamps, {} timed lines)",
            parser.format(),
            score,
            loaded.document.timed_lines().count()
        )),
        None => Output::warning("No timestamps recognized; the content would be shown as-is"),
    }

    Ok(())
}
