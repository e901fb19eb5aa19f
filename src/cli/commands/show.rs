//! Show command implementation.

use super::load_transcript;
use crate::cli::Output;
use crate::config::Settings;
use crate::render::{render_lines, PlainRenderer, RenderedLine};
use crate::transcript::{LineModel, TranscriptFormat};
use anyhow::Result;
use serde::Serialize;

/// Concurrent line renders.
const RENDER_CONCURRENCY: usize = 8;

#[derive(Serialize)]
struct ShowLine<'a> {
    #[serde(flatten)]
    line: &'a LineModel,
    /// One-based first and last file rows.
    file_rows: (usize, usize),
    markup: &'a str,
    marked: bool,
}

#[derive(Serialize)]
struct ShowOutput<'a> {
    path: String,
    format: Option<TranscriptFormat>,
    media: Option<&'a str>,
    header: &'a str,
    lines: Vec<ShowLine<'a>>,
}

/// Run the show command.
pub async fn run_show(file: &str, json: bool, settings: &Settings) -> Result<()> {
    let loaded = load_transcript(file, settings)?;
    let document = &loaded.document;
    let rendered = render_lines(
        &PlainRenderer::new(),
        document,
        &loaded.path,
        RENDER_CONCURRENCY,
    )
    .await;

    if json {
        let first_row = loaded.first_row();
        let lines = document
            .lines
            .iter()
            .zip(&rendered)
            .map(|(line, r): (&LineModel, &RenderedLine)| {
                let rows = line.rows.offset(first_row);
                ShowLine {
                    line,
                    file_rows: (rows.start + 1, rows.end.max(rows.start + 1)),
                    markup: &r.markup,
                    marked: r.marked,
                }
            })
            .collect();

        let output = ShowOutput {
            path: loaded.path.display().to_string(),
            format: document.format,
            media: loaded.media_directive(),
            header: &document.header,
            lines,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    Output::header(&loaded.path.display().to_string());
    match document.format {
        Some(format) => Output::kv("Format", &format.to_string()),
        None => Output::kv("Format", "unrecognized (shown as-is)"),
    }
    if let Some(media) = loaded.media_directive() {
        Output::kv("Media", media);
    }
    Output::kv("Lines", &document.lines.len().to_string());
    if let Some(duration) = document.duration() {
        Output::kv("Last line at", &duration.to_string());
    }
    println!();

    if document.is_opaque() {
        println!("{}", document.header);
        return Ok(());
    }

    for (idx, line) in document.lines.iter().enumerate() {
        let marked = rendered.get(idx).is_some_and(|r| r.marked);
        Output::line(
            line.label.as_deref(),
            &loaded.rows_label(idx),
            &line.text,
            marked,
        );
    }

    Ok(())
}
