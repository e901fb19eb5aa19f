//! Per-line rendering and ordered assembly.
//!
//! Lines are rendered concurrently and may complete in any order. The
//! assembled output is always in document order.

use crate::error::Result;
use crate::transcript::Document;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use regex::Regex;
use serde::Serialize;
use std::path::Path;
use tracing::warn;

/// Renders the text of one line to markup.
#[async_trait]
pub trait LineRenderer: Send + Sync {
    /// Render `text`. `document_path` locates the note for relative links.
    async fn render(&self, text: &str, document_path: &Path) -> Result<String>;
}

/// A rendered transcript line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedLine {
    /// Index into `Document::lines`.
    pub line: usize,
    pub markup: String,
    /// The markup contains a `<mark>` element.
    pub marked: bool,
}

impl RenderedLine {
    fn new(line: usize, markup: String) -> Self {
        let marked = markup.contains("<mark>");
        Self {
            line,
            markup,
            marked,
        }
    }
}

/// Render every line of a document, at most `max_concurrent` at a time.
///
/// A line that fails to render falls back to its raw text.
pub async fn render_lines(
    renderer: &dyn LineRenderer,
    document: &Document,
    document_path: &Path,
    max_concurrent: usize,
) -> Vec<RenderedLine> {
    let mut rendered: Vec<RenderedLine> = stream::iter(document.lines.iter().enumerate())
        .map(|(idx, line)| async move {
            match renderer.render(&line.text, document_path).await {
                Ok(markup) => RenderedLine::new(idx, markup),
                Err(e) => {
                    warn!("Line {}: {}; showing raw text", idx, e);
                    RenderedLine::new(idx, line.text.clone())
                }
            }
        })
        .buffer_unordered(max_concurrent.max(1))
        .collect()
        .await;

    rendered.sort_by_key(|r| r.line);
    rendered
}

/// Escapes markup and turns `==text==` into `<mark>text</mark>`.
pub struct PlainRenderer {
    highlight_regex: Regex,
}

impl PlainRenderer {
    pub fn new() -> Self {
        let highlight_regex = Regex::new(r"==([^=\n]+)==").expect("Invalid regex");
        Self { highlight_regex }
    }

    fn escape(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
    }
}

impl Default for PlainRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LineRenderer for PlainRenderer {
    async fn render(&self, text: &str, _document_path: &Path) -> Result<String> {
        let escaped = Self::escape(text);
        let markup = self
            .highlight_regex
            .replace_all(&escaped, "<mark>$1</mark>")
            .replace('\n', "<br>");
        Ok(markup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LrcsyncError;
    use crate::transcript::parse_document;
    use std::time::Duration;

    struct Failing;

    #[async_trait]
    impl LineRenderer for Failing {
        async fn render(&self, _text: &str, document_path: &Path) -> Result<String> {
            Err(LrcsyncError::Render(document_path.display().to_string()))
        }
    }

    /// Later lines finish first.
    struct SlowFirst {
        total: u64,
    }

    #[async_trait]
    impl LineRenderer for SlowFirst {
        async fn render(&self, text: &str, _document_path: &Path) -> Result<String> {
            let n: u64 = text.trim_start_matches('L').parse().unwrap_or(0);
            tokio::time::sleep(Duration::from_millis((self.total - n) * 5)).await;
            Ok(format!("<p>{}</p>", text))
        }
    }

    #[tokio::test]
    async fn test_order_survives_out_of_order_completion() {
        let content: String = (0..8).map(|i| format!("[00:{:02}]L{}\n", i, i)).collect();
        let doc = parse_document(&content);
        let renderer = SlowFirst { total: 8 };

        let rendered = render_lines(&renderer, &doc, Path::new("note.md"), 8).await;

        let order: Vec<usize> = rendered.iter().map(|r| r.line).collect();
        assert_eq!(order, (0..8).collect::<Vec<_>>());
        assert_eq!(rendered[3].markup, "<p>L3</p>");
    }

    #[tokio::test]
    async fn test_mark_detection() {
        let doc = parse_document("[00:01]plain\n[00:02]a ==key== word\n[00:03]<mark>raw</mark>");
        let rendered = render_lines(&PlainRenderer::new(), &doc, Path::new("note.md"), 2).await;

        assert!(!rendered[0].marked);
        assert!(rendered[1].marked);
        assert_eq!(rendered[1].markup, "a <mark>key</mark> word");
        // user-written tags are escaped, not trusted
        assert!(!rendered[2].marked);
        assert_eq!(rendered[2].markup, "&lt;mark&gt;raw&lt;/mark&gt;");
    }

    #[tokio::test]
    async fn test_failed_render_falls_back_to_text() {
        let doc = parse_document("[00:01]first\nsecond");
        let rendered = render_lines(&Failing, &doc, Path::new("note.md"), 4).await;

        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].markup, "first\nsecond");
        assert!(!rendered[0].marked);
    }
}
