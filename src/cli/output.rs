//! CLI output formatting utilities.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print one transcript line.
    pub fn line(label: Option<&str>, rows: &str, text: &str, emphasized: bool) {
        let label = label.unwrap_or("--:--");
        let text = text.replace('\n', " / ");
        if emphasized {
            println!(
                "{} {} {} {}",
                style(">").green().bold(),
                style(label).cyan().bold(),
                style(rows).dim(),
                style(text).bold()
            );
        } else {
            println!("  {} {} {}", style(label).cyan(), style(rows).dim(), text);
        }
    }

    /// Create a playback progress bar over milliseconds.
    pub fn playback_bar(total_ms: u64) -> ProgressBar {
        let pb = ProgressBar::new(total_ms.max(1));
        let template = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        pb.set_style(template);
        pb
    }
}

/// Truncate content with ellipsis.
pub fn content_preview(content: &str, max_chars: usize) -> String {
    let content = content.replace('\n', " ");
    if content.chars().count() <= max_chars {
        content
    } else {
        let cut: String = content.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_preview() {
        assert_eq!(content_preview("short", 10), "short");
        assert_eq!(content_preview("two\nrows", 10), "two rows");
        assert_eq!(content_preview("ääääää", 3), "äää...");
    }
}
