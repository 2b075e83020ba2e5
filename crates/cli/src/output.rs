//! Terminal output utilities
//!
//! Status lines go to stdout except errors and warnings, which go to stderr
//! so `--format json` output stays parseable.

use owo_colors::OwoColorize;
use retrievix_match::{Item, ItemStatus, ItemType};

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a section header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }
}

/// Match percentage, colored by strength
pub fn percent_badge(percent: u8) -> String {
    let label = format!("{percent:>3}%");
    match percent {
        70.. => label.green().bold().to_string(),
        40..=69 => label.yellow().to_string(),
        _ => label.dimmed().to_string(),
    }
}

/// One-line summary of an item report
pub fn item_line(item: &Item) -> String {
    let kind = match item.item_type {
        ItemType::Lost => "LOST ".red().to_string(),
        ItemType::Found => "FOUND".green().to_string(),
    };
    let mut line = format!(
        "{kind} {} {}",
        item.id.dimmed(),
        truncate_chars(&item.title, 40).bold()
    );
    if !item.category.is_empty() {
        line.push_str(&format!(" [{}]", item.category));
    }
    if !item.location.is_empty() {
        line.push_str(&format!(" @ {}", item.location));
    }
    if !item.date.is_empty() {
        line.push_str(&format!(" on {}", item.date));
    }
    if item.status == ItemStatus::Resolved {
        line.push_str(&format!(" {}", "(resolved)".dimmed()));
    }
    line
}

/// Cut `text` to at most `max` characters, marking the cut with `…`
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// Format a duration for display
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.1}s")
    } else {
        let mins = (secs / 60.0).floor();
        format!("{mins}m {:.0}s", secs % 60.0)
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}
