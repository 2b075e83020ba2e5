//! Spinners for remote calls
//!
//! Spinners draw to stderr and are hidden entirely when disabled, so piped
//! and JSON output never contains terminal control sequences.

use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;

/// Create a spinner for indeterminate progress; hidden unless `enabled`
pub fn spinner(message: &str, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Finish a spinner with a success message
pub fn finish_success(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("✓ {message}"));
}

/// Finish a spinner with an error message
pub fn finish_error(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("✗ {message}"));
}

/// Await `task` behind a spinner, clearing it when done
pub async fn with_spinner<F: Future>(message: &str, enabled: bool, task: F) -> F::Output {
    let pb = spinner(message, enabled);
    let output = task.await;
    pb.finish_and_clear();
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_spinner_is_hidden() {
        let pb = spinner("Fetching items...", false);
        assert!(pb.is_hidden());
        finish_success(&pb, "done");
    }

    #[test]
    fn test_with_spinner_returns_output() {
        let value = tokio_test::block_on(with_spinner("Loading", false, async { 41 + 1 }));
        assert_eq!(value, 42);
    }
}
