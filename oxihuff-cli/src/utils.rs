//! Utility functions for the CLI.

use indicatif::{ProgressBar, ProgressStyle};
use oxihuff_core::{Progress, Stage};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Create a progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("progress bar template is valid")
            .progress_chars("█▓▒░ "),
    );
    pb
}

/// Shows each codec stage as its own progress bar.
pub struct BarProgress {
    enabled: bool,
    bar: Option<ProgressBar>,
}

impl BarProgress {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }
}

impl Progress for BarProgress {
    fn begin(&mut self, stage: Stage, total: u64) {
        if let Some(old) = self.bar.take() {
            old.finish();
        }
        let bar = create_progress_bar(total, self.enabled);
        bar.set_message(stage.name());
        self.bar = Some(bar);
    }

    fn advance(&mut self, completed: u64) {
        if let Some(bar) = &self.bar {
            bar.set_position(completed);
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish();
        }
    }
}

/// `true` when `path` is absent or `-`.
pub fn is_stdout(path: Option<&Path>) -> bool {
    path.is_none_or(|p| p.as_os_str() == "-")
}

/// Write `data` to `path`, or to stdout for `None` / `-`.
pub fn write_output(path: Option<&Path>, data: &[u8]) -> io::Result<()> {
    match path {
        Some(p) if !is_stdout(Some(p)) => fs::write(p, data),
        _ => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data)?;
            stdout.flush()
        }
    }
}

/// Space saved, as a percentage of the original size.
pub fn format_savings(original: u64, compressed: u64) -> String {
    if original == 0 {
        return "-".to_string();
    }
    format!(
        "{:.1}%",
        (1.0 - compressed as f64 / original as f64) * 100.0
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_stdout() {
        assert!(is_stdout(None));
        assert!(is_stdout(Some(Path::new("-"))));
        assert!(!is_stdout(Some(Path::new("out.hac"))));
    }

    #[test]
    fn test_format_savings() {
        assert_eq!(format_savings(0, 4), "-");
        assert_eq!(format_savings(100, 25), "75.0%");
        assert_eq!(format_savings(10, 20), "-100.0%");
    }

    #[test]
    fn test_hidden_bar_progress() {
        let mut progress = BarProgress::new(false);
        progress.begin(Stage::Counting, 10);
        progress.advance(10);
        progress.finish();
        assert!(progress.bar.is_none());
    }
}
