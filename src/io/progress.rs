//! Progress display for solve attempts and stderr diagnostics

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} cells {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Coordinates progress bars for successive solve attempts
///
/// Messages are printed above the bars through [`MultiProgress::println`] so
/// they never tear the display.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    attempt_bar: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            attempt_bar: None,
        }
    }

    /// Configure a bar for a new attempt over `cell_count` cells
    pub fn start_attempt(&mut self, attempt: usize, seed: u64, cell_count: usize) {
        if let Some(previous) = self.attempt_bar.take() {
            previous.finish_and_clear();
        }

        let bar = ProgressBar::new(cell_count as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        bar.set_prefix(format!("attempt {attempt} (seed {seed})"));
        bar.set_message(String::new());
        self.attempt_bar = Some(self.multi_progress.add(bar));
    }

    /// Report how many cells are resolved and the elapsed time
    pub fn update(&self, resolved: usize, elapsed: Duration) {
        if let Some(ref bar) = self.attempt_bar {
            bar.set_position(resolved as u64);
            bar.set_message(format!("{:.1}s", elapsed.as_secs_f64()));
        }
    }

    /// Mark the current attempt as done
    pub fn complete_attempt(&mut self, succeeded: bool) {
        if let Some(bar) = self.attempt_bar.take() {
            if succeeded {
                bar.finish_with_message("resolved");
            } else {
                bar.abandon_with_message("contradiction");
            }
        }
    }

    /// Print a diagnostic line above the bars, or to stderr when undrawable
    // Allow print for user feedback when no terminal is attached
    #[allow(clippy::print_stderr)]
    pub fn log(&self, message: &str) {
        if self.multi_progress.is_hidden() || self.multi_progress.println(message).is_err() {
            eprintln!("{message}");
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        let _ = self.multi_progress.clear();
    }
}
