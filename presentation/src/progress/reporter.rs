//! Loading indicator for in-flight recommendation requests

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while a recommendation request is outstanding.
///
/// Cleared (not finished in place) on both completion and cancellation so
/// the recommendation output replaces it cleanly.
pub struct RecommendationSpinner {
    bar: Option<ProgressBar>,
}

impl RecommendationSpinner {
    /// Start a spinner for the given provider, or a silent no-op when
    /// `quiet` is set.
    pub fn start(provider: &str, quiet: bool) -> Self {
        if quiet {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        bar.set_style(Self::spinner_style());
        bar.set_message(format!("Asking {provider}..."));
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar: Some(bar) }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Remove the spinner from the terminal.
    pub fn clear(mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl Drop for RecommendationSpinner {
    fn drop(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
