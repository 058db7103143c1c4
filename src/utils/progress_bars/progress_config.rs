// src/utils/progress_bars/progress_config.rs

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::env;

use crate::utils::config::parse_or;

const BAR_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} ({eta}) {msg}";

/// Configuration for the pair-scan progress bar
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressConfig {
    /// Whether to show progress bars at all
    pub enabled: bool,
    /// Refresh rate for progress bars in milliseconds
    pub refresh_rate_ms: u64,
    /// Whether to show memory usage in progress messages
    pub show_memory: bool,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            refresh_rate_ms: 100,
            show_memory: true,
        }
    }
}

impl ProgressConfig {
    /// Create progress configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            enabled: parse_or(&lookup, "PROGRESS_ENABLED", defaults.enabled),
            refresh_rate_ms: parse_or(&lookup, "PROGRESS_REFRESH_RATE_MS", defaults.refresh_rate_ms),
            show_memory: parse_or(&lookup, "PROGRESS_SHOW_MEMORY", defaults.show_memory),
        }
    }

    /// Check if memory usage should be shown
    pub fn should_show_memory(&self) -> bool {
        self.enabled && self.show_memory
    }

    /// Redraws per second implied by `refresh_rate_ms`, kept within 1..=20.
    pub fn refresh_hz(&self) -> u8 {
        let hz = 1000 / self.refresh_rate_ms.max(1);
        hz.clamp(1, 20) as u8
    }

    /// Progress bar over `len` outer rows of the pair scan, or None when disabled.
    pub fn create_scan_bar(&self, len: usize) -> Option<ProgressBar> {
        if !self.enabled {
            return None;
        }
        let pb = ProgressBar::with_draw_target(
            Some(len as u64),
            ProgressDrawTarget::stderr_with_hz(self.refresh_hz()),
        );
        let style = ProgressStyle::default_bar()
            .template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  ");
        pb.set_style(style);
        pb.set_message("Scanning name pairs...");
        Some(pb)
    }
}
