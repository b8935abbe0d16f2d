//! Configuration loaded from environment variables.

use std::path::PathBuf;

/// Playback configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the raw sample file to demodulate.
    pub samples_path: PathBuf,

    /// How many frames between progress log lines.
    pub report_every_frames: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            samples_path: std::env::var("SAMPLES_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("samples.bin")),

            report_every_frames: std::env::var("REPORT_EVERY_FRAMES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100)
                .max(1),  // cadence of 0 would divide by zero in the loop
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_report_cadence_clamped() {
        std::env::set_var("REPORT_EVERY_FRAMES", "0");
        assert_eq!(Config::from_env().report_every_frames, 1);
        std::env::remove_var("REPORT_EVERY_FRAMES");
    }
}
