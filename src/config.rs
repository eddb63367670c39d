//! Runtime configuration for OMNIS.
#![allow(dead_code)]
//!
//! All tunables come from the environment so the robot can be adjusted on
//! the device without a rebuild:
//! - GEMINI_MAX_TOKENS      : max output tokens for cloud answers (default 300)
//! - GEMINI_TEMPERATURE     : sampling temperature (default 0.7)
//! - OMNIS_MATCH_ACCURACY   : legacy fact match threshold (default 0.6)
//! - OMNIS_DEBUG            : "1" enables verbose logging

use std::env;

/// OMNIS settings.
#[derive(Clone, Debug)]
pub struct Settings {
    /// Maximum output tokens requested from the cloud model.
    pub max_output_tokens: u32,

    /// Sampling temperature for the cloud model.
    pub temperature: f32,

    /// Minimum keyword score for a legacy fact to qualify.
    pub match_accuracy: f64,

    /// Verbose debug output toggle.
    pub debug: bool,
}

fn default_max_output_tokens() -> u32 {
    300
}

fn default_temperature() -> f32 {
    0.7
}

fn default_match_accuracy() -> f64 {
    0.6
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_output_tokens: default_max_output_tokens(),
            temperature: default_temperature(),
            match_accuracy: default_match_accuracy(),
            debug: false,
        }
    }
}

impl Settings {
    /// Load settings from the environment, falling back to defaults for
    /// anything unset or unparsable.
    pub fn from_env() -> Self {
        Self {
            max_output_tokens: parse_env("GEMINI_MAX_TOKENS", default_max_output_tokens()),
            temperature: parse_env("GEMINI_TEMPERATURE", default_temperature()),
            match_accuracy: parse_env("OMNIS_MATCH_ACCURACY", default_match_accuracy()),
            debug: env::var("OMNIS_DEBUG").map_or(false, |v| v == "1"),
        }
    }
}

/// Parse an environment variable, returning the default when the variable is
/// missing or malformed.
fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring unparsable {}={}", name, raw);
            default
        }),
        Err(_) => default,
    }
}
