//! Audio playback through system players.
#![allow(dead_code)]

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::error::{Error, Result};

/// Plays a synthesized audio file on the attached speaker.
#[async_trait]
pub trait Playback: Send + Sync {
    async fn play(&self, path: &Path) -> Result<()>;
}

/// One (player, device) attempt in the fallback chain.
#[derive(Clone, Debug)]
pub struct PlayerStrategy {
    pub program: String,
    pub device: String,
}

impl PlayerStrategy {
    pub fn new(program: impl Into<String>, device: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            device: device.into(),
        }
    }

    /// mpg321 and mpg123 share the -a device / -q quiet flags.
    fn args(&self, path: &Path) -> Vec<String> {
        vec![
            "-a".to_string(),
            self.device.clone(),
            "-q".to_string(),
            path.display().to_string(),
        ]
    }
}

/// Shell playback against an ordered list of (player, device) strategies.
///
/// The first strategy whose process exits successfully wins. aplay is left
/// out of the chain since it cannot decode mp3.
pub struct ShellPlayback {
    strategies: Vec<PlayerStrategy>,
}

impl ShellPlayback {
    /// The default chain: the USB card the robot ships with, then the system
    /// default device, then mpg123 as an alternate decoder.
    pub fn new() -> Self {
        Self::with_strategies(vec![
            PlayerStrategy::new("mpg321", "hw:2,0"),
            PlayerStrategy::new("mpg321", "default"),
            PlayerStrategy::new("mpg123", "default"),
        ])
    }

    pub fn with_strategies(strategies: Vec<PlayerStrategy>) -> Self {
        Self { strategies }
    }
}

impl Default for ShellPlayback {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Playback for ShellPlayback {
    async fn play(&self, path: &Path) -> Result<()> {
        for strategy in &self.strategies {
            let output = Command::new(&strategy.program)
                .args(strategy.args(path))
                .stdout(Stdio::null())
                .stderr(Stdio::piped())
                .output()
                .await;

            match output {
                Ok(out) if out.status.success() => {
                    tracing::debug!(
                        "Played {} via {} on {}",
                        path.display(),
                        strategy.program,
                        strategy.device
                    );
                    return Ok(());
                }
                Ok(out) => {
                    let stderr = String::from_utf8_lossy(&out.stderr);
                    tracing::debug!(
                        "{} on {} failed ({}): {}",
                        strategy.program,
                        strategy.device,
                        out.status,
                        stderr.trim()
                    );
                }
                Err(e) => {
                    tracing::debug!("{} not runnable: {}", strategy.program, e);
                }
            }
        }

        Err(Error::Playback(format!(
            "No playback strategy succeeded for {}",
            path.display()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_builds_player_arguments() {
        let strategy = PlayerStrategy::new("mpg321", "hw:2,0");
        let args = strategy.args(Path::new("speak_test.mp3"));
        assert_eq!(args, vec!["-a", "hw:2,0", "-q", "speak_test.mp3"]);
    }

    #[test]
    fn default_chain_starts_with_the_usb_card() {
        let playback = ShellPlayback::new();
        assert_eq!(playback.strategies[0].program, "mpg321");
        assert_eq!(playback.strategies[0].device, "hw:2,0");
        assert!(playback.strategies.len() >= 2);
    }

    #[tokio::test]
    async fn all_strategies_failing_reports_playback_error() {
        let playback = ShellPlayback::with_strategies(vec![PlayerStrategy::new(
            "omnis-player-that-does-not-exist",
            "default",
        )]);

        let result = playback.play(Path::new("missing.mp3")).await;
        assert!(matches!(result, Err(Error::Playback(_))));
    }
}
