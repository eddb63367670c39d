//! Serialized speech output for OMNIS.
#![allow(dead_code)]
//!
//! All spoken text funnels through one queue with a single worker task, so
//! playback never overlaps and requests come out in enqueue order. The worker
//! polls cooperatively and survives synthesis and playback failures.

pub mod playback;
pub mod synth;

pub use playback::{Playback, PlayerStrategy, ShellPlayback};
pub use synth::{GoogleTts, Synthesizer};

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::sleep;
use uuid::Uuid;

use crate::error::Result;

/// Worker poll interval when the queue is empty.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

struct QueueState {
    pending: Mutex<VecDeque<String>>,
    speaking: AtomicBool,
    running: AtomicBool,
}

/// Handle to the speech queue and its worker task.
pub struct SpeechQueue {
    state: Arc<QueueState>,
}

impl SpeechQueue {
    /// Spawn the worker task and return the queue handle.
    pub fn start(synth: Arc<dyn Synthesizer>, playback: Arc<dyn Playback>) -> Self {
        let state = Arc::new(QueueState {
            pending: Mutex::new(VecDeque::new()),
            speaking: AtomicBool::new(false),
            running: AtomicBool::new(true),
        });

        let worker_state = state.clone();
        tokio::spawn(async move {
            run_worker(worker_state, synth, playback).await;
        });

        Self { state }
    }

    /// Queue text for speaking. Returns as soon as the entry is appended;
    /// playback happens on the worker task. Blank text is dropped.
    pub async fn enqueue(&self, text: impl Into<String>) {
        let text = text.into();
        if text.trim().is_empty() {
            return;
        }

        self.state.pending.lock().await.push_back(text);
    }

    /// Point-in-time snapshot of whether an utterance is in flight.
    pub fn is_speaking(&self) -> bool {
        self.state.speaking.load(Ordering::SeqCst)
    }

    /// True when nothing is pending and nothing is being spoken.
    pub async fn is_idle(&self) -> bool {
        !self.is_speaking() && self.state.pending.lock().await.is_empty()
    }

    /// Wait until every queued entry has been processed.
    pub async fn drain(&self) {
        while !self.is_idle().await {
            sleep(POLL_INTERVAL).await;
        }
    }

    /// Ask the worker to exit once its current item finishes. Pending
    /// entries are not flushed.
    pub fn stop(&self) {
        self.state.running.store(false, Ordering::SeqCst);
    }
}

async fn run_worker(
    state: Arc<QueueState>,
    synth: Arc<dyn Synthesizer>,
    playback: Arc<dyn Playback>,
) {
    tracing::debug!("Speech worker started");

    while state.running.load(Ordering::SeqCst) {
        let next = state.pending.lock().await.pop_front();

        match next {
            Some(text) => {
                state.speaking.store(true, Ordering::SeqCst);
                if let Err(e) = speak_once(&text, synth.as_ref(), playback.as_ref()).await {
                    tracing::warn!("Utterance failed: {}", e);
                }
                // The flag clears whether or not the utterance succeeded.
                state.speaking.store(false, Ordering::SeqCst);
            }
            None => sleep(POLL_INTERVAL).await,
        }
    }

    tracing::debug!("Speech worker stopped");
}

/// Speak a single entry through a fresh transient artifact.
async fn speak_once(
    text: &str,
    synth: &dyn Synthesizer,
    playback: &dyn Playback,
) -> Result<()> {
    let path = artifact_path();
    speak_to(&path, text, synth, playback).await
}

/// Synthesize to `path`, play it, and remove the artifact on every exit path.
async fn speak_to(
    path: &Path,
    text: &str,
    synth: &dyn Synthesizer,
    playback: &dyn Playback,
) -> Result<()> {
    let audio = synth.synthesize(text).await?;

    let result = async {
        tokio::fs::write(path, &audio).await?;
        playback.play(path).await
    }
    .await;

    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::debug!("Could not remove {}: {}", path.display(), e);
    }

    result
}

/// Transient artifact in the working directory with a unique suffix.
fn artifact_path() -> PathBuf {
    PathBuf::from(format!("speak_{}.mp3", Uuid::new_v4()))
}
