//! Hardware speaker diagnostics.
#![allow(dead_code)]
//!
//! Probes the well-known device targets with a short synthesized phrase so an
//! operator can hear which output actually works. Always exits cleanly; the
//! report is the product.

use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use uuid::Uuid;

use crate::error::Result;
use crate::speech::Synthesizer;

/// Device targets probed in order, with operator-facing descriptions.
const PROBE_TARGETS: [(&str, &str); 5] = [
    ("hw:0,0", "Default/HDMI Audio"),
    ("plughw:1,0", "HDMI 0"),
    ("plughw:2,0", "USB Audio (Card 2)"),
    ("pulse", "PulseAudio System"),
    ("default", "System Default"),
];

/// Run the full speaker diagnostic, printing a report to stdout.
pub async fn run(synth: &dyn Synthesizer) -> Result<()> {
    println!("{}", "=".repeat(50));
    println!("🔊 HARDWARE SPEAKER DIAGNOSTIC");
    println!("{}", "=".repeat(50));

    println!("\n--- Listing Audio Devices (aplay -l) ---");
    list_devices().await;

    println!("\n--- Diagnostic Tests ---");
    for (device, description) in PROBE_TARGETS {
        probe_device(synth, device, description).await;
    }

    println!("\n{}", "=".repeat(50));
    println!("If you heard NO sound above:");
    println!("1. Check if speakers are plugged in and powered on.");
    println!("2. Run 'alsamixer' and ensure volume is not muted (press F6 to select card).");
    println!("3. Try running: 'aplay /usr/share/sounds/alsa/Front_Center.wav'");
    println!("{}", "=".repeat(50));

    Ok(())
}

/// Print the ALSA device listing, tolerating a missing aplay.
async fn list_devices() {
    match Command::new("aplay").arg("-l").output().await {
        Ok(out) => {
            print!("{}", String::from_utf8_lossy(&out.stdout));
            if !out.status.success() {
                eprint!("{}", String::from_utf8_lossy(&out.stderr));
            }
        }
        Err(e) => println!("⚠️ Could not run aplay: {}", e),
    }
}

/// Synthesize a test phrase and try to play it on one device.
async fn probe_device(synth: &dyn Synthesizer, device: &str, description: &str) -> bool {
    println!("\nTesting {} ({})...", description, device);

    let audio = match synth.synthesize(&format!("Testing {}", description)).await {
        Ok(audio) => audio,
        Err(e) => {
            println!("⚠️ Error testing {}: {}", device, e);
            return false;
        }
    };

    let path = probe_artifact_path(device);
    if let Err(e) = tokio::fs::write(&path, &audio).await {
        println!("⚠️ Error testing {}: {}", device, e);
        return false;
    }

    let played = Command::new("mpg321")
        .args(["-a", device, "-q"])
        .arg(&path)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;

    if let Err(e) = tokio::fs::remove_file(&path).await {
        tracing::debug!("Could not remove {}: {}", path.display(), e);
    }

    match played {
        Ok(status) if status.success() => {
            println!("✅ Success with mpg321 on {}", device);
            true
        }
        Ok(_) => {
            println!("❌ Failed {} with mpg321", device);
            false
        }
        Err(e) => {
            println!("⚠️ Error testing {}: {}", device, e);
            false
        }
    }
}

/// Per-probe artifact named after the device, colons and commas flattened.
fn probe_artifact_path(device: &str) -> PathBuf {
    let flat = device.replace([':', ','], "_");
    PathBuf::from(format!("test_{}_{}.mp3", flat, Uuid::new_v4()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_artifacts_flatten_device_names() {
        let path = probe_artifact_path("hw:2,0");
        let name = path.to_string_lossy().to_string();
        assert!(name.starts_with("test_hw_2_0_"));
        assert!(name.ends_with(".mp3"));
        assert!(!name.contains(':'));
        assert!(!name.contains(','));
    }
}
