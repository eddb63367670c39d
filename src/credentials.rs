//! API key discovery for the cloud answer provider.
#![allow(dead_code)]
//!
//! The key is looked up lazily and re-checked before every remote call, so a
//! device can be configured after the process has started:
//! - `GEMINI_KEY` environment variable
//! - `secrets_local.json` in the working directory (untracked on devices)

use serde::Deserialize;
use std::path::Path;

/// Name of the untracked per-device secrets file.
pub const SECRETS_FILE: &str = "secrets_local.json";

#[derive(Deserialize)]
struct SecretsFile {
    gemini_key: Option<String>,
}

/// Resolve the Gemini API key, if any source provides one.
///
/// Returns `None` when no credential is configured; callers degrade to the
/// "AI unavailable" answer path instead of failing.
pub fn resolve_credential() -> Option<String> {
    if let Ok(key) = std::env::var("GEMINI_KEY") {
        let key = key.trim().to_string();
        if !key.is_empty() {
            return Some(key);
        }
    }

    let path = std::env::current_dir().ok()?.join(SECRETS_FILE);
    read_secrets_file(&path)
}

/// Read the key from a secrets file, tolerating a missing or malformed file.
fn read_secrets_file(path: &Path) -> Option<String> {
    if !path.exists() {
        return None;
    }

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Could not read {}: {}", path.display(), e);
            return None;
        }
    };

    match serde_json::from_str::<SecretsFile>(&content) {
        Ok(secrets) => secrets
            .gemini_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty()),
        Err(e) => {
            tracing::warn!("Malformed {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_key_from_secrets_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SECRETS_FILE);
        std::fs::write(&path, r#"{"gemini_key": "abc123"}"#).unwrap();

        assert_eq!(read_secrets_file(&path), Some("abc123".to_string()));
    }

    #[test]
    fn missing_or_malformed_file_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SECRETS_FILE);

        assert_eq!(read_secrets_file(&path), None);

        std::fs::write(&path, "not json").unwrap();
        assert_eq!(read_secrets_file(&path), None);

        std::fs::write(&path, r#"{"gemini_key": "   "}"#).unwrap();
        assert_eq!(read_secrets_file(&path), None);
    }
}
