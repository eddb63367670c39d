//! Speech synthesis backends.
#![allow(dead_code)]

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{Error, Result};

/// Turns text into playable audio bytes.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    /// Synthesize spoken audio (mp3) for the text.
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>>;
}

/// Google Translate TTS client, the same endpoint the original robot used.
pub struct GoogleTts {
    client: Client,
    base_url: String,
    lang: String,
}

impl GoogleTts {
    pub fn new() -> Self {
        Self::with_lang("en")
    }

    pub fn with_lang(lang: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: "https://translate.google.com/translate_tts".to_string(),
            lang: lang.into(),
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            lang: "en".to_string(),
        }
    }
}

impl Default for GoogleTts {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Synthesizer for GoogleTts {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", self.lang.as_str()),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| Error::Synthesis(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Synthesis(format!(
                "TTS endpoint returned HTTP {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Synthesis(e.to_string()))?;

        if bytes.is_empty() {
            return Err(Error::Synthesis("TTS endpoint returned no audio".to_string()));
        }

        Ok(bytes.to_vec())
    }
}
