//! Cloud answer provider trait for OMNIS.
#![allow(dead_code)]

use async_trait::async_trait;
use thiserror::Error;

use crate::config::Settings;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("API key not configured")]
    NotConfigured,

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Blocked by safety filters: {0}")]
    SafetyBlocked(String),

    #[error("Provider returned no usable text")]
    EmptyResponse,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, ProviderError>;

/// Generation tuning passed with every call.
#[derive(Debug, Clone, Copy)]
pub struct GenerationParams {
    pub max_output_tokens: u32,
    pub temperature: f32,
}

impl From<&Settings> for GenerationParams {
    fn from(settings: &Settings) -> Self {
        Self {
            max_output_tokens: settings.max_output_tokens,
            temperature: settings.temperature,
        }
    }
}

/// Cloud answer provider.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Provider name.
    fn name(&self) -> &str;

    /// Check if a credential is currently discoverable.
    fn is_configured(&self) -> bool;

    /// Generate an answer for a user question.
    async fn generate(&self, question: &str, params: &GenerationParams) -> Result<String>;
}
