//! Gemini HTTP provider.
#![allow(dead_code)]

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::provider::{GenerationParams, Provider, ProviderError, Result};
use crate::credentials;

/// Model identifiers tried in order; the first one returning non-empty text
/// wins.
const MODEL_FALLBACKS: [&str; 2] = ["gemini-1.5-flash", "gemini-1.5-flash-latest"];

/// Persona preamble prepended to every question.
const PERSONA: &str = "You are OMNIS, a friendly and intelligent school assistant robot. \
Your primary goal is to help students and staff with their questions. \
You can answer school-specific questions and also general knowledge questions. \
Keep answers brief, concise, and engaging. Be helpful. \
Ignore markdown formatting like bold, asterisks, or bullet points.";

/// Safety categories relaxed for the school deployment.
const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

pub struct GeminiProvider {
    client: Client,
    base_url: String,
    models: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct SafetySetting {
    category: String,
    threshold: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GeminiProvider {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            models: MODEL_FALLBACKS.iter().map(ToString::to_string).collect(),
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            models: MODEL_FALLBACKS.iter().map(ToString::to_string).collect(),
        }
    }

    async fn generate_with_model(
        &self,
        api_key: &str,
        model: &str,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: params.max_output_tokens,
                temperature: params.temperature,
            },
            safety_settings: SAFETY_CATEGORIES
                .iter()
                .map(|category| SafetySetting {
                    category: (*category).to_string(),
                    threshold: "BLOCK_NONE".to_string(),
                })
                .collect(),
        };

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, model
            ))
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(classify_api_failure(status, &body));
        }

        let generate_response: GenerateResponse = response.json().await?;
        extract_text(generate_response)
    }
}

impl Default for GeminiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn is_configured(&self) -> bool {
        credentials::resolve_credential().is_some()
    }

    async fn generate(&self, question: &str, params: &GenerationParams) -> Result<String> {
        // Re-resolve the credential on every call so a key configured after
        // startup is picked up.
        let api_key = credentials::resolve_credential().ok_or(ProviderError::NotConfigured)?;

        let prompt = format!("{}\n\nUser: {}", PERSONA, question);
        let mut last_error: Option<ProviderError> = None;

        for model in &self.models {
            match self
                .generate_with_model(&api_key, model, &prompt, params)
                .await
            {
                Ok(text) if !text.trim().is_empty() => return Ok(strip_markdown(&text)),
                Ok(_) => last_error = Some(ProviderError::EmptyResponse),
                Err(e) => {
                    tracing::debug!("Model {} failed: {}", model, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(ProviderError::EmptyResponse))
    }
}

/// Pull the first candidate's text out of a response, or the matching error.
fn extract_text(response: GenerateResponse) -> Result<String> {
    if let Some(feedback) = response.prompt_feedback {
        if let Some(reason) = feedback.block_reason {
            return Err(ProviderError::SafetyBlocked(reason));
        }
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(ProviderError::EmptyResponse)?;

    if candidate.finish_reason.as_deref() == Some("SAFETY") {
        return Err(ProviderError::SafetyBlocked("SAFETY".to_string()));
    }

    candidate
        .content
        .and_then(|content| content.parts.into_iter().next())
        .map(|part| part.text)
        .filter(|text| !text.trim().is_empty())
        .ok_or(ProviderError::EmptyResponse)
}

/// Classify an HTTP failure the way the robot reports it to users.
fn classify_api_failure(status: u16, body: &str) -> ProviderError {
    let lower = body.to_lowercase();

    if status == 401 || status == 403 || lower.contains("api key") || lower.contains("auth") {
        ProviderError::Auth(format!("HTTP {}: {}", status, body))
    } else if lower.contains("safety") || lower.contains("block") {
        ProviderError::SafetyBlocked(format!("HTTP {}: {}", status, body))
    } else {
        ProviderError::Api(format!("HTTP {}: {}", status, body))
    }
}

/// Remove markdown emphasis characters the speaker would read aloud.
fn strip_markdown(text: &str) -> String {
    text.trim()
        .chars()
        .filter(|c| !matches!(c, '*' | '#' | '_'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_markdown_removes_emphasis() {
        assert_eq!(
            strip_markdown("  **Assembly** is at _8:45_ ## AM  "),
            "Assembly is at 8:45  AM"
        );
        assert_eq!(strip_markdown("plain answer"), "plain answer");
    }

    #[test]
    fn extract_text_returns_first_part() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "hello"}]}, "finishReason": "STOP"}]}"#,
        )
        .unwrap();

        assert_eq!(extract_text(response).unwrap(), "hello");
    }

    #[test]
    fn extract_text_maps_block_reason_to_safety() {
        let response: GenerateResponse =
            serde_json::from_str(r#"{"candidates": [], "promptFeedback": {"blockReason": "SAFETY"}}"#)
                .unwrap();

        assert!(matches!(
            extract_text(response),
            Err(ProviderError::SafetyBlocked(_))
        ));
    }

    #[test]
    fn extract_text_maps_safety_finish_reason() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates": [{"finishReason": "SAFETY"}]}"#,
        )
        .unwrap();

        assert!(matches!(
            extract_text(response),
            Err(ProviderError::SafetyBlocked(_))
        ));
    }

    #[test]
    fn extract_text_treats_missing_candidates_as_empty() {
        let response: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            extract_text(response),
            Err(ProviderError::EmptyResponse)
        ));

        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "   "}]}}]}"#,
        )
        .unwrap();
        assert!(matches!(
            extract_text(response),
            Err(ProviderError::EmptyResponse)
        ));
    }

    #[test]
    fn api_failures_classify_by_status_and_wording() {
        assert!(matches!(
            classify_api_failure(403, "forbidden"),
            ProviderError::Auth(_)
        ));
        assert!(matches!(
            classify_api_failure(400, "API key not valid"),
            ProviderError::Auth(_)
        ));
        assert!(matches!(
            classify_api_failure(400, "blocked content"),
            ProviderError::SafetyBlocked(_)
        ));
        assert!(matches!(
            classify_api_failure(500, "internal error"),
            ProviderError::Api(_)
        ));
    }
}
