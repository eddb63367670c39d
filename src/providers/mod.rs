//! Cloud answer providers.
#![allow(dead_code)]

use std::sync::Arc;

pub mod gemini;
pub mod provider;

pub use provider::{GenerationParams, Provider, ProviderError, Result};

/// Apology shown when the provider rejects the credential.
pub const APOLOGY_AUTH: &str =
    "My AI brain isn't responding. Please check my API key configuration.";

/// Apology shown when the answer was blocked by safety filters.
pub const APOLOGY_SAFETY: &str =
    "I'm not sure how to answer that safely. Please ask me something else!";

/// Apology shown when no answer text came back (or no credential exists).
pub const APOLOGY_NO_ANSWER: &str =
    "I'm not sure how to answer that. Please ask me about MGM school rules!";

/// Apology shown for transport and unclassified failures.
pub const APOLOGY_GENERIC: &str = "I'm sorry, I'm having trouble thinking of an answer \
for that right now. Could you try rephrasing your question?";

/// The provider wired in by default.
pub fn default_provider() -> Arc<dyn Provider> {
    Arc::new(gemini::GeminiProvider::new())
}

/// Map a provider failure to the friendly line the robot speaks instead.
///
/// An absent credential counts as an empty response rather than an error the
/// user should see a trace for.
pub fn fallback_message(error: &ProviderError) -> &'static str {
    match error {
        ProviderError::Auth(_) => APOLOGY_AUTH,
        ProviderError::SafetyBlocked(_) => APOLOGY_SAFETY,
        ProviderError::NotConfigured | ProviderError::EmptyResponse => APOLOGY_NO_ANSWER,
        ProviderError::Http(_) | ProviderError::Api(_) => APOLOGY_GENERIC,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apologies_cover_the_error_taxonomy() {
        assert_eq!(
            fallback_message(&ProviderError::Auth("403".to_string())),
            APOLOGY_AUTH
        );
        assert_eq!(
            fallback_message(&ProviderError::SafetyBlocked("SAFETY".to_string())),
            APOLOGY_SAFETY
        );
        assert_eq!(fallback_message(&ProviderError::NotConfigured), APOLOGY_NO_ANSWER);
        assert_eq!(fallback_message(&ProviderError::EmptyResponse), APOLOGY_NO_ANSWER);
        assert_eq!(
            fallback_message(&ProviderError::Api("500".to_string())),
            APOLOGY_GENERIC
        );
    }
}
