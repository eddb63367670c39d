//! Answer pipeline orchestration.
//!
//! Thin glue only: local rules first, cloud provider second, apology last.

use std::sync::Arc;

use crate::config::Settings;
use crate::providers::{self, GenerationParams, Provider};
use crate::rules::Resolver;

pub struct Assistant {
    resolver: Resolver,
    provider: Arc<dyn Provider>,
    params: GenerationParams,
}

impl Assistant {
    /// Build the default pipeline over the built-in tables and provider.
    pub fn new(settings: &Settings) -> Self {
        Self::with_components(
            Resolver::with_accuracy(settings.match_accuracy),
            providers::default_provider(),
            GenerationParams::from(settings),
        )
    }

    pub fn with_components(
        resolver: Resolver,
        provider: Arc<dyn Provider>,
        params: GenerationParams,
    ) -> Self {
        Self {
            resolver,
            provider,
            params,
        }
    }

    /// Answer a question. Always produces something speakable; provider
    /// failures come back as the matching apology line.
    pub async fn answer(&self, question: &str) -> String {
        if let Some(answer) = self.resolver.resolve(question) {
            tracing::info!("Answered locally");
            return answer;
        }

        tracing::info!("No local match, asking {}", self.provider.name());
        match self.provider.generate(question, &self.params).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Provider failed: {}", e);
                providers::fallback_message(&e).to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{ProviderError, Result as ProviderResult, APOLOGY_NO_ANSWER};
    use crate::rules::{LegacyFact, Rule};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockProvider {
        calls: AtomicUsize,
        response: ProviderResult<String>,
    }

    impl MockProvider {
        fn answering(text: &str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                response: Ok(text.to_string()),
            })
        }

        fn failing(error: ProviderError) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                response: Err(error),
            })
        }
    }

    #[async_trait]
    impl Provider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        fn is_configured(&self) -> bool {
            true
        }

        async fn generate(
            &self,
            _question: &str,
            _params: &GenerationParams,
        ) -> ProviderResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.response {
                Ok(text) => Ok(text.clone()),
                Err(ProviderError::EmptyResponse) => Err(ProviderError::EmptyResponse),
                Err(ProviderError::NotConfigured) => Err(ProviderError::NotConfigured),
                Err(e) => Err(ProviderError::Api(e.to_string())),
            }
        }
    }

    fn params() -> GenerationParams {
        GenerationParams {
            max_output_tokens: 300,
            temperature: 0.7,
        }
    }

    fn local_only_resolver() -> Resolver {
        Resolver::new(
            vec![Rule::new("What is the assembly time?", "8:45 AM sharp")],
            Vec::<LegacyFact>::new(),
            0.6,
        )
    }

    #[tokio::test]
    async fn local_match_skips_the_provider() {
        let provider = MockProvider::answering("cloud answer");
        let assistant =
            Assistant::with_components(local_only_resolver(), provider.clone(), params());

        let answer = assistant.answer("What is the assembly time?").await;
        assert_eq!(answer, "8:45 AM sharp");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unmatched_question_goes_to_the_provider() {
        let provider = MockProvider::answering("cloud answer");
        let assistant =
            Assistant::with_components(local_only_resolver(), provider.clone(), params());

        let answer = assistant.answer("what is a black hole").await;
        assert_eq!(answer, "cloud answer");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn provider_failure_becomes_an_apology() {
        let provider = MockProvider::failing(ProviderError::EmptyResponse);
        let assistant = Assistant::with_components(local_only_resolver(), provider, params());

        let answer = assistant.answer("what is a black hole").await;
        assert_eq!(answer, APOLOGY_NO_ANSWER);
    }

    #[tokio::test]
    async fn missing_credential_is_not_a_crash() {
        let provider = MockProvider::failing(ProviderError::NotConfigured);
        let assistant = Assistant::with_components(local_only_resolver(), provider, params());

        let answer = assistant.answer("what is a black hole").await;
        assert_eq!(answer, APOLOGY_NO_ANSWER);
    }
}
