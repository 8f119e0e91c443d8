//! Offline stand-in for a real provider API.

use std::time::Duration;

use async_trait::async_trait;

use super::{GenerationBackend, GenerationConfig, GenerationResult, ProviderResult};

/// Canned backend that answers after a fixed delay.
///
/// No network access; the response only names the selected provider.
#[derive(Debug, Clone)]
pub struct MockBackend {
    delay: Duration,
}

impl MockBackend {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// A backend that answers immediately.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[async_trait]
impl GenerationBackend for MockBackend {
    async fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> ProviderResult<GenerationResult> {
        let provider = config.provider.id();
        tracing::debug!(
            provider,
            prompt_len = prompt.len(),
            delay = ?self.delay,
            "mock generation"
        );
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(GenerationResult::text(canned_response(provider)))
    }
}

fn canned_response(provider: &str) -> String {
    format!(
        "This is a mock response from {provider}. In production, this would be replaced with actual API calls to {provider}'s API.

Here's what would happen:
1. The prompt would be sent to {provider}'s API
2. The response would be processed and formatted
3. Real AI-generated content would be returned

For now, this is just a placeholder to demonstrate the interface."
    )
}
