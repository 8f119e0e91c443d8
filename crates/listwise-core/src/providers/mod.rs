//! Generation backend capability and provider selection.

pub mod mock;
pub mod shared;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use mock::MockBackend;
pub use shared::{GenerationResult, ProviderError, ProviderErrorKind, ProviderResult};

use crate::error::AdapterError;

/// Text-generation provider a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    OpenAI,
    Anthropic,
    Gemini,
    Llama,
    DeepSeek,
}

impl ProviderKind {
    /// Returns all provider kinds.
    pub fn all() -> &'static [ProviderKind] {
        &[
            ProviderKind::OpenAI,
            ProviderKind::Anthropic,
            ProviderKind::Gemini,
            ProviderKind::Llama,
            ProviderKind::DeepSeek,
        ]
    }

    /// Returns the string identifier used in config files and on the command line.
    pub fn id(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Gemini => "gemini",
            ProviderKind::Llama => "llama",
            ProviderKind::DeepSeek => "deepseek",
        }
    }

    /// Returns the `ProviderKind` for a given id string.
    pub fn from_id(id: &str) -> Option<ProviderKind> {
        match id.trim().to_lowercase().as_str() {
            "openai" => Some(ProviderKind::OpenAI),
            "anthropic" | "claude" => Some(ProviderKind::Anthropic),
            "gemini" | "google" => Some(ProviderKind::Gemini),
            "llama" | "ollama" | "local" => Some(ProviderKind::Llama),
            "deepseek" => Some(ProviderKind::DeepSeek),
            _ => None,
        }
    }

    /// Returns the human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "OpenAI GPT-4",
            ProviderKind::Anthropic => "Anthropic Claude",
            ProviderKind::Gemini => "Google Gemini",
            ProviderKind::Llama => "Meta Llama 2",
            ProviderKind::DeepSeek => "DeepSeek",
        }
    }

    pub fn api_key_env_var(&self) -> Option<&'static str> {
        match self {
            ProviderKind::OpenAI => Some("OPENAI_API_KEY"),
            ProviderKind::Anthropic => Some("ANTHROPIC_API_KEY"),
            ProviderKind::Gemini => Some("GEMINI_API_KEY"),
            ProviderKind::Llama => None,
            ProviderKind::DeepSeek => Some("DEEPSEEK_API_KEY"),
        }
    }

    /// Returns false only for the locally hosted model.
    pub fn requires_credential(&self) -> bool {
        !matches!(self, ProviderKind::Llama)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ProviderKind::from_id(value).ok_or_else(|| {
            let valid: Vec<&str> = ProviderKind::all().iter().map(ProviderKind::id).collect();
            format!(
                "Unknown provider '{}'. Valid options: {}",
                value.trim(),
                valid.join(", ")
            )
        })
    }
}

/// Per-call generation settings.
///
/// Passed explicitly into every adapter call; there is no process-wide selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationConfig {
    pub provider: ProviderKind,
    pub api_key: Option<String>,
}

impl GenerationConfig {
    pub fn new(provider: ProviderKind) -> Self {
        Self {
            provider,
            api_key: None,
        }
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Returns the effective API key if set and non-empty.
    pub fn effective_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Returns false when the provider needs a credential and none is set.
///
/// Advisory only: callers decide whether to proceed.
pub fn validate_config(config: &GenerationConfig) -> bool {
    if config.provider.requires_credential() && config.effective_api_key().is_none() {
        tracing::warn!(provider = config.provider.id(), "API key is required");
        return false;
    }
    true
}

/// Hard-failure form of [`validate_config`].
///
/// # Errors
/// Returns `AdapterError::Config` when the credential is missing.
pub fn check_config(config: &GenerationConfig) -> Result<(), AdapterError> {
    if validate_config(config) {
        Ok(())
    } else {
        Err(AdapterError::Config {
            provider: config.provider,
        })
    }
}

/// A pluggable text-generation backend.
///
/// Implementations own transport, credentials on the wire, and timeouts. The
/// adapter calls `generate` exactly once per user action and never retries.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> ProviderResult<GenerationResult>;
}
