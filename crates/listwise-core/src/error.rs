//! Errors raised by the prompt/response adapter.

use thiserror::Error;

use crate::providers::{ProviderError, ProviderKind};

/// Failure of a single adapter action.
///
/// Every variant is terminal for the in-flight action; nothing here is retried.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// A required input field is missing or fails type coercion.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// The selected provider requires a credential that is absent.
    #[error("API key is required for {}", provider.id())]
    Config { provider: ProviderKind },

    /// The generation backend rejected the call or returned an error indicator.
    #[error("generation failed ({})", provider.id())]
    GenerationFailed {
        provider: ProviderKind,
        #[source]
        source: ProviderError,
    },

    /// An embedded prompt template failed to render.
    #[error("prompt template error: {0}")]
    Template(#[from] minijinja::Error),
}

impl AdapterError {
    pub(crate) fn required(field: &'static str) -> Self {
        Self::Validation {
            field,
            reason: "value is required".to_string(),
        }
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AdapterError::Validation { .. })
    }

    pub fn is_generation_failure(&self) -> bool {
        matches!(self, AdapterError::GenerationFailed { .. })
    }
}
