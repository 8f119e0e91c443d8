//! End-to-end adapter operations: build prompt, call backend once, shape result.

use crate::error::AdapterError;
use crate::listing::{ListingOptimizationInput, MarketAnalysisInput, PropertyDescriptionInput};
use crate::prompts::{
    build_description_prompt, build_market_analysis_prompt, build_optimization_prompt,
};
use crate::providers::{
    GenerationBackend, GenerationConfig, GenerationResult, ProviderError, validate_config,
};
use crate::shaping::{OptimizationResult, shape_optimization};

/// User-facing features backed by the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Description,
    MarketAnalysis,
    Optimization,
}

impl Feature {
    pub fn id(&self) -> &'static str {
        match self {
            Feature::Description => "description",
            Feature::MarketAnalysis => "market_analysis",
            Feature::Optimization => "optimization",
        }
    }

    /// Fixed message displayed when generation fails.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Feature::Description => "Error generating description. Please try again.",
            Feature::MarketAnalysis => "Error analyzing market data. Please try again.",
            Feature::Optimization => "Error optimizing listing. Please try again.",
        }
    }
}

/// Generates a listing description. The text is returned verbatim.
///
/// # Errors
/// Returns a validation error before any backend call, or
/// `GenerationFailed` if the backend fails.
pub async fn generate_property_description(
    input: &PropertyDescriptionInput,
    config: &GenerationConfig,
    backend: &dyn GenerationBackend,
) -> Result<GenerationResult, AdapterError> {
    let prompt = build_description_prompt(input)?;
    run_generation(Feature::Description, &prompt, config, backend).await
}

/// Generates a market analysis. The text is returned verbatim.
///
/// # Errors
/// Returns a validation error before any backend call, or
/// `GenerationFailed` if the backend fails.
pub async fn analyze_market_data(
    input: &MarketAnalysisInput,
    config: &GenerationConfig,
    backend: &dyn GenerationBackend,
) -> Result<GenerationResult, AdapterError> {
    let prompt = build_market_analysis_prompt(input)?;
    run_generation(Feature::MarketAnalysis, &prompt, config, backend).await
}

/// Optimizes an existing listing and shapes the response into sections.
///
/// # Errors
/// Returns a validation error before any backend call, or
/// `GenerationFailed` if the backend fails.
pub async fn optimize_listing(
    input: &ListingOptimizationInput,
    config: &GenerationConfig,
    backend: &dyn GenerationBackend,
) -> Result<OptimizationResult, AdapterError> {
    let prompt = build_optimization_prompt(input)?;
    let result = run_generation(Feature::Optimization, &prompt, config, backend).await?;
    Ok(shape_optimization(&result.text))
}

/// Sends an already-built prompt to the backend exactly once.
///
/// The credential check is advisory: a failed check is logged and the call
/// still goes out. Use [`crate::providers::check_config`] first to enforce it.
///
/// # Errors
/// Returns `GenerationFailed` if the backend rejects the call or flags the
/// result as an error.
pub async fn run_generation(
    feature: Feature,
    prompt: &str,
    config: &GenerationConfig,
    backend: &dyn GenerationBackend,
) -> Result<GenerationResult, AdapterError> {
    let provider = config.provider;
    if !validate_config(config) {
        tracing::debug!(
            feature = feature.id(),
            provider = provider.id(),
            "proceeding without credential"
        );
    }

    tracing::info!(
        feature = feature.id(),
        provider = provider.id(),
        prompt_len = prompt.len(),
        "requesting generation"
    );

    let result = backend
        .generate(prompt, config)
        .await
        .map_err(|source| AdapterError::GenerationFailed { provider, source })?;

    if let Some(error) = &result.error {
        tracing::warn!(feature = feature.id(), provider = provider.id(), %error, "backend reported error");
        return Err(AdapterError::GenerationFailed {
            provider,
            source: ProviderError::api_error(error.clone()),
        });
    }

    tracing::debug!(
        feature = feature.id(),
        provider = provider.id(),
        text_len = result.text.len(),
        "generation complete"
    );
    Ok(result)
}
