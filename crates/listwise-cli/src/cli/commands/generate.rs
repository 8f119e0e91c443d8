//! Generation command handlers (describe, analyze, optimize).

use anyhow::{Context, Result};
use listwise_core::adapter::Feature;
use listwise_core::clipboard::Clipboard;
use listwise_core::error::AdapterError;
use listwise_core::listing::{
    ListingOptimizationInput, MarketAnalysisInput, PropertyDescriptionInput,
};
use listwise_core::providers::{GenerationBackend, GenerationConfig, ProviderKind, check_config};
use listwise_core::shaping::OptimizationResult;
use listwise_core::{analyze_market_data, generate_property_description, optimize_listing};
use serde::Serialize;

/// Per-invocation settings resolved from flags and config.
pub struct GenerateOptions {
    pub generation: GenerationConfig,
    pub backend: Box<dyn GenerationBackend>,
    pub strict: bool,
    pub copy: bool,
    pub json: bool,
}

impl GenerateOptions {
    fn preflight(&self) -> Result<()> {
        if self.strict {
            check_config(&self.generation)?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct TextOutput<'a> {
    provider: &'a str,
    text: &'a str,
}

#[derive(Serialize)]
struct OptimizationOutput<'a> {
    provider: &'a str,
    #[serde(flatten)]
    result: &'a OptimizationResult,
}

pub async fn describe(input: &PropertyDescriptionInput, options: &GenerateOptions) -> Result<()> {
    options.preflight()?;
    let backend = options.backend.as_ref();
    let result = generate_property_description(input, &options.generation, backend)
        .await
        .map_err(|e| on_failure(Feature::Description, e))?;
    print_text(&result.text, options)
}

pub async fn analyze(input: &MarketAnalysisInput, options: &GenerateOptions) -> Result<()> {
    options.preflight()?;
    let result = analyze_market_data(input, &options.generation, options.backend.as_ref())
        .await
        .map_err(|e| on_failure(Feature::MarketAnalysis, e))?;
    print_text(&result.text, options)
}

pub async fn optimize(input: &ListingOptimizationInput, options: &GenerateOptions) -> Result<()> {
    options.preflight()?;
    let provider = options.generation.provider;
    let result = match optimize_listing(input, &options.generation, options.backend.as_ref()).await {
        Ok(result) => result,
        Err(err) => {
            // JSON output keeps its shape; the message goes in the description
            if options.json && err.is_generation_failure() {
                let fallback = OptimizationResult::error_fallback();
                println!("{}", optimization_json(provider, &fallback)?);
            }
            return Err(on_failure(Feature::Optimization, err));
        }
    };

    if options.json {
        println!("{}", optimization_json(provider, &result)?);
    } else {
        print!("{}", render_optimization(&result));
    }

    if options.copy {
        copy_result(&result.improved_description);
    }
    Ok(())
}

/// Generation failures surface as the feature's fixed message; the cause
/// stays in the chain.
fn on_failure(feature: Feature, err: AdapterError) -> anyhow::Error {
    if err.is_generation_failure() {
        tracing::error!(feature = feature.id(), error = %err, "generation failed");
        anyhow::Error::new(err).context(feature.fallback_message())
    } else {
        err.into()
    }
}

fn print_text(text: &str, options: &GenerateOptions) -> Result<()> {
    if options.json {
        let output = TextOutput {
            provider: options.generation.provider.id(),
            text,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("serialize output")?
        );
    } else {
        println!("{text}");
    }

    if options.copy {
        copy_result(text);
    }
    Ok(())
}

fn optimization_json(provider: ProviderKind, result: &OptimizationResult) -> Result<String> {
    let output = OptimizationOutput {
        provider: provider.id(),
        result,
    };
    serde_json::to_string_pretty(&output).context("serialize output")
}

fn copy_result(text: &str) {
    match Clipboard::copy(text) {
        Ok(()) => eprintln!("Copied to clipboard."),
        Err(e) => tracing::warn!(error = %e, "copy to clipboard failed"),
    }
}

fn render_optimization(result: &OptimizationResult) -> String {
    let mut out = String::new();
    out.push_str("Improved description\n");
    out.push_str(&result.improved_description);
    out.push('\n');

    for (title, items) in [
        ("SEO suggestions", &result.seo_suggestions),
        ("Missing features", &result.missing_features),
        ("Engagement tips", &result.engagement_tips),
    ] {
        if items.is_empty() {
            continue;
        }
        out.push('\n');
        out.push_str(title);
        out.push('\n');
        for item in items {
            out.push_str("- ");
            out.push_str(item);
            out.push('\n');
        }
    }
    out
}
