//! Prompt templates and builders.
//!
//! Each builder validates its input and renders one instruction string for the
//! generation backend. Builders never call the backend.

use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;

use crate::error::AdapterError;
use crate::listing::{ListingOptimizationInput, MarketAnalysisInput, PropertyDescriptionInput};

/// Prompt template for property descriptions (`MiniJinja`).
pub const PROPERTY_DESCRIPTION_TEMPLATE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/prompts/property_description.md"
));

/// Prompt template for market analysis (`MiniJinja`).
pub const MARKET_ANALYSIS_TEMPLATE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/prompts/market_analysis.md"
));

/// Prompt template for listing optimization (`MiniJinja`).
pub const LISTING_OPTIMIZATION_TEMPLATE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/prompts/listing_optimization.md"
));

/// Builds the property description prompt.
///
/// # Errors
/// Returns a validation error if a required field is empty or not numeric.
pub fn build_description_prompt(input: &PropertyDescriptionInput) -> Result<String, AdapterError> {
    let fields = input.validate()?;
    render_prompt_template("property_description", PROPERTY_DESCRIPTION_TEMPLATE, &fields)
}

/// Builds the market analysis prompt.
///
/// The recent-sales line is present only when `recent_sales` is set.
///
/// # Errors
/// Returns a validation error if a required field is empty, not numeric, or
/// the year built is out of range.
pub fn build_market_analysis_prompt(input: &MarketAnalysisInput) -> Result<String, AdapterError> {
    let fields = input.validate()?;
    render_prompt_template("market_analysis", MARKET_ANALYSIS_TEMPLATE, &fields)
}

/// Builds the market analysis prompt, bounding the year built by `current_year`.
///
/// # Errors
/// See [`build_market_analysis_prompt`].
pub fn build_market_analysis_prompt_as_of(
    input: &MarketAnalysisInput,
    current_year: i32,
) -> Result<String, AdapterError> {
    let fields = input.validate_as_of(current_year)?;
    render_prompt_template("market_analysis", MARKET_ANALYSIS_TEMPLATE, &fields)
}

/// Builds the listing optimization prompt.
///
/// The target keywords line is present only when the keywords are not blank.
///
/// # Errors
/// Returns a validation error if the listing text is blank.
pub fn build_optimization_prompt(input: &ListingOptimizationInput) -> Result<String, AdapterError> {
    let fields = input.validate()?;
    render_prompt_template("listing_optimization", LISTING_OPTIMIZATION_TEMPLATE, &fields)
}

fn render_prompt_template<S: Serialize>(
    name: &str,
    template: &str,
    vars: &S,
) -> Result<String, AdapterError> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.add_template(name, template)?;

    let output = env.get_template(name)?.render(vars)?;
    Ok(output.trim().to_string())
}
