//! Dry-run handlers: print the prompt a generation command would send.

use anyhow::Result;
use listwise_core::listing::{
    ListingOptimizationInput, MarketAnalysisInput, PropertyDescriptionInput,
};
use listwise_core::prompts::{
    build_description_prompt, build_market_analysis_prompt, build_optimization_prompt,
};

pub fn describe(input: &PropertyDescriptionInput) -> Result<()> {
    println!("{}", build_description_prompt(input)?);
    Ok(())
}

pub fn analyze(input: &MarketAnalysisInput) -> Result<()> {
    println!("{}", build_market_analysis_prompt(input)?);
    Ok(())
}

pub fn optimize(input: &ListingOptimizationInput) -> Result<()> {
    println!("{}", build_optimization_prompt(input)?);
    Ok(())
}
