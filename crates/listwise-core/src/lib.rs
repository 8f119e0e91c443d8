//! Core listwise library (input types, prompts, providers, response shaping, config).

pub mod adapter;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod listing;
pub mod prompts;
pub mod providers;
pub mod shaping;

pub use adapter::{Feature, analyze_market_data, generate_property_description, optimize_listing};
pub use error::AdapterError;
pub use shaping::{OptimizationResult, shape_optimization};
