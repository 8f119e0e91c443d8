pub mod config;
pub mod generate;
pub mod prompt;
pub mod providers;
