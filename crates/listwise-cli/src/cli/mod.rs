//! CLI entry and dispatch.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use listwise_core::config;
use listwise_core::error::AdapterError;
use listwise_core::listing::{
    Condition, ListingOptimizationInput, MarketAnalysisInput, MarketPropertyType,
    PropertyDescriptionInput, PropertyType, Tone,
};
use listwise_core::providers::{MockBackend, ProviderKind};

use crate::logging;

mod commands;

#[derive(Parser)]
#[command(name = "listwise")]
#[command(version)]
#[command(about = "Real-estate listing copy from structured property details")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Provider to use (openai, anthropic, gemini, llama, deepseek); overrides config
    #[arg(long, global = true, value_parser = parse_provider)]
    provider: Option<ProviderKind>,

    /// API key for the selected provider; overrides config and provider env vars
    #[arg(long, global = true, env = "LISTWISE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Fail instead of proceeding when the provider's API key is missing
    #[arg(long, global = true)]
    strict: bool,

    /// Copy the result to the clipboard
    #[arg(long, global = true)]
    copy: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Generate a listing description from property details
    Describe(DescribeArgs),
    /// Analyze market data for a property
    Analyze(AnalyzeArgs),
    /// Optimize an existing listing for SEO and engagement
    Optimize(OptimizeArgs),
    /// Print the prompt a command would send, without calling a provider
    Prompt {
        #[command(subcommand)]
        command: PromptCommands,
    },
    /// List providers and their credential status
    Providers,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum PromptCommands {
    /// Prompt for `listwise describe`
    Describe(DescribeArgs),
    /// Prompt for `listwise analyze`
    Analyze(AnalyzeArgs),
    /// Prompt for `listwise optimize`
    Optimize(OptimizeArgs),
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Generate a fresh config from Rust defaults (for xtask)
    Generate,
    /// Persist the provider used by every command
    SetProvider {
        /// Provider id
        #[arg(value_name = "PROVIDER", value_parser = parse_provider)]
        provider: ProviderKind,
    },
}

/// Property details for the description generator.
#[derive(clap::Args, Debug, Clone)]
pub struct DescribeArgs {
    /// Number of bedrooms
    #[arg(long)]
    bedrooms: String,

    /// Number of bathrooms
    #[arg(long)]
    bathrooms: String,

    /// Living area in square feet
    #[arg(long)]
    square_feet: String,

    /// house, apartment, condo, townhouse
    #[arg(long, value_parser = parse_choice::<PropertyType>)]
    property_type: PropertyType,

    /// Key features, e.g. "pool, garage"
    #[arg(long)]
    features: String,

    /// professional, luxury, modern, family-friendly
    #[arg(long, default_value = "professional", value_parser = parse_choice::<Tone>)]
    tone: Tone,
}

impl From<&DescribeArgs> for PropertyDescriptionInput {
    fn from(args: &DescribeArgs) -> Self {
        PropertyDescriptionInput {
            bedrooms: args.bedrooms.clone(),
            bathrooms: args.bathrooms.clone(),
            square_feet: args.square_feet.clone(),
            property_type: args.property_type,
            features: args.features.clone(),
            tone: args.tone,
        }
    }
}

/// Property details for the market analysis.
#[derive(clap::Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Street address
    #[arg(long)]
    address: String,

    /// single-family, multi-family, condo, townhouse, commercial
    #[arg(long, value_parser = parse_choice::<MarketPropertyType>)]
    property_type: MarketPropertyType,

    /// Living area in square feet
    #[arg(long)]
    square_feet: String,

    /// Construction year (1800 to the current year)
    #[arg(long)]
    year_built: String,

    /// excellent, good, fair, needs-work
    #[arg(long, default_value = "good", value_parser = parse_choice::<Condition>)]
    condition: Condition,

    /// Leave recent sales in the area out of the analysis
    #[arg(long = "no-recent-sales")]
    no_recent_sales: bool,
}

impl From<&AnalyzeArgs> for MarketAnalysisInput {
    fn from(args: &AnalyzeArgs) -> Self {
        MarketAnalysisInput {
            address: args.address.clone(),
            property_type: args.property_type,
            square_feet: args.square_feet.clone(),
            year_built: args.year_built.clone(),
            condition: args.condition,
            recent_sales: !args.no_recent_sales,
        }
    }
}

/// Listing text to optimize.
#[derive(clap::Args, Debug, Clone)]
pub struct OptimizeArgs {
    /// Current listing description
    #[arg(long, conflicts_with = "listing_file", required_unless_present = "listing_file")]
    listing: Option<String>,

    /// Read the current listing from a file
    #[arg(long, value_name = "PATH")]
    listing_file: Option<PathBuf>,

    /// Target keywords, comma-separated
    #[arg(long, default_value = "")]
    keywords: String,
}

impl OptimizeArgs {
    fn to_input(&self) -> Result<ListingOptimizationInput> {
        let listing = match (&self.listing, &self.listing_file) {
            (Some(text), _) => text.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("read listing from {}", path.display()))?,
            (None, None) => String::new(),
        };
        Ok(ListingOptimizationInput::new(listing, self.keywords.clone()))
    }
}

fn parse_provider(value: &str) -> Result<ProviderKind, String> {
    value.parse()
}

fn parse_choice<T>(value: &str) -> Result<T, String>
where
    T: FromStr<Err = AdapterError>,
{
    value.parse().map_err(|e: AdapterError| e.to_string())
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = logging::init();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli {
        command,
        provider,
        api_key,
        strict,
        copy,
        json,
    } = cli;

    let generate_options = || -> Result<commands::generate::GenerateOptions> {
        let config = config::Config::load().context("load config")?;
        let kind = match provider {
            Some(kind) => kind,
            None => config.provider_kind()?,
        };
        Ok(commands::generate::GenerateOptions {
            generation: config.generation_config(kind, api_key.as_deref()),
            backend: Box::new(MockBackend::new(config.mock_delay())),
            strict,
            copy,
            json,
        })
    };

    match command {
        Commands::Describe(args) => {
            let input = PropertyDescriptionInput::from(&args);
            commands::generate::describe(&input, &generate_options()?).await
        }
        Commands::Analyze(args) => {
            let input = MarketAnalysisInput::from(&args);
            commands::generate::analyze(&input, &generate_options()?).await
        }
        Commands::Optimize(args) => {
            let input = args.to_input()?;
            commands::generate::optimize(&input, &generate_options()?).await
        }

        Commands::Prompt { command } => match command {
            PromptCommands::Describe(args) => {
                commands::prompt::describe(&PropertyDescriptionInput::from(&args))
            }
            PromptCommands::Analyze(args) => {
                commands::prompt::analyze(&MarketAnalysisInput::from(&args))
            }
            PromptCommands::Optimize(args) => commands::prompt::optimize(&args.to_input()?),
        },

        Commands::Providers => {
            let config = config::Config::load().context("load config")?;
            commands::providers::list(&config, provider, api_key.as_deref(), json)
        }

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Generate => commands::config::generate(),
            ConfigCommands::SetProvider { provider } => commands::config::set_provider(provider),
        },
    }
}
