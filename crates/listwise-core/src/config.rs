//! Configuration management for listwise.
//!
//! Loads configuration from ${LISTWISE_HOME}/config.toml with sensible defaults.
//! This is also the only place credentials are read from the environment.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::providers::{GenerationConfig, ProviderKind};

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
/// To update, edit default_config.toml directly or run `cargo run -p xtask`.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Merges user config values into the default template.
///
/// This ensures new comments/sections from the template are always present,
/// while preserving user's customized values.
fn merge_with_template(user_config: &str) -> Result<String> {
    use toml_edit::DocumentMut;

    let mut doc: DocumentMut = default_config_template()
        .parse()
        .context("Failed to parse default config template")?;

    let user_doc: DocumentMut = user_config.parse().context("Failed to parse user config")?;

    merge_items(doc.as_table_mut(), user_doc.as_table());

    Ok(doc.to_string())
}

/// Recursively merges items from source table into target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source.iter() {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

pub mod paths {
    //! Path resolution for listwise configuration and data directories.
    //!
    //! LISTWISE_HOME resolution order:
    //! 1. LISTWISE_HOME environment variable (if set)
    //! 2. ~/.config/listwise (default)

    use std::path::PathBuf;

    /// Returns the listwise home directory.
    pub fn listwise_home() -> PathBuf {
        if let Ok(home) = std::env::var("LISTWISE_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".listwise"),
            |h| h.join(".config").join("listwise"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        listwise_home().join("config.toml")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Selected provider id
    pub provider: String,

    /// Delay of the offline backend in milliseconds (0 disables)
    pub mock_delay_ms: u64,

    /// Per-provider credentials.
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl Config {
    const DEFAULT_MOCK_DELAY_MS: u64 = 1000;

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Resolves the configured provider id.
    pub fn provider_kind(&self) -> Result<ProviderKind> {
        self.provider
            .parse::<ProviderKind>()
            .map_err(anyhow::Error::msg)
            .context("Invalid provider in config")
    }

    pub fn mock_delay(&self) -> Duration {
        Duration::from_millis(self.mock_delay_ms)
    }

    /// Builds the per-call generation config for `kind`.
    ///
    /// Credential precedence: explicit override > config file > provider env var.
    pub fn generation_config(&self, kind: ProviderKind, api_key: Option<&str>) -> GenerationConfig {
        self.generation_config_with_env(kind, api_key, |var| std::env::var(var).ok())
    }

    fn generation_config_with_env(
        &self,
        kind: ProviderKind,
        api_key: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> GenerationConfig {
        let non_empty = |key: &str| {
            let trimmed = key.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        let resolved = api_key
            .and_then(non_empty)
            .or_else(|| self.providers.get(kind).effective_api_key().map(str::to_string))
            .or_else(|| {
                kind.api_key_env_var()
                    .and_then(&env)
                    .and_then(|value| non_empty(&value))
            });

        GenerationConfig {
            provider: kind,
            api_key: resolved,
        }
    }

    /// Saves only the provider field to the config file.
    ///
    /// Creates the file if it doesn't exist.
    /// Preserves existing fields and comments using `toml_edit`.
    pub fn save_provider(kind: ProviderKind) -> Result<()> {
        Self::save_provider_to(&paths::config_path(), kind)
    }

    /// Saves only the provider field to a specific config file path.
    ///
    /// Creates the file with default template if it doesn't exist.
    /// If file exists, merges user values into the latest template.
    pub fn save_provider_to(path: &Path, kind: ProviderKind) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let contents = if path.exists() {
            let user_config = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            merge_with_template(&user_config)?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        doc["provider"] = value(kind.id());

        Self::write_config(path, &doc.to_string())
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Generates a fresh config TOML from Rust defaults.
    ///
    /// Used by `xtask` to keep `default_config.toml` in sync with
    /// `Config::default()`. Comments come from the embedded template.
    pub fn generate() -> Result<String> {
        use toml_edit::DocumentMut;

        let generated_toml = toml::to_string(&Config::default())
            .context("Failed to serialize default config to TOML")?;

        let mut doc: DocumentMut = default_config_template()
            .parse()
            .context("Failed to parse default config template")?;

        let generated_doc: DocumentMut = generated_toml
            .parse()
            .context("Failed to parse generated config")?;

        merge_items(doc.as_table_mut(), generated_doc.as_table());

        Ok(doc.to_string())
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default().id().to_string(),
            mock_delay_ms: Self::DEFAULT_MOCK_DELAY_MS,
            providers: ProvidersConfig::default(),
        }
    }
}

/// Provider-specific configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub openai: ProviderConfig,
    pub anthropic: ProviderConfig,
    pub gemini: ProviderConfig,
    pub llama: ProviderConfig,
    pub deepseek: ProviderConfig,
}

impl ProvidersConfig {
    /// Returns the provider config for a given provider kind.
    pub fn get(&self, kind: ProviderKind) -> &ProviderConfig {
        match kind {
            ProviderKind::OpenAI => &self.openai,
            ProviderKind::Anthropic => &self.anthropic,
            ProviderKind::Gemini => &self.gemini,
            ProviderKind::Llama => &self.llama,
            ProviderKind::DeepSeek => &self.deepseek,
        }
    }
}

/// Provider configuration entry.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProviderConfig {
    /// Optional API key (overrides environment variable).
    pub api_key: Option<String>,
}

impl ProviderConfig {
    /// Returns the effective API key if set and non-empty.
    pub fn effective_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    /// Config loading: missing file returns defaults.
    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.provider, "openai");
        assert_eq!(config.mock_delay(), Duration::from_millis(1000));
    }

    /// Config loading: partial config merges with defaults.
    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "provider = \"llama\"\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.provider_kind().unwrap(), ProviderKind::Llama);
        assert_eq!(config.mock_delay_ms, 1000);
    }

    #[test]
    fn test_load_invalid_toml_mentions_path() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "provider = [").unwrap();

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(format!("{err:#}").contains("config.toml"));
    }

    #[test]
    fn test_unknown_provider_is_error() {
        let config = Config {
            provider: "mistral".to_string(),
            ..Default::default()
        };
        let err = config.provider_kind().unwrap_err();
        assert!(format!("{err:#}").contains("Unknown provider 'mistral'"));
    }

    /// The embedded template parses to the Rust defaults.
    #[test]
    fn test_default_template_matches_defaults() {
        let config: Config = toml::from_str(default_config_template()).unwrap();
        let defaults = Config::default();
        assert_eq!(config.provider, defaults.provider);
        assert_eq!(config.mock_delay_ms, defaults.mock_delay_ms);
        assert!(config.providers.openai.api_key.is_none());
    }

    /// Config init: creates file with defaults, creates parent dirs.
    #[test]
    fn test_init_creates_config_with_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        assert!(config_path.exists());
        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("provider = \"openai\""));
        assert!(contents.contains("# api_key ="));
    }

    /// Config init: fails if file exists (no silent overwrite).
    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "").unwrap();

        assert!(Config::init(&config_path).is_err());
    }

    #[test]
    fn test_save_provider_creates_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        Config::save_provider_to(&config_path, ProviderKind::Gemini).unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.provider_kind().unwrap(), ProviderKind::Gemini);
    }

    #[test]
    fn test_save_provider_preserves_user_values() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(
            &config_path,
            "provider = \"openai\"\nmock_delay_ms = 5\n\n[providers.anthropic]\napi_key = \"sk-ant\"\n",
        )
        .unwrap();

        Config::save_provider_to(&config_path, ProviderKind::Anthropic).unwrap();

        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("# Per-provider credentials."));
        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.provider, "anthropic");
        assert_eq!(config.mock_delay_ms, 5);
        assert_eq!(
            config.providers.anthropic.effective_api_key(),
            Some("sk-ant")
        );
    }

    #[test]
    fn test_generate_round_trips_defaults() {
        let generated = Config::generate().unwrap();
        let config: Config = toml::from_str(&generated).unwrap();
        assert_eq!(config.provider, "openai");
        assert_eq!(config.mock_delay_ms, 1000);
    }

    #[test]
    fn test_credential_override_wins() {
        let mut config = Config::default();
        config.providers.openai.api_key = Some("from-config".to_string());

        let generation =
            config.generation_config_with_env(ProviderKind::OpenAI, Some("from-flag"), |_| {
                Some("from-env".to_string())
            });
        assert_eq!(generation.api_key.as_deref(), Some("from-flag"));
    }

    #[test]
    fn test_credential_config_beats_env() {
        let mut config = Config::default();
        config.providers.deepseek.api_key = Some("  from-config  ".to_string());

        let generation = config.generation_config_with_env(ProviderKind::DeepSeek, None, |_| {
            Some("from-env".to_string())
        });
        assert_eq!(generation.api_key.as_deref(), Some("from-config"));
    }

    #[test]
    fn test_credential_falls_back_to_provider_env_var() {
        let config = Config::default();
        let generation =
            config.generation_config_with_env(ProviderKind::Anthropic, Some("  "), |var| {
                (var == "ANTHROPIC_API_KEY").then(|| "from-env".to_string())
            });
        assert_eq!(generation.api_key.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_llama_has_no_env_credential() {
        let config = Config::default();
        let generation = config.generation_config_with_env(ProviderKind::Llama, None, no_env);
        assert_eq!(generation.provider, ProviderKind::Llama);
        assert_eq!(generation.api_key, None);
    }
}
