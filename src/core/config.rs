//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.juvo/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use clap::ValueEnum;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::navigator::DEFAULT_LANGUAGE;
use crate::core::ussd::DEFAULT_ROOT_CODE;
use crate::{AdviceBackend, Page};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct JuvoConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub ussd: UssdConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub advice_source: Option<String>,
    pub default_language: Option<String>,
    pub start_page: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RemoteConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UssdConfig {
    pub root_code: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct VoiceConfig {
    pub enabled: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_API_BASE_URL: &str = "https://juvo-backend.onrender.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub advice_source: AdviceBackend,
    pub default_language: String,
    pub start_page: Page,
    pub api_base_url: String,
    pub timeout: Duration,
    pub root_code: String,
    pub voice_enabled: bool,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone, Copy)]
pub struct CliOverrides {
    pub advice_source: Option<AdviceBackend>,
    pub start_page: Option<Page>,
    pub no_voice: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.juvo/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".juvo").join("config.toml"))
}

/// Load config from `~/.juvo/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `JuvoConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<JuvoConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(JuvoConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(JuvoConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: JuvoConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# JUVO Health Simulator Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# advice_source = "local"        # "local" (built-in table) or "remote"
# default_language = "en"        # en, twi, fante, dagbani
# start_page = "ussd"            # "ussd" or "voice"

# [remote]
# base_url = "https://juvo-backend.onrender.com"   # Or set JUVO_API_BASE_URL
# timeout_secs = 10

# [ussd]
# root_code = "123"              # *123# opens the menu

# [voice]
# enabled = true
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &JuvoConfig, cli: CliOverrides) -> ResolvedConfig {
    // Advice source: CLI → env → config → default
    let advice_source = cli
        .advice_source
        .or_else(|| parse_choice(std::env::var("JUVO_ADVICE_SOURCE").ok(), "JUVO_ADVICE_SOURCE"))
        .or_else(|| parse_choice(config.general.advice_source.clone(), "general.advice_source"))
        .unwrap_or_default();

    // Start page: CLI → config → default
    let start_page = cli
        .start_page
        .or_else(|| parse_choice(config.general.start_page.clone(), "general.start_page"))
        .unwrap_or_default();

    // Default language: env → config → default
    let default_language = std::env::var("JUVO_DEFAULT_LANGUAGE")
        .ok()
        .or_else(|| config.general.default_language.clone())
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

    // API base URL: env → config → default
    let api_base_url = std::env::var("JUVO_API_BASE_URL")
        .ok()
        .or_else(|| config.remote.base_url.clone())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    let root_code = config
        .ussd
        .root_code
        .clone()
        .filter(|code| !code.is_empty() && code.bytes().all(|b| b.is_ascii_digit()))
        .unwrap_or_else(|| DEFAULT_ROOT_CODE.to_string());

    ResolvedConfig {
        advice_source,
        default_language,
        start_page,
        api_base_url,
        timeout: Duration::from_secs(config.remote.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        root_code,
        voice_enabled: !cli.no_voice && config.voice.enabled.unwrap_or(true),
    }
}

/// Parses a `ValueEnum` choice, warning about (and ignoring) unknown names.
fn parse_choice<T: ValueEnum>(value: Option<String>, origin: &str) -> Option<T> {
    let value = value?;
    match T::from_str(&value, true) {
        Ok(choice) => Some(choice),
        Err(_) => {
            warn!("Ignoring unknown value {:?} for {}", value, origin);
            None
        }
    }
}
