//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/aetherforge/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/aetherforge/` (~/.config/aetherforge/)
//! - State/Logs: `$XDG_STATE_HOME/aetherforge/` (~/.local/state/aetherforge/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variables consulted for the Gemini API key, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Oracle backend configuration
    #[serde(default)]
    pub oracle: OracleConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Gemini backend configuration for the Oracle chat.
#[derive(Debug, Deserialize, Clone)]
pub struct OracleConfig {
    /// API key (can also use env var)
    pub api_key: Option<String>,

    /// API base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model used for grounded (standard mode) queries
    #[serde(default = "default_standard_model")]
    pub standard_model: String,

    /// Model used for deep analysis (strategic mode)
    #[serde(default = "default_strategic_model")]
    pub strategic_model: String,

    /// Reasoning-depth hint sent with strategic requests
    #[serde(default = "default_thinking_budget")]
    pub thinking_budget: u32,

    /// Request web-search grounding for standard queries
    #[serde(default = "default_grounding")]
    pub grounding: bool,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_endpoint(),
            standard_model: default_standard_model(),
            strategic_model: default_strategic_model(),
            thinking_budget: default_thinking_budget(),
            grounding: default_grounding(),
            timeout_secs: default_timeout(),
        }
    }
}

impl OracleConfig {
    /// Resolve the API key from config, then from the environment.
    ///
    /// Blank values are treated as absent.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                API_KEY_ENV_VARS.iter().find_map(|name| {
                    std::env::var(name)
                        .ok()
                        .filter(|key| !key.trim().is_empty())
                })
            })
    }
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_standard_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_strategic_model() -> String {
    "gemini-3-pro-preview".to_string()
}

fn default_thinking_budget() -> u32 {
    16000
}

fn default_grounding() -> bool {
    true
}

fn default_timeout() -> u64 {
    120
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/aetherforge/config.toml` (~/.config/aetherforge/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("aetherforge").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/aetherforge/` (~/.local/state/aetherforge/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("aetherforge")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/aetherforge/aetherforge.log` (~/.local/state/aetherforge/aetherforge.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("aetherforge.log")
    }
}
