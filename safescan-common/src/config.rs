//! Configuration management for SafeScan services.
//!
//! All SafeScan services share a unified configuration file at
//! `~/.safescan/config.json`.
//!
//! # Configuration Priority
//!
//! 1. Explicit config file values
//! 2. Environment variables (SAFESCAN_* prefix)
//! 3. Default values
//!
//! # Environment Variable Mapping
//!
//! - `SAFESCAN_WEB_PORT` → services.web.port
//! - `SAFESCAN_BIND_ADDRESS` → network.bind
//! - `SAFESCAN_LOG_LEVEL` → observability.log_level
//! - `SAFESCAN_MODEL` → llm.model
//! - `GOOGLE_API_KEY` / `GEMINI_API_KEY` → secrets.llm.google

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Get the configuration directory path.
pub fn config_dir() -> PathBuf {
    directories::UserDirs::new().map_or_else(
        || PathBuf::from(".safescan"),
        |dirs| dirs.home_dir().join(".safescan"),
    )
}

/// Get the configuration file path.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

// ============================================================================
// Network Configuration (Global bind address)
// ============================================================================

/// Global network configuration.
///
/// Controls the bind address for the service. Default is `127.0.0.1` (local
/// only). Set to `0.0.0.0` to allow remote access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Bind address for the service.
    #[serde(default = "default_bind_address")]
    pub bind: String,

    /// Public URL (optional), used when the service sits behind a reverse
    /// proxy or tunnel.
    #[serde(default)]
    pub public_url: Option<String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            bind: default_bind_address(),
            public_url: None,
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1".into()
}

// ============================================================================
// Services Port Configuration
// ============================================================================

/// Service port configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServicesConfig {
    /// Web service (form, API, result page)
    #[serde(default)]
    pub web: ServicePortConfig,
}

/// Individual service port configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServicePortConfig {
    /// Port number for the service
    #[serde(default)]
    pub port: Option<u16>,
}

// ============================================================================
// Secrets Configuration
// ============================================================================

/// Grouped secrets configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SecretsConfig {
    /// LLM provider API keys
    #[serde(default)]
    pub llm: LlmSecretsConfig,
}

/// LLM provider API keys.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LlmSecretsConfig {
    /// Google Gemini API key
    #[serde(default)]
    pub google: Option<String>,
}

// ============================================================================
// LLM Configuration
// ============================================================================

/// Settings for the outbound model call.
///
/// The temperature stays low so the model follows the scoring rubric instead
/// of improvising.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Model identifier
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// Sampling temperature (0.0 - 1.0)
    #[serde(default = "default_llm_temperature")]
    pub temperature: f64,

    /// Maximum tokens the model may generate
    #[serde(default = "default_llm_max_output_tokens")]
    pub max_output_tokens: i64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_llm_model(),
            temperature: default_llm_temperature(),
            max_output_tokens: default_llm_max_output_tokens(),
        }
    }
}

fn default_llm_model() -> String {
    "gemini-2.5-flash".into()
}

fn default_llm_temperature() -> f64 {
    0.1
}

fn default_llm_max_output_tokens() -> i64 {
    2048
}

// ============================================================================
// Observability Configuration
// ============================================================================

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Base log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log output format: "json" or "pretty"
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure for SafeScan services.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// JSON Schema reference
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Global network configuration (bind address)
    #[serde(default)]
    pub network: NetworkConfig,

    /// Service port configuration
    #[serde(default)]
    pub services: ServicesConfig,

    /// Grouped secrets (API keys)
    #[serde(default)]
    pub secrets: SecretsConfig,

    /// Model call settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from the default path.
    pub fn load() -> Result<Self> {
        let path = config_path();
        if !path.exists() {
            tracing::info!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Load configuration with environment variable fallbacks.
    pub fn load_with_env() -> Result<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(port) = std::env::var("SAFESCAN_WEB_PORT") {
            if let Ok(p) = port.parse() {
                self.services.web.port = Some(p);
            }
        }

        if let Ok(bind) = std::env::var("SAFESCAN_BIND_ADDRESS") {
            self.network.bind = bind;
        }

        if let Ok(level) = std::env::var("SAFESCAN_LOG_LEVEL") {
            self.observability.log_level = level;
        }

        if let Ok(model) = std::env::var("SAFESCAN_MODEL") {
            self.llm.model = model;
        }

        if let Ok(key) =
            std::env::var("GOOGLE_API_KEY").or_else(|_| std::env::var("GEMINI_API_KEY"))
        {
            self.secrets.llm.google = Some(key);
        }
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<()> {
        let path = config_path();
        let dir = config_dir();

        if !dir.exists() {
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create config directory {}", dir.display()))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    // =========================================================================
    // Convenience accessors
    // =========================================================================

    /// Get the effective bind address.
    pub fn bind_address(&self) -> &str {
        &self.network.bind
    }

    /// Get the effective port for the web service.
    pub fn web_port(&self) -> u16 {
        self.services.web.port.unwrap_or(4480)
    }

    /// Get the web service endpoint URL, e.g. "http://127.0.0.1:4480".
    pub fn web_endpoint(&self) -> String {
        format!("http://{}:{}", self.bind_address(), self.web_port())
    }

    /// Get the configured Google API key, if any.
    pub fn google_api_key(&self) -> Option<&str> {
        self.secrets
            .llm
            .google
            .as_deref()
            .filter(|key| !key.is_empty())
    }
}
