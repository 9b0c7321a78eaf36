//! Configuration loading, validation, and management for hearth.
//!
//! Loads configuration from `~/.hearth/config.toml` with environment
//! variable overrides. Validates all settings at startup; the provider
//! selection is resolved exactly once and never re-read mid-session.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The root configuration structure.
///
/// Maps directly to `~/.hearth/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Which upstream chat server to talk to ("nexa", "lmstudio",
    /// "anythingllm"). Required: startup fails when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_provider: Option<String>,

    /// API key override (providers fall back to their built-in key)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Default sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Max tokens requested per completion
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Memory configuration
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Where session transcripts are written
    #[serde(default = "default_transcript_dir")]
    pub transcript_dir: PathBuf,

    /// Gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Provider-specific overrides
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,

    /// Identity configuration
    #[serde(default)]
    pub identity: IdentityConfig,
}

fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    256
}
fn default_transcript_dir() -> PathBuf {
    PathBuf::from("transcripts")
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("model_provider", &self.model_provider)
            .field("api_key", &redact(&self.api_key))
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("memory", &self.memory)
            .field("transcript_dir", &self.transcript_dir)
            .field("gateway", &self.gateway)
            .field("providers", &self.providers)
            .field("identity", &self.identity)
            .finish()
    }
}

/// Short- and long-term memory settings.
///
/// `disable_short_memory` is a behavioral quirk carried over from the
/// reference system: the window is still populated when it is set; only
/// eviction-triggered summarization is skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Maximum messages kept in the short-term window (`W`)
    #[serde(default = "default_short_memory_size")]
    pub short_memory_size: usize,

    /// Skip eviction-triggered summarization while still filling the window
    #[serde(default)]
    pub disable_short_memory: bool,

    /// Token budget hint surfaced to the summarizer; never enforced
    #[serde(default = "default_long_memory_size")]
    pub long_memory_size: usize,

    /// Drop evicted messages without summarizing them
    #[serde(default = "default_true")]
    pub disable_long_memory: bool,
}

fn default_short_memory_size() -> usize {
    20
}
fn default_long_memory_size() -> usize {
    5096
}
fn default_true() -> bool {
    true
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            short_memory_size: default_short_memory_size(),
            disable_short_memory: false,
            long_memory_size: default_long_memory_size(),
            disable_long_memory: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 {
    8001
}
fn default_host() -> String {
    "127.0.0.1".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Override the assembled system prompt entirely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt_override: Option<String>,
}

/// Errors raised while loading or validating configuration.
///
/// All of these are fatal at startup; nothing here is recoverable
/// per-turn.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    #[error("model_provider is not set — add it to config.toml or export HEARTH_PROVIDER")]
    MissingProvider,

    #[error("Unsupported model_provider: {0}")]
    UnknownProvider(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_provider: None,
            api_key: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            memory: MemoryConfig::default(),
            transcript_dir: default_transcript_dir(),
            gateway: GatewayConfig::default(),
            providers: HashMap::new(),
            identity: IdentityConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load config from the default location with env var overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        // Environment variable overrides (highest priority)
        if let Ok(provider) = std::env::var("HEARTH_PROVIDER") {
            config.model_provider = Some(provider);
        }

        if config.api_key.is_none() {
            config.api_key = std::env::var("HEARTH_API_KEY").ok();
        }

        if let Ok(model) = std::env::var("HEARTH_MODEL") {
            let provider = config
                .model_provider
                .as_deref()
                .unwrap_or_default()
                .to_lowercase();
            config
                .providers
                .entry(provider)
                .or_insert_with(|| ProviderConfig {
                    api_key: None,
                    api_url: None,
                    model: None,
                })
                .model = Some(model);
        }

        Ok(config)
    }

    /// Load config from a specific path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// The hearth config directory (`~/.hearth`).
    pub fn config_dir() -> PathBuf {
        home_dir().join(".hearth")
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.temperature < 0.0 || self.temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.memory.short_memory_size == 0 {
            return Err(ConfigError::ValidationError(
                "memory.short_memory_size must be at least 1".into(),
            ));
        }

        if self.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "max_tokens must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(windows)]
fn home_dir() -> PathBuf {
    std::env::var("USERPROFILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

#[cfg(not(windows))]
fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}
