//! Provider resolution — selects the upstream client from config.
//!
//! The provider is resolved exactly once at startup and injected into
//! everything that talks to the model. An unset or unrecognized
//! `model_provider` is fatal.

use std::sync::Arc;
use hearth_config::{AppConfig, ConfigError};
use hearth_core::model::ChatModel;
use crate::http::HttpChatModel;

/// Build the configured chat client.
///
/// Matches the provider name case-insensitively, then applies any
/// `[providers.<name>]` overrides plus the top-level `api_key`.
pub fn build_from_config(config: &AppConfig) -> Result<Arc<dyn ChatModel>, ConfigError> {
    let name = config
        .model_provider
        .as_deref()
        .ok_or(ConfigError::MissingProvider)?;

    let mut model = match name.to_lowercase().as_str() {
        "nexa" => HttpChatModel::nexa(),
        "lmstudio" => HttpChatModel::lm_studio(),
        "anythingllm" => HttpChatModel::anything_llm(),
        other => return Err(ConfigError::UnknownProvider(other.to_string())),
    };

    if let Some(provider_config) = config.providers.get(&name.to_lowercase()) {
        if let Some(url) = &provider_config.api_url {
            model = model.with_url(url);
        }
        if let Some(key) = &provider_config.api_key {
            model = model.with_api_key(key);
        }
        if let Some(model_id) = &provider_config.model {
            model = model.with_model(model_id);
        }
    }

    if let Some(key) = &config.api_key {
        model = model.with_api_key(key);
    }

    model = model.with_max_tokens(config.max_tokens);

    Ok(Arc::new(model))
}

/// Resolve the configured model identifier without building a client.
/// Used by status output and the gateway health endpoint.
pub fn configured_model(config: &AppConfig) -> Option<String> {
    let name = config.model_provider.as_deref()?.to_lowercase();
    config
        .providers
        .get(&name)
        .and_then(|p| p.model.clone())
        .or_else(|| match name.as_str() {
            "nexa" => Some("NexaAI/Llama3.2-3B-NPU-Turbo".into()),
            "lmstudio" => Some("local-model".into()),
            "anythingllm" => Some("default-workspace".into()),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_config::ProviderConfig;

    #[test]
    fn unset_provider_is_fatal() {
        let config = AppConfig::default();
        let err = build_from_config(&config).err().unwrap();
        assert!(matches!(err, ConfigError::MissingProvider));
    }

    #[test]
    fn unknown_provider_is_fatal() {
        let config = AppConfig {
            model_provider: Some("openai".into()),
            ..Default::default()
        };
        let err = build_from_config(&config).err().unwrap();
        match err {
            ConfigError::UnknownProvider(name) => assert_eq!(name, "openai"),
            other => panic!("expected UnknownProvider, got {other:?}"),
        }
    }

    #[test]
    fn known_provider_resolves() {
        let config = AppConfig {
            model_provider: Some("nexa".into()),
            ..Default::default()
        };
        let model = build_from_config(&config).unwrap();
        assert_eq!(model.name(), "nexa");
    }

    #[test]
    fn provider_match_is_case_insensitive() {
        let config = AppConfig {
            model_provider: Some("LMStudio".into()),
            ..Default::default()
        };
        let model = build_from_config(&config).unwrap();
        assert_eq!(model.name(), "lmstudio");
    }

    #[test]
    fn configured_model_honors_override() {
        let mut config = AppConfig {
            model_provider: Some("nexa".into()),
            ..Default::default()
        };
        config.providers.insert(
            "nexa".into(),
            ProviderConfig {
                api_key: None,
                api_url: None,
                model: Some("custom/model".into()),
            },
        );
        assert_eq!(configured_model(&config).as_deref(), Some("custom/model"));
    }
}
