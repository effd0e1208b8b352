// src/config.rs
use std::{env, path::PathBuf, str::FromStr, time::Duration};

use thiserror::Error;

use crate::services::prompt_builder::Locale;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct ModelConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
    pub temperature: f32,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    pub locale: Locale,
    pub knowledge_path: Option<PathBuf>,
    pub model: ModelConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build from any variable lookup; empty values count as unset.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("MODEL_API_KEY").ok_or(ConfigError::Missing("MODEL_API_KEY"))?;
        let timeout_secs: u64 = parse_or(&get, "MODEL_TIMEOUT_SECS", 30)?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "MODEL_TIMEOUT_SECS",
                value: timeout_secs.to_string(),
            });
        }

        Ok(Self {
            bind_addr: get("KLINIK_BIND").unwrap_or_else(|| "0.0.0.0:3000".to_string()),
            locale: parse_or(&get, "ASSISTANT_LOCALE", Locale::Turkish)?,
            knowledge_path: get("KNOWLEDGE_BASE_PATH").map(PathBuf::from),
            model: ModelConfig {
                api_url: get("MODEL_API_URL")
                    .unwrap_or_else(|| "https://api.mistral.ai/v1".to_string()),
                api_key,
                model: get("MODEL_NAME").unwrap_or_else(|| "mistral-small-latest".to_string()),
                timeout: Duration::from_secs(timeout_secs),
                temperature: parse_or(&get, "MODEL_TEMPERATURE", 0.3)?,
            },
        })
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
