// src/config.rs
use std::{env, path::PathBuf, str::FromStr};

use anyhow::{Context, Result};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_MAX_TOKENS: u32 = 500;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Process configuration, read once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: String,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub chat: ChatSettings,
    pub admin_api_key: Option<String>,
    pub species_catalog_path: PathBuf,
    pub animals_csv_path: PathBuf,
    pub static_dir: PathBuf,
}

/// Sampling parameters sent with every completion call.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_CHAT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let chat = ChatSettings {
            model: get("CHAT_MODEL").unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            max_tokens: parse_or(get("CHAT_MAX_TOKENS"), "CHAT_MAX_TOKENS", DEFAULT_MAX_TOKENS)?,
            temperature: parse_or(get("CHAT_TEMPERATURE"), "CHAT_TEMPERATURE", DEFAULT_TEMPERATURE)?,
        };

        Ok(Self {
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string()),
            openai_api_key: get("OPENAI_API_KEY"),
            openai_base_url: get("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            chat,
            admin_api_key: get("ADMIN_API_KEY"),
            species_catalog_path: get("SPECIES_CATALOG_PATH")
                .unwrap_or_else(|| "data/species.json".to_string())
                .into(),
            animals_csv_path: get("ANIMALS_CSV_PATH")
                .unwrap_or_else(|| "public/sample_animals.csv".to_string())
                .into(),
            static_dir: get("STATIC_DIR").unwrap_or_else(|| "public".to_string()).into(),
        })
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {key}: {value:?}")),
        None => Ok(default),
    }
}
