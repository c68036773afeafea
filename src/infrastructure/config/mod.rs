// ============================================================
// APPLICATION CONFIG
// ============================================================
// Layered config: defaults < csv-insight.toml < CSV_INSIGHT_* env

use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    pub server: ServerConfig,

    /// Root directory for uploaded files and rendered plots
    pub upload_dir: PathBuf,

    #[validate(nested)]
    pub llm: LLMConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            upload_dir: PathBuf::from("uploads"),
            llm: LLMConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load config from defaults, an optional `csv-insight.toml`, and
    /// `CSV_INSIGHT_*` environment variables (double underscore for
    /// nesting, e.g. `CSV_INSIGHT_SERVER__PORT`). The LLM API key is
    /// taken from `OPENAI_API_KEY` unless already set.
    pub fn load() -> Result<Self> {
        let mut config: AppConfig = Figment::new()
            .merge(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file("csv-insight.toml"))
            .merge(Env::prefixed("CSV_INSIGHT_").split("__"))
            .extract()
            .map_err(|e| AppError::ValidationError(format!("Invalid configuration: {}", e)))?;

        if config.llm.api_key.is_none() {
            config.llm.api_key = std::env::var("OPENAI_API_KEY").ok();
        }

        config
            .validate()
            .map_err(|e| AppError::ValidationError(format!("Invalid configuration: {}", e)))?;

        Ok(config)
    }
}
