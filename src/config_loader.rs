use crate::backends::elevenlabs::DEFAULT_BASE_URL;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File};
use serde::Deserialize;
use std::path::Path;

/// Fallback variable for the API key, read when `DIALOGUE_API_KEY` is unset.
pub const FALLBACK_API_KEY_VAR: &str = "ELEVENLABS_API_KEY";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub base_url: String,
    pub api_key: String,
    pub request_timeout_secs: u64,
    pub output_file: String,
}

impl Settings {
    /// Loads settings, layering `config_file` (when given) above the default
    /// config files and below the environment.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let settings: Settings = Self::builder(config_file)?.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn builder(config_file: Option<&Path>) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let mut builder = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default(
                "api_key",
                std::env::var(FALLBACK_API_KEY_VAR).unwrap_or_default(),
            )?
            .set_default("request_timeout_secs", 120)?
            .set_default("output_file", "output.mp3")?
            // Merge with local config file (if exists)
            .add_source(File::with_name("Dialogue").required(false));

        if let Some(dir) = dirs::config_dir() {
            let user_file = dir.join("dialogue-synth").join("Dialogue");
            builder = builder.add_source(
                File::with_name(&user_file.to_string_lossy()).required(false),
            );
        }

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        // Merge with environment variables (e.g. DIALOGUE_API_KEY)
        Ok(builder.add_source(config::Environment::with_prefix("DIALOGUE")))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::Message(format!(
                "api_key is not set. Export DIALOGUE_API_KEY or {}",
                FALLBACK_API_KEY_VAR
            )));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::Message(format!(
                "Invalid base_url: {}. Must start with http:// or https://",
                self.base_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.output_file.trim().is_empty() {
            return Err(ConfigError::Message(
                "output_file must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
