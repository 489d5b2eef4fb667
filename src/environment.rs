// src/environment.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::core::service_client;

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";
pub const API_URL_VAR: &str = "RESUME_SCANNER_API_URL";
const DEFAULT_LOCAL_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    pub api_base_url: String,
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: EnvironmentConfig,
    production: Option<EnvironmentConfig>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_LOCAL_API_URL.to_string(),
            timeout_seconds: None,
        }
    }
}

impl EnvironmentConfig {
    /// Load configuration based on environment. An explicit `api_url`
    /// takes precedence over `RESUME_SCANNER_API_URL`.
    pub fn load(config_path: &Path, api_url: Option<String>) -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let api_url_override = api_url.or_else(|| std::env::var(API_URL_VAR).ok());
        Self::resolve(config_path, &environment, api_url_override)
    }

    pub fn get_environment() -> String {
        std::env::var("RESUME_SCANNER_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }

    /// Pick the section for `environment`, then apply the URL override.
    /// Without a config file only `local` has a usable default.
    pub fn resolve(
        config_path: &Path,
        environment: &str,
        api_url_override: Option<String>,
    ) -> Result<Self> {
        let api_url_override = api_url_override.filter(|url| !url.trim().is_empty());

        let config = if config_path.exists() {
            Self::load_from_file(config_path, environment)?
        } else if environment == "production" && api_url_override.is_none() {
            anyhow::bail!(
                "{} not found and {} is not set. Cannot resolve the production scoring API.",
                config_path.display(),
                API_URL_VAR
            );
        } else {
            warn!(
                "{} not found, using default scoring API {}",
                config_path.display(),
                DEFAULT_LOCAL_API_URL
            );
            Self::default()
        };

        let config = match api_url_override {
            Some(url) => config.with_api_url(url),
            None => config,
        };

        config.match_url()?;
        Ok(config)
    }

    fn load_from_file(config_path: &Path, environment: &str) -> Result<Self> {
        let config_content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config_file: ConfigFile = serde_yaml::from_str(&config_content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        match environment {
            "production" => config_file.production.with_context(|| {
                format!(
                    "No production section in {}",
                    config_path.display()
                )
            }),
            _ => Ok(config_file.local),
        }
    }

    pub fn with_api_url(mut self, api_base_url: String) -> Self {
        self.api_base_url = api_base_url;
        self
    }

    pub fn with_timeout(mut self, timeout_seconds: Option<u64>) -> Self {
        if timeout_seconds.is_some() {
            self.timeout_seconds = timeout_seconds;
        }
        self
    }

    /// Full URL of the match endpoint
    pub fn match_url(&self) -> Result<String> {
        service_client::match_url(&self.api_base_url)
    }
}
