use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use openrouter_client::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Application configuration loaded from environment variables
///
/// Read once at startup. Request handlers never touch the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub openrouter_api_key: Option<String>,
    pub openrouter_model: String,
    pub openrouter_base_url: String,
    pub openrouter_timeout: Duration,
    pub openrouter_site_url: Option<String>,
    pub openrouter_app_name: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let timeout_secs: u64 = env::var("OPENROUTER_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .context("OPENROUTER_TIMEOUT_SECS must be a whole number of seconds")?;

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            // Missing key is not fatal: AI endpoints answer 500 until it is set.
            openrouter_api_key: non_empty_var("OPENROUTER_API_KEY"),
            openrouter_model: non_empty_var("OPENROUTER_MODEL")
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            openrouter_base_url: non_empty_var("OPENROUTER_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            openrouter_timeout: Duration::from_secs(timeout_secs),
            openrouter_site_url: non_empty_var("OPENROUTER_SITE_URL"),
            openrouter_app_name: non_empty_var("OPENROUTER_APP_NAME"),
        })
    }

    /// Provider settings for the OpenRouter client.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_key: self.openrouter_api_key.clone(),
            model: self.openrouter_model.clone(),
            base_url: self.openrouter_base_url.clone(),
            timeout: self.openrouter_timeout,
            referer: self.openrouter_site_url.clone(),
            app_title: self.openrouter_app_name.clone(),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
