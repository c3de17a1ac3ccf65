use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::i18n::Locale;
use crate::store::DEFAULT_STORAGE_KEY;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Unset means CVs are kept in memory for the life of the process.
    pub database_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Settings for one wizard session on the client side.
#[derive(Debug, Clone)]
pub struct WizardConfig {
    pub api_url: String,
    /// Directory for the persisted draft. `None` keeps drafts in memory.
    pub draft_dir: Option<PathBuf>,
    pub storage_key: String,
    pub sync_debounce: Duration,
    pub redirect_delay: Duration,
    pub locale: Locale,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080".to_string(),
            draft_dir: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            sync_debounce: Duration::from_millis(300),
            redirect_delay: Duration::from_millis(3000),
            locale: Locale::default(),
        }
    }
}

impl WizardConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = WizardConfig::default();
        Ok(WizardConfig {
            api_url: require_env("CVGEN_API_URL")?,
            draft_dir: optional_env("CVGEN_DRAFT_DIR").map(PathBuf::from),
            storage_key: optional_env("CVGEN_STORAGE_KEY").unwrap_or(defaults.storage_key),
            sync_debounce: millis_env("CVGEN_SYNC_DEBOUNCE_MS")?.unwrap_or(defaults.sync_debounce),
            redirect_delay: millis_env("CVGEN_REDIRECT_DELAY_MS")?
                .unwrap_or(defaults.redirect_delay),
            locale: match optional_env("CVGEN_LOCALE") {
                Some(raw) => raw
                    .parse::<Locale>()
                    .map_err(anyhow::Error::msg)
                    .context("CVGEN_LOCALE must be 'en' or 'fr'")?,
                None => defaults.locale,
            },
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn millis_env(key: &str) -> Result<Option<Duration>> {
    optional_env(key)
        .map(|raw| {
            raw.parse::<u64>()
                .map(Duration::from_millis)
                .with_context(|| format!("{key} must be a number of milliseconds"))
        })
        .transpose()
}
