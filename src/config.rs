use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure for the review summary client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub directory: DirectoryConfig,
    pub gemini: GeminiConfig,
    pub search: SearchConfig,
    pub storage: StorageConfig,
}

/// Review directory endpoint settings. The bearer token belongs to the
/// application deployment, not the end user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    pub base_url: String,
    pub bearer_token: String,
    /// Comments are fetched as a single bounded page; reviews beyond the
    /// limit are knowingly truncated.
    pub comment_page: u32,
    pub comment_limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub debounce_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// File backing the persisted key-value slots.
    pub path: String,
    /// Entry name for the persisted Gemini credential.
    pub api_key_entry: String,
}

impl Config {
    /// Load configuration from file with environment variable overrides.
    /// ALWAYS returns a valid config - never fails
    pub fn load() -> Self {
        if dotenvy::dotenv().is_ok() {
            tracing::info!("Loaded .env from current directory");
        }

        let config_path =
            env::var("REVIEW_SUMMARY_CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            match fs::read_to_string(&config_path) {
                Ok(contents) => match serde_yaml::from_str::<Config>(&contents) {
                    Ok(config) => {
                        tracing::info!("Loaded configuration from {}", config_path);
                        config
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to parse config file {}: {} - using defaults",
                            config_path,
                            e
                        );
                        Self::default()
                    }
                },
                Err(e) => {
                    tracing::error!(
                        "Failed to read config file {}: {} - using defaults",
                        config_path,
                        e
                    );
                    Self::default()
                }
            }
        } else {
            Self::default()
        };

        config.apply_env_overrides();

        if let Err(e) = config.validate() {
            tracing::warn!("Config validation warnings: {} - continuing anyway", e);
        }

        config
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(base_url) = env::var("UFABC_API_BASE_URL") {
            self.directory.base_url = base_url;
        }
        if let Ok(token) = env::var("UFABC_API_TOKEN") {
            self.directory.bearer_token = token;
        }
        if let Ok(limit) = env::var("UFABC_COMMENT_LIMIT") {
            if let Ok(limit_num) = limit.parse() {
                self.directory.comment_limit = limit_num;
            }
        }
        if let Ok(model) = env::var("GEMINI_MODEL") {
            self.gemini.model = model;
        }
        if let Ok(debounce) = env::var("REVIEW_DEBOUNCE_MS") {
            if let Ok(debounce_ms) = debounce.parse() {
                self.search.debounce_ms = debounce_ms;
            }
        }
        if let Ok(path) = env::var("REVIEW_STORE_PATH") {
            self.storage.path = path;
        }
    }

    /// Validate configuration
    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.directory.base_url.is_empty() {
            return Err("Directory base_url cannot be empty".into());
        }
        if self.directory.bearer_token.is_empty() {
            return Err("UFABC_API_TOKEN environment variable must be set".into());
        }
        if self.directory.comment_limit == 0 {
            return Err("Comment limit cannot be 0".into());
        }
        if self.search.debounce_ms == 0 {
            return Err("Debounce delay cannot be 0".into());
        }
        if self.gemini.model.is_empty() {
            return Err("Gemini model cannot be empty".into());
        }
        Ok(())
    }

    /// Get the debounce delay as a Duration
    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory: DirectoryConfig {
                base_url: "https://api.ufabcnext.com/v1/".to_string(),
                bearer_token: env::var("UFABC_API_TOKEN").unwrap_or_else(|_| {
                    tracing::warn!("UFABC_API_TOKEN not set, using placeholder");
                    "PLACEHOLDER_UFABC_API_TOKEN".to_string()
                }),
                comment_page: 0,
                comment_limit: 900,
            },
            gemini: GeminiConfig {
                model: "gemini-pro".to_string(),
            },
            search: SearchConfig { debounce_ms: 500 },
            storage: StorageConfig {
                path: "review-summary-store.json".to_string(),
                api_key_entry: "geminiApiKey".to_string(),
            },
        }
    }
}
