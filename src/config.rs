//! Configuration management

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::{DEFAULT_BASE_URL, DEFAULT_IMAGE_BASE_URL};

const APP_DIR: &str = "movie_explorer";
pub const API_KEY_ENV: &str = "TMDB_API_KEY";
const MAX_DEBOUNCE_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_true")]
    pub dark_mode: bool,
    // Small-screen layout: 6 items per page, filters collapsed
    #[serde(default)]
    pub compact_layout: bool,
    #[serde(default = "default_debounce_ms")]
    pub search_debounce_ms: u64,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    // Key from the environment, never written back to disk
    #[serde(skip)]
    pub env_api_key: Option<String>,
}

fn default_api_base_url() -> String { DEFAULT_BASE_URL.to_string() }
fn default_image_base_url() -> String { DEFAULT_IMAGE_BASE_URL.to_string() }
fn default_language() -> String { "en-US".to_string() }
fn default_true() -> bool { true }
fn default_debounce_ms() -> u64 { 500 }
fn default_timeout_secs() -> u64 { 30 }

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base_url: default_api_base_url(),
            image_base_url: default_image_base_url(),
            language: default_language(),
            dark_mode: true,
            compact_layout: false,
            search_debounce_ms: 500,
            request_timeout_secs: 30,
            env_api_key: None,
        }
    }
}

/// `<config dir>/movie_explorer`, created on demand
pub fn app_dir() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    if let Err(e) = fs::create_dir_all(&path) {
        log::warn!("Failed to create {}: {}", path.display(), e);
    }
    path
}

/// Directory of the persisted session and favorites
pub fn store_dir() -> PathBuf {
    app_dir().join("store")
}

impl AppConfig {
    fn config_path() -> PathBuf {
        app_dir().join("config.json")
    }

    /// Load the saved configuration, then apply `TMDB_API_KEY`
    pub fn load() -> Self {
        let mut config = Self::load_from(&Self::config_path());
        config.apply_api_key_override(std::env::var(API_KEY_ENV).ok());
        config
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Ignoring invalid config {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Failed to read config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        self.save_to(&Self::config_path());
    }

    pub fn save_to(&self, path: &Path) {
        let result = serde_json::to_string_pretty(self)
            .map_err(std::io::Error::from)
            .and_then(|content| fs::write(path, content));
        if let Err(e) = result {
            log::error!("Failed to save config to {}: {}", path.display(), e);
        }
    }

    /// A non-blank environment value wins over the saved key
    pub fn apply_api_key_override(&mut self, value: Option<String>) {
        self.env_api_key = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    }

    /// Key used for requests
    pub fn effective_api_key(&self) -> &str {
        self.env_api_key.as_deref().unwrap_or(&self.api_key)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms.min(MAX_DEBOUNCE_MS))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
