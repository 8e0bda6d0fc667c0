//! Application settings with JSON persistence.
//!
//! Settings live in a single `config.json` under the platform config dir.
//! Missing file or unreadable JSON falls back to defaults; unknown keys are
//! ignored so older files keep loading.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn default_true() -> bool {
    true
}

fn default_theme() -> String {
    "dark".to_string()
}

fn default_probe_timeout_ms() -> u64 {
    3_000
}

fn default_request_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Gemini credential. `None` disables the online path, it is not an error.
    #[serde(default)]
    pub gemini_api_key: Option<String>,
    /// When false the engine never attempts the online path.
    #[serde(default = "default_true")]
    pub auto_switch_mode: bool,
    /// Budget for the reachability probe.
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
    /// Budget for one online API call.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            gemini_api_key: None,
            auto_switch_mode: true,
            probe_timeout_ms: default_probe_timeout_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl AppSettings {
    /// Effective API key: environment variable wins over the settings file.
    pub fn api_key(&self) -> Option<String> {
        if let Ok(key) = env::var("GEMINI_API_KEY") {
            if !key.trim().is_empty() {
                return Some(key);
            }
        }
        self.gemini_api_key
            .as_ref()
            .filter(|k| !k.trim().is_empty())
            .cloned()
    }

    fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com.local", "Saaf", "Saaf")
            .map(|p| p.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("./config.json"))
    }

    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!("unreadable settings at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}
