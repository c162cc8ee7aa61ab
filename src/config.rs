use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Key the search form preferences live under in client storage
pub const PREFERENCES_KEY: &str = "hdbSearchPreferences";

/// Tunables for the search page scripts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Origin the suggestion endpoint is resolved against
    pub base_url: String,
    /// Path of the suggestion endpoint
    pub search_path: String,
    /// Path prefix of the listing detail page
    pub flat_path: String,
    /// Minimum trimmed query length (in characters) before a query is scheduled
    pub min_query_len: usize,
    /// Quiet period after the last keystroke before querying
    pub debounce_ms: u64,
    /// Scroll offset past which the back-to-top control is shown
    pub back_to_top_threshold: f64,
    /// Fraction of the scroll offset applied to the hero section
    pub parallax_rate: f64,
    /// Delay before a submit button in loading state is restored
    pub loading_fallback_ms: u64,
    /// Storage key for the search form preferences
    pub preferences_key: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            search_path: "/api/search".to_string(),
            flat_path: "/flat".to_string(),
            min_query_len: 2,
            debounce_ms: 300,
            back_to_top_threshold: 300.0,
            parallax_rate: 0.5,
            loading_fallback_ms: 5000,
            preferences_key: PREFERENCES_KEY.to_string(),
        }
    }
}

impl UiConfig {
    /// Load a config file; fields missing from the file keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn loading_fallback(&self) -> Duration {
        Duration::from_millis(self.loading_fallback_ms)
    }

    /// Detail page path for a listing
    pub fn flat_url(&self, id: u64) -> String {
        format!("{}/{}", self.flat_path.trim_end_matches('/'), id)
    }
}
