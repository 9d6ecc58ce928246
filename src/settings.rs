//! Game settings
//!
//! Persisted as JSON in LocalStorage. Missing fields fall back to defaults so
//! older saved settings keep loading.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{GameError, Result};

/// How the lifecycle fetches the sampled categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    /// One category at a time, in sampler order
    #[default]
    Sequential,
    /// All categories at once, joined before populating the board
    Concurrent,
}

impl FetchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchMode::Sequential => "sequential",
            FetchMode::Concurrent => "concurrent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the trivia API, with trailing slash
    pub api_base_url: String,
    /// Columns on the board
    pub categories_per_board: usize,
    /// Rows on the board
    pub clues_per_category: usize,
    /// How many categories to request when sampling
    pub category_pool_size: usize,
    pub fetch_mode: FetchMode,
    /// Per-request timeout in milliseconds (0 = wait forever)
    pub request_timeout_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: API_BASE_URL.to_string(),
            categories_per_board: NUM_CATEGORIES,
            clues_per_category: NUM_CLUES_PER_CAT,
            category_pool_size: CATEGORY_POOL_SIZE,
            fetch_mode: FetchMode::Sequential,
            request_timeout_ms: REQUEST_TIMEOUT_MS,
        }
    }
}

impl Settings {
    /// Check the board dimensions can actually be satisfied
    pub fn validate(&self) -> Result<()> {
        if self.categories_per_board == 0 {
            return Err(GameError::InvalidSettings(
                "categories_per_board must be at least 1".into(),
            ));
        }
        if self.clues_per_category == 0 {
            return Err(GameError::InvalidSettings(
                "clues_per_category must be at least 1".into(),
            ));
        }
        if self.category_pool_size < self.categories_per_board {
            return Err(GameError::InvalidSettings(format!(
                "category_pool_size ({}) is smaller than categories_per_board ({})",
                self.category_pool_size, self.categories_per_board
            )));
        }
        if self.api_base_url.trim().is_empty() {
            return Err(GameError::InvalidSettings("api_base_url is empty".into()));
        }
        Ok(())
    }

    /// Timeout as an option (None when disabled)
    pub fn timeout(&self) -> Option<u32> {
        (self.request_timeout_ms > 0).then_some(self.request_timeout_ms)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "trivia_board_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<Settings>(&json) {
                    Ok(settings) if settings.validate().is_ok() => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Ok(_) => log::warn!("Stored settings are invalid, ignoring"),
                    Err(e) => log::warn!("Stored settings unreadable: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
