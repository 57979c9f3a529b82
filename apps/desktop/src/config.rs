use std::{collections::HashMap, fs};

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub api_url: String,
    pub cache_dir: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "https://wargame-mbpq.onrender.com/api".into(),
            cache_dir: "./data/cache".into(),
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("wargame.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("api_url") {
                settings.api_url = v.clone();
            }
            if let Some(v) = file_cfg.get("cache_dir") {
                settings.cache_dir = v.clone();
            }
        }
    }

    if let Ok(v) = std::env::var("WARGAME_API_URL") {
        settings.api_url = v;
    }
    if let Ok(v) = std::env::var("APP__API_URL") {
        settings.api_url = v;
    }

    if let Ok(v) = std::env::var("WARGAME_CACHE_DIR") {
        settings.cache_dir = v;
    }
    if let Ok(v) = std::env::var("APP__CACHE_DIR") {
        settings.cache_dir = v;
    }

    settings.api_url = normalize_api_url(&settings.api_url);
    settings
}

/// Request paths are appended verbatim, so the base URL must not end with a
/// slash. An empty override falls back to the default endpoint.
fn normalize_api_url(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return Settings::default().api_url;
    }
    raw.trim_end_matches('/').to_string()
}
