//! Application Config
//!
//! Compile-time defaults, overridable at runtime through a
//! `window.__KEESTI_CONFIG__` object injected by the hosting page.

use std::time::Duration;

use serde::Deserialize;
use wasm_bindgen::JsValue;

pub const GLOBAL_CONFIG_KEY: &str = "__KEESTI_CONFIG__";

/// Admin UI settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// REST API root, e.g. "https://keesti.ir/api"
    pub api_base_url: String,
    /// Prefix for stored (relative) icon paths
    pub icon_base_url: String,
    /// localStorage key holding the admin JWT
    pub auth_token_key: String,
    /// Give up on a reorder/move after this long; 0 waits forever
    pub commit_timeout_ms: u64,
    pub toast_duration_ms: u64,
    pub log_level: String,
    pub log_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: option_env!("KEESTI_API_URL").unwrap_or("/api").to_string(),
            icon_base_url: option_env!("KEESTI_ICON_URL").unwrap_or("/uploads").to_string(),
            auth_token_key: "token".to_string(),
            commit_timeout_ms: 15_000,
            toast_duration_ms: 4_000,
            log_level: "info".to_string(),
            log_capacity: rolling_logger::DEFAULT_CAPACITY,
        }
    }
}

impl AppConfig {
    /// Parse a (partial) JSON config; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Defaults merged with `window.__KEESTI_CONFIG__`, if the page set one
    pub fn load() -> Result<Self, serde_wasm_bindgen::Error> {
        let Some(window) = web_sys::window() else {
            return Ok(Self::default());
        };
        let raw = js_sys::Reflect::get(&window, &JsValue::from_str(GLOBAL_CONFIG_KEY)).unwrap_or(JsValue::UNDEFINED);
        if raw.is_undefined() || raw.is_null() {
            return Ok(Self::default());
        }
        serde_wasm_bindgen::from_value(raw)
    }

    pub fn commit_timeout(&self) -> Option<Duration> {
        (self.commit_timeout_ms > 0).then(|| Duration::from_millis(self.commit_timeout_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = AppConfig::from_json(r#"{"apiBaseUrl": "https://keesti.ir/api", "commitTimeoutMs": 0}"#).unwrap();
        assert_eq!(config.api_base_url, "https://keesti.ir/api");
        assert_eq!(config.commit_timeout(), None);
        assert_eq!(config.auth_token_key, "token");
        assert_eq!(config.toast_duration_ms, 4_000);
    }

    #[test]
    fn test_default_timeout() {
        assert_eq!(AppConfig::default().commit_timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_rejects_wrong_types() {
        assert!(AppConfig::from_json(r#"{"commitTimeoutMs": "soon"}"#).is_err());
    }
}
