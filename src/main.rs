//! Keesti Admin Frontend Entry Point

mod models;
mod config;
mod commands;
mod icons;
mod tree;
mod context;
mod store;
mod components;
mod app;

use app::App;
use config::{AppConfig, GLOBAL_CONFIG_KEY};
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    if rolling_logger::init(rolling_logger::parse_level(&config.log_level), config.log_capacity).is_ok() {
        log::info!("keesti admin starting, api at {}", config.api_base_url);
    }
    if let Some(e) = config_error {
        log::warn!("ignoring malformed {}: {}", GLOBAL_CONFIG_KEY, e);
    }

    mount_to_body(move || view! { <App config=config.clone() /> });
}
