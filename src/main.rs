//! Enrollment Frontend Entry Point

mod app;
mod capacity;
mod commands;
mod components;
mod config;
mod context;
mod controller;
mod error;
mod grades;
mod mirror;
mod models;
mod renderer;
mod snapshot;
mod store;
mod tables;

use app::App;
use config::{AppConfig, CONFIG_ELEMENT_ID};
use leptos::prelude::*;

/// Text of the embedded JSON config block, if the page has one
fn page_config() -> Option<String> {
    web_sys::window()?
        .document()?
        .get_element_by_id(CONFIG_ELEMENT_ID)?
        .text_content()
}

fn main() {
    console_error_panic_hook::set_once();

    let (config, warning) = AppConfig::load(page_config().as_deref());
    if let Err(e) = rolling_logger::init(log::LevelFilter::Debug, config.log_capacity) {
        web_sys::console::error_1(&format!("[APP] logger init failed: {}", e).into());
    }
    if let Some(warning) = warning {
        log::warn!("[CONFIG] {}", warning);
    }
    log::info!("[APP] backend at {}", config.api_base);

    mount_to_body(move || view! { <App config=config /> });
}
