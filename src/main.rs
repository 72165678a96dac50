#![allow(warnings)]
//! Hello List Frontend Entry Point

mod app;
mod components;
mod config;
mod context;
mod presenter;
mod store;

use app::App;
use config::ListConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(ListConfig::default().log_level) {
        web_sys::console::error_1(&format!("[APP] logger init failed: {}", e).into());
    }
    mount_to_body(App);
}
