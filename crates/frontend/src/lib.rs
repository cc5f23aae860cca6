pub mod app;
pub mod domain;
pub mod layout;
pub mod routes;
pub mod shared;
pub mod system;

use leptos::prelude::*;
use leptos::task::spawn_local;
use shared::config::load_config;
use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen(start)]
pub fn start() {
    // Everything passes until the configured level is known
    _ = console_log::init_with_level(log::Level::Trace);
    console_error_panic_hook::set_once();

    spawn_local(async {
        let config = load_config().await;
        log::set_max_level(config.log_level().to_level_filter());
        log::info!(
            "master data console starting (api: {}, page size: {})",
            config.api_base(),
            config.table.default_page_size
        );
        leptos::mount::mount_to_body(move || view! { <app::App config=config /> });
    });
}
