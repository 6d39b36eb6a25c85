mod components;
mod dataset;
mod debug;
mod present;
mod state;
mod timeline;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(components::app::App);
}
