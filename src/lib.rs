//! Profile card core crate.
//!
//! Fetches a public profile through a CORS relay and renders it into the page's
//! card, with toast notifications, clipboard copy, ambient particle decoration and
//! a snake game hidden behind the typed word "snake". The pure pieces (payload
//! normalisation, labels, toast slot, decoration maths, snake simulation) have no
//! browser dependency and are tested natively; the DOM glue runs in wasm only.

use wasm_bindgen::prelude::*;

pub mod clipboard;
pub mod config;
pub mod decor;
pub mod dom;
pub mod error;
pub mod logging;
pub mod notify;
mod page;
pub mod profile;
pub mod render;
pub mod snake;

pub use config::PageConfig;
pub use error::{ClipboardError, ConfigError, DomError, ProfileError};
pub use page::PageHandle;
pub use profile::Profile;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init();
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

/// Start the page with the built-in configuration.
#[wasm_bindgen]
pub fn start_page() -> Result<PageHandle, JsValue> {
    page::start(PageConfig::default())
}

/// Start the page with a JSON configuration; missing keys keep their defaults.
#[wasm_bindgen]
pub fn start_page_with_config(config_json: &str) -> Result<PageHandle, JsValue> {
    let cfg = PageConfig::from_json(config_json)?;
    page::start(cfg)
}
