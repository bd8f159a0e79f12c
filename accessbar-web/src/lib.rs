#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod a11y;
pub mod components;
pub mod config;
pub mod dom;
pub mod error;
pub mod logger;
pub mod mount;
pub mod storage;
pub mod surface;

pub use error::WidgetError;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // Overrides are read before the configured level is known
    crate::logger::init(log::LevelFilter::Warn);
    let config = crate::config::resolve();
    crate::logger::init(config.level_filter());
    if let Err(err) = crate::mount::mount(config) {
        log::error!("accessibility toolbar failed to mount: {err}");
    }
}
