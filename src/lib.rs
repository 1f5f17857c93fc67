//! # theme-init
//!
//! WASM runtime loaded by every page of the blog theme. It forces the dark
//! theme, lazily loads the carousel library through the
//! [`sequencer`] crate, and mounts the search and quote widgets.
//!
//! Browser bindings are gated behind the `browser` feature; without it the
//! crate builds natively and only the pure helpers are active, which keeps
//! `cargo test` free of a browser.

pub mod boot;
#[cfg(feature = "browser")]
pub mod dom;
pub mod quote_widget;
pub mod search_widget;

/// WASM entry point.
#[cfg(feature = "browser")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Fails only when a logger is already installed.
    let _ = console_log::init_with_level(log::Level::Info);

    boot::run();
    search_widget::mount_when_ready();
    quote_widget::mount_when_ready();
}
