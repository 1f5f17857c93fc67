//! Page entry for the theme bootstrap.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs once when the WASM module starts. The theme is forced before anything
//! else; carousel loading starts now or on `DOMContentLoaded`, and soft
//! navigations re-run the sequencer through the document's pjax events.

#[cfg(test)]
#[path = "boot_test.rs"]
mod boot_test;

use sequencer::BootstrapConfig;

/// Id of the optional `<script type="application/json">` config override.
pub const CONFIG_ELEMENT_ID: &str = "theme-init-config";

/// Whether a `document.readyState` value means parsing is still underway.
pub fn is_loading(ready_state: &str) -> bool {
    ready_state == "loading"
}

/// Merge the optional page override over the built-in defaults.
pub fn load_config(raw: Option<&str>) -> BootstrapConfig {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return BootstrapConfig::default();
    };
    match BootstrapConfig::from_json(raw) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("ignoring #{CONFIG_ELEMENT_ID}: {e}");
            BootstrapConfig::default()
        }
    }
}

/// Start the bootstrap for the current page.
pub fn run() {
    #[cfg(feature = "browser")]
    {
        use std::rc::Rc;

        use sequencer::Sequencer;

        use crate::dom::{self, BrowserPage, BrowserScheduler, BrowserStorage, DocumentNavigation};

        let Ok(document) = dom::document() else {
            log::warn!("no document, theme bootstrap skipped");
            return;
        };
        let raw = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content());
        let sequencer = Sequencer::new(
            Rc::new(BrowserPage),
            Rc::new(BrowserStorage),
            Rc::new(BrowserScheduler),
            load_config(raw.as_deref()),
        );

        sequencer.apply_dark_theme();
        install_error_filter(sequencer.config().suppressed_error_patterns.clone());
        sequencer.attach(&DocumentNavigation);

        let launcher = Rc::clone(&sequencer);
        dom::when_dom_ready(move || launcher.launch());

        if let Some(window) = web_sys::window() {
            let registered = dom::listen(&window, "load", move |_: web_sys::Event| {
                sequencer.on_page_load();
            });
            if let Err(e) = registered {
                log::warn!("window load listener failed: {e}");
            }
        }
    }
}

#[cfg(feature = "browser")]
fn install_error_filter(patterns: Vec<String>) {
    if patterns.is_empty() {
        return;
    }
    let Some(window) = web_sys::window() else {
        return;
    };
    let registered = crate::dom::listen(&window, "error", move |ev: web_sys::ErrorEvent| {
        let message = ev.message();
        if sequencer::hygiene::is_suppressed_error(&message, &patterns) {
            log::warn!("suppressed page error: {message}");
            ev.prevent_default();
        }
    });
    if let Err(e) = registered {
        log::warn!("error filter not installed: {e}");
    }
}
