//! Page hygiene run alongside every theme application.
//!
//! The theme ships a music player whose persisted settings can be left in a
//! corrupted state (a bare `"dark"` fragment instead of a JSON object), and
//! whose placeholder elements throw `classList` errors when left empty.

#[cfg(test)]
#[path = "hygiene_test.rs"]
mod hygiene_test;

use crate::config::BootstrapConfig;
use crate::host::{Page, Storage};

const CORRUPT_FRAGMENT: &str = "\"dark\"";

/// Whether a persisted player value is a corrupted theme fragment.
#[must_use]
pub fn is_corrupt_entry(value: &str) -> bool {
    value.contains(CORRUPT_FRAGMENT) && !value.starts_with('{')
}

/// Remove corrupted entries among `keys`, returning how many were removed.
pub fn repair_storage(storage: &dyn Storage, keys: &[String]) -> usize {
    let mut removed = 0;
    for key in keys {
        match storage.get_item(key) {
            Ok(Some(value)) if is_corrupt_entry(&value) => match storage.remove_item(key) {
                Ok(()) => {
                    log::warn!("removed corrupted storage entry {key}");
                    removed += 1;
                }
                Err(e) => log::warn!("failed to remove corrupted entry {key}: {e}"),
            },
            Ok(_) => {}
            Err(e) => {
                log::warn!("storage repair skipped: {e}");
                break;
            }
        }
    }
    removed
}

/// Whether an uncaught page error should be swallowed.
#[must_use]
pub fn is_suppressed_error(message: &str, patterns: &[String]) -> bool {
    !message.is_empty() && patterns.iter().any(|p| !p.is_empty() && message.contains(p.as_str()))
}

/// Run every hygiene step. Never fails.
pub fn run(page: &dyn Page, storage: &dyn Storage, config: &BootstrapConfig) {
    repair_storage(storage, &config.repair_keys);
    if config.empty_player_selector.is_empty() {
        return;
    }
    match page.remove_matching(&config.empty_player_selector) {
        Ok(0) => {}
        Ok(n) => log::warn!("removed {n} empty player element(s)"),
        Err(e) => log::warn!("empty player cleanup failed: {e}"),
    }
}
