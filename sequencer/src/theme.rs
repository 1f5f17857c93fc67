//! Forced theme application.
//!
//! The root attribute is written first and unconditionally; persistence is
//! best effort. Stale companion keys are deleted on every call so an old
//! automatic theme switcher cannot flip the page back.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use crate::config::BootstrapConfig;
use crate::error::StorageError;
use crate::host::{Page, Storage};

/// Apply the configured theme to the page and persist it.
///
/// Returns `true` when the preference was persisted as well. Failures are
/// logged and never propagated.
pub fn apply(page: &dyn Page, storage: &dyn Storage, config: &BootstrapConfig) -> bool {
    if let Err(e) = page.set_root_attribute(&config.theme_attribute, &config.theme) {
        log::warn!("failed to set {} attribute: {e}", config.theme_attribute);
    }
    match persist(storage, config) {
        Ok(()) => {
            log::debug!("theme forced to {}", config.theme);
            true
        }
        Err(e) => {
            log::warn!("theme preference not persisted: {e}");
            false
        }
    }
}

fn persist(storage: &dyn Storage, config: &BootstrapConfig) -> Result<(), StorageError> {
    storage.set_item(&config.theme_key, &config.theme)?;
    for key in &config.obsolete_keys {
        storage.remove_item(key)?;
    }
    Ok(())
}
