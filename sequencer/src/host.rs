//! Host seams the sequencer drives.
//!
//! DESIGN
//! ======
//! The sequencer runs on a single-threaded event loop, so every trait here is
//! `!Send`-friendly: futures are `LocalBoxFuture` and handlers are `Rc`.
//! Resource loads never reject; a failed load resolves to
//! [`LoadOutcome::Failed`] so joins always complete.

use std::rc::Rc;
use std::time::Duration;

use futures::future::LocalBoxFuture;

use crate::config::ResourceSpec;
use crate::error::{PageError, StorageError};

/// Resolution of a resource load signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A matching handle already existed; nothing was created.
    AlreadyPresent,
    /// The new handle fired `load`.
    Loaded,
    /// The new handle fired `error`, or could not be created.
    Failed,
}

/// Completion notification broadcast once both dependencies resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadyEvent {
    pub name: String,
    pub message: String,
}

/// Persisted key/value storage (`localStorage` in the browser).
pub trait Storage {
    /// # Errors
    /// Returns [`StorageError`] when storage is disabled or the read throws.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    /// # Errors
    /// Returns [`StorageError`] when storage is disabled or the write throws.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// # Errors
    /// Returns [`StorageError`] when storage is disabled or the delete throws.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// The document the sequencer decorates.
pub trait Page {
    /// Set an attribute on the root element.
    ///
    /// # Errors
    /// Returns [`PageError`] when the root element is unreachable.
    fn set_root_attribute(&self, name: &str, value: &str) -> Result<(), PageError>;

    /// Whether a handle for `spec` (or its global) already exists.
    fn has_resource(&self, spec: &ResourceSpec) -> bool;

    /// Create and attach a handle for `spec` before returning.
    ///
    /// The returned future resolves when the handle fires `load` or `error`.
    ///
    /// # Errors
    /// Returns [`PageError`] when the handle cannot be created or attached.
    fn load_resource(&self, spec: &ResourceSpec) -> Result<LocalBoxFuture<'static, LoadOutcome>, PageError>;

    /// Broadcast `event` on the document.
    ///
    /// # Errors
    /// Returns [`PageError`] when the event cannot be built or dispatched.
    fn dispatch(&self, event: &ReadyEvent) -> Result<(), PageError>;

    /// Remove every element matching `selector`, returning how many went.
    ///
    /// # Errors
    /// Returns [`PageError`] for an invalid selector or missing document.
    fn remove_matching(&self, selector: &str) -> Result<usize, PageError>;
}

/// Timer and task spawning for the event loop.
pub trait Scheduler {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

/// Source of named client-side navigation notifications.
pub trait NavigationSource {
    /// Invoke `handler` every time `event` fires.
    ///
    /// # Errors
    /// Returns [`PageError`] when the listener cannot be registered.
    fn subscribe(&self, event: &str, handler: Rc<dyn Fn()>) -> Result<(), PageError>;
}
