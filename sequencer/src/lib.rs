//! Idempotent page bootstrap for the blog theme runtime.
//!
//! This crate is browser agnostic: every page, storage, timer and navigation
//! concern is reached through the host traits in [`host`], so the state
//! machine can be driven natively in tests and by `web-sys` hosts in the
//! WASM build.
//!
//! SYSTEM CONTEXT
//! ==============
//! The root `theme-init` crate implements the host traits against the real
//! document and calls [`Sequencer::start`] once per page. Soft navigations
//! reach the sequencer through [`host::NavigationSource`] subscriptions.

pub mod config;
pub mod error;
pub mod host;
pub mod hygiene;
pub mod resource;
pub mod sequencer;
pub mod theme;

#[cfg(test)]
mod fake;

pub use config::{BootstrapConfig, ResourceKind, ResourceSpec};
pub use error::{ConfigError, PageError, StorageError};
pub use host::{LoadOutcome, NavigationSource, Page, ReadyEvent, Scheduler, Storage};
pub use sequencer::{Phase, Sequencer};
