//! Error types surfaced by host implementations and config loading.
//!
//! ERROR HANDLING
//! ==============
//! Host traits return these errors, but nothing in the bootstrap path lets
//! them escape to the page: the sequencer logs them and continues.

/// Failure while touching persisted key/value storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// Storage is disabled or not exposed by the host.
    #[error("storage unavailable")]
    Unavailable,
    /// The storage call itself failed (quota exceeded, security error).
    #[error("storage access failed: {0}")]
    Access(String),
}

/// Failure while manipulating the document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    /// No document is reachable from the current global scope.
    #[error("document unavailable")]
    MissingDocument,
    /// A DOM call threw.
    #[error("dom operation failed: {0}")]
    Dom(String),
}

/// Error returned by [`crate::BootstrapConfig::from_json`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The override text is not valid JSON for the config shape.
    #[error("failed to parse bootstrap config: {0}")]
    Parse(#[from] serde_json::Error),
    /// The JSON parsed but a field holds an unusable value.
    #[error("invalid bootstrap config: {0}")]
    Invalid(String),
}
