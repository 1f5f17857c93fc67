//! Bootstrap configuration.
//!
//! Defaults reproduce the theme's built-in behavior. A page may override any
//! subset of fields by embedding a JSON object; missing fields keep their
//! defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CAROUSEL_BASE: &str = "https://npm.elemecdn.com/anzhiyu-theme-static@1.0.0/swiper";

/// Upper bound for the soft-navigation re-check delay.
pub const MAX_RENAVIGATION_DELAY_MS: u64 = 5_000;

/// Kind of external resource handle the page can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// `<link rel="stylesheet">`.
    Stylesheet,
    /// `<script src>`.
    Script,
}

impl ResourceKind {
    /// Tag name of the element that carries this resource.
    #[must_use]
    pub fn tag_name(self) -> &'static str {
        match self {
            Self::Stylesheet => "link",
            Self::Script => "script",
        }
    }

    /// Attribute holding the resource URL.
    #[must_use]
    pub fn url_attribute(self) -> &'static str {
        match self {
            Self::Stylesheet => "href",
            Self::Script => "src",
        }
    }
}

/// One externally hosted dependency.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSpec {
    pub kind: ResourceKind,
    pub url: String,
    /// Substring of the URL attribute identifying an existing handle.
    pub marker: String,
    /// Global name whose presence means the library is already loaded.
    #[serde(default)]
    pub global: Option<String>,
}

impl ResourceSpec {
    /// CSS selector matching an existing handle for this resource.
    #[must_use]
    pub fn selector(&self) -> String {
        format!(
            "{}[{}*=\"{}\"]",
            self.kind.tag_name(),
            self.kind.url_attribute(),
            self.marker
        )
    }
}

/// Everything the sequencer needs to know about the page it bootstraps.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    pub theme: String,
    pub theme_attribute: String,
    pub theme_key: String,
    pub obsolete_keys: Vec<String>,
    pub stylesheet: ResourceSpec,
    pub script: ResourceSpec,
    pub ready_event: String,
    pub ready_message: String,
    pub navigation_events: Vec<String>,
    pub renavigation_delay_ms: u64,
    pub repair_keys: Vec<String>,
    pub empty_player_selector: String,
    pub suppressed_error_patterns: Vec<String>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_owned(),
            theme_attribute: "data-theme".to_owned(),
            theme_key: "theme".to_owned(),
            obsolete_keys: vec!["autoChangeMode".to_owned()],
            stylesheet: ResourceSpec {
                kind: ResourceKind::Stylesheet,
                url: format!("{CAROUSEL_BASE}/swiper.min.css"),
                marker: "swiper.min.css".to_owned(),
                global: None,
            },
            script: ResourceSpec {
                kind: ResourceKind::Script,
                url: format!("{CAROUSEL_BASE}/swiper.min.js"),
                marker: "swiper.min.js".to_owned(),
                global: Some("Swiper".to_owned()),
            },
            ready_event: "swiperReady".to_owned(),
            ready_message: "Swiper library is loaded and ready".to_owned(),
            navigation_events: vec!["pjax:complete".to_owned(), "pjax:end".to_owned()],
            renavigation_delay_ms: 100,
            repair_keys: vec![
                "music-data".to_owned(),
                "aplayer-settings".to_owned(),
                "meting-config".to_owned(),
            ],
            empty_player_selector: ".aplayer:empty, [data-aplayer]:empty".to_owned(),
            suppressed_error_patterns: vec!["classList".to_owned()],
        }
    }
}

impl BootstrapConfig {
    /// Parse a JSON override and validate the merged result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when a field fails validation.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants the sequencer relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.theme.trim().is_empty() {
            return Err(ConfigError::Invalid("theme must not be empty".to_owned()));
        }
        if self.theme_attribute.trim().is_empty() || self.theme_key.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "theme attribute and storage key must not be empty".to_owned(),
            ));
        }
        for spec in [&self.stylesheet, &self.script] {
            if spec.url.trim().is_empty() || spec.marker.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "{:?} resource needs a url and a marker",
                    spec.kind
                )));
            }
        }
        if self.stylesheet.kind != ResourceKind::Stylesheet || self.script.kind != ResourceKind::Script {
            return Err(ConfigError::Invalid("resource kinds are swapped".to_owned()));
        }
        if self.ready_event.trim().is_empty() {
            return Err(ConfigError::Invalid("ready event name must not be empty".to_owned()));
        }
        if self.renavigation_delay_ms > MAX_RENAVIGATION_DELAY_MS {
            return Err(ConfigError::Invalid(format!(
                "renavigation delay {}ms exceeds {MAX_RENAVIGATION_DELAY_MS}ms",
                self.renavigation_delay_ms
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn renavigation_delay(&self) -> Duration {
        Duration::from_millis(self.renavigation_delay_ms)
    }
}
