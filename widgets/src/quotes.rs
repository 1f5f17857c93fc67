//! Rotating footer quote.
//!
//! DESIGN
//! ======
//! The deck never holds an empty list: a source that yields nothing usable is
//! an error, and [`QuoteDeck::reload`] leaves the current quotes in place.
//! Decks start from [`QuoteDeck::fallback`]. Randomness is
//! injected as a unit float so the browser can use `Math.random` and tests
//! can pick deterministically.

#[cfg(test)]
#[path = "quotes_test.rs"]
mod quotes_test;

use std::time::Duration;

use serde::Deserialize;

/// Time between automatic refreshes.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(10);
/// Length of the dim phase before new text is swapped in.
pub const FADE_DELAY: Duration = Duration::from_millis(150);
/// Where the site publishes its quote list.
pub const QUOTES_PATH: &str = "/sentence/quotes.json";

const FALLBACK: [&str; 10] = [
    "生活不是等待暴风雨过去，而是要学会在雨中跳舞。",
    "每一个不曾起舞的日子，都是对生命的辜负。",
    "世界上最遥远的距离，不是生与死，而是我站在你面前，你却不知道我爱你。",
    "人生如逆旅，我亦是行人。",
    "山有木兮木有枝，心悦君兮君不知。",
    "落红不是无情物，化作春泥更护花。",
    "海内存知己，天涯若比邻。",
    "路漫漫其修远兮，吾将上下而求索。",
    "不是每一次努力都会有收获，但是每一次收获都必须努力。",
    "愿你走出半生，归来仍是少年。",
];

#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("failed to parse quote file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("quote file has no usable quotes")]
    Empty,
}

#[derive(Deserialize)]
struct QuoteFile {
    #[serde(default)]
    quotes: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuoteDeck {
    quotes: Vec<String>,
    current: usize,
}

impl QuoteDeck {
    /// Built-in quotes used when the site file is missing or malformed.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            quotes: FALLBACK.iter().map(|q| (*q).to_owned()).collect(),
            current: 0,
        }
    }

    /// Parse `{"quotes": [...]}`; blank entries are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::Parse`] for malformed JSON and
    /// [`QuoteError::Empty`] when no non-blank quote remains.
    pub fn from_json(raw: &str) -> Result<Self, QuoteError> {
        let file: QuoteFile = serde_json::from_str(raw)?;
        let quotes: Vec<String> = file
            .quotes
            .into_iter()
            .map(|q| q.trim().to_owned())
            .filter(|q| !q.is_empty())
            .collect();
        if quotes.is_empty() {
            return Err(QuoteError::Empty);
        }
        Ok(Self { quotes, current: 0 })
    }

    /// Replace the quotes with those in `raw`, returning the new count.
    ///
    /// On error the deck keeps its current quotes.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_json`].
    pub fn reload(&mut self, raw: &str) -> Result<usize, QuoteError> {
        *self = Self::from_json(raw)?;
        Ok(self.len())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Select the quote at `floor(unit * len)`; `unit` is clamped to `[0, 1)`.
    pub fn pick(&mut self, unit: f64) -> &str {
        let unit = if unit.is_finite() { unit.clamp(0.0, 1.0) } else { 0.0 };
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
        let index = (unit * self.quotes.len() as f64).floor() as usize;
        self.current = index.min(self.quotes.len().saturating_sub(1));
        self.current()
    }

    /// Raw text of the current quote, as copied to the clipboard.
    #[must_use]
    pub fn current(&self) -> &str {
        self.quotes.get(self.current).map_or("", String::as_str)
    }

    /// Current quote wrapped in corner brackets for display.
    #[must_use]
    pub fn display(&self) -> String {
        format!("「 {} 」", self.current())
    }
}

impl Default for QuoteDeck {
    fn default() -> Self {
        Self::fallback()
    }
}
