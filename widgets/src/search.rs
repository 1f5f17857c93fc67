//! Search and translate redirects.
//!
//! Every builder trims its input and returns `None` for blank text so the
//! caller can show the empty-input hint instead of opening a tab.

#[cfg(test)]
#[path = "search_test.rs"]
mod search_test;

use std::fmt;
use std::str::FromStr;

use url::Url;

const SEARCH_ENDPOINT: &str = "https://www.bing.com/search";
const GOOGLE_TRANSLATE_ENDPOINT: &str = "https://translate.google.com/";
const BAIDU_TRANSLATE_ENDPOINT: &str = "https://fanyi.baidu.com/";

/// Translation direction offered by the dropdown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    ZhEn,
    EnZh,
}

/// Returned when a dropdown value is neither `zh-en` nor `en-zh`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown translate direction: {0}")]
pub struct UnknownDirection(pub String);

impl Direction {
    pub const ALL: [Self; 2] = [Self::ZhEn, Self::EnZh];

    /// Source and target language codes.
    #[must_use]
    pub fn languages(self) -> (&'static str, &'static str) {
        match self {
            Self::ZhEn => ("zh", "en"),
            Self::EnZh => ("en", "zh"),
        }
    }

    /// Dropdown value, e.g. `zh-en`.
    #[must_use]
    pub fn value(self) -> &'static str {
        match self {
            Self::ZhEn => "zh-en",
            Self::EnZh => "en-zh",
        }
    }

    /// Dropdown label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ZhEn => "中文 → 英文",
            Self::EnZh => "英文 → 中文",
        }
    }
}

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.value() == s.trim())
            .ok_or_else(|| UnknownDirection(s.to_owned()))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

fn non_blank(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Percent-encode a URI component; spaces become `%20`.
#[must_use]
pub fn encode_component(text: &str) -> String {
    url::form_urlencoded::byte_serialize(text.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Web search results page for `query`.
#[must_use]
pub fn search_url(query: &str) -> Option<String> {
    let query = non_blank(query)?;
    Url::parse_with_params(SEARCH_ENDPOINT, &[("q", query)])
        .ok()
        .map(String::from)
}

/// Google Translate page pre-filled with `text`.
#[must_use]
pub fn google_translate_url(text: &str, direction: Direction) -> Option<String> {
    let text = non_blank(text)?;
    let (from, to) = direction.languages();
    Url::parse_with_params(GOOGLE_TRANSLATE_ENDPOINT, &[("sl", from), ("tl", to), ("text", text)])
        .ok()
        .map(String::from)
}

/// Baidu Translate page pre-filled with `text`.
///
/// The page reads its input from the fragment, so the text is encoded as a
/// URI component rather than a query value.
#[must_use]
pub fn baidu_translate_url(text: &str, direction: Direction) -> Option<String> {
    let text = non_blank(text)?;
    let (from, to) = direction.languages();
    Some(format!(
        "{BAIDU_TRANSLATE_ENDPOINT}#{from}/{to}/{}",
        encode_component(text)
    ))
}
