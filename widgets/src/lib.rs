//! Framework-agnostic logic behind the blog's footer and sidebar widgets.
//!
//! The browser crate only wires DOM events to these functions, so URL
//! construction and quote rotation stay testable natively.

pub mod quotes;
pub mod search;

pub use quotes::{QuoteDeck, QuoteError};
pub use search::{Direction, UnknownDirection, baidu_translate_url, google_translate_url, search_url};
