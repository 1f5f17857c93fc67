//! Fixed footer quote.
//!
//! Left click copies the raw quote, right click shows another one and
//! restarts the ten-second auto refresh. Soft navigations reload the quote
//! list and re-mount (or re-arm) the widget.

pub const CONTAINER_ID: &str = "fixed-quote-container";
pub const QUOTE_ID: &str = "random-quote";
pub const QUOTE_TITLE: &str = "左键复制语句 | 右键刷新语句 | 每10秒自动刷新";
pub const COPIED_TITLE: &str = "已复制到剪贴板！";

pub fn mount_when_ready() {
    #[cfg(feature = "browser")]
    {
        crate::dom::when_dom_ready(browser::spawn_mount);
        if let Ok(document) = crate::dom::document() {
            let registered = crate::dom::listen(&document, "pjax:complete", |_: web_sys::Event| {
                browser::cancel_refresh();
                browser::spawn_mount();
            });
            if let Err(e) = registered {
                log::warn!("quote widget pjax listener failed: {e}");
            }
        }
    }
}

#[cfg(feature = "browser")]
mod browser {
    use std::cell::RefCell;

    use gloo_timers::callback::{Interval, Timeout};
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::HtmlElement;
    use widgets::QuoteDeck;
    use widgets::quotes::{FADE_DELAY, QUOTES_PATH, REFRESH_INTERVAL};

    use super::*;
    use crate::dom::{self, listen};

    const COPIED_COLOR: &str = "var(--anzhiyu-green, #4CAF50)";
    const COPIED_FEEDBACK_MS: u32 = 1_500;

    thread_local! {
        static DECK: RefCell<QuoteDeck> = RefCell::new(QuoteDeck::fallback());
        static REFRESH: RefCell<Option<Interval>> = const { RefCell::new(None) };
    }

    #[allow(clippy::cast_possible_truncation)]
    fn millis(duration: std::time::Duration) -> u32 {
        duration.as_millis().min(u128::from(u32::MAX)) as u32
    }

    fn next_display() -> String {
        DECK.with(|deck| {
            let mut deck = deck.borrow_mut();
            deck.pick(js_sys::Math::random());
            deck.display()
        })
    }

    fn current_text() -> String {
        DECK.with(|deck| deck.borrow().current().to_owned())
    }

    pub fn cancel_refresh() {
        REFRESH.with(|r| {
            // Dropping the interval clears it.
            r.borrow_mut().take();
        });
    }

    pub fn spawn_mount() {
        wasm_bindgen_futures::spawn_local(async {
            if let Some(raw) = fetch_quotes().await {
                DECK.with(|d| match d.borrow_mut().reload(&raw) {
                    Ok(n) => log::info!("loaded {n} quotes"),
                    Err(e) => log::warn!("{e}, keeping current quotes"),
                });
            }
            mount();
        });
    }

    /// Raw quote file, or `None` when it cannot be fetched.
    async fn fetch_quotes() -> Option<String> {
        let resp = match gloo_net::http::Request::get(QUOTES_PATH).send().await {
            Ok(resp) => resp,
            Err(e) => {
                log::warn!("quote list unavailable, keeping current quotes: {e}");
                return None;
            }
        };
        if !resp.ok() {
            log::warn!("quote list request failed: {}", resp.status());
            return None;
        }
        match resp.text().await {
            Ok(raw) => Some(raw),
            Err(e) => {
                log::warn!("quote list unreadable: {e}");
                None
            }
        }
    }

    fn refresh(el: &HtmlElement) {
        let _ = el.style().set_property("opacity", "0.6");
        let el = el.clone();
        Timeout::new(millis(FADE_DELAY), move || {
            el.set_text_content(Some(next_display().as_str()));
            let _ = el.style().set_property("opacity", "1");
        })
        .forget();
    }

    fn start_refresh(el: &HtmlElement) {
        cancel_refresh();
        let el = el.clone();
        let interval = Interval::new(millis(REFRESH_INTERVAL), move || refresh(&el));
        REFRESH.with(|r| *r.borrow_mut() = Some(interval));
    }

    fn mount() {
        let Ok(document) = dom::document() else {
            return;
        };
        if document.get_element_by_id(CONTAINER_ID).is_some() {
            if let Some(el) = document
                .get_element_by_id(QUOTE_ID)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                start_refresh(&el);
            }
            return;
        }
        if let Err(e) = create(&document) {
            log::warn!("quote widget not mounted: {}", e.as_string().unwrap_or_default());
        }
    }

    fn create(document: &web_sys::Document) -> Result<(), JsValue> {
        let body = document.body().ok_or_else(|| JsValue::from_str("no body"))?;
        let container = document.create_element("div")?;
        container.set_id(CONTAINER_ID);
        let quote: HtmlElement = document.create_element("div")?.dyn_into::<HtmlElement>().map_err(JsValue::from)?;
        quote.set_id(QUOTE_ID);
        quote.set_class_name("random-quote-text");
        quote.set_text_content(Some(next_display().as_str()));
        quote.set_title(QUOTE_TITLE);
        let style = quote.style();
        for property in ["user-select", "-webkit-user-select", "-moz-user-select", "-ms-user-select"] {
            style.set_property(property, "none")?;
        }
        container.append_child(&quote)?;
        body.append_child(&container)?;

        let target = quote.clone();
        listen(&quote, "click", move |_: web_sys::Event| {
            let target = target.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if copy_to_clipboard(&current_text()).await {
                    show_copied(&target);
                }
            });
        })
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let target = quote.clone();
        listen(&quote, "mousedown", move |ev: web_sys::MouseEvent| {
            if ev.button() == 2 {
                ev.prevent_default();
                ev.stop_propagation();
                refresh(&target);
                start_refresh(&target);
            }
        })
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

        listen(&quote, "contextmenu", |ev: web_sys::Event| {
            ev.prevent_default();
            ev.stop_propagation();
            ev.stop_immediate_propagation();
        })
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

        start_refresh(&quote);
        Ok(())
    }

    fn show_copied(el: &HtmlElement) {
        let original = el.title();
        el.set_title(COPIED_TITLE);
        let _ = el.style().set_property("color", COPIED_COLOR);
        let el = el.clone();
        Timeout::new(COPIED_FEEDBACK_MS, move || {
            el.set_title(&original);
            let _ = el.style().remove_property("color");
        })
        .forget();
    }

    /// Async clipboard API first, then a hidden textarea + `execCommand`.
    async fn copy_to_clipboard(text: &str) -> bool {
        if let Some(promise) = clipboard_write(text) {
            if wasm_bindgen_futures::JsFuture::from(promise).await.is_ok() {
                return true;
            }
        }
        legacy_copy(text).unwrap_or(false)
    }

    fn clipboard_write(text: &str) -> Option<js_sys::Promise> {
        let clipboard = web_sys::window()?.navigator().clipboard();
        // `navigator.clipboard` is undefined outside secure contexts.
        if clipboard.is_undefined() {
            return None;
        }
        Some(clipboard.write_text(text))
    }

    fn legacy_copy(text: &str) -> Result<bool, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let body = document.body().ok_or_else(|| JsValue::from_str("no body"))?;
        let area = document
            .create_element("textarea")?
            .dyn_into::<web_sys::HtmlTextAreaElement>()
            .map_err(JsValue::from)?;
        area.set_value(text);
        body.append_child(&area)?;
        area.select();
        let copied = document
            .dyn_ref::<web_sys::HtmlDocument>()
            .map_or(Ok(false), |html| html.exec_command("copy"));
        let _ = body.remove_child(&area);
        copied
    }
}
