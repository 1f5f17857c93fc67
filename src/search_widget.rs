//! Sidebar search box and translate buttons.
//!
//! All three buttons redirect to an external page in a new tab. Blank input
//! flashes a red border and a hint placeholder for two seconds instead.

#[cfg(test)]
#[path = "search_widget_test.rs"]
mod search_widget_test;

use widgets::{Direction, baidu_translate_url, google_translate_url, search_url};

pub const SEARCH_INPUT_ID: &str = "bing-search-input";
pub const SEARCH_BUTTON_ID: &str = "bing-search-btn";
pub const TRANSLATION_INPUT_ID: &str = "translation-input";
pub const TRANSLATION_OUTPUT_ID: &str = "translation-output";
pub const BAIDU_BUTTON_ID: &str = "baidu-translate-btn";
pub const GOOGLE_BUTTON_ID: &str = "google-translate-btn";
pub const DIRECTION_INPUT_ID: &str = "translate-direction";

pub const SEARCH_HINT: &str = "请输入搜索关键词";
pub const SEARCH_PLACEHOLDER: &str = "输入搜索关键词...";
pub const TRANSLATE_HINT: &str = "请输入要翻译的文本";
pub const TRANSLATE_PLACEHOLDER: &str = "输入要翻译的文本...";
pub const BAIDU_OPENED: &str = "已在新页面打开百度翻译";

/// What a button press should do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Open(String),
    Hint,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Translator {
    Google,
    Baidu,
}

pub fn search_action(query: &str) -> Action {
    search_url(query).map_or(Action::Hint, Action::Open)
}

/// Unknown direction values fall back to the dropdown default.
pub fn translate_action(translator: Translator, text: &str, direction: &str) -> Action {
    let direction = direction.parse::<Direction>().unwrap_or_default();
    let url = match translator {
        Translator::Google => google_translate_url(text, direction),
        Translator::Baidu => baidu_translate_url(text, direction),
    };
    url.map_or(Action::Hint, Action::Open)
}

/// Wire the widget if its elements are on the page.
pub fn mount_when_ready() {
    #[cfg(feature = "browser")]
    crate::dom::when_dom_ready(browser::mount);
}

#[cfg(feature = "browser")]
mod browser {
    use gloo_timers::callback::Timeout;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

    use super::*;
    use crate::dom::{self, listen};

    const HINT_BORDER_COLOR: &str = "#ff6b6b";
    const HINT_DURATION_MS: u32 = 2_000;

    pub fn mount() {
        let Ok(document) = dom::document() else {
            return;
        };
        mount_search(&document);
        mount_translation(&document);
    }

    fn field_value(el: &Element) -> String {
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            el.text_content().unwrap_or_default()
        }
    }

    fn set_field_value(el: &Element, value: &str) {
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        } else {
            el.set_text_content(Some(value));
        }
    }

    fn flash_hint(el: &Element, hint: &'static str, placeholder: &'static str) {
        let Some(el) = el.dyn_ref::<HtmlElement>() else {
            return;
        };
        let _ = el.style().set_property("border-color", HINT_BORDER_COLOR);
        let _ = el.set_attribute("placeholder", hint);
        let el = el.clone();
        Timeout::new(HINT_DURATION_MS, move || {
            let _ = el.style().remove_property("border-color");
            let _ = el.set_attribute("placeholder", placeholder);
        })
        .forget();
    }

    fn scale_on_focus(target: &HtmlElement, el: &Element, scale: &'static str) {
        for (event, value) in [("focus", scale), ("blur", "scale(1)")] {
            let target = target.clone();
            let registered = listen(el, event, move |_: web_sys::Event| {
                let _ = target.style().set_property("transform", value);
            });
            if let Err(e) = registered {
                log::warn!("{event} listener failed: {e}");
            }
        }
    }

    fn mount_search(document: &Document) {
        let (Some(input), Some(button)) = (
            document.get_element_by_id(SEARCH_INPUT_ID),
            document.get_element_by_id(SEARCH_BUTTON_ID),
        ) else {
            return;
        };

        let submit = {
            let input = input.clone();
            move || match search_action(&field_value(&input)) {
                Action::Open(url) => dom::open_tab(&url),
                Action::Hint => flash_hint(&input, SEARCH_HINT, SEARCH_PLACEHOLDER),
            }
        };
        let on_click = submit.clone();
        if let Err(e) = listen(&button, "click", move |_: web_sys::Event| on_click()) {
            log::warn!("search click listener failed: {e}");
        }
        let registered = listen(&input, "keypress", move |ev: web_sys::KeyboardEvent| {
            if ev.key() == "Enter" {
                submit();
            }
        });
        if let Err(e) = registered {
            log::warn!("search keypress listener failed: {e}");
        }

        if let Some(parent) = input.parent_element().and_then(|p| p.dyn_into::<HtmlElement>().ok()) {
            scale_on_focus(&parent, &input, "scale(1.02)");
        }
    }

    fn mount_translation(document: &Document) {
        let (Some(input), Some(baidu), Some(google), Some(direction)) = (
            document.get_element_by_id(TRANSLATION_INPUT_ID),
            document.get_element_by_id(BAIDU_BUTTON_ID),
            document.get_element_by_id(GOOGLE_BUTTON_ID),
            document.get_element_by_id(DIRECTION_INPUT_ID),
        ) else {
            return;
        };
        let output = document.get_element_by_id(TRANSLATION_OUTPUT_ID);

        if let Err(e) = build_direction_select(document, &direction) {
            log::warn!("translate direction dropdown not built: {e}");
        }

        for (button, translator) in [(baidu, Translator::Baidu), (google, Translator::Google)] {
            let input = input.clone();
            let direction = direction.clone();
            let output = output.clone();
            let registered = listen(&button, "click", move |_: web_sys::Event| {
                match translate_action(translator, &field_value(&input), &field_value(&direction)) {
                    Action::Open(url) => {
                        dom::open_tab(&url);
                        if let (Translator::Baidu, Some(output)) = (translator, output.as_ref()) {
                            set_field_value(output, BAIDU_OPENED);
                        }
                    }
                    Action::Hint => flash_hint(&input, TRANSLATE_HINT, TRANSLATE_PLACEHOLDER),
                }
            });
            if let Err(e) = registered {
                log::warn!("{translator:?} click listener failed: {e}");
            }
        }

        for field in std::iter::once(&input).chain(output.as_ref()) {
            if let Some(target) = field.dyn_ref::<HtmlElement>() {
                scale_on_focus(target, field, "scale(1.01)");
            }
        }
    }

    /// Replace the native direction control with a styled dropdown that
    /// writes its selection back into `direction`.
    fn build_direction_select(document: &Document, direction: &Element) -> Result<(), sequencer::PageError> {
        let Some(host) = document.query_selector(".translation-options").ok().flatten() else {
            return Ok(());
        };
        let js = |e: wasm_bindgen::JsValue| sequencer::PageError::Dom(format!("{e:?}"));

        let container = document.create_element("div").map_err(js)?;
        container.set_class_name("custom-select");
        let display = document.create_element("div").map_err(js)?;
        display.set_class_name("select-display");
        let dropdown = document.create_element("div").map_err(js)?;
        dropdown.set_class_name("select-dropdown");

        let mut options = Vec::new();
        for d in Direction::ALL {
            let option = document.create_element("button").map_err(js)?;
            option.set_class_name(if d == Direction::default() {
                "select-option selected"
            } else {
                "select-option"
            });
            option.set_text_content(Some(d.label()));
            option.set_attribute("data-value", d.value()).map_err(js)?;
            dropdown.append_child(&option).map_err(js)?;
            options.push((option, d));
        }
        container.append_child(&display).map_err(js)?;
        container.append_child(&dropdown).map_err(js)?;
        host.append_child(&container).map_err(js)?;

        display.set_text_content(Some(Direction::default().label()));
        set_field_value(direction, Direction::default().value());

        {
            let dropdown = dropdown.clone();
            listen(&display, "click", move |ev: web_sys::Event| {
                ev.stop_propagation();
                let _ = dropdown.class_list().toggle("active");
            })?;
        }
        let all: Vec<Element> = options.iter().map(|(o, _)| o.clone()).collect();
        for (option, d) in options {
            let all = all.clone();
            let selected = option.clone();
            let display = display.clone();
            let dropdown = dropdown.clone();
            let direction = direction.clone();
            listen(&option, "click", move |ev: web_sys::Event| {
                ev.stop_propagation();
                for o in &all {
                    let _ = o.class_list().remove_1("selected");
                }
                let _ = selected.class_list().add_1("selected");
                display.set_text_content(Some(d.label()));
                set_field_value(&direction, d.value());
                let _ = dropdown.class_list().remove_1("active");
            })?;
        }
        listen(document, "click", move |_: web_sys::Event| {
            let _ = dropdown.class_list().remove_1("active");
        })?;
        Ok(())
    }
}
