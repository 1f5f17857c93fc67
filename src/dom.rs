//! `web-sys` hosts for the bootstrap sequencer plus small DOM helpers shared
//! by the widgets.
//!
//! ERROR HANDLING
//! ==============
//! Thrown `JsValue`s are flattened into [`PageError::Dom`] /
//! [`StorageError::Access`] strings; callers log them and continue.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use futures::FutureExt;
use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use sequencer::{
    LoadOutcome, NavigationSource, Page, PageError, ReadyEvent, ResourceKind, ResourceSpec, Scheduler, Storage,
    StorageError,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;

#[cfg(test)]
#[path = "dom_test.rs"]
mod dom_test;

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn dom_error(value: JsValue) -> PageError {
    PageError::Dom(js_message(&value))
}

/// The current document.
///
/// # Errors
/// Returns [`PageError::MissingDocument`] outside a window context.
pub fn document() -> Result<web_sys::Document, PageError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or(PageError::MissingDocument)
}

/// Register `f` for `event` on `target` for the rest of the page lifetime.
///
/// Events that are not an `E` are ignored.
///
/// # Errors
/// Returns [`PageError::Dom`] when the listener is rejected.
pub fn listen<E, F>(target: &web_sys::EventTarget, event: &str, mut f: F) -> Result<(), PageError>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let cb = Closure::wrap(Box::new(move |ev: web_sys::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            f(ev);
        }
    }) as Box<dyn FnMut(web_sys::Event)>);
    target
        .add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
        .map_err(dom_error)?;
    // Page-lifetime listener.
    cb.forget();
    Ok(())
}

/// Run `f` once the document has been parsed.
pub fn when_dom_ready(f: impl FnOnce() + 'static) {
    let Ok(document) = document() else {
        return;
    };
    if !crate::boot::is_loading(&document.ready_state()) {
        f();
        return;
    }
    let mut f = Some(f);
    let registered = listen(&document, "DOMContentLoaded", move |_: web_sys::Event| {
        if let Some(f) = f.take() {
            f();
        }
    });
    if let Err(e) = registered {
        log::warn!("DOMContentLoaded listener failed: {e}");
    }
}

/// Open `url` in a new tab.
pub fn open_tab(url: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.open_with_url_and_target(url, "_blank") {
        log::warn!("failed to open {url}: {}", js_message(&e));
    }
}

fn global_defined(name: &str) -> bool {
    js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str(name)).map_or(false, |v| !v.is_undefined())
}

/// `localStorage`.
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or(StorageError::Unavailable)?
            .local_storage()
            .map_err(|e| StorageError::Access(js_message(&e)))?
            .ok_or(StorageError::Unavailable)
    }
}

impl Storage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Access(js_message(&e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Access(js_message(&e)))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Access(js_message(&e)))
    }
}

/// The live document.
pub struct BrowserPage;

impl Page for BrowserPage {
    fn set_root_attribute(&self, name: &str, value: &str) -> Result<(), PageError> {
        document()?
            .document_element()
            .ok_or(PageError::MissingDocument)?
            .set_attribute(name, value)
            .map_err(dom_error)
    }

    fn has_resource(&self, spec: &ResourceSpec) -> bool {
        if spec.global.as_deref().is_some_and(global_defined) {
            return true;
        }
        document()
            .ok()
            .and_then(|d| d.query_selector(&spec.selector()).ok().flatten())
            .is_some()
    }

    fn load_resource(&self, spec: &ResourceSpec) -> Result<LocalBoxFuture<'static, LoadOutcome>, PageError> {
        let document = document()?;
        let element = document.create_element(spec.kind.tag_name()).map_err(dom_error)?;
        if spec.kind == ResourceKind::Stylesheet {
            element.set_attribute("rel", "stylesheet").map_err(dom_error)?;
        }
        element
            .set_attribute(spec.kind.url_attribute(), &spec.url)
            .map_err(dom_error)?;

        let (tx, rx) = oneshot::channel();
        let tx = Rc::new(RefCell::new(Some(tx)));
        for (event, outcome) in [("load", LoadOutcome::Loaded), ("error", LoadOutcome::Failed)] {
            let tx = Rc::clone(&tx);
            listen(&element, event, move |_: web_sys::Event| {
                if let Some(tx) = tx.borrow_mut().take() {
                    let _ = tx.send(outcome);
                }
            })?;
        }

        document
            .head()
            .ok_or(PageError::MissingDocument)?
            .append_child(&element)
            .map_err(dom_error)?;
        Ok(rx.map(|r| r.unwrap_or(LoadOutcome::Failed)).boxed_local())
    }

    fn dispatch(&self, event: &ReadyEvent) -> Result<(), PageError> {
        let detail = js_sys::Object::new();
        js_sys::Reflect::set(
            &detail,
            &JsValue::from_str("message"),
            &JsValue::from_str(&event.message),
        )
        .map_err(dom_error)?;
        let init = web_sys::CustomEventInit::new();
        init.set_detail(&detail);
        let custom = web_sys::CustomEvent::new_with_event_init_dict(&event.name, &init).map_err(dom_error)?;
        document()?.dispatch_event(&custom).map_err(dom_error)?;
        Ok(())
    }

    fn remove_matching(&self, selector: &str) -> Result<usize, PageError> {
        let nodes = document()?.query_selector_all(selector).map_err(dom_error)?;
        let mut removed = 0;
        for i in 0..nodes.length() {
            if let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok()) {
                el.remove();
                removed += 1;
            }
        }
        Ok(removed)
    }
}

/// Browser event loop: `setTimeout` sleeps and `spawn_local` tasks.
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        gloo_timers::future::sleep(duration).boxed_local()
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}

/// Navigation notifications dispatched on `document` (pjax and friends).
pub struct DocumentNavigation;

impl NavigationSource for DocumentNavigation {
    fn subscribe(&self, event: &str, handler: Rc<dyn Fn()>) -> Result<(), PageError> {
        let document = document()?;
        listen(&document, event, move |_: web_sys::Event| handler())
    }
}
