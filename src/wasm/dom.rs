//! Browser glue: global lookups, element helpers, storage and timers.

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Storage, Window};

use crate::config::{SiteConfig, CONFIG_ELEMENT_ID};
use crate::error::{CanvasError, PageError};
use crate::state::{MemoryStore, PreferenceStore};

pub(crate) fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

impl From<JsValue> for PageError {
    fn from(value: JsValue) -> Self {
        PageError::Js(describe(&value))
    }
}

impl From<JsValue> for CanvasError {
    fn from(value: JsValue) -> Self {
        CanvasError::Js(describe(&value))
    }
}

impl From<PageError> for JsValue {
    fn from(err: PageError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<CanvasError> for JsValue {
    fn from(err: CanvasError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub fn window() -> Result<Window, PageError> {
    web_sys::window().ok_or(PageError::Missing("window"))
}

pub fn document() -> Result<Document, PageError> {
    window()?.document().ok_or(PageError::Missing("document"))
}

/// Milliseconds on the monotonic page clock.
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Viewport size in CSS pixels plus the device pixel ratio.
pub fn viewport() -> Result<(f64, f64, f64), PageError> {
    let window = window()?;
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok((width, height, window.device_pixel_ratio()))
}

/// Create `<tag class="class">` and append it to `parent`.
pub fn append(document: &Document, parent: &Element, tag: &str, class: &str) -> Result<HtmlElement, PageError> {
    let element: HtmlElement = document
        .create_element(tag)?
        .dyn_into()
        .map_err(|_| PageError::Js(format!("<{tag}> is not an HTML element")))?;
    if !class.is_empty() {
        element.set_class_name(class);
    }
    parent.append_child(&element)?;
    Ok(element)
}

/// Create an element with the given text and append it to `parent`.
pub fn append_text(
    document: &Document,
    parent: &Element,
    tag: &str,
    class: &str,
    text: &str,
) -> Result<HtmlElement, PageError> {
    let element = append(document, parent, tag, class)?;
    element.set_text_content(Some(text));
    Ok(element)
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = element.style().set_property(property, value) {
        log::warn!("unable to set {property}: {}", describe(&e));
    }
}

pub fn set_square(element: &HtmlElement, side_px: f64) {
    let side = format!("{side_px}px");
    set_style(element, "width", &side);
    set_style(element, "height", &side);
}

/// Read the optional JSON configuration block from the page.
pub fn load_config(document: &Document) -> SiteConfig {
    match document.get_element_by_id(CONFIG_ELEMENT_ID).and_then(|e| e.text_content()) {
        Some(text) if !text.trim().is_empty() => SiteConfig::from_json_or_default(&text),
        _ => SiteConfig::default(),
    }
}

/// Preferences in `window.localStorage`, or in memory when storage is
/// unavailable (private mode, sandboxed frames).
pub enum LocalStore {
    Browser(Storage),
    Memory(MemoryStore),
}

impl LocalStore {
    pub fn open() -> Self {
        match web_sys::window().map(|w| w.local_storage()) {
            Some(Ok(Some(storage))) => LocalStore::Browser(storage),
            _ => {
                log::warn!("local storage unavailable, shader choice will not persist");
                LocalStore::Memory(MemoryStore::default())
            }
        }
    }
}

impl PreferenceStore for LocalStore {
    fn load(&self, key: &str) -> Option<String> {
        match self {
            LocalStore::Browser(storage) => storage.get_item(key).ok().flatten(),
            LocalStore::Memory(store) => store.load(key),
        }
    }

    fn save(&self, key: &str, value: &str) {
        match self {
            LocalStore::Browser(storage) => {
                if let Err(e) = storage.set_item(key, value) {
                    log::warn!("unable to persist {key}: {}", describe(&e));
                }
            }
            LocalStore::Memory(store) => store.save(key, value),
        }
    }
}

/// A browser timeout or interval, cleared when dropped.
pub struct Timer {
    handle: i32,
    repeat: bool,
    _callback: Closure<dyn FnMut()>,
}

impl Timer {
    pub fn once(delay_ms: u32, callback: impl FnMut() + 'static) -> Result<Self, PageError> {
        Self::schedule(delay_ms, false, callback)
    }

    pub fn every(interval_ms: u32, callback: impl FnMut() + 'static) -> Result<Self, PageError> {
        Self::schedule(interval_ms, true, callback)
    }

    fn schedule(ms: u32, repeat: bool, callback: impl FnMut() + 'static) -> Result<Self, PageError> {
        let callback = Closure::wrap(Box::new(callback) as Box<dyn FnMut()>);
        let window = window()?;
        let function: &js_sys::Function = callback.as_ref().unchecked_ref();
        let ms = i32::try_from(ms).unwrap_or(i32::MAX);
        let handle = if repeat {
            window.set_interval_with_callback_and_timeout_and_arguments_0(function, ms)?
        } else {
            window.set_timeout_with_callback_and_timeout_and_arguments_0(function, ms)?
        };
        Ok(Self {
            handle,
            repeat,
            _callback: callback,
        })
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            if self.repeat {
                window.clear_interval_with_handle(self.handle);
            } else {
                window.clear_timeout_with_handle(self.handle);
            }
        }
    }
}
