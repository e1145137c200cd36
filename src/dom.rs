//! Element ids the page markup provides, plus small lookup helpers.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, EventTarget, HtmlElement};

use crate::error::DomError;

pub mod ids {
    pub const COPY_BUTTON: &str = "discordButton";
    pub const COPY_BUTTON_TEXT: &str = "discordButtonText";
    pub const REFRESH_BUTTON: &str = "refreshButton";
    pub const DISPLAY_NAME: &str = "discordUsername";
    pub const HANDLE: &str = "discordDiscriminator";
    pub const AVATAR: &str = "profileAvatar";
    pub const INITIAL: &str = "profileInitial";
    pub const STATUS_DOT: &str = "statusDot";
    pub const STATUS_TEXT: &str = "statusText";
    pub const PARTICLES: &str = "particles";
    pub const SNAKE_SURFACE: &str = "snakeGame";
    pub const SNAKE_CANVAS: &str = "snakeCanvas";
    pub const SNAKE_CLOSE: &str = "snakeClose";
    pub const SNAKE_SCORE: &str = "snakeScore";
}

pub mod selectors {
    pub const PROFILE_CARD: &str = ".profile-card";
    pub const MOUSE_TRACK: &str = ".profile-card-mouse-track";
    pub const ORBS: [&str; 3] = [".gradient-orb-1", ".gradient-orb-2", ".gradient-orb-3"];
}

pub fn document() -> Result<Document, DomError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or(DomError::Js("no document".into()))
}

/// Fetch a required element by id and cast it to `T`.
pub fn by_id<T: JsCast>(doc: &Document, id: &'static str) -> Result<T, DomError> {
    doc.get_element_by_id(id)
        .ok_or(DomError::MissingElement(id))?
        .dyn_into::<T>()
        .map_err(|_| DomError::Js(format!("element #{id} has unexpected type")))
}

pub fn query(doc: &Document, selector: &'static str) -> Result<Option<HtmlElement>, DomError> {
    Ok(doc
        .query_selector(selector)?
        .and_then(|el: Element| el.dyn_into::<HtmlElement>().ok()))
}

pub fn set_text(doc: &Document, id: &'static str, text: &str) {
    if let Some(el) = doc.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

pub fn set_style(el: &HtmlElement, prop: &str, value: &str) {
    let _ = el.style().set_property(prop, value);
}

/// Run `f` once after `ms` milliseconds.
pub fn after(ms: i32, f: impl FnOnce() + 'static) {
    if let Some(w) = web_sys::window() {
        let cb = Closure::once_into_js(f);
        let _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms);
    }
}

/// Attach a listener that ignores its event argument. The listener lives as long
/// as the target.
pub fn on(target: &EventTarget, event: &str, f: impl FnMut() + 'static) -> Result<(), DomError> {
    let cb = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
    target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}
