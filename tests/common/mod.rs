// Browser fixtures shared by the wasm test binaries.
#![allow(dead_code)]

use profile_card::dom;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlElement, KeyboardEvent, KeyboardEventInit};

const INDEX_HTML: &str = include_str!("../../www/index.html");

/// Replace the document body with the demo page's markup. Inline scripts do not run.
pub fn mount_page() -> Document {
    let doc = dom::document().unwrap();
    let start = INDEX_HTML.find("<body>").unwrap() + "<body>".len();
    let end = INDEX_HTML.find("</body>").unwrap();
    doc.body().unwrap().set_inner_html(&INDEX_HTML[start..end]);
    doc
}

pub async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve: js_sys::Function, _: js_sys::Function| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

/// Poll `cond` every 25ms; false if it never held within `timeout_ms`.
pub async fn wait_until(mut cond: impl FnMut() -> bool, timeout_ms: i32) -> bool {
    let mut waited = 0;
    while !cond() {
        if waited >= timeout_ms {
            return false;
        }
        sleep(25).await;
        waited += 25;
    }
    true
}

/// Dispatch one keydown per key on the document.
pub fn type_keys(doc: &Document, keys: &[&str]) {
    for key in keys {
        let init = KeyboardEventInit::new();
        init.set_key(key);
        let evt = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
        doc.dispatch_event(&evt).unwrap();
    }
}

pub fn element(doc: &Document, id: &'static str) -> HtmlElement {
    dom::by_id(doc, id).unwrap()
}

pub fn text_of(doc: &Document, id: &'static str) -> String {
    element(doc, id).text_content().unwrap_or_default()
}

pub fn display_of(doc: &Document, id: &'static str) -> String {
    element(doc, id).style().get_property_value("display").unwrap()
}
