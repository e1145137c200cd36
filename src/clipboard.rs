//! Copy-to-clipboard with a selection fallback for hosts without the async
//! clipboard API.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Clipboard, HtmlDocument, HtmlTextAreaElement};

use crate::error::{ClipboardError, describe_js};
use crate::profile::Profile;
use crate::render::PLACEHOLDER_TEXT;

/// Text the copy button places on the clipboard; the placeholder while no profile
/// has loaded.
pub fn copy_text_for(profile: Option<&Profile>) -> String {
    profile
        .map(Profile::clipboard_label)
        .unwrap_or_else(|| PLACEHOLDER_TEXT.to_string())
}

/// Write `text` through `navigator.clipboard`, falling back to an off-screen
/// textarea and `execCommand("copy")`.
pub async fn write_text(text: &str) -> Result<(), ClipboardError> {
    match native_write(text).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::debug!(error = %e, "native clipboard write failed; trying selection copy");
            selection_copy(text)
        }
    }
}

async fn native_write(text: &str) -> Result<(), ClipboardError> {
    let window = web_sys::window().ok_or(ClipboardError::Unavailable)?;
    let navigator = window.navigator();
    let clipboard = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
        .ok_or(ClipboardError::Unavailable)?
        .unchecked_into::<Clipboard>();
    JsFuture::from(clipboard.write_text(text))
        .await
        .map(|_| ())
        .map_err(|e| ClipboardError::Rejected(describe_js(&e)))
}

fn selection_copy(text: &str) -> Result<(), ClipboardError> {
    let doc = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(ClipboardError::Unavailable)?;
    let body = doc.body().ok_or(ClipboardError::Unavailable)?;
    let area: HtmlTextAreaElement = doc
        .create_element("textarea")
        .map_err(|e| ClipboardError::Rejected(describe_js(&e)))?
        .unchecked_into();
    area.set_value(text);
    let _ = area.set_attribute("readonly", "");
    let _ = area
        .style()
        .set_css_text("position: fixed; top: 0; left: -9999px; opacity: 0;");
    body.append_child(&area)
        .map_err(|e| ClipboardError::Rejected(describe_js(&e)))?;
    area.select();

    let copied = doc
        .dyn_ref::<HtmlDocument>()
        .ok_or(ClipboardError::Unavailable)
        .and_then(|html| {
            html.exec_command("copy")
                .map_err(|e| ClipboardError::Rejected(describe_js(&e)))
        });
    area.remove();

    if copied? { Ok(()) } else { Err(ClipboardError::Unavailable) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_when_nothing_loaded() {
        assert_eq!(copy_text_for(None), "Loading...");
    }

    #[test]
    fn handle_or_tagged_name() {
        let mut p = Profile::from_json(r#"{"username":"ferris","id":"1","global_name":"Ferris"}"#, "t")
            .unwrap();
        assert_eq!(copy_text_for(Some(&p)), "@ferris");
        p.discriminator = "7".into();
        assert_eq!(copy_text_for(Some(&p)), "Ferris#7");
    }
}
