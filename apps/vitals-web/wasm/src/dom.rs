//! Small web-sys access helpers shared by the page effects.

use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("No window object available"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("No document object available"))
}

/// Current query string without the leading `?`.
pub fn query_string() -> Result<String, JsValue> {
    let search = window()?.location().search()?;
    Ok(search.strip_prefix('?').unwrap_or(&search).to_string())
}

/// Replace the text content of the element with `id`, if it exists.
pub fn set_text(document: &Document, id: &str, text: &str) {
    if let Some(element) = document.get_element_by_id(id) {
        element.set_text_content(Some(text));
    }
}
