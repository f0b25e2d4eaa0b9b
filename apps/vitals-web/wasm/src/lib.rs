//! Browser client for the vitals-lab emulator pages.
//!
//! One bundle serves every page; which effect mounts is decided by the
//! page's root element id. `#cls-root` gets the layout-shift injector,
//! `#inp-root` gets the interaction panel. The LCP page has no client-side
//! effect, so nothing mounts there.

use wasm_bindgen::prelude::*;

pub mod cls;
pub mod dom;
pub mod inp;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let document = dom::document()?;

    if document.get_element_by_id("cls-root").is_some() {
        cls::mount()?;
    }

    if document.get_element_by_id("inp-root").is_some() {
        inp::mount()?;
    }

    Ok(())
}
