//! Browser smoke tests for the client effects.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use vitals_wasm::{cls, dom};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn cls_mount_is_a_noop_without_a_ratio() {
    let document = dom::document().unwrap();
    let root = document.create_element("div").unwrap();
    root.set_id("cls-root");
    document.body().unwrap().append_child(&root).unwrap();

    // The test page's URL carries no CLS parameter, so nothing may be
    // injected, immediately or on a later frame.
    cls::mount().unwrap();
    assert!(root.query_selector(".shiftBanner").unwrap().is_none());

    document.body().unwrap().remove_child(&root).unwrap();
}
