//! Layout-shift injection for the CLS page.
//!
//! The banner must land after the first paint to register as a layout shift
//! rather than initial layout, so injection waits for the load event, then
//! two animation frames, then a 50 ms settle timer. Injection is idempotent:
//! an existing banner is resized and relabelled in place.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, HtmlElement};

use emulator_core::{banner_height_px, get_param, EffectSpec};

use crate::dom;

/// Delay after the second animation frame before injecting.
const SETTLE_TIMER_MS: i32 = 50;

pub fn mount() -> Result<(), JsValue> {
    let query = dom::query_string()?;
    let effect = EffectSpec::layout_shift(get_param(&query, "CLS").as_deref());
    let ratio = match effect {
        EffectSpec::LayoutShift { ratio } => ratio,
        _ => 0.0,
    };
    if ratio <= 0.0 {
        return Ok(());
    }

    if dom::document()?.ready_state() == "complete" {
        schedule(ratio)?;
    } else {
        let on_load = Closure::once_into_js(move || {
            let _ = schedule(ratio);
        });
        let options = AddEventListenerOptions::new();
        options.set_once(true);
        dom::window()?.add_event_listener_with_callback_and_add_event_listener_options(
            "load",
            on_load.unchecked_ref(),
            &options,
        )?;
    }

    Ok(())
}

/// Two animation frames, then the settle timer, then [`inject`].
fn schedule(ratio: f64) -> Result<(), JsValue> {
    let second_frame = Closure::once_into_js(move || {
        if let Ok(window) = dom::window() {
            let timer = Closure::once_into_js(move || {
                let _ = inject(ratio);
            });
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                timer.unchecked_ref(),
                SETTLE_TIMER_MS,
            );
        }
    });

    let first_frame = Closure::once_into_js(move || {
        if let Ok(window) = dom::window() {
            let _ = window.request_animation_frame(second_frame.unchecked_ref());
        }
    });

    dom::window()?.request_animation_frame(first_frame.unchecked_ref())?;
    Ok(())
}

fn inject(ratio: f64) -> Result<(), JsValue> {
    let window = dom::window()?;
    let document = dom::document()?;

    let mut viewport = window.inner_height()?.as_f64().unwrap_or(0.0);
    if viewport <= 0.0 {
        if let Some(root_element) = document.document_element() {
            viewport = f64::from(root_element.client_height());
        }
    }

    let Some(height_px) = banner_height_px(ratio, viewport) else {
        return Ok(());
    };

    let Some(root) = document.get_element_by_id("cls-root") else {
        return Ok(());
    };

    let label = format!("Injected banner: {}px (target CLS={})", height_px, ratio);
    let height_style = format!("{}px", height_px);

    if let Some(existing) = root.query_selector(".shiftBanner")? {
        if let Some(element) = existing.dyn_ref::<HtmlElement>() {
            element.style().set_property("height", &height_style)?;
        }
        if let Some(inner) = existing.query_selector(".shiftBannerInner")? {
            inner.set_text_content(Some(&label));
        }
        return Ok(());
    }

    let banner = document.create_element("div")?;
    banner.set_class_name("shiftBanner");
    if let Some(element) = banner.dyn_ref::<HtmlElement>() {
        element.style().set_property("height", &height_style)?;
    }

    let inner = document.create_element("div")?;
    inner.set_class_name("shiftBannerInner");
    inner.set_text_content(Some(&label));

    banner.append_child(&inner)?;
    root.insert_before(&banner, root.first_child().as_ref())?;

    Ok(())
}
