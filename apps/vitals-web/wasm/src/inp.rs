//! Interaction panel for the INP page.
//!
//! Wires the page's buttons and input to the delay variants (sync busy-loop,
//! deferred timer, frame-aligned busy-loop) and keeps the status cards in
//! sync via a passive event-timing subscription. Everything the panel grabs
//! from the page (listeners, the observer) is owned by one [`Panel`] value
//! and released on drop, so teardown is deterministic.

use std::cell::RefCell;
use std::cmp;
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, KeyboardEvent, PerformanceEntry,
    PerformanceObserver, PerformanceObserverEntryList,
};

use emulator_core::interaction::format_ms;
use emulator_core::{
    build_href, busy_wait, get_param, EffectSpec, InpMode, InteractionRecord, InteractionTracker,
    ObservedEvent,
};

use crate::dom;

/// Keystrokes other than Enter are capped so typing stays usable.
const KEYDOWN_CAP_MS: u64 = 250;

/// How much of the configured delay an interaction consumes.
#[derive(Clone, Copy)]
enum Amount {
    Full,
    Capped,
}

/// Parsed page parameters plus the shared interaction tracker.
struct PanelState {
    ms: u64,
    mode: InpMode,
    tracker: InteractionTracker,
}

/// The mounted panel: every listener and subscription it owns.
struct Panel {
    listeners: Vec<(Element, &'static str, Closure<dyn FnMut(Event)>)>,
    observer: Option<PerformanceObserver>,
    _observer_callback: Option<Closure<dyn FnMut(PerformanceObserverEntryList)>>,
}

impl Drop for Panel {
    fn drop(&mut self) {
        for (target, name, closure) in &self.listeners {
            let _ = target
                .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        }
        if let Some(observer) = &self.observer {
            observer.disconnect();
        }
    }
}

thread_local! {
    static ACTIVE: RefCell<Option<Panel>> = const { RefCell::new(None) };
}

pub fn mount() -> Result<(), JsValue> {
    let document = dom::document()?;
    let query = dom::query_string()?;

    let effect = EffectSpec::interaction_delay(
        get_param(&query, "INP").as_deref(),
        get_param(&query, "mode").as_deref(),
    );
    let (ms, mode) = match effect {
        EffectSpec::InteractionDelay { ms, mode } => (ms, mode),
        _ => (0, InpMode::Sync),
    };

    let state = Rc::new(RefCell::new(PanelState {
        ms,
        mode,
        tracker: InteractionTracker::new(),
    }));

    let mut panel = Panel {
        listeners: Vec::new(),
        observer: None,
        _observer_callback: None,
    };

    if let Some(button) = document.get_element_by_id("btn-pointer") {
        let handler = interaction_handler(&document, &state, "primary-button", Amount::Full);
        add_listener(&mut panel, button, "pointerdown", handler);
    }

    if let Some(button) = document.get_element_by_id("btn-click") {
        let handler = interaction_handler(&document, &state, "click-button", Amount::Full);
        add_listener(&mut panel, button, "click", handler);
    }

    if let Some(button) = document.get_element_by_id("btn-reset") {
        let doc = document.clone();
        let state_ref = Rc::clone(&state);
        let handler = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let mut state = state_ref.borrow_mut();
            state.tracker.reset();
            render_counters(&doc, &state);
            drop(state);
            render_last(&doc, None);
        });
        add_listener(&mut panel, button, "click", handler);
    }

    if let Some(input) = document.get_element_by_id("inp-input") {
        let doc = document.clone();
        let state_ref = Rc::clone(&state);
        let handler = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let key = event
                .dyn_ref::<KeyboardEvent>()
                .map(|e| e.key())
                .unwrap_or_default();
            if key == "Enter" {
                run_interaction(&doc, &state_ref, "input-enter", Amount::Full);
            } else {
                run_interaction(&doc, &state_ref, "input-keydown", Amount::Capped);
            }
        });
        add_listener(&mut panel, input, "keydown", handler);
    }

    let quick_set = document.query_selector_all("[data-set-inp]")?;
    for i in 0..quick_set.length() {
        let Some(node) = quick_set.item(i) else { continue };
        let Ok(element) = node.dyn_into::<Element>() else {
            continue;
        };
        let Some(value) = element.get_attribute("data-set-inp") else {
            continue;
        };
        let handler = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let _ = navigate_with_inp(&value);
        });
        add_listener(&mut panel, element, "click", handler);
    }

    match subscribe_event_timing(&document, &state) {
        Ok((observer, callback)) => {
            dom::set_text(&document, "stat-observer", "supported");
            panel.observer = Some(observer);
            panel._observer_callback = Some(callback);
        }
        Err(_) => {
            // The page keeps working; only the timing cards degrade.
            dom::set_text(&document, "stat-observer", "not supported");
        }
    }

    render_counters(&document, &state.borrow());

    let on_pagehide = Closure::once_into_js(move || {
        ACTIVE.with(|active| active.borrow_mut().take());
    });
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    dom::window()?.add_event_listener_with_callback_and_add_event_listener_options(
        "pagehide",
        on_pagehide.unchecked_ref(),
        &options,
    )?;

    ACTIVE.with(|active| *active.borrow_mut() = Some(panel));

    Ok(())
}

fn add_listener(
    panel: &mut Panel,
    target: Element,
    name: &'static str,
    closure: Closure<dyn FnMut(Event)>,
) {
    let _ = target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
    panel.listeners.push((target, name, closure));
}

fn interaction_handler(
    document: &Document,
    state: &Rc<RefCell<PanelState>>,
    label: &'static str,
    amount: Amount,
) -> Closure<dyn FnMut(Event)> {
    let document = document.clone();
    let state = Rc::clone(state);
    Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        run_interaction(&document, &state, label, amount);
    })
}

/// One interaction: `idle → busy → idle`, with the work realised per mode.
///
/// The busy flag is advisory display state. A second interaction arriving
/// while one is pending re-enters here and serializes through the same
/// thread; that behavior is the point of the emulator.
fn run_interaction(
    document: &Document,
    state: &Rc<RefCell<PanelState>>,
    label: &str,
    amount: Amount,
) {
    let (work_ms, mode) = {
        let state_ref = state.borrow();
        let work = match amount {
            Amount::Full => state_ref.ms,
            Amount::Capped => cmp::min(state_ref.ms, KEYDOWN_CAP_MS),
        };
        (work, state_ref.mode)
    };

    {
        let mut state_mut = state.borrow_mut();
        state_mut.tracker.begin(label);
        render_counters(document, &state_mut);
    }

    match mode {
        InpMode::Sync => {
            block_main_thread(work_ms);
            finish(document, state);
        }
        InpMode::SetTimeout => {
            let document = document.clone();
            let state = Rc::clone(state);
            let timer = Closure::once_into_js(move || {
                finish(&document, &state);
            });
            if let Ok(window) = dom::window() {
                let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    timer.unchecked_ref(),
                    work_ms as i32,
                );
            }
        }
        InpMode::Raf => {
            let document = document.clone();
            let state = Rc::clone(state);
            let frame = Closure::once_into_js(move || {
                block_main_thread(work_ms);
                finish(&document, &state);
            });
            if let Ok(window) = dom::window() {
                let _ = window.request_animation_frame(frame.unchecked_ref());
            }
        }
    }
}

fn finish(document: &Document, state: &Rc<RefCell<PanelState>>) {
    let mut state_mut = state.borrow_mut();
    state_mut.tracker.finish();
    render_counters(document, &state_mut);
}

/// Busy-loop on the main thread against the high-resolution clock.
fn block_main_thread(ms: u64) {
    if ms == 0 {
        return;
    }
    if let Some(performance) = dom::window().ok().and_then(|w| w.performance()) {
        busy_wait(move || performance.now(), ms as f64);
    }
}

type ObserverParts = (
    PerformanceObserver,
    Closure<dyn FnMut(PerformanceObserverEntryList)>,
);

/// Subscribe to buffered event-timing entries with a zero duration
/// threshold; reconciliation and de-duplication live in the tracker.
fn subscribe_event_timing(
    document: &Document,
    state: &Rc<RefCell<PanelState>>,
) -> Result<ObserverParts, JsValue> {
    ensure_event_timing_supported()?;

    let document = document.clone();
    let state = Rc::clone(state);

    let callback = Closure::<dyn FnMut(PerformanceObserverEntryList)>::new(
        move |list: PerformanceObserverEntryList| {
            for entry in list.get_entries().iter() {
                let Ok(entry) = entry.dyn_into::<PerformanceEntry>() else {
                    continue;
                };
                if entry.entry_type() != "event" {
                    continue;
                }

                let observed = ObservedEvent {
                    name: entry.name(),
                    start_time: entry.start_time(),
                    duration: entry.duration(),
                    processing_start: reflect_f64(&entry, "processingStart"),
                    processing_end: reflect_f64(&entry, "processingEnd"),
                    interaction_id: reflect_f64(&entry, "interactionId").map(|id| id as u64),
                };

                let mut state_mut = state.borrow_mut();
                if let Some(record) = state_mut.tracker.observe(observed) {
                    let record = record.clone();
                    drop(state_mut);
                    render_last(&document, Some(&record));
                }
            }
        },
    );

    let observer = PerformanceObserver::new(callback.as_ref().unchecked_ref())?;

    let options = js_sys::Object::new();
    Reflect::set(&options, &"type".into(), &"event".into())?;
    Reflect::set(&options, &"buffered".into(), &JsValue::TRUE)?;
    Reflect::set(&options, &"durationThreshold".into(), &JsValue::from_f64(0.0))?;
    observer.observe(options.unchecked_ref());

    Ok((observer, callback))
}

/// Probe for event-timing support without letting a missing constructor or
/// an unsupported entry type throw through `observe`.
fn ensure_event_timing_supported() -> Result<(), JsValue> {
    let global = js_sys::global();
    let ctor = Reflect::get(&global, &JsValue::from_str("PerformanceObserver"))?;
    if ctor.is_undefined() {
        return Err(JsValue::from_str("PerformanceObserver unavailable"));
    }

    let types = Reflect::get(&ctor, &JsValue::from_str("supportedEntryTypes"))?;
    let has_event = js_sys::Array::is_array(&types)
        && js_sys::Array::from(&types)
            .iter()
            .any(|t| t.as_string().as_deref() == Some("event"));
    if !has_event {
        return Err(JsValue::from_str("event timing not supported"));
    }

    Ok(())
}

/// Fields the typed entry interface does not expose yet.
fn reflect_f64(entry: &PerformanceEntry, key: &str) -> Option<f64> {
    Reflect::get(entry.as_ref(), &JsValue::from_str(key))
        .ok()
        .and_then(|value| value.as_f64())
}

fn render_counters(document: &Document, state: &PanelState) {
    dom::set_text(document, "stat-clicks", &state.tracker.clicks().to_string());
    dom::set_text(
        document,
        "stat-busy",
        if state.tracker.is_busy() { "yes" } else { "no" },
    );
}

fn render_last(document: &Document, record: Option<&InteractionRecord>) {
    match record {
        Some(record) => {
            dom::set_text(document, "stat-last-name", &record.name);
            dom::set_text(document, "stat-last-duration", &format_ms(record.duration));
            let processing = match (record.processing_start, record.processing_end) {
                (Some(start), Some(end)) => {
                    format!("{} \u{2192} {}", format_ms(start), format_ms(end))
                }
                _ => "\u{2014}".to_string(),
            };
            dom::set_text(document, "stat-processing", &processing);
            dom::set_text(document, "stat-start", &format_ms(record.start_time));
        }
        None => {
            for id in [
                "stat-last-name",
                "stat-last-duration",
                "stat-processing",
                "stat-start",
            ] {
                dom::set_text(document, id, "\u{2014}");
            }
        }
    }
}

/// Navigate to the current page with `INP` replaced, keeping other params.
fn navigate_with_inp(value: &str) -> Result<(), JsValue> {
    let window = dom::window()?;
    let location = window.location();
    let path = location.pathname()?;
    let query = dom::query_string()?;
    let href = build_href(&path, &query, &[("INP", Some(value))]);
    location.set_href(&href)
}
