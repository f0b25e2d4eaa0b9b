//! Property-based tests for the emulation core.
//!
//! Parsing must be total and bounded for arbitrary input, clamped output
//! must be stable under re-parsing, and unrecognized modes must fall back
//! to the documented defaults.

use proptest::prelude::*;

use emulator_core::{
    banner_height_px, build_href, get_param, parse_ms, parse_ratio, EffectSpec, InpMode, LcpMode,
    MAX_CLS_RATIO, MAX_DELAY_MS,
};

/// Strings that contain no leading numeric prefix.
fn non_numeric() -> impl Strategy<Value = String> {
    "[a-zA-Z _%#@]{0,24}".prop_filter("must not start with a number", |s| {
        let t = s.trim();
        !t.starts_with(|c: char| c.is_ascii_digit())
            && !t.starts_with('+')
            && !t.starts_with('-')
            && !t.starts_with('.')
    })
}

proptest! {
    /// Any string at all parses to a ratio inside the documented bound.
    #[test]
    fn ratio_is_always_bounded(raw in ".{0,40}") {
        let ratio = parse_ratio(Some(&raw));
        prop_assert!((0.0..=MAX_CLS_RATIO).contains(&ratio), "ratio {} out of bounds", ratio);
    }

    /// Any string at all parses to a delay inside the documented bound.
    #[test]
    fn ms_is_always_bounded(raw in ".{0,40}") {
        let ms = parse_ms(Some(&raw));
        prop_assert!(ms <= MAX_DELAY_MS);
    }

    /// Non-numeric input always yields the no-op default.
    #[test]
    fn non_numeric_input_is_the_default(raw in non_numeric()) {
        prop_assert_eq!(parse_ratio(Some(&raw)), 0.0);
        prop_assert_eq!(parse_ms(Some(&raw)), 0);
    }

    /// Re-parsing the stringified clamped output returns the same value.
    #[test]
    fn parse_then_stringify_is_idempotent(raw in ".{0,40}") {
        let ratio = parse_ratio(Some(&raw));
        prop_assert_eq!(parse_ratio(Some(&ratio.to_string())), ratio);

        let ms = parse_ms(Some(&raw));
        prop_assert_eq!(parse_ms(Some(&ms.to_string())), ms);
    }

    /// In-range numeric input survives the clamp untouched.
    #[test]
    fn in_range_ms_passes_through(ms in 0u64..=MAX_DELAY_MS) {
        prop_assert_eq!(parse_ms(Some(&ms.to_string())), ms);
    }

    /// Out-of-range numeric input pins to the nearest bound.
    #[test]
    fn out_of_range_ms_pins_to_bounds(ms in (MAX_DELAY_MS + 1)..u64::MAX / 2) {
        prop_assert_eq!(parse_ms(Some(&ms.to_string())), MAX_DELAY_MS);
    }

    /// Unrecognized mode strings fall back to the per-emulator default.
    #[test]
    fn unknown_modes_fall_back(raw in "[a-zA-Z]{1,12}".prop_filter(
        "must not be a known mode",
        |s| !matches!(s.as_str(), "sync" | "setTimeout" | "raf" | "server")
    )) {
        prop_assert_eq!(InpMode::parse(Some(&raw)), InpMode::Sync);
        prop_assert_eq!(LcpMode::parse(Some(&raw)), LcpMode::Image);
    }

    /// The polymorphic constructors never panic and always clamp.
    #[test]
    fn effect_specs_are_total(ms in ".{0,24}", mode in ".{0,12}", ratio in ".{0,24}") {
        match EffectSpec::layout_shift(Some(&ratio)) {
            EffectSpec::LayoutShift { ratio } => prop_assert!((0.0..=MAX_CLS_RATIO).contains(&ratio)),
            other => prop_assert!(false, "wrong variant: {:?}", other),
        }
        match EffectSpec::interaction_delay(Some(&ms), Some(&mode)) {
            EffectSpec::InteractionDelay { ms, .. } => prop_assert!(ms <= MAX_DELAY_MS),
            other => prop_assert!(false, "wrong variant: {:?}", other),
        }
        match EffectSpec::render_delay(Some(&ms), Some(&mode)) {
            EffectSpec::RenderDelay { ms, .. } => prop_assert!(ms <= MAX_DELAY_MS),
            other => prop_assert!(false, "wrong variant: {:?}", other),
        }
    }

    /// Banner sizing stays within one rounding step of the exact product.
    #[test]
    fn banner_height_tracks_the_product(ratio in 0.001f64..=1.0, vh in 1.0f64..4000.0) {
        if let Some(px) = banner_height_px(ratio, vh) {
            let exact = ratio * vh;
            prop_assert!((f64::from(px) - exact).abs() <= 0.5 + f64::EPSILON * exact);
        }
    }

    /// Patching a query preserves unrelated keys.
    #[test]
    fn patching_preserves_other_keys(value in "[0-9]{1,5}") {
        let href = build_href("/inp", "mode=raf&other=1", &[("INP", Some(&value))]);
        let query = href.split_once('?').map(|(_, q)| q).unwrap_or("");
        let mode = get_param(query, "mode");
        prop_assert_eq!(mode.as_deref(), Some("raf"));
        let other = get_param(query, "other");
        prop_assert_eq!(other.as_deref(), Some("1"));
        prop_assert_eq!(get_param(query, "INP"), Some(value));
    }
}
