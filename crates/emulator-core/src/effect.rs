//! The shared parse → clamp → apply shape behind all three emulators.
//!
//! Query input only reaches an effect through one of the [`EffectSpec`]
//! constructors, so the parsing and clamping rules live in exactly one place.

use crate::mode::{InpMode, LcpMode};
use crate::params::{parse_ms, parse_ratio};

/// A fully parsed and clamped emulator effect.
#[derive(Debug, Clone, PartialEq)]
pub enum EffectSpec {
    /// Insert a top banner sized to `ratio` of the viewport height.
    LayoutShift { ratio: f64 },
    /// Consume `ms` of interaction latency, realised per `mode`.
    InteractionDelay { ms: u64, mode: InpMode },
    /// Delay the page's LCP candidate by `ms`, realised per `mode`.
    RenderDelay { ms: u64, mode: LcpMode },
}

impl EffectSpec {
    /// Layout-shift effect from the raw `CLS` query value.
    pub fn layout_shift(raw_ratio: Option<&str>) -> Self {
        Self::LayoutShift {
            ratio: parse_ratio(raw_ratio),
        }
    }

    /// Interaction-delay effect from the raw `INP` and `mode` query values.
    pub fn interaction_delay(raw_ms: Option<&str>, raw_mode: Option<&str>) -> Self {
        Self::InteractionDelay {
            ms: parse_ms(raw_ms),
            mode: InpMode::parse(raw_mode),
        }
    }

    /// Render-delay effect from the raw `LCP` and `mode` query values.
    pub fn render_delay(raw_ms: Option<&str>, raw_mode: Option<&str>) -> Self {
        Self::RenderDelay {
            ms: parse_ms(raw_ms),
            mode: LcpMode::parse(raw_mode),
        }
    }

    /// True when applying the effect would change nothing.
    pub fn is_noop(&self) -> bool {
        match self {
            Self::LayoutShift { ratio } => *ratio <= 0.0,
            Self::InteractionDelay { ms, .. } | Self::RenderDelay { ms, .. } => *ms == 0,
        }
    }
}

/// Banner height for a layout-shift effect, in device pixels.
///
/// `None` when the ratio or the viewport height is non-positive, or when the
/// computed height rounds to zero; callers treat `None` as "inject nothing".
pub fn banner_height_px(ratio: f64, viewport_height: f64) -> Option<u32> {
    if !(ratio > 0.0) || !(viewport_height > 0.0) {
        return None;
    }
    let px = (ratio * viewport_height).round();
    if px >= 1.0 {
        Some(px as u32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_share_the_parse_rules() {
        assert_eq!(
            EffectSpec::layout_shift(Some("0,8")),
            EffectSpec::LayoutShift { ratio: 0.8 }
        );
        assert_eq!(
            EffectSpec::interaction_delay(Some("200"), Some("raf")),
            EffectSpec::InteractionDelay {
                ms: 200,
                mode: InpMode::Raf
            }
        );
        assert_eq!(
            EffectSpec::render_delay(Some("-5"), Some("bogus")),
            EffectSpec::RenderDelay {
                ms: 0,
                mode: LcpMode::Image
            }
        );
    }

    #[test]
    fn noop_detection() {
        assert!(EffectSpec::layout_shift(None).is_noop());
        assert!(EffectSpec::layout_shift(Some("-0.5")).is_noop());
        assert!(!EffectSpec::layout_shift(Some("0.1")).is_noop());
        assert!(EffectSpec::interaction_delay(Some("junk"), None).is_noop());
        assert!(!EffectSpec::render_delay(Some("3000"), None).is_noop());
    }

    #[test]
    fn banner_height_rounds_against_viewport() {
        assert_eq!(banner_height_px(0.5, 800.0), Some(400));
        assert_eq!(banner_height_px(0.333, 1000.0), Some(333));
        assert_eq!(banner_height_px(0.25, 930.0), Some(233));
    }

    #[test]
    fn banner_height_guards_degenerate_input() {
        assert_eq!(banner_height_px(0.0, 800.0), None);
        assert_eq!(banner_height_px(-0.2, 800.0), None);
        assert_eq!(banner_height_px(0.5, 0.0), None);
        assert_eq!(banner_height_px(0.5, -100.0), None);
        assert_eq!(banner_height_px(f64::NAN, 800.0), None);
        assert_eq!(banner_height_px(0.0001, 100.0), None);
    }
}
