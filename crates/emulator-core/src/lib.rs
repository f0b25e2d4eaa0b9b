//! Deterministic emulation of poor Core Web Vitals.
//!
//! Shared core behind the vitals-lab pages. Every emulator follows the same
//! shape: read one scalar from the query string, clamp it into a safe range,
//! then apply an effect proportional to the clamped value (a layout shift, a
//! blocked interaction, or a delayed render). This crate owns that
//! parameter-to-effect mapping plus the pure state the interaction panel
//! keeps; the HTTP server and the browser client stay thin.

pub mod busy;
pub mod effect;
pub mod interaction;
pub mod mode;
pub mod params;
pub mod placeholder;
pub mod presets;
pub mod query;

pub use busy::busy_wait;
pub use effect::{banner_height_px, EffectSpec};
pub use interaction::{BusyState, InteractionRecord, InteractionTracker, ObservedEvent};
pub use mode::{InpMode, LcpMode};
pub use params::{parse_ms, parse_ratio, MAX_CLS_RATIO, MAX_DELAY_MS};
pub use placeholder::PlaceholderSpec;
pub use presets::{Preset, CLS_PRESETS, INP_MODE_LINKS, INP_PRESETS, LCP_PRESETS};
pub use query::{build_href, get_param};
