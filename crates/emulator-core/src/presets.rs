//! Preset links rendered on the emulator pages.

use crate::query::build_href;

/// One clickable preset card: a label, a one-line description, and the
/// query patch it applies to the current location.
pub struct Preset {
    pub title: &'static str,
    pub desc: &'static str,
    pub patch: &'static [(&'static str, Option<&'static str>)],
}

impl Preset {
    /// Href for this preset applied to the current path and query.
    pub fn href(&self, path: &str, query: &str) -> String {
        build_href(path, query, self.patch)
    }
}

/// CLS presets, labelled with the metric's scoring thresholds.
pub const CLS_PRESETS: &[Preset] = &[
    Preset {
        title: "CLS=0",
        desc: "No banner injection",
        patch: &[("CLS", Some("0"))],
    },
    Preset {
        title: "CLS=0.1",
        desc: "Good",
        patch: &[("CLS", Some("0.1"))],
    },
    Preset {
        title: "CLS=0.25",
        desc: "Needs improvement",
        patch: &[("CLS", Some("0.25"))],
    },
    Preset {
        title: "CLS=0.8",
        desc: "Poor",
        patch: &[("CLS", Some("0.8"))],
    },
];

/// INP delay presets.
pub const INP_PRESETS: &[Preset] = &[
    Preset {
        title: "INP=0ms",
        desc: "Normal responsiveness",
        patch: &[("INP", Some("0"))],
    },
    Preset {
        title: "INP=200ms",
        desc: "Borderline poor on fast devices",
        patch: &[("INP", Some("200"))],
    },
    Preset {
        title: "INP=500ms",
        desc: "Noticeable input degradation",
        patch: &[("INP", Some("500"))],
    },
    Preset {
        title: "INP=3000ms",
        desc: "Very poor INP (long tasks)",
        patch: &[("INP", Some("3000"))],
    },
];

/// Links switching the INP delay variant.
pub const INP_MODE_LINKS: &[Preset] = &[
    Preset {
        title: "mode=sync",
        desc: "Block inside the event handler",
        patch: &[("mode", Some("sync"))],
    },
    Preset {
        title: "mode=setTimeout",
        desc: "Late result, thread stays free",
        patch: &[("mode", Some("setTimeout"))],
    },
    Preset {
        title: "mode=raf",
        desc: "Block at the next animation frame",
        patch: &[("mode", Some("raf"))],
    },
];

/// LCP presets.
pub const LCP_PRESETS: &[Preset] = &[
    Preset {
        title: "LCP=0ms",
        desc: "Fast load (mode=image)",
        patch: &[("LCP", Some("0"))],
    },
    Preset {
        title: "LCP=3000ms",
        desc: "Delay LCP via deferred image load",
        patch: &[("LCP", Some("3000"))],
    },
    Preset {
        title: "LCP=3000ms, mode=server",
        desc: "Delay LCP via server-side render delay",
        patch: &[("LCP", Some("3000")), ("mode", Some("server"))],
    },
];
