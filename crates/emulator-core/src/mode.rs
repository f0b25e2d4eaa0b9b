//! Delay-realisation modes.
//!
//! Each mode set is closed: unrecognized query input maps to the documented
//! default variant rather than failing.

/// How the INP emulator consumes interaction latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InpMode {
    /// Busy-loop inside the event handler itself, blocking the next paint.
    #[default]
    Sync,
    /// Schedule the state update on a timer; the thread never blocks.
    SetTimeout,
    /// Defer the busy-loop to the next animation frame.
    Raf,
}

impl InpMode {
    /// Parse the `mode` query value; anything unrecognized is `Sync`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("setTimeout") => Self::SetTimeout,
            Some("raf") => Self::Raf,
            _ => Self::Sync,
        }
    }

    /// The query-parameter spelling of this mode.
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Sync => "sync",
            Self::SetTimeout => "setTimeout",
            Self::Raf => "raf",
        }
    }
}

/// How the LCP emulator delays the largest visual candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LcpMode {
    /// The candidate image is fetched through the delayed image endpoint.
    #[default]
    Image,
    /// The page render itself is suspended server-side.
    Server,
}

impl LcpMode {
    /// Parse the `mode` query value; anything unrecognized is `Image`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("server") => Self::Server,
            _ => Self::Image,
        }
    }

    /// The query-parameter spelling of this mode.
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Server => "server",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inp_mode_recognises_variants() {
        assert_eq!(InpMode::parse(Some("sync")), InpMode::Sync);
        assert_eq!(InpMode::parse(Some("setTimeout")), InpMode::SetTimeout);
        assert_eq!(InpMode::parse(Some("raf")), InpMode::Raf);
    }

    #[test]
    fn inp_mode_falls_back_to_sync() {
        assert_eq!(InpMode::parse(None), InpMode::Sync);
        assert_eq!(InpMode::parse(Some("")), InpMode::Sync);
        assert_eq!(InpMode::parse(Some("settimeout")), InpMode::Sync);
        assert_eq!(InpMode::parse(Some("RAF")), InpMode::Sync);
    }

    #[test]
    fn lcp_mode_falls_back_to_image() {
        assert_eq!(LcpMode::parse(Some("server")), LcpMode::Server);
        assert_eq!(LcpMode::parse(None), LcpMode::Image);
        assert_eq!(LcpMode::parse(Some("client")), LcpMode::Image);
        assert_eq!(LcpMode::parse(Some("Server")), LcpMode::Image);
    }

    #[test]
    fn param_spelling_round_trips() {
        for mode in [InpMode::Sync, InpMode::SetTimeout, InpMode::Raf] {
            assert_eq!(InpMode::parse(Some(mode.as_param())), mode);
        }
        for mode in [LcpMode::Image, LcpMode::Server] {
            assert_eq!(LcpMode::parse(Some(mode.as_param())), mode);
        }
    }
}
