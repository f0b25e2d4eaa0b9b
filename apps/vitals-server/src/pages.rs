//! Handlers for the landing page and the three emulator pages.
//!
//! Every page parses its own query parameters through the shared effect
//! constructors, so the clamping rules here are identical to the ones the
//! browser client applies.

use axum::{extract::RawQuery, response::Html};
use tokio::time::{sleep, Duration};
use tracing::info;

use emulator_core::{get_param, EffectSpec, InpMode, LcpMode, PlaceholderSpec};

use crate::render;

/// Handler: GET /
pub async fn handle_index() -> Html<String> {
    Html(render::index_page())
}

/// Handler: GET /cls?CLS=<ratio>
pub async fn handle_cls(RawQuery(query): RawQuery) -> Html<String> {
    let query = query.unwrap_or_default();
    let effect = EffectSpec::layout_shift(get_param(&query, "CLS").as_deref());
    let ratio = match effect {
        EffectSpec::LayoutShift { ratio } => ratio,
        _ => 0.0,
    };

    info!("CLS page: ratio={}", ratio);

    Html(render::cls_page(ratio, &query))
}

/// Handler: GET /inp?INP=<ms>&mode=<sync|setTimeout|raf>
pub async fn handle_inp(RawQuery(query): RawQuery) -> Html<String> {
    let query = query.unwrap_or_default();
    let effect = EffectSpec::interaction_delay(
        get_param(&query, "INP").as_deref(),
        get_param(&query, "mode").as_deref(),
    );
    let (ms, mode) = match effect {
        EffectSpec::InteractionDelay { ms, mode } => (ms, mode),
        _ => (0, InpMode::Sync),
    };

    info!("INP page: delay={}ms, mode={}", ms, mode.as_param());

    Html(render::inp_page(ms, mode, &query))
}

/// Handler: GET /lcp?LCP=<ms>&mode=<image|server>
///
/// In server mode the handler itself sleeps before producing markup, so the
/// whole document, placeholder graphic included, arrives late and becomes
/// the late LCP candidate.
pub async fn handle_lcp(RawQuery(query): RawQuery) -> Html<String> {
    let query = query.unwrap_or_default();
    let effect = EffectSpec::render_delay(
        get_param(&query, "LCP").as_deref(),
        get_param(&query, "mode").as_deref(),
    );
    let (ms, mode) = match effect {
        EffectSpec::RenderDelay { ms, mode } => (ms, mode),
        _ => (0, LcpMode::Image),
    };

    info!("LCP page: delay={}ms, mode={}", ms, mode.as_param());

    if mode == LcpMode::Server && ms > 0 {
        sleep(Duration::from_millis(ms)).await;
    }

    let img_src = match mode {
        // The candidate image travels through the delayed endpoint.
        LcpMode::Image => format!("/api/image?delay={}", ms),
        // The render itself was delayed; embed the graphic to avoid a
        // second round-trip.
        LcpMode::Server => PlaceholderSpec {
            width: 1440,
            height: 810,
            title: "Speed LCP Emulator".to_string(),
            subtitle: format!("mode=server, LCP={}ms", ms),
        }
        .data_uri(),
    };

    Html(render::lcp_page(ms, mode, &img_src, &query))
}
