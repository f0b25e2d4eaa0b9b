//! Server-side HTML for the emulator pages.
//!
//! Four pages of static markup assembled from small builders. Class names
//! double as the styling contract with the embedded stylesheet; element ids
//! are the contract with the browser client, which looks pages up by their
//! root id and status cards by their `stat-*` ids.

use emulator_core::{
    InpMode, LcpMode, Preset, CLS_PRESETS, INP_MODE_LINKS, INP_PRESETS, LCP_PRESETS,
};

const STYLE: &str = r#"
:root { color-scheme: dark; }
* { box-sizing: border-box; }
body {
  margin: 0;
  background: #0b0f19;
  color: #e6eaf2;
  font-family: ui-sans-serif, system-ui, -apple-system, "Segoe UI", Roboto, Arial, sans-serif;
}
.container { max-width: 1100px; margin: 0 auto; padding: 32px 20px 64px; }
.header { margin-bottom: 24px; }
.title { margin: 0 0 8px; font-size: 32px; font-weight: 700; }
.subtitle { margin: 0; color: rgba(230, 234, 242, 0.75); }
code, .kbd {
  background: rgba(255, 255, 255, 0.08);
  border-radius: 6px;
  padding: 2px 6px;
  font-family: ui-monospace, SFMono-Regular, Menlo, Consolas, monospace;
  font-size: 0.9em;
}
.controls { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 12px; margin-bottom: 24px; }
.linkCard {
  display: block;
  padding: 14px 16px;
  border: 1px solid rgba(255, 255, 255, 0.12);
  border-radius: 12px;
  background: rgba(255, 255, 255, 0.04);
  color: inherit;
  text-decoration: none;
}
.linkCard:hover { border-color: rgba(124, 58, 237, 0.8); }
.linkTitle { font-weight: 600; margin-bottom: 4px; }
.linkDesc { font-size: 13px; color: rgba(230, 234, 242, 0.65); }
.info, .grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 12px; margin-bottom: 24px; }
.gridTop { margin-top: 24px; }
.infoCard, .card {
  padding: 12px 16px;
  border: 1px solid rgba(255, 255, 255, 0.1);
  border-radius: 12px;
  background: rgba(255, 255, 255, 0.03);
}
.infoLabel, .label { margin: 0 0 4px; font-size: 12px; text-transform: uppercase; letter-spacing: 0.06em; color: rgba(230, 234, 242, 0.55); }
.infoValue, .value { margin: 0; font-size: 18px; font-weight: 600; }
.panel { padding: 16px; border: 1px solid rgba(255, 255, 255, 0.1); border-radius: 12px; background: rgba(255, 255, 255, 0.03); }
.row { display: flex; flex-wrap: wrap; gap: 10px; align-items: center; }
.divider { height: 1px; background: rgba(255, 255, 255, 0.1); margin: 14px 0; }
.btn {
  padding: 10px 14px;
  border: 1px solid rgba(255, 255, 255, 0.16);
  border-radius: 10px;
  background: rgba(255, 255, 255, 0.06);
  color: inherit;
  font: inherit;
  cursor: pointer;
  text-decoration: none;
}
.btnPrimary { background: #7c3aed; border-color: #7c3aed; }
.btnDanger { background: rgba(220, 38, 38, 0.8); border-color: rgba(220, 38, 38, 0.8); }
.pill {
  padding: 4px 10px;
  border-radius: 999px;
  border: 1px solid rgba(255, 255, 255, 0.14);
  font-size: 13px;
  color: rgba(230, 234, 242, 0.75);
}
.input {
  flex: 1 1 240px;
  padding: 10px 12px;
  border: 1px solid rgba(255, 255, 255, 0.16);
  border-radius: 10px;
  background: rgba(255, 255, 255, 0.04);
  color: inherit;
  font: inherit;
}
.hint { margin: 14px 0 0; font-size: 14px; color: rgba(230, 234, 242, 0.65); }
.viewportBox { min-height: 100vh; }
.hero {
  min-height: 100vh;
  border: 1px solid rgba(255, 255, 255, 0.1);
  border-radius: 16px;
  background: linear-gradient(135deg, rgba(124, 58, 237, 0.25), rgba(6, 182, 212, 0.2));
  display: flex;
  align-items: center;
}
.heroInner { padding: 32px; }
.heroTitle { margin: 0 0 12px; font-size: 26px; }
.heroText { margin: 0; color: rgba(230, 234, 242, 0.8); max-width: 640px; }
.shiftBanner {
  overflow: hidden;
  border-radius: 12px;
  background: repeating-linear-gradient(45deg, rgba(220, 38, 38, 0.35), rgba(220, 38, 38, 0.35) 12px, rgba(220, 38, 38, 0.2) 12px, rgba(220, 38, 38, 0.2) 24px);
  margin-bottom: 16px;
}
.shiftBannerInner { padding: 10px 14px; font-weight: 600; }
.lcpBox { border-radius: 16px; overflow: hidden; border: 1px solid rgba(255, 255, 255, 0.1); }
.lcpImage { display: block; width: 100%; height: auto; }
"#;

/// Escape text for element content or a double-quoted attribute.
fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

/// Document shell. `main_attrs` lands on the `<main>` element; the browser
/// client is only loaded on pages with a client-side effect.
fn shell(title: &str, main_attrs: &str, body: &str, load_client: bool) -> String {
    let client = if load_client {
        "<script type=\"module\">import init from '/pkg/vitals_web.js'; init();</script>"
    } else {
        ""
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
<main class="container"{main_attrs}>
{body}
</main>
{client}
</body>
</html>
"#,
        title = esc(title),
    )
}

fn header(title: &str, subtitle_html: &str) -> String {
    format!(
        r#"<div class="header">
<h1 class="title">{}</h1>
<p class="subtitle">{}</p>
</div>"#,
        esc(title),
        subtitle_html,
    )
}

fn link_cards(presets: &[Preset], path: &str, query: &str) -> String {
    let cards: Vec<String> = presets
        .iter()
        .map(|preset| {
            format!(
                r#"<a class="linkCard" href="{}">
<div class="linkTitle">{}</div>
<div class="linkDesc">{}</div>
</a>"#,
                esc(&preset.href(path, query)),
                esc(preset.title),
                esc(preset.desc),
            )
        })
        .collect();
    format!("<div class=\"controls\">\n{}\n</div>", cards.join("\n"))
}

fn info_card(label: &str, value_html: &str) -> String {
    format!(
        r#"<div class="infoCard">
<p class="infoLabel">{}</p>
<p class="infoValue">{}</p>
</div>"#,
        esc(label),
        value_html,
    )
}

fn stat_card(label: &str, id: &str, value: &str) -> String {
    format!(
        r#"<div class="card">
<p class="label">{}</p>
<p class="value" id="{}">{}</p>
</div>"#,
        esc(label),
        id,
        esc(value),
    )
}

/// Landing page listing the three emulators.
pub fn index_page() -> String {
    let body = format!(
        "{}\n{}",
        header(
            "Web Vitals Lab",
            "Three pages that degrade one Core Web Vital each, on demand, via query parameters.",
        ),
        r#"<div class="controls">
<a class="linkCard" href="/cls?CLS=0.25">
<div class="linkTitle">CLS emulator</div>
<div class="linkDesc">Late top-banner injection shifts the whole page</div>
</a>
<a class="linkCard" href="/inp?INP=500&amp;mode=sync">
<div class="linkTitle">INP emulator</div>
<div class="linkDesc">Interactions block, defer, or stall at the next frame</div>
</a>
<a class="linkCard" href="/lcp?LCP=3000">
<div class="linkTitle">LCP emulator</div>
<div class="linkDesc">The largest image arrives as late as you ask</div>
</a>
</div>"#,
    );
    shell("Web Vitals Lab", "", &body, false)
}

/// CLS emulator page.
pub fn cls_page(ratio: f64, query: &str) -> String {
    let approx_vh = (ratio * 100.0).round();
    let body = format!(
        r#"{header}
{controls}
<div class="info">
{requested}
{technique}
{height}
</div>
<div class="viewportBox">
<div class="hero">
<div class="heroInner">
<h2 class="heroTitle">Content that fills the viewport</h2>
<p class="heroText">This block deliberately spans the full viewport height. When the banner is injected above it, everything here moves down, producing a controlled layout shift.</p>
</div>
</div>
</div>"#,
        header = header(
            "Speed CLS Emulator",
            r#"Use the query parameter: <code>?CLS=0.8</code>. No mode parameter needed."#,
        ),
        controls = link_cards(CLS_PRESETS, "/cls", query),
        requested = info_card("requested CLS", &esc(&ratio.to_string())),
        technique = info_card("shift technique", "top banner injection"),
        height = info_card("banner height", &format!("~{}vh (approx)", approx_vh)),
    );
    shell("Speed CLS Emulator", " id=\"cls-root\"", &body, true)
}

/// INP emulator page.
pub fn inp_page(ms: u64, mode: InpMode, query: &str) -> String {
    let ms_label = format!("{}ms", ms);
    let quick_set: String = [50u64, 200, 800, 3000]
        .iter()
        .map(|v| {
            format!(
                r#"<button class="btn" type="button" data-set-inp="{v}">Set INP={v}</button>"#
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let body = format!(
        r#"{header}
{controls}
<div class="grid">
{mode_card}
{requested_card}
{clicks_card}
{observer_card}
</div>
<div class="panel">
<div class="row">
<button class="btn btnPrimary" type="button" id="btn-pointer" aria-busy="false">PointerDown: emulate {ms_label}</button>
<button class="btn" type="button" id="btn-click" aria-busy="false">Click: emulate {ms_label}</button>
<button class="btn btnDanger" type="button" id="btn-reset">Reset</button>
<span class="pill">Try: mode {mode_param}</span>
<span class="pill">Main thread work: {ms_label}</span>
<span class="pill">Busy: <span id="stat-busy">no</span></span>
</div>
<div class="divider"></div>
<div class="row">
<input class="input" id="inp-input" placeholder="Type here (keydown will be measured)">
{quick_set}
</div>
<div class="divider"></div>
<div class="row">
{mode_links}
</div>
<p class="hint"><span class="kbd">mode=sync</span> blocks the main thread inside the event handler, so the next paint is held back; that is what hurts INP. <span class="kbd">mode=setTimeout</span> shows a late result instead and usually leaves INP alone. <span class="kbd">mode=raf</span> moves the blocking next to the rendering frame.</p>
</div>
<div class="grid gridTop">
{last_name}
{last_duration}
{processing}
{start_time}
</div>"#,
        header = header(
            "Speed INP Emulator",
            r#"Query parameters: <code>?INP=3000</code> and <code>&amp;mode=sync</code>. For poor INP use <span class="kbd">mode=sync</span> and a large delay."#,
        ),
        controls = link_cards(INP_PRESETS, "/inp", query),
        mode_param = mode.as_param(),
        mode_card = stat_card("mode", "stat-mode", mode.as_param()),
        requested_card = stat_card("requested INP", "stat-requested", &ms_label),
        clicks_card = stat_card("clicks", "stat-clicks", "0"),
        observer_card = stat_card("PerformanceObserver(event)", "stat-observer", "checking"),
        mode_links = INP_MODE_LINKS
            .iter()
            .map(|preset| format!(
                r#"<a class="btn" href="{}">{}</a>"#,
                esc(&preset.href("/inp", query)),
                esc(preset.title),
            ))
            .collect::<Vec<_>>()
            .join("\n"),
        last_name = stat_card("last event (Event Timing)", "stat-last-name", "\u{2014}"),
        last_duration = stat_card("last duration", "stat-last-duration", "\u{2014}"),
        processing = stat_card("processing (start \u{2192} end)", "stat-processing", "\u{2014}"),
        start_time = stat_card("startTime", "stat-start", "\u{2014}"),
    );
    shell("Speed INP Emulator", " id=\"inp-root\"", &body, true)
}

/// LCP emulator page.
pub fn lcp_page(ms: u64, mode: LcpMode, img_src: &str, query: &str) -> String {
    let element_label = match mode {
        LcpMode::Image => "/api/image",
        LcpMode::Server => "data URI SVG",
    };

    let body = format!(
        r#"{header}
{controls}
<div class="info">
{mode_card}
{requested}
{element}
</div>
<div class="lcpBox">
<img class="lcpImage" src="{src}" alt="LCP element" width="1440" height="810" loading="eager" fetchpriority="high" decoding="async">
</div>"#,
        header = header(
            "Speed LCP Emulator",
            r#"Use the query parameters: <code>?LCP=3000</code> and <code>&amp;mode=server</code>."#,
        ),
        controls = link_cards(LCP_PRESETS, "/lcp", query),
        mode_card = info_card("mode", mode.as_param()),
        requested = info_card("requested LCP", &format!("{}ms", ms)),
        element = info_card("LCP element", element_label),
        src = esc(img_src),
    );
    shell("Speed LCP Emulator", "", &body, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cls_page_reports_the_requested_ratio() {
        let html = cls_page(0.8, "CLS=0.8");
        assert!(html.contains("id=\"cls-root\""));
        assert!(html.contains("0.8"));
        assert!(html.contains("~80vh (approx)"));
        assert!(html.contains("/pkg/vitals_web.js"));
    }

    #[test]
    fn inp_page_exposes_the_client_contract() {
        let html = inp_page(3000, InpMode::Raf, "INP=3000&mode=raf");
        for id in [
            "inp-root",
            "btn-pointer",
            "btn-click",
            "btn-reset",
            "inp-input",
            "stat-busy",
            "stat-clicks",
            "stat-observer",
            "stat-last-name",
        ] {
            assert!(html.contains(&format!("id=\"{}\"", id)), "missing #{}", id);
        }
        assert!(html.contains("emulate 3000ms"));
        assert!(html.contains(">raf<"));
    }

    #[test]
    fn preset_hrefs_keep_the_other_parameters() {
        let html = inp_page(200, InpMode::Raf, "INP=200&mode=raf");
        assert!(html.contains("href=\"/inp?INP=500&amp;mode=raf\""));
    }

    #[test]
    fn lcp_page_embeds_the_candidate_source() {
        let html = lcp_page(3000, LcpMode::Image, "/api/image?delay=3000", "LCP=3000");
        assert!(html.contains("src=\"/api/image?delay=3000\""));
        assert!(html.contains("fetchpriority=\"high\""));
        // No client-side effect on this page.
        assert!(!html.contains("/pkg/vitals_web.js"));
    }
}
