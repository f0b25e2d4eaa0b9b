//! Procedural SVG placeholder.
//!
//! When the LCP page delays its own render server-side, the candidate image
//! must not cost a second round-trip, so a vector graphic is synthesized and
//! embedded as a data URI instead of being fetched.

/// Geometry and copy for a synthesized placeholder graphic.
#[derive(Debug, Clone)]
pub struct PlaceholderSpec {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub subtitle: String,
}

impl PlaceholderSpec {
    /// The SVG document: dark backdrop, two blurred gradient circles, a
    /// rounded translucent panel, then title, subtitle, and caption text.
    pub fn svg(&self) -> String {
        let w = f64::from(self.width);
        let h = f64::from(self.height);
        let min_side = w.min(h);

        format!(
            r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">
  <defs>
    <linearGradient id="g" x1="0" y1="0" x2="1" y2="1">
      <stop offset="0" stop-color="#7c3aed"/>
      <stop offset="0.5" stop-color="#2563eb"/>
      <stop offset="1" stop-color="#06b6d4"/>
    </linearGradient>
    <filter id="blur" x="-10%" y="-10%" width="120%" height="120%">
      <feGaussianBlur stdDeviation="14"/>
    </filter>
  </defs>
  <rect width="{width}" height="{height}" fill="#0b0f19"/>
  <circle cx="{c1x}" cy="{c1y}" r="{c1r}" fill="url(#g)" opacity="0.9" filter="url(#blur)"/>
  <circle cx="{c2x}" cy="{c2y}" r="{c2r}" fill="url(#g)" opacity="0.75" filter="url(#blur)"/>
  <rect x="{px}" y="{py}" width="{pw}" height="{ph}" rx="28" fill="rgba(255,255,255,0.06)" stroke="rgba(255,255,255,0.12)"/>
  <text x="{tx}" y="{title_y}" font-family="ui-sans-serif, system-ui, -apple-system, Segoe UI, Roboto, Arial" font-size="56" font-weight="700" fill="#e6eaf2">
    {title}
  </text>
  <text x="{tx}" y="{subtitle_y}" font-family="ui-sans-serif, system-ui, -apple-system, Segoe UI, Roboto, Arial" font-size="26" font-weight="500" fill="rgba(230,234,242,0.8)">
    {subtitle}
  </text>
  <text x="{tx}" y="{caption_y}" font-family="ui-sans-serif, system-ui, -apple-system, Segoe UI, Roboto, Arial" font-size="18" font-weight="500" fill="rgba(230,234,242,0.65)">
    Largest Contentful Paint candidate
  </text>
</svg>"##,
            width = self.width,
            height = self.height,
            c1x = (w * 0.2).round(),
            c1y = (h * 0.35).round(),
            c1r = (min_side * 0.22).round(),
            c2x = (w * 0.78).round(),
            c2y = (h * 0.55).round(),
            c2r = (min_side * 0.18).round(),
            px = (w * 0.06).round(),
            py = (h * 0.12).round(),
            pw = (w * 0.88).round(),
            ph = (h * 0.76).round(),
            tx = (w * 0.1).round(),
            title_y = (h * 0.32).round(),
            subtitle_y = (h * 0.4).round(),
            caption_y = (h * 0.76).round(),
            title = xml_escape(&self.title),
            subtitle = xml_escape(&self.subtitle),
        )
    }

    /// The SVG packaged as an inline `data:` URI, safe inside an HTML
    /// attribute because everything outside the unreserved set is escaped.
    pub fn data_uri(&self) -> String {
        format!(
            "data:image/svg+xml;charset=utf-8,{}",
            encode_uri_component(&self.svg())
        )
    }
}

fn xml_escape(s: &str) -> String {
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

/// Escape every byte outside `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
fn encode_uri_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 2);
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
