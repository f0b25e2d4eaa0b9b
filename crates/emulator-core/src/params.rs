//! Query-parameter parsing and clamping.
//!
//! Parsing is total: missing, malformed, or out-of-range input degrades to
//! the no-op default, never to an error. Both parsers accept a numeric
//! prefix and ignore whatever follows, matching lenient scanner semantics.

/// Upper bound for the layout-shift ratio.
pub const MAX_CLS_RATIO: f64 = 1.0;

/// Upper bound for any emulated delay, in milliseconds.
pub const MAX_DELAY_MS: u64 = 60_000;

/// Clamp `value` into the closed interval `[min, max]`.
pub fn clamp_f64(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Parse a layout-shift ratio from a raw query value.
///
/// Accepts either `.` or `,` as the decimal separator. Non-numeric or
/// non-finite input yields 0. The result is clamped to `[0, MAX_CLS_RATIO]`.
pub fn parse_ratio(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else { return 0.0 };
    let normalized = raw.trim().replace(',', ".");
    let Some(parsed) = leading_f64(&normalized) else {
        return 0.0;
    };
    if !parsed.is_finite() {
        return 0.0;
    }
    clamp_f64(parsed, 0.0, MAX_CLS_RATIO)
}

/// Parse a millisecond count from a raw query value.
///
/// Takes an optional sign and leading base-10 digits; anything after the
/// digits is ignored. Non-numeric input yields 0, negative input clamps to
/// 0, and the result never exceeds [`MAX_DELAY_MS`].
pub fn parse_ms(raw: Option<&str>) -> u64 {
    let Some(raw) = raw else { return 0 };
    let trimmed = raw.trim();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits: &str = {
        let end = rest
            .as_bytes()
            .iter()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() || negative {
        return 0;
    }
    match digits.parse::<u64>() {
        Ok(value) => value.min(MAX_DELAY_MS),
        // More digits than u64 can hold is beyond any bound we accept.
        Err(_) => MAX_DELAY_MS,
    }
}

/// Extract the longest float literal prefix of `s`, if any.
///
/// Recognises `[+-]? digits [. digits] [eE [+-] digits]` with at least one
/// mantissa digit, the subset a lenient float scanner accepts.
fn leading_f64(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut frac_digits = 0;
    if i < bytes.len() && bytes[i] == b'.' {
        let dot = i;
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = i - frac_start;
        if int_digits == 0 && frac_digits == 0 {
            // A lone dot (or sign-dot) is not a number.
            i = dot;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mark = i;
        let mut j = i + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        } else {
            i = mark;
        }
    }

    s[..i].parse::<f64>().ok()
}
