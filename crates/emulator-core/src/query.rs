//! Query-string reading and patching.
//!
//! Shared by the server pages (preset hrefs) and the browser client
//! (quick-set navigation). Pair order is preserved so patched links stay
//! recognisable next to the address bar.

/// A single patch operation: `Some` sets the key, `None` removes it.
pub type Patch<'a> = (&'a str, Option<&'a str>);

/// Split a raw query string (no leading `?`) into decoded key/value pairs.
pub fn parse_pairs(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|piece| !piece.is_empty())
        .map(|piece| match piece.split_once('=') {
            Some((key, value)) => (decode_component(key), decode_component(value)),
            None => (decode_component(piece), String::new()),
        })
        .collect()
}

/// First value for `key`, decoded. `None` when the key is absent.
pub fn get_param(query: &str, key: &str) -> Option<String> {
    parse_pairs(query)
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
}

/// Rebuild `path?query` with `patch` applied.
///
/// Existing keys are overwritten in place, `None` removes them, new keys
/// append at the end. An empty result drops the `?` entirely.
pub fn build_href(path: &str, query: &str, patch: &[Patch<'_>]) -> String {
    let mut pairs = parse_pairs(query);

    for (key, value) in patch {
        match value {
            Some(value) => {
                if let Some(existing) = pairs.iter_mut().find(|(k, _)| k == key) {
                    existing.1 = (*value).to_string();
                } else {
                    pairs.push(((*key).to_string(), (*value).to_string()));
                }
            }
            None => pairs.retain(|(k, _)| k != key),
        }
    }

    let qs = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
        .collect::<Vec<_>>()
        .join("&");

    if qs.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, qs)
    }
}

/// Percent-decode a query component; `+` means space. Malformed escapes are
/// passed through untouched rather than rejected.
fn decode_component(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => match (hex_val(bytes.get(i + 1)), hex_val(bytes.get(i + 2))) {
                (Some(hi), Some(lo)) => {
                    out.push(hi << 4 | lo);
                    i += 3;
                }
                _ => {
                    out.push(b'%');
                    i += 1;
                }
            },
            other => {
                out.push(other);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_val(byte: Option<&u8>) -> Option<u8> {
    byte.and_then(|b| (*b as char).to_digit(16)).map(|d| d as u8)
}

/// Percent-encode a query component, escaping everything outside the
/// unreserved set plus the characters that would break key/value framing.
fn encode_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
