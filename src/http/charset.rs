//! Text decoding of fetched bodies.
//!
//! The encoding is taken from the `Content-Type` charset, then from a
//! `<meta charset>` (or `http-equiv`) declaration near the start of the
//! body, and defaults to UTF-8. A byte order mark wins over all of them.

use encoding_rs::{Encoding, UTF_8};
use tracing::debug;

/// How far into the body a `<meta>` charset declaration is looked for.
const META_SNIFF_LEN: usize = 1024;

/// Decodes `body` into a string, replacing malformed sequences.
pub fn decode_text(body: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(charset_from_content_type)
        .or_else(|| charset_from_meta(body))
        .unwrap_or(UTF_8);

    let (text, used, malformed) = encoding.decode(body);
    if malformed {
        debug!("Body is not valid {}, replaced malformed sequences", used.name());
    }
    text.into_owned()
}

/// Encoding named by the `charset` parameter of a `Content-Type` value.
pub fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    content_type
        .split(';')
        .skip(1)
        .filter_map(|param| param.split_once('='))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("charset"))
        .and_then(|(_, value)| label(value))
}

/// Encoding declared by a `charset=` inside the first bytes of an HTML body.
pub fn charset_from_meta(body: &[u8]) -> Option<&'static Encoding> {
    let prefix = &body[..body.len().min(META_SNIFF_LEN)];
    let prefix = String::from_utf8_lossy(prefix).to_ascii_lowercase();

    let mut rest = prefix.as_str();
    while let Some(start) = rest.find("charset=") {
        rest = &rest[start + "charset=".len()..];
        let value = rest
            .trim_start()
            .trim_start_matches(['"', '\''])
            .split(|c: char| c.is_whitespace() || matches!(c, '"' | '\'' | ';' | '>' | '/'))
            .next()
            .unwrap_or_default();
        if let Some(encoding) = label(value) {
            return Some(encoding);
        }
    }

    None
}

fn label(value: &str) -> Option<&'static Encoding> {
    let value = value.trim().trim_matches(['"', '\'']);
    Encoding::for_label(value.as_bytes())
}
