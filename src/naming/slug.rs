//! URL to filename encoding.
//!
//! Every name is built from the host and path of a URL (plus the query for
//! page names). Runs of separator characters collapse into a single `-`,
//! word characters (unicode letters, unicode digits and `_`) are kept as is.
//!
//! ```rust
//! use page_loader::naming::{page_filename, slugify};
//! use reqwest::Url;
//!
//! let url = Url::parse("https://ru.hexlet.io/courses").unwrap();
//! assert_eq!(slugify(&url), "ru-hexlet-io-courses");
//! assert_eq!(page_filename(&url), "ru-hexlet-io-courses.html");
//! ```

use crate::asset::ResourceKind;
use percent_encoding::percent_decode_str;
use reqwest::Url;

/// Extension given to saved pages.
pub const PAGE_EXTENSION: &str = "html";

/// Extensions kept from the original path of an asset.
const KNOWN_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "svg", "webp", "avif", "ico", "bmp", "css", "js", "mjs", "json",
    "xml", "txt", "html", "htm", "woff", "woff2", "ttf", "otf", "eot", "map", "webmanifest",
];

/// Slug of the host and path of `url`.
pub fn slugify(url: &Url) -> String {
    slug(&location(url, &decode(url.path())))
}

/// Slug naming a saved page: host, path and query.
///
/// ```rust
/// use page_loader::naming::{page_slug, slugify};
/// use reqwest::Url;
///
/// let url = Url::parse("https://site.com/search?q=rust").unwrap();
/// assert_eq!(slugify(&url), "site-com-search");
/// assert_eq!(page_slug(&url), "site-com-search-q-rust");
/// ```
pub fn page_slug(url: &Url) -> String {
    let mut raw = location(url, &decode(url.path()));
    if let Some(query) = url.query().filter(|q| !q.is_empty()) {
        raw.push('-');
        raw.push_str(&decode(query));
    }
    slug(&raw)
}

/// Name of the file a page is saved to: `<slug>.html`.
pub fn page_filename(url: &Url) -> String {
    format!("{}.{}", page_slug(url), PAGE_EXTENSION)
}

/// Name of the directory holding the assets of a page: `<slug>_files`.
pub fn assets_dirname(url: &Url) -> String {
    format!("{}_files", page_slug(url))
}

/// Name of the file an asset is saved to.
///
/// The query string is not part of asset names. A `forced_extension` wins
/// over everything else; otherwise a known extension of the original path is
/// kept (lowercased) and anything else falls back to the default of `kind`.
///
/// ```rust
/// use page_loader::asset::ResourceKind;
/// use page_loader::naming::resource_filename;
/// use reqwest::Url;
///
/// let url = Url::parse("https://ru.hexlet.io/assets/professions/python.png").unwrap();
/// assert_eq!(
///     resource_filename(&url, ResourceKind::Image, None),
///     "ru-hexlet-io-assets-professions-python.png"
/// );
/// assert_eq!(
///     resource_filename(&url, ResourceKind::Image, Some("jpg")),
///     "ru-hexlet-io-assets-professions-python-png.jpg"
/// );
/// ```
pub fn resource_filename(url: &Url, kind: ResourceKind, forced_extension: Option<&str>) -> String {
    let path = decode(url.path());
    if let Some(ext) = forced_extension {
        return format!("{}.{}", slug(&location(url, &path)), ext.trim_start_matches('.'));
    }

    match split_extension(&path) {
        Some((stem, ext)) => format!("{}.{}", slug(&location(url, stem)), ext),
        None => format!("{}.{}", slug(&location(url, &path)), kind.default_extension()),
    }
}

/// Replaces every run of non-word characters with a single `-` and trims
/// leading and trailing dashes.
pub fn slug(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_dash = false;

    for c in raw.chars() {
        if c.is_alphanumeric() || c == '_' {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else {
            pending_dash = true;
        }
    }

    out
}

/// Splits a known extension off the last path segment.
fn split_extension(path: &str) -> Option<(&str, String)> {
    let segment_start = path.rfind('/').map_or(0, |i| i + 1);
    let dot = path[segment_start..].rfind('.')? + segment_start;
    if dot == segment_start {
        return None;
    }

    let ext = path[dot + 1..].to_ascii_lowercase();
    KNOWN_EXTENSIONS
        .contains(&ext.as_str())
        .then(|| (&path[..dot], ext))
}

/// Host (with an explicit port, if any) followed by `path`.
fn location(url: &Url, path: &str) -> String {
    let mut raw = String::from(url.host_str().unwrap_or_default());
    if let Some(port) = url.port() {
        raw.push(':');
        raw.push_str(&port.to_string());
    }
    raw.push_str(path);
    raw
}

fn decode(input: &str) -> String {
    percent_decode_str(input).decode_utf8_lossy().into_owned()
}
