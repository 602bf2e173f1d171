//! Per-page name assignment.

use super::slug::resource_filename;
use crate::asset::ResourceKind;
use reqwest::Url;
use std::collections::{HashMap, HashSet};

/// Hands out asset file names for one page.
///
/// The same URL always receives the same name. A different URL whose name is
/// already taken receives the first free `-2`, `-3`, ... variant, so the
/// result only depends on the order in which URLs are registered.
#[derive(Debug, Default)]
pub struct NameRegistry {
    by_url: HashMap<Url, String>,
    taken: HashSet<String>,
}

impl NameRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the name for `url`, assigning one on first use.
    pub fn assign(&mut self, url: &Url, kind: ResourceKind) -> String {
        if let Some(name) = self.by_url.get(url) {
            return name.clone();
        }

        let base = resource_filename(url, kind, None);
        let mut name = base.clone();
        let mut n = 2;
        while self.taken.contains(&name) {
            name = with_suffix(&base, n);
            n += 1;
        }

        self.taken.insert(name.clone());
        self.by_url.insert(url.clone(), name.clone());
        name
    }

    /// Number of distinct URLs registered so far.
    pub fn len(&self) -> usize {
        self.by_url.len()
    }

    /// Whether no URL has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.by_url.is_empty()
    }
}

/// Inserts `-n` before the extension of `name`.
fn with_suffix(name: &str, n: usize) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}-{n}.{ext}"),
        None => format!("{name}-{n}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_same_url_same_name() {
        let mut registry = NameRegistry::new();
        let a = registry.assign(&url("https://site.com/a.png"), ResourceKind::Image);
        let b = registry.assign(&url("https://site.com/a.png"), ResourceKind::Image);
        assert_eq!(a, "site-com-a.png");
        assert_eq!(a, b);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_collisions_get_numbered() {
        let mut registry = NameRegistry::new();
        let first = registry.assign(&url("https://site.com/a-b.png"), ResourceKind::Image);
        let second = registry.assign(&url("https://site.com/a_b/../a.b.png"), ResourceKind::Image);
        let third = registry.assign(&url("https://site.com/a/b.png"), ResourceKind::Image);
        assert_eq!(first, "site-com-a-b.png");
        assert_eq!(second, "site-com-a-b-2.png");
        assert_eq!(third, "site-com-a-b-3.png");
    }

    #[test]
    fn test_with_suffix() {
        assert_eq!(with_suffix("x.css", 2), "x-2.css");
        assert_eq!(with_suffix("x", 4), "x-4");
    }
}
