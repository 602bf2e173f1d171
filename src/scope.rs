//! Download scope.
//!
//! Only resources served by the page's own host are localized. Everything
//! else keeps its original URL in the rewritten markup.

use reqwest::Url;

/// Schemes a resource can be fetched over.
const FETCHABLE_SCHEMES: &[&str] = &["http", "https"];

/// Returns `true` if `resource` belongs to the same host as `page`.
///
/// A resource without a host is local. Ports and the http/https scheme are
/// ignored, but resources that cannot be fetched over HTTP at all (`data:`,
/// `mailto:`, `javascript:` ...) never are.
///
/// ```rust
/// use page_loader::scope::is_local;
/// use reqwest::Url;
///
/// let page = Url::parse("https://ru.hexlet.io/courses").unwrap();
/// let css = Url::parse("http://ru.hexlet.io:8080/assets/application.css").unwrap();
/// let cdn = Url::parse("https://cdn.hexlet.io/app.js").unwrap();
/// assert!(is_local(&css, &page));
/// assert!(!is_local(&cdn, &page));
/// ```
pub fn is_local(resource: &Url, page: &Url) -> bool {
    if !FETCHABLE_SCHEMES.contains(&resource.scheme()) {
        return false;
    }

    match resource.host_str() {
        None | Some("") => true,
        Some(host) => page.host_str() == Some(host),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_same_host_is_local() {
        let page = url("https://site.com/blog/about");
        assert!(is_local(&url("https://site.com/a.png"), &page));
        assert!(is_local(&url("http://site.com:81/a.png"), &page));
        assert!(is_local(&page.join("/assets/a.css").unwrap(), &page));
        assert!(is_local(&page.join("//site.com/a.js").unwrap(), &page));
    }

    #[test]
    fn test_other_hosts_are_not_local() {
        let page = url("https://site.com/blog/about");
        assert!(!is_local(&url("https://cdn.site.com/a.png"), &page));
        assert!(!is_local(&url("https://othersite.com/a.png"), &page));
        assert!(!is_local(&page.join("//cdn.example.com/a.js").unwrap(), &page));
    }

    #[test]
    fn test_host_comparison_ignores_case() {
        let page = url("https://Site.COM/");
        assert!(is_local(&url("https://site.com/a.png"), &page));
    }

    #[test]
    fn test_unfetchable_schemes_are_not_local() {
        let page = url("https://site.com/");
        assert!(!is_local(&url("data:image/png;base64,AAAA"), &page));
        assert!(!is_local(&url("mailto:me@site.com"), &page));
        assert!(!is_local(&url("javascript:void(0)"), &page));
    }
}
