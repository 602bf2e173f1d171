//! Resource references discovered in page markup.

use reqwest::Url;
use std::fmt;

/// Kind of element a resource is referenced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// `<img src>`
    Image,
    /// `<link href>`
    Link,
    /// `<script src>`
    Script,
}

impl ResourceKind {
    /// Every kind the rewriter looks for, in no particular order.
    pub const ALL: [ResourceKind; 3] = [ResourceKind::Image, ResourceKind::Link, ResourceKind::Script];

    /// Looks up the kind for an element's local name.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "img" => Some(ResourceKind::Image),
            "link" => Some(ResourceKind::Link),
            "script" => Some(ResourceKind::Script),
            _ => None,
        }
    }

    /// Element local name.
    pub fn tag(self) -> &'static str {
        match self {
            ResourceKind::Image => "img",
            ResourceKind::Link => "link",
            ResourceKind::Script => "script",
        }
    }

    /// Attribute holding the resource URL.
    pub fn attribute(self) -> &'static str {
        match self {
            ResourceKind::Link => "href",
            ResourceKind::Image | ResourceKind::Script => "src",
        }
    }

    /// Extension used when the URL path carries no known one.
    pub fn default_extension(self) -> &'static str {
        match self {
            ResourceKind::Image => "png",
            ResourceKind::Link => "html",
            ResourceKind::Script => "js",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} {}>", self.tag(), self.attribute())
    }
}

/// A resource reference found while scanning a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReference {
    /// Absolute URL, resolved against the page URL, without fragment.
    pub url: Url,
    /// Position of the referencing element among all candidate elements, in
    /// document order.
    pub element: usize,
    /// Kind of the referencing element.
    pub kind: ResourceKind,
    /// Whether the resource is in download scope.
    pub is_local: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_tag() {
        for kind in ResourceKind::ALL {
            assert_eq!(ResourceKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(ResourceKind::from_tag("a"), None);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ResourceKind::Link.to_string(), "<link href>");
        assert_eq!(ResourceKind::Image.to_string(), "<img src>");
    }
}
