//! Mutable HTML tree.

use crate::asset::{AssetReference, ResourceKind};
use crate::error::{Error, Result};
use crate::http::charset::charset_from_content_type;
use crate::scope::is_local;
use encoding_rs::{Encoding, UTF_8};
use html5ever::serialize::{serialize, SerializeOpts};
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::parse_document;
use markup5ever::Attribute;
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};
use reqwest::Url;
use std::cell::RefCell;
use tracing::{debug, warn};

/// A parsed page.
///
/// Candidate elements (`img`, `link`, `script`) are numbered in document
/// order; the numbering only depends on the markup, so two documents parsed
/// from the same text agree on it.
pub struct Document {
    dom: RcDom,
}

impl Document {
    /// Parses `markup` into a tree.
    pub fn parse(markup: &str) -> Result<Self> {
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut markup.as_bytes())
            .map_err(|e| Error::Parse(e.to_string()))?;

        let recovered = dom.errors.len();
        if recovered > 0 {
            debug!("Recovered from {} markup errors", recovered);
        }

        Ok(Self { dom })
    }

    /// Lists the resource references of the page, resolved against `page_url`.
    ///
    /// Elements without the relevant attribute, or with an empty value, are
    /// skipped, as are values that do not resolve to a URL.
    pub fn references(&self, page_url: &Url) -> Vec<AssetReference> {
        self.candidates()
            .into_iter()
            .enumerate()
            .filter_map(|(element, (handle, kind))| {
                let value = attribute(&handle, kind.attribute())?;
                let value = value.trim();
                if value.is_empty() {
                    return None;
                }

                let mut url = match page_url.join(value) {
                    Ok(url) => url,
                    Err(e) => {
                        warn!("Ignoring unresolvable {} {:?}: {}", kind, value, e);
                        return None;
                    }
                };
                url.set_fragment(None);

                let is_local = is_local(&url, page_url);
                Some(AssetReference {
                    url,
                    element,
                    kind,
                    is_local,
                })
            })
            .collect()
    }

    /// Sets the URL attribute of candidate element `element` to `value`.
    ///
    /// Returns `false` if there is no such element or it lacks the attribute.
    pub fn set_reference(&self, element: usize, value: &str) -> bool {
        self.set_references([(element, value)]) == 1
    }

    /// Sets the URL attribute of every `(element, value)` pair, walking the
    /// tree once. Returns how many attributes were set.
    pub fn set_references<'a>(&self, updates: impl IntoIterator<Item = (usize, &'a str)>) -> usize {
        let candidates = self.candidates();
        updates
            .into_iter()
            .filter(|&(element, value)| match candidates.get(element) {
                Some((handle, kind)) => match &handle.data {
                    NodeData::Element { attrs, .. } => {
                        set_attribute(attrs, kind.attribute(), value)
                    }
                    _ => false,
                },
                None => false,
            })
            .count()
    }

    /// Rewrites `<meta>` charset declarations naming another encoding to
    /// UTF-8, the encoding [`serialize`](Self::serialize) produces.
    ///
    /// Returns how many declarations were changed.
    pub fn declare_utf8(&self) -> usize {
        let mut metas = Vec::new();
        elements(&self.dom.document, "meta", &mut metas);

        let mut changed = 0;
        for meta in &metas {
            let NodeData::Element { attrs, .. } = &meta.data else {
                continue;
            };

            if let Some(value) = attribute(meta, "charset") {
                if !is_utf8_label(&value) && set_attribute(attrs, "charset", "utf-8") {
                    changed += 1;
                }
                continue;
            }

            let content_type = attribute(meta, "http-equiv")
                .filter(|v| v.trim().eq_ignore_ascii_case("content-type"))
                .and_then(|_| attribute(meta, "content"));
            if let Some(content) = content_type {
                let declared = charset_from_content_type(&content);
                if declared.is_some_and(|e| e != UTF_8)
                    && set_attribute(attrs, "content", "text/html; charset=utf-8")
                {
                    changed += 1;
                }
            }
        }

        if changed > 0 {
            debug!("Declared UTF-8 in {} <meta> element(s)", changed);
        }
        changed
    }

    /// Serializes the tree back to HTML.
    ///
    /// The output is html5ever's serialization of the tree: normalized
    /// (implied `head`/`body` added, attributes double-quoted) but not
    /// re-indented, so text and whitespace of the page are kept as parsed.
    pub fn serialize(&self) -> Result<String> {
        let document: SerializableHandle = self.dom.document.clone().into();
        let mut out = Vec::new();
        serialize(&mut out, &document, SerializeOpts::default())
            .map_err(|e| Error::Parse(e.to_string()))?;
        String::from_utf8(out).map_err(|e| Error::Parse(e.to_string()))
    }

    /// Candidate elements in document order.
    fn candidates(&self) -> Vec<(Handle, ResourceKind)> {
        let mut found = Vec::new();
        collect(&self.dom.document, &mut found);
        found
    }
}

fn collect(handle: &Handle, found: &mut Vec<(Handle, ResourceKind)>) {
    if let NodeData::Element { name, .. } = &handle.data {
        if let Some(kind) = ResourceKind::from_tag(name.local.as_ref()) {
            found.push((handle.clone(), kind));
        }
    }

    for child in handle.children.borrow().iter() {
        collect(child, found);
    }
}

fn elements(handle: &Handle, tag: &str, found: &mut Vec<Handle>) {
    if let NodeData::Element { name, .. } = &handle.data {
        if name.local.as_ref() == tag {
            found.push(handle.clone());
        }
    }

    for child in handle.children.borrow().iter() {
        elements(child, tag, found);
    }
}

fn is_utf8_label(value: &str) -> bool {
    Encoding::for_label(value.trim().as_bytes()).map_or(true, |e| e == UTF_8)
}

fn attribute(handle: &Handle, name: &str) -> Option<String> {
    match &handle.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| attr.name.local.as_ref() == name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

fn set_attribute(attrs: &RefCell<Vec<Attribute>>, name: &str, value: &str) -> bool {
    match attrs
        .borrow_mut()
        .iter_mut()
        .find(|attr| attr.name.local.as_ref() == name)
    {
        Some(attr) => {
            attr.value = StrTendril::from_slice(value);
            true
        }
        None => false,
    }
}
