//! Namespace-resolved element tree with path queries.
//!
//! Readers build the whole tree first, then look values up by prefixed
//! paths such as `ram:SpecifiedTradeProduct/ram:Name`. Prefixes in a path
//! are the canonical ones from [`super::ns`]; the prefixes used by the
//! document itself do not matter.

use quick_xml::NsReader;
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};

use super::ns;
use crate::core::InvoiceError;

/// Documents nested deeper than this are rejected.
const MAX_DEPTH: usize = 128;

#[derive(Debug, Default)]
pub(crate) struct Element {
    pub ns: String,
    pub name: String,
    pub attributes: Vec<(String, String)>,
    text: String,
    pub children: Vec<Element>,
}

fn utf8(bytes: &[u8]) -> Result<&str, InvoiceError> {
    std::str::from_utf8(bytes).map_err(|e| InvoiceError::Xml(format!("invalid UTF-8: {e}")))
}

fn resolved_ns(resolved: &ResolveResult<'_>) -> Result<String, InvoiceError> {
    match resolved {
        ResolveResult::Bound(Namespace(uri)) => Ok(utf8(uri)?.to_string()),
        _ => Ok(String::new()),
    }
}

fn open(resolved: &ResolveResult<'_>, e: &quick_xml::events::BytesStart<'_>) -> Result<Element, InvoiceError> {
    let mut element = Element {
        ns: resolved_ns(resolved)?,
        name: utf8(e.local_name().as_ref())?.to_string(),
        ..Default::default()
    };
    for attr in e.attributes() {
        let attr = attr.map_err(|e| InvoiceError::Xml(e.to_string()))?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let key = utf8(attr.key.local_name().as_ref())?.to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| InvoiceError::Xml(e.to_string()))?
            .into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

/// Parse a complete document and return its root element.
pub(crate) fn parse(xml: &str) -> Result<Element, InvoiceError> {
    let mut reader = NsReader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let position = reader.buffer_position();
        let (resolved, event) = match reader.read_resolved_event() {
            Ok(pair) => pair,
            Err(e) => return Err(InvoiceError::Xml(format!("{e} near byte {position}"))),
        };
        match event {
            Event::Start(e) => {
                if stack.len() >= MAX_DEPTH {
                    return Err(InvoiceError::Xml(format!(
                        "elements nested deeper than {MAX_DEPTH} levels"
                    )));
                }
                let element = open(&resolved, &e)?;
                stack.push(element);
            }
            Event::Empty(e) => {
                let element = open(&resolved, &e)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None if root.is_none() => root = Some(element),
                    None => return Err(InvoiceError::Xml("content after root element".into())),
                }
            }
            Event::End(_) => {
                let Some(element) = stack.pop() else {
                    return Err(InvoiceError::Xml(format!("unexpected end tag near byte {position}")));
                };
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None if root.is_none() => root = Some(element),
                    None => return Err(InvoiceError::Xml("content after root element".into())),
                }
            }
            Event::Text(t) => {
                if let Some(current) = stack.last_mut() {
                    let text = t.unescape().map_err(|e| InvoiceError::Xml(e.to_string()))?;
                    current.text.push_str(&text);
                }
            }
            Event::CData(c) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(utf8(&c)?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(InvoiceError::Xml(format!(
            "unexpected end of document inside <{}>",
            open.name
        )));
    }
    root.ok_or_else(|| InvoiceError::Xml("document has no root element".into()))
}

/// Split `pfx:Local` into a namespace URI and a local name.
fn qualify(step: &str) -> Option<(&'static str, &str)> {
    let (prefix, local) = step.split_once(':')?;
    Some((ns::uri_for_prefix(prefix)?, local))
}

impl Element {
    /// Whether this element has the qualified name `step` (`pfx:Local`).
    pub fn is(&self, step: &str) -> bool {
        qualify(step).is_some_and(|(uri, local)| self.ns == uri && self.name == local)
    }

    /// Trimmed text content.
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    /// Value of the unqualified attribute `name`.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Direct children named `step`, in document order.
    pub fn children_named<'a, 's>(&'a self, step: &'s str) -> impl Iterator<Item = &'a Element> + 's
    where
        'a: 's,
    {
        self.children.iter().filter(move |c| c.is(step))
    }

    /// First element matching the `/`-separated path.
    pub fn select(&self, path: &str) -> Option<&Element> {
        let mut current = self;
        for step in path.split('/') {
            current = current.children.iter().find(|c| c.is(step))?;
        }
        Some(current)
    }

    /// Every element matching the path, in document order.
    pub fn select_all(&self, path: &str) -> Vec<&Element> {
        let mut current = vec![self];
        for step in path.split('/') {
            current = current
                .into_iter()
                .flat_map(|e| e.children.iter().filter(move |c| c.is(step)))
                .collect();
        }
        current
    }

    /// Trimmed text of the first element matching the path.
    pub fn text_at(&self, path: &str) -> Option<&str> {
        self.select(path).map(Element::text)
    }

    /// Text of the first match as an owned string.
    pub fn string(&self, path: &str) -> Option<String> {
        self.text_at(path).map(str::to_string)
    }
}
