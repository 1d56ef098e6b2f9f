//! Owned SVG element tree.
//!
//! Read from a `roxmltree` document, rewritten in place by the sanitizer and
//! written back out through the `svg` crate's element model. Comments and
//! processing instructions are not carried over.

use svg::node::element::Element;
use svg::node::Text;
use svg::Node as _;

use crate::error::{SanitizeError, SanitizeResult};

#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

impl XmlNode {
    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut XmlElement> {
        match self {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        }
    }

    /// True for an element with the given (qualified) name.
    pub fn is(&self, name: &str) -> bool {
        self.as_element().is_some_and(|e| e.name == name)
    }
}

/// An element with attributes in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Replaces the value in place, or appends the attribute.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attributes.retain(|(key, _)| key != name);
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    /// Every element below this one, depth first, in document order.
    pub fn descendants(&self) -> Vec<&XmlElement> {
        let mut out = Vec::new();
        for child in self.child_elements() {
            out.push(child);
            out.extend(child.descendants());
        }
        out
    }

    /// Visits this element and every element below it.
    pub fn walk_mut(&mut self, visit: &mut impl FnMut(&mut XmlElement)) {
        visit(self);
        for child in self.children.iter_mut().filter_map(XmlNode::as_element_mut) {
            child.walk_mut(visit);
        }
    }

    /// Converts to the `svg` crate's element model. Values are assigned
    /// unescaped; the element's `Display` escapes markup characters.
    pub fn to_svg_element(&self) -> Element {
        let mut element = Element::new(self.name.as_str());
        for (name, value) in &self.attributes {
            element.assign(name.as_str(), value.as_str());
        }
        for child in &self.children {
            match child {
                XmlNode::Element(e) => element.append(e.to_svg_element()),
                XmlNode::Text(text) => element.append(Text::new(text.as_str())),
            }
        }
        element
    }
}

/// Qualified name for a node or attribute, using the prefix bound in scope.
fn qualified_name(node: roxmltree::Node<'_, '_>, namespace: Option<&str>, local: &str) -> String {
    match namespace.and_then(|uri| node.lookup_prefix(uri)) {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}:{local}"),
        _ => local.to_string(),
    }
}

fn convert(node: roxmltree::Node<'_, '_>) -> XmlElement {
    let tag = node.tag_name();
    let mut element = XmlElement::new(qualified_name(node, tag.namespace(), tag.name()));
    for attribute in node.attributes() {
        element.attributes.push((
            qualified_name(node, attribute.namespace(), attribute.name()),
            attribute.value().to_string(),
        ));
    }
    for child in node.children() {
        if child.is_element() {
            element.children.push(XmlNode::Element(convert(child)));
        } else if child.is_text() {
            if let Some(text) = child.text().filter(|t| !t.trim().is_empty()) {
                element.children.push(XmlNode::Text(text.to_string()));
            }
        }
    }
    element
}

/// Builds the owned tree. Namespace declarations from anywhere in the
/// document are hoisted onto the root.
pub fn from_document(doc: &roxmltree::Document<'_>) -> SanitizeResult<XmlElement> {
    let root = doc.root_element();
    if root.tag_name().name() != "svg" {
        return Err(SanitizeError::NotSvg(root.tag_name().name().to_string()));
    }

    let mut declarations: Vec<(String, String)> = Vec::new();
    for node in doc.descendants().filter(|n| n.is_element()) {
        for ns in node.namespaces() {
            let key = match ns.name() {
                Some("xml") => continue,
                Some(prefix) => format!("xmlns:{prefix}"),
                None => "xmlns".to_string(),
            };
            if !declarations.iter().any(|(existing, _)| *existing == key) {
                declarations.push((key, ns.uri().to_string()));
            }
        }
    }

    let mut element = convert(root);
    declarations.extend(element.attributes.drain(..));
    element.attributes = declarations;
    Ok(element)
}

/// Parses SVG text, allowing a DTD.
pub fn parse(text: &str) -> SanitizeResult<roxmltree::Document<'_>> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    Ok(roxmltree::Document::parse_with_options(text, options)?)
}
