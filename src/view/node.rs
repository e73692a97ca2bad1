//! A minimal element tree, serialized to HTML after it is built

use std::fmt;

use crate::helpers::html_escape;

/// Elements that never have children or a closing tag
const VOID_ELEMENTS: [&str; 6] = ["br", "hr", "img", "input", "link", "meta"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Text, escaped on output
    Text(String),
    /// Already-rendered HTML, written verbatim
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing an earlier value
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name.to_string(), value)),
        }
        self
    }

    /// Inline style; an empty style adds nothing
    pub fn style(self, style: Style) -> Self {
        if style.is_empty() {
            self
        } else {
            self.attr("style", style.to_string())
        }
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    /// Serialize the tree to an HTML string
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&html_escape(text)),
            Node::Raw(html) => out.push_str(html),
            Node::Element(el) => {
                out.push('<');
                out.push_str(&el.tag);
                for (name, value) in &el.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&html_escape(value));
                    out.push('"');
                }
                out.push('>');

                if VOID_ELEMENTS.contains(&el.tag.as_str()) {
                    return;
                }

                for child in &el.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(&el.tag);
                out.push('>');
            }
        }
    }

    /// All elements with the given tag, in document order
    pub fn find_all<'a>(&'a self, tag: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect(&mut |el: &Element| el.tag == tag, &mut found);
        found
    }

    /// First element whose `id` attribute matches
    pub fn find_by_id<'a>(&'a self, id: &str) -> Option<&'a Element> {
        let mut found = Vec::new();
        self.collect(&mut |el: &Element| el.get_attr("id") == Some(id), &mut found);
        found.into_iter().next()
    }

    fn collect<'a, F>(&'a self, pred: &mut F, found: &mut Vec<&'a Element>)
    where
        F: FnMut(&Element) -> bool,
    {
        if let Node::Element(el) = self {
            if pred(el) {
                found.push(el);
            }
            for child in &el.children {
                child.collect(pred, found);
            }
        }
    }

    /// Concatenated text nodes; raw HTML is not included
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Raw(_) => String::new(),
            Node::Element(el) => el.children.iter().map(Node::text_content).collect(),
        }
    }
}

/// Ordered CSS declarations for a `style` attribute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style(Vec<(String, String)>);

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, property: &str, value: impl Into<String>) -> Self {
        self.0.push((property.to_string(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (property, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}: {};", property, value)?;
        }
        Ok(())
    }
}
