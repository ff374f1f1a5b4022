//! A minimal element tree that scene components build and the bundler
//! serializes to HTML. Layout and painting are left to the browser.

use std::fmt::Write as _;

/// A list of CSS declarations shared between components.
pub type StyleSet = &'static [(&'static str, &'static str)];

/// A child of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Text(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Text(s)
    }
}

/// An HTML element with inline styles.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub styles: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            styles: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn span() -> Self {
        Self::new("span")
    }

    pub fn button() -> Self {
        Self::new("button")
    }

    /// Full-frame absolutely positioned container.
    pub fn absolute_fill() -> Self {
        Self::div().styles(&[
            ("position", "absolute"),
            ("top", "0"),
            ("left", "0"),
            ("right", "0"),
            ("bottom", "0"),
            ("display", "flex"),
            ("flex-direction", "column"),
        ])
    }

    /// Set a declaration. A later value for the same property replaces the earlier one.
    pub fn style(mut self, prop: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.styles.iter_mut().find(|(p, _)| *p == prop) {
            Some(slot) => slot.1 = value,
            None => self.styles.push((prop, value)),
        }
        self
    }

    /// Set a length in CSS pixels.
    pub fn px(self, prop: &'static str, value: f64) -> Self {
        self.style(prop, px(value))
    }

    /// Set a unitless number (opacity, line-height, flex).
    pub fn num(self, prop: &'static str, value: f64) -> Self {
        self.style(prop, fmt_num(value))
    }

    /// Apply a shared style set.
    pub fn styles(mut self, set: &[(&'static str, &'static str)]) -> Self {
        for &(p, v) in set {
            self = self.style(p, v);
        }
        self
    }

    /// Apply computed declarations.
    pub fn decls<I>(mut self, decls: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, String)>,
    {
        for (p, v) in decls {
            self = self.style(p, v);
        }
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    /// Append a text node.
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    /// Look up the value of a declaration.
    pub fn style_value(&self, prop: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|(p, _)| *p == prop)
            .map(|(_, v)| v.as_str())
    }

    /// Concatenated text of this element and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Serialize to HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_element(self, &mut out);
        out
    }
}

fn collect_text(el: &Element, out: &mut String) {
    for child in &el.children {
        match child {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) => collect_text(e, out),
        }
    }
}

fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(el.tag);
    if !el.styles.is_empty() {
        out.push_str(" style=\"");
        for (i, (prop, value)) in el.styles.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{}: {};", prop, escape(value));
        }
        out.push('"');
    }
    out.push('>');
    for child in &el.children {
        match child {
            Node::Text(t) => out.push_str(&escape(t)),
            Node::Element(e) => write_element(e, out),
        }
    }
    let _ = write!(out, "</{}>", el.tag);
}

/// Escape text and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Format a number for CSS without trailing zeros.
pub fn fmt_num(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        return format!("{}", v as i64);
    }
    let s = format!("{:.4}", v);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

pub fn px(v: f64) -> String {
    format!("{}px", fmt_num(v))
}

pub fn pct(v: f64) -> String {
    format!("{}%", fmt_num(v))
}

/// Render a full HTML document sized to `width` x `height`.
pub fn document(body: &Element, width: u32, height: u32, stylesheet: Option<&str>) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    if let Some(href) = stylesheet {
        let _ = writeln!(out, "<link rel=\"stylesheet\" href=\"{}\">", escape(href));
    }
    let _ = writeln!(
        out,
        "<style>html, body {{ margin: 0; width: {w}px; height: {h}px; overflow: hidden; }} #root {{ position: relative; width: {w}px; height: {h}px; overflow: hidden; }}</style>",
        w = width,
        h = height
    );
    out.push_str("</head>\n<body>\n<div id=\"root\">");
    out.push_str(&body.to_html());
    out.push_str("</div>\n</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_replaces_existing_declaration() {
        let el = Element::div().px("width", 10.0).px("width", 20.0);
        assert_eq!(el.styles.len(), 1);
        assert_eq!(el.style_value("width"), Some("20px"));
    }

    #[test]
    fn test_to_html_escapes_text_and_styles() {
        let el = Element::span()
            .style("font-family", "'JetBrains Mono', monospace")
            .text("a < b & \"c\"");
        assert_eq!(
            el.to_html(),
            "<span style=\"font-family: &#39;JetBrains Mono&#39;, monospace;\">a &lt; b &amp; &quot;c&quot;</span>"
        );
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(52.0), "52");
        assert_eq!(fmt_num(0.5), "0.5");
        assert_eq!(fmt_num(0.123456), "0.1235");
        assert_eq!(fmt_num(-3.0), "-3");
        assert_eq!(pct(65.0), "65%");
    }

    #[test]
    fn test_text_content_collects_descendants() {
        let el = Element::div()
            .child(Element::span().text("Live"))
            .text(" ")
            .child(Element::div().child(Element::span().text("Sessions")));
        assert_eq!(el.text_content(), "Live Sessions");
    }

    #[test]
    fn test_document_wraps_body() {
        let html = document(&Element::div().text("hi"), 390, 844, Some("../style.css"));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<link rel=\"stylesheet\" href=\"../style.css\">"));
        assert!(html.contains("width: 390px; height: 844px;"));
        assert!(html.contains("<div id=\"root\"><div>hi</div></div>"));
    }
}
