//! Visible text of an element.
//!
//! Findings quote the text a reader would see for the offending element. Two
//! renderings are supported, selected with [`TextMode`].

use crate::{DomTree, NodeId, NodeType};

/// [§ 3.2.5.2.1 Flow content](https://html.spec.whatwg.org/multipage/dom.html#flow-content)
///
/// Elements that start a new block in the default rendering. Their text is
/// padded with spaces when flattened into an ancestor's text, and entering one
/// ends a `<mark>` highlight.
const BLOCK_ELEMENTS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "canvas",
    "dd",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "li",
    "main",
    "nav",
    "noscript",
    "ol",
    "output",
    "p",
    "pre",
    "section",
    "table",
    "tfoot",
    "ul",
    "video",
];

/// Whether `tag` is rendered as a block-level element.
#[must_use]
pub fn is_block_element(tag: &str) -> bool {
    BLOCK_ELEMENTS.contains(&tag)
}

/// Elements whose content is never rendered as text.
fn is_raw_text_element(tag: &str) -> bool {
    matches!(tag, "style" | "script")
}

/// How descendant content is represented in an element's visible text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextMode {
    /// All descendant text, whitespace-collapsed. Block-level descendants are
    /// surrounded by single spaces; the result is trimmed.
    #[default]
    Flattened,
    /// Only the element's own text; each child element is replaced by a
    /// `<tag>...</tag>` placeholder.
    Placeholder,
}

/// Compute the visible text of element `id`.
#[must_use]
pub fn visible_text(tree: &DomTree, id: NodeId, mode: TextMode) -> String {
    match mode {
        TextMode::Flattened => {
            let mut out = String::new();
            for &child in tree.children(id) {
                push_flattened(tree, child, &mut out);
            }
            out.trim_matches(|c: char| c.is_ascii_whitespace())
                .to_string()
        }
        TextMode::Placeholder => placeholder_text(tree, id),
    }
}

fn push_flattened(tree: &DomTree, id: NodeId, out: &mut String) {
    let Some(node) = tree.get(id) else { return };
    match &node.node_type {
        NodeType::Text(text) => push_collapsed(text, out),
        NodeType::Element(element) => {
            let tag = element.tag_name.as_str();
            if tag == "br" {
                out.push(' ');
                return;
            }
            if is_raw_text_element(tag) {
                return;
            }
            let block = is_block_element(tag);
            if block {
                out.push(' ');
            }
            for &child in tree.children(id) {
                push_flattened(tree, child, out);
            }
            if block {
                out.push(' ');
            }
        }
        NodeType::Comment(_) | NodeType::Document => {}
    }
}

/// [§ 4.1.1 Phase I: Collapsing and Transformation](https://www.w3.org/TR/css-text-3/#white-space-phase-1)
///
/// "Any sequence of collapsible spaces and tabs immediately preceding or
/// following a segment break is removed" / "Any collapsible space immediately
/// following another collapsible space ... is collapsed".
///
/// Collapsing is scoped to a single text node.
fn push_collapsed(text: &str, out: &mut String) {
    let mut in_space = false;
    for ch in text.chars() {
        if ch.is_ascii_whitespace() {
            if !in_space {
                out.push(' ');
                in_space = true;
            }
        } else {
            out.push(ch);
            in_space = false;
        }
    }
}

fn placeholder_text(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    for &child in tree.children(id) {
        let Some(node) = tree.get(child) else { continue };
        match &node.node_type {
            NodeType::Text(text) => out.push_str(text.trim()),
            NodeType::Element(element) if element.tag_name == "br" => out.push(' '),
            NodeType::Element(element) => {
                let tag = &element.tag_name;
                out.push_str(&format!("<{tag}>...</{tag}>"));
            }
            NodeType::Comment(_) | NodeType::Document => {}
        }
    }
    out.replace(['\r', '\n'], "")
}
