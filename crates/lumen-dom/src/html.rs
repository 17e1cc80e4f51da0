//! HTML markup to [`DomTree`].
//!
//! Tokenizing and tree construction are delegated to `scraper` (html5ever
//! underneath), which follows
//! [WHATWG § 13.2 Parsing HTML documents](https://html.spec.whatwg.org/multipage/parsing.html).
//! This module only copies the resulting tree into Lumen's arena and records
//! each element's serialized markup for use in findings.

use scraper::{ElementRef, Html, Node};

use crate::{DomTree, ElementData, NodeId, NodeType};

/// Parse a complete HTML document or a body fragment.
///
/// Missing `<html>`, `<head>` and `<body>` elements are synthesized by the
/// parser, so the result always has a body.
#[must_use]
pub fn parse_html(markup: &str) -> DomTree {
    let document = Html::parse_document(markup);
    let mut tree = DomTree::new();
    append_element(&mut tree, NodeId::ROOT, document.root_element());
    tree
}

fn append_element(tree: &mut DomTree, parent: NodeId, element: ElementRef<'_>) {
    let value = element.value();
    let data = ElementData {
        tag_name: value.name().to_ascii_lowercase(),
        attrs: value
            .attrs()
            .map(|(name, val)| (name.to_ascii_lowercase(), val.to_string()))
            .collect(),
        source: element.html(),
    };
    let id = tree.append_element(parent, data);

    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            append_element(tree, id, child_element);
            continue;
        }
        match child.value() {
            Node::Text(text) => {
                let _ = tree.append_text(id, &text.text);
            }
            Node::Comment(comment) => {
                let node = tree.alloc(NodeType::Comment(comment.comment.to_string()));
                tree.append_child(id, node);
            }
            // Doctype and processing instructions carry no rendered content.
            _ => {}
        }
    }
}
