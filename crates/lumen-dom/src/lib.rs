//! Element tree for the Lumen contrast checker.
//!
//! This crate provides an arena-based tree modelled on the
//! [DOM Living Standard](https://dom.spec.whatwg.org/), reduced to what a
//! static style walk needs: tag names, attributes, the element's source
//! markup, text and comments.
//!
//! Nodes live in one `Vec` and refer to each other by [`NodeId`].
//!
//! Parsing markup is the job of an external HTML parser. [`html::parse_html`]
//! adapts the `scraper` crate's tree into a [`DomTree`].

use std::collections::HashMap;

/// Converting parsed HTML into a [`DomTree`].
pub mod html;
/// Visible text of an element, as reported in findings.
pub mod text;

pub use html::parse_html;
pub use text::{TextMode, is_block_element, visible_text};

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// Index of a node in a [`DomTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The document node, allocated first in every tree.
    pub const ROOT: Self = Self(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
#[derive(Debug, Clone)]
pub struct Node {
    /// What kind of node this is, with its payload
    pub node_type: NodeType,
    /// [Parent](https://dom.spec.whatwg.org/#concept-tree-parent), `None` for
    /// the document and for detached nodes
    pub parent: Option<NodeId>,
    /// [Children](https://dom.spec.whatwg.org/#concept-tree-child) in order
    pub children: Vec<NodeId>,
}

impl Node {
    const fn detached(node_type: NodeType) -> Self {
        Self {
            node_type,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// The node kinds a contrast walk can meet.
#[derive(Debug, Clone)]
pub enum NodeType {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    Document,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    Text(String),
    /// [§ 4.7 Interface Comment](https://dom.spec.whatwg.org/#interface-comment)
    Comment(String),
}

/// An element's tag, attributes and source markup.
///
/// NOTE: Namespaces are dropped; every element is treated as HTML.
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    /// Lower-case local name, e.g. `"p"`
    pub tag_name: String,
    /// Attributes by lower-case name
    pub attrs: AttributesMap,
    /// Outer markup of the element, quoted in findings
    pub source: String,
}

impl ElementData {
    /// An element named `tag_name` with no attributes and empty source.
    #[must_use]
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// Set the `style` attribute.
    #[must_use]
    pub fn with_style(mut self, style: &str) -> Self {
        let _ = self.attrs.insert("style".to_string(), style.to_string());
        self
    }

    /// Set the source markup.
    #[must_use]
    pub fn with_source(mut self, source: &str) -> Self {
        source.clone_into(&mut self.source);
        self
    }

    /// [§ 3.2.6 The style attribute](https://html.spec.whatwg.org/multipage/dom.html#the-style-attribute)
    ///
    /// The raw declaration block of the `style` attribute.
    #[must_use]
    pub fn style(&self) -> Option<&str> {
        self.attrs.get("style").map(String::as_str)
    }
}

/// A document stored as a flat list of nodes linked by [`NodeId`].
///
/// Slot 0 always holds the document node. Nodes are never removed, so ids
/// stay valid for the life of the tree.
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// A tree holding only the document node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::detached(NodeType::Document)],
        }
    }

    /// The document node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// The node at `id`, if any.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Number of nodes, the document included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false` for trees built with [`DomTree::new`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a detached node and return its id.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        self.nodes.push(Node::detached(node_type));
        NodeId(self.nodes.len() - 1)
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// Attach `child` after the existing children of `parent`. Ids that are
    /// not in the tree are ignored.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent.0 >= self.nodes.len() || child.0 >= self.nodes.len() {
            return;
        }
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Add an element as the last child of `parent`.
    pub fn append_element(&mut self, parent: NodeId, data: ElementData) -> NodeId {
        let id = self.alloc(NodeType::Element(data));
        self.append_child(parent, id);
        id
    }

    /// Add a text node as the last child of `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.alloc(NodeType::Text(text.to_string()));
        self.append_child(parent, id);
        id
    }

    /// Parent of `id`.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent
    }

    /// Children of `id`; empty for unknown ids.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |node| node.children.as_slice())
    }

    /// Children of `id` that are elements.
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(move |&child| self.as_element(child).is_some())
    }

    /// Element data of `id`, if it is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.get(id)?.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        }
    }

    /// Character data of `id`, if it is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        match &self.get(id)?.node_type {
            NodeType::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// [§ 3.1.1 The document element](https://html.spec.whatwg.org/multipage/dom.html#the-html-element-2)
    ///
    /// The first element child of the document.
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.element_children(NodeId::ROOT).next()
    }

    /// [§ 3.1.3 The body element](https://html.spec.whatwg.org/multipage/dom.html#the-body-element-2)
    ///
    /// "the first of the html element's children that is either a body
    /// element or a frameset element"
    ///
    /// A `<body>` placed directly under the document is accepted too.
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        let is_body = |id: NodeId| {
            self.as_element(id)
                .is_some_and(|e| matches!(e.tag_name.as_str(), "body" | "frameset"))
        };
        let html = self.document_element()?;
        if is_body(html) {
            Some(html)
        } else {
            self.element_children(html).find(|&id| is_body(id))
        }
    }

    /// First element named `tag` in document order.
    #[must_use]
    pub fn find_first(&self, tag: &str) -> Option<NodeId> {
        let mut pending = vec![NodeId::ROOT];
        while let Some(id) = pending.pop() {
            if self.as_element(id).is_some_and(|e| e.tag_name == tag) {
                return Some(id);
            }
            pending.extend(self.children(id).iter().rev());
        }
        None
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}
