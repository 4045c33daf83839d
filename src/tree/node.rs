//! Node variants and handles

use std::fmt;

use super::attribute::Attribute;

/// Handle to a node stored in a [`Tree`](super::Tree).
///
/// The generation is bumped every time a slot is freed, so a handle kept
/// across an `erase` is detected as stale instead of silently pointing at
/// whatever node reuses the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) slot: usize,
    pub(crate) generation: u64,
}

/// The closed set of node variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Declaration,
    Element,
    Comment,
    Text,
    Unknown,
}

impl NodeType {
    /// Only elements own children and attributes
    pub const fn can_have_children(self) -> bool {
        matches!(self, Self::Element)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Declaration => "declaration",
            Self::Element => "element",
            Self::Comment => "comment",
            Self::Text => "text",
            Self::Unknown => "unknown",
        };
        write!(f, "{name}")
    }
}

/// Children and attributes carried by element nodes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementData {
    pub(crate) children: Vec<NodeId>,
    pub(crate) attributes: Vec<Attribute>,
}

impl ElementData {
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }
}

/// Variant-specific payload of a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Declaration,
    Element(ElementData),
    Comment,
    Text,
    Unknown,
}

impl NodeKind {
    pub fn new(node_type: NodeType) -> Self {
        match node_type {
            NodeType::Declaration => Self::Declaration,
            NodeType::Element => Self::Element(ElementData::default()),
            NodeType::Comment => Self::Comment,
            NodeType::Text => Self::Text,
            NodeType::Unknown => Self::Unknown,
        }
    }

    pub fn node_type(&self) -> NodeType {
        match self {
            Self::Declaration => NodeType::Declaration,
            Self::Element(_) => NodeType::Element,
            Self::Comment => NodeType::Comment,
            Self::Text => NodeType::Text,
            Self::Unknown => NodeType::Unknown,
        }
    }
}

/// A node in the tree: the fields every variant shares plus its kind.
///
/// `value` is the tag name for elements, the text for text nodes and the raw
/// body for comments, declarations and unknown markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) value: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) index: usize,
    pub(crate) kind: NodeKind,
}

impl Node {
    pub(crate) fn new(node_type: NodeType, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            parent: None,
            index: 0,
            kind: NodeKind::new(node_type),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Position among the parent's children
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn can_have_children(&self) -> bool {
        self.node_type().can_have_children()
    }

    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }

    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    pub(crate) fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    /// Child handles; always empty for non-element nodes
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Element(data) => &data.children,
            _ => &[],
        }
    }

    /// Attributes; always empty for non-element nodes
    pub fn attributes(&self) -> &[Attribute] {
        match &self.kind {
            NodeKind::Element(data) => &data.attributes,
            _ => &[],
        }
    }
}
