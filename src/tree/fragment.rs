//! Detached, owned copies of subtrees
//!
//! A [`Fragment`] is what `link` and `replace` actually insert: the source is
//! snapshotted first and then materialized into fresh nodes, so the source is
//! never shared or moved. Fragments can also be built by hand or taken from a
//! different tree.

use super::{Attribute, Node, NodeId, NodeType, Tree};
use crate::error::{Result, TreeError};

/// Owned copy of a node and, for elements, everything below it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    node_type: NodeType,
    value: String,
    attributes: Vec<Attribute>,
    children: Vec<Fragment>,
}

impl Fragment {
    pub fn new(node_type: NodeType, value: impl Into<String>) -> Self {
        Self {
            node_type,
            value: value.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn element(name: impl Into<String>) -> Self {
        Self::new(NodeType::Element, name)
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(NodeType::Text, text)
    }

    pub fn comment(body: impl Into<String>) -> Self {
        Self::new(NodeType::Comment, body)
    }

    /// Builder-style attribute; ignored by non-element fragments when inserted
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(key, value));
        self
    }

    /// Builder-style child; ignored by non-element fragments when inserted
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Total number of nodes in the fragment
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }
}

impl Tree {
    /// Deep copy of `id`: elements bring their attributes and subtree, leaves
    /// only their value
    pub fn snapshot(&self, id: NodeId) -> Result<Fragment> {
        let node = self.get(id)?;
        let mut fragment = Fragment::new(node.node_type(), node.value());
        if let Some(element) = node.as_element() {
            fragment.attributes = element.attributes.clone();
            fragment.children = element
                .children
                .iter()
                .map(|&child| self.snapshot(child))
                .collect::<Result<_>>()?;
        }
        Ok(fragment)
    }

    /// Allocate the nodes of `fragment` as a detached subtree
    pub(crate) fn materialize(&mut self, fragment: &Fragment) -> Result<NodeId> {
        if fragment.node_type == NodeType::Declaration {
            return Err(TreeError::InvalidChildType(NodeType::Declaration).into());
        }

        let mut node = Node::new(fragment.node_type, fragment.value.clone());
        if let Some(element) = node.as_element_mut() {
            element.attributes = fragment.attributes.clone();
        }
        let id = self.alloc(node);

        if fragment.node_type.can_have_children() {
            for (index, child) in fragment.children.iter().enumerate() {
                let child_id = match self.materialize(child) {
                    Ok(child_id) => child_id,
                    Err(err) => {
                        self.release(id);
                        return Err(err);
                    }
                };
                let child_node = self.get_mut(child_id)?;
                child_node.parent = Some(id);
                child_node.index = index;
                self.element_mut(id)?.children.push(child_id);
            }
        }

        Ok(id)
    }
}
