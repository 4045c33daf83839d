//! Arena-backed node tree
//!
//! All nodes of a document live in a single [`Tree`]. Elements own their
//! children through the handle lists stored in the arena; the `parent` field of
//! a node is only a handle back up and never keeps anything alive. Freed slots
//! are recycled with a bumped generation so stale handles are rejected.

pub mod attribute;
pub mod fragment;
mod mutation;
pub mod node;

pub use attribute::Attribute;
pub use fragment::Fragment;
pub use node::{ElementData, Node, NodeId, NodeKind, NodeType};

use crate::error::{Result, TreeError};

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u64,
    node: Option<Node>,
}

/// Storage for every node of a document
#[derive(Debug, Clone, Default)]
pub struct Tree {
    slots: Vec<Slot>,
    free: Vec<usize>,
    live: usize,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached node with no parent
    pub fn create(&mut self, node_type: NodeType, value: impl Into<String>) -> NodeId {
        self.alloc(Node::new(node_type, value))
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Whether `id` still refers to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_ok()
    }

    pub fn get(&self, id: NodeId) -> Result<&Node> {
        self.slots
            .get(id.slot)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
            .ok_or_else(|| TreeError::StaleHandle.into())
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.slots
            .get_mut(id.slot)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
            .ok_or_else(|| TreeError::StaleHandle.into())
    }

    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        self.live += 1;
        if let Some(slot_index) = self.free.pop() {
            if let Some(slot) = self.slots.get_mut(slot_index) {
                slot.node = Some(node);
                return NodeId {
                    slot: slot_index,
                    generation: slot.generation,
                };
            }
        }

        let slot_index = self.slots.len();
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId {
            slot: slot_index,
            generation: 0,
        }
    }

    /// Free a detached node (see [`Tree::create`]) and its subtree.
    ///
    /// Nodes that still have a parent are rejected; remove those with
    /// [`Tree::erase`].
    pub fn remove(&mut self, id: NodeId) -> Result<()> {
        if self.get(id)?.parent().is_some() {
            return Err(TreeError::Attached.into());
        }
        self.release(id);
        Ok(())
    }

    /// Free every node, attached or not. Slots keep their bumped generations so
    /// all earlier handles go stale.
    pub(crate) fn release_all(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() {
                slot.generation += 1;
                self.free.push(index);
            }
        }
        self.live = 0;
    }

    /// Free `id` and its whole subtree. Does not touch the parent's child list.
    pub(crate) fn release(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(slot) = self
                .slots
                .get_mut(current.slot)
                .filter(|slot| slot.generation == current.generation)
            else {
                continue;
            };
            if let Some(node) = slot.node.take() {
                slot.generation += 1;
                self.free.push(current.slot);
                self.live = self.live.saturating_sub(1);
                stack.extend_from_slice(node.children());
            }
        }
    }

    pub fn value(&self, id: NodeId) -> Result<&str> {
        Ok(self.get(id)?.value())
    }

    pub fn set_value(&mut self, id: NodeId, value: impl Into<String>) -> Result<()> {
        self.get_mut(id)?.value = value.into();
        Ok(())
    }

    pub fn node_type(&self, id: NodeId) -> Result<NodeType> {
        Ok(self.get(id)?.node_type())
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.get(id)?.parent())
    }

    pub fn index(&self, id: NodeId) -> Result<usize> {
        Ok(self.get(id)?.index())
    }

    /// A node is a root when it has no parent
    pub fn is_root(&self, id: NodeId) -> Result<bool> {
        Ok(self.get(id)?.is_root())
    }

    pub fn can_have_children(&self, id: NodeId) -> Result<bool> {
        Ok(self.get(id)?.can_have_children())
    }

    pub fn has_children(&self, id: NodeId) -> Result<bool> {
        Ok(self.get(id)?.has_children())
    }

    /// Sibling immediately before `id`
    pub fn previous(&self, id: NodeId) -> Result<NodeId> {
        let node = self.get(id)?;
        let parent = node.parent().ok_or(TreeError::NoParent)?;
        let index = node.index().checked_sub(1).ok_or_else(|| {
            TreeError::IndexOutOfRange {
                index: 0,
                len: self.child_count(parent).unwrap_or_default(),
            }
        })?;
        self.at(parent, index)
    }

    /// Sibling immediately after `id`
    pub fn next(&self, id: NodeId) -> Result<NodeId> {
        let node = self.get(id)?;
        let parent = node.parent().ok_or(TreeError::NoParent)?;
        self.at(parent, node.index() + 1)
    }

    /// Element payload of `id`, or `NotAnElement` for leaves
    pub fn element(&self, id: NodeId) -> Result<&ElementData> {
        let node = self.get(id)?;
        node.as_element()
            .ok_or_else(|| TreeError::NotAnElement(node.node_type()).into())
    }

    pub(crate) fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData> {
        let node = self.get_mut(id)?;
        let node_type = node.node_type();
        node.as_element_mut()
            .ok_or_else(|| TreeError::NotAnElement(node_type).into())
    }

    pub fn children(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(self.element(id)?.children())
    }

    pub fn child_count(&self, id: NodeId) -> Result<usize> {
        Ok(self.element(id)?.children.len())
    }

    pub fn front(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.element(id)?.children.first().copied())
    }

    pub fn back(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.element(id)?.children.last().copied())
    }

    /// Child at `index`
    pub fn at(&self, id: NodeId, index: usize) -> Result<NodeId> {
        let children = self.children(id)?;
        children.get(index).copied().ok_or_else(|| {
            TreeError::IndexOutOfRange {
                index,
                len: children.len(),
            }
            .into()
        })
    }

    /// Position of the first child whose value equals `value`, or the child
    /// count when there is none
    pub fn find_first(&self, id: NodeId, value: &str) -> Result<usize> {
        let children = self.children(id)?;
        Ok(children
            .iter()
            .position(|&child| self.value_is(child, value))
            .unwrap_or(children.len()))
    }

    /// Position of the last child whose value equals `value`, or the child
    /// count when there is none
    pub fn find_last(&self, id: NodeId, value: &str) -> Result<usize> {
        let children = self.children(id)?;
        Ok(children
            .iter()
            .rposition(|&child| self.value_is(child, value))
            .unwrap_or(children.len()))
    }

    /// Position of `child` among the children of `id`, or the child count
    pub fn find_first_node(&self, id: NodeId, child: NodeId) -> Result<usize> {
        let children = self.children(id)?;
        Ok(children
            .iter()
            .position(|&c| c == child)
            .unwrap_or(children.len()))
    }

    pub fn find_last_node(&self, id: NodeId, child: NodeId) -> Result<usize> {
        let children = self.children(id)?;
        Ok(children
            .iter()
            .rposition(|&c| c == child)
            .unwrap_or(children.len()))
    }

    fn value_is(&self, id: NodeId, value: &str) -> bool {
        self.get(id).is_ok_and(|node| node.value == value)
    }

    /// Append an attribute. Values holding both `"` and `'` are rejected since
    /// no quoting could write them back out.
    pub fn add_attribute(&mut self, id: NodeId, attribute: impl Into<Attribute>) -> Result<()> {
        let attribute = attribute.into();
        if !attribute.is_quotable() {
            return Err(TreeError::UnquotableValue(attribute.key().to_string()).into());
        }
        self.element_mut(id)?.attributes.push(attribute);
        Ok(())
    }

    pub fn attributes(&self, id: NodeId) -> Result<&[Attribute]> {
        Ok(self.element(id)?.attributes())
    }

    pub fn attributes_mut(&mut self, id: NodeId) -> Result<&mut Vec<Attribute>> {
        Ok(&mut self.element_mut(id)?.attributes)
    }

    /// First attribute with the given key
    pub fn attribute(&self, id: NodeId, key: &str) -> Result<Option<&Attribute>> {
        Ok(attribute::first_match(self.attributes(id)?, key))
    }

    /// Depth-first, document-order walk of `id` and everything below it
    pub fn descendants(&self, id: NodeId) -> Result<Descendants<'_>> {
        self.get(id)?;
        Ok(Descendants {
            tree: self,
            stack: vec![id],
        })
    }
}

/// Iterator returned by [`Tree::descendants`]
#[derive(Debug)]
pub struct Descendants<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        if let Ok(node) = self.tree.get(id) {
            // reversed so the first child is visited first
            self.stack.extend(node.children().iter().rev());
        }
        Some(id)
    }
}
