//! Structural edits on elements
//!
//! Every operation here leaves the edited element with contiguous child
//! indices `0..n`.

use tracing::trace;

use super::{Fragment, Node, NodeId, NodeType, Tree};
use crate::error::{Result, TreeError};

impl Tree {
    /// Append a new child of `node_type` to `parent`
    pub fn add(
        &mut self,
        parent: NodeId,
        node_type: NodeType,
        value: impl Into<String>,
    ) -> Result<NodeId> {
        let len = self.child_count(parent)?;
        self.insert(parent, len, node_type, value)
    }

    /// Create a new child and splice it in at `index` (`0..=len`)
    pub fn insert(
        &mut self,
        parent: NodeId,
        index: usize,
        node_type: NodeType,
        value: impl Into<String>,
    ) -> Result<NodeId> {
        if node_type == NodeType::Declaration {
            return Err(TreeError::InvalidChildType(node_type).into());
        }
        self.check_insert_index(parent, index)?;

        let id = self.alloc(Node::new(node_type, value));
        self.attach(parent, index, id)?;
        Ok(id)
    }

    /// Append a copy of `source` to `parent`
    pub fn link(&mut self, parent: NodeId, source: NodeId) -> Result<NodeId> {
        let len = self.child_count(parent)?;
        self.link_at(parent, len, source)
    }

    /// Insert a copy of `source` at `index`.
    ///
    /// Elements are copied with their attributes and whole subtree; leaves copy
    /// their value. `source` itself is left where it is.
    pub fn link_at(&mut self, parent: NodeId, index: usize, source: NodeId) -> Result<NodeId> {
        let fragment = self.snapshot(source)?;
        self.link_fragment(parent, index, &fragment)
    }

    /// Insert the nodes described by `fragment` at `index`
    pub fn link_fragment(
        &mut self,
        parent: NodeId,
        index: usize,
        fragment: &Fragment,
    ) -> Result<NodeId> {
        self.check_insert_index(parent, index)?;
        let id = self.materialize(fragment)?;
        self.attach(parent, index, id)?;
        Ok(id)
    }

    /// Replace the child at `index` with a copy of `source`, keeping the index.
    /// The previous child and its subtree are freed.
    pub fn replace(&mut self, parent: NodeId, index: usize, source: NodeId) -> Result<NodeId> {
        let fragment = self.snapshot(source)?;
        self.replace_with(parent, index, &fragment)
    }

    pub fn replace_with(
        &mut self,
        parent: NodeId,
        index: usize,
        fragment: &Fragment,
    ) -> Result<NodeId> {
        let old = self.at(parent, index)?;
        let id = self.materialize(fragment)?;

        let node = self.get_mut(id)?;
        node.parent = Some(parent);
        node.index = index;
        if let Some(slot) = self.element_mut(parent)?.children.get_mut(index) {
            *slot = id;
        }
        self.release(old);

        trace!(index, "replaced child");
        Ok(id)
    }

    /// Remove the child at `index`; see [`Tree::erase_range`]
    pub fn erase(&mut self, parent: NodeId, index: usize) -> Result<Option<NodeId>> {
        self.erase_range(parent, index, 1)
    }

    /// Remove `count` children starting at `index`.
    ///
    /// Returns the node now sitting at `index - 1`, or `None` when `index` is 0.
    pub fn erase_range(
        &mut self,
        parent: NodeId,
        index: usize,
        count: usize,
    ) -> Result<Option<NodeId>> {
        let len = self.child_count(parent)?;
        let end = index
            .checked_add(count)
            .filter(|&end| end <= len)
            .ok_or(TreeError::IndexOutOfRange { index, len })?;

        let removed: Vec<NodeId> = self.element_mut(parent)?.children.drain(index..end).collect();
        for id in removed {
            self.release(id);
        }
        self.renumber(parent, index)?;

        trace!(index, count, "erased children");
        match index.checked_sub(1) {
            Some(prev) => self.at(parent, prev).map(Some),
            None => Ok(None),
        }
    }

    /// Empty the value of `id`; elements also lose all children and attributes
    pub fn clear(&mut self, id: NodeId) -> Result<()> {
        let node = self.get_mut(id)?;
        node.value.clear();
        let children = match node.as_element_mut() {
            Some(element) => {
                element.attributes.clear();
                std::mem::take(&mut element.children)
            }
            None => Vec::new(),
        };
        for child in children {
            self.release(child);
        }
        Ok(())
    }

    fn check_insert_index(&self, parent: NodeId, index: usize) -> Result<()> {
        let len = self.child_count(parent)?;
        if index > len {
            return Err(TreeError::IndexOutOfRange { index, len }.into());
        }
        Ok(())
    }

    /// Splice the detached node `id` into `parent` at `index`
    fn attach(&mut self, parent: NodeId, index: usize, id: NodeId) -> Result<()> {
        let node = self.get_mut(id)?;
        node.parent = Some(parent);
        node.index = index;
        self.element_mut(parent)?.children.insert(index, id);
        self.renumber(parent, index + 1)
    }

    /// Rewrite the stored index of every child of `parent` from `start` on
    fn renumber(&mut self, parent: NodeId, start: usize) -> Result<()> {
        let children: Vec<NodeId> = self
            .children(parent)?
            .iter()
            .skip(start)
            .copied()
            .collect();
        for (offset, child) in children.into_iter().enumerate() {
            self.get_mut(child)?.index = start + offset;
        }
        Ok(())
    }
}
