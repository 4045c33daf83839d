//! Depth-first rendering of a tree
//!
//! [`XmlFormatter`] writes markup back out. No whitespace is inserted inside
//! elements, so text nodes come back out exactly as they were parsed, and
//! top-level nodes of a document are written one per line.
//! [`OutlineFormatter`] renders the tab-indented element/text outline the
//! command line tool prints.

use std::fmt::Write as _;

use crate::error::Result;
use crate::tree::{Attribute, NodeId, NodeKind, Tree};

/// Trait for turning a node of a tree into text
pub trait Formatter {
    fn format(&self, tree: &Tree, id: NodeId) -> Result<String>;
}

/// Writes nodes as markup
#[derive(Debug, Default, Clone, Copy)]
pub struct XmlFormatter;

impl Formatter for XmlFormatter {
    fn format(&self, tree: &Tree, id: NodeId) -> Result<String> {
        let mut out = String::new();
        Self::write_node(tree, id, &mut out)?;
        Ok(out)
    }
}

impl XmlFormatter {
    /// Serialize a whole document: the declaration on its own line, then every
    /// child of `container` followed by a newline
    pub fn format_document(
        &self,
        tree: &Tree,
        declaration: Option<NodeId>,
        container: NodeId,
    ) -> Result<String> {
        let mut out = String::new();
        if let Some(declaration) = declaration {
            Self::write_node(tree, declaration, &mut out)?;
            out.push('\n');
        }
        for &child in tree.children(container)? {
            Self::write_node(tree, child, &mut out)?;
            out.push('\n');
        }
        Ok(out)
    }

    fn write_node(tree: &Tree, id: NodeId, out: &mut String) -> Result<()> {
        let node = tree.get(id)?;
        match node.kind() {
            NodeKind::Element(element) => {
                out.push('<');
                out.push_str(node.value());
                Self::write_attributes(element.attributes(), out);
                if element.children().is_empty() {
                    out.push_str("/>");
                    return Ok(());
                }
                out.push('>');
                for &child in element.children() {
                    Self::write_node(tree, child, out)?;
                }
                out.push_str("</");
                out.push_str(node.value());
                out.push('>');
            }
            NodeKind::Text => out.push_str(node.value()),
            NodeKind::Comment => {
                out.push_str("<!--");
                out.push_str(node.value());
                out.push_str("-->");
            }
            NodeKind::Declaration | NodeKind::Unknown => {
                out.push('<');
                out.push_str(node.value());
                out.push('>');
            }
        }
        Ok(())
    }

    fn write_attributes(attributes: &[Attribute], out: &mut String) {
        for attribute in attributes {
            // writing into a String cannot fail
            let _ = write!(out, " {attribute}");
        }
    }
}

/// Indented listing of elements (with attributes) and text, one node per line
#[derive(Debug, Default, Clone, Copy)]
pub struct OutlineFormatter;

impl Formatter for OutlineFormatter {
    fn format(&self, tree: &Tree, id: NodeId) -> Result<String> {
        let mut out = String::new();
        Self::write_node(tree, id, 0, &mut out)?;
        Ok(out)
    }
}

impl OutlineFormatter {
    fn write_node(tree: &Tree, id: NodeId, depth: usize, out: &mut String) -> Result<()> {
        let node = tree.get(id)?;
        match node.kind() {
            NodeKind::Element(element) => {
                Self::indent(depth, out);
                out.push_str(node.value());
                out.push_str(": ");
                for attribute in element.attributes() {
                    let _ = write!(out, "{}=\"{}\" ", attribute.key(), attribute.value());
                }
                out.push('\n');
                for &child in element.children() {
                    Self::write_node(tree, child, depth + 1, out)?;
                }
            }
            NodeKind::Text => {
                Self::indent(depth, out);
                out.push_str(node.value());
                out.push('\n');
            }
            // comments and other markup are left out of the outline
            NodeKind::Declaration | NodeKind::Comment | NodeKind::Unknown => {}
        }
        Ok(())
    }

    fn indent(depth: usize, out: &mut String) {
        out.extend(std::iter::repeat('\t').take(depth));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeType;

    #[test]
    fn test_element_forms() -> Result<()> {
        let mut tree = Tree::new();
        let a = tree.create(NodeType::Element, "a");
        tree.add_attribute(a, ("k", "v"))?;
        let b = tree.add(a, NodeType::Element, "b")?;
        tree.add_attribute(b, ("say", "\"hi\""))?;
        tree.add(a, NodeType::Text, " x ")?;
        tree.add(a, NodeType::Comment, " c ")?;
        tree.add(a, NodeType::Unknown, "?pi data?")?;

        assert_eq!(
            XmlFormatter.format(&tree, a)?,
            "<a k=\"v\"><b say='\"hi\"'/> x <!-- c --><?pi data?></a>"
        );
        Ok(())
    }

    #[test]
    fn test_document_lines() -> Result<()> {
        let mut tree = Tree::new();
        let container = tree.create(NodeType::Element, "");
        let declaration = tree.create(NodeType::Declaration, "?xml version=\"1.0\"?");
        tree.add(container, NodeType::Unknown, "!DOCTYPE a")?;
        let a = tree.add(container, NodeType::Element, "a")?;
        tree.add(a, NodeType::Text, "hi")?;
        tree.add(container, NodeType::Comment, "end")?;

        let text = XmlFormatter.format_document(&tree, Some(declaration), container)?;
        assert_eq!(
            text,
            "<?xml version=\"1.0\"?>\n<!DOCTYPE a>\n<a>hi</a>\n<!--end-->\n"
        );
        Ok(())
    }

    #[test]
    fn test_outline() -> Result<()> {
        let mut tree = Tree::new();
        let a = tree.create(NodeType::Element, "a");
        tree.add_attribute(a, ("id", "1"))?;
        let b = tree.add(a, NodeType::Element, "b")?;
        tree.add(b, NodeType::Text, "hi")?;
        tree.add(a, NodeType::Comment, "skipped")?;

        assert_eq!(
            OutlineFormatter.format(&tree, a)?,
            "a: id=\"1\" \n\tb: \n\t\thi\n"
        );
        Ok(())
    }

    #[test]
    fn test_stale_handle() -> Result<()> {
        let mut tree = Tree::new();
        let a = tree.create(NodeType::Element, "a");
        let b = tree.add(a, NodeType::Element, "b")?;
        tree.erase(a, 0)?;
        assert!(XmlFormatter.format(&tree, b).is_err());
        Ok(())
    }
}
