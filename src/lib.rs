//! tagtree: a small XML document object model
//!
//! This crate provides functionality to:
//! - Parse a constrained XML dialect into an arena-backed node tree
//! - Query and edit the tree while keeping sibling indices contiguous
//! - Serialize the tree back to markup
//! - Report errors with a category, a location and context
//!
//! # Examples
//! ```
//! use tagtree::{NodeType, Result};
//!
//! fn example() -> Result<()> {
//!     let mut doc = tagtree::from_str("<?xml version=\"1.0\"?><list><item>one</item></list>")?;
//!     let root = doc.root().ok_or(tagtree::StructuralError::NoRoot)?;
//!
//!     let item = doc.tree_mut().add(root, NodeType::Element, "item")?;
//!     doc.tree_mut().add(item, NodeType::Text, "two")?;
//!
//!     assert_eq!(
//!         doc.to_xml_string()?,
//!         "<?xml version=\"1.0\"?>\n<list><item>one</item><item>two</item></list>\n"
//!     );
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

use std::path::PathBuf;

use tracing::{debug, instrument};

pub mod document;
pub mod error;
pub mod formatter;
pub mod parser;
pub mod tree;
pub mod utils;

// Re-exports
pub use document::Document;
pub use error::{
    Error, ErrorKind, IoError, Location, Result, SecurityError, StructuralError, TreeError,
};
pub use formatter::{Formatter, OutlineFormatter, XmlFormatter};
pub use parser::{ParserConfig, DEFAULT_MAX_DEPTH, DEFAULT_MAX_SIZE};
pub use tree::{Attribute, Fragment, Node, NodeId, NodeKind, NodeType, Tree};

/// Parse a document held in memory
pub fn from_str(input: &str) -> Result<Document> {
    let mut document = Document::new();
    document.try_load_str(input)?;
    Ok(document)
}

/// Parse the document stored at `path`, keeping the path bound for saving
#[instrument(skip_all)]
pub fn load_file(path: impl Into<PathBuf>) -> Result<Document> {
    let mut document = Document::with_path(path);
    debug!(path = ?document.path(), "loading file");
    document.try_load_file()?;
    Ok(document)
}
