//! The document façade
//!
//! A [`Document`] owns a [`Tree`] holding one synthetic container element. The
//! parsed top-level nodes (the root element, comments and other markup around
//! it) are its children, and the optional `<?xml ...?>` declaration sits next to
//! it as a parentless node. Loads report success as a `bool` and append their
//! failures to a cumulative error log; the `try_*` variants return the typed
//! error instead.

use std::fmt;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::error::{Error, IoError, Result};
use crate::formatter::XmlFormatter;
use crate::parser::{Parser, ParserConfig};
use crate::tree::{NodeId, NodeType, Tree};
use crate::utils::{read_file, read_limited, write_file};

#[derive(Debug, Clone)]
pub struct Document {
    tree: Tree,
    container: NodeId,
    declaration: Option<NodeId>,
    path: Option<PathBuf>,
    config: ParserConfig,
    errors: String,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut tree = Tree::new();
        let container = tree.create(NodeType::Element, "");
        Self {
            tree,
            container,
            declaration: None,
            path: None,
            config: ParserConfig::default(),
            errors: String::new(),
        }
    }

    /// Empty document bound to `path` for [`load_file`](Self::load_file) and
    /// [`save_file`](Self::save_file)
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        let mut document = Self::new();
        document.path = Some(path.into());
        document
    }

    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    // Loading

    /// Parse `input`, replacing the current content. On failure the error is
    /// logged and whatever was built before it stays in the tree.
    pub fn load_str(&mut self, input: &str) -> bool {
        let result = self.try_load_str(input);
        self.record(result)
    }

    pub fn try_load_str(&mut self, input: &str) -> Result<()> {
        self.reset();
        let mut parser = Parser::with_config(input, self.config.clone());
        let result = parser.parse_into(&mut self.tree, self.container);
        self.declaration = parser.declaration();
        result
    }

    pub fn load_reader(&mut self, reader: impl Read) -> bool {
        let result = read_limited(reader, self.config.max_size)
            .and_then(|content| self.try_load_str(&content));
        self.record(result)
    }

    /// Load from the bound path
    pub fn load_file(&mut self) -> bool {
        let result = self.try_load_file();
        self.record(result)
    }

    /// Bind `path` and load from it
    pub fn load_file_from(&mut self, path: impl Into<PathBuf>) -> bool {
        self.path = Some(path.into());
        self.load_file()
    }

    #[instrument(skip(self), fields(path = ?self.path))]
    pub fn try_load_file(&mut self) -> Result<()> {
        let path = self.path.clone().ok_or(IoError::NoPath)?;
        debug!("reading document");
        let content = read_file(&path, self.config.max_size)?;
        self.try_load_str(&content)?;
        info!(nodes = self.tree.len(), "document loaded");
        Ok(())
    }

    /// Every error recorded since the last [`clear_error`](Self::clear_error),
    /// one per line
    pub fn error(&self) -> &str {
        &self.errors
    }

    pub fn clear_error(&mut self) {
        self.errors.clear();
    }

    // Structure

    /// First element among the top-level nodes
    pub fn root(&self) -> Option<NodeId> {
        self.tree
            .children(self.container)
            .ok()?
            .iter()
            .copied()
            .find(|&child| self.tree.node_type(child).ok() == Some(NodeType::Element))
    }

    /// Container element holding the top-level nodes
    pub fn synthetic_root(&self) -> NodeId {
        self.container
    }

    pub fn declaration(&self) -> Option<NodeId> {
        self.declaration
    }

    /// Set the declaration text (without the surrounding `<` `>`), creating the
    /// node if the document has none
    pub fn set_declaration(&mut self, value: impl Into<String>) -> Result<NodeId> {
        match self.declaration {
            Some(id) => {
                self.tree.set_value(id, value)?;
                Ok(id)
            }
            None => {
                let id = self.tree.create(NodeType::Declaration, value);
                self.declaration = Some(id);
                Ok(id)
            }
        }
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    // Saving

    /// Write to the bound path
    pub fn save_file(&mut self) -> bool {
        let result = self.try_save_file();
        self.record(result)
    }

    /// Bind `path` and write to it
    pub fn save_file_to(&mut self, path: impl Into<PathBuf>) -> bool {
        let result = self.try_save_file_to(path);
        self.record(result)
    }

    pub fn try_save_file_to(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        self.path = Some(path.into());
        self.try_save_file()
    }

    #[instrument(skip(self), fields(path = ?self.path))]
    pub fn try_save_file(&self) -> Result<()> {
        let path = self.path.as_deref().ok_or(IoError::NoPath)?;
        let content = self.to_xml_string()?;
        write_file(path, &content)?;
        info!(bytes = content.len(), "document saved");
        Ok(())
    }

    pub fn write_to(&self, mut writer: impl Write) -> Result<()> {
        let content = self.to_xml_string()?;
        writer
            .write_all(content.as_bytes())
            .map_err(|e| Error::from_io(&e, "<writer>", true))
    }

    pub fn to_xml_string(&self) -> Result<String> {
        XmlFormatter.format_document(&self.tree, self.declaration, self.container)
    }

    /// Free the previous content, detached nodes included; handles into it go
    /// stale
    fn reset(&mut self) {
        self.tree.release_all();
        self.container = self.tree.create(NodeType::Element, "");
        self.declaration = None;
    }

    fn record(&mut self, result: Result<()>) -> bool {
        match result {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "document operation failed");
                self.errors.push_str(&err.to_string());
                self.errors.push('\n');
                false
            }
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let content = self.to_xml_string().map_err(|_| fmt::Error)?;
        f.write_str(&content)
    }
}
