//! Chunk-based document parser
//!
//! The input is cut at every `>` and each chunk is classified by its first
//! non-whitespace characters. The parser keeps a "current" element, descends
//! into it on opening tags and climbs back out on closing tags, checking that
//! every closing tag names the element being closed.
//!
//! This is deliberately not a full XML tokenizer: `>` inside attribute values
//! or comments splits the chunk, and entities are left as written.

pub mod chunk;
pub mod config;
pub mod tag;

use tracing::{debug, trace};

pub use chunk::{Chunk, ChunkClass, Chunks};
pub use config::{ParserConfig, ParsingContext, DEFAULT_MAX_DEPTH, DEFAULT_MAX_SIZE};

use crate::error::{Error, Result, StructuralError};
use crate::tree::{NodeId, NodeType, Tree};

/// Builds a tree out of a document's text
#[derive(Debug)]
pub struct Parser<'a> {
    input: &'a str,
    config: ParserConfig,
    context: ParsingContext,
    /// Synthetic container the document's nodes are appended to
    container: Option<NodeId>,
    current: Option<NodeId>,
    declaration: Option<NodeId>,
    root_opened: bool,
    root_closed: bool,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_config(input, ParserConfig::default())
    }

    pub fn with_config(input: &'a str, config: ParserConfig) -> Self {
        Self {
            input,
            config,
            context: ParsingContext::new(),
            container: None,
            current: None,
            declaration: None,
            root_opened: false,
            root_closed: false,
        }
    }

    /// Declaration node created by the last parse, if the input had one.
    ///
    /// It is not attached to the container, and survives a failed parse.
    pub fn declaration(&self) -> Option<NodeId> {
        self.declaration
    }

    /// Parse into `tree`, appending top-level nodes to `container`.
    ///
    /// Stops at the first error; whatever was built before it stays in the tree.
    pub fn parse_into(&mut self, tree: &mut Tree, container: NodeId) -> Result<()> {
        self.config.validate_size(self.input.len())?;
        self.container = Some(container);
        self.current = Some(container);
        self.context = ParsingContext::new();
        self.declaration = None;
        self.root_opened = false;
        self.root_closed = false;

        let mut chunks = Chunks::new(self.input)
            .filter(|chunk| !chunk.is_blank())
            .peekable();

        if let Some(first) = chunks.next_if(|c| c.trimmed().starts_with("<?xml")) {
            let value = first.trimmed().strip_prefix('<').unwrap_or_default();
            self.declaration = Some(tree.create(NodeType::Declaration, value));
            debug!(declaration = value, "found declaration");

            if chunks.peek().is_none() {
                return Err(Error::new(StructuralError::NoRootTag)
                    .with_location(first.line, first.column));
            }
        }

        for chunk in chunks {
            self.process(tree, chunk)
                .map_err(|err| err.or_location(chunk.line, chunk.column))?;
        }

        if !self.root_closed {
            return Err(StructuralError::NoRoot.into());
        }

        debug!(nodes = tree.len(), "parsed document");
        Ok(())
    }

    fn process(&mut self, tree: &mut Tree, chunk: Chunk<'a>) -> Result<()> {
        if chunk.is_lone_character() {
            return Err(StructuralError::Syntax(format!(
                "unexpected lone '{}'",
                chunk.trimmed()
            ))
            .into());
        }

        let current = self.current()?;
        let mut class = chunk.class();
        if class == ChunkClass::Closing
            && !tree.has_children(current)?
            && !chunk.text.starts_with('<')
        {
            class = ChunkClass::Text;
        }
        trace!(?class, line = chunk.line, column = chunk.column, "chunk");

        if self.root_closed {
            return match class {
                ChunkClass::Comment => self.comment(tree, chunk),
                _ => Err(StructuralError::ContentAfterRoot.into()),
            };
        }

        match class {
            ChunkClass::Element => self.open_element(tree, chunk),
            ChunkClass::Closing => {
                let name = chunk.trimmed().get(2..).unwrap_or_default();
                self.close_element(tree, chunk, name)
            }
            ChunkClass::Text => self.text(tree, chunk),
            ChunkClass::Comment => self.comment(tree, chunk),
            ChunkClass::Unknown => {
                self.require_terminated(chunk)?;
                let value = chunk.trimmed().get(1..).unwrap_or_default();
                tree.add(current, NodeType::Unknown, value)?;
                Ok(())
            }
        }
    }

    fn open_element(&mut self, tree: &mut Tree, chunk: Chunk<'a>) -> Result<()> {
        self.require_terminated(chunk)?;
        let current = self.current()?;
        let body = chunk.trimmed().get(1..).unwrap_or_default();
        let tag = tag::parse_tag(body, self.config.parse_attributes)?;

        self.context.enter_nested(&self.config)?;
        let element = tree.add(current, NodeType::Element, tag.name)?;
        tree.attributes_mut(element)?.extend(tag.attributes);

        let at_top = self.container == Some(current);
        if at_top {
            self.root_opened = true;
        }

        if tag.self_closing {
            self.context.exit_nested();
            if at_top {
                self.root_closed = true;
            }
        } else {
            self.current = Some(element);
        }
        Ok(())
    }

    fn close_element(&mut self, tree: &mut Tree, chunk: Chunk<'a>, name: &str) -> Result<()> {
        self.require_terminated(chunk)?;
        let current = self.current()?;
        let name = name.trim();
        let expected = tree.value(current)?;
        if Some(current) == self.container || expected != name {
            return Err(StructuralError::TagMismatch {
                expected: expected.to_string(),
                found: name.to_string(),
            }
            .into());
        }

        let parent = tree.parent(current)?.ok_or(StructuralError::NoRoot)?;
        self.context.exit_nested();
        self.current = Some(parent);
        if Some(parent) == self.container {
            self.root_closed = true;
        }
        Ok(())
    }

    fn text(&mut self, tree: &mut Tree, chunk: Chunk<'a>) -> Result<()> {
        let current = self.current()?;
        if Some(current) == self.container {
            return Err(StructuralError::Syntax(format!(
                "text '{}' outside the root element",
                chunk.text.trim()
            ))
            .into());
        }

        let Some(split) = chunk.text.find('<') else {
            return Err(StructuralError::MissingClosingTag(chunk.text.trim().to_string()).into());
        };
        let (content, _) = chunk.text.split_at(split);
        tree.add(current, NodeType::Text, content)?;

        let Some(rest) = chunk.tail(split) else {
            return Err(StructuralError::MissingClosingTag(content.trim().to_string()).into());
        };

        // text followed by its closing tag in the same chunk
        if let Some(name) = rest.text.strip_prefix("</") {
            return self
                .close_element(tree, rest, name)
                .map_err(|err| err.or_location(rest.line, rest.column));
        }

        // mixed content: the markup after the text gets handled on its own
        self.process(tree, rest)
            .map_err(|err| err.or_location(rest.line, rest.column))
    }

    fn comment(&mut self, tree: &mut Tree, chunk: Chunk<'a>) -> Result<()> {
        self.require_terminated(chunk)?;
        let current = self.current()?;
        let raw = chunk.trimmed();
        // `<!---->` is the shortest comment, the `>` already went to the split
        if raw.len() + 1 < 7 {
            return Err(Error::new(StructuralError::CommentSyntax).with_context(raw));
        }
        let body = raw
            .strip_prefix("<!--")
            .and_then(|s| s.strip_suffix("--"))
            .ok_or_else(|| Error::new(StructuralError::CommentSyntax).with_context(raw))?;
        tree.add(current, NodeType::Comment, body)?;
        Ok(())
    }

    fn current(&self) -> Result<NodeId> {
        self.current.ok_or_else(|| StructuralError::NoRoot.into())
    }

    fn require_terminated(&self, chunk: Chunk<'a>) -> Result<()> {
        if chunk.terminated {
            return Ok(());
        }
        Err(StructuralError::Syntax(format!(
            "unterminated markup '{}'",
            chunk.trimmed().trim_end()
        ))
        .into())
    }
}

/// Parse `input` into a fresh tree; returns the tree, its container element and
/// the declaration if one was present
pub fn parse_str(input: &str, config: ParserConfig) -> Result<(Tree, NodeId, Option<NodeId>)> {
    let mut tree = Tree::new();
    let container = tree.create(NodeType::Element, "");
    let mut parser = Parser::with_config(input, config);
    parser.parse_into(&mut tree, container)?;
    Ok((tree, container, parser.declaration()))
}
