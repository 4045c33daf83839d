//! Error handling types for the document model
//!
//! Errors are grouped into categories: IO failures while reading or writing a
//! document, structural problems found by the parser, configured limits being
//! exceeded, and invalid tree operations. Parser errors carry the line and
//! column of the chunk that triggered them.

use std::{fmt, io};

use thiserror::Error as ThisError;

use crate::tree::NodeType;

/// Main error type for parsing and tree operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// The specific kind of error
    kind: ErrorKind,
    /// Location where the error occurred
    location: Option<Location>,
    /// Additional context for the error
    context: Option<String>,
}

/// Represents a location in the input text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
}

/// Top-level error categories
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ErrorKind {
    #[error(transparent)]
    Io(#[from] IoError),
    #[error(transparent)]
    Structural(#[from] StructuralError),
    #[error(transparent)]
    Security(#[from] SecurityError),
    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Malformed markup detected while building the tree
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum StructuralError {
    /// A declaration was found but nothing follows it
    #[error("no root tag after declaration")]
    NoRootTag,
    /// The input ended before the root element was closed
    #[error("no root: root element missing or never closed")]
    NoRoot,
    /// A closing tag does not match the element being built
    #[error("tag mismatch: expected </{expected}>, found </{found}>")]
    TagMismatch { expected: String, found: String },
    /// A comment shorter than `<!---->` or without its `--` terminator
    #[error("comment syntax error")]
    CommentSyntax,
    /// Generic syntax error
    #[error("syntax error: {0}")]
    Syntax(String),
    /// Malformed `key="value"` pair inside an opening tag
    #[error("attribute syntax error: {0}")]
    AttributeSyntax(String),
    /// Text content that is not followed by any tag
    #[error("text '{0}' has no closing tag")]
    MissingClosingTag(String),
    /// Something other than a comment after the root element closed
    #[error("unexpected content after root element")]
    ContentAfterRoot,
}

/// Configured parser limits
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum SecurityError {
    #[error("maximum nesting depth of {max} exceeded")]
    MaxDepthExceeded { max: usize },
    #[error("input of {size} bytes exceeds maximum of {max}")]
    MaxSizeExceeded { size: usize, max: usize },
}

/// Invalid use of node handles or tree positions
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum TreeError {
    /// The handle refers to a node that has been erased
    #[error("stale node handle")]
    StaleHandle,
    /// An element-only operation was applied to a leaf node
    #[error("{0} nodes cannot own children or attributes")]
    NotAnElement(NodeType),
    #[error("index {index} out of range for {len} children")]
    IndexOutOfRange { index: usize, len: usize },
    /// Sibling navigation on a node without a parent
    #[error("node has no parent")]
    NoParent,
    #[error("{0} nodes cannot be added as children")]
    InvalidChildType(NodeType),
    /// Only detached nodes can be removed directly, children go through `erase`
    #[error("node is still attached to a parent")]
    Attached,
    /// The value holds both quote characters and could not be written back out
    #[error("value of attribute '{0}' contains both quote characters")]
    UnquotableValue(String),
}

/// IO operation errors
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum IoError {
    #[error("file not found: {0}")]
    FileNotFound(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("read error: {0}")]
    ReadError(String),
    #[error("write error: {0}")]
    WriteError(String),
    /// A load or save was requested without any path bound to the document
    #[error("no file path bound to document")]
    NoPath,
}

impl Error {
    pub fn new(kind: impl Into<ErrorKind>) -> Self {
        Self {
            kind: kind.into(),
            location: None,
            context: None,
        }
    }

    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.location = Some(Location { line, column });
        self
    }

    /// Attach a location unless a more precise one is already set
    pub(crate) fn or_location(self, line: usize, column: usize) -> Self {
        if self.location.is_some() {
            return self;
        }
        self.with_location(line, column)
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn location(&self) -> Option<Location> {
        self.location
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn is_structural(&self) -> bool {
        matches!(self.kind, ErrorKind::Structural(_))
    }

    pub fn is_io(&self) -> bool {
        matches!(self.kind, ErrorKind::Io(_))
    }

    /// Maps a `std::io::Error` onto the IO category, keeping the path for context
    pub(crate) fn from_io(err: &io::Error, path: &str, writing: bool) -> Self {
        let kind = match err.kind() {
            io::ErrorKind::NotFound => IoError::FileNotFound(path.to_string()),
            io::ErrorKind::PermissionDenied => IoError::PermissionDenied(path.to_string()),
            _ if writing => IoError::WriteError(format!("{path}: {err}")),
            _ => IoError::ReadError(format!("{path}: {err}")),
        };
        Self::new(kind)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(loc) = &self.location {
            write!(f, "at line {}, column {}: {}", loc.line, loc.column, self.kind)?;
        } else {
            write!(f, "{}", self.kind)?;
        }

        if let Some(ctx) = &self.context {
            write!(f, " ({ctx})")?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl From<StructuralError> for Error {
    fn from(err: StructuralError) -> Self {
        Self::new(err)
    }
}

impl From<TreeError> for Error {
    fn from(err: TreeError) -> Self {
        Self::new(err)
    }
}

impl From<SecurityError> for Error {
    fn from(err: SecurityError) -> Self {
        Self::new(err)
    }
}

impl From<IoError> for Error {
    fn from(err: IoError) -> Self {
        Self::new(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
