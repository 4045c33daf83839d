use crate::error::{Result, SecurityError};

/// Maximum element nesting depth (256), keeps recursive traversals shallow
pub const DEFAULT_MAX_DEPTH: usize = 256;
/// Maximum input size (16MB), documents are read into memory whole
pub const DEFAULT_MAX_SIZE: usize = 16 * 1024 * 1024;

/// Configuration for parser limits and attribute handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum nesting depth of elements
    pub max_depth: usize,
    /// Maximum input size in bytes
    pub max_size: usize,
    /// Extract `key="value"` pairs from opening tags
    pub parse_attributes: bool,
}

/// Tracks nesting depth during parsing
#[derive(Debug, Default)]
pub struct ParsingContext {
    current_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_size: DEFAULT_MAX_SIZE,
            parse_attributes: true,
        }
    }
}

impl ParserConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn with_attributes(mut self, parse_attributes: bool) -> Self {
        self.parse_attributes = parse_attributes;
        self
    }

    pub fn validate_size(&self, size: usize) -> Result<()> {
        if size > self.max_size {
            return Err(SecurityError::MaxSizeExceeded {
                size,
                max: self.max_size,
            }
            .into());
        }
        Ok(())
    }
}

impl ParsingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.current_depth
    }

    pub fn enter_nested(&mut self, config: &ParserConfig) -> Result<()> {
        self.current_depth += 1;
        if self.current_depth > config.max_depth {
            return Err(SecurityError::MaxDepthExceeded {
                max: config.max_depth,
            }
            .into());
        }
        Ok(())
    }

    pub fn exit_nested(&mut self) {
        if self.current_depth > 0 {
            self.current_depth -= 1;
        }
    }
}
