//! Attribute storage for elements
//!
//! Attributes are kept as an ordered list of pairs. Duplicate keys are allowed
//! and lookups return the first match, mirroring how they appear in source.

use std::fmt;

/// A single `key="value"` pair
///
/// Values are written back double-quoted, or single-quoted when they contain
/// `"`. A value holding both quote characters cannot be written back out;
/// [`Tree::add_attribute`](crate::Tree::add_attribute) rejects it, but one set
/// through [`Attribute::set_value`] or `attributes_mut` will not reload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute {
    key: String,
    value: String,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Whether some quote character can delimit the value
    pub fn is_quotable(&self) -> bool {
        !(self.value.contains('"') && self.value.contains('\''))
    }

    /// Quote character used when writing the value back out
    pub(crate) fn quote(&self) -> char {
        if self.value.contains('"') {
            '\''
        } else {
            '"'
        }
    }
}

impl<K, V> From<(K, V)> for Attribute
where
    K: Into<String>,
    V: Into<String>,
{
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quote = self.quote();
        write!(f, "{}={quote}{}{quote}", self.key, self.value)
    }
}

/// First attribute whose key equals `key`
pub(crate) fn first_match<'a>(attributes: &'a [Attribute], key: &str) -> Option<&'a Attribute> {
    attributes.iter().find(|attr| attr.key == key)
}
