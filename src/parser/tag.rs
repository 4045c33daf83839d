//! Opening tag bodies: name, attributes and the self-closing marker

use crate::error::{Result, StructuralError};
use crate::tree::Attribute;

/// A parsed opening tag, e.g. `item id="1" /`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag<'a> {
    pub name: &'a str,
    pub attributes: Vec<Attribute>,
    pub self_closing: bool,
}

/// Parse the text between `<` and `>` of an opening tag
pub fn parse_tag(body: &str, with_attributes: bool) -> Result<Tag<'_>> {
    let trimmed = body.trim_end();
    let (inner, self_closing) = match trimmed.strip_suffix('/') {
        Some(inner) => (inner, true),
        None => (trimmed, false),
    };

    let name_end = inner.find(char::is_whitespace).unwrap_or(inner.len());
    let (name, rest) = inner.split_at(name_end);

    let attributes = if with_attributes {
        parse_attributes(rest)?
    } else {
        Vec::new()
    };

    Ok(Tag {
        name,
        attributes,
        self_closing,
    })
}

/// Whitespace-separated `key="value"` or `key='value'` pairs, values verbatim
pub fn parse_attributes(input: &str) -> Result<Vec<Attribute>> {
    let mut attributes = Vec::new();
    let mut rest = input;

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }

        let key_end = rest
            .find(|c: char| c == '=' || c.is_whitespace())
            .unwrap_or(rest.len());
        let (key, after_key) = rest.split_at(key_end);
        if key.is_empty() {
            return Err(StructuralError::AttributeSyntax(format!(
                "missing attribute name before '{}'",
                after_key.trim()
            ))
            .into());
        }

        let after_eq = after_key
            .trim_start()
            .strip_prefix('=')
            .ok_or_else(|| {
                StructuralError::AttributeSyntax(format!("attribute '{key}' has no value"))
            })?
            .trim_start();

        let mut chars = after_eq.chars();
        let quote = match chars.next() {
            Some(q @ ('"' | '\'')) => q,
            _ => {
                return Err(StructuralError::AttributeSyntax(format!(
                    "value of attribute '{key}' is not quoted"
                ))
                .into())
            }
        };

        let (value, remainder) = chars.as_str().split_once(quote).ok_or_else(|| {
            StructuralError::AttributeSyntax(format!("unterminated value for attribute '{key}'"))
        })?;

        attributes.push(Attribute::new(key, value));
        rest = remainder;
    }

    Ok(attributes)
}
