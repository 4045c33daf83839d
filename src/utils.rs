use std::fs;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, IoError, Result};

/// Read a file, refusing to pull in much more than `limit` bytes
pub fn read_file(path: &Path, limit: usize) -> Result<String> {
    let file =
        fs::File::open(path).map_err(|e| Error::from_io(&e, &path.display().to_string(), false))?;
    read_limited(file, limit)
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| Error::from_io(&e, &path.display().to_string(), true))
}

/// Read at most `limit + 1` bytes, enough for the parser to notice oversized input
pub fn read_limited(reader: impl Read, limit: usize) -> Result<String> {
    let mut bytes = Vec::new();
    let cap = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);
    reader
        .take(cap)
        .read_to_end(&mut bytes)
        .map_err(|e| Error::from_io(&e, "<reader>", false))?;

    // the cut may land inside a character, the size check rejects it anyway
    let content = if bytes.len() > limit {
        String::from_utf8_lossy(&bytes).into_owned()
    } else {
        String::from_utf8(bytes).map_err(|e| IoError::ReadError(e.to_string()))?
    };
    Ok(strip_bom(content))
}

/// Drop a leading UTF-8 byte order mark
fn strip_bom(content: String) -> String {
    match content.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => content,
    }
}
