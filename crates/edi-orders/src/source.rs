//! Loading document text from raw bytes and files

use crate::{Error, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Decode bytes as UTF-8, dropping invalid sequences instead of replacing them.
pub fn decode_lossy(mut bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    loop {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                text.push_str(valid);
                return text;
            }
            Err(error) => {
                let (valid, rest) = bytes.split_at(error.valid_up_to());
                text.push_str(std::str::from_utf8(valid).unwrap_or_default());
                match error.error_len() {
                    Some(len) => bytes = &rest[len..],
                    None => return text,
                }
            }
        }
    }
}

/// Read a document from disk, tolerating invalid bytes.
pub fn load_document(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = decode_lossy(&bytes);
    debug!(path = %path.display(), bytes = bytes.len(), "Loaded document");
    Ok(text)
}
