//! Storage module for saving and loading question documents
//!
//! The engine consumes already-validated in-memory documents; this module
//! provides the JSON round-trip for tooling and the CUI player.

use thiserror::Error;

use crate::types::Question;

/// Errors produced by document save/load
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
    #[error("document is not a valid question: {0}")]
    Format(#[from] serde_json::Error),
}

/// Serialize a question document to JSON bytes
pub fn save(question: &Question) -> Result<Vec<u8>, DocumentError> {
    let json = serde_json::to_string_pretty(question)?;
    Ok(json.into_bytes())
}

/// Deserialize a question document from JSON bytes
pub fn load(bytes: &[u8]) -> Result<Question, DocumentError> {
    let json = String::from_utf8(bytes.to_vec())?;
    let question = serde_json::from_str(&json)?;
    Ok(question)
}
