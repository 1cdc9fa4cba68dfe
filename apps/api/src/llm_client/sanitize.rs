//! Response sanitization: turns fenced or padded model text into decoded JSON.
//!
//! Strict by construction. Fence markers and surrounding whitespace are the only
//! things removed; anything that is still not valid JSON afterwards is a
//! `ResponseParseFailed`, never a best-effort repair.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Opening marker of a fenced JSON block.
pub const OPENING_FENCE: &str = "```json";
/// Closing marker of any fenced block.
pub const CLOSING_FENCE: &str = "```";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailureKind {
    /// The sanitized text is not JSON at all.
    InvalidJson,
    /// Valid JSON, but not the shape the caller asked for.
    SchemaMismatch,
}

impl std::fmt::Display for ParseFailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseFailureKind::InvalidJson => f.write_str("invalid JSON"),
            ParseFailureKind::SchemaMismatch => f.write_str("unexpected JSON shape"),
        }
    }
}

/// Model output that could not be turned into the expected value.
///
/// `raw` is the text exactly as the model returned it. It is for logs and
/// development diagnostics only; it must never reach an end-user response.
#[derive(Debug, Clone, Error)]
#[error("model response could not be parsed ({kind}): {reason}")]
pub struct ResponseParseFailed {
    pub kind: ParseFailureKind,
    pub reason: String,
    pub raw: String,
}

impl ResponseParseFailed {
    pub fn schema_mismatch(raw: &str, reason: impl Into<String>) -> Self {
        Self {
            kind: ParseFailureKind::SchemaMismatch,
            reason: reason.into(),
            raw: raw.to_string(),
        }
    }
}

/// Removes every opening fence, then every closing fence, then trims.
///
/// All occurrences are removed so duplicated fences do not survive.
pub fn sanitize(raw: &str) -> String {
    raw.replace(OPENING_FENCE, "")
        .replace(CLOSING_FENCE, "")
        .trim()
        .to_string()
}

/// Sanitizes and strictly decodes `raw` into an untyped JSON value.
pub fn decode(raw: &str) -> Result<Value, ResponseParseFailed> {
    serde_json::from_str(&sanitize(raw)).map_err(|e| ResponseParseFailed {
        kind: ParseFailureKind::InvalidJson,
        reason: e.to_string(),
        raw: raw.to_string(),
    })
}

/// Sanitizes, decodes, then converts into `T`.
///
/// Syntax errors and shape errors are reported as different kinds.
pub fn decode_as<T: DeserializeOwned>(raw: &str) -> Result<T, ResponseParseFailed> {
    let value = decode(raw)?;
    serde_json::from_value(value).map_err(|e| ResponseParseFailed::schema_mismatch(raw, e.to_string()))
}
