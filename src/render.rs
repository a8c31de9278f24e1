//! JSON rendering of parse results.

use crate::error::{Error, Result};
use crate::model::Statement;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a parsed statement to JSON.
pub fn to_json(statement: &Statement, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(statement),
        JsonFormat::Compact => serde_json::to_string(statement),
    };

    result.map_err(|e| Error::Serialize(format!("JSON serialization error: {e}")))
}
