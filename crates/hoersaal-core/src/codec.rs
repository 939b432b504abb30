//! Field codec for the `tags` and `wichtig` columns.
//!
//! Both columns hold an ordered list of strings stored as a compact JSON
//! array (`["a","b"]`), the format the importer has always written. An empty
//! or absent column, or a JSON `null`, decodes to an empty list; anything else
//! must be a JSON array of strings.

use thiserror::Error;

/// A stored value that is not a JSON array of strings.
#[derive(Debug, Error)]
#[error("malformed encoded array {raw:?}: {source}")]
pub struct DecodeError {
  pub raw:    String,
  #[source]
  pub source: serde_json::Error,
}

/// Encode `values` as a JSON array, preserving order.
///
/// Non-ASCII text is written as-is rather than `\u` escaped.
pub fn encode(values: &[String]) -> String {
  // Serialising a slice of strings cannot fail.
  serde_json::to_string(values).unwrap_or_else(|_| "[]".to_owned())
}

/// Decode a stored column value into its ordered list of strings.
///
/// A JSON `null` counts as absent; older imports wrote one for metadata
/// files that carried `"tags": null`.
pub fn decode(raw: &str) -> Result<Vec<String>, DecodeError> {
  if raw.trim().is_empty() {
    return Ok(Vec::new());
  }
  serde_json::from_str::<Option<Vec<String>>>(raw)
    .map(Option::unwrap_or_default)
    .map_err(|source| DecodeError {
      raw: raw.to_owned(),
      source,
    })
}
