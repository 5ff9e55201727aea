//! JSON snapshot codec.
//!
//! The snapshot is a JSON array of thought entries. Reads accept every
//! historical entry shape; writes always emit the current one.

use crate::model::raw_thought::{to_stored, RawThought};
use crate::model::thought::Thought;
use crate::storage::StorageResult;

/// Decodes snapshot text. Blank text is treated as an absent slot.
pub fn decode_snapshot(text: &str) -> StorageResult<Vec<RawThought>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(text)?)
}

/// Encodes the full collection in the current wire shape.
pub fn encode_snapshot(thoughts: &[Thought]) -> StorageResult<String> {
    Ok(serde_json::to_string(&to_stored(thoughts))?)
}
