//! Binding library assets into media slots of blocks.

use mailframe_document::{schema, BlockId, Document};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// A content field that accepts an asset address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaSlot {
    pub block_id: BlockId,
    pub field: String,
    pub bound: bool,
}

/// Every media slot in document order
pub fn media_slots(doc: &Document) -> Vec<MediaSlot> {
    doc.blocks
        .iter()
        .flat_map(|block| {
            schema(block.block_type).media_fields.iter().map(move |field| MediaSlot {
                block_id: block.id.clone(),
                field: (*field).to_string(),
                bound: block
                    .content
                    .get(*field)
                    .and_then(Value::as_str)
                    .is_some_and(|url| !url.trim().is_empty()),
            })
        })
        .collect()
}

/// Set a media field of a block to an asset address
///
/// No-op when the block is unknown or `field` is not one of the block's
/// media fields.
pub fn bind_media(doc: &Document, id: &str, field: &str, address: &str) -> Document {
    let mut next = doc.clone();
    let Some(block) = next.blocks.iter_mut().find(|b| b.id == id) else {
        return next;
    };

    if !schema(block.block_type).is_media_field(field) {
        warn!(block_id = %id, block_type = %block.block_type, field, "Field does not accept media");
        return next;
    }

    block.content.insert(field.to_string(), Value::String(address.to_string()));
    debug!(block_id = %id, field, address, "Bound media");
    next
}
