//! # Editing operations
//!
//! Pure functions from a document to a new document. None of them mutate
//! their input, and none of them fail: an unknown block id yields an
//! unchanged copy of the input.

use mailframe_document::{
    create_block, schema, Block, BlockId, BlockType, Document, Fields, GlobalStylesPatch,
    IdGenerator,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Stamp a block for `doc`, guaranteeing its id is not already used there
fn new_block(doc: &Document, block_type: BlockType, ids: &mut IdGenerator) -> Block {
    let mut block = create_block(block_type, ids);
    if doc.contains(&block.id) {
        block.id = ids.fresh_id(|id| doc.contains(id));
    }
    block
}

/// Insert a new block at `index` (clamped), or append when `None`
pub fn add_block(
    doc: &Document,
    block_type: BlockType,
    index: Option<usize>,
    ids: &mut IdGenerator,
) -> (Document, BlockId) {
    let block = new_block(doc, block_type, ids);
    let id = block.id.clone();

    let mut next = doc.clone();
    let at = index.map_or(next.blocks.len(), |i| i.min(next.blocks.len()));
    next.blocks.insert(at, block);

    debug!(block_id = %id, block_type = %block_type, index = at, "Added block");
    (next, id)
}

/// Swap a block with its neighbour
pub fn move_block(doc: &Document, id: &str, direction: Direction) -> Document {
    let mut next = doc.clone();
    let Some(from) = doc.position(id) else {
        return next;
    };

    let to = match direction {
        Direction::Up if from > 0 => from - 1,
        Direction::Down if from + 1 < doc.blocks.len() => from + 1,
        _ => return next,
    };

    next.blocks.swap(from, to);
    debug!(block_id = %id, from, to, "Moved block");
    next
}

/// Deep-copy a block under a new id, directly after the original
pub fn duplicate_block(
    doc: &Document,
    id: &str,
    ids: &mut IdGenerator,
) -> (Document, Option<BlockId>) {
    let Some(at) = doc.position(id) else {
        return (doc.clone(), None);
    };

    let original = &doc.blocks[at];
    let copy_id = ids.fresh_id(|candidate| doc.contains(candidate));
    let copy = Block {
        id: copy_id.clone(),
        ..original.clone()
    };

    let mut next = doc.clone();
    next.blocks.insert(at + 1, copy);

    debug!(block_id = %id, copy_id = %copy_id, "Duplicated block");
    (next, Some(copy_id))
}

pub fn delete_block(doc: &Document, id: &str) -> Document {
    let mut next = doc.clone();
    if let Some(at) = doc.position(id) {
        next.blocks.remove(at);
        debug!(block_id = %id, "Deleted block");
    }
    next
}

/// Which record of a block a partial update targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    Content,
    Styles,
}

impl Record {
    pub fn as_str(&self) -> &'static str {
        match self {
            Record::Content => "content",
            Record::Styles => "styles",
        }
    }
}

/// Keys of `partial` that the block's schema does not declare
pub fn unknown_fields<'a>(block_type: BlockType, record: Record, partial: &'a Fields) -> Vec<&'a str> {
    let declared = schema(block_type);
    let allowed = match record {
        Record::Content => &declared.content,
        Record::Styles => &declared.styles,
    };

    partial
        .keys()
        .filter(|key| !allowed.contains_key(key.as_str()))
        .map(String::as_str)
        .collect()
}

fn update_record(doc: &Document, id: &str, record: Record, partial: &Fields) -> Document {
    let mut next = doc.clone();
    let Some(block) = next.blocks.iter_mut().find(|b| b.id == id) else {
        return next;
    };

    let skipped = unknown_fields(block.block_type, record, partial);
    if !skipped.is_empty() {
        warn!(block_id = %id, record = record.as_str(), fields = ?skipped, "Ignoring fields outside the block schema");
    }

    let target = match record {
        Record::Content => &mut block.content,
        Record::Styles => &mut block.styles,
    };

    for (key, value) in partial {
        if !skipped.contains(&key.as_str()) {
            target.insert(key.clone(), value.clone());
        }
    }

    next
}

/// Shallow-merge into a block's content
pub fn update_block_content(doc: &Document, id: &str, partial: &Fields) -> Document {
    update_record(doc, id, Record::Content, partial)
}

/// Shallow-merge into a block's styles
pub fn update_block_styles(doc: &Document, id: &str, partial: &Fields) -> Document {
    update_record(doc, id, Record::Styles, partial)
}

pub fn update_global_styles(doc: &Document, patch: &GlobalStylesPatch) -> Document {
    Document {
        blocks: doc.blocks.clone(),
        global_styles: doc.global_styles.merged(patch),
    }
}
