use crate::blocks::lower_block;
use crate::node::Node;
use mailframe_document::{BlockId, BlockType, Document, GlobalStyles};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Document-level frame both renderers draw blocks into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Canvas {
    pub width: u32,
    pub background_color: String,
    pub font_family: String,
    pub text_color: String,
}

impl Canvas {
    pub fn from_globals(globals: &GlobalStyles) -> Self {
        Self {
            width: globals.content_width,
            background_color: globals.background_color.clone(),
            font_family: globals.font_family.clone(),
            text_color: globals.text_color.clone(),
        }
    }
}

/// Lowered form of one block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fragment {
    pub block_id: BlockId,
    pub block_type: BlockType,
    /// `None` when the block has nothing to show
    pub node: Option<Node>,
}

/// A whole document lowered to markup trees, in block order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDocument {
    pub canvas: Canvas,
    pub fragments: Vec<Fragment>,
}

impl LayoutDocument {
    /// Fragments that produce markup
    pub fn visible(&self) -> impl Iterator<Item = &Node> {
        self.fragments.iter().filter_map(|f| f.node.as_ref())
    }
}

/// Lower every block of a document
#[instrument(skip(doc), fields(blocks = doc.blocks.len()))]
pub fn lower_document(doc: &Document) -> LayoutDocument {
    let fragments: Vec<Fragment> = doc
        .blocks
        .iter()
        .map(|block| {
            let node = lower_block(block, &doc.global_styles);
            if node.is_none() {
                debug!(block_id = %block.id, block_type = %block.block_type, "Block lowered to nothing");
            }
            Fragment {
                block_id: block.id.clone(),
                block_type: block.block_type,
                node,
            }
        })
        .collect();

    LayoutDocument {
        canvas: Canvas::from_globals(&doc.global_styles),
        fragments,
    }
}
