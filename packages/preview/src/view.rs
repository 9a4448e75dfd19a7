use crate::controls::Control;
use mailframe_document::{BlockId, BlockType};
use mailframe_layout::Node;
use serde::{Deserialize, Serialize};

/// Attribute marking editor-only nodes
pub const CHROME_ATTR: &str = "data-chrome";
pub const BLOCK_ID_ATTR: &str = "data-block-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlState {
    pub control: Control,
    pub enabled: bool,
}

/// Per-block summary for a front end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewBlock {
    pub block_id: BlockId,
    pub block_type: BlockType,
    pub index: usize,
    pub selected: bool,
    /// The block renders nothing in the compiled message
    pub empty: bool,
    pub controls: Vec<ControlState>,
}

/// Interactive rendering of a whole document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewView {
    pub canvas: Node,
    pub blocks: Vec<PreviewBlock>,
}

impl PreviewView {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn selected(&self) -> Option<&PreviewBlock> {
        self.blocks.iter().find(|b| b.selected)
    }

    /// Block wrappers in document order
    pub fn wrappers(&self) -> Vec<&Node> {
        let mut found = Vec::new();
        collect_wrappers(&self.canvas, &mut found);
        found
    }

    /// The block content with every chrome node removed
    pub fn content_fragments(&self) -> Vec<Node> {
        self.wrappers()
            .into_iter()
            .flat_map(|wrapper| wrapper.children().iter().filter(|child| !is_chrome(child)).cloned())
            .collect()
    }
}

pub fn is_chrome(node: &Node) -> bool {
    node.attr(CHROME_ATTR).is_some()
}

fn collect_wrappers<'a>(node: &'a Node, found: &mut Vec<&'a Node>) {
    if node.attr(BLOCK_ID_ATTR).is_some() && node.key().is_some() {
        found.push(node);
        return;
    }
    for child in node.children() {
        collect_wrappers(child, found);
    }
}
