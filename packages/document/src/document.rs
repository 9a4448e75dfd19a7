//! # Document
//!
//! A message document: the ordered block sequence plus document-wide style
//! defaults. Documents are plain values. Editing produces a new document
//! rather than mutating one in place, so the compiler and the preview
//! always read an immutable snapshot.
//!
//! ## Export format
//!
//! ```json
//! {
//!   "blocks": [{ "id": "...", "type": "text", "content": {...}, "styles": {...} }],
//!   "globalStyles": { "backgroundColor": "#f4f4f5", "contentWidth": 600, ... }
//! }
//! ```

use crate::block::Block;
use crate::error::DocumentError;
use crate::registry::normalize_block;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Document-wide presentation defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalStyles {
    pub background_color: String,
    /// Width of the content column in pixels
    pub content_width: u32,
    pub font_family: String,
    pub primary_color: String,
    pub text_color: String,
    pub link_color: String,
}

impl Default for GlobalStyles {
    fn default() -> Self {
        Self {
            background_color: "#f4f4f5".to_string(),
            content_width: 600,
            font_family: "Arial, Helvetica, sans-serif".to_string(),
            primary_color: "#2563eb".to_string(),
            text_color: "#1f2937".to_string(),
            link_color: "#2563eb".to_string(),
        }
    }
}

/// Partial update for [`GlobalStyles`]; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalStylesPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_color: Option<String>,
}

impl GlobalStyles {
    /// Shallow-merge a patch, returning the merged record
    pub fn merged(&self, patch: &GlobalStylesPatch) -> GlobalStyles {
        let pick = |new: &Option<String>, old: &String| new.clone().unwrap_or_else(|| old.clone());

        GlobalStyles {
            background_color: pick(&patch.background_color, &self.background_color),
            content_width: patch.content_width.unwrap_or(self.content_width),
            font_family: pick(&patch.font_family, &self.font_family),
            primary_color: pick(&patch.primary_color, &self.primary_color),
            text_color: pick(&patch.text_color, &self.text_color),
            link_color: pick(&patch.link_color, &self.link_color),
        }
    }
}

/// Ordered blocks plus global styles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub blocks: Vec<Block>,

    #[serde(default)]
    pub global_styles: GlobalStyles,
}

impl Document {
    /// Empty document with default global styles
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_global_styles(global_styles: GlobalStyles) -> Self {
        Self {
            blocks: Vec::new(),
            global_styles,
        }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn find_block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn block_ids(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().map(|b| b.id.as_str())
    }

    /// Serialize to the canonical JSON interchange format
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a document, rejecting duplicate ids and filling in any schema
    /// fields the stored blocks are missing
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let mut doc: Document = serde_json::from_str(json)?;

        let mut seen = HashSet::new();
        for block in &doc.blocks {
            if !seen.insert(block.id.as_str()) {
                return Err(DocumentError::DuplicateBlockId(block.id.clone()));
            }
        }

        for block in &mut doc.blocks {
            if normalize_block(block) {
                warn!(block_id = %block.id, block_type = %block.block_type, "Filled missing schema fields");
            }
        }

        debug!(blocks = doc.blocks.len(), "Loaded document");
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockType;
    use crate::id_generator::IdGenerator;
    use crate::registry::create_block;

    #[test]
    fn test_new_document_is_empty_with_defaults() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.global_styles.content_width, 600);
        assert_eq!(doc.global_styles.primary_color, "#2563eb");
    }

    #[test]
    fn test_json_round_trip_is_lossless() {
        let mut ids = IdGenerator::from_seed("doc");
        let mut doc = Document::new();
        doc.blocks.push(create_block(BlockType::Hero, &mut ids));
        doc.blocks.push(create_block(BlockType::Social, &mut ids));

        let json = doc.to_json().unwrap();
        assert!(json.contains("\"globalStyles\""));
        assert!(json.contains("\"contentWidth\":600"));

        let loaded = Document::from_json(&json).unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_from_json_rejects_duplicate_ids() {
        let json = r#"{
            "blocks": [
                { "id": "a", "type": "text" },
                { "id": "a", "type": "spacer" }
            ]
        }"#;

        match Document::from_json(json) {
            Err(DocumentError::DuplicateBlockId(id)) => assert_eq!(id, "a"),
            other => panic!("expected duplicate id error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json_fills_missing_fields_and_globals() {
        let json = r#"{ "blocks": [ { "id": "a", "type": "text", "content": { "text": "Hi" } } ] }"#;
        let doc = Document::from_json(json).unwrap();

        let block = doc.find_block("a").unwrap();
        assert_eq!(block.content["text"], "Hi");
        assert_eq!(block.styles["fontSize"], 16);
        assert_eq!(doc.global_styles, GlobalStyles::default());
    }

    #[test]
    fn test_from_json_rejects_unknown_block_type() {
        let json = r#"{ "blocks": [ { "id": "a", "type": "carousel" } ] }"#;
        assert!(matches!(Document::from_json(json), Err(DocumentError::Json(_))));
    }

    #[test]
    fn test_global_styles_merge_is_shallow() {
        let styles = GlobalStyles::default();
        let patch = GlobalStylesPatch {
            primary_color: Some("#ff0000".to_string()),
            content_width: Some(640),
            ..Default::default()
        };

        let merged = styles.merged(&patch);
        assert_eq!(merged.primary_color, "#ff0000");
        assert_eq!(merged.content_width, 640);
        assert_eq!(merged.text_color, styles.text_color);
        assert_eq!(merged.font_family, styles.font_family);
    }

    #[test]
    fn test_find_and_position() {
        let mut ids = IdGenerator::from_seed("doc");
        let mut doc = Document::new();
        let a = create_block(BlockType::Text, &mut ids);
        let b = create_block(BlockType::Image, &mut ids);
        doc.blocks = vec![a.clone(), b.clone()];

        assert_eq!(doc.position(&b.id), Some(1));
        assert_eq!(doc.find_block(&a.id).map(|blk| blk.block_type), Some(BlockType::Text));
        assert!(!doc.contains("missing"));
    }
}
