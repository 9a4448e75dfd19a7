//! # Block Schema Registry
//!
//! Default `content` and `styles` records for every block type, and the
//! factory that stamps out new blocks from them.
//!
//! Color style fields left as `""` inherit a document-wide color:
//!
//! | Block        | Field             | Inherits          |
//! |--------------|-------------------|-------------------|
//! | header, text, footer, features, cta, testimonial | `textColor` | `textColor` |
//! | button       | `backgroundColor` | `primaryColor`    |
//! | hero         | `backgroundColor`, `buttonTextColor` | `primaryColor` |
//! | features, testimonial | `accentColor` | `primaryColor` |
//! | cta          | `buttonColor`     | `primaryColor`    |
//! | text, spacer, features | `backgroundColor` | transparent |

use crate::block::{Block, BlockType, Fields};
use crate::id_generator::IdGenerator;
use serde_json::{json, Value};
use tracing::debug;

/// Declared defaults for one block type
#[derive(Debug, Clone, PartialEq)]
pub struct BlockSchema {
    pub block_type: BlockType,
    pub label: &'static str,
    pub content: Fields,
    pub styles: Fields,
    /// Content fields that hold an asset address
    pub media_fields: &'static [&'static str],
}

impl BlockSchema {
    pub fn has_content_field(&self, key: &str) -> bool {
        self.content.contains_key(key)
    }

    pub fn has_style_field(&self, key: &str) -> bool {
        self.styles.contains_key(key)
    }

    pub fn is_media_field(&self, key: &str) -> bool {
        self.media_fields.contains(&key)
    }
}

fn record(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        _ => Fields::new(),
    }
}

/// Look up the schema for a block type
pub fn schema(block_type: BlockType) -> BlockSchema {
    let (label, content, styles) = match block_type {
        BlockType::Header => (
            "Header",
            json!({
                "title": "Your Company",
                "tagline": "",
                "logoUrl": "",
                "logoAlt": "Logo",
            }),
            json!({
                "backgroundColor": "#ffffff",
                "textColor": "",
                "fontSize": 24,
                "padding": 24,
                "alignment": "center",
                "logoWidth": 120,
            }),
        ),
        BlockType::Text => (
            "Text",
            json!({
                "text": "Write your message here.",
            }),
            json!({
                "backgroundColor": "",
                "textColor": "",
                "fontSize": 16,
                "lineHeight": 1.6,
                "padding": 16,
                "alignment": "left",
            }),
        ),
        BlockType::Image => (
            "Image",
            json!({
                "src": "",
                "alt": "",
                "link": "",
            }),
            json!({
                "width": 100,
                "borderRadius": 0,
                "padding": 16,
                "alignment": "center",
            }),
        ),
        BlockType::Button => (
            "Button",
            json!({
                "label": "Click here",
                "link": "#",
            }),
            json!({
                "backgroundColor": "",
                "textColor": "#ffffff",
                "fontSize": 16,
                "borderRadius": 4,
                "paddingX": 24,
                "paddingY": 12,
                "padding": 16,
                "alignment": "center",
            }),
        ),
        BlockType::Divider => (
            "Divider",
            json!({}),
            json!({
                "color": "#e5e7eb",
                "thickness": 1,
                "width": 100,
                "padding": 16,
            }),
        ),
        BlockType::Spacer => (
            "Spacer",
            json!({}),
            json!({
                "height": 32,
                "backgroundColor": "",
            }),
        ),
        BlockType::Footer => (
            "Footer",
            json!({
                "companyName": "Your Company",
                "address": "",
                "unsubscribeText": "Unsubscribe",
                "unsubscribeLink": "#",
            }),
            json!({
                "backgroundColor": "#f9fafb",
                "textColor": "#6b7280",
                "fontSize": 12,
                "padding": 24,
                "alignment": "center",
            }),
        ),
        BlockType::Hero => (
            "Hero",
            json!({
                "title": "Big news",
                "subtitle": "Tell your readers what is new.",
                "buttonLabel": "Learn more",
                "buttonLink": "#",
                "imageUrl": "",
            }),
            json!({
                "backgroundColor": "",
                "textColor": "#ffffff",
                "buttonColor": "#ffffff",
                "buttonTextColor": "",
                "padding": 48,
                "alignment": "center",
            }),
        ),
        BlockType::Social => (
            "Social links",
            json!({
                "links": [
                    { "platform": "facebook", "url": "#" },
                    { "platform": "twitter", "url": "#" },
                    { "platform": "instagram", "url": "#" },
                ],
            }),
            json!({
                "alignment": "center",
                "fontSize": 14,
                "spacing": 12,
                "padding": 16,
            }),
        ),
        BlockType::Features => (
            "Features",
            json!({
                "title": "Why readers love us",
                "items": [
                    { "title": "Fast", "description": "Set up in minutes." },
                    { "title": "Reliable", "description": "Delivered everywhere." },
                    { "title": "Simple", "description": "No code required." },
                ],
            }),
            json!({
                "backgroundColor": "",
                "textColor": "",
                "accentColor": "",
                "columns": 3,
                "padding": 24,
            }),
        ),
        BlockType::Cta => (
            "Call to action",
            json!({
                "title": "Ready to start?",
                "text": "Join thousands of happy readers today.",
                "buttonLabel": "Get started",
                "buttonLink": "#",
            }),
            json!({
                "backgroundColor": "#f3f4f6",
                "textColor": "",
                "buttonColor": "",
                "buttonTextColor": "#ffffff",
                "borderRadius": 8,
                "padding": 32,
                "alignment": "center",
            }),
        ),
        BlockType::Testimonial => (
            "Testimonial",
            json!({
                "quote": "This changed how we talk to our customers.",
                "author": "Jane Doe",
                "role": "Head of Marketing",
                "avatarUrl": "",
            }),
            json!({
                "backgroundColor": "#ffffff",
                "textColor": "",
                "accentColor": "",
                "fontSize": 18,
                "padding": 32,
                "alignment": "center",
            }),
        ),
    };

    BlockSchema {
        block_type,
        label,
        content: record(content),
        styles: record(styles),
        media_fields: media_fields(block_type),
    }
}

fn media_fields(block_type: BlockType) -> &'static [&'static str] {
    match block_type {
        BlockType::Header => &["logoUrl"],
        BlockType::Image => &["src"],
        BlockType::Hero => &["imageUrl"],
        BlockType::Testimonial => &["avatarUrl"],
        _ => &[],
    }
}

/// Create a new block with a fresh id and the type's default fields
pub fn create_block(block_type: BlockType, ids: &mut IdGenerator) -> Block {
    let BlockSchema { content, styles, .. } = schema(block_type);
    let id = ids.new_id();
    debug!(block_id = %id, block_type = %block_type, "Created block");

    Block {
        id,
        block_type,
        content,
        styles,
    }
}

/// Fill in any schema keys the block is missing. Returns true if anything changed.
pub fn normalize_block(block: &mut Block) -> bool {
    let defaults = schema(block.block_type);
    let mut changed = false;

    for (target, source) in [
        (&mut block.content, defaults.content),
        (&mut block.styles, defaults.styles),
    ] {
        for (key, value) in source {
            if !target.contains_key(&key) {
                target.insert(key, value);
                changed = true;
            }
        }
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn keys(fields: &Fields) -> BTreeSet<&str> {
        fields.keys().map(|k| k.as_str()).collect()
    }

    #[test]
    fn test_created_blocks_match_schema_key_sets() {
        let mut ids = IdGenerator::from_seed("t");

        for ty in BlockType::ALL {
            let block = create_block(ty, &mut ids);
            let declared = schema(ty);

            assert_eq!(block.block_type, ty);
            assert_eq!(keys(&block.content), keys(&declared.content), "{} content", ty);
            assert_eq!(keys(&block.styles), keys(&declared.styles), "{} styles", ty);
        }
    }

    #[test]
    fn test_created_blocks_get_distinct_ids() {
        let mut ids = IdGenerator::from_seed("t");
        let a = create_block(BlockType::Text, &mut ids);
        let b = create_block(BlockType::Text, &mut ids);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_defaults_are_deep_copied() {
        let mut ids = IdGenerator::from_seed("t");
        let mut first = create_block(BlockType::Social, &mut ids);
        first.content.insert("links".to_string(), json!([]));

        let second = create_block(BlockType::Social, &mut ids);
        assert_eq!(second.content["links"].as_array().map(|l| l.len()), Some(3));
    }

    #[test]
    fn test_image_defaults_to_empty_source() {
        let image = schema(BlockType::Image);
        assert_eq!(image.content["src"], "");
        assert!(image.is_media_field("src"));
        assert!(!image.is_media_field("alt"));
    }

    #[test]
    fn test_media_fields_exist_in_content() {
        for ty in BlockType::ALL {
            let s = schema(ty);
            for field in s.media_fields {
                assert!(s.has_content_field(field), "{} declares unknown media field {}", ty, field);
            }
        }
    }

    #[test]
    fn test_normalize_fills_missing_keys() {
        let mut block = Block {
            id: "b".to_string(),
            block_type: BlockType::Button,
            content: record(json!({ "label": "Buy" })),
            styles: Fields::new(),
        };

        assert!(normalize_block(&mut block));
        assert_eq!(block.content["label"], "Buy");
        assert_eq!(block.content["link"], "#");
        assert_eq!(keys(&block.styles), keys(&schema(BlockType::Button).styles));
        assert!(!normalize_block(&mut block));
    }
}
