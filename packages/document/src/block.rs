//! # Blocks
//!
//! A block is one typed, styled unit of a message document. The set of
//! block types is closed; `content` and `styles` are key-ordered records
//! whose key set is fixed by the type's schema (see [`crate::registry`]).

use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque block identifier, unique within a document
pub type BlockId = String;

/// Key-ordered record of block fields
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// The closed set of block variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Header,
    Text,
    Image,
    Button,
    Divider,
    Spacer,
    Footer,
    Hero,
    Social,
    Features,
    Cta,
    Testimonial,
}

impl BlockType {
    /// Every variant, in palette order
    pub const ALL: [BlockType; 12] = [
        BlockType::Header,
        BlockType::Text,
        BlockType::Image,
        BlockType::Button,
        BlockType::Divider,
        BlockType::Spacer,
        BlockType::Footer,
        BlockType::Hero,
        BlockType::Social,
        BlockType::Features,
        BlockType::Cta,
        BlockType::Testimonial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Header => "header",
            BlockType::Text => "text",
            BlockType::Image => "image",
            BlockType::Button => "button",
            BlockType::Divider => "divider",
            BlockType::Spacer => "spacer",
            BlockType::Footer => "footer",
            BlockType::Hero => "hero",
            BlockType::Social => "social",
            BlockType::Features => "features",
            BlockType::Cta => "cta",
            BlockType::Testimonial => "testimonial",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        BlockType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == needle)
            .ok_or_else(|| SchemaError::UnknownBlockType(s.to_string()))
    }
}

/// A single block in a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,

    #[serde(rename = "type")]
    pub block_type: BlockType,

    #[serde(default)]
    pub content: Fields,

    #[serde(default)]
    pub styles: Fields,
}
