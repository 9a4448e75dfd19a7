//! # Block Mutations
//!
//! Named editing operations, serializable so a front end can send them
//! over the wire and the session can replay them.
//!
//! ## Mutation Semantics
//!
//! - `validate` reports what would make a mutation meaningless against a
//!   given document (unknown block, field outside the schema, media bound
//!   to a plain field) without touching it.
//! - `apply` never fails. It delegates to the pure operations, which treat
//!   an unknown id as a no-op.

use crate::media::bind_media;
use crate::operations::{self, unknown_fields, Direction, Record};
use mailframe_document::{
    schema, BlockId, BlockType, Document, Fields, GlobalStylesPatch, IdGenerator,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic editing operations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mutation {
    /// Insert a new block from the registry defaults
    AddBlock {
        block_type: BlockType,
        #[serde(default)]
        index: Option<usize>,
    },

    MoveBlock {
        block_id: BlockId,
        direction: Direction,
    },

    DuplicateBlock {
        block_id: BlockId,
    },

    DeleteBlock {
        block_id: BlockId,
    },

    /// Shallow-merge into the block's content
    UpdateContent {
        block_id: BlockId,
        content: Fields,
    },

    /// Shallow-merge into the block's styles
    UpdateStyles {
        block_id: BlockId,
        styles: Fields,
    },

    UpdateGlobalStyles {
        styles: GlobalStylesPatch,
    },

    /// Point a media field at an asset address
    BindMedia {
        block_id: BlockId,
        field: String,
        url: String,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Block not found: {0}")]
    BlockNotFound(String),

    #[error("Unknown {record} field `{field}` for {block_type} block")]
    UnknownField {
        block_type: BlockType,
        record: &'static str,
        field: String,
    },

    #[error("Field `{field}` of {block_type} block does not accept media")]
    FieldNotBindable { block_type: BlockType, field: String },

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// What applying a mutation produced
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub document: Document,
    /// Id of a block the mutation created, if any
    pub created: Option<BlockId>,
}

impl Applied {
    fn unchanged(document: Document) -> Self {
        Self {
            document,
            created: None,
        }
    }
}

impl Mutation {
    /// Block this mutation addresses, if any
    pub fn target(&self) -> Option<&str> {
        match self {
            Mutation::MoveBlock { block_id, .. }
            | Mutation::DuplicateBlock { block_id }
            | Mutation::DeleteBlock { block_id }
            | Mutation::UpdateContent { block_id, .. }
            | Mutation::UpdateStyles { block_id, .. }
            | Mutation::BindMedia { block_id, .. } => Some(block_id),
            Mutation::AddBlock { .. } | Mutation::UpdateGlobalStyles { .. } => None,
        }
    }

    /// Check that the mutation means something for `doc`
    pub fn validate(&self, doc: &Document) -> Result<(), MutationError> {
        if let Mutation::UpdateGlobalStyles { styles } = self {
            if styles.content_width == Some(0) {
                return Err(MutationError::InvalidValue("contentWidth must be positive".to_string()));
            }
            return Ok(());
        }

        let Some(id) = self.target() else {
            return Ok(());
        };
        let block = doc
            .find_block(id)
            .ok_or_else(|| MutationError::BlockNotFound(id.to_string()))?;

        match self {
            Mutation::UpdateContent { content, .. } => {
                check_fields(block.block_type, Record::Content, content)
            }
            Mutation::UpdateStyles { styles, .. } => {
                check_fields(block.block_type, Record::Styles, styles)
            }
            Mutation::BindMedia { field, .. } => {
                if schema(block.block_type).is_media_field(field) {
                    Ok(())
                } else {
                    Err(MutationError::FieldNotBindable {
                        block_type: block.block_type,
                        field: field.clone(),
                    })
                }
            }
            _ => Ok(()),
        }
    }

    /// Apply to `doc`, returning the next snapshot
    pub fn apply(&self, doc: &Document, ids: &mut IdGenerator) -> Applied {
        match self {
            Mutation::AddBlock { block_type, index } => {
                let (document, id) = operations::add_block(doc, *block_type, *index, ids);
                Applied {
                    document,
                    created: Some(id),
                }
            }
            Mutation::MoveBlock { block_id, direction } => {
                Applied::unchanged(operations::move_block(doc, block_id, *direction))
            }
            Mutation::DuplicateBlock { block_id } => {
                let (document, created) = operations::duplicate_block(doc, block_id, ids);
                Applied { document, created }
            }
            Mutation::DeleteBlock { block_id } => {
                Applied::unchanged(operations::delete_block(doc, block_id))
            }
            Mutation::UpdateContent { block_id, content } => {
                Applied::unchanged(operations::update_block_content(doc, block_id, content))
            }
            Mutation::UpdateStyles { block_id, styles } => {
                Applied::unchanged(operations::update_block_styles(doc, block_id, styles))
            }
            Mutation::UpdateGlobalStyles { styles } => {
                Applied::unchanged(operations::update_global_styles(doc, styles))
            }
            Mutation::BindMedia { block_id, field, url } => {
                Applied::unchanged(bind_media(doc, block_id, field, url))
            }
        }
    }
}

fn check_fields(block_type: BlockType, record: Record, partial: &Fields) -> Result<(), MutationError> {
    match unknown_fields(block_type, record, partial).first() {
        Some(field) => Err(MutationError::UnknownField {
            block_type,
            record: record.as_str(),
            field: (*field).to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc_with_text() -> (Document, IdGenerator, BlockId) {
        let mut ids = IdGenerator::from_seed("mut");
        let (doc, id) = operations::add_block(&Document::new(), BlockType::Text, None, &mut ids);
        (doc, ids, id)
    }

    #[test]
    fn test_serde_shape() {
        let mutation = Mutation::MoveBlock {
            block_id: "a-1".to_string(),
            direction: Direction::Up,
        };
        let json = serde_json::to_value(&mutation).unwrap();
        assert_eq!(json, json!({ "kind": "move_block", "block_id": "a-1", "direction": "up" }));

        let parsed: Mutation =
            serde_json::from_value(json!({ "kind": "add_block", "block_type": "hero" })).unwrap();
        assert_eq!(
            parsed,
            Mutation::AddBlock {
                block_type: BlockType::Hero,
                index: None
            }
        );
    }

    #[test]
    fn test_validate_unknown_block() {
        let (doc, _, _) = doc_with_text();
        let mutation = Mutation::DeleteBlock {
            block_id: "nope".to_string(),
        };
        assert_eq!(mutation.validate(&doc), Err(MutationError::BlockNotFound("nope".to_string())));
    }

    #[test]
    fn test_validate_unknown_field() {
        let (doc, _, id) = doc_with_text();
        let mutation = Mutation::UpdateContent {
            block_id: id,
            content: json!({ "headline": "x" }).as_object().cloned().unwrap(),
        };

        match mutation.validate(&doc) {
            Err(MutationError::UnknownField { field, record, .. }) => {
                assert_eq!(field, "headline");
                assert_eq!(record, "content");
            }
            other => panic!("Expected UnknownField, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_bind_media_on_plain_field() {
        let (doc, _, id) = doc_with_text();
        let mutation = Mutation::BindMedia {
            block_id: id,
            field: "text".to_string(),
            url: "https://cdn.test/a.png".to_string(),
        };
        assert!(matches!(mutation.validate(&doc), Err(MutationError::FieldNotBindable { .. })));
    }

    #[test]
    fn test_validate_zero_content_width() {
        let (doc, _, _) = doc_with_text();
        let mutation = Mutation::UpdateGlobalStyles {
            styles: GlobalStylesPatch {
                content_width: Some(0),
                ..Default::default()
            },
        };
        assert!(matches!(mutation.validate(&doc), Err(MutationError::InvalidValue(_))));
    }

    #[test]
    fn test_apply_reports_created_ids() {
        let (doc, mut ids, id) = doc_with_text();

        let applied = Mutation::DuplicateBlock { block_id: id.clone() }.apply(&doc, &mut ids);
        let copy = applied.created.unwrap();
        assert_ne!(copy, id);
        assert_eq!(applied.document.position(&copy), Some(1));

        let applied = Mutation::DeleteBlock { block_id: id }.apply(&doc, &mut ids);
        assert!(applied.created.is_none());
        assert!(applied.document.is_empty());
    }
}
