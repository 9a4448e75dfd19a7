//! Error types for the document model

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),
}

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Invalid design JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate block id: {0}")]
    DuplicateBlockId(String),
}
