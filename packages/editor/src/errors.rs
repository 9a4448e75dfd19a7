//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Document error: {0}")]
    Document(#[from] mailframe_document::DocumentError),

    #[error("Schema error: {0}")]
    Schema(#[from] mailframe_document::SchemaError),

    #[error("Cannot select unknown block: {0}")]
    UnknownSelection(String),
}
