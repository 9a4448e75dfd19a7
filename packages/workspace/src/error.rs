use thiserror::Error;

/// Save metadata problems, caught before any I/O
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Design name is required")]
    MissingName,

    #[error("Design slug is required")]
    MissingSlug,

    #[error("Invalid slug `{0}`: use lowercase letters, digits and single dashes")]
    InvalidSlug(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed design record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Design not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed asset manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Asset not found: {0}")]
    AssetNotFound(String),
}

#[derive(Debug, Error)]
pub enum StudioError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    #[error("Editor error: {0}")]
    Editor(#[from] mailframe_editor::EditorError),

    #[error("Document error: {0}")]
    Document(#[from] mailframe_document::DocumentError),

    #[error(transparent)]
    Control(#[from] mailframe_preview::ControlError),
}
