//! # Mailframe Workspace
//!
//! The boundary between the editor and the outside world: design
//! persistence, the media library and the [`Studio`] that drives an edit
//! session against both.

mod error;
pub mod media;
mod notification;
pub mod store;
mod studio;

pub use error::{MediaError, StoreError, StudioError, ValidationError};
pub use media::{Asset, AssetKind, AssetPicker, ManifestMediaLibrary, MediaLibrary, StaticMediaLibrary};
pub use notification::{Level, Notification, RequestTicket};
pub use store::{
    slugify, validate_slug, DesignStore, FileDesignStore, MemoryDesignStore, SaveRequest, SavedDesign,
};
pub use studio::{DesignMeta, Studio};
