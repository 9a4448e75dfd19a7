//! # Mailframe Document
//!
//! Data model for block-based message documents.
//!
//! ```text
//! registry: BlockType → default content/styles → Block
//!                     ↓
//! document: ordered Vec<Block> + GlobalStyles (pure data)
//! ```
//!
//! Blocks are only ever created through [`create_block`], which stamps a
//! fresh id from an [`IdGenerator`] and deep-copies the type's defaults.

mod block;
mod document;
mod error;
mod id_generator;
pub mod registry;

pub use block::{Block, BlockId, BlockType, Fields};
pub use document::{Document, GlobalStyles, GlobalStylesPatch};
pub use error::{DocumentError, SchemaError};
pub use id_generator::{session_seed, IdGenerator};
pub use registry::{create_block, schema, BlockSchema};
