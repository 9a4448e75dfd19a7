//! # Mailframe Editor
//!
//! Editing operations over block documents.
//!
//! ```text
//! Mutation ──validate──► MutationError (reported, document untouched)
//!     │
//!     └──apply──► operations::* (pure, copy-on-write) ──► next Document
//!                                                          │
//!                     EditSession: version, selection ◄────┘
//! ```

mod errors;
pub mod media;
mod mutations;
pub mod operations;
mod session;

pub use errors::EditorError;
pub use media::{bind_media, media_slots, MediaSlot};
pub use mutations::{Applied, Mutation, MutationError};
pub use operations::{
    add_block, delete_block, duplicate_block, move_block, update_block_content,
    update_block_styles, update_global_styles, Direction,
};
pub use session::{EditSession, MutationResult};
