//! # Mailframe Layout
//!
//! Lowers a [`Document`](mailframe_document::Document) into markup trees.
//! This is the one place block geometry is decided; the HTML compiler
//! prints these trees and the preview renderer decorates them.
//!
//! ```text
//! Document ──lower_document──► LayoutDocument { canvas, fragments }
//!                                   │                 │
//!                          compiler-html          preview
//!                        (email markup)      (interactive view)
//! ```

mod blocks;
mod fields;
mod lower;
mod node;
pub mod rules;

pub use blocks::lower_block;
pub use fields::{format_number, px, FieldReader};
pub use lower::{lower_document, Canvas, Fragment, LayoutDocument};
pub use node::Node;
pub use rules::Align;
