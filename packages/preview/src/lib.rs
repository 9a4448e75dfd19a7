//! # Mailframe Preview
//!
//! Interactive rendering of a block document for an editor canvas.
//!
//! ```text
//! Document ──lower_document──► fragments ──► block wrappers + toolbars
//!                                              (data-chrome nodes)
//! ```
//!
//! The content inside each wrapper is exactly what the HTML compiler
//! prints, so stripping chrome from a [`PreviewView`] yields the compiled
//! message's rows.

mod controls;
mod renderer;
mod view;

pub use controls::{Control, ControlError};
pub use renderer::render_preview;
pub use view::{is_chrome, ControlState, PreviewBlock, PreviewView, BLOCK_ID_ATTR, CHROME_ATTR};
