//! # Mailframe HTML Compiler
//!
//! Compiles a block document into email-client-safe HTML: nested
//! presentation tables, every style inlined, no `<style>` block.
//!
//! Block geometry comes from `mailframe-layout`; this crate only wraps the
//! lowered fragments in the message scaffold and prints the tree.

mod compiler;


pub use compiler::{compile, compile_to_html, escape_html, render_node, CompileOptions};
