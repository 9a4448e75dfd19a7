//! Per-variant lowering of blocks into table-based fragments.
//!
//! Every fragment has the same outer shape:
//!
//! ```text
//! table[role=presentation, width=100%]
//!   tr
//!     td  ← container cell, styled by the box rules
//!       ...variant content
//! ```
//!
//! A renderer returns `None` when the block has nothing worth showing
//! (e.g. a social block with no links), so no stray padding is emitted.

mod actions;
mod media;
mod structure;
mod text;

use crate::fields::{format_number, px, FieldReader};
use crate::node::Node;
use crate::rules::{apply_rules, container_rules, horizontal_padding, Align};
use mailframe_document::{Block, BlockType, GlobalStyles};

/// Everything a renderer may read
pub(crate) struct BlockContext<'a> {
    pub block: &'a Block,
    pub content: FieldReader<'a>,
    pub styles: FieldReader<'a>,
    pub globals: &'a GlobalStyles,
    /// Content width minus the container's horizontal padding
    pub inner_width: u32,
}

impl<'a> BlockContext<'a> {
    fn new(block: &'a Block, globals: &'a GlobalStyles) -> Self {
        let styles = FieldReader::new(&block.styles);
        let inner_width = globals
            .content_width
            .saturating_sub(horizontal_padding(block.block_type, &styles));

        Self {
            block,
            content: FieldReader::new(&block.content),
            styles,
            globals,
            inner_width,
        }
    }

    /// Wrap content in the standard fragment table
    fn fragment(&self, children: Vec<Node>) -> Node {
        let cell = apply_rules(
            Node::element("td"),
            container_rules(self.block.block_type),
            &self.styles,
            self.globals,
        )
        .with_style("font-family", self.globals.font_family.clone())
        .with_children(children);

        presentation_table()
            .with_attr("width", "100%")
            .with_child(Node::element("tr").with_child(cell))
    }
}

/// Lower one block into its fragment
pub fn lower_block(block: &Block, globals: &GlobalStyles) -> Option<Node> {
    let ctx = BlockContext::new(block, globals);

    match block.block_type {
        BlockType::Header => text::header(&ctx),
        BlockType::Text => text::text(&ctx),
        BlockType::Footer => text::footer(&ctx),
        BlockType::Image => media::image(&ctx),
        BlockType::Hero => media::hero(&ctx),
        BlockType::Testimonial => media::testimonial(&ctx),
        BlockType::Button => actions::button(&ctx),
        BlockType::Cta => actions::cta(&ctx),
        BlockType::Social => actions::social(&ctx),
        BlockType::Divider => structure::divider(&ctx),
        BlockType::Spacer => structure::spacer(&ctx),
        BlockType::Features => structure::features(&ctx),
    }
}

pub(crate) fn presentation_table() -> Node {
    Node::element("table")
        .with_attr("role", "presentation")
        .with_attr("cellpadding", "0")
        .with_attr("cellspacing", "0")
        .with_attr("border", "0")
}

/// Text with `\n` turned into line breaks
pub(crate) fn multiline(text: &str) -> Vec<Node> {
    let mut nodes = Vec::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            nodes.push(Node::element("br"));
        }
        if !line.is_empty() {
            nodes.push(Node::text(line));
        }
    }
    nodes
}

pub(crate) struct TextStyle<'a> {
    pub size: u32,
    pub color: &'a str,
    pub line_height: f64,
    pub margin: &'a str,
}

pub(crate) fn styled_text(tag: &str, text: &str, style: &TextStyle<'_>) -> Node {
    Node::element(tag)
        .with_style("margin", style.margin)
        .with_style("font-size", px(style.size))
        .with_style("line-height", format_number(style.line_height))
        .with_style("color", style.color)
        .with_children(multiline(text))
}

pub(crate) fn heading(tag: &str, text: &str, size: u32, color: &str, margin: &str) -> Node {
    styled_text(
        tag,
        text,
        &TextStyle {
            size,
            color,
            line_height: 1.3,
            margin,
        },
    )
    .with_style("font-weight", "bold")
}

pub(crate) fn link(href: &str, label: &str, color: &str) -> Node {
    Node::element("a")
        .with_attr("href", href)
        .with_attr("target", "_blank")
        .with_style("color", color)
        .with_style("text-decoration", "underline")
        .with_child(Node::text(label))
}

pub(crate) struct ButtonSpec<'a> {
    pub label: &'a str,
    pub href: &'a str,
    pub background: &'a str,
    pub color: &'a str,
    pub radius: u32,
    pub font_size: u32,
    pub padding_x: u32,
    pub padding_y: u32,
    pub align: Align,
}

/// Table-wrapped link that renders as a button in every client
pub(crate) fn button(spec: &ButtonSpec<'_>) -> Node {
    let anchor = Node::element("a")
        .with_attr("href", spec.href)
        .with_attr("target", "_blank")
        .with_style("display", "inline-block")
        .with_style("padding", format!("{} {}", px(spec.padding_y), px(spec.padding_x)))
        .with_style("color", spec.color)
        .with_style("font-size", px(spec.font_size))
        .with_style("font-weight", "bold")
        .with_style("text-decoration", "none")
        .with_style("border-radius", px(spec.radius))
        .with_child(Node::text(spec.label));

    let cell = Node::element("td")
        .with_attr("bgcolor", spec.background)
        .with_style("background-color", spec.background)
        .with_style("border-radius", px(spec.radius))
        .with_child(anchor);

    let table = presentation_table()
        .with_attr("align", spec.align.as_str())
        .with_child(Node::element("tr").with_child(cell));

    match spec.align {
        Align::Center => table.with_style("margin", "0 auto"),
        _ => table,
    }
}

pub(crate) fn image(src: &str, alt: &str, width: u32, align: Align, radius: &str) -> Node {
    let img = Node::element("img")
        .with_attr("src", src)
        .with_attr("alt", alt)
        .with_attr("width", width.to_string())
        .with_style("display", "block")
        .with_style("border", "0")
        .with_style("outline", "none")
        .with_style("height", "auto")
        .with_style("max-width", "100%")
        .with_style("width", px(width))
        .with_style("border-radius", radius);

    match align {
        Align::Center => img.with_style("margin", "0 auto"),
        Align::Right => img.with_style("margin", "0 0 0 auto"),
        Align::Left => img,
    }
}
