//! # Box rules
//!
//! Declarative mapping from a block's style fields to the inline
//! presentation of its container cell. Both output targets read block
//! geometry through this table, so padding, background and alignment can
//! only be expressed one way.

use crate::fields::{px, FieldReader};
use crate::node::Node;
use mailframe_document::{BlockType, GlobalStyles};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "center" | "centre" | "middle" => Align::Center,
            "right" | "end" => Align::Right,
            _ => Align::Left,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

/// Where a blank color field takes its value from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inherit {
    /// No color at all
    Transparent,
    /// `globalStyles.textColor`
    Text,
    /// `globalStyles.primaryColor`
    Primary,
    /// `globalStyles.linkColor`
    Link,
}

impl Inherit {
    fn resolve(&self, globals: &GlobalStyles) -> Option<String> {
        match self {
            Inherit::Transparent => None,
            Inherit::Text => Some(globals.text_color.clone()),
            Inherit::Primary => Some(globals.primary_color.clone()),
            Inherit::Link => Some(globals.link_color.clone()),
        }
    }
}

/// Resolve a color field, falling back by convention when blank
pub fn resolve_color(
    reader: &FieldReader<'_>,
    key: &str,
    inherit: Inherit,
    globals: &GlobalStyles,
) -> Option<String> {
    match reader.non_empty(key) {
        Some(color) => Some(color.to_string()),
        None => inherit.resolve(globals),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Whole pixels
    Px,
    Color(Inherit),
    /// `text-align` style plus `align` attribute
    Align,
}

/// One style field → one container property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: &'static str,
    pub property: &'static str,
    pub kind: RuleKind,
}

const fn rule(field: &'static str, property: &'static str, kind: RuleKind) -> FieldRule {
    FieldRule {
        field,
        property,
        kind,
    }
}

const PADDING: FieldRule = rule("padding", "padding", RuleKind::Px);
const ALIGN: FieldRule = rule("alignment", "text-align", RuleKind::Align);
const BACKGROUND: FieldRule = rule(
    "backgroundColor",
    "background-color",
    RuleKind::Color(Inherit::Transparent),
);
const PRIMARY_BACKGROUND: FieldRule = rule(
    "backgroundColor",
    "background-color",
    RuleKind::Color(Inherit::Primary),
);

/// Container rules per block type
pub fn container_rules(block_type: BlockType) -> &'static [FieldRule] {
    match block_type {
        BlockType::Header => &[PADDING, BACKGROUND, ALIGN],
        BlockType::Text => &[PADDING, BACKGROUND, ALIGN],
        BlockType::Image => &[PADDING, ALIGN],
        BlockType::Button => &[PADDING, ALIGN],
        BlockType::Divider => &[PADDING],
        BlockType::Spacer => &[BACKGROUND],
        BlockType::Footer => &[PADDING, BACKGROUND, ALIGN],
        BlockType::Hero => &[PADDING, PRIMARY_BACKGROUND, ALIGN],
        BlockType::Social => &[PADDING, ALIGN],
        BlockType::Features => &[PADDING, BACKGROUND],
        BlockType::Cta => &[PADDING, BACKGROUND, ALIGN],
        BlockType::Testimonial => &[PADDING, BACKGROUND, ALIGN],
    }
}

/// Apply a rule table to an element
pub fn apply_rules(
    mut node: Node,
    rules: &[FieldRule],
    reader: &FieldReader<'_>,
    globals: &GlobalStyles,
) -> Node {
    for rule in rules {
        node = match rule.kind {
            RuleKind::Px => node.with_style(rule.property, px(reader.px(rule.field, 0))),
            RuleKind::Color(inherit) => {
                let color = resolve_color(reader, rule.field, inherit, globals);
                node.with_style_opt(rule.property, color)
            }
            RuleKind::Align => {
                let align = reader.align(rule.field);
                node.with_style(rule.property, align.as_str())
                    .with_attr("align", align.as_str())
            }
        };
    }
    node
}

/// Horizontal padding a block's container subtracts from the content width
pub fn horizontal_padding(block_type: BlockType, reader: &FieldReader<'_>) -> u32 {
    if container_rules(block_type).contains(&PADDING) {
        reader.px(PADDING.field, 0).saturating_mul(2)
    } else {
        0
    }
}
