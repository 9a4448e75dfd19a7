use super::{button as bulletproof, heading, presentation_table, styled_text, BlockContext, ButtonSpec, TextStyle};
use crate::fields::{px, FieldReader};
use crate::node::Node;
use crate::rules::{resolve_color, Inherit};

pub(crate) fn button(ctx: &BlockContext<'_>) -> Option<Node> {
    let label = ctx.content.non_empty("label")?;
    let background = resolve_color(&ctx.styles, "backgroundColor", Inherit::Primary, ctx.globals).unwrap_or_default();
    let color = ctx.styles.non_empty("textColor").unwrap_or("#ffffff");

    let node = bulletproof(&ButtonSpec {
        label,
        href: ctx.content.non_empty("link").unwrap_or("#"),
        background: &background,
        color,
        radius: ctx.styles.px("borderRadius", 4),
        font_size: ctx.styles.px("fontSize", 16),
        padding_x: ctx.styles.px("paddingX", 24),
        padding_y: ctx.styles.px("paddingY", 12),
        align: ctx.styles.align("alignment"),
    });

    Some(ctx.fragment(vec![node]))
}

pub(crate) fn cta(ctx: &BlockContext<'_>) -> Option<Node> {
    let color = resolve_color(&ctx.styles, "textColor", Inherit::Text, ctx.globals).unwrap_or_default();
    let mut children = Vec::new();

    if let Some(title) = ctx.content.non_empty("title") {
        children.push(heading("h2", title, 24, &color, "0 0 12px 0"));
    }

    if let Some(text) = ctx.content.non_empty("text") {
        children.push(styled_text(
            "p",
            text,
            &TextStyle {
                size: 16,
                color: &color,
                line_height: 1.5,
                margin: "0 0 24px 0",
            },
        ));
    }

    if let Some(label) = ctx.content.non_empty("buttonLabel") {
        let background = resolve_color(&ctx.styles, "buttonColor", Inherit::Primary, ctx.globals).unwrap_or_default();
        children.push(bulletproof(&ButtonSpec {
            label,
            href: ctx.content.non_empty("buttonLink").unwrap_or("#"),
            background: &background,
            color: ctx.styles.non_empty("buttonTextColor").unwrap_or("#ffffff"),
            radius: ctx.styles.px("borderRadius", 8),
            font_size: 16,
            padding_x: 28,
            padding_y: 14,
            align: ctx.styles.align("alignment"),
        }));
    }

    if children.is_empty() {
        return None;
    }

    Some(ctx.fragment(children))
}

/// Display name for a social platform key
fn platform_label(platform: &str) -> String {
    match platform.trim().to_ascii_lowercase().as_str() {
        "x" => "X".to_string(),
        "linkedin" => "LinkedIn".to_string(),
        "youtube" => "YouTube".to_string(),
        "tiktok" => "TikTok".to_string(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}

pub(crate) fn social(ctx: &BlockContext<'_>) -> Option<Node> {
    let link_color = ctx.globals.link_color.as_str();
    let font_size = ctx.styles.px("fontSize", 14);
    let gap = ctx.styles.px("spacing", 12) / 2;

    let cells: Vec<Node> = ctx
        .content
        .list("links")
        .iter()
        .filter_map(FieldReader::of_value)
        .filter_map(|link| {
            let url = link.non_empty("url")?;
            let label = platform_label(link.non_empty("platform")?);
            Some((url, label))
        })
        .map(|(url, label)| {
            Node::element("td")
                .with_style("padding", format!("0 {}", px(gap)))
                .with_child(
                    Node::element("a")
                        .with_attr("href", url)
                        .with_attr("target", "_blank")
                        .with_style("color", link_color)
                        .with_style("font-size", px(font_size))
                        .with_style("font-weight", "bold")
                        .with_style("text-decoration", "none")
                        .with_child(Node::text(label)),
                )
        })
        .collect();

    if cells.is_empty() {
        return None;
    }

    let align = ctx.styles.align("alignment");
    let row = presentation_table()
        .with_attr("align", align.as_str())
        .with_child(Node::element("tr").with_children(cells));

    Some(ctx.fragment(vec![row]))
}

#[cfg(test)]
mod tests {
    use super::platform_label;
    use crate::blocks::lower_block;
    use mailframe_document::{create_block, BlockType, GlobalStyles, IdGenerator};
    use serde_json::json;

    #[test]
    fn test_platform_labels() {
        assert_eq!(platform_label("facebook"), "Facebook");
        assert_eq!(platform_label("linkedin"), "LinkedIn");
        assert_eq!(platform_label("x"), "X");
        assert_eq!(platform_label(""), "");
    }

    #[test]
    fn test_button_defaults_to_primary_background() {
        let mut ids = IdGenerator::from_seed("t");
        let block = create_block(BlockType::Button, &mut ids);
        let globals = GlobalStyles::default();

        let node = lower_block(&block, &globals).unwrap();
        let anchor = node.find_tag("a").unwrap();
        assert_eq!(anchor.text_content(), "Click here");
        assert_eq!(anchor.style("padding"), Some("12px 24px"));

        let cell = node
            .find_tag("td")
            .and_then(|container| container.find_tag("table"))
            .and_then(|table| table.find_tag("td"))
            .unwrap();
        assert_eq!(cell.attr("bgcolor"), Some(globals.primary_color.as_str()));
    }

    #[test]
    fn test_button_without_label_renders_nothing() {
        let mut ids = IdGenerator::from_seed("t");
        let mut block = create_block(BlockType::Button, &mut ids);
        block.content.insert("label".into(), json!(""));

        assert!(lower_block(&block, &GlobalStyles::default()).is_none());
    }

    #[test]
    fn test_empty_social_renders_nothing() {
        let mut ids = IdGenerator::from_seed("t");
        let mut block = create_block(BlockType::Social, &mut ids);
        block.content.insert("links".into(), json!([]));

        assert!(lower_block(&block, &GlobalStyles::default()).is_none());
    }

    #[test]
    fn test_social_skips_links_without_url() {
        let mut ids = IdGenerator::from_seed("t");
        let mut block = create_block(BlockType::Social, &mut ids);
        block.content.insert(
            "links".into(),
            json!([
                { "platform": "facebook", "url": "" },
                { "platform": "instagram", "url": "https://instagram.com/acme" },
            ]),
        );

        let node = lower_block(&block, &GlobalStyles::default()).unwrap();
        assert_eq!(node.text_content(), "Instagram");
    }
}
