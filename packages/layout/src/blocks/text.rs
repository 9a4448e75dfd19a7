use super::{heading, image, link, styled_text, BlockContext, TextStyle};
use crate::node::Node;
use crate::rules::{resolve_color, Inherit};

pub(crate) fn header(ctx: &BlockContext<'_>) -> Option<Node> {
    let color = resolve_color(&ctx.styles, "textColor", Inherit::Text, ctx.globals).unwrap_or_default();
    let align = ctx.styles.align("alignment");
    let mut children = Vec::new();

    if let Some(logo) = ctx.content.non_empty("logoUrl") {
        let width = ctx.styles.px("logoWidth", 120).min(ctx.inner_width);
        children.push(image(logo, ctx.content.str("logoAlt"), width, align, "0px"));
    }

    if let Some(title) = ctx.content.non_empty("title") {
        let margin = if children.is_empty() { "0" } else { "12px 0 0 0" };
        children.push(heading("h1", title, ctx.styles.px("fontSize", 24), &color, margin));
    }

    if let Some(tagline) = ctx.content.non_empty("tagline") {
        children.push(styled_text(
            "p",
            tagline,
            &TextStyle {
                size: 14,
                color: &color,
                line_height: 1.5,
                margin: "8px 0 0 0",
            },
        ));
    }

    Some(ctx.fragment(children))
}

pub(crate) fn text(ctx: &BlockContext<'_>) -> Option<Node> {
    let color = resolve_color(&ctx.styles, "textColor", Inherit::Text, ctx.globals).unwrap_or_default();

    let paragraph = styled_text(
        "p",
        ctx.content.str("text"),
        &TextStyle {
            size: ctx.styles.px("fontSize", 16),
            color: &color,
            line_height: ctx.styles.number("lineHeight", 1.6),
            margin: "0",
        },
    );

    Some(ctx.fragment(vec![paragraph]))
}

pub(crate) fn footer(ctx: &BlockContext<'_>) -> Option<Node> {
    let color = resolve_color(&ctx.styles, "textColor", Inherit::Text, ctx.globals).unwrap_or_default();
    let size = ctx.styles.px("fontSize", 12);
    let style = TextStyle {
        size,
        color: &color,
        line_height: 1.5,
        margin: "0 0 8px 0",
    };
    let mut children = Vec::new();

    if let Some(company) = ctx.content.non_empty("companyName") {
        children.push(styled_text("p", company, &style).with_style("font-weight", "bold"));
    }

    if let Some(address) = ctx.content.non_empty("address") {
        children.push(styled_text("p", address, &style));
    }

    if let Some(label) = ctx.content.non_empty("unsubscribeText") {
        let line = match ctx.content.non_empty("unsubscribeLink") {
            Some(href) => Node::element("p")
                .with_style("margin", "0")
                .with_style("font-size", crate::fields::px(size))
                .with_style("color", color.as_str())
                .with_child(link(href, label, &color)),
            None => styled_text("p", label, &TextStyle { margin: "0", ..style }),
        };
        children.push(line);
    }

    Some(ctx.fragment(children))
}

#[cfg(test)]
mod tests {
    use crate::blocks::lower_block;
    use mailframe_document::{create_block, BlockType, GlobalStyles, IdGenerator};
    use serde_json::json;

    #[test]
    fn test_header_without_logo_has_no_image() {
        let mut ids = IdGenerator::from_seed("t");
        let block = create_block(BlockType::Header, &mut ids);
        let node = lower_block(&block, &GlobalStyles::default()).unwrap();

        assert!(node.find_tag("img").is_none());
        assert_eq!(node.find_tag("h1").unwrap().text_content(), "Your Company");
    }

    #[test]
    fn test_header_logo_is_capped_to_inner_width() {
        let mut ids = IdGenerator::from_seed("t");
        let mut block = create_block(BlockType::Header, &mut ids);
        block.content.insert("logoUrl".into(), json!("https://cdn.test/logo.png"));
        block.styles.insert("logoWidth".into(), json!(900));

        let node = lower_block(&block, &GlobalStyles::default()).unwrap();
        let img = node.find_tag("img").unwrap();
        assert_eq!(img.attr("width"), Some("552"));
    }

    #[test]
    fn test_text_uses_global_text_color_when_blank() {
        let mut ids = IdGenerator::from_seed("t");
        let block = create_block(BlockType::Text, &mut ids);
        let globals = GlobalStyles::default();

        let node = lower_block(&block, &globals).unwrap();
        let p = node.find_tag("p").unwrap();
        assert_eq!(p.style("color"), Some(globals.text_color.as_str()));
        assert_eq!(p.style("line-height"), Some("1.6"));
    }

    #[test]
    fn test_footer_without_link_renders_plain_text() {
        let mut ids = IdGenerator::from_seed("t");
        let mut block = create_block(BlockType::Footer, &mut ids);
        block.content.insert("unsubscribeLink".into(), json!(""));

        let node = lower_block(&block, &GlobalStyles::default()).unwrap();
        assert!(node.find_tag("a").is_none());
        assert!(node.text_content().contains("Unsubscribe"));
    }
}
