use super::{button, heading, image as img, presentation_table, styled_text, BlockContext, ButtonSpec, TextStyle};
use crate::fields::px;
use crate::node::Node;
use crate::rules::{resolve_color, Align, Inherit};

const PLACEHOLDER_HEIGHT: u32 = 160;

pub(crate) fn image(ctx: &BlockContext<'_>) -> Option<Node> {
    let align = ctx.styles.align("alignment");
    let percent = ctx.styles.px("width", 100).clamp(1, 100);
    let width = percent_of(ctx.inner_width, percent);
    let alt = ctx.content.str("alt");

    let body = match ctx.content.non_empty("src") {
        Some(src) => {
            let radius = px(ctx.styles.px("borderRadius", 0));
            let picture = img(src, alt, width, align, &radius);
            match ctx.content.non_empty("link") {
                Some(href) => Node::element("a")
                    .with_attr("href", href)
                    .with_attr("target", "_blank")
                    .with_child(picture),
                None => picture,
            }
        }
        None => placeholder(width, align, alt),
    };

    Some(ctx.fragment(vec![body]))
}

/// `percent` of `width`, widened so very large canvases cannot overflow
fn percent_of(width: u32, percent: u32) -> u32 {
    let scaled = u64::from(width) * u64::from(percent) / 100;
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

/// Neutral box shown in place of an unbound image
fn placeholder(width: u32, align: Align, alt: &str) -> Node {
    let label = if alt.trim().is_empty() { "Image" } else { alt };

    let cell = Node::element("td")
        .with_attr("height", PLACEHOLDER_HEIGHT.to_string())
        .with_attr("align", "center")
        .with_style("height", px(PLACEHOLDER_HEIGHT))
        .with_style("background-color", "#e5e7eb")
        .with_style("color", "#6b7280")
        .with_style("font-size", "14px")
        .with_style("text-align", "center")
        .with_style("vertical-align", "middle")
        .with_child(Node::text(label));

    presentation_table()
        .with_attr("width", width.to_string())
        .with_attr("align", align.as_str())
        .with_attr("data-placeholder", "image")
        .with_style("width", px(width))
        .with_child(Node::element("tr").with_child(cell))
}

pub(crate) fn hero(ctx: &BlockContext<'_>) -> Option<Node> {
    let align = ctx.styles.align("alignment");
    let color = resolve_color(&ctx.styles, "textColor", Inherit::Text, ctx.globals).unwrap_or_default();
    let mut children = Vec::new();

    if let Some(src) = ctx.content.non_empty("imageUrl") {
        children.push(
            img(src, ctx.content.str("title"), ctx.inner_width, align, "0px")
                .with_style("margin-bottom", "24px"),
        );
    }

    if let Some(title) = ctx.content.non_empty("title") {
        children.push(heading("h1", title, 32, &color, "0"));
    }

    if let Some(subtitle) = ctx.content.non_empty("subtitle") {
        children.push(styled_text(
            "p",
            subtitle,
            &TextStyle {
                size: 18,
                color: &color,
                line_height: 1.5,
                margin: "12px 0 0 0",
            },
        ));
    }

    if let Some(label) = ctx.content.non_empty("buttonLabel") {
        let background = ctx.styles.non_empty("buttonColor").unwrap_or("#ffffff");
        let text = resolve_color(&ctx.styles, "buttonTextColor", Inherit::Primary, ctx.globals).unwrap_or_default();
        children.push(spaced(button(&ButtonSpec {
            label,
            href: ctx.content.non_empty("buttonLink").unwrap_or("#"),
            background,
            color: &text,
            radius: 4,
            font_size: 16,
            padding_x: 28,
            padding_y: 14,
            align,
        })));
    }

    Some(ctx.fragment(children))
}

pub(crate) fn testimonial(ctx: &BlockContext<'_>) -> Option<Node> {
    let align = ctx.styles.align("alignment");
    let color = resolve_color(&ctx.styles, "textColor", Inherit::Text, ctx.globals).unwrap_or_default();
    let accent = resolve_color(&ctx.styles, "accentColor", Inherit::Primary, ctx.globals).unwrap_or_default();
    let mut children = Vec::new();

    if let Some(src) = ctx.content.non_empty("avatarUrl") {
        children.push(
            img(src, ctx.content.str("author"), 64, align, "50%").with_style("margin-bottom", "16px"),
        );
    }

    if let Some(quote) = ctx.content.non_empty("quote") {
        children.push(
            styled_text(
                "p",
                &format!("\u{201c}{}\u{201d}", quote),
                &TextStyle {
                    size: ctx.styles.px("fontSize", 18),
                    color: &color,
                    line_height: 1.5,
                    margin: "0 0 16px 0",
                },
            )
            .with_style("font-style", "italic"),
        );
    }

    if let Some(author) = ctx.content.non_empty("author") {
        children.push(
            styled_text(
                "p",
                author,
                &TextStyle {
                    size: 16,
                    color: &accent,
                    line_height: 1.4,
                    margin: "0",
                },
            )
            .with_style("font-weight", "bold"),
        );
    }

    if let Some(role) = ctx.content.non_empty("role") {
        children.push(styled_text(
            "p",
            role,
            &TextStyle {
                size: 14,
                color: "#6b7280",
                line_height: 1.4,
                margin: "4px 0 0 0",
            },
        ));
    }

    Some(ctx.fragment(children))
}

/// Wrap a nested table so it keeps distance from the text above it
fn spaced(node: Node) -> Node {
    Node::element("div").with_style("margin-top", "24px").with_child(node)
}
