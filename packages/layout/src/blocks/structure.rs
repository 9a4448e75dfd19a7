use super::{heading, presentation_table, styled_text, BlockContext, TextStyle};
use crate::fields::{px, FieldReader};
use crate::node::Node;
use crate::rules::{resolve_color, Inherit};

const NBSP: &str = "\u{a0}";

pub(crate) fn divider(ctx: &BlockContext<'_>) -> Option<Node> {
    let percent = ctx.styles.px("width", 100).clamp(1, 100);
    let color = ctx.styles.non_empty("color").unwrap_or("#e5e7eb");
    let thickness = ctx.styles.px("thickness", 1).max(1);

    let line = Node::element("td")
        .with_style("border-top", format!("{} solid {}", px(thickness), color))
        .with_style("font-size", "0")
        .with_style("line-height", "0")
        .with_style("height", "0")
        .with_child(Node::text(NBSP));

    let rule = presentation_table()
        .with_attr("width", format!("{}%", percent))
        .with_attr("align", "center")
        .with_child(Node::element("tr").with_child(line));

    Some(ctx.fragment(vec![rule]))
}

pub(crate) fn spacer(ctx: &BlockContext<'_>) -> Option<Node> {
    let height = ctx.styles.px("height", 32);

    let gap = Node::element("div")
        .with_style("height", px(height))
        .with_style("line-height", px(height))
        .with_style("font-size", "0")
        .with_child(Node::text(NBSP));

    Some(ctx.fragment(vec![gap]))
}

pub(crate) fn features(ctx: &BlockContext<'_>) -> Option<Node> {
    let color = resolve_color(&ctx.styles, "textColor", Inherit::Text, ctx.globals).unwrap_or_default();
    let accent = resolve_color(&ctx.styles, "accentColor", Inherit::Primary, ctx.globals).unwrap_or_default();
    let columns = ctx.styles.px("columns", 3).clamp(1, 4) as usize;

    let items: Vec<(&str, &str)> = ctx
        .content
        .list("items")
        .iter()
        .filter_map(FieldReader::of_value)
        .map(|item| (item.str("title").trim(), item.str("description").trim()))
        .filter(|(title, description)| !title.is_empty() || !description.is_empty())
        .collect();

    let mut children = Vec::new();

    if let Some(title) = ctx.content.non_empty("title") {
        children.push(heading("h2", title, 24, &color, "0 0 16px 0").with_style("text-align", "center"));
    }

    if !items.is_empty() {
        let cell_width = format!("{}%", 100 / columns);
        let rows = items.chunks(columns).map(|chunk| {
            let cells = chunk.iter().map(|(title, description)| {
                let mut cell = Node::element("td")
                    .with_attr("width", cell_width.clone())
                    .with_attr("valign", "top")
                    .with_style("padding", "8px");
                if !title.is_empty() {
                    cell = cell.with_child(heading("h3", title, 18, &accent, "0 0 8px 0"));
                }
                if !description.is_empty() {
                    cell = cell.with_child(styled_text(
                        "p",
                        description,
                        &TextStyle {
                            size: 14,
                            color: &color,
                            line_height: 1.5,
                            margin: "0",
                        },
                    ));
                }
                cell
            });
            Node::element("tr").with_children(cells)
        });

        children.push(presentation_table().with_attr("width", "100%").with_children(rows));
    }

    if children.is_empty() {
        return None;
    }

    Some(ctx.fragment(children))
}

#[cfg(test)]
mod tests {
    use crate::blocks::lower_block;
    use mailframe_document::{create_block, BlockType, GlobalStyles, IdGenerator};
    use serde_json::json;

    #[test]
    fn test_features_chunk_into_rows() {
        let mut ids = IdGenerator::from_seed("t");
        let mut block = create_block(BlockType::Features, &mut ids);
        block.styles.insert("columns".into(), json!(2));

        let node = lower_block(&block, &GlobalStyles::default()).unwrap();
        let grid = node.find_tag("td").unwrap().children()[1].clone();
        assert_eq!(grid.children().len(), 2);
        assert_eq!(grid.children()[0].children().len(), 2);
        assert_eq!(grid.children()[1].children().len(), 1);
        assert_eq!(grid.children()[0].children()[0].attr("width"), Some("50%"));
    }

    #[test]
    fn test_empty_features_render_nothing() {
        let mut ids = IdGenerator::from_seed("t");
        let mut block = create_block(BlockType::Features, &mut ids);
        block.content.insert("title".into(), json!(""));
        block.content.insert("items".into(), json!([]));

        assert!(lower_block(&block, &GlobalStyles::default()).is_none());
    }

    #[test]
    fn test_spacer_height() {
        let mut ids = IdGenerator::from_seed("t");
        let mut block = create_block(BlockType::Spacer, &mut ids);
        block.styles.insert("height".into(), json!(48));

        let node = lower_block(&block, &GlobalStyles::default()).unwrap();
        let gap = node.find_tag("div").unwrap();
        assert_eq!(gap.style("height"), Some("48px"));
        assert!(node.find_tag("td").unwrap().style("padding").is_none());
    }

    #[test]
    fn test_divider_line() {
        let mut ids = IdGenerator::from_seed("t");
        let block = create_block(BlockType::Divider, &mut ids);

        let node = lower_block(&block, &GlobalStyles::default()).unwrap();
        let line = node.find_tag("table").unwrap().children()[0].children()[0].children()[0]
            .children()[0]
            .children()[0]
            .clone();
        assert_eq!(line.style("border-top"), Some("1px solid #e5e7eb"));
    }
}
