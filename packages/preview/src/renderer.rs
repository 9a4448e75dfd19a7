use crate::controls::Control;
use crate::view::{ControlState, PreviewBlock, PreviewView, BLOCK_ID_ATTR, CHROME_ATTR};
use mailframe_document::{schema, Document};
use mailframe_layout::{lower_document, px, Canvas, Fragment, Node};
use tracing::{debug, instrument};

/// Render the interactive preview of a document
///
/// Block content is taken unchanged from the layout lowering the HTML
/// compiler uses; everything added here is marked with `data-chrome`.
#[instrument(skip(doc), fields(blocks = doc.blocks.len()))]
pub fn render_preview(doc: &Document, selected: Option<&str>) -> PreviewView {
    let layout = lower_document(doc);
    let len = layout.fragments.len();
    let accent = doc.global_styles.primary_color.as_str();

    let mut blocks = Vec::with_capacity(len);
    let mut wrappers = Vec::with_capacity(len);

    for (index, fragment) in layout.fragments.iter().enumerate() {
        let is_selected = selected == Some(fragment.block_id.as_str());
        let controls: Vec<ControlState> = Control::ALL
            .into_iter()
            .map(|control| ControlState {
                control,
                enabled: control.is_enabled(index, len),
            })
            .collect();

        wrappers.push(wrapper(fragment, is_selected, &controls, accent));
        blocks.push(PreviewBlock {
            block_id: fragment.block_id.clone(),
            block_type: fragment.block_type,
            index,
            selected: is_selected,
            empty: fragment.node.is_none(),
            controls,
        });
    }

    if selected.is_some() && !blocks.iter().any(|b| b.selected) {
        debug!(selected = ?selected, "Selected block is not in the document");
    }

    PreviewView {
        canvas: canvas(&layout.canvas, wrappers),
        blocks,
    }
}

fn chrome(tag: &str, role: &str) -> Node {
    Node::element(tag).with_attr(CHROME_ATTR, role)
}

fn canvas(frame: &Canvas, wrappers: Vec<Node>) -> Node {
    let column = chrome("div", "column")
        .with_style("width", "100%")
        .with_style("max-width", px(frame.width))
        .with_style("margin", "0 auto")
        .with_style("background-color", "#ffffff")
        .with_style("font-family", frame.font_family.clone())
        .with_style("color", frame.text_color.clone())
        .with_children(wrappers);

    chrome("div", "canvas")
        .with_style("background-color", frame.background_color.clone())
        .with_style("padding", "24px 0")
        .with_style("min-height", "100%")
        .with_child(column)
}

fn wrapper(fragment: &Fragment, selected: bool, controls: &[ControlState], accent: &str) -> Node {
    let outline = if selected {
        format!("2px solid {}", accent)
    } else {
        "1px dashed transparent".to_string()
    };

    let mut node = Node::element("div")
        .with_key(fragment.block_id.clone())
        .with_attr(BLOCK_ID_ATTR, fragment.block_id.clone())
        .with_attr("data-block-type", fragment.block_type.as_str())
        .with_style("position", "relative")
        .with_style("cursor", "pointer")
        .with_style("outline", outline)
        .with_style("outline-offset", "-2px");

    if selected {
        node = node.with_attr("data-selected", "true");
    }

    node = node.with_child(toolbar(&fragment.block_id, selected, controls, accent));

    match &fragment.node {
        Some(content) => node.with_child(content.clone()),
        None => node.with_child(empty_hint(fragment)),
    }
}

fn toolbar(block_id: &str, selected: bool, controls: &[ControlState], accent: &str) -> Node {
    let buttons = controls.iter().map(|state| {
        let mut button = chrome("button", "control")
            .with_attr("type", "button")
            .with_attr("data-action", state.control.as_str())
            .with_attr(BLOCK_ID_ATTR, block_id)
            .with_attr("title", state.control.label())
            .with_style("border", "0")
            .with_style("background-color", accent)
            .with_style("color", "#ffffff")
            .with_style("font-size", "12px")
            .with_style("padding", "4px 8px")
            .with_child(Node::text(state.control.glyph()));

        if !state.enabled {
            button = button.with_attr("disabled", "disabled").with_style("opacity", "0.4");
        }
        button
    });

    chrome("div", "toolbar")
        .with_style("position", "absolute")
        .with_style("top", "4px")
        .with_style("right", "4px")
        .with_style("gap", "2px")
        .with_style("display", if selected { "flex" } else { "none" })
        .with_children(buttons)
}

/// Placeholder so a block that renders nothing can still be selected
fn empty_hint(fragment: &Fragment) -> Node {
    let label = schema(fragment.block_type).label;

    chrome("div", "empty-hint")
        .with_style("padding", "16px")
        .with_style("border", "1px dashed #d1d5db")
        .with_style("color", "#9ca3af")
        .with_style("font-size", "13px")
        .with_style("text-align", "center")
        .with_child(Node::text(format!("Empty {} block", label.to_lowercase())))
}
