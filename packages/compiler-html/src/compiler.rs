use mailframe_document::Document;
use mailframe_layout::{lower_document, px, Canvas, LayoutDocument, Node};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

const DOCTYPE: &str = r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">"#;

/// Options for HTML compilation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompileOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Contents of `<title>`
    pub title: Option<String>,
    /// Inbox preview text, hidden in the message body
    pub preheader: Option<String>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            title: None,
            preheader: None,
        }
    }
}

struct Context {
    options: CompileOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        self.newline();
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn newline(&mut self) {
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Compile with default options
pub fn compile(document: &Document) -> String {
    compile_to_html(document, CompileOptions::default())
}

/// Compile a document to a complete HTML message
#[instrument(skip_all, fields(blocks = document.blocks.len(), pretty = options.pretty))]
pub fn compile_to_html(document: &Document, options: CompileOptions) -> String {
    let layout = lower_document(document);
    let html = message(&layout, &options);

    let mut ctx = Context::new(options);
    ctx.add_line(DOCTYPE);
    compile_node(&html, &mut ctx);

    let output = ctx.get_output();
    debug!(rows = layout.visible().count(), bytes = output.len(), "Compiled document");
    output
}

/// Print a single markup tree
pub fn render_node(node: &Node, options: CompileOptions) -> String {
    let mut ctx = Context::new(options);
    compile_node(node, &mut ctx);
    ctx.get_output()
}

/// The full `<html>` tree around the lowered fragments
fn message(layout: &LayoutDocument, options: &CompileOptions) -> Node {
    Node::element("html")
        .with_attr("xmlns", "http://www.w3.org/1999/xhtml")
        .with_attr("lang", "en")
        .with_child(head(options))
        .with_child(body(layout, options))
}

fn meta(pairs: &[(&str, &str)]) -> Node {
    pairs
        .iter()
        .fold(Node::element("meta"), |node, (key, value)| node.with_attr(*key, *value))
}

fn head(options: &CompileOptions) -> Node {
    let mut title = Node::element("title");
    if let Some(text) = options.title.as_deref().filter(|t| !t.is_empty()) {
        title = title.with_child(Node::text(text));
    }

    Node::element("head")
        .with_child(meta(&[
            ("http-equiv", "Content-Type"),
            ("content", "text/html; charset=UTF-8"),
        ]))
        .with_child(meta(&[
            ("name", "viewport"),
            ("content", "width=device-width, initial-scale=1.0"),
        ]))
        .with_child(meta(&[("name", "x-apple-disable-message-reformatting")]))
        .with_child(title)
}

fn body(layout: &LayoutDocument, options: &CompileOptions) -> Node {
    let canvas = &layout.canvas;

    let mut body = Node::element("body")
        .with_style("margin", "0")
        .with_style("padding", "0")
        .with_style("background-color", canvas.background_color.clone())
        .with_style("font-family", canvas.font_family.clone())
        .with_style("color", canvas.text_color.clone());

    if let Some(text) = options.preheader.as_deref().filter(|t| !t.is_empty()) {
        body = body.with_child(preheader(text, canvas));
    }

    let rows = layout
        .visible()
        .map(|fragment| Node::element("tr").with_child(Node::element("td").with_child(fragment.clone())));

    let inner = table()
        .with_attr("width", canvas.width.to_string())
        .with_style("width", "100%")
        .with_style("max-width", px(canvas.width))
        .with_style("background-color", "#ffffff")
        .with_children(rows);

    let wrapper = table()
        .with_attr("width", "100%")
        .with_attr("bgcolor", canvas.background_color.clone())
        .with_style("background-color", canvas.background_color.clone())
        .with_child(
            Node::element("tr").with_child(
                Node::element("td")
                    .with_attr("align", "center")
                    .with_style("padding", "24px 0")
                    .with_child(inner),
            ),
        );

    body.with_child(wrapper)
}

fn table() -> Node {
    Node::element("table")
        .with_attr("role", "presentation")
        .with_attr("cellpadding", "0")
        .with_attr("cellspacing", "0")
        .with_attr("border", "0")
}

fn preheader(text: &str, canvas: &Canvas) -> Node {
    Node::element("div")
        .with_style("display", "none")
        .with_style("max-height", "0")
        .with_style("overflow", "hidden")
        .with_style("mso-hide", "all")
        .with_style("font-size", "1px")
        .with_style("line-height", "1px")
        .with_style("color", canvas.background_color.clone())
        .with_style("opacity", "0")
        .with_child(Node::text(text))
}

fn compile_node(node: &Node, ctx: &mut Context) {
    match node {
        Node::Text { content } => {
            if ctx.options.pretty {
                ctx.add_indent();
            }
            ctx.add(&escape_html(content));
            ctx.newline();
        }
        Node::Element {
            tag,
            attributes,
            styles,
            children,
            ..
        } => compile_tag(tag, attributes, styles, children, ctx),
    }
}

fn compile_tag(
    name: &str,
    attributes: &BTreeMap<String, String>,
    styles: &BTreeMap<String, String>,
    children: &[Node],
    ctx: &mut Context,
) {
    if ctx.options.pretty {
        ctx.add_indent();
    }
    open_tag(name, attributes, styles, children.is_empty(), ctx);

    if is_self_closing(name) && children.is_empty() {
        ctx.newline();
        return;
    }

    if children.iter().all(is_inline) {
        for child in children {
            compile_inline(child, ctx);
        }
    } else {
        ctx.newline();
        ctx.indent();
        for child in children {
            compile_node(child, ctx);
        }
        ctx.dedent();
        if ctx.options.pretty {
            ctx.add_indent();
        }
    }

    ctx.add(&format!("</{}>", name));
    ctx.newline();
}

/// Print a node without any layout whitespace
fn compile_inline(node: &Node, ctx: &mut Context) {
    match node {
        Node::Text { content } => ctx.add(&escape_html(content)),
        Node::Element {
            tag,
            attributes,
            styles,
            children,
            ..
        } => {
            open_tag(tag, attributes, styles, children.is_empty(), ctx);
            if is_self_closing(tag) && children.is_empty() {
                return;
            }
            for child in children {
                compile_inline(child, ctx);
            }
            ctx.add(&format!("</{}>", tag));
        }
    }
}

fn open_tag(
    name: &str,
    attributes: &BTreeMap<String, String>,
    styles: &BTreeMap<String, String>,
    empty: bool,
    ctx: &mut Context,
) {
    ctx.add(&format!("<{}", name));

    for (key, value) in attributes {
        ctx.add(&format!(" {}=\"{}\"", key, escape_html(value)));
    }

    if !styles.is_empty() {
        let declarations: Vec<String> = styles.iter().map(|(key, value)| format!("{}:{}", key, value)).collect();
        ctx.add(&format!(" style=\"{}\"", escape_html(&declarations.join(";"))));
    }

    if empty && is_self_closing(name) {
        ctx.add(" />");
    } else {
        ctx.add(">");
    }
}

/// Text and phrasing elements are kept on one line so pretty printing never
/// adds whitespace inside a paragraph
fn is_inline(node: &Node) -> bool {
    match node {
        Node::Text { .. } => true,
        Node::Element { tag, children, .. } => {
            matches!(tag.as_str(), "a" | "span" | "strong" | "em" | "b" | "i" | "br")
                && children.iter().all(is_inline)
        }
    }
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn is_self_closing(tag: &str) -> bool {
    matches!(
        tag,
        "img" | "input" | "br" | "hr" | "meta" | "link" | "area" | "base" | "col" | "source"
    )
}
