use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Markup tree node produced by block lowering.
///
/// Attributes and styles are key-ordered so that printing a tree is
/// deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    Element {
        tag: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        attributes: BTreeMap<String, String>,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        styles: BTreeMap<String, String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<Node>,
        /// Stable identity for interactive renderers (block id)
        #[serde(skip_serializing_if = "Option::is_none")]
        key: Option<String>,
    },

    Text { content: String },
}

impl Node {
    pub fn element(tag: impl Into<String>) -> Self {
        Node::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            children: Vec::new(),
            key: None,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Node::Text {
            content: content.into(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Node::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Node::Element { ref mut styles, .. } = self {
            styles.insert(key.into(), value.into());
        }
        self
    }

    /// Set a style only when a value is present
    pub fn with_style_opt(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.with_style(key, value),
            None => self,
        }
    }

    pub fn with_child(mut self, child: Node) -> Self {
        if let Node::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: impl IntoIterator<Item = Node>) -> Self {
        if let Node::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        if let Node::Element {
            key: ref mut node_key,
            ..
        } = self
        {
            *node_key = Some(key.into());
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Element { tag, .. } => Some(tag),
            Node::Text { .. } => None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            Node::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            Node::Text { .. } => None,
        }
    }

    pub fn style(&self, name: &str) -> Option<&str> {
        match self {
            Node::Element { styles, .. } => styles.get(name).map(String::as_str),
            Node::Text { .. } => None,
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            Node::Element { key, .. } => key.as_deref(),
            Node::Text { .. } => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element { children, .. } => children,
            Node::Text { .. } => &[],
        }
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text { content } => out.push_str(content),
            Node::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Depth-first search for the first element with the given tag
    pub fn find_tag(&self, tag_name: &str) -> Option<&Node> {
        if self.tag() == Some(tag_name) {
            return Some(self);
        }
        self.children().iter().find_map(|c| c.find_tag(tag_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_only_touch_elements() {
        let text = Node::text("hi").with_attr("a", "b").with_style("c", "d");
        assert_eq!(text, Node::text("hi"));

        let el = Node::element("td")
            .with_attr("align", "center")
            .with_style("padding", "16px")
            .with_style_opt("color", None::<String>)
            .with_child(Node::text("x"));

        assert_eq!(el.attr("align"), Some("center"));
        assert_eq!(el.style("padding"), Some("16px"));
        assert_eq!(el.style("color"), None);
        assert_eq!(el.text_content(), "x");
    }

    #[test]
    fn test_find_tag_is_depth_first() {
        let tree = Node::element("table").with_child(
            Node::element("tr").with_child(
                Node::element("td").with_child(Node::element("a").with_attr("href", "#")),
            ),
        );

        assert_eq!(tree.find_tag("a").and_then(|a| a.attr("href")), Some("#"));
        assert!(tree.find_tag("img").is_none());
    }
}
