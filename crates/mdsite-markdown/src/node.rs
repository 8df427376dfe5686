//! HTML render tree.
//!
//! A [`RenderNode`] is either a [`LeafNode`] (an optional tag wrapping a text
//! value) or a [`ContainerNode`] (a tag wrapping child nodes). Each parent owns
//! its children, so a tree is built bottom-up and serialized once with
//! [`RenderNode::to_html`].
//!
//! Text values and attribute values are written verbatim: the tree performs no
//! HTML escaping.

use crate::MarkdownError;

/// HTML attributes kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    /// Create an empty attribute list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute.
    ///
    /// Setting an existing name replaces its value in place, keeping the
    /// original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.0.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.0.push((name, value));
        }
    }

    /// Look up an attribute value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Serialize as ` name="value"` pairs.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        for (name, value) in &self.0 {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (name, value) in iter {
            attrs.insert(name, value);
        }
        attrs
    }
}

/// Leaf node: a text value, optionally wrapped in a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LeafNode {
    /// Tag name. `None` renders the value as raw text.
    pub tag: Option<String>,
    /// Text value. Serializing a leaf without a value fails.
    pub value: Option<String>,
    /// Attributes written on the opening tag.
    pub attrs: Attributes,
}

impl LeafNode {
    /// Create an untagged text leaf.
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            tag: None,
            value: Some(value.into()),
            attrs: Attributes::new(),
        }
    }

    /// Create a tagged leaf.
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            value: Some(value.into()),
            attrs: Attributes::new(),
        }
    }

    /// Add an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name, value);
        self
    }

    fn write_html(&self, out: &mut String) -> Result<(), MarkdownError> {
        let value = self.value.as_deref().ok_or(MarkdownError::MissingValue)?;
        match &self.tag {
            None => out.push_str(value),
            Some(tag) => {
                // `img` is written as an open/close pair like every other tag.
                out.push('<');
                out.push_str(tag);
                self.attrs.write_html(out);
                out.push('>');
                out.push_str(value);
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
        Ok(())
    }
}

/// Container node: a tag wrapping an ordered list of children.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContainerNode {
    /// Tag name. Serializing a container without a tag fails.
    pub tag: Option<String>,
    pub children: Vec<RenderNode>,
    pub attrs: Attributes,
}

impl ContainerNode {
    pub fn new(tag: impl Into<String>, children: Vec<RenderNode>) -> Self {
        Self {
            tag: Some(tag.into()),
            children,
            attrs: Attributes::new(),
        }
    }

    /// Add an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name, value);
        self
    }

    fn write_html(&self, out: &mut String) -> Result<(), MarkdownError> {
        let tag = self.tag.as_deref().ok_or(MarkdownError::MissingTag)?;
        out.push('<');
        out.push_str(tag);
        self.attrs.write_html(out);
        out.push('>');
        for child in &self.children {
            child.write_html(out)?;
        }
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
        Ok(())
    }
}

/// Node of the HTML render tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "node", rename_all = "lowercase"))]
pub enum RenderNode {
    Leaf(LeafNode),
    Container(ContainerNode),
}

impl RenderNode {
    /// Serialize the subtree rooted at this node to an HTML fragment.
    ///
    /// # Errors
    ///
    /// Returns [`MarkdownError::MissingTag`] for a container without a tag and
    /// [`MarkdownError::MissingValue`] for a leaf without a value, anywhere in
    /// the subtree.
    pub fn to_html(&self) -> Result<String, MarkdownError> {
        let mut out = String::new();
        self.write_html(&mut out)?;
        Ok(out)
    }

    fn write_html(&self, out: &mut String) -> Result<(), MarkdownError> {
        match self {
            Self::Leaf(leaf) => leaf.write_html(out),
            Self::Container(container) => container.write_html(out),
        }
    }

    /// Tag name of this node, if any.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Leaf(leaf) => leaf.tag.as_deref(),
            Self::Container(container) => container.tag.as_deref(),
        }
    }

    /// Children of a container. Leaves have none.
    pub fn children(&self) -> &[RenderNode] {
        match self {
            Self::Leaf(_) => &[],
            Self::Container(container) => &container.children,
        }
    }
}

impl From<LeafNode> for RenderNode {
    fn from(leaf: LeafNode) -> Self {
        Self::Leaf(leaf)
    }
}

impl From<ContainerNode> for RenderNode {
    fn from(container: ContainerNode) -> Self {
        Self::Container(container)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_attributes_to_html() {
        let attrs: Attributes = [
            ("href", "https://www.google.com"),
            ("target", "_blank"),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            attrs.to_html(),
            r#" href="https://www.google.com" target="_blank""#
        );
    }

    #[test]
    fn test_attributes_empty() {
        assert_eq!(Attributes::new().to_html(), "");
    }

    #[test]
    fn test_attributes_insert_keeps_position() {
        let mut attrs = Attributes::new();
        attrs.insert("src", "a.png");
        attrs.insert("alt", "a");
        attrs.insert("src", "b.png");
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("src"), Some("b.png"));
        assert_eq!(attrs.to_html(), r#" src="b.png" alt="a""#);
    }

    #[test]
    fn test_leaf_raw_text() {
        let node = RenderNode::from(LeafNode::text("Just text"));
        assert_eq!(node.to_html().unwrap(), "Just text");
    }

    #[test]
    fn test_leaf_with_tag() {
        let node = RenderNode::from(LeafNode::new("p", "This is a paragraph of text."));
        assert_eq!(
            node.to_html().unwrap(),
            "<p>This is a paragraph of text.</p>"
        );
    }

    #[test]
    fn test_leaf_with_attrs() {
        let node = RenderNode::from(
            LeafNode::new("a", "Click me!").with_attr("href", "https://www.google.com"),
        );
        assert_eq!(
            node.to_html().unwrap(),
            r#"<a href="https://www.google.com">Click me!</a>"#
        );
    }

    #[test]
    fn test_leaf_empty_value_is_valid() {
        let node = RenderNode::from(LeafNode::new("b", ""));
        assert_eq!(node.to_html().unwrap(), "<b></b>");
    }

    #[test]
    fn test_img_is_not_self_closing() {
        let node = RenderNode::from(
            LeafNode::new("img", "")
                .with_attr("src", "/images/tolkien.png")
                .with_attr("alt", "JRR Tolkien sitting"),
        );
        assert_eq!(
            node.to_html().unwrap(),
            r#"<img src="/images/tolkien.png" alt="JRR Tolkien sitting"></img>"#
        );
    }

    #[test]
    fn test_leaf_without_value_fails() {
        let node = RenderNode::Leaf(LeafNode {
            tag: Some("p".to_owned()),
            value: None,
            attrs: Attributes::new(),
        });
        assert_eq!(node.to_html(), Err(MarkdownError::MissingValue));
    }

    #[test]
    fn test_container_with_children() {
        let node = RenderNode::from(ContainerNode::new(
            "p",
            vec![
                LeafNode::new("b", "Bold text").into(),
                LeafNode::text("Normal text").into(),
                LeafNode::new("i", "italic text").into(),
                LeafNode::text("Normal text").into(),
            ],
        ));
        assert_eq!(
            node.to_html().unwrap(),
            "<p><b>Bold text</b>Normal text<i>italic text</i>Normal text</p>"
        );
    }

    #[test]
    fn test_container_with_grandchildren() {
        let child = ContainerNode::new("span", vec![LeafNode::new("b", "grandchild").into()]);
        let parent = RenderNode::from(ContainerNode::new("div", vec![child.into()]));
        assert_eq!(
            parent.to_html().unwrap(),
            "<div><span><b>grandchild</b></span></div>"
        );
    }

    #[test]
    fn test_container_with_attrs_and_no_children() {
        let node = RenderNode::from(ContainerNode::new("ul", vec![]).with_attr("class", "menu"));
        assert_eq!(node.to_html().unwrap(), r#"<ul class="menu"></ul>"#);
    }

    #[test]
    fn test_container_without_tag_fails() {
        let node = RenderNode::Container(ContainerNode {
            tag: None,
            children: vec![LeafNode::text("x").into()],
            attrs: Attributes::new(),
        });
        assert_eq!(node.to_html(), Err(MarkdownError::MissingTag));
    }

    #[test]
    fn test_invalid_descendant_fails_whole_tree() {
        let broken = RenderNode::Leaf(LeafNode {
            tag: None,
            value: None,
            attrs: Attributes::new(),
        });
        let inner = ContainerNode::new("li", vec![broken]);
        let root = RenderNode::from(ContainerNode::new("ul", vec![inner.into()]));
        assert_eq!(root.to_html(), Err(MarkdownError::MissingValue));
    }

    #[test]
    fn test_no_escaping() {
        let node = RenderNode::from(LeafNode::text("a < b && c > d"));
        assert_eq!(node.to_html().unwrap(), "a < b && c > d");
    }

    #[test]
    fn test_tag_and_children_accessors() {
        let node = RenderNode::from(ContainerNode::new("p", vec![LeafNode::text("x").into()]));
        assert_eq!(node.tag(), Some("p"));
        assert_eq!(node.children().len(), 1);
        assert_eq!(node.children()[0].tag(), None);
        assert!(node.children()[0].children().is_empty());
    }
}
