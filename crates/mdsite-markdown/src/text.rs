//! Typed inline text runs and their leaf rendering.

use std::fmt;

use crate::node::LeafNode;

/// Kind of an inline text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TextKind {
    Plain,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

impl TextKind {
    /// Lowercase name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Code => "code",
            Self::Link => "link",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for TextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed span of inline text.
///
/// Only links and images carry a URL, so a target exists exactly when the
/// kind is [`TextKind::Link`] or [`TextKind::Image`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "kind", content = "value", rename_all = "lowercase")
)]
pub enum TextRun {
    Plain(String),
    Bold(String),
    Italic(String),
    Code(String),
    Link { text: String, url: String },
    Image { alt: String, url: String },
}

impl TextRun {
    pub fn kind(&self) -> TextKind {
        match self {
            Self::Plain(_) => TextKind::Plain,
            Self::Bold(_) => TextKind::Bold,
            Self::Italic(_) => TextKind::Italic,
            Self::Code(_) => TextKind::Code,
            Self::Link { .. } => TextKind::Link,
            Self::Image { .. } => TextKind::Image,
        }
    }

    /// Display text, or alt text for images.
    pub fn content(&self) -> &str {
        match self {
            Self::Plain(s) | Self::Bold(s) | Self::Italic(s) | Self::Code(s) => s,
            Self::Link { text, .. } => text,
            Self::Image { alt, .. } => alt,
        }
    }

    /// URL of a link or image.
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Link { url, .. } | Self::Image { url, .. } => Some(url),
            _ => None,
        }
    }

    /// Render the run as a leaf node.
    ///
    /// | kind   | tag    | value   | attributes   |
    /// |--------|--------|---------|--------------|
    /// | plain  | none   | content | -            |
    /// | bold   | `b`    | content | -            |
    /// | italic | `i`    | content | -            |
    /// | code   | `code` | content | -            |
    /// | link   | `a`    | content | `href`       |
    /// | image  | `img`  | empty   | `src`, `alt` |
    pub fn to_leaf(&self) -> LeafNode {
        match self {
            Self::Plain(text) => LeafNode::text(text.as_str()),
            Self::Bold(text) => LeafNode::new("b", text.as_str()),
            Self::Italic(text) => LeafNode::new("i", text.as_str()),
            Self::Code(text) => LeafNode::new("code", text.as_str()),
            Self::Link { text, url } => LeafNode::new("a", text.as_str()).with_attr("href", url),
            Self::Image { alt, url } => LeafNode::new("img", "")
                .with_attr("src", url)
                .with_attr("alt", alt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::RenderNode;
    use pretty_assertions::assert_eq;

    fn html(run: &TextRun) -> String {
        RenderNode::from(run.to_leaf()).to_html().unwrap()
    }

    #[test]
    fn test_plain_has_no_tag() {
        let leaf = TextRun::Plain("This is a text node".to_owned()).to_leaf();
        assert_eq!(leaf.tag, None);
        assert_eq!(leaf.value.as_deref(), Some("This is a text node"));
        assert!(leaf.attrs.is_empty());
    }

    #[test]
    fn test_bold_italic_code() {
        assert_eq!(html(&TextRun::Bold("bold".to_owned())), "<b>bold</b>");
        assert_eq!(html(&TextRun::Italic("it".to_owned())), "<i>it</i>");
        assert_eq!(
            html(&TextRun::Code("let x = 1;".to_owned())),
            "<code>let x = 1;</code>"
        );
    }

    #[test]
    fn test_link() {
        let run = TextRun::Link {
            text: "Boot.dev".to_owned(),
            url: "https://www.boot.dev".to_owned(),
        };
        let leaf = run.to_leaf();
        assert_eq!(leaf.tag.as_deref(), Some("a"));
        assert_eq!(leaf.attrs.get("href"), Some("https://www.boot.dev"));
        assert_eq!(html(&run), r#"<a href="https://www.boot.dev">Boot.dev</a>"#);
    }

    #[test]
    fn test_image() {
        let run = TextRun::Image {
            alt: "alt text".to_owned(),
            url: "https://example.com/img.png".to_owned(),
        };
        let leaf = run.to_leaf();
        assert_eq!(leaf.value.as_deref(), Some(""));
        assert_eq!(
            html(&run),
            r#"<img src="https://example.com/img.png" alt="alt text"></img>"#
        );
    }

    #[test]
    fn test_target_only_for_link_and_image() {
        assert_eq!(TextRun::Plain("a".to_owned()).target(), None);
        assert_eq!(TextRun::Code("a".to_owned()).target(), None);
        let link = TextRun::Link {
            text: "a".to_owned(),
            url: "u".to_owned(),
        };
        assert_eq!(link.target(), Some("u"));
        assert_eq!(link.kind(), TextKind::Link);
        assert_eq!(link.content(), "a");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(TextKind::Image.to_string(), "image");
        assert_eq!(TextRun::Bold("b".to_owned()).kind().as_str(), "bold");
    }
}
