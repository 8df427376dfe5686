//! Block rendering and the document entry points.

use std::sync::LazyLock;

use regex::Regex;

use crate::MarkdownError;
use crate::block::{BlockType, classify, heading_level, ordinal_marker, segment};
use crate::inline::text_to_children;
use crate::node::{ContainerNode, RenderNode};
use crate::text::TextRun;

/// Opening fence (with optional info string), body, closing fence.
static CODE_BLOCK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A```[^\n]*\n(?:(.*?)\n)?```\z").unwrap());

/// Convert a markdown document into a render tree rooted at a `div`.
///
/// # Errors
///
/// Fails on the first block that cannot be rendered; no partial tree is
/// returned.
pub fn markdown_to_node(markdown: &str) -> Result<RenderNode, MarkdownError> {
    let children = segment(markdown)
        .iter()
        .map(|block| block_to_node(block))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ContainerNode::new("div", children).into())
}

/// Convert a markdown document straight to an HTML fragment.
pub fn markdown_to_html(markdown: &str) -> Result<String, MarkdownError> {
    markdown_to_node(markdown)?.to_html()
}

/// Classify a block and render it.
pub fn block_to_node(block: &str) -> Result<RenderNode, MarkdownError> {
    render_block_as(block, classify(block))
}

/// Render a block as the given type.
///
/// # Errors
///
/// - [`MarkdownError::InvalidBlockShape`] if the block does not have the
///   shape `block_type` requires.
/// - [`MarkdownError::InvalidVariant`] for a heading level outside `1..=6`.
/// - Any inline lexing error from the block's text.
pub fn render_block_as(block: &str, block_type: BlockType) -> Result<RenderNode, MarkdownError> {
    let container = match block_type {
        BlockType::Heading { level } => {
            BlockType::heading(level)?;
            render_heading(block, level)?
        }
        BlockType::Paragraph => render_paragraph(block)?,
        BlockType::Code => render_code(block)?,
        BlockType::Quote => render_quote(block)?,
        BlockType::UnorderedList => render_unordered_list(block)?,
        BlockType::OrderedList => render_ordered_list(block)?,
    };
    Ok(container.into())
}

fn render_heading(block: &str, level: u8) -> Result<ContainerNode, MarkdownError> {
    if heading_level(block) != Some(level) {
        return Err(MarkdownError::InvalidBlockShape {
            block: "heading",
            reason: format!("expected {level} `#` followed by a space"),
        });
    }

    let text = block[usize::from(level) + 1..].trim();
    let text = text.lines().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        return Err(MarkdownError::InvalidBlockShape {
            block: "heading",
            reason: "heading text is empty".to_owned(),
        });
    }

    Ok(ContainerNode::new(
        format!("h{level}"),
        text_to_children(&text)?,
    ))
}

fn render_paragraph(block: &str) -> Result<ContainerNode, MarkdownError> {
    let text = block.split('\n').collect::<Vec<_>>().join(" ");
    Ok(ContainerNode::new("p", text_to_children(&text)?))
}

fn render_code(block: &str) -> Result<ContainerNode, MarkdownError> {
    let caps = CODE_BLOCK_PATTERN
        .captures(block)
        .ok_or_else(|| MarkdownError::InvalidBlockShape {
            block: "code",
            reason: "expected an opening fence, a body and a closing ``` line".to_owned(),
        })?;
    let body = caps.get(1).map_or("", |m| m.as_str()).trim();

    // The body is one raw run: markup inside code is never lexed.
    let text = TextRun::Plain(body.to_owned()).to_leaf();
    let code = ContainerNode::new("code", vec![text.into()]);
    Ok(ContainerNode::new("pre", vec![code.into()]))
}

fn render_quote(block: &str) -> Result<ContainerNode, MarkdownError> {
    let mut lines = Vec::new();
    for line in block.split('\n') {
        if !line.starts_with('>') {
            return Err(MarkdownError::InvalidBlockShape {
                block: "quote",
                reason: format!("line does not start with `>`: {line:?}"),
            });
        }
        lines.push(line.trim_start_matches('>').trim());
    }
    let text = lines.join(" ");
    Ok(ContainerNode::new("blockquote", text_to_children(&text)?))
}

fn render_unordered_list(block: &str) -> Result<ContainerNode, MarkdownError> {
    let items = block
        .split('\n')
        .map(|line| list_item(skip_chars(line, 2)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ContainerNode::new("ul", items))
}

fn render_ordered_list(block: &str) -> Result<ContainerNode, MarkdownError> {
    let items = block
        .split('\n')
        .enumerate()
        .map(|(i, line)| {
            let text = line
                .strip_prefix(ordinal_marker(i + 1).as_str())
                .unwrap_or_else(|| skip_chars(line, 3));
            list_item(text)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ContainerNode::new("ol", items))
}

fn list_item(text: &str) -> Result<RenderNode, MarkdownError> {
    Ok(ContainerNode::new("li", text_to_children(text)?).into())
}

/// Drop the first `n` characters of `s`.
fn skip_chars(s: &str, n: usize) -> &str {
    s.char_indices().nth(n).map_or("", |(i, _)| &s[i..])
}
