//! Block segmentation and classification.

use std::fmt;

use crate::MarkdownError;

/// Type of a markdown block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum BlockType {
    Paragraph,
    /// Heading with level 1 to 6.
    Heading {
        level: u8,
    },
    Code,
    Quote,
    UnorderedList,
    OrderedList,
}

impl BlockType {
    /// Create a heading type, validating the level.
    ///
    /// # Errors
    ///
    /// Returns [`MarkdownError::InvalidVariant`] if `level` is not in `1..=6`.
    pub fn heading(level: u8) -> Result<Self, MarkdownError> {
        if (1..=6).contains(&level) {
            Ok(Self::Heading { level })
        } else {
            Err(MarkdownError::InvalidVariant(format!(
                "heading level {level}"
            )))
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Heading { .. } => "heading",
            Self::Code => "code",
            Self::Quote => "quote",
            Self::UnorderedList => "unordered_list",
            Self::OrderedList => "ordered_list",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Heading { level } => write!(f, "heading({level})"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Split a document into blocks.
///
/// The document is trimmed and split on blank lines (`\n\n`). Every line of
/// a block is trimmed, and blocks that end up empty are dropped. Returned
/// blocks are never empty and never start or end with a newline.
pub fn segment(document: &str) -> Vec<String> {
    document
        .trim()
        .split("\n\n")
        .map(|chunk| {
            chunk
                .lines()
                .map(str::trim)
                .collect::<Vec<_>>()
                .join("\n")
                .trim()
                .to_owned()
        })
        .filter(|block| !block.is_empty())
        .collect()
}

/// Classify a block.
///
/// Checks run in order and the first match wins:
///
/// 1. heading: 1 to 6 `#` followed by a space
/// 2. code: more than one line, first and last lines start with a fence
/// 3. quote: every line starts with `>`
/// 4. unordered list: every line starts with `- `
/// 5. ordered list: line `i` starts with `{i + 1}. `
///
/// Anything else, including the empty string, is a paragraph.
pub fn classify(block: &str) -> BlockType {
    if let Some(level) = heading_level(block) {
        return BlockType::Heading { level };
    }

    let lines: Vec<&str> = block.split('\n').collect();

    if lines.len() > 1
        && lines.first().is_some_and(|l| l.starts_with("```"))
        && lines.last().is_some_and(|l| l.starts_with("```"))
    {
        return BlockType::Code;
    }

    if block.is_empty() {
        return BlockType::Paragraph;
    }

    if lines.iter().all(|l| l.starts_with('>')) {
        return BlockType::Quote;
    }

    if block.starts_with("- ") {
        return if lines.iter().all(|l| l.starts_with("- ")) {
            BlockType::UnorderedList
        } else {
            BlockType::Paragraph
        };
    }

    if block.starts_with("1. ") {
        let numbered = lines
            .iter()
            .enumerate()
            .all(|(i, l)| l.starts_with(&ordinal_marker(i + 1)));
        return if numbered {
            BlockType::OrderedList
        } else {
            BlockType::Paragraph
        };
    }

    BlockType::Paragraph
}

/// Level of a `#`-prefixed heading, if the block starts with one.
pub(crate) fn heading_level(block: &str) -> Option<u8> {
    let hashes = block.bytes().take_while(|&b| b == b'#').count();
    if (1..=6).contains(&hashes) && block.as_bytes().get(hashes) == Some(&b' ') {
        u8::try_from(hashes).ok()
    } else {
        None
    }
}

/// Marker of the `n`-th ordered list item, e.g. `"3. "`.
pub(crate) fn ordinal_marker(n: usize) -> String {
    format!("{n}. ")
}
