//! Inline lexer.
//!
//! Turns the literal text of a block into a sequence of [`TextRun`]s. The
//! text starts out as a single plain run and goes through five passes, each
//! of which only rewrites runs that are still plain:
//!
//! 1. `_` splits out italic runs
//! 2. `**` splits out bold runs
//! 3. `` ` `` splits out code runs
//! 4. `![alt](url)` extracts images
//! 5. `[text](url)` extracts links
//!
//! Delimiter passes are positional: the text is split on every occurrence of
//! the delimiter and the pieces alternate between plain (even index) and the
//! target kind (odd index). There is no nesting.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::MarkdownError;
use crate::node::RenderNode;
use crate::text::TextRun;

static IMAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\[\]]*)\]\(([^\(\)]*)\)").unwrap());

// The `regex` crate has no look-behind; matches preceded by `!` are
// discarded while scanning.
static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]]*)\]\(([^\(\)]*)\)").unwrap());

/// Lex inline markdown into typed text runs.
///
/// Empty pieces are dropped, so the result never contains an empty plain run
/// and an empty input yields an empty sequence.
///
/// # Errors
///
/// - [`MarkdownError::UnclosedDelimiter`] if `_`, `**` or `` ` `` occurs an odd
///   number of times in a plain run.
/// - [`MarkdownError::MalformedInlineMarkup`] if an image or link has an empty
///   text or URL.
pub fn lex(text: &str) -> Result<Vec<TextRun>, MarkdownError> {
    let runs = vec![TextRun::Plain(text.to_owned())];
    let runs = split_delimiter(runs, "_", TextRun::Italic)?;
    let runs = split_delimiter(runs, "**", TextRun::Bold)?;
    let runs = split_delimiter(runs, "`", TextRun::Code)?;
    let runs = split_images(runs)?;
    split_links(runs)
}

/// Lex inline markdown and render every run as a leaf node.
pub fn text_to_children(text: &str) -> Result<Vec<RenderNode>, MarkdownError> {
    Ok(lex(text)?
        .iter()
        .map(|run| RenderNode::from(run.to_leaf()))
        .collect())
}

/// Split plain runs on `delimiter`, wrapping odd-indexed pieces with `wrap`.
fn split_delimiter(
    runs: Vec<TextRun>,
    delimiter: &'static str,
    wrap: fn(String) -> TextRun,
) -> Result<Vec<TextRun>, MarkdownError> {
    let mut out = Vec::with_capacity(runs.len());
    for run in runs {
        let TextRun::Plain(text) = run else {
            out.push(run);
            continue;
        };

        let sections: Vec<&str> = text.split(delimiter).collect();
        if sections.len() % 2 == 0 {
            return Err(MarkdownError::UnclosedDelimiter { delimiter });
        }

        // Parity follows the split index, not the output position.
        for (i, section) in sections.into_iter().enumerate() {
            if section.is_empty() {
                continue;
            }
            if i % 2 == 0 {
                out.push(TextRun::Plain(section.to_owned()));
            } else {
                out.push(wrap(section.to_owned()));
            }
        }
    }
    Ok(out)
}

fn split_images(runs: Vec<TextRun>) -> Result<Vec<TextRun>, MarkdownError> {
    split_pattern(runs, &IMAGE_PATTERN, "image", false, |alt, url| {
        TextRun::Image { alt, url }
    })
}

fn split_links(runs: Vec<TextRun>) -> Result<Vec<TextRun>, MarkdownError> {
    split_pattern(runs, &LINK_PATTERN, "link", true, |text, url| TextRun::Link {
        text,
        url,
    })
}

/// Extract every match of `pattern` from plain runs.
///
/// Literal text around matches stays plain. A run without matches passes
/// through unchanged.
fn split_pattern(
    runs: Vec<TextRun>,
    pattern: &Regex,
    kind: &'static str,
    reject_after_bang: bool,
    make: fn(String, String) -> TextRun,
) -> Result<Vec<TextRun>, MarkdownError> {
    let mut out = Vec::with_capacity(runs.len());
    for run in runs {
        let TextRun::Plain(text) = run else {
            out.push(run);
            continue;
        };

        let mut cursor = 0;
        let mut matched = false;
        for caps in pattern.captures_iter(&text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if reject_after_bang && text[..whole.start()].ends_with('!') {
                continue;
            }

            let label = group(&caps, 1);
            let url = group(&caps, 2);
            if label.is_empty() || url.is_empty() {
                return Err(MarkdownError::MalformedInlineMarkup { kind });
            }

            if whole.start() > cursor {
                out.push(TextRun::Plain(text[cursor..whole.start()].to_owned()));
            }
            out.push(make(label.to_owned(), url.to_owned()));
            cursor = whole.end();
            matched = true;
        }

        if !matched {
            out.push(TextRun::Plain(text));
        } else if cursor < text.len() {
            out.push(TextRun::Plain(text[cursor..].to_owned()));
        }
    }
    Ok(out)
}

fn group<'t>(caps: &Captures<'t>, index: usize) -> &'t str {
    caps.get(index).map_or("", |m| m.as_str())
}
