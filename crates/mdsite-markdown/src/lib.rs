//! Markdown to HTML conversion for a restricted markdown dialect.
//!
//! Conversion runs in two stages:
//!
//! 1. The document is split into blank-line separated blocks, and each block
//!    is classified as a heading, paragraph, code block, quote, or list
//!    ([`segment`], [`classify`]).
//! 2. The literal text of each block is lexed into typed inline runs (bold,
//!    italic, code, links, images) and rendered into leaf nodes ([`lex`]).
//!
//! The result is a [`RenderNode`] tree rooted at a `div`, which serializes to
//! an HTML fragment. Text is written verbatim, without HTML escaping.
//!
//! Every function here is pure: no I/O, no global state.
//!
//! # Example
//!
//! ```
//! let html = mdsite_markdown::markdown_to_html("# Hello\n\nSome **bold** text").unwrap();
//! assert_eq!(html, "<div><h1>Hello</h1><p>Some <b>bold</b> text</p></div>");
//! ```

mod block;
mod error;
mod inline;
mod node;
mod renderer;
mod text;

pub use block::{BlockType, classify, segment};
pub use error::MarkdownError;
pub use inline::{lex, text_to_children};
pub use node::{Attributes, ContainerNode, LeafNode, RenderNode};
pub use renderer::{block_to_node, markdown_to_html, markdown_to_node, render_block_as};
pub use text::{TextKind, TextRun};
