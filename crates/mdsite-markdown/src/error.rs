//! Conversion errors.

/// Error raised while converting markdown to a render tree or serializing it.
///
/// Every variant is fatal for the document being converted: no partial
/// output is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkdownError {
    /// An inline delimiter appears an odd number of times in one text run.
    #[error("Invalid markdown: formatted section not closed (delimiter `{delimiter}`)")]
    UnclosedDelimiter {
        /// The delimiter that was left open (`_`, `**` or `` ` ``).
        delimiter: &'static str,
    },

    /// An image or link pattern has an empty text or an empty URL.
    #[error("Malformed {kind} markdown: missing text or URL")]
    MalformedInlineMarkup {
        /// `"image"` or `"link"`.
        kind: &'static str,
    },

    /// A block does not have the shape its type requires.
    #[error("Invalid {block} block: {reason}")]
    InvalidBlockShape {
        /// Block type name, e.g. `"code"`.
        block: &'static str,
        /// What is wrong with the block.
        reason: String,
    },

    /// A value outside a closed enumeration reached a renderer.
    #[error("Invalid variant: {0}")]
    InvalidVariant(String),

    /// A container node without a tag was serialized.
    #[error("Invalid HTML: no tag")]
    MissingTag,

    /// A leaf node without a value was serialized.
    #[error("Invalid HTML: no value")]
    MissingValue,
}
