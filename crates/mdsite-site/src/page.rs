//! Single page generation: title extraction and template merge.

use mdsite_markdown::{MarkdownError, markdown_to_html};

use crate::template::{Template, rewrite_base_path};

/// Error generating a single page.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    /// No line starts with `# `.
    #[error("no '# ' title header found")]
    MissingTitleHeader,
    #[error(transparent)]
    Markdown(#[from] MarkdownError),
}

/// Extract the page title from the first `# ` header line.
///
/// The marker and surrounding whitespace are stripped. Lines are not
/// trimmed before matching, so an indented `# ` does not count.
///
/// Only the leading `# ` is removed. `#` characters inside or at the end of
/// the title are kept, so `# C# and F#` yields `C# and F#`, not `C# and F`
/// as a character-set strip of `"# "` from both ends would give.
///
/// # Errors
///
/// Returns [`PageError::MissingTitleHeader`] if no line starts with `# `.
pub fn extract_title(markdown: &str) -> Result<String, PageError> {
    markdown
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_owned())
        .ok_or(PageError::MissingTitleHeader)
}

/// Render a markdown document into a full HTML page.
///
/// The document is converted, its title extracted, both are substituted into
/// `template`, and root-relative URLs of the result are prefixed with
/// `base_path`.
pub fn generate_page(
    markdown: &str,
    template: &Template,
    base_path: &str,
) -> Result<String, PageError> {
    let content = markdown_to_html(markdown)?;
    let title = extract_title(markdown)?;
    let page = template.render(&title, &content);
    Ok(rewrite_base_path(&page, base_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_title() {
        assert_eq!(extract_title("# Hello").unwrap(), "Hello");
    }

    #[test]
    fn test_extract_title_first_header_wins() {
        let md = "Intro line\n\n# First\n\n# Second";
        assert_eq!(extract_title(md).unwrap(), "First");
    }

    #[test]
    fn test_extract_title_strips_whitespace() {
        assert_eq!(extract_title("#    Spaced out   ").unwrap(), "Spaced out");
    }

    #[test]
    fn test_extract_title_keeps_inner_hashes() {
        assert_eq!(extract_title("# C# and F#").unwrap(), "C# and F#");
    }

    #[test]
    fn test_extract_title_ignores_subheadings() {
        let md = "## Not a title\n### Nor this";
        assert_eq!(extract_title(md), Err(PageError::MissingTitleHeader));
    }

    #[test]
    fn test_extract_title_missing() {
        assert_eq!(extract_title(""), Err(PageError::MissingTitleHeader));
        assert_eq!(extract_title("#NoSpace"), Err(PageError::MissingTitleHeader));
        assert_eq!(extract_title("  # indented"), Err(PageError::MissingTitleHeader));
    }

    #[test]
    fn test_generate_page() {
        let template = Template::new(
            "<html><title>{{ Title }}</title><body>{{ Content }}</body></html>",
        );
        let md = "# Tolkien\n\nRead [more](/blog/)";

        let page = generate_page(md, &template, "/site/").unwrap();

        assert_eq!(
            page,
            "<html><title>Tolkien</title><body><div><h1>Tolkien</h1>\
             <p>Read <a href=\"/site/blog/\">more</a></p></div></body></html>"
        );
    }

    #[test]
    fn test_generate_page_rewrites_template_links() {
        let template = Template::new(
            r#"<link href="/index.css"><img src="/logo.png"></img>{{ Content }}"#,
        );

        let page = generate_page("# T", &template, "/repo/").unwrap();

        assert_eq!(
            page,
            r#"<link href="/repo/index.css"><img src="/repo/logo.png"></img><div><h1>T</h1></div>"#
        );
    }

    #[test]
    fn test_generate_page_missing_title() {
        let template = Template::new("{{ Content }}");
        assert_eq!(
            generate_page("just text", &template, "/"),
            Err(PageError::MissingTitleHeader)
        );
    }

    #[test]
    fn test_generate_page_markdown_error() {
        let template = Template::new("{{ Content }}");
        assert_eq!(
            generate_page("# Title\n\nan **unclosed bold", &template, "/"),
            Err(PageError::Markdown(MarkdownError::UnclosedDelimiter {
                delimiter: "**"
            }))
        );
    }
}
