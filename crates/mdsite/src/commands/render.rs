//! `mdsite render` command implementation.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use mdsite_markdown::{markdown_to_html, markdown_to_node};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render.
    file: PathBuf,

    /// Print the render tree as JSON instead of HTML.
    #[arg(long)]
    pub(crate) tree: bool,
}

impl RenderArgs {
    /// Execute the render command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let markdown = fs::read_to_string(&self.file)?;
        let text = render(&markdown, self.tree)?;
        Output::new().result(&text)?;
        Ok(())
    }
}

fn render(markdown: &str, tree: bool) -> Result<String, CliError> {
    if tree {
        let node = markdown_to_node(markdown)?;
        Ok(serde_json::to_string_pretty(&node)?)
    } else {
        Ok(markdown_to_html(markdown)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_html() {
        assert_eq!(
            render("# Title\n\n- a\n- b", false).unwrap(),
            "<div><h1>Title</h1><ul><li>a</li><li>b</li></ul></div>"
        );
    }

    #[test]
    fn test_render_tree() {
        let json: serde_json::Value =
            serde_json::from_str(&render("> quoted", true).unwrap()).unwrap();
        assert_eq!(json["tag"], "div");
        assert_eq!(json["children"][0]["tag"], "blockquote");
    }

    #[test]
    fn test_render_error() {
        let err = render("_open", false).unwrap_err();
        assert!(matches!(err, CliError::Markdown(_)));
    }

    #[test]
    fn test_render_missing_file() {
        let args = RenderArgs {
            file: PathBuf::from("/nonexistent/page.md"),
            tree: false,
        };
        assert!(matches!(args.execute(), Err(CliError::Io(_))));
    }
}
