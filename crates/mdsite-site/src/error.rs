//! Site build errors.

use std::io;
use std::path::{Path, PathBuf};

use mdsite_markdown::MarkdownError;

use crate::page::PageError;

/// Error returned by the site builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: {source}", path.display())]
    Markdown {
        path: PathBuf,
        #[source]
        source: MarkdownError,
    },

    #[error("{}: no '# ' title header found", path.display())]
    MissingTitle { path: PathBuf },

    #[error("template {}: {reason}", path.display())]
    Template { path: PathBuf, reason: String },
}

impl BuildError {
    /// Attach a page path to a page generation error.
    pub(crate) fn page(path: &Path, err: PageError) -> Self {
        match err {
            PageError::MissingTitleHeader => Self::MissingTitle {
                path: path.to_path_buf(),
            },
            PageError::Markdown(source) => Self::Markdown {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

/// Wrap an I/O error with the path it occurred at.
pub(crate) fn io_error(path: &Path) -> impl FnOnce(io::Error) -> BuildError + '_ {
    move |source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    }
}
