//! Static page generation for mdsite.
//!
//! Turns a directory of markdown files into HTML pages by merging each
//! rendered document into a page template, and copies static assets
//! alongside the pages.

mod assets;
mod builder;
mod error;
mod page;
mod template;

pub use assets::copy_static;
pub use builder::{BuildReport, SiteBuilder};
pub use error::BuildError;
pub use page::{PageError, extract_title, generate_page};
pub use template::{CONTENT_PLACEHOLDER, TITLE_PLACEHOLDER, Template, rewrite_base_path};
