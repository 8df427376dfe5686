//! Static site builder.
//!
//! A build runs in phases:
//!
//! 1. Discover `.md` files under the content directory
//! 2. Render every page in parallel
//! 3. Optionally clear the output directory
//! 4. Copy static assets
//! 5. Write pages, mirroring the content layout with `.html` extensions
//!
//! The output directory is only touched once every page has rendered, so a
//! malformed document leaves the previous build in place.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::assets::copy_static;
use crate::error::{BuildError, io_error};
use crate::page::generate_page;
use crate::template::{CONTENT_PLACEHOLDER, Template};

/// Summary of a finished build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildReport {
    /// Generated HTML pages.
    pub pages: usize,
    /// Copied static files.
    pub assets: usize,
}

/// A markdown source and the page it becomes.
#[derive(Debug)]
struct PageJob {
    source: PathBuf,
    dest: PathBuf,
}

/// Builds a static site from a directory of markdown files.
#[derive(Debug, Clone)]
pub struct SiteBuilder {
    content_dir: PathBuf,
    output_dir: PathBuf,
    template_path: PathBuf,
    static_dir: Option<PathBuf>,
    base_path: String,
    clean: bool,
}

impl SiteBuilder {
    /// Create a builder with base path `/`, no static directory and cleaning
    /// enabled.
    pub fn new(
        content_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        template_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            content_dir: content_dir.into(),
            output_dir: output_dir.into(),
            template_path: template_path.into(),
            static_dir: None,
            base_path: "/".to_owned(),
            clean: true,
        }
    }

    /// Copy files from `static_dir` into the output before generating pages.
    #[must_use]
    pub fn with_static_dir(mut self, static_dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(static_dir.into());
        self
    }

    /// Prefix for root-relative URLs in generated pages.
    #[must_use]
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Whether to delete the output directory before building.
    #[must_use]
    pub fn with_clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Build the site.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered. Page errors carry the path of the
    /// offending markdown file.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let template = self.load_template()?;
        let jobs = self.discover_pages()?;

        let rendered = jobs
            .par_iter()
            .map(|job| self.render(job, &template).map(|html| (job, html)))
            .collect::<Result<Vec<_>, _>>()?;

        if self.clean && self.output_dir.exists() {
            fs::remove_dir_all(&self.output_dir).map_err(io_error(&self.output_dir))?;
            tracing::info!(path = %self.output_dir.display(), "Cleared output directory");
        }
        fs::create_dir_all(&self.output_dir).map_err(io_error(&self.output_dir))?;

        let assets = match &self.static_dir {
            Some(static_dir) => copy_static(static_dir, &self.output_dir)?,
            None => 0,
        };

        rendered
            .par_iter()
            .try_for_each(|(job, html)| write_page(job, html))?;

        let report = BuildReport {
            pages: rendered.len(),
            assets,
        };
        tracing::info!(
            pages = report.pages,
            assets = report.assets,
            output = %self.output_dir.display(),
            "Site build completed"
        );
        Ok(report)
    }

    fn load_template(&self) -> Result<Template, BuildError> {
        let text = fs::read_to_string(&self.template_path).map_err(io_error(&self.template_path))?;
        let template = Template::new(text);
        if !template.has_content_slot() {
            return Err(BuildError::Template {
                path: self.template_path.clone(),
                reason: format!("missing {CONTENT_PLACEHOLDER} placeholder"),
            });
        }
        Ok(template)
    }

    fn render(&self, job: &PageJob, template: &Template) -> Result<String, BuildError> {
        let markdown = fs::read_to_string(&job.source).map_err(io_error(&job.source))?;
        generate_page(&markdown, template, &self.base_path)
            .map_err(|err| BuildError::page(&job.source, err))
    }

    /// Collect page jobs in a stable, sorted order.
    fn discover_pages(&self) -> Result<Vec<PageJob>, BuildError> {
        let mut jobs = Vec::new();
        self.scan_directory(&self.content_dir, &self.output_dir, &mut jobs)?;
        tracing::debug!(page_count = jobs.len(), "Content scan completed");
        Ok(jobs)
    }

    fn scan_directory(
        &self,
        dir: &Path,
        dest_dir: &Path,
        jobs: &mut Vec<PageJob>,
    ) -> Result<(), BuildError> {
        let mut entries = fs::read_dir(dir)
            .map_err(io_error(dir))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(io_error(dir))?;
        entries.sort_by_key(fs::DirEntry::file_name);

        for entry in entries {
            // Skip hidden files/dirs
            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }

            let path = entry.path();
            let is_dir = entry.file_type().map_err(io_error(&path))?.is_dir();

            if is_dir {
                self.scan_directory(&path, &dest_dir.join(entry.file_name()), jobs)?;
            } else if path.extension().is_some_and(|e| e == "md") {
                let dest = dest_dir.join(entry.file_name()).with_extension("html");
                jobs.push(PageJob { source: path, dest });
            }
        }

        Ok(())
    }
}

fn write_page(job: &PageJob, html: &str) -> Result<(), BuildError> {
    if let Some(parent) = job.dest.parent() {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }
    fs::write(&job.dest, html).map_err(io_error(&job.dest))?;
    tracing::info!(
        from = %job.source.display(),
        to = %job.dest.display(),
        "Generated page"
    );
    Ok(())
}
