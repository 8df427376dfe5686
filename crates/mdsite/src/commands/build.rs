//! `mdsite build` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdsite_config::{CliSettings, Config};
use mdsite_site::SiteBuilder;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// URL prefix for root-relative links, e.g. `/my-repo/` (overrides config).
    #[arg(env = "MDSITE_BASE_PATH")]
    pub(crate) base_path: Option<String>,

    /// Path to configuration file (default: auto-discover mdsite.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown content directory (overrides config).
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Static assets directory (overrides config).
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Page template file (overrides config).
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Keep existing files in the output directory.
    #[arg(long)]
    pub(crate) no_clean: bool,

    /// Enable verbose output (log every generated page).
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or any page fails to build.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            base_path: self.base_path,
            content_dir: self.content_dir,
            static_dir: self.static_dir,
            output_dir: self.output_dir,
            template: self.template,
            clean: self.no_clean.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::debug!(path = %path.display(), "Loaded configuration");
        }

        let paths = &config.paths_resolved;
        output.info(&format!("Content: {}", paths.content_dir.display()));
        output.info(&format!("Output: {}", paths.output_dir.display()));

        let builder = SiteBuilder::new(&paths.content_dir, &paths.output_dir, &paths.template)
            .with_static_dir(&paths.static_dir)
            .with_base_path(config.site.base_path.as_str())
            .with_clean(config.build.clean);

        let report = builder.build()?;

        output.success(&format!(
            "Built {} pages ({} static files) to {}",
            report.pages,
            report.assets,
            builder.output_dir().display()
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn args(config: PathBuf) -> BuildArgs {
        BuildArgs {
            base_path: None,
            config: Some(config),
            content_dir: None,
            static_dir: None,
            output_dir: None,
            template: None,
            no_clean: false,
            verbose: false,
        }
    }

    #[test]
    fn test_build_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("mdsite.toml"),
            "[site]\nbase_path = \"/blog/\"\n\n[paths]\noutput_dir = \"public\"\n",
        )
        .unwrap();
        fs::write(root.join("template.html"), "<main>{{ Content }}</main>").unwrap();
        fs::create_dir_all(root.join("content")).unwrap();
        fs::write(root.join("content/index.md"), "# Hi\n\n[home](/)").unwrap();

        args(root.join("mdsite.toml")).execute().unwrap();

        assert_eq!(
            fs::read_to_string(root.join("public/index.html")).unwrap(),
            r#"<main><div><h1>Hi</h1><p><a href="/blog/">home</a></p></div></main>"#
        );
    }

    #[test]
    fn test_build_cli_base_path_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("mdsite.toml"), "[site]\nbase_path = \"/blog/\"\n").unwrap();
        fs::write(root.join("template.html"), "{{ Content }}").unwrap();
        fs::create_dir_all(root.join("content")).unwrap();
        fs::write(root.join("content/index.md"), "# Hi\n\n![x](/a.png)").unwrap();

        BuildArgs {
            base_path: Some("/repo/".to_owned()),
            ..args(root.join("mdsite.toml"))
        }
        .execute()
        .unwrap();

        let html = fs::read_to_string(root.join("docs/index.html")).unwrap();
        assert!(html.contains(r#"src="/repo/a.png""#));
    }

    #[test]
    fn test_build_reports_page_error() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("mdsite.toml"), "").unwrap();
        fs::write(root.join("template.html"), "{{ Content }}").unwrap();
        fs::create_dir_all(root.join("content")).unwrap();
        fs::write(root.join("content/index.md"), "no title").unwrap();

        let err = args(root.join("mdsite.toml")).execute().unwrap_err();

        assert!(matches!(err, CliError::Build(_)));
        assert!(err.to_string().contains("index.md"));
    }
}
