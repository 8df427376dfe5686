//! Page template substitution and base path rewriting.

/// Placeholder replaced with the page title.
pub const TITLE_PLACEHOLDER: &str = "{{ Title }}";
/// Placeholder replaced with the rendered page body.
pub const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// HTML page template with `{{ Title }}` and `{{ Content }}` placeholders.
#[derive(Debug, Clone)]
pub struct Template {
    text: String,
}

impl Template {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Whether the template has somewhere to put page content.
    pub fn has_content_slot(&self) -> bool {
        self.text.contains(CONTENT_PLACEHOLDER)
    }

    /// Substitute every placeholder occurrence.
    ///
    /// The title is substituted first, so a `{{ Title }}` inside the content
    /// is left as is.
    pub fn render(&self, title: &str, content: &str) -> String {
        self.text
            .replace(TITLE_PLACEHOLDER, title)
            .replace(CONTENT_PLACEHOLDER, content)
    }
}

/// Prefix root-relative `href` and `src` attribute values with `base_path`.
///
/// Only double-quoted values starting with `/` are rewritten. A base path of
/// `/` leaves the HTML unchanged.
pub fn rewrite_base_path(html: &str, base_path: &str) -> String {
    html.replace(r#"href="/"#, &format!(r#"href="{base_path}"#))
        .replace(r#"src="/"#, &format!(r#"src="{base_path}"#))
}
