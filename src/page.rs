//! Page assembly: pulling the title out of a document and filling a template.

use crate::error::{Error, Result};

const TITLE_PLACEHOLDER: &str = "{{ Title }}";
const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// Text of the first `# ` heading line.
pub fn extract_title(markdown: &str) -> Result<String> {
    markdown
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .ok_or(Error::MissingTitle)
}

/// Substitute title and content into `template`, then point root-relative
/// links at `base_path`.
pub fn render_page(template: &str, title: &str, content: &str, base_path: &str) -> String {
    let page = template
        .replace(TITLE_PLACEHOLDER, title)
        .replace(CONTENT_PLACEHOLDER, content);
    rewrite_base_path(&page, base_path)
}

pub fn rewrite_base_path(html: &str, base_path: &str) -> String {
    html.replace("href=\"/", &format!("href=\"{base_path}"))
        .replace("src=\"/", &format!("src=\"{base_path}"))
}
