//! Markdown rendering service
//!
//! Converts post bodies to HTML with pulldown-cmark. Raw HTML in the source is
//! escaped rather than passed through.
//!
//! ```
//! use inkpost::services::markdown::MarkdownRenderer;
//!
//! let html = MarkdownRenderer::new().render("# Hello World\n\nThis is **bold** text.");
//! assert!(html.contains("<h1>Hello World</h1>"));
//! assert!(html.contains("<strong>bold</strong>"));
//! ```

use pulldown_cmark::{html, Event, Options, Parser};

#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    options: Options,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    /// Renderer with tables, strikethrough, task lists and footnotes enabled
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_FOOTNOTES);
        Self { options }
    }

    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options).map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            other => other,
        });

        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut output, parser);
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let html = MarkdownRenderer::new().render("## Title\n\n- one\n- two\n");
        assert!(html.contains("<h2>Title</h2>"));
        assert!(html.contains("<li>one</li>"));
    }

    #[test]
    fn test_render_tables() {
        let html = MarkdownRenderer::new().render("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = MarkdownRenderer::new().render("<script>alert(1)</script>\n\ntext <b>x</b>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<b>"));
    }
}
