//! Markdown rendering using pulldown-cmark.

use pulldown_cmark::{Options, Parser, html};
use regex::Regex;

/// Markdown-to-HTML renderer.
///
/// Output is final body HTML; callers treat it as opaque text.
#[derive(Debug)]
pub struct MarkdownRenderer {
    options: Options,
    mermaid_block: Regex,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    /// Create a renderer with the extensions used by site content.
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);

        // Fenced mermaid blocks are handed to the client-side renderer as
        // plain divs instead of code blocks.
        let mermaid_block =
            Regex::new(r#"(?s)<pre><code class="language-mermaid">(.*?)</code></pre>"#)
                .expect("mermaid block pattern is valid");

        Self {
            options,
            mermaid_block,
        }
    }

    /// Render a markdown body to HTML.
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);
        let mut out = String::with_capacity(markdown.len() * 2);
        html::push_html(&mut out, parser);

        self.rewrite_mermaid(&out)
    }

    /// Rewrite fenced mermaid code blocks into `<div class="mermaid">`.
    fn rewrite_mermaid(&self, body: &str) -> String {
        self.mermaid_block
            .replace_all(body, r#"<div class="mermaid">$1</div>"#)
            .into_owned()
    }
}
