//! HTML template system for page generation.
//!
//! A lightweight string-interpolation engine: the generator builds a context
//! of string variables per artifact and renders a named template with it.
//! This single `render(name, context)` operation is the only capability the
//! rest of the crate depends on.

use std::collections::HashMap;

use thiserror::Error;

/// Template rendering errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Missing required variable.
    #[error("missing required variable: {0}")]
    MissingVariable(String),

    /// Template not found.
    #[error("template not found: {0}")]
    NotFound(String),

    /// Invalid template syntax.
    #[error("invalid template syntax: {0}")]
    InvalidSyntax(String),
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Template context with variables for interpolation.
///
/// One context is constructed fresh per output artifact and never shared.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    variables: HashMap<String, String>,
}

impl TemplateContext {
    /// Create a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable into the context.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Create context with initial variables.
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a variable value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }
}

/// A named template supporting `{{ variable }}` interpolation.
///
/// `{{ variable? }}` marks an optional variable that renders as the empty
/// string when absent.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    content: String,
}

impl Template {
    /// Create a new template with the given name and content.
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Get the template name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the template with the given context.
    pub fn render(&self, context: &TemplateContext) -> Result<String> {
        let mut result = self.content.clone();
        let mut pos = 0;

        while let Some(start) = result[pos..].find("{{") {
            let start = pos + start;
            let end = result[start..]
                .find("}}")
                .ok_or_else(|| TemplateError::InvalidSyntax("unclosed {{ delimiter".to_string()))?;
            let end = start + end + 2;

            let var_name = result[start + 2..end - 2].trim();

            let (var_name, optional) = if let Some(stripped) = var_name.strip_suffix('?') {
                (stripped, true)
            } else {
                (var_name, false)
            };

            let value = match context.get(var_name) {
                Some(v) => v.to_string(),
                None if optional => String::new(),
                None => return Err(TemplateError::MissingVariable(var_name.to_string())),
            };

            result.replace_range(start..end, &value);
            pos = start + value.len();
        }

        Ok(result)
    }
}

/// Registry of templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, Template>,
}

impl TemplateRegistry {
    /// Create a new registry with default templates.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register_defaults();
        registry
    }

    /// Register default built-in templates.
    fn register_defaults(&mut self) {
        self.register(Template::new("base", DEFAULT_BASE_TEMPLATE));
        self.register(Template::new("home", DEFAULT_HOME_TEMPLATE));
        self.register(Template::new("about", DEFAULT_ABOUT_TEMPLATE));
        self.register(Template::new("now", DEFAULT_NOW_TEMPLATE));
        self.register(Template::new("not_found", DEFAULT_NOT_FOUND_TEMPLATE));
        self.register(Template::new("tags", DEFAULT_TAGS_TEMPLATE));
        self.register(Template::new("archive", DEFAULT_ARCHIVE_TEMPLATE));
        self.register(Template::new("blog", DEFAULT_BLOG_TEMPLATE));
        self.register(Template::new("post", DEFAULT_POST_TEMPLATE));
    }

    /// Register a template, replacing any existing one with the same name.
    pub fn register(&mut self, template: Template) {
        self.templates.insert(template.name.clone(), template);
    }

    /// Get a template by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Render a named template with the given context.
    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String> {
        let template = self
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;
        template.render(context)
    }
}

/// Default base HTML template.
pub const DEFAULT_BASE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    <meta name="description" content="{{ description? }}">
    <link rel="alternate" type="application/rss+xml" title="{{ site_title }}" href="{{ path_prefix? }}rss.xml">
    <style>
        :root {
            --color-bg: #fdfdfd;
            --color-text: #1f2933;
            --color-muted: #616e7c;
            --color-accent: #2563eb;
            --color-border: #e4e7eb;
            --color-code-bg: #f1f5f9;
        }

        @media (prefers-color-scheme: dark) {
            :root {
                --color-bg: #111827;
                --color-text: #e5e7eb;
                --color-muted: #9ca3af;
                --color-accent: #60a5fa;
                --color-border: #374151;
                --color-code-bg: #1f2937;
            }
        }

        * { box-sizing: border-box; margin: 0; padding: 0; }

        body {
            font-family: system-ui, -apple-system, 'Segoe UI', sans-serif;
            line-height: 1.7;
            color: var(--color-text);
            background: var(--color-bg);
            min-height: 100vh;
            display: flex;
            flex-direction: column;
        }

        .container { width: 100%; max-width: 720px; margin: 0 auto; padding: 0 1.25rem; }

        header { border-bottom: 1px solid var(--color-border); }
        header nav { display: flex; justify-content: space-between; align-items: center; padding: 1rem 0; }
        .site-title { font-weight: 600; color: var(--color-text); text-decoration: none; }
        .nav-links { display: flex; gap: 1.25rem; }
        .nav-links a { color: var(--color-muted); text-decoration: none; font-size: 0.9rem; }
        .nav-links a:hover { color: var(--color-accent); }

        main { flex: 1; padding: 2.5rem 0; }

        h1 { font-size: 1.75rem; margin-bottom: 1rem; line-height: 1.3; }
        h2 { font-size: 1.3rem; margin: 1.75rem 0 0.75rem; }
        h3 { font-size: 1.1rem; margin: 1.25rem 0 0.5rem; }
        p { margin-bottom: 1.1rem; }
        a { color: var(--color-accent); }
        ul, ol { padding-left: 1.4rem; margin-bottom: 1.1rem; }

        code {
            font-family: ui-monospace, Menlo, Consolas, monospace;
            font-size: 0.875em;
            background: var(--color-code-bg);
            padding: 0.1rem 0.3rem;
            border-radius: 0.25rem;
        }
        pre { background: var(--color-code-bg); padding: 1rem; border-radius: 0.4rem; overflow-x: auto; margin-bottom: 1.25rem; }
        pre code { background: none; padding: 0; }
        blockquote { border-left: 3px solid var(--color-accent); padding-left: 1rem; color: var(--color-muted); margin: 1.25rem 0; }
        img { max-width: 100%; height: auto; }

        .post-list { list-style: none; padding: 0; }
        .post-list li { display: flex; justify-content: space-between; gap: 1rem; padding: 0.6rem 0; border-bottom: 1px solid var(--color-border); }
        .post-list time { color: var(--color-muted); font-size: 0.85rem; white-space: nowrap; }

        .tags { display: flex; flex-wrap: wrap; gap: 0.4rem; margin: 0.75rem 0; }
        .tags a { font-size: 0.8rem; background: var(--color-code-bg); padding: 0.15rem 0.6rem; border-radius: 9999px; text-decoration: none; }

        .pagination { display: flex; justify-content: center; gap: 1rem; margin-top: 2rem; font-size: 0.9rem; }

        .related { border-top: 1px solid var(--color-border); margin-top: 2.5rem; padding-top: 1.25rem; }

        footer { border-top: 1px solid var(--color-border); padding: 1.5rem 0; }
        footer p { color: var(--color-muted); font-size: 0.85rem; text-align: center; margin: 0; }
        footer nav { display: flex; justify-content: center; gap: 1rem; margin-bottom: 0.5rem; font-size: 0.85rem; }
    </style>
</head>
<body>
    <header>
        <div class="container">
            <nav>
                <a href="{{ path_prefix? }}index.html" class="site-title">{{ site_title }}</a>
                <div class="nav-links">{{ nav_html? }}</div>
            </nav>
        </div>
    </header>
    <main>
        <div class="container">
            {{ content }}
        </div>
    </main>
    <footer>
        <div class="container">
            <nav>{{ footer_html? }}</nav>
            <p>&copy; {{ year }} {{ site_title }}</p>
        </div>
    </footer>
</body>
</html>"#;

/// Default home page template.
pub const DEFAULT_HOME_TEMPLATE: &str = r#"<section class="home">
    <h1>{{ name }}</h1>
    <p>{{ slogan? }}</p>
    <p>{{ description? }}</p>
    {{ socials_html? }}
    <h2>Recent Posts</h2>
    <ul class="post-list">
        {{ recent_html? }}
    </ul>
</section>"#;

/// Default about page template.
pub const DEFAULT_ABOUT_TEMPLATE: &str = r#"<section class="about">
    <h1>About</h1>
    {{ image_html? }}
    {{ paragraphs_html }}
</section>"#;

/// Default now page template.
pub const DEFAULT_NOW_TEMPLATE: &str = r#"<section class="now">
    <h1>Now</h1>
    <p><em>Last updated: {{ last_updated? }}</em></p>
    {{ categories_html }}
</section>"#;

/// Default 404 template.
pub const DEFAULT_NOT_FOUND_TEMPLATE: &str = r#"<section class="not-found">
    <h1>404 - Not Found</h1>
    <p>The page you are looking for does not exist.</p>
    <p><a href="{{ path_prefix? }}index.html">Back to the home page</a></p>
</section>"#;

/// Default tag index template.
pub const DEFAULT_TAGS_TEMPLATE: &str = r#"<section class="tags-index">
    <h1>Tags</h1>
    <div class="tags">
        {{ tags_html }}
    </div>
</section>"#;

/// Default archive template.
pub const DEFAULT_ARCHIVE_TEMPLATE: &str = r#"<section class="archive">
    <h1>Archive</h1>
    {{ years_html }}
</section>"#;

/// Default blog listing template.
pub const DEFAULT_BLOG_TEMPLATE: &str = r#"<section class="blog">
    <h1>{{ heading }}</h1>
    <ul class="post-list">
        {{ items_html }}
    </ul>
    {{ pagination_html? }}
</section>"#;

/// Default post template.
pub const DEFAULT_POST_TEMPLATE: &str = r#"<article class="post">
    <header>
        <h1>{{ title }}</h1>
        <time datetime="{{ date_iso }}">{{ date_formatted }}</time>
        {{ tags_html? }}
    </header>
    <div class="content">
        {{ content }}
    </div>
    {{ related_html? }}
</article>"#;
