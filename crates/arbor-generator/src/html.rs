//! HTML page generation.
//!
//! Builds one template context per artifact and renders it through the
//! template registry. All functions here are pure string builders; writing
//! files is the build orchestrator's job.

use arbor_core::{Post, SiteConfig, config::NavItem};
use chrono::{Datelike, Utc};
use thiserror::Error;
use tracing::debug;

use crate::{
    aggregate::ContentIndex,
    template::{TemplateContext, TemplateError, TemplateRegistry},
};

/// HTML generation errors.
#[derive(Debug, Error)]
pub enum HtmlError {
    /// Template error.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
}

/// Result type for HTML generation.
pub type Result<T> = std::result::Result<T, HtmlError>;

/// Number of posts shown on the home page.
const HOME_RECENT_POSTS: usize = 5;

/// Relative link prefix for an artifact nested `depth` directories below
/// the output root. Root-level artifacts use the empty prefix.
#[must_use]
pub fn rel_prefix(depth: usize) -> String {
    "../".repeat(depth)
}

/// HTML page generator.
#[derive(Debug)]
pub struct HtmlGenerator {
    config: SiteConfig,
    templates: TemplateRegistry,
}

impl HtmlGenerator {
    /// Create a generator with the default templates.
    #[must_use]
    pub fn new(config: SiteConfig) -> Self {
        Self {
            config,
            templates: TemplateRegistry::new(),
        }
    }

    /// Create a generator with custom templates.
    #[must_use]
    pub fn with_templates(config: SiteConfig, templates: TemplateRegistry) -> Self {
        Self { config, templates }
    }

    /// Render the home page.
    pub fn render_home(&self, index: &ContentIndex) -> Result<String> {
        let site = &self.config.site;
        let recent_html: String = index
            .posts()
            .iter()
            .take(HOME_RECENT_POSTS)
            .map(|p| list_item_html(p, ""))
            .collect();

        let mut ctx = TemplateContext::new()
            .with_var(
                "name",
                if site.name.is_empty() {
                    &site.title
                } else {
                    &site.name
                },
            )
            .with_var("slogan", html_escape(&site.slogan))
            .with_var("description", html_escape(&site.description))
            .with_var("recent_html", recent_html);

        if !self.config.socials.is_empty() {
            let socials_html: String = self
                .config
                .socials
                .iter()
                .map(|s| {
                    format!(
                        r#"<a href="{}" rel="me">{}</a> "#,
                        html_escape(&s.href),
                        html_escape(&s.name)
                    )
                })
                .collect();
            ctx.insert("socials_html", format!(r#"<p class="socials">{socials_html}</p>"#));
        }

        let inner = self.templates.render("home", &ctx)?;
        self.render_shell("", 0, &inner)
    }

    /// Render the about page.
    pub fn render_about(&self) -> Result<String> {
        let about = &self.config.site.about;

        let paragraphs_html: String = about
            .paragraphs
            .iter()
            .map(|p| format!("<p>{}</p>\n", html_escape(p)))
            .collect();

        let mut ctx = TemplateContext::new().with_var("paragraphs_html", paragraphs_html);
        if !about.image.is_empty() {
            ctx.insert(
                "image_html",
                format!(r#"<img src="{}" alt="portrait">"#, html_escape(&about.image)),
            );
        }

        let inner = self.templates.render("about", &ctx)?;
        self.render_shell("About", 0, &inner)
    }

    /// Render the now page.
    pub fn render_now(&self) -> Result<String> {
        let now = &self.config.site.now;

        let categories_html: String = now
            .categories
            .iter()
            .map(|category| {
                let items: String = category
                    .items
                    .iter()
                    .map(|item| format!("<li>{}</li>\n", html_escape(item)))
                    .collect();
                format!(
                    "<h2>{}</h2>\n<ul>\n{items}</ul>\n",
                    html_escape(&category.title)
                )
            })
            .collect();

        let ctx = TemplateContext::new()
            .with_var("last_updated", html_escape(&now.last_updated))
            .with_var("categories_html", categories_html);

        let inner = self.templates.render("now", &ctx)?;
        self.render_shell("Now", 0, &inner)
    }

    /// Render the 404 page.
    pub fn render_not_found(&self) -> Result<String> {
        let ctx = TemplateContext::new().with_var("path_prefix", "");
        let inner = self.templates.render("not_found", &ctx)?;
        self.render_shell("404 - Not Found", 0, &inner)
    }

    /// Render the tag index page from the ranked tag list.
    pub fn render_tags_index(&self, index: &ContentIndex) -> Result<String> {
        let tags_html: String = index
            .tags_ranked()
            .iter()
            .map(|tag| {
                format!(
                    "<a href=\"tags/{tag}.html\">#{tag} ({})</a>\n",
                    index.tag_count(tag)
                )
            })
            .collect();

        let ctx = TemplateContext::new().with_var("tags_html", tags_html);
        let inner = self.templates.render("tags", &ctx)?;
        self.render_shell("Tags", 0, &inner)
    }

    /// Render the archive page grouped by year, newest year first.
    pub fn render_archive(&self, index: &ContentIndex) -> Result<String> {
        let years_html: String = index
            .years_ranked()
            .iter()
            .map(|&year| {
                let items: String = index
                    .posts_in_year(year)
                    .iter()
                    .map(|p| list_item_html(p, ""))
                    .collect();
                format!("<h2>{year}</h2>\n<ul class=\"post-list\">\n{items}</ul>\n")
            })
            .collect();

        let ctx = TemplateContext::new().with_var("years_html", years_html);
        let inner = self.templates.render("archive", &ctx)?;
        self.render_shell("Archive", 0, &inner)
    }

    /// Render one page of the blog listing.
    ///
    /// Page 1 lives at the output root; later pages live one level down and
    /// therefore carry the one-level-up prefix.
    pub fn render_blog_page(&self, posts: &[Post], current: usize, total: usize) -> Result<String> {
        let depth = usize::from(current > 1);
        let prefix = rel_prefix(depth);

        let items_html: String = posts.iter().map(|p| list_item_html(p, &prefix)).collect();

        let heading = if current > 1 {
            format!("Blog - Page {current}")
        } else {
            "Blog".to_string()
        };

        let mut ctx = TemplateContext::new()
            .with_var("heading", &heading)
            .with_var("items_html", items_html);

        if let Some(pagination) = pagination_html(current, total) {
            ctx.insert("pagination_html", pagination);
        }

        let inner = self.templates.render("blog", &ctx)?;
        self.render_shell(&heading, depth, &inner)
    }

    /// Render the listing page for one tag.
    pub fn render_tag_page(&self, tag: &str, posts: &[&Post]) -> Result<String> {
        let prefix = rel_prefix(1);
        let items_html: String = posts.iter().map(|p| list_item_html(p, &prefix)).collect();

        let ctx = TemplateContext::new()
            .with_var("heading", format!("#{tag}"))
            .with_var("items_html", items_html);

        let inner = self.templates.render("blog", &ctx)?;
        self.render_shell(&format!("#{tag}"), 1, &inner)
    }

    /// Render a single post page with its related entries.
    pub fn render_post(&self, post: &Post) -> Result<String> {
        debug!(slug = %post.slug, "rendering post page");
        let prefix = rel_prefix(1);

        let mut ctx = TemplateContext::new()
            .with_var("title", html_escape(&post.title))
            .with_var("date_iso", post.date.format("%Y-%m-%d").to_string())
            .with_var("date_formatted", post.date.format("%B %d, %Y").to_string())
            .with_var("content", &post.body);

        if !post.tags.is_empty() {
            let tags_html: String = post
                .tags
                .iter()
                .map(|tag| format!(r#"<a href="{prefix}tags/{tag}.html" rel="tag">#{tag}</a> "#))
                .collect();
            ctx.insert("tags_html", format!(r#"<div class="tags">{tags_html}</div>"#));
        }

        if !post.related.is_empty() {
            let related_items: String = post
                .related
                .iter()
                .map(|entry| {
                    format!(
                        "<li><a href=\"{prefix}blog/{}.html\">{}</a></li>\n",
                        entry.slug,
                        html_escape(&entry.title)
                    )
                })
                .collect();
            ctx.insert(
                "related_html",
                format!("<aside class=\"related\">\n<h2>Related Posts</h2>\n<ul>\n{related_items}</ul>\n</aside>"),
            );
        }

        let inner = self.templates.render("post", &ctx)?;
        self.render_shell(&post.title, 1, &inner)
    }

    /// Wrap inner content in the base shell.
    fn render_shell(&self, title_prefix: &str, depth: usize, inner: &str) -> Result<String> {
        let prefix = rel_prefix(depth);
        let site = &self.config.site;

        let title = if title_prefix.is_empty() {
            site.title.clone()
        } else {
            format!("{title_prefix} | {}", site.title)
        };

        let ctx = TemplateContext::new()
            .with_var("title", html_escape(&title))
            .with_var("site_title", html_escape(&site.title))
            .with_var("description", html_escape(&site.description))
            .with_var("path_prefix", &prefix)
            .with_var("year", Utc::now().year().to_string())
            .with_var(
                "nav_html",
                nav_html(&self.config.navigation.header, &prefix),
            )
            .with_var(
                "footer_html",
                nav_html(&self.config.navigation.footer, &prefix),
            )
            .with_var("content", inner);

        Ok(self.templates.render("base", &ctx)?)
    }
}

/// Render navigation links, applying the relative prefix to site-local hrefs.
fn nav_html(items: &[NavItem], prefix: &str) -> String {
    items
        .iter()
        .map(|item| {
            let href = if item.href.starts_with("http://") || item.href.starts_with("https://") {
                item.href.clone()
            } else {
                format!("{prefix}{}", item.href.trim_start_matches('/'))
            };
            format!(r#"<a href="{href}">{}</a>"#, html_escape(&item.text))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Generate HTML for one post entry in a listing.
#[must_use]
pub fn list_item_html(post: &Post, prefix: &str) -> String {
    format!(
        "<li><a href=\"{prefix}blog/{}.html\">{}</a> <time datetime=\"{}\">{}</time></li>\n",
        post.slug,
        html_escape(&post.title),
        post.date.format("%Y-%m-%d"),
        post.date.format("%b %d, %Y"),
    )
}

/// Generate pagination navigation, or `None` for a single page.
///
/// Page 1 lives at `blog.html`, later pages at `blog/<k>.html`; hrefs are
/// relative to the page they appear on.
#[must_use]
pub fn pagination_html(current: usize, total: usize) -> Option<String> {
    if total <= 1 {
        return None;
    }

    let mut parts = Vec::new();

    if current > 1 {
        let prev = if current == 2 {
            "../blog.html".to_string()
        } else {
            format!("{}.html", current - 1)
        };
        parts.push(format!(r#"<a href="{prev}" rel="prev">&larr; Newer</a>"#));
    }

    parts.push(format!("Page {current} of {total}"));

    if current < total {
        let next = if current == 1 {
            format!("blog/{}.html", current + 1)
        } else {
            format!("{}.html", current + 1)
        };
        parts.push(format!(r#"<a href="{next}" rel="next">Older &rarr;</a>"#));
    }

    Some(format!(
        r#"<nav class="pagination">{}</nav>"#,
        parts.join(" ")
    ))
}

/// Escape HTML special characters in text content.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
