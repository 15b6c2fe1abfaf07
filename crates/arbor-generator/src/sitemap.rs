//! Sitemap generation.
//!
//! Generates the XML sitemap covering static pages and posts.

use arbor_core::SiteConfig;
use chrono::{NaiveDate, Utc};
use thiserror::Error;
use tracing::debug;

use crate::aggregate::ContentIndex;

/// Sitemap generation errors.
#[derive(Debug, Error)]
pub enum SitemapError {
    /// XML encoding error.
    #[error("XML encoding error: {0}")]
    Xml(String),
}

/// Result type for sitemap operations.
pub type Result<T> = std::result::Result<T, SitemapError>;

/// Static pages included in the sitemap; the empty path is the home page.
const STATIC_PAGES: &[&str] = &[
    "",
    "about.html",
    "now.html",
    "blog.html",
    "tags.html",
    "archive.html",
];

/// Sitemap generator.
#[derive(Debug)]
pub struct SitemapGenerator {
    config: SiteConfig,
}

impl SitemapGenerator {
    /// Create a new sitemap generator.
    #[must_use]
    pub fn new(config: SiteConfig) -> Self {
        Self { config }
    }

    /// Generate the sitemap using the current date for static pages.
    pub fn generate(&self, index: &ContentIndex) -> Result<String> {
        self.generate_at(index, Utc::now().date_naive())
    }

    /// Generate the sitemap with an explicit build date.
    ///
    /// Static pages use the build date as `lastmod`; posts use their
    /// publication date.
    pub fn generate_at(&self, index: &ContentIndex, build_date: NaiveDate) -> Result<String> {
        debug!(
            static_pages = STATIC_PAGES.len(),
            posts = index.len(),
            "generating sitemap"
        );

        let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
        xml.push('\n');

        let build_date = build_date.format("%Y-%m-%d").to_string();
        for page in STATIC_PAGES {
            push_url(&mut xml, &self.config.url_for(page), &build_date);
        }

        for post in index.posts() {
            push_url(
                &mut xml,
                &self.config.url_for(&format!("blog/{}.html", post.slug)),
                &post.date.format("%Y-%m-%d").to_string(),
            );
        }

        xml.push_str("</urlset>\n");
        Ok(xml)
    }
}

/// Append one `<url>` entry.
fn push_url(xml: &mut String, loc: &str, lastmod: &str) {
    xml.push_str("  <url>\n");
    xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(loc)));
    xml.push_str(&format!("    <lastmod>{lastmod}</lastmod>\n"));
    xml.push_str("  </url>\n");
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use arbor_core::{
        Post,
        config::{AboutSection, NavigationConfig, NowSection, SiteMeta},
    };
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::aggregate::aggregate;

    fn test_config() -> SiteConfig {
        SiteConfig {
            site: SiteMeta {
                url: "https://example.com/".to_string(),
                title: "Example Site".to_string(),
                name: String::new(),
                slogan: String::new(),
                description: String::new(),
                about: AboutSection::default(),
                now: NowSection::default(),
                page_size: 10,
            },
            navigation: NavigationConfig::default(),
            socials: Vec::new(),
            projects: Vec::new(),
            skills: Vec::new(),
        }
    }

    fn test_post(slug: &str) -> Post {
        Post {
            slug: slug.to_string(),
            title: slug.to_string(),
            description: String::new(),
            date: Utc.with_ymd_and_hms(2025, 4, 2, 9, 0, 0).unwrap(),
            tags: Vec::new(),
            body: String::new(),
            related: Vec::new(),
        }
    }

    #[test]
    fn test_generate_sitemap() {
        let generator = SitemapGenerator::new(test_config());
        let index = aggregate(vec![test_post("hello")]);
        let build_date = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();

        let xml = generator.generate_at(&index, build_date).unwrap();

        assert!(xml.contains(r#"<?xml version="1.0""#));
        assert!(xml.contains("<urlset"));
        assert!(xml.contains("<loc>https://example.com/</loc>"));
        assert!(xml.contains("<loc>https://example.com/about.html</loc>"));
        assert!(xml.contains("<loc>https://example.com/blog/hello.html</loc>"));
        // Static pages get the build date, posts their publication date.
        assert!(xml.contains("<lastmod>2026-08-06</lastmod>"));
        assert!(xml.contains("<lastmod>2025-04-02</lastmod>"));
    }

    #[test]
    fn test_empty_index_lists_only_static_pages() {
        let generator = SitemapGenerator::new(test_config());
        let index = aggregate(Vec::new());
        let build_date = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();

        let xml = generator.generate_at(&index, build_date).unwrap();

        assert_eq!(xml.matches("<url>").count(), STATIC_PAGES.len());
        assert!(!xml.contains("blog/"));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
        assert_eq!(escape_xml("\"quoted\""), "&quot;quoted&quot;");
    }
}
