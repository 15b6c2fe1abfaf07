//! Build orchestration.
//!
//! Drives the full pipeline: collect content, aggregate, then emit every
//! artifact family into the output tree. Each emission routine reads only
//! the immutable [`ContentIndex`] and configuration and writes to its own
//! disjoint path namespace, so their relative order carries no meaning.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use arbor_core::SiteConfig;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    aggregate::{self, ContentIndex},
    assets,
    collector::{CollectorError, ContentCollector},
    feed::{FeedError, FeedGenerator},
    html::{HtmlError, HtmlGenerator},
    llms,
    registry::{RegistryError, RegistryGenerator},
    search::{self, SearchError},
    sitemap::{SitemapError, SitemapGenerator},
    template::TemplateRegistry,
};

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// IO error outside artifact emission.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Collector error.
    #[error("collector error: {0}")]
    Collector(#[from] CollectorError),

    /// HTML generation error.
    #[error("HTML error: {0}")]
    Html(#[from] HtmlError),

    /// Feed generation error.
    #[error("feed error: {0}")]
    Feed(#[from] FeedError),

    /// Sitemap generation error.
    #[error("sitemap error: {0}")]
    Sitemap(#[from] SitemapError),

    /// Registry generation error.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Search index generation error.
    #[error("search index error: {0}")]
    Search(#[from] SearchError),

    /// Failure writing one artifact; names the artifact and its path.
    #[error("cannot write {artifact} to {path}: {source}")]
    Write {
        artifact: String,
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Number of posts collected.
    pub posts: usize,

    /// Fixed pages generated.
    pub static_pages: usize,

    /// Blog listing pages generated.
    pub blog_pages: usize,

    /// Tag pages generated.
    pub tag_pages: usize,

    /// Per-post pages generated.
    pub post_pages: usize,

    /// Registry files generated.
    pub registries: usize,

    /// Static assets copied.
    pub assets: usize,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Site builder that orchestrates the build process.
#[derive(Debug)]
pub struct Builder {
    config: SiteConfig,
    content_dir: PathBuf,
    output_dir: PathBuf,
    static_dir: Option<PathBuf>,
    templates: TemplateRegistry,
}

impl Builder {
    /// Create a new builder.
    #[must_use]
    pub fn new(
        config: SiteConfig,
        content_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config,
            content_dir: content_dir.into(),
            output_dir: output_dir.into(),
            static_dir: None,
            templates: TemplateRegistry::new(),
        }
    }

    /// Set the static assets directory.
    #[must_use]
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    /// Replace the template registry.
    #[must_use]
    pub fn with_templates(mut self, templates: TemplateRegistry) -> Self {
        self.templates = templates;
        self
    }

    /// Execute the full build.
    pub fn build(&self) -> Result<BuildStats> {
        let start = Instant::now();
        let mut stats = BuildStats::default();

        info!(
            content = %self.content_dir.display(),
            output = %self.output_dir.display(),
            "starting build"
        );

        self.clean_output()?;

        // Optional collaborator: a failed asset copy must not abort the
        // content build.
        if let Some(static_dir) = &self.static_dir {
            match assets::copy_dir(static_dir, &self.output_dir) {
                Ok(count) => stats.assets = count,
                Err(e) => warn!(error = %e, "failed to copy static assets"),
            }
        }

        let posts = ContentCollector::new(&self.content_dir).collect()?;
        stats.posts = posts.len();

        let index = aggregate::aggregate(posts);
        let html = HtmlGenerator::with_templates(self.config.clone(), self.templates.clone());

        stats.static_pages = self.generate_static_pages(&html, &index)?;
        stats.blog_pages = self.generate_blog_pages(&html, &index)?;
        stats.tag_pages = self.generate_tag_pages(&html, &index)?;
        stats.post_pages = self.generate_post_pages(&html, &index)?;

        self.write_artifact(
            "search index",
            &self.output_dir.join("search-index.json"),
            &search::generate(&index)?,
        )?;

        let feed = FeedGenerator::new(self.config.clone()).generate(&index)?;
        self.write_artifact("RSS feed", &self.output_dir.join("rss.xml"), &feed)?;

        let sitemap = SitemapGenerator::new(self.config.clone()).generate(&index)?;
        self.write_artifact("sitemap", &self.output_dir.join("sitemap.xml"), &sitemap)?;

        stats.registries = self.generate_registries(&index)?;

        self.write_artifact(
            "llms.txt",
            &self.output_dir.join("llms.txt"),
            &llms::generate(&self.config, &index),
        )?;

        stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            posts = stats.posts,
            static_pages = stats.static_pages,
            blog_pages = stats.blog_pages,
            tag_pages = stats.tag_pages,
            post_pages = stats.post_pages,
            registries = stats.registries,
            assets = stats.assets,
            duration_ms = stats.duration_ms,
            "build complete"
        );

        Ok(stats)
    }

    /// Recreate the output directory.
    fn clean_output(&self) -> Result<()> {
        if self.output_dir.exists() {
            fs::remove_dir_all(&self.output_dir)?;
        }
        fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }

    /// Generate the fixed set of root-level pages.
    fn generate_static_pages(&self, html: &HtmlGenerator, index: &ContentIndex) -> Result<usize> {
        let pages = [
            ("home page", "index.html", html.render_home(index)?),
            ("about page", "about.html", html.render_about()?),
            ("now page", "now.html", html.render_now()?),
            ("404 page", "404.html", html.render_not_found()?),
            ("tag index", "tags.html", html.render_tags_index(index)?),
            ("archive page", "archive.html", html.render_archive(index)?),
        ];

        for (artifact, file, contents) in &pages {
            self.write_artifact(artifact, &self.output_dir.join(file), contents)?;
        }

        Ok(pages.len())
    }

    /// Generate the paginated blog listing.
    ///
    /// Page 1 lives at `blog.html`; page k > 1 at `blog/<k>.html` with a
    /// contiguous slice of the post list.
    fn generate_blog_pages(&self, html: &HtmlGenerator, index: &ContentIndex) -> Result<usize> {
        let page_size = self.config.site.page_size;
        let total_pages = index.len().div_ceil(page_size);

        for page_num in 1..=total_pages {
            let start = (page_num - 1) * page_size;
            let end = (start + page_size).min(index.len());
            let slice = &index.posts()[start..end];

            let contents = html.render_blog_page(slice, page_num, total_pages)?;
            let path = if page_num == 1 {
                self.output_dir.join("blog.html")
            } else {
                self.output_dir.join("blog").join(format!("{page_num}.html"))
            };

            self.write_artifact("blog page", &path, &contents)?;
        }

        Ok(total_pages)
    }

    /// Generate one page per distinct tag.
    fn generate_tag_pages(&self, html: &HtmlGenerator, index: &ContentIndex) -> Result<usize> {
        let tags_dir = self.output_dir.join("tags");

        for tag in index.tags_ranked() {
            let posts = index.posts_with_tag(tag);
            let contents = html.render_tag_page(tag, &posts)?;
            self.write_artifact("tag page", &tags_dir.join(format!("{tag}.html")), &contents)?;
        }

        Ok(index.tags_ranked().len())
    }

    /// Generate one page per post.
    ///
    /// Posts write to disjoint paths, so this fans out across workers; all
    /// workers run to completion and the first error is reported.
    fn generate_post_pages(&self, html: &HtmlGenerator, index: &ContentIndex) -> Result<usize> {
        let blog_dir = self.output_dir.join("blog");
        fs::create_dir_all(&blog_dir)?;

        let results: Vec<Result<()>> = index
            .posts()
            .par_iter()
            .map(|post| {
                let contents = html.render_post(post)?;
                self.write_artifact(
                    "post page",
                    &blog_dir.join(format!("{}.html", post.slug)),
                    &contents,
                )
            })
            .collect();

        let count = results.len();
        for result in results {
            result?;
        }

        Ok(count)
    }

    /// Generate every registry file under `api/`.
    fn generate_registries(&self, index: &ContentIndex) -> Result<usize> {
        let generator = RegistryGenerator::new(self.config.clone());
        let api_dir = self.output_dir.join("api");

        let registries = [
            ("blog registry", "blog-registry.json", generator.blog_registry(index)?),
            ("projects registry", "projects-registry.json", generator.projects_registry()?),
            ("skills registry", "skills-registry.json", generator.skills_registry()?),
            ("profile registry", "profile-registry.json", generator.profile_registry()?),
            ("catalog registry", "catalog-registry.json", generator.catalog_registry()?),
        ];

        for (artifact, file, contents) in &registries {
            self.write_artifact(artifact, &api_dir.join(file), contents)?;
        }

        Ok(registries.len())
    }

    /// Write one artifact, creating its directory first.
    fn write_artifact(&self, artifact: &str, path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::Write {
                artifact: artifact.to_string(),
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        fs::write(path, contents).map_err(|e| BuildError::Write {
            artifact: artifact.to_string(),
            path: path.to_path_buf(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use arbor_core::config::{AboutSection, NavigationConfig, NowSection, SiteMeta};
    use tempfile::TempDir;

    use super::*;

    fn test_config(page_size: usize) -> SiteConfig {
        SiteConfig {
            site: SiteMeta {
                url: "https://example.com/".to_string(),
                title: "Example Site".to_string(),
                name: "Jordan Example".to_string(),
                slogan: "notes on software".to_string(),
                description: "A personal site".to_string(),
                about: AboutSection::default(),
                now: NowSection::default(),
                page_size,
            },
            navigation: NavigationConfig::default(),
            socials: Vec::new(),
            projects: Vec::new(),
            skills: Vec::new(),
        }
    }

    fn write_post(dir: &Path, slug: &str, date: &str, tags: &[&str]) {
        let tag_lines: String = tags.iter().map(|t| format!("  - {t}\n")).collect();
        let content = format!(
            "---\ntitle: \"Post {slug}\"\ndescription: \"About {slug}\"\ndate: {date}\ntags:\n{tag_lines}---\n\nBody of {slug}.\n"
        );
        fs::write(dir.join(format!("{slug}.md")), content).expect("write post");
    }

    #[test]
    fn test_build_empty_site() {
        let content = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();

        let builder = Builder::new(test_config(10), content.path(), output.path());
        let stats = builder.build().unwrap();

        assert_eq!(stats.posts, 0);
        assert_eq!(stats.blog_pages, 0);
        assert_eq!(stats.tag_pages, 0);
        assert_eq!(stats.post_pages, 0);
        assert_eq!(stats.static_pages, 6);

        // Empty-but-valid flat artifacts.
        let search =
            fs::read_to_string(output.path().join("search-index.json")).expect("search index");
        assert_eq!(search, "[]");
        assert!(output.path().join("sitemap.xml").exists());
        assert!(output.path().join("rss.xml").exists());
        assert!(output.path().join("api/catalog-registry.json").exists());
        assert!(!output.path().join("blog.html").exists());
        assert!(!output.path().join("tags").exists());
    }

    #[test]
    fn test_build_with_content() {
        let content = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();

        write_post(content.path(), "first", "2025-01-10", &["rust"]);
        write_post(content.path(), "second", "2025-02-20", &["rust", "web"]);

        let builder = Builder::new(test_config(10), content.path(), output.path());
        let stats = builder.build().unwrap();

        assert_eq!(stats.posts, 2);
        assert_eq!(stats.blog_pages, 1);
        assert_eq!(stats.tag_pages, 2);
        assert_eq!(stats.post_pages, 2);

        assert!(output.path().join("blog.html").exists());
        assert!(output.path().join("blog/first.html").exists());
        assert!(output.path().join("blog/second.html").exists());
        assert!(output.path().join("tags/rust.html").exists());
        assert!(output.path().join("tags/web.html").exists());
        assert!(output.path().join("index.html").exists());
        assert!(output.path().join("404.html").exists());
        assert!(output.path().join("llms.txt").exists());
    }

    #[test]
    fn test_pagination_paths_and_sizes() {
        let content = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();

        for i in 1..=5 {
            write_post(content.path(), &format!("post-{i}"), &format!("2025-03-0{i}"), &[]);
        }

        let builder = Builder::new(test_config(2), content.path(), output.path());
        let stats = builder.build().unwrap();

        assert_eq!(stats.blog_pages, 3);
        assert!(output.path().join("blog.html").exists());
        assert!(output.path().join("blog/2.html").exists());
        assert!(output.path().join("blog/3.html").exists());
        assert!(!output.path().join("blog/4.html").exists());

        // Last page holds the remainder.
        let page3 = fs::read_to_string(output.path().join("blog/3.html")).unwrap();
        assert_eq!(page3.matches("<li>").count(), 1);
        assert!(page3.contains("Page 3 of 3"));
    }

    #[test]
    fn test_search_index_round_trip() {
        let content = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();

        write_post(content.path(), "first", "2025-01-10", &["rust", "cli"]);
        write_post(content.path(), "second", "2025-02-20", &["web"]);

        Builder::new(test_config(10), content.path(), output.path())
            .build()
            .unwrap();

        let search =
            fs::read_to_string(output.path().join("search-index.json")).expect("search index");
        let entries: serde_json::Value = serde_json::from_str(&search).unwrap();

        for entry in entries.as_array().unwrap() {
            let slug = entry["slug"].as_str().unwrap();
            assert!(
                output.path().join(format!("blog/{slug}.html")).exists(),
                "missing page for {slug}"
            );
        }
    }

    #[test]
    fn test_idempotent_rebuild() {
        let content = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();

        write_post(content.path(), "first", "2025-01-10", &["rust"]);

        let builder = Builder::new(test_config(10), content.path(), output.path());
        builder.build().unwrap();
        let search_a = fs::read_to_string(output.path().join("search-index.json")).unwrap();
        let post_a = fs::read_to_string(output.path().join("blog/first.html")).unwrap();

        builder.build().unwrap();
        let search_b = fs::read_to_string(output.path().join("search-index.json")).unwrap();
        let post_b = fs::read_to_string(output.path().join("blog/first.html")).unwrap();

        assert_eq!(search_a, search_b);
        assert_eq!(post_a, post_b);
    }

    #[test]
    fn test_static_assets_copied() {
        let content = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let static_dir = TempDir::new().unwrap();

        fs::write(static_dir.path().join("style.css"), "body {}").unwrap();

        let stats = Builder::new(test_config(10), content.path(), output.path())
            .with_static_dir(static_dir.path())
            .build()
            .unwrap();

        assert_eq!(stats.assets, 1);
        assert!(output.path().join("style.css").exists());
    }

    #[test]
    fn test_missing_static_dir_is_not_fatal() {
        let content = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();

        let result = Builder::new(test_config(10), content.path(), output.path())
            .with_static_dir("/nonexistent/static")
            .build();

        assert!(result.is_ok());
    }

    #[test]
    fn test_missing_content_dir_is_fatal() {
        let output = TempDir::new().unwrap();

        let result =
            Builder::new(test_config(10), "/nonexistent/content", output.path()).build();

        assert!(matches!(result, Err(BuildError::Collector(_))));
    }

    #[test]
    fn test_drafts_absent_from_all_outputs() {
        let content = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();

        write_post(content.path(), "public", "2025-01-10", &["rust"]);
        fs::write(
            content.path().join("secret.md"),
            "---\ntitle: Secret\ndate: 2025-06-01\ndraft: true\n---\nshh\n",
        )
        .unwrap();

        Builder::new(test_config(10), content.path(), output.path())
            .build()
            .unwrap();

        assert!(!output.path().join("blog/secret.html").exists());
        let search = fs::read_to_string(output.path().join("search-index.json")).unwrap();
        assert!(!search.contains("Secret"));
        let feed = fs::read_to_string(output.path().join("rss.xml")).unwrap();
        assert!(!feed.contains("Secret"));
    }
}
