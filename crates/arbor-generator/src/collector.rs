//! Content collection.
//!
//! Reads the content directory, parses frontmatter, renders markdown bodies,
//! and delivers the date-descending post list the aggregator expects.

use std::{
    fs,
    path::{Path, PathBuf},
};

use arbor_core::{CoreError, Post, frontmatter::parse_frontmatter};
use arbor_parser::MarkdownRenderer;
use thiserror::Error;
use tracing::{debug, info};

/// Content collection errors.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// Content directory is unreadable.
    #[error("cannot read content directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A content file is unreadable.
    #[error("cannot read content file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Malformed metadata block.
    #[error(transparent)]
    Frontmatter(#[from] CoreError),
}

/// Result type for collector operations.
pub type Result<T> = std::result::Result<T, CollectorError>;

/// Content collector for a single directory of markdown files.
#[derive(Debug)]
pub struct ContentCollector {
    content_dir: PathBuf,
    renderer: MarkdownRenderer,
}

impl ContentCollector {
    /// Create a collector for the given content directory.
    #[must_use]
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Collect all publishable posts, sorted by publication date descending.
    ///
    /// Files without a usable metadata block and drafts are skipped; a
    /// malformed metadata block or an unreadable file aborts collection.
    pub fn collect(&self) -> Result<Vec<Post>> {
        info!(dir = %self.content_dir.display(), "collecting content");

        let entries = fs::read_dir(&self.content_dir).map_err(|e| CollectorError::ReadDir {
            path: self.content_dir.clone(),
            source: e,
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.is_file() && path.extension().is_some_and(|ext| ext == "md")
            })
            .collect();
        // Directory order is platform-dependent; fix it before parsing.
        paths.sort();

        let mut posts = Vec::with_capacity(paths.len());
        for path in &paths {
            if let Some(post) = self.load_file(path)? {
                posts.push(post);
            }
        }

        // Date descending; equal dates fall back to slug order so output is
        // deterministic across runs.
        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));

        info!(count = posts.len(), "content collection complete");
        Ok(posts)
    }

    /// Load one content file, returning `None` when it is skipped.
    fn load_file(&self, path: &Path) -> Result<Option<Post>> {
        let text = fs::read_to_string(path).map_err(|e| CollectorError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let Some((frontmatter, body)) = parse_frontmatter(&text, path)? else {
            debug!(path = %path.display(), "no metadata block, skipping");
            return Ok(None);
        };

        if frontmatter.draft {
            debug!(path = %path.display(), "skipping draft");
            return Ok(None);
        }

        let slug = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let body = self.renderer.render(&body);
        Ok(Some(Post::from_parts(slug, frontmatter, body)))
    }
}
