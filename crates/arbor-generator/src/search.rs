//! Search index generation.
//!
//! Emits a flat JSON array consumed by the client-side search widget. The
//! field names and order are part of the site's wire contract.

use arbor_core::Post;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::aggregate::ContentIndex;

/// Search index generation errors.
#[derive(Debug, Error)]
pub enum SearchError {
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for search index operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// One entry of `search-index.json`.
#[derive(Debug, Serialize)]
pub struct SearchEntry {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub date: String,
    pub tags: Vec<String>,
}

impl From<&Post> for SearchEntry {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            slug: post.slug.clone(),
            description: post.description.clone(),
            date: post.date.format("%B %d, %Y").to_string(),
            tags: post.tags.clone(),
        }
    }
}

/// Generate the search index JSON, in post order.
///
/// Zero posts produce an empty-but-valid `[]`.
pub fn generate(index: &ContentIndex) -> Result<String> {
    let entries: Vec<SearchEntry> = index.posts().iter().map(SearchEntry::from).collect();
    debug!(count = entries.len(), "generating search index");
    Ok(serde_json::to_string(&entries)?)
}
