//! Content types and structures.

use std::collections::HashSet;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::frontmatter::Frontmatter;

/// A fully processed blog post, ready for aggregation and emission.
///
/// The slug is derived from the source filename and is the post's stable
/// identifier throughout the output tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Stable identifier derived from the source file stem.
    pub slug: String,

    /// Post title.
    pub title: String,

    /// Short description for listings, feeds and meta tags.
    #[serde(default)]
    pub description: String,

    /// Publication timestamp.
    pub date: DateTime<Utc>,

    /// Classification tags in authored order.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Rendered HTML body.
    pub body: String,

    /// Up to three related posts, attached by the aggregator.
    #[serde(default)]
    pub related: Vec<RelatedEntry>,
}

/// A back-reference to another post, used for related-content lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedEntry {
    pub title: String,
    pub slug: String,
}

impl Post {
    /// Build a post from its parsed parts.
    pub fn from_parts(slug: impl Into<String>, frontmatter: Frontmatter, body: String) -> Self {
        Self {
            slug: slug.into(),
            title: frontmatter.title,
            description: frontmatter.description,
            date: frontmatter.date,
            tags: frontmatter.tags,
            body,
            related: Vec::new(),
        }
    }

    /// Publication year.
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Distinct tags of this post. Duplicates in the authored tag list are
    /// collapsed here; grouping and counting elsewhere use the raw list.
    pub fn distinct_tags(&self) -> HashSet<&str> {
        self.tags.iter().map(String::as_str).collect()
    }
}
