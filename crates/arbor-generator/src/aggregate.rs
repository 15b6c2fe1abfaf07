//! Content aggregation.
//!
//! Turns the flat, date-sorted post list into the derived views every
//! emission routine reads from: tag and year groupings, tag/year rankings,
//! and per-post related-content lists. Aggregation is a pure computation
//! with no I/O and no failure modes.

use std::collections::{BTreeMap, HashSet};

use arbor_core::{Post, RelatedEntry};
use tracing::debug;

/// Maximum number of related entries attached to a post.
pub const MAX_RELATED: usize = 3;

/// Derived, read-only views over all posts.
///
/// `posts` is the single source of truth for ordering; every grouping stores
/// indices into it. The index is built once per run and never mutated
/// afterwards.
#[derive(Debug, Default)]
pub struct ContentIndex {
    posts: Vec<Post>,
    by_tag: BTreeMap<String, Vec<usize>>,
    by_year: BTreeMap<i32, Vec<usize>>,
    tag_counts: BTreeMap<String, usize>,
    tags_ranked: Vec<String>,
    years_ranked: Vec<i32>,
}

impl ContentIndex {
    /// All posts, ordered by publication date descending.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Number of posts in the index.
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// Whether the index holds no posts.
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Posts carrying `tag`, in `posts` order.
    pub fn posts_with_tag(&self, tag: &str) -> Vec<&Post> {
        self.by_tag
            .get(tag)
            .map(|ids| ids.iter().map(|&i| &self.posts[i]).collect())
            .unwrap_or_default()
    }

    /// Posts published in `year`, in `posts` order.
    pub fn posts_in_year(&self, year: i32) -> Vec<&Post> {
        self.by_year
            .get(&year)
            .map(|ids| ids.iter().map(|&i| &self.posts[i]).collect())
            .unwrap_or_default()
    }

    /// Occurrence count for `tag`.
    pub fn tag_count(&self, tag: &str) -> usize {
        self.tag_counts.get(tag).copied().unwrap_or(0)
    }

    /// All distinct tags, ordered by count descending then name ascending.
    pub fn tags_ranked(&self) -> &[String] {
        &self.tags_ranked
    }

    /// All distinct publication years, descending.
    pub fn years_ranked(&self) -> &[i32] {
        &self.years_ranked
    }
}

/// Aggregate a date-descending post list into a [`ContentIndex`].
///
/// The input order is owed by the collector; the aggregator does not
/// re-sort.
pub fn aggregate(mut posts: Vec<Post>) -> ContentIndex {
    // Related lists are computed against the immutable input before any
    // grouping, then attached.
    let related: Vec<Vec<RelatedEntry>> = (0..posts.len())
        .map(|i| related_entries(&posts, i))
        .collect();
    for (post, entries) in posts.iter_mut().zip(related) {
        post.related = entries;
    }

    let mut by_tag: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    let mut by_year: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    let mut tag_counts: BTreeMap<String, usize> = BTreeMap::new();

    for (i, post) in posts.iter().enumerate() {
        for tag in &post.tags {
            by_tag.entry(tag.clone()).or_default().push(i);
            *tag_counts.entry(tag.clone()).or_insert(0) += 1;
        }
        by_year.entry(post.year()).or_default().push(i);
    }

    // Multi-key rank: count descending, then name ascending. An explicit
    // comparator, not a stable sort over a pre-ordered list.
    let mut tags_ranked: Vec<String> = tag_counts.keys().cloned().collect();
    tags_ranked.sort_by(|a, b| tag_counts[b].cmp(&tag_counts[a]).then_with(|| a.cmp(b)));

    let mut years_ranked: Vec<i32> = by_year.keys().copied().collect();
    years_ranked.sort_unstable_by(|a, b| b.cmp(a));

    debug!(
        posts = posts.len(),
        tags = tags_ranked.len(),
        years = years_ranked.len(),
        "aggregated content"
    );

    ContentIndex {
        posts,
        by_tag,
        by_year,
        tag_counts,
        tags_ranked,
        years_ranked,
    }
}

/// Rank the posts related to `posts[i]` by shared-tag score.
///
/// The score for a candidate is the number of entries in its raw tag list
/// that appear in the subject's distinct tag set, so a duplicated tag on the
/// candidate counts more than once. Ties sort by original index ascending;
/// since the input is date-descending this keeps equal-score candidates
/// newest-first without depending on sort stability.
fn related_entries(posts: &[Post], i: usize) -> Vec<RelatedEntry> {
    let own: HashSet<&str> = posts[i].distinct_tags();
    if own.is_empty() {
        return Vec::new();
    }

    let mut candidates: Vec<(usize, usize)> = Vec::new();
    for (j, other) in posts.iter().enumerate() {
        if j == i {
            continue;
        }
        let score = other
            .tags
            .iter()
            .filter(|tag| own.contains(tag.as_str()))
            .count();
        if score > 0 {
            candidates.push((score, j));
        }
    }

    candidates.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    candidates.truncate(MAX_RELATED);

    candidates
        .into_iter()
        .map(|(_, j)| RelatedEntry {
            title: posts[j].title.clone(),
            slug: posts[j].slug.clone(),
        })
        .collect()
}
