//! RSS feed generation.
//!
//! Generates an RSS 2.0 feed for all posts.

use arbor_core::{Post, SiteConfig};
use rss::{ChannelBuilder, GuidBuilder, Item, ItemBuilder};
use thiserror::Error;
use tracing::debug;

use crate::aggregate::ContentIndex;

/// Feed generation errors.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Feed building error.
    #[error("feed build error: {0}")]
    Build(String),
}

/// Result type for feed operations.
pub type Result<T> = std::result::Result<T, FeedError>;

/// RSS feed generator.
#[derive(Debug)]
pub struct FeedGenerator {
    config: SiteConfig,
}

impl FeedGenerator {
    /// Create a new feed generator.
    #[must_use]
    pub fn new(config: SiteConfig) -> Self {
        Self { config }
    }

    /// Generate the RSS feed XML, one item per post in post order.
    pub fn generate(&self, index: &ContentIndex) -> Result<String> {
        debug!(count = index.len(), "generating RSS feed");

        let items: Vec<Item> = index
            .posts()
            .iter()
            .map(|post| self.post_to_item(post))
            .collect();

        let channel = ChannelBuilder::default()
            .title(&self.config.site.title)
            .link(&self.config.site.url)
            .description(&self.config.site.description)
            .language(Some("en-us".to_string()))
            .items(items)
            .build();

        Ok(channel.to_string())
    }

    /// Convert a post to an RSS item. The item link doubles as its guid.
    fn post_to_item(&self, post: &Post) -> Item {
        let link = self.config.url_for(&format!("blog/{}.html", post.slug));

        let guid = GuidBuilder::default().value(&link).permalink(true).build();

        ItemBuilder::default()
            .title(Some(post.title.clone()))
            .link(Some(link))
            .guid(Some(guid))
            .pub_date(Some(post.date.to_rfc2822()))
            .description(Some(post.description.clone()))
            .build()
    }
}
