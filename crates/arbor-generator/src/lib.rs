//! Arbor Generator Library
//!
//! Static site generation engine for Arbor.
//!
//! # Modules
//!
//! - [`collector`] - Content collection from the content directory
//! - [`aggregate`] - Derived views: groupings, rankings, related posts
//! - [`template`] - HTML template system with variable interpolation
//! - [`html`] - HTML page generation and the relative-prefix policy
//! - [`search`] - Search index generation
//! - [`feed`] - RSS feed generation
//! - [`sitemap`] - XML sitemap generation
//! - [`registry`] - JSON registry generation under `api/`
//! - [`llms`] - Plain-text site summary
//! - [`assets`] - Static asset copying
//! - [`build`] - Build orchestration

pub mod aggregate;
pub mod assets;
pub mod build;
pub mod collector;
pub mod feed;
pub mod html;
pub mod llms;
pub mod registry;
pub mod search;
pub mod sitemap;
pub mod template;

pub use aggregate::{ContentIndex, aggregate};
pub use build::{BuildError, BuildStats, Builder};
pub use collector::ContentCollector;
pub use feed::FeedGenerator;
pub use html::HtmlGenerator;
pub use registry::RegistryGenerator;
pub use sitemap::SitemapGenerator;
pub use template::{Template, TemplateContext, TemplateRegistry};
