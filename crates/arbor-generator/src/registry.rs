//! Registry generation.
//!
//! Registries are pretty-printed JSON projections of configuration sections
//! and of the post list, published under `api/` for programmatic consumers.
//! Field names are part of the site's wire contract.

use arbor_core::SiteConfig;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::aggregate::ContentIndex;

/// Registry generation errors.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// File names of every emitted registry, relative to the output root.
pub const REGISTRY_FILES: &[&str] = &[
    "api/blog-registry.json",
    "api/projects-registry.json",
    "api/skills-registry.json",
    "api/profile-registry.json",
    "api/catalog-registry.json",
];

/// One entry of the blog registry.
#[derive(Debug, Serialize)]
struct BlogEntry {
    title: String,
    description: String,
    url: String,
    date_published: String,
    tags: Vec<String>,
}

/// One entry of the projects registry.
#[derive(Debug, Serialize)]
struct ProjectEntry {
    title: String,
    description: String,
    link: String,
    techs: Vec<String>,
}

/// One entry of the skills registry.
#[derive(Debug, Serialize)]
struct SkillEntry {
    name: String,
    icon: String,
}

/// The profile registry document.
#[derive(Debug, Serialize)]
struct Profile {
    name: String,
    title: String,
    slogan: String,
    url: String,
    description: String,
    socials: Vec<SocialEntry>,
}

/// One social link in the profile registry.
#[derive(Debug, Serialize)]
struct SocialEntry {
    name: String,
    href: String,
    icon: String,
}

/// The catalog registry: a discovery index over the other registries.
#[derive(Debug, Serialize)]
struct Catalog {
    site: CatalogSite,
    registries: Vec<CatalogEntry>,
}

#[derive(Debug, Serialize)]
struct CatalogSite {
    title: String,
    url: String,
}

#[derive(Debug, Serialize)]
struct CatalogEntry {
    name: String,
    path: String,
    description: String,
}

/// Registry generator.
#[derive(Debug)]
pub struct RegistryGenerator {
    config: SiteConfig,
}

impl RegistryGenerator {
    /// Create a new registry generator.
    #[must_use]
    pub fn new(config: SiteConfig) -> Self {
        Self { config }
    }

    /// Generate the blog registry from the post list, in post order.
    pub fn blog_registry(&self, index: &ContentIndex) -> Result<String> {
        let entries: Vec<BlogEntry> = index
            .posts()
            .iter()
            .map(|post| BlogEntry {
                title: post.title.clone(),
                description: post.description.clone(),
                url: self.config.url_for(&format!("blog/{}.html", post.slug)),
                date_published: post.date.to_rfc3339(),
                tags: post.tags.clone(),
            })
            .collect();

        debug!(count = entries.len(), "generating blog registry");
        Ok(serde_json::to_string_pretty(&entries)?)
    }

    /// Generate the projects registry from configuration.
    pub fn projects_registry(&self) -> Result<String> {
        let entries: Vec<ProjectEntry> = self
            .config
            .projects
            .iter()
            .map(|p| ProjectEntry {
                title: p.title.clone(),
                description: p.description.clone(),
                link: p.link.clone(),
                techs: p.techs.clone(),
            })
            .collect();

        Ok(serde_json::to_string_pretty(&entries)?)
    }

    /// Generate the skills registry from configuration.
    pub fn skills_registry(&self) -> Result<String> {
        let entries: Vec<SkillEntry> = self
            .config
            .skills
            .iter()
            .map(|s| SkillEntry {
                name: s.name.clone(),
                icon: s.icon.clone(),
            })
            .collect();

        Ok(serde_json::to_string_pretty(&entries)?)
    }

    /// Generate the profile registry from site metadata and socials.
    pub fn profile_registry(&self) -> Result<String> {
        let site = &self.config.site;
        let profile = Profile {
            name: site.name.clone(),
            title: site.title.clone(),
            slogan: site.slogan.clone(),
            url: site.url.clone(),
            description: site.description.clone(),
            socials: self
                .config
                .socials
                .iter()
                .map(|s| SocialEntry {
                    name: s.name.clone(),
                    href: s.href.clone(),
                    icon: s.icon.clone(),
                })
                .collect(),
        };

        Ok(serde_json::to_string_pretty(&profile)?)
    }

    /// Generate the catalog registry listing the other registries.
    pub fn catalog_registry(&self) -> Result<String> {
        let catalog = Catalog {
            site: CatalogSite {
                title: self.config.site.title.clone(),
                url: self.config.site.url.clone(),
            },
            registries: vec![
                CatalogEntry {
                    name: "blog".to_string(),
                    path: "api/blog-registry.json".to_string(),
                    description: "Published posts with links and tags".to_string(),
                },
                CatalogEntry {
                    name: "projects".to_string(),
                    path: "api/projects-registry.json".to_string(),
                    description: "Portfolio projects".to_string(),
                },
                CatalogEntry {
                    name: "skills".to_string(),
                    path: "api/skills-registry.json".to_string(),
                    description: "Skill list".to_string(),
                },
                CatalogEntry {
                    name: "profile".to_string(),
                    path: "api/profile-registry.json".to_string(),
                    description: "Site owner profile and social links".to_string(),
                },
            ],
        };

        Ok(serde_json::to_string_pretty(&catalog)?)
    }
}

#[cfg(test)]
mod tests {
    use arbor_core::{
        Post,
        config::{
            AboutSection, NavigationConfig, NowSection, Project, SiteMeta, Skill, Social,
        },
    };
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::aggregate::aggregate;

    fn test_config() -> SiteConfig {
        SiteConfig {
            site: SiteMeta {
                url: "https://example.com/".to_string(),
                title: "Example Site".to_string(),
                name: "Jordan Example".to_string(),
                slogan: "notes on software".to_string(),
                description: "A personal site".to_string(),
                about: AboutSection::default(),
                now: NowSection::default(),
                page_size: 10,
            },
            navigation: NavigationConfig::default(),
            socials: vec![Social {
                name: "GitHub".to_string(),
                href: "https://github.com/example".to_string(),
                icon: "github.svg".to_string(),
            }],
            projects: vec![Project {
                title: "First Project".to_string(),
                description: "Does a thing".to_string(),
                link: "https://github.com/example/first".to_string(),
                techs: vec!["Rust".to_string()],
            }],
            skills: vec![Skill {
                name: "Rust".to_string(),
                icon: "rust.svg".to_string(),
            }],
        }
    }

    fn test_post(slug: &str) -> Post {
        Post {
            slug: slug.to_string(),
            title: format!("Title {slug}"),
            description: "desc".to_string(),
            date: Utc.with_ymd_and_hms(2025, 4, 2, 9, 0, 0).unwrap(),
            tags: vec!["rust".to_string()],
            body: String::new(),
            related: Vec::new(),
        }
    }

    #[test]
    fn test_blog_registry() {
        let generator = RegistryGenerator::new(test_config());
        let index = aggregate(vec![test_post("hello")]);

        let json = generator.blog_registry(&index).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed[0]["title"], "Title hello");
        assert_eq!(parsed[0]["url"], "https://example.com/blog/hello.html");
        assert_eq!(parsed[0]["date_published"], "2025-04-02T09:00:00+00:00");
        assert_eq!(parsed[0]["tags"][0], "rust");
    }

    #[test]
    fn test_blog_registry_empty() {
        let generator = RegistryGenerator::new(test_config());
        let index = aggregate(Vec::new());

        assert_eq!(generator.blog_registry(&index).unwrap(), "[]");
    }

    #[test]
    fn test_projects_registry() {
        let generator = RegistryGenerator::new(test_config());
        let json = generator.projects_registry().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed[0]["title"], "First Project");
        assert_eq!(parsed[0]["techs"][0], "Rust");
    }

    #[test]
    fn test_skills_registry() {
        let generator = RegistryGenerator::new(test_config());
        let json = generator.skills_registry().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed[0]["name"], "Rust");
        assert_eq!(parsed[0]["icon"], "rust.svg");
    }

    #[test]
    fn test_profile_registry() {
        let generator = RegistryGenerator::new(test_config());
        let json = generator.profile_registry().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["name"], "Jordan Example");
        assert_eq!(parsed["slogan"], "notes on software");
        assert_eq!(parsed["socials"][0]["name"], "GitHub");
    }

    #[test]
    fn test_catalog_lists_other_registries() {
        let generator = RegistryGenerator::new(test_config());
        let json = generator.catalog_registry().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        let names: Vec<_> = parsed["registries"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["blog", "projects", "skills", "profile"]);

        for registry in parsed["registries"].as_array().unwrap() {
            let path = registry["path"].as_str().unwrap();
            assert!(REGISTRY_FILES.contains(&path));
        }
    }
}
