//! Site configuration management.
//!
//! Configuration lives in a directory of YAML section files which are merged
//! into a single [`SiteConfig`] record at load time. The generator never
//! reads configuration from anywhere else.

use std::{fs, path::Path};

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CoreError, Result};

/// Section files expected inside the configuration directory. Each file
/// contributes its top-level keys to the merged record.
pub const SECTION_FILES: &[&str] = &[
    "site.yaml",
    "navigation.yaml",
    "socials.yaml",
    "projects.yaml",
    "skills.yaml",
];

/// Merged site configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site-wide metadata.
    pub site: SiteMeta,

    /// Header and footer navigation.
    #[serde(default)]
    pub navigation: NavigationConfig,

    /// Social profile links.
    #[serde(default)]
    pub socials: Vec<Social>,

    /// Portfolio projects.
    #[serde(default)]
    pub projects: Vec<Project>,

    /// Skill list.
    #[serde(default)]
    pub skills: Vec<Skill>,
}

/// Site-wide metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteMeta {
    /// Absolute base URL of the published site.
    pub url: String,

    /// Site title, used in page titles and feeds.
    pub title: String,

    /// Author/display name.
    #[serde(default)]
    pub name: String,

    /// Short tagline shown on the home page.
    #[serde(default)]
    pub slogan: String,

    /// Site description for meta tags and feeds.
    #[serde(default)]
    pub description: String,

    /// About page content.
    #[serde(default)]
    pub about: AboutSection,

    /// Now page content.
    #[serde(default)]
    pub now: NowSection,

    /// Posts per blog listing page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

/// About page section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AboutSection {
    /// Portrait image path.
    #[serde(default)]
    pub image: String,

    /// Paragraphs of about text.
    #[serde(default, deserialize_with = "string_list")]
    pub paragraphs: Vec<String>,
}

/// Now page section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NowSection {
    /// Human-readable last-updated marker.
    #[serde(default)]
    pub last_updated: String,

    /// Activity categories.
    #[serde(default)]
    pub categories: Vec<NowCategory>,
}

/// One category on the now page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NowCategory {
    /// Category heading.
    pub title: String,

    /// Entries under the heading.
    #[serde(default, deserialize_with = "string_list")]
    pub items: Vec<String>,
}

/// Header/footer navigation lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavigationConfig {
    #[serde(default)]
    pub header: Vec<NavItem>,

    #[serde(default)]
    pub footer: Vec<NavItem>,
}

/// A single navigation link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavItem {
    pub href: String,
    pub text: String,
}

/// A social profile link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Social {
    pub name: String,
    pub href: String,
    #[serde(default)]
    pub icon: String,
}

/// A portfolio project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub link: String,

    /// Technologies used. Accepts either a YAML list or a block of
    /// `- item` lines authored as free text.
    #[serde(default, deserialize_with = "string_list")]
    pub techs: Vec<String>,
}

/// A skill entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default)]
    pub icon: String,
}

/// A value that may be authored either as free text (one `- item` per line)
/// or as a proper YAML list. Resolved to a plain `Vec<String>` at the loading
/// boundary so generation logic only ever sees normalized items.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StringList {
    Items(Vec<String>),
    Text(String),
}

impl StringList {
    /// Normalize into a list of non-empty trimmed items.
    pub fn into_items(self) -> Vec<String> {
        match self {
            Self::Items(items) => items,
            Self::Text(text) => text
                .lines()
                .map(|line| {
                    line.trim()
                        .trim_start_matches("- ")
                        .trim_matches('"')
                        .to_string()
                })
                .filter(|line| !line.is_empty())
                .collect(),
        }
    }
}

fn string_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(StringList::deserialize(deserializer)?.into_items())
}

fn default_page_size() -> usize {
    10
}

impl SiteConfig {
    /// Load and merge all section files from a configuration directory.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let mut merged = serde_yaml::Mapping::new();

        for file in SECTION_FILES {
            let path = config_dir.join(file);
            let text = fs::read_to_string(&path).map_err(|e| {
                CoreError::config_with_source(
                    format!("cannot read config section {}", path.display()),
                    e,
                )
            })?;

            match serde_yaml::from_str::<serde_yaml::Value>(&text) {
                Ok(serde_yaml::Value::Mapping(map)) => merged.extend(map),
                Ok(serde_yaml::Value::Null) => {}
                Ok(_) => {
                    return Err(CoreError::config(format!(
                        "{}: expected a mapping at the top level",
                        path.display()
                    )));
                }
                Err(e) => {
                    return Err(CoreError::config_with_source(
                        format!("cannot parse config section {}", path.display()),
                        e,
                    ));
                }
            }
        }

        let config: SiteConfig = serde_yaml::from_value(serde_yaml::Value::Mapping(merged))
            .map_err(|e| CoreError::config_with_source("invalid merged configuration", e))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the merged configuration.
    fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.site.url.is_empty() {
            return Err(CoreError::config("site.url cannot be empty"));
        }

        if self.site.page_size == 0 {
            return Err(CoreError::config("site.page_size must be at least 1"));
        }

        if !self.site.url.ends_with('/') {
            tracing::warn!("site.url should end with a trailing slash");
        }

        Ok(())
    }

    /// Get the absolute URL for a site-relative path.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.site.url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn write_sections(dir: &Path) {
        fs::write(
            dir.join("site.yaml"),
            r#"
site:
  url: "https://example.com/"
  title: "Example Site"
  name: "Jordan Example"
  slogan: "notes on software"
  description: "A personal site"
  about:
    image: "/images/me.png"
    paragraphs: |
      - First paragraph
      - "Second paragraph"
  now:
    last_updated: "August 2026"
    categories:
      - title: Reading
        items:
          - A book
"#,
        )
        .expect("write site.yaml");
        fs::write(
            dir.join("navigation.yaml"),
            r#"
navigation:
  header:
    - href: /blog.html
      text: Blog
  footer:
    - href: /rss.xml
      text: RSS
"#,
        )
        .expect("write navigation.yaml");
        fs::write(
            dir.join("socials.yaml"),
            r#"
socials:
  - name: GitHub
    href: https://github.com/example
    icon: github.svg
"#,
        )
        .expect("write socials.yaml");
        fs::write(
            dir.join("projects.yaml"),
            r#"
projects:
  - title: First Project
    description: Does a thing
    link: https://github.com/example/first
    techs:
      - Rust
      - SQLite
"#,
        )
        .expect("write projects.yaml");
        fs::write(
            dir.join("skills.yaml"),
            r#"
skills:
  - name: Rust
    icon: rust.svg
"#,
        )
        .expect("write skills.yaml");
    }

    #[test]
    fn test_load_merges_sections() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write_sections(dir.path());

        let config = SiteConfig::load(dir.path()).expect("load config");

        assert_eq!(config.site.title, "Example Site");
        assert_eq!(config.site.page_size, 10);
        assert_eq!(config.navigation.header.len(), 1);
        assert_eq!(config.socials.len(), 1);
        assert_eq!(config.projects.len(), 1);
        assert_eq!(config.skills[0].name, "Rust");
    }

    #[test]
    fn test_string_list_from_text_block() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write_sections(dir.path());

        let config = SiteConfig::load(dir.path()).expect("load config");

        assert_eq!(
            config.site.about.paragraphs,
            vec!["First paragraph", "Second paragraph"]
        );
        // The same field authored as a proper list also normalizes.
        assert_eq!(config.projects[0].techs, vec!["Rust", "SQLite"]);
    }

    #[test]
    fn test_missing_section_is_fatal() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write_sections(dir.path());
        fs::remove_file(dir.path().join("skills.yaml")).expect("remove");

        let result = SiteConfig::load(dir.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("skills.yaml"));
    }

    #[test]
    fn test_empty_title_rejected() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write_sections(dir.path());
        fs::write(
            dir.path().join("site.yaml"),
            "site:\n  url: \"https://example.com/\"\n  title: \"\"\n",
        )
        .expect("write");

        let result = SiteConfig::load(dir.path());
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("title cannot be empty")
        );
    }

    #[test]
    fn test_url_for() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write_sections(dir.path());
        let config = SiteConfig::load(dir.path()).expect("load config");

        assert_eq!(
            config.url_for("blog/hello.html"),
            "https://example.com/blog/hello.html"
        );
        assert_eq!(
            config.url_for("/blog/hello.html"),
            "https://example.com/blog/hello.html"
        );
    }

    #[test]
    fn test_string_list_normalization() {
        let text = StringList::Text("- One\n  - \"Two\"\n\n- Three".to_string());
        assert_eq!(text.into_items(), vec!["One", "Two", "Three"]);

        let items = StringList::Items(vec!["A".to_string(), "B".to_string()]);
        assert_eq!(items.into_items(), vec!["A", "B"]);
    }
}
