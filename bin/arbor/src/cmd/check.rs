//! Check command - validate configuration and content

use std::path::Path;

use arbor_core::SiteConfig;
use arbor_generator::ContentCollector;
use color_eyre::eyre::{Result, bail};

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Run the check command.
///
/// Validates the configuration directory and all content files without
/// writing any output.
pub fn run(config_dir: &Path, content_dir: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_dir, ?content_dir, strict, "Checking configuration and content");

    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    let config = match SiteConfig::load(config_dir) {
        Ok(c) => {
            println!("  ✓ Configuration valid");
            Some(c)
        }
        Err(e) => {
            result.add_error(format!("Configuration error: {e}"));
            println!("  ✗ Configuration invalid: {e}");
            None
        }
    };

    println!();
    println!("Checking content...");
    if content_dir.is_dir() {
        match ContentCollector::new(content_dir).collect() {
            Ok(posts) => {
                println!("  ✓ {} posts parsed", posts.len());
                if posts.is_empty() {
                    result.add_warning("Content directory contains no publishable posts");
                }
                for post in &posts {
                    if post.description.is_empty() {
                        result.add_warning(format!(
                            "Post '{}' has no description; listings and feeds will be empty",
                            post.slug
                        ));
                    }
                    if post.tags.is_empty() {
                        result.add_warning(format!("Post '{}' has no tags", post.slug));
                    }
                }
            }
            Err(e) => {
                result.add_error(format!("Content error: {e}"));
                println!("  ✗ Content invalid: {e}");
            }
        }
    } else {
        result.add_error(format!(
            "Content directory does not exist: {}",
            content_dir.display()
        ));
    }

    if let Some(config) = &config
        && !config.site.url.ends_with('/')
    {
        result.add_warning("site.url should end with a trailing slash");
    }

    println!();
    for warning in &result.warnings {
        println!("  ⚠ {warning}");
    }
    for error in &result.errors {
        println!("  ✗ {error}");
    }

    if result.has_errors() {
        bail!("check failed with {} error(s)", result.errors.len());
    }
    if strict && !result.warnings.is_empty() {
        bail!(
            "check failed with {} warning(s) in strict mode",
            result.warnings.len()
        );
    }

    println!("  ✓ All checks passed");
    Ok(())
}
