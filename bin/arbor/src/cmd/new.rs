//! New command - create a draft post

use std::{fs, path::Path};

use chrono::Utc;
use color_eyre::eyre::{Result, WrapErr, bail};

/// Run the new command.
///
/// Creates a new draft post with boilerplate frontmatter. The file name
/// becomes the post's slug.
pub fn run(slug: &str, content_dir: &Path) -> Result<()> {
    tracing::info!(slug, ?content_dir, "Creating new post");

    let file_path = content_dir.join(format!("{slug}.md"));
    if file_path.exists() {
        bail!("post already exists: {}", file_path.display());
    }

    fs::create_dir_all(content_dir).wrap_err("Failed to create content directory")?;
    fs::write(&file_path, draft_frontmatter(slug)).wrap_err("Failed to write post file")?;

    println!("Created: {}", file_path.display());
    Ok(())
}

fn draft_frontmatter(slug: &str) -> String {
    let title = slug.replace('-', " ");
    let date = Utc::now().format("%Y-%m-%d").to_string();

    format!(
        r#"---
title: "{title}"
description: ""
date: {date}
tags: []
draft: true
---

Write your content here.
"#
    )
}
