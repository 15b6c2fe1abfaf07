//! Build command - generates the static site

use std::{path::Path, time::Instant};

use arbor_core::SiteConfig;
use arbor_generator::Builder;
use color_eyre::eyre::{Result, WrapErr};

/// Run the build command.
///
/// Builds the static site from the content directory into the output
/// directory.
pub fn run(config_dir: &Path, content_dir: &Path, static_dir: &Path, output: &Path) -> Result<()> {
    let start = Instant::now();
    tracing::info!(?config_dir, ?content_dir, ?static_dir, ?output, "Starting build");

    let config = SiteConfig::load(config_dir).wrap_err("Failed to load configuration")?;

    let mut builder = Builder::new(config, content_dir, output);

    if static_dir.is_dir() {
        tracing::info!(?static_dir, "Found static directory, will copy to output");
        builder = builder.with_static_dir(static_dir);
    }

    let stats = builder.build().wrap_err("Build failed")?;

    let duration = start.elapsed();

    println!();
    println!("  Build completed successfully!");
    println!();
    println!("  Posts:        {}", stats.posts);
    println!("  Static pages: {}", stats.static_pages);
    println!("  Blog pages:   {}", stats.blog_pages);
    println!("  Tag pages:    {}", stats.tag_pages);
    println!("  Post pages:   {}", stats.post_pages);
    println!("  Registries:   {}", stats.registries);
    println!("  Assets:       {}", stats.assets);
    println!();
    println!("  Duration:     {:.2}s", duration.as_secs_f64());
    println!("  Output:       {}", output.display());
    println!();

    tracing::info!(?stats, ?duration, "Build completed successfully");

    Ok(())
}
