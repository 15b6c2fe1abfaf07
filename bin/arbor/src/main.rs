//! Arbor CLI
//!
//! Single binary static site generator for personal sites and blogs.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for Arbor.
#[derive(Parser)]
#[command(name = "arbor", version, about = "A static site generator for personal sites")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Build the static site
    Build {
        /// Configuration directory
        #[arg(long, default_value = "configs")]
        config: std::path::PathBuf,
        /// Content directory
        #[arg(long, default_value = "content")]
        content: std::path::PathBuf,
        /// Static asset directory
        #[arg(long, default_value = "static")]
        r#static: std::path::PathBuf,
        /// Output directory
        #[arg(short, long, default_value = "dist")]
        output: std::path::PathBuf,
    },
    /// Validate configuration and content
    Check {
        /// Configuration directory
        #[arg(long, default_value = "configs")]
        config: std::path::PathBuf,
        /// Content directory
        #[arg(long, default_value = "content")]
        content: std::path::PathBuf,
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Create a new draft post
    New {
        /// Slug for the new post (e.g., my-article)
        slug: String,
        /// Content directory
        #[arg(long, default_value = "content")]
        content: std::path::PathBuf,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    arbor::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build {
            config,
            content,
            r#static,
            output,
        } => {
            arbor::cmd::build::run(&config, &content, &r#static, &output)?;
        }
        Commands::Check {
            config,
            content,
            strict,
        } => {
            arbor::cmd::check::run(&config, &content, strict)?;
        }
        Commands::New { slug, content } => {
            arbor::cmd::new::run(&slug, &content)?;
        }
    }

    Ok(())
}
