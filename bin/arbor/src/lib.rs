//! Arbor CLI Library
//!
//! Command implementations for the Arbor static site generator CLI. The
//! binary entry point in `main.rs` parses arguments and dispatches here.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, check, new)

pub mod cmd;

// Re-export core types for convenience
pub use arbor_core::{Post, SiteConfig};
pub use arbor_generator::{BuildStats, Builder, ContentCollector};

/// Initialize tracing with the specified verbosity level.
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
