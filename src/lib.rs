// ColorNorm - SVG color normalizer for HTML articles
//
// This is the library crate containing the rule table and the rewrite logic.
// The binary crate (main.rs) provides the command-line entry point.

pub mod config;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use metrics::Metrics;
pub use models::{COMPLETION_NOTICE, NormalizerSettings, TARGET_FILES, UserConfig};
pub use services::{ApplyMode, ColorNormalizer, NormalizeError, RuleSet};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
