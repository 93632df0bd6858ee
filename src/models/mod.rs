//! Data models for ColorNorm.
//!
//! - [`TARGET_FILES`]: the fixed, ordered list of articles a run rewrites
//! - [`UserConfig`]: optional settings loaded from `ColorNorm Config.yaml`

pub mod config;
pub mod targets;

pub use config::{NormalizerSettings, UserConfig};
pub use targets::{COMPLETION_NOTICE, TARGET_FILES, updated_notice};
