//! Services module - the color normalization logic.
//!
//! # Components
//!
//! - [`RuleSet`]: the ordered table of `fill`/`stroke` substitutions that maps
//!   the article palette to black and white. It can be applied in one
//!   combined scan ([`ApplyMode::SinglePass`]) or rule by rule over the
//!   previous rule's output ([`ApplyMode::Cascade`]).
//!
//! - [`ColorNormalizer`]: walks the fixed file list, rewrites each existing
//!   file in place and prints one progress line per file plus a final
//!   notice. Storage goes through [`ContentStore`]; [`DiskStore`] is the
//!   real filesystem.
//!
//! # Usage Example
//!
//! ```no_run
//! use colornorm::TARGET_FILES;
//! use colornorm::services::{ApplyMode, ColorNormalizer};
//!
//! let normalizer = ColorNormalizer::new(".", ApplyMode::SinglePass)?;
//! let mut stdout = std::io::stdout().lock();
//! normalizer.normalize(&TARGET_FILES, &mut stdout)?;
//! # Ok::<(), colornorm::services::NormalizeError>(())
//! ```
//!
//! Matching is textual: attributes are found by pattern, never by parsing
//! the SVG or HTML around them.

pub mod normalizer;
pub mod rules;

pub use normalizer::{
    ColorNormalizer, ContentStore, DiskStore, FileOutcome, NormalizeError, RunSummary,
};
pub use rules::{ApplyMode, Attribute, BLACK, Rewrite, RuleGroup, RuleSet, SubstitutionRule, WHITE};
