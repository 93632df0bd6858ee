use crate::metrics::Metrics;
use crate::models::{COMPLETION_NOTICE, updated_notice};
use crate::services::rules::{ApplyMode, RuleSet};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io::{self, Write};
use std::time::Instant;
use thiserror::Error;

/// Errors that abort a normalization run
#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to emit progress notice: {0}")]
    Notice(#[source] io::Error),

    #[error("Invalid color pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Where document text is read from and written back to
#[cfg_attr(test, mockall::automock)]
pub trait ContentStore {
    fn exists(&self, path: &Utf8Path) -> bool;

    /// Read the whole file as UTF-8
    fn read(&self, path: &Utf8Path) -> io::Result<String>;

    /// Replace the whole file
    fn write(&self, path: &Utf8Path, contents: &str) -> io::Result<()>;
}

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskStore;

impl ContentStore for DiskStore {
    fn exists(&self, path: &Utf8Path) -> bool {
        path.exists()
    }

    fn read(&self, path: &Utf8Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Utf8Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents)
    }
}

/// What happened to a single listed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Not present; left alone and not reported
    Missing,
    /// Rewritten in place
    Updated {
        replacements: usize,
        bytes_written: usize,
    },
}

/// Files touched by a completed run, in processing order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub updated: Vec<String>,
    pub missing: Vec<String>,
    pub replacements: usize,
}

/// Rewrites SVG colors in a fixed set of documents
///
/// Files are processed strictly one after another. The first read or write
/// failure stops the run: files already written stay written, files after
/// it are not touched.
pub struct ColorNormalizer<S = DiskStore> {
    store: S,
    rules: RuleSet,
    mode: ApplyMode,
    root: Utf8PathBuf,
    metrics: Metrics,
}

impl ColorNormalizer<DiskStore> {
    /// Create a normalizer over the real filesystem
    ///
    /// # Arguments
    /// * `root` - Directory file names are resolved against
    /// * `mode` - How the rule table is applied
    pub fn new<P: AsRef<Utf8Path>>(root: P, mode: ApplyMode) -> Result<Self, NormalizeError> {
        Self::with_store(DiskStore, root, mode)
    }
}

impl<S: ContentStore> ColorNormalizer<S> {
    /// Create a normalizer over any [`ContentStore`]
    pub fn with_store<P: AsRef<Utf8Path>>(
        store: S,
        root: P,
        mode: ApplyMode,
    ) -> Result<Self, NormalizeError> {
        Ok(Self {
            store,
            rules: RuleSet::palette()?,
            mode,
            root: root.as_ref().to_path_buf(),
            metrics: Metrics::new(),
        })
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn mode(&self) -> ApplyMode {
        self.mode
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Read, rewrite and write back one file
    ///
    /// A file that does not exist is skipped without error.
    pub fn normalize_file(&self, file_name: &str) -> Result<FileOutcome, NormalizeError> {
        let path = self.root.join(file_name);

        if !self.store.exists(&path) {
            tracing::debug!("Skipping {}: not found", path);
            self.metrics.record_file_missing();
            return Ok(FileOutcome::Missing);
        }

        let start = Instant::now();

        let content = self.store.read(&path).map_err(|source| NormalizeError::Read {
            path: path.clone(),
            source,
        })?;

        let rewrite = self.rules.apply(&content, self.mode);

        self.store
            .write(&path, &rewrite.content)
            .map_err(|source| NormalizeError::Write {
                path: path.clone(),
                source,
            })?;

        let bytes_written = rewrite.content.len();
        self.metrics
            .record_file_updated(rewrite.replacements, bytes_written);
        self.metrics.record_rewrite_time(start.elapsed());

        tracing::debug!(
            "Rewrote {} ({} replacements, {} bytes)",
            path,
            rewrite.replacements,
            bytes_written
        );
        for (rule, hits) in rewrite.per_rule.iter().filter(|(_, hits)| **hits > 0) {
            tracing::trace!("  {} x{}", rule, hits);
        }

        Ok(FileOutcome::Updated {
            replacements: rewrite.replacements,
            bytes_written,
        })
    }

    /// Process every file in order, writing progress notices to `out`
    ///
    /// Prints `Updated <name>` for each existing file and the completion
    /// notice once at the end. Returns at the first failure without
    /// printing the completion notice.
    pub fn normalize<W: Write>(
        &self,
        file_names: &[&str],
        out: &mut W,
    ) -> Result<RunSummary, NormalizeError> {
        tracing::info!(
            "Normalizing {} file(s) under {} ({:?})",
            file_names.len(),
            self.root,
            self.mode
        );

        let mut summary = RunSummary::default();

        for &file_name in file_names {
            match self.normalize_file(file_name)? {
                FileOutcome::Missing => summary.missing.push(file_name.to_string()),
                FileOutcome::Updated { replacements, .. } => {
                    writeln!(out, "{}", updated_notice(file_name))
                        .map_err(NormalizeError::Notice)?;
                    summary.replacements += replacements;
                    summary.updated.push(file_name.to_string());
                }
            }
        }

        writeln!(out, "{}", COMPLETION_NOTICE).map_err(NormalizeError::Notice)?;
        out.flush().map_err(NormalizeError::Notice)?;

        tracing::info!(
            "Run complete: {} updated, {} missing, {} replacements",
            summary.updated.len(),
            summary.missing.len(),
            summary.replacements
        );

        Ok(summary)
    }
}
