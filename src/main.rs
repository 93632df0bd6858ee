//! ColorNorm - SVG color normalizer for HTML articles
//!
//! Main entry point for the command-line tool.
//!
//! # Overview
//!
//! Rewrites the `fill` and `stroke` colors of inline SVGs in a fixed list of
//! article pages so they render in plain black and white. Each listed page
//! that exists is read, rewritten and written back in place, and
//! `Updated <file>` is printed. Missing pages are skipped silently. One final
//! notice is printed after the last page.
//!
//! # Execution Flow
//!
//! 1. Load `ColorNorm Config.yaml` from the working directory (optional)
//! 2. Initialize logging (stderr and/or rolling file, both off by default)
//! 3. Build the [`ColorNormalizer`] for the configured root and apply mode
//! 4. Normalize every file in [`TARGET_FILES`], in order
//! 5. Log the run metrics
//!
//! Any read or write failure stops the run with a non-zero exit status.
//! Pages rewritten before the failure stay rewritten.

use anyhow::{Context, Result};
use colornorm::{APP_NAME, ColorNormalizer, ConfigManager, TARGET_FILES, VERSION};

fn main() -> Result<()> {
    let config_manager = ConfigManager::new(".")?;
    let user_config = config_manager.load_user_config()?;
    let settings = &user_config.settings;

    // Hold the guard so buffered file logs are flushed on exit
    let _log_guard = colornorm::logging::setup_logging(
        settings.log_dir(),
        APP_NAME,
        settings.debug_mode,
        settings.console_logging,
    )?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);
    tracing::debug!("Settings: {:?}", settings);

    let normalizer = ColorNormalizer::new(&settings.root_dir, settings.apply_mode)
        .context("Failed to build color rules")?;

    let mut stdout = std::io::stdout().lock();
    let result = normalizer.normalize(&TARGET_FILES, &mut stdout);

    normalizer.metrics().log_summary();

    let summary = result.map_err(|e| {
        tracing::error!("Normalization aborted: {}", e);
        anyhow::Error::new(e)
    })?;

    tracing::info!(
        "Finished: {} of {} files updated",
        summary.updated.len(),
        TARGET_FILES.len()
    );

    Ok(())
}
