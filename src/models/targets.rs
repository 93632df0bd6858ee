/// Articles rewritten by a run, in processing order.
///
/// Names are relative to the configured root directory. The list is fixed;
/// duplicates would simply be processed twice.
pub const TARGET_FILES: [&str; 7] = [
    "trading-basics.html",
    "forex-article.html",
    "risk-management.html",
    "trading-psychology.html",
    "technical-analysis.html",
    "support-resistance.html",
    "thought.html",
];

/// Final line printed once every target has been attempted
pub const COMPLETION_NOTICE: &str = "All HTML files updated to remove colors except white/black.";

/// Per-file progress line
pub fn updated_notice(file_name: &str) -> String {
    format!("Updated {}", file_name)
}
