use crate::services::ApplyMode;
use serde::{Deserialize, Serialize};

/// User configuration from ColorNorm Config.yaml
///
/// Every field is optional; a missing file or key falls back to defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(rename = "ColorNorm_Settings", default)]
    pub settings: NormalizerSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerSettings {
    /// Directory the target file names are resolved against
    #[serde(rename = "Root Dir", default = "default_root_dir")]
    pub root_dir: String,

    #[serde(rename = "Apply Mode", default)]
    pub apply_mode: ApplyMode,

    /// Directory for rolling log files; empty disables file logging
    #[serde(rename = "Log Dir", default)]
    pub log_dir: String,

    #[serde(rename = "Debug Mode", default)]
    pub debug_mode: bool,

    /// Mirror log events to stderr
    #[serde(rename = "Console Logging", default)]
    pub console_logging: bool,
}

impl Default for NormalizerSettings {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            apply_mode: ApplyMode::default(),
            log_dir: String::new(),
            debug_mode: false,
            console_logging: false,
        }
    }
}

fn default_root_dir() -> String {
    ".".to_string()
}

impl NormalizerSettings {
    /// Log directory, if file logging is enabled
    pub fn log_dir(&self) -> Option<&str> {
        let dir = self.log_dir.trim();
        (!dir.is_empty()).then_some(dir)
    }
}
