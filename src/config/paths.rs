//! Where the auditor keeps its settings, resolved with the `dirs` crate.
//!
//! `settings.toml` lives in the per-user config directory:
//!   Windows: %APPDATA%\srt-auditor\
//!   macOS:   ~/Library/Application Support/srt-auditor/
//!   Linux:   ~/.config/srt-auditor/

use std::path::{Path, PathBuf};

const APP_DIR: &str = "srt-auditor";
const SETTINGS_FILE: &str = "settings.toml";

#[derive(Debug, Clone)]
pub struct AppPaths {
    /// `<platform config dir>/srt-auditor`.
    pub config_dir: PathBuf,
    pub settings_file: PathBuf,
}

impl AppPaths {
    /// Paths under the platform config directory, or `./srt-auditor` when
    /// the platform has none.
    pub fn new() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::under(&base)
    }

    /// Paths under an arbitrary base directory.
    pub fn under(base: &Path) -> Self {
        let config_dir = base.join(APP_DIR);
        Self {
            settings_file: config_dir.join(SETTINGS_FILE),
            config_dir,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}
