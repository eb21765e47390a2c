//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and handed to the
//! pipeline task.  Missing keys fall back to their defaults, so a settings
//! file only needs to name what it overrides.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// LlmProvider
// ---------------------------------------------------------------------------

/// Wire format spoken by the comparison backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LlmProvider {
    /// Google Gemini `generateContent` REST API.
    Gemini,
    /// Any OpenAI-compatible `/v1/chat/completions` endpoint (OpenAI, Groq,
    /// Ollama in OpenAI mode, LM Studio …).
    OpenAiCompatible,
}

impl LlmProvider {
    /// Base URL used when the settings file does not name one.
    pub fn default_base_url(self) -> &'static str {
        match self {
            LlmProvider::Gemini => "https://generativelanguage.googleapis.com",
            LlmProvider::OpenAiCompatible => "https://api.openai.com",
        }
    }
}

impl Default for LlmProvider {
    fn default() -> Self {
        Self::Gemini
    }
}

// ---------------------------------------------------------------------------
// LlmConfig
// ---------------------------------------------------------------------------

/// Settings for the comparison backend.
///
/// The API key itself is never stored here: only the name of the environment
/// variable it is read from, at call time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Which wire format to use.
    pub provider: LlmProvider,
    /// Base URL of the API endpoint, without a trailing path.
    pub base_url: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// Model identifier sent to the API.
    pub model: String,
    /// Sampling temperature.  Kept low so reports stay literal.
    pub temperature: f32,
    /// Maximum seconds to wait for the backend before giving up.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        let provider = LlmProvider::default();
        Self {
            provider,
            base_url: provider.default_base_url().into(),
            api_key_env: "API_KEY".into(),
            model: "gemini-3-flash-preview".into(),
            temperature: 0.1,
            timeout_secs: 120,
        }
    }
}

// ---------------------------------------------------------------------------
// UiConfig
// ---------------------------------------------------------------------------

/// Window appearance and transcript display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Initial inner size of the window `(width, height)` in points.
    pub window_size: (f32, f32),
    /// Number of characters of a user submission echoed into the transcript
    /// before it is abbreviated.
    pub preview_chars: usize,
    /// Body text size in points; headings and captions scale from it.
    pub font_size: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_size: (760.0, 680.0),
            preview_chars: 300,
            font_size: 15.0,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use srt_auditor::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
/// assert!(!config.llm.model.is_empty());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Comparison backend settings.
    pub llm: LlmConfig,
    /// Window / transcript settings.
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// so callers never need to special-case a first run.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.llm.provider, LlmProvider::Gemini);
        assert_eq!(cfg.llm.base_url, "https://generativelanguage.googleapis.com");
        assert_eq!(cfg.llm.api_key_env, "API_KEY");
        assert_eq!(cfg.llm.model, "gemini-3-flash-preview");
        assert!((cfg.llm.temperature - 0.1).abs() < f32::EPSILON);
        assert_eq!(cfg.llm.timeout_secs, 120);
        assert_eq!(cfg.ui.preview_chars, 300);
        assert_eq!(cfg.ui.font_size, 15.0);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");

        assert_eq!(config.llm.model, LlmConfig::default().model);
        assert_eq!(config.ui.preview_chars, UiConfig::default().preview_chars);
    }

    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("settings.toml");

        let mut cfg = AppConfig::default();
        cfg.llm.provider = LlmProvider::OpenAiCompatible;
        cfg.llm.base_url = "http://localhost:11434".into();
        cfg.llm.api_key_env = "GROQ_API_KEY".into();
        cfg.llm.model = "qwen2.5:7b".into();
        cfg.llm.timeout_secs = 30;
        cfg.ui.window_size = (900.0, 700.0);
        cfg.ui.preview_chars = 120;
        cfg.ui.font_size = 18.0;

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.llm.provider, LlmProvider::OpenAiCompatible);
        assert_eq!(loaded.llm.base_url, "http://localhost:11434");
        assert_eq!(loaded.llm.api_key_env, "GROQ_API_KEY");
        assert_eq!(loaded.llm.model, "qwen2.5:7b");
        assert_eq!(loaded.llm.timeout_secs, 30);
        assert_eq!(loaded.ui.window_size, (900.0, 700.0));
        assert_eq!(loaded.ui.preview_chars, 120);
        assert_eq!(loaded.ui.font_size, 18.0);
    }

    /// A settings file that only overrides one key keeps every other default.
    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[llm]\nmodel = \"gemini-2.5-pro\"\n").expect("write");

        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.llm.model, "gemini-2.5-pro");
        assert_eq!(loaded.llm.provider, LlmProvider::Gemini);
        assert_eq!(loaded.llm.api_key_env, "API_KEY");
        assert_eq!(loaded.ui.preview_chars, 300);
    }

    #[test]
    fn save_creates_app_dir() {
        let dir = tempdir().expect("temp dir");
        let paths = AppPaths::under(dir.path());

        AppConfig::default().save_to(&paths.settings_file).expect("save");

        assert!(paths.config_dir.is_dir());
        assert!(AppConfig::load_from(&paths.settings_file).is_ok());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[llm\nmodel = ").expect("write");

        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn provider_base_urls() {
        assert_eq!(
            LlmProvider::OpenAiCompatible.default_base_url(),
            "https://api.openai.com"
        );
        assert!(LlmProvider::Gemini.default_base_url().contains("googleapis"));
    }
}
