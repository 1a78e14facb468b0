use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_u16(profile: &str, key: &str, default: u16) -> u16 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_u64(profile: &str, key: &str, default: u64) -> u64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_u32(profile: &str, key: &str, default: u32) -> u32 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `PDFCHAT_PROFILE`. When set (e.g. `PROD`), every
    /// key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("PDFCHAT_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            server: ServerConfig::from_env_profiled(p),
            llm: LlmConfig::from_env_profiled(p),
            logging: LoggingConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  server:   {}:{}", self.server.host, self.server.port);
        tracing::info!(
            "  llm:      model={}, api_key={}",
            self.llm.model,
            if self.llm.is_configured() { "set" } else { "(missing)" }
        );
        tracing::info!(
            "  logging:  dir={}, max_files={}, max_file_bytes={}",
            self.logging.dir.display(),
            self.logging.max_files,
            self.logging.max_file_bytes
        );
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            host: profiled_env_or(p, "HOST", "0.0.0.0"),
            port: profiled_env_u16(p, "PORT", 8000),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// ── LLM (Gemini) ──────────────────────────────────────────────

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Read from `API_KEY`, falling back to `GEMINI_API_KEY`.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl LlmConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            api_key: profiled_env_opt(p, "API_KEY")
                .or_else(|| profiled_env_opt(p, "GEMINI_API_KEY")),
            model: profiled_env_or(p, "GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            base_url: profiled_env_or(p, "GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
            temperature: profiled_env_or(p, "LLM_TEMPERATURE", "0.2")
                .parse()
                .unwrap_or(0.2),
            max_tokens: profiled_env_u32(p, "LLM_MAX_TOKENS", 2048),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

// Hand-written so the API key never reaches a log line.
impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

// ── Logging ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory for the JSON log files.
    pub dir: PathBuf,
    /// Number of rotated (compressed) files to keep.
    pub max_files: usize,
    /// Size at which the active log file is rotated.
    pub max_file_bytes: u64,
}

impl LoggingConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            dir: PathBuf::from(profiled_env_or(p, "LOG_DIR", "logs")),
            max_files: profiled_env_u32(p, "LOG_MAX_FILES", 7) as usize,
            max_file_bytes: profiled_env_u64(p, "LOG_MAX_BYTES", 1_000_000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own profile prefix so parallel tests don't collide.

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::for_profile("pdfchat_test_defaults");
        assert_eq!(config.profile, "PDFCHAT_TEST_DEFAULTS");
        assert_eq!(config.llm.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.logging.max_files, 7);
        assert_eq!(config.logging.max_file_bytes, 1_000_000);
    }

    #[test]
    fn log_rotation_size_is_configurable() {
        env::set_var("PDFCHAT_TEST_LOGSIZE_LOG_MAX_BYTES", "4096");
        let config = Config::for_profile("pdfchat_test_logsize");
        assert_eq!(config.logging.max_file_bytes, 4096);
    }

    #[test]
    fn profiled_keys_take_precedence() {
        env::set_var("PDFCHAT_TEST_PROFILED_PORT", "9123");
        env::set_var("PDFCHAT_TEST_PROFILED_API_KEY", "secret-key");
        env::set_var("PDFCHAT_TEST_PROFILED_GEMINI_MODEL", "gemini-test");

        let config = Config::for_profile("pdfchat_test_profiled");
        assert_eq!(config.server.port, 9123);
        assert_eq!(config.llm.api_key.as_deref(), Some("secret-key"));
        assert_eq!(config.llm.model, "gemini-test");
        assert!(config.llm.is_configured());
    }

    #[test]
    fn gemini_api_key_is_a_fallback() {
        env::set_var("PDFCHAT_TEST_FALLBACK_GEMINI_API_KEY", "fallback");
        let config = Config::for_profile("pdfchat_test_fallback");
        // API_KEY may be set in the developer's shell; only check when it isn't.
        if env::var("API_KEY").is_err() {
            assert_eq!(config.llm.api_key.as_deref(), Some("fallback"));
        }
    }

    #[test]
    fn unparsable_numbers_fall_back_to_defaults() {
        env::set_var("PDFCHAT_TEST_BADNUM_LLM_MAX_TOKENS", "lots");
        let config = Config::for_profile("pdfchat_test_badnum");
        assert_eq!(config.llm.max_tokens, 2048);
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let llm = LlmConfig {
            api_key: Some("super-secret".into()),
            model: DEFAULT_GEMINI_MODEL.into(),
            base_url: DEFAULT_GEMINI_BASE_URL.into(),
            temperature: 0.2,
            max_tokens: 2048,
        };
        let rendered = format!("{llm:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
