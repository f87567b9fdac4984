//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.
//!
//! The Notion secret is never read from a file: it only comes from the
//! `NOTION_TOKEN` environment variable.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable holding the Notion integration secret
pub const NOTION_TOKEN_ENV: &str = "NOTION_TOKEN";

/// Page whose child blocks the relay serves
pub const DEFAULT_PAGE_ID: &str = "1df6b3e4e1aa8149a351c4c00b0f25cd";

/// Main configuration structure
#[derive(Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub relay: RelayConfig,

    #[serde(default)]
    pub notion: NotionConfig,

    #[serde(default)]
    pub loader: LoaderConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Notion integration secret, from `NOTION_TOKEN` only
    #[serde(skip)]
    pub notion_token: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("relay", &self.relay)
            .field("notion", &self.notion)
            .field("loader", &self.loader)
            .field("auth", &self.auth)
            .field("logging", &self.logging)
            .field("notion_token", &self.notion_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Relay server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Name of the function, served under `/functions/v1/{function_name}`
    #[serde(default = "default_function_name")]
    pub function_name: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8083
}

fn default_function_name() -> String {
    "notion-page".to_string()
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            function_name: default_function_name(),
        }
    }
}

/// Notion upstream configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NotionConfig {
    #[serde(default = "default_notion_url")]
    pub api_url: String,

    #[serde(default = "default_notion_version")]
    pub api_version: String,

    #[serde(default = "default_page_id")]
    pub page_id: String,

    /// Upper bound on blocks returned per call (Notion caps this at 100)
    #[serde(default = "default_page_size")]
    pub page_size: Option<u32>,

    #[serde(default = "default_notion_timeout")]
    pub request_timeout_secs: u64,
}

fn default_notion_url() -> String {
    "https://api.notion.com".to_string()
}

fn default_notion_version() -> String {
    crate::notion::NOTION_API_VERSION.to_string()
}

fn default_page_id() -> String {
    DEFAULT_PAGE_ID.to_string()
}

fn default_page_size() -> Option<u32> {
    Some(100)
}

fn default_notion_timeout() -> u64 {
    10
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            api_url: default_notion_url(),
            api_version: default_notion_version(),
            page_id: default_page_id(),
            page_size: default_page_size(),
            request_timeout_secs: default_notion_timeout(),
        }
    }
}

impl From<&NotionConfig> for crate::notion::NotionClientConfig {
    fn from(config: &NotionConfig) -> Self {
        Self {
            base_url: config.api_url.clone(),
            api_version: config.api_version.clone(),
            request_timeout_ms: config.request_timeout_secs * 1000,
        }
    }
}

/// Content loader configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoaderConfig {
    #[serde(default = "default_relay_url")]
    pub relay_url: String,

    /// Bound on a single load attempt
    #[serde(default = "default_loader_timeout")]
    pub timeout_secs: u64,
}

fn default_relay_url() -> String {
    "http://localhost:8083/functions/v1/notion-page".to_string()
}

fn default_loader_timeout() -> u64 {
    15
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            relay_url: default_relay_url(),
            timeout_secs: default_loader_timeout(),
        }
    }
}

/// Auth provider configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// Base URL of the auth provider (e.g., "https://xyz.supabase.co")
    pub url: Option<String>,

    /// Public (anon) API key sent as `apikey` to the auth provider and relay
    pub anon_key: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("folio").join("config.toml")),
            Some(PathBuf::from("/etc/folio/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup (the process environment in production)
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Relay overrides
        if let Some(host) = lookup("FOLIO_RELAY_HOST") {
            self.relay.host = host;
        }
        if let Some(port) = lookup("FOLIO_RELAY_PORT") {
            if let Ok(p) = port.parse() {
                self.relay.port = p;
            }
        }

        // Notion overrides
        if let Some(url) = lookup("FOLIO_NOTION_API_URL") {
            self.notion.api_url = url;
        }
        if let Some(page_id) = lookup("FOLIO_NOTION_PAGE_ID") {
            self.notion.page_id = page_id;
        }

        // Loader overrides
        if let Some(url) = lookup("FOLIO_LOADER_RELAY_URL") {
            self.loader.relay_url = url;
        }
        if let Some(secs) = lookup("FOLIO_LOADER_TIMEOUT_SECS") {
            if let Ok(s) = secs.parse() {
                self.loader.timeout_secs = s;
            }
        }

        // Auth overrides
        if let Some(url) = lookup("FOLIO_AUTH_URL") {
            self.auth.url = Some(url);
        }
        if let Some(key) = lookup("FOLIO_AUTH_ANON_KEY") {
            self.auth.anon_key = Some(key);
        }

        // Logging overrides
        if let Some(level) = lookup("FOLIO_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("FOLIO_LOG_FORMAT") {
            self.logging.format = format;
        }

        // Secret: an empty value counts as unset
        self.notion_token = lookup(NOTION_TOKEN_ENV).filter(|t| !t.trim().is_empty());
    }

    /// Relay route path for the configured function
    pub fn function_path(&self) -> String {
        format!("/functions/v1/{}", self.relay.function_name)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Folio Configuration
#
# Environment variables override these settings:
# - FOLIO_RELAY_HOST, FOLIO_RELAY_PORT
# - FOLIO_NOTION_API_URL, FOLIO_NOTION_PAGE_ID
# - FOLIO_LOADER_RELAY_URL, FOLIO_LOADER_TIMEOUT_SECS
# - FOLIO_AUTH_URL, FOLIO_AUTH_ANON_KEY
# - FOLIO_LOG_LEVEL, FOLIO_LOG_FORMAT
#
# The Notion integration secret is only read from NOTION_TOKEN.

[relay]
# Relay server host
host = "0.0.0.0"

# Relay server port
port = 8083

# Served under /functions/v1/<function_name>
function_name = "notion-page"

[notion]
# Notion API base URL
api_url = "https://api.notion.com"

# Notion-Version header
api_version = "2022-06-28"

# Page whose blocks are served
page_id = "1df6b3e4e1aa8149a351c4c00b0f25cd"

# Maximum number of blocks per call
page_size = 100

# Upstream request timeout in seconds
request_timeout_secs = 10

[loader]
# Relay endpoint the loader calls
relay_url = "http://localhost:8083/functions/v1/notion-page"

# Give up on a load attempt after this many seconds
timeout_secs = 15

[auth]
# Auth provider base URL
# url = "https://your-project.supabase.co"

# Public anon key
# anon_key = ""

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
