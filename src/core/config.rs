//! # Configuration
//!
//! Where the forum lives, which post to comment on, and how to authenticate.
//! Later sources win: defaults, then `~/.commenter/config.toml`, then
//! `COMMENTER_*` env vars, then CLI flags.
//!
//! The first run writes a fully commented-out file listing every option.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::api::trpc::DEFAULT_SESSION_COOKIE;
use crate::core::cache::{DEFAULT_FEED_LIMIT, PostListKey};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CommenterConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub feed: FeedConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub post_id: Option<String>,
    pub max_input_rows: Option<u16>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub session_token: Option<String>,
    pub session_cookie: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FeedConfig {
    pub limit: Option<u32>,
    pub search: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_MAX_INPUT_ROWS: u16 = 6;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub session_token: Option<String>,
    pub session_cookie: String,
    pub post_id: Option<String>,
    pub feed_limit: u32,
    pub feed_search: String,
    pub max_input_rows: u16,
}

impl ResolvedConfig {
    pub fn feed_key(&self) -> PostListKey {
        PostListKey {
            limit: self.feed_limit,
            search: self.feed_search.clone(),
        }
    }
}

/// Values given on the command line. `None` means not specified.
#[derive(Debug, Default)]
pub struct CliOverrides<'a> {
    pub post_id: Option<&'a str>,
    pub base_url: Option<&'a str>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.commenter/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".commenter").join("config.toml"))
}

/// Load config from `~/.commenter/config.toml`.
///
/// A missing file is created from the commented template and yields
/// `CommenterConfig::default()`. Malformed TOML is `ConfigError::Parse`.
pub fn load_config() -> Result<CommenterConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(CommenterConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        write_template(&path);
        return Ok(CommenterConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: CommenterConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    // The session token is a credential; keep it out of the log
    debug!(
        "Config: base_url={:?} post_id={:?} feed={:?}",
        config.api.base_url, config.general.post_id, config.feed
    );
    Ok(config)
}

/// Writes the commented template. Failures are logged, not returned.
fn write_template(path: &PathBuf) {
    let default_content = r#"# Commenter Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# post_id = "clx0example"            # Or COMMENTER_POST_ID / --post
# max_input_rows = 6                 # Input grows up to this many rows, then scrolls

# [api]
# base_url = "http://localhost:3000" # Or COMMENTER_BASE_URL / --base-url
# session_token = "..."              # Or COMMENTER_SESSION_TOKEN
# session_cookie = "next-auth.session-token"

# [feed]
# limit = 10
# search = ""
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Collapses every source into concrete values. CLI beats env beats file.
pub fn resolve(config: &CommenterConfig, cli: &CliOverrides<'_>) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("COMMENTER_BASE_URL").ok())
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Post: CLI → env → config
    let post_id = cli
        .post_id
        .map(|s| s.to_string())
        .or_else(|| std::env::var("COMMENTER_POST_ID").ok())
        .or_else(|| config.general.post_id.clone())
        .filter(|id| !id.is_empty());

    // Session token: env → config
    let session_token = std::env::var("COMMENTER_SESSION_TOKEN")
        .ok()
        .or_else(|| config.api.session_token.clone())
        .filter(|token| !token.is_empty());

    ResolvedConfig {
        base_url,
        session_token,
        session_cookie: config
            .api
            .session_cookie
            .clone()
            .unwrap_or_else(|| DEFAULT_SESSION_COOKIE.to_string()),
        post_id,
        feed_limit: config.feed.limit.unwrap_or(DEFAULT_FEED_LIMIT),
        feed_search: config.feed.search.clone().unwrap_or_default(),
        max_input_rows: config
            .general
            .max_input_rows
            .unwrap_or(DEFAULT_MAX_INPUT_ROWS)
            .max(1),
    }
}
