//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::args::CliArgs;
use crate::infrastructure::wiki::{DEFAULT_IMAGE_SELECTOR, DEFAULT_PAGE_BASE_URL};

pub(crate) const APP_NAME: &str = "wikimage";
pub(crate) const APP_QUALIFIER: &str = "com";
pub(crate) const APP_ORGANIZATION: &str = "linuxmobile";

const LINK_RECORD_FILE_NAME: &str = "links.json";
const IMAGES_DIR_NAME: &str = "images";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, loaded from TOML and overridden by CLI flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path. Logs go to stderr when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Wiki access settings.
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Local cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Names sent in the `Content-Disposition` header.
    #[serde(default)]
    pub attachment: AttachmentConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Upstream wiki configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Prefix the file name is appended to when building the page URL.
    #[serde(default = "default_page_base_url")]
    pub page_base_url: String,

    /// Selector of the element whose `src` holds the image link.
    #[serde(default = "default_image_selector")]
    pub image_selector: String,

    /// Time allowed until response headers arrive. Bodies are not timed.
    #[serde(default = "default_headers_timeout_secs")]
    pub headers_timeout_secs: u64,

    /// `User-Agent` sent upstream.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            page_base_url: default_page_base_url(),
            image_selector: default_image_selector(),
            headers_timeout_secs: default_headers_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl UpstreamConfig {
    /// Returns the headers timeout as a duration.
    #[must_use]
    pub const fn headers_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.headers_timeout_secs)
    }
}

/// Local cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Serve through the link and byte caches. When disabled every request
    /// goes upstream and nothing is written to disk.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Directory holding downloaded images.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// JSON record of resolved links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_record: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
            link_record: None,
        }
    }
}

impl CacheConfig {
    /// Returns the configured image directory or the platform default.
    #[must_use]
    pub fn effective_dir(&self) -> PathBuf {
        self.dir
            .clone()
            .unwrap_or_else(|| default_cache_root().join(IMAGES_DIR_NAME))
    }

    /// Returns the configured link record path or the platform default.
    #[must_use]
    pub fn effective_link_record(&self) -> PathBuf {
        self.link_record
            .clone()
            .unwrap_or_else(|| default_cache_root().join(LINK_RECORD_FILE_NAME))
    }
}

/// Attachment file names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentConfig {
    /// Name used when serving through the caches.
    #[serde(default = "default_cached_name")]
    pub cached_name: String,

    /// Name used when caching is disabled.
    #[serde(default = "default_passthrough_name")]
    pub passthrough_name: String,
}

impl Default for AttachmentConfig {
    fn default() -> Self {
        Self {
            cached_name: default_cached_name(),
            passthrough_name: default_passthrough_name(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

fn default_page_base_url() -> String {
    DEFAULT_PAGE_BASE_URL.to_string()
}

fn default_image_selector() -> String {
    DEFAULT_IMAGE_SELECTOR.to_string()
}

const fn default_headers_timeout_secs() -> u64 {
    300
}

fn default_user_agent() -> String {
    format!("{APP_NAME}/{}", env!("CARGO_PKG_VERSION"))
}

fn default_cached_name() -> String {
    "poggus.png".to_string()
}

fn default_passthrough_name() -> String {
    "npc.png".to_string()
}

const fn default_true() -> bool {
    true
}

fn default_cache_root() -> PathBuf {
    ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME).map_or_else(
        || std::env::temp_dir().join(APP_NAME),
        |dirs| dirs.cache_dir().to_path_buf(),
    )
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(host) = args.host {
            self.server.host = host;
        }
        if let Some(port) = args.port {
            self.server.port = port;
        }
        if let Some(page_base_url) = args.page_base_url {
            self.upstream.page_base_url = page_base_url;
        }
        if let Some(enabled) = args.cache {
            self.cache.enabled = enabled;
        }
        if let Some(dir) = args.cache_dir {
            self.cache.dir = Some(dir);
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns the `host:port` pair to bind.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.upstream.page_base_url, "https://epicduelwiki.com/w/File:");
        assert_eq!(config.upstream.image_selector, ".fullImageLink img");
        assert_eq!(config.upstream.headers_timeout_secs, 300);
        assert!(config.cache.enabled);
        assert_eq!(config.attachment.cached_name, "poggus.png");
        assert_eq!(config.attachment.passthrough_name, "npc.png");
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
            log_level = "debug"

            [server]
            port = 8080

            [cache]
            enabled = false
            dir = "/var/cache/wikimage"
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert!(!config.cache.enabled);
        assert_eq!(config.cache.effective_dir(), PathBuf::from("/var/cache/wikimage"));
        assert_eq!(config.upstream.image_selector, ".fullImageLink img");
    }

    #[test]
    fn test_default_cache_paths_share_root() {
        let cache = CacheConfig::default();

        let dir = cache.effective_dir();
        let record = cache.effective_link_record();

        assert!(dir.ends_with("images"));
        assert!(record.ends_with("links.json"));
        assert_eq!(dir.parent(), record.parent());
    }

    #[test]
    fn test_cli_args_override_file_values() {
        let mut config = AppConfig::default();
        let args = CliArgs::try_parse_from([
            "wikimage",
            "--host",
            "127.0.0.1",
            "--port",
            "4000",
            "--cache",
            "false",
            "--cache-dir",
            "/tmp/images",
            "--log-level",
            "warn",
        ])
        .unwrap();

        config.merge_with_args(args);

        assert_eq!(config.bind_address(), "127.0.0.1:4000");
        assert!(!config.cache.enabled);
        assert_eq!(config.cache.dir, Some(PathBuf::from("/tmp/images")));
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_absent_cli_args_keep_file_values() {
        let mut config = AppConfig::default();
        config.upstream.page_base_url = "https://wiki.example/File:".to_string();
        let args = CliArgs::try_parse_from(["wikimage"]).unwrap();

        config.merge_with_args(args);

        assert_eq!(config.upstream.page_base_url, "https://wiki.example/File:");
        assert!(config.cache.enabled);
    }
}
