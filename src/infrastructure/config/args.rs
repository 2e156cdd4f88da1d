use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

/// Command line flags. Each one overrides the matching config file value.
#[derive(Debug, Parser)]
#[command(
    name = "wikimage",
    version,
    about = "Resolves, caches and serves images hosted on a wiki",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Bind address.
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Bind port.
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Prefix the file name is appended to when looking up its page.
    #[arg(long, value_name = "URL")]
    pub page_base_url: Option<String>,

    /// Serve through the link and byte caches.
    #[arg(long)]
    pub cache: Option<bool>,

    /// Directory holding downloaded images.
    #[arg(long, value_name = "PATH")]
    pub cache_dir: Option<PathBuf>,
}
