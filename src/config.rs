use clap::Parser;
use std::path::PathBuf;
use url::Url;

/// Dashprobe — validates a config dashboard backend's plugin API contracts.
#[derive(Parser, Debug, Clone)]
#[command(name = "dashprobe")]
pub struct CliArgs {
    /// Base URL of the dashboard backend
    #[arg(short = 'u', long = "base-url", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Check only this plugin (repeatable; default: all builtin plugins)
    #[arg(short = 'p', long = "plugin")]
    pub plugins: Vec<String>,

    /// HTTP request timeout in seconds
    #[arg(long = "timeout-secs", default_value_t = HTTP_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Extra attempts after a failed check (0 = single attempt)
    #[arg(short = 'r', long = "retries", default_value_t = 0)]
    pub retries: u32,

    /// Delay between retry attempts in milliseconds
    #[arg(long = "retry-delay-ms", default_value_t = RETRY_DELAY_MS)]
    pub retry_delay_ms: u64,

    /// Treat an empty sources list as a failure
    #[arg(long = "require-sources")]
    pub require_sources: bool,

    /// Wait up to this many seconds for the backend before probing
    #[arg(short = 'w', long = "wait-secs", default_value_t = 0)]
    pub wait_secs: u64,

    /// Emit the report as JSON instead of text
    #[arg(long = "json")]
    pub json: bool,

    /// Log file for probe output
    #[arg(short = 'l', long = "log-file")]
    pub log_file: Option<PathBuf>,
}

pub struct ProbeConfig {
    pub base_url: Url,
    pub plugins: Vec<String>,
    pub timeout_secs: u64,
    pub retries: u32,
    pub retry_delay_ms: u64,
    pub require_sources: bool,
    pub wait_secs: u64,
    pub json: bool,
    pub log_file: Option<PathBuf>,
}

// Backend constants
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const PING_PATH: &str = "/ping";

// HTTP constants
pub const HTTP_TIMEOUT_SECS: u64 = 10;
pub const RETRY_DELAY_MS: u64 = 500;

// Wait constants
pub const WAIT_POLL_INTERVAL_MS: u64 = 500;
pub const PORT_CONNECT_TIMEOUT_MS: u64 = 250;

impl ProbeConfig {
    /// Build the runtime config. `base_url` is the already-validated form of
    /// `args.base_url`; main rejects unparseable URLs before getting here.
    pub fn from_args(args: CliArgs, base_url: Url) -> Self {
        ProbeConfig {
            base_url,
            plugins: args.plugins,
            timeout_secs: args.timeout_secs,
            retries: args.retries,
            retry_delay_ms: args.retry_delay_ms,
            require_sources: args.require_sources,
            wait_secs: args.wait_secs,
            json: args.json,
            log_file: args.log_file,
        }
    }
}
