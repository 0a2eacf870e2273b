use clap::Parser;
use std::time::Duration;

use super::defaults::{
    DEFAULT_AUTH_TOKEN, DEFAULT_DOMAIN_COUNT, DEFAULT_DOMAINS_FILE, DEFAULT_DURATION_SECS,
    DEFAULT_ERROR_FIELD, DEFAULT_URL_BASE, DEFAULT_WORKERS,
};
use super::parsers::{
    parse_domain_count, parse_duration_arg, parse_error_field, parse_header, parse_positive_u64,
    parse_worker_count,
};
use super::types::{PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Concurrent HTTP GET load generator - randomized endpoints, bounded duration, and latency/error summaries with raw response capture."
)]
pub struct TesterArgs {
    /// Number of concurrent workers (1-250)
    #[arg(
        long = "workers",
        short = 'w',
        default_value = DEFAULT_WORKERS,
        value_parser = parse_worker_count
    )]
    pub workers: PositiveUsize,

    /// Number of domains sampled from the domains file (1-5000)
    #[arg(
        long = "domains",
        short = 'n',
        default_value = DEFAULT_DOMAIN_COUNT,
        value_parser = parse_domain_count
    )]
    pub domain_count: PositiveUsize,

    /// Duration of the test (seconds)
    #[arg(
        long = "duration",
        short = 't',
        default_value = DEFAULT_DURATION_SECS,
        value_parser = parse_positive_u64
    )]
    pub target_duration: PositiveU64,

    /// File with one domain per line
    #[arg(long = "domains-file", short = 'f', default_value = DEFAULT_DOMAINS_FILE)]
    pub domains_file: String,

    /// URL prefix each sampled domain is appended to
    #[arg(long = "url-base", short = 'u', default_value = DEFAULT_URL_BASE)]
    pub url_base: String,

    /// Value sent in the Authorization header
    #[arg(
        long = "auth-token",
        env = "REPSTRESS_AUTH_TOKEN",
        default_value = DEFAULT_AUTH_TOKEN,
        hide_env_values = true
    )]
    pub auth_token: String,

    /// Extra HTTP headers in 'Key: Value' format (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// JSON field whose presence in a response body marks the request as failed
    #[arg(
        long = "error-field",
        default_value = DEFAULT_ERROR_FIELD,
        value_parser = parse_error_field
    )]
    pub error_field: String,

    /// Per-request timeout (supports ms/s/m/h)
    #[arg(
        long = "request-timeout",
        default_value = "10s",
        value_parser = parse_duration_arg
    )]
    pub request_timeout: Duration,

    /// Timeout for establishing a new connection (supports ms/s/m/h)
    #[arg(
        long = "connect-timeout",
        default_value = "5s",
        value_parser = parse_duration_arg
    )]
    pub connect_timeout: Duration,

    /// Directory for the response and summary CSV files (defaults to the current directory)
    #[arg(long = "output-dir", short = 'o', default_value = "")]
    pub output_dir: String,

    /// Also write the summary as JSON to this path
    #[arg(long = "export-json")]
    pub export_json: Option<String>,

    /// Disable the progress bar
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Enable verbose logging (sets log level to debug unless overridden by REPSTRESS_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Path to config file (TOML/JSON). Defaults to ./repstress.toml or ./repstress.json if present.
    #[arg(long)]
    pub config: Option<String>,
}
