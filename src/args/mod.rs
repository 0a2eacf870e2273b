//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;


pub use cli::TesterArgs;
pub use types::{PositiveU64, PositiveUsize};

pub(crate) use defaults::{
    AUTH_HEADER_NAME, DEFAULT_USER_AGENT, MAX_DOMAINS, MAX_WORKERS, SUMMARY_LATENCY_UNIT,
};
pub(crate) use parsers::{ensure_at_most, parse_duration_arg, parse_header};
