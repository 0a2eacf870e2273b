//! Core library for the `repstress` CLI.
//!
//! The binary samples endpoint URLs from a domain list, hammers them with a
//! pool of concurrent GET workers for a bounded time, and reports latency
//! and error statistics alongside the captured JSON responses. This crate
//! exposes the building blocks: CLI argument types, configuration parsing,
//! the target pool, the HTTP transport, the stress engine, aggregation, and
//! output sinks.
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
pub mod shutdown;
pub mod sinks;
pub mod stress;
pub mod targets;

#[cfg(feature = "fuzzing")]
pub mod fuzzing;
