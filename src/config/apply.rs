use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{
    MAX_DOMAINS, MAX_WORKERS, PositiveU64, PositiveUsize, TesterArgs, ensure_at_most,
    parse_header, parsers::parse_error_field,
};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::{ConfigFile, DurationValue};

/// Copies config values into `args` for every option not given explicitly.
///
/// Values passed on the command line or through an environment variable
/// take precedence over the config file.
///
/// # Errors
///
/// Returns an error when a config value is out of range or malformed.
pub fn apply_config(
    args: &mut TesterArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "workers")
        && let Some(workers) = config.workers
    {
        args.workers = bounded_usize(workers, MAX_WORKERS, "workers")?;
    }

    if !is_cli(matches, "domain_count")
        && let Some(domains) = config.domains
    {
        args.domain_count = bounded_usize(domains, MAX_DOMAINS, "domains")?;
    }

    if !is_cli(matches, "target_duration")
        && let Some(duration) = config.duration
    {
        args.target_duration = PositiveU64::try_from(duration).map_err(|err| {
            AppError::config(ConfigError::FieldOutOfRange {
                field: "duration",
                source: err,
            })
        })?;
    }

    if !is_cli(matches, "domains_file")
        && let Some(path) = config.domains_file.clone()
    {
        args.domains_file = path;
    }

    if !is_cli(matches, "url_base")
        && let Some(url_base) = config.url_base.clone()
    {
        args.url_base = url_base;
    }

    if !is_cli(matches, "auth_token")
        && let Some(token) = config.auth_token.clone()
    {
        args.auth_token = token;
    }

    if !is_cli(matches, "headers")
        && let Some(headers) = config.headers.as_ref()
    {
        let mut parsed = Vec::with_capacity(headers.len());
        for header in headers {
            parsed.push(
                parse_header(header)
                    .map_err(|err| AppError::config(ConfigError::InvalidHeader { source: err }))?,
            );
        }
        args.headers = parsed;
    }

    if !is_cli(matches, "error_field")
        && let Some(field) = config.error_field.as_deref()
    {
        args.error_field = parse_error_field(field).map_err(|err| {
            AppError::config(ConfigError::FieldOutOfRange {
                field: "error_field",
                source: err,
            })
        })?;
    }

    if !is_cli(matches, "request_timeout")
        && let Some(timeout) = config.request_timeout.as_ref()
    {
        args.request_timeout = config_duration(timeout, "request_timeout")?;
    }

    if !is_cli(matches, "connect_timeout")
        && let Some(timeout) = config.connect_timeout.as_ref()
    {
        args.connect_timeout = config_duration(timeout, "connect_timeout")?;
    }

    if !is_cli(matches, "output_dir")
        && let Some(dir) = config.output_dir.clone()
    {
        args.output_dir = dir;
    }

    if !is_cli(matches, "export_json")
        && let Some(path) = config.export_json.clone()
    {
        args.export_json = Some(path);
    }

    if !is_cli(matches, "no_progress")
        && let Some(value) = config.no_progress
    {
        args.no_progress = value;
    }

    if !is_cli(matches, "no_color")
        && let Some(value) = config.no_color
    {
        args.no_color = value;
    }

    if !is_cli(matches, "verbose")
        && let Some(value) = config.verbose
    {
        args.verbose = value;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}

fn bounded_usize(value: usize, max: usize, field: &'static str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value)
        .and_then(|value| ensure_at_most(value, max))
        .map_err(|err| AppError::config(ConfigError::FieldOutOfRange { field, source: err }))
}

fn config_duration(value: &DurationValue, field: &'static str) -> AppResult<std::time::Duration> {
    value
        .to_duration()
        .map_err(|err| AppError::config(ConfigError::InvalidDuration { field, source: err }))
}
