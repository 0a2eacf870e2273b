use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::args::{AUTH_HEADER_NAME, DEFAULT_USER_AGENT, TesterArgs};
use crate::error::HttpError;

/// Builds the shared HTTP client from the CLI options.
///
/// # Errors
///
/// Returns an error when the client cannot be constructed (e.g. TLS backend
/// initialization fails).
pub fn build_client(args: &TesterArgs) -> Result<Client, HttpError> {
    let max_idle = args.workers.get();
    Client::builder()
        .timeout(args.request_timeout)
        .connect_timeout(args.connect_timeout)
        .user_agent(DEFAULT_USER_AGENT)
        .pool_max_idle_per_host(max_idle)
        .build()
        .map_err(|err| HttpError::BuildClientFailed { source: err })
}

/// Builds the read-only header set every request carries: the static
/// `Authorization` header followed by any extra `-H` headers.
///
/// An extra `Authorization` header replaces the static one; other repeated
/// names are all sent.
///
/// # Errors
///
/// Returns an error when a header name or value is not valid HTTP.
pub fn build_headers(args: &TesterArgs) -> Result<HeaderMap, HttpError> {
    let mut headers = HeaderMap::with_capacity(args.headers.len().saturating_add(1));
    insert_header(&mut headers, AUTH_HEADER_NAME, &args.auth_token)?;
    for (key, value) in &args.headers {
        insert_header(&mut headers, key, value)?;
    }
    Ok(headers)
}

fn insert_header(headers: &mut HeaderMap, key: &str, value: &str) -> Result<(), HttpError> {
    let name =
        HeaderName::from_bytes(key.as_bytes()).map_err(|err| HttpError::InvalidHeaderName {
            name: key.to_owned(),
            source: err,
        })?;
    let mut value = HeaderValue::from_str(value).map_err(|err| HttpError::InvalidHeaderValue {
        name: key.to_owned(),
        source: err,
    })?;
    if name == reqwest::header::AUTHORIZATION {
        value.set_sensitive(true);
        drop(headers.insert(name, value));
    } else {
        headers.append(name, value);
    }
    Ok(())
}
