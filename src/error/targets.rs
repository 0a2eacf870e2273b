use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TargetError {
    #[error("Failed to read domains file '{path}': {source}")]
    ReadDomains {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Domains file '{path}' contained no domains.")]
    DomainsEmpty { path: PathBuf },
    #[error("Requested {requested} domains but only {available} unique domains are available.")]
    NotEnoughDomains { requested: usize, available: usize },
    #[error("Invalid URL base '{url}': {source}")]
    InvalidUrlBase {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("URL base '{url}' must use http or https, got '{scheme}'.")]
    UnsupportedScheme { url: String, scheme: String },
    #[error("Target set must contain at least one URL.")]
    EmptyTargetSet,
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
