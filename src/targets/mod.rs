//! Target URL pool shared read-only by all workers.
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use rand::Rng;
use rand::seq::SliceRandom;
use url::Url;

use crate::error::TargetError;


/// Immutable, non-empty pool of endpoint URLs.
///
/// Cloning is cheap: all clones share the same backing slice.
#[derive(Debug, Clone)]
pub struct TargetSet {
    urls: Arc<[String]>,
}

impl TargetSet {
    /// Builds a target set from already resolved URLs.
    ///
    /// # Errors
    ///
    /// Returns an error when `urls` is empty.
    pub fn new(urls: Vec<String>) -> Result<Self, TargetError> {
        if urls.is_empty() {
            return Err(TargetError::EmptyTargetSet);
        }
        Ok(Self { urls: urls.into() })
    }

    /// Samples `count` domains without replacement and appends each to `url_base`.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL is not an absolute http(s) URL or
    /// when fewer than `count` unique domains are available.
    pub fn from_domains<R>(
        url_base: &str,
        domains: &[String],
        count: usize,
        rng: &mut R,
    ) -> Result<Self, TargetError>
    where
        R: Rng + ?Sized,
    {
        validate_url_base(url_base)?;
        if count > domains.len() {
            return Err(TargetError::NotEnoughDomains {
                requested: count,
                available: domains.len(),
            });
        }
        let urls = domains
            .choose_multiple(rng, count)
            .map(|domain| format!("{}{}", url_base, domain))
            .collect();
        Self::new(urls)
    }

    /// Picks one URL uniformly at random.
    pub fn pick<R>(&self, rng: &mut R) -> &str
    where
        R: Rng + ?Sized,
    {
        // `new` guarantees at least one URL.
        self.urls.choose(rng).map_or("", String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    #[must_use]
    pub fn urls(&self) -> &[String] {
        &self.urls
    }
}

/// Reads a domain list: one domain per line, blank lines and `#` comments
/// skipped, duplicates dropped keeping the first occurrence.
///
/// # Errors
///
/// Returns an error when the file cannot be read or lists no domains.
pub fn load_domains(path: &Path) -> Result<Vec<String>, TargetError> {
    let content = std::fs::read_to_string(path).map_err(|err| TargetError::ReadDomains {
        path: path.to_path_buf(),
        source: err,
    })?;
    let domains = parse_domains(&content);
    if domains.is_empty() {
        return Err(TargetError::DomainsEmpty {
            path: path.to_path_buf(),
        });
    }
    Ok(domains)
}

pub(crate) fn parse_domains(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|line| seen.insert(*line))
        .map(str::to_owned)
        .collect()
}

fn validate_url_base(url_base: &str) -> Result<(), TargetError> {
    let parsed = Url::parse(url_base).map_err(|err| TargetError::InvalidUrlBase {
        url: url_base.to_owned(),
        source: err,
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(TargetError::UnsupportedScheme {
            url: url_base.to_owned(),
            scheme: scheme.to_owned(),
        }),
    }
}
