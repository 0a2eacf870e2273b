/// Upper bound for concurrently running workers.
pub(crate) const MAX_WORKERS: usize = 250;
/// Upper bound for URLs sampled from the domain list.
pub(crate) const MAX_DOMAINS: usize = 5000;

pub(crate) const DEFAULT_WORKERS: &str = "10";
pub(crate) const DEFAULT_DOMAIN_COUNT: &str = "100";
pub(crate) const DEFAULT_DURATION_SECS: &str = "30";
pub(crate) const DEFAULT_DOMAINS_FILE: &str = "domains.txt";
pub(crate) const DEFAULT_URL_BASE: &str = "http://localhost:8080/domain/ranking/";
pub(crate) const DEFAULT_AUTH_TOKEN: &str = "Token I_am_under_stress_when_I_test";
pub(crate) const DEFAULT_ERROR_FIELD: &str = "domain_error";

pub(crate) const AUTH_HEADER_NAME: &str = "Authorization";
pub(crate) const SUMMARY_LATENCY_UNIT: &str = "seconds";

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("repstress/", env!("CARGO_PKG_VERSION"));
