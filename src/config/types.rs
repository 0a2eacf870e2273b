use std::time::Duration;

use serde::Deserialize;

use crate::error::ValidationError;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(alias = "threads", alias = "concurrency")]
    pub workers: Option<usize>,
    pub domains: Option<usize>,
    pub duration: Option<u64>,
    pub domains_file: Option<String>,
    pub url_base: Option<String>,
    pub auth_token: Option<String>,
    pub headers: Option<Vec<String>>,
    pub error_field: Option<String>,
    pub request_timeout: Option<DurationValue>,
    pub connect_timeout: Option<DurationValue>,
    pub output_dir: Option<String>,
    pub export_json: Option<String>,
    pub no_progress: Option<bool>,
    pub no_color: Option<bool>,
    pub verbose: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => super::parse_duration_value(text),
        }
    }
}
