use std::time::Duration;

use crate::args::parse_duration_arg;
use crate::error::{AppError, ValidationError};

pub(crate) fn parse_duration_value(value: &str) -> Result<Duration, ValidationError> {
    parse_duration_arg(value).map_err(|err| match err {
        AppError::Validation(source) => source,
        other => ValidationError::InvalidDurationFormat {
            value: other.to_string(),
        },
    })
}
