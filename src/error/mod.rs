mod app;
mod config;
mod http;
mod sink;
mod targets;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use http::HttpError;
pub use sink::SinkError;
pub use targets::TargetError;
pub use validation::ValidationError;
