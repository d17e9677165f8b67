use thiserror::Error;

/// Errors raised while loading or validating a [`crate::RouterConfig`].
///
/// Routing itself never fails with an error; an unroutable edge is `None`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to parse router config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("grid resolution must be a positive finite number, got {0}")]
    InvalidGridResolution(f64),

    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: f64 },
}

/// Errors raised while installing a [`crate::RouterTracer`].
#[derive(Error, Debug)]
pub enum TracerError {
    #[error("failed to open log file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to set up flame graph output: {0}")]
    Flame(#[from] tracing_flame::Error),

    #[error("a global tracing subscriber is already installed: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}
