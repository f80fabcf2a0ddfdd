//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for chartsmith.
#[derive(Debug, thiserror::Error)]
pub enum ChartsmithError {
    #[error("empty OHLCV series: at least one bar is required")]
    EmptySeries,

    #[error("non-monotonic timestamps at bar {index}: {date} does not follow {prev}")]
    NonMonotonicTimestamps {
        index: usize,
        prev: NaiveDate,
        date: NaiveDate,
    },

    #[error("negative volume {volume} at bar {index} ({date})")]
    NegativeVolume {
        index: usize,
        date: NaiveDate,
        volume: i64,
    },

    #[error("price bounds violated at bar {index} ({date}): low/high do not bound open/close")]
    PriceBounds { index: usize, date: NaiveDate },

    #[error("unknown indicator selection: {name}")]
    UnknownIndicator { name: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("render error: {reason}")]
    Render { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&ChartsmithError> for std::process::ExitCode {
    fn from(err: &ChartsmithError) -> Self {
        let code: u8 = match err {
            ChartsmithError::Io(_) | ChartsmithError::Render { .. } => 1,
            ChartsmithError::ConfigParse { .. }
            | ChartsmithError::ConfigMissing { .. }
            | ChartsmithError::ConfigInvalid { .. } => 2,
            ChartsmithError::Data { .. } => 3,
            ChartsmithError::EmptySeries
            | ChartsmithError::NonMonotonicTimestamps { .. }
            | ChartsmithError::NegativeVolume { .. }
            | ChartsmithError::PriceBounds { .. } => 4,
            ChartsmithError::UnknownIndicator { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
