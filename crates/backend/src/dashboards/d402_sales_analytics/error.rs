use thiserror::Error;

/// Errors raised while building sales analytics
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Invalid timestamp in event #{index} ({value}): {reason}")]
    InvalidTimestamp {
        index: usize,
        value: String,
        reason: String,
    },

    #[error("Event #{index} overflows the {metric} total")]
    MetricOverflow { index: usize, metric: &'static str },

    #[error("Overall {0} total overflows")]
    TotalOverflow(&'static str),

    #[error("Unknown granularity: {0}")]
    UnknownGranularity(String),

    #[error("Unknown ranking metric: {0}")]
    UnknownMetric(String),

    #[error("Unknown period ordering: {0}")]
    UnknownOrdering(String),

    #[error("Limit must be a positive integer, got {0}")]
    InvalidLimit(usize),

    #[error("UTC offset out of range: {0} hours")]
    InvalidUtcOffset(i32),

    #[error("Chart runtime is not initialized")]
    ChartRuntimeNotInitialized,
}

impl AnalyticsError {
    /// Validation, overflow and configuration errors are caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        !matches!(self, AnalyticsError::ChartRuntimeNotInitialized)
    }
}
