//! Unified error hierarchy for steptrack
//!
//! Record processing fails in two distinct phases: a line may not be
//! identifiable as a record at all ([`ParseError`]), or a parsed record may
//! not yield metrics ([`ReportError`]). Both are recoverable; the driver logs
//! them and moves on to the next line.

use thiserror::Error;

use crate::formulas::FormulaError;
use crate::timespan::TimespanError;

/// Top-level error type for all steptrack operations
#[derive(Debug, Error)]
pub enum StepTrackError {
    /// Input line could not be parsed into a record
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Parsed record could not be turned into a report
    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Record parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Line is structurally malformed
    #[error("invalid data format: {0}")]
    Format(String),

    /// Step count is zero or negative
    #[error("invalid step value: {0}")]
    InvalidStep(i64),

    /// Duration is zero or negative
    #[error("invalid activity duration: {0}")]
    InvalidDuration(String),

    /// Activity type field is empty
    #[error("activity type is empty")]
    InvalidType,
}

impl From<TimespanError> for ParseError {
    fn from(err: TimespanError) -> Self {
        ParseError::Format(err.to_string())
    }
}

/// Report computation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportError {
    /// Activity label matches no known calorie model
    #[error("unknown activity type: {0:?}")]
    UnknownActivityType(String),

    /// A formula rejected its inputs
    #[error("unable to calculate calories burned: {0}")]
    Compute(#[from] FormulaError),

    /// A computed value cannot be represented as a report figure
    #[error("{metric} value {value} is out of reportable range")]
    OutOfRange { metric: &'static str, value: f64 },
}

/// Result type alias for steptrack operations
pub type Result<T> = std::result::Result<T, StepTrackError>;

impl StepTrackError {
    /// Whether the error only affects the current record
    pub fn is_record_level(&self) -> bool {
        matches!(self, StepTrackError::Parse(_) | StepTrackError::Report(_))
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            StepTrackError::Parse(_) => ErrorSeverity::Warning,
            StepTrackError::Report(ReportError::UnknownActivityType(_)) => ErrorSeverity::Warning,
            StepTrackError::Report(ReportError::Compute(_)) => ErrorSeverity::Error,
            StepTrackError::Configuration(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            StepTrackError::Parse(err) => format!("could not identify data: {}", err),
            StepTrackError::Report(err) => format!("could not compute: {}", err),
            StepTrackError::Io(err) => format!("could not read or write data: {}", err),
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Error that stops the run
    Critical,
    /// Error that prevents an operation but the run can continue
    Error,
    /// Warning that doesn't prevent the run
    Warning,
    /// Informational message
    Info,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Critical => tracing::Level::ERROR,
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
            ErrorSeverity::Info => tracing::Level::INFO,
        }
    }
}
