// Library interface for steptrack modules
// This allows integration tests and benches to access the core functionality

pub mod config;
pub mod error;
pub mod formulas;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod records;
pub mod timespan;

// Re-export commonly used types for convenience
pub use config::{AppConfig, OutputSettings};
pub use error::{ParseError, ReportError, Result, StepTrackError};
pub use formulas::{distance_km, mean_speed_kmh, running_calories, walking_calories, FormulaError};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use models::{ActivityKind, PersonalAttributes, RecordMetrics, StepMetrics, TrainingMetrics};
pub use pipeline::{process_lines, process_reader, OutputFormat, ProcessSummary};
pub use records::{ActivityRecord, RecordKind, StepActivityRecord, TypedTrainingRecord};
pub use timespan::{parse_timespan, TimespanError};
