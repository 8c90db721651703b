use chrono::TimeDelta;

use crate::error::{ParseError, ReportError};
use crate::models::{PersonalAttributes, RecordMetrics};
use crate::timespan::parse_timespan;

pub mod day_steps;
pub mod training;

pub use day_steps::StepActivityRecord;
pub use training::TypedTrainingRecord;

/// A record that can be filled from one input line and reported on
pub trait ActivityRecord {
    /// Parse a line into this record, replacing any previous contents.
    ///
    /// On failure the record is left cleared; none of its fields should be
    /// trusted until the next successful parse.
    fn parse(&mut self, line: &str) -> Result<(), ParseError>;

    /// Compute the metrics for the currently parsed fields
    fn metrics(&self) -> Result<RecordMetrics, ReportError>;

    /// Render the human-readable report for the currently parsed fields
    fn report(&self) -> Result<String, ReportError> {
        Ok(self.metrics()?.to_string())
    }

    /// Short name of the record kind, used in diagnostics
    fn kind_name(&self) -> &'static str;
}

/// Input grammars understood by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// `<steps>,<duration>`
    Steps,
    /// `<steps>,<activity type>,<duration>`
    Training,
}

impl RecordKind {
    /// Create an empty record of this kind for the given athlete
    pub fn new_record(self, personal: PersonalAttributes) -> Box<dyn ActivityRecord> {
        match self {
            RecordKind::Steps => Box::new(StepActivityRecord::new(personal)),
            RecordKind::Training => Box::new(TypedTrainingRecord::new(personal)),
        }
    }
}

/// Split a line into exactly `expected` comma-separated fields
fn split_fields(line: &str, expected: usize) -> Result<Vec<&str>, ParseError> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != expected {
        return Err(ParseError::Format(format!(
            "expected {} comma-separated fields, got {}",
            expected,
            fields.len()
        )));
    }
    Ok(fields)
}

/// Parse a strictly positive step count
fn parse_steps(raw: &str) -> Result<i64, ParseError> {
    let steps: i64 = raw
        .parse()
        .map_err(|err| ParseError::Format(format!("step count {:?}: {}", raw, err)))?;

    if steps <= 0 {
        return Err(ParseError::InvalidStep(steps));
    }
    Ok(steps)
}

/// Parse a strictly positive duration
fn parse_duration(raw: &str) -> Result<TimeDelta, ParseError> {
    let duration = parse_timespan(raw)?;

    if duration <= TimeDelta::zero() {
        return Err(ParseError::InvalidDuration(raw.to_string()));
    }
    Ok(duration)
}
