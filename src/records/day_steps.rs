//! Daily step activity records
//!
//! Line format: `<steps>,<duration>`, e.g. `12000,60m` or `+12000,1h`.
//! Fields must not carry surrounding whitespace. A single leading `+` on
//! the step count is accepted. Step activity is always reported as walking.

use chrono::TimeDelta;

use super::{parse_duration, parse_steps, split_fields, ActivityRecord};
use crate::error::{ParseError, ReportError};
use crate::formulas::{distance_km, walking_calories};
use crate::models::{PersonalAttributes, RecordMetrics, StepMetrics};

#[derive(Debug, Clone, PartialEq)]
pub struct StepActivityRecord {
    /// Steps taken
    pub steps: i64,

    /// Activity duration
    pub duration: TimeDelta,

    /// Athlete the record belongs to
    pub personal: PersonalAttributes,
}

impl StepActivityRecord {
    pub fn new(personal: PersonalAttributes) -> Self {
        Self {
            steps: 0,
            duration: TimeDelta::zero(),
            personal,
        }
    }

    fn clear(&mut self) {
        self.steps = 0;
        self.duration = TimeDelta::zero();
    }

    fn parse_fields(line: &str) -> Result<(i64, TimeDelta), ParseError> {
        let fields = split_fields(line, 2)?;
        let (steps_raw, duration_raw) = (fields[0], fields[1]);

        if steps_raw != steps_raw.trim() || duration_raw != duration_raw.trim() {
            return Err(ParseError::Format(
                "extra spaces around fields".to_string(),
            ));
        }

        let steps_raw = steps_raw.trim();
        let steps_raw = steps_raw.strip_prefix('+').unwrap_or(steps_raw);

        let steps = parse_steps(steps_raw)?;
        let duration = parse_duration(duration_raw.trim())?;

        Ok((steps, duration))
    }
}

impl ActivityRecord for StepActivityRecord {
    fn parse(&mut self, line: &str) -> Result<(), ParseError> {
        match Self::parse_fields(line) {
            Ok((steps, duration)) => {
                self.steps = steps;
                self.duration = duration;
                Ok(())
            }
            Err(err) => {
                self.clear();
                Err(err)
            }
        }
    }

    fn metrics(&self) -> Result<RecordMetrics, ReportError> {
        let distance = distance_km(self.steps, self.personal.height_m);
        let calories = walking_calories(
            self.steps,
            self.personal.weight_kg,
            self.personal.height_m,
            self.duration,
        )?;

        Ok(RecordMetrics::Steps(StepMetrics::new(
            self.steps, distance, calories,
        )?))
    }

    fn kind_name(&self) -> &'static str {
        "steps"
    }
}
