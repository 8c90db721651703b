//! Typed training records
//!
//! Line format: `<steps>,<activity type>,<duration>`, e.g. `12000,бег,1h`.
//! Fields are used exactly as split; whitespace is not trimmed. The activity
//! type selects the calorie model at report time.

use chrono::TimeDelta;

use super::{parse_duration, parse_steps, split_fields, ActivityRecord};
use crate::error::{ParseError, ReportError};
use crate::formulas::{distance_km, mean_speed_kmh, running_calories, walking_calories};
use crate::models::{ActivityKind, PersonalAttributes, RecordMetrics, TrainingMetrics};
use crate::timespan;

#[derive(Debug, Clone, PartialEq)]
pub struct TypedTrainingRecord {
    /// Steps taken
    pub steps: i64,

    /// Activity label as written in the input
    pub activity_type: String,

    /// Training duration
    pub duration: TimeDelta,

    /// Athlete the record belongs to
    pub personal: PersonalAttributes,
}

impl TypedTrainingRecord {
    pub fn new(personal: PersonalAttributes) -> Self {
        Self {
            steps: 0,
            activity_type: String::new(),
            duration: TimeDelta::zero(),
            personal,
        }
    }

    /// Calorie model selected by the activity label
    pub fn activity_kind(&self) -> ActivityKind {
        ActivityKind::from_label(&self.activity_type)
    }

    fn clear(&mut self) {
        self.steps = 0;
        self.activity_type.clear();
        self.duration = TimeDelta::zero();
    }

    fn parse_fields(line: &str) -> Result<(i64, String, TimeDelta), ParseError> {
        let fields = split_fields(line, 3)?;

        let steps = parse_steps(fields[0])?;

        let activity_type = fields[1];
        if activity_type.is_empty() {
            return Err(ParseError::InvalidType);
        }

        let duration = parse_duration(fields[2])?;

        Ok((steps, activity_type.to_string(), duration))
    }
}

impl ActivityRecord for TypedTrainingRecord {
    fn parse(&mut self, line: &str) -> Result<(), ParseError> {
        match Self::parse_fields(line) {
            Ok((steps, activity_type, duration)) => {
                self.steps = steps;
                self.activity_type = activity_type;
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
        let PersonalAttributes {
            weight_kg,
            height_m,
            ..
        } = self.personal;

        let distance = distance_km(self.steps, height_m);
        let speed = mean_speed_kmh(self.steps, height_m, self.duration);

        let calories = match self.activity_kind() {
            ActivityKind::Running => {
                running_calories(self.steps, weight_kg, height_m, self.duration)?
            }
            ActivityKind::Walking => {
                walking_calories(self.steps, weight_kg, height_m, self.duration)?
            }
            ActivityKind::Unrecognized => {
                return Err(ReportError::UnknownActivityType(self.activity_type.clone()))
            }
        };

        Ok(RecordMetrics::Training(TrainingMetrics::new(
            self.activity_type.clone(),
            timespan::hours(&self.duration),
            distance,
            speed,
            calories,
        )?))
    }

    fn kind_name(&self) -> &'static str {
        "training"
    }
}
