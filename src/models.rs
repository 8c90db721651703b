use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ReportError;

/// Labels recognised as running, compared case-insensitively
const RUNNING_LABELS: &[&str] = &["бег", "running"];

/// Labels recognised as walking, compared case-insensitively
const WALKING_LABELS: &[&str] = &["ходьба", "walking"];

/// Personal data of the athlete the records belong to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalAttributes {
    /// Display name
    pub name: String,

    /// Body weight in kilograms
    pub weight_kg: f64,

    /// Body height in metres
    pub height_m: f64,
}

impl PersonalAttributes {
    pub fn new(name: impl Into<String>, weight_kg: f64, height_m: f64) -> Self {
        Self {
            name: name.into(),
            weight_kg,
            height_m,
        }
    }
}

impl Default for PersonalAttributes {
    fn default() -> Self {
        Self::new("Athlete", 70.0, 1.75)
    }
}

impl fmt::Display for PersonalAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Weight: {} kg.", banner_value(self.weight_kg))?;
        writeln!(f, "Height: {} m.", banner_value(self.height_m))
    }
}

/// Activity kinds with a dedicated calorie model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityKind {
    Running,
    Walking,
    /// Label that matches no known activity
    Unrecognized,
}

impl ActivityKind {
    /// Classify a free-form activity label
    pub fn from_label(label: &str) -> Self {
        let label = label.to_lowercase();

        if RUNNING_LABELS.contains(&label.as_str()) {
            ActivityKind::Running
        } else if WALKING_LABELS.contains(&label.as_str()) {
            ActivityKind::Walking
        } else {
            ActivityKind::Unrecognized
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, ActivityKind::Unrecognized)
    }
}

/// Round a metric to two decimal places, halves away from zero
///
/// Values that `Decimal` cannot represent (non-finite, or beyond roughly
/// 7.9e28 in magnitude) are rejected.
pub fn round_metric(metric: &'static str, value: f64) -> Result<Decimal, ReportError> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .ok_or(ReportError::OutOfRange { metric, value })
}

fn banner_value(value: f64) -> String {
    match round_metric("banner", value) {
        Ok(rounded) => format!("{:.2}", rounded),
        Err(_) => format!("{:.2}", value),
    }
}

/// Metrics computed for a step-activity record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepMetrics {
    /// Steps taken
    pub steps: i64,

    /// Distance covered in kilometres
    pub distance_km: Decimal,

    /// Energy spent in kilocalories
    pub calories_kcal: Decimal,
}

impl StepMetrics {
    pub fn new(steps: i64, distance_km: f64, calories_kcal: f64) -> Result<Self, ReportError> {
        Ok(Self {
            steps,
            distance_km: round_metric("distance_km", distance_km)?,
            calories_kcal: round_metric("calories_kcal", calories_kcal)?,
        })
    }
}

impl fmt::Display for StepMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Steps: {}.", self.steps)?;
        writeln!(f, "Distance: {:.2} km.", self.distance_km)?;
        writeln!(f, "Calories burned: {:.2} kcal.", self.calories_kcal)
    }
}

/// Metrics computed for a typed training record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetrics {
    /// Activity label as written in the input
    pub activity_type: String,

    /// Duration in hours
    pub duration_h: Decimal,

    /// Distance covered in kilometres
    pub distance_km: Decimal,

    /// Mean speed in km/h
    pub speed_kmh: Decimal,

    /// Energy spent in kilocalories
    pub calories_kcal: Decimal,
}

impl TrainingMetrics {
    pub fn new(
        activity_type: impl Into<String>,
        duration_h: f64,
        distance_km: f64,
        speed_kmh: f64,
        calories_kcal: f64,
    ) -> Result<Self, ReportError> {
        Ok(Self {
            activity_type: activity_type.into(),
            duration_h: round_metric("duration_h", duration_h)?,
            distance_km: round_metric("distance_km", distance_km)?,
            speed_kmh: round_metric("speed_kmh", speed_kmh)?,
            calories_kcal: round_metric("calories_kcal", calories_kcal)?,
        })
    }
}

impl fmt::Display for TrainingMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Activity type: {}", self.activity_type)?;
        writeln!(f, "Duration: {:.2} h.", self.duration_h)?;
        writeln!(f, "Distance: {:.2} km.", self.distance_km)?;
        writeln!(f, "Speed: {:.2} km/h", self.speed_kmh)?;
        writeln!(f, "Calories burned: {:.2}", self.calories_kcal)
    }
}

/// Metrics behind one rendered report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "record", rename_all = "snake_case")]
pub enum RecordMetrics {
    Steps(StepMetrics),
    Training(TrainingMetrics),
}

impl fmt::Display for RecordMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordMetrics::Steps(metrics) => fmt::Display::fmt(metrics, f),
            RecordMetrics::Training(metrics) => fmt::Display::fmt(metrics, f),
        }
    }
}
