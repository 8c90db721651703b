//! Distance, speed and energy formulas
//!
//! Every metric in a report is derived from three primitive inputs: the step
//! count, the athlete's body measurements and the activity duration.
//!
//! # Model
//!
//! - **Stride length** is estimated as `height × 0.45`
//! - **Distance** (km) is `stride × steps / 1000`
//! - **Mean speed** (km/h) is `distance / duration_hours`
//! - **Walking energy** (kcal) is `weight × speed × duration_minutes / 60 × 0.5`
//! - **Running energy** (kcal) is `weight × speed × duration_minutes / 60`
//!
//! Distance and speed are total functions. The calorie models reject
//! non-positive inputs instead of producing meaningless numbers.
//!
//! # Example
//!
//! ```rust,ignore
//! use chrono::TimeDelta;
//! use steptrack::formulas::{distance_km, walking_calories};
//!
//! let km = distance_km(10_000, 1.75); // 7.875
//! let kcal = walking_calories(10_000, 70.0, 1.75, TimeDelta::hours(1))?; // 275.625
//! ```

use chrono::TimeDelta;
use thiserror::Error;

use crate::timespan;

/// Stride length as a fraction of body height
pub const STEP_LENGTH_COEFFICIENT: f64 = 0.45;

/// Metres in a kilometre
pub const METERS_IN_KM: f64 = 1000.0;

/// Minutes in an hour
pub const MINUTES_IN_HOUR: f64 = 60.0;

/// Walking burns half the energy of running at the same speed
pub const WALKING_CALORIES_COEFFICIENT: f64 = 0.5;

/// Formula input errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    #[error("invalid input: {parameter} must be positive, got {value}")]
    InvalidInput { parameter: &'static str, value: f64 },
}

pub type FormulaResult<T> = Result<T, FormulaError>;

/// Distance covered in kilometres
pub fn distance_km(steps: i64, height_m: f64) -> f64 {
    height_m * STEP_LENGTH_COEFFICIENT * steps as f64 / METERS_IN_KM
}

/// Mean speed in km/h.
///
/// Degenerate inputs (no steps, or a non-positive duration) yield a speed of
/// zero rather than an error.
pub fn mean_speed_kmh(steps: i64, height_m: f64, duration: TimeDelta) -> f64 {
    if steps <= 0 || duration <= TimeDelta::zero() {
        return 0.0;
    }

    let hours = timespan::hours(&duration);
    if hours <= 0.0 {
        return 0.0;
    }

    distance_km(steps, height_m) / hours
}

/// Energy spent walking, in kilocalories
pub fn walking_calories(
    steps: i64,
    weight_kg: f64,
    height_m: f64,
    duration: TimeDelta,
) -> FormulaResult<f64> {
    validate_energy_inputs(steps, weight_kg, height_m, duration)?;

    let speed = mean_speed_kmh(steps, height_m, duration);
    let minutes = timespan::minutes(&duration);

    Ok((weight_kg * speed * minutes / MINUTES_IN_HOUR) * WALKING_CALORIES_COEFFICIENT)
}

/// Energy spent running, in kilocalories
pub fn running_calories(
    steps: i64,
    weight_kg: f64,
    height_m: f64,
    duration: TimeDelta,
) -> FormulaResult<f64> {
    validate_energy_inputs(steps, weight_kg, height_m, duration)?;

    let speed = mean_speed_kmh(steps, height_m, duration);
    let minutes = timespan::minutes(&duration);

    Ok(weight_kg * speed * minutes / MINUTES_IN_HOUR)
}

fn validate_energy_inputs(
    steps: i64,
    weight_kg: f64,
    height_m: f64,
    duration: TimeDelta,
) -> FormulaResult<()> {
    ensure_positive("steps", steps as f64)?;
    ensure_positive("weight_kg", weight_kg)?;
    ensure_positive("height_m", height_m)?;
    ensure_positive("duration_minutes", timespan::minutes(&duration))
}

fn ensure_positive(parameter: &'static str, value: f64) -> FormulaResult<()> {
    // NaN fails this check too
    if value > 0.0 {
        Ok(())
    } else {
        Err(FormulaError::InvalidInput { parameter, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_distance() {
        assert!((distance_km(10_000, 1.75) - 7.875).abs() < EPSILON);
        assert_eq!(distance_km(0, 1.75), 0.0);
    }

    #[test]
    fn test_mean_speed() {
        let speed = mean_speed_kmh(10_000, 1.75, TimeDelta::hours(1));
        assert!((speed - 7.875).abs() < EPSILON);

        let speed = mean_speed_kmh(10_000, 1.75, TimeDelta::minutes(30));
        assert!((speed - 15.75).abs() < EPSILON);
    }

    #[test]
    fn test_mean_speed_degenerate_inputs() {
        assert_eq!(mean_speed_kmh(10_000, 1.75, TimeDelta::zero()), 0.0);
        assert_eq!(mean_speed_kmh(10_000, 1.75, TimeDelta::minutes(-5)), 0.0);
        assert_eq!(mean_speed_kmh(0, 1.75, TimeDelta::hours(1)), 0.0);
        assert_eq!(mean_speed_kmh(-5, 1.75, TimeDelta::hours(1)), 0.0);
    }

    #[test]
    fn test_walking_calories() {
        let kcal = walking_calories(10_000, 70.0, 1.75, TimeDelta::hours(1)).unwrap();
        assert!((kcal - 275.625).abs() < EPSILON);
    }

    #[test]
    fn test_running_calories() {
        let kcal = running_calories(10_000, 70.0, 1.75, TimeDelta::hours(1)).unwrap();
        assert!((kcal - 551.25).abs() < EPSILON);
    }

    #[test]
    fn test_calorie_guards() {
        let hour = TimeDelta::hours(1);

        let err = walking_calories(0, 70.0, 1.75, hour).unwrap_err();
        assert_eq!(
            err,
            FormulaError::InvalidInput { parameter: "steps", value: 0.0 }
        );

        let err = running_calories(10_000, 0.0, 1.75, hour).unwrap_err();
        assert!(matches!(
            err,
            FormulaError::InvalidInput { parameter: "weight_kg", .. }
        ));

        let err = walking_calories(10_000, 70.0, -1.0, hour).unwrap_err();
        assert!(matches!(
            err,
            FormulaError::InvalidInput { parameter: "height_m", .. }
        ));

        let err = running_calories(10_000, 70.0, 1.75, TimeDelta::zero()).unwrap_err();
        assert!(matches!(
            err,
            FormulaError::InvalidInput { parameter: "duration_minutes", .. }
        ));

        assert!(walking_calories(10_000, f64::NAN, 1.75, hour).is_err());
    }

    proptest! {
        #[test]
        fn test_distance_matches_stride_model(
            steps in 0i64..200_000,
            height in 0.5f64..2.5,
        ) {
            let expected = height * 0.45 * steps as f64 / 1000.0;
            prop_assert!((distance_km(steps, height) - expected).abs() < EPSILON);
        }

        #[test]
        fn test_mean_speed_never_fails_on_degenerate_input(
            steps in -100_000i64..=0,
            height in 0.5f64..2.5,
            minutes in -600i64..600,
        ) {
            prop_assert_eq!(mean_speed_kmh(steps, height, TimeDelta::minutes(minutes)), 0.0);
            prop_assert_eq!(mean_speed_kmh(-steps + 1, height, TimeDelta::minutes(-minutes.abs())), 0.0);
        }

        #[test]
        fn test_running_doubles_walking(
            steps in 1i64..100_000,
            weight in 30.0f64..150.0,
            height in 1.0f64..2.2,
            minutes in 1i64..600,
        ) {
            let duration = TimeDelta::minutes(minutes);
            let walking = walking_calories(steps, weight, height, duration).unwrap();
            let running = running_calories(steps, weight, height, duration).unwrap();

            prop_assert!(walking > 0.0);
            prop_assert!((running - 2.0 * walking).abs() <= EPSILON * running.max(1.0));
        }
    }
}
