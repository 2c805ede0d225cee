//! Calculator inputs and the rules that decide whether a set may be saved.

use thiserror::Error;

pub const MIN_REPS: u32 = 1;
pub const MAX_REPS: u32 = 12;
pub const MIN_RPE: f64 = 6.0;
pub const MAX_RPE: f64 = 10.0;
pub const RPE_STEP: f64 = 0.5;

/// Upper bound of the weight field.
pub const MAX_WEIGHT: f64 = 10_000.0;

/// Lift categories offered by the calculator. History accepts any tag.
pub const LIFT_CATEGORIES: [&str; 3] = ["Squat", "Bench", "Deadlift"];

/// Reasons a calculation is refused at the save boundary.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ValidationError {
    #[error("weight must be positive: {0}")]
    BadWeight(f64),

    #[error("repetitions must be positive: {0}")]
    BadReps(u32),

    #[error("RPE must be between 6 and 10: {0}")]
    RpeOutOfRange(f64),

    #[error("estimate is not a finite number: {0}")]
    NonFiniteEstimate(f64),
}

/// One set as entered in the calculator form.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationInput {
    pub weight: f64,
    pub reps: u32,
    pub rpe: f64,
    pub lift_type: String,
}

impl Default for CalculationInput {
    fn default() -> Self {
        Self {
            weight: 100.0,
            reps: 5,
            rpe: 8.0,
            lift_type: LIFT_CATEGORIES[0].to_string(),
        }
    }
}

impl CalculationInput {
    pub fn new(weight: f64, reps: u32, rpe: f64, lift_type: impl Into<String>) -> Self {
        Self {
            weight,
            reps,
            rpe,
            lift_type: lift_type.into(),
        }
    }

    /// Check the persistence invariant: `weight > 0`, `reps > 0`, `6 <= rpe <= 10`.
    ///
    /// NaN weights or RPE values fail the comparisons and are rejected as well.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(ValidationError::BadWeight(self.weight));
        }
        if self.reps == 0 {
            return Err(ValidationError::BadReps(self.reps));
        }
        if !(MIN_RPE..=MAX_RPE).contains(&self.rpe) {
            return Err(ValidationError::RpeOutOfRange(self.rpe));
        }
        Ok(())
    }
}

/// Snap an RPE value onto the 0.5 grid inside the 6–10 range.
pub fn snap_rpe(rpe: f64) -> f64 {
    if rpe.is_nan() {
        return MAX_RPE;
    }
    ((rpe / RPE_STEP).round() * RPE_STEP).clamp(MIN_RPE, MAX_RPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_input_is_valid() {
        assert_eq!(CalculationInput::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_rpe_below_floor() {
        let input = CalculationInput::new(100.0, 5, 5.0, "Squat");
        assert_eq!(input.validate(), Err(ValidationError::RpeOutOfRange(5.0)));
    }

    #[test]
    fn rejects_rpe_above_ceiling() {
        let input = CalculationInput::new(100.0, 5, 10.5, "Squat");
        assert!(matches!(
            input.validate(),
            Err(ValidationError::RpeOutOfRange(_))
        ));
    }

    #[test]
    fn accepts_domain_bounds() {
        assert!(CalculationInput::new(0.5, 1, 6.0, "Bench").validate().is_ok());
        assert!(CalculationInput::new(0.5, 12, 10.0, "Bench").validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_weight() {
        for w in [0.0, -20.0, f64::NAN, f64::INFINITY] {
            let input = CalculationInput::new(w, 5, 8.0, "Deadlift");
            assert!(
                matches!(input.validate(), Err(ValidationError::BadWeight(_))),
                "weight {w} accepted"
            );
        }
    }

    #[test]
    fn rejects_zero_reps() {
        let input = CalculationInput::new(100.0, 0, 8.0, "Squat");
        assert_eq!(input.validate(), Err(ValidationError::BadReps(0)));
    }

    #[test]
    fn snap_rpe_to_half_steps() {
        assert_eq!(snap_rpe(7.3), 7.5);
        assert_eq!(snap_rpe(7.2), 7.0);
        assert_eq!(snap_rpe(3.0), 6.0);
        assert_eq!(snap_rpe(11.0), 10.0);
    }
}
