//! The calculator form state and its live estimate.
//!
//! The UI reports each edit as an [`InputChange`]; the estimate is recomputed
//! synchronously so it always matches the current inputs.

use chrono::{DateTime, Local};

use crate::estimation::{EnsembleBreakdown, EstimationMode, Estimator, ensemble_breakdown};
use crate::history::{HistoryEntry, HistoryError, HistoryStore, Storage};
use crate::input::CalculationInput;

/// A single edit of one form field.
#[derive(Debug, Clone, PartialEq)]
pub enum InputChange {
    Weight(f64),
    Reps(u32),
    Rpe(f64),
    LiftType(String),
}

#[derive(Debug, Clone)]
pub struct Calculator {
    input: CalculationInput,
    estimator: Estimator,
    estimate: f64,
}

impl Calculator {
    pub fn new(estimator: Estimator, input: CalculationInput) -> Self {
        let mut calc = Self {
            input,
            estimator,
            estimate: 0.0,
        };
        calc.recompute();
        calc
    }

    pub fn input(&self) -> &CalculationInput {
        &self.input
    }

    /// Estimate for the current inputs, rounded to two decimals.
    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    pub fn mode(&self) -> EstimationMode {
        self.estimator.mode()
    }

    /// Per-formula values behind the ensemble estimate, without RPE adjustment.
    pub fn breakdown(&self) -> EnsembleBreakdown {
        ensemble_breakdown(self.input.weight, self.input.reps)
    }

    /// Apply one edit and return the new estimate.
    ///
    /// Values outside the save domain are still estimated; they are only
    /// refused by [`Calculator::save`].
    pub fn apply(&mut self, change: InputChange) -> f64 {
        match change {
            InputChange::Weight(w) => self.input.weight = w,
            InputChange::Reps(r) => self.input.reps = r,
            InputChange::Rpe(p) => self.input.rpe = p,
            InputChange::LiftType(lift) => self.input.lift_type = lift,
        }
        self.recompute();
        self.estimate
    }

    pub fn set_mode(&mut self, mode: EstimationMode) -> f64 {
        self.estimator = Estimator::new(mode);
        self.recompute();
        self.estimate
    }

    /// Store the current inputs and estimate in `store`.
    ///
    /// Invalid inputs are refused before an id is drawn, leaving the store
    /// untouched.
    pub fn save<S: Storage>(
        &self,
        store: &mut HistoryStore<S>,
        saved_at: DateTime<Local>,
    ) -> Result<HistoryEntry, HistoryError> {
        if let Err(e) = self.input.validate() {
            log::warn!("Refusing to save {:?}: {e}", self.input);
            return Err(e.into());
        }
        let entry = store.create_entry(self.input.clone(), self.estimate, saved_at);
        store.append(entry.clone())?;
        log::info!(
            "Saved {} x {} @ {} ({}) -> {}",
            entry.weight(),
            entry.reps(),
            entry.rpe(),
            entry.lift_type(),
            entry.one_rep_max()
        );
        Ok(entry)
    }

    fn recompute(&mut self) {
        self.estimate = self
            .estimator
            .estimate(self.input.weight, self.input.reps, self.input.rpe);
    }
}
