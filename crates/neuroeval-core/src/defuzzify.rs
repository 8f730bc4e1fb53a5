//! Centroid defuzzification over the performance universe.
//!
//! The aggregated output set is sampled on `[0, 100]`. At each sample every
//! output term is clipped by its aggregated strength (min implication) and the
//! clipped curves are combined with max. The crisp score is the discrete
//! center of gravity `Σ x·μ(x) / Σ μ(x)`, or 0 when nothing fired.

use serde::{Deserialize, Serialize};

use crate::error::EvalError;
use crate::registry::{OutputTerm, UNIVERSE_MAX, UNIVERSE_MIN};
use crate::rules::AggregatedOutput;

/// Sampling step over a universe of discourse.
///
/// Unit resolution (101 samples on `[0, 100]`) is the reference precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Resolution(f64);

impl Resolution {
    pub const UNIT: Resolution = Resolution(1.0);

    pub fn new(step: f64) -> Result<Self, EvalError> {
        if step.is_finite() && step > 0.0 && step <= UNIVERSE_MAX - UNIVERSE_MIN {
            Ok(Resolution(step))
        } else {
            Err(EvalError::InvalidResolution(step))
        }
    }

    pub fn step(self) -> f64 {
        self.0
    }

    /// Sample points from `UNIVERSE_MIN` to `UNIVERSE_MAX`, both inclusive.
    ///
    /// Points are computed as `min + i * step` so unit resolution yields the
    /// exact integers 0..=100. If the step does not divide the universe the
    /// last sample falls short of the upper bound.
    pub fn samples(self) -> impl Iterator<Item = f64> {
        let step = self.0;
        // Tolerate floating error in the division, e.g. 100 / 0.1.
        let count = ((UNIVERSE_MAX - UNIVERSE_MIN) / step + 1e-9).floor() as usize;
        (0..=count).map(move |i| (UNIVERSE_MIN + i as f64 * step).min(UNIVERSE_MAX))
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Resolution::UNIT
    }
}

impl TryFrom<f64> for Resolution {
    type Error = EvalError;

    fn try_from(step: f64) -> Result<Self, Self::Error> {
        Resolution::new(step)
    }
}

impl From<Resolution> for f64 {
    fn from(r: Resolution) -> f64 {
        r.0
    }
}

/// Degree of `x` in the aggregated output set.
pub fn aggregated_membership(aggregated: &AggregatedOutput, x: f64) -> f64 {
    OutputTerm::ALL
        .into_iter()
        .map(|term| aggregated.get(term).min(term.term().degree(x)))
        .fold(0.0, f64::max)
}

/// Centroid of the aggregated output set sampled at `resolution`.
pub fn centroid(aggregated: &AggregatedOutput, resolution: Resolution) -> f64 {
    let mut numerator = 0.0;
    let mut denominator = 0.0;

    for x in resolution.samples() {
        let mu = aggregated_membership(aggregated, x);
        numerator += x * mu;
        denominator += mu;
    }

    if denominator == 0.0 {
        return 0.0;
    }
    numerator / denominator
}

/// Centroid at the reference unit resolution.
pub fn defuzzify(aggregated: &AggregatedOutput) -> f64 {
    centroid(aggregated, Resolution::UNIT)
}
