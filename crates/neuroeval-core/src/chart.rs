//! Curve sampling for charting consumers.
//!
//! Charts plot the registry's membership functions and the aggregated output
//! set over `[0, 100]`. Sampling goes through the same registry and
//! aggregation code as inference, so a plotted curve never diverges from the
//! one used to compute a score.

use serde::{Deserialize, Serialize};

use crate::defuzzify::{aggregated_membership, Resolution};
use crate::registry::LinguisticVariable;
use crate::rules::AggregatedOutput;

/// One `(x, μ(x))` sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
}

/// The sampled membership function of one term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembershipCurve {
    pub term: String,
    pub points: Vec<CurvePoint>,
}

impl MembershipCurve {
    /// Largest membership degree on the curve.
    pub fn peak(&self) -> f64 {
        self.points.iter().map(|p| p.y).fold(0.0, f64::max)
    }
}

/// Sample every term of `variable`.
pub fn membership_curves(
    variable: &LinguisticVariable,
    resolution: Resolution,
) -> Vec<MembershipCurve> {
    variable
        .terms
        .iter()
        .map(|term| MembershipCurve {
            term: term.name.to_string(),
            points: resolution
                .samples()
                .map(|x| CurvePoint {
                    x,
                    y: term.degree(x),
                })
                .collect(),
        })
        .collect()
}

/// Sample the clipped, max-combined output set that defuzzification integrates.
pub fn aggregated_curve(aggregated: &AggregatedOutput, resolution: Resolution) -> Vec<CurvePoint> {
    resolution
        .samples()
        .map(|x| CurvePoint {
            x,
            y: aggregated_membership(aggregated, x),
        })
        .collect()
}
