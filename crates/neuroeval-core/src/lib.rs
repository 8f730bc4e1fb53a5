//! neuroeval-core: Mamdani fuzzy inference for student performance.
//!
//! The inference pipeline lives in [`membership`], [`registry`], [`fuzzifier`],
//! [`rules`], [`defuzzify`] and [`evaluator`]. Everything else (cohorts,
//! statistics, reports, history, chart sampling) builds on [`evaluate`].

pub mod chart;
pub mod defuzzify;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod fuzzifier;
pub mod history;
pub mod membership;
pub mod model;
pub mod parser;
pub mod registry;
pub mod report;
pub mod results;
pub mod rules;
pub mod statistics;

pub use error::EvalError;
pub use evaluator::{evaluate, Evaluator};
pub use model::{Category, CrispInput, EvaluationResult};
