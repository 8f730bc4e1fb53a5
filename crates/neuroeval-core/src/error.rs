//! Typed errors for the edges of the inference pipeline.
//!
//! The pipeline itself is total over `f64` and never fails. These errors
//! cover name lookups into the registry, building inputs from loose
//! name/value pairs, and sampling resolutions.

use thiserror::Error;

/// Errors raised when addressing the fuzzy system by name or configuring it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// No linguistic variable with this name exists in the registry.
    #[error("unknown variable: {0}")]
    UnknownVariable(String),

    /// The variable exists but has no term with this name.
    #[error("unknown term '{term}' for variable '{variable}'")]
    UnknownTerm { variable: String, term: String },

    /// A crisp input was built without a value for this variable.
    #[error("missing input value for '{0}'")]
    MissingInput(String),

    /// The sampling step is not a positive finite number no larger than the universe.
    #[error("invalid resolution {0}: step must be finite and in (0, 100]")]
    InvalidResolution(f64),
}

impl EvalError {
    /// Returns `true` if the error comes from a name that the registry does not know.
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            EvalError::UnknownVariable(_) | EvalError::UnknownTerm { .. }
        )
    }
}
