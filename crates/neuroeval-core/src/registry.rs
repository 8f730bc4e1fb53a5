//! The fuzzy set registry: every linguistic variable and term in the system.
//!
//! All values are `static` and immutable. Fuzzification, defuzzification and
//! chart sampling all read from here, so there is exactly one copy of the
//! membership parameters in the process.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EvalError;
use crate::membership::MembershipFunction;

/// Lower bound of every universe of discourse.
pub const UNIVERSE_MIN: f64 = 0.0;
/// Upper bound of every universe of discourse.
pub const UNIVERSE_MAX: f64 = 100.0;

/// A named fuzzy set within a linguistic variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinguisticTerm {
    pub name: &'static str,
    pub function: MembershipFunction,
}

impl LinguisticTerm {
    /// Degree of membership of `x` in this term.
    pub fn degree(&self, x: f64) -> f64 {
        self.function.degree(x)
    }
}

/// A named dimension decomposed into linguistic terms.
#[derive(Debug, PartialEq)]
pub struct LinguisticVariable {
    pub name: &'static str,
    pub terms: &'static [LinguisticTerm],
}

impl LinguisticVariable {
    /// Find a term by name.
    pub fn term(&self, name: &str) -> Option<&'static LinguisticTerm> {
        self.terms.iter().find(|t| t.name == name)
    }

    /// Like [`term`](Self::term), but reports an error naming the variable.
    pub fn require_term(&self, name: &str) -> Result<&'static LinguisticTerm, EvalError> {
        self.term(name).ok_or_else(|| EvalError::UnknownTerm {
            variable: self.name.to_string(),
            term: name.to_string(),
        })
    }

    /// Term names in definition order.
    pub fn term_names(&self) -> impl Iterator<Item = &'static str> {
        self.terms.iter().map(|t| t.name)
    }
}

const fn tri(name: &'static str, a: f64, b: f64, c: f64) -> LinguisticTerm {
    LinguisticTerm {
        name,
        function: MembershipFunction::Triangular { a, b, c },
    }
}

const fn trap(name: &'static str, a: f64, b: f64, c: f64, d: f64) -> LinguisticTerm {
    LinguisticTerm {
        name,
        function: MembershipFunction::Trapezoidal { a, b, c, d },
    }
}

// Assignment, exam and participation share the same low/medium/high partition.
const LOW_MEDIUM_HIGH: [LinguisticTerm; 3] = [
    trap("low", 0.0, 0.0, 40.0, 60.0),
    tri("medium", 40.0, 60.0, 80.0),
    trap("high", 60.0, 80.0, 100.0, 100.0),
];

pub static ATTENDANCE: LinguisticVariable = LinguisticVariable {
    name: "attendance",
    terms: &[
        trap("poor", 0.0, 0.0, 50.0, 70.0),
        tri("average", 50.0, 70.0, 85.0),
        trap("good", 70.0, 85.0, 100.0, 100.0),
    ],
};

pub static ASSIGNMENT: LinguisticVariable = LinguisticVariable {
    name: "assignment",
    terms: &LOW_MEDIUM_HIGH,
};

pub static EXAM: LinguisticVariable = LinguisticVariable {
    name: "exam",
    terms: &LOW_MEDIUM_HIGH,
};

pub static PARTICIPATION: LinguisticVariable = LinguisticVariable {
    name: "participation",
    terms: &LOW_MEDIUM_HIGH,
};

/// The output variable.
pub static PERFORMANCE: LinguisticVariable = LinguisticVariable {
    name: "performance",
    terms: &[
        trap("poor", 0.0, 0.0, 30.0, 50.0),
        tri("average", 30.0, 50.0, 70.0),
        tri("good", 50.0, 70.0, 90.0),
        trap("excellent", 70.0, 90.0, 100.0, 100.0),
    ],
};

/// The four input dimensions, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputVariable {
    Attendance,
    Assignment,
    Exam,
    Participation,
}

impl InputVariable {
    pub const ALL: [InputVariable; 4] = [
        InputVariable::Attendance,
        InputVariable::Assignment,
        InputVariable::Exam,
        InputVariable::Participation,
    ];

    /// Registry entry for this input.
    pub fn variable(self) -> &'static LinguisticVariable {
        match self {
            InputVariable::Attendance => &ATTENDANCE,
            InputVariable::Assignment => &ASSIGNMENT,
            InputVariable::Exam => &EXAM,
            InputVariable::Participation => &PARTICIPATION,
        }
    }

    pub fn name(self) -> &'static str {
        self.variable().name
    }
}

impl fmt::Display for InputVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InputVariable {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        InputVariable::ALL
            .into_iter()
            .find(|v| v.name() == lowered)
            .ok_or_else(|| EvalError::UnknownVariable(s.to_string()))
    }
}

/// The four terms of the `performance` output variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTerm {
    Poor,
    Average,
    Good,
    Excellent,
}

impl OutputTerm {
    pub const ALL: [OutputTerm; 4] = [
        OutputTerm::Poor,
        OutputTerm::Average,
        OutputTerm::Good,
        OutputTerm::Excellent,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OutputTerm::Poor => "poor",
            OutputTerm::Average => "average",
            OutputTerm::Good => "good",
            OutputTerm::Excellent => "excellent",
        }
    }

    /// The output term's registry entry.
    pub fn term(self) -> &'static LinguisticTerm {
        &PERFORMANCE.terms[self as usize]
    }
}

impl fmt::Display for OutputTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// All input variables, in canonical order.
pub fn input_variables() -> [&'static LinguisticVariable; 4] {
    InputVariable::ALL.map(InputVariable::variable)
}

/// Look up any variable, input or output, by name.
pub fn variable(name: &str) -> Result<&'static LinguisticVariable, EvalError> {
    let lowered = name.trim().to_lowercase();
    if lowered == PERFORMANCE.name {
        return Ok(&PERFORMANCE);
    }
    lowered
        .parse::<InputVariable>()
        .map(InputVariable::variable)
        .map_err(|_| EvalError::UnknownVariable(name.to_string()))
}
