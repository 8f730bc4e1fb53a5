//! Fuzzification: crisp metrics to term membership degrees.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::CrispInput;
use crate::registry::{InputVariable, LinguisticVariable};

/// Membership degree of each term of one variable, keyed by term name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermDegrees(BTreeMap<String, f64>);

impl TermDegrees {
    /// Degree for `term`, or `None` if the variable has no such term.
    pub fn degree(&self, term: &str) -> Option<f64> {
        self.0.get(term).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Term degrees for all four input variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzifiedInput {
    pub attendance: TermDegrees,
    pub assignment: TermDegrees,
    pub exam: TermDegrees,
    pub participation: TermDegrees,
}

impl FuzzifiedInput {
    pub fn variable(&self, variable: InputVariable) -> &TermDegrees {
        match variable {
            InputVariable::Attendance => &self.attendance,
            InputVariable::Assignment => &self.assignment,
            InputVariable::Exam => &self.exam,
            InputVariable::Participation => &self.participation,
        }
    }

    /// Degree of `variable.term`; an unknown term has degree 0.
    pub fn degree(&self, variable: InputVariable, term: &str) -> f64 {
        self.variable(variable).degree(term).unwrap_or(0.0)
    }
}

/// Evaluate every term of `variable` at `x`.
pub fn fuzzify_value(variable: &LinguisticVariable, x: f64) -> TermDegrees {
    TermDegrees(
        variable
            .terms
            .iter()
            .map(|t| (t.name.to_string(), t.degree(x)))
            .collect(),
    )
}

/// Fuzzify all four inputs against the registry.
pub fn fuzzify(input: &CrispInput) -> FuzzifiedInput {
    let of = |v: InputVariable| fuzzify_value(v.variable(), input.get(v));
    FuzzifiedInput {
        attendance: of(InputVariable::Attendance),
        assignment: of(InputVariable::Assignment),
        exam: of(InputVariable::Exam),
        participation: of(InputVariable::Participation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ATTENDANCE;

    #[test]
    fn attendance_75() {
        let degrees = fuzzify_value(&ATTENDANCE, 75.0);
        assert_eq!(degrees.len(), 3);
        assert_eq!(degrees.degree("poor"), Some(0.0));
        let average = degrees.degree("average").unwrap();
        let good = degrees.degree("good").unwrap();
        assert!((average - 10.0 / 15.0).abs() < 1e-12, "average = {average}");
        assert!((good - 5.0 / 15.0).abs() < 1e-12, "good = {good}");
    }

    #[test]
    fn every_term_is_present() {
        let f = fuzzify(&CrispInput::new(75.0, 60.0, 65.0, 70.0));
        for variable in InputVariable::ALL {
            let degrees = f.variable(variable);
            for name in variable.variable().term_names() {
                assert!(degrees.degree(name).is_some(), "{variable}.{name} missing");
            }
        }
        assert_eq!(f.degree(InputVariable::Assignment, "medium"), 1.0);
        assert_eq!(f.degree(InputVariable::Exam, "nonsense"), 0.0);
    }

    #[test]
    fn outside_the_universe_nothing_applies() {
        // The shoulder terms step at the universe bounds.
        let f = fuzzify(&CrispInput::new(-20.0, 150.0, 1e9, -1e9));
        for variable in InputVariable::ALL {
            for (term, d) in f.variable(variable).iter() {
                assert_eq!(d, 0.0, "{variable}.{term}");
            }
        }
    }

    #[test]
    fn serializes_as_nested_objects() {
        let f = fuzzify(&CrispInput::new(100.0, 100.0, 100.0, 100.0));
        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(json["exam"]["high"], 1.0);
        assert_eq!(json["attendance"]["good"], 1.0);
    }
}
