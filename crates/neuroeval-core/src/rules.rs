//! The rule base and min/max inference.
//!
//! Each rule ANDs two input terms with `min`. Rules sharing a consequent are
//! ORed with `max` into the [`AggregatedOutput`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fuzzifier::FuzzifiedInput;
use crate::registry::InputVariable::{Assignment, Attendance, Exam, Participation};
use crate::registry::{InputVariable, OutputTerm};

/// One `variable IS term` clause of a rule premise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Antecedent {
    pub variable: InputVariable,
    pub term: &'static str,
}

/// A fixed fuzzy rule: two antecedents ANDed together imply one output term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub antecedents: [Antecedent; 2],
    pub consequent: OutputTerm,
}

impl Rule {
    /// Firing strength: the minimum of the antecedent degrees.
    pub fn strength(&self, fuzzified: &FuzzifiedInput) -> f64 {
        self.antecedents
            .iter()
            .map(|a| fuzzified.degree(a.variable, a.term))
            .fold(1.0, f64::min)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [first, second] = self.antecedents;
        write!(
            f,
            "IF {} IS {} AND {} IS {} THEN performance IS {}",
            first.variable, first.term, second.variable, second.term, self.consequent
        )
    }
}

const fn when(variable: InputVariable, term: &'static str) -> Antecedent {
    Antecedent { variable, term }
}

/// The rule base, in evaluation order.
pub static RULES: [Rule; 8] = [
    Rule {
        antecedents: [when(Attendance, "good"), when(Exam, "high")],
        consequent: OutputTerm::Excellent,
    },
    Rule {
        antecedents: [when(Attendance, "poor"), when(Exam, "low")],
        consequent: OutputTerm::Poor,
    },
    Rule {
        antecedents: [when(Assignment, "medium"), when(Participation, "high")],
        consequent: OutputTerm::Good,
    },
    Rule {
        antecedents: [when(Assignment, "high"), when(Exam, "high")],
        consequent: OutputTerm::Excellent,
    },
    Rule {
        antecedents: [when(Attendance, "average"), when(Participation, "low")],
        consequent: OutputTerm::Average,
    },
    Rule {
        antecedents: [when(Exam, "medium"), when(Assignment, "low")],
        consequent: OutputTerm::Poor,
    },
    Rule {
        antecedents: [when(Participation, "medium"), when(Attendance, "good")],
        consequent: OutputTerm::Good,
    },
    // A low exam is lifted to average by high participation.
    Rule {
        antecedents: [when(Exam, "low"), when(Participation, "high")],
        consequent: OutputTerm::Average,
    },
];

/// Strength of one rule after evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuleFiring {
    pub strength: f64,
    pub output: OutputTerm,
}

/// Max-aggregated strength per output term. Absent terms are 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregatedOutput {
    pub poor: f64,
    pub average: f64,
    pub good: f64,
    pub excellent: f64,
}

impl AggregatedOutput {
    pub fn get(&self, term: OutputTerm) -> f64 {
        match term {
            OutputTerm::Poor => self.poor,
            OutputTerm::Average => self.average,
            OutputTerm::Good => self.good,
            OutputTerm::Excellent => self.excellent,
        }
    }

    fn slot(&mut self, term: OutputTerm) -> &mut f64 {
        match term {
            OutputTerm::Poor => &mut self.poor,
            OutputTerm::Average => &mut self.average,
            OutputTerm::Good => &mut self.good,
            OutputTerm::Excellent => &mut self.excellent,
        }
    }

    /// Fuzzy OR `strength` into `term`.
    pub fn accumulate(&mut self, term: OutputTerm, strength: f64) {
        let slot = self.slot(term);
        *slot = slot.max(strength);
    }

    /// `(term, strength)` pairs in output order.
    pub fn iter(&self) -> impl Iterator<Item = (OutputTerm, f64)> + '_ {
        OutputTerm::ALL.into_iter().map(|t| (t, self.get(t)))
    }

    /// True when no output term received any strength.
    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, s)| s == 0.0)
    }
}

/// The result of running the rule base.
#[derive(Debug, Clone, PartialEq)]
pub struct Inference {
    pub aggregated: AggregatedOutput,
    pub rules: Vec<RuleFiring>,
}

/// Fire every rule against `fuzzified` and aggregate by consequent.
pub fn evaluate_rules(fuzzified: &FuzzifiedInput) -> Inference {
    let mut aggregated = AggregatedOutput::default();
    let rules: Vec<RuleFiring> = RULES
        .iter()
        .map(|rule| {
            let strength = rule.strength(fuzzified);
            aggregated.accumulate(rule.consequent, strength);
            RuleFiring {
                strength,
                output: rule.consequent,
            }
        })
        .collect();

    Inference { aggregated, rules }
}
