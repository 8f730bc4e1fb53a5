//! Aggregate statistics over a cohort's results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::Category;
use crate::registry::InputVariable;
use crate::results::StudentResult;

/// Summary of the scores and inputs of a cohort run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortStats {
    /// Number of evaluated students.
    pub count: usize,
    pub mean_score: f64,
    pub median_score: f64,
    pub min_score: f64,
    pub max_score: f64,
    /// Population standard deviation of the scores.
    pub std_dev: f64,
    /// Students per category. Every category is present, possibly with 0.
    pub category_counts: BTreeMap<Category, usize>,
    /// Mean crisp value of each input metric.
    pub metric_means: BTreeMap<InputVariable, f64>,
}

impl CohortStats {
    /// Fraction of students in `category`, 0 for an empty cohort.
    pub fn category_share(&self, category: Category) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.category_counts.get(&category).copied().unwrap_or(0) as f64 / self.count as f64
    }
}

/// Compute aggregate statistics from all results.
pub fn compute_cohort_stats(results: &[StudentResult]) -> CohortStats {
    let mut category_counts: BTreeMap<Category, usize> =
        Category::ALL.into_iter().map(|c| (c, 0)).collect();
    for r in results {
        *category_counts.entry(r.category()).or_default() += 1;
    }

    let mut scores: Vec<f64> = results.iter().map(StudentResult::score).collect();
    scores.sort_by(f64::total_cmp);

    let metric_means = InputVariable::ALL
        .into_iter()
        .map(|v| (v, mean(results.iter().map(|r| r.inputs.get(v)))))
        .collect();

    let mean_score = mean(scores.iter().copied());
    let variance = mean(scores.iter().map(|s| (s - mean_score).powi(2)));

    CohortStats {
        count: results.len(),
        mean_score,
        median_score: median(&scores),
        min_score: scores.first().copied().unwrap_or(0.0),
        max_score: scores.last().copied().unwrap_or(0.0),
        std_dev: variance.sqrt(),
        category_counts,
        metric_means,
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Median of already sorted values.
fn median(sorted: &[f64]) -> f64 {
    match sorted.len() {
        0 => 0.0,
        n if n % 2 == 1 => sorted[n / 2],
        n => (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0,
    }
}
