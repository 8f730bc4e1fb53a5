//! Cohort report types with JSON persistence and progress comparison.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::defuzzify::Resolution;
use crate::model::Category;
use crate::results::StudentResult;
use crate::statistics::CohortStats;

/// A complete cohort report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Summary of the cohort.
    pub cohort: CohortSummary,
    /// Defuzzification step used for every score in this report.
    #[serde(default)]
    pub resolution: Resolution,
    /// Individual student results.
    pub results: Vec<StudentResult>,
    /// Aggregate statistics.
    pub stats: CohortStats,
    /// Total wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

/// Summary of a cohort (without the student records).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortSummary {
    pub id: String,
    pub name: String,
    pub student_count: usize,
}

impl CohortReport {
    /// Save the report as JSON to a file.
    ///
    /// Fails if a student has a NaN or infinite metric, which JSON would
    /// write as `null` and never read back.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        for r in &self.results {
            if let Some((variable, value)) = r.inputs.non_finite() {
                anyhow::bail!(
                    "student {} has non-finite {variable} ({value}), report not saved",
                    r.student_id
                );
            }
        }
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: CohortReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Render the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("# {} ({})\n\n", self.cohort.name, self.cohort.id));
        md.push_str(&format!(
            "Generated {} | {} of {} students evaluated\n\n",
            self.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.stats.count,
            self.cohort.student_count
        ));

        md.push_str("## Summary\n\n");
        md.push_str("| Mean | Median | Min | Max | Std dev |\n");
        md.push_str("|------|--------|-----|-----|---------|\n");
        md.push_str(&format!(
            "| {:.1} | {:.1} | {:.1} | {:.1} | {:.1} |\n\n",
            self.stats.mean_score,
            self.stats.median_score,
            self.stats.min_score,
            self.stats.max_score,
            self.stats.std_dev
        ));

        md.push_str("| Category | Students |\n");
        md.push_str("|----------|----------|\n");
        for (category, count) in self.stats.category_counts.iter().rev() {
            md.push_str(&format!("| {category} | {count} |\n"));
        }
        md.push('\n');

        md.push_str("## Results\n\n");
        md.push_str("| Student | Name | Attendance | Assignment | Exam | Participation | Score | Category |\n");
        md.push_str("|---------|------|------------|------------|------|---------------|-------|----------|\n");
        for r in &self.results {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {:.1} | {} |\n",
                r.student_id,
                r.name,
                r.inputs.attendance,
                r.inputs.assignment,
                r.inputs.exam,
                r.inputs.participation,
                r.score(),
                r.category()
            ));
        }

        md
    }

    /// Compare this report against a baseline to track student progress.
    ///
    /// Students are matched by ID. A score change larger than `threshold`
    /// points counts as a regression or an improvement. An ID that occurs
    /// more than once in either report cannot be matched; it is listed in
    /// `duplicate_ids` and left out of every other count.
    pub fn compare(&self, baseline: &CohortReport, threshold: f64) -> ComparisonReport {
        let mut duplicate_ids = BTreeSet::new();
        let baseline_scores = index_scores(baseline, &mut duplicate_ids);
        let current_scores = index_scores(self, &mut duplicate_ids);

        let mut regressions = Vec::new();
        let mut improvements = Vec::new();
        let mut category_changes = Vec::new();
        let mut unchanged = 0usize;
        let mut new_students = 0usize;

        // Walk in report order so output is stable.
        for r in &self.results {
            if duplicate_ids.contains(&r.student_id) {
                continue;
            }
            let Some(&(baseline_score, baseline_category)) = baseline_scores.get(&r.student_id)
            else {
                new_students += 1;
                continue;
            };
            let current = r.score();
            let delta = current - baseline_score;
            let change = ScoreChange {
                student_id: r.student_id.clone(),
                baseline_score,
                current_score: current,
                delta,
            };

            if baseline_category != r.category() {
                category_changes.push(CategoryChange {
                    student_id: r.student_id.clone(),
                    from: baseline_category,
                    to: r.category(),
                });
            }

            if delta < -threshold {
                regressions.push(change);
            } else if delta > threshold {
                improvements.push(change);
            } else {
                unchanged += 1;
            }
        }

        let removed_students = baseline_scores
            .keys()
            .filter(|k| !current_scores.contains_key(*k) && !duplicate_ids.contains(*k))
            .count();

        ComparisonReport {
            regressions,
            improvements,
            category_changes,
            unchanged,
            new_students,
            removed_students,
            duplicate_ids: duplicate_ids.into_iter().collect(),
        }
    }
}

/// Score and category by student ID. IDs seen twice go into `duplicates`.
fn index_scores(
    report: &CohortReport,
    duplicates: &mut BTreeSet<String>,
) -> HashMap<String, (f64, Category)> {
    let mut scores = HashMap::new();
    for r in &report.results {
        if scores
            .insert(r.student_id.clone(), (r.score(), r.category()))
            .is_some()
        {
            duplicates.insert(r.student_id.clone());
        }
    }
    scores
}

/// Result of comparing two reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Students whose score went down.
    pub regressions: Vec<ScoreChange>,
    /// Students whose score went up.
    pub improvements: Vec<ScoreChange>,
    /// Students who moved to a different category.
    pub category_changes: Vec<CategoryChange>,
    /// Students with no significant change.
    pub unchanged: usize,
    /// Students in current but not baseline.
    pub new_students: usize,
    /// Students in baseline but not current.
    pub removed_students: usize,
    /// IDs that occur more than once in either report, sorted.
    #[serde(default)]
    pub duplicate_ids: Vec<String>,
}

/// A score movement for one student.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreChange {
    pub student_id: String,
    pub baseline_score: f64,
    pub current_score: f64,
    pub delta: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryChange {
    pub student_id: String,
    pub from: Category,
    pub to: Category,
}

impl ComparisonReport {
    /// Format the comparison as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} regressions, {} improvements, {} unchanged\n\n",
            self.regressions.len(),
            self.improvements.len(),
            self.unchanged
        ));

        let table = |md: &mut String, title: &str, changes: &[ScoreChange]| {
            if changes.is_empty() {
                return;
            }
            md.push_str(&format!("### {title}\n\n"));
            md.push_str("| Student | Baseline | Current | Delta |\n");
            md.push_str("|---------|----------|---------|-------|\n");
            for c in changes {
                md.push_str(&format!(
                    "| {} | {:.1} | {:.1} | {:+.1} |\n",
                    c.student_id, c.baseline_score, c.current_score, c.delta
                ));
            }
            md.push('\n');
        };
        table(&mut md, "Regressions", &self.regressions);
        table(&mut md, "Improvements", &self.improvements);

        if !self.category_changes.is_empty() {
            md.push_str("### Category changes\n\n");
            for c in &self.category_changes {
                md.push_str(&format!("- {}: {} -> {}\n", c.student_id, c.from, c.to));
            }
        }

        if !self.duplicate_ids.is_empty() {
            md.push_str(&format!(
                "\n**Not compared (duplicate IDs):** {}\n",
                self.duplicate_ids.join(", ")
            ));
        }

        md
    }

    /// Returns true if there are any regressions.
    pub fn has_regressions(&self) -> bool {
        !self.regressions.is_empty()
    }
}
