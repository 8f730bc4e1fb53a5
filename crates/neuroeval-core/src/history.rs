//! A bounded, newest-first record of past evaluations.
//!
//! The history keeps `{inputs, score, category}` keyed by time. Recording the
//! same inputs twice in a row is a no-op, and the oldest entries fall off once
//! the limit is reached. Storage is the caller's concern: the history is a
//! plain serializable value. Inputs containing NaN or infinities are never
//! stored, since JSON cannot carry them back.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Category, CrispInput, EvaluationResult};

/// Default number of retained entries.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// One remembered evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub inputs: CrispInput,
    pub score: f64,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredHistory")]
pub struct History {
    limit: usize,
    entries: VecDeque<HistoryEntry>,
}

/// On-disk shape; the limit is re-clamped on load.
#[derive(Deserialize)]
struct StoredHistory {
    limit: usize,
    entries: VecDeque<HistoryEntry>,
}

impl From<StoredHistory> for History {
    fn from(stored: StoredHistory) -> Self {
        let mut history = History {
            limit: 1,
            entries: stored.entries,
        };
        history.set_limit(stored.limit);
        history
    }
}

impl Default for History {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// A history retaining at most `limit` entries (at least one).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            entries: VecDeque::new(),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Change the limit (at least one), dropping the oldest entries that no
    /// longer fit.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit.max(1);
        self.entries.truncate(self.limit);
    }

    /// Record an evaluation made now. See [`record_at`](Self::record_at).
    pub fn record(&mut self, inputs: CrispInput, result: &EvaluationResult) -> bool {
        self.record_at(inputs, result, Utc::now())
    }

    /// Record an evaluation with an explicit timestamp.
    ///
    /// Returns `false` without changing anything when `inputs` equals the
    /// inputs of the most recent entry, or holds a non-finite value.
    pub fn record_at(
        &mut self,
        inputs: CrispInput,
        result: &EvaluationResult,
        recorded_at: DateTime<Utc>,
    ) -> bool {
        if let Some((variable, value)) = inputs.non_finite() {
            tracing::warn!(%variable, value, "not recording non-finite input in history");
            return false;
        }
        if self.latest().is_some_and(|last| last.inputs == inputs) {
            tracing::debug!("skipping repeated inputs in history");
            return false;
        }

        self.entries.push_front(HistoryEntry {
            id: Uuid::new_v4(),
            recorded_at,
            inputs,
            score: result.score,
            category: result.category,
        });
        self.entries.truncate(self.limit);
        true
    }

    /// The most recent entry.
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    /// Entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> Vec<&HistoryEntry> {
        self.entries.iter().collect()
    }

    /// Look up an entry by id.
    pub fn get(&self, id: Uuid) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
