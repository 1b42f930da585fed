//! Canonical comparison storage for one metric.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::Comparison;
use crate::error::{Result, SimscopeError};

/// Holds the set of pairwise comparisons recorded for one metric.
///
/// Pairs are unordered: the store keys each entry on the lexicographically
/// sorted id pair, so `(A, B)` and `(B, A)` collide as duplicates and never
/// double-count.
#[derive(Debug, Default, Clone)]
pub struct ComparisonStore {
    comparisons: BTreeMap<(String, String), f64>,
}

impl ComparisonStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one comparison between two submissions.
    ///
    /// Fails with [`SimscopeError::InvalidSimilarity`] when the similarity is
    /// outside `[0, 1]` (NaN included) or when a submission is compared to
    /// itself, and with [`SimscopeError::DuplicatePair`] when the unordered
    /// pair is already present.
    pub fn add(&mut self, first: &str, second: &str, similarity: f64) -> Result<()> {
        if first == second || !(0.0..=1.0).contains(&similarity) {
            return Err(SimscopeError::InvalidSimilarity {
                first: first.to_string(),
                second: second.to_string(),
                similarity,
            });
        }

        let key = canonical_pair(first, second);
        if self.comparisons.contains_key(&key) {
            return Err(SimscopeError::DuplicatePair {
                first: key.0,
                second: key.1,
            });
        }

        self.comparisons.insert(key, similarity);
        Ok(())
    }

    /// Number of comparisons recorded.
    pub fn len(&self) -> usize {
        self.comparisons.len()
    }

    /// Whether the store holds no comparisons.
    pub fn is_empty(&self) -> bool {
        self.comparisons.is_empty()
    }

    /// Every submission id appearing in at least one comparison.
    pub fn submission_ids(&self) -> BTreeSet<String> {
        let mut ids = BTreeSet::new();
        for (first, second) in self.comparisons.keys() {
            ids.insert(first.clone());
            ids.insert(second.clone());
        }
        ids
    }

    /// Iterate the comparisons ordered by similarity descending.
    ///
    /// Ties break on the lexicographic order of the concatenated pair ids, so
    /// the sequence is stable across runs. Each call restarts from the top.
    pub fn sorted_descending(&self) -> impl Iterator<Item = Comparison> + '_ {
        let mut entries: Vec<(&(String, String), f64)> = self
            .comparisons
            .iter()
            .map(|(pair, similarity)| (pair, *similarity))
            .collect();
        entries.sort_by(|(left_pair, left), (right_pair, right)| {
            right
                .partial_cmp(left)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| {
                    let left_key = format!("{}{}", left_pair.0, left_pair.1);
                    let right_key = format!("{}{}", right_pair.0, right_pair.1);
                    left_key.cmp(&right_key)
                })
        });
        entries
            .into_iter()
            .map(|((first, second), similarity)| Comparison {
                first_submission_id: first.clone(),
                second_submission_id: second.clone(),
                similarity,
            })
    }
}

fn canonical_pair(first: &str, second: &str) -> (String, String) {
    if first <= second {
        (first.to_string(), second.to_string())
    } else {
        (second.to_string(), first.to_string())
    }
}
