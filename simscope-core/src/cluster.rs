//! Cluster derivation from pairwise comparisons.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{Cluster, Comparison};
use crate::error::{Result, SimscopeError};

/// Group submissions whose mutual similarity reaches `threshold`.
///
/// Submissions are nodes, comparisons with `similarity >= threshold` are
/// edges, and every connected component with at least two members becomes a
/// [`Cluster`]. Isolated submissions produce no cluster. The output is
/// sorted by each cluster's smallest member, so results are deterministic.
///
/// Fails with [`SimscopeError::InvalidThreshold`] when `threshold` is
/// outside `[0, 1]` or NaN. A threshold of `1.0` clusters only perfect
/// pairs; `0.0` connects every compared submission.
pub fn build_clusters(comparisons: &[Comparison], threshold: f64) -> Result<Vec<Cluster>> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(SimscopeError::InvalidThreshold(threshold));
    }

    let mut indices: BTreeMap<&str, usize> = BTreeMap::new();
    for comparison in comparisons {
        let next = indices.len();
        indices
            .entry(comparison.first_submission_id.as_str())
            .or_insert(next);
        let next = indices.len();
        indices
            .entry(comparison.second_submission_id.as_str())
            .or_insert(next);
    }

    let mut sets = UnionFind::new(indices.len());
    for comparison in comparisons {
        if comparison.similarity >= threshold {
            let first = indices[comparison.first_submission_id.as_str()];
            let second = indices[comparison.second_submission_id.as_str()];
            sets.union(first, second);
        }
    }

    let mut components: BTreeMap<usize, BTreeSet<String>> = BTreeMap::new();
    for (id, index) in &indices {
        let root = sets.find(*index);
        components.entry(root).or_default().insert((*id).to_string());
    }

    let mut clusters: Vec<Cluster> = components
        .into_values()
        .filter(|members| members.len() >= 2)
        .map(|members| Cluster { members })
        .collect();
    clusters.sort_by(|left, right| left.members.iter().next().cmp(&right.members.iter().next()));
    Ok(clusters)
}

#[derive(Debug)]
struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
        }
    }

    fn find(&mut self, node: usize) -> usize {
        if self.parent[node] != node {
            let root = self.find(self.parent[node]);
            self.parent[node] = root;
        }
        self.parent[node]
    }

    fn union(&mut self, left: usize, right: usize) {
        let left_root = self.find(left);
        let right_root = self.find(right);
        if left_root == right_root {
            return;
        }
        if left_root < right_root {
            self.parent[right_root] = left_root;
        } else {
            self.parent[left_root] = right_root;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::build_clusters;
    use crate::domain::Comparison;
    use crate::error::SimscopeError;

    fn comparison(first: &str, second: &str, similarity: f64) -> Comparison {
        Comparison {
            first_submission_id: first.to_string(),
            second_submission_id: second.to_string(),
            similarity,
        }
    }

    fn fixture_comparisons() -> Vec<Comparison> {
        vec![
            comparison("A", "C", 0.9966329966329966),
            comparison("D", "A", 0.7787255393878575),
            comparison("D", "C", 0.7787255393878575),
            comparison("B", "D", 0.2827868852459016),
            comparison("B", "A", 0.2457689477557027),
            comparison("B", "C", 0.2457689477557027),
            comparison("E", "A", 0.0),
            comparison("E", "D", 0.0),
            comparison("E", "B", 0.0),
            comparison("E", "C", 0.0),
        ]
    }

    fn members(cluster: &crate::domain::Cluster) -> Vec<&str> {
        cluster.members.iter().map(String::as_str).collect()
    }

    #[test]
    fn fixture_set_clusters_a_c_d_at_half_threshold() {
        let clusters = build_clusters(&fixture_comparisons(), 0.5).expect("clusters");
        assert_eq!(clusters.len(), 1);
        assert_eq!(members(&clusters[0]), vec!["A", "C", "D"]);
    }

    #[test]
    fn clustering_is_symmetric_under_pair_swap() {
        let swapped: Vec<Comparison> = fixture_comparisons()
            .into_iter()
            .map(|entry| comparison(
                &entry.second_submission_id,
                &entry.first_submission_id,
                entry.similarity,
            ))
            .collect();
        let original = build_clusters(&fixture_comparisons(), 0.5).expect("clusters");
        let mirrored = build_clusters(&swapped, 0.5).expect("clusters");
        assert_eq!(original, mirrored);
    }

    #[test]
    fn perfect_threshold_clusters_only_perfect_pairs() {
        let comparisons = vec![
            comparison("A", "B", 1.0),
            comparison("B", "C", 0.999),
            comparison("D", "E", 0.5),
        ];
        let clusters = build_clusters(&comparisons, 1.0).expect("clusters");
        assert_eq!(clusters.len(), 1);
        assert_eq!(members(&clusters[0]), vec!["A", "B"]);
    }

    #[test]
    fn zero_threshold_connects_every_compared_submission() {
        let clusters = build_clusters(&fixture_comparisons(), 0.0).expect("clusters");
        assert_eq!(clusters.len(), 1);
        assert_eq!(members(&clusters[0]), vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn isolated_submissions_produce_no_cluster() {
        let comparisons = vec![
            comparison("A", "B", 0.9),
            comparison("C", "D", 0.1),
        ];
        let clusters = build_clusters(&comparisons, 0.5).expect("clusters");
        assert_eq!(clusters.len(), 1);
        assert_eq!(members(&clusters[0]), vec!["A", "B"]);
    }

    #[test]
    fn disconnected_components_cluster_separately() {
        let comparisons = vec![
            comparison("A", "B", 0.9),
            comparison("C", "D", 0.8),
            comparison("B", "C", 0.1),
        ];
        let clusters = build_clusters(&comparisons, 0.5).expect("clusters");
        assert_eq!(clusters.len(), 2);
        assert_eq!(members(&clusters[0]), vec!["A", "B"]);
        assert_eq!(members(&clusters[1]), vec!["C", "D"]);
    }

    #[test]
    fn empty_input_yields_no_clusters() {
        let clusters = build_clusters(&[], 0.5).expect("clusters");
        assert!(clusters.is_empty());
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let comparisons = vec![comparison("A", "B", 0.9)];
        assert_eq!(
            build_clusters(&comparisons, 1.1),
            Err(SimscopeError::InvalidThreshold(1.1))
        );
        assert_eq!(
            build_clusters(&comparisons, -0.1),
            Err(SimscopeError::InvalidThreshold(-0.1))
        );
        assert!(matches!(
            build_clusters(&comparisons, f64::NAN),
            Err(SimscopeError::InvalidThreshold(_))
        ));
    }
}
