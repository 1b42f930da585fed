//! Similarity distribution bucketing.

use crate::domain::Comparison;

/// Bucket count used by the standard report layout.
pub const DEFAULT_BUCKET_COUNT: usize = 10;

/// Count comparisons into `bucket_count` equal-width similarity buckets.
///
/// Bucket `i` covers the half-open range `[i/n, (i+1)/n)`; a similarity of
/// exactly `1.0` lands in the last bucket. The output always sums to the
/// number of input comparisons, and an empty input yields all-zero buckets.
pub fn bucket(comparisons: &[Comparison], bucket_count: usize) -> Vec<u64> {
    let mut counts = vec![0u64; bucket_count];
    if bucket_count == 0 {
        return counts;
    }

    for comparison in comparisons {
        let index = bucket_index(comparison.similarity, bucket_count);
        counts[index] += 1;
    }
    counts
}

fn bucket_index(similarity: f64, bucket_count: usize) -> usize {
    let raw = (similarity * bucket_count as f64).floor() as usize;
    raw.min(bucket_count - 1)
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_BUCKET_COUNT, bucket};
    use crate::domain::Comparison;

    fn comparison(first: &str, second: &str, similarity: f64) -> Comparison {
        Comparison {
            first_submission_id: first.to_string(),
            second_submission_id: second.to_string(),
            similarity,
        }
    }

    #[test]
    fn empty_input_yields_all_zero_buckets() {
        let counts = bucket(&[], DEFAULT_BUCKET_COUNT);
        assert_eq!(counts, vec![0; 10]);
    }

    #[test]
    fn zero_bucket_count_yields_empty_histogram() {
        let comparisons = vec![comparison("A", "B", 0.5)];
        assert!(bucket(&comparisons, 0).is_empty());
    }

    #[test]
    fn perfect_similarity_lands_in_last_bucket() {
        let comparisons = vec![comparison("A", "B", 1.0)];
        let counts = bucket(&comparisons, DEFAULT_BUCKET_COUNT);
        assert_eq!(counts[9], 1);
        assert_eq!(counts.iter().sum::<u64>(), 1);
    }

    #[test]
    fn boundary_scores_fall_into_right_open_buckets() {
        let comparisons = vec![
            comparison("A", "B", 0.0),
            comparison("A", "C", 0.1),
            comparison("A", "D", 0.9),
        ];
        let counts = bucket(&comparisons, DEFAULT_BUCKET_COUNT);
        assert_eq!(counts[0], 1);
        assert_eq!(counts[1], 1);
        assert_eq!(counts[9], 1);
    }

    #[test]
    fn sum_equals_input_count_for_fixture_scores() {
        let comparisons = vec![
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
        ];
        let counts = bucket(&comparisons, DEFAULT_BUCKET_COUNT);
        assert_eq!(counts, vec![4, 0, 3, 0, 0, 0, 0, 2, 0, 1]);
        assert_eq!(counts.iter().sum::<u64>(), comparisons.len() as u64);
    }

    #[test]
    fn bucketing_is_idempotent() {
        let comparisons = vec![
            comparison("A", "B", 0.42),
            comparison("A", "C", 0.42),
            comparison("B", "C", 0.99),
        ];
        let first = bucket(&comparisons, DEFAULT_BUCKET_COUNT);
        let second = bucket(&comparisons, DEFAULT_BUCKET_COUNT);
        assert_eq!(first, second);
    }

    #[test]
    fn supports_non_default_bucket_counts() {
        let comparisons = vec![
            comparison("A", "B", 0.1),
            comparison("A", "C", 0.6),
            comparison("B", "C", 1.0),
        ];
        let counts = bucket(&comparisons, 4);
        assert_eq!(counts, vec![1, 0, 1, 1]);
    }
}
