//! Domain entities for SimScope reports.
//!
//! Field names and nesting of these types are a compatibility contract:
//! renderers consume the serialized `Overview` exactly as laid out here.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Two-level lookup from a submission id to the detail-file name recorded for
/// each paired submission id.
pub type ComparisonFileIndex = BTreeMap<String, BTreeMap<String, String>>;

/// One scored pairwise similarity result between two submissions.
///
/// The pair is unordered: `(A, B)` and `(B, A)` denote the same comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    /// Id of the first submission of the pair.
    pub first_submission_id: String,
    /// Id of the second submission of the pair.
    pub second_submission_id: String,
    /// Similarity score in `[0, 1]`.
    pub similarity: f64,
}

/// One named scoring method with its aggregated views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    /// Metric name, unique per report.
    pub metric_name: String,
    /// Histogram of comparison counts, ordered from the highest similarity
    /// range downward: index 0 counts the top range, the last index counts
    /// `[0, 1/n)`. `sum(distribution) == comparisons.len()`.
    pub distribution: Vec<u64>,
    /// Threshold configured for this metric, in `[0, 1]`.
    pub metric_threshold: f64,
    /// Comparisons sorted descending by similarity.
    pub comparisons: Vec<Comparison>,
    /// Human-readable description of the scoring method.
    pub description: String,
}

/// A group of submissions judged mutually similar above a threshold.
///
/// Membership is derived from one metric's comparisons, never stored
/// independently, and always contains at least two submissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    /// Submission ids in the cluster; membership is unordered.
    pub members: BTreeSet<String>,
}

/// Metadata describing one detection run, supplied by the report generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RunMetadata {
    /// Folders the submissions were read from.
    pub submission_folder_path: Vec<String>,
    /// Folder holding base code excluded from matching, empty when unused.
    pub base_code_folder_path: String,
    /// Language frontend used by the detection engine.
    pub language: String,
    /// File extensions considered by the run.
    pub file_extensions: BTreeSet<String>,
    /// Match sensitivity the engine ran with.
    pub match_sensitivity: f64,
    /// Date the run was executed.
    pub date_of_execution: String,
    /// Run duration in seconds.
    pub duration_of_execution: u64,
}

/// The complete, immutable report aggregate for one detection run.
///
/// Constructed once by [`crate::build_overview`] and read-only afterwards;
/// it exclusively owns its metrics, clusters, and the lookup map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    /// Folders the submissions were read from.
    pub submission_folder_path: Vec<String>,
    /// Folder holding base code excluded from matching.
    pub base_code_folder_path: String,
    /// Language frontend used by the detection engine.
    pub language: String,
    /// File extensions considered by the run.
    pub file_extensions: BTreeSet<String>,
    /// Match sensitivity the engine ran with.
    pub match_sensitivity: f64,
    /// Date the run was executed.
    pub date_of_execution: String,
    /// Run duration in seconds.
    pub duration_of_execution: u64,
    /// Aggregated metrics; insertion order is display order.
    pub metrics: Vec<Metric>,
    /// Clusters derived from the cluster-source metric.
    pub clusters: Vec<Cluster>,
    /// Lookup from submission id to paired submission id to the name of the
    /// detailed pairwise comparison file.
    pub submission_ids_to_comparison_file_name: ComparisonFileIndex,
}
