//! Overview aggregation.
//!
//! Turns per-metric comparison stores plus run metadata into the immutable
//! [`Overview`] consumed by renderers. Construction either yields a fully
//! valid report or fails; no partial Overview is ever exposed.

use crate::cluster::build_clusters;
use crate::distribution::{DEFAULT_BUCKET_COUNT, bucket};
use crate::domain::{Cluster, Comparison, ComparisonFileIndex, Metric, Overview, RunMetadata};
use crate::error::{Result, SimscopeError};
use crate::index::resolves_submission_id;
use crate::store::ComparisonStore;

/// Aggregation input for one metric; insertion order is display order.
#[derive(Debug, Clone)]
pub struct MetricInput {
    /// Metric name, unique per report.
    pub metric_name: String,
    /// Human-readable description of the scoring method.
    pub description: String,
    /// Threshold configured for this metric, in `[0, 1]`.
    pub metric_threshold: f64,
    /// Whether this metric's comparisons and threshold seed clustering.
    pub cluster_source: bool,
    /// The metric's recorded comparisons.
    pub store: ComparisonStore,
}

/// Assemble the immutable report aggregate with the standard bucket count.
///
/// See [`build_overview_with_bucket_count`] for the contract.
pub fn build_overview(
    metadata: RunMetadata,
    metrics: Vec<MetricInput>,
    index: ComparisonFileIndex,
) -> Result<Overview> {
    build_overview_with_bucket_count(metadata, metrics, index, DEFAULT_BUCKET_COUNT)
}

/// Assemble the immutable report aggregate.
///
/// For every metric the distribution is bucketed and the comparisons are
/// sorted descending; clusters come from the metric flagged as cluster
/// source (the first metric when none is flagged), using that metric's
/// threshold. Serialized distributions run from the highest similarity
/// range downward, matching the report format renderers consume.
///
/// Fails with [`SimscopeError::EmptyMetricSet`] when no metrics are given
/// and with [`SimscopeError::UnresolvedSubmissionId`] when a compared
/// submission has no entry, in either pair order, in `index`. A threshold
/// outside `[0, 1]` on the cluster-source metric surfaces as
/// [`SimscopeError::InvalidThreshold`].
pub fn build_overview_with_bucket_count(
    metadata: RunMetadata,
    metrics: Vec<MetricInput>,
    index: ComparisonFileIndex,
    bucket_count: usize,
) -> Result<Overview> {
    if metrics.is_empty() {
        return Err(SimscopeError::EmptyMetricSet);
    }

    for input in &metrics {
        for id in input.store.submission_ids() {
            if !resolves_submission_id(&index, &id) {
                return Err(SimscopeError::UnresolvedSubmissionId(id));
            }
        }
    }

    let clusters = derive_clusters(&metrics)?;

    let mut aggregated = Vec::with_capacity(metrics.len());
    for input in metrics {
        let comparisons: Vec<Comparison> = input.store.sorted_descending().collect();
        let mut distribution = bucket(&comparisons, bucket_count);
        distribution.reverse();
        aggregated.push(Metric {
            metric_name: input.metric_name,
            distribution,
            metric_threshold: input.metric_threshold,
            comparisons,
            description: input.description,
        });
    }

    Ok(Overview {
        submission_folder_path: metadata.submission_folder_path,
        base_code_folder_path: metadata.base_code_folder_path,
        language: metadata.language,
        file_extensions: metadata.file_extensions,
        match_sensitivity: metadata.match_sensitivity,
        date_of_execution: metadata.date_of_execution,
        duration_of_execution: metadata.duration_of_execution,
        metrics: aggregated,
        clusters,
        submission_ids_to_comparison_file_name: index,
    })
}

fn derive_clusters(metrics: &[MetricInput]) -> Result<Vec<Cluster>> {
    let source = metrics
        .iter()
        .find(|input| input.cluster_source)
        .or_else(|| metrics.first());
    let Some(source) = source else {
        return Ok(Vec::new());
    };

    let comparisons: Vec<Comparison> = source.store.sorted_descending().collect();
    build_clusters(&comparisons, source.metric_threshold)
}
