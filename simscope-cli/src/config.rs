//! Run configuration loading.
//!
//! A run configuration bundles the detection run's metadata with one entry
//! per metric pointing at the raw comparison file the engine produced.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use simscope_core::RunMetadata;

use crate::CliResult;

/// One metric entry of the run configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSpec {
    /// Metric name, unique per run.
    pub metric_name: String,
    /// Human-readable description of the scoring method.
    #[serde(default)]
    pub description: String,
    /// Clustering threshold configured for this metric.
    pub metric_threshold: f64,
    /// Whether this metric seeds clustering.
    #[serde(default)]
    pub cluster_source: bool,
    /// Path to the JSON array of raw comparisons, relative to the
    /// configuration file unless absolute.
    pub comparison_file: PathBuf,
}

/// Parsed run configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    /// Run metadata carried verbatim into the overview.
    #[serde(flatten)]
    pub metadata: RunMetadata,
    /// Per-metric specs; order is display order.
    pub metrics: Vec<MetricSpec>,
}

impl RunConfig {
    /// Resolve a metric's comparison file against the configuration path.
    pub fn resolve_comparison_file(config_path: &Path, spec: &MetricSpec) -> PathBuf {
        if spec.comparison_file.is_absolute() {
            return spec.comparison_file.clone();
        }
        match config_path.parent() {
            Some(parent) => parent.join(&spec.comparison_file),
            None => spec.comparison_file.clone(),
        }
    }
}

/// Load and parse a run configuration file.
pub async fn load_run_config(path: &Path) -> CliResult<RunConfig> {
    let contents = tokio::fs::read_to_string(path).await?;
    let config: RunConfig = serde_json::from_str(&contents)?;
    if config.metrics.is_empty() {
        return Err(format!("no metrics configured in {}", path.display()).into());
    }
    Ok(config)
}
