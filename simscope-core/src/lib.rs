#![deny(missing_docs)]
//! SimScope core library.
//!
//! This crate contains the report aggregation model: it turns raw pairwise
//! similarity comparisons into the immutable overview (distributions, ranked
//! comparisons, clusters) that powers the broader SimScope tooling.

pub mod cluster;
pub mod distribution;
pub mod domain;
pub mod error;
pub mod index;
pub mod overview;
pub mod report;
pub mod store;

pub use cluster::build_clusters;
pub use distribution::{DEFAULT_BUCKET_COUNT, bucket};
pub use domain::{Cluster, Comparison, ComparisonFileIndex, Metric, Overview, RunMetadata};
pub use error::{Result, SimscopeError};
pub use index::{
    ComparisonFileNamer, DashedJsonNamer, build_comparison_file_index, lookup_comparison_file,
    resolves_submission_id,
};
pub use overview::{MetricInput, build_overview, build_overview_with_bucket_count};
pub use report::{render_json, render_overview_markdown};
pub use store::ComparisonStore;
