//! Report rendering for aggregated overviews.

use std::fmt::Write;

use serde::Serialize;

use crate::domain::{Cluster, Metric, Overview};

/// Maximum ranked comparisons listed per metric in the Markdown summary.
const MARKDOWN_COMPARISON_LIMIT: usize = 10;

/// Render any serializable report payload as JSON.
///
/// This is the serialization contract: renderers consume exactly the field
/// names and nesting produced here.
pub fn render_json<T: Serialize + ?Sized>(payload: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(payload)
}

/// Render an overview as a Markdown summary.
pub fn render_overview_markdown(overview: &Overview) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# SimScope Report\n");
    append_run_info(&mut output, overview);
    for metric in &overview.metrics {
        append_metric(&mut output, metric);
    }
    append_clusters(&mut output, &overview.clusters);
    output
}

fn append_run_info(output: &mut String, overview: &Overview) {
    let _ = writeln!(output, "- Language: {}", overview.language);
    let _ = writeln!(
        output,
        "- Submission folders: {}",
        overview.submission_folder_path.join(", ")
    );
    if !overview.base_code_folder_path.is_empty() {
        let _ = writeln!(output, "- Base code: {}", overview.base_code_folder_path);
    }
    let _ = writeln!(
        output,
        "- Match sensitivity: {}",
        overview.match_sensitivity
    );
    let _ = writeln!(
        output,
        "- Executed: {} ({}s)",
        overview.date_of_execution, overview.duration_of_execution
    );
    let _ = writeln!(output);
}

fn append_metric(output: &mut String, metric: &Metric) {
    let _ = writeln!(output, "## {}\n", metric.metric_name);
    if !metric.description.is_empty() {
        let _ = writeln!(output, "{}\n", metric.description);
    }
    let _ = writeln!(output, "- Comparisons: {}", metric.comparisons.len());
    let _ = writeln!(output, "- Threshold: {}", metric.metric_threshold);
    let counts: Vec<String> = metric
        .distribution
        .iter()
        .map(|count| count.to_string())
        .collect();
    let _ = writeln!(output, "- Distribution (top range first): {}", counts.join(" "));
    let _ = writeln!(output);

    if metric.comparisons.is_empty() {
        let _ = writeln!(output, "No comparisons recorded.\n");
        return;
    }
    let _ = writeln!(output, "### Top comparisons");
    for comparison in metric.comparisons.iter().take(MARKDOWN_COMPARISON_LIMIT) {
        let _ = writeln!(
            output,
            "- {} / {}: {:.2}%",
            comparison.first_submission_id,
            comparison.second_submission_id,
            comparison.similarity * 100.0
        );
    }
    let _ = writeln!(output);
}

fn append_clusters(output: &mut String, clusters: &[Cluster]) {
    if clusters.is_empty() {
        let _ = writeln!(output, "## Clusters\nNo clusters found.\n");
        return;
    }
    let _ = writeln!(output, "## Clusters");
    for cluster in clusters {
        let members: Vec<&str> = cluster.members.iter().map(String::as_str).collect();
        let _ = writeln!(output, "- {}", members.join(", "));
    }
    let _ = writeln!(output);
}
