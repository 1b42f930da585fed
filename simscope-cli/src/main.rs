#![deny(missing_docs)]
//! SimScope command-line interface.
//!
//! Loads raw pairwise comparison data produced by a detection run and
//! aggregates it into the overview report.

mod config;

use clap::{Args, Parser, Subcommand, ValueEnum};
use config::{MetricSpec, RunConfig, load_run_config};
use simscope_core::{
    Cluster, Comparison, ComparisonStore, DEFAULT_BUCKET_COUNT, DashedJsonNamer, MetricInput,
    Overview, build_clusters, build_comparison_file_index, build_overview_with_bucket_count,
    render_json, render_overview_markdown,
};
use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

pub(crate) type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser)]
#[command(name = "simscope", version, about = "SimScope CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct ConfigArgs {
    /// Run configuration file (metadata plus per-metric comparison files).
    #[arg(short, long)]
    config: PathBuf,
}

#[derive(Args, Clone)]
struct OutputArgs {
    /// Output format for report data.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Write the report to a file instead of stdout.
    #[arg(long = "report-output")]
    report_output: Option<PathBuf>,
}

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
enum OutputFormat {
    Text,
    Json,
    Markdown,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate a detection run into an overview report.
    Aggregate {
        #[command(flatten)]
        config: ConfigArgs,
        #[command(flatten)]
        report: OutputArgs,
        /// Number of similarity buckets per metric distribution.
        #[arg(long, default_value_t = DEFAULT_BUCKET_COUNT)]
        bucket_count: usize,
        /// Maximum number of comparison files loaded concurrently.
        #[arg(short = 'j', long, default_value_t = 4)]
        concurrency: usize,
    },
    /// Rebuild submission clusters for one metric.
    Clusters {
        #[command(flatten)]
        config: ConfigArgs,
        #[command(flatten)]
        report: OutputArgs,
        /// Metric to cluster on; defaults to the configured cluster source.
        #[arg(long)]
        metric: Option<String>,
        /// Threshold override; defaults to the metric's configured threshold.
        #[arg(long)]
        threshold: Option<f64>,
    },
}

#[cfg(not(test))]
#[tokio::main]
async fn main() -> CliResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Aggregate {
            config,
            report,
            bucket_count,
            concurrency,
        } => run_aggregate(&config.config, bucket_count, concurrency, &report).await?,
        Commands::Clusters {
            config,
            report,
            metric,
            threshold,
        } => run_clusters(&config.config, metric.as_deref(), threshold, &report).await?,
    }

    Ok(())
}

#[cfg(test)]
fn main() {}

async fn run_aggregate(
    config_path: &Path,
    bucket_count: usize,
    concurrency: usize,
    report: &OutputArgs,
) -> CliResult<()> {
    let config = load_run_config(config_path).await?;
    let comparisons = load_metric_comparisons(config_path, &config.metrics, concurrency).await?;

    let mut inputs = Vec::with_capacity(config.metrics.len());
    for (spec, entries) in config.metrics.iter().zip(comparisons) {
        inputs.push(metric_input(spec, &entries)?);
    }
    log::info!(
        "loaded {} comparison files for {}",
        inputs.len(),
        config_path.display()
    );

    let all_pairs: Vec<Comparison> = inputs
        .iter()
        .flat_map(|input| input.store.sorted_descending())
        .collect();
    let namer = DashedJsonNamer::new();
    let index = build_comparison_file_index(
        all_pairs.iter().map(|comparison| {
            (
                comparison.first_submission_id.as_str(),
                comparison.second_submission_id.as_str(),
            )
        }),
        &namer,
    );

    let overview = build_overview_with_bucket_count(config.metadata, inputs, index, bucket_count)?;
    log::info!(
        "aggregated {} metrics into {} clusters",
        overview.metrics.len(),
        overview.clusters.len()
    );

    let contents = match report.format {
        OutputFormat::Text => render_overview_text(&overview),
        OutputFormat::Markdown => render_overview_markdown(&overview),
        OutputFormat::Json => render_json(&overview)?,
    };
    emit_output(report, contents).await
}

async fn run_clusters(
    config_path: &Path,
    metric: Option<&str>,
    threshold: Option<f64>,
    report: &OutputArgs,
) -> CliResult<()> {
    let config = load_run_config(config_path).await?;
    let spec = select_metric_spec(&config, metric)?;

    let path = RunConfig::resolve_comparison_file(config_path, spec);
    let entries = load_comparison_file(&path).await?;
    let input = metric_input(spec, &entries)?;
    let comparisons: Vec<Comparison> = input.store.sorted_descending().collect();

    let threshold = threshold.unwrap_or(spec.metric_threshold);
    let clusters = build_clusters(&comparisons, threshold)?;
    log::info!(
        "metric {} at threshold {threshold}: {} clusters",
        spec.metric_name,
        clusters.len()
    );

    let contents = match report.format {
        OutputFormat::Text | OutputFormat::Markdown => {
            render_clusters_text(&spec.metric_name, threshold, &clusters)
        }
        OutputFormat::Json => render_json(&clusters)?,
    };
    emit_output(report, contents).await
}

async fn load_metric_comparisons(
    config_path: &Path,
    specs: &[MetricSpec],
    concurrency: usize,
) -> CliResult<Vec<Vec<Comparison>>> {
    let concurrency = if concurrency == 0 { 1 } else { concurrency };
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let mut tasks = JoinSet::new();

    for (position, spec) in specs.iter().enumerate() {
        let path = RunConfig::resolve_comparison_file(config_path, spec);
        let permit = semaphore.clone().acquire_owned().await?;
        tasks.spawn(async move {
            let _permit = permit;
            let entries = load_comparison_file(&path).await?;
            Ok::<_, Box<dyn std::error::Error + Send + Sync>>((position, entries))
        });
    }

    // Per-metric loads are independent; assembly waits on all of them.
    let mut slots: Vec<Option<Vec<Comparison>>> = vec![None; specs.len()];
    while let Some(result) = tasks.join_next().await {
        let (position, entries) = result??;
        log::debug!("loaded {} comparisons for {}", entries.len(), specs[position].metric_name);
        slots[position] = Some(entries);
    }

    Ok(slots.into_iter().map(Option::unwrap_or_default).collect())
}

async fn load_comparison_file(path: &Path) -> CliResult<Vec<Comparison>> {
    let contents = tokio::fs::read_to_string(path).await?;
    let entries: Vec<Comparison> = serde_json::from_str(&contents)?;
    Ok(entries)
}

fn metric_input(spec: &MetricSpec, entries: &[Comparison]) -> CliResult<MetricInput> {
    let mut store = ComparisonStore::new();
    for entry in entries {
        store.add(
            &entry.first_submission_id,
            &entry.second_submission_id,
            entry.similarity,
        )?;
    }
    Ok(MetricInput {
        metric_name: spec.metric_name.clone(),
        description: spec.description.clone(),
        metric_threshold: spec.metric_threshold,
        cluster_source: spec.cluster_source,
        store,
    })
}

fn select_metric_spec<'a>(config: &'a RunConfig, metric: Option<&str>) -> CliResult<&'a MetricSpec> {
    if let Some(name) = metric {
        return config
            .metrics
            .iter()
            .find(|spec| spec.metric_name == name)
            .ok_or_else(|| format!("unknown metric: {name}").into());
    }
    config
        .metrics
        .iter()
        .find(|spec| spec.cluster_source)
        .or_else(|| config.metrics.first())
        .ok_or_else(|| "no metrics configured".into())
}

async fn emit_output(output: &OutputArgs, contents: String) -> CliResult<()> {
    if let Some(path) = &output.report_output {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, contents).await?;
    } else {
        print!("{contents}");
    }
    Ok(())
}

fn render_overview_text(overview: &Overview) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Language: {}", overview.language);
    let _ = writeln!(
        output,
        "Submission folders: {}",
        overview.submission_folder_path.join(", ")
    );
    let _ = writeln!(
        output,
        "Executed: {} ({}s)",
        overview.date_of_execution, overview.duration_of_execution
    );

    for metric in &overview.metrics {
        let _ = writeln!(
            output,
            "Metric {}: {} comparisons, threshold {}",
            metric.metric_name,
            metric.comparisons.len(),
            metric.metric_threshold
        );
        let counts: Vec<String> = metric
            .distribution
            .iter()
            .map(|count| count.to_string())
            .collect();
        let _ = writeln!(output, "  Distribution (top range first): {}", counts.join(" "));
        for comparison in metric.comparisons.iter().take(5) {
            let _ = writeln!(
                output,
                "  - {} / {}: {:.2}%",
                comparison.first_submission_id,
                comparison.second_submission_id,
                comparison.similarity * 100.0
            );
        }
    }

    if overview.clusters.is_empty() {
        let _ = writeln!(output, "Clusters: none");
    } else {
        let _ = writeln!(output, "Clusters:");
        for cluster in &overview.clusters {
            let members: Vec<&str> = cluster.members.iter().map(String::as_str).collect();
            let _ = writeln!(output, "- {}", members.join(", "));
        }
    }
    output
}

fn render_clusters_text(metric_name: &str, threshold: f64, clusters: &[Cluster]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Metric: {metric_name}");
    let _ = writeln!(output, "Threshold: {threshold}");
    if clusters.is_empty() {
        let _ = writeln!(output, "Clusters: none");
        return output;
    }
    let _ = writeln!(output, "Clusters:");
    for cluster in clusters {
        let members: Vec<&str> = cluster.members.iter().map(String::as_str).collect();
        let _ = writeln!(output, "- {}", members.join(", "));
    }
    output
}
