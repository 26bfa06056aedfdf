//! # Calibration CLI
//!
//! Batch runner for the post-event validation engine: analyze a single
//! event or a whole season directory, with skip-if-fresh artifact reuse.

mod feeds;

use anyhow::Result;
use artifact_store::{is_stale, ArtifactStore, LocalArtifactStore, MetricAnalysisArtifact};
use calibration_engine::{
    BiasConfig, CalibrationEngine, ClassifierConfig, EventAnalysis, SeasonAggregator,
    SeasonSummary,
};
use clap::{Parser, Subcommand};
use field_model::{MetricCatalog, PlayerPrediction, PlayerResult};
use std::path::PathBuf;
use tracing::info;

/// Post-event validation and weight calibration
#[derive(Parser)]
#[command(name = "calibration-cli")]
#[command(about = "Validate model rankings against tournament results")]
struct Cli {
    /// Directory holding computed analysis artifacts
    #[arg(short, long, default_value = "./calibration_data")]
    store: PathBuf,

    /// Weight template TOML file; builtin templates when omitted
    #[arg(short, long)]
    templates: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one event
    Analyze {
        /// Event name used for artifacts and reports
        #[arg(long)]
        event: String,

        /// Prediction feed JSON
        #[arg(long)]
        predictions: PathBuf,

        /// Result feed JSON
        #[arg(long)]
        results: PathBuf,
    },
    /// Analyze every event in a directory and aggregate the season
    Season {
        /// Directory of <event>.predictions.json / <event>.results.json
        #[arg(long)]
        events: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let templates = feeds::load_templates(cli.templates.as_deref())?;
    let engine = CalibrationEngine::new(
        MetricCatalog::builtin(),
        templates,
        ClassifierConfig::default(),
    );
    let store = LocalArtifactStore::new(&cli.store);
    store.initialize()?;

    match cli.command {
        Commands::Analyze { event, predictions, results } => {
            let predictions = feeds::load_predictions(&predictions)?;
            let (results, modified) = feeds::load_results(&results)?;
            let analysis =
                analyze_with_store(&engine, &store, &event, &predictions, &results, modified)?;
            print_event(&analysis);
        }
        Commands::Season { events } => {
            let mut season = SeasonAggregator::new(BiasConfig::default());
            for files in feeds::discover_events(&events)? {
                let predictions = feeds::load_predictions(&files.predictions)?;
                let (results, modified) = feeds::load_results(&files.results)?;
                let analysis = analyze_with_store(
                    &engine,
                    &store,
                    &files.event,
                    &predictions,
                    &results,
                    modified,
                )?;
                season.add_event(&analysis, &results);
            }
            print_season(&season.finish());
        }
    }

    Ok(())
}

/// Run one event, reusing the stored analyses when they are still fresh
fn analyze_with_store(
    engine: &CalibrationEngine,
    store: &LocalArtifactStore,
    event: &str,
    predictions: &[PlayerPrediction],
    results: &[PlayerResult],
    source_modified: chrono::DateTime<chrono::Utc>,
) -> Result<EventAnalysis> {
    if let Some(artifact) = store.get(event)? {
        if !is_stale(&artifact, source_modified) {
            info!(event, "artifact is fresh, skipping recomputation");
            return Ok(engine.analyze_event_with_analyses(
                event,
                artifact.analyses,
                predictions,
                results,
            )?);
        }
        info!(event, "artifact is stale, recomputing");
    }

    let analysis = engine.analyze_event(event, predictions, results)?;
    store.put(&MetricAnalysisArtifact::new(event, analysis.analyses.clone()))?;
    Ok(analysis)
}

fn print_event(analysis: &EventAnalysis) {
    println!("📊 {}", analysis.event);
    println!("{}", "=".repeat(50));
    println!(
        "Course type: {} ({:?})",
        analysis.classification.course_type, analysis.classification.source
    );
    println!(
        "Rank accuracy: spearman {:.3}, rmse {:.2}, {} matched",
        analysis.rank_accuracy.spearman,
        analysis.rank_accuracy.rmse,
        analysis.rank_accuracy.sample_size
    );
    for hit in &analysis.rank_accuracy.hit_rates {
        println!("  top-{:<3} hit rate: {:.0}%", hit.depth, hit.rate * 100.0);
    }

    println!("\nTop weight adjustments:");
    for rec in analysis.recommendations.iter().take(10) {
        let pct = match rec.pct_change {
            Some(p) => format!("{:+.0}%", p * 100.0),
            None => "N/A".to_string(),
        };
        println!(
            "  {:<28} {:<16} {:.3} -> {:.3} ({})",
            rec.metric,
            rec.group.to_string(),
            rec.template_weight,
            rec.recommended_weight,
            pct
        );
    }

    println!(
        "\nCalibration: top-5 inside 20: {:.0}%, top-10 inside 30: {:.0}%",
        analysis.calibration.top5_inside_top20_rate() * 100.0,
        analysis.calibration.top10_inside_top30_rate() * 100.0
    );
}

fn print_season(summary: &SeasonSummary) {
    println!("🏆 Season summary ({} events)", summary.roster.len());
    println!("{}", "=".repeat(50));
    for line in &summary.roster {
        println!("  {:<32} {}", line.event, line.course_type);
    }

    println!(
        "\nSeason calibration: top-5 inside 20: {:.0}%, top-10 inside 30: {:.0}%",
        summary.calibration.top5_inside_top20_rate() * 100.0,
        summary.calibration.top10_inside_top30_rate() * 100.0
    );

    println!("\nBias trends (most suspicious first):");
    for entry in summary.bias_trends.iter().take(10) {
        println!(
            "  {:<28} {} n={:<4} mean {:+.3} z={:.2}",
            entry.metric, entry.status, entry.sample_count, entry.mean_delta, entry.bias_z
        );
    }

    println!("\nCorrelation summaries by course type:");
    for line in summary.correlation_summaries.iter().take(15) {
        println!(
            "  {:<10} {:<28} {:+.3} over {} event(s)",
            line.course_type.to_string(),
            line.metric,
            line.mean_correlation,
            line.events
        );
    }
}
