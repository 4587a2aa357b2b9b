//! @ai:module:intent CLI for the behavior test harness
//! @ai:module:layer presentation

use anyhow::{Context, Result};
use behavior_harness::{
    config::{FilterConfig, HarnessConfig, ReportConfig, ReportFormat},
    dataset::SampleTable,
    performer::Performer,
    predictor::{RecordedPredictor, SharedPredictor},
    report::{format_table_colored, ReportGenerator},
    testpack::{PredictionFns, TestPack},
};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

const DEFAULT_CONFIG_FILE: &str = "harness.toml";

#[derive(Parser)]
#[command(name = "behavior-harness")]
#[command(about = "Behavioral test harness for NLP classification models")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        output: PathBuf,
    },

    /// List the behaviors stored in a suite folder
    Inspect {
        /// Folder of behavior records
        #[arg(short, long)]
        suite: Option<PathBuf>,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print every sample of a suite as JSON lines
    Samples {
        /// Folder of behavior records
        #[arg(short, long)]
        suite: Option<PathBuf>,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Score a suite against recorded predictions
    Score {
        /// Folder of behavior records
        #[arg(short, long)]
        suite: Option<PathBuf>,

        /// JSON object mapping sample text to raw prediction
        #[arg(short, long)]
        predictions: PathBuf,

        /// Score spans on location only, ignoring labels
        #[arg(long)]
        binarize: bool,

        /// Filter by capabilities (comma-separated)
        #[arg(long)]
        capabilities: Option<String>,

        /// Filter by behavior names (comma-separated)
        #[arg(long)]
        names: Option<String>,

        /// Output directory for reports
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Generate reports from a saved JSON report
    Report {
        /// Path to results JSON file
        #[arg(short, long)]
        results: PathBuf,

        /// Output directory for reports
        #[arg(short, long, default_value = "reports")]
        output: PathBuf,
    },
}

struct ScoreArgs {
    suite: Option<PathBuf>,
    predictions: PathBuf,
    binarize: bool,
    capabilities: Option<String>,
    names: Option<String>,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("behavior_harness=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { output } => init_config(output),
        Commands::Inspect { suite, config } => inspect_suite(suite, config),
        Commands::Samples { suite, config } => print_samples(suite, config),
        Commands::Score {
            suite,
            predictions,
            binarize,
            capabilities,
            names,
            output,
            config,
        } => score_suite(ScoreArgs {
            suite,
            predictions,
            binarize,
            capabilities,
            names,
            output,
            config,
        }),
        Commands::Report { results, output } => generate_reports(results, output),
    }
}

/// @ai:intent Write the default configuration
/// @ai:effects fs:write
fn init_config(output: PathBuf) -> Result<()> {
    let config = HarnessConfig::default();
    config.save(&output)?;
    println!("Configuration saved to {}", output.display());
    Ok(())
}

/// @ai:intent Load configuration or use defaults
/// @ai:effects fs:read
fn load_or_default_config(path: Option<PathBuf>) -> Result<HarnessConfig> {
    match path {
        Some(p) => HarnessConfig::load(&p),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);

            if default_path.exists() {
                HarnessConfig::load(&default_path)
            } else {
                Ok(HarnessConfig::default())
            }
        }
    }
}

/// @ai:intent List stored behaviors without binding predictors
/// @ai:effects fs:read, io
fn inspect_suite(suite: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_or_default_config(config_path)?;
    let suite = suite.unwrap_or(config.paths.suite_dir);

    let pack = TestPack::from_file(&suite, PredictionFns::Unbound, Performer::default())
        .with_context(|| format!("Failed to load suite: {}", suite.display()))?;

    println!("Behaviors ({}):", pack.behaviors().len());
    println!();
    println!(
        "{:<36} {:<20} {:<22} {:<36} {:>8}",
        "Name", "Capability", "Behavior type", "Task", "Samples"
    );
    println!("{}", "-".repeat(126));

    for behavior in pack.behaviors() {
        println!(
            "{:<36} {:<20} {:<22} {:<36} {:>8}",
            behavior.name,
            behavior.capability,
            behavior.test_type.as_str(),
            behavior.task_type().as_str(),
            behavior.samples().len()
        );
    }

    Ok(())
}

/// @ai:intent Dump the flattened sample table to stdout
/// @ai:effects fs:read, io
fn print_samples(suite: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_or_default_config(config_path)?;
    let suite = suite.unwrap_or(config.paths.suite_dir);

    let table = SampleTable::from_folder(&suite)
        .with_context(|| format!("Failed to load suite: {}", suite.display()))?;
    table.to_json_lines(std::io::stdout().lock())?;

    tracing::info!("Printed {} samples", table.len());
    Ok(())
}

/// @ai:intent Load, run and score a suite, then write the configured reports
/// @ai:effects fs:read, fs:write, io
fn score_suite(args: ScoreArgs) -> Result<()> {
    let config = load_or_default_config(args.config)?;
    let suite = args.suite.unwrap_or_else(|| config.paths.suite_dir.clone());
    let output = args
        .output
        .unwrap_or_else(|| config.paths.results_dir.clone());

    let predictor: SharedPredictor = Arc::new(RecordedPredictor::load(&args.predictions)?);

    let mut performer_config = config.performer.clone();
    performer_config.binarize |= args.binarize;
    let performer = Performer::from_config(&performer_config);

    let mut pack = TestPack::from_file(&suite, predictor, performer)
        .with_context(|| format!("Failed to load suite: {}", suite.display()))?;

    let filter = build_filter(args.capabilities, args.names, &config.report.filter);
    pack.retain_matching(&filter);

    pack.run()?;

    let summary = pack
        .performer()
        .summary()
        .context("Performer produced no result")?;

    println!();
    print!("{}", format_table_colored(&summary.report));
    println!();

    let written = ReportGenerator::new().generate(summary, &config.report, &output)?;
    for path in &written {
        println!("{} {}", "Wrote".green().bold(), path.display());
    }

    Ok(())
}

/// @ai:intent Re-render Markdown and charts from a saved JSON report
/// @ai:effects fs:read, fs:write
fn generate_reports(results_path: PathBuf, output_dir: PathBuf) -> Result<()> {
    let generator = ReportGenerator::new();
    let summary = generator.load(&results_path)?;

    let config = ReportConfig {
        formats: vec![ReportFormat::Markdown, ReportFormat::Chart],
        filter: FilterConfig::default(),
    };
    generator.generate(&summary, &config, &output_dir)?;

    print!("{}", format_table_colored(&summary.report));
    println!("Reports generated in {}", output_dir.display());
    Ok(())
}

/// @ai:intent Build filter from CLI arguments, falling back to the configured one
/// @ai:effects pure
fn build_filter(
    capabilities: Option<String>,
    names: Option<String>,
    configured: &FilterConfig,
) -> FilterConfig {
    if capabilities.is_none() && names.is_none() {
        return configured.clone();
    }

    FilterConfig {
        capabilities: capabilities.map(|s| s.split(',').map(|c| c.trim().to_string()).collect()),
        names: names.map(|s| s.split(',').map(|n| n.trim().to_string()).collect()),
        test_types: configured.test_types.clone(),
    }
}
