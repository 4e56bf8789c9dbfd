use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use epi_risk::algorithm::summary::{self, DEFAULT_COMPARISON_TOP, DatasetSummary};
use epi_risk::utils::logging::console::{format_risk_table, format_summary};
use epi_risk::utils::logging::{create_main_progress_bar, create_spinner, finish_progress_bar};
use epi_risk::{
    EventRecord, MalformedRowPolicy, PipelineOutcome, RiskConfig, RiskPipeline, Scope,
    read_event_records_async, write_risk_table_json, write_risk_table_parquet,
};
use log::info;

#[derive(Parser, Debug)]
#[command(name = "epi-risk")]
#[command(about = "Epidemiological Risk Index scoring for admission and death records", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score and rank causes by IRE
    Score {
        /// Parquet event table
        input: PathBuf,

        /// Restrict scoring to one city
        #[arg(long, conflicts_with_all = ["all_cities", "per_city"])]
        city: Option<String>,

        /// Score the whole dataset as one scope, overriding a configured city
        #[arg(long)]
        all_cities: bool,

        /// Score every city separately
        #[arg(long, conflicts_with_all = ["all_cities", "output"])]
        per_city: bool,

        /// Number of ranked causes to show
        #[arg(long = "top", visible_alias = "head")]
        top: Option<usize>,

        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the full risk table; `.json` writes JSON, anything else Parquet
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Fail on the first malformed row instead of dropping it
        #[arg(long)]
        strict: bool,
    },
    /// List the cities in an event table
    Cities {
        /// Parquet event table
        input: PathBuf,
    },
    /// Show event totals and leading causes
    Summary {
        /// Parquet event table
        input: PathBuf,

        /// Restrict the summary to one city
        #[arg(long)]
        city: Option<String>,

        /// Number of leading causes per event type
        #[arg(long = "top", default_value = "10")]
        top: usize,

        /// Number of leading causes compared across cities
        #[arg(long, default_value_t = DEFAULT_COMPARISON_TOP)]
        compare_top: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Score {
            input,
            city,
            all_cities,
            per_city,
            top,
            config,
            output,
            json,
            strict,
        } => {
            let config = match config {
                Some(path) => RiskConfig::from_json_file(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => RiskConfig::default(),
            };
            let config = ScoreOverrides {
                city,
                all_cities,
                top,
                strict,
            }
            .apply(config);

            let records = load_records(&input, config.malformed_rows).await?;
            let pipeline = RiskPipeline::new(config).context("Invalid configuration")?;

            if per_city {
                let outcomes = score_per_city(&pipeline, &records);
                print_outcomes(&outcomes, json)?;
            } else {
                let outcome = pipeline.run(&records);
                if let Some(path) = output {
                    write_table(&path, &outcome)?;
                }
                print_outcomes(std::slice::from_ref(&outcome), json)?;
            }
        }
        Commands::Cities { input } => {
            let records = load_records(&input, MalformedRowPolicy::Drop).await?;
            for city in summary::cities(&records) {
                println!("{city}");
            }
        }
        Commands::Summary {
            input,
            city,
            top,
            compare_top,
        } => {
            let records = load_records(&input, MalformedRowPolicy::Drop).await?;
            let scope = city.map_or(Scope::AllCities, Scope::City);
            let summary = DatasetSummary::new(&records, scope, top, compare_top);
            println!("{}", format_summary(&summary));
        }
    }

    Ok(())
}

/// Command-line settings that take precedence over the config file
#[derive(Debug, Default)]
struct ScoreOverrides {
    city: Option<String>,
    all_cities: bool,
    top: Option<usize>,
    strict: bool,
}

impl ScoreOverrides {
    fn apply(self, mut config: RiskConfig) -> RiskConfig {
        if let Some(city) = self.city {
            config = config.with_city(city);
        }
        if self.all_cities {
            config = config.with_scope(Scope::AllCities);
        }
        if let Some(top) = self.top {
            config = config.with_top_n(top);
        }
        if self.strict {
            config = config.with_malformed_rows(MalformedRowPolicy::Reject);
        }
        config
    }
}

async fn load_records(input: &Path, policy: MalformedRowPolicy) -> Result<Vec<EventRecord>> {
    let spinner = create_spinner(Some("Reading event table"));
    let dataset = read_event_records_async(input, policy).await;
    spinner.finish_and_clear();
    let dataset =
        dataset.with_context(|| format!("Failed to read event table {}", input.display()))?;
    info!(
        "{} of {} rows usable",
        dataset.report.rows_kept(),
        dataset.report.rows_read
    );
    Ok(dataset.records)
}

fn score_per_city(pipeline: &RiskPipeline, records: &[EventRecord]) -> Vec<PipelineOutcome> {
    let pb = create_main_progress_bar(0, Some("Scoring cities"));
    let outcomes = pipeline.score_all_scopes_with_progress(records, &pb);
    finish_progress_bar(&pb, Some("All cities scored"));
    outcomes
}

fn write_table(path: &Path, outcome: &PipelineOutcome) -> Result<()> {
    let written = if path.extension().is_some_and(|ext| ext == "json") {
        write_risk_table_json(path, &outcome.table)
    } else {
        write_risk_table_parquet(path, &outcome.table)
    };
    written.with_context(|| format!("Failed to write risk table {}", path.display()))
}

fn print_outcomes(outcomes: &[PipelineOutcome], json: bool) -> Result<()> {
    if json {
        let ranked: Vec<_> = outcomes
            .iter()
            .map(|o| {
                serde_json::json!({
                    "scope": o.scope,
                    "top": o.top(),
                    "dropped_death_only": o.dropped_death_only,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&ranked)?);
        return Ok(());
    }

    for outcome in outcomes {
        println!("{}", format_risk_table(outcome, outcome.top_n()));
    }
    Ok(())
}
