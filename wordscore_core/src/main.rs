//! WordScore CLI

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use wordscore_core::{
    load_sheet, score_batch, score_detailed, Config, Response, ScoreError, SheetOptions,
};

#[derive(Parser)]
#[command(name = "wordscore", version, about = "Typo-tolerant keyword accuracy scoring")]
struct Cli {
    /// TOML file with thresholds and sheet column names
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one response against its target keywords
    Score {
        target: String,
        /// Omit to score an unanswered item
        response: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Score every row of a CSV or Excel grading sheet
    Sheet {
        file: PathBuf,
        #[arg(long)]
        target_column: Option<String>,
        #[arg(long)]
        response_column: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Score a few built-in example pairs
    Demo,
}

const DEMO_PAIRS: &[(&str, Option<&str>)] = &[
    ("quick brown fox", Some("quik brwn fx")),
    ("neural network models", Some("neural netwrok modal")),
    ("data science", None),
    ("data science", Some("")),
    ("kitten sitting", Some("sitting kitten")),
];

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("wordscore_core=debug,info")
    } else {
        EnvFilter::new("wordscore_core=info,warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), ScoreError> {
    let config = Config::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Score {
            target,
            response,
            json,
        } => {
            let report = score_detailed(&target, &Response::from(response), &config.thresholds);
            if json {
                println!("{}", to_json(&report)?);
            } else {
                let r = report.result;
                println!("correct={} total={} accuracy={:.1}", r.correct, r.total, r.accuracy);
                println!("{}", report.feedback());
            }
        }
        Commands::Sheet {
            file,
            target_column,
            response_column,
            json,
        } => {
            let options = SheetOptions {
                target_column: target_column.or(config.sheet.target_column),
                response_column: response_column.or(config.sheet.response_column),
            };
            let rows = load_sheet(&file, &options)?;
            let report = score_batch(&rows, &config.thresholds)?;

            if json {
                println!("{}", to_json(&report)?);
            } else {
                for (row, result) in rows.iter().zip(&report.results) {
                    println!(
                        "row {:>4}: {}/{} ({:.1}%)",
                        row.row, result.correct, result.total, result.accuracy
                    );
                }
                let s = report.stats;
                println!(
                    "{} items, {} blank: {}/{} keywords ({:.1}%), mean {:.1}%",
                    s.items,
                    s.blank_responses,
                    s.correct,
                    s.total,
                    s.accuracy_percent,
                    s.mean_accuracy
                );
            }
        }
        Commands::Demo => {
            for (target, response) in DEMO_PAIRS {
                let response_value = Response::from(*response);
                let report = score_detailed(target, &response_value, &config.thresholds);
                let r = report.result;
                println!(
                    "{} | {:?} -> correct={} total={} accuracy={:.1}",
                    target, response, r.correct, r.total, r.accuracy
                );
            }
        }
    }

    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ScoreError> {
    Ok(serde_json::to_string_pretty(value)?)
}
