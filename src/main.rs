//! Hoplite Oracle - Command line entry point
//!
//! `validate` replays recorded games through the predictor, `predict`
//! prints every demon response for one state and player move.

use clap::{Parser, Subcommand, ValueEnum};
use hoplite_oracle::core::error::{OracleError, Result};
use hoplite_oracle::core::{config, set_config, OracleConfig};
use hoplite_oracle::game::{GameState, PlayerMove};
use hoplite_oracle::harness::{validate_directory, RecordingReport, ValidationSummary};
use hoplite_oracle::resolution::{predict, Prediction};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Demon move oracle for Hoplite
#[derive(Parser, Debug)]
#[command(name = "hoplite-oracle")]
#[command(about = "Predict demon responses and check them against recorded games")]
struct Cli {
    /// Oracle configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text, global = true)]
    format: Format,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate every <DIR>/*/game.log recording
    Validate {
        dir: PathBuf,

        /// Stop after this many checked turns per recording
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Predict the demons' response to one player move
    Predict {
        /// State code `depth;terrain;status`
        #[arg(long)]
        state: String,

        /// Player move, e.g. `WalkMove(0, -3, 3)`
        #[arg(long = "move")]
        player_move: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

/// JSON output of `validate`
#[derive(Serialize)]
struct ValidationOutput<'a> {
    recordings: &'a [RecordingReport],
    summary: ValidationSummary,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("hoplite_oracle=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Some(path) = &cli.config {
        let loaded = OracleConfig::load(path).map_err(OracleError::Config)?;
        if set_config(loaded).is_err() {
            tracing::warn!("Configuration already initialised, ignoring {}", path.display());
        }
    }
    let config = config();
    config.validate().map_err(OracleError::Config)?;

    match cli.command {
        Command::Validate { dir, limit } => {
            let reports = validate_directory(&dir, limit, config)?;
            print_validation(&reports, cli.format)
        }
        Command::Predict { state, player_move } => {
            let state = GameState::from_code(&state)?;
            let player_move = PlayerMove::parse(&player_move)?;
            let prediction = match predict(&state, &player_move, config) {
                Ok(prediction) => prediction,
                Err(OracleError::CombinationOverflow { limit, partial }) => {
                    tracing::warn!("More than {} combinations, output is partial", limit);
                    *partial
                }
                Err(e) => return Err(e),
            };
            print_prediction(&prediction, cli.format)
        }
    }
}

fn print_validation(reports: &[RecordingReport], format: Format) -> Result<()> {
    let mut summary = ValidationSummary::default();
    for report in reports {
        summary.merge(&report.summary);
    }

    match format {
        Format::Json => {
            let output = ValidationOutput {
                recordings: reports,
                summary,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Format::Text => {
            for report in reports {
                println!("{}", report.path.display());
                for turn in &report.turns {
                    println!(
                        "  turn {:>3} {:<24} {} ({} combinations, {} states){}",
                        turn.turn,
                        turn.player_move,
                        if turn.matched { "ok  " } else { "FAIL" },
                        turn.combinations,
                        turn.predicted_states,
                        if turn.partial { " partial" } else { "" }
                    );
                }
            }
            println!();
            println!(
                "Matched {}/{} turns ({:.1}%), {} skipped",
                summary.matched,
                summary.checked(),
                summary.accuracy() * 100.0,
                summary.skipped
            );
        }
    }
    Ok(())
}

fn print_prediction(prediction: &Prediction, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(prediction)?),
        Format::Text => {
            println!(
                "{} combinations over {} admissible orders",
                prediction.combinations.len(),
                prediction.admissible_orders
            );
            for joint in &prediction.combinations {
                println!("  {}", joint);
            }
            println!("{} resulting states", prediction.states.len());
            for state in &prediction.states {
                println!("  {}", state.terrain.to_code());
            }
        }
    }
    Ok(())
}
