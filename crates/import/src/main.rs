//! Imports a generated training program into the program store.
//!
//! Exercises are matched against the given catalog. The materialized program including all
//! assigned ids is written as JSON.

#![warn(clippy::pedantic)]

use std::{fs, path::PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use futures::executor::block_on;
use log::{LevelFilter, info, warn};
use uuid::Uuid;
use vigor_domain::{MaterializedProgram, MuscleBonus, ProgramImportService, ScoringWeights, Service};
use vigor_storage::{json, memory::InMemory};

#[derive(Parser, Debug)]
#[command(name = "vigor-import")]
#[command(version, about = "Import a generated training program")]
struct Args {
    /// Generated program (JSON document)
    #[arg(long, env = "VIGOR_PROGRAM")]
    program: PathBuf,

    /// Exercise catalog (JSON array)
    #[arg(long, env = "VIGOR_CATALOG")]
    catalog: PathBuf,

    /// Owner of the imported program
    #[arg(long)]
    owner: Uuid,

    /// Output file, stdout if omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Minimum score a catalog exercise needs to be linked
    #[arg(long)]
    min_score: Option<f64>,

    /// Add target muscle bonus on top of primary muscle bonus
    #[arg(long)]
    additive_muscle_bonus: bool,

    #[arg(long, env = "VIGOR_LOG", default_value = "info")]
    log_level: LevelFilter,
}

impl Args {
    fn scoring_weights(&self) -> ScoringWeights {
        let mut weights = ScoringWeights::default();
        if let Some(min_score) = self.min_score {
            weights.acceptance_threshold = min_score;
        }
        if self.additive_muscle_bonus {
            weights.muscle_bonus = MuscleBonus::Additive;
        }
        weights
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level)
        .format_timestamp_secs()
        .try_init()
        .context("failed to initialize logger")?;

    let program = fs::read_to_string(&args.program)
        .with_context(|| format!("failed to read {}", args.program.display()))?;
    let catalog = fs::read_to_string(&args.catalog)
        .with_context(|| format!("failed to read {}", args.catalog.display()))?;

    let materialized = import(&program, &catalog, args.owner, args.scoring_weights())?;
    let output = json::program_to_json(&materialized).context("failed to serialize program")?;

    match &args.output {
        Some(path) => fs::write(path, output + "\n")
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{output}"),
    }

    match unmatched_report(&materialized) {
        Some(report) => warn!("{report}"),
        None => info!("all exercises linked to catalog"),
    }

    Ok(())
}

fn unmatched_report(program: &MaterializedProgram) -> Option<String> {
    let unmatched = program.unmatched_exercises();
    if unmatched.is_empty() {
        return None;
    }
    Some(format!(
        "{} exercises need to be linked manually: {}",
        unmatched.len(),
        unmatched
            .iter()
            .map(|i| i.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    ))
}

fn import(
    program: &str,
    catalog: &str,
    owner: Uuid,
    weights: ScoringWeights,
) -> Result<MaterializedProgram> {
    let program = json::parse_program(program).context("invalid program")?;
    let catalog = json::parse_catalog(catalog).context("invalid catalog")?;
    info!(
        "importing program \"{}\" ({} workouts, {} exercises) against {} catalog exercises",
        program.program_name,
        program.num_workouts(),
        program.num_exercises(),
        catalog.len()
    );

    let service = Service::with_weights(InMemory::with_catalog(catalog), weights);
    block_on(service.import_program(&program, owner.into()))
        .map_err(|err| anyhow!("failed to import program: {err}"))
}
