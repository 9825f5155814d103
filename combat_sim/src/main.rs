//! combat_sim - Run a scripted encounter and print the audit trail

use anyhow::{Context, Result};
use clap::Parser;
use combat_core::config::{default_ruleset, load_ruleset};
use combat_sim::{load_encounter, run_encounter_with_rng};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Run a scripted encounter through the combat engine
#[derive(Parser)]
#[command(name = "combat_sim")]
#[command(about = "Resolve a scripted tabletop encounter round by round", long_about = None)]
#[command(version)]
struct Cli {
    /// Encounter file (TOML)
    #[arg(value_name = "ENCOUNTER")]
    encounter: PathBuf,

    /// Ruleset file (defaults to the built-in ruleset)
    #[arg(short, long, value_name = "FILE")]
    ruleset: Option<PathBuf>,

    /// Seed for dice that the encounter does not fix
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// One line per attack
    Summary,
    /// Full report as JSON
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "combat_sim=info,combat_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let ruleset = match &cli.ruleset {
        Some(path) => load_ruleset(path).with_context(|| format!("loading ruleset {}", path.display()))?,
        None => default_ruleset().context("loading built-in ruleset")?,
    };
    let encounter = load_encounter(&cli.encounter)?;

    let mut rng = match cli.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    tracing::info!(encounter = %encounter.name, seed = ?cli.seed, "starting simulation");

    let report = run_encounter_with_rng(&encounter, &ruleset, &mut rng)?;

    match cli.format {
        OutputFormat::Summary => println!("{}", report.summary()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}
