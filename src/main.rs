//! # Dungeon Forge Command Line
//!
//! Loads a template library (and optionally a generator configuration) from
//! JSON, grows a dungeon into an in-memory scene and prints the result.
//!
//! `generate` prints a single layout as JSON. `sweep` runs many seeds in
//! parallel and prints aggregate statistics, which is handy when tuning a
//! library's templates against the retry caps.

use clap::{Parser, Subcommand};
use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;

use dungeon_forge::{DungeonExport, DungeonGenerator, GeneratorConfig, Scene, TemplateLibrary};

#[derive(Parser, Debug)]
#[command(name = "dungeon-forge", about = "Procedural 3D dungeon layouts from prefabricated parts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one dungeon and print it as JSON.
    Generate {
        /// Template library (JSON)
        #[arg(short, long)]
        library: PathBuf,

        /// Generator configuration (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the requested part count
        #[arg(short, long)]
        rooms: Option<usize>,

        /// Override the seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
    /// Generate many dungeons in parallel and print aggregate statistics.
    Sweep {
        /// Template library (JSON)
        #[arg(short, long)]
        library: PathBuf,

        /// Generator configuration (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of runs
        #[arg(short = 'n', long, default_value_t = 100)]
        runs: u64,

        /// First seed; run `i` uses `seed + i`
        #[arg(short, long, default_value_t = 0)]
        seed: u64,
    },
}

#[derive(Debug, Clone, Copy)]
struct RunStats {
    placed: usize,
    abandoned: usize,
    retries: usize,
    fillers: usize,
    connected: bool,
}

#[derive(Debug, Serialize)]
struct SweepSummary {
    runs: usize,
    failed: usize,
    placed_min: usize,
    placed_max: usize,
    placed_mean: f64,
    abandoned_total: usize,
    retries_total: usize,
    fillers_total: usize,
    disconnected: usize,
}

fn load_config(path: Option<&PathBuf>) -> Result<GeneratorConfig, Box<dyn Error>> {
    match path {
        Some(path) => Ok(GeneratorConfig::load(path)?),
        None => Ok(GeneratorConfig::default()),
    }
}

fn generate(library: &TemplateLibrary, config: GeneratorConfig, pretty: bool) -> Result<(), Box<dyn Error>> {
    let mut scene = Scene::new();
    let mut generator = DungeonGenerator::new(config);
    generator.run(library, &mut scene)?;

    let export = DungeonExport::from_scene(generator.layout(), &scene, generator.report());
    println!("{}", export.to_json(pretty)?);
    Ok(())
}

fn sweep(library: &TemplateLibrary, config: GeneratorConfig, runs: u64, seed: u64) -> Result<(), Box<dyn Error>> {
    config.validate(library)?;

    let results: Vec<Option<RunStats>> = (0..runs)
        .into_par_iter()
        .map(|i| {
            let run_seed = seed.wrapping_add(i);
            let mut scene = Scene::new();
            let mut generator = DungeonGenerator::new(config.clone().with_seed(run_seed));
            if let Err(e) = generator.run(library, &mut scene) {
                warn!("Seed {} failed: {}", run_seed, e);
                return None;
            }
            let report = generator.report();
            Some(RunStats {
                placed: report.placed_count(),
                abandoned: report.abandoned_count(),
                retries: report.total_retries(),
                fillers: report.fillers,
                connected: generator.layout().is_connected(),
            })
        })
        .collect();

    let stats: Vec<RunStats> = results.iter().flatten().copied().collect();
    let placed_total: usize = stats.iter().map(|s| s.placed).sum();
    let summary = SweepSummary {
        runs: results.len(),
        failed: results.len() - stats.len(),
        placed_min: stats.iter().map(|s| s.placed).min().unwrap_or(0),
        placed_max: stats.iter().map(|s| s.placed).max().unwrap_or(0),
        placed_mean: if stats.is_empty() {
            0.0
        } else {
            placed_total as f64 / stats.len() as f64
        },
        abandoned_total: stats.iter().map(|s| s.abandoned).sum(),
        retries_total: stats.iter().map(|s| s.retries).sum(),
        fillers_total: stats.iter().map(|s| s.fillers).sum(),
        disconnected: stats.iter().filter(|s| !s.connected).count(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging.
    env_logger::init();
    info!("Dungeon Forge starting...");

    let cli = Cli::parse();
    match cli.command {
        Command::Generate {
            library,
            config,
            rooms,
            seed,
            pretty,
        } => {
            let templates = TemplateLibrary::load(&library)?;
            let mut config = load_config(config.as_ref())?;
            if let Some(rooms) = rooms {
                config = config.with_room_count(rooms);
            }
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            generate(&templates, config, pretty)?;
        }
        Command::Sweep {
            library,
            config,
            runs,
            seed,
        } => {
            let templates = TemplateLibrary::load(&library)?;
            let config = load_config(config.as_ref())?;
            sweep(&templates, config, runs, seed)?;
        }
    }

    info!("Dungeon Forge exiting.");
    Ok(())
}
