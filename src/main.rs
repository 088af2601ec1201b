//! Shuddhi batch runner.
//!
//! Loads a map (or a previous save), optionally scatters dirt, runs the
//! robot for a bounded number of ticks, prints the resulting world, and
//! optionally writes a save file that a later invocation can resume.
//!
//! Usage:
//!   shuddhi --map room.txt --rubbish 40 --seed 7
//!   shuddhi --map run.sav --steps 500 --save run.sav
//!
//! Enable engine logging with RUST_LOG=debug.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use shuddhi_sim::{RunConfig, SimError, Simulation};

/// Discrete cleaning-robot simulation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Map or save file to load; omit to start on an empty floor
    #[arg(short, long)]
    map: Option<PathBuf>,

    /// TOML run configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum number of ticks (overrides config)
    #[arg(long)]
    steps: Option<usize>,

    /// Units of dirt to scatter before running (overrides config)
    #[arg(long)]
    rubbish: Option<usize>,

    /// RNG seed for dirt scattering (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Write the final state to this save file
    #[arg(short, long)]
    save: Option<PathBuf>,
}

fn run(args: Args) -> Result<(), SimError> {
    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    if let Some(steps) = args.steps {
        config.max_steps = steps;
    }
    if let Some(rubbish) = args.rubbish {
        config.rubbish = rubbish;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let mut sim = match &args.map {
        Some(path) => {
            info!("loading {}", path.display());
            Simulation::load_from_path(path)?
        }
        None => Simulation::new(config.width, config.height, config.charger)?,
    };

    if config.rubbish > 0 {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let placed = sim.scatter_rubbish(config.rubbish, &mut rng);
        println!("scattered {} units of dirt", placed);
    }

    let ticks = sim.run(config.max_steps)?;
    println!("ran {} ticks", ticks);
    print!("{}", sim.render());
    println!("dirt remaining: {}", sim.remaining_dirt());

    if let Some(path) = &args.save {
        sim.save_to_path(path)?;
        println!("saved to {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
