//! Weathered Chaos
//!
//! A headless run of the generative installation: a population of chaotic
//! double pendulums modulated by the weather, sonified through crossing
//! detection. Notes are written as JSON lines to stdout; an external
//! transport turns them into sound.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use conductor::{
    default_config_toml, display, FixtureProvider, Installation, InstallationConfig, JsonlSink,
};

/// Command line arguments for the installation
#[derive(Parser, Debug)]
#[command(name = "weathered_chaos")]
#[command(about = "A weather-driven chaotic pendulum installation")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of frames to run (runs forever when omitted)
    #[arg(long)]
    frames: Option<u64>,

    /// Override the random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the weather location
    #[arg(long)]
    location: Option<String>,

    /// Print the default configuration file and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", default_config_toml());
        return ExitCode::SUCCESS;
    }

    let mut config = match &args.config {
        Some(path) => match InstallationConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => InstallationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.simulation.seed = seed;
    }
    if let Some(location) = args.location {
        config.weather.location = location;
    }

    println!("Weathered Chaos");
    println!("===============");
    println!("Location: {}", config.weather.location);
    println!("Pendulums: {}", config.simulation.pendulum_count);
    println!("Seed: {}", config.simulation.seed);
    println!();

    let provider = Box::new(FixtureProvider::with_defaults());
    let mut installation = match Installation::new(config, provider) {
        Ok(installation) => installation,
        Err(e) => {
            eprintln!("Error setting up installation: {}", e);
            return ExitCode::FAILURE;
        }
    };

    installation.refresh_weather();
    let snapshot = installation.state().snapshot();
    println!("{}", display::location_weather_text(&snapshot));
    println!("{}", display::gravity_text(&snapshot));
    println!("{}", display::music_text(&snapshot));
    println!();

    let mut sink = JsonlSink::new(std::io::stdout());
    installation.run(&mut sink, args.frames);

    println!();
    println!("Ran {} frames.", installation.frame_count());
    ExitCode::SUCCESS
}
