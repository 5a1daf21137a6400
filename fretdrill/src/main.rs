// Fretdrill CLI entry point.
//
// Prints a tablature exercise for guitar or bass, in a given or random key.
//
// Usage:
//   cargo run -p fretdrill --bin generate -- [--instrument guitar|bass]
//     [--key C#|0-11] [--scale NAME] [--seed N] [--count N] [--json]
//     [--config FILE] [--list-scales]
//
// Logging goes to stderr and is controlled by RUST_LOG (default: warn).

use anyhow::Result;
use clap::Parser;
use fretdrill::scales::{self, ScaleCategory};
use fretdrill::theory::parse_root_key;
use fretdrill::{GeneratedTab, GeneratorConfig, Instrument, RootKey, TabOptions, TabSession};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "generate")]
#[command(about = "Generate a scale-constrained tablature exercise")]
#[command(version)]
struct Cli {
    /// Instrument: guitar or bass
    #[arg(short, long, default_value = "guitar")]
    instrument: Instrument,

    /// Root key as a note name (C, F#, Bb) or a number 0-11 (random if omitted)
    #[arg(short, long)]
    key: Option<String>,

    /// Scale name, e.g. "Dorian" (random if omitted)
    #[arg(short, long)]
    scale: Option<String>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Number of exercises to generate in the same key
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Generator config file (JSON; missing fields use defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// List the known scales and exit
    #[arg(long)]
    list_scales: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    if cli.list_scales {
        print_scales();
        return Ok(());
    }

    if let Some(Err(e)) = cli.key.as_deref().map(parse_root_key) {
        warn!("{e}, using a random key");
    }

    if let Some(name) = cli.scale.as_deref().filter(|n| scales::lookup(n).is_none()) {
        warn!(scale = name, "unknown scale, using {}", scales::DEFAULT_SCALE);
    }

    let config = match &cli.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let options = TabOptions {
        instrument: cli.instrument,
        root: cli.key.map(RootKey::Name),
        scale: cli.scale,
    };
    let mut session = TabSession::with_config(options, config, rng)?;

    let results: Vec<GeneratedTab> = (0..cli.count.max(1))
        .map(|i| {
            if i == 0 {
                session.generate()
            } else {
                session.regenerate()
            }
        })
        .collect();

    if cli.json {
        let json = if results.len() == 1 {
            serde_json::to_string_pretty(&results[0])?
        } else {
            serde_json::to_string_pretty(&results)?
        };
        println!("{json}");
        return Ok(());
    }

    println!("{}", cli.instrument.banner());
    for result in &results {
        println!();
        println!("{}", result.tab);
        println!();
        println!("{}", result.info);
        println!();
        println!("{}", result.flavor);
    }
    Ok(())
}

fn print_scales() {
    for category in ScaleCategory::ALL {
        println!("{}:", category.label());
        for scale in scales::by_category(category) {
            println!("  {}", scale.name);
        }
    }
}
