//! Gacha draw tool
//!
//! Usage:
//!   gacha versions                       - List configured versions
//!   gacha rates <VERSION>                - Show offering rates
//!   gacha draw <VERSION> [-n 10]         - Draw items
//!   gacha simulate <VERSION> [-t 100000] - Batch draws vs expected rates
//!
//! Without `--config` the built-in versions are used. `RUST_LOG` controls
//! log output.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use gacha_core::{DrawError, GachaEngine, GachaRegistry, RarityTag, RateTable, presets};

#[derive(Parser)]
#[command(name = "gacha", about = "Gacha draw engine tools")]
struct Cli {
    /// Registry file (.json, .yaml or .yml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured versions
    Versions,
    /// Show offering rates of a version
    Rates {
        version: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Draw items from a version
    Draw {
        version: String,
        /// Number of draws
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
        /// Seed for reproducible draws
        #[arg(short, long)]
        seed: Option<u64>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a batch of draws and compare against expected rates
    Simulate {
        version: String,
        /// Number of draws
        #[arg(short, long, default_value_t = 100_000)]
        trials: u64,
        /// Seed for reproducible runs
        #[arg(short, long)]
        seed: Option<u64>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let registry = load_registry(cli.config.as_deref())?;

    match cli.command {
        Commands::Versions => list_versions(&registry),
        Commands::Rates { version, json } => show_rates(registry, &version, json),
        Commands::Draw {
            version,
            count,
            seed,
            json,
        } => draw(registry, &version, count, seed, json),
        Commands::Simulate {
            version,
            trials,
            seed,
            json,
        } => simulate(registry, &version, trials, seed, json),
    }
}

fn load_registry(path: Option<&Path>) -> Result<GachaRegistry> {
    match path {
        Some(path) => GachaRegistry::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => {
            log::debug!("No config given, using built-in versions");
            Ok(presets::builtin_registry())
        }
    }
}

fn engine_for(registry: GachaRegistry, seed: Option<u64>) -> GachaEngine {
    match seed {
        Some(seed) => GachaEngine::seeded(registry, seed),
        None => GachaEngine::new(registry),
    }
}

fn list_versions(registry: &GachaRegistry) -> Result<()> {
    if registry.is_empty() {
        bail!("No versions configured");
    }

    for (name, config) in registry.iter() {
        println!(
            "{:<12} {:<24} {} categories, {} items (.{})",
            name,
            config.label.as_deref().unwrap_or("-"),
            config.categories.len(),
            config.total_items(),
            config.extension
        );
    }
    Ok(())
}

fn rate_table(registry: &GachaRegistry, version: &str) -> Result<RateTable, DrawError> {
    let config = registry
        .get(version)
        .ok_or_else(|| DrawError::UnknownVersion(version.to_string()))?;
    RateTable::for_version(version, config)
}

fn show_rates(registry: GachaRegistry, version: &str, json: bool) -> Result<()> {
    let rates = rate_table(&registry, version)
        .with_context(|| format!("Failed to compute rates for {}", version))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rates)?);
    } else {
        print!("{}", rates);
    }
    Ok(())
}

fn draw(
    registry: GachaRegistry,
    version: &str,
    count: usize,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let mut engine = engine_for(registry, seed);
    let results = engine
        .draw_many(version, count)
        .with_context(|| format!("Draw from {} failed", version))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    for result in &results {
        println!(
            "{:<4} #{:<4} {:<28} {}",
            result.rarity.code(),
            result.item.id,
            result.item.src,
            result.item.title.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

fn simulate(
    registry: GachaRegistry,
    version: &str,
    trials: u64,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let mut engine = engine_for(registry, seed);
    let rates = engine
        .rates(version)
        .with_context(|| format!("Failed to compute rates for {}", version))?;
    let stats = engine
        .simulate(version, trials)
        .with_context(|| format!("Simulation of {} failed", version))?;
    let chi_square = stats.chi_square(&rates);

    if json {
        let report = serde_json::json!({
            "rates": rates,
            "stats": stats,
            "chi_square": chi_square,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} - {} draws", version, stats.total_draws);
    println!(
        "  {:<18} {:>10} {:>10} {:>10}",
        "rarity", "draws", "observed", "expected"
    );
    for entry in &rates.entries {
        print_row(
            entry.rarity,
            stats.count(entry.rarity),
            stats.observed_rate(entry.rarity),
            entry.share,
        );
    }
    println!(
        "  chi-square: {:.3} (df = {})",
        chi_square,
        rates.entries.len().saturating_sub(1)
    );
    Ok(())
}

fn print_row(rarity: RarityTag, draws: u64, observed: f64, expected: f64) {
    println!(
        "  {:<18} {:>10} {:>9.3}% {:>9.3}%",
        rarity.tag(),
        draws,
        observed * 100.0,
        expected * 100.0
    );
}
