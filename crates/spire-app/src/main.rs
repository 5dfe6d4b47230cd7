//! Command-line tower generator.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p spire-app` to print one tower as RON.
//! Run with `cargo run -p spire-app -- --biome ocean --preset "Coral Spire" --format json`
//! to pick a biome and preset.

mod error;
mod output;

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use spire_config::{CliArgs, Config};
use spire_tower::{BiomeTransition, Tower, TowerBuilder};
use tracing::{info, warn};

use crate::error::AppError;

fn main() -> Result<(), AppError> {
    let args = CliArgs::parse();

    // An explicit --config must load; the default location falls back to defaults
    let mut config = match &args.config {
        Some(dir) => Config::load_or_create(dir)?,
        None => {
            let dir = Config::default_dir().ok_or(AppError::NoConfigDir)?;
            Config::load_or_create(&dir).unwrap_or_else(|e| {
                eprintln!("Failed to load config: {e}, using defaults");
                Config::default()
            })
        }
    };
    config.apply_cli_overrides(&args)?;

    let log_dir = config.debug.log_dir.clone().or_else(|| {
        args.config
            .clone()
            .or_else(Config::default_dir)
            .map(|dir| dir.join("logs"))
    });
    spire_log::init_logging(
        log_dir.as_deref(),
        config.debug.file_logging || cfg!(debug_assertions),
        Some(&config),
    );

    info!(
        biome = %config.scene.current_biome,
        shape = %config.scene.node.shape,
        pattern = %config.scene.tower.stack_pattern,
        min = config.scene.tower.height.min,
        max = config.scene.tower.height.max,
        "Generating tower"
    );

    let transition = transition(&config);
    let mut builder = TowerBuilder::new();
    let tower = match config.debug.seed {
        Some(seed) => {
            info!(seed, "Using fixed seed");
            generate(&mut builder, &config, transition, &mut ChaCha8Rng::seed_from_u64(seed))?
        }
        None => generate(&mut builder, &config, transition, &mut rand::rng())?,
    };

    let text = output::render(&tower, config.output.format, config.output.pretty)?;
    println!("{text}");
    Ok(())
}

/// Builds `output.regenerations` towers in a row and keeps the last one.
fn generate<R: Rng + ?Sized>(
    builder: &mut TowerBuilder,
    config: &Config,
    transition: Option<BiomeTransition>,
    rng: &mut R,
) -> Result<Tower, AppError> {
    let regenerations = config.output.regenerations.max(1);
    let mut tower = builder.build(&config.scene, transition, rng)?;
    for _ in 1..regenerations {
        tower = builder.build(&config.scene, transition, rng)?;
    }

    info!(
        tiers = tower.tier_count(),
        decorations = tower.decoration_count(),
        height = tower.total_height,
        pooled = builder.pool().len(),
        builds = builder.build_count(),
        "Tower ready"
    );
    Ok(tower)
}

fn transition(config: &Config) -> Option<BiomeTransition> {
    let from = config.transition.from?;
    let factor = config.transition.factor;
    if !(0.0..=1.0).contains(&factor) {
        warn!(factor, "Transition factor outside [0, 1], clamping");
    }
    Some(BiomeTransition::new(from, factor.clamp(0.0, 1.0)))
}
