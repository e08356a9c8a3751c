//! Command-line and environment configuration for the reveal window.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use reveal_core::config::RevealConfig;

#[derive(Parser, Debug)]
#[command(name = "reveal-view")]
#[command(about = "Full-screen particle reveal that morphs through festive shapes", long_about = None)]
#[command(version)]
pub struct Cli {
    /// JSON file with reveal settings; flags below override it
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of particles in every shape
    #[arg(long, env = "REVEAL_PARTICLES")]
    pub particles: Option<usize>,

    /// Milliseconds spent morphing between two shapes
    #[arg(long, env = "REVEAL_DURATION_MS")]
    pub duration_ms: Option<f64>,

    /// Shape transitions to play before the reveal completes
    #[arg(long, env = "REVEAL_CYCLES")]
    pub cycles: Option<u32>,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Resolves the reveal configuration: defaults, then the config file,
    /// then individual flags.
    pub fn reveal_config(&self) -> Result<RevealConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("failed to parse {}", path.display()))?
            }
            None => RevealConfig::default(),
        };

        if let Some(particles) = self.particles {
            config.particle_count = particles;
        }
        if let Some(duration_ms) = self.duration_ms {
            config.duration_per_shape_ms = duration_ms;
        }
        if let Some(cycles) = self.cycles {
            config.total_cycles = cycles;
        }

        config.validate().context("invalid reveal configuration")?;
        Ok(config)
    }

    pub fn log_level(&self) -> Option<log::LevelFilter> {
        match (self.verbose, self.quiet) {
            (0, false) => None,
            (0, true) => Some(log::LevelFilter::Error),
            (1, _) => Some(log::LevelFilter::Info),
            (2, _) => Some(log::LevelFilter::Debug),
            _ => Some(log::LevelFilter::Trace),
        }
    }
}
