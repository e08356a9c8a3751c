//! Application entry point for the particle reveal window.
//!
//! This binary parses configuration, sets up logging and eframe/egui, and
//! delegates all interactive logic and rendering to [`Viewer`].

mod backend;
mod cli;
mod glow;
mod viewer;

use anyhow::Result;
use clap::Parser;

use cli::Cli;
use viewer::Viewer;

/// Starts the native eframe application.
///
/// ### Returns
/// - `Ok(())` if the window runs to completion without errors.
/// - `Err` if the configuration is invalid or eframe fails to create the
///   native window or event loop.
fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = cli.log_level() {
        logger.filter_level(level);
    }
    logger.init();

    let config = cli.reveal_config()?;
    log::info!("reveal configuration: {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Gift Reveal")
            .with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Gift Reveal",
        options,
        Box::new(move |_cc| Ok(Box::new(Viewer::new(config)))),
    )
    .map_err(|err| anyhow::anyhow!("viewer failed: {err}"))
}
