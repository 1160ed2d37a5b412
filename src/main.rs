//! Stomp - A side-scrolling platformer player controller
//!
//! This is the headless entry point: it loads settings, then drives the player
//! through the built-in demo stages and reports what happened.

mod demo;
mod settings;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use settings::GameSettings;

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    info!("Starting Stomp...");

    let settings = GameSettings::load();
    if std::env::args().any(|arg| arg == "--write-settings") {
        settings.save()?;
    }

    let summary = demo::run(&settings)?;
    info!(
        frames = summary.frames,
        score = summary.score,
        lives_left = summary.lives_left,
        stage = summary.stage,
        deaths = summary.deaths,
        stages_cleared = summary.stages_cleared,
        enemies_defeated = summary.enemies_defeated,
        game_over = summary.game_over,
        "Demo finished"
    );

    Ok(())
}
