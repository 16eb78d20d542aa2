use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use engine::app::{AppConfig, run_game};
use log::info;
use presence_game::headful::PresenceApp;
use presence_game::scores::ScoreStore;
use presence_game::settings::{SCORES_PATH_ENV, SettingsStore, resolve_scores_path};
use winit::dpi::PhysicalSize;

#[derive(Debug, Parser)]
#[command(name = "presence-gauge")]
#[command(about = "Keep your presence level up until it fills, or watch it drain away")]
struct Cli {
    /// High score file (default: PRESENCE_SCORES_PATH, then settings, then ./high_scores.txt).
    #[arg(long)]
    scores: Option<PathBuf>,
    /// Settings JSON (default: PRESENCE_SETTINGS_PATH, then the user config dir).
    #[arg(long)]
    settings: Option<PathBuf>,
    #[arg(long)]
    fps: Option<u32>,
    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    height: Option<u32>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let store = cli
        .settings
        .map(SettingsStore::at)
        .unwrap_or_else(SettingsStore::from_env);
    info!("settings: {}", store.path().display());
    let mut settings = store.load_or_create();
    if let Some(fps) = cli.fps {
        settings.timing.fps = fps;
    }
    if let Some(width) = cli.width {
        settings.window.width = width;
    }
    if let Some(height) = cli.height {
        settings.window.height = height;
    }
    let settings = settings.sanitized();

    let scores_path = resolve_scores_path(
        cli.scores,
        std::env::var_os(SCORES_PATH_ENV).map(PathBuf::from),
        &settings,
    );
    info!("high scores: {}", scores_path.display());
    let scores = ScoreStore::load(&scores_path)
        .with_context(|| format!("could not load high scores from {}", scores_path.display()))?;

    let config = AppConfig {
        title: "Presence Gauge Game".to_string(),
        desired_size: PhysicalSize::new(settings.window.width, settings.window.height),
        resizable: settings.window.resizable,
        vsync: settings.window.vsync,
        target_fps: settings.timing.fps,
    };
    run_game(config, PresenceApp::new(scores, settings.gameplay))
        .map_err(|err| anyhow!("game window failed: {err}"))
}
