use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use snake_arcade::app::PlayApp;
use snake_arcade::audio::{AudioSink, Silent, TerminalBell};
use snake_arcade::game::{GameConfig, GameEngine, GameMode, GameSession};
use snake_arcade::storage::JsonFileStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake-arcade")]
#[command(version, about = "Snake with food kinds, power-ups and a maze mode")]
struct Cli {
    /// Game mode for the first game: classic, speed or maze (1/2/3 switch it in game)
    #[arg(long, default_value = "classic")]
    mode: GameMode,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// JSON file with game settings; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for food, power-up and obstacle placement
    #[arg(long)]
    seed: Option<u64>,

    /// Where the high score is kept
    #[arg(long, default_value = "snake_high_score.json")]
    high_score_file: PathBuf,

    /// Write logs to this file (RUST_LOG controls the level)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Ring the terminal bell on power-ups and game over
    #[arg(long)]
    bell: bool,
}

/// The terminal belongs to the game, so logs only go to a file
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {:?}", path))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(width) = cli.width {
        config.grid_width = width;
    }
    if let Some(height) = cli.height {
        config.grid_height = height;
    }
    config.validate().context("Invalid game configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let config = load_config(&cli)?;
    let mode = cli.mode;
    info!(
        ?mode,
        width = config.grid_width,
        height = config.grid_height,
        seed = ?cli.seed,
        "starting snake"
    );

    let engine = match cli.seed {
        Some(seed) => GameEngine::with_seed(config, seed),
        None => GameEngine::new(config),
    };
    let store = JsonFileStore::new(&cli.high_score_file);
    let session = GameSession::new(engine, mode, store).context("Failed to set up the game")?;

    let audio: Box<dyn AudioSink> = if cli.bell {
        Box::new(TerminalBell::new(std::io::stdout()))
    } else {
        Box::new(Silent)
    };

    let mut app = PlayApp::new(session, audio);
    app.run().await?;

    Ok(())
}
