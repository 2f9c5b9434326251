use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use classic_snake::app::App;
use classic_snake::config::{
    DEFAULT_GRID_SIZE, DEFAULT_TICK_INTERVAL_MS, FRAME_INTERVAL, GameConfig, GridSize,
    MIN_TICK_INTERVAL_MS,
};
use classic_snake::error::AppError;
use classic_snake::input::InputMapper;
use classic_snake::logging;
use classic_snake::renderer::Renderer;
use classic_snake::scheduler::SchedulerKind;
use classic_snake::score::{BestScoreStore, JsonFileStore, MemoryStore};
use classic_snake::speed::SpeedPolicy;
use classic_snake::terminal_runtime::{TerminalSession, install_panic_hook};
use crossterm::event;

/// Classic Snake in the terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Tiles per side of the square board.
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
    grid_size: u16,

    /// Tick interval at score zero, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    tick_ms: u64,

    /// Fastest tick interval reached as the score grows, in milliseconds.
    #[arg(long, default_value_t = MIN_TICK_INTERVAL_MS)]
    min_tick_ms: u64,

    /// How ticks are paced against wall time.
    #[arg(long, value_enum, default_value_t = SchedulerKind::Accumulator)]
    scheduler: SchedulerKind,

    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// Best-score file (defaults to the platform data directory).
    #[arg(long, value_name = "PATH", conflicts_with = "no_save")]
    scores_file: Option<PathBuf>,

    /// Keep the best score in memory only.
    #[arg(long)]
    no_save: bool,

    /// Disable mouse capture, and with it drag-to-turn.
    #[arg(long)]
    no_mouse: bool,

    /// Write log output to this file.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Include per-tick debug records in the log.
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig, AppError> {
        let config = GameConfig {
            grid: GridSize::new(self.grid_size),
            speed: SpeedPolicy {
                base: Duration::from_millis(self.tick_ms),
                floor: Duration::from_millis(self.min_tick_ms),
                ..SpeedPolicy::default()
            },
            scheduler: self.scheduler,
            seed: self.seed,
            ..GameConfig::default()
        };
        Ok(config.validate()?)
    }

    fn score_store(&self) -> Result<Box<dyn BestScoreStore>, AppError> {
        if self.no_save {
            return Ok(Box::new(MemoryStore::default()));
        }

        let store = match &self.scores_file {
            Some(path) => JsonFileStore::new(path),
            None => JsonFileStore::at_default_path()?,
        };
        log::info!("best score file: {}", store.path().display());
        Ok(Box::new(store))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{error}");
            eprintln!("classic-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    logging::init(cli.log_file.as_deref(), cli.debug)?;
    let config = cli.game_config()?;
    let store = cli.score_store()?;
    let mut app = App::new(&config, store);

    install_panic_hook();
    let mut session = TerminalSession::enter(!cli.no_mouse)?;
    let mut input = InputMapper::new();
    let mut last_frame = Instant::now();

    loop {
        if event::poll(FRAME_INTERVAL)? {
            let raw = event::read()?;
            if let Some(command) = input.map_event(&raw) {
                app.handle(command);
            }
        }

        if app.should_quit() {
            break;
        }

        let now = Instant::now();
        app.advance(now.duration_since(last_frame));
        last_frame = now;

        session.renderer_mut().render(&app.view())?;
    }

    log::info!("quit with best score {}", app.best());
    Ok(())
}
