use std::io;
use std::panic;
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};

use gridsnake::config::{
    DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_START_LENGTH, DEFAULT_TICK_INTERVAL_MS,
    EngineConfig, GridSize, MIN_TICK_INTERVAL_MS, POINTS_PER_SPEED_LEVEL, THEME_CLASSIC,
    THEME_NEON, THEME_OCEAN, Theme,
};
use gridsnake::engine::{GridSnakeEngine, TickOutcome};
use gridsnake::input::{GameInput, InputHandler};
use gridsnake::renderer::{self, Screen};
use gridsnake::score::ScoreStore;
use gridsnake::terminal_runtime::TerminalSession;
use gridsnake::ui::hud::HudInfo;

#[derive(Debug, Parser)]
#[command(version, about = "Fixed-tick grid snake for the terminal")]
struct Cli {
    /// Board width in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_WIDTH)]
    width: u16,

    /// Board height in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_HEIGHT)]
    height: u16,

    /// Starting snake length in cells.
    #[arg(long, default_value_t = DEFAULT_START_LENGTH)]
    start_length: u16,

    /// Seed for deterministic food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Base tick interval in milliseconds; play speeds up as the score grows.
    #[arg(long, default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    tick_ms: u64,

    /// Color theme.
    #[arg(long, value_enum, default_value_t = ThemeChoice::Classic)]
    theme: ThemeChoice,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum ThemeChoice {
    Classic,
    Ocean,
    Neon,
}

impl ThemeChoice {
    fn theme(self) -> &'static Theme {
        match self {
            Self::Classic => &THEME_CLASSIC,
            Self::Ocean => &THEME_OCEAN,
            Self::Neon => &THEME_NEON,
        }
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    install_panic_hook();

    run(&cli)
}

fn run(cli: &Cli) -> io::Result<()> {
    let config = EngineConfig {
        grid: GridSize {
            width: cli.width,
            height: cli.height,
        },
        start_length: cli.start_length,
    };
    // Reject a bad configuration before the terminal goes raw, so the
    // error lands on a readable screen.
    let mut engine = new_engine(config, cli.seed)?;

    let store = ScoreStore::open_default();
    let mut high_score = match store.load() {
        Ok(score) => score,
        Err(error) => {
            eprintln!("Failed to load high score: {error}");
            0
        }
    };

    let mut session = TerminalSession::enter()?;
    let mut input = InputHandler::new();
    let theme = cli.theme.theme();
    let mut screen = Screen::Start;
    let mut previous_high_score = high_score;
    let mut last_tick = Instant::now();

    loop {
        let speed_level = speed_level(engine.score());
        let info = HudInfo {
            high_score,
            previous_high_score,
            speed_level,
            theme,
        };
        session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &engine, screen, &info))?;

        match input.poll()? {
            Some(GameInput::Quit) => break,
            Some(GameInput::Confirm) => match screen {
                Screen::Start => {
                    screen = Screen::Playing;
                    previous_high_score = high_score;
                    last_tick = Instant::now();
                }
                Screen::Ended => {
                    engine = new_engine(config, cli.seed)?;
                    screen = Screen::Start;
                }
                Screen::Playing | Screen::Paused => {}
            },
            Some(GameInput::Pause) => match screen {
                Screen::Playing => screen = Screen::Paused,
                Screen::Paused => {
                    screen = Screen::Playing;
                    last_tick = Instant::now();
                }
                Screen::Start | Screen::Ended => {}
            },
            Some(GameInput::Direction(direction)) => {
                if screen == Screen::Playing {
                    engine.set_heading(direction);
                }
            }
            None => {}
        }

        if screen == Screen::Playing
            && last_tick.elapsed() >= tick_interval(cli.tick_ms, speed_level)
        {
            match engine.tick() {
                TickOutcome::Collided | TickOutcome::BoardFull => {
                    screen = Screen::Ended;
                    if engine.score() > high_score {
                        high_score = engine.score();
                        if let Err(error) = store.save(high_score) {
                            eprintln!("Failed to save high score: {error}");
                        }
                    }
                }
                TickOutcome::Moved | TickOutcome::AteFood | TickOutcome::GameOver => {}
            }
            last_tick = Instant::now();
        }

        thread::sleep(Duration::from_millis(16));
    }

    Ok(())
}

fn new_engine(config: EngineConfig, seed: Option<u64>) -> io::Result<GridSnakeEngine> {
    let engine = match seed {
        Some(seed) => GridSnakeEngine::with_seed(config, seed),
        None => GridSnakeEngine::new(config),
    };

    engine.map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))
}

fn speed_level(score: u32) -> u32 {
    1 + score / POINTS_PER_SPEED_LEVEL
}

fn tick_interval(base_ms: u64, speed_level: u32) -> Duration {
    let speed_penalty_ms = u64::from(speed_level.saturating_sub(1)) * 10;
    let clamped_ms = base_ms
        .saturating_sub(speed_penalty_ms)
        .max(MIN_TICK_INTERVAL_MS);

    Duration::from_millis(clamped_ms)
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        TerminalSession::restore();
        default_hook(panic_info);
    }));
}
