use ratatui::style::Color;
use thiserror::Error;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Engine start-up parameters.
///
/// Validated once, before the engine is built; a rejected configuration is
/// the only failure the engine ever reports.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct EngineConfig {
    pub grid: GridSize,
    pub start_length: u16,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid: GridSize {
                width: DEFAULT_GRID_WIDTH,
                height: DEFAULT_GRID_HEIGHT,
            },
            start_length: DEFAULT_START_LENGTH,
        }
    }
}

impl EngineConfig {
    /// Creates a configuration with the given grid and the default start length.
    #[must_use]
    pub fn with_grid(width: u16, height: u16) -> Self {
        Self {
            grid: GridSize { width, height },
            ..Self::default()
        }
    }

    /// Checks that a game can actually start from these parameters.
    ///
    /// The snake spawns with its head on the horizontally centered cell and
    /// its tail extending toward the left wall, so the start length is
    /// bounded by the head column; one cell must stay free for food.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let GridSize { width, height } = self.grid;
        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroDimension { width, height });
        }
        if self.start_length == 0 {
            return Err(ConfigError::ZeroStartLength);
        }
        if self.start_length > width / 2 + 1 {
            return Err(ConfigError::StartLengthDoesNotFit {
                start_length: self.start_length,
                width,
            });
        }
        if usize::from(self.start_length) >= self.grid.total_cells() {
            return Err(ConfigError::NoRoomForFood {
                start_length: self.start_length,
                width,
                height,
            });
        }

        Ok(())
    }
}

/// Rejected engine configuration.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: u16, height: u16 },
    #[error("start length must be at least 1")]
    ZeroStartLength,
    #[error(
        "start length {start_length} does not fit between the left wall and \
         the centered head column of a grid {width} cells wide"
    )]
    StartLengthDoesNotFit { start_length: u16, width: u16 },
    #[error("a {width}x{height} grid leaves no free cell for food at start length {start_length}")]
    NoRoomForFood {
        start_length: u16,
        width: u16,
        height: u16,
    },
}

/// A color theme applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub name: &'static str,
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub hud_value: Color,
    pub hud_label: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

/// Green snake on black.
pub const THEME_CLASSIC: Theme = Theme {
    name: "classic",
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    food: Color::Red,
    play_bg: Color::Black,
    border_fg: Color::White,
    hud_value: Color::White,
    hud_label: Color::DarkGray,
    menu_title: Color::Yellow,
    menu_footer: Color::DarkGray,
};

/// Cyan-on-black ocean palette.
pub const THEME_OCEAN: Theme = Theme {
    name: "ocean",
    snake_head: Color::White,
    snake_body: Color::Cyan,
    food: Color::Yellow,
    play_bg: Color::Black,
    border_fg: Color::Cyan,
    hud_value: Color::Cyan,
    hud_label: Color::DarkGray,
    menu_title: Color::Cyan,
    menu_footer: Color::DarkGray,
};

/// Magenta/yellow neon palette.
pub const THEME_NEON: Theme = Theme {
    name: "neon",
    snake_head: Color::White,
    snake_body: Color::Magenta,
    food: Color::Yellow,
    play_bg: Color::Black,
    border_fg: Color::Magenta,
    hud_value: Color::Magenta,
    hud_label: Color::DarkGray,
    menu_title: Color::Magenta,
    menu_footer: Color::DarkGray,
};

/// Default grid width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 20;

/// Default grid height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Default snake start length in cells.
pub const DEFAULT_START_LENGTH: u16 = 3;

/// Base tick interval in milliseconds (5 ticks per second).
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 200;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 60;

/// Score needed per speed level increase.
pub const POINTS_PER_SPEED_LEVEL: u32 = 10;
