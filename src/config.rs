use clap::Parser;

use crate::error::GameError;
use crate::food::FoodKind;
use crate::grid::Grid;
use crate::Coord;

pub const CELL_SIZE: Coord = 20;
pub const GRID_WIDTH: Coord = 32;
pub const GRID_HEIGHT: Coord = 24;
pub const TICK_RATE: u32 = 19;

pub const PRIMARY_GROWTH: usize = 1;
pub const SECONDARY_GROWTH: usize = 2;

pub const LOG_FILE: &str = "wrapsnake.log";

pub type Rgb = (u8, u8, u8);

pub const BACKGROUND_COLOR: Rgb = (10, 10, 10);
pub const BORDER_COLOR: Rgb = (93, 216, 228);
pub const PRIMARY_FOOD_COLOR: Rgb = (250, 0, 0);
pub const SECONDARY_FOOD_COLOR: Rgb = (255, 255, 0);
pub const SNAKE_COLOR: Rgb = (0, 150, 0);

/// Snake on a wrapping grid. Arrow keys or WASD to steer, Esc, q or CTRL+C to quit.
#[derive(Parser, Debug)]
#[command(name = "wrapsnake", version)]
pub struct Args {
    /// Size of one grid cell in screen units
    #[arg(long, default_value_t = CELL_SIZE, allow_negative_numbers = true)]
    pub cell_size: Coord,

    /// Grid width in cells
    #[arg(long, default_value_t = GRID_WIDTH, allow_negative_numbers = true)]
    pub width: Coord,

    /// Grid height in cells
    #[arg(long, default_value_t = GRID_HEIGHT, allow_negative_numbers = true)]
    pub height: Coord,

    /// Game updates per second
    #[arg(long, default_value_t = TICK_RATE)]
    pub tick_rate: u32,

    /// Segments gained from the primary (red) food
    #[arg(long, default_value_t = PRIMARY_GROWTH)]
    pub primary_growth: usize,

    /// Segments gained from the secondary (yellow) food
    #[arg(long, default_value_t = SECONDARY_GROWTH)]
    pub secondary_growth: usize,

    /// Seed for food placement and reset headings
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where to write the log, the terminal is taken by the game
    #[arg(long, default_value = LOG_FILE)]
    pub log_file: String,
}

impl Args {
    pub fn into_settings(self) -> Result<Settings, GameError> {
        let grid = Grid::new(self.cell_size, self.width, self.height)?;
        Settings::new(grid, self.tick_rate, self.primary_growth, self.secondary_growth)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub border: Rgb,
    pub snake: Rgb,
    pub primary: Rgb,
    pub secondary: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            background: BACKGROUND_COLOR,
            border: BORDER_COLOR,
            snake: SNAKE_COLOR,
            primary: PRIMARY_FOOD_COLOR,
            secondary: SECONDARY_FOOD_COLOR,
        }
    }
}

/// Validated startup configuration. Never changes once the game runs.
#[derive(Clone, Debug)]
pub struct Settings {
    pub grid: Grid,
    pub tick_rate: u32,
    pub primary_growth: usize,
    pub secondary_growth: usize,
    pub palette: Palette,
}

impl Settings {
    pub fn new(grid: Grid, tick_rate: u32, primary_growth: usize, secondary_growth: usize) -> Result<Self, GameError> {
        if tick_rate == 0 {
            return Err(GameError::InvalidTickRate);
        }

        // A single meal can never need more cells than the board has
        let max = grid.cell_count();
        for (kind, growth) in [(FoodKind::Primary, primary_growth), (FoodKind::Secondary, secondary_growth)].iter() {
            if *growth == 0 || *growth > max {
                return Err(GameError::InvalidGrowth { kind: *kind, value: *growth, max });
            }
        }

        // The snake and both food items each need a cell of their own
        if grid.cell_count() < 3 {
            return Err(GameError::GridTooSmall { width: grid.width(), height: grid.height() });
        }

        Ok(Settings { grid, tick_rate, primary_growth, secondary_growth, palette: Palette::default() })
    }

    pub fn growth(&self, kind: FoodKind) -> usize {
        match kind {
            FoodKind::Primary => self.primary_growth,
            FoodKind::Secondary => self.secondary_growth,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            grid: Grid::default(),
            tick_rate: TICK_RATE,
            primary_growth: PRIMARY_GROWTH,
            secondary_growth: SECONDARY_GROWTH,
            palette: Palette::default(),
        }
    }
}
