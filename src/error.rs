use thiserror::Error;

use crate::food::FoodKind;
use crate::Coord;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid grid: {width}x{height} cells of size {cell_size}, all three must be positive and the board must fit the coordinate range")]
    InvalidGrid { cell_size: Coord, width: Coord, height: Coord },

    #[error("Grid of {width}x{height} cells cannot hold the snake and both food items")]
    GridTooSmall { width: Coord, height: Coord },

    #[error("Growth for {kind} food must be between 1 and {max}, got {value}")]
    InvalidGrowth { kind: FoodKind, value: usize, max: usize },

    #[error("Tick rate must be positive")]
    InvalidTickRate,

    #[error("Terminal is {cols}x{rows}, the board needs at least {needed_cols}x{needed_rows}")]
    TerminalTooSmall { cols: u16, rows: u16, needed_cols: u16, needed_rows: u16 },

    #[error("No free cell left to place food ({occupied} of {total} cells occupied)")]
    NoFreeCell { occupied: usize, total: usize },

    #[error("Terminal error: {0}")]
    Terminal(#[from] crossterm::ErrorKind),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
