//! Seams between the game loop and whatever reads keys, draws frames and keeps time.

use std::collections::VecDeque;

use crate::error::GameError;
use crate::food::Food;
use crate::grid::Cell;
use crate::snake::Direction;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    DirectionPressed(Direction),
}

/// Read-only view of the game after a tick completed.
pub struct Frame<'a> {
    pub snake: &'a VecDeque<Cell>,
    pub heading: Direction,
    pub primary: &'a Food,
    pub secondary: &'a Food,
}

pub trait InputSource {
    /// Drains every event received since the last call without blocking.
    fn poll_events(&mut self) -> Result<Vec<InputEvent>, GameError>;
}

pub trait Renderer {
    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), GameError>;
}

pub trait Pacer {
    /// Blocks until the next tick boundary at `rate` ticks per second.
    fn wait_for_next_tick(&mut self, rate: u32);
}
