use std::{collections::HashSet, fmt};

use rand::{seq::SliceRandom, Rng};

use crate::error::GameError;
use crate::grid::{Cell, Grid};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FoodKind {
    Primary,
    Secondary,
}

impl fmt::Display for FoodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FoodKind::Primary => write!(f, "primary"),
            FoodKind::Secondary => write!(f, "secondary"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Food {
    kind: FoodKind,
    position: Cell,
    growth: usize,
}

impl Food {
    /// Creates a food item on a random cell outside `occupied`.
    pub fn spawn<R: Rng>(kind: FoodKind, growth: usize, grid: &Grid, occupied: &HashSet<Cell>, rng: &mut R) -> Result<Self, GameError> {
        let position = place_random(grid, occupied, rng)?;
        Ok(Food { kind, position, growth })
    }

    pub fn kind(&self) -> FoodKind {
        self.kind
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    pub fn growth(&self) -> usize {
        self.growth
    }

    pub fn relocate<R: Rng>(&mut self, grid: &Grid, occupied: &HashSet<Cell>, rng: &mut R) -> Result<(), GameError> {
        self.position = place_random(grid, occupied, rng)?;
        Ok(())
    }

    #[cfg(test)]
    pub fn place_at(&mut self, position: Cell) {
        self.position = position;
    }
}

/// Picks a cell uniformly at random among those not in `occupied`.
pub fn place_random<R: Rng>(grid: &Grid, occupied: &HashSet<Cell>, rng: &mut R) -> Result<Cell, GameError> {
    let free: Vec<Cell> = grid.all_cells().filter(|cell| !occupied.contains(cell)).collect();

    free.choose(rng).copied().ok_or(GameError::NoFreeCell {
        occupied: grid.cell_count() - free.len(),
        total: grid.cell_count(),
    })
}
