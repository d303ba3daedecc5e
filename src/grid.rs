use crate::config::{CELL_SIZE, GRID_HEIGHT, GRID_WIDTH};
use crate::error::GameError;
use crate::Coord;

/// Top-left corner of one grid cell, in screen units.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: Coord,
    pub y: Coord,
}

impl Cell {
    pub fn new(x: Coord, y: Coord) -> Self {
        Cell { x, y }
    }
}

/// A fixed board of `width` x `height` cells, each `cell_size` units wide.
/// Both axes wrap around.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cell_size: Coord,
    width: Coord,
    height: Coord,
}

impl Grid {
    pub fn new(cell_size: Coord, width: Coord, height: Coord) -> Result<Self, GameError> {
        let invalid = GameError::InvalidGrid { cell_size, width, height };
        if cell_size <= 0 || width <= 0 || height <= 0 {
            return Err(invalid);
        }

        // Screen coordinates, plus one step past either edge, must fit in a Coord
        let fits = |cells: Coord| cells.checked_mul(cell_size).and_then(|span| span.checked_add(cell_size)).is_some();
        if !fits(width) || !fits(height) {
            return Err(invalid);
        }

        Ok(Grid { cell_size, width, height })
    }

    #[cfg(test)]
    pub fn cell_size(&self) -> Coord {
        self.cell_size
    }

    /// Width in cells.
    pub fn width(&self) -> Coord {
        self.width
    }

    /// Height in cells.
    pub fn height(&self) -> Coord {
        self.height
    }

    pub fn pixel_width(&self) -> Coord {
        self.width * self.cell_size
    }

    pub fn pixel_height(&self) -> Coord {
        self.height * self.cell_size
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// The cell the snake starts on, snapped to the grid.
    pub fn center(&self) -> Cell {
        self.cell_at(self.width / 2, self.height / 2)
    }

    /// Cell at the given column and row.
    pub fn cell_at(&self, column: Coord, row: Coord) -> Cell {
        Cell::new(column * self.cell_size, row * self.cell_size)
    }

    pub fn column(&self, cell: Cell) -> Coord {
        cell.x / self.cell_size
    }

    pub fn row(&self, cell: Cell) -> Coord {
        cell.y / self.cell_size
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0
            && cell.x < self.pixel_width() && cell.y < self.pixel_height()
            && cell.x % self.cell_size == 0 && cell.y % self.cell_size == 0
    }

    /// Moves `cell` by `delta` whole cells, wrapping past every edge.
    pub fn wrap(&self, cell: Cell, delta: (Coord, Coord)) -> Cell {
        Cell::new(
            (cell.x + delta.0 * self.cell_size).rem_euclid(self.pixel_width()),
            (cell.y + delta.1 * self.cell_size).rem_euclid(self.pixel_height()),
        )
    }

    /// Every cell of the board exactly once, row by row.
    pub fn all_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).flat_map(move |row| (0..self.width).map(move |column| self.cell_at(column, row)))
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid { cell_size: CELL_SIZE, width: GRID_WIDTH, height: GRID_HEIGHT }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const RIGHT: (Coord, Coord) = (1, 0);
    const LEFT: (Coord, Coord) = (-1, 0);
    const UP: (Coord, Coord) = (0, -1);
    const DOWN: (Coord, Coord) = (0, 1);

    #[test]
    fn wrap_moves_one_cell() {
        let grid = Grid::default();
        let cell = Cell::new(100, 100);

        assert_eq!(grid.wrap(cell, UP), Cell::new(100, 80));
        assert_eq!(grid.wrap(cell, DOWN), Cell::new(100, 120));
        assert_eq!(grid.wrap(cell, LEFT), Cell::new(80, 100));
        assert_eq!(grid.wrap(cell, RIGHT), Cell::new(120, 100));
    }

    #[test]
    fn wrap_around_every_edge() {
        let grid = Grid::default();

        for row in 0..grid.height() {
            let right_edge = grid.cell_at(grid.width() - 1, row);
            let left_edge = grid.cell_at(0, row);
            assert_eq!(grid.wrap(right_edge, RIGHT), left_edge);
            assert_eq!(grid.wrap(left_edge, LEFT), right_edge);
        }

        for column in 0..grid.width() {
            let top_edge = grid.cell_at(column, 0);
            let bottom_edge = grid.cell_at(column, grid.height() - 1);
            assert_eq!(grid.wrap(bottom_edge, DOWN), top_edge);
            assert_eq!(grid.wrap(top_edge, UP), bottom_edge);
        }
    }

    #[test]
    fn wrap_on_single_row() {
        let grid = Grid::new(1, 3, 1).unwrap();

        assert_eq!(grid.wrap(Cell::new(0, 0), UP), Cell::new(0, 0));
        assert_eq!(grid.wrap(Cell::new(0, 0), LEFT), Cell::new(2, 0));
    }

    #[test]
    fn all_cells_enumerates_each_cell_once() {
        let grid = Grid::new(20, 32, 24).unwrap();
        let cells: Vec<Cell> = grid.all_cells().collect();
        let unique: HashSet<Cell> = cells.iter().copied().collect();

        assert_eq!(cells.len(), 32 * 24);
        assert_eq!(unique.len(), cells.len());
        assert!(cells.iter().all(|c| grid.contains(*c)));
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[1], Cell::new(20, 0));
    }

    #[test]
    fn center_is_grid_aligned() {
        assert_eq!(Grid::default().center(), Cell::new(320, 240));
        assert_eq!(Grid::new(10, 5, 3).unwrap().center(), Cell::new(20, 10));
    }

    #[test]
    fn contains_rejects_misaligned_and_outside() {
        let grid = Grid::default();

        assert!(grid.contains(Cell::new(620, 460)));
        assert!(!grid.contains(Cell::new(640, 0)));
        assert!(!grid.contains(Cell::new(0, -20)));
        assert!(!grid.contains(Cell::new(15, 0)));
    }

    #[test]
    fn invalid_dimensions() {
        assert!(Grid::new(0, 10, 10).is_err());
        assert!(Grid::new(20, 0, 10).is_err());
        assert!(Grid::new(20, 10, -1).is_err());
    }

    #[test]
    fn oversized_dimensions() {
        assert!(matches!(Grid::new(1_000_000, 3000, 1), Err(GameError::InvalidGrid { .. })));
        assert!(matches!(Grid::new(1, 1, Coord::MAX), Err(GameError::InvalidGrid { .. })));

        // Largest accepted board still wraps at its far edge
        let grid = Grid::new(1, Coord::MAX - 1, 1).unwrap();
        let edge = grid.cell_at(grid.width() - 1, 0);
        assert_eq!(grid.wrap(edge, (1, 0)), Cell::new(0, 0));
    }
}
