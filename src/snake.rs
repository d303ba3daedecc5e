use std::collections::VecDeque;

use rand::{seq::SliceRandom, Rng};

use crate::grid::{Cell, Grid};
use crate::Coord;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub const ALL: [Direction; 4] = [Up, Down, Left, Right];

    pub fn delta(self) -> (Coord, Coord) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn random<R: Rng>(rng: &mut R) -> Direction {
        *Self::ALL.choose(rng).unwrap_or(&Right)
    }
}

pub struct Snake {
    // Head first
    cells: VecDeque<Cell>,
    heading: Direction,
    pending: Option<Direction>,
    target_length: usize,
    start: Cell,
}

impl Snake {
    pub fn new(start: Cell, heading: Direction) -> Self {
        Snake { cells: VecDeque::from(vec![start]), heading, pending: None, target_length: 1, start }
    }

    /// Builds a snake with an arbitrary body, `cells` given head first.
    #[cfg(test)]
    pub fn with_body(cells: Vec<Cell>, heading: Direction, start: Cell) -> Self {
        let target_length = cells.len();
        Snake { cells: cells.into(), heading, pending: None, target_length, start }
    }

    pub fn cells(&self) -> &VecDeque<Cell> {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn head(&self) -> Cell {
        // The body is never empty: it is created and reset with one cell and
        // trimming never goes below target_length >= 1
        self.cells[0]
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    #[cfg(test)]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending
    }

    pub fn target_length(&self) -> usize {
        self.target_length
    }

    /// Queues a heading change for the next move. Reversing onto the body is ignored.
    pub fn set_pending_direction(&mut self, new_direction: Direction) {
        if new_direction != self.heading.opposite() {
            self.pending = Some(new_direction);
        }
    }

    pub fn apply_pending_direction(&mut self) {
        if let Some(dir) = self.pending.take() {
            self.heading = dir;
        }
    }

    /// Pushes a new head one cell ahead. The tail is left in place.
    pub fn move_step(&mut self, grid: &Grid) {
        let new_head = grid.wrap(self.head(), self.heading.delta());
        debug_assert!(grid.contains(new_head));
        self.cells.push_front(new_head);
    }

    pub fn grow(&mut self, amount: usize) {
        self.target_length = self.target_length.saturating_add(amount);
    }

    pub fn trim_tail(&mut self) {
        while self.cells.len() > self.target_length {
            self.cells.pop_back();
        }
    }

    pub fn check_self_collision(&self) -> bool {
        let head = self.head();
        self.cells.iter().skip(1).any(|cell| *cell == head)
    }

    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.target_length = 1;
        self.cells.clear();
        self.cells.push_back(self.start);
        self.heading = Direction::random(rng);
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    #[test]
    fn opposites_negate_each_other() {
        for dir in Direction::ALL.iter() {
            let (dx, dy) = dir.delta();
            assert_eq!(dir.opposite().delta(), (-dx, -dy));
            assert_eq!(dir.opposite().opposite(), *dir);
        }
    }

    #[test]
    fn reverse_direction_is_ignored() {
        let grid = Grid::default();

        for heading in Direction::ALL.iter() {
            let mut snake = Snake::new(grid.center(), *heading);
            snake.set_pending_direction(heading.opposite());
            snake.apply_pending_direction();

            assert_eq!(snake.heading(), *heading);
            assert_eq!(snake.pending_direction(), None);
        }
    }

    #[test]
    fn last_pending_direction_wins() {
        let mut snake = Snake::new(Grid::default().center(), Right);
        snake.set_pending_direction(Up);
        snake.set_pending_direction(Down);
        snake.apply_pending_direction();

        assert_eq!(snake.heading(), Down);
    }

    #[test]
    fn pending_direction_is_applied_once() {
        let mut snake = Snake::new(Grid::default().center(), Right);
        snake.set_pending_direction(Up);
        snake.apply_pending_direction();
        assert_eq!(snake.pending_direction(), None);

        snake.set_pending_direction(Left);
        snake.apply_pending_direction();
        assert_eq!(snake.heading(), Left);
    }

    #[test]
    fn move_step_keeps_the_tail() {
        let grid = Grid::default();
        let mut snake = Snake::new(grid.center(), Right);
        snake.move_step(&grid);

        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), Cell::new(340, 240));
        assert_eq!(snake.cells()[1], Cell::new(320, 240));

        snake.trim_tail();
        assert_eq!(snake.cells().iter().copied().collect::<Vec<_>>(), vec![Cell::new(340, 240)]);
    }

    #[test]
    fn move_step_wraps() {
        let grid = Grid::default();
        let mut snake = Snake::new(Cell::new(620, 0), Right);
        snake.move_step(&grid);
        assert_eq!(snake.head(), Cell::new(0, 0));

        let mut snake = Snake::new(Cell::new(0, 0), Up);
        snake.move_step(&grid);
        assert_eq!(snake.head(), Cell::new(0, 460));
    }

    #[test]
    fn growth_delays_trimming() {
        let grid = Grid::default();
        let mut snake = Snake::new(grid.center(), Right);
        snake.grow(2);

        for expected in 2..=3 {
            snake.move_step(&grid);
            snake.trim_tail();
            assert_eq!(snake.len(), expected);
        }

        snake.move_step(&grid);
        snake.trim_tail();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.target_length(), 3);
    }

    #[test]
    fn grow_saturates() {
        let mut snake = Snake::new(Grid::default().center(), Right);
        snake.grow(usize::MAX);
        snake.grow(2);

        assert_eq!(snake.target_length(), usize::MAX);
    }

    #[test]
    fn trim_tail_handles_large_steps() {
        let grid = Grid::default();
        let mut snake = Snake::with_body((0..6).map(|i| grid.cell_at(i, 0)).collect(), Left, grid.cell_at(0, 0));
        snake.target_length = 2;
        snake.trim_tail();

        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), grid.cell_at(0, 0));
    }

    #[test]
    fn self_collision_detection() {
        let grid = Grid::default();
        let body = vec![grid.cell_at(1, 1), grid.cell_at(2, 1), grid.cell_at(2, 2), grid.cell_at(1, 2)];
        let mut snake = Snake::with_body(body, Down, grid.center());
        assert!(!snake.check_self_collision());

        snake.move_step(&grid);
        assert!(snake.check_self_collision());
    }

    #[test]
    fn reset_returns_to_start() {
        let grid = Grid::default();
        let mut rng = create_test_rng();
        let body = (0..5).map(|i| grid.cell_at(i, 3)).collect();
        let mut snake = Snake::with_body(body, Left, grid.center());
        snake.set_pending_direction(Up);

        snake.reset(&mut rng);

        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), grid.center());
        assert_eq!(snake.target_length(), 1);
        assert_eq!(snake.pending_direction(), None);
    }

    #[test]
    fn reset_heading_covers_all_directions() {
        let mut rng = create_test_rng();
        let mut snake = Snake::new(Grid::default().center(), Right);

        let mut seen = HashSet::new();
        for _ in 0..200 {
            snake.reset(&mut rng);
            seen.insert(snake.heading());
        }

        assert_eq!(seen.len(), 4);
    }
}
