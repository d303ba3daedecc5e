use std::collections::HashSet;

use rand::Rng;
use tracing::{debug, info, trace};

use crate::config::Settings;
use crate::error::GameError;
use crate::food::{Food, FoodKind};
use crate::frontend::{Frame, InputEvent, InputSource, Pacer, Renderer};
use crate::grid::Cell;
#[cfg(test)]
use crate::grid::Grid;
use crate::snake::{Direction, Snake};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    Ate(FoodKind),
    Reset,
}

pub struct SnakeGame<R: Rng> {
    settings: Settings,
    snake: Snake,
    primary: Food,
    secondary: Food,
    rng: R,
}

impl<R: Rng> SnakeGame<R> {
    pub fn new(settings: Settings, mut rng: R) -> Result<Self, GameError> {
        let grid = settings.grid;
        let snake = Snake::new(grid.center(), Direction::Right);

        let mut occupied: HashSet<Cell> = snake.cells().iter().copied().collect();
        let primary = Food::spawn(FoodKind::Primary, settings.growth(FoodKind::Primary), &grid, &occupied, &mut rng)?;
        occupied.insert(primary.position());
        let secondary = Food::spawn(FoodKind::Secondary, settings.growth(FoodKind::Secondary), &grid, &occupied, &mut rng)?;

        Ok(SnakeGame { settings, snake, primary, secondary, rng })
    }

    #[cfg(test)]
    pub fn grid(&self) -> &Grid {
        &self.settings.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[cfg(test)]
    pub fn food(&self, kind: FoodKind) -> &Food {
        match kind {
            FoodKind::Primary => &self.primary,
            FoodKind::Secondary => &self.secondary,
        }
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            snake: self.snake.cells(),
            heading: self.snake.heading(),
            primary: &self.primary,
            secondary: &self.secondary,
        }
    }

    /// Runs until the input source reports `Quit`. One tick per pacer wake-up.
    pub fn run<I, D, P>(&mut self, input: &mut I, renderer: &mut D, pacer: &mut P) -> Result<(), GameError>
    where
        I: InputSource,
        D: Renderer,
        P: Pacer,
    {
        renderer.draw(&self.frame())?;

        loop {
            pacer.wait_for_next_tick(self.settings.tick_rate);

            for event in input.poll_events()? {
                match event {
                    InputEvent::Quit => {
                        info!(length = self.snake.len(), "quit requested");
                        return Ok(());
                    }
                    InputEvent::DirectionPressed(dir) => self.snake.set_pending_direction(dir),
                }
            }

            let outcome = self.tick()?;
            let head = self.snake.head();
            trace!(?outcome, x = head.x, y = head.y, length = self.snake.len(), "tick");

            renderer.draw(&self.frame())?;
        }
    }

    /// Advances the game by one step. Input must already be applied through
    /// `Snake::set_pending_direction`.
    pub fn tick(&mut self) -> Result<TickOutcome, GameError> {
        let grid = self.settings.grid;

        self.snake.apply_pending_direction();
        self.snake.move_step(&grid);

        let head = self.snake.head();

        // Primary is checked first, so it wins if both ever share the head cell
        let mut outcome = TickOutcome::Moved;
        if head == self.primary.position() {
            self.eat(FoodKind::Primary)?;
            outcome = TickOutcome::Ate(FoodKind::Primary);
        } else if head == self.secondary.position() {
            self.eat(FoodKind::Secondary)?;
            outcome = TickOutcome::Ate(FoodKind::Secondary);
        }

        self.snake.trim_tail();

        if self.snake.check_self_collision() {
            info!(length = self.snake.len(), "snake ran into itself, resetting");
            self.snake.reset(&mut self.rng);
            outcome = TickOutcome::Reset;
        }

        Ok(outcome)
    }

    fn eat(&mut self, kind: FoodKind) -> Result<(), GameError> {
        let grid = self.settings.grid;
        let mut occupied: HashSet<Cell> = self.snake.cells().iter().copied().collect();

        let (eaten, other) = match kind {
            FoodKind::Primary => (&mut self.primary, &self.secondary),
            FoodKind::Secondary => (&mut self.secondary, &self.primary),
        };
        occupied.insert(other.position());

        self.snake.grow(eaten.growth());
        eaten.relocate(&grid, &occupied, &mut self.rng)?;

        debug!(
            food = %kind,
            target_length = self.snake.target_length(),
            next_x = eaten.position().x,
            next_y = eaten.position().y,
            "food eaten"
        );

        Ok(())
    }
}
