use std::{io::{Stdout, Write, stdout}, thread::sleep, time::{Duration, Instant}};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, read, poll};
use crossterm::style::Color;

use crate::config::{Palette, Rgb};
use crate::error::GameError;
use crate::food::FoodKind;
use crate::frontend::{Frame, InputEvent, InputSource, Pacer, Renderer};
use crate::grid::{Cell, Grid};
use crate::snake::Direction;

type TermPos = (u16, u16);

// Every board cell is two terminal columns wide so the board looks square
const CELL_COLUMNS: u16 = 2;
const BODY_GLYPH: &str = "██";
const FOOD_GLYPH: &str = "▓▓";
const EMPTY_GLYPH: &str = "  ";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Glyph {
    Empty,
    Body,
    Head(char),
    Food(FoodKind),
}

pub struct TermRenderer {
    grid: Grid,
    palette: Palette,
    stdout: Stdout,
    // What is currently on screen for each board cell, None if unknown
    screen: Vec<Option<Glyph>>,
    shown_length: Option<usize>,
}

impl TermRenderer {
    pub fn new(grid: Grid, palette: Palette) -> Result<Self, GameError> {
        let (cols, rows) = terminal::size()?;
        let needed_cols = grid.width() as i64 * CELL_COLUMNS as i64 + 2;
        // Border on both sides plus one status line
        let needed_rows = grid.height() as i64 + 3;

        if needed_cols > cols as i64 || needed_rows > rows as i64 {
            return Err(GameError::TerminalTooSmall {
                cols,
                rows,
                needed_cols: needed_cols.min(u16::MAX as i64) as u16,
                needed_rows: needed_rows.min(u16::MAX as i64) as u16,
            });
        }

        let screen = vec![None; grid.cell_count()];
        Ok(TermRenderer { grid, palette, stdout: stdout(), screen, shown_length: None })
    }

    pub fn setup(&mut self) -> Result<(), GameError> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;

        self.clear()?;
        self.draw_borders()?;
        self.flush()
    }

    pub fn restore(&mut self) -> Result<(), GameError> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn clear(&mut self) -> Result<(), GameError> {
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        self.screen.iter_mut().for_each(|g| *g = None);
        self.shown_length = None;
        Ok(())
    }

    fn draw_borders(&mut self) -> Result<(), GameError> {
        let width = self.grid.width() as u16 * CELL_COLUMNS + 2;
        let height = self.grid.height() as u16 + 2;
        let (end_x, end_y) = (width - 1, height - 1);
        let border = color(self.palette.border);

        queue!(self.stdout, style::SetForegroundColor(border), style::SetBackgroundColor(Color::Reset))?;

        for x in 0..width {
            let ch = if x == 0 || x == end_x {'+'} else {'-'};
            self.print_at((x, 0), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in 1..end_y {
            self.print_at((0, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }

        Ok(())
    }

    fn draw_status(&mut self, length: usize) -> Result<(), GameError> {
        let line = format!("Length: {:<6} Arrows/WASD to steer, Esc to quit", length);
        let y = self.grid.height() as u16 + 2;
        let border = color(self.palette.border);

        queue!(
            self.stdout,
            cursor::MoveTo(0, y),
            style::SetForegroundColor(border),
            style::SetBackgroundColor(Color::Reset),
            style::Print(line)
        )?;
        self.shown_length = Some(length);
        Ok(())
    }

    fn print_at(&mut self, pos: TermPos, ch: char) -> Result<(), GameError> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))?;
        Ok(())
    }

    fn print_glyph(&mut self, column: u16, row: u16, glyph: Glyph) -> Result<(), GameError> {
        let head;
        let (fg, text) = match glyph {
            Glyph::Empty => (self.palette.background, EMPTY_GLYPH),
            Glyph::Body => (self.palette.snake, BODY_GLYPH),
            Glyph::Head(ch) => {
                head = format!("{}{}", ch, ch);
                (self.palette.snake, head.as_str())
            }
            Glyph::Food(FoodKind::Primary) => (self.palette.primary, FOOD_GLYPH),
            Glyph::Food(FoodKind::Secondary) => (self.palette.secondary, FOOD_GLYPH),
        };
        let (fg, bg) = (color(fg), color(self.palette.background));

        queue!(
            self.stdout,
            cursor::MoveTo(1 + column * CELL_COLUMNS, 1 + row),
            style::SetForegroundColor(fg),
            style::SetBackgroundColor(bg),
            style::Print(text)
        )?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), GameError> {
        self.stdout.flush()?;
        Ok(())
    }
}

impl Renderer for TermRenderer {
    /// Only cells that changed since the previous frame are printed.
    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), GameError> {
        let next = compose(&self.grid, frame);
        let width = self.grid.width() as usize;

        for (i, glyph) in next.into_iter().enumerate() {
            if self.screen[i] != Some(glyph) {
                self.print_glyph((i % width) as u16, (i / width) as u16, glyph)?;
                self.screen[i] = Some(glyph);
            }
        }

        if self.shown_length != Some(frame.snake.len()) {
            self.draw_status(frame.snake.len())?;
        }

        self.flush()
    }
}

/// Lays the frame out as one glyph per board cell, row by row. The snake is
/// drawn over food.
fn compose(grid: &Grid, frame: &Frame<'_>) -> Vec<Glyph> {
    let mut glyphs = vec![Glyph::Empty; grid.cell_count()];
    let index = |cell: Cell| grid.row(cell) as usize * grid.width() as usize + grid.column(cell) as usize;

    for food in [frame.primary, frame.secondary].iter() {
        glyphs[index(food.position())] = Glyph::Food(food.kind());
    }

    for cell in frame.snake.iter().skip(1) {
        glyphs[index(*cell)] = Glyph::Body;
    }

    if let Some(head) = frame.snake.front() {
        glyphs[index(*head)] = Glyph::Head(head_char(frame.heading));
    }

    glyphs
}

fn head_char(heading: Direction) -> char {
    match heading {
        Direction::Up => '^',
        Direction::Down => 'v',
        Direction::Left => '<',
        Direction::Right => '>',
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb { r: rgb.0, g: rgb.1, b: rgb.2 }
}

/// Keyboard input from the terminal, read without blocking.
pub struct TermInput;

impl InputSource for TermInput {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>, GameError> {
        let mut events = vec![];

        while poll(Duration::from_millis(0))? {
            if let Event::Key(ev) = read()? {
                events.extend(map_key(&ev));
            }
        }

        Ok(events)
    }
}

fn map_key(ev: &KeyEvent) -> Option<InputEvent> {
    if is_ctrl_c(ev) {
        return Some(InputEvent::Quit);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Some(InputEvent::DirectionPressed(Direction::Up)),
        KeyCode::Char('a') | KeyCode::Left => Some(InputEvent::DirectionPressed(Direction::Left)),
        KeyCode::Char('s') | KeyCode::Down => Some(InputEvent::DirectionPressed(Direction::Down)),
        KeyCode::Char('d') | KeyCode::Right => Some(InputEvent::DirectionPressed(Direction::Right)),
        KeyCode::Esc | KeyCode::Char('q') => Some(InputEvent::Quit),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}

/// Sleeps until the next tick deadline. Deadlines that were already missed
/// are not caught up on.
pub struct SleepPacer {
    next: Option<Instant>,
}

impl SleepPacer {
    pub fn new() -> Self {
        SleepPacer { next: None }
    }
}

impl Pacer for SleepPacer {
    fn wait_for_next_tick(&mut self, rate: u32) {
        let interval = Duration::from_secs(1) / rate.max(1);
        let now = Instant::now();
        let deadline = self.next.unwrap_or(now) + interval;

        if deadline > now {
            sleep(deadline - now);
            self.next = Some(deadline);
        } else {
            self.next = Some(now);
        }
    }
}
