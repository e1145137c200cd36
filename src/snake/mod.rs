//! Snake easter egg.
//!
//! [`SnakeGame`] is the pure simulation: it owns the body, direction, food and
//! score, and advances one cell per [`SnakeGame::tick`]. A run only exists while
//! the game is Running; the driver holds `Option<SnakeGame>` and `None` is the
//! Dormant state. [`ActivationBuffer`] watches keystrokes for the phrase that
//! wakes the game. Canvas drawing lives in `draw`, browser wiring in `driver`.

mod draw;
mod driver;

pub use driver::SnakeDriver;

use std::collections::VecDeque;

use rand::Rng;

/// Keys that start a run, oldest first.
pub const ACTIVATION_PHRASE: [&str; 5] = ["s", "n", "a", "k", "e"];

/// Where a fresh snake starts (clamped into small grids).
pub const ORIGIN: Cell = Cell { x: 10, y: 10 };

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Map a `KeyboardEvent.key` value to a direction.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Direction::Up),
            "ArrowDown" => Some(Direction::Down),
            "ArrowLeft" => Some(Direction::Left),
            "ArrowRight" => Some(Direction::Right),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Dormant,
    Running,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    Ate { score: u32 },
    /// The run is over; the game must be discarded.
    GameOver { score: u32 },
}

/// Rolling window over the last keystrokes.
#[derive(Debug, Default)]
pub struct ActivationBuffer {
    keys: VecDeque<String>,
}

impl ActivationBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key (matched case-insensitively). Returns `true` when the window
    /// spells the activation phrase; the window is cleared on a match.
    pub fn push(&mut self, key: &str) -> bool {
        self.keys.push_back(key.to_lowercase());
        if self.keys.len() > ACTIVATION_PHRASE.len() {
            self.keys.pop_front();
        }
        let matched = self.keys.len() == ACTIVATION_PHRASE.len()
            && self.keys.iter().zip(ACTIVATION_PHRASE).all(|(k, want)| k == want);
        if matched {
            self.keys.clear();
        }
        matched
    }
}

#[derive(Clone, Debug)]
pub struct SnakeGame {
    cols: i32,
    rows: i32,
    segments: VecDeque<Cell>, // head first
    direction: Direction,
    queued: Direction,
    food: Option<Cell>,
    score: u32,
}

/// Uniformly sample a free cell, resampling on collisions with the body.
/// `None` when the body covers the whole grid.
pub fn place_food<R: Rng + ?Sized>(
    cols: i32,
    rows: i32,
    segments: &VecDeque<Cell>,
    rng: &mut R,
) -> Option<Cell> {
    if cols <= 0 || rows <= 0 || segments.len() >= (cols as usize) * (rows as usize) {
        return None;
    }
    loop {
        let c = Cell::new(rng.gen_range(0..cols), rng.gen_range(0..rows));
        if !segments.contains(&c) {
            return Some(c);
        }
    }
}

impl SnakeGame {
    /// Fresh run: one segment at the origin heading right, score zero.
    pub fn start<R: Rng + ?Sized>(cols: u32, rows: u32, rng: &mut R) -> Self {
        let cols = cols.clamp(1, i32::MAX as u32) as i32;
        let rows = rows.clamp(1, i32::MAX as u32) as i32;
        let head = Cell::new(ORIGIN.x.min(cols - 1), ORIGIN.y.min(rows - 1));
        let segments = VecDeque::from([head]);
        let food = place_food(cols, rows, &segments, rng);
        Self {
            cols,
            rows,
            segments,
            direction: Direction::Right,
            queued: Direction::Right,
            food,
            score: 0,
        }
    }

    /// Rebuild a run from a known position, e.g. to replay a scenario.
    /// `segments` is head first.
    pub fn from_parts(
        cols: u32,
        rows: u32,
        segments: Vec<Cell>,
        direction: Direction,
        food: Option<Cell>,
        score: u32,
    ) -> Self {
        Self {
            cols: cols.clamp(1, i32::MAX as u32) as i32,
            rows: rows.clamp(1, i32::MAX as u32) as i32,
            segments: segments.into(),
            direction,
            queued: direction,
            food,
            score,
        }
    }

    pub fn cols(&self) -> u32 {
        self.cols as u32
    }

    pub fn rows(&self) -> u32 {
        self.rows as u32
    }

    pub fn segments(&self) -> impl ExactSizeIterator<Item = &Cell> + '_ {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn head(&self) -> Option<Cell> {
        self.segments.front().copied()
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn queued(&self) -> Direction {
        self.queued
    }

    fn in_bounds(&self, c: Cell) -> bool {
        (0..self.cols).contains(&c.x) && (0..self.rows).contains(&c.y)
    }

    /// Queue a turn. Only turns onto the other axis are taken, so the snake can
    /// never fold back onto itself. Returns whether the turn was queued.
    pub fn steer(&mut self, dir: Direction) -> bool {
        if dir.is_horizontal() == self.direction.is_horizontal() {
            return false;
        }
        self.queued = dir;
        true
    }

    /// Advance one cell.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> TickOutcome {
        self.direction = self.queued;
        let Some(head) = self.head() else {
            return TickOutcome::GameOver { score: self.score };
        };
        let (dx, dy) = self.direction.delta();
        let next = Cell::new(head.x + dx, head.y + dy);

        if !self.in_bounds(next) || self.segments.contains(&next) {
            return TickOutcome::GameOver { score: self.score };
        }

        self.segments.push_front(next);
        if self.food == Some(next) {
            self.score += 1;
            self.food = place_food(self.cols, self.rows, &self.segments, rng);
            if self.food.is_none() {
                // Board is full: nothing left to eat.
                return TickOutcome::GameOver { score: self.score };
            }
            TickOutcome::Ate { score: self.score }
        } else {
            self.segments.pop_back();
            TickOutcome::Moved
        }
    }
}
