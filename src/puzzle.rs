use rand::{
    distributions::{Distribution, Standard},
    Rng,
};
use std::fmt;
use std::io::{self, Write};
use tracing::{debug, trace};

use crate::config::ClearMode;

pub const BOARD_SIZE: usize = 4;

/// Accepted random moves applied by [`Board::randomize`].
pub const SHUFFLE_MOVES: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn invert(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        rng.gen()
    }
}

impl Distribution<Direction> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Direction {
        Direction::ALL[rng.gen_range(0..Direction::ALL.len())]
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// No bounds checking; that is up to the board.
    pub fn adjacent(&self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Point::new(self.x, self.y - 1),
            Direction::Down => Point::new(self.x, self.y + 1),
            Direction::Left => Point::new(self.x - 1, self.y),
            Direction::Right => Point::new(self.x + 1, self.y),
        }
    }
}

/// A numbered tile, or the empty slot when the value is 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tile(u8);

impl Tile {
    pub const EMPTY: Tile = Tile(0);

    pub const fn new(value: u8) -> Self {
        debug_assert!(value <= 15, "tile value out of range");
        Self(value)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "    ")
        } else {
            write!(f, "{:>3} ", self.0)
        }
    }
}

/// The 4x4 grid, indexed `[row][col]` with `x = col` and `y = row`.
///
/// Tiles only ever change places through [`Board::swap`], so a board built
/// from [`Board::SOLVED`] always holds exactly one empty tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    tiles: [[Tile; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Tiles 1 to 15 in row-major order with the empty slot last.
    pub const SOLVED: Board = Board::solved();

    const fn solved() -> Self {
        let mut tiles = [[Tile::EMPTY; BOARD_SIZE]; BOARD_SIZE];
        let mut i = 0;
        while i < BOARD_SIZE * BOARD_SIZE - 1 {
            tiles[i / BOARD_SIZE][i % BOARD_SIZE] = Tile::new(i as u8 + 1);
            i += 1;
        }
        Self { tiles }
    }

    pub fn new() -> Self {
        Self::SOLVED
    }

    pub fn tile(&self, point: Point) -> Option<Tile> {
        if Self::is_in_bounds(point) {
            Some(self.tiles[point.y as usize][point.x as usize])
        } else {
            None
        }
    }

    pub fn find_empty_position(&self) -> Point {
        for (y, row) in self.tiles.iter().enumerate() {
            for (x, tile) in row.iter().enumerate() {
                if tile.is_empty() {
                    return Point::new(x as i32, y as i32);
                }
            }
        }

        panic!("board has no empty tile: {:?}", self.tiles);
    }

    pub fn is_in_bounds(point: Point) -> bool {
        let size = BOARD_SIZE as i32;
        (0..size).contains(&point.x) && (0..size).contains(&point.y)
    }

    /// Both points must already be in bounds.
    pub fn swap(&mut self, a: Point, b: Point) {
        let tile_a = self.tiles[a.y as usize][a.x as usize];
        self.tiles[a.y as usize][a.x as usize] = self.tiles[b.y as usize][b.x as usize];
        self.tiles[b.y as usize][b.x as usize] = tile_a;
    }

    /// Slides the tile on the far side of the empty slot in `direction`.
    /// Returns false and leaves the board untouched when no such tile exists.
    pub fn attempt_move(&mut self, direction: Direction) -> bool {
        let empty = self.find_empty_position();
        let adjacent = empty.adjacent(direction.invert());

        let Some(tile) = self.tile(adjacent) else {
            trace!(%direction, ?empty, "move rejected");
            return false;
        };

        self.swap(adjacent, empty);
        trace!(%direction, tile = tile.value(), to = ?empty, "tile moved");
        true
    }

    pub fn is_solved(&self) -> bool {
        *self == Self::SOLVED
    }

    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut accepted = 0;
        let mut draws = 0;

        while accepted < SHUFFLE_MOVES {
            draws += 1;
            if self.attempt_move(Direction::random(rng)) {
                accepted += 1;
            }
        }

        debug!(accepted, draws, "board shuffled");
    }

    pub fn render<W: Write>(&self, out: &mut W, clear: &ClearMode) -> io::Result<()> {
        clear.write_preamble(out)?;
        write!(out, "{}", self)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.tiles {
            for tile in row {
                write!(f, "{}", tile)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
