use rand::{seq::SliceRandom, Rng};
use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

use crate::error::{PuzzleError, Result};

pub const SIZE: usize = 3;
pub const TILE_COUNT: usize = SIZE * SIZE;
pub const BLANK: u8 = 0;

/// Direction the blank travels in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Neighbor generation order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    /// The single blank move turning `from` into `to`, if there is one.
    pub fn between(from: &State, to: &State) -> Option<Self> {
        Move::ALL
            .into_iter()
            .find(|&dir| from.apply(dir).as_ref() == Some(to))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Left => "Left",
            Move::Down => "Down",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// A 3x3 board in row-major order. Always a permutation of 0..=8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct State {
    tiles: [u8; TILE_COUNT],
    blank: usize,
}

impl State {
    /// Tiles 1 to 8 in order with the blank in the bottom-right corner.
    pub fn solved() -> Self {
        let mut tiles = [BLANK; TILE_COUNT];
        for (slot, value) in tiles.iter_mut().zip(1..) {
            *slot = value;
        }
        tiles[TILE_COUNT - 1] = BLANK;

        Self {
            tiles,
            blank: TILE_COUNT - 1,
        }
    }

    /// Reads nine whitespace separated numbers, e.g. three lines of three.
    pub fn parse(text: &str) -> Result<Self> {
        let values = text
            .split_whitespace()
            .map(|token| match token.parse::<i64>() {
                Ok(value) => Ok(value),
                // Too large to hold is still a number, just not a tile.
                Err(err) if *err.kind() == IntErrorKind::PosOverflow => Ok(i64::MAX),
                Err(err) if *err.kind() == IntErrorKind::NegOverflow => Ok(i64::MIN),
                Err(_) => Err(PuzzleError::InvalidToken {
                    token: token.to_string(),
                }),
            })
            .collect::<Result<Vec<i64>>>()?;

        Self::from_values(&values)
    }

    fn from_values(values: &[i64]) -> Result<Self> {
        if values.len() != TILE_COUNT {
            return Err(PuzzleError::MalformedInput {
                count: values.len(),
            });
        }

        let mut tiles = [BLANK; TILE_COUNT];
        let mut seen = [false; TILE_COUNT];
        let mut blank = 0;

        for (index, &value) in values.iter().enumerate() {
            match usize::try_from(value) {
                Ok(tile) if tile < TILE_COUNT && !seen[tile] => {
                    seen[tile] = true;
                    tiles[index] = tile as u8;
                    if tile == BLANK as usize {
                        blank = index;
                    }
                }
                _ => {
                    return Err(PuzzleError::InvalidTiles {
                        tiles: values.to_vec(),
                    })
                }
            }
        }

        Ok(Self { tiles, blank })
    }

    pub fn tiles(&self) -> [u8; TILE_COUNT] {
        self.tiles
    }

    pub fn tile_at(&self, row: usize, col: usize) -> u8 {
        self.tiles[row * SIZE + col]
    }

    pub fn blank_index(&self) -> usize {
        self.blank
    }

    pub fn blank_position(&self) -> (usize, usize) {
        (self.blank / SIZE, self.blank % SIZE)
    }

    /// Packs the board into 36 bits, one nibble per cell, first cell highest.
    pub fn encode(&self) -> u64 {
        self.tiles
            .iter()
            .fold(0, |code, &tile| (code << 4) | u64::from(tile))
    }

    pub fn decode(code: u64) -> Result<Self> {
        let significant = (u64::BITS - code.leading_zeros()).div_ceil(4) as usize;
        if significant > TILE_COUNT {
            return Err(PuzzleError::MalformedInput { count: significant });
        }

        let values: Vec<i64> = (0..TILE_COUNT)
            .rev()
            .map(|nibble| ((code >> (4 * nibble)) & 0xF) as i64)
            .collect();

        Self::from_values(&values)
    }

    /// Slides the blank one cell, or `None` if that leaves the board.
    pub fn apply(&self, movement: Move) -> Option<Self> {
        let (dx, dy) = movement.as_offset();
        let (row, col) = self.blank_position();

        let new_row = row.checked_add_signed(dx)?;
        let new_col = col.checked_add_signed(dy)?;
        if new_row >= SIZE || new_col >= SIZE {
            return None;
        }

        let target = new_row * SIZE + new_col;
        let mut tiles = self.tiles;
        tiles.swap(self.blank, target);

        Some(Self {
            tiles,
            blank: target,
        })
    }

    /// Every state one blank move away, in up, down, left, right order.
    pub fn neighbors(&self) -> Vec<State> {
        Move::ALL
            .iter()
            .filter_map(|&dir| self.apply(dir))
            .collect()
    }

    pub fn inversions(&self) -> usize {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(_, &val)| val != BLANK)
            .map(|(i, &val)| {
                self.tiles[i + 1..]
                    .iter()
                    .filter(|&&next| next != BLANK && next < val)
                    .count()
            })
            .sum()
    }

    /// Even inversion count. On an odd-width board two states are connected
    /// by blank moves exactly when this agrees for both.
    pub fn is_solvable_class(&self) -> bool {
        self.inversions() % 2 == 0
    }

    /// A uniformly shuffled board in the same parity class as `target`.
    pub fn shuffled_like<R: Rng + ?Sized>(target: &State, rng: &mut R) -> Self {
        let class = target.is_solvable_class();
        let mut tiles = target.tiles;

        loop {
            tiles.shuffle(rng);

            let blank = tiles
                .iter()
                .position(|&tile| tile == BLANK)
                .unwrap_or(target.blank);
            let state = Self { tiles, blank };

            if state.is_solvable_class() == class {
                return state;
            }
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::solved()
    }
}

impl FromStr for State {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&[u8]> for State {
    type Error = PuzzleError;

    fn try_from(tiles: &[u8]) -> Result<Self> {
        let values: Vec<i64> = tiles.iter().map(|&tile| i64::from(tile)).collect();
        Self::from_values(&values)
    }
}

impl TryFrom<[u8; TILE_COUNT]> for State {
    type Error = PuzzleError;

    fn try_from(tiles: [u8; TILE_COUNT]) -> Result<Self> {
        Self::try_from(&tiles[..])
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(SIZE) {
            for &val in row {
                if val == BLANK {
                    write!(f, "   ")?;
                } else {
                    write!(f, "{:2} ", val)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

pub fn parse(text: &str) -> Result<State> {
    State::parse(text)
}

pub fn is_solvable_class(state: &State) -> bool {
    state.is_solvable_class()
}

/// Fails with [`PuzzleError::UnreachableGoal`] when no move sequence joins the two.
pub fn check_reachable(start: &State, goal: &State) -> Result<()> {
    if start.is_solvable_class() == goal.is_solvable_class() {
        Ok(())
    } else {
        Err(PuzzleError::UnreachableGoal)
    }
}

/// Moves taken along a path, `None` if two consecutive states are not adjacent.
pub fn moves_along(path: &[State]) -> Option<Vec<Move>> {
    path.windows(2)
        .map(|pair| Move::between(&pair[0], &pair[1]))
        .collect()
}
