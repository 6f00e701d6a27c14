#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The 6×6 Tango board.
//!
//! A board is 36 cells stored row-major, so the cell at row `r`, column `c`
//! lives at index `r * 6 + c`. Every cell is a sun, a moon, or still blank.
//!
//! Boards are usually written as 36-digit strings where `0` is a sun, `1` a
//! moon and `2` a blank square, e.g.
//! `"222222222222220022221022221122220022"`.

use core::ops::{Index, IndexMut};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Number of cells along one side of the board.
pub const SIZE: usize = 6;

/// Total number of cells on the board.
pub const CELLS: usize = SIZE * SIZE;

/// The value held by a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum Cell {
    /// A sun symbol, written as `0`.
    Sun = 0,
    /// A moon symbol, written as `1`.
    Moon = 1,
    /// An unfilled cell, written as `2`.
    #[default]
    Blank = 2,
}

impl Cell {
    /// The two symbols, in the order the solver tries them.
    pub const SYMBOLS: [Self; 2] = [Self::Sun, Self::Moon];

    /// Decodes a board digit (`0`, `1` or `2`).
    #[must_use]
    pub const fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '0' => Some(Self::Sun),
            '1' => Some(Self::Moon),
            '2' => Some(Self::Blank),
            _ => None,
        }
    }

    /// The digit this cell is written as.
    #[must_use]
    pub const fn to_digit(self) -> char {
        match self {
            Self::Sun => '0',
            Self::Moon => '1',
            Self::Blank => '2',
        }
    }

    /// Whether the cell still needs a symbol.
    #[must_use]
    pub const fn is_blank(self) -> bool {
        matches!(self, Self::Blank)
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_digit())
    }
}

/// Errors produced when reading a board from its digit string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardParseError {
    /// The string did not contain exactly 36 characters.
    #[error("expected 36 cells, found {0}")]
    WrongLength(usize),
    /// A character other than `0`, `1` or `2` was found.
    #[error("invalid cell '{found}' at index {index}")]
    InvalidCell {
        /// Position of the offending character.
        index: usize,
        /// The character that was found.
        found: char,
    },
}

/// A 6×6 board in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board([Cell; CELLS]);

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Index<usize> for Board {
    type Output = Cell;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IndexMut<usize> for Board {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl From<[Cell; CELLS]> for Board {
    fn from(cells: [Cell; CELLS]) -> Self {
        Self::new(cells)
    }
}

impl From<Board> for [Cell; CELLS] {
    fn from(board: Board) -> Self {
        board.0
    }
}

impl Board {
    /// Wraps an array of cells.
    #[must_use]
    pub const fn new(cells: [Cell; CELLS]) -> Self {
        Self(cells)
    }

    /// A board with every cell blank.
    #[must_use]
    pub const fn empty() -> Self {
        Self([Cell::Blank; CELLS])
    }

    /// The cell at `row`, `col`.
    #[must_use]
    pub const fn at(&self, row: usize, col: usize) -> Cell {
        self.0[row * SIZE + col]
    }

    /// The cells of row `row`, left to right.
    #[must_use]
    pub fn row(&self, row: usize) -> [Cell; SIZE] {
        std::array::from_fn(|col| self.at(row, col))
    }

    /// The cells of column `col`, top to bottom.
    #[must_use]
    pub fn column(&self, col: usize) -> [Cell; SIZE] {
        std::array::from_fn(|row| self.at(row, col))
    }

    /// Number of blank cells left.
    #[must_use]
    pub fn blanks(&self) -> usize {
        self.0.iter().filter(|cell| cell.is_blank()).count()
    }

    /// Whether every cell holds a symbol.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.blanks() == 0
    }

    /// Iterates over the cells in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.0.iter()
    }

    /// The 36-digit string form of the board.
    #[must_use]
    pub fn to_digits(&self) -> String {
        self.0.iter().map(|cell| cell.to_digit()).collect()
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let len = s.chars().count();
        if len != CELLS {
            return Err(BoardParseError::WrongLength(len));
        }

        let mut cells = [Cell::Blank; CELLS];
        for (index, found) in s.chars().enumerate() {
            cells[index] =
                Cell::from_digit(found).ok_or(BoardParseError::InvalidCell { index, found })?;
        }
        Ok(Self(cells))
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in 0..SIZE {
            for cell in self.row(row) {
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUZZLE: &str = "222222222222220022221022221122220022";

    #[test]
    fn test_parse_round_trip() {
        let board: Board = PUZZLE.parse().unwrap();
        assert_eq!(board.to_digits(), PUZZLE);
        assert_eq!(board[14], Cell::Sun);
        assert_eq!(board[20], Cell::Moon);
        assert_eq!(board.at(4, 3), Cell::Moon);
        assert_eq!(board.blanks(), 28);
        assert!(!board.is_complete());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let board: Board = format!("  {PUZZLE}\n").parse().unwrap();
        assert_eq!(board.to_digits(), PUZZLE);
    }

    #[test]
    fn test_parse_wrong_length() {
        assert_eq!(
            "0101".parse::<Board>(),
            Err(BoardParseError::WrongLength(4))
        );
        assert_eq!(
            format!("{PUZZLE}2").parse::<Board>(),
            Err(BoardParseError::WrongLength(37))
        );
    }

    #[test]
    fn test_parse_invalid_cell() {
        let input = format!("3{}", &PUZZLE[1..]);
        assert_eq!(
            input.parse::<Board>(),
            Err(BoardParseError::InvalidCell {
                index: 0,
                found: '3',
            })
        );
    }

    #[test]
    fn test_rows_and_columns() {
        use Cell::{Moon, Sun};

        let board: Board = "100101001101110010011010001101110010".parse().unwrap();
        assert_eq!(board.row(0), [Moon, Sun, Sun, Moon, Sun, Moon]);
        assert_eq!(board.column(0), [Moon, Sun, Moon, Sun, Sun, Moon]);
        assert!(board.is_complete());
    }

    #[test]
    fn test_display() {
        let board: Board = PUZZLE.parse().unwrap();
        let rendered = board.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), SIZE);
        assert_eq!(lines[2], "220022");
        assert_eq!(lines[3], "221022");
    }

    #[test]
    fn test_empty_board() {
        let board = Board::default();
        assert_eq!(board.blanks(), CELLS);
        assert_eq!(board.to_digits(), "2".repeat(CELLS));
    }
}
