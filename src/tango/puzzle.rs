#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Reading and writing whole puzzles.
//!
//! A puzzle file is plain text:
//!
//! ```text
//! # comments and blank lines are ignored
//! 222222222222220022221022221122220022
//! 2 3 x
//! 6 7 =
//! 10 11 !=
//! ```
//!
//! The first meaningful line is the board as 36 digits (`0` sun, `1` moon,
//! `2` blank). Every line after it is one constraint: two cell indices and a
//! relation, `=` (or `==`) for equal and `x` (or `X`, `!=`) for different.
//!
//! Cell indices are range-checked here so that the solver never sees an index
//! off the board.

use crate::tango::board::{Board, BoardParseError, CELLS};
use crate::tango::constraints::{CompiledConstraints, ConstraintPair, Relation};
use crate::tango::solver::solve;
use itertools::Itertools;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced while reading a puzzle.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input could not be read.
    #[error("failed to read puzzle: {0}")]
    Io(#[from] io::Error),
    /// The input contained no board line.
    #[error("no board found")]
    MissingBoard,
    /// The board line was malformed.
    #[error("line {line}: invalid board")]
    Board {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the board.
        source: BoardParseError,
    },
    /// A constraint line did not have three fields.
    #[error("line {line}: expected 'FROM TO RELATION', found {found} fields")]
    FieldCount {
        /// 1-based line number.
        line: usize,
        /// Number of fields on the line.
        found: usize,
    },
    /// A cell index was not a number.
    #[error("line {line}: invalid cell index '{value}'")]
    Index {
        /// 1-based line number.
        line: usize,
        /// The offending field.
        value: String,
    },
    /// A cell index was off the board.
    #[error("line {line}: cell index {index} is out of range (0..36)")]
    OutOfRange {
        /// 1-based line number.
        line: usize,
        /// The offending index.
        index: usize,
    },
    /// The relation was not one of `=`, `==`, `x`, `X` or `!=`.
    #[error("line {line}: unknown relation '{value}', expected '=', '==', 'x', 'X' or '!='")]
    Relation {
        /// 1-based line number.
        line: usize,
        /// The offending field.
        value: String,
    },
}

/// A board together with its constraint pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    /// The starting board.
    pub board: Board,
    /// The `=` / `x` marks between adjacent cells.
    pub pairs: Vec<ConstraintPair>,
}

impl Puzzle {
    /// Creates a puzzle.
    #[must_use]
    pub const fn new(board: Board, pairs: Vec<ConstraintPair>) -> Self {
        Self { board, pairs }
    }

    /// Compiles the puzzle's pairs.
    #[must_use]
    pub fn compile(&self) -> CompiledConstraints {
        CompiledConstraints::compile(&self.pairs)
    }

    /// Solves a copy of the starting board.
    #[must_use]
    pub fn solve(&self) -> Option<Board> {
        let constraints = self.compile();
        let mut board = self.board;
        solve(&mut board, &constraints).then_some(board)
    }

    /// Renders the puzzle in the text format read by [`parse_puzzle`].
    #[must_use]
    pub fn to_text(&self) -> String {
        std::iter::once(self.board.to_digits())
            .chain(self.pairs.iter().map(ToString::to_string))
            .join("\n")
            + "\n"
    }
}

impl Display for Puzzle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.board)?;
        if !self.pairs.is_empty() {
            writeln!(f, "constraints: {}", self.pairs.iter().join(", "))?;
        }
        Ok(())
    }
}

impl FromStr for Puzzle {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_puzzle(s.as_bytes())
    }
}

fn parse_relation(field: &str) -> Option<Relation> {
    match field {
        "=" | "==" => Some(Relation::Equal),
        "x" | "X" | "!=" => Some(Relation::Different),
        _ => None,
    }
}

fn parse_index(field: &str, line: usize) -> Result<usize, ParseError> {
    let index = field.parse::<usize>().map_err(|_| ParseError::Index {
        line,
        value: field.to_string(),
    })?;
    if index >= CELLS {
        return Err(ParseError::OutOfRange { line, index });
    }
    Ok(index)
}

/// Parses a single constraint line such as `"12 18 x"`.
///
/// # Errors
///
/// Returns a [`ParseError`] tagged with `line` if the line does not hold two
/// in-range indices and a known relation.
pub fn parse_pair(text: &str, line: usize) -> Result<ConstraintPair, ParseError> {
    let fields = text.split_whitespace().collect_vec();
    let [from, to, relation] = fields[..] else {
        return Err(ParseError::FieldCount {
            line,
            found: fields.len(),
        });
    };

    let from = parse_index(from, line)?;
    let to = parse_index(to, line)?;
    let relation = parse_relation(relation).ok_or_else(|| ParseError::Relation {
        line,
        value: relation.to_string(),
    })?;

    Ok(ConstraintPair::new(from, to, relation))
}

/// Parses a puzzle from a `BufRead` source.
///
/// # Errors
///
/// Returns a [`ParseError`] if the source cannot be read, has no board line,
/// or contains a malformed board or constraint line.
pub fn parse_puzzle<R: BufRead>(reader: R) -> Result<Puzzle, ParseError> {
    let mut board = None;
    let mut pairs = Vec::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let number = number + 1;
        let text = line.trim();

        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        if board.is_none() {
            board = Some(text.parse::<Board>().map_err(|source| ParseError::Board {
                line: number,
                source,
            })?);
        } else {
            pairs.push(parse_pair(text, number)?);
        }
    }

    let board = board.ok_or(ParseError::MissingBoard)?;
    log::debug!(
        "parsed puzzle with {} blank cells and {} constraint pairs",
        board.blanks(),
        pairs.len()
    );
    Ok(Puzzle::new(board, pairs))
}

/// Parses the puzzle file at `path`.
///
/// # Errors
///
/// Returns [`ParseError::Io`] if the file cannot be opened or read, and the
/// errors of [`parse_puzzle`] for malformed contents.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Puzzle, ParseError> {
    let file = std::fs::File::open(path)?;
    parse_puzzle(io::BufReader::new(file))
}

/// A bundled puzzle with its known solution.
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    /// Short label for reporting.
    pub name: &'static str,
    /// The starting board as 36 digits.
    pub board: &'static str,
    /// The puzzle's constraint pairs.
    pub pairs: &'static [ConstraintPair],
    /// The expected solution as 36 digits.
    pub solution: &'static str,
}

impl Sample {
    /// The sample as a [`Puzzle`].
    ///
    /// # Errors
    ///
    /// Returns a [`BoardParseError`] if the bundled board string is malformed.
    pub fn puzzle(&self) -> Result<Puzzle, BoardParseError> {
        Ok(Puzzle::new(self.board.parse()?, self.pairs.to_vec()))
    }

    /// The expected solution board.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardParseError`] if the bundled solution string is
    /// malformed.
    pub fn solution(&self) -> Result<Board, BoardParseError> {
        self.solution.parse()
    }
}

/// Four sample puzzles with their known solutions.
pub const SAMPLES: [Sample; 4] = [
    Sample {
        name: "sample-1",
        board: "222222222222220022221022221122220022",
        pairs: &[
            ConstraintPair::different(2, 3),
            ConstraintPair::equal(6, 7),
            ConstraintPair::different(10, 11),
            ConstraintPair::different(12, 18),
            ConstraintPair::equal(17, 23),
            ConstraintPair::different(24, 30),
            ConstraintPair::different(29, 35),
        ],
        solution: "100101001101110010011010001101110010",
    },
    Sample {
        name: "sample-2",
        board: "222222220022202212212202221122222222",
        pairs: &[
            ConstraintPair::equal(0, 1),
            ConstraintPair::different(4, 5),
            ConstraintPair::equal(0, 6),
            ConstraintPair::equal(5, 11),
            ConstraintPair::different(24, 30),
            ConstraintPair::equal(30, 31),
            ConstraintPair::different(29, 35),
            ConstraintPair::different(34, 35),
        ],
        solution: "001101010011101010110100001101110010",
    },
    Sample {
        name: "sample-3",
        board: "212222102222222222222222222210222212",
        pairs: &[
            ConstraintPair::different(3, 9),
            ConstraintPair::different(14, 15),
            ConstraintPair::different(16, 17),
            ConstraintPair::different(18, 19),
            ConstraintPair::equal(20, 21),
            ConstraintPair::equal(26, 32),
        ],
        solution: "011001100110011001101100100110010011",
    },
    Sample {
        name: "sample-4",
        board: "222222222222222202222120222020222212",
        pairs: &[
            ConstraintPair::equal(0, 1),
            ConstraintPair::equal(2, 8),
            ConstraintPair::equal(6, 12),
            ConstraintPair::different(14, 20),
            ConstraintPair::equal(18, 19),
        ],
        solution: "110100010011001101110100101010001011",
    },
];
