#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Independent checks for a finished board.
//!
//! The solver only ever tests one placement at a time against the current
//! board. This module instead looks at a complete board as a whole, so it can
//! be used to confirm a solver result without trusting the solver's own
//! bookkeeping.

use crate::tango::board::{Board, CELLS, Cell, SIZE};
use crate::tango::constraints::{CompiledConstraints, Relation};
use crate::tango::solver::QUOTA;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// A row or column of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Line {
    /// The row with the given index.
    Row(usize),
    /// The column with the given index.
    Column(usize),
}

impl Display for Line {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Row(row) => write!(f, "row {row}"),
            Self::Column(col) => write!(f, "column {col}"),
        }
    }
}

/// The first rule a board was found to break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    /// A cell is still blank.
    #[error("cell {index} is blank")]
    Incomplete {
        /// The blank cell.
        index: usize,
    },
    /// A line holds more than three of one symbol.
    #[error("{line} has more than 3 of symbol {cell}")]
    Quota {
        /// The offending line.
        line: Line,
        /// The over-represented symbol.
        cell: Cell,
    },
    /// A line holds three equal symbols in a row.
    #[error("{line} has three equal symbols starting at position {start}")]
    Run {
        /// The offending line.
        line: Line,
        /// Position of the first of the three cells within the line.
        start: usize,
    },
    /// Two adjacent cells break their constraint.
    #[error("cells {from} and {to} break their '{relation}' constraint")]
    Constraint {
        /// The cell carrying the rule.
        from: usize,
        /// Its neighbour.
        to: usize,
        /// The relation that does not hold.
        relation: Relation,
    },
}

/// Checks a complete board against every puzzle rule.
///
/// # Errors
///
/// Returns the first [`Violation`] found: blank cells first, then each row
/// and column in turn, then the adjacency rules in cell order.
pub fn validate(board: &Board, constraints: &CompiledConstraints) -> Result<(), Violation> {
    if let Some(index) = (0..CELLS).find(|&i| board[i].is_blank()) {
        return Err(Violation::Incomplete { index });
    }

    for i in 0..SIZE {
        check_line(Line::Row(i), &board.row(i))?;
        check_line(Line::Column(i), &board.column(i))?;
    }

    for from in 0..CELLS {
        for rule in constraints[from].iter() {
            let Some(to) = rule.direction.neighbour(from) else {
                continue;
            };
            if !rule.relation.holds(board[from], board[to]) {
                return Err(Violation::Constraint {
                    from,
                    to,
                    relation: rule.relation,
                });
            }
        }
    }

    Ok(())
}

fn check_line(line: Line, cells: &[Cell; SIZE]) -> Result<(), Violation> {
    for symbol in Cell::SYMBOLS {
        if cells.iter().filter(|&&cell| cell == symbol).count() > QUOTA {
            return Err(Violation::Quota { line, cell: symbol });
        }
    }

    match cells.windows(3).position(|w| w[0] == w[1] && w[1] == w[2]) {
        Some(start) => Err(Violation::Run { line, start }),
        None => Ok(()),
    }
}
