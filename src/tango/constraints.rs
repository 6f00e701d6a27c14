#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Adjacency constraints between pairs of cells.
//!
//! A puzzle lists its `=` and `x` marks as [`ConstraintPair`]s. Before the
//! search starts these are compiled into one [`CellRules`] set per cell: each
//! pair becomes a rule on `from` pointing towards `to`, and the mirrored rule
//! on `to` pointing back at `from`. The solver then only ever has to look at
//! the rules of the cell it is about to fill.

use crate::tango::board::{CELLS, Cell, SIZE};
use smallvec::SmallVec;
use std::fmt::{Display, Formatter};
use std::ops::Index;

/// A compass direction from one cell to an edge-sharing neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// One row up.
    North,
    /// One column right.
    East,
    /// One row down.
    South,
    /// One column left.
    West,
}

impl Direction {
    /// Every direction, clockwise from north.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// The direction pointing back the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// The index of the neighbour of `index` in this direction, if it is on
    /// the board. Neighbours never wrap around a row edge.
    #[must_use]
    pub const fn neighbour(self, index: usize) -> Option<usize> {
        let (row, col) = (index / SIZE, index % SIZE);
        match self {
            Self::North if row > 0 => Some(index - SIZE),
            Self::South if row + 1 < SIZE => Some(index + SIZE),
            Self::West if col > 0 => Some(index - 1),
            Self::East if col + 1 < SIZE => Some(index + 1),
            _ => None,
        }
    }
}

/// How the symbols of two constrained cells must relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Relation {
    /// Both cells hold the same symbol (`=`).
    Equal,
    /// The cells hold opposite symbols (`x`).
    Different,
}

impl Relation {
    /// Whether two filled cells satisfy the relation.
    #[must_use]
    pub fn holds(self, a: Cell, b: Cell) -> bool {
        match self {
            Self::Equal => a == b,
            Self::Different => a != b,
        }
    }
}

impl Display for Relation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Equal => write!(f, "="),
            Self::Different => write!(f, "x"),
        }
    }
}

/// A constraint between two cells as written in a puzzle.
///
/// The cells are expected to share an edge. A pair that does not is ignored
/// when compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstraintPair {
    /// Index of the first cell.
    pub from: usize,
    /// Index of the second cell.
    pub to: usize,
    /// The relation binding the two cells.
    pub relation: Relation,
}

impl ConstraintPair {
    /// Creates a pair.
    #[must_use]
    pub const fn new(from: usize, to: usize, relation: Relation) -> Self {
        Self { from, to, relation }
    }

    /// An `=` pair.
    #[must_use]
    pub const fn equal(from: usize, to: usize) -> Self {
        Self::new(from, to, Relation::Equal)
    }

    /// An `x` pair.
    #[must_use]
    pub const fn different(from: usize, to: usize) -> Self {
        Self::new(from, to, Relation::Different)
    }
}

impl Display for ConstraintPair {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.from, self.to, self.relation)
    }
}

/// A single compiled fact: the neighbour in `direction` must satisfy
/// `relation` with this cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rule {
    /// Where the neighbour lies.
    pub direction: Direction,
    /// What the neighbour must satisfy.
    pub relation: Relation,
}

/// The set of rules attached to one cell.
///
/// There are at most eight distinct rules (four directions, two relations),
/// and almost every cell has one or none, so the rules live inline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellRules(SmallVec<[Rule; 4]>);

impl CellRules {
    /// Adds a rule unless it is already present.
    pub fn insert(&mut self, rule: Rule) {
        if !self.contains(rule) {
            self.0.push(rule);
        }
    }

    /// Whether the set holds `rule`.
    #[must_use]
    pub fn contains(&self, rule: Rule) -> bool {
        self.0.contains(&rule)
    }

    /// Iterates over the rules.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.0.iter()
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the cell is unconstrained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Rules for every cell of the board, indexed like the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledConstraints([CellRules; CELLS]);

impl Default for CompiledConstraints {
    fn default() -> Self {
        Self(std::array::from_fn(|_| CellRules::default()))
    }
}

impl Index<usize> for CompiledConstraints {
    type Output = CellRules;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl CompiledConstraints {
    /// Compiles a list of pairs. See [`compile_constraints`].
    #[must_use]
    pub fn compile(pairs: &[ConstraintPair]) -> Self {
        let mut compiled = Self::default();
        let mut ignored = 0usize;

        for pair in pairs {
            let Some(direction) = adjacency_direction(pair.from, pair.to) else {
                log::trace!("ignoring non-adjacent pair {pair}");
                ignored += 1;
                continue;
            };

            compiled.0[pair.from].insert(Rule {
                direction,
                relation: pair.relation,
            });
            compiled.0[pair.to].insert(Rule {
                direction: direction.opposite(),
                relation: pair.relation,
            });
        }

        log::debug!(
            "compiled {} constraint pairs ({ignored} ignored as non-adjacent)",
            pairs.len() - ignored
        );
        compiled
    }

    /// Iterates over the rule sets in cell order.
    pub fn iter(&self) -> impl Iterator<Item = &CellRules> {
        self.0.iter()
    }

    /// Total number of rules across all cells.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.0.iter().map(CellRules::len).sum()
    }
}

/// Where cell `j` lies relative to cell `i`, or `None` if the two cells do
/// not share an edge.
///
/// Only cells in the same row one column apart, or in the same column one
/// row apart, are adjacent. In particular the last cell of a row and the
/// first cell of the next row are not, even though their indices differ by
/// one.
#[must_use]
pub const fn adjacency_direction(i: usize, j: usize) -> Option<Direction> {
    let (row_i, col_i) = (i / SIZE, i % SIZE);
    let (row_j, col_j) = (j / SIZE, j % SIZE);

    if row_i == row_j {
        if col_j == col_i + 1 {
            return Some(Direction::East);
        }
        if col_i == col_j + 1 {
            return Some(Direction::West);
        }
    } else if col_i == col_j {
        if row_j == row_i + 1 {
            return Some(Direction::South);
        }
        if row_i == row_j + 1 {
            return Some(Direction::North);
        }
    }
    None
}

/// Compiles constraint pairs into per-cell rule sets.
///
/// Every adjacent pair adds a rule on `from` towards `to` and the mirrored
/// rule on `to` towards `from`, both carrying the pair's relation. Pairs whose
/// cells are not adjacent are skipped. Indices must be below 36.
#[must_use]
pub fn compile_constraints(pairs: &[ConstraintPair]) -> CompiledConstraints {
    CompiledConstraints::compile(pairs)
}
