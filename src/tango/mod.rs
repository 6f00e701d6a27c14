#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Solving Tango puzzles.
//!
//! A Tango puzzle is a 6×6 grid to be filled with suns and moons so that
//! every row and column holds three of each, no three equal symbols are next
//! to each other in a line, and every `=` / `x` mark between two adjacent
//! cells is respected.
//!
//! The two entry points are [`compile_constraints`], which turns the puzzle's
//! marks into per-cell rules, and [`solve`], which fills a board in place by
//! backtracking.
//!
//! ```
//! use tango_solver::tango::{Board, ConstraintPair, compile_constraints, solve};
//!
//! let mut board: Board = "222222222222220022221022221122220022".parse().unwrap();
//! let constraints = compile_constraints(&[
//!     ConstraintPair::different(2, 3),
//!     ConstraintPair::equal(6, 7),
//!     ConstraintPair::different(10, 11),
//!     ConstraintPair::different(12, 18),
//!     ConstraintPair::equal(17, 23),
//!     ConstraintPair::different(24, 30),
//!     ConstraintPair::different(29, 35),
//! ]);
//!
//! assert!(solve(&mut board, &constraints));
//! assert_eq!(board.to_digits(), "100101001101110010011010001101110010");
//! ```

/// The board and its cells.
pub mod board;
/// Adjacency and constraint compilation.
pub mod constraints;
/// Puzzle files and bundled samples.
pub mod puzzle;
/// The backtracking search.
pub mod solver;
/// Whole-board validation.
pub mod validate;

pub use board::{Board, BoardParseError, CELLS, Cell, SIZE};
pub use constraints::{
    CellRules, CompiledConstraints, ConstraintPair, Direction, Relation, Rule, adjacency_direction,
    compile_constraints,
};
pub use puzzle::{ParseError, Puzzle, SAMPLES, Sample, parse_file, parse_puzzle};
pub use solver::{SolveStats, Solver, is_legal_placement, solve};
pub use validate::{Line, Violation, validate};
