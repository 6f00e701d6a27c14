#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Backtracking search for Tango boards.
//!
//! The search walks the cells in row-major order. Filled cells are skipped;
//! a blank cell is given a sun, then a moon, each only if
//! [`is_legal_placement`] accepts it, and the search recurses to the next
//! cell. When both symbols fail the cell is reset to blank and the previous
//! frame tries its next option. Reaching the end of the board means every
//! cell was filled legally.
//!
//! There is no propagation or cell-ordering heuristic: the only pruning is the
//! legality check on each placement. Because the sun-before-moon order is
//! fixed, solving the same input always yields the same board.

use crate::tango::board::{Board, CELLS, Cell, SIZE};
use crate::tango::constraints::CompiledConstraints;
use itertools::Itertools;

/// Most cells of one symbol allowed in a single row or column.
pub const QUOTA: usize = SIZE / 2;

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Symbols written into blank cells.
    pub placements: usize,
    /// Candidate symbols refused by the legality check.
    pub rejections: usize,
    /// Cells reset to blank after their subtree failed.
    pub backtracks: usize,
}

/// A depth-first solver bound to one set of compiled constraints.
#[derive(Debug, Clone)]
pub struct Solver<'a> {
    constraints: &'a CompiledConstraints,
    stats: SolveStats,
}

impl<'a> Solver<'a> {
    /// Creates a solver for `constraints`.
    #[must_use]
    pub const fn new(constraints: &'a CompiledConstraints) -> Self {
        Self {
            constraints,
            stats: SolveStats {
                placements: 0,
                rejections: 0,
                backtracks: 0,
            },
        }
    }

    /// Fills every blank cell of `board`.
    ///
    /// Returns `true` with `board` fully solved, or `false` with `board` back
    /// in its initial state when no legal assignment exists. Cells that were
    /// filled on entry are never changed.
    pub fn solve(&mut self, board: &mut Board) -> bool {
        log::debug!("solving board with {} blank cells", board.blanks());

        let solved = self.search(board, 0);

        log::debug!(
            "search {} after {} placements, {} rejections, {} backtracks",
            if solved { "succeeded" } else { "failed" },
            self.stats.placements,
            self.stats.rejections,
            self.stats.backtracks
        );
        solved
    }

    /// Statistics gathered so far. They accumulate across calls to
    /// [`Solver::solve`].
    #[must_use]
    pub const fn stats(&self) -> SolveStats {
        self.stats
    }

    fn search(&mut self, board: &mut Board, index: usize) -> bool {
        if index == CELLS {
            return true;
        }
        if !board[index].is_blank() {
            return self.search(board, index + 1);
        }

        for candidate in Cell::SYMBOLS {
            if !is_legal_placement(board, self.constraints, index, candidate) {
                self.stats.rejections += 1;
                continue;
            }

            board[index] = candidate;
            self.stats.placements += 1;

            if self.search(board, index + 1) {
                return true;
            }

            board[index] = Cell::Blank;
            self.stats.backtracks += 1;
            log::trace!("backtracking from cell {index} ({candidate})");
        }

        false
    }
}

/// Whether writing `candidate` into the blank cell `index` would keep the
/// board legal.
///
/// The check is made before the cell is written, so it treats `index` as if
/// it already held `candidate`:
///
/// - no row or column may end up with more than three of `candidate`;
/// - no row or column may hold three equal symbols in a row;
/// - every rule on `index` whose neighbour is already filled must hold.
///   Blank neighbours are checked later, when they are filled, through their
///   own mirrored rule.
#[must_use]
pub fn is_legal_placement(
    board: &Board,
    constraints: &CompiledConstraints,
    index: usize,
    candidate: Cell,
) -> bool {
    debug_assert!(!candidate.is_blank(), "only symbols can be placed");

    let (row, col) = (index / SIZE, index % SIZE);

    let mut row_cells = board.row(row);
    row_cells[col] = candidate;
    let mut col_cells = board.column(col);
    col_cells[row] = candidate;

    within_quota(&row_cells, candidate)
        && within_quota(&col_cells, candidate)
        && !has_run(&row_cells)
        && !has_run(&col_cells)
        && satisfies_rules(board, constraints, index, candidate)
}

fn within_quota(line: &[Cell; SIZE], symbol: Cell) -> bool {
    line.iter().filter(|&&cell| cell == symbol).count() <= QUOTA
}

fn has_run(line: &[Cell; SIZE]) -> bool {
    line.iter()
        .tuple_windows()
        .any(|(a, b, c)| !a.is_blank() && a == b && b == c)
}

fn satisfies_rules(
    board: &Board,
    constraints: &CompiledConstraints,
    index: usize,
    candidate: Cell,
) -> bool {
    constraints[index].iter().all(|rule| {
        let Some(neighbour) = rule.direction.neighbour(index) else {
            return true;
        };
        board[neighbour].is_blank() || rule.relation.holds(candidate, board[neighbour])
    })
}

/// Solves `board` in place against `constraints`.
///
/// Returns `true` and leaves the solution in `board` if one exists; otherwise
/// returns `false` and leaves `board` as it was.
pub fn solve(board: &mut Board, constraints: &CompiledConstraints) -> bool {
    Solver::new(constraints).solve(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tango::constraints::{ConstraintPair, compile_constraints};
    use crate::tango::validate::validate;

    const PUZZLE: &str = "222222222222220022221022221122220022";
    const SOLUTION: &str = "100101001101110010011010001101110010";

    fn puzzle_pairs() -> Vec<ConstraintPair> {
        vec![
            ConstraintPair::different(2, 3),
            ConstraintPair::equal(6, 7),
            ConstraintPair::different(10, 11),
            ConstraintPair::different(12, 18),
            ConstraintPair::equal(17, 23),
            ConstraintPair::different(24, 30),
            ConstraintPair::different(29, 35),
        ]
    }

    fn board(digits: &str) -> Board {
        digits.parse().unwrap()
    }

    fn padded(prefix: &str) -> Board {
        board(&format!("{prefix}{}", "2".repeat(CELLS - prefix.len())))
    }

    #[test]
    fn test_solve_sample() {
        let constraints = compile_constraints(&puzzle_pairs());
        let mut board = board(PUZZLE);

        assert!(solve(&mut board, &constraints));
        assert_eq!(board.to_digits(), SOLUTION);
    }

    #[test]
    fn test_solve_with_first_six_pairs() {
        let constraints = compile_constraints(&puzzle_pairs()[..6]);
        let mut board = board(PUZZLE);

        assert!(solve(&mut board, &constraints));
        assert_eq!(board.to_digits(), SOLUTION);
    }

    #[test]
    fn test_solve_is_deterministic() {
        let constraints = compile_constraints(&puzzle_pairs());
        let mut first = board(PUZZLE);
        let mut second = board(PUZZLE);

        assert_eq!(
            solve(&mut first, &constraints),
            solve(&mut second, &constraints)
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_solution_passes_validation() {
        let constraints = compile_constraints(&puzzle_pairs());
        let mut board = board(PUZZLE);

        assert!(solve(&mut board, &constraints));
        assert_eq!(validate(&board, &constraints), Ok(()));
    }

    #[test]
    fn test_solve_keeps_seed_cells() {
        let constraints = compile_constraints(&puzzle_pairs());
        let initial = board(PUZZLE);
        let mut solved = initial;

        assert!(solve(&mut solved, &constraints));
        for index in 0..CELLS {
            if !initial[index].is_blank() {
                assert_eq!(solved[index], initial[index], "cell {index} changed");
            }
        }
    }

    #[test]
    fn test_contradictory_pair_is_unsolvable() {
        let constraints =
            compile_constraints(&[ConstraintPair::equal(0, 1), ConstraintPair::different(0, 1)]);
        let mut board = Board::empty();

        assert!(!solve(&mut board, &constraints));
        assert_eq!(board, Board::empty());
    }

    #[test]
    fn test_contradiction_leaves_seed_board_untouched() {
        let mut pairs = puzzle_pairs();
        pairs.push(ConstraintPair::equal(34, 35));
        pairs.push(ConstraintPair::different(34, 35));
        let constraints = compile_constraints(&pairs);
        let initial = board(PUZZLE);
        let mut board = initial;

        assert!(!solve(&mut board, &constraints));
        assert_eq!(board, initial);
    }

    #[test]
    fn test_empty_board_takes_first_solution() {
        let constraints = CompiledConstraints::default();
        let mut board = Board::empty();

        assert!(solve(&mut board, &constraints));
        assert_eq!(board.to_digits(), "001011001011110100001011110100110100");
    }

    #[test]
    fn test_full_board_is_returned_as_is() {
        let constraints = compile_constraints(&puzzle_pairs());
        let mut board = board(SOLUTION);
        let mut solver = Solver::new(&constraints);

        assert!(solver.solve(&mut board));
        assert_eq!(board.to_digits(), SOLUTION);
        assert_eq!(solver.stats(), SolveStats::default());
    }

    #[test]
    fn test_stats_are_counted() {
        let constraints = compile_constraints(&puzzle_pairs());
        let mut board = board(PUZZLE);
        let mut solver = Solver::new(&constraints);

        assert!(solver.solve(&mut board));
        let stats = solver.stats();
        assert_eq!(stats.placements - stats.backtracks, 28);
        assert!(stats.rejections > 0);
    }

    #[test]
    fn test_quota_rejects_fourth_symbol() {
        let constraints = CompiledConstraints::default();
        let board = padded("010102");

        assert!(!is_legal_placement(&board, &constraints, 5, Cell::Sun));
        assert!(is_legal_placement(&board, &constraints, 5, Cell::Moon));
    }

    #[test]
    fn test_quota_in_column() {
        let constraints = CompiledConstraints::default();
        let mut board = Board::empty();
        for row in [0, 2, 4] {
            board[row * SIZE] = Cell::Moon;
        }
        let index = 5 * SIZE;

        assert!(!is_legal_placement(&board, &constraints, index, Cell::Moon));
        assert!(is_legal_placement(&board, &constraints, index, Cell::Sun));
    }

    #[test]
    fn test_run_at_end_of_pair() {
        let constraints = CompiledConstraints::default();
        let board = padded("002222");

        assert!(!is_legal_placement(&board, &constraints, 2, Cell::Sun));
        assert!(is_legal_placement(&board, &constraints, 2, Cell::Moon));
    }

    #[test]
    fn test_run_through_the_candidate() {
        let constraints = CompiledConstraints::default();
        let board = padded("020222");

        assert!(!is_legal_placement(&board, &constraints, 1, Cell::Sun));
        assert!(is_legal_placement(&board, &constraints, 1, Cell::Moon));
    }

    #[test]
    fn test_run_in_column() {
        let constraints = CompiledConstraints::default();
        let mut board = Board::empty();
        board[0] = Cell::Sun;
        board[SIZE] = Cell::Sun;
        let index = 2 * SIZE;

        assert!(!is_legal_placement(&board, &constraints, index, Cell::Sun));
        assert!(is_legal_placement(&board, &constraints, index, Cell::Moon));
    }

    #[test]
    fn test_blank_breaks_a_run() {
        let constraints = CompiledConstraints::default();
        let board = padded("002222");

        assert!(is_legal_placement(&board, &constraints, 3, Cell::Sun));
    }

    #[test]
    fn test_rules_against_filled_neighbour() {
        let constraints =
            compile_constraints(&[ConstraintPair::equal(0, 1), ConstraintPair::different(1, 7)]);
        let mut board = Board::empty();
        board[0] = Cell::Sun;
        board[7] = Cell::Moon;

        assert!(is_legal_placement(&board, &constraints, 1, Cell::Sun));
        assert!(!is_legal_placement(&board, &constraints, 1, Cell::Moon));
    }

    #[test]
    fn test_rules_ignore_blank_neighbour() {
        let constraints = compile_constraints(&[ConstraintPair::different(0, 1)]);
        let board = Board::empty();

        assert!(is_legal_placement(&board, &constraints, 1, Cell::Sun));
        assert!(is_legal_placement(&board, &constraints, 1, Cell::Moon));
    }

    /// Tries every assignment of the blank cells and reports whether any of
    /// them is a valid solution.
    fn exhaustive_search(board: &Board, constraints: &CompiledConstraints) -> bool {
        let blanks: Vec<usize> = (0..CELLS).filter(|&i| board[i].is_blank()).collect();
        assert!(blanks.len() <= 16, "too many blanks to enumerate");

        (0..1u32 << blanks.len()).any(|mask| {
            let mut candidate = *board;
            for (bit, &index) in blanks.iter().enumerate() {
                candidate[index] = if mask & (1 << bit) == 0 {
                    Cell::Sun
                } else {
                    Cell::Moon
                };
            }
            validate(&candidate, constraints).is_ok()
        })
    }

    fn with_last_rows_blank(rows: usize) -> Board {
        let mut board = board(SOLUTION);
        for index in (CELLS - rows * SIZE)..CELLS {
            board[index] = Cell::Blank;
        }
        board
    }

    #[test]
    fn test_agrees_with_exhaustive_search() {
        let cases = [
            vec![],
            vec![ConstraintPair::equal(30, 31)],
            vec![ConstraintPair::different(30, 31)],
            vec![
                ConstraintPair::different(24, 25),
                ConstraintPair::equal(24, 30),
            ],
            vec![
                ConstraintPair::equal(28, 29),
                ConstraintPair::equal(34, 35),
            ],
            vec![ConstraintPair::equal(18, 24)],
        ];

        for pairs in cases {
            let constraints = compile_constraints(&pairs);
            let initial = with_last_rows_blank(2);
            let mut board = initial;

            let expected = exhaustive_search(&initial, &constraints);
            let solved = solve(&mut board, &constraints);

            assert_eq!(solved, expected, "pairs {pairs:?}");
            if solved {
                assert_eq!(validate(&board, &constraints), Ok(()));
            } else {
                assert_eq!(board, initial);
            }
        }
    }

    #[test]
    fn test_random_holes_always_solve() {
        let constraints = compile_constraints(&puzzle_pairs());
        let solution = board(SOLUTION);
        let mut rng = fastrand::Rng::with_seed(0x7a6e_60);

        for _ in 0..200 {
            let mut initial = solution;
            for index in 0..CELLS {
                if rng.bool() {
                    initial[index] = Cell::Blank;
                }
            }

            let mut board = initial;
            assert!(
                solve(&mut board, &constraints),
                "failed on {}",
                initial.to_digits()
            );
            assert_eq!(validate(&board, &constraints), Ok(()));
            for index in 0..CELLS {
                if !initial[index].is_blank() {
                    assert_eq!(board[index], initial[index]);
                }
            }
        }
    }
}
