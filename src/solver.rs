//! This module contains the logic for computing tours.
//!
//! Most importantly, this module contains the definition of the [Solver]
//! trait and its implementations of increasing sophistication: the
//! [NaiveSolver], the [WarnsdorffSolver], the [ClosedTourSolver] and the
//! [StructuredSolver]. All of them are thin configurations of the search
//! engine in the [engine](crate::engine) module.

mod structured;

pub use self::structured::StructuredSolver;

use crate::{Board, Square, Tour};
use crate::engine::{
    CanonicalOrdering,
    ClosedAcceptance,
    Metrics,
    OpenAcceptance,
    Search,
    WarnsdorffOrdering
};
use crate::error::{TourError, TourResult};

use serde::{Deserialize, Serialize};

/// Comparison budget per board square for the open heuristic search. A run
/// without backtracking stays well below 100 comparisons per square; the
/// budget leaves room for several orders of magnitude more before the
/// search is cut off.
const HEURISTIC_EFFORT_PER_SQUARE: u64 = 10_000;

/// Comparison budget per board square for the closed search, which rejects
/// merely open full-length paths and therefore backtracks considerably more
/// than the open heuristic search.
const CLOSED_EFFORT_PER_SQUARE: u64 = 200_000;

fn effort_limit(board: &Board, per_square: u64) -> u64 {
    board.square_count() as u64 * per_square
}

/// An enumeration of the different ways a solve can end. Finding no tour is
/// an ordinary outcome, not an error: front ends render it as "no
/// solution".
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Solution {

    /// A complete tour was found, which is wrapped in this instance.
    Complete(Tour),

    /// The search space was exhausted without finding a tour, or the board
    /// provably admits none.
    Impossible,

    /// The solver's effort budget ran out before the search could finish.
    /// The board may still have a tour.
    Aborted
}

/// The outcome of one solve invocation: a [Solution] bundled with the
/// [Metrics] accumulated while computing it. Each solve returns a fresh
/// value; no result state is shared across invocations.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Solve {
    solution: Solution,
    metrics: Metrics
}

impl Solve {

    /// Creates a new solve outcome from the given solution and metrics.
    pub fn new(solution: Solution, metrics: Metrics) -> Solve {
        Solve {
            solution,
            metrics
        }
    }

    /// Gets the solution of this solve.
    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    /// Gets the metrics accumulated while computing the solution.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Decomposes this solve into its solution and metrics.
    pub fn into_parts(self) -> (Solution, Metrics) {
        (self.solution, self.metrics)
    }
}

/// A trait for structs which have the ability to compute tours on a board.
/// Implementations differ in their move ordering, their acceptance test and
/// their effort bounds, which makes their comparison counts directly
/// comparable on the same board.
pub trait Solver {

    /// Computes, or attempts to compute, a tour starting on the given
    /// square.
    ///
    /// # Errors
    ///
    /// If `start` lies outside the board. In that case,
    /// `TourError::OutOfBounds` is returned.
    fn solve_from(&self, board: &Board, start: Square) -> TourResult<Solve>;

    /// Gets the starting square this solver uses when the caller does not
    /// supply one. Unless overridden, this is the corner square `(0, 0)`.
    fn default_start(&self, _board: &Board) -> Square {
        Square::new(0, 0)
    }

    /// Computes, or attempts to compute, a tour from this solver's default
    /// starting square.
    ///
    /// # Errors
    ///
    /// If the default starting square lies outside the board, which does
    /// not happen for the solvers in this crate.
    fn solve(&self, board: &Board) -> TourResult<Solve> {
        self.solve_from(board, self.default_start(board))
    }
}

/// A [Solver] which tries moves in the board's canonical neighbor order
/// with no pruning heuristic. Its worst-case runtime is exponential, so it
/// may take impractically long on boards beyond 6x6; the heuristic solvers
/// exist to avoid exactly that. It is deliberately unbudgeted, which makes
/// it the reference point for comparison counts on small boards.
pub struct NaiveSolver;

impl Solver for NaiveSolver {
    fn solve_from(&self, board: &Board, start: Square) -> TourResult<Solve> {
        Search::new(board, CanonicalOrdering, OpenAcceptance).run(start)
    }
}

/// A [Solver] which orders moves by Warnsdorff's rule: the candidate with
/// the fewest onward options is tried first, with ties broken by the
/// canonical order. On most boards this finds an open tour almost without
/// backtracking.
///
/// The default starting square is the corner, on which the heuristic is
/// known to behave well. Arbitrary starting squares are accepted, but for
/// some of them the rule guides the search poorly; such runs end in
/// [Solution::Aborted] once the effort budget is spent, or in
/// [Solution::Impossible] if the search space runs dry, rather than running
/// arbitrarily long.
pub struct WarnsdorffSolver;

impl WarnsdorffSolver {

    /// Gets a starting square on which Warnsdorff's rule has historically
    /// struggled on common board sizes: the center of the board. Running
    /// [Solver::solve_from] on it may legitimately find no tour even though
    /// the default start succeeds; that is a known limitation of the
    /// heuristic, not a defect.
    pub fn poor_start(board: &Board) -> Square {
        Square::new(board.width() / 2, board.height() / 2)
    }
}

impl Solver for WarnsdorffSolver {
    fn solve_from(&self, board: &Board, start: Square) -> TourResult<Solve> {
        Search::new(board, WarnsdorffOrdering, OpenAcceptance)
            .with_limit(effort_limit(board, HEURISTIC_EFFORT_PER_SQUARE))
            .run(start)
    }
}

/// A [Solver] which computes closed tours: the final square must be one
/// knight move away from the starting square, so the tour forms a cycle.
/// Moves are ordered by Warnsdorff's rule as in the [WarnsdorffSolver], but
/// a merely open full-length path is rejected and the search backtracks
/// further.
///
/// Boards on which no closed tour exists at all (see
/// [Board::admits_closed_tour]) are answered [Solution::Impossible] without
/// any search. For the remaining boards, a comparison budget bounds the
/// total effort.
pub struct ClosedTourSolver;

impl Solver for ClosedTourSolver {
    fn solve_from(&self, board: &Board, start: Square) -> TourResult<Solve> {
        if !board.in_bounds(start) {
            return Err(TourError::OutOfBounds);
        }

        if !board.admits_closed_tour() {
            return Ok(Solve::new(Solution::Impossible, Metrics::new()));
        }

        Search::new(board, WarnsdorffOrdering, ClosedAcceptance)
            .with_limit(effort_limit(board, CLOSED_EFFORT_PER_SQUARE))
            .run(start)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn expect_complete(solve: Solve, board: &Board) -> Tour {
        match solve.into_parts().0 {
            Solution::Complete(tour) => {
                assert!(tour.is_complete_tour_of(board),
                    "solver produced an invalid tour");
                tour
            },
            solution => panic!("expected a complete tour, got {:?}", solution)
        }
    }

    #[test]
    fn naive_solves_5x5_from_corner() {
        let board = Board::square(5).unwrap();
        let solve = NaiveSolver.solve_from(&board, Square::new(0, 0)).unwrap();

        assert!(solve.metrics().comparisons() > 0);

        let tour = expect_complete(solve, &board);

        assert_eq!(25, tour.len());
        assert_eq!(Square::new(0, 0), tour.squares()[0]);
    }

    #[test]
    fn naive_rejects_start_outside_board() {
        let board = Board::square(5).unwrap();
        let result = NaiveSolver.solve_from(&board, Square::new(5, 2));

        assert_eq!(Err(TourError::OutOfBounds), result.map(|_| ()));
    }

    #[test]
    fn naive_finds_no_tour_on_3x3() {
        let board = Board::square(3).unwrap();
        let solve = NaiveSolver.solve(&board).unwrap();

        assert_eq!(&Solution::Impossible, solve.solution());
    }

    #[test]
    fn single_square_board_yields_trivial_tour() {
        let board = Board::square(1).unwrap();
        let solve = NaiveSolver.solve(&board).unwrap();

        assert_eq!(0, solve.metrics().comparisons());

        let tour = expect_complete(solve, &board);

        assert_eq!(1, tour.len());
    }

    #[test]
    fn warnsdorff_solves_8x8_by_default() {
        let board = Board::square(8).unwrap();
        let solve = WarnsdorffSolver.solve(&board).unwrap();
        let tour = expect_complete(solve, &board);

        assert_eq!(64, tour.len());
        assert_eq!(Square::new(0, 0), tour.squares()[0]);
    }

    #[test]
    fn warnsdorff_solves_6x6() {
        let board = Board::square(6).unwrap();
        let solve = WarnsdorffSolver.solve(&board).unwrap();

        expect_complete(solve, &board);
    }

    #[test]
    fn warnsdorff_finds_no_tour_on_4x4() {
        let board = Board::square(4).unwrap();
        let solve = WarnsdorffSolver.solve(&board).unwrap();

        assert_eq!(&Solution::Impossible, solve.solution());
    }

    #[test]
    fn warnsdorff_beats_naive_on_comparisons() {
        let board = Board::square(5).unwrap();
        let start = Square::new(0, 0);
        let naive = NaiveSolver.solve_from(&board, start).unwrap();
        let heuristic = WarnsdorffSolver.solve_from(&board, start).unwrap();

        expect_complete(heuristic.clone(), &board);
        assert!(naive.metrics().comparisons()
            > heuristic.metrics().comparisons());
    }

    #[test]
    fn warnsdorff_is_deterministic() {
        let board = Board::square(8).unwrap();
        let first = WarnsdorffSolver.solve(&board).unwrap();
        let second = WarnsdorffSolver.solve(&board).unwrap();

        assert_eq!(first.solution(), second.solution());
        assert_eq!(first.metrics().comparisons(),
            second.metrics().comparisons());
    }

    #[test]
    fn poor_start_terminates_on_8x8() {
        let board = Board::square(8).unwrap();
        let start = WarnsdorffSolver::poor_start(&board);
        let solve = WarnsdorffSolver.solve_from(&board, start).unwrap();

        // the heuristic may or may not cope with this start; either way
        // the run must end with a definite outcome
        match solve.into_parts().0 {
            Solution::Complete(tour) => {
                assert!(tour.is_complete_tour_of(&board));
                assert_eq!(start, tour.squares()[0]);
            },
            Solution::Impossible | Solution::Aborted => { }
        }
    }

    #[test]
    fn closed_solver_solves_6x6() {
        let board = Board::square(6).unwrap();
        let solve = ClosedTourSolver.solve(&board).unwrap();
        let tour = expect_complete(solve, &board);

        assert!(tour.is_closed_tour_of(&board));
        assert_eq!(Square::new(0, 0), tour.squares()[0]);
    }

    #[test]
    fn closed_solver_honors_explicit_start() {
        let board = Board::square(6).unwrap();
        let start = Square::new(3, 3);
        let solve = ClosedTourSolver.solve_from(&board, start).unwrap();
        let tour = expect_complete(solve, &board);

        assert!(tour.is_closed_tour_of(&board));
        assert_eq!(start, tour.squares()[0]);
    }

    #[test]
    fn closed_solver_rejects_impossible_boards_without_search() {
        for size in &[2usize, 3, 4, 5, 7] {
            let board = Board::square(*size).unwrap();
            let solve = ClosedTourSolver.solve(&board).unwrap();

            assert_eq!(&Solution::Impossible, solve.solution(),
                "no closed tour exists on {0}x{0}", size);
            assert_eq!(0, solve.metrics().comparisons());
        }
    }
}
