//! This module contains the types exchanged with an embedding front end.
//!
//! A front end supplies a board size, an optional starting square and a
//! strategy name; it receives the computed tour as an ordered square
//! sequence plus the effort metrics for display. A tour of `k` squares
//! renders as `k - 1` connected line segments between square centers, in
//! visiting order; everything about that rendering is the front end's
//! business. All types here serialize with serde, so the exchange works
//! across whatever boundary the front end lives behind.

use crate::{Board, Square};
use crate::error::TourResult;
use crate::solver::{
    ClosedTourSolver,
    NaiveSolver,
    Solution,
    Solve,
    Solver,
    StructuredSolver,
    WarnsdorffSolver
};

use serde::{Deserialize, Serialize};

use std::time::Duration;

/// An enumeration of the solver strategies a front end can request, under
/// their kebab-case wire names.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {

    /// The [NaiveSolver]: fixed move order, no pruning heuristic.
    Naive,

    /// The [WarnsdorffSolver] from its default starting square.
    HeuristicOpen,

    /// The [WarnsdorffSolver] from the documented poor starting square (see
    /// [WarnsdorffSolver::poor_start]). An explicit starting square in the
    /// request takes precedence, as it does for every strategy.
    HeuristicOpenBadStart,

    /// The [ClosedTourSolver].
    Closed,

    /// The [StructuredSolver].
    Structural
}

/// A front end's solve request.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TourRequest {

    /// The side length of the square board to tour. Must be greater than 0.
    pub board_size: usize,

    /// The starting square, if the user selected one. Without it, the
    /// strategy's default start is used.
    #[serde(default)]
    pub start: Option<Square>,

    /// The strategy to solve with.
    pub strategy: Strategy
}

fn run_solver<S: Solver>(solver: S, board: &Board, start: Option<Square>)
        -> TourResult<Solve> {
    match start {
        Some(start) => solver.solve_from(board, start),
        None => solver.solve(board)
    }
}

impl TourRequest {

    /// Runs this request: builds the board, dispatches to the requested
    /// strategy and flattens the outcome into a [TourResponse].
    ///
    /// # Errors
    ///
    /// * `TourError::InvalidDimensions` If the board size is zero.
    /// * `TourError::OutOfBounds` If the given starting square lies outside
    /// the board.
    pub fn run(&self) -> TourResult<TourResponse> {
        let board = Board::square(self.board_size)?;
        let solve = match self.strategy {
            Strategy::Naive => run_solver(NaiveSolver, &board, self.start),
            Strategy::HeuristicOpen =>
                run_solver(WarnsdorffSolver, &board, self.start),
            Strategy::HeuristicOpenBadStart => {
                let start = self.start
                    .unwrap_or_else(|| WarnsdorffSolver::poor_start(&board));
                WarnsdorffSolver.solve_from(&board, start)
            },
            Strategy::Closed =>
                run_solver(ClosedTourSolver, &board, self.start),
            Strategy::Structural =>
                run_solver(StructuredSolver, &board, self.start)
        }?;

        Ok(TourResponse::from(solve))
    }
}

/// The outcome handed back to the front end.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TourResponse {

    /// The computed tour in visiting order. Empty whenever `found` is
    /// `false`, so a front end renders "no solution" instead of stale data.
    pub tour: Vec<Square>,

    /// The wall-clock duration of the solve.
    pub elapsed: Duration,

    /// The number of candidate squares the search examined, a measure of
    /// effort independent of hardware.
    pub comparisons: u64,

    /// Whether a tour was found.
    pub found: bool
}

impl From<Solve> for TourResponse {
    fn from(solve: Solve) -> TourResponse {
        let (solution, metrics) = solve.into_parts();
        let (found, tour) = match solution {
            Solution::Complete(tour) => (true, tour.into_squares()),
            Solution::Impossible | Solution::Aborted => (false, Vec::new())
        };

        TourResponse {
            tour,
            elapsed: metrics.elapsed(),
            comparisons: metrics.comparisons(),
            found
        }
    }
}
