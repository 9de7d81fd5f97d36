//! This module contains the generic backtracking search over a board.
//!
//! A [Search] is configured with a [MoveOrdering] that decides in which
//! order candidate moves are tried and an [Acceptance] that decides when a
//! full-length path counts as a finished tour. The solvers in the
//! [solver](crate::solver) module are thin configurations of this engine.

use crate::{Board, Square, Tour};
use crate::error::{TourError, TourResult};
use crate::solver::{Solution, Solve};
use crate::util::VisitMap;

use serde::{Deserialize, Serialize};

use std::time::{Duration, Instant};

/// Effort metrics accumulated over one solve: the wall-clock duration and
/// the comparison counter. One comparison is recorded for every candidate
/// square examined during search, whether or not it is chosen, including
/// squares an ordering inspects while ranking candidates. Since every
/// strategy feeds the same counter, comparison counts are directly
/// comparable across strategies on the same board, independently of
/// hardware.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Metrics {
    comparisons: u64,
    elapsed: Duration
}

impl Metrics {

    /// Creates new metrics with a zero comparison count and zero duration.
    pub fn new() -> Metrics {
        Metrics {
            comparisons: 0,
            elapsed: Duration::from_secs(0)
        }
    }

    /// Records the examination of one candidate square.
    pub fn record_comparison(&mut self) {
        self.comparisons += 1;
    }

    /// Adds the comparison count of another metrics instance to this one.
    /// Composite solvers use this to fold the effort of their sub-solves
    /// into one figure; durations are not added, since the composite
    /// measures its own wall-clock time.
    pub fn tally(&mut self, other: &Metrics) {
        self.comparisons += other.comparisons;
    }

    /// Sets the wall-clock duration of the solve these metrics belong to.
    pub fn set_elapsed(&mut self, elapsed: Duration) {
        self.elapsed = elapsed;
    }

    /// Gets the number of candidate squares examined.
    pub fn comparisons(&self) -> u64 {
        self.comparisons
    }

    /// Gets the wall-clock duration of the solve.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

/// A trait for strategies that decide in which order a search tries
/// candidate moves. The ordering is consulted once per search step with the
/// current square and must return the candidates to try, most promising
/// first.
pub trait MoveOrdering {

    /// Returns the candidate next squares from `from` in the order the
    /// search shall try them. Implementations must record one comparison on
    /// `metrics` for every square they examine while building the order;
    /// the engine separately records every candidate it consumes.
    fn order(&self, board: &Board, visited: &VisitMap, from: Square,
        metrics: &mut Metrics) -> Vec<Square>;
}

/// The fixed move order: candidates come in the board's canonical neighbor
/// order, with no regard for the visit state. This is the order the naive
/// solver searches in.
pub struct CanonicalOrdering;

impl MoveOrdering for CanonicalOrdering {
    fn order(&self, board: &Board, _visited: &VisitMap, from: Square,
            _metrics: &mut Metrics) -> Vec<Square> {
        board.neighbors(from)
    }
}

/// Warnsdorff's rule: unvisited candidates are ranked ascending by the
/// number of unvisited squares reachable from them. Squares with few
/// remaining options become unreachable if not visited soon, so visiting
/// them first avoids most dead ends. Ties keep the canonical order.
pub struct WarnsdorffOrdering;

impl MoveOrdering for WarnsdorffOrdering {
    fn order(&self, board: &Board, visited: &VisitMap, from: Square,
            metrics: &mut Metrics) -> Vec<Square> {
        let mut ranked: Vec<(usize, Square)> = Vec::new();

        for candidate in board.neighbors(from) {
            if visited.is_visited(candidate) {
                continue;
            }

            let mut onward = 0;

            for next in board.neighbors(candidate) {
                metrics.record_comparison();

                if !visited.is_visited(next) {
                    onward += 1;
                }
            }

            ranked.push((onward, candidate));
        }

        // stable sort; ties keep the canonical order
        ranked.sort_by_key(|&(onward, _)| onward);
        ranked.into_iter().map(|(_, candidate)| candidate).collect()
    }
}

/// A trait for the test that decides whether a full-length path is a
/// finished tour.
pub trait Acceptance {

    /// Indicates whether the given path is a finished tour of the board.
    /// The engine only consults this once the path covers the whole board,
    /// but implementations check the length themselves as well.
    fn accept(&self, board: &Board, path: &[Square]) -> bool;
}

/// Accepts any path that visits every square of the board. This yields open
/// tours, which may end anywhere.
pub struct OpenAcceptance;

impl Acceptance for OpenAcceptance {
    fn accept(&self, board: &Board, path: &[Square]) -> bool {
        path.len() == board.square_count()
    }
}

/// Accepts a path that visits every square of the board *and* ends one
/// knight move away from its starting square, so that the tour closes into
/// a cycle. A merely open full-length path is rejected, which sends the
/// search back into its backtracking path.
pub struct ClosedAcceptance;

impl Acceptance for ClosedAcceptance {
    fn accept(&self, board: &Board, path: &[Square]) -> bool {
        if path.len() != board.square_count() {
            return false;
        }

        match (path.first(), path.last()) {
            (Some(&first), Some(&last)) =>
                path.len() > 1 && first.is_knight_move(last),
            _ => false
        }
    }
}

enum Status {
    Found,
    Exhausted,
    Aborted
}

/// A depth-first recursive backtracking search for a tour on one board.
///
/// The search owns nothing between runs; every [Search::run] creates a
/// fresh [VisitMap], path and [Metrics], so no state leaks across solves
/// and a failed run leaves nothing behind.
///
/// An optional comparison limit bounds the total search effort. It is
/// checked at every recursive step; once the counter passes the limit, the
/// run ends with [Solution::Aborted] instead of searching on arbitrarily
/// long.
pub struct Search<'a, O: MoveOrdering, A: Acceptance> {
    board: &'a Board,
    ordering: O,
    acceptance: A,
    limit: Option<u64>
}

impl<'a, O: MoveOrdering, A: Acceptance> Search<'a, O, A> {

    /// Creates a new search on the given board with the given move ordering
    /// and acceptance test and no effort limit.
    pub fn new(board: &'a Board, ordering: O, acceptance: A)
            -> Search<'a, O, A> {
        Search {
            board,
            ordering,
            acceptance,
            limit: None
        }
    }

    /// Sets the effort limit of this search to the given number of
    /// comparisons.
    pub fn with_limit(mut self, limit: u64) -> Search<'a, O, A> {
        self.limit = Some(limit);
        self
    }

    /// Runs the search from the given starting square and returns the
    /// outcome together with its metrics.
    ///
    /// # Errors
    ///
    /// If `start` lies outside the board. In that case,
    /// `TourError::OutOfBounds` is returned.
    pub fn run(&self, start: Square) -> TourResult<Solve> {
        if !self.board.in_bounds(start) {
            return Err(TourError::OutOfBounds);
        }

        let clock = Instant::now();
        let mut metrics = Metrics::new();
        let mut visited =
            VisitMap::new(self.board.width(), self.board.height());
        let mut path = Vec::with_capacity(self.board.square_count());

        visited.mark(start)?;
        path.push(start);

        let status = self.run_rec(&mut visited, &mut path, &mut metrics);

        metrics.set_elapsed(clock.elapsed());

        let solution = match status {
            Status::Found => Solution::Complete(Tour::new(path)),
            Status::Exhausted => Solution::Impossible,
            Status::Aborted => Solution::Aborted
        };

        Ok(Solve::new(solution, metrics))
    }

    fn run_rec(&self, visited: &mut VisitMap, path: &mut Vec<Square>,
            metrics: &mut Metrics) -> Status {
        if path.len() == self.board.square_count() {
            return if self.acceptance.accept(self.board, path) {
                Status::Found
            }
            else {
                Status::Exhausted
            };
        }

        if let Some(limit) = self.limit {
            if metrics.comparisons() >= limit {
                return Status::Aborted;
            }
        }

        let current = *path.last().unwrap();

        for candidate in
                self.ordering.order(self.board, visited, current, metrics) {
            metrics.record_comparison();

            if visited.is_visited(candidate) {
                continue;
            }

            visited.mark(candidate).unwrap();
            path.push(candidate);

            match self.run_rec(visited, path, metrics) {
                Status::Exhausted => {
                    path.pop();
                    visited.unmark(candidate).unwrap();
                },
                done => return done
            }
        }

        Status::Exhausted
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn single_square_board_has_trivial_tour() {
        let board = Board::square(1).unwrap();
        let solve = Search::new(&board, CanonicalOrdering, OpenAcceptance)
            .run(Square::new(0, 0))
            .unwrap();

        if let Solution::Complete(tour) = solve.solution() {
            assert_eq!(&[Square::new(0, 0)], tour.squares());
        }
        else {
            panic!("single square board must yield the trivial tour");
        }

        assert_eq!(0, solve.metrics().comparisons());
    }

    #[test]
    fn single_square_board_has_no_closed_tour() {
        let board = Board::square(1).unwrap();
        let solve = Search::new(&board, CanonicalOrdering, ClosedAcceptance)
            .run(Square::new(0, 0))
            .unwrap();

        assert_eq!(&Solution::Impossible, solve.solution());
    }

    #[test]
    fn start_outside_board_is_rejected() {
        let board = Board::square(4).unwrap();
        let result = Search::new(&board, CanonicalOrdering, OpenAcceptance)
            .run(Square::new(4, 0));

        assert!(matches!(result, Err(TourError::OutOfBounds)));
    }

    #[test]
    fn naive_search_finds_tour_on_5x5() {
        let board = Board::square(5).unwrap();
        let solve = Search::new(&board, CanonicalOrdering, OpenAcceptance)
            .run(Square::new(0, 0))
            .unwrap();

        if let Solution::Complete(tour) = solve.solution() {
            assert!(tour.is_complete_tour_of(&board));
            assert_eq!(Square::new(0, 0), tour.squares()[0]);
        }
        else {
            panic!("naive search on 5x5 found no tour");
        }

        assert!(solve.metrics().comparisons() > 0);
    }

    #[test]
    fn exceeding_the_limit_aborts() {
        let board = Board::square(8).unwrap();
        let solve = Search::new(&board, WarnsdorffOrdering, OpenAcceptance)
            .with_limit(5)
            .run(Square::new(0, 0))
            .unwrap();

        assert_eq!(&Solution::Aborted, solve.solution());
    }

    #[test]
    fn warnsdorff_ordering_counts_examined_squares() {
        let board = Board::square(5).unwrap();
        let mut visited = VisitMap::new(5, 5);
        let mut metrics = Metrics::new();

        visited.mark(Square::new(0, 0)).unwrap();

        let order = WarnsdorffOrdering.order(&board, &visited,
            Square::new(0, 0), &mut metrics);

        // both candidates have six in-bounds onward squares
        assert_eq!(2, order.len());
        assert_eq!(12, metrics.comparisons());
    }

    #[test]
    fn warnsdorff_ordering_prefers_fewest_onward_moves() {
        let board = Board::square(5).unwrap();
        let mut visited = VisitMap::new(5, 5);
        let mut metrics = Metrics::new();

        // blocking two onward squares of (1, 2) makes it the tighter choice
        visited.mark(Square::new(0, 0)).unwrap();
        visited.mark(Square::new(2, 0)).unwrap();
        visited.mark(Square::new(3, 1)).unwrap();

        let order = WarnsdorffOrdering.order(&board, &visited,
            Square::new(0, 0), &mut metrics);

        assert_eq!(vec![Square::new(1, 2), Square::new(2, 1)], order);
    }

    #[test]
    fn warnsdorff_ordering_keeps_canonical_order_on_ties() {
        let board = Board::square(5).unwrap();
        let mut visited = VisitMap::new(5, 5);
        let mut metrics = Metrics::new();

        visited.mark(Square::new(0, 0)).unwrap();

        let order = WarnsdorffOrdering.order(&board, &visited,
            Square::new(0, 0), &mut metrics);

        assert_eq!(vec![Square::new(2, 1), Square::new(1, 2)], order);
    }

    #[test]
    fn closed_acceptance_requires_closing_move() {
        let board = Board::new(3, 2).unwrap();
        let closing = vec![
            Square::new(0, 0),
            Square::new(0, 1),
            Square::new(1, 0),
            Square::new(1, 1),
            Square::new(2, 0),
            Square::new(2, 1)
        ];
        let open = vec![
            Square::new(0, 0),
            Square::new(0, 1),
            Square::new(1, 0),
            Square::new(1, 1),
            Square::new(2, 1),
            Square::new(2, 0)
        ];

        // the acceptance test only inspects length and endpoints
        assert!(ClosedAcceptance.accept(&board, &closing));
        assert!(!ClosedAcceptance.accept(&board, &open));
        assert!(!ClosedAcceptance.accept(&board, &closing[..5]));
        assert!(OpenAcceptance.accept(&board, &open));
        assert!(!OpenAcceptance.accept(&board, &open[..5]));
    }
}
