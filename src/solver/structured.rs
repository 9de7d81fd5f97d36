//! This module contains the divide-and-conquer construction that scales
//! closed tours to large boards.
//!
//! The board is partitioned into quadrants, each quadrant is solved as an
//! independent closed tour, and adjacent tours are then cut open at one
//! edge each and relinked across the boundary into a single longer closed
//! tour. Since every intermediate result is itself a closed tour, the
//! construction composes recursively.

use super::{ClosedTourSolver, Solution, Solve, Solver, WarnsdorffSolver};
use crate::{Board, Square, Tour};
use crate::engine::Metrics;
use crate::error::{TourError, TourResult};

use std::time::Instant;

/// A dimension is split while it is even and at least this long. Splitting
/// always produces two even parts of length at least 6, so every part
/// admits a closed tour of its own.
const SPLIT_MIN: usize = 12;

/// If stitching fails, boards up to this side length are retried with a
/// direct whole-board closed search before the solve reports failure.
const RETRY_MAX: usize = 16;

/// A [Solver] which constructs closed tours on large boards by divide and
/// conquer instead of searching the whole board at once: quadrants are
/// solved as independent closed tours and stitched together at their
/// boundaries. Small boards are handed to the direct closed search, and
/// boards that admit no closed tour at all (see
/// [Board::admits_closed_tour]) fall back to the open heuristic search, so
/// large odd boards still receive an open tour.
///
/// The stitched cycle is verified before it is returned; a join failure
/// ends in [Solution::Impossible], never in an invalid square sequence.
pub struct StructuredSolver;

impl Solver for StructuredSolver {
    fn solve_from(&self, board: &Board, start: Square) -> TourResult<Solve> {
        if !board.in_bounds(start) {
            return Err(TourError::OutOfBounds);
        }

        if !board.admits_closed_tour() {
            return WarnsdorffSolver.solve_from(board, start);
        }

        let clock = Instant::now();
        let mut metrics = Metrics::new();
        let mut cycle = closed_cycle(board, &mut metrics);
        let longest = board.width().max(board.height());

        if cycle.is_none() && longest >= SPLIT_MIN && longest <= RETRY_MAX {
            cycle = direct_cycle(board, &mut metrics);
        }

        let solution = match cycle {
            Some(cycle) => {
                let tour = Tour::new(rotate_to(cycle, start));

                if tour.is_closed_tour_of(board) {
                    Solution::Complete(tour)
                }
                else {
                    Solution::Impossible
                }
            },
            None => Solution::Impossible
        };

        metrics.set_elapsed(clock.elapsed());
        Ok(Solve::new(solution, metrics))
    }
}

/// Splits an even length into two even parts, the second at least as long
/// as the first.
fn split_even(length: usize) -> (usize, usize) {
    let mut first = length / 2;

    if first % 2 == 1 {
        first -= 1;
    }

    (first, length - first)
}

fn translate(cycle: Vec<Square>, dx: usize, dy: usize) -> Vec<Square> {
    cycle.into_iter()
        .map(|square| Square::new(square.x() + dx, square.y() + dy))
        .collect()
}

fn rotate_to(mut cycle: Vec<Square>, start: Square) -> Vec<Square> {
    if let Some(position) = cycle.iter().position(|&square| square == start) {
        cycle.rotate_left(position);
    }

    cycle
}

enum Axis {
    Vertical,
    Horizontal
}

impl Axis {
    fn coordinate(&self, square: Square) -> usize {
        match self {
            Axis::Vertical => square.x(),
            Axis::Horizontal => square.y()
        }
    }
}

/// Solves the given board as one closed cycle, splitting dimensions that
/// are even and long enough and stitching the partial cycles back together.
fn closed_cycle(board: &Board, metrics: &mut Metrics)
        -> Option<Vec<Square>> {
    let width = board.width();
    let height = board.height();
    let split_width = width % 2 == 0 && width >= SPLIT_MIN;
    let split_height = height % 2 == 0 && height >= SPLIT_MIN;

    if split_width && split_height {
        let (left, right) = split_even(width);
        let (upper, lower) = split_even(height);
        let top_left =
            closed_cycle(&Board::new(left, upper).unwrap(), metrics)?;
        let top_right = translate(
            closed_cycle(&Board::new(right, upper).unwrap(), metrics)?,
            left, 0);
        let bottom_left = translate(
            closed_cycle(&Board::new(left, lower).unwrap(), metrics)?,
            0, upper);
        let bottom_right = translate(
            closed_cycle(&Board::new(right, lower).unwrap(), metrics)?,
            left, upper);
        let top = merge_cycles(&top_left, &top_right, Axis::Vertical, left,
            metrics)?;
        let bottom = merge_cycles(&bottom_left, &bottom_right,
            Axis::Vertical, left, metrics)?;
        merge_cycles(&top, &bottom, Axis::Horizontal, upper, metrics)
    }
    else if split_width {
        let (left, right) = split_even(width);
        let low = closed_cycle(&Board::new(left, height).unwrap(), metrics)?;
        let high = translate(
            closed_cycle(&Board::new(right, height).unwrap(), metrics)?,
            left, 0);
        merge_cycles(&low, &high, Axis::Vertical, left, metrics)
    }
    else if split_height {
        let (upper, lower) = split_even(height);
        let low = closed_cycle(&Board::new(width, upper).unwrap(), metrics)?;
        let high = translate(
            closed_cycle(&Board::new(width, lower).unwrap(), metrics)?,
            0, upper);
        merge_cycles(&low, &high, Axis::Horizontal, upper, metrics)
    }
    else {
        direct_cycle(board, metrics)
    }
}

/// Computes a closed cycle on the given board with the direct closed
/// search, folding its comparison count into the running metrics.
fn direct_cycle(board: &Board, metrics: &mut Metrics)
        -> Option<Vec<Square>> {
    let solve = ClosedTourSolver.solve_from(board, Square::new(0, 0))
        .unwrap();
    let (solution, sub_metrics) = solve.into_parts();

    metrics.tally(&sub_metrics);

    match solution {
        Solution::Complete(tour) => Some(tour.into_squares()),
        _ => None
    }
}

/// Collects the indices of cycle edges whose squares lie within knight
/// range of the boundary. Only such edges can be relinked across it.
fn boundary_edges(cycle: &[Square], axis: &Axis, boundary: usize,
        low_side: bool) -> Vec<usize> {
    (0..cycle.len())
        .filter(|&i| {
            let a = axis.coordinate(cycle[i]);
            let b = axis.coordinate(cycle[(i + 1) % cycle.len()]);

            if low_side {
                a + 2 >= boundary && b + 2 >= boundary
            }
            else {
                a < boundary + 2 && b < boundary + 2
            }
        })
        .collect()
}

/// Merges two closed cycles on opposite sides of a boundary into one. The
/// merge cuts one edge out of each cycle, `(a1, a2)` and `(b1, b2)`, such
/// that `a1-b1` and `a2-b2` are knight moves, and relinks along those
/// moves. Every candidate edge pair examined counts as one comparison.
fn merge_cycles(low: &[Square], high: &[Square], axis: Axis,
        boundary: usize, metrics: &mut Metrics) -> Option<Vec<Square>> {
    let low_edges = boundary_edges(low, &axis, boundary, true);
    let high_edges = boundary_edges(high, &axis, boundary, false);

    for &i in &low_edges {
        let a1 = low[i];
        let a2 = low[(i + 1) % low.len()];

        for &j in &high_edges {
            metrics.record_comparison();

            let b1 = high[j];
            let b2 = high[(j + 1) % high.len()];

            if a1.is_knight_move(b1) && a2.is_knight_move(b2) {
                return Some(relink(low, i, high, j));
            }
        }
    }

    None
}

fn relink(low: &[Square], i: usize, high: &[Square], j: usize)
        -> Vec<Square> {
    let mut cycle = Vec::with_capacity(low.len() + high.len());

    // all of `low`, starting after the cut edge and ending on it
    for k in 0..low.len() {
        cycle.push(low[(i + 1 + k) % low.len()]);
    }

    // all of `high` traversed backwards, entering at the cut edge
    for k in 0..high.len() {
        cycle.push(high[(j + high.len() - k) % high.len()]);
    }

    cycle
}
