// Code lints

#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_import_braces)]
#![warn(unused_lifetimes)]
#![warn(unused_qualifications)]

// Doc lints

#![warn(missing_docs)]

//! This crate implements an easy-to-understand and flexible Knight's Tour
//! engine. A Knight's Tour is a sequence of knight moves on a chessboard that
//! visits every square exactly once. The crate supports the following key
//! features:
//!
//! * A board model for arbitrary rectangular boards with the canonical
//! knight-move enumeration
//! * A generic backtracking search engine with pluggable move ordering and
//! acceptance tests
//! * Solvers of increasing sophistication: plain backtracking, backtracking
//! guided by Warnsdorff's rule, closed-tour search and a divide-and-conquer
//! construction for large boards
//! * Effort metrics (wall-clock time and a comparison counter) for comparing
//! strategies independently of hardware
//! * A serializable request/response boundary for embedding front ends
//!
//! # Computing a tour
//!
//! Each solver is a zero-sized struct implementing the
//! [Solver](solver::Solver) trait. The heuristic solver finds tours on
//! common board sizes almost without backtracking:
//!
//! ```
//! use knights_tour::Board;
//! use knights_tour::solver::{Solution, Solver, WarnsdorffSolver};
//!
//! let board = Board::square(8).unwrap();
//! let solve = WarnsdorffSolver.solve(&board).unwrap();
//!
//! match solve.solution() {
//!     Solution::Complete(tour) => {
//!         assert!(tour.is_complete_tour_of(&board));
//!         assert_eq!(64, tour.len());
//!     },
//!     _ => panic!("corner start expected to succeed")
//! }
//! ```
//!
//! # Closed tours
//!
//! A closed tour additionally ends one knight move away from its starting
//! square. Boards on which no closed tour exists are answered without any
//! search:
//!
//! ```
//! use knights_tour::Board;
//! use knights_tour::solver::{ClosedTourSolver, Solution, Solver};
//!
//! let board = Board::square(6).unwrap();
//! let solve = ClosedTourSolver.solve(&board).unwrap();
//!
//! match solve.solution() {
//!     Solution::Complete(tour) => assert!(tour.is_closed_tour_of(&board)),
//!     _ => panic!("6x6 boards have closed tours")
//! }
//!
//! let odd = Board::square(5).unwrap();
//! let solve = ClosedTourSolver.solve(&odd).unwrap();
//! assert_eq!(&Solution::Impossible, solve.solution());
//! ```
//!
//! # Serving a front end
//!
//! Front ends communicate through the [request] module, which selects a
//! solver by name and flattens the result into a serializable response:
//!
//! ```
//! use knights_tour::request::TourRequest;
//!
//! let request: TourRequest =
//!     serde_json::from_str(r#"{"board_size":5,"strategy":"naive"}"#)
//!         .unwrap();
//! let response = request.run().unwrap();
//!
//! assert!(response.found);
//! assert_eq!(25, response.tour.len());
//! ```
//!
//! # Note regarding performance
//!
//! The naive solver intentionally performs unpruned exponential search and
//! can take a very long time on boards beyond 6x6; the heuristic solvers
//! stay fast far beyond that. In any case, it is strongly recommended to use
//! at least `opt-level = 2`, even in tests that run searches.

pub mod engine;
pub mod error;
pub mod request;
pub mod solver;
pub mod util;

use error::{TourError, TourResult};
use util::VisitMap;

use serde::{Deserialize, Serialize};

/// The eight knight-move offsets in the canonical order used throughout this
/// crate. The naive solver tries moves in exactly this order, and the
/// heuristic solvers use it to break ties.
const KNIGHT_MOVES: [(isize, isize); 8] = [
    (-1, -2),
    (1, -2),
    (-2, -1),
    (2, -1),
    (-2, 1),
    (2, 1),
    (-1, 2),
    (1, 2)
];

/// One square of a [Board], identified by its column and row coordinates.
/// This is a plain value type; two squares with equal coordinates are the
/// same square.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Square {
    x: usize,
    y: usize
}

impl Square {

    /// Creates a new square with the given coordinates. Note that squares
    /// are not tied to a board; use [Board::in_bounds] to check whether a
    /// square lies on a particular board.
    ///
    /// # Arguments
    ///
    /// * `x`: The column (x-coordinate) of the square.
    /// * `y`: The row (y-coordinate) of the square.
    pub fn new(x: usize, y: usize) -> Square {
        Square {
            x,
            y
        }
    }

    /// Gets the column (x-coordinate) of this square.
    pub fn x(&self) -> usize {
        self.x
    }

    /// Gets the row (y-coordinate) of this square.
    pub fn y(&self) -> usize {
        self.y
    }

    /// Indicates whether a knight standing on this square could reach
    /// `other` in one move, that is, whether the absolute coordinate
    /// differences are 1 and 2 in some order.
    pub fn is_knight_move(&self, other: Square) -> bool {
        let dx = self.x.max(other.x) - self.x.min(other.x);
        let dy = self.y.max(other.y) - self.y.min(other.y);
        dx == 1 && dy == 2 || dx == 2 && dy == 1
    }
}

/// A rectangular chessboard on which tours are computed. The board is
/// immutable for the lifetime of a solve; it only describes the geometry and
/// enumerates legal knight moves.
///
/// Front ends usually deal in square boards (see [Board::square]), but the
/// divide-and-conquer construction partitions those into rectangular
/// sub-boards, so the general shape is supported directly.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Board {
    width: usize,
    height: usize
}

impl Board {

    /// Creates a new board with the given dimensions.
    ///
    /// # Arguments
    ///
    /// * `width`: The number of columns of the board. Must be greater than 0.
    /// * `height`: The number of rows of the board. Must be greater than 0.
    ///
    /// # Errors
    ///
    /// If `width` or `height` is invalid (zero). In that case,
    /// `TourError::InvalidDimensions` is returned.
    pub fn new(width: usize, height: usize) -> TourResult<Board> {
        if width == 0 || height == 0 {
            return Err(TourError::InvalidDimensions);
        }

        Ok(Board {
            width,
            height
        })
    }

    /// Creates a new square board with the given side length. This is the
    /// shape front ends request.
    ///
    /// # Errors
    ///
    /// If `size` is invalid (zero). In that case,
    /// `TourError::InvalidDimensions` is returned.
    pub fn square(size: usize) -> TourResult<Board> {
        Board::new(size, size)
    }

    /// Gets the number of columns of this board.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Gets the number of rows of this board.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Gets the total number of squares on this board. A complete tour
    /// visits exactly this many squares.
    pub fn square_count(&self) -> usize {
        self.width * self.height
    }

    /// Indicates whether the given square lies on this board, that is,
    /// whether its coordinates are less than the width and height.
    pub fn in_bounds(&self, square: Square) -> bool {
        square.x() < self.width && square.y() < self.height
    }

    fn offset(&self, square: Square, dx: isize, dy: isize) -> Option<Square> {
        let x = square.x() as isize + dx;
        let y = square.y() as isize + dy;

        if x < 0 || y < 0 {
            return None;
        }

        let candidate = Square::new(x as usize, y as usize);

        if self.in_bounds(candidate) {
            Some(candidate)
        }
        else {
            None
        }
    }

    /// Returns all squares on this board that a knight standing on `square`
    /// can reach in one move, in the fixed canonical offset order. This
    /// order is what the naive solver searches in and what the heuristic
    /// solvers fall back to on ties. For a square outside the board, an
    /// empty vector is returned.
    ///
    /// ```
    /// use knights_tour::{Board, Square};
    ///
    /// let board = Board::square(8).unwrap();
    /// let neighbors = board.neighbors(Square::new(0, 0));
    ///
    /// assert_eq!(vec![Square::new(2, 1), Square::new(1, 2)], neighbors);
    /// ```
    pub fn neighbors(&self, square: Square) -> Vec<Square> {
        if !self.in_bounds(square) {
            return Vec::new();
        }

        KNIGHT_MOVES.iter()
            .filter_map(|&(dx, dy)| self.offset(square, dx, dy))
            .collect()
    }

    /// Indicates whether a closed tour exists on this board at all,
    /// following Schwenk's characterization: with `m` the smaller and `n`
    /// the larger dimension, a closed tour exists unless `m` and `n` are
    /// both odd, `m` is 1, 2 or 4, or `m` is 3 and `n` is 4, 6 or 8.
    ///
    /// The closed and divide-and-conquer solvers use this to answer
    /// impossible boards without searching.
    pub fn admits_closed_tour(&self) -> bool {
        let m = self.width.min(self.height);
        let n = self.width.max(self.height);

        if m % 2 == 1 && n % 2 == 1 {
            false
        }
        else if m == 1 || m == 2 || m == 4 {
            false
        }
        else if m == 3 && (n == 4 || n == 6 || n == 8) {
            false
        }
        else {
            true
        }
    }
}

/// An ordered sequence of squares produced by a solver. Consecutive squares
/// of a valid tour are one knight move apart and no square repeats; a
/// complete tour covers its entire board. Tours are immutable once produced
/// and consumed read-only.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Tour {
    squares: Vec<Square>
}

impl Tour {

    /// Creates a new tour from the given square sequence. No validation is
    /// performed here; use [Tour::is_complete_tour_of] and related methods
    /// to check a tour against a board.
    pub fn new(squares: Vec<Square>) -> Tour {
        Tour {
            squares
        }
    }

    /// Gets the squares of this tour in visiting order.
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    /// Gets the number of squares this tour visits.
    pub fn len(&self) -> usize {
        self.squares.len()
    }

    /// Indicates whether this tour visits no squares at all.
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    /// Indicates whether the last square of this tour is one knight move
    /// away from the first, that is, whether the tour closes into a cycle.
    /// Tours with less than two squares are not closed.
    pub fn is_closed(&self) -> bool {
        match (self.squares.first(), self.squares.last()) {
            (Some(&first), Some(&last)) =>
                self.squares.len() > 1 && first.is_knight_move(last),
            _ => false
        }
    }

    /// Indicates whether this tour is a complete, valid tour of the given
    /// board: it visits exactly the board's square count, every square lies
    /// on the board, no square repeats and consecutive squares are one
    /// knight move apart.
    pub fn is_complete_tour_of(&self, board: &Board) -> bool {
        if self.squares.len() != board.square_count() {
            return false;
        }

        let mut visited = VisitMap::new(board.width(), board.height());

        for &square in &self.squares {
            match visited.mark(square) {
                Ok(true) => { },
                _ => return false
            }
        }

        self.squares.windows(2)
            .all(|window| window[0].is_knight_move(window[1]))
    }

    /// Indicates whether this tour is a complete, valid and closed tour of
    /// the given board. See [Tour::is_complete_tour_of] and
    /// [Tour::is_closed].
    pub fn is_closed_tour_of(&self, board: &Board) -> bool {
        self.is_complete_tour_of(board) && self.is_closed()
    }

    /// Converts this tour into its square sequence.
    pub fn into_squares(self) -> Vec<Square> {
        self.squares
    }
}
