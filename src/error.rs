//! This module contains the error and result definitions used in this crate.

/// Errors raised when a solve request carries invalid inputs. Note that a
/// search that finds no tour is *not* an error; that outcome is modeled by
/// [Solution::Impossible](crate::solver::Solution::Impossible) so that it
/// stays distinguishable from bad input at the request boundary.
#[derive(Debug, Eq, PartialEq)]
pub enum TourError {

    /// Indicates that the dimensions specified for a created board are
    /// invalid. This is the case if they are less than 1.
    InvalidDimensions,

    /// Indicates that the specified square (column and row) lies outside
    /// the board in question. This is the case if either coordinate is
    /// greater than or equal to the corresponding dimension.
    OutOfBounds
}

/// Syntactic sugar for `Result<V, TourError>`.
pub type TourResult<V> = Result<V, TourError>;
