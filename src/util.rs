//! This module contains utility functionality needed for this crate. Most
//! prominently, it contains the definition of the [VisitMap] that tracks
//! which squares a search has already visited.

use crate::Square;
use crate::error::{TourError, TourResult};

/// Tracks the squares an in-flight search has visited, together with the
/// order in which they were visited. Every solve owns exactly one fresh
/// `VisitMap`; it is never shared across searches.
///
/// Ordinals are assigned in marking order. They stay consistent as long as
/// squares are unmarked in reverse marking order, which is the discipline
/// the backtracking engine follows.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VisitMap {
    width: usize,
    height: usize,
    ordinals: Vec<Option<usize>>,
    visited: usize
}

impl VisitMap {

    /// Creates a new, empty visit map for a board with the given dimensions.
    ///
    /// # Arguments
    ///
    /// * `width`: The number of columns of the tracked board.
    /// * `height`: The number of rows of the tracked board.
    pub fn new(width: usize, height: usize) -> VisitMap {
        VisitMap {
            width,
            height,
            ordinals: vec![None; width * height],
            visited: 0
        }
    }

    fn index(&self, square: Square) -> TourResult<usize> {
        if square.x() >= self.width || square.y() >= self.height {
            Err(TourError::OutOfBounds)
        }
        else {
            Ok(square.y() * self.width + square.x())
        }
    }

    /// Marks the given square as visited, assigning it the next visit
    /// ordinal.
    ///
    /// This method returns `true` if the map has changed (i.e. the square
    /// was not visited before) and `false` otherwise. An already-visited
    /// square keeps its original ordinal.
    ///
    /// # Errors
    ///
    /// If `square` lies outside the tracked board. In that case,
    /// `TourError::OutOfBounds` is returned.
    pub fn mark(&mut self, square: Square) -> TourResult<bool> {
        let index = self.index(square)?;

        if self.ordinals[index].is_some() {
            Ok(false)
        }
        else {
            self.ordinals[index] = Some(self.visited);
            self.visited += 1;
            Ok(true)
        }
    }

    /// Marks the given square as unvisited again. This is the backtracking
    /// operation; to keep ordinals consistent, squares must be unmarked in
    /// reverse marking order.
    ///
    /// This method returns `true` if the map has changed (i.e. the square
    /// was visited before) and `false` otherwise.
    ///
    /// # Errors
    ///
    /// If `square` lies outside the tracked board. In that case,
    /// `TourError::OutOfBounds` is returned.
    pub fn unmark(&mut self, square: Square) -> TourResult<bool> {
        let index = self.index(square)?;

        if self.ordinals[index].is_some() {
            self.ordinals[index] = None;
            self.visited -= 1;
            Ok(true)
        }
        else {
            Ok(false)
        }
    }

    /// Indicates whether the given square has been visited. Squares outside
    /// the tracked board count as not visited.
    pub fn is_visited(&self, square: Square) -> bool {
        match self.index(square) {
            Ok(index) => self.ordinals[index].is_some(),
            Err(_) => false
        }
    }

    /// Gets the visit ordinal of the given square, that is, its zero-based
    /// position in the visiting order, or `None` if it has not been visited.
    ///
    /// # Errors
    ///
    /// If `square` lies outside the tracked board. In that case,
    /// `TourError::OutOfBounds` is returned.
    pub fn ordinal(&self, square: Square) -> TourResult<Option<usize>> {
        Ok(self.ordinals[self.index(square)?])
    }

    /// Gets the number of squares currently marked as visited.
    pub fn visited_count(&self) -> usize {
        self.visited
    }

    /// Gets the total number of squares this map tracks.
    pub fn square_count(&self) -> usize {
        self.ordinals.len()
    }

    /// Indicates whether every tracked square has been visited. A search
    /// that fills its visit map has covered the whole board.
    pub fn is_full(&self) -> bool {
        self.visited == self.ordinals.len()
    }

    /// Marks all squares as unvisited, resetting the ordinal counter.
    pub fn clear(&mut self) {
        for ordinal in self.ordinals.iter_mut() {
            *ordinal = None;
        }

        self.visited = 0;
    }
}
