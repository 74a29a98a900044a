//! Points and fixed-size segments.
//!
//! ## Purpose
//!
//! This module defines the `Point` record and the `Segment` view, and splits
//! an ordered point sequence into contiguous blocks of [`SEGMENT_LEN`] points.
//!
//! ## Invariants
//!
//! * Segments are contiguous, non-overlapping, order-preserving slices.
//! * Concatenating all segments reproduces the input sequence exactly.
//! * Every segment holds exactly [`SEGMENT_LEN`] points.

use num_traits::Float;
use serde::Serialize;

use crate::primitives::errors::SegfitError;

/// Number of points in every segment.
pub const SEGMENT_LEN: usize = 20;

/// A single observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point<T> {
    /// Independent variable.
    pub x: T,
    /// Dependent variable.
    pub y: T,
}

impl<T> Point<T> {
    /// Create a point from its coordinates.
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

/// Borrowed view of one fixed-size block of the input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<'a, T> {
    /// Position of this segment in the input sequence.
    pub index: usize,
    /// The points of this segment, in input order.
    pub points: &'a [Point<T>],
}

impl<'a, T: Float> Segment<'a, T> {
    /// x-coordinates in input order.
    pub fn xs(&self) -> Vec<T> {
        self.points.iter().map(|p| p.x).collect()
    }

    /// y-coordinates in input order.
    pub fn ys(&self) -> Vec<T> {
        self.points.iter().map(|p| p.y).collect()
    }

    /// Number of points (always [`SEGMENT_LEN`] for split segments).
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the segment holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Smallest and largest x-value of the segment.
    pub fn x_range(&self) -> (T, T) {
        self.points
            .iter()
            .fold((T::infinity(), T::neg_infinity()), |(lo, hi), p| {
                (lo.min(p.x), hi.max(p.x))
            })
    }
}

/// Partition `points` into contiguous segments of [`SEGMENT_LEN`] points.
///
/// Fails with [`SegfitError::InvalidSegmentCount`] when the point count is
/// zero or not a multiple of the segment length.
pub fn split_segments<T>(points: &[Point<T>]) -> Result<Vec<Segment<'_, T>>, SegfitError> {
    if points.is_empty() || points.len() % SEGMENT_LEN != 0 {
        return Err(SegfitError::InvalidSegmentCount {
            got: points.len(),
            segment_len: SEGMENT_LEN,
        });
    }

    Ok(points
        .chunks_exact(SEGMENT_LEN)
        .enumerate()
        .map(|(index, points)| Segment { index, points })
        .collect())
}

/// Zip parallel coordinate slices into points.
pub fn zip_points<T: Copy>(x: &[T], y: &[T]) -> Result<Vec<Point<T>>, SegfitError> {
    if x.len() != y.len() {
        return Err(SegfitError::MismatchedInputs {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    Ok(x.iter().zip(y).map(|(&x, &y)| Point::new(x, y)).collect())
}
