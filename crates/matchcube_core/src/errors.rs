use std::num::ParseIntError;

use thiserror::Error;

use crate::{BlockId, GridCoord, ResolutionTicket};

/// Error produced by an operation on a cube or game session.
///
/// Every error is reported before any mutation, so a failed operation never
/// leaves the cube partially changed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CubeError {
    /// Cube side length is not supported.
    #[error("cube size {size} is out of range (must be between {min} and {max})")]
    InvalidSize {
        /// Requested side length.
        size: usize,
        /// Minimum side length.
        min: usize,
        /// Maximum side length.
        max: usize,
    },
    /// Layer index is outside `0..size`.
    #[error("layer {layer} is out of range for a cube of size {size}")]
    InvalidLayer {
        /// Requested layer.
        layer: usize,
        /// Side length of the cube.
        size: usize,
    },
    /// Rotation angle is zero or not a multiple of 90 degrees.
    #[error("unsupported rotation angle {angle}° (must be a nonzero multiple of 90°)")]
    UnsupportedAngle {
        /// Requested angle in degrees.
        angle: i32,
    },
    /// Face direction vector does not have exactly one nonzero component.
    #[error("invalid face direction ({x}, {y}, {z})")]
    #[allow(missing_docs)]
    InvalidDirection { x: i32, y: i32, z: i32 },
    /// Grid coordinate is outside the cube.
    #[error("coordinate {0} is outside the cube")]
    InvalidCoord(GridCoord),
    /// Another rotation or its match resolution is still in flight.
    #[error("cube is busy")]
    Busy,
    /// Moves passed to a permutation commit do not form a permutation of the
    /// grid cells they touch.
    #[error("moves do not form a permutation of the current grid")]
    InvalidPermutation,
    /// Rotation completion was signaled with no rotation in flight.
    #[error("no rotation is in progress")]
    NotRotating,
    /// Resolution was requested for a match that is not pending.
    #[error("no pending resolution for {0}")]
    UnknownResolution(ResolutionTicket),
    /// Block ID does not belong to this cube.
    #[error("block {0} is not part of this cube")]
    UnknownBlock(BlockId),
    /// No colors are available to paint with.
    #[error("no active palette colors")]
    EmptyPalette,
}

/// Error produced when parsing a rotation request such as `x2:+90`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseRotationError {
    /// Missing `:` separating the layer from the angle.
    #[error("missing ':' before rotation angle")]
    MissingAngle,
    /// Axis character is not `x`, `y`, or `z`.
    #[error("invalid axis {0:?}")]
    InvalidAxis(String),
    /// Layer index is not a nonnegative integer.
    #[error("invalid layer: {0}")]
    InvalidLayer(ParseIntError),
    /// Angle is not an integer.
    #[error("invalid angle: {0}")]
    InvalidAngle(ParseIntError),
}
