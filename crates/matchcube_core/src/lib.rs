//! Rotating match-three cube puzzle backend.
//!
//! The cube is an N×N×N grid of blocks. Any layer can be rotated by a multiple
//! of 90 degrees, and after each rotation every full row or column of one
//! color on an outer face is scored and repainted.
//!
//! [`Game`] ties everything together as an event-driven session. Rendering is
//! left to the caller, which observes the game through a [`RenderBridge`].

mod axis;
mod block;
mod bridge;
mod color;
mod coords;
mod cube;
mod errors;
mod matching;
mod resolve;
mod rotation;
mod score;
mod session;
#[cfg(test)]
mod tests;

pub use prelude::*;

/// Prelude of common imports.
pub mod prelude {
    pub use crate::axis::{Axis, Face, Sign};
    pub use crate::block::{Block, BlockId, BlockKey, FaceColors};
    pub use crate::bridge::RenderBridge;
    pub use crate::color::{Color, NamedColor, Palette, ParseRgbError, Rgb};
    pub use crate::coords::{CoordinateMapper, GridCoord};
    pub use crate::cube::{Cube, CubeSnapshot, FaceSnapshot};
    pub use crate::errors::{CubeError, ParseRotationError};
    pub use crate::matching::{
        LineKind, Match, detect_matches, detect_matches_in_layer, detect_matches_on_face,
        face_line,
    };
    pub use crate::resolve::{MatchResolver, ResolutionTicket, ResolvedMatch};
    pub use crate::rotation::{CellMove, QuarterTurn, RotationPlan, RotationRequest, rotate};
    pub use crate::score::Score;
    pub use crate::session::{Game, GameParams, Phase, TurnOutcome};
}

/// Default spacing between neighboring blocks in world space.
pub const DEFAULT_GAP: f64 = 0.05;

/// Default number of points awarded per matched line.
pub const DEFAULT_MATCH_REWARD: u64 = 300;

/// Default number of quarter turns in a scramble.
pub const DEFAULT_SCRAMBLE_LENGTH: usize = 20;
