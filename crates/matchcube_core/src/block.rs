//! Unit blocks and their face colors.

use std::fmt;
use std::ops::{Index, IndexMut};

use cgmath::Vector3;
use serde::{Deserialize, Serialize};

use crate::{Color, CubeError, Face, GridCoord, QuarterTurn};

/// Stable identity of a block within a cube.
///
/// Unlike [`BlockKey`], this never changes when the block moves.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct BlockId(pub(crate) u32);
impl BlockId {
    /// Returns the block's index in [`crate::Cube::blocks()`].
    pub fn to_index(self) -> usize {
        self.0 as usize
    }
}
impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Three-character label of a grid coordinate, one base-36 digit per axis.
///
/// A block's key names where the block currently is, so it is reassigned every
/// time the block moves.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockKey([u8; 3]);
impl BlockKey {
    const DIGITS: &'static [u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    /// Largest coordinate that can be represented in a key, plus one.
    pub const MAX_SIZE: usize = 36;

    /// Returns the key for a grid coordinate. Components that are too large to
    /// represent are written as `?`.
    pub fn new(coord: GridCoord) -> Self {
        let digit = |i: usize| Self::DIGITS.get(i).copied().unwrap_or(b'?');
        Self([digit(coord.x), digit(coord.y), digit(coord.z)])
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        // All bytes come from `DIGITS` or `?`, which are ASCII.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}
impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
impl Serialize for BlockKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Colors of the six faces of a block, indexed by [`Face`].
///
/// Every slot is stored, including faces that point into the cube and are
/// never displayed.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct FaceColors(pub [Color; 6]);
impl FaceColors {
    /// Face colors with every slot set to [`Color::UNSET`].
    pub const UNSET: Self = Self([Color::UNSET; 6]);

    /// Returns an iterator over each face and its color, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Face, Color)> + '_ {
        Face::ALL.into_iter().map(|face| (face, self[face]))
    }

    /// Returns the face colors after physically rotating the block by `turn`.
    ///
    /// The color on each face moves to the face that it points toward after
    /// the rotation. The two faces on the rotation axis keep their colors and
    /// the other four are cycled.
    #[must_use]
    pub fn rotated(&self, turn: QuarterTurn) -> Self {
        let mut ret = Self::UNSET;
        for (face, color) in self.iter() {
            ret[turn.rotate_face(face)] = color;
        }
        ret
    }
}
impl Index<Face> for FaceColors {
    type Output = Color;

    fn index(&self, face: Face) -> &Self::Output {
        &self.0[face.slot()]
    }
}
impl IndexMut<Face> for FaceColors {
    fn index_mut(&mut self, face: Face) -> &mut Self::Output {
        &mut self.0[face.slot()]
    }
}

/// Unit cube in the grid.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Block {
    id: BlockId,
    key: BlockKey,
    coord: GridCoord,
    #[serde(skip)]
    position: Vector3<f64>,
    face_colors: FaceColors,
}
impl Block {
    pub(crate) fn new(id: BlockId, coord: GridCoord, position: Vector3<f64>) -> Self {
        Self {
            id,
            key: BlockKey::new(coord),
            coord,
            position,
            face_colors: FaceColors::UNSET,
        }
    }

    /// Returns the block's stable identity.
    pub fn id(&self) -> BlockId {
        self.id
    }
    /// Returns the label of the block's current grid coordinate.
    pub fn key(&self) -> BlockKey {
        self.key
    }
    /// Returns the block's current grid coordinate.
    ///
    /// This is tracked directly and never recomputed from
    /// [`Block::position()`].
    pub fn coord(&self) -> GridCoord {
        self.coord
    }
    /// Returns the world-space position of the block's slot.
    pub fn position(&self) -> Vector3<f64> {
        self.position
    }

    /// Returns all six face colors.
    pub fn face_colors(&self) -> &FaceColors {
        &self.face_colors
    }
    /// Returns the color of one face.
    pub fn face_color(&self, face: Face) -> Color {
        self.face_colors[face]
    }
    /// Returns the color of the face selected by a direction vector with
    /// exactly one nonzero component.
    pub fn face_color_at(&self, direction: Vector3<i32>) -> Result<Color, CubeError> {
        Ok(self.face_color(Face::from_direction(direction)?))
    }

    /// Sets the color of one face.
    pub fn set_face_color(&mut self, face: Face, color: Color) {
        self.face_colors[face] = color;
    }
    /// Sets the color of the face selected by a direction vector with exactly
    /// one nonzero component.
    pub fn set_face_color_at(
        &mut self,
        direction: Vector3<i32>,
        color: Color,
    ) -> Result<(), CubeError> {
        self.set_face_color(Face::from_direction(direction)?, color);
        Ok(())
    }
    /// Sets all six face colors.
    pub fn set_face_colors(&mut self, face_colors: FaceColors) {
        self.face_colors = face_colors;
    }

    /// Rotates the block's face colors to match a physical rotation.
    pub fn rotate_faces(&mut self, turn: QuarterTurn) {
        self.face_colors = self.face_colors.rotated(turn);
    }

    /// Records that the block moved to a new grid cell.
    pub(crate) fn relocate(&mut self, coord: GridCoord, position: Vector3<f64>) {
        self.coord = coord;
        self.key = BlockKey::new(coord);
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Axis, Sign};

    fn distinct_colors() -> FaceColors {
        FaceColors(std::array::from_fn(|i| {
            Color::from_palette_index(i).expect("small palette index")
        }))
    }

    #[test]
    fn test_block_key() {
        assert_eq!(BlockKey::new(GridCoord::new(2, 0, 1)).as_str(), "201");
        assert_eq!(BlockKey::new(GridCoord::new(10, 35, 0)).as_str(), "az0");
        assert_eq!(BlockKey::new(GridCoord::new(36, 0, 0)).as_str(), "?00");
    }

    #[test]
    fn test_face_rotation_is_four_cycle() {
        let colors = distinct_colors();
        for axis in Axis::ALL {
            for sign in [Sign::Pos, Sign::Neg] {
                let turn = QuarterTurn { axis, sign };
                let once = colors.rotated(turn);

                // Faces on the axis are untouched; the other four all move.
                for face in Face::ALL {
                    if face.axis() == axis {
                        assert_eq!(once[face], colors[face]);
                    } else {
                        assert_ne!(once[face], colors[face]);
                    }
                }

                let mut four = colors;
                for _ in 0..4 {
                    four = four.rotated(turn);
                }
                assert_eq!(four, colors);
                assert_eq!(once.rotated(turn.inverse()), colors);
            }
        }
    }

    #[test]
    fn test_face_color_at() {
        let origin = GridCoord::new(0, 0, 0);
        let mut block = Block::new(BlockId(0), origin, Vector3::new(0.0, 0.0, 0.0));
        let red = Color::from_palette_index(0).expect("small palette index");
        block
            .set_face_color_at(Vector3::new(0, 0, -1), red)
            .expect("valid direction");
        assert_eq!(block.face_color(Face::NegZ), red);
        assert_eq!(block.face_colors().0[1], red);
        assert_eq!(block.face_color_at(Vector3::new(0, 0, -5)), Ok(red));
        assert_eq!(
            block.face_color_at(Vector3::new(1, 0, 1)),
            Err(CubeError::InvalidDirection { x: 1, y: 0, z: 1 }),
        );
    }
}
