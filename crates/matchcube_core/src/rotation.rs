//! Layer rotations.
//!
//! A rotation is computed as a [`RotationPlan`] against the current cube and
//! then applied in one step. The plan names every block in the layer along
//! with its old and new grid cell, so a renderer can animate it before it is
//! applied.

use std::fmt;
use std::str::FromStr;

use cgmath::Vector3;
use serde::{Deserialize, Serialize};

use crate::{Axis, BlockId, Cube, CubeError, Face, GridCoord, ParseRotationError, Sign};

/// Rotation by 90 degrees around an axis.
///
/// Looking down the axis from its positive end, a positive quarter turn
/// carries `+Y` to `-Z` on the X axis, `+Z` to `+X` on the Y axis, and `+X` to
/// `-Y` on the Z axis.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct QuarterTurn {
    /// Axis of rotation.
    pub axis: Axis,
    /// Direction of rotation.
    pub sign: Sign,
}
impl QuarterTurn {
    /// Constructs a quarter turn.
    pub const fn new(axis: Axis, sign: Sign) -> Self {
        Self { axis, sign }
    }

    /// Returns the quarter turn in the opposite direction.
    #[must_use]
    pub fn inverse(self) -> Self {
        Self::new(self.axis, -self.sign)
    }

    /// Returns the axis and sign that the positive unit vector along `axis` is
    /// carried to.
    fn carry(self, axis: Axis) -> (Axis, Sign) {
        let s = self.sign;
        match (self.axis, axis) {
            (Axis::X, Axis::X) | (Axis::Y, Axis::Y) | (Axis::Z, Axis::Z) => (axis, Sign::Pos),
            // (x, y, z) -> (x, z*s, -y*s)
            (Axis::X, Axis::Y) => (Axis::Z, -s),
            (Axis::X, Axis::Z) => (Axis::Y, s),
            // (x, y, z) -> (z*s, y, -x*s)
            (Axis::Y, Axis::Z) => (Axis::X, s),
            (Axis::Y, Axis::X) => (Axis::Z, -s),
            // (x, y, z) -> (y*s, -x*s, z)
            (Axis::Z, Axis::X) => (Axis::Y, -s),
            (Axis::Z, Axis::Y) => (Axis::X, s),
        }
    }

    /// Rotates a vector, such as a center-relative offset from
    /// [`GridCoord::to_offset()`].
    pub fn rotate_vector(self, v: Vector3<i32>) -> Vector3<i32> {
        let mut ret = Vector3::new(0, 0, 0);
        for axis in Axis::ALL {
            let (to, sign) = self.carry(axis);
            ret[to.index()] += v[axis.index()] * sign.to_i32();
        }
        ret
    }

    /// Returns the direction that `face` points after the rotation.
    pub fn rotate_face(self, face: Face) -> Face {
        let (axis, sign) = self.carry(face.axis());
        Face::new(axis, sign * face.sign())
    }

    /// Returns the grid cell that `coord` moves to, on a cube with side length
    /// `size`.
    ///
    /// Returns an error if `coord` is not a cell of that cube.
    pub fn rotate_coord(self, coord: GridCoord, size: usize) -> Result<GridCoord, CubeError> {
        let offset = self.rotate_vector(coord.to_offset(size));
        GridCoord::from_offset(offset, size).ok_or(CubeError::InvalidCoord(coord))
    }
}

/// Request to rotate one layer of the cube.
///
/// The text form is `<axis><layer>:<angle>`, such as `x2:+90` or `z0:180`.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RotationRequest {
    /// Axis of rotation.
    pub axis: Axis,
    /// Index of the layer along `axis`, in `0..size`.
    pub layer: usize,
    /// Angle in degrees. Must be a nonzero multiple of 90.
    pub angle: i32,
}
impl RotationRequest {
    /// Constructs a rotation request.
    pub const fn new(axis: Axis, layer: usize, angle: i32) -> Self {
        Self { axis, layer, angle }
    }

    /// Returns the quarter turns that make up the rotation.
    ///
    /// Half turns are two positive quarter turns and three-quarter turns are a
    /// single negative quarter turn. Whole turns are empty.
    pub fn quarter_turns(&self) -> Result<Vec<QuarterTurn>, CubeError> {
        if self.angle == 0 || self.angle % 90 != 0 {
            return Err(CubeError::UnsupportedAngle { angle: self.angle });
        }
        let pos = QuarterTurn::new(self.axis, Sign::Pos);
        Ok(match (self.angle / 90).rem_euclid(4) {
            1 => vec![pos],
            2 => vec![pos, pos],
            3 => vec![pos.inverse()],
            _ => vec![],
        })
    }
}
impl fmt::Display for RotationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}:{:+}", self.axis, self.layer, self.angle)
    }
}
impl FromStr for RotationRequest {
    type Err = ParseRotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (head, angle) = s.split_once(':').ok_or(ParseRotationError::MissingAngle)?;
        let mut chars = head.chars();
        let axis_char = chars.next().unwrap_or_default();
        let axis = axis_char
            .to_string()
            .parse()
            .map_err(|_| ParseRotationError::InvalidAxis(axis_char.to_string()))?;
        let layer = chars
            .as_str()
            .parse()
            .map_err(ParseRotationError::InvalidLayer)?;
        let angle = angle
            .trim()
            .parse()
            .map_err(ParseRotationError::InvalidAngle)?;
        Ok(Self { axis, layer, angle })
    }
}

/// Movement of one block from one grid cell to another.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CellMove {
    /// Cell that the block is in before the move.
    pub from: GridCoord,
    /// Cell that the block is in after the move.
    pub to: GridCoord,
    /// Block being moved.
    pub block: BlockId,
}

/// Fully computed rotation of one layer.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RotationPlan {
    /// Request that produced the plan.
    pub request: RotationRequest,
    /// Quarter turns applied, in order.
    pub turns: Vec<QuarterTurn>,
    /// Where each block in the layer goes.
    pub moves: Vec<CellMove>,
}
impl RotationPlan {
    /// Computes a rotation against the current state of `cube` without
    /// modifying it.
    pub fn new(cube: &Cube, request: RotationRequest) -> Result<Self, CubeError> {
        let cells = cube.cells_in_layer(request.axis, request.layer)?;
        let turns = request.quarter_turns()?;
        let size = cube.size();
        let moves = cells
            .into_iter()
            .map(|from| {
                let to = turns
                    .iter()
                    .try_fold(from, |coord, turn| turn.rotate_coord(coord, size))?;
                Ok(CellMove {
                    from,
                    to,
                    block: cube[from].id(),
                })
            })
            .collect::<Result<_, CubeError>>()?;
        Ok(Self {
            request,
            turns,
            moves,
        })
    }

    /// Applies the rotation: moves every block in the layer to its new cell,
    /// rotates its face colors, and updates its key.
    ///
    /// Fails without modifying the cube if the cube has changed since the plan
    /// was computed.
    pub fn apply(&self, cube: &mut Cube) -> Result<(), CubeError> {
        cube.commit_permutation(&self.moves)?;
        for m in &self.moves {
            let block = cube.block_mut(m.block);
            for &turn in &self.turns {
                block.rotate_faces(turn);
            }
        }
        log::debug!("rotated {}", self.request);
        Ok(())
    }
}

/// Rotates one layer of a cube.
pub fn rotate(cube: &mut Cube, request: RotationRequest) -> Result<RotationPlan, CubeError> {
    let plan = RotationPlan::new(cube, request)?;
    plan.apply(cube)?;
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_rotation_tables() {
        let v = Vector3::new(1, 2, 3);
        let pos = |axis| QuarterTurn::new(axis, Sign::Pos);
        let neg = |axis| QuarterTurn::new(axis, Sign::Neg);
        assert_eq!(pos(Axis::X).rotate_vector(v), Vector3::new(1, 3, -2));
        assert_eq!(neg(Axis::X).rotate_vector(v), Vector3::new(1, -3, 2));
        assert_eq!(pos(Axis::Y).rotate_vector(v), Vector3::new(3, 2, -1));
        assert_eq!(neg(Axis::Y).rotate_vector(v), Vector3::new(-3, 2, 1));
        assert_eq!(pos(Axis::Z).rotate_vector(v), Vector3::new(2, -1, 3));
        assert_eq!(neg(Axis::Z).rotate_vector(v), Vector3::new(-2, 1, 3));
    }

    #[test]
    fn test_faces_follow_vectors() {
        for axis in Axis::ALL {
            for sign in [Sign::Pos, Sign::Neg] {
                let turn = QuarterTurn::new(axis, sign);
                for face in Face::ALL {
                    assert_eq!(
                        turn.rotate_face(face).direction(),
                        turn.rotate_vector(face.direction()),
                    );
                }
            }
        }
    }

    #[test]
    fn test_rotate_coord() {
        let turn = QuarterTurn::new(Axis::X, Sign::Pos);
        assert_eq!(turn.rotate_coord(GridCoord::new(2, 0, 0), 3), Ok(GridCoord::new(2, 0, 2)));
        assert_eq!(turn.rotate_coord(GridCoord::new(2, 1, 1), 3), Ok(GridCoord::new(2, 1, 1)));
        // Even sizes have no center cell.
        assert_eq!(turn.rotate_coord(GridCoord::new(0, 0, 0), 2), Ok(GridCoord::new(0, 0, 1)));
        assert_eq!(turn.rotate_coord(GridCoord::new(1, 3, 1), 4), Ok(GridCoord::new(1, 1, 0)));

        let outside = GridCoord::new(3, 0, 0);
        assert_eq!(turn.rotate_coord(outside, 3), Err(CubeError::InvalidCoord(outside)));
    }

    #[test]
    fn test_quarter_turns() {
        let turns = |angle| RotationRequest::new(Axis::Y, 0, angle).quarter_turns();
        let pos = QuarterTurn::new(Axis::Y, Sign::Pos);
        let neg = QuarterTurn::new(Axis::Y, Sign::Neg);
        assert_eq!(turns(90), Ok(vec![pos]));
        assert_eq!(turns(-90), Ok(vec![neg]));
        assert_eq!(turns(180), Ok(vec![pos, pos]));
        assert_eq!(turns(-180), Ok(vec![pos, pos]));
        assert_eq!(turns(270), Ok(vec![neg]));
        assert_eq!(turns(450), Ok(vec![pos]));
        assert_eq!(turns(360), Ok(vec![]));
        assert_eq!(turns(0), Err(CubeError::UnsupportedAngle { angle: 0 }));
        assert_eq!(turns(45), Err(CubeError::UnsupportedAngle { angle: 45 }));
    }

    #[test]
    fn test_parse_rotation_request() {
        assert_eq!("x2:+90".parse::<RotationRequest>(), Ok(RotationRequest::new(Axis::X, 2, 90)));
        assert_eq!("Y0:-90".parse::<RotationRequest>(), Ok(RotationRequest::new(Axis::Y, 0, -90)));
        assert_eq!(
            " z11: 180 ".parse::<RotationRequest>(),
            Ok(RotationRequest::new(Axis::Z, 11, 180)),
        );
        assert_eq!(
            "x2".parse::<RotationRequest>(),
            Err(ParseRotationError::MissingAngle),
        );
        assert_eq!(
            "w2:90".parse::<RotationRequest>(),
            Err(ParseRotationError::InvalidAxis("w".to_owned())),
        );
        assert!(matches!(
            "x:90".parse::<RotationRequest>(),
            Err(ParseRotationError::InvalidLayer(_)),
        ));
        assert!(matches!(
            "x1:ninety".parse::<RotationRequest>(),
            Err(ParseRotationError::InvalidAngle(_)),
        ));
        assert_eq!(RotationRequest::new(Axis::Z, 1, -90).to_string(), "z1:-90");
        assert_eq!(RotationRequest::new(Axis::X, 0, 180).to_string(), "x0:+180");
    }
}
