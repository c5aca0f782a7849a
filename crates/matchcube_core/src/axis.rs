//! Axes, signs, and face directions.

use std::fmt;
use std::ops::{Mul, Neg};

use cgmath::Vector3;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::CubeError;

/// Axis of the cube.
#[derive(
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Axis {
    /// X axis
    X,
    /// Y axis
    Y,
    /// Z axis
    Z,
}
impl Axis {
    /// All three axes, in order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Returns the component index of the axis (0, 1, or 2).
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Returns the next axis in the cycle `X -> Y -> Z -> X`.
    ///
    /// Faces perpendicular to `axis` are laid out with rows along
    /// `axis.next()` and columns along `axis.next().next()`.
    #[must_use]
    pub const fn next(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::Z,
            Axis::Z => Axis::X,
        }
    }

    /// Returns the unit vector along the axis.
    pub fn unit(self) -> Vector3<i32> {
        let mut v = Vector3::new(0, 0, 0);
        v[self.index()] = 1;
        v
    }
}

/// Positive or negative.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    /// Positive
    Pos,
    /// Negative
    Neg,
}
impl Sign {
    /// Returns the sign of `x`, or `None` if it is zero.
    pub const fn of(x: i32) -> Option<Sign> {
        if x > 0 {
            Some(Sign::Pos)
        } else if x < 0 {
            Some(Sign::Neg)
        } else {
            None
        }
    }

    /// Returns `1` or `-1`.
    pub const fn to_i32(self) -> i32 {
        match self {
            Sign::Pos => 1,
            Sign::Neg => -1,
        }
    }
}
impl Neg for Sign {
    type Output = Sign;

    fn neg(self) -> Self::Output {
        match self {
            Sign::Pos => Sign::Neg,
            Sign::Neg => Sign::Pos,
        }
    }
}
impl Mul for Sign {
    type Output = Sign;

    fn mul(self, rhs: Self) -> Self::Output {
        if self == rhs { Sign::Pos } else { Sign::Neg }
    }
}
impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sign::Pos => write!(f, "+"),
            Sign::Neg => write!(f, "-"),
        }
    }
}

/// Face direction of a block, which doubles as its face-color slot.
///
/// The discriminant of each variant is its slot index.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Face {
    /// +Z
    PosZ = 0,
    /// -Z
    NegZ = 1,
    /// +X
    PosX = 2,
    /// -X
    NegX = 3,
    /// +Y
    PosY = 4,
    /// -Y
    NegY = 5,
}
impl Face {
    /// All faces, in slot order.
    pub const ALL: [Face; 6] = [
        Face::PosZ,
        Face::NegZ,
        Face::PosX,
        Face::NegX,
        Face::PosY,
        Face::NegY,
    ];

    /// Returns the face-color slot index.
    pub const fn slot(self) -> usize {
        self as usize
    }

    /// Returns the face pointing along `axis` in the direction `sign`.
    pub const fn new(axis: Axis, sign: Sign) -> Face {
        match (axis, sign) {
            (Axis::X, Sign::Pos) => Face::PosX,
            (Axis::X, Sign::Neg) => Face::NegX,
            (Axis::Y, Sign::Pos) => Face::PosY,
            (Axis::Y, Sign::Neg) => Face::NegY,
            (Axis::Z, Sign::Pos) => Face::PosZ,
            (Axis::Z, Sign::Neg) => Face::NegZ,
        }
    }

    /// Returns the face selected by a direction vector with exactly one
    /// nonzero component. The magnitude of that component is ignored.
    pub fn from_direction(direction: Vector3<i32>) -> Result<Face, CubeError> {
        let nonzero = Axis::ALL
            .into_iter()
            .filter_map(|axis| Some((axis, Sign::of(direction[axis.index()])?)))
            .collect::<Vec<_>>();
        match nonzero.as_slice() {
            &[(axis, sign)] => Ok(Face::new(axis, sign)),
            _ => Err(CubeError::InvalidDirection {
                x: direction.x,
                y: direction.y,
                z: direction.z,
            }),
        }
    }

    /// Returns the axis perpendicular to the face.
    pub const fn axis(self) -> Axis {
        match self {
            Face::PosX | Face::NegX => Axis::X,
            Face::PosY | Face::NegY => Axis::Y,
            Face::PosZ | Face::NegZ => Axis::Z,
        }
    }

    /// Returns which way the face points along its axis.
    pub const fn sign(self) -> Sign {
        match self {
            Face::PosX | Face::PosY | Face::PosZ => Sign::Pos,
            Face::NegX | Face::NegY | Face::NegZ => Sign::Neg,
        }
    }

    /// Returns the opposite face.
    #[must_use]
    pub fn opposite(self) -> Face {
        Face::new(self.axis(), -self.sign())
    }

    /// Returns the outward unit vector of the face.
    pub fn direction(self) -> Vector3<i32> {
        self.axis().unit() * self.sign().to_i32()
    }

    /// Returns the layer along [`Face::axis()`] whose blocks expose this face,
    /// on a cube with side length `size`.
    pub const fn shell_layer(self, size: usize) -> usize {
        match self.sign() {
            Sign::Pos => size - 1,
            Sign::Neg => 0,
        }
    }
}
impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.sign(), self.axis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_slots() {
        for (i, face) in Face::ALL.into_iter().enumerate() {
            assert_eq!(face.slot(), i);
            assert_eq!(Face::from_direction(face.direction()), Ok(face));
            assert_eq!(face.opposite().opposite(), face);
        }
        assert_eq!(Face::PosX.to_string(), "+x");
        assert_eq!(Face::NegZ.to_string(), "-z");
    }

    #[test]
    fn test_face_from_direction() {
        assert_eq!(Face::from_direction(Vector3::new(0, -3, 0)), Ok(Face::NegY));
        assert_eq!(
            Face::from_direction(Vector3::new(1, 1, 0)),
            Err(CubeError::InvalidDirection { x: 1, y: 1, z: 0 }),
        );
        assert_eq!(
            Face::from_direction(Vector3::new(0, 0, 0)),
            Err(CubeError::InvalidDirection { x: 0, y: 0, z: 0 }),
        );
    }

    #[test]
    fn test_axis_parse() {
        assert_eq!("X".parse::<Axis>(), Ok(Axis::X));
        assert_eq!("z".parse::<Axis>(), Ok(Axis::Z));
        assert!("w".parse::<Axis>().is_err());
        assert_eq!(Axis::Y.to_string(), "y");
    }
}
