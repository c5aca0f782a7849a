//! Grid coordinates and the mapping between grid indices and world space.

use std::fmt;
use std::ops::{Index, IndexMut};

use cgmath::Vector3;
use serde::{Deserialize, Serialize};

use crate::Axis;

/// Coordinate of a cell in the cube grid. Each component is in `0..size`.
#[derive(
    Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub struct GridCoord {
    /// X index
    pub x: usize,
    /// Y index
    pub y: usize,
    /// Z index
    pub z: usize,
}
impl GridCoord {
    /// Constructs a grid coordinate.
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Returns a copy of the coordinate with the component along `axis`
    /// replaced.
    #[must_use]
    pub fn with(mut self, axis: Axis, value: usize) -> Self {
        self[axis] = value;
        self
    }

    /// Returns whether every component is less than `size`.
    pub fn is_within(self, size: usize) -> bool {
        self.x < size && self.y < size && self.z < size
    }

    /// Returns whether the cell lies on the outer shell of a cube with side
    /// length `size`.
    pub fn is_on_shell(self, size: usize) -> bool {
        Axis::ALL
            .into_iter()
            .any(|axis| self[axis] == 0 || self[axis] + 1 == size)
    }

    /// Returns the position of the cell relative to the center of the cube,
    /// doubled so that it is integral for even sizes. Each component is in
    /// `-(size-1)..=(size-1)` and has the same parity as `size-1`.
    pub fn to_offset(self, size: usize) -> Vector3<i32> {
        let max = size as i32 - 1;
        Vector3::new(
            2 * self.x as i32 - max,
            2 * self.y as i32 - max,
            2 * self.z as i32 - max,
        )
    }

    /// Inverse of [`GridCoord::to_offset()`]. Returns `None` if the offset
    /// does not name a cell.
    pub fn from_offset(offset: Vector3<i32>, size: usize) -> Option<Self> {
        let max = size as i32 - 1;
        let component = |o: i32| {
            let doubled = o + max;
            let in_range = (0..=2 * max).contains(&doubled);
            (in_range && doubled % 2 == 0).then_some((doubled / 2) as usize)
        };
        Some(Self::new(
            component(offset.x)?,
            component(offset.y)?,
            component(offset.z)?,
        ))
    }
}
impl Index<Axis> for GridCoord {
    type Output = usize;

    fn index(&self, axis: Axis) -> &Self::Output {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}
impl IndexMut<Axis> for GridCoord {
    fn index_mut(&mut self, axis: Axis) -> &mut Self::Output {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }
}
impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Converts between grid indices and world-space slot positions.
///
/// The forward mapping is `world(i) = i - center - gap + gap*i` where
/// `center = (size-1)/2`. Neighboring slots are `1 + gap` apart. The inverse is
/// derived from the same formula, so it holds for every size.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct CoordinateMapper {
    /// Side length of the cube.
    pub size: usize,
    /// Spacing between neighboring blocks.
    pub gap: f64,
}
impl CoordinateMapper {
    /// Constructs a coordinate mapper.
    pub const fn new(size: usize, gap: f64) -> Self {
        Self { size, gap }
    }

    /// Returns `(size-1)/2`.
    pub fn center_offset(&self) -> f64 {
        (self.size as f64 - 1.0) / 2.0
    }

    /// Returns the world coordinate of grid index `i` along any axis.
    pub fn world(&self, i: usize) -> f64 {
        let i = i as f64;
        i - self.center_offset() - self.gap + self.gap * i
    }

    /// Returns the grid index whose slot is nearest to world coordinate `w`,
    /// or `None` if `w` is more than half a slot away from every slot.
    pub fn grid_index(&self, w: f64) -> Option<usize> {
        let pitch = 1.0 + self.gap;
        let i = ((w + self.center_offset() + self.gap) / pitch).round();
        if !(0.0..self.size as f64).contains(&i) {
            return None;
        }
        let i = i as usize;
        ((w - self.world(i)).abs() <= pitch / 2.0).then_some(i)
    }

    /// Returns the world position of a grid cell.
    pub fn world_position(&self, coord: GridCoord) -> Vector3<f64> {
        Vector3::new(self.world(coord.x), self.world(coord.y), self.world(coord.z))
    }

    /// Returns the grid cell nearest to a world position, or `None` if the
    /// position is not near any cell.
    pub fn grid_coord(&self, position: Vector3<f64>) -> Option<GridCoord> {
        Some(GridCoord::new(
            self.grid_index(position.x)?,
            self.grid_index(position.y)?,
            self.grid_index(position.z)?,
        ))
    }
}
