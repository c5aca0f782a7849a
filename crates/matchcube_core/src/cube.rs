//! Cube model: an N×N×N grid of blocks.

use std::collections::HashSet;
use std::ops::Index;

use itertools::{Itertools, iproduct};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;

use crate::{
    Axis, Block, BlockId, BlockKey, CellMove, Color, CoordinateMapper, CubeError, Face, GridCoord,
    Palette, RotationRequest, Sign,
};

/// Grid of blocks.
///
/// Each grid cell holds exactly one block and each block is in exactly one
/// cell. Rotations reassign which block is in which cell; blocks are never
/// copied, created, or destroyed after the cube is built.
#[derive(Debug, Clone)]
pub struct Cube {
    mapper: CoordinateMapper,
    /// Block in each cell, indexed by [`Cube::cell_index()`].
    grid: Vec<BlockId>,
    /// Every block, indexed by [`BlockId`].
    blocks: Vec<Block>,
}
impl Cube {
    /// Smallest supported side length.
    pub const MIN_SIZE: usize = 2;
    /// Largest supported side length.
    pub const MAX_SIZE: usize = BlockKey::MAX_SIZE;

    /// Builds a cube with side length `size`, using the default gap between
    /// blocks. Every face starts as [`Color::UNSET`].
    pub fn build(size: usize) -> Result<Self, CubeError> {
        Self::build_with_gap(size, crate::DEFAULT_GAP)
    }

    /// Builds a cube with side length `size` and a custom gap between blocks.
    pub fn build_with_gap(size: usize, gap: f64) -> Result<Self, CubeError> {
        if !(Self::MIN_SIZE..=Self::MAX_SIZE).contains(&size) {
            return Err(CubeError::InvalidSize {
                size,
                min: Self::MIN_SIZE,
                max: Self::MAX_SIZE,
            });
        }
        let mapper = CoordinateMapper::new(size, gap);
        let blocks = iter_coords(size)
            .zip(0..)
            .map(|(coord, id)| Block::new(BlockId(id), coord, mapper.world_position(coord)))
            .collect_vec();
        let grid = blocks.iter().map(|block| block.id()).collect();
        log::debug!("built {size}x{size}x{size} cube");
        Ok(Self {
            mapper,
            grid,
            blocks,
        })
    }

    /// Returns the side length of the cube.
    pub fn size(&self) -> usize {
        self.mapper.size
    }
    /// Returns the mapping between grid coordinates and world space.
    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    /// Returns every grid coordinate in a fixed order: X-major, then Y, then Z.
    pub fn coords(&self) -> impl Iterator<Item = GridCoord> + use<> {
        iter_coords(self.size())
    }

    /// Calls `f` on every cell in [`Cube::coords()`] order.
    pub fn for_each_cell(&self, mut f: impl FnMut(GridCoord, &Block)) {
        for coord in self.coords() {
            f(coord, &self[coord]);
        }
    }
    /// Calls `f` on every cell in [`Cube::coords()`] order, allowing the block
    /// to be modified.
    ///
    /// Blocks cannot be moved this way; use [`Cube::commit_permutation()`].
    pub fn for_each_cell_mut(&mut self, mut f: impl FnMut(GridCoord, &mut Block)) {
        for coord in self.coords() {
            let id = self.grid[self.cell_index(coord)];
            f(coord, self.block_mut(id));
        }
    }

    /// Returns all blocks, indexed by [`BlockId`].
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }
    /// Returns a block by its ID.
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(id.to_index())
    }
    pub(crate) fn block_mut(&mut self, id: BlockId) -> &mut Block {
        &mut self.blocks[id.to_index()]
    }

    /// Returns an error if `coord` is outside the cube.
    pub fn check_coord(&self, coord: GridCoord) -> Result<(), CubeError> {
        if !coord.is_within(self.size()) {
            return Err(CubeError::InvalidCoord(coord));
        }
        Ok(())
    }
    /// Returns the block in a cell.
    pub fn block_at(&self, coord: GridCoord) -> Result<&Block, CubeError> {
        self.check_coord(coord)?;
        Ok(&self[coord])
    }
    /// Returns the block in a cell, allowing its face colors to be modified.
    pub fn block_at_mut(&mut self, coord: GridCoord) -> Result<&mut Block, CubeError> {
        self.check_coord(coord)?;
        let id = self.grid[self.cell_index(coord)];
        Ok(self.block_mut(id))
    }

    /// Returns the cells whose coordinate along `axis` is `layer`, in
    /// [`Cube::coords()`] order.
    pub fn cells_in_layer(&self, axis: Axis, layer: usize) -> Result<Vec<GridCoord>, CubeError> {
        let size = self.size();
        if layer >= size {
            return Err(CubeError::InvalidLayer { layer, size });
        }
        Ok(self.coords().filter(|coord| coord[axis] == layer).collect())
    }

    /// Moves blocks between cells.
    ///
    /// `moves` must be a permutation of the cells it touches: each source cell
    /// must currently hold the named block, no cell may appear twice as a
    /// source or twice as a destination, and the sources and destinations must
    /// be the same set of cells. Otherwise the cube is left unchanged.
    ///
    /// Each moved block's grid coordinate, key, and position are updated.
    pub fn commit_permutation(&mut self, moves: &[CellMove]) -> Result<(), CubeError> {
        let mut sources = HashSet::new();
        let mut destinations = HashSet::new();
        for m in moves {
            self.check_coord(m.from)?;
            self.check_coord(m.to)?;
            let holds_block = self.grid[self.cell_index(m.from)] == m.block;
            if !holds_block || !sources.insert(m.from) || !destinations.insert(m.to) {
                return Err(CubeError::InvalidPermutation);
            }
        }
        if sources != destinations {
            return Err(CubeError::InvalidPermutation);
        }

        // Every source has been read, so the writes may overlap in any order.
        for m in moves {
            let i = self.cell_index(m.to);
            self.grid[i] = m.block;
            let position = self.mapper.world_position(m.to);
            self.block_mut(m.block).relocate(m.to, position);
        }
        log::trace!("committed permutation of {} cells", moves.len());
        Ok(())
    }

    /// Returns the faces of a cell that lie on the outer shell.
    pub fn exposed_faces(&self, coord: GridCoord) -> impl Iterator<Item = Face> + use<> {
        let size = self.size();
        Face::ALL
            .into_iter()
            .filter(move |face| coord[face.axis()] == face.shell_layer(size))
    }

    /// Returns the cells that expose `face`, as rows of the face.
    ///
    /// Row `i` is the cells whose coordinate along `face.axis().next()` is `i`,
    /// ordered by their coordinate along `face.axis().next().next()`.
    pub fn face_rows(&self, face: Face) -> Vec<Vec<GridCoord>> {
        let size = self.size();
        let row_axis = face.axis().next();
        let col_axis = row_axis.next();
        let base = GridCoord::default().with(face.axis(), face.shell_layer(size));
        (0..size)
            .map(|i| {
                (0..size)
                    .map(|j| base.with(row_axis, i).with(col_axis, j))
                    .collect()
            })
            .collect()
    }

    /// Paints every exposed face with a color chosen uniformly at random from
    /// `colors`. Cells are visited in [`Cube::coords()`] order, so the same
    /// RNG state always produces the same cube. Faces that are not exposed are
    /// left alone.
    pub fn paint_shell(&mut self, colors: &[Color], rng: &mut impl Rng) -> Result<(), CubeError> {
        if colors.is_empty() {
            return Err(CubeError::EmptyPalette);
        }
        for coord in self.coords() {
            for face in self.exposed_faces(coord) {
                if let Some(&color) = colors.choose(rng) {
                    self.block_at_mut(coord)?.set_face_color(face, color);
                }
            }
        }
        Ok(())
    }

    /// Applies `turns` random quarter turns and returns them.
    pub fn scramble(
        &mut self,
        turns: usize,
        rng: &mut impl Rng,
    ) -> Result<Vec<RotationRequest>, CubeError> {
        let mut applied = Vec::with_capacity(turns);
        for _ in 0..turns {
            let axis = *Axis::ALL.choose(rng).unwrap_or(&Axis::X);
            let layer = rng.random_range(0..self.size());
            let sign = if rng.random_bool(0.5) {
                Sign::Pos
            } else {
                Sign::Neg
            };
            let request = RotationRequest::new(axis, layer, 90 * sign.to_i32());
            crate::rotate(self, request)?;
            applied.push(request);
        }
        log::debug!("scrambled with {turns} quarter turns");
        Ok(applied)
    }

    /// Returns a serializable view of the cube's exposed faces.
    pub fn snapshot(&self, palette: &Palette) -> CubeSnapshot {
        let faces = Face::ALL
            .into_iter()
            .map(|face| FaceSnapshot {
                face,
                rows: self
                    .face_rows(face)
                    .into_iter()
                    .map(|row| {
                        row.into_iter()
                            .map(|coord| palette.color_name(self[coord].face_color(face)).to_owned())
                            .collect()
                    })
                    .collect(),
            })
            .collect();
        let keys = self.coords().map(|coord| self[coord].key()).collect();
        CubeSnapshot {
            size: self.size(),
            faces,
            keys,
        }
    }

    fn cell_index(&self, coord: GridCoord) -> usize {
        let size = self.size();
        (coord.x * size + coord.y) * size + coord.z
    }
}
impl Index<GridCoord> for Cube {
    type Output = Block;

    /// Returns the block in a cell.
    ///
    /// # Panics
    ///
    /// Panics if `coord` is outside the cube. Use [`Cube::block_at()`] to
    /// handle that case.
    fn index(&self, coord: GridCoord) -> &Self::Output {
        &self.blocks[self.grid[self.cell_index(coord)].to_index()]
    }
}

fn iter_coords(size: usize) -> impl Iterator<Item = GridCoord> {
    iproduct!(0..size, 0..size, 0..size).map(|(x, y, z)| GridCoord::new(x, y, z))
}

/// Serializable view of a cube.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CubeSnapshot {
    /// Side length.
    pub size: usize,
    /// Exposed colors of each face, by name.
    pub faces: Vec<FaceSnapshot>,
    /// Key of the block in each cell, in [`Cube::coords()`] order.
    pub keys: Vec<BlockKey>,
}

/// Exposed colors of one face of a cube.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FaceSnapshot {
    /// Which face.
    pub face: Face,
    /// Color names, laid out as in [`Cube::face_rows()`].
    pub rows: Vec<Vec<String>>,
}
