//! Line matching on the outer faces of the cube.

use itertools::Itertools;
use serde::Serialize;
use strum::Display;

use crate::{Axis, BlockId, Color, Cube, CubeError, Face, GridCoord, Sign};

/// Direction of a line on a face.
///
/// On a face perpendicular to `axis`, a row holds the coordinate along
/// `axis.next()` fixed and a column holds the coordinate along
/// `axis.next().next()` fixed.
#[derive(Serialize, Display, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LineKind {
    /// Row
    Row,
    /// Column
    Column,
}

/// Full-length line of blocks on one face whose exposed colors are all equal.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Face whose colors match.
    pub face: Face,
    /// Whether the line is a row or a column.
    pub kind: LineKind,
    /// Index of the row or column.
    pub index: usize,
    /// Cells in the line, in order.
    pub cells: Vec<GridCoord>,
    /// Blocks in the line when it was detected, in the same order as `cells`.
    pub blocks: Vec<BlockId>,
    /// Common color.
    pub color: Color,
}

/// Returns the cells of one line on a face.
pub fn face_line(size: usize, face: Face, kind: LineKind, index: usize) -> Vec<GridCoord> {
    let secondary = face.axis().next();
    let tertiary = secondary.next();
    let (fixed, varying) = match kind {
        LineKind::Row => (secondary, tertiary),
        LineKind::Column => (tertiary, secondary),
    };
    let base = GridCoord::default()
        .with(face.axis(), face.shell_layer(size))
        .with(fixed, index);
    (0..size).map(|i| base.with(varying, i)).collect()
}

/// Scans every face of the cube and returns all matching lines.
///
/// Faces are scanned by axis, positive side first, and rows are reported
/// before columns on each face.
pub fn detect_matches(cube: &Cube) -> Vec<Match> {
    let matches = Axis::ALL
        .into_iter()
        .flat_map(|axis| [Face::new(axis, Sign::Pos), Face::new(axis, Sign::Neg)])
        .flat_map(|face| detect_matches_on_face(cube, face))
        .collect_vec();
    log::debug!("found {} matching lines", matches.len());
    matches
}

/// Scans one face of the cube and returns its matching lines.
pub fn detect_matches_on_face(cube: &Cube, face: Face) -> Vec<Match> {
    let size = cube.size();
    [LineKind::Row, LineKind::Column]
        .into_iter()
        .flat_map(|kind| (0..size).map(move |index| (kind, index)))
        .filter_map(|(kind, index)| {
            let cells = face_line(size, face, kind, index);
            let color = line_color(cube, face, &cells)?;
            let blocks = cells.iter().map(|&c| cube[c].id()).collect();
            Some(Match {
                face,
                kind,
                index,
                cells,
                blocks,
                color,
            })
        })
        .collect()
}

/// Scans the face exposed by one shell layer.
///
/// Returns an error if `layer` is not `0` or `size - 1`, since no other layer
/// has exposed faces perpendicular to `axis`.
pub fn detect_matches_in_layer(
    cube: &Cube,
    axis: Axis,
    layer: usize,
) -> Result<Vec<Match>, CubeError> {
    let size = cube.size();
    let face = [Face::new(axis, Sign::Pos), Face::new(axis, Sign::Neg)]
        .into_iter()
        .find(|face| face.shell_layer(size) == layer)
        .ok_or(CubeError::InvalidLayer { layer, size })?;
    Ok(detect_matches_on_face(cube, face))
}

/// Returns the common exposed color of a line, or `None` if the colors differ
/// or are unset.
fn line_color(cube: &Cube, face: Face, cells: &[GridCoord]) -> Option<Color> {
    cells
        .iter()
        .map(|&c| cube[c].face_color(face))
        .all_equal_value()
        .ok()
        .filter(|color| !color.is_unset())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn color(i: usize) -> Color {
        Color::from_palette_index(i).expect("small palette index")
    }

    fn paint_face(cube: &mut Cube, face: Face, c: Color) {
        for row in cube.face_rows(face) {
            for coord in row {
                cube.block_at_mut(coord)
                    .expect("cell on face")
                    .set_face_color(face, c);
            }
        }
    }

    #[test]
    fn test_face_line() {
        let line = |coords: [(usize, usize, usize); 3]| {
            coords.map(|(x, y, z)| GridCoord::new(x, y, z)).to_vec()
        };

        // X faces: rows fix Y, columns fix Z.
        assert_eq!(
            face_line(3, Face::PosX, LineKind::Row, 1),
            line([(2, 1, 0), (2, 1, 1), (2, 1, 2)]),
        );
        assert_eq!(
            face_line(3, Face::NegX, LineKind::Column, 2),
            line([(0, 0, 2), (0, 1, 2), (0, 2, 2)]),
        );

        // Y faces: rows fix Z, columns fix X.
        assert_eq!(
            face_line(3, Face::PosY, LineKind::Row, 0),
            line([(0, 2, 0), (1, 2, 0), (2, 2, 0)]),
        );
        assert_eq!(
            face_line(3, Face::NegY, LineKind::Column, 2),
            line([(2, 0, 0), (2, 0, 1), (2, 0, 2)]),
        );

        // Z faces: rows fix X, columns fix Y.
        assert_eq!(
            face_line(3, Face::PosZ, LineKind::Row, 1),
            line([(1, 0, 2), (1, 1, 2), (1, 2, 2)]),
        );
        assert_eq!(
            face_line(3, Face::NegZ, LineKind::Column, 0),
            line([(0, 0, 0), (1, 0, 0), (2, 0, 0)]),
        );
    }

    #[test]
    fn test_single_odd_block() {
        let (red, blue) = (color(0), color(1));
        let mut cube = Cube::build(3).expect("valid size");
        paint_face(&mut cube, Face::PosX, red);
        cube.block_at_mut(GridCoord::new(2, 1, 2))
            .expect("cell on face")
            .set_face_color(Face::PosX, blue);

        let matches = detect_matches_in_layer(&cube, Axis::X, 2).expect("shell layer");
        let lines = matches.iter().map(|m| (m.kind, m.index)).collect_vec();
        assert_eq!(
            lines,
            vec![
                (LineKind::Row, 0),
                (LineKind::Row, 2),
                (LineKind::Column, 0),
                (LineKind::Column, 1),
            ],
        );
        assert!(matches.iter().all(|m| m.color == red && m.face == Face::PosX));
        assert!(matches.iter().all(|m| !m.cells.contains(&GridCoord::new(2, 1, 2))));
    }

    #[test]
    fn test_unset_never_matches() {
        let cube = Cube::build(3).expect("valid size");
        assert_eq!(detect_matches(&cube), vec![]);
    }

    #[test]
    fn test_both_shell_layers() {
        let red = color(0);
        let mut cube = Cube::build(2).expect("valid size");
        paint_face(&mut cube, Face::NegZ, red);

        // Every row and column of the face matches.
        let matches = detect_matches(&cube);
        assert_eq!(matches.len(), 4);
        assert!(matches.iter().all(|m| m.face == Face::NegZ));
        assert_eq!(detect_matches_in_layer(&cube, Axis::Z, 0).map(|m| m.len()), Ok(4));
        assert_eq!(detect_matches_in_layer(&cube, Axis::Z, 1).map(|m| m.len()), Ok(0));
    }

    #[test]
    fn test_interior_layer_is_rejected() {
        let cube = Cube::build(3).expect("valid size");
        assert_eq!(
            detect_matches_in_layer(&cube, Axis::Y, 1),
            Err(CubeError::InvalidLayer { layer: 1, size: 3 }),
        );
    }

    #[test]
    fn test_match_records_blocks() {
        let red = color(0);
        let mut cube = Cube::build(3).expect("valid size");
        paint_face(&mut cube, Face::PosY, red);
        let m = &detect_matches_on_face(&cube, Face::PosY)[0];
        assert_eq!(m.kind, LineKind::Row);
        let ids = m.cells.iter().map(|&c| cube[c].id()).collect_vec();
        assert_eq!(m.blocks, ids);
    }
}
