use std::collections::HashSet;

use itertools::Itertools;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

use crate::*;

fn painted_cube(size: usize, seed: u64) -> Cube {
    let colors = Palette::classic().active_colors(6);
    let mut cube = Cube::build(size).expect("valid size");
    let mut rng = ChaCha12Rng::seed_from_u64(seed);
    cube.paint_shell(&colors, &mut rng).expect("nonempty palette");
    cube
}

/// Every face color of every block, keyed by block ID.
fn all_face_colors(cube: &Cube) -> Vec<FaceColors> {
    cube.blocks().iter().map(|b| *b.face_colors()).collect()
}

fn color_counts(cube: &Cube) -> Vec<(Color, usize)> {
    cube.blocks()
        .iter()
        .flat_map(|b| b.face_colors().iter().map(|(_, c)| c))
        .counts()
        .into_iter()
        .sorted_by_key(|&(c, _)| c.palette_index())
        .collect()
}

fn assert_bijective(cube: &Cube) {
    let size = cube.size();
    let mut seen = HashSet::new();
    cube.for_each_cell(|coord, block| {
        assert_eq!(block.coord(), coord);
        assert_eq!(block.key(), BlockKey::new(coord));
        assert_eq!(cube.mapper().grid_coord(block.position()), Some(coord));
        assert!(seen.insert(block.id()), "{} appears twice", block.id());
    });
    assert_eq!(seen.len(), size * size * size);
}

fn arb_axis() -> impl Strategy<Value = Axis> {
    prop_oneof![Just(Axis::X), Just(Axis::Y), Just(Axis::Z)]
}

fn arb_angle() -> impl Strategy<Value = i32> {
    prop_oneof![Just(90), Just(-90), Just(180), Just(-180), Just(270), Just(360)]
}

/// Cube size, paint seed, and a sequence of valid rotations.
fn arb_scenario() -> impl Strategy<Value = (usize, u64, Vec<RotationRequest>)> {
    (2_usize..=5).prop_flat_map(|size| {
        let request = (arb_axis(), 0..size, arb_angle())
            .prop_map(|(axis, layer, angle)| RotationRequest::new(axis, layer, angle));
        (Just(size), any::<u64>(), prop::collection::vec(request, 0..12))
    })
}

proptest! {
    #[test]
    fn proptest_four_quarter_turns_are_identity(
        (size, seed, _) in arb_scenario(),
        axis in arb_axis(),
        layer_frac in 0.0..1.0_f64,
        angle in prop_oneof![Just(90), Just(-90)],
    ) {
        let layer = ((size as f64 * layer_frac) as usize).min(size - 1);
        let mut cube = painted_cube(size, seed);
        let before = cube.snapshot(&Palette::classic());
        let colors_before = all_face_colors(&cube);
        for _ in 0..4 {
            rotate(&mut cube, RotationRequest::new(axis, layer, angle)).expect("valid rotation");
        }
        prop_assert_eq!(cube.snapshot(&Palette::classic()), before);
        prop_assert_eq!(all_face_colors(&cube), colors_before);
    }

    #[test]
    fn proptest_rotations_preserve_bijection((size, seed, requests) in arb_scenario()) {
        let mut cube = painted_cube(size, seed);
        for request in requests {
            rotate(&mut cube, request).expect("valid rotation");
            assert_bijective(&cube);
        }
    }

    #[test]
    fn proptest_rotations_conserve_colors((size, seed, requests) in arb_scenario()) {
        let mut cube = painted_cube(size, seed);
        let before = color_counts(&cube);
        for request in requests {
            rotate(&mut cube, request).expect("valid rotation");
        }
        prop_assert_eq!(color_counts(&cube), before);
    }

    #[test]
    fn proptest_rotations_keep_shell_painted((size, seed, requests) in arb_scenario()) {
        let mut cube = painted_cube(size, seed);
        for request in requests {
            rotate(&mut cube, request).expect("valid rotation");
        }
        // Exposed faces stay painted and hidden faces stay unset.
        for coord in cube.coords() {
            for (face, color) in cube[coord].face_colors().iter() {
                let exposed = coord[face.axis()] == face.shell_layer(size);
                prop_assert_eq!(exposed, !color.is_unset());
            }
        }
    }

    #[test]
    fn proptest_match_completeness((size, seed, requests) in arb_scenario()) {
        // Few colors so that matches are common.
        let colors = Palette::classic().active_colors(2);
        let mut cube = Cube::build(size).expect("valid size");
        let mut rng = ChaCha12Rng::seed_from_u64(seed);
        cube.paint_shell(&colors, &mut rng).expect("nonempty palette");
        for request in requests {
            rotate(&mut cube, request).expect("valid rotation");
        }

        let found = detect_matches(&cube)
            .into_iter()
            .map(|m| (m.face, m.kind, m.index))
            .collect::<HashSet<_>>();
        for face in Face::ALL {
            for kind in [LineKind::Row, LineKind::Column] {
                for index in 0..size {
                    let line = face_line(size, face, kind, index);
                    let first = cube[line[0]].face_color(face);
                    let expected = !first.is_unset()
                        && line.iter().all(|&c| cube[c].face_color(face) == first);
                    prop_assert_eq!(found.contains(&(face, kind, index)), expected);
                }
            }
        }
    }
}

#[test]
fn test_rotation_moves_corner() {
    let mut cube = Cube::build(3).expect("valid size");
    let corner = GridCoord::new(2, 0, 0);
    let id = cube[corner].id();
    let red = Color::from_palette_index(0).expect("small palette index");
    cube.block_at_mut(corner)
        .expect("valid coord")
        .set_face_color(Face::NegY, red);

    let plan = rotate(&mut cube, RotationRequest::new(Axis::X, 2, 90)).expect("valid rotation");
    assert_eq!(plan.moves.len(), 9);
    let moved = &cube[GridCoord::new(2, 0, 2)];
    assert_eq!(moved.id(), id);
    assert_eq!(moved.key().as_str(), "202");
    // The face that pointed down now points forward.
    assert_eq!(moved.face_color(Face::PosZ), red);
    assert_eq!(moved.face_color(Face::NegY), Color::UNSET);
}

#[test]
fn test_invalid_layer_leaves_grid_unchanged() {
    let mut cube = painted_cube(3, 11);
    let before = cube.snapshot(&Palette::classic());
    assert_eq!(
        rotate(&mut cube, RotationRequest::new(Axis::X, 5, 90)),
        Err(CubeError::InvalidLayer { layer: 5, size: 3 }),
    );
    assert_eq!(
        rotate(&mut cube, RotationRequest::new(Axis::X, 1, 30)),
        Err(CubeError::UnsupportedAngle { angle: 30 }),
    );
    assert_eq!(cube.snapshot(&Palette::classic()), before);
}

#[test]
fn test_stale_plan_is_rejected() {
    let mut cube = painted_cube(3, 3);
    let stale = RotationPlan::new(&cube, RotationRequest::new(Axis::Y, 0, 90)).expect("valid");
    rotate(&mut cube, RotationRequest::new(Axis::Z, 0, 90)).expect("valid rotation");
    let before = cube.snapshot(&Palette::classic());
    assert_eq!(stale.apply(&mut cube), Err(CubeError::InvalidPermutation));
    assert_eq!(cube.snapshot(&Palette::classic()), before);
}

#[test]
fn test_half_turn_equals_two_quarter_turns() {
    let mut a = painted_cube(4, 9);
    let mut b = a.clone();
    rotate(&mut a, RotationRequest::new(Axis::Z, 3, 180)).expect("valid rotation");
    rotate(&mut b, RotationRequest::new(Axis::Z, 3, 90)).expect("valid rotation");
    rotate(&mut b, RotationRequest::new(Axis::Z, 3, 90)).expect("valid rotation");
    assert_eq!(all_face_colors(&a), all_face_colors(&b));
    assert_eq!(a.snapshot(&Palette::classic()), b.snapshot(&Palette::classic()));
}

#[test]
fn test_scramble_is_reproducible() {
    let mut a = painted_cube(3, 1);
    let mut b = painted_cube(3, 1);
    let moves_a = a
        .scramble(DEFAULT_SCRAMBLE_LENGTH, &mut ChaCha12Rng::seed_from_u64(2))
        .expect("valid scramble");
    let moves_b = b
        .scramble(DEFAULT_SCRAMBLE_LENGTH, &mut ChaCha12Rng::seed_from_u64(2))
        .expect("valid scramble");
    assert_eq!(moves_a, moves_b);
    assert_eq!(moves_a.len(), DEFAULT_SCRAMBLE_LENGTH);
    assert!(moves_a.iter().all(|m| m.angle.abs() == 90 && m.layer < 3));
    assert_eq!(a.snapshot(&Palette::classic()), b.snapshot(&Palette::classic()));
    assert_bijective(&a);
}
