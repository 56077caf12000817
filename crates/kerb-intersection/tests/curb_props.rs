//! Property tests for corner curb geometry

use kerb_intersection::{compose_dimensions, Cardinal, CardinalMap, Corner, CorridorDimensions};
use proptest::prelude::*;

fn sidewalk() -> impl Strategy<Value = f32> {
    prop_oneof![Just(0.0f32), 0.5f32..5.0]
}

fn approach() -> impl Strategy<Value = Option<CorridorDimensions>> {
    prop::option::of((sidewalk(), sidewalk(), 6.0f32..30.0, 10.0f32..100.0).prop_map(
        |(left, right, total, length)| CorridorDimensions {
            left_sidewalk_width: left,
            right_sidewalk_width: right,
            total_width: total,
            length,
        },
    ))
}

proptest! {
    #[test]
    fn curb_is_zero_iff_a_side_is_missing(
        n in approach(), e in approach(), s in approach(), w in approach(),
    ) {
        let dims = CardinalMap { north: n, east: e, south: s, west: w };
        let layout = compose_dimensions(dims.clone());

        for corner in Corner::ALL {
            let [a, b] = corner.sides().map(|(dir, edge)| {
                dims.get(dir).map(|d| d.sidewalk(edge)).unwrap_or(0.0)
            });
            let curb = layout.curb(corner);
            if a == 0.0 || b == 0.0 {
                prop_assert_eq!((curb.a, curb.b), (0.0, 0.0));
            } else {
                prop_assert_eq!((curb.a, curb.b), (a, b));
            }
        }
    }

    #[test]
    fn placements_match_presence(
        n in approach(), e in approach(), s in approach(), w in approach(),
    ) {
        let dims = CardinalMap { north: n, east: e, south: s, west: w };
        let layout = compose_dimensions(dims.clone());
        for dir in Cardinal::ALL {
            prop_assert_eq!(dims.contains(dir), layout.placements.contains(dir));
            prop_assert_eq!(dims.contains(dir), layout.indicators(dir).traffic_signal);
        }
    }
}
