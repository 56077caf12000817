//! Property tests for the placement strategies

use kerb_core::LayoutConfig;
use kerb_placement::strategies::{fixed, random, StrategyEnv};
use kerb_placement::{CloneMode, ClonesConfig, ContentList, FixedSpacing, PlacementRng};
use proptest::prelude::*;

fn fixed_count(length: f32, spacing: f32) -> usize {
    let layout = LayoutConfig::default();
    let mut rng = PlacementRng::from_seed_u64(0);
    let mut env = StrategyEnv {
        rng: &mut rng,
        config: &layout,
    };
    let spec = FixedSpacing {
        spacing,
        cycle_offset: None,
    };
    let clones = ClonesConfig {
        content: ContentList::single("tree3"),
        mode: CloneMode::Fixed(spec.clone()),
        facing: 0.0,
        random_facing: false,
        position_x: 0.0,
        position_y: 0.0,
    };
    fixed::generate(length, &spec, &clones, &mut env).len()
}

proptest! {
    #[test]
    fn non_positive_spacing_behaves_like_one(length in 0.0f32..300.0, spacing in -50.0f32..=0.0) {
        prop_assert_eq!(fixed_count(length, spacing), fixed_count(length, 1.0));
    }

    #[test]
    fn fixed_count_is_floor_of_ratio(length in 1.0f32..300.0, spacing in 1.0f32..40.0) {
        prop_assert_eq!(fixed_count(length, spacing), (length / spacing).floor() as usize);
    }

    #[test]
    fn fixed_positions_stay_inside(length in 1.0f32..300.0, spacing in 1.0f32..40.0, offset in 0.0f32..1.0) {
        for z in fixed::slots(length, spacing, offset) {
            prop_assert!(z <= length / 2.0 + 1e-3);
            prop_assert!(z >= -length / 2.0 - 1e-3);
        }
    }

    #[test]
    fn random_never_duplicates(
        length in 0.0f32..200.0,
        place_length in 1.0f32..20.0,
        count in 0usize..50,
        seed in any::<u64>(),
    ) {
        let mut rng = PlacementRng::from_seed_u64(seed);
        let available = random::slots(length, place_length).len();
        let picked = random::sample(length, place_length, count, &mut rng);
        prop_assert_eq!(picked.len(), count.min(available));

        let mut sorted = picked.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        for pair in sorted.windows(2) {
            prop_assert!((pair[1] - pair[0]) > place_length * 0.5);
        }
    }
}
