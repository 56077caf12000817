//! Random strategy: sampling slots without replacement

use super::StrategyEnv;
use crate::config::{ClonesConfig, RandomPlacement};
use crate::placement::Placement;
use crate::rng::PlacementRng;
use kerb_core::Vec3;
use tracing::warn;

/// Evenly spaced candidate slots of `place_length` each.
///
/// There are `⌊(length − place_length) / place_length⌋ + 1` of them,
/// centered from `−length/2 + place_length/2` onward; none when the segment
/// is shorter than one slot.
pub fn slots(length: f32, place_length: f32) -> Vec<f32> {
    if !(place_length > 0.0) || !(length >= place_length) {
        return Vec::new();
    }
    let count = ((length - place_length) / place_length).floor() as usize + 1;
    let start = -length / 2.0 + place_length / 2.0;
    (0..count).map(|i| start + i as f32 * place_length).collect()
}

/// Up to `count` distinct slots, in shuffled order
pub fn sample(length: f32, place_length: f32, count: usize, rng: &mut PlacementRng) -> Vec<f32> {
    let mut candidates = slots(length, place_length);
    rng.shuffle(&mut candidates);
    candidates.truncate(count);
    candidates
}

pub fn generate(
    length: f32,
    spec: &RandomPlacement,
    clones: &ClonesConfig,
    env: &mut StrategyEnv<'_>,
) -> Vec<Placement> {
    let place_length = env.clamp_spacing(spec.place_length);
    let zs = sample(length, place_length, spec.count, &mut *env.rng);

    let mut placements = Vec::with_capacity(zs.len());
    for z in zs {
        let Some(content) = env.pick_content(&clones.content) else {
            warn!(z, "random clone has no content; skipping");
            continue;
        };
        let yaw = env.yaw(clones.facing, clones.random_facing);
        placements.push(Placement::new(
            Vec3::new(clones.position_x, clones.position_y, z),
            yaw,
            content,
        ));
    }
    placements
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_layout() {
        let s = slots(30.0, 10.0);
        assert_eq!(s.len(), 3);
        assert!((s[0] + 10.0).abs() < 1e-4);
        assert!(s[1].abs() < 1e-4);
        assert!((s[2] - 10.0).abs() < 1e-4);
    }

    #[test]
    fn short_segment_has_no_slots() {
        assert!(slots(4.0, 5.0).is_empty());
        assert_eq!(slots(5.0, 5.0).len(), 1);
    }

    #[test]
    fn sample_is_without_replacement() {
        let mut rng = PlacementRng::from_seed_u64(9);
        let picked = sample(60.0, 5.0, 100, &mut rng);
        assert_eq!(picked.len(), 12);
        let mut sorted = picked.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        sorted.dedup();
        assert_eq!(sorted.len(), 12);
    }

    #[test]
    fn sample_respects_count() {
        let mut rng = PlacementRng::from_seed_u64(9);
        assert_eq!(sample(60.0, 5.0, 4, &mut rng).len(), 4);
        assert!(sample(60.0, 5.0, 0, &mut rng).is_empty());
    }
}
