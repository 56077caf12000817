//! Fixed-Spacing strategy

use super::StrategyEnv;
use crate::config::{ClonesConfig, FixedSpacing};
use crate::placement::Placement;
use kerb_core::Vec3;
use tracing::warn;

/// `⌊length / spacing⌋` positions at `length/2 − (i + cycle_offset) × spacing`.
///
/// `spacing` must already be clamped to a positive minimum.
pub fn slots(length: f32, spacing: f32, cycle_offset: f32) -> Vec<f32> {
    if !(length > 0.0) || !(spacing > 0.0) {
        return Vec::new();
    }
    let count = (length / spacing).floor() as usize;
    (0..count)
        .map(|i| length / 2.0 - (i as f32 + cycle_offset) * spacing)
        .collect()
}

pub fn generate(
    length: f32,
    spec: &FixedSpacing,
    clones: &ClonesConfig,
    env: &mut StrategyEnv<'_>,
) -> Vec<Placement> {
    let spacing = env.clamp_spacing(spec.spacing);
    let cycle_offset = env.cycle_offset(spec.cycle_offset);

    let mut placements = Vec::new();
    for z in slots(length, spacing, cycle_offset) {
        let Some(content) = env.pick_content(&clones.content) else {
            warn!(z, "fixed-spacing clone has no content; skipping");
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
