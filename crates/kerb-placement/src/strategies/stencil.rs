//! Stencil-Group strategy
//!
//! Groups sit at Fixed-Spacing positions. Within a group, member `k` is
//! offset `k × padding` toward `-z`. Inbound groups are read from the other
//! end of the segment, so their member order is reversed and they turn 180°;
//! outbound groups mirror the facing.

use super::{fixed, StrategyEnv};
use crate::config::StencilConfig;
use crate::placement::Placement;
use kerb_core::{Direction, Vec3};
use tracing::warn;

/// Stencils lie flat on the surface
const FLAT_PITCH: f32 = -90.0;

/// Yaw for a stencil group under a travel direction
pub fn group_yaw(direction: Direction, facing: f32) -> f32 {
    match direction {
        Direction::Inbound => facing + 180.0,
        Direction::Outbound => -facing,
        Direction::None => facing,
    }
}

pub fn generate(
    length: f32,
    segment_direction: Direction,
    config: &StencilConfig,
    env: &mut StrategyEnv<'_>,
) -> Vec<Placement> {
    if config.content.is_empty() {
        warn!("stencil group has no content; skipping");
        return Vec::new();
    }

    let direction = config.direction.unwrap_or(segment_direction);
    let members = match direction {
        Direction::Inbound => config.content.reversed(),
        _ => config.content.clone(),
    };
    let yaw = group_yaw(direction, config.facing);

    let spacing = env.clamp_spacing(config.spacing);
    let cycle_offset = env.cycle_offset(config.cycle_offset);

    let mut placements = Vec::new();
    for group_z in fixed::slots(length, spacing, cycle_offset) {
        for (k, content) in members.as_slice().iter().enumerate() {
            placements.push(Placement {
                position: Vec3::new(
                    config.position_x,
                    config.position_y,
                    group_z - k as f32 * config.padding,
                ),
                rotation: Vec3::new(FLAT_PITCH, yaw, 0.0),
                content: content.clone(),
            });
        }
    }
    placements
}
