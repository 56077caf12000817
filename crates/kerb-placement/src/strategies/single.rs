//! Single strategy

use super::StrategyEnv;
use crate::config::{ClonesConfig, Justify, SinglePlacement};
use crate::placement::Placement;
use kerb_core::Vec3;
use tracing::warn;

/// Longitudinal position for a justified single item
pub fn position(length: f32, justify: Justify, padding: f32) -> f32 {
    match justify {
        Justify::Start => length / 2.0 - padding,
        Justify::Middle => 0.0,
        Justify::End => -length / 2.0 + padding,
    }
}

pub fn generate(
    length: f32,
    spec: &SinglePlacement,
    clones: &ClonesConfig,
    env: &mut StrategyEnv<'_>,
) -> Vec<Placement> {
    let Some(content) = env.pick_content(&clones.content) else {
        warn!("single clone has no content; skipping");
        return Vec::new();
    };
    let z = position(length, spec.justify, spec.padding);
    let yaw = env.yaw(clones.facing, clones.random_facing);
    vec![Placement::new(
        Vec3::new(clones.position_x, clones.position_y, z),
        yaw,
        content,
    )]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn justify_positions() {
        assert!((position(60.0, Justify::Start, 4.0) - 26.0).abs() < 1e-5);
        assert!((position(60.0, Justify::End, 4.0) + 26.0).abs() < 1e-5);
        assert_eq!(position(60.0, Justify::Middle, 4.0), 0.0);
    }
}
