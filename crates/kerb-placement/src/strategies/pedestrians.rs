//! Pedestrian crowd strategy

use super::{random, StrategyEnv};
use crate::config::{ContentList, PedestriansConfig};
use crate::placement::Placement;
use kerb_core::{Direction, Vec3};

/// Length of segment one pedestrian occupies
const FOOTPRINT: f32 = 1.0;
/// Keep-out distance from the segment edges
const EDGE_MARGIN: f32 = 0.5;
const STOCK_VARIANTS: usize = 16;

fn stock_variants() -> ContentList {
    ContentList::new((1..=STOCK_VARIANTS).map(|i| format!("char{}", i)))
}

/// Pedestrians for a density over a segment length
pub fn count(config: &PedestriansConfig, length: f32) -> usize {
    if !(length > 0.0) {
        return 0;
    }
    (config.density.per_meter() * length).floor() as usize
}

pub fn generate(
    length: f32,
    segment_width: f32,
    direction: Direction,
    config: &PedestriansConfig,
    env: &mut StrategyEnv<'_>,
) -> Vec<Placement> {
    let wanted = count(config, length);
    if wanted == 0 {
        return Vec::new();
    }

    let variants = match &config.content {
        Some(list) if !list.is_empty() => list.clone(),
        _ => stock_variants(),
    };
    let half = (segment_width / 2.0 - EDGE_MARGIN).max(0.0);

    let zs = random::sample(length, FOOTPRINT, wanted, &mut *env.rng);
    let mut placements = Vec::with_capacity(zs.len());
    for z in zs {
        let x = env.rng.range(-half, half);
        let yaw = match direction {
            Direction::Inbound => 180.0,
            Direction::Outbound => 0.0,
            Direction::None => env.rng.facing(),
        };
        if let Some(content) = env.pick_content(&variants) {
            placements.push(Placement::new(Vec3::new(x, config.position_y, z), yaw, content));
        }
    }
    placements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Density;
    use crate::rng::PlacementRng;
    use kerb_core::LayoutConfig;

    fn run(density: Density, width: f32, direction: Direction) -> Vec<Placement> {
        let layout = LayoutConfig::default();
        let mut rng = PlacementRng::from_seed_u64(5);
        let mut env = StrategyEnv {
            rng: &mut rng,
            config: &layout,
        };
        let config = PedestriansConfig {
            density,
            content: None,
            position_y: 0.0,
        };
        generate(60.0, width, direction, &config, &mut env)
    }

    #[test]
    fn density_drives_count() {
        assert_eq!(run(Density::Empty, 3.0, Direction::None).len(), 0);
        assert_eq!(run(Density::Sparse, 3.0, Direction::None).len(), 1);
        assert_eq!(run(Density::Normal, 3.0, Direction::None).len(), 7);
        assert_eq!(run(Density::Dense, 3.0, Direction::None).len(), 15);
    }

    #[test]
    fn stays_inside_the_segment() {
        for p in run(Density::Dense, 3.0, Direction::None) {
            assert!(p.position.x.abs() <= 1.0 + 1e-6);
            assert!(p.position.z.abs() <= 30.0);
            assert!(p.content.as_str().starts_with("char"));
        }
    }

    #[test]
    fn narrow_segment_centers_pedestrians() {
        for p in run(Density::Normal, 0.8, Direction::None) {
            assert_eq!(p.position.x, 0.0);
        }
    }

    #[test]
    fn direction_fixes_heading() {
        for p in run(Density::Normal, 3.0, Direction::Inbound) {
            assert_eq!(p.rotation.y, 180.0);
        }
    }
}
