//! Generator dispatch: config + segment context → generated content

use crate::config::{CloneMode, PlacementConfig};
use crate::content::ContentCache;
use crate::placement::{GeneratedContent, PlacementKind};
use crate::rng::PlacementRng;
use crate::strategies::{fixed, pedestrians, random, single, stencil, striping, StrategyEnv};
use kerb_core::{Direction, LayoutConfig};
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

/// The segment data every strategy is allowed to see
#[derive(Debug, Clone, Copy)]
pub struct SegmentContext<'a> {
    pub segment_id: &'a str,
    pub length: f32,
    pub width: f32,
    pub direction: Direction,
}

/// Run one generator config from scratch.
///
/// Never fails: invalid content and unknown patterns are logged and the
/// affected placements skipped. A non-empty `cache` restricts output to
/// content it knows; `None` or an empty cache accepts every reference.
#[instrument(level = "debug", skip_all, fields(segment = ctx.segment_id, kind = config.kind().as_str()))]
pub fn generate(
    config: &PlacementConfig,
    ctx: &SegmentContext<'_>,
    rng: &mut PlacementRng,
    layout: &LayoutConfig,
    cache: Option<&ContentCache>,
) -> GeneratedContent {
    let mut out = GeneratedContent::empty(config.kind());
    if !ctx.length.is_finite() || ctx.length <= 0.0 {
        debug!(length = ctx.length, "degenerate segment length; nothing to place");
        return out;
    }

    let mut env = StrategyEnv { rng, config: layout };
    match config {
        PlacementConfig::Clones(clones) => {
            out.placements = match &clones.mode {
                CloneMode::Fixed(spec) => fixed::generate(ctx.length, spec, clones, &mut env),
                CloneMode::Random(spec) => random::generate(ctx.length, spec, clones, &mut env),
                CloneMode::Single(spec) => single::generate(ctx.length, spec, clones, &mut env),
            };
        }
        PlacementConfig::Stencil(spec) => {
            out.placements = stencil::generate(ctx.length, ctx.direction, spec, &mut env);
        }
        PlacementConfig::Striping(spec) => match striping::generate(ctx.length, ctx.width, spec) {
            Ok(Some(region)) => out.regions.push(region),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "skipping striping"),
        },
        PlacementConfig::Pedestrians(spec) => {
            out.placements =
                pedestrians::generate(ctx.length, ctx.width, ctx.direction, spec, &mut env);
        }
    }

    if let Some(cache) = cache.filter(|c| !c.is_empty()) {
        out.placements.retain(|p| {
            let known = cache.contains(&p.content);
            if !known {
                warn!(content = %p.content, "unknown content reference; placement skipped");
            }
            known
        });
    }

    let budget = layout.placement_budget;
    if budget > 0 && out.placements.len() > budget {
        warn!(
            produced = out.placements.len(),
            budget, "placement budget exceeded; truncating"
        );
        out.placements.truncate(budget);
    }

    debug!(count = out.len(), "generated");
    out
}

/// Run every generator on a segment, each with its own RNG stream.
///
/// Streams are keyed by kind and by position among generators of that
/// kind, so removing every stencil leaves the pedestrians where they were.
pub fn generate_all(
    configs: &[PlacementConfig],
    ctx: &SegmentContext<'_>,
    layout: &LayoutConfig,
    cache: Option<&ContentCache>,
) -> Vec<GeneratedContent> {
    let mut seen: HashMap<PlacementKind, usize> = HashMap::new();
    configs
        .iter()
        .map(|config| {
            let kind = config.kind();
            let occurrence = seen.entry(kind).or_default();
            let mut rng =
                PlacementRng::for_generator(layout.seed, ctx.segment_id, kind, *occurrence);
            *occurrence += 1;
            generate(config, ctx, &mut rng, layout, cache)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        ClonesConfig, ContentList, Density, FixedSpacing, PedestriansConfig, RandomPlacement,
        StencilConfig, StripingConfig,
    };

    fn ctx(length: f32) -> SegmentContext<'static> {
        SegmentContext {
            segment_id: "parking-1",
            length,
            width: 3.0,
            direction: Direction::Inbound,
        }
    }

    fn cars(content: &[&str]) -> PlacementConfig {
        PlacementConfig::Clones(ClonesConfig {
            content: ContentList::new(content.iter().copied()),
            mode: CloneMode::Fixed(FixedSpacing {
                spacing: 6.0,
                cycle_offset: None,
            }),
            facing: 90.0,
            random_facing: false,
            position_x: 0.0,
            position_y: 0.0,
        })
    }

    #[test]
    fn unknown_content_skipped_not_fatal() {
        let mut cache = ContentCache::new();
        cache.register_ids(["sedan-rig"]);
        let config = cars(&["sedan-rig", "hovercar"]);

        let out = generate_all(&[config], &ctx(60.0), &LayoutConfig::default(), Some(&cache));
        assert_eq!(out.len(), 1);
        assert!(out[0].placements.len() <= 10);
        assert!(out[0]
            .placements
            .iter()
            .all(|p| p.content.as_str() == "sedan-rig"));

        let out = generate_all(&[cars(&["hovercar"])], &ctx(60.0), &LayoutConfig::default(), Some(&cache));
        assert!(out[0].is_empty());
    }

    #[test]
    fn empty_cache_accepts_everything() {
        let cache = ContentCache::new();
        let out = generate_all(&[cars(&["hovercar"])], &ctx(60.0), &LayoutConfig::default(), Some(&cache));
        assert_eq!(out[0].placements.len(), 10);
    }

    #[test]
    fn budget_truncates() {
        let layout = LayoutConfig {
            placement_budget: 4,
            ..LayoutConfig::default()
        };
        let out = generate_all(&[cars(&["sedan-rig"])], &ctx(60.0), &layout, None);
        assert_eq!(out[0].placements.len(), 4);
    }

    #[test]
    fn deterministic_for_same_seed() {
        let config = PlacementConfig::Clones(ClonesConfig {
            content: ContentList::new(["sedan-rig", "suv-rig", "box-truck-rig"]),
            mode: CloneMode::Random(RandomPlacement {
                place_length: 6.0,
                count: 5,
            }),
            facing: 0.0,
            random_facing: true,
            position_x: 0.0,
            position_y: 0.0,
        });
        let layout = LayoutConfig::default();
        let a = generate_all(std::slice::from_ref(&config), &ctx(60.0), &layout, None);
        let b = generate_all(std::slice::from_ref(&config), &ctx(60.0), &layout, None);
        assert_eq!(a, b);
    }

    #[test]
    fn degenerate_length_is_a_noop() {
        let out = generate_all(&[cars(&["sedan-rig"])], &ctx(0.0), &LayoutConfig::default(), None);
        assert!(out[0].is_empty());
        let out = generate_all(&[cars(&["sedan-rig"])], &ctx(f32::NAN), &LayoutConfig::default(), None);
        assert!(out[0].is_empty());
    }

    #[test]
    fn unknown_striping_pattern_yields_empty_batch() {
        let config = PlacementConfig::Striping(StripingConfig {
            pattern: "zigzag".into(),
            side: Default::default(),
            facing: 0.0,
            position_y: 0.05,
        });
        let out = generate_all(&[config], &ctx(60.0), &LayoutConfig::default(), None);
        assert_eq!(out[0].kind, PlacementKind::Striping);
        assert!(out[0].is_empty());
    }

    #[test]
    fn dropping_one_kind_keeps_other_streams() {
        let arrows = PlacementConfig::Stencil(StencilConfig {
            content: ContentList::new(["arrow"]),
            spacing: 20.0,
            padding: 2.0,
            cycle_offset: None,
            facing: 0.0,
            direction: None,
            position_x: 0.0,
            position_y: 0.015,
        });
        let walkers = PlacementConfig::Pedestrians(PedestriansConfig {
            density: Density::Dense,
            content: None,
            position_y: 0.0,
        });
        let layout = LayoutConfig::default();

        let before = generate_all(&[arrows, walkers.clone()], &ctx(60.0), &layout, None);
        let after = generate_all(&[walkers], &ctx(60.0), &layout, None);
        assert!(!after[0].is_empty());
        assert_eq!(before[1], after[0]);
    }
}
