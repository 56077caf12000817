//! Baking generated content into standalone entities

use kerb_core::{EntityId, IdAllocator, Transform};
use kerb_placement::{ContentRef, GeneratedContent, PlacementKind, StripingRegion};
use serde::{Deserialize, Serialize};

/// What a detached entity is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DetachedBody {
    Instance { content: ContentRef },
    Region { region: StripingRegion },
}

/// A former placement, now a top-level entity in world space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetachedEntity {
    pub id: EntityId,
    pub name: String,
    pub kind: PlacementKind,
    pub body: DetachedBody,
    pub transform: Transform,
}

/// Bake one batch of generated content under `base` (the segment's world
/// transform). Entity names are `<prefix>-<kind>-<n>`.
pub fn bake(
    base: &Transform,
    generated: &GeneratedContent,
    prefix: &str,
    ids: &mut IdAllocator,
) -> Vec<DetachedEntity> {
    let kind = generated.kind;
    let instances = generated.placements.iter().map(|p| {
        (
            DetachedBody::Instance {
                content: p.content.clone(),
            },
            p.transform(),
        )
    });
    let regions = generated.regions.iter().map(|r| {
        (
            DetachedBody::Region { region: r.clone() },
            r.transform(),
        )
    });

    instances
        .chain(regions)
        .enumerate()
        .map(|(n, (body, local))| DetachedEntity {
            id: ids.entity(),
            name: format!("{}-{}-{}", prefix, kind.as_str(), n),
            kind,
            body,
            transform: base.compose(&local),
        })
        .collect()
}
