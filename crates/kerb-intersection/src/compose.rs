//! Intersection composition
//!
//! A pure function over up to four approaches. Missing directions are valid
//! input and read as zeros; nothing here fails.

use crate::cardinal::{Cardinal, CardinalMap, Corner};
use crate::dimensions::CorridorDimensions;
use kerb_core::{Transform, Vec3};
use kerb_street::Corridor;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The two sidewalk widths meeting at a corner
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CurbPair {
    pub a: f32,
    pub b: f32,
}

impl CurbPair {
    pub const NONE: CurbPair = CurbPair { a: 0.0, b: 0.0 };

    pub fn is_drawn(&self) -> bool {
        self.a > 0.0 && self.b > 0.0
    }
}

/// Street furniture switched on for an approach
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Indicators {
    pub crosswalk: bool,
    pub stop_sign: bool,
    pub traffic_signal: bool,
}

impl Indicators {
    fn all_on() -> Self {
        Self {
            crosswalk: true,
            stop_sign: true,
            traffic_signal: true,
        }
    }
}

/// Derived geometry of one intersection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntersectionLayout {
    pub dimensions: CardinalMap<CorridorDimensions>,
    /// NE, SE, SW, NW
    pub curbs: [CurbPair; 4],
    /// World x extent: the width of the north/south approaches
    pub width: f32,
    /// World z extent: the width of the east/west approaches
    pub depth: f32,
    pub indicators: CardinalMap<Indicators>,
    /// Corridor origin relative to the intersection center
    pub placements: CardinalMap<Transform>,
}

impl IntersectionLayout {
    pub fn curb(&self, corner: Corner) -> CurbPair {
        let index = Corner::ALL
            .iter()
            .position(|c| *c == corner)
            .unwrap_or_default();
        self.curbs[index]
    }

    /// Absent approaches have every indicator off
    pub fn indicators(&self, dir: Cardinal) -> Indicators {
        self.indicators.get(dir).copied().unwrap_or_default()
    }

    pub fn corner_position(&self, corner: Corner) -> Vec3 {
        let (sx, sz) = corner.signs();
        Vec3::new(sx * self.width / 2.0, 0.0, sz * self.depth / 2.0)
    }

    /// Size as (north/south width, east/west width)
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.depth)
    }
}

/// Compose an intersection from whichever approaches are present
pub fn compose(approaches: &CardinalMap<&Corridor>) -> IntersectionLayout {
    compose_dimensions(approaches.map(|_, corridor| CorridorDimensions::of(corridor)))
}

pub fn compose_dimensions(dimensions: CardinalMap<CorridorDimensions>) -> IntersectionLayout {
    // opposing approaches are assumed to share a width
    let across = |dir: Cardinal| {
        dimensions
            .get(dir)
            .or_else(|| dimensions.get(dir.opposite()))
            .map_or(0.0, |d| d.total_width)
    };
    let width = across(Cardinal::North);
    let depth = across(Cardinal::East);

    let curbs = Corner::ALL.map(|corner| {
        let [first, second] = corner.sides().map(|(dir, edge)| {
            dimensions
                .get(dir)
                .map(|d| d.sidewalk(edge))
                .unwrap_or(0.0)
        });
        let pair = CurbPair {
            a: first,
            b: second,
        };
        if pair.is_drawn() {
            pair
        } else {
            CurbPair::NONE
        }
    });

    let indicators = dimensions.map(|_, _| Indicators::all_on());
    let placements = dimensions.map(|dir, d| {
        let extent = if dir.is_north_south() { depth } else { width };
        let reach = extent / 2.0 + d.length / 2.0;
        let position = match dir {
            Cardinal::North => Vec3::new(0.0, 0.0, -reach),
            Cardinal::South => Vec3::new(0.0, 0.0, reach),
            Cardinal::East => Vec3::new(reach, 0.0, 0.0),
            Cardinal::West => Vec3::new(-reach, 0.0, 0.0),
        };
        Transform::from_position(position).with_yaw(dir.yaw())
    });

    debug!(
        approaches = dimensions.len(),
        width,
        depth,
        drawn_curbs = curbs.iter().filter(|c| c.is_drawn()).count(),
        "composed intersection"
    );

    IntersectionLayout {
        dimensions,
        curbs,
        width,
        depth,
        indicators,
        placements,
    }
}
