//! Kerb Intersection - Composition of corridors meeting at a point
//!
//! Up to four corridors approach an intersection from the north, east, south
//! and west. Composition reads each approach's sidewalk runs and total
//! width, derives curb pairs for the four corners, sizes the intersection
//! and positions every corridor so its near end is flush with the
//! intersection's edge.

pub mod cardinal;
pub mod compose;
pub mod dimensions;

pub use cardinal::{Cardinal, CardinalMap, Corner, Edge};
pub use compose::{compose, compose_dimensions, CurbPair, Indicators, IntersectionLayout};
pub use dimensions::CorridorDimensions;

use kerb_core::{KerbError, Result, Vec3};
use serde::{Deserialize, Serialize};

/// A declared intersection: a center and the corridor approaching from
/// each direction, by corridor name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Intersection {
    pub name: String,
    #[serde(default)]
    pub position: Vec3,
    #[serde(default)]
    pub approaches: CardinalMap<String>,
}

impl Intersection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Attach a corridor; a corridor may approach from one direction only
    pub fn attach(&mut self, dir: Cardinal, corridor: impl Into<String>) -> Result<()> {
        let corridor = corridor.into();
        if self
            .approaches
            .iter()
            .any(|(other, name)| other != dir && *name == corridor)
        {
            return Err(KerbError::CorridorAlreadyAttached(corridor));
        }
        self.approaches.set(dir, corridor);
        Ok(())
    }

    pub fn detach(&mut self, dir: Cardinal) -> Option<String> {
        self.approaches.remove(dir)
    }

    pub fn references(&self, corridor: &str) -> bool {
        self.approaches.iter().any(|(_, name)| name == corridor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kerb_street::{Corridor, Segment, SegmentType};

    fn street(name: &str, length: f32) -> Corridor {
        let parts = [
            (SegmentType::Sidewalk, 3.0),
            (SegmentType::DriveLane, 3.5),
            (SegmentType::DriveLane, 3.5),
            (SegmentType::Sidewalk, 2.0),
        ];
        let mut c = Corridor::new(name).with_length(length).unwrap();
        for (i, (kind, width)) in parts.into_iter().enumerate() {
            c.push_segment(Segment::new(format!("{}-{}", name, i), kind, width).unwrap())
                .unwrap();
        }
        c
    }

    #[test]
    fn north_and_east_only() {
        let north = street("north-st", 60.0);
        let east = street("east-st", 40.0);
        let mut approaches = CardinalMap::default();
        approaches.set(Cardinal::North, &north);
        approaches.set(Cardinal::East, &east);

        let layout = compose(&approaches);
        assert!(layout.dimensions.get(Cardinal::South).is_none());
        assert!(layout.dimensions.get(Cardinal::West).is_none());
        assert_eq!(layout.curb(Corner::NorthWest), CurbPair::NONE);
        assert_eq!(layout.curb(Corner::SouthWest), CurbPair::NONE);
        assert_eq!(layout.curb(Corner::SouthEast), CurbPair::NONE);
        assert_eq!(layout.curb(Corner::NorthEast), CurbPair { a: 2.0, b: 3.0 });

        assert!(layout.indicators(Cardinal::North).crosswalk);
        assert!(!layout.indicators(Cardinal::South).stop_sign);
        assert_eq!(layout.size(), (12.0, 12.0));
    }

    #[test]
    fn corridors_sit_flush() {
        let north = street("north-st", 60.0);
        let mut approaches = CardinalMap::default();
        approaches.set(Cardinal::North, &north);
        approaches.set(Cardinal::West, &north);
        let layout = compose(&approaches);

        // near end of the north corridor (local z = +length/2) lands on the
        // intersection's north edge
        let placement = layout.placements.get(Cardinal::North).unwrap();
        let near_end = placement.position + Vec3::new(0.0, 0.0, 30.0).rotate_y(placement.rotation.y);
        assert!((near_end.z + layout.depth / 2.0).abs() < 1e-4);

        let placement = layout.placements.get(Cardinal::West).unwrap();
        let near_end = placement.position + Vec3::new(0.0, 0.0, 30.0).rotate_y(placement.rotation.y);
        assert!((near_end.x + layout.width / 2.0).abs() < 1e-4);
    }

    #[test]
    fn attach_rejects_second_direction() {
        let mut i = Intersection::new("5th-and-main");
        i.attach(Cardinal::North, "main").unwrap();
        i.attach(Cardinal::North, "main").unwrap();
        assert!(matches!(
            i.attach(Cardinal::South, "main"),
            Err(KerbError::CorridorAlreadyAttached(_))
        ));
        assert!(i.references("main"));
        assert_eq!(i.detach(Cardinal::North).as_deref(), Some("main"));
        assert!(!i.references("main"));
    }
}
