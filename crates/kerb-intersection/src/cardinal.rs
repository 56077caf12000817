//! Compass directions, corners and a small per-direction map

use serde::{Deserialize, Serialize};
use std::fmt;

/// Approach direction of a corridor into an intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinal {
    North,
    East,
    South,
    West,
}

impl Cardinal {
    pub const ALL: [Cardinal; 4] = [
        Cardinal::North,
        Cardinal::East,
        Cardinal::South,
        Cardinal::West,
    ];

    /// Yaw that turns a corridor's local -z (its outward end) toward this
    /// direction. North is world -z.
    pub fn yaw(self) -> f32 {
        match self {
            Cardinal::North => 0.0,
            Cardinal::East => -90.0,
            Cardinal::South => 180.0,
            Cardinal::West => 90.0,
        }
    }

    pub fn opposite(self) -> Cardinal {
        match self {
            Cardinal::North => Cardinal::South,
            Cardinal::East => Cardinal::West,
            Cardinal::South => Cardinal::North,
            Cardinal::West => Cardinal::East,
        }
    }

    /// North/south corridors run along the world z axis
    pub fn is_north_south(self) -> bool {
        matches!(self, Cardinal::North | Cardinal::South)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Cardinal::North => "north",
            Cardinal::East => "east",
            Cardinal::South => "south",
            Cardinal::West => "west",
        }
    }
}

impl fmt::Display for Cardinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which edge of a corridor, seen looking outward from the center
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Right,
}

/// One of the four curb corners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Corner {
    NorthEast,
    SouthEast,
    SouthWest,
    NorthWest,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::NorthEast,
        Corner::SouthEast,
        Corner::SouthWest,
        Corner::NorthWest,
    ];

    /// The two sidewalks meeting at this corner, in curb-pair order.
    ///
    /// Walking clockwise, the corner sits on the right edge of the first
    /// approach and the left edge of the next one.
    pub fn sides(self) -> [(Cardinal, Edge); 2] {
        match self {
            Corner::NorthEast => [(Cardinal::North, Edge::Right), (Cardinal::East, Edge::Left)],
            Corner::SouthEast => [(Cardinal::East, Edge::Right), (Cardinal::South, Edge::Left)],
            Corner::SouthWest => [(Cardinal::South, Edge::Right), (Cardinal::West, Edge::Left)],
            Corner::NorthWest => [(Cardinal::West, Edge::Right), (Cardinal::North, Edge::Left)],
        }
    }

    /// Sign of the corner on the (x, z) plane
    pub fn signs(self) -> (f32, f32) {
        match self {
            Corner::NorthEast => (1.0, -1.0),
            Corner::SouthEast => (1.0, 1.0),
            Corner::SouthWest => (-1.0, 1.0),
            Corner::NorthWest => (-1.0, -1.0),
        }
    }
}

/// Optional value per approach direction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardinalMap<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub north: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub east: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub south: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub west: Option<T>,
}

impl<T> Default for CardinalMap<T> {
    fn default() -> Self {
        Self {
            north: None,
            east: None,
            south: None,
            west: None,
        }
    }
}

impl<T> CardinalMap<T> {
    pub fn get(&self, dir: Cardinal) -> Option<&T> {
        self.slot(dir).as_ref()
    }

    pub fn set(&mut self, dir: Cardinal, value: T) -> Option<T> {
        self.slot_mut(dir).replace(value)
    }

    pub fn remove(&mut self, dir: Cardinal) -> Option<T> {
        self.slot_mut(dir).take()
    }

    pub fn contains(&self, dir: Cardinal) -> bool {
        self.slot(dir).is_some()
    }

    /// Present entries in N, E, S, W order
    pub fn iter(&self) -> impl Iterator<Item = (Cardinal, &T)> {
        Cardinal::ALL
            .into_iter()
            .filter_map(move |dir| self.get(dir).map(|v| (dir, v)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn map<U>(&self, mut f: impl FnMut(Cardinal, &T) -> U) -> CardinalMap<U> {
        let mut out = CardinalMap::default();
        for (dir, value) in self.iter() {
            out.set(dir, f(dir, value));
        }
        out
    }

    fn slot(&self, dir: Cardinal) -> &Option<T> {
        match dir {
            Cardinal::North => &self.north,
            Cardinal::East => &self.east,
            Cardinal::South => &self.south,
            Cardinal::West => &self.west,
        }
    }

    fn slot_mut(&mut self, dir: Cardinal) -> &mut Option<T> {
        match dir {
            Cardinal::North => &mut self.north,
            Cardinal::East => &mut self.east,
            Cardinal::South => &mut self.south,
            Cardinal::West => &mut self.west,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kerb_core::Vec3;

    #[test]
    fn test_yaw_points_outward() {
        // local -z is the far end of a corridor
        let outward = |dir: Cardinal| Vec3::FORWARD.rotate_y(dir.yaw());
        assert!(outward(Cardinal::North).approx_eq(&Vec3::new(0.0, 0.0, -1.0)));
        assert!(outward(Cardinal::East).approx_eq(&Vec3::new(1.0, 0.0, 0.0)));
        assert!(outward(Cardinal::South).approx_eq(&Vec3::new(0.0, 0.0, 1.0)));
        assert!(outward(Cardinal::West).approx_eq(&Vec3::new(-1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_corner_sides_agree_with_geometry() {
        // a corridor's right edge is its local +x
        let edge_dir = |dir: Cardinal, edge: Edge| {
            let x = if edge == Edge::Right { 1.0 } else { -1.0 };
            Vec3::new(x, 0.0, 0.0).rotate_y(dir.yaw())
        };
        for corner in Corner::ALL {
            let (sx, sz) = corner.signs();
            for (dir, edge) in corner.sides() {
                let outward = Vec3::FORWARD.rotate_y(dir.yaw());
                let toward = edge_dir(dir, edge) + outward;
                assert!(toward.x * sx > 0.0 && toward.z * sz > 0.0, "{:?} {:?}", corner, dir);
            }
        }
    }

    #[test]
    fn test_map_ops() {
        let mut m = CardinalMap::default();
        assert!(m.is_empty());
        m.set(Cardinal::East, 3);
        m.set(Cardinal::North, 1);
        assert_eq!(m.len(), 2);
        let dirs: Vec<_> = m.iter().map(|(d, _)| d).collect();
        assert_eq!(dirs, vec![Cardinal::North, Cardinal::East]);
        assert_eq!(m.remove(Cardinal::East), Some(3));
        assert!(!m.contains(Cardinal::East));
        assert_eq!(m.map(|_, v| v * 10).north, Some(10));
    }

    #[test]
    fn test_map_serde_skips_absent() {
        let mut m = CardinalMap::default();
        m.set(Cardinal::South, "main-st".to_string());
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#"{"south":"main-st"}"#);
        let back: CardinalMap<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
