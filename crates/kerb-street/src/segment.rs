//! Segment model

use kerb_core::{Color, Direction, KerbError, LayoutConfig, Result, SegmentId};
use kerb_placement::{PlacementConfig, SegmentContext};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a segment.
///
/// Informs default surface, color and elevation; never constrains width.
/// Tags the engine does not know are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SegmentType {
    DriveLane,
    BusLane,
    BikeLane,
    Sidewalk,
    ParkingLane,
    Divider,
    Grass,
    Rail,
    TurnLane,
    Other(String),
}

impl SegmentType {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "drive-lane" => SegmentType::DriveLane,
            "bus-lane" => SegmentType::BusLane,
            "bike-lane" => SegmentType::BikeLane,
            "sidewalk" => SegmentType::Sidewalk,
            "parking-lane" => SegmentType::ParkingLane,
            "divider" => SegmentType::Divider,
            "grass" => SegmentType::Grass,
            "rail" => SegmentType::Rail,
            "turn-lane" => SegmentType::TurnLane,
            other => SegmentType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SegmentType::DriveLane => "drive-lane",
            SegmentType::BusLane => "bus-lane",
            SegmentType::BikeLane => "bike-lane",
            SegmentType::Sidewalk => "sidewalk",
            SegmentType::ParkingLane => "parking-lane",
            SegmentType::Divider => "divider",
            SegmentType::Grass => "grass",
            SegmentType::Rail => "rail",
            SegmentType::TurnLane => "turn-lane",
            SegmentType::Other(tag) => tag,
        }
    }

    /// Sidewalk-like segments form the curb runs an intersection reads.
    /// Custom tags such as `sidewalk-tree` count too.
    pub fn is_sidewalk(&self) -> bool {
        match self {
            SegmentType::Sidewalk => true,
            SegmentType::Other(tag) => tag.starts_with("sidewalk"),
            _ => false,
        }
    }

    pub fn defaults(&self) -> TypeDefaults {
        let (surface, color, level) = match self {
            SegmentType::DriveLane | SegmentType::TurnLane => (Surface::Asphalt, 0xffffff, 0),
            SegmentType::BusLane => (Surface::Asphalt, 0xff9393, 0),
            SegmentType::BikeLane => (Surface::Asphalt, 0xadff83, 0),
            SegmentType::Sidewalk => (Surface::Sidewalk, 0xffffff, 1),
            SegmentType::ParkingLane => (Surface::Concrete, 0xdddddd, 0),
            SegmentType::Divider => (Surface::Concrete, 0xffffff, 1),
            SegmentType::Grass => (Surface::Grass, 0xffffff, 0),
            SegmentType::Rail => (Surface::Gravel, 0xffffff, 0),
            SegmentType::Other(tag) if tag.starts_with("sidewalk") => {
                (Surface::Sidewalk, 0xffffff, 1)
            }
            SegmentType::Other(_) => (Surface::Asphalt, 0xffffff, 0),
        };
        TypeDefaults {
            surface,
            color: Color::from_hex(color),
            level,
        }
    }
}

impl From<String> for SegmentType {
    fn from(tag: String) -> Self {
        SegmentType::parse(&tag)
    }
}

impl From<SegmentType> for String {
    fn from(t: SegmentType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for SegmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Defaults a segment type contributes when a declaration is silent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeDefaults {
    pub surface: Surface,
    pub color: Color,
    pub level: i32,
}

/// Surface material (rendering hint only)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    #[default]
    Asphalt,
    Concrete,
    Grass,
    Sidewalk,
    Gravel,
    Sand,
    Hatched,
    None,
}

/// One lane / sidewalk / divider unit of a cross-section
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub id: SegmentId,
    pub name: Option<String>,
    pub segment_type: SegmentType,
    width: f32,
    /// `None` inherits the corridor length
    pub length: Option<f32>,
    pub elevation_level: Option<i32>,
    pub direction: Direction,
    pub surface: Surface,
    pub color: Color,
    /// Placement generators, each regenerated wholesale on change
    pub generation: Vec<PlacementConfig>,
}

impl Segment {
    /// Create a segment with the defaults of its type
    pub fn new(id: impl Into<SegmentId>, segment_type: SegmentType, width: f32) -> Result<Self> {
        let id = id.into();
        check_width(&id, width)?;
        let defaults = segment_type.defaults();
        Ok(Self {
            id,
            name: None,
            segment_type,
            width,
            length: None,
            elevation_level: Some(defaults.level),
            direction: Direction::None,
            surface: defaults.surface,
            color: defaults.color,
            generation: Vec::new(),
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_level(mut self, level: i32) -> Self {
        self.elevation_level = Some(level);
        self
    }

    pub fn with_generator(mut self, config: PlacementConfig) -> Self {
        self.generation.push(config);
        self
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Change the width, keeping it strictly positive
    pub fn set_width(&mut self, width: f32) -> Result<()> {
        check_width(&self.id, width)?;
        self.width = width;
        Ok(())
    }

    pub fn effective_length(&self, corridor_length: f32) -> f32 {
        self.length.unwrap_or(corridor_length)
    }

    /// Surface height for this segment's elevation level
    pub fn height(&self, config: &LayoutConfig) -> f32 {
        config.surface_height(self.elevation_level)
    }

    pub fn is_sidewalk(&self) -> bool {
        self.segment_type.is_sidewalk()
    }

    /// What placement strategies get to see of this segment
    pub fn placement_context(&self, corridor_length: f32) -> SegmentContext<'_> {
        SegmentContext {
            segment_id: self.id.as_str(),
            length: self.effective_length(corridor_length),
            width: self.width,
            direction: self.direction,
        }
    }
}

fn check_width(id: &SegmentId, width: f32) -> Result<()> {
    if width.is_finite() && width > 0.0 {
        Ok(())
    } else {
        Err(KerbError::InvalidWidth {
            id: id.to_string(),
            value: width,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_roundtrip() {
        for tag in ["drive-lane", "bike-lane", "sidewalk", "sidewalk-tree", "streetcar"] {
            assert_eq!(SegmentType::parse(tag).as_str(), tag);
        }
        let t: SegmentType = serde_json::from_str("\"parking-lane\"").unwrap();
        assert_eq!(t, SegmentType::ParkingLane);
    }

    #[test]
    fn test_sidewalk_like() {
        assert!(SegmentType::Sidewalk.is_sidewalk());
        assert!(SegmentType::parse("sidewalk-lamp").is_sidewalk());
        assert!(!SegmentType::BikeLane.is_sidewalk());
        assert!(!SegmentType::parse("grass-strip").is_sidewalk());
    }

    #[test]
    fn test_new_applies_type_defaults() {
        let s = Segment::new("walk", SegmentType::Sidewalk, 3.0).unwrap();
        assert_eq!(s.elevation_level, Some(1));
        assert_eq!(s.surface, Surface::Sidewalk);
        let lane = Segment::new("bus", SegmentType::BusLane, 3.0).unwrap();
        assert_eq!(lane.color.to_css(), "#ff9393");
    }

    #[test]
    fn test_width_must_be_positive() {
        assert!(Segment::new("a", SegmentType::DriveLane, 0.0).is_err());
        assert!(Segment::new("a", SegmentType::DriveLane, -1.0).is_err());
        assert!(Segment::new("a", SegmentType::DriveLane, f32::NAN).is_err());

        let mut s = Segment::new("a", SegmentType::DriveLane, 3.0).unwrap();
        assert!(matches!(s.set_width(0.0), Err(KerbError::InvalidWidth { .. })));
        assert_eq!(s.width(), 3.0);
        s.set_width(3.5).unwrap();
        assert_eq!(s.width(), 3.5);
    }

    #[test]
    fn test_height_from_level() {
        let config = LayoutConfig::default();
        let raised = Segment::new("a", SegmentType::Divider, 1.0)
            .unwrap()
            .with_level(2);
        assert!((raised.height(&config) - 0.45).abs() < 1e-5);
        let sunk = raised.clone().with_level(-5);
        assert!((sunk.height(&config) - 0.15).abs() < 1e-5);
        let mut unset = sunk;
        unset.elevation_level = None;
        assert!((unset.height(&config) - 0.15).abs() < 1e-5);
    }

    #[test]
    fn test_length_inheritance() {
        let mut s = Segment::new("a", SegmentType::DriveLane, 3.0).unwrap();
        assert_eq!(s.effective_length(60.0), 60.0);
        s.length = Some(20.0);
        assert_eq!(s.effective_length(60.0), 20.0);
        assert_eq!(s.placement_context(60.0).length, 20.0);
    }
}
