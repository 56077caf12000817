//! Placement config definitions
//!
//! One variant per strategy kind, validated by serde when a segment is
//! built. Anything that gets past deserialization is structurally valid;
//! only content ids and striping pattern names are checked later, at
//! generation time, because those depend on the injected content cache.

use crate::placement::{ContentRef, PlacementKind};
use kerb_core::Direction;
use serde::{Deserialize, Serialize};

/// Ordered list of content ids.
///
/// Accepts either an array (`["tree3", "lamp"]`) or the editor's
/// comma-separated form (`"tree3, lamp"`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawContentList", into = "Vec<String>")]
pub struct ContentList(Vec<ContentRef>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawContentList {
    Csv(String),
    List(Vec<String>),
}

impl From<RawContentList> for ContentList {
    fn from(raw: RawContentList) -> Self {
        let items: Vec<String> = match raw {
            RawContentList::Csv(s) => s.split(',').map(str::to_string).collect(),
            RawContentList::List(v) => v,
        };
        ContentList::new(items)
    }
}

impl From<ContentList> for Vec<String> {
    fn from(list: ContentList) -> Self {
        list.0.into_iter().map(|c| c.0).collect()
    }
}

impl ContentList {
    /// Build a list, trimming whitespace and dropping empty entries
    pub fn new<S: AsRef<str>>(items: impl IntoIterator<Item = S>) -> Self {
        Self(
            items
                .into_iter()
                .map(|s| s.as_ref().trim().to_string())
                .filter(|s| !s.is_empty())
                .map(ContentRef)
                .collect(),
        )
    }

    pub fn single(id: impl Into<String>) -> Self {
        Self::new([id.into()])
    }

    pub fn as_slice(&self) -> &[ContentRef] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Same entries, last first
    pub fn reversed(&self) -> Self {
        Self(self.0.iter().rev().cloned().collect())
    }
}

const DEFAULT_SPACING: f32 = 15.0;

fn default_spacing() -> f32 {
    DEFAULT_SPACING
}
fn default_count() -> usize {
    1
}
fn default_single_padding() -> f32 {
    4.0
}
fn default_stencil_padding() -> f32 {
    2.0
}
fn default_stencil_height() -> f32 {
    0.015
}
fn default_striping_height() -> f32 {
    0.05
}

/// A placement generator attached to a segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlacementConfig {
    Clones(ClonesConfig),
    Stencil(StencilConfig),
    Striping(StripingConfig),
    Pedestrians(PedestriansConfig),
}

impl PlacementConfig {
    pub fn kind(&self) -> PlacementKind {
        match self {
            PlacementConfig::Clones(_) => PlacementKind::Clones,
            PlacementConfig::Stencil(_) => PlacementKind::Stencil,
            PlacementConfig::Striping(_) => PlacementKind::Striping,
            PlacementConfig::Pedestrians(_) => PlacementKind::Pedestrians,
        }
    }
}

/// Discrete models repeated along a segment (vehicles, trees, lamps)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClonesConfig {
    #[serde(alias = "models")]
    pub content: ContentList,
    #[serde(flatten)]
    pub mode: CloneMode,
    /// Fixed yaw in degrees
    #[serde(default)]
    pub facing: f32,
    /// Draw a uniform yaw per item instead of `facing`
    #[serde(default)]
    pub random_facing: bool,
    #[serde(default)]
    pub position_x: f32,
    #[serde(default)]
    pub position_y: f32,
}

/// How clones are distributed along the segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CloneMode {
    Fixed(FixedSpacing),
    Random(RandomPlacement),
    Single(SinglePlacement),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedSpacing {
    #[serde(default = "default_spacing")]
    pub spacing: f32,
    /// Falls back to `LayoutConfig::default_cycle_offset`
    #[serde(default)]
    pub cycle_offset: Option<f32>,
}

impl Default for FixedSpacing {
    fn default() -> Self {
        Self {
            spacing: DEFAULT_SPACING,
            cycle_offset: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomPlacement {
    /// Footprint of one slot along the length axis
    #[serde(default = "default_spacing")]
    pub place_length: f32,
    #[serde(default = "default_count")]
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SinglePlacement {
    #[serde(default)]
    pub justify: Justify,
    #[serde(default = "default_single_padding")]
    pub padding: f32,
}

/// Longitudinal anchor for a single placement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Justify {
    Start,
    #[default]
    Middle,
    End,
}

/// Groups of flat road markings ("BUS", "ONLY", arrows)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StencilConfig {
    #[serde(alias = "stencils", alias = "models")]
    pub content: ContentList,
    #[serde(default = "default_spacing")]
    pub spacing: f32,
    /// Distance between members of one group
    #[serde(default = "default_stencil_padding")]
    pub padding: f32,
    #[serde(default)]
    pub cycle_offset: Option<f32>,
    #[serde(default)]
    pub facing: f32,
    /// Overrides the segment direction when set
    #[serde(default)]
    pub direction: Option<Direction>,
    #[serde(default)]
    pub position_x: f32,
    #[serde(default = "default_stencil_height")]
    pub position_y: f32,
}

/// Which edge of the segment a stripe sits on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Left,
    Right,
}

/// Lane-edge striping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StripingConfig {
    #[serde(alias = "striping")]
    pub pattern: String,
    #[serde(default)]
    pub side: Side,
    #[serde(default)]
    pub facing: f32,
    #[serde(default = "default_striping_height")]
    pub position_y: f32,
}

/// Crowd density for the pedestrian generator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Empty,
    Sparse,
    #[default]
    Normal,
    Dense,
}

impl Density {
    /// Pedestrians per meter of segment length
    pub fn per_meter(&self) -> f32 {
        match self {
            Density::Empty => 0.0,
            Density::Sparse => 0.03,
            Density::Normal => 0.125,
            Density::Dense => 0.25,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PedestriansConfig {
    #[serde(default)]
    pub density: Density,
    /// Character variants; the stock `char1`..`char16` set when absent
    #[serde(default)]
    pub content: Option<ContentList>,
    #[serde(default)]
    pub position_y: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_list_from_csv() {
        let list: ContentList = serde_json::from_str("\"sedan-rig, ,suv-rig \"").unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.as_slice()[1].as_str(), "suv-rig");
    }

    #[test]
    fn test_parse_fixed_clones_from_toml() {
        let toml_str = r#"
kind = "clones"
mode = "fixed"
content = ["tree3"]
spacing = 10
facing = 90
"#;
        let config: PlacementConfig = toml::from_str(toml_str).unwrap();
        let PlacementConfig::Clones(clones) = config else {
            panic!("expected clones");
        };
        assert!(matches!(&clones.mode, CloneMode::Fixed(f) if f.spacing == 10.0 && f.cycle_offset.is_none()));
        assert_eq!(clones.facing, 90.0);
        assert!(!clones.random_facing);
    }

    #[test]
    fn test_parse_random_clones_defaults() {
        let toml_str = r#"
kind = "clones"
mode = "random"
content = "sedan-rig,box-truck-rig"
"#;
        let config: PlacementConfig = toml::from_str(toml_str).unwrap();
        let PlacementConfig::Clones(clones) = config else {
            panic!("expected clones");
        };
        assert_eq!(clones.content.len(), 2);
        assert!(matches!(&clones.mode, CloneMode::Random(r) if r.count == 1 && r.place_length == 15.0));
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let toml_str = r#"
kind = "clones"
mode = "scatter"
content = ["tree3"]
"#;
        assert!(toml::from_str::<PlacementConfig>(toml_str).is_err());
    }

    #[test]
    fn test_parse_stencil_with_direction() {
        let json = r#"{"kind":"stencil","stencils":"word-only,word-bus","spacing":20,"direction":"inbound"}"#;
        let config: PlacementConfig = serde_json::from_str(json).unwrap();
        let PlacementConfig::Stencil(stencil) = &config else {
            panic!("expected stencil");
        };
        assert_eq!(stencil.direction, Some(Direction::Inbound));
        assert_eq!(stencil.padding, 2.0);
        assert_eq!(config.kind(), PlacementKind::Stencil);
    }

    #[test]
    fn test_density_factors() {
        assert_eq!(Density::Empty.per_meter(), 0.0);
        assert!(Density::Dense.per_meter() > Density::Normal.per_meter());
    }
}
