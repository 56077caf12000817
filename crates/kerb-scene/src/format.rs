//! Layout file format definitions

use kerb_core::Direction;
use kerb_intersection::CardinalMap;
use kerb_placement::{ContentList, Density, Justify, Side};
use kerb_street::{LengthAlign, Surface, WidthAlign};
use serde::{Deserialize, Serialize};

/// Root structure of a layout file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutFile {
    #[serde(default)]
    pub streets: Vec<StreetDef>,
    #[serde(default)]
    pub intersections: Vec<IntersectionDef>,
}

/// One street as the editor describes it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreetDef {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Advisory; reconciled against the segment sum on load
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub length: Option<f32>,
    #[serde(default)]
    pub justify_width: Option<WidthAlign>,
    #[serde(default)]
    pub justify_length: Option<LengthAlign>,
    #[serde(default)]
    pub segments: Vec<SegmentDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentDef {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub segment_type: String,
    #[serde(default)]
    pub surface: Option<Surface>,
    /// CSS hex color
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub level: Option<i32>,
    pub width: f32,
    #[serde(default)]
    pub length: Option<f32>,
    #[serde(default)]
    pub direction: Option<Direction>,
    #[serde(default)]
    pub generated: GeneratedDef,
}

/// Generator bags; each kind may hold several entries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratedDef {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clones: Vec<ClonesDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stencil: Vec<StencilDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub striping: Vec<StripingDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pedestrians: Vec<PedestriansDef>,
}

impl GeneratedDef {
    pub fn is_empty(&self) -> bool {
        self.clones.is_empty()
            && self.stencil.is_empty()
            && self.striping.is_empty()
            && self.pedestrians.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClonesDef {
    /// fixed | random | single (defaults to fixed)
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    /// Takes precedence over `model`
    #[serde(default)]
    pub models_array: Option<ContentList>,
    #[serde(default)]
    pub spacing: Option<f32>,
    #[serde(default)]
    pub place_length: Option<f32>,
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub facing: f32,
    #[serde(default)]
    pub random_facing: bool,
    #[serde(default)]
    pub cycle_offset: Option<f32>,
    #[serde(default)]
    pub justify: Option<Justify>,
    #[serde(default)]
    pub padding: Option<f32>,
    #[serde(default)]
    pub position_x: f32,
    #[serde(default)]
    pub position_y: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StencilDef {
    /// One stencil or a comma-separated group
    #[serde(alias = "stencils")]
    pub model: Option<ContentList>,
    #[serde(default)]
    pub cycle_offset: Option<f32>,
    #[serde(default)]
    pub spacing: Option<f32>,
    #[serde(default)]
    pub padding: Option<f32>,
    #[serde(default)]
    pub facing: f32,
    #[serde(default)]
    pub direction: Option<Direction>,
    #[serde(default)]
    pub position_x: f32,
    #[serde(default)]
    pub position_y: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StripingDef {
    pub striping: String,
    #[serde(default)]
    pub side: Side,
    #[serde(default)]
    pub facing: f32,
    #[serde(default)]
    pub position_y: Option<f32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PedestriansDef {
    #[serde(default)]
    pub density: Density,
    #[serde(default)]
    pub models_array: Option<ContentList>,
    #[serde(default)]
    pub position_y: f32,
}

/// An intersection and the street approaching from each side, by street id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntersectionDef {
    pub id: String,
    #[serde(default)]
    pub position: Option<[f32; 3]>,
    #[serde(flatten)]
    pub approaches: CardinalMap<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_street_json() {
        let json = r#"{
            "id": "main-st",
            "name": "Main Street",
            "width": 14,
            "length": 60,
            "justifyWidth": "center",
            "justifyLength": "start",
            "segments": [
                { "id": "walk-w", "type": "sidewalk", "width": 3,
                  "generated": { "pedestrians": [ { "density": "dense" } ] } },
                { "id": "lane-1", "type": "drive-lane", "width": 3.5, "direction": "inbound",
                  "generated": { "clones": [ { "mode": "random", "modelsArray": "sedan-rig, suv-rig",
                                               "placeLength": 7.3, "count": 4, "randomFacing": false } ],
                                 "stencil": [ { "model": "left,arrow", "spacing": 20, "cycleOffset": 0.25 } ],
                                 "striping": [ { "striping": "dashed-stripe", "side": "right" } ] } }
            ]
        }"#;
        let street: StreetDef = serde_json::from_str(json).unwrap();
        assert_eq!(street.justify_length, Some(LengthAlign::Start));
        assert_eq!(street.segments.len(), 2);

        let lane = &street.segments[1];
        assert_eq!(lane.segment_type, "drive-lane");
        assert_eq!(lane.direction, Some(Direction::Inbound));
        assert_eq!(lane.generated.clones[0].models_array.as_ref().unwrap().len(), 2);
        assert_eq!(lane.generated.stencil[0].model.as_ref().unwrap().len(), 2);
        assert_eq!(lane.generated.striping[0].side, Side::Right);
        assert!(street.segments[0].generated.clones.is_empty());
    }

    #[test]
    fn test_layout_toml() {
        let toml_str = r#"
[[streets]]
id = "oak"
length = 40

[[streets.segments]]
id = "lane"
type = "bike-lane"
width = 1.8

[[intersections]]
id = "oak-and-elm"
north = "oak"
east = "elm"
"#;
        let layout: LayoutFile = toml::from_str(toml_str).unwrap();
        assert_eq!(layout.streets[0].segments[0].width, 1.8);
        let def = &layout.intersections[0];
        assert_eq!(def.approaches.north.as_deref(), Some("oak"));
        assert!(def.approaches.south.is_none());
        assert!(def.position.is_none());
    }
}
