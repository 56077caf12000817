//! Placement output types

use kerb_core::{Color, Transform, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to a piece of content (model, mixin or stencil id)
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentRef(pub String);

impl ContentRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContentRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Debug for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentRef({})", self.0)
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One generated instance in segment-local space
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: Vec3,
    /// Rotation in degrees
    pub rotation: Vec3,
    pub content: ContentRef,
}

impl Placement {
    pub fn new(position: Vec3, yaw: f32, content: ContentRef) -> Self {
        Self {
            position,
            rotation: Vec3::new(0.0, yaw, 0.0),
            content,
        }
    }

    pub fn transform(&self) -> Transform {
        Transform::from_position(self.position).with_rotation(self.rotation)
    }
}

/// A single textured strip laid along the segment
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StripingRegion {
    pub texture_id: String,
    pub width: f32,
    pub length: f32,
    /// Texture repeats along the length axis
    pub repeat_y: f32,
    pub color: Color,
    pub position: Vec3,
    pub rotation: Vec3,
}

impl StripingRegion {
    pub fn transform(&self) -> Transform {
        Transform::from_position(self.position).with_rotation(self.rotation)
    }
}

/// Which generator produced a batch of content
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementKind {
    Clones,
    Stencil,
    Striping,
    Pedestrians,
}

impl PlacementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlacementKind::Clones => "clones",
            PlacementKind::Stencil => "stencil",
            PlacementKind::Striping => "striping",
            PlacementKind::Pedestrians => "pedestrians",
        }
    }
}

/// Everything one generator config produced in one pass
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub kind: PlacementKind,
    pub placements: Vec<Placement>,
    pub regions: Vec<StripingRegion>,
}

impl GeneratedContent {
    pub fn empty(kind: PlacementKind) -> Self {
        Self {
            kind,
            placements: Vec::new(),
            regions: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.placements.len() + self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
