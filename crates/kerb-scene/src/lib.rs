//! Kerb Scene - Declarative layout input
//!
//! This crate parses street layouts from TOML or the editor's JSON and
//! validates them into typed corridors and intersections. Loosely shaped
//! generator bags become `PlacementConfig` values here, so nothing past this
//! boundary has to re-check them.

mod format;
mod loader;

pub use format::{
    ClonesDef, GeneratedDef, IntersectionDef, LayoutFile, PedestriansDef, SegmentDef, StencilDef,
    StreetDef, StripingDef,
};
pub use loader::{
    build_corridor, build_intersection, build_segment, load_layout, load_layout_string,
    parse_layout, LayoutFormat, LoadedLayout,
};
