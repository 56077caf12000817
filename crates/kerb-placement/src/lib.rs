//! Kerb Placement - Procedural content generation within a segment
//!
//! Given a segment's length, width and direction plus a placement config,
//! each strategy produces a fresh set of placements (position, rotation,
//! content reference) in segment-local space. Output is derived state: it is
//! discarded and rebuilt on every pass, never patched.
//!
//! Strategies:
//! - Fixed-Spacing, Random and Single (the three `clones` modes)
//! - Stencil-Group (direction-aware groups of flat markings)
//! - Striping (one textured region, no discrete instances)
//! - Pedestrians (density-driven random crowd)

mod config;
mod content;
mod generator;
mod placement;
mod rng;
pub mod strategies;

pub use config::{
    CloneMode, ClonesConfig, ContentList, Density, FixedSpacing, Justify, PedestriansConfig,
    PlacementConfig, RandomPlacement, Side, SinglePlacement, StencilConfig, StripingConfig,
};
pub use content::{ContentCache, ContentEntry, ContentFile};
pub use generator::{generate, generate_all, SegmentContext};
pub use placement::{ContentRef, GeneratedContent, Placement, PlacementKind, StripingRegion};
pub use rng::PlacementRng;
