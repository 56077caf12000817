//! Layout loading and validation

use crate::format::{
    ClonesDef, IntersectionDef, LayoutFile, PedestriansDef, SegmentDef, StencilDef, StreetDef,
    StripingDef,
};
use kerb_core::{Color, KerbError, Result, Vec3};
use kerb_intersection::Intersection;
use kerb_placement::{
    CloneMode, ClonesConfig, ContentList, FixedSpacing, PedestriansConfig, PlacementConfig,
    RandomPlacement, SinglePlacement, StencilConfig, StripingConfig,
};
use kerb_street::{Corridor, Segment, SegmentType};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

const DEFAULT_SPACING: f32 = 15.0;
const DEFAULT_STENCIL_PADDING: f32 = 2.0;
const DEFAULT_STENCIL_HEIGHT: f32 = 0.015;
const DEFAULT_STRIPING_HEIGHT: f32 = 0.05;
const DEFAULT_SINGLE_PADDING: f32 = 4.0;

/// Source syntax of a layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutFormat {
    Toml,
    Json,
}

impl LayoutFormat {
    /// Guess from a file extension; anything but `.json` is TOML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => LayoutFormat::Json,
            _ => LayoutFormat::Toml,
        }
    }
}

/// A validated layout ready to hand to a world
#[derive(Debug, Clone, Default)]
pub struct LoadedLayout {
    pub corridors: Vec<Corridor>,
    pub intersections: Vec<Intersection>,
}

/// Load a layout from a TOML or JSON file
pub fn load_layout<P: AsRef<Path>>(path: P) -> Result<LoadedLayout> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    load_layout_string(&content, LayoutFormat::from_path(path))
}

pub fn parse_layout(content: &str, format: LayoutFormat) -> Result<LayoutFile> {
    let file = match format {
        LayoutFormat::Toml => toml::from_str(content)?,
        LayoutFormat::Json => serde_json::from_str(content)?,
    };
    Ok(file)
}

/// Parse and validate a layout from a string.
///
/// Degenerate segments and unusable generator entries are logged and
/// skipped; only structural problems (duplicate ids, dangling intersection
/// references, syntax) fail the load.
pub fn load_layout_string(content: &str, format: LayoutFormat) -> Result<LoadedLayout> {
    let file = parse_layout(content, format)?;

    let mut names = HashSet::new();
    let mut corridors = Vec::with_capacity(file.streets.len());
    for def in &file.streets {
        if !names.insert(def.id.as_str()) {
            return Err(KerbError::DuplicateCorridorName(def.id.clone()));
        }
        corridors.push(build_corridor(def)?);
    }

    let mut attached = HashSet::new();
    let mut intersections = Vec::with_capacity(file.intersections.len());
    for def in &file.intersections {
        let intersection = build_intersection(def)?;
        for (_, street) in intersection.approaches.iter() {
            if !names.contains(street.as_str()) {
                return Err(KerbError::CorridorNotFound(street.clone()));
            }
            if !attached.insert(street.clone()) {
                return Err(KerbError::CorridorAlreadyAttached(street.clone()));
            }
        }
        intersections.push(intersection);
    }

    info!(
        corridors = corridors.len(),
        intersections = intersections.len(),
        "layout loaded"
    );
    Ok(LoadedLayout {
        corridors,
        intersections,
    })
}

/// Validate one street into a corridor
pub fn build_corridor(def: &StreetDef) -> Result<Corridor> {
    let mut corridor = Corridor::new(def.id.clone());
    corridor.label = def.name.clone();
    match def.length {
        Some(length) => {
            if let Err(e) = corridor.set_length(length) {
                warn!(corridor = %def.id, error = %e, "ignoring length; alignment waits for one");
            }
        }
        None => debug!(corridor = %def.id, "no length declared; alignment waits for one"),
    }
    corridor.set_alignment(
        def.justify_width.unwrap_or_default(),
        def.justify_length.unwrap_or_default(),
    );
    for segment in &def.segments {
        match build_segment(segment) {
            Ok(segment) => corridor.push_segment(segment)?,
            Err(e @ (KerbError::InvalidWidth { .. } | KerbError::InvalidLength { .. })) => {
                warn!(corridor = %def.id, segment = %segment.id, error = %e, "degenerate segment skipped");
            }
            Err(e) => return Err(e),
        }
    }
    if let Some(width) = def.width {
        corridor = corridor.with_declared_width(width);
        corridor.reconcile_width();
    }
    Ok(corridor)
}

pub fn build_segment(def: &SegmentDef) -> Result<Segment> {
    let mut segment = Segment::new(
        def.id.as_str(),
        SegmentType::parse(&def.segment_type),
        def.width,
    )?;
    segment.name = def.name.clone();
    if let Some(length) = def.length {
        if !(length.is_finite() && length > 0.0) {
            return Err(KerbError::InvalidLength {
                id: def.id.clone(),
                value: length,
            });
        }
        segment.length = Some(length);
    }
    if let Some(level) = def.level {
        segment.elevation_level = Some(level);
    }
    if let Some(direction) = def.direction {
        segment.direction = direction;
    }
    if let Some(surface) = def.surface {
        segment.surface = surface;
    }
    if let Some(css) = &def.color {
        match Color::from_css(css) {
            Some(color) => segment.color = color,
            None => warn!(segment = %def.id, color = %css, "unreadable color; keeping type default"),
        }
    }

    let generated = &def.generated;
    let built = generated
        .clones
        .iter()
        .map(|clones| clones_config(&def.id, clones))
        .chain(
            generated
                .stencil
                .iter()
                .map(|stencil| stencil_config(&def.id, stencil)),
        );
    for config in built {
        match config {
            Ok(config) => segment.generation.push(config),
            Err(e) => warn!(segment = %def.id, error = %e, "generator entry skipped"),
        }
    }
    for striping in &generated.striping {
        segment.generation.push(striping_config(striping));
    }
    for pedestrians in &generated.pedestrians {
        segment.generation.push(pedestrians_config(pedestrians));
    }
    Ok(segment)
}

pub fn build_intersection(def: &IntersectionDef) -> Result<Intersection> {
    let mut intersection = Intersection::new(def.id.clone());
    if let Some([x, y, z]) = def.position {
        intersection.position = Vec3::new(x, y, z);
    }
    for (dir, street) in def.approaches.iter() {
        intersection.attach(dir, street.clone())?;
    }
    Ok(intersection)
}

fn clones_config(segment: &str, def: &ClonesDef) -> Result<PlacementConfig> {
    let content = match (&def.models_array, &def.model) {
        (Some(list), _) if !list.is_empty() => list.clone(),
        (_, Some(model)) if !model.trim().is_empty() => ContentList::single(model.trim()),
        _ => {
            return Err(KerbError::MissingRequiredField(format!(
                "{}.generated.clones.model",
                segment
            )))
        }
    };

    let mode = match def.mode.as_deref().unwrap_or("fixed") {
        "fixed" => CloneMode::Fixed(FixedSpacing {
            spacing: def.spacing.unwrap_or(DEFAULT_SPACING),
            cycle_offset: def.cycle_offset,
        }),
        "random" => CloneMode::Random(RandomPlacement {
            place_length: def.place_length.unwrap_or(DEFAULT_SPACING),
            count: def.count.unwrap_or(1),
        }),
        "single" => CloneMode::Single(SinglePlacement {
            justify: def.justify.unwrap_or_default(),
            padding: def.padding.unwrap_or(DEFAULT_SINGLE_PADDING),
        }),
        other => {
            return Err(KerbError::InvalidEnumValue {
                value: other.to_string(),
                allowed: vec!["fixed".into(), "random".into(), "single".into()],
            })
        }
    };

    Ok(PlacementConfig::Clones(ClonesConfig {
        content,
        mode,
        facing: def.facing,
        random_facing: def.random_facing,
        position_x: def.position_x,
        position_y: def.position_y,
    }))
}

fn stencil_config(segment: &str, def: &StencilDef) -> Result<PlacementConfig> {
    let content = def
        .model
        .clone()
        .filter(|list| !list.is_empty())
        .ok_or_else(|| {
            KerbError::MissingRequiredField(format!("{}.generated.stencil.model", segment))
        })?;
    Ok(PlacementConfig::Stencil(StencilConfig {
        content,
        spacing: def.spacing.unwrap_or(DEFAULT_SPACING),
        padding: def.padding.unwrap_or(DEFAULT_STENCIL_PADDING),
        cycle_offset: def.cycle_offset,
        facing: def.facing,
        direction: def.direction,
        position_x: def.position_x,
        position_y: def.position_y.unwrap_or(DEFAULT_STENCIL_HEIGHT),
    }))
}

fn striping_config(def: &StripingDef) -> PlacementConfig {
    PlacementConfig::Striping(StripingConfig {
        pattern: def.striping.clone(),
        side: def.side,
        facing: def.facing,
        position_y: def.position_y.unwrap_or(DEFAULT_STRIPING_HEIGHT),
    })
}

fn pedestrians_config(def: &PedestriansDef) -> PlacementConfig {
    PlacementConfig::Pedestrians(PedestriansConfig {
        density: def.density,
        content: def.models_array.clone(),
        position_y: def.position_y,
    })
}
