//! Striping strategy: one textured region along a segment edge

use crate::config::{Side, StripingConfig};
use crate::placement::StripingRegion;
use kerb_core::{Color, KerbError, Result, Vec3};

const WHITE: u32 = 0xffffff;
const YELLOW: u32 = 0xf7d117;

/// Material parameters for a named pattern
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripingStyle {
    pub texture_id: &'static str,
    pub width: f32,
    /// Meters of segment per texture repeat
    pub repeat_every: f32,
    pub color: u32,
}

/// Look up a pattern; `Ok(None)` for the explicit `none` pattern
pub fn style(pattern: &str) -> Result<Option<StripingStyle>> {
    let make = |texture_id: &'static str, width: f32, repeat_every: f32, color: u32| {
        Ok(Some(StripingStyle {
            texture_id,
            width,
            repeat_every,
            color,
        }))
    };
    match pattern {
        "none" => Ok(None),
        "solid-stripe" => make("striping-solid-stripe", 0.2, 6.0, WHITE),
        "dashed-stripe" => make("striping-dashed-stripe", 0.2, 6.0, WHITE),
        "short-dashed-stripe" => make("striping-dashed-stripe", 0.2, 3.0, WHITE),
        "short-dashed-stripe-yellow" => make("striping-dashed-stripe", 0.2, 3.0, YELLOW),
        "solid-doubleyellow" => make("striping-solid-double", 0.5, 6.0, YELLOW),
        "solid-dashed" => make("striping-solid-dashed", 0.4, 6.0, WHITE),
        "solid-dashed-yellow" => make("striping-solid-dashed", 0.4, 6.0, YELLOW),
        other => Err(KerbError::UnknownStripingPattern(other.to_string())),
    }
}

pub fn generate(
    length: f32,
    segment_width: f32,
    config: &StripingConfig,
) -> Result<Option<StripingRegion>> {
    let Some(style) = style(&config.pattern)? else {
        return Ok(None);
    };
    let x = match config.side {
        Side::Left => -segment_width / 2.0,
        Side::Right => segment_width / 2.0,
    };
    Ok(Some(StripingRegion {
        texture_id: style.texture_id.to_string(),
        width: style.width,
        length,
        repeat_y: length / style.repeat_every,
        color: Color::from_hex(style.color),
        position: Vec3::new(x, config.position_y, 0.0),
        rotation: Vec3::new(-90.0, config.facing, 0.0),
    }))
}
