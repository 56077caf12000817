//! Placement strategies.
//!
//! Every strategy works in segment-local space: `z = +length/2` is the start
//! of the segment, `z = -length/2` its end, `x = 0` its centerline.

pub mod fixed;
pub mod pedestrians;
pub mod random;
pub mod single;
pub mod stencil;
pub mod striping;

use crate::config::ContentList;
use crate::placement::ContentRef;
use crate::rng::PlacementRng;
use kerb_core::LayoutConfig;

/// What a strategy may draw on besides its own config
pub struct StrategyEnv<'a> {
    pub rng: &'a mut PlacementRng,
    pub config: &'a LayoutConfig,
}

impl StrategyEnv<'_> {
    /// Clamp spacing to the configured minimum (NaN counts as too small)
    pub fn clamp_spacing(&self, spacing: f32) -> f32 {
        if spacing >= self.config.min_spacing {
            spacing
        } else {
            self.config.min_spacing
        }
    }

    pub fn cycle_offset(&self, cycle_offset: Option<f32>) -> f32 {
        cycle_offset.unwrap_or(self.config.default_cycle_offset)
    }

    /// Fixed facing, or a fresh uniform draw when `random` is set
    pub fn yaw(&mut self, facing: f32, random: bool) -> f32 {
        if random {
            self.rng.facing()
        } else {
            facing
        }
    }

    /// Uniform choice from the list; no draw for a single entry
    pub fn pick_content(&mut self, list: &ContentList) -> Option<ContentRef> {
        match list.as_slice() {
            [] => None,
            [only] => Some(only.clone()),
            items => self.rng.pick(items).cloned(),
        }
    }
}
