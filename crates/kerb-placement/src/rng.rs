//! Deterministic placement RNG.
//!
//! Wraps `ChaCha8Rng` so every random choice a strategy makes is a pure
//! function of (world seed, segment id, generator kind, occurrence of that
//! kind on the segment). Editing one segment never reshuffles another, and
//! adding or dropping generators of one kind leaves the other kinds alone.

use crate::placement::PlacementKind;
use kerb_core::ContentHash;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub struct PlacementRng(ChaCha8Rng);

impl PlacementRng {
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Stream for the `occurrence`-th generator of `kind` on one segment
    pub fn for_generator(
        world_seed: u64,
        segment_id: &str,
        kind: PlacementKind,
        occurrence: usize,
    ) -> Self {
        let seed = ContentHash::from_parts([
            world_seed.to_le_bytes().as_slice(),
            segment_id.as_bytes(),
            kind.as_str().as_bytes(),
            (occurrence as u64).to_le_bytes().as_slice(),
        ]);
        Self::from_seed_u64(seed.to_u64())
    }

    /// Uniform yaw in [0, 360)
    pub fn facing(&mut self) -> f32 {
        self.0.gen_range(0.0..360.0)
    }

    /// Uniform value in [min, max); returns `min` for an empty range
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        if max > min {
            self.0.gen_range(min..max)
        } else {
            min
        }
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.0)
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.0);
    }
}
