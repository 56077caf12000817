//! Kerb Core - Foundational types for the kerb street layout engine
//!
//! This crate provides the core types that all other kerb crates depend on:
//! - `SegmentId`, `CorridorId`, `EntityId` - Stable identifiers
//! - `ContentHash` - SHA-256 based hashing (seed derivation, fingerprints)
//! - `Transform`, `Vec3`, `Color` - Spatial types
//! - `Direction` - Travel direction shared by segments and placements
//! - `LayoutConfig` - Engine constants and tunables
//! - Error types and Result alias

mod config;
mod error;
mod hash;
mod id;
mod types;

pub use config::LayoutConfig;
pub use error::{KerbError, Result};
pub use hash::ContentHash;
pub use id::{CorridorId, EntityId, IdAllocator, SegmentId};
pub use types::{approx_eq, mat4_mul, Color, Direction, Transform, Vec3};
