//! Kerb Street - Segments, corridors and alignment
//!
//! A corridor is an ordered left-to-right sequence of segments. The aligner
//! turns that sequence plus an alignment policy into concrete offsets: each
//! segment's place on the width axis and the corridor's shift on the length
//! axis. Alignment is always recomputed from scratch.

mod align;
mod corridor;
mod segment;

pub use align::{align, align_segments, Alignment, SegmentSlot};
pub use corridor::{Corridor, LengthAlign, WidthAlign};
pub use segment::{Segment, SegmentType, Surface, TypeDefaults};
