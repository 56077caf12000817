//! Corridor aligner
//!
//! Pure function of (segments, policy, length). Every call walks the whole
//! cross-section from the start offset, so positions never accumulate drift
//! from earlier edits.

use crate::corridor::{Corridor, LengthAlign, WidthAlign};
use crate::segment::Segment;
use kerb_core::{SegmentId, Transform, Vec3};
use tracing::debug;

/// Where one segment landed on the width axis
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentSlot {
    pub id: SegmentId,
    /// Left edge
    pub offset: f32,
    pub width: f32,
    pub center: f32,
}

/// Aligner output for one corridor
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    pub total_width: f32,
    /// Left edge of the first segment
    pub start: f32,
    /// Length-axis shift applied uniformly to every segment
    pub z_offset: f32,
    pub slots: Vec<SegmentSlot>,
}

impl Alignment {
    pub fn slot(&self, id: &str) -> Option<&SegmentSlot> {
        self.slots.iter().find(|s| s.id.as_str() == id)
    }

    /// Corridor-local transform of a segment's origin
    pub fn segment_transform(&self, id: &str) -> Option<Transform> {
        self.slot(id)
            .map(|slot| Transform::from_position(Vec3::new(slot.center, 0.0, self.z_offset)))
    }
}

/// Align a corridor.
///
/// `None` while the corridor has no length yet (still loading); the caller
/// retries once the length arrives.
pub fn align(corridor: &Corridor) -> Option<Alignment> {
    let Some(length) = corridor.length() else {
        debug!(corridor = %corridor.name, "no length yet; alignment deferred");
        return None;
    };
    Some(align_segments(
        corridor.segments(),
        corridor.width_align,
        corridor.length_align,
        length,
    ))
}

pub fn align_segments(
    segments: &[Segment],
    width_align: WidthAlign,
    length_align: LengthAlign,
    length: f32,
) -> Alignment {
    let total_width: f32 = segments.iter().map(Segment::width).sum();
    let start = match width_align {
        WidthAlign::Center => -total_width / 2.0,
        WidthAlign::Left => 0.0,
        WidthAlign::Right => -total_width,
    };
    let z_offset = match length_align {
        LengthAlign::Start => -length / 2.0,
        LengthAlign::Middle => 0.0,
        LengthAlign::End => length / 2.0,
    };

    let mut running = start;
    let slots = segments
        .iter()
        .map(|segment| {
            let width = segment.width();
            let slot = SegmentSlot {
                id: segment.id.clone(),
                offset: running,
                width,
                center: running + width / 2.0,
            };
            running += width;
            slot
        })
        .collect();

    Alignment {
        total_width,
        start,
        z_offset,
        slots,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::SegmentType;

    fn corridor(widths: &[f32], width_align: WidthAlign) -> Corridor {
        let mut c = Corridor::new("test")
            .with_length(60.0)
            .unwrap()
            .with_alignment(width_align, LengthAlign::Middle);
        for (i, w) in widths.iter().enumerate() {
            c.push_segment(Segment::new(format!("s{}", i), SegmentType::DriveLane, *w).unwrap())
                .unwrap();
        }
        c
    }

    fn centers(a: &Alignment) -> Vec<f32> {
        a.slots.iter().map(|s| s.center).collect()
    }

    #[test]
    fn test_centered_two_three_two() {
        let a = align(&corridor(&[2.0, 3.0, 2.0], WidthAlign::Center)).unwrap();
        assert_eq!(a.total_width, 7.0);
        assert_eq!(a.start, -3.5);
        assert_eq!(centers(&a), vec![-2.5, 0.0, 2.5]);
        assert_eq!(a.slots[2].offset, 1.5);
    }

    #[test]
    fn test_left_and_right() {
        let a = align(&corridor(&[2.0, 3.0], WidthAlign::Left)).unwrap();
        assert_eq!(centers(&a), vec![1.0, 3.5]);
        let a = align(&corridor(&[2.0, 3.0], WidthAlign::Right)).unwrap();
        assert_eq!(centers(&a), vec![-4.0, -1.5]);
        assert_eq!(a.slots[1].offset + a.slots[1].width, 0.0);
    }

    #[test]
    fn test_length_alignment() {
        let mut c = corridor(&[3.0], WidthAlign::Center);
        c.set_alignment(WidthAlign::Center, LengthAlign::Start);
        assert_eq!(align(&c).unwrap().z_offset, -30.0);
        c.set_alignment(WidthAlign::Center, LengthAlign::End);
        assert_eq!(align(&c).unwrap().z_offset, 30.0);
        let t = align(&c).unwrap().segment_transform("s0").unwrap();
        assert_eq!(t.position, Vec3::new(0.0, 0.0, 30.0));
    }

    #[test]
    fn test_missing_length_defers() {
        let c = Corridor::new("loading");
        assert!(align(&c).is_none());
    }

    #[test]
    fn test_empty_corridor() {
        let a = align(&corridor(&[], WidthAlign::Center)).unwrap();
        assert_eq!(a.total_width, 0.0);
        assert!(a.slots.is_empty());
    }

    #[test]
    fn test_realigns_after_removal() {
        let mut c = corridor(&[2.0, 3.0, 2.0], WidthAlign::Center);
        c.remove_segment("s1").unwrap();
        let a = align(&c).unwrap();
        assert_eq!(centers(&a), vec![-1.0, 1.0]);
    }
}
