//! Per-approach dimensions read off a corridor's cross-section

use crate::cardinal::Edge;
use kerb_street::{Corridor, Segment};
use serde::{Deserialize, Serialize};

/// What an intersection needs to know about one approach
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorridorDimensions {
    pub left_sidewalk_width: f32,
    pub right_sidewalk_width: f32,
    pub total_width: f32,
    /// 0 when the corridor has no length yet
    pub length: f32,
}

impl CorridorDimensions {
    pub fn of(corridor: &Corridor) -> Self {
        let segments = corridor.segments();
        Self {
            left_sidewalk_width: run_width(segments.iter()),
            right_sidewalk_width: run_width(segments.iter().rev()),
            total_width: corridor.effective_width(),
            length: corridor.length().unwrap_or(0.0),
        }
    }

    pub fn sidewalk(&self, edge: Edge) -> f32 {
        match edge {
            Edge::Left => self.left_sidewalk_width,
            Edge::Right => self.right_sidewalk_width,
        }
    }
}

/// Width of the sidewalk-like run at the start of `segments`
fn run_width<'a>(segments: impl Iterator<Item = &'a Segment>) -> f32 {
    segments
        .take_while(|s| s.is_sidewalk())
        .map(Segment::width)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kerb_street::SegmentType;

    fn seg(id: &str, kind: &str, width: f32) -> Segment {
        Segment::new(id, SegmentType::parse(kind), width).unwrap()
    }

    fn corridor(parts: &[(&str, f32)]) -> Corridor {
        let mut c = Corridor::new("c").with_length(40.0).unwrap();
        for (i, (kind, w)) in parts.iter().enumerate() {
            c.push_segment(seg(&format!("s{}", i), kind, *w)).unwrap();
        }
        c
    }

    #[test]
    fn test_leading_and_trailing_runs() {
        let c = corridor(&[
            ("sidewalk", 3.0),
            ("sidewalk-tree", 1.0),
            ("drive-lane", 3.0),
            ("drive-lane", 3.0),
            ("sidewalk", 2.5),
        ]);
        let d = CorridorDimensions::of(&c);
        assert_eq!(d.left_sidewalk_width, 4.0);
        assert_eq!(d.right_sidewalk_width, 2.5);
        assert_eq!(d.total_width, 12.5);
        assert_eq!(d.length, 40.0);
    }

    #[test]
    fn test_interior_sidewalk_is_not_a_run() {
        let c = corridor(&[("drive-lane", 3.0), ("sidewalk", 2.0), ("drive-lane", 3.0)]);
        let d = CorridorDimensions::of(&c);
        assert_eq!(d.left_sidewalk_width, 0.0);
        assert_eq!(d.right_sidewalk_width, 0.0);
    }

    #[test]
    fn test_all_sidewalk() {
        let c = corridor(&[("sidewalk", 2.0), ("sidewalk", 1.0)]);
        let d = CorridorDimensions::of(&c);
        assert_eq!(d.left_sidewalk_width, 3.0);
        assert_eq!(d.right_sidewalk_width, 3.0);
    }

    #[test]
    fn test_missing_length_reads_as_zero() {
        let d = CorridorDimensions::of(&Corridor::new("loading"));
        assert_eq!(d, CorridorDimensions::default());
    }
}
