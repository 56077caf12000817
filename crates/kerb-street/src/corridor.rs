//! Corridor: an ordered cross-section of segments

use crate::segment::Segment;
use kerb_core::{approx_eq, KerbError, Result, SegmentId};
use kerb_placement::PlacementConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Justification of the cross-section on the width axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidthAlign {
    #[default]
    Center,
    Left,
    Right,
}

/// Justification of the corridor on the length axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthAlign {
    Start,
    #[default]
    Middle,
    End,
}

/// One street: segments ordered left to right plus an alignment policy.
///
/// Segment ids are unique within a corridor. The effective width is always
/// the sum of segment widths; a declared width is only a hint.
#[derive(Debug, Clone, PartialEq)]
pub struct Corridor {
    /// Unique handle within a world
    pub name: String,
    /// Display name
    pub label: Option<String>,
    declared_width: Option<f32>,
    length: Option<f32>,
    pub width_align: WidthAlign,
    pub length_align: LengthAlign,
    segments: Vec<Segment>,
}

impl Corridor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            declared_width: None,
            length: None,
            width_align: WidthAlign::default(),
            length_align: LengthAlign::default(),
            segments: Vec::new(),
        }
    }

    pub fn with_length(mut self, length: f32) -> Result<Self> {
        self.set_length(length)?;
        Ok(self)
    }

    pub fn with_declared_width(mut self, width: f32) -> Self {
        self.declared_width = Some(width);
        self
    }

    pub fn with_alignment(mut self, width_align: WidthAlign, length_align: LengthAlign) -> Self {
        self.set_alignment(width_align, length_align);
        self
    }

    pub fn with_segment(mut self, segment: Segment) -> Result<Self> {
        self.push_segment(segment)?;
        Ok(self)
    }

    pub fn length(&self) -> Option<f32> {
        self.length
    }

    pub fn declared_width(&self) -> Option<f32> {
        self.declared_width
    }

    /// Sum of segment widths; authoritative over any declared width
    pub fn effective_width(&self) -> f32 {
        self.segments.iter().map(Segment::width).sum()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment(&self, id: &str) -> Option<&Segment> {
        self.segments.iter().find(|s| s.id.as_str() == id)
    }

    /// Mutable access for attribute edits. Width stays guarded by
    /// [`Segment::set_width`].
    pub fn segment_mut(&mut self, id: &str) -> Option<&mut Segment> {
        self.segments.iter_mut().find(|s| s.id.as_str() == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.segments.iter().position(|s| s.id.as_str() == id)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn push_segment(&mut self, segment: Segment) -> Result<()> {
        let index = self.segments.len();
        self.insert_segment(index, segment)
    }

    pub fn insert_segment(&mut self, index: usize, segment: Segment) -> Result<()> {
        if index > self.segments.len() {
            return Err(KerbError::IndexOutOfBounds {
                index,
                len: self.segments.len(),
            });
        }
        if self.index_of(segment.id.as_str()).is_some() {
            return Err(KerbError::DuplicateSegmentId(segment.id.to_string()));
        }
        debug!(corridor = %self.name, segment = %segment.id, index, "insert segment");
        self.segments.insert(index, segment);
        Ok(())
    }

    pub fn remove_segment(&mut self, id: &str) -> Result<Segment> {
        let index = self.require(id)?;
        debug!(corridor = %self.name, segment = id, "remove segment");
        Ok(self.segments.remove(index))
    }

    /// Move a segment so it ends up at `new_index` in the resulting order
    pub fn move_segment(&mut self, id: &str, new_index: usize) -> Result<()> {
        let from = self.require(id)?;
        if new_index >= self.segments.len() {
            return Err(KerbError::IndexOutOfBounds {
                index: new_index,
                len: self.segments.len(),
            });
        }
        let segment = self.segments.remove(from);
        self.segments.insert(new_index, segment);
        Ok(())
    }

    pub fn set_segment_width(&mut self, id: &str, width: f32) -> Result<()> {
        self.require_mut(id)?.set_width(width)
    }

    pub fn set_segment_length(&mut self, id: &str, length: Option<f32>) -> Result<()> {
        if let Some(value) = length {
            check_length(id, value)?;
        }
        self.require_mut(id)?.length = length;
        Ok(())
    }

    pub fn set_generation(&mut self, id: &str, generation: Vec<PlacementConfig>) -> Result<()> {
        self.require_mut(id)?.generation = generation;
        Ok(())
    }

    /// Remove one generator config from a segment and hand it back
    pub fn take_generator(&mut self, id: &str, index: usize) -> Result<PlacementConfig> {
        let segment = self.require_mut(id)?;
        let len = segment.generation.len();
        if index >= len {
            return Err(KerbError::NothingToDetach(format!(
                "segment '{}' has {} generators, asked for #{}",
                id, len, index
            )));
        }
        Ok(segment.generation.remove(index))
    }

    pub fn set_length(&mut self, length: f32) -> Result<()> {
        check_length(&self.name, length)?;
        self.length = Some(length);
        Ok(())
    }

    pub fn set_alignment(&mut self, width_align: WidthAlign, length_align: LengthAlign) {
        self.width_align = width_align;
        self.length_align = length_align;
    }

    /// Replace the declared width with the segment sum.
    ///
    /// Returns the previous declared width when it disagreed.
    pub fn reconcile_width(&mut self) -> Option<f32> {
        let actual = self.effective_width();
        let declared = self.declared_width.replace(actual)?;
        if !approx_eq(declared, actual) {
            warn!(
                corridor = %self.name,
                declared,
                actual,
                "declared width disagrees with segment sum; using segment sum"
            );
            Some(declared)
        } else {
            None
        }
    }

    pub fn segment_ids(&self) -> impl Iterator<Item = &SegmentId> {
        self.segments.iter().map(|s| &s.id)
    }

    fn require(&self, id: &str) -> Result<usize> {
        self.index_of(id)
            .ok_or_else(|| KerbError::SegmentNotFound(format!("{}/{}", self.name, id)))
    }

    fn require_mut(&mut self, id: &str) -> Result<&mut Segment> {
        let index = self.require(id)?;
        Ok(&mut self.segments[index])
    }
}

fn check_length(id: &str, length: f32) -> Result<()> {
    if length.is_finite() && length > 0.0 {
        Ok(())
    } else {
        Err(KerbError::InvalidLength {
            id: id.to_string(),
            value: length,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::SegmentType;

    fn lane(id: &str, width: f32) -> Segment {
        Segment::new(id, SegmentType::DriveLane, width).unwrap()
    }

    fn street() -> Corridor {
        Corridor::new("main")
            .with_length(60.0)
            .unwrap()
            .with_segment(lane("a", 2.0))
            .unwrap()
            .with_segment(lane("b", 3.0))
            .unwrap()
            .with_segment(lane("c", 2.0))
            .unwrap()
    }

    fn order(c: &Corridor) -> Vec<&str> {
        c.segment_ids().map(SegmentId::as_str).collect()
    }

    #[test]
    fn test_effective_width_tracks_edits() {
        let mut c = street();
        assert_eq!(c.effective_width(), 7.0);
        c.remove_segment("b").unwrap();
        assert_eq!(c.effective_width(), 4.0);
        c.insert_segment(1, lane("d", 1.5)).unwrap();
        assert_eq!(c.effective_width(), 5.5);
        c.set_segment_width("d", 2.5).unwrap();
        assert_eq!(c.effective_width(), 6.5);
    }

    #[test]
    fn test_duplicate_and_missing_ids() {
        let mut c = street();
        assert!(matches!(
            c.push_segment(lane("a", 1.0)),
            Err(KerbError::DuplicateSegmentId(_))
        ));
        assert!(matches!(
            c.remove_segment("zzz"),
            Err(KerbError::SegmentNotFound(_))
        ));
        assert!(matches!(
            c.insert_segment(9, lane("x", 1.0)),
            Err(KerbError::IndexOutOfBounds { index: 9, len: 3 })
        ));
    }

    #[test]
    fn test_move_segment() {
        let mut c = street();
        c.move_segment("a", 2).unwrap();
        assert_eq!(order(&c), ["b", "c", "a"]);
        c.move_segment("a", 0).unwrap();
        assert_eq!(order(&c), ["a", "b", "c"]);
        assert!(c.move_segment("a", 3).is_err());
    }

    #[test]
    fn test_invalid_width_leaves_corridor_untouched() {
        let mut c = street();
        assert!(c.set_segment_width("b", -2.0).is_err());
        assert_eq!(c.effective_width(), 7.0);
    }

    #[test]
    fn test_lengths() {
        let mut c = street();
        assert!(c.set_length(0.0).is_err());
        assert_eq!(c.length(), Some(60.0));
        c.set_segment_length("a", Some(20.0)).unwrap();
        assert!(c.set_segment_length("a", Some(-1.0)).is_err());
        assert_eq!(c.segment("a").unwrap().length, Some(20.0));
        c.set_segment_length("a", None).unwrap();
        assert_eq!(c.segment("a").unwrap().length, None);
    }

    #[test]
    fn test_reconcile_width() {
        let mut c = street().with_declared_width(10.0);
        assert_eq!(c.reconcile_width(), Some(10.0));
        assert_eq!(c.declared_width(), Some(7.0));
        assert_eq!(c.reconcile_width(), None);

        let mut undeclared = street();
        assert_eq!(undeclared.reconcile_width(), None);
        assert_eq!(undeclared.declared_width(), Some(7.0));
    }

    #[test]
    fn test_alignment_serde() {
        let w: WidthAlign = serde_json::from_str("\"right\"").unwrap();
        let l: LengthAlign = serde_json::from_str("\"start\"").unwrap();
        assert_eq!(w, WidthAlign::Right);
        assert_eq!(l, LengthAlign::Start);
        assert_eq!(LengthAlign::default(), LengthAlign::Middle);
    }
}
