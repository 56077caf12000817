//! Layout change events for downstream collaborators

use kerb_core::CorridorId;
use serde::{Deserialize, Serialize};

/// Something derived from the layout changed.
///
/// Events carry no deltas: consumers re-read current state from the world.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum LayoutEvent {
    SegmentWidthChanged { corridor: CorridorId },
    SegmentLengthChanged { corridor: CorridorId },
    SegmentsChanged { corridor: CorridorId },
    AlignmentChanged { corridor: CorridorId },
    IntersectionChanged { intersection: String },
}

impl LayoutEvent {
    /// Wire name of the event
    pub fn name(&self) -> &'static str {
        match self {
            LayoutEvent::SegmentWidthChanged { .. } => "segment-width-changed",
            LayoutEvent::SegmentLengthChanged { .. } => "segment-length-changed",
            LayoutEvent::SegmentsChanged { .. } => "segments-changed",
            LayoutEvent::AlignmentChanged { .. } => "alignment-changed",
            LayoutEvent::IntersectionChanged { .. } => "intersection-changed",
        }
    }

    pub fn corridor(&self) -> Option<CorridorId> {
        match self {
            LayoutEvent::SegmentWidthChanged { corridor }
            | LayoutEvent::SegmentLengthChanged { corridor }
            | LayoutEvent::SegmentsChanged { corridor }
            | LayoutEvent::AlignmentChanged { corridor } => Some(*corridor),
            LayoutEvent::IntersectionChanged { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_match_serde_tags() {
        let events = [
            LayoutEvent::SegmentWidthChanged { corridor: CorridorId::from_raw(1) },
            LayoutEvent::SegmentLengthChanged { corridor: CorridorId::from_raw(1) },
            LayoutEvent::SegmentsChanged { corridor: CorridorId::from_raw(1) },
            LayoutEvent::AlignmentChanged { corridor: CorridorId::from_raw(1) },
            LayoutEvent::IntersectionChanged { intersection: "x".into() },
        ];
        for event in events {
            let json = serde_json::to_value(&event).unwrap();
            assert_eq!(json["event"], event.name());
        }
    }

    #[test]
    fn test_corridor_accessor() {
        let e = LayoutEvent::AlignmentChanged { corridor: CorridorId::from_raw(7) };
        assert_eq!(e.corridor(), Some(CorridorId::from_raw(7)));
        let i = LayoutEvent::IntersectionChanged { intersection: "x".into() };
        assert_eq!(i.corridor(), None);
    }
}
