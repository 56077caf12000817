//! Recorded model mutations and their per-cycle coalescing

use kerb_core::{CorridorId, SegmentId};
use std::collections::{BTreeMap, BTreeSet};

/// One structural or attribute edit, recorded when it is applied
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    SegmentAdded { corridor: CorridorId, segment: SegmentId },
    SegmentRemoved { corridor: CorridorId, segment: SegmentId },
    SegmentMoved { corridor: CorridorId, segment: SegmentId },
    SegmentWidthChanged { corridor: CorridorId, segment: SegmentId },
    SegmentLengthChanged { corridor: CorridorId, segment: SegmentId },
    GenerationChanged { corridor: CorridorId, segment: SegmentId },
    CorridorLengthChanged { corridor: CorridorId },
    AlignmentChanged { corridor: CorridorId },
    CorridorAttachedToIntersection { corridor: CorridorId, intersection: String },
}

impl Mutation {
    pub fn corridor(&self) -> CorridorId {
        match self {
            Mutation::SegmentAdded { corridor, .. }
            | Mutation::SegmentRemoved { corridor, .. }
            | Mutation::SegmentMoved { corridor, .. }
            | Mutation::SegmentWidthChanged { corridor, .. }
            | Mutation::SegmentLengthChanged { corridor, .. }
            | Mutation::GenerationChanged { corridor, .. }
            | Mutation::CorridorLengthChanged { corridor }
            | Mutation::AlignmentChanged { corridor }
            | Mutation::CorridorAttachedToIntersection { corridor, .. } => *corridor,
        }
    }
}

/// Everything one corridor needs redone this cycle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorridorChanges {
    /// Segments whose generated content is rebuilt
    pub regenerate: BTreeSet<SegmentId>,
    /// Rebuild every segment (corridor length changed, load finished)
    pub regenerate_all: bool,
    /// Segments whose generated content is dropped
    pub removed: BTreeSet<SegmentId>,
    pub realign: bool,
    pub width_changed: bool,
    pub length_changed: bool,
    pub segments_changed: bool,
    pub alignment_changed: bool,
    pub attached: BTreeSet<String>,
}

impl CorridorChanges {
    /// Changes for a corridor whose structure arrived all at once
    pub fn full_rebuild() -> Self {
        Self {
            regenerate_all: true,
            realign: true,
            segments_changed: true,
            ..Self::default()
        }
    }

    /// Fold a full rebuild into whatever was already recorded
    pub fn merge_full_rebuild(&mut self) {
        self.regenerate_all = true;
        self.realign = true;
        self.segments_changed = true;
    }

    fn apply(&mut self, mutation: Mutation) {
        match mutation {
            Mutation::SegmentAdded { segment, .. } => {
                self.removed.remove(&segment);
                self.regenerate.insert(segment);
                self.realign = true;
                self.segments_changed = true;
            }
            Mutation::SegmentRemoved { segment, .. } => {
                self.regenerate.remove(&segment);
                self.removed.insert(segment);
                self.realign = true;
                self.segments_changed = true;
            }
            Mutation::SegmentMoved { .. } => {
                self.realign = true;
                self.segments_changed = true;
            }
            Mutation::SegmentWidthChanged { segment, .. } => {
                // striping and pedestrians depend on width
                self.regenerate.insert(segment);
                self.realign = true;
                self.width_changed = true;
            }
            Mutation::SegmentLengthChanged { segment, .. } => {
                self.regenerate.insert(segment);
                self.length_changed = true;
            }
            Mutation::GenerationChanged { segment, .. } => {
                self.regenerate.insert(segment);
                self.segments_changed = true;
            }
            Mutation::CorridorLengthChanged { .. } => {
                self.regenerate_all = true;
                self.realign = true;
                self.length_changed = true;
            }
            Mutation::AlignmentChanged { .. } => {
                self.realign = true;
                self.alignment_changed = true;
            }
            Mutation::CorridorAttachedToIntersection { intersection, .. } => {
                self.attached.insert(intersection);
            }
        }
    }

    /// Whether intersections this corridor approaches need recomposing
    pub fn affects_intersections(&self) -> bool {
        self.realign || self.regenerate_all || !self.attached.is_empty()
    }
}

/// Mutations recorded since the last observation cycle
#[derive(Debug, Default)]
pub struct MutationQueue {
    pending: Vec<Mutation>,
}

impl MutationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, mutation: Mutation) {
        self.pending.push(mutation);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop everything recorded for a corridor
    pub fn forget(&mut self, corridor: CorridorId) {
        self.pending.retain(|m| m.corridor() != corridor);
    }

    /// Coalesce pending mutations per corridor, leaving behind those for
    /// corridors `hold` says are not ready yet
    pub fn drain_coalesced(
        &mut self,
        hold: impl Fn(CorridorId) -> bool,
    ) -> BTreeMap<CorridorId, CorridorChanges> {
        let (held, ready): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|m| hold(m.corridor()));
        self.pending = held;

        let mut changes: BTreeMap<CorridorId, CorridorChanges> = BTreeMap::new();
        for mutation in ready {
            changes
                .entry(mutation.corridor())
                .or_default()
                .apply(mutation);
        }
        changes
    }
}
