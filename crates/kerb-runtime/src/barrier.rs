//! Two-phase load barrier
//!
//! A corridor being deserialized declares its segment ids up front. Each
//! segment signals once it is in place; the corridor is aligned on the tick
//! after the last one arrives, never before.

use kerb_core::{CorridorId, KerbError, Result, SegmentId};
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::debug;

#[derive(Debug, Default)]
pub struct LoadBarrier {
    waiting: HashMap<CorridorId, HashSet<SegmentId>>,
    resolved: BTreeSet<CorridorId>,
}

impl LoadBarrier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the load phase for a corridor. An empty id set resolves at once.
    pub fn begin(&mut self, corridor: CorridorId, segments: impl IntoIterator<Item = SegmentId>) {
        let waiting: HashSet<_> = segments.into_iter().collect();
        debug!(%corridor, segments = waiting.len(), "load phase started");
        if waiting.is_empty() {
            self.resolved.insert(corridor);
        } else {
            self.waiting.insert(corridor, waiting);
        }
    }

    /// Signal one segment. Returns true when this resolved the barrier.
    pub fn mark_ready(&mut self, corridor: CorridorId, segment: &SegmentId) -> Result<bool> {
        let Some(waiting) = self.waiting.get_mut(&corridor) else {
            return Err(KerbError::ValidationError(format!(
                "corridor {} is not loading",
                corridor
            )));
        };
        if !waiting.remove(segment) {
            return Err(KerbError::SegmentNotFound(format!(
                "{} was not declared for corridor {} or already signalled",
                segment, corridor
            )));
        }
        if waiting.is_empty() {
            self.waiting.remove(&corridor);
            self.resolved.insert(corridor);
            debug!(%corridor, "load barrier resolved");
            return Ok(true);
        }
        Ok(false)
    }

    pub fn is_loading(&self, corridor: CorridorId) -> bool {
        self.waiting.contains_key(&corridor)
    }

    pub fn outstanding(&self, corridor: CorridorId) -> usize {
        self.waiting.get(&corridor).map_or(0, HashSet::len)
    }

    /// Corridors whose barrier resolved since the last call
    pub fn take_resolved(&mut self) -> BTreeSet<CorridorId> {
        std::mem::take(&mut self.resolved)
    }

    pub fn cancel(&mut self, corridor: CorridorId) {
        self.waiting.remove(&corridor);
        self.resolved.remove(&corridor);
    }
}
