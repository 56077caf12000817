//! Event bus for layout change events

use crate::event::LayoutEvent;
use std::collections::HashSet;

/// Queue the world pushes to and consumers drain.
///
/// Pushing an event already pending is a no-op, so each kind fires at most
/// once per corridor between drains.
pub struct EventBus {
    events: Vec<LayoutEvent>,
    pending: HashSet<LayoutEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            pending: HashSet::new(),
        }
    }

    /// Push an event; returns false when an identical one is pending
    pub fn push(&mut self, event: LayoutEvent) -> bool {
        if !self.pending.insert(event.clone()) {
            return false;
        }
        self.events.push(event);
        true
    }

    /// Drain all events in push order
    pub fn drain(&mut self) -> Vec<LayoutEvent> {
        self.pending.clear();
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kerb_core::CorridorId;

    fn aligned(raw: u64) -> LayoutEvent {
        LayoutEvent::AlignmentChanged {
            corridor: CorridorId::from_raw(raw),
        }
    }

    #[test]
    fn test_push_and_drain() {
        let mut bus = EventBus::new();
        assert!(bus.is_empty());

        assert!(bus.push(aligned(1)));
        assert!(bus.push(aligned(2)));
        assert!(!bus.push(aligned(1)));
        assert_eq!(bus.len(), 2);

        let events = bus.drain();
        assert_eq!(events, vec![aligned(1), aligned(2)]);
        assert!(bus.is_empty());
    }

    #[test]
    fn test_drain_resets_dedup() {
        let mut bus = EventBus::new();
        bus.push(aligned(1));
        let _ = bus.drain();
        assert!(bus.push(aligned(1)));
    }
}
