//! Observer trait for downstream collaborators

use crate::event::LayoutEvent;
use crate::world::StreetWorld;
use kerb_core::Result;

/// A collaborator notified after each observation cycle that changed
/// something (ground plane, dimension labels, inspector panels).
///
/// Observers run in registration order and see the world read-only. An
/// observer error is logged and does not stop the others.
pub trait LayoutObserver {
    /// Called with the events of one tick, never with an empty slice
    fn on_layout_changed(&mut self, world: &StreetWorld, events: &[LayoutEvent]) -> Result<()>;

    /// Human-readable name for this observer
    fn name(&self) -> &str;
}
