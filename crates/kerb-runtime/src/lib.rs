//! Kerb Runtime - Change propagation and the street world
//!
//! Ties the model crates together:
//! - `StreetWorld` owns corridors and intersections and runs the observation cycle
//! - `Mutation` / `MutationQueue` record edits and coalesce them per corridor
//! - `LoadBarrier` holds a corridor back until all its segments have arrived
//! - `LayoutEvent` / `EventBus` carry change notifications to `LayoutObserver`s
//! - `bake` turns generated content into standalone detached entities

mod barrier;
mod detach;
mod event;
mod event_bus;
mod labels;
mod mutation;
mod observer;
mod world;

pub use barrier::LoadBarrier;
pub use detach::{bake, DetachedBody, DetachedEntity};
pub use event::LayoutEvent;
pub use event_bus::EventBus;
pub use labels::{alignment_labels, width_labels, WidthLabel};
pub use mutation::{CorridorChanges, Mutation, MutationQueue};
pub use observer::LayoutObserver;
pub use world::StreetWorld;
