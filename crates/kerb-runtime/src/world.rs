//! StreetWorld - the owner of every corridor, intersection and derived
//! layout state

use crate::barrier::LoadBarrier;
use crate::detach::{bake, DetachedEntity};
use crate::event::LayoutEvent;
use crate::event_bus::EventBus;
use crate::mutation::{CorridorChanges, Mutation, MutationQueue};
use crate::observer::LayoutObserver;
use bimap::BiMap;
use kerb_core::{
    CorridorId, EntityId, IdAllocator, KerbError, LayoutConfig, Result, SegmentId, Transform,
};
use kerb_intersection::{compose, Cardinal, CardinalMap, Intersection, IntersectionLayout};
use kerb_placement::{generate_all, ContentCache, GeneratedContent, PlacementConfig, PlacementKind};
use kerb_scene::LoadedLayout;
use kerb_street::{align, Alignment, Corridor, LengthAlign, Segment, WidthAlign};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

struct CorridorState {
    corridor: Corridor,
    /// World placement when not attached to an intersection
    origin: Transform,
    alignment: Option<Alignment>,
    content: HashMap<SegmentId, Vec<GeneratedContent>>,
    intersection: Option<String>,
}

struct IntersectionState {
    intersection: Intersection,
    layout: Option<IntersectionLayout>,
}

/// The street world.
///
/// Editor operations apply to the model immediately and are recorded as
/// mutations. Derived state (generated content, alignment, intersection
/// geometry) only moves on [`StreetWorld::tick`], which coalesces everything
/// recorded since the previous tick into one rebuild per corridor.
pub struct StreetWorld {
    config: LayoutConfig,
    ids: IdAllocator,
    names: BiMap<String, CorridorId>,
    corridors: BTreeMap<CorridorId, CorridorState>,
    intersections: BTreeMap<String, IntersectionState>,
    content_cache: Option<Arc<ContentCache>>,
    mutations: MutationQueue,
    barrier: LoadBarrier,
    dirty_intersections: BTreeSet<String>,
    events: EventBus,
    observers: Vec<Box<dyn LayoutObserver>>,
    detached: BTreeMap<EntityId, DetachedEntity>,
}

impl Default for StreetWorld {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl StreetWorld {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            ids: IdAllocator::new(),
            names: BiMap::new(),
            corridors: BTreeMap::new(),
            intersections: BTreeMap::new(),
            content_cache: None,
            mutations: MutationQueue::new(),
            barrier: LoadBarrier::new(),
            dirty_intersections: BTreeSet::new(),
            events: EventBus::new(),
            observers: Vec::new(),
            detached: BTreeMap::new(),
        }
    }

    /// Restrict generated content to what the cache knows
    pub fn with_content_cache(mut self, cache: Arc<ContentCache>) -> Self {
        self.content_cache = Some(cache);
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn add_observer(&mut self, observer: Box<dyn LayoutObserver>) {
        debug!(observer = observer.name(), "observer registered");
        self.observers.push(observer);
    }

    // ------------------------------------------------------------------
    // Corridors
    // ------------------------------------------------------------------

    /// Add a fully built corridor; it is laid out on the next tick
    pub fn add_corridor(&mut self, corridor: Corridor) -> Result<CorridorId> {
        let id = self.insert_corridor(corridor)?;
        self.barrier.begin(id, std::iter::empty());
        Ok(id)
    }

    /// Add a corridor whose segments are still arriving. Nothing is aligned
    /// until every declared segment has been signalled with
    /// [`StreetWorld::mark_segment_ready`].
    pub fn load_corridor(&mut self, corridor: Corridor) -> Result<CorridorId> {
        let segments: Vec<SegmentId> = corridor.segment_ids().cloned().collect();
        let id = self.insert_corridor(corridor)?;
        self.barrier.begin(id, segments);
        Ok(id)
    }

    /// Signal that one declared segment is in place. Returns true when it
    /// was the last one.
    pub fn mark_segment_ready(&mut self, corridor: CorridorId, segment: &str) -> Result<bool> {
        self.state(corridor)?;
        self.barrier.mark_ready(corridor, &SegmentId::new(segment))
    }

    pub fn is_loading(&self, corridor: CorridorId) -> bool {
        self.barrier.is_loading(corridor)
    }

    /// Add every corridor and intersection of a validated layout
    pub fn load_layout(&mut self, layout: LoadedLayout) -> Result<Vec<CorridorId>> {
        let mut ids = Vec::with_capacity(layout.corridors.len());
        for corridor in layout.corridors {
            ids.push(self.add_corridor(corridor)?);
        }
        for intersection in layout.intersections {
            self.add_intersection(intersection)?;
        }
        Ok(ids)
    }

    pub fn remove_corridor(&mut self, id: CorridorId) -> Result<Corridor> {
        let state = self
            .corridors
            .remove(&id)
            .ok_or_else(|| KerbError::CorridorNotFound(id.to_string()))?;
        self.names.remove_by_right(&id);
        self.barrier.cancel(id);
        self.mutations.forget(id);

        if let Some(name) = &state.intersection {
            if let Some(ist) = self.intersections.get_mut(name) {
                let dirs: Vec<Cardinal> = ist
                    .intersection
                    .approaches
                    .iter()
                    .filter(|(_, c)| **c == state.corridor.name)
                    .map(|(dir, _)| dir)
                    .collect();
                for dir in dirs {
                    ist.intersection.detach(dir);
                }
                self.dirty_intersections.insert(name.clone());
            }
        }
        info!(corridor = %state.corridor.name, "corridor removed");
        Ok(state.corridor)
    }

    pub fn corridor_id(&self, name: &str) -> Option<CorridorId> {
        self.names.get_by_left(name).copied()
    }

    pub fn corridor_name(&self, id: CorridorId) -> Option<&str> {
        self.names.get_by_right(&id).map(String::as_str)
    }

    pub fn corridor(&self, id: CorridorId) -> Option<&Corridor> {
        self.corridors.get(&id).map(|s| &s.corridor)
    }

    pub fn corridor_ids(&self) -> impl Iterator<Item = CorridorId> + '_ {
        self.corridors.keys().copied()
    }

    /// Latest alignment; stale while mutations are pending
    pub fn alignment(&self, id: CorridorId) -> Option<&Alignment> {
        self.corridors.get(&id)?.alignment.as_ref()
    }

    /// Generated content of one segment, one batch per generator config
    pub fn generated(&self, id: CorridorId, segment: &str) -> &[GeneratedContent] {
        self.corridors
            .get(&id)
            .and_then(|s| s.content.get(segment))
            .map_or(&[], Vec::as_slice)
    }

    pub fn set_corridor_origin(&mut self, id: CorridorId, origin: Transform) -> Result<()> {
        self.state_mut(id)?.origin = origin;
        Ok(())
    }

    /// World transform of a corridor's origin
    pub fn corridor_transform(&self, id: CorridorId) -> Option<Transform> {
        let state = self.corridors.get(&id)?;
        let placed = state.intersection.as_ref().and_then(|name| {
            let ist = self.intersections.get(name)?;
            let dir = ist
                .intersection
                .approaches
                .iter()
                .find(|(_, c)| **c == state.corridor.name)
                .map(|(dir, _)| dir)?;
            let local = ist.layout.as_ref()?.placements.get(dir)?;
            Some(Transform::from_position(ist.intersection.position).compose(local))
        });
        Some(placed.unwrap_or(state.origin))
    }

    /// World transform of a segment's origin, once the corridor is aligned
    pub fn segment_transform(&self, id: CorridorId, segment: &str) -> Option<Transform> {
        let local = self.alignment(id)?.segment_transform(segment)?;
        Some(self.corridor_transform(id)?.compose(&local))
    }

    // ------------------------------------------------------------------
    // Editor operations
    // ------------------------------------------------------------------

    pub fn push_segment(&mut self, id: CorridorId, segment: Segment) -> Result<()> {
        let index = self.state(id)?.corridor.len();
        self.insert_segment(id, index, segment)
    }

    pub fn insert_segment(&mut self, id: CorridorId, index: usize, segment: Segment) -> Result<()> {
        let segment_id = segment.id.clone();
        self.state_mut(id)?.corridor.insert_segment(index, segment)?;
        self.record_segment_added(id, segment_id);
        Ok(())
    }

    pub fn remove_segment(&mut self, id: CorridorId, segment: &str) -> Result<Segment> {
        let removed = self.state_mut(id)?.corridor.remove_segment(segment)?;
        self.mutations.record(Mutation::SegmentRemoved {
            corridor: id,
            segment: removed.id.clone(),
        });
        Ok(removed)
    }

    pub fn move_segment(&mut self, id: CorridorId, segment: &str, index: usize) -> Result<()> {
        self.state_mut(id)?.corridor.move_segment(segment, index)?;
        self.mutations.record(Mutation::SegmentMoved {
            corridor: id,
            segment: segment.into(),
        });
        Ok(())
    }

    pub fn set_segment_width(&mut self, id: CorridorId, segment: &str, width: f32) -> Result<()> {
        self.state_mut(id)?.corridor.set_segment_width(segment, width)?;
        self.mutations.record(Mutation::SegmentWidthChanged {
            corridor: id,
            segment: segment.into(),
        });
        Ok(())
    }

    pub fn set_segment_length(
        &mut self,
        id: CorridorId,
        segment: &str,
        length: Option<f32>,
    ) -> Result<()> {
        self.state_mut(id)?
            .corridor
            .set_segment_length(segment, length)?;
        self.mutations.record(Mutation::SegmentLengthChanged {
            corridor: id,
            segment: segment.into(),
        });
        Ok(())
    }

    pub fn set_generation(
        &mut self,
        id: CorridorId,
        segment: &str,
        generation: Vec<PlacementConfig>,
    ) -> Result<()> {
        self.state_mut(id)?
            .corridor
            .set_generation(segment, generation)?;
        self.mutations.record(Mutation::GenerationChanged {
            corridor: id,
            segment: segment.into(),
        });
        Ok(())
    }

    pub fn set_corridor_length(&mut self, id: CorridorId, length: f32) -> Result<()> {
        self.state_mut(id)?.corridor.set_length(length)?;
        self.mutations
            .record(Mutation::CorridorLengthChanged { corridor: id });
        Ok(())
    }

    pub fn set_alignment(
        &mut self,
        id: CorridorId,
        width_align: WidthAlign,
        length_align: LengthAlign,
    ) -> Result<()> {
        self.state_mut(id)?
            .corridor
            .set_alignment(width_align, length_align);
        self.mutations.record(Mutation::AlignmentChanged { corridor: id });
        Ok(())
    }

    // ------------------------------------------------------------------
    // Intersections
    // ------------------------------------------------------------------

    /// Add an intersection. Every approach must name an existing corridor
    /// that is not already attached elsewhere.
    pub fn add_intersection(&mut self, intersection: Intersection) -> Result<()> {
        if self.intersections.contains_key(&intersection.name) {
            return Err(KerbError::ValidationError(format!(
                "duplicate intersection '{}'",
                intersection.name
            )));
        }

        let mut attached = Vec::new();
        for (_, name) in intersection.approaches.iter() {
            let id = self
                .corridor_id(name)
                .ok_or_else(|| KerbError::CorridorNotFound(name.clone()))?;
            if self.state(id)?.intersection.is_some() {
                return Err(KerbError::CorridorAlreadyAttached(name.clone()));
            }
            attached.push(id);
        }

        for id in attached {
            self.state_mut(id)?.intersection = Some(intersection.name.clone());
            self.mutations.record(Mutation::CorridorAttachedToIntersection {
                corridor: id,
                intersection: intersection.name.clone(),
            });
        }
        self.dirty_intersections.insert(intersection.name.clone());
        self.intersections.insert(
            intersection.name.clone(),
            IntersectionState {
                intersection,
                layout: None,
            },
        );
        Ok(())
    }

    /// Attach a corridor to one side of an existing intersection, replacing
    /// whatever approached from that side
    pub fn attach_corridor(
        &mut self,
        intersection: &str,
        dir: Cardinal,
        corridor: CorridorId,
    ) -> Result<()> {
        let name = self.state(corridor)?.corridor.name.clone();
        match &self.state(corridor)?.intersection {
            Some(other) if other != intersection => {
                return Err(KerbError::CorridorAlreadyAttached(name));
            }
            _ => {}
        }
        let ist = self
            .intersections
            .get_mut(intersection)
            .ok_or_else(|| KerbError::IntersectionNotFound(intersection.to_string()))?;

        let replaced = ist.intersection.approaches.get(dir).cloned();
        ist.intersection.attach(dir, name.clone())?;
        if let Some(previous) = replaced.filter(|p| *p != name) {
            if let Some(prev_id) = self.corridor_id(&previous) {
                self.state_mut(prev_id)?.intersection = None;
            }
        }

        self.state_mut(corridor)?.intersection = Some(intersection.to_string());
        self.mutations.record(Mutation::CorridorAttachedToIntersection {
            corridor,
            intersection: intersection.to_string(),
        });
        Ok(())
    }

    pub fn intersection(&self, name: &str) -> Option<&Intersection> {
        self.intersections.get(name).map(|s| &s.intersection)
    }

    pub fn intersection_layout(&self, name: &str) -> Option<&IntersectionLayout> {
        self.intersections.get(name)?.layout.as_ref()
    }

    // ------------------------------------------------------------------
    // Detach
    // ------------------------------------------------------------------

    /// Bake a segment's content of one kind into top-level entities and
    /// drop the generators that produced it.
    ///
    /// The content is generated from the segment's current state, so edits
    /// still waiting for a tick are honored and a corridor that has never
    /// ticked bakes the same output its first tick would produce. Nothing is
    /// removed unless something was baked.
    pub fn detach(
        &mut self,
        id: CorridorId,
        segment: &str,
        kind: PlacementKind,
    ) -> Result<Vec<EntityId>> {
        let corridor_base = self
            .corridor_transform(id)
            .ok_or_else(|| KerbError::CorridorNotFound(id.to_string()))?;
        let state = self
            .corridors
            .get(&id)
            .ok_or_else(|| KerbError::CorridorNotFound(id.to_string()))?;
        let source = state
            .corridor
            .segment(segment)
            .ok_or_else(|| KerbError::SegmentNotFound(segment.to_string()))?;
        let indices: Vec<usize> = source
            .generation
            .iter()
            .enumerate()
            .filter(|(_, config)| config.kind() == kind)
            .map(|(i, _)| i)
            .collect();
        if indices.is_empty() {
            return Err(KerbError::NothingToDetach(format!(
                "segment '{}' has no {} generator",
                segment,
                kind.as_str()
            )));
        }

        let (Some(length), Some(local)) = (
            state.corridor.length(),
            align(&state.corridor).and_then(|a| a.segment_transform(segment)),
        ) else {
            return Err(KerbError::NothingToDetach(format!(
                "corridor '{}' has no length yet",
                state.corridor.name
            )));
        };
        let base = corridor_base.compose(&local);

        let ctx = source.placement_context(length);
        let batches: Vec<GeneratedContent> = generate_all(
            &source.generation,
            &ctx,
            &self.config,
            self.content_cache.as_deref(),
        )
        .into_iter()
        .filter(|g| g.kind == kind && !g.is_empty())
        .collect();
        if batches.is_empty() {
            return Err(KerbError::NothingToDetach(format!(
                "segment '{}' produced no {} content",
                segment,
                kind.as_str()
            )));
        }

        let prefix = format!("{}/{}", state.corridor.name, segment);
        let mut baked = Vec::new();
        for batch in &batches {
            baked.extend(bake(&base, batch, &prefix, &mut self.ids));
        }

        let state = self.state_mut(id)?;
        if let Some(content) = state.content.get_mut(segment) {
            content.retain(|g| g.kind != kind);
        }
        for index in indices.into_iter().rev() {
            state.corridor.take_generator(segment, index)?;
        }

        info!(
            corridor = %state.corridor.name,
            segment,
            kind = kind.as_str(),
            entities = baked.len(),
            "detached generated content"
        );
        self.mutations.record(Mutation::GenerationChanged {
            corridor: id,
            segment: segment.into(),
        });

        let ids = baked.iter().map(|e| e.id).collect();
        for entity in baked {
            self.detached.insert(entity.id, entity);
        }
        Ok(ids)
    }

    pub fn detached(&self) -> impl Iterator<Item = &DetachedEntity> {
        self.detached.values()
    }

    pub fn detached_entity(&self, id: EntityId) -> Option<&DetachedEntity> {
        self.detached.get(&id)
    }

    // ------------------------------------------------------------------
    // Observation cycle
    // ------------------------------------------------------------------

    /// Whether the next tick has anything to do
    pub fn has_pending(&self) -> bool {
        !self.mutations.is_empty() || !self.dirty_intersections.is_empty()
    }

    /// Run one observation cycle and return the events it produced.
    ///
    /// Observers are notified with the same events before this returns.
    #[instrument(level = "debug", skip_all)]
    pub fn tick(&mut self) -> Vec<LayoutEvent> {
        let barrier = &self.barrier;
        let mut changes = self
            .mutations
            .drain_coalesced(|id| barrier.is_loading(id));
        for id in self.barrier.take_resolved() {
            if self.corridors.contains_key(&id) {
                changes.entry(id).or_default().merge_full_rebuild();
                info!(corridor = %id, "structure loaded");
            }
        }

        let cache = self.content_cache.as_deref();
        let mut dirty = std::mem::take(&mut self.dirty_intersections);
        for (id, change) in &changes {
            let Some(state) = self.corridors.get_mut(id) else {
                continue;
            };
            regenerate(state, change, &self.config, cache);

            let mut realigned = false;
            if change.realign {
                match align(&state.corridor) {
                    Some(alignment) => {
                        realigned = state.alignment.as_ref() != Some(&alignment);
                        state.alignment = Some(alignment);
                    }
                    None => debug!(corridor = %id, "alignment deferred until a length is known"),
                }
            }

            let corridor = *id;
            if change.width_changed {
                self.events.push(LayoutEvent::SegmentWidthChanged { corridor });
            }
            if change.length_changed {
                self.events.push(LayoutEvent::SegmentLengthChanged { corridor });
            }
            if change.segments_changed {
                self.events.push(LayoutEvent::SegmentsChanged { corridor });
            }
            if change.alignment_changed || realigned {
                self.events.push(LayoutEvent::AlignmentChanged { corridor });
            }

            if change.affects_intersections() {
                dirty.extend(state.intersection.iter().cloned());
                dirty.extend(change.attached.iter().cloned());
            }
        }

        for name in dirty {
            let Some(ist) = self.intersections.get_mut(&name) else {
                continue;
            };
            let mut approaches = CardinalMap::default();
            for (dir, corridor) in ist.intersection.approaches.iter() {
                let state = self
                    .names
                    .get_by_left(corridor.as_str())
                    .and_then(|id| self.corridors.get(id));
                match state {
                    Some(state) => {
                        approaches.set(dir, &state.corridor);
                    }
                    None => warn!(intersection = %name, corridor = %corridor, "approach missing"),
                }
            }
            let layout = compose(&approaches);
            if ist.layout.as_ref() != Some(&layout) {
                ist.layout = Some(layout);
                self.events
                    .push(LayoutEvent::IntersectionChanged { intersection: name });
            }
        }

        let events = self.events.drain();
        debug!(corridors = changes.len(), events = events.len(), "tick");
        self.notify(&events);
        events
    }

    /// Tick until nothing is pending, returning every event produced
    pub fn settle(&mut self) -> Vec<LayoutEvent> {
        let mut events = self.tick();
        while self.has_pending() {
            events.extend(self.tick());
        }
        events
    }

    fn notify(&mut self, events: &[LayoutEvent]) {
        if events.is_empty() || self.observers.is_empty() {
            return;
        }
        let mut observers = std::mem::take(&mut self.observers);
        for observer in observers.iter_mut() {
            if let Err(e) = observer.on_layout_changed(self, events) {
                warn!(observer = observer.name(), error = %e, "observer failed");
            }
        }
        self.observers = observers;
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn insert_corridor(&mut self, mut corridor: Corridor) -> Result<CorridorId> {
        if self.names.contains_left(&corridor.name) {
            return Err(KerbError::DuplicateCorridorName(corridor.name));
        }
        corridor.reconcile_width();
        let id = self.ids.corridor();
        self.names.insert(corridor.name.clone(), id);
        info!(corridor = %corridor.name, %id, segments = corridor.len(), "corridor added");
        self.corridors.insert(
            id,
            CorridorState {
                corridor,
                origin: Transform::IDENTITY,
                alignment: None,
                content: HashMap::new(),
                intersection: None,
            },
        );
        Ok(id)
    }

    fn record_segment_added(&mut self, corridor: CorridorId, segment: SegmentId) {
        if self.barrier.is_loading(corridor) {
            debug!(%corridor, %segment, "segment added during load");
        }
        self.mutations
            .record(Mutation::SegmentAdded { corridor, segment });
    }

    fn state(&self, id: CorridorId) -> Result<&CorridorState> {
        self.corridors
            .get(&id)
            .ok_or_else(|| KerbError::CorridorNotFound(id.to_string()))
    }

    fn state_mut(&mut self, id: CorridorId) -> Result<&mut CorridorState> {
        self.corridors
            .get_mut(&id)
            .ok_or_else(|| KerbError::CorridorNotFound(id.to_string()))
    }
}

/// Full rebuild of the affected segments' content
fn regenerate(
    state: &mut CorridorState,
    change: &CorridorChanges,
    config: &LayoutConfig,
    cache: Option<&ContentCache>,
) {
    for segment in &change.removed {
        state.content.remove(segment);
    }
    let corridor_length = state.corridor.length().unwrap_or(0.0);
    let mut rebuilt = 0;
    for segment in state.corridor.segments() {
        if !change.regenerate_all && !change.regenerate.contains(&segment.id) {
            continue;
        }
        let ctx = segment.placement_context(corridor_length);
        let generated = generate_all(&segment.generation, &ctx, config, cache);
        state.content.insert(segment.id.clone(), generated);
        rebuilt += 1;
    }
    if rebuilt > 0 {
        debug!(corridor = %state.corridor.name, segments = rebuilt, "regenerated");
    }
}
