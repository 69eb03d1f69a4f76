use common::shapes::Aabb;

use crate::error::BroadphaseResult;

use super::{Config, PairWord, ProxyId, SapInner, SweepStats};

/// Persistent 2D sweep-and-prune broadphase.
///
/// Maintains the exact set of overlapping AABB pairs for a population of
/// entities moving in the plane. Work per operation is proportional to how
/// far endpoints moved through the sorted order, not to the population size,
/// and no allocation happens after construction.
///
/// Entities are registered with [`add`](Self::add) and addressed through the
/// returned [`ProxyId`]. Handles are dense: [`remove`](Self::remove) moves
/// the highest live entity into the freed slot, so the highest outstanding
/// handle is renumbered to the removed one. The pair words returned by
/// [`pairs`](Self::pairs) always decode to current handles.
pub struct SweepPrune {
    inner: SapInner,
}

impl SweepPrune {
    pub fn new() -> Self {
        Self {
            inner: SapInner::new(),
        }
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            inner: SapInner::with_config(config),
        }
    }

    /// Registers an entity and, when `update_overlaps` is set, emits its
    /// initial overlap set.
    ///
    /// An entity whose `filter_group` or `filter_mask` is zero can never
    /// collide; the call is a no-op and returns `ProxyId::INVALID`. A full
    /// entity table or pair table fails with `OverCapacity`.
    pub fn add(
        &mut self,
        aabb: Aabb,
        filter_group: u16,
        filter_mask: u16,
        update_overlaps: bool,
    ) -> BroadphaseResult<ProxyId> {
        self.inner
            .add_entity(aabb, filter_group, filter_mask, update_overlaps)
    }

    /// Moves or resizes a registered entity, incrementally repairing the
    /// overlap set. Extents must stay non-negative.
    pub fn update(&mut self, id: ProxyId, aabb: Aabb) -> BroadphaseResult<()> {
        self.inner.update_entity(id, aabb)
    }

    /// Deregisters an entity and drops every pair containing it. The highest
    /// live handle is renumbered into the freed slot.
    pub fn remove(&mut self, id: ProxyId) -> BroadphaseResult<()> {
        self.inner.remove_entity(id)
    }

    /// Deregisters every entity.
    pub fn clear(&mut self) -> BroadphaseResult<()> {
        self.inner.clear()
    }

    /// The live overlap set. Decode participants with
    /// [`PairWord::first_id`] / [`PairWord::second_id`].
    pub fn pairs(&self) -> &[PairWord] {
        self.inner.pairs()
    }

    pub fn pairs_count(&self) -> usize {
        self.inner.pairs().len()
    }

    pub fn num_entities(&self) -> usize {
        self.inner.num_entities()
    }

    /// Current AABB of a registered entity.
    pub fn aabb(&self, id: ProxyId) -> Option<Aabb> {
        self.inner
            .live_index(id)
            .map(|index| self.inner.entity(index).aabb)
    }

    /// Collision filter `(group, mask)` of a registered entity.
    pub fn filter(&self, id: ProxyId) -> Option<(u16, u16)> {
        self.inner.live_index(id).map(|index| {
            let entity = self.inner.entity(index);
            (entity.filter_group, entity.filter_mask)
        })
    }

    /// Whether two registered entities' AABBs overlap on both axes. Shared
    /// edges count.
    pub fn test_entities_overlap(&self, a: ProxyId, b: ProxyId) -> bool {
        match (self.inner.live_index(a), self.inner.live_index(b)) {
            (Some(a), Some(b)) => self.inner.test_overlap(None, a, b),
            _ => false,
        }
    }

    /// Whether the filter rules allow two registered entities to collide.
    pub fn needs_collision(&self, a: ProxyId, b: ProxyId) -> bool {
        match (self.inner.live_index(a), self.inner.live_index(b)) {
            (Some(a), Some(b)) => self.inner.needs_collision(a, b),
            _ => false,
        }
    }

    /// Whether the entity currently participates in any pair.
    pub fn in_broadphase_collision(&self, id: ProxyId) -> bool {
        self.inner
            .live_index(id)
            .map(|index| self.inner.entity(index).in_collision())
            .unwrap_or(false)
    }

    /// Number of pairs the entity currently participates in.
    pub fn overlap_count(&self, id: ProxyId) -> usize {
        self.inner
            .live_index(id)
            .map(|index| self.inner.entity(index).overlap_count())
            .unwrap_or(0)
    }

    /// Kernel and pair-manager counters (all zero unless the `sweep_stats`
    /// feature is enabled).
    pub fn stats(&self) -> SweepStats {
        self.inner.stats()
    }

    /// Structural audit of the whole structure; diagnostic use only.
    pub fn check_consistency(&self) -> bool {
        self.inner.check_consistency()
    }
}

impl Default for SweepPrune {
    fn default() -> Self {
        Self::new()
    }
}
