use common::shapes::Aabb;

use crate::error::{BroadphaseError, BroadphaseResult, CapacityKind};

use super::endpoints::EndpointWord;
use super::proxy::{Proxy, INVALID_PAIR_ID, MAX_OVERLAPS_PER_ENTITY, SENTINEL_ID};
use super::{axis_extent, ProxyId, SapInner, AXIS_X, AXIS_Y};

impl SapInner {
    /// Registers an entity. Entities whose filter can never match anything
    /// are rejected up front and reported as `ProxyId::INVALID`. The new
    /// endpoints start just under the upper guard and are shuffled down into
    /// place; only the second axis emits pair events, because an overlap can
    /// only be decided once the first axis is already ordered.
    pub(crate) fn add_entity(
        &mut self,
        aabb: Aabb,
        filter_group: u16,
        filter_mask: u16,
        update_overlaps: bool,
    ) -> BroadphaseResult<ProxyId> {
        if filter_group == 0 || filter_mask == 0 {
            return Ok(ProxyId::INVALID);
        }
        if self.num_entities == self.config.max_entities {
            return Err(BroadphaseError::OverCapacity {
                resource: CapacityKind::Entities,
                capacity: self.config.max_entities,
            });
        }
        debug_assert!(
            aabb.width >= 0 && aabb.height >= 0,
            "entity extents must be non-negative"
        );

        let index = self.num_entities + 1;
        self.entities.push(Proxy::new(aabb, filter_group, filter_mask));
        self.num_entities = index;

        // the guard now pins a two-slot-larger array on each axis
        for axis in 0..2 {
            self.entities[SENTINEL_ID].max_ep[axis] += 2;
        }

        let nedges = self.num_entities * 2;
        for axis in 0..2 {
            let (min, max) = axis_extent(&aabb, axis);
            let eps = &mut self.endpoints[axis];
            let last = eps.len() - 1;
            eps[last] = EndpointWord::encode(false, index, min);
            eps.push(EndpointWord::encode(true, index, max));
            eps.push(EndpointWord::encode(true, SENTINEL_ID, i32::MAX));

            let entity = &mut self.entities[index];
            entity.min_ep[axis] = nedges - 1;
            entity.max_ep[axis] = nedges;
        }

        self.sort_min_down(AXIS_X, self.entities[index].min_ep[AXIS_X], false)?;
        self.sort_max_down(AXIS_X, self.entities[index].max_ep[AXIS_X], false)?;
        self.sort_min_down(AXIS_Y, self.entities[index].min_ep[AXIS_Y], update_overlaps)?;
        self.sort_max_down(AXIS_Y, self.entities[index].max_ep[AXIS_Y], update_overlaps)?;

        Ok(ProxyId::from_index(index))
    }

    /// Repairs the structure after an entity's AABB changed. Each of the four
    /// endpoints is rewritten in place and then shuffled by exactly one
    /// direction-appropriate kernel; growth runs before shrink.
    pub(crate) fn update_entity(&mut self, id: ProxyId, aabb: Aabb) -> BroadphaseResult<()> {
        let index = self.live_index(id).ok_or(BroadphaseError::NotRegistered)?;
        debug_assert!(
            aabb.width >= 0 && aabb.height >= 0,
            "entity extents must be non-negative"
        );
        self.entities[index].aabb = aabb;

        for axis in 0..2 {
            let (min, max) = axis_extent(&aabb, axis);
            let min_pos = self.entities[index].min_ep[axis];
            let max_pos = self.entities[index].max_ep[axis];

            let dmin = min - self.endpoints[axis][min_pos].position();
            let dmax = max - self.endpoints[axis][max_pos].position();

            self.endpoints[axis][min_pos] = EndpointWord::encode(false, index, min);
            self.endpoints[axis][max_pos] = EndpointWord::encode(true, index, max);

            if dmin < 0 {
                self.sort_min_down(axis, min_pos, true)?;
            }
            if dmax > 0 {
                self.sort_max_up(axis, max_pos, true)?;
            }
            if dmin > 0 {
                self.sort_min_up(axis, min_pos, true)?;
            }
            if dmax < 0 {
                self.sort_max_down(axis, max_pos, true)?;
            }
        }
        Ok(())
    }

    /// Deregisters an entity. Its endpoints are floated above every live
    /// endpoint (the guard max is temporarily displaceable and rewritten
    /// afterwards), then the last entity in the slot table takes the freed
    /// slot; pairs keyed by its old id are rebuilt under the new one.
    pub(crate) fn remove_entity(&mut self, id: ProxyId) -> BroadphaseResult<()> {
        let index = self.live_index(id).ok_or(BroadphaseError::NotRegistered)?;

        self.remove_pairs_containing(index);

        let nedges = self.num_entities * 2;
        for axis in 0..2 {
            self.entities[SENTINEL_ID].max_ep[axis] -= 2;
        }

        for axis in 0..2 {
            // maxes first, then mins: each stops under the word above it, so
            // the top of the array ends up [min, max, guard max]
            let max_pos = self.entities[index].max_ep[axis];
            self.endpoints[axis][max_pos] = EndpointWord::encode(true, index, i32::MAX);
            self.sort_max_up(axis, max_pos, false)?;

            let min_pos = self.entities[index].min_ep[axis];
            self.endpoints[axis][min_pos] = EndpointWord::encode(false, index, i32::MAX);
            self.sort_min_up(axis, min_pos, false)?;

            let eps = &mut self.endpoints[axis];
            eps[nedges - 1] = EndpointWord::encode(true, SENTINEL_ID, i32::MAX);
            eps.truncate(nedges);
        }

        let last = self.num_entities;
        if index < last {
            // the last entity is about to be renumbered; pair words are keyed
            // by id, so cache its partners, tear its pairs down, and rebuild
            // them under the new id
            self.removed_pairs.clear();
            for slot in 0..MAX_OVERLAPS_PER_ENTITY {
                let pair_id = self.entities[last].overlaps[slot];
                if pair_id > INVALID_PAIR_ID {
                    let pair = self.pair_manager[pair_id as usize];
                    let other = if pair.first_index() == last {
                        pair.second_index()
                    } else {
                        pair.first_index()
                    };
                    self.removed_pairs.push(other as u16);
                }
            }
            self.remove_pairs_containing(last);

            self.entities.swap(index, last);

            let partners = std::mem::take(&mut self.removed_pairs);
            for &other in partners.iter() {
                self.add_overlapping_pair(index, other as usize)?;
            }
            self.removed_pairs = partners;

            for axis in 0..2 {
                let min_pos = self.entities[index].min_ep[axis];
                let word = self.endpoints[axis][min_pos];
                self.endpoints[axis][min_pos] =
                    EndpointWord::encode(false, index, word.position());
                let max_pos = self.entities[index].max_ep[axis];
                let word = self.endpoints[axis][max_pos];
                self.endpoints[axis][max_pos] = EndpointWord::encode(true, index, word.position());
            }
        }

        self.entities.truncate(last);
        self.num_entities -= 1;
        Ok(())
    }

    /// Deregisters everything but the guard. Highest id first, so the
    /// swap-with-last path is never taken.
    pub(crate) fn clear(&mut self) -> BroadphaseResult<()> {
        while self.num_entities > 0 {
            self.remove_entity(ProxyId::from_index(self.num_entities))?;
        }
        Ok(())
    }
}
