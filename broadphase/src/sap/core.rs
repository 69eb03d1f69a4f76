use smallvec::SmallVec;

use super::endpoints::MAX_ENTITY_ID;
use super::proxy::{Proxy, SENTINEL_ID};
use super::*;

impl SapInner {
    pub(crate) fn with_config(config: Config) -> Self {
        // the id field is 15 bits; a larger cap could never be addressed
        let max_entities = config.max_entities.min(MAX_ENTITY_ID);
        let max_overlaps = config.max_overlaps.max(1);

        let mut entities = Vec::with_capacity(max_entities + 1);
        entities.push(Proxy::sentinel());

        let mut endpoints = [
            Vec::with_capacity((max_entities + 1) * 2),
            Vec::with_capacity((max_entities + 1) * 2),
        ];
        for axis in endpoints.iter_mut() {
            axis.push(EndpointWord::encode(false, SENTINEL_ID, i32::MIN));
            axis.push(EndpointWord::encode(true, SENTINEL_ID, i32::MAX));
        }

        Self {
            entities,
            num_entities: 0,
            endpoints,
            pair_manager: Vec::with_capacity(max_overlaps),
            removed_pairs: SmallVec::new(),
            config: Config {
                max_entities,
                max_overlaps,
            },
            stats: SweepStats::default(),
        }
    }

    pub(crate) fn new() -> Self {
        Self::with_config(Config::default())
    }

    #[inline(always)]
    pub(crate) fn num_entities(&self) -> usize {
        self.num_entities
    }

    #[inline(always)]
    pub(crate) fn pairs(&self) -> &[PairWord] {
        &self.pair_manager
    }

    pub(crate) fn stats(&self) -> SweepStats {
        self.stats
    }

    #[inline(always)]
    pub(crate) fn entity(&self, index: usize) -> &Proxy {
        &self.entities[index]
    }

    /// Resolves a handle to a live slot index, rejecting the guard slot and
    /// anything outside the live range.
    pub(crate) fn live_index(&self, id: ProxyId) -> Option<usize> {
        if !id.is_valid() {
            return None;
        }
        let index = id.index();
        if index == 0 || index > self.num_entities {
            return None;
        }
        Some(index)
    }

    /// Interval test via the endpoint arrays on every axis except
    /// `skip_axis`. Shared edges count as overlapping.
    pub(crate) fn test_overlap(&self, skip_axis: Option<usize>, a: usize, b: usize) -> bool {
        for axis in 0..2 {
            if skip_axis == Some(axis) {
                continue;
            }
            let eps = &self.endpoints[axis];
            let entity_a = &self.entities[a];
            let entity_b = &self.entities[b];
            let min_a = eps[entity_a.min_ep[axis]].position();
            let max_a = eps[entity_a.max_ep[axis]].position();
            let min_b = eps[entity_b.min_ep[axis]].position();
            let max_b = eps[entity_b.max_ep[axis]].position();
            if max_a < min_b || max_b < min_a {
                return false;
            }
        }
        true
    }

    #[inline(always)]
    pub(crate) fn needs_collision(&self, a: usize, b: usize) -> bool {
        let ea = &self.entities[a];
        let eb = &self.entities[b];
        (ea.filter_group & eb.filter_mask) != 0 && (eb.filter_group & ea.filter_mask) != 0
    }

    /// Full structural audit: endpoint ordering, back-references, the pair
    /// array against ground truth, and the per-entity pair slots. Diagnostic
    /// only; allocates for the duplicate scan and is not meant for hot paths.
    pub(crate) fn check_consistency(&self) -> bool {
        let expected_len = (self.num_entities + 1) * 2;
        for axis in 0..2 {
            let eps = &self.endpoints[axis];
            if eps.len() != expected_len {
                return false;
            }
            if eps[0] != EndpointWord::encode(false, SENTINEL_ID, i32::MIN) {
                return false;
            }
            if eps[eps.len() - 1] != EndpointWord::encode(true, SENTINEL_ID, i32::MAX) {
                return false;
            }
            for i in 1..eps.len() {
                if eps[i - 1].position() > eps[i].position() {
                    return false;
                }
            }
        }

        for index in 1..=self.num_entities {
            let entity = &self.entities[index];
            for axis in 0..2 {
                let (min, max) = axis_extent(&entity.aabb, axis);
                if entity.min_ep[axis] >= expected_len || entity.max_ep[axis] >= expected_len {
                    return false;
                }
                let min_word = self.endpoints[axis][entity.min_ep[axis]];
                if min_word.is_max() || min_word.owner() != index || min_word.position() != min {
                    return false;
                }
                let max_word = self.endpoints[axis][entity.max_ep[axis]];
                if !max_word.is_max() || max_word.owner() != index || max_word.position() != max {
                    return false;
                }
            }
        }

        for (pair_id, &pair) in self.pair_manager.iter().enumerate() {
            let a = pair.first_index();
            let b = pair.second_index();
            if a == SENTINEL_ID || a >= b || b > self.num_entities {
                return false;
            }
            if !self.test_overlap(None, a, b) || !self.needs_collision(a, b) {
                return false;
            }
            let refs_a = self.entities[a]
                .overlaps
                .iter()
                .filter(|&&p| p == pair_id as i32)
                .count();
            let refs_b = self.entities[b]
                .overlaps
                .iter()
                .filter(|&&p| p == pair_id as i32)
                .count();
            if refs_a != 1 || refs_b != 1 {
                return false;
            }
        }

        let mut words: Vec<u32> = self.pair_manager.iter().map(|p| p.raw()).collect();
        words.sort_unstable();
        if words.windows(2).any(|w| w[0] == w[1]) {
            return false;
        }

        for index in 1..=self.num_entities {
            for &pair_id in self.entities[index].overlaps.iter() {
                if pair_id < 0 {
                    continue;
                }
                let pair_id = pair_id as usize;
                if pair_id >= self.pair_manager.len() {
                    return false;
                }
                let pair = self.pair_manager[pair_id];
                if pair.first_index() != index && pair.second_index() != index {
                    return false;
                }
            }
        }

        true
    }
}
