mod api;
mod config;
mod core;
mod endpoints;
mod pairs;
mod proxy;
mod sort;
mod stats;
mod update_entities;

pub use api::SweepPrune;
pub use config::Config;
pub use endpoints::EndpointWord;
pub use pairs::PairWord;
pub use proxy::{ProxyId, MAX_OVERLAPS_PER_ENTITY};
pub use stats::SweepStats;

use common::shapes::Aabb;
use proxy::Proxy;
use smallvec::SmallVec;

pub(crate) const AXIS_X: usize = 0;
pub(crate) const AXIS_Y: usize = 1;

/// Endpoint span of `aabb` projected onto one axis.
#[inline(always)]
pub(crate) fn axis_extent(aabb: &Aabb, axis: usize) -> (i32, i32) {
    if axis == AXIS_X {
        (aabb.x, aabb.x + aabb.width)
    } else {
        (aabb.y, aabb.y + aabb.height)
    }
}

/// All sweep-and-prune state. Storage is sized once at construction; every
/// operation afterwards works in place (the scratch buffer below has inline
/// capacity and never spills).
pub(crate) struct SapInner {
    /// Dense slot table; slot 0 holds the guard entity, slots
    /// `1..=num_entities` the live ones.
    entities: Vec<Proxy>,
    num_entities: usize,
    /// One sorted endpoint array per axis, guard endpoints at both ends.
    endpoints: [Vec<EndpointWord>; 2],
    /// Dense array of live pairs; a pair's index is its id.
    pair_manager: Vec<PairWord>,
    /// Partner ids cached while a removal renumbers the last entity.
    removed_pairs: SmallVec<[u16; MAX_OVERLAPS_PER_ENTITY]>,
    config: Config,
    stats: SweepStats,
}
