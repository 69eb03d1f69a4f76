use common::shapes::Aabb;

/// Upper bound on how many live pairs a single entity can participate in.
pub const MAX_OVERLAPS_PER_ENTITY: usize = 10;

pub(crate) const INVALID_PAIR_ID: i32 = -1;
pub(crate) const SENTINEL_ID: usize = 0;

/// Opaque handle to an entity registered in the broadphase.
///
/// Handles are dense: removing an entity renumbers the highest live handle
/// into the freed slot (see `SweepPrune::remove`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProxyId(pub(crate) i32);

impl ProxyId {
    /// Returned by `add` when the entity was rejected by its own filter.
    pub const INVALID: ProxyId = ProxyId(-1);

    #[inline(always)]
    pub fn is_valid(self) -> bool {
        self.0 > 0
    }

    #[inline(always)]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub(crate) fn from_index(index: usize) -> ProxyId {
        ProxyId(index as i32)
    }
}

/// Per-entity record in the dense slot table: the AABB, the collision filter,
/// back-references into both endpoint arrays, and the ids of the pairs this
/// entity participates in (`INVALID_PAIR_ID` marks a free slot).
#[derive(Debug, Clone, Copy)]
pub(crate) struct Proxy {
    pub(crate) aabb: Aabb,
    pub(crate) filter_group: u16,
    pub(crate) filter_mask: u16,
    pub(crate) min_ep: [usize; 2],
    pub(crate) max_ep: [usize; 2],
    pub(crate) overlaps: [i32; MAX_OVERLAPS_PER_ENTITY],
}

impl Proxy {
    pub(crate) fn new(aabb: Aabb, filter_group: u16, filter_mask: u16) -> Self {
        Self {
            aabb,
            filter_group,
            filter_mask,
            min_ep: [0; 2],
            max_ep: [0; 2],
            overlaps: [INVALID_PAIR_ID; MAX_OVERLAPS_PER_ENTITY],
        }
    }

    /// The guard entity in slot 0. Its endpoints pin both ends of each axis
    /// array so the sort kernels never need bounds checks.
    pub(crate) fn sentinel() -> Self {
        Self {
            aabb: Aabb::default(),
            filter_group: 0,
            filter_mask: 0,
            min_ep: [0, 0],
            max_ep: [1, 1],
            overlaps: [INVALID_PAIR_ID; MAX_OVERLAPS_PER_ENTITY],
        }
    }

    #[inline(always)]
    pub(crate) fn free_overlap_slot(&self) -> Option<usize> {
        self.overlaps.iter().position(|&p| p == INVALID_PAIR_ID)
    }

    pub(crate) fn overlap_count(&self) -> usize {
        self.overlaps.iter().filter(|&&p| p != INVALID_PAIR_ID).count()
    }

    #[inline(always)]
    pub(crate) fn in_collision(&self) -> bool {
        self.overlaps.iter().any(|&p| p != INVALID_PAIR_ID)
    }
}
