use super::SapInner;

/// Event counters for the sort kernels and the pair manager. Counting is
/// compiled in only with the `sweep_stats` feature; without it the struct
/// stays at zero.
#[derive(Debug, Default, Clone, Copy)]
pub struct SweepStats {
    pub endpoint_swaps: u64,
    pub pairs_added: u64,
    pub pairs_removed: u64,
}

impl SapInner {
    #[inline(always)]
    pub(crate) fn bump_swap(&mut self) {
        #[cfg(feature = "sweep_stats")]
        {
            self.stats.endpoint_swaps += 1;
        }
    }

    #[inline(always)]
    pub(crate) fn bump_pair_added(&mut self) {
        #[cfg(feature = "sweep_stats")]
        {
            self.stats.pairs_added += 1;
        }
    }

    #[inline(always)]
    pub(crate) fn bump_pair_removed(&mut self) {
        #[cfg(feature = "sweep_stats")]
        {
            self.stats.pairs_removed += 1;
        }
    }
}
