use crate::error::BroadphaseResult;

use super::SapInner;

/// The four insertion-sort kernels. Each shuffles one endpoint toward its
/// sorted position by swapping with its neighbor, emitting pair events
/// against the other axis as endpoints of different kinds cross. Comparisons
/// are strict, so endpoints at equal coordinates never reorder: touching
/// intervals stay overlapping. The guard endpoints at both ends of each
/// array bound every walk.
impl SapInner {
    /// A min endpoint moving down can only start overlaps: crossing below a
    /// max endpoint means this entity now covers that one on this axis, and
    /// the other axis decides whether a pair begins.
    pub(crate) fn sort_min_down(
        &mut self,
        axis: usize,
        mut pos: usize,
        update_overlaps: bool,
    ) -> BroadphaseResult<()> {
        loop {
            let ep = self.endpoints[axis][pos];
            let prev = self.endpoints[axis][pos - 1];
            if ep.position() >= prev.position() {
                break;
            }
            let owner = ep.owner();
            let prev_owner = prev.owner();

            if prev.is_max() {
                if update_overlaps && self.test_overlap(Some(axis), owner, prev_owner) {
                    self.add_overlapping_pair(owner, prev_owner)?;
                }
                self.entities[prev_owner].max_ep[axis] += 1;
            } else {
                self.entities[prev_owner].min_ep[axis] += 1;
            }
            self.entities[owner].min_ep[axis] -= 1;

            self.endpoints[axis].swap(pos - 1, pos);
            self.bump_swap();
            pos -= 1;
        }
        Ok(())
    }

    /// A min endpoint moving up can only end overlaps: crossing above a max
    /// endpoint means coverage on this axis is gone, so any pair is removed
    /// unconditionally.
    pub(crate) fn sort_min_up(
        &mut self,
        axis: usize,
        mut pos: usize,
        update_overlaps: bool,
    ) -> BroadphaseResult<()> {
        loop {
            let ep = self.endpoints[axis][pos];
            let next = self.endpoints[axis][pos + 1];
            if ep.position() <= next.position() {
                break;
            }
            let owner = ep.owner();
            let next_owner = next.owner();

            if next.is_max() {
                if update_overlaps {
                    self.remove_overlapping_pair(owner, next_owner);
                }
                self.entities[next_owner].max_ep[axis] -= 1;
            } else {
                self.entities[next_owner].min_ep[axis] -= 1;
            }
            self.entities[owner].min_ep[axis] += 1;

            self.endpoints[axis].swap(pos, pos + 1);
            self.bump_swap();
            pos += 1;
        }
        Ok(())
    }

    /// Mirror of `sort_min_up`: a max endpoint moving down past a min
    /// endpoint ends that overlap.
    pub(crate) fn sort_max_down(
        &mut self,
        axis: usize,
        mut pos: usize,
        update_overlaps: bool,
    ) -> BroadphaseResult<()> {
        loop {
            let ep = self.endpoints[axis][pos];
            let prev = self.endpoints[axis][pos - 1];
            if ep.position() >= prev.position() {
                break;
            }
            let owner = ep.owner();
            let prev_owner = prev.owner();

            if !prev.is_max() {
                if update_overlaps {
                    self.remove_overlapping_pair(owner, prev_owner);
                }
                self.entities[prev_owner].min_ep[axis] += 1;
            } else {
                self.entities[prev_owner].max_ep[axis] += 1;
            }
            self.entities[owner].max_ep[axis] -= 1;

            self.endpoints[axis].swap(pos - 1, pos);
            self.bump_swap();
            pos -= 1;
        }
        Ok(())
    }

    /// Mirror of `sort_min_down`: a max endpoint moving up past a min
    /// endpoint may start an overlap, confirmed on the other axis.
    pub(crate) fn sort_max_up(
        &mut self,
        axis: usize,
        mut pos: usize,
        update_overlaps: bool,
    ) -> BroadphaseResult<()> {
        loop {
            let ep = self.endpoints[axis][pos];
            let next = self.endpoints[axis][pos + 1];
            if ep.position() <= next.position() {
                break;
            }
            let owner = ep.owner();
            let next_owner = next.owner();

            if !next.is_max() {
                if update_overlaps && self.test_overlap(Some(axis), owner, next_owner) {
                    self.add_overlapping_pair(owner, next_owner)?;
                }
                self.entities[next_owner].min_ep[axis] -= 1;
            } else {
                self.entities[next_owner].max_ep[axis] -= 1;
            }
            self.entities[owner].max_ep[axis] += 1;

            self.endpoints[axis].swap(pos, pos + 1);
            self.bump_swap();
            pos += 1;
        }
        Ok(())
    }
}
