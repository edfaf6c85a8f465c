use super::bvh_tree::NULL_NODE;
use super::Bvh;
use core::hash::Hash;

impl<T: Copy + Eq + Hash> Bvh<T> {
    /// Walks from `node` to the root, enlarging each interior node's bounds
    /// to the union of its children's.
    ///
    /// The walk stops as soon as an ancestor already contains that union:
    /// every further ancestor then contains it too, so no enlargement is
    /// needed above. Passing [`NULL_NODE`] is a no-op.
    pub(super) fn refit_from(&mut self, mut node: u32) {
        while node != NULL_NODE {
            let n = self.pool[node];
            let merged = self.pool[n.left].aabb.merged(&self.pool[n.right].aabb);

            if n.aabb.contains(&merged) {
                break;
            }

            self.pool[node].aabb = merged;
            node = n.parent;
        }
    }
}
