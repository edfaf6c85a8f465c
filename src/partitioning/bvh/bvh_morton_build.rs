use super::bvh_tree::NULL_NODE;
use super::{Bvh, BvhNode};
use crate::utils::morton;
use core::hash::Hash;
use log::debug;

impl<T: Copy + Eq + Hash> Bvh<T> {
    /// Rebuilds the whole hierarchy bottom-up along a Morton (Z-order) curve.
    ///
    /// Every interior node is torn down, the leaves are sorted by the Morton
    /// key of their centroid (normalized against the previous root's bounds),
    /// and the sorted run is merged pairwise through a FIFO until a single
    /// node remains, which becomes the new root. Interior bounds are exact
    /// unions of their children's afterwards.
    ///
    /// This approximates a linear BVH: tree quality comes entirely from the
    /// spatial sort order, with no attempt at SAH-optimal pairing. It is a
    /// no-op on an empty tree.
    pub fn bottom_up(&mut self) {
        if self.root == NULL_NODE {
            return;
        }

        debug!("bottom-up rebuild of {} leaves", self.leaf_indices.len());

        let root_aabb = self.pool[self.root].aabb;
        let mins = root_aabb.mins();
        let maxs = root_aabb.maxs();

        let mut workspace = core::mem::take(&mut self.workspace);
        workspace.rebuild_leaves.clear();
        workspace.rebuild_queue.clear();
        workspace
            .rebuild_leaves
            .extend(self.leaf_indices.values().copied());

        // Tear down the interior nodes, leaving every leaf an orphan. Chains
        // shared between leaves stop at the first slot already freed.
        for &leaf in &workspace.rebuild_leaves {
            let mut curr = self.pool[leaf].parent;
            self.pool[leaf].parent = NULL_NODE;

            while curr != NULL_NODE && !self.pool.is_vacant(curr) {
                let next = self.pool[curr].parent;
                self.pool.free(curr);
                curr = next;
            }
        }

        // Sort along the Morton curve. The previous root bounds normalize
        // centroids into the unit cube; equal keys fall back to the slot
        // index so the order is deterministic.
        workspace.rebuild_leaves.sort_unstable_by_key(|&leaf| {
            let center = morton::map_point(self.pool[leaf].aabb.center, mins, maxs, 0.0, 1.0);
            (morton::morton_encode_unorm(center), leaf)
        });

        // Pairwise FIFO merge.
        workspace
            .rebuild_queue
            .extend(workspace.rebuild_leaves.drain(..));

        while workspace.rebuild_queue.len() > 1 {
            let (Some(a), Some(b)) = (
                workspace.rebuild_queue.pop_front(),
                workspace.rebuild_queue.pop_front(),
            ) else {
                break;
            };

            let merged = self.pool[a].aabb.merged(&self.pool[b].aabb);
            let interior = self.pool.allocate();
            self.pool[interior] = BvhNode {
                aabb: merged,
                parent: NULL_NODE,
                left: a,
                right: b,
                item: None,
            };
            self.pool[a].parent = interior;
            self.pool[b].parent = interior;

            workspace.rebuild_queue.push_back(interior);
        }

        if let Some(root) = workspace.rebuild_queue.pop_front() {
            self.root = root;
        }

        self.workspace = workspace;
    }
}
