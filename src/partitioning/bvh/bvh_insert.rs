use super::bvh_tree::NULL_NODE;
use super::{Bvh, BvhNode};
use crate::bounding_volume::Aabb;
use crate::math::Real;
use crate::utils::hashmap::Entry;
use core::hash::Hash;

impl<T: Copy + Eq + Hash> Bvh<T> {
    /// Inserts a leaf into this tree.
    ///
    /// Returns `false` and leaves the tree unchanged if `item` is already
    /// tracked. The leaf's position is chosen by a greedy descent from the
    /// root: at each interior node, insertion follows the child whose bounds
    /// would grow to the smallest surface area.
    pub fn insert(&mut self, item: T, aabb: Aabb) -> bool {
        self.insert_with_margin(item, aabb, 0.0)
    }

    /// Inserts a leaf whose stored bounds are enlarged by `margin` on each
    /// side.
    ///
    /// A nonzero margin reduces churn when the leaf is later moved with
    /// [`Bvh::update_with_margin`]: as long as the new bounds stay inside the
    /// inflated ones, the tree is left untouched.
    pub fn insert_with_margin(&mut self, item: T, aabb: Aabb, margin: Real) -> bool {
        let aabb = if margin > 0.0 {
            aabb.loosened(margin)
        } else {
            aabb
        };

        let leaf = match self.leaf_indices.entry(item) {
            Entry::Occupied(_) => return false,
            Entry::Vacant(entry) => {
                let leaf = self.pool.allocate();
                let _ = entry.insert(leaf);
                leaf
            }
        };
        self.pool[leaf] = BvhNode::leaf(aabb, item);

        // First leaf: it becomes the root.
        if self.root == NULL_NODE {
            self.root = leaf;
            return true;
        }

        // Greedy descent to the leaf that will become the new leaf's sibling.
        let mut sibling = self.root;
        loop {
            let node = self.pool[sibling];
            if node.is_leaf() {
                break;
            }

            let left_cost = self.pool[node.left].aabb.merged(&aabb).surface_area();
            let right_cost = self.pool[node.right].aabb.merged(&aabb).surface_area();

            // Ties descend left.
            sibling = if left_cost <= right_cost {
                node.left
            } else {
                node.right
            };
        }

        // Splice a fresh interior node above the chosen sibling.
        let old_parent = self.pool[sibling].parent;
        let merged = self.pool[sibling].aabb.merged(&aabb);
        let interior = self.pool.allocate();
        self.pool[interior] = BvhNode {
            aabb: merged,
            parent: old_parent,
            left: sibling,
            right: leaf,
            item: None,
        };
        self.pool[sibling].parent = interior;
        self.pool[leaf].parent = interior;

        if old_parent == NULL_NODE {
            // The sibling was the root.
            self.root = interior;
        } else if self.pool[old_parent].left == sibling {
            self.pool[old_parent].left = interior;
        } else {
            self.pool[old_parent].right = interior;
        }

        self.refit_from(old_parent);
        true
    }

    /// Replaces the bounds of a tracked item.
    ///
    /// This is exactly [`Bvh::remove`] followed by [`Bvh::insert`]: the leaf
    /// is re-inserted from the root with the usual greedy descent and refit.
    /// Returns `false` and leaves the tree unchanged if `item` is not
    /// tracked.
    pub fn update(&mut self, item: T, aabb: Aabb) -> bool {
        self.update_with_margin(item, aabb, 0.0)
    }

    /// Replaces the bounds of a tracked item, inflating the stored bounds by
    /// `margin` on each side.
    ///
    /// If the currently stored (inflated) bounds still contain `aabb`, the
    /// tree is left untouched: the leaf does not move and no refit runs.
    pub fn update_with_margin(&mut self, item: T, aabb: Aabb, margin: Real) -> bool {
        let Some(&leaf) = self.leaf_indices.get(&item) else {
            return false;
        };

        if margin > 0.0 && self.pool[leaf].aabb.contains(&aabb) {
            return true;
        }

        let _ = self.remove(item);
        let _ = self.insert_with_margin(item, aabb, margin);
        true
    }
}
