use super::bvh_tree::NULL_NODE;
use super::Bvh;
use crate::bounding_volume::Aabb;
use crate::math::Real;
use crate::query::Ray;
use core::hash::Hash;
use smallvec::SmallVec;

impl<T: Copy + Eq + Hash> Bvh<T> {
    /// Iterates through all the leaves whose AABB intersects the given
    /// `aabb`.
    ///
    /// Mere contact counts as an intersection.
    pub fn intersect_aabb<'a>(&'a self, aabb: &'a Aabb) -> impl Iterator<Item = T> + 'a {
        self.leaves(move |bounds: &Aabb| bounds.intersects(aabb))
    }

    /// Iterates through all the leaves whose AABB is hit by `ray` no later
    /// than `max_toi`.
    pub fn intersect_ray<'a>(&'a self, ray: &'a Ray, max_toi: Real) -> impl Iterator<Item = T> + 'a {
        self.leaves(move |bounds: &Aabb| bounds.cast_local_ray(ray, max_toi).is_some())
    }

    /// Finds the leaf minimizing a caller-supplied cost.
    ///
    /// `aabb_cost` must lower-bound the cost of anything contained in the
    /// given bounds; that is what makes pruning sound. `leaf_cost` prices an
    /// actual leaf, returning `None` to dismiss it. Both receive the best
    /// cost found so far. Returns the best leaf and its cost among those
    /// strictly cheaper than `max_cost`.
    pub fn find_best(
        &self,
        max_cost: Real,
        aabb_cost: impl Fn(&Aabb, Real) -> Real,
        mut leaf_cost: impl FnMut(T, Real) -> Option<Real>,
    ) -> Option<(T, Real)> {
        if self.root == NULL_NODE {
            return None;
        }

        let mut best_cost = max_cost;
        let mut best_item = None;

        // A lone leaf root is handled here; the loop assumes interior nodes.
        let root = &self.pool[self.root];
        if let Some(item) = root.item {
            if aabb_cost(&root.aabb, best_cost) < best_cost {
                let cost = leaf_cost(item, best_cost)?;
                return (cost < best_cost).then_some((item, cost));
            }

            return None;
        }

        let mut stack: SmallVec<[u32; 32]> = SmallVec::new();
        let mut curr = self.root;

        loop {
            let node = &self.pool[curr];
            let mut left = node.left;
            let mut right = node.right;
            let mut left_score = aabb_cost(&self.pool[left].aabb, best_cost);
            let mut right_score = aabb_cost(&self.pool[right].aabb, best_cost);

            // Descend into the most promising child first.
            if left_score > right_score {
                core::mem::swap(&mut left_score, &mut right_score);
                core::mem::swap(&mut left, &mut right);
            }

            let mut found_next = false;

            if left_score < best_cost {
                if let Some(item) = self.pool[left].item {
                    if let Some(cost) = leaf_cost(item, best_cost) {
                        if cost < best_cost {
                            best_cost = cost;
                            best_item = Some(item);
                        }
                    }
                } else {
                    curr = left;
                    found_next = true;
                }
            }

            if right_score < best_cost {
                if let Some(item) = self.pool[right].item {
                    if let Some(cost) = leaf_cost(item, best_cost) {
                        if cost < best_cost {
                            best_cost = cost;
                            best_item = Some(item);
                        }
                    }
                } else if found_next {
                    stack.push(right);
                } else {
                    curr = right;
                    found_next = true;
                }
            }

            if !found_next {
                let Some(next) = stack.pop() else {
                    return best_item.map(|item| (item, best_cost));
                };
                curr = next;
            }
        }
    }

    /// Casts a ray on this tree using the provided leaf ray-cast function.
    ///
    /// The tree prunes with the slab test on node bounds; `leaf_cast` maps a
    /// surviving item to the time of impact on its actual geometry, if any
    /// (leaf geometry stays with the caller). Returns the item with the
    /// smallest time of impact no greater than `max_toi`.
    pub fn cast_ray(
        &self,
        ray: &Ray,
        max_toi: Real,
        leaf_cast: impl FnMut(T, Real) -> Option<Real>,
    ) -> Option<(T, Real)> {
        self.find_best(
            max_toi,
            |bounds: &Aabb, _| bounds.cast_local_ray(ray, max_toi).unwrap_or(Real::MAX),
            leaf_cast,
        )
    }
}
