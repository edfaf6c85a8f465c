use super::bvh_tree::NULL_NODE;
use super::Bvh;
use crate::utils::hashset::HashSet;
use core::hash::Hash;

impl<T: Copy + Eq + Hash> Bvh<T> {
    /// Panics if the tree isn't well-formed.
    ///
    /// The tree is well-formed if:
    /// - the topology is sound: interior nodes have exactly two children,
    ///   child/parent pointers agree, and no slot is reached twice;
    /// - every interior node's bounds contain the union of its children's;
    /// - the item index and the reachable leaves are in bijection;
    /// - the reachable set and the free-list partition the pool, with
    ///   `2·N − 1` slots allocated for `N ≥ 1` leaves (0 for an empty tree).
    ///
    /// This is a debugging utility; it walks the whole tree.
    pub fn assert_well_formed(&self) {
        self.assert_well_formed_inner(false);
    }

    /// Like [`Bvh::assert_well_formed`], but additionally requires every
    /// interior node's bounds to be exactly the union of its children's.
    ///
    /// This holds right after [`Bvh::bottom_up`]. Incremental edits only
    /// guarantee containment: insertion refits are supersets and removal
    /// leaves ancestor bounds untouched.
    pub fn assert_tight(&self) {
        self.assert_well_formed_inner(true);
    }

    fn assert_well_formed_inner(&self, tight: bool) {
        let mut reachable = HashSet::default();
        let mut leaf_count = 0;

        if self.root != NULL_NODE {
            assert_eq!(
                self.pool[self.root].parent,
                NULL_NODE,
                "the root must not have a parent"
            );
            self.assert_well_formed_recurse(self.root, tight, &mut reachable, &mut leaf_count);
        }

        assert_eq!(
            leaf_count,
            self.leaf_indices.len(),
            "leaf count and tracked item count differ"
        );

        for &leaf in self.leaf_indices.values() {
            assert!(
                self.pool[leaf].is_leaf(),
                "an item is mapped to a non-leaf slot"
            );
            assert!(
                reachable.contains(&leaf),
                "an item is mapped to an unreachable slot"
            );
        }

        let allocated = self.pool.capacity() as usize - self.pool.free.len();
        let expected = if leaf_count == 0 { 0 } else { 2 * leaf_count - 1 };
        assert_eq!(allocated, expected, "wrong number of allocated slots");
        assert_eq!(
            reachable.len(),
            allocated,
            "allocated slots and reachable nodes differ"
        );

        for &free in &self.pool.free {
            assert!(
                !reachable.contains(&free),
                "slot {} is both free and reachable",
                free
            );
        }
    }

    fn assert_well_formed_recurse(
        &self,
        id: u32,
        tight: bool,
        reachable: &mut HashSet<u32>,
        leaf_count: &mut usize,
    ) {
        assert!(reachable.insert(id), "node {} visited twice", id);

        let node = &self.pool[id];

        if node.is_leaf() {
            assert_eq!(node.left, NULL_NODE, "leaf {} has a left child", id);
            assert_eq!(node.right, NULL_NODE, "leaf {} has a right child", id);
            *leaf_count += 1;
            return;
        }

        assert_ne!(node.left, NULL_NODE, "interior {} misses its left child", id);
        assert_ne!(node.right, NULL_NODE, "interior {} misses its right child", id);

        let left = &self.pool[node.left];
        let right = &self.pool[node.right];
        assert_eq!(left.parent, id, "left child of {} disowns it", id);
        assert_eq!(right.parent, id, "right child of {} disowns it", id);

        let merged = left.aabb.merged(&right.aabb);
        if tight {
            assert_eq!(
                node.aabb, merged,
                "interior {} bounds are not a tight union",
                id
            );
        } else {
            assert!(
                node.aabb.contains(&merged),
                "interior {} bounds don't contain its children",
                id
            );
        }

        self.assert_well_formed_recurse(node.left, tight, reachable, leaf_count);
        self.assert_well_formed_recurse(node.right, tight, reachable, leaf_count);
    }
}
