use crate::bounding_volume::Aabb;
use crate::math::{Point, Vector};
use crate::utils::hashmap::HashMap;
use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::hash::Hash;
use core::ops::{Index, IndexMut};
use log::debug;

/// The sentinel slot index denoting the absence of a node.
pub const NULL_NODE: u32 = u32::MAX;

/// The node pool capacity of a tree created with [`Bvh::new`].
const DEFAULT_CAPACITY: u32 = 16;

/// A node (interior or leaf) of a [`Bvh`].
///
/// A leaf carries the item it was inserted with and has no children. An
/// interior node has exactly two children, no item, and bounds enclosing its
/// children's. Nodes are addressed by stable `u32` slot indices into the
/// tree's pool; [`NULL_NODE`] denotes absence.
#[derive(Copy, Clone, Debug)]
pub struct BvhNode<T> {
    pub(super) aabb: Aabb,
    pub(super) parent: u32,
    pub(super) left: u32,
    pub(super) right: u32,
    pub(super) item: Option<T>,
}

impl<T: Copy> BvhNode<T> {
    // An unused slot. Also what freed slots are reset to.
    #[inline]
    pub(super) fn vacant() -> Self {
        Self {
            aabb: Aabb::new(Point::origin(), Vector::zeros()),
            parent: NULL_NODE,
            left: NULL_NODE,
            right: NULL_NODE,
            item: None,
        }
    }

    /// Initializes a leaf.
    #[inline]
    pub(super) fn leaf(aabb: Aabb, item: T) -> Self {
        Self {
            aabb,
            parent: NULL_NODE,
            left: NULL_NODE,
            right: NULL_NODE,
            item: Some(item),
        }
    }

    /// Is this node a leaf?
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.item.is_some()
    }

    /// If this node is a leaf, the item provided at insertion time.
    #[inline]
    pub fn item(&self) -> Option<T> {
        self.item
    }

    /// This node's AABB.
    ///
    /// For a leaf this is the caller-supplied box (possibly inflated by an
    /// insertion margin); for an interior node, a superset of the union of
    /// its children's boxes.
    #[inline]
    pub fn aabb(&self) -> Aabb {
        self.aabb
    }
}

/// A growable pool of node slots with stable indices.
///
/// Unused slots sit in a FIFO free-list, so freed slots are handed out again
/// before the pool grows. Growth doubles the slot array and never moves the
/// meaning of an existing index.
#[derive(Clone, Debug)]
pub(super) struct BvhNodePool<T> {
    pub(super) nodes: Vec<BvhNode<T>>,
    pub(super) free: VecDeque<u32>,
}

impl<T: Copy> BvhNodePool<T> {
    pub(super) fn with_capacity(capacity: u32) -> Self {
        let capacity = capacity.max(1);
        Self {
            nodes: (0..capacity).map(|_| BvhNode::vacant()).collect(),
            free: (0..capacity).collect(),
        }
    }

    /// The number of slots currently owned by the pool, free or not.
    #[inline]
    pub(super) fn capacity(&self) -> u32 {
        self.nodes.len() as u32
    }

    /// Takes any free slot, doubling the pool if none is left.
    ///
    /// The returned slot is vacant; the caller fully initializes it.
    pub(super) fn allocate(&mut self) -> u32 {
        if let Some(id) = self.free.pop_front() {
            return id;
        }

        let old_capacity = self.nodes.len() as u32;
        debug!(
            "growing BVH node pool from {} to {} slots",
            old_capacity,
            old_capacity * 2
        );
        self.nodes.extend((0..old_capacity).map(|_| BvhNode::vacant()));
        self.free.extend(old_capacity + 1..old_capacity * 2);
        old_capacity
    }

    /// Returns a slot to the free-list.
    #[inline]
    pub(super) fn free(&mut self, id: u32) {
        self.nodes[id as usize] = BvhNode::vacant();
        self.free.push_back(id);
    }

    /// Is the slot currently on the free-list?
    ///
    /// Only meaningful between a `free` and the next `allocate`, which is
    /// exactly how the bottom-up teardown uses it.
    #[inline]
    pub(super) fn is_vacant(&self, id: u32) -> bool {
        let node = &self.nodes[id as usize];
        node.item.is_none() && node.left == NULL_NODE
    }
}

impl<T> Index<u32> for BvhNodePool<T> {
    type Output = BvhNode<T>;

    #[inline]
    fn index(&self, index: u32) -> &Self::Output {
        &self.nodes[index as usize]
    }
}

impl<T> IndexMut<u32> for BvhNodePool<T> {
    #[inline]
    fn index_mut(&mut self, index: u32) -> &mut Self::Output {
        &mut self.nodes[index as usize]
    }
}

/// Workspace data for the bottom-up rebuild.
///
/// This is all temporary data that can be freed at any time without affecting
/// results. It is owned by the tree and reused across rebuilds so the hot
/// path stops allocating once the buffers reach their high-water mark.
#[derive(Clone, Debug, Default)]
pub struct BvhWorkspace {
    pub(super) rebuild_leaves: Vec<u32>,
    pub(super) rebuild_queue: VecDeque<u32>,
}

/// A dynamic bounding volume hierarchy for spatial indexing of 3D AABBs.
///
/// Each tracked item maps to exactly one leaf. Mutations keep the tree valid
/// but not optimal: insertions place leaves with a greedy surface-area
/// descent and no rebalancing happens on edits, so quality can degrade under
/// adversarial insertion orders. [`Bvh::bottom_up`] rebuilds the whole
/// hierarchy along a Morton curve and is the remedy.
///
/// A tree is exclusively owned by its caller; it is not thread-safe and no
/// operation may mutate it re-entrantly from a traversal callback (enforced
/// by the borrow rules).
#[derive(Clone, Debug)]
pub struct Bvh<T> {
    pub(super) pool: BvhNodePool<T>,
    pub(super) root: u32,
    pub(super) leaf_indices: HashMap<T, u32>,
    pub(super) workspace: BvhWorkspace,
}

impl<T: Copy + Eq + Hash> Default for Bvh<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Eq + Hash> Bvh<T> {
    /// An empty tree with a default initial pool capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// An empty tree whose pool starts with `capacity` slots.
    ///
    /// A capacity of zero is rounded up to one.
    pub fn with_capacity(capacity: u32) -> Self {
        Self {
            pool: BvhNodePool::with_capacity(capacity),
            root: NULL_NODE,
            leaf_indices: HashMap::default(),
            workspace: BvhWorkspace::default(),
        }
    }

    /// The number of node slots currently owned by the pool.
    ///
    /// Grows by doubling when an insertion finds no free slot; never shrinks.
    pub fn capacity(&self) -> u32 {
        self.pool.capacity()
    }

    /// The number of items tracked by this tree.
    pub fn len(&self) -> usize {
        self.leaf_indices.len()
    }

    /// Does this tree not contain any leaf?
    pub fn is_empty(&self) -> bool {
        self.leaf_indices.is_empty()
    }

    /// The AABB bounding everything contained by this tree, or `None` if it
    /// is empty.
    ///
    /// After incremental removals this can be looser than the tight bound of
    /// the remaining leaves.
    pub fn root_aabb(&self) -> Option<Aabb> {
        (self.root != NULL_NODE).then(|| self.pool[self.root].aabb)
    }

    /// The AABB currently stored for `item`'s leaf, or `None` if `item` is
    /// not tracked.
    ///
    /// This is the box provided at insertion time, possibly inflated by the
    /// insertion margin.
    pub fn leaf_aabb(&self, item: T) -> Option<Aabb> {
        let id = self.leaf_indices.get(&item)?;
        Some(self.pool[*id].aabb)
    }

    /// The number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> u32 {
        self.subtree_depth(self.root)
    }

    fn subtree_depth(&self, id: u32) -> u32 {
        if id == NULL_NODE {
            return 0;
        }

        let node = &self.pool[id];
        if node.is_leaf() {
            1
        } else {
            1 + self
                .subtree_depth(node.left)
                .max(self.subtree_depth(node.right))
        }
    }

    /// Removes `item` from this tree.
    ///
    /// Returns `false` and leaves the tree unchanged if `item` is not
    /// tracked. Otherwise the leaf's parent is spliced out: the sibling takes
    /// the parent's place (becoming the root if the parent was the root), and
    /// both the parent and the leaf slots go back to the pool.
    ///
    /// No refit happens: the surviving subtree's bounds are unchanged, so
    /// every ancestor keeps being a valid (if loose) superset.
    pub fn remove(&mut self, item: T) -> bool {
        let Some(leaf) = self.leaf_indices.remove(&item) else {
            return false;
        };

        let parent = self.pool[leaf].parent;

        if parent == NULL_NODE {
            // The leaf was the root.
            self.root = NULL_NODE;
            self.pool.free(leaf);
            return true;
        }

        let parent_node = self.pool[parent];
        let sibling = if parent_node.left == leaf {
            parent_node.right
        } else {
            parent_node.left
        };
        let grandparent = parent_node.parent;

        self.pool[sibling].parent = grandparent;
        if grandparent == NULL_NODE {
            self.root = sibling;
        } else if self.pool[grandparent].left == parent {
            self.pool[grandparent].left = sibling;
        } else {
            self.pool[grandparent].right = sibling;
        }

        self.pool.free(parent);
        self.pool.free(leaf);
        true
    }
}
