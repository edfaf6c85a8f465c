//! Spatial partitioning tools.

pub use self::bvh::{
    Bvh, BvhNode, BvhWorkspace, Leaves, NodeCheck, NodeVisitor, TraversalAction, NULL_NODE,
};

mod bvh;
