pub use bvh_traverse::{Leaves, NodeCheck, NodeVisitor, TraversalAction};
pub use bvh_tree::{Bvh, BvhNode, BvhWorkspace, NULL_NODE};

mod bvh_insert;
mod bvh_morton_build;
mod bvh_queries;
mod bvh_refit;
mod bvh_traverse;
mod bvh_tree;
mod bvh_validation;
