/*!
dbvt3d
======

**dbvt3d** is a 3-dimensional dynamic bounding volume hierarchy written with
the rust programming language.

The tree stores a mutable collection of axis-aligned bounding boxes, each
tagged with an opaque application identifier, and supports incremental
insertion and removal, hierarchical refitting, a Morton-ordered bottom-up
rebuild, and predicate-guided traversals usable for ray casts, frustum
culling and overlap queries. The tree never interprets geometry itself: it
only ever exposes bounds to caller-supplied predicates.

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod partitioning;
pub mod query;
pub mod utils;

/// Aliases for the mathematical types used throughout this crate.
pub mod math {
    /// The scalar type used throughout this crate.
    pub type Real = f32;

    /// The dimension of the space.
    pub const DIM: usize = 3;

    /// The point type.
    pub type Point<N> = crate::na::Point3<N>;

    /// The vector type.
    pub type Vector<N> = crate::na::Vector3<N>;
}
