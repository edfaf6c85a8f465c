//! Axis Aligned Bounding Box.

use crate::math::{Point, Real, Vector, DIM};
use na;

/// An Axis Aligned Bounding Box.
///
/// The box is stored as a center and a size; the corners are derived. Every
/// operation producing a new box recomposes these two fields, so an `Aabb` is
/// a plain immutable value.
///
/// The components of `size` must be non-negative and all coordinates must be
/// finite. This is a precondition on the caller and is not validated: the
/// behavior of the containing tree is undefined on NaN or negative sizes.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Aabb {
    /// The center of this AABB.
    pub center: Point<Real>,
    /// The edge lengths of this AABB along each axis.
    pub size: Vector<Real>,
}

impl Aabb {
    /// Creates a new AABB.
    ///
    /// # Arguments:
    ///   * `center` - position of the center of the box.
    ///   * `size` - edge lengths of the box. Each component must be non-negative.
    #[inline]
    pub fn new(center: Point<Real>, size: Vector<Real>) -> Aabb {
        Aabb { center, size }
    }

    /// Creates a new AABB from its center and its half-extents.
    #[inline]
    pub fn from_half_extents(center: Point<Real>, half_extents: Vector<Real>) -> Self {
        Self::new(center, half_extents * 2.0)
    }

    /// Creates a new AABB from the corners with the smallest and the highest
    /// coordinates.
    #[inline]
    pub fn from_corners(mins: Point<Real>, maxs: Point<Real>) -> Self {
        Self {
            center: na::center(&mins, &maxs),
            size: maxs - mins,
        }
    }

    /// The half extents of this AABB.
    #[inline]
    pub fn half_extents(&self) -> Vector<Real> {
        self.size * 0.5
    }

    /// The corner of this AABB with the smallest coordinates.
    #[inline]
    pub fn mins(&self) -> Point<Real> {
        self.center - self.half_extents()
    }

    /// The corner of this AABB with the highest coordinates.
    #[inline]
    pub fn maxs(&self) -> Point<Real> {
        self.center + self.half_extents()
    }

    /// The surface area of this AABB.
    ///
    /// This is the cost metric of the greedy descent performed at insertion
    /// time.
    #[inline]
    pub fn surface_area(&self) -> Real {
        let s = &self.size;
        2.0 * (s.x * s.y + s.y * s.z + s.z * s.x)
    }

    /// The smallest AABB containing both `self` and `other`.
    #[inline]
    pub fn merged(&self, other: &Aabb) -> Aabb {
        let mins = self.mins().coords.inf(&other.mins().coords);
        let maxs = self.maxs().coords.sup(&other.maxs().coords);
        Self::from_corners(mins.into(), maxs.into())
    }

    /// Checks if this AABB fully encloses `other`.
    ///
    /// Shared boundaries count as enclosed.
    #[inline]
    pub fn contains(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins(), &other.mins()) && na::partial_ge(&self.maxs(), &other.maxs())
    }

    /// Checks if this AABB intersects `other`.
    ///
    /// Mere contact (equal boundaries) counts as an intersection.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins(), &other.maxs()) && na::partial_ge(&self.maxs(), &other.mins())
    }

    /// Checks if this AABB contains the given point.
    #[inline]
    pub fn contains_local_point(&self, point: &Point<Real>) -> bool {
        let mins = self.mins();
        let maxs = self.maxs();

        for i in 0..DIM {
            if point[i] < mins[i] || point[i] > maxs[i] {
                return false;
            }
        }

        true
    }

    /// A version of this AABB enlarged by `amount` on each side.
    #[inline]
    pub fn loosened(&self, amount: Real) -> Aabb {
        Aabb {
            center: self.center,
            size: self.size + Vector::repeat(amount * 2.0),
        }
    }
}
