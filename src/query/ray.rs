//! Rays and the slab ray/AABB test.

use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector, DIM};

/// A ray starting at `origin` and propagating along `dir`.
///
/// `dir` does not need to be normalized; times of impact are expressed in
/// units of its length.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Ray {
    /// Starting point of the ray.
    pub origin: Point<Real>,
    /// Direction of propagation of the ray.
    pub dir: Vector<Real>,
}

impl Ray {
    /// Creates a new ray starting from `origin` and with the direction `dir`.
    #[inline]
    pub fn new(origin: Point<Real>, dir: Vector<Real>) -> Ray {
        Ray { origin, dir }
    }

    /// The point at parameter `t` along this ray.
    #[inline]
    pub fn point_at(&self, t: Real) -> Point<Real> {
        self.origin + self.dir * t
    }
}

impl Aabb {
    /// Casts `ray` on this AABB using the slab test.
    ///
    /// Returns the smallest non-negative time of impact not greater than
    /// `max_toi`, or `None` when the ray misses. A ray starting inside the
    /// box hits at time zero.
    pub fn cast_local_ray(&self, ray: &Ray, max_toi: Real) -> Option<Real> {
        let mins = self.mins();
        let maxs = self.maxs();
        let mut tmin: Real = 0.0;
        let mut tmax = max_toi;

        for i in 0..DIM {
            if ray.dir[i] == 0.0 {
                // Parallel to the slab: a hit requires the origin inside it.
                if ray.origin[i] < mins[i] || ray.origin[i] > maxs[i] {
                    return None;
                }
            } else {
                let inv = 1.0 / ray.dir[i];
                let mut t1 = (mins[i] - ray.origin[i]) * inv;
                let mut t2 = (maxs[i] - ray.origin[i]) * inv;

                if t1 > t2 {
                    core::mem::swap(&mut t1, &mut t2);
                }

                tmin = tmin.max(t1);
                tmax = tmax.min(t2);

                if tmin > tmax {
                    return None;
                }
            }
        }

        Some(tmin)
    }
}

#[cfg(test)]
mod test {
    use super::Ray;
    use crate::bounding_volume::Aabb;
    use crate::math::{Point, Real, Vector};
    use approx::assert_relative_eq;

    fn unit_box_at(x: Real, y: Real, z: Real) -> Aabb {
        Aabb::new(Point::new(x, y, z), Vector::repeat(1.0))
    }

    #[test]
    fn hits_box_straight_ahead() {
        let ray = Ray::new(Point::origin(), Vector::x());
        let toi = unit_box_at(5.0, 0.0, 0.0)
            .cast_local_ray(&ray, Real::MAX)
            .unwrap();
        assert_relative_eq!(toi, 4.5);
        assert_relative_eq!(ray.point_at(toi), Point::new(4.5, 0.0, 0.0));
    }

    #[test]
    fn misses_box_off_axis() {
        let ray = Ray::new(Point::origin(), Vector::x());
        assert_eq!(unit_box_at(5.0, 2.0, 0.0).cast_local_ray(&ray, Real::MAX), None);
    }

    #[test]
    fn ignores_box_behind_origin() {
        let ray = Ray::new(Point::origin(), Vector::x());
        assert_eq!(unit_box_at(-5.0, 0.0, 0.0).cast_local_ray(&ray, Real::MAX), None);
    }

    #[test]
    fn starting_inside_hits_at_zero() {
        let ray = Ray::new(Point::origin(), Vector::new(1.0, 1.0, 0.0));
        assert_eq!(
            unit_box_at(0.0, 0.0, 0.0).cast_local_ray(&ray, Real::MAX),
            Some(0.0)
        );
    }

    #[test]
    fn respects_max_toi() {
        let ray = Ray::new(Point::origin(), Vector::x());
        let aabb = unit_box_at(5.0, 0.0, 0.0);
        assert_eq!(aabb.cast_local_ray(&ray, 4.0), None);
        assert_eq!(aabb.cast_local_ray(&ray, 4.5), Some(4.5));
    }

    #[test]
    fn axis_parallel_ray_inside_slabs() {
        // Direction is zero along y and z; the origin sits inside both slabs.
        let ray = Ray::new(Point::new(-3.0, 0.2, -0.2), Vector::x());
        let toi = unit_box_at(0.0, 0.0, 0.0)
            .cast_local_ray(&ray, Real::MAX)
            .unwrap();
        assert_relative_eq!(toi, 2.5);
    }
}
