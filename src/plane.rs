use nalgebra::{Point3, Vector3};

use crate::errors::ClipError;
use crate::float_types::{EPSILON, Real};

/// An oriented plane with equation `normal · p + offset = 0`.
///
/// The normal need not be unit length; scaling it scales signed distances but
/// not which side a point falls on. A point with positive signed distance is
/// outside the plane (discarded by clipping), negative is inside (kept), zero
/// is on the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vector3<Real>,
    pub offset: Real,
}

impl Plane {
    pub const fn new(normal: Vector3<Real>, offset: Real) -> Self {
        Plane { normal, offset }
    }

    /// Plane through `point` with the given `normal`.
    pub fn from_point_normal(point: Point3<Real>, normal: Vector3<Real>) -> Self {
        Plane {
            normal,
            offset: -normal.dot(&point.coords),
        }
    }

    /// The same plane with the kept half-space inverted.
    pub fn flipped(&self) -> Self {
        Plane {
            normal: -self.normal,
            offset: -self.offset,
        }
    }

    /// Signed distance of `p`, positive on the discarded side.
    pub fn signed_distance(&self, p: &Point3<Real>) -> Real {
        self.normal.dot(&p.coords) + self.offset
    }

    /// Signed distance with near-zero values snapped to exactly zero, so a
    /// vertex within rounding error of the plane classifies as on it instead
    /// of forcing a spurious split.
    pub fn snapped_distance(&self, p: &Point3<Real>) -> Real {
        let d = self.signed_distance(p);
        if d.abs() < 2.0 * EPSILON { 0.0 } else { d }
    }

    /// Intersection of the segment `from`–`to` with this plane, via the
    /// parametric form `t = (normal · from + offset) / normal · (from − to)`.
    ///
    /// Expects a segment whose endpoints straddle the plane. A segment
    /// numerically parallel to the plane has no single intersection point and
    /// yields [`ClipError::DegenerateIntersection`].
    pub fn segment_intersection(
        &self,
        from: &Point3<Real>,
        to: &Point3<Real>,
    ) -> Result<Point3<Real>, ClipError> {
        let denom = self.normal.dot(&(from - to));
        if denom.abs() < EPSILON {
            return Err(ClipError::DegenerateIntersection);
        }
        let t = self.signed_distance(from) / denom;
        Ok(from + (to - from) * t)
    }
}
