//! Reconstruction of the polygon that seals the cut left by a clip.
//!
//! Splitting the triangles of a closed solid against a plane leaves an open
//! convex hole in the surface. The intersection points produced by the splits
//! are scattered; this module deduplicates them, orders them by angle around
//! their centroid and fan-triangulates the result.

use nalgebra::{Point3, Vector3};

use crate::float_types::{EPSILON, Real};
use crate::triangle::{BoundaryVertex, Triangle};

/// Reduces the boundary vertices of a clip to one point per crossed source
/// edge.
///
/// Both triangles sharing a crossed edge report an intersection for it; the
/// duplicates are collapsed by sorting on the edge key and keeping the first
/// of each run. The key order also fixes which vertex anchors the polygon
/// ordering afterwards.
pub fn dedup_boundary(mut boundary: Vec<BoundaryVertex>) -> Vec<Point3<Real>> {
    boundary.sort_unstable_by(|u, v| u.edge.cmp_key(&v.edge));
    boundary.dedup_by(|u, v| u.edge == v.edge);
    boundary.into_iter().map(|v| v.position).collect()
}

/// Orders the deduplicated boundary vertices into a convex polygon.
///
/// Each vertex is sorted by its angle around the centroid, measured in the
/// plane with the given normal against the centroid-to-first-vertex
/// direction. Descending angle keeps the cap winding consistent with the
/// normal. Fewer than three vertices cannot bound a polygon and yield an
/// empty result.
pub fn cap_polygon(points: Vec<Point3<Real>>, normal: &Vector3<Real>) -> Vec<Point3<Real>> {
    if points.len() < 3 {
        return Vec::new();
    }

    let center = centroid(&points);
    let Some(reference) = (points[0] - center).try_normalize(EPSILON) else {
        return Vec::new();
    };

    let mut angled: Vec<(Real, Point3<Real>)> = points
        .into_iter()
        .map(|p| {
            let v = (p - center).normalize();
            let cos = reference.dot(&v);
            let sin = v.cross(&reference).dot(normal);
            (sin.atan2(cos), p)
        })
        .collect();
    angled.sort_unstable_by(|(i, _), (j, _)| j.total_cmp(i));
    angled.into_iter().map(|(_, p)| p).collect()
}

/// Fan-triangulates a convex polygon from its first vertex.
pub fn fan_triangulation(polygon: &[Point3<Real>]) -> Vec<Triangle> {
    (2..polygon.len())
        .map(|i| Triangle::new(polygon[0], polygon[i - 1], polygon[i]))
        .collect()
}

fn centroid(points: &[Point3<Real>]) -> Point3<Real> {
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Point3::from(sum / points.len() as Real)
}
