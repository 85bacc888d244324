use std::cmp::Ordering;

use nalgebra::Point3;

use crate::errors::ClipError;
use crate::float_types::Real;
use crate::plane::Plane;

/// A single triangle. The vertex order defines its winding and is preserved
/// whenever the triangle survives a clip un-split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Point3<Real>,
    pub b: Point3<Real>,
    pub c: Point3<Real>,
}

/// Identity of a soup edge, independent of traversal direction.
///
/// Endpoints are stored in lexicographic order so the same edge seen from the
/// two triangles sharing it compares equal. Neighboring triangles hold copies
/// of identical coordinates, which makes this an exact key even where the raw
/// intersection coordinates drift by an ulp between neighbors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceEdge {
    lo: Point3<Real>,
    hi: Point3<Real>,
}

impl SourceEdge {
    /// Canonical key for the undirected edge `p`–`q`.
    pub fn new(p: Point3<Real>, q: Point3<Real>) -> Self {
        match cmp_points(&p, &q) {
            Ordering::Greater => SourceEdge { lo: q, hi: p },
            _ => SourceEdge { lo: p, hi: q },
        }
    }

    /// The edge endpoints, lexicographically ordered.
    pub fn endpoints(&self) -> (Point3<Real>, Point3<Real>) {
        (self.lo, self.hi)
    }

    pub(crate) fn cmp_key(&self, other: &Self) -> Ordering {
        cmp_points(&self.lo, &other.lo).then_with(|| cmp_points(&self.hi, &other.hi))
    }
}

/// Lexicographic order on x, then y, then z.
fn cmp_points(p: &Point3<Real>, q: &Point3<Real>) -> Ordering {
    p.x.total_cmp(&q.x)
        .then_with(|| p.y.total_cmp(&q.y))
        .then_with(|| p.z.total_cmp(&q.z))
}

/// An intersection point created by splitting a triangle, tagged with the
/// edge it lies on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryVertex {
    pub edge: SourceEdge,
    pub position: Point3<Real>,
}

/// Outcome of clipping one triangle against a plane.
#[derive(Debug, Clone, PartialEq)]
pub enum ClippedTriangle {
    /// Entirely on the discarded side, touching vertices included.
    Rejected,
    /// Entirely on the kept side; passed through unchanged.
    Accepted(Triangle),
    /// Straddled the plane: one or two kept fragments plus the two new
    /// intersection points on the cut.
    Split {
        kept: Vec<Triangle>,
        boundary: [BoundaryVertex; 2],
    },
}

impl Triangle {
    pub const fn new(a: Point3<Real>, b: Point3<Real>, c: Point3<Real>) -> Self {
        Triangle { a, b, c }
    }

    /// The three vertices in winding order.
    pub fn vertices(&self) -> [Point3<Real>; 3] {
        [self.a, self.b, self.c]
    }

    /// Cyclic rotation that moves vertex `index` into the `c` slot while
    /// preserving winding.
    fn rotated(&self, index: usize) -> Triangle {
        let v = self.vertices();
        Triangle::new(v[(index + 1) % 3], v[(index + 2) % 3], v[index])
    }

    /// Clips this triangle against `plane`, keeping the part on the negative
    /// side.
    ///
    /// A triangle that straddles the plane is reduced to one canonical case:
    ///
    /// ```text
    ///            c
    ///           o          The vertex alone on its side of the plane is
    ///          / \         rotated into the `c` slot, so the clip plane
    /// plane ---------      always crosses the edges `a-c` and `b-c`.
    ///        /     \
    ///       o-------o
    ///      a         b
    /// ```
    ///
    /// Degenerate (zero-area) triangles are not special-cased and may produce
    /// degenerate fragments.
    pub fn clip_plane(&self, plane: &Plane) -> Result<ClippedTriangle, ClipError> {
        let f = self.vertices().map(|v| plane.snapped_distance(&v));

        if f.iter().all(|&d| d >= 0.0) {
            return Ok(ClippedTriangle::Rejected);
        }
        if f.iter().all(|&d| d <= 0.0) {
            return Ok(ClippedTriangle::Accepted(*self));
        }

        // A non-negative product means those two distances share a sign,
        // leaving the remaining vertex isolated on the other side.
        let lone = if f[0] * f[2] >= 0.0 {
            1
        } else if f[1] * f[2] >= 0.0 {
            0
        } else {
            2
        };
        let tri = self.rotated(lone);

        let hit_a = plane.segment_intersection(&tri.a, &tri.c)?;
        let hit_b = plane.segment_intersection(&tri.b, &tri.c)?;

        let kept = if f[lone] >= 0.0 {
            // Isolated vertex outside: the kept quadrilateral a,b,B,A.
            vec![
                Triangle::new(tri.a, tri.b, hit_a),
                Triangle::new(tri.b, hit_b, hit_a),
            ]
        } else {
            // Isolated vertex inside: only the tip survives.
            vec![Triangle::new(hit_a, hit_b, tri.c)]
        };

        Ok(ClippedTriangle::Split {
            kept,
            boundary: [
                BoundaryVertex {
                    edge: SourceEdge::new(tri.a, tri.c),
                    position: hit_a,
                },
                BoundaryVertex {
                    edge: SourceEdge::new(tri.b, tri.c),
                    position: hit_b,
                },
            ],
        })
    }
}
