use nalgebra::{Point3, Vector3};

use crate::cap::{cap_polygon, dedup_boundary, fan_triangulation};
use crate::errors::ClipError;
use crate::float_types::Real;
use crate::plane::Plane;
use crate::triangle::{BoundaryVertex, ClippedTriangle, Triangle};

#[cfg(feature = "hashmap")]
use hashbrown::HashMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// An unindexed triangle list: every three consecutive positions form one
/// triangle.
///
/// The order of triangles carries no meaning; the order of the three vertices
/// within a triangle is its winding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleSoup {
    pub positions: Vec<Point3<Real>>,
}

/// Result of clipping a soup without capping: the kept geometry plus the raw
/// boundary vertices of the cut, for callers that do their own capping.
#[derive(Debug, Clone, Default)]
pub struct ClippedSoup {
    pub kept: TriangleSoup,
    pub boundary: Vec<BoundaryVertex>,
}

impl TriangleSoup {
    /// Create an empty soup.
    pub const fn new() -> Self {
        TriangleSoup {
            positions: Vec::new(),
        }
    }

    /// Build a soup from an existing position list.
    pub fn from_positions(positions: Vec<Point3<Real>>) -> Self {
        TriangleSoup { positions }
    }

    /// Build a soup by flattening a triangle list.
    pub fn from_triangles(triangles: &[Triangle]) -> Self {
        let mut positions = Vec::with_capacity(triangles.len() * 3);
        for triangle in triangles {
            positions.extend(triangle.vertices());
        }
        TriangleSoup { positions }
    }

    /// Reads an interleaved `x,y,z` scalar buffer, e.g. vertex-buffer
    /// contents. A trailing partial point is dropped.
    pub fn from_raw(raw: &[Real]) -> Self {
        let positions = raw
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
            .collect();
        TriangleSoup { positions }
    }

    /// Flattens the soup back into an interleaved `x,y,z` buffer.
    pub fn to_raw(&self) -> Vec<Real> {
        let mut raw = Vec::with_capacity(self.positions.len() * 3);
        for p in &self.positions {
            raw.extend([p.x, p.y, p.z]);
        }
        raw
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of whole triangles in the soup.
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Iterates the soup three positions at a time.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.positions
            .chunks_exact(3)
            .map(|v| Triangle::new(v[0], v[1], v[2]))
    }

    pub fn push_triangle(&mut self, triangle: &Triangle) {
        self.positions.extend(triangle.vertices());
    }

    /// Clips every triangle against `plane`, keeping the geometry on the
    /// negative side. The cut is left open; the returned boundary vertices
    /// describe it.
    ///
    /// A soup whose length is not a multiple of 3 violates the contract and
    /// yields an empty result.
    #[cfg(not(feature = "parallel"))]
    pub fn clip_plane(&self, plane: &Plane) -> ClippedSoup {
        if !self.has_whole_triangles() {
            return ClippedSoup::default();
        }

        let mut kept = Vec::new();
        let mut boundary = Vec::new();
        for triangle in self.triangles() {
            collect_clipped(triangle.clip_plane(plane), &mut kept, &mut boundary);
        }
        ClippedSoup {
            kept: TriangleSoup::from_triangles(&kept),
            boundary,
        }
    }

    /// Parallel version of the per-triangle clip.
    #[cfg(feature = "parallel")]
    pub fn clip_plane(&self, plane: &Plane) -> ClippedSoup {
        if !self.has_whole_triangles() {
            return ClippedSoup::default();
        }

        let outcomes: Vec<_> = self
            .positions
            .par_chunks_exact(3)
            .map(|v| Triangle::new(v[0], v[1], v[2]).clip_plane(plane))
            .collect();

        let mut kept = Vec::new();
        let mut boundary = Vec::new();
        for outcome in outcomes {
            collect_clipped(outcome, &mut kept, &mut boundary);
        }
        ClippedSoup {
            kept: TriangleSoup::from_triangles(&kept),
            boundary,
        }
    }

    /// Clips against `plane` and seals the cut with a fan-triangulated convex
    /// cap, so a closed input stays closed.
    ///
    /// Fewer than three distinct crossed edges cannot bound a polygon; the
    /// clipped geometry is then returned without a cap.
    ///
    /// # Example
    ///
    /// ```
    /// use nalgebra::{Point3, Vector3};
    /// use triclip::plane::Plane;
    /// use triclip::soup::TriangleSoup;
    ///
    /// let cube = TriangleSoup::cuboid(Point3::origin(), Vector3::new(0.5, 0.5, 0.5));
    /// let clipped = cube.clip_and_cap(&Plane::new(Vector3::z(), 0.0));
    /// assert!(clipped.positions.iter().all(|p| p.z <= 0.0));
    /// ```
    pub fn clip_and_cap(&self, plane: &Plane) -> TriangleSoup {
        let ClippedSoup { mut kept, boundary } = self.clip_plane(plane);
        let polygon = cap_polygon(dedup_boundary(boundary), &plane.normal);
        for triangle in fan_triangulation(&polygon) {
            kept.push_triangle(&triangle);
        }
        kept
    }

    /// Axis-aligned box around `center`, two triangles per face, outward
    /// normals with counter-clockwise winding viewed from outside.
    pub fn cuboid(center: Point3<Real>, half_extents: Vector3<Real>) -> TriangleSoup {
        let corner = |sx: Real, sy: Real, sz: Real| {
            Point3::new(
                center.x + sx * half_extents.x,
                center.y + sy * half_extents.y,
                center.z + sz * half_extents.z,
            )
        };

        let faces = [
            // bottom (-z)
            [
                corner(-1.0, -1.0, -1.0),
                corner(-1.0, 1.0, -1.0),
                corner(1.0, 1.0, -1.0),
                corner(1.0, -1.0, -1.0),
            ],
            // top (+z)
            [
                corner(-1.0, -1.0, 1.0),
                corner(1.0, -1.0, 1.0),
                corner(1.0, 1.0, 1.0),
                corner(-1.0, 1.0, 1.0),
            ],
            // front (-y)
            [
                corner(-1.0, -1.0, -1.0),
                corner(1.0, -1.0, -1.0),
                corner(1.0, -1.0, 1.0),
                corner(-1.0, -1.0, 1.0),
            ],
            // back (+y)
            [
                corner(-1.0, 1.0, -1.0),
                corner(-1.0, 1.0, 1.0),
                corner(1.0, 1.0, 1.0),
                corner(1.0, 1.0, -1.0),
            ],
            // left (-x)
            [
                corner(-1.0, -1.0, -1.0),
                corner(-1.0, -1.0, 1.0),
                corner(-1.0, 1.0, 1.0),
                corner(-1.0, 1.0, -1.0),
            ],
            // right (+x)
            [
                corner(1.0, -1.0, -1.0),
                corner(1.0, 1.0, -1.0),
                corner(1.0, 1.0, 1.0),
                corner(1.0, -1.0, 1.0),
            ],
        ];

        let mut soup = TriangleSoup::new();
        for [v0, v1, v2, v3] in faces {
            soup.positions.extend([v0, v1, v2, v0, v2, v3]);
        }
        soup
    }

    /// Whether every undirected edge is shared by exactly two triangles.
    ///
    /// Edge endpoints are quantized before hashing so intersection points
    /// that differ only by rounding still identify the same edge. A soup with
    /// a dangling triangle count is never watertight.
    #[cfg(feature = "hashmap")]
    pub fn is_watertight(&self) -> bool {
        if self.positions.len() % 3 != 0 {
            return false;
        }

        let mut edge_counts: HashMap<(EndKey, EndKey), u32> = HashMap::new();
        for triangle in self.triangles() {
            let v = triangle.vertices();
            for (i, j) in [(0, 1), (1, 2), (2, 0)] {
                let a = end_key(&v[i]);
                let b = end_key(&v[j]);
                let key = if a <= b { (a, b) } else { (b, a) };
                *edge_counts.entry(key).or_insert(0) += 1;
            }
        }
        edge_counts.values().all(|&count| count == 2)
    }

    fn has_whole_triangles(&self) -> bool {
        if self.positions.len() % 3 != 0 {
            log::warn!(
                "triangle soup length {} is not a multiple of 3, clipping nothing",
                self.positions.len()
            );
            return false;
        }
        true
    }
}

fn collect_clipped(
    outcome: Result<ClippedTriangle, ClipError>,
    kept: &mut Vec<Triangle>,
    boundary: &mut Vec<BoundaryVertex>,
) {
    match outcome {
        Ok(ClippedTriangle::Rejected) => {}
        Ok(ClippedTriangle::Accepted(triangle)) => kept.push(triangle),
        Ok(ClippedTriangle::Split {
            kept: fragments,
            boundary: vertices,
        }) => {
            kept.extend(fragments);
            boundary.extend(vertices);
        }
        // A split whose crossed edge is parallel to the plane has no usable
        // intersection point; the triangle is dropped.
        Err(error) => log::warn!("skipping triangle: {error}"),
    }
}

/// Endpoint rounded onto a grid for hashing.
#[cfg(feature = "hashmap")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct EndKey(i64, i64, i64);

#[cfg(feature = "hashmap")]
fn end_key(p: &Point3<Real>) -> EndKey {
    let quantize = |x: Real| (x * 1e8).round() as i64;
    EndKey(quantize(p.x), quantize(p.y), quantize(p.z))
}
