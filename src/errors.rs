use thiserror::Error;

/// Failures produced while clipping geometry against a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClipError {
    /// An edge classified as crossing the plane is numerically parallel to
    /// it, so no single intersection point exists.
    #[error("edge is numerically parallel to the clip plane")]
    DegenerateIntersection,
}
