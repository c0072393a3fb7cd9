use thiserror::Error;

use crate::geometry::GeometryKind;

// ── Errors ────────────────────────────────────────────────────────────

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapError {
    /// The viewport scale would become zero, negative or non-finite.
    #[error("Invalid viewport scale {scale}: must be finite and greater than zero")]
    InvalidTransformState { scale: f64 },

    #[error("Invalid zoom ratio {ratio}: must be finite and greater than zero")]
    InvalidZoomRatio { ratio: f64 },

    #[error("Layer index {index} out of range for {len} layer(s)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Cannot draw {kind} with {actual} vertex(es), at least {required} required")]
    EmptyGeometry {
        kind: GeometryKind,
        required: usize,
        actual: usize,
    },
}

pub type Result<T> = std::result::Result<T, MapError>;

/// Accept a value usable as a viewport scale.
pub(crate) fn check_scale(scale: f64) -> Result<f64> {
    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(MapError::InvalidTransformState { scale })
    }
}

/// Fail with `EmptyGeometry` when `actual` vertices are fewer than `kind` needs.
pub(crate) fn check_vertices(kind: GeometryKind, actual: usize) -> Result<()> {
    let required = kind.min_vertices();
    if actual < required {
        return Err(MapError::EmptyGeometry {
            kind,
            required,
            actual,
        });
    }
    Ok(())
}
