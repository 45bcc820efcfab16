//! Bounding silhouettes for a viewport preview.
//!
//! A preview draws, for every edge that would receive icicles, the outline of
//! the smallest and the largest cone the current settings allow. Nothing is
//! placed or sampled here; the outlines only visualise the configured ranges.

use serde::Serialize;

use super::config::IcicleConfig;
use super::edge::{Edge, EdgeId, EdgeInput};
use crate::geom::{Point3, Tolerance, Vec3};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewSilhouette {
    pub edge: EdgeId,
    /// Open polyline: one side of the ring, the tip, the other side.
    pub min_outline: [[f64; 3]; 3],
    pub max_outline: [[f64; 3]; 3],
}

/// Outline through `mid + radius/2*dir`, the tip and `mid - radius/2*dir`.
///
/// The half-width is half the radius, which is how the viewport overlay has
/// always drawn it.
#[must_use]
pub fn cone_outline(mid: Point3, dir: Vec3, radius: f64, depth: f64, sign: f64) -> [[f64; 3]; 3] {
    let half = dir * (radius / 2.0);
    [
        (mid + half).to_array(),
        (mid + Vec3::Z * (sign * depth)).to_array(),
        (mid - half).to_array(),
    ]
}

/// Silhouettes for every edge of the working set that is not vertical.
///
/// Malformed and vertical edges are left out; short edges are kept so the
/// user can see why nothing would fit.
#[must_use]
pub fn preview_silhouettes(edges: &[EdgeInput], config: &IcicleConfig) -> Vec<PreviewSilhouette> {
    let config = config.sanitized();
    let sign = config.direction.sign();

    edges
        .iter()
        .filter(|input| !config.only_selected_edges || input.selected)
        .filter_map(|input| {
            let edge = Edge::try_from(input).ok()?;
            if Tolerance::PROJECTION.is_zero_length(edge.horizontal_length()) {
                return None;
            }
            let dir = edge.vector().normalized()?;
            let mid = edge.midpoint();
            Some(PreviewSilhouette {
                edge: input.id,
                min_outline: cone_outline(mid, dir, config.min_radius, config.min_depth, sign),
                max_outline: cone_outline(mid, dir, config.max_radius, config.max_depth, sign),
            })
        })
        .collect()
}
