use serde::Serialize;

use super::edge::Edge;
use crate::geom::Tolerance;

/// Why an edge cannot host icicles. Not an error: skips are expected and
/// only reported in aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    /// The ground-plane span cannot fit one minimum-radius cone.
    TooShort,
    /// The edge is vertical: its projection collapses to a point.
    DegenerateProjection,
}

/// Classifies `edge` for a run whose smallest cone radius is `min_radius`.
///
/// Vertical edges are reported as [`SkipReason::DegenerateProjection`] even
/// though they are also too short in projection.
pub fn check_eligibility(edge: &Edge, min_radius: f64) -> Result<(), SkipReason> {
    let projected = edge.horizontal_length();
    if Tolerance::PROJECTION.is_zero_length(projected) {
        return Err(SkipReason::DegenerateProjection);
    }
    if projected <= 2.0 * min_radius {
        return Err(SkipReason::TooShort);
    }
    Ok(())
}

#[must_use]
pub fn is_eligible(edge: &Edge, min_radius: f64) -> bool {
    check_eligibility(edge, min_radius).is_ok()
}
