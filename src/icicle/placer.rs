//! Greedy placement of cones along one edge.
//!
//! The edge length is a budget. Each cone claims a span of `2 * radius`
//! centred on its placement point, so consecutive cones never overlap:
//!
//! ```text
//! start |--r--*--r--|----r'----*----r'----|--r''--*--r''--| ... end
//! ```
//!
//! Radii and depths are resampled after every attempt. An attempt whose cone
//! would overshoot the end of the edge is skipped but still counts against
//! `max_iterations`, which bounds the loop for any configuration. Running out
//! of iterations is flagged even when the last attempt happened to fill the edge.

use rand::Rng;
use serde::Serialize;

use super::config::IcicleConfig;
use super::edge::Edge;
use super::sampler::RandomSampler;
use crate::geom::Point3;

/// Resolved parameters of one cone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    /// Point on the edge where the base ring is centred.
    pub position: [f64; 3],
    pub radius: f64,
    pub depth: f64,
    /// Number of bend rings to insert.
    pub cuts: usize,
    /// Signed lateral offset applied to the first bend ring.
    pub perturbation: f64,
}

impl Placement {
    #[must_use]
    pub fn position(&self) -> Point3 {
        Point3::from(self.position)
    }

    /// Width of the span this cone occupies along the edge.
    #[must_use]
    pub fn footprint(&self) -> f64 {
        2.0 * self.radius
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacementOutcome {
    /// Placements in order from `edge.start` towards `edge.end`.
    pub placements: Vec<Placement>,
    /// Loop iterations actually run, never more than `max_iterations`.
    pub iterations: usize,
    /// The loop ran `max_iterations` times, whether or not the edge was full.
    pub iteration_cap_reached: bool,
}

/// Upper bound on bend rings for a cone of the given proportions.
///
/// Cones wider than they are deep get at most one ring; more would fold the
/// short sides into visibly broken geometry.
#[must_use]
pub fn max_cuts_for(radius: f64, depth: f64, max_subdivisions: usize) -> usize {
    if max_subdivisions == 0 {
        return 0;
    }
    if depth / radius < 1.0 {
        max_subdivisions.min(1)
    } else {
        max_subdivisions
    }
}

/// Places cones along `edge`.
///
/// `config` is expected to be sanitized. The cut count of every placement is
/// drawn uniformly from `[0, max_cuts_for(..)]`.
pub fn place_icicles<R: Rng>(
    edge: &Edge,
    config: &IcicleConfig,
    sampler: &mut RandomSampler<'_, R>,
) -> PlacementOutcome {
    let mut outcome = PlacementOutcome::default();

    let edge_length = edge.length();
    let min_span = 2.0 * config.min_radius;
    let mut consumed = 0.0;

    let mut radius = sampler.radius(config);
    let mut depth = sampler.depth(config);

    while consumed < edge_length && outcome.iterations < config.max_iterations {
        if edge_length - consumed < min_span {
            break;
        }

        if consumed + 2.0 * radius <= edge_length {
            consumed += radius;
            let position = edge.point_at(consumed / edge_length);
            consumed += radius;

            let max_cuts = max_cuts_for(radius, depth, config.max_subdivisions);
            let cuts = sampler.integer(0, max_cuts);
            let perturbation = sampler.perturbation(radius);

            outcome.placements.push(Placement {
                position: position.to_array(),
                radius,
                depth,
                cuts,
                perturbation,
            });
        }

        radius = sampler.radius(config);
        depth = sampler.depth(config);

        outcome.iterations += 1;
        if outcome.iterations >= config.max_iterations {
            outcome.iteration_cap_reached = true;
            break;
        }
    }

    log::debug!(
        "placed {} icicles over {:.4} of {:.4} in {} iterations",
        outcome.placements.len(),
        consumed,
        edge_length,
        outcome.iterations
    );

    outcome
}
