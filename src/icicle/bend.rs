//! Kinks along the body of a cone.
//!
//! The side edges of a cone are split into `cuts + 1` segments, which yields
//! `cuts` horizontal rings of new vertices. Rings are visited from the base
//! towards the tip and each one is shifted sideways by the current offset,
//! after which the offset shrinks:
//!
//! ```text
//! offset[t + 1] = offset[t] * U(0, 1) * |(1 - t) / cuts|
//! ```
//!
//! The first ring carries the full perturbation of the placement, so the kink
//! is strongest near the base and the cone straightens out towards its tip.

use rand::Rng;

use super::builder::ConeGeometry;
use super::placer::Placement;
use super::sampler::RandomSampler;
use crate::geom::{EdgeKey, PolyMesh, Tolerance, Vec3};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BendReport {
    /// Rings that were translated.
    pub rings: usize,
    /// Offset applied to each ring, base first.
    pub offsets: Vec<f64>,
}

/// Edges whose endpoints differ in height by more than
/// [`Tolerance::VERTICAL_EDGE`]. On a cone these are the ring-to-apex sides.
#[must_use]
pub fn vertical_edges(mesh: &PolyMesh) -> Vec<EdgeKey> {
    mesh.edges()
        .into_iter()
        .filter(|&(a, b)| (mesh.point(a).z - mesh.point(b).z).abs() > Tolerance::VERTICAL_EDGE.eps)
        .collect()
}

/// Subdivides and perturbs `geometry` in place. No-op when `placement.cuts`
/// is zero or the cone is too flat to have vertical edges.
pub fn apply_bend<R: Rng>(
    geometry: &mut ConeGeometry,
    placement: &Placement,
    sampler: &mut RandomSampler<'_, R>,
) -> BendReport {
    let mut report = BendReport::default();
    let cuts = placement.cuts;
    if cuts == 0 {
        return report;
    }

    let sides = vertical_edges(&geometry.mesh);
    if sides.is_empty() {
        return report;
    }
    let split = geometry.mesh.subdivide_edges(&sides, cuts);

    // Sort key grows from the base towards the apex for either direction.
    let toward_apex = geometry.direction.sign();
    let mut heights: Vec<(u32, f64)> = split
        .new_vertices
        .iter()
        .map(|&v| (v, geometry.mesh.point(v).z))
        .collect();
    heights.sort_by(|a, b| (a.1 * toward_apex).total_cmp(&(b.1 * toward_apex)));

    let spacing = placement.depth / (cuts + 1) as f64;
    let band = Tolerance::RING_BAND.eps.min(spacing * 0.5);

    let mut offset = placement.perturbation;
    let mut remaining = heights.as_slice();
    for t in 0..cuts {
        let Some(&(_, reference)) = remaining.first() else {
            break;
        };
        let ring_len = remaining
            .iter()
            .take_while(|(_, z)| (z - reference).abs() < band)
            .count();
        let (ring, rest) = remaining.split_at(ring_len);
        let ids: Vec<u32> = ring.iter().map(|(v, _)| *v).collect();

        geometry
            .mesh
            .translate_vertices(&ids, Vec3::new(offset, offset, 0.0));
        report.rings += 1;
        report.offsets.push(offset);

        remaining = rest;
        offset *= sampler.unit() * ((1.0 - t as f64) / cuts as f64).abs();
    }

    report
}
