//! Drives the pipeline over a set of edges.
//!
//! Every edge is independent: it is validated, filtered, placed, built and
//! bent on its own and yields its own [`EdgeResult`]. Results are merged in
//! input order, so a single bad edge only shows up in the diagnostics and
//! never stops the batch.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::bend::apply_bend;
use super::builder::{ConeGeometry, build_cone};
use super::config::IcicleConfig;
use super::diagnostics::RunDiagnostics;
use super::edge::{Edge, EdgeInput};
use super::eligibility::check_eligibility;
use super::host::MeshHost;
use super::placer::place_icicles;
use super::sampler::RandomSampler;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOutcome {
    pub cones: Vec<ConeGeometry>,
    pub diagnostics: RunDiagnostics,
}

/// Output of a single edge before merging.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeResult {
    pub cones: Vec<ConeGeometry>,
    pub diagnostics: RunDiagnostics,
}

/// Runs the whole edge set through one shared generator, in input order.
pub fn run<R: Rng>(edges: &[EdgeInput], config: &IcicleConfig, rng: &mut R) -> RunOutcome {
    let config = config.sanitized();
    let results = working_set(edges, &config)
        .map(|input| process_edge(input, &config, rng))
        .collect();
    finish(results)
}

/// Like [`run`] but each edge draws from its own generator derived from
/// `seed` and the edge's position in the working set.
///
/// Output does not depend on scheduling, which is what lets the `parallel`
/// feature spread edges over a thread pool.
#[must_use]
pub fn run_seeded(edges: &[EdgeInput], config: &IcicleConfig, seed: u64) -> RunOutcome {
    let config = config.sanitized();
    let work: Vec<(usize, &EdgeInput)> = working_set(edges, &config).enumerate().collect();

    let seeded = |(index, input): (usize, &EdgeInput)| {
        let mut rng = StdRng::seed_from_u64(edge_seed(seed, index));
        process_edge(input, &config, &mut rng)
    };

    #[cfg(feature = "parallel")]
    let results: Vec<EdgeResult> = {
        use rayon::prelude::*;
        work.into_par_iter().map(seeded).collect()
    };
    #[cfg(not(feature = "parallel"))]
    let results: Vec<EdgeResult> = work.into_iter().map(seeded).collect();

    finish(results)
}

/// Reads edges from `host`, generates icicles, inserts them, then settles
/// the host selection: back to the original edges when
/// `reselect_base_after` is set, otherwise on the new icicles.
pub fn run_on_host<H: MeshHost, R: Rng>(
    host: &mut H,
    config: &IcicleConfig,
    rng: &mut R,
) -> RunDiagnostics {
    let original_selection = host.selected_edges();
    let edges = host.working_edges(config.only_selected_edges);
    let outcome = run(&edges, config, rng);

    let mut inserted = Vec::new();
    for cone in outcome.cones {
        inserted.extend(host.insert_cone(cone));
    }

    host.deselect_all();
    if config.reselect_base_after {
        host.select_edges(&original_selection);
    } else {
        host.select_edges(&inserted);
    }

    outcome.diagnostics
}

/// Generates the cones for one edge.
pub fn process_edge<R: Rng>(input: &EdgeInput, config: &IcicleConfig, rng: &mut R) -> EdgeResult {
    let mut result = EdgeResult::default();
    result.diagnostics.edges_considered = 1;

    let edge = match Edge::try_from(input) {
        Ok(edge) => edge,
        Err(err) => {
            log::warn!("skipping edge: {err}");
            result.diagnostics.skipped_malformed = 1;
            result.diagnostics.add_warning(err.to_string());
            return result;
        }
    };

    if let Err(reason) = check_eligibility(&edge, config.min_radius) {
        log::debug!("edge {} not eligible: {reason:?}", input.id);
        result.diagnostics.record_skip(reason);
        return result;
    }

    let mut sampler = RandomSampler::new(rng);
    let outcome = place_icicles(&edge, config, &mut sampler);
    result.diagnostics.edges_processed = 1;
    if outcome.iteration_cap_reached {
        result.diagnostics.record_iteration_cap();
    }

    for placement in &outcome.placements {
        let mut cone = build_cone(placement, config);
        let bend = apply_bend(&mut cone, placement, &mut sampler);
        result.diagnostics.bend_ring_count += bend.rings;
        result.cones.push(cone);
    }
    result.diagnostics.icicle_count = result.cones.len();

    result
}

fn working_set<'a>(
    edges: &'a [EdgeInput],
    config: &IcicleConfig,
) -> impl Iterator<Item = &'a EdgeInput> {
    let only_selected = config.only_selected_edges;
    edges.iter().filter(move |e| !only_selected || e.selected)
}

fn finish(results: Vec<EdgeResult>) -> RunOutcome {
    let mut outcome = RunOutcome::default();
    for result in results {
        outcome.cones.extend(result.cones);
        outcome.diagnostics.merge(&result.diagnostics);
    }
    log::info!("icicle run finished: {}", outcome.diagnostics.summary());
    for line in outcome.diagnostics.report_lines() {
        log::info!("{line}");
    }
    outcome
}

/// SplitMix64 step over `seed + index`, so neighbouring edges get unrelated
/// streams.
fn edge_seed(seed: u64, index: usize) -> u64 {
    let mut z = seed.wrapping_add((index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
