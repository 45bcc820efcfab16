//! Icicle generation along mesh edges.
//!
//! Pipeline per edge:
//!
//! 1. [`check_eligibility`] rejects vertical and too-short edges.
//! 2. [`place_icicles`] walks the edge length and resolves [`Placement`]s.
//! 3. [`build_cone`] turns each placement into [`ConeGeometry`].
//! 4. [`apply_bend`] subdivides the cone and kinks it sideways.
//!
//! [`run`], [`run_seeded`] and [`run_on_host`] drive that over many edges and
//! fold per-edge results into one [`RunDiagnostics`].
//!
//! # Example
//!
//! ```
//! use icicle_engine::geom::Point3;
//! use icicle_engine::icicle::{EdgeInput, IcicleConfig, run_seeded};
//!
//! let edges = vec![EdgeInput::new(0, Point3::new(0.0, 0.0, 2.0), Point3::new(3.0, 0.0, 2.0))];
//! let outcome = run_seeded(&edges, &IcicleConfig::default(), 7);
//! assert!(outcome.diagnostics.icicle_count > 0);
//! ```

mod bend;
mod builder;
mod config;
mod diagnostics;
mod edge;
mod eligibility;
mod host;
mod placer;
mod preview;
mod run;
mod sampler;

pub use bend::{BendReport, apply_bend, vertical_edges};
pub use builder::{ConeGeometry, build_cone};
pub use config::{CapStyle, ConfigError, Direction, IcicleConfig};
pub use diagnostics::RunDiagnostics;
pub use edge::{Edge, EdgeError, EdgeId, EdgeInput};
pub use eligibility::{SkipReason, check_eligibility, is_eligible};
pub use host::{EditMesh, MeshHost};
pub use placer::{Placement, PlacementOutcome, max_cuts_for, place_icicles};
pub use preview::{PreviewSilhouette, cone_outline, preview_silhouettes};
pub use run::{EdgeResult, RunOutcome, process_edge, run, run_on_host, run_seeded};
pub use sampler::RandomSampler;

#[cfg(test)]
mod tests;
