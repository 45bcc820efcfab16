//! Generation parameters.
//!
//! `IcicleConfig` is what a settings panel edits and what the CLI and wasm
//! front ends deserialize. Values coming from outside are not trusted:
//! [`IcicleConfig::sanitized`] repairs them before a run instead of failing.

use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// How the open base ring of a cone is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CapStyle {
    /// Leave the ring open.
    #[serde(alias = "NOTHING", alias = "none")]
    None,
    /// One n-gon face.
    #[default]
    #[serde(alias = "NGON", alias = "ngon")]
    NGon,
    /// `n` triangles meeting at the ring centroid.
    #[serde(alias = "TRIFAN", alias = "triangleFan")]
    TriangleFan,
}

/// Which way the cone tip points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[serde(alias = "up")]
    Up,
    #[default]
    #[serde(alias = "down")]
    Down,
}

impl Direction {
    /// `+1.0` for `Up`, `-1.0` for `Down`.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Up => 1.0,
            Self::Down => -1.0,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IcicleConfig {
    pub min_radius: f64,
    pub max_radius: f64,
    /// Depth is the cone height from ring to tip.
    pub min_depth: f64,
    pub max_depth: f64,
    pub base_vertex_count: usize,
    /// Upper bound on bend rings per cone; `0` disables bending.
    pub max_subdivisions: usize,
    /// Placement attempts per edge before giving up.
    pub max_iterations: usize,
    pub cap_style: CapStyle,
    pub direction: Direction,
    pub only_selected_edges: bool,
    pub reselect_base_after: bool,
}

impl Default for IcicleConfig {
    fn default() -> Self {
        Self {
            min_radius: Self::DEFAULT_MIN_RADIUS,
            max_radius: Self::DEFAULT_MAX_RADIUS,
            min_depth: 1.5,
            max_depth: 2.0,
            base_vertex_count: 8,
            max_subdivisions: 3,
            max_iterations: 50,
            cap_style: CapStyle::NGon,
            direction: Direction::Down,
            only_selected_edges: true,
            reselect_base_after: true,
        }
    }
}

impl IcicleConfig {
    pub const DEFAULT_MIN_RADIUS: f64 = 0.025;
    pub const DEFAULT_MAX_RADIUS: f64 = 0.15;
    /// Accepted radius range, both bounds.
    pub const RADIUS_LIMITS: RangeInclusive<f64> = 0.01..=1.0;
    /// Accepted depth range, both bounds.
    pub const DEPTH_LIMITS: RangeInclusive<f64> = 0.0..=2.0;
    pub const MIN_BASE_VERTICES: usize = 3;
    pub const MAX_BASE_VERTICES: usize = 24;
    pub const MAX_SUBDIVISIONS: usize = 8;
    pub const MAX_ITERATIONS: usize = 100;

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Returns a copy that is safe to run with.
    ///
    /// - radii must be finite and positive, otherwise the default is used;
    ///   they are then clamped to [`Self::RADIUS_LIMITS`]
    /// - depths must be finite, negatives become 0, and they are clamped to
    ///   [`Self::DEPTH_LIMITS`]
    /// - an inverted range raises the max to the min
    /// - vertex count is clamped to `3..=24`, subdivisions to `0..=8` and the
    ///   iteration cap to `1..=100`
    ///
    /// Every correction is logged at `warn` level.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let mut cfg = self.clone();

        cfg.min_radius = positive_or(cfg.min_radius, Self::DEFAULT_MIN_RADIUS, "minRadius");
        cfg.max_radius = positive_or(cfg.max_radius, Self::DEFAULT_MAX_RADIUS, "maxRadius");
        cfg.min_radius = clamp_value(cfg.min_radius, &Self::RADIUS_LIMITS, "minRadius");
        cfg.max_radius = clamp_value(cfg.max_radius, &Self::RADIUS_LIMITS, "maxRadius");
        if cfg.min_radius > cfg.max_radius {
            log::warn!(
                "maxRadius {} below minRadius {}, raising to match",
                cfg.max_radius,
                cfg.min_radius
            );
            cfg.max_radius = cfg.min_radius;
        }

        cfg.min_depth = non_negative(cfg.min_depth, "minDepth");
        cfg.max_depth = non_negative(cfg.max_depth, "maxDepth");
        cfg.min_depth = clamp_value(cfg.min_depth, &Self::DEPTH_LIMITS, "minDepth");
        cfg.max_depth = clamp_value(cfg.max_depth, &Self::DEPTH_LIMITS, "maxDepth");
        if cfg.min_depth > cfg.max_depth {
            log::warn!(
                "maxDepth {} below minDepth {}, raising to match",
                cfg.max_depth,
                cfg.min_depth
            );
            cfg.max_depth = cfg.min_depth;
        }

        cfg.base_vertex_count = clamp_value(
            cfg.base_vertex_count,
            &(Self::MIN_BASE_VERTICES..=Self::MAX_BASE_VERTICES),
            "baseVertexCount",
        );
        cfg.max_subdivisions =
            clamp_value(cfg.max_subdivisions, &(0..=Self::MAX_SUBDIVISIONS), "maxSubdivisions");
        cfg.max_iterations =
            clamp_value(cfg.max_iterations, &(1..=Self::MAX_ITERATIONS), "maxIterations");

        cfg
    }
}

fn positive_or(value: f64, fallback: f64, name: &str) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        log::warn!("{name} {value} is not a positive number, using {fallback}");
        fallback
    }
}

fn non_negative(value: f64, name: &str) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        log::warn!("{name} {value} is not a non-negative number, using 0");
        0.0
    }
}

fn clamp_value<T>(value: T, limits: &RangeInclusive<T>, name: &str) -> T
where
    T: PartialOrd + Copy + std::fmt::Display,
{
    let (lo, hi) = (*limits.start(), *limits.end());
    if value < lo {
        log::warn!("{name} {value} raised to {lo}");
        lo
    } else if value > hi {
        log::warn!("{name} {value} lowered to {hi}");
        hi
    } else {
        value
    }
}
