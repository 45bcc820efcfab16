use serde::{Deserialize, Serialize};

use crate::geom::{Point3, Tolerance, Vec3};

/// Host-side identifier of an edge.
pub type EdgeId = usize;

/// An edge as handed over by a host, before validation.
///
/// Hosts may hand over anything they consider an edge; only inputs with
/// exactly two finite, distinct endpoints become an [`Edge`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeInput {
    pub id: EdgeId,
    pub endpoints: Vec<[f64; 3]>,
    #[serde(default)]
    pub selected: bool,
}

impl EdgeInput {
    #[must_use]
    pub fn new(id: EdgeId, start: Point3, end: Point3) -> Self {
        Self {
            id,
            endpoints: vec![start.to_array(), end.to_array()],
            selected: true,
        }
    }

    #[must_use]
    pub const fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EdgeError {
    #[error("edge {id} has {found} endpoints, expected 2")]
    WrongEndpointCount { id: EdgeId, found: usize },
    #[error("edge {id} has a non-finite endpoint")]
    NonFiniteEndpoint { id: EdgeId },
    #[error("edge {id} has coincident endpoints")]
    CoincidentEndpoints { id: EdgeId },
}

/// A validated world-space edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub start: Point3,
    pub end: Point3,
}

impl Edge {
    /// # Errors
    /// Fails when the endpoints are non-finite or coincide.
    pub fn new(start: Point3, end: Point3) -> Result<Self, EdgeError> {
        Self::checked(0, start, end)
    }

    fn checked(id: EdgeId, start: Point3, end: Point3) -> Result<Self, EdgeError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(EdgeError::NonFiniteEndpoint { id });
        }
        if Tolerance::ZERO_LENGTH.is_zero_length(start.distance_to(end)) {
            return Err(EdgeError::CoincidentEndpoints { id });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.start.distance_to(self.end)
    }

    /// Length of the edge projected onto the ground plane.
    #[must_use]
    pub fn horizontal_length(&self) -> f64 {
        self.start.horizontal_distance_to(self.end)
    }

    #[must_use]
    pub fn vector(&self) -> Vec3 {
        self.end - self.start
    }

    #[must_use]
    pub fn midpoint(&self) -> Point3 {
        self.start.lerp(self.end, 0.5)
    }

    /// Point at `fraction` of the way from `start` to `end`.
    #[must_use]
    pub fn point_at(&self, fraction: f64) -> Point3 {
        self.start.lerp(self.end, fraction)
    }
}

impl TryFrom<&EdgeInput> for Edge {
    type Error = EdgeError;

    fn try_from(input: &EdgeInput) -> Result<Self, Self::Error> {
        match input.endpoints.as_slice() {
            [a, b] => Self::checked(input.id, Point3::from(*a), Point3::from(*b)),
            other => Err(EdgeError::WrongEndpointCount {
                id: input.id,
                found: other.len(),
            }),
        }
    }
}
