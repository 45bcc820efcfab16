//! Cone construction.
//!
//! Vertex layout of a freshly built cone:
//!
//! ```text
//! 0 .. n-1   base ring, counter-clockwise seen from +Z, starting on +X
//! n          apex
//! n + 1      ring centroid (TriangleFan cap only)
//! ```
//!
//! The ring always lies in the horizontal plane through the placement point;
//! only the apex moves with [`Direction`].

use std::f64::consts::TAU;

use super::config::{CapStyle, Direction, IcicleConfig};
use super::placer::Placement;
use crate::geom::{Point3, PolyMesh, Vec3};

#[derive(Debug, Clone, PartialEq)]
pub struct ConeGeometry {
    pub mesh: PolyMesh,
    pub base_ring: Vec<u32>,
    pub apex: u32,
    pub direction: Direction,
    /// Centre of the base ring, on the source edge.
    pub anchor: [f64; 3],
}

impl ConeGeometry {
    #[must_use]
    pub fn apex_point(&self) -> Point3 {
        self.mesh.point(self.apex)
    }

    #[must_use]
    pub fn anchor(&self) -> Point3 {
        Point3::from(self.anchor)
    }
}

/// Builds the cone described by `placement`. Deterministic.
#[must_use]
pub fn build_cone(placement: &Placement, config: &IcicleConfig) -> ConeGeometry {
    let n = config.base_vertex_count.max(IcicleConfig::MIN_BASE_VERTICES);
    let center = placement.position();
    let direction = config.direction;

    let mut mesh = PolyMesh::default();
    let base_ring: Vec<u32> = (0..n)
        .map(|i| {
            let angle = TAU * i as f64 / n as f64;
            let (sin, cos) = angle.sin_cos();
            mesh.push_vertex(
                center + Vec3::new(placement.radius * cos, placement.radius * sin, 0.0),
            )
        })
        .collect();
    let apex = mesh.push_vertex(center + Vec3::Z * (direction.sign() * placement.depth));

    // Ring order is CCW from above. A downward cone keeps that order for its
    // cap (normal +Z) and reverses it for its sides; an upward cone is the mirror.
    let hanging = direction == Direction::Down;
    for i in 0..n {
        let a = base_ring[i];
        let b = base_ring[(i + 1) % n];
        mesh.faces
            .push(if hanging { vec![b, a, apex] } else { vec![a, b, apex] });
    }

    match config.cap_style {
        CapStyle::None => {}
        CapStyle::NGon => {
            let mut cap = base_ring.clone();
            if !hanging {
                cap.reverse();
            }
            mesh.faces.push(cap);
        }
        CapStyle::TriangleFan => {
            let hub = mesh.push_vertex(center);
            for i in 0..n {
                let a = base_ring[i];
                let b = base_ring[(i + 1) % n];
                mesh.faces
                    .push(if hanging { vec![hub, a, b] } else { vec![hub, b, a] });
            }
        }
    }

    ConeGeometry {
        mesh,
        base_ring,
        apex,
        direction,
        anchor: center.to_array(),
    }
}
