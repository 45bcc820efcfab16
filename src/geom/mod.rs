//! Geometry kernel shared by the icicle pipeline: vectors, points,
//! transforms, tolerances and a polygon mesh with edge subdivision.

mod core;
mod mesh;

pub use self::core::{BBox, Point3, Tolerance, Transform, Vec3};
pub use mesh::{EdgeKey, PolyMesh, SubdivideResult, edge_key};
