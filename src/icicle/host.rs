//! Host mesh boundary.
//!
//! The pipeline never touches a host's mesh storage directly. A host hands
//! over its working edges, receives finished cones and owns the selection;
//! that is the whole contract. [`EditMesh`] is a small in-memory host used by
//! the CLI, the wasm binding and the tests.

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;

use super::builder::ConeGeometry;
use super::edge::{EdgeId, EdgeInput};
use crate::geom::{Point3, PolyMesh, Transform};

/// Capabilities the icicle pipeline needs from a mesh editor.
pub trait MeshHost {
    /// World-space edges to work on: all edges, or only the selected ones.
    fn working_edges(&self, only_selected: bool) -> Vec<EdgeInput>;

    /// Adds a world-space cone to the mesh and returns the ids of its edges.
    fn insert_cone(&mut self, cone: ConeGeometry) -> Vec<EdgeId>;

    fn selected_edges(&self) -> Vec<EdgeId>;

    fn select_edges(&mut self, edges: &[EdgeId]);

    fn deselect_all(&mut self);
}

#[derive(Debug, Clone, PartialEq)]
struct EditEdge {
    vertices: Vec<u32>,
    selected: bool,
}

/// In-memory editable mesh in object space with a world transform.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditMesh {
    pub mesh: PolyMesh,
    pub world: Transform,
    edges: Vec<EditEdge>,
}

impl EditMesh {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_world(world: Transform) -> Self {
        Self {
            world,
            ..Self::default()
        }
    }

    pub fn add_vertex(&mut self, p: Point3) -> u32 {
        self.mesh.push_vertex(p)
    }

    /// Adds a selected edge between two existing vertices.
    pub fn add_edge(&mut self, a: u32, b: u32) -> EdgeId {
        self.add_edge_record(vec![a, b], true)
    }

    /// Adds an edge record with an arbitrary vertex list. Records that are
    /// not exactly two vertices are kept; the pipeline reports them.
    pub fn add_edge_record(&mut self, vertices: Vec<u32>, selected: bool) -> EdgeId {
        self.edges.push(EditEdge { vertices, selected });
        self.edges.len() - 1
    }

    /// Adds vertices and selected edges along `points`.
    pub fn add_polyline(&mut self, points: &[Point3], closed: bool) -> Vec<EdgeId> {
        let ids: Vec<u32> = points.iter().map(|&p| self.add_vertex(p)).collect();
        let mut edges: Vec<EdgeId> = ids.windows(2).map(|w| self.add_edge(w[0], w[1])).collect();
        if closed && ids.len() > 2 {
            edges.push(self.add_edge(ids[ids.len() - 1], ids[0]));
        }
        edges
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_selected(&self, edge: EdgeId) -> bool {
        self.edges.get(edge).is_some_and(|e| e.selected)
    }

    /// Wavefront OBJ text for the whole mesh in world space. Faces are
    /// written as polygons; edges not covered by a face are written as lines.
    #[must_use]
    pub fn to_obj(&self, name: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# icicle-engine");
        let _ = writeln!(out, "o {name}");
        for p in &self.mesh.positions {
            let w = self.world.apply_point(Point3::from(*p));
            let _ = writeln!(out, "v {} {} {}", w.x, w.y, w.z);
        }

        let face_edges: std::collections::BTreeSet<_> = self.mesh.edges().into_iter().collect();
        for edge in &self.edges {
            if let [a, b] = edge.vertices[..] {
                if !face_edges.contains(&crate::geom::edge_key(a, b)) {
                    let _ = writeln!(out, "l {} {}", a + 1, b + 1);
                }
            }
        }
        for face in &self.mesh.faces {
            let _ = write!(out, "f");
            for i in face {
                let _ = write!(out, " {}", i + 1);
            }
            let _ = writeln!(out);
        }
        out
    }

    pub fn write_obj(&self, path: &Path, name: &str) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
        file.write_all(self.to_obj(name).as_bytes())?;
        file.flush()
    }
}

impl MeshHost for EditMesh {
    fn working_edges(&self, only_selected: bool) -> Vec<EdgeInput> {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| !only_selected || e.selected)
            .map(|(id, e)| EdgeInput {
                id,
                endpoints: e
                    .vertices
                    .iter()
                    .filter(|&&v| (v as usize) < self.mesh.vertex_count())
                    .map(|&v| self.world.apply_point(self.mesh.point(v)).to_array())
                    .collect(),
                selected: e.selected,
            })
            .collect()
    }

    fn insert_cone(&mut self, cone: ConeGeometry) -> Vec<EdgeId> {
        let mut local = cone.mesh;
        if let Some(to_object) = self.world.inverse().filter(|_| !self.world.is_identity()) {
            for p in &mut local.positions {
                *p = to_object.apply_point(Point3::from(*p)).to_array();
            }
        }

        let offset = self.mesh.append(&local);
        local
            .edges()
            .into_iter()
            .map(|(a, b)| self.add_edge_record(vec![a + offset, b + offset], false))
            .collect()
    }

    fn selected_edges(&self) -> Vec<EdgeId> {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(id, e)| e.selected.then_some(id))
            .collect()
    }

    fn select_edges(&mut self, edges: &[EdgeId]) {
        for &id in edges {
            if let Some(edge) = self.edges.get_mut(id) {
                edge.selected = true;
            }
        }
    }

    fn deselect_all(&mut self) {
        for edge in &mut self.edges {
            edge.selected = false;
        }
    }
}
