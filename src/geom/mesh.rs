use std::collections::{BTreeMap, BTreeSet};

use super::{BBox, Point3, Vec3};

/// Undirected edge key, smaller index first.
pub type EdgeKey = (u32, u32);

#[must_use]
pub fn edge_key(a: u32, b: u32) -> EdgeKey {
    if a <= b { (a, b) } else { (b, a) }
}

/// Polygon mesh with arbitrary face arity.
///
/// Unlike a triangle soup this keeps n-gon caps and quad strips intact, which
/// is what a mesh editor expects to receive back.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolyMesh {
    pub positions: Vec<[f64; 3]>,
    /// Vertex loops, counter-clockwise when seen from outside.
    pub faces: Vec<Vec<u32>>,
}

/// Vertices created by [`PolyMesh::subdivide_edges`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubdivideResult {
    /// Every new vertex, in creation order.
    pub new_vertices: Vec<u32>,
    /// New vertices per split edge, ordered from `key.0` towards `key.1`.
    pub chains: BTreeMap<EdgeKey, Vec<u32>>,
}

impl PolyMesh {
    #[must_use]
    pub fn new(positions: Vec<[f64; 3]>, faces: Vec<Vec<u32>>) -> Self {
        Self { positions, faces }
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Position of vertex `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn point(&self, index: u32) -> Point3 {
        Point3::from(self.positions[index as usize])
    }

    pub fn push_vertex(&mut self, p: Point3) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(p.to_array());
        index
    }

    #[must_use]
    pub fn bbox(&self) -> Option<BBox> {
        BBox::from_points(self.positions.iter().copied().map(Point3::from))
    }

    pub fn validate(&self) -> Result<(), String> {
        if self
            .positions
            .iter()
            .any(|p| !p[0].is_finite() || !p[1].is_finite() || !p[2].is_finite())
        {
            return Err("mesh has invalid vertex coordinates (NaN/Inf)".to_string());
        }
        let n = self.positions.len() as u32;
        for (face_index, face) in self.faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(format!("face {face_index} has fewer than 3 vertices"));
            }
            if face.iter().any(|&i| i >= n) {
                return Err(format!("face {face_index} has out-of-bounds vertex indices"));
            }
        }
        Ok(())
    }

    /// Unique undirected edges of all faces, sorted by key.
    #[must_use]
    pub fn edges(&self) -> Vec<EdgeKey> {
        let mut set = BTreeSet::new();
        for face in &self.faces {
            for (i, &a) in face.iter().enumerate() {
                let b = face[(i + 1) % face.len()];
                if a != b {
                    set.insert(edge_key(a, b));
                }
            }
        }
        set.into_iter().collect()
    }

    pub fn translate_vertices(&mut self, vertices: &[u32], offset: Vec3) {
        for &v in vertices {
            if let Some(p) = self.positions.get_mut(v as usize) {
                p[0] += offset.x;
                p[1] += offset.y;
                p[2] += offset.z;
            }
        }
    }

    /// Appends `other` and returns the index offset applied to its vertices.
    pub fn append(&mut self, other: &Self) -> u32 {
        let offset = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.faces.extend(
            other
                .faces
                .iter()
                .map(|face| face.iter().map(|&i| i + offset).collect()),
        );
        offset
    }

    /// Splits every edge in `edges` into `cuts + 1` equal segments.
    ///
    /// Faces touching a split edge are rebuilt: a triangle whose two split
    /// edges share a corner becomes a ladder of quads capped by a tip triangle,
    /// any other face gets the new vertices inserted into its boundary loop.
    /// Edges referencing missing vertices are ignored.
    pub fn subdivide_edges(&mut self, edges: &[EdgeKey], cuts: usize) -> SubdivideResult {
        let mut result = SubdivideResult::default();
        if cuts == 0 {
            return result;
        }

        let n = self.positions.len() as u32;
        for &(a, b) in edges {
            let key = edge_key(a, b);
            if key.0 == key.1 || key.1 >= n || result.chains.contains_key(&key) {
                continue;
            }
            let start = self.point(key.0);
            let end = self.point(key.1);
            let chain: Vec<u32> = (1..=cuts)
                .map(|i| {
                    let t = i as f64 / (cuts + 1) as f64;
                    self.push_vertex(start.lerp(end, t))
                })
                .collect();
            result.new_vertices.extend_from_slice(&chain);
            result.chains.insert(key, chain);
        }

        if result.chains.is_empty() {
            return result;
        }

        let chains = &result.chains;
        let mut faces = Vec::with_capacity(self.faces.len() + chains.len() * cuts);
        for face in self.faces.drain(..) {
            let len = face.len();
            let cut_sides: Vec<usize> = (0..len)
                .filter(|&i| chains.contains_key(&edge_key(face[i], face[(i + 1) % len])))
                .collect();

            match (len, cut_sides.len()) {
                (_, 0) => faces.push(face),
                (3, 2) => {
                    let uncut = (0..3).find(|i| !cut_sides.contains(i)).unwrap_or(0);
                    let a = face[uncut];
                    let b = face[(uncut + 1) % 3];
                    let tip = face[(uncut + 2) % 3];
                    ladder_faces(&mut faces, a, b, tip, chains);
                }
                _ => {
                    let mut ring = Vec::with_capacity(len + cut_sides.len() * cuts);
                    for i in 0..len {
                        let from = face[i];
                        ring.push(from);
                        ring.extend(chain_between(chains, from, face[(i + 1) % len]));
                    }
                    faces.push(ring);
                }
            }
        }
        self.faces = faces;

        result
    }
}

/// New vertices on edge `from -> to`, ordered starting at `from`.
fn chain_between(chains: &BTreeMap<EdgeKey, Vec<u32>>, from: u32, to: u32) -> Vec<u32> {
    match chains.get(&edge_key(from, to)) {
        Some(chain) if from <= to => chain.clone(),
        Some(chain) => chain.iter().rev().copied().collect(),
        None => Vec::new(),
    }
}

/// Fills triangle `a -> b -> tip` whose sides `b-tip` and `tip-a` were split
/// into equal counts. Winding of the source triangle is preserved.
fn ladder_faces(
    out: &mut Vec<Vec<u32>>,
    a: u32,
    b: u32,
    tip: u32,
    chains: &BTreeMap<EdgeKey, Vec<u32>>,
) {
    let mut rail_a = vec![a];
    rail_a.extend(chain_between(chains, a, tip));
    let mut rail_b = vec![b];
    rail_b.extend(chain_between(chains, b, tip));

    if rail_a.len() != rail_b.len() {
        // Mismatched cut counts; keep the face as a single loop.
        let mut ring = rail_a.clone();
        ring.reverse();
        let mut forward = rail_b;
        forward.push(tip);
        forward.extend(ring);
        out.push(forward);
        return;
    }

    for j in 0..rail_a.len() - 1 {
        out.push(vec![rail_a[j], rail_b[j], rail_b[j + 1], rail_a[j + 1]]);
    }
    out.push(vec![rail_a[rail_a.len() - 1], rail_b[rail_b.len() - 1], tip]);
}
