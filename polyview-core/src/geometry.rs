//! Mesh model: vertices keyed by id and polygonal faces over them
use nalgebra::Point3;
use std::collections::HashMap;

/// Identifier of a vertex as written in the object description
pub type VertexId = i64;

/// A mesh vertex in world space (already scaled)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub id: VertexId,
    pub position: Point3<f64>,
}

impl Vertex {
    pub fn new(id: VertexId, x: f64, y: f64, z: f64) -> Self {
        Self {
            id,
            position: Point3::new(x, y, z),
        }
    }
}

/// A planar polygon given as indices into [`Mesh::vertices`], in source winding order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    pub indices: Vec<usize>,
}

impl Face {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    /// The three leading vertex indices, which determine the face normal.
    ///
    /// Later vertices of an n-gon do not contribute; the face is assumed planar.
    pub fn leading(&self) -> [usize; 3] {
        [self.indices[0], self.indices[1], self.indices[2]]
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// A polyhedral mesh, immutable once loaded
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
    lookup: HashMap<VertexId, usize>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            faces: Vec::with_capacity(faces),
            lookup: HashMap::with_capacity(vertices),
        }
    }

    /// Add a vertex, returning its index, or `None` if the id is already taken.
    pub(crate) fn add_vertex(&mut self, vertex: Vertex) -> Option<usize> {
        if self.lookup.contains_key(&vertex.id) {
            return None;
        }
        let index = self.vertices.len();
        self.lookup.insert(vertex.id, index);
        self.vertices.push(vertex);
        Some(index)
    }

    pub(crate) fn add_face(&mut self, face: Face) {
        debug_assert!(face.len() >= 3);
        debug_assert!(face.indices.iter().all(|&i| i < self.vertices.len()));
        self.faces.push(face);
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Index of the vertex with the given source id
    pub fn index_of(&self, id: VertexId) -> Option<usize> {
        self.lookup.get(&id).copied()
    }

    /// Source ids of a face's vertices, in winding order
    pub fn face_ids<'a>(&'a self, face: &'a Face) -> impl Iterator<Item = VertexId> + 'a {
        face.indices.iter().map(move |&i| self.vertices[i].id)
    }

    /// A tetrahedron with corners at the origin and on each unit axis.
    ///
    /// Useful as a fallback scene and in tests; coordinates are multiplied by `scale`.
    pub fn tetrahedron(scale: f64) -> Self {
        let mut mesh = Self::with_capacity(4, 4);
        let corners = [
            (1, 0.0, 0.0, 0.0),
            (2, 1.0, 0.0, 0.0),
            (3, 0.0, 1.0, 0.0),
            (4, 0.0, 0.0, 1.0),
        ];
        for (id, x, y, z) in corners {
            mesh.add_vertex(Vertex::new(id, x * scale, y * scale, z * scale));
        }
        for indices in [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]] {
            mesh.add_face(Face::new(indices.to_vec()));
        }
        mesh
    }
}
