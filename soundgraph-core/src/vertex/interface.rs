//! Vertex Interfaces
//!
//! A [`VertexInterface`] declares the ports of a node: one name-sorted
//! [`VertexCollection`] each for inputs, outputs and environment vertices.
//! Names are unique within a collection; insertion order is irrelevant.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::descriptor::{Vertex, VertexKind};

/// Name-sorted set of vertices of a single kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexCollection {
    kind: VertexKind,
    vertices: BTreeMap<String, Vertex>,
}

impl VertexCollection {
    /// Create an empty collection for vertices of `kind`.
    pub fn new(kind: VertexKind) -> Self {
        Self {
            kind,
            vertices: BTreeMap::new(),
        }
    }

    /// Build a collection from vertices. A later vertex replaces an earlier
    /// one with the same name.
    pub fn from_vertices(kind: VertexKind, vertices: impl IntoIterator<Item = Vertex>) -> Self {
        let mut collection = Self::new(kind);
        for vertex in vertices {
            collection.insert(vertex);
        }
        collection
    }

    /// Kind of every vertex in this collection.
    pub fn kind(&self) -> VertexKind {
        self.kind
    }

    /// Insert a vertex, returning the vertex it replaced.
    ///
    /// The vertex is re-tagged with the collection's kind.
    pub fn insert(&mut self, vertex: Vertex) -> Option<Vertex> {
        let vertex = vertex.with_kind(self.kind);
        self.vertices.insert(vertex.name().to_string(), vertex)
    }

    /// Look up a vertex by name.
    pub fn get(&self, name: &str) -> Option<&Vertex> {
        self.vertices.get(name)
    }

    /// Whether a vertex with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.vertices.contains_key(name)
    }

    /// Vertices in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.values()
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// The complete port declaration of a node or graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexInterface {
    inputs: VertexCollection,
    outputs: VertexCollection,
    environment: VertexCollection,
}

impl VertexInterface {
    /// Create an interface from input and output vertices.
    pub fn new(
        inputs: impl IntoIterator<Item = Vertex>,
        outputs: impl IntoIterator<Item = Vertex>,
    ) -> Self {
        Self {
            inputs: VertexCollection::from_vertices(VertexKind::Input, inputs),
            outputs: VertexCollection::from_vertices(VertexKind::Output, outputs),
            environment: VertexCollection::new(VertexKind::Environment),
        }
    }

    /// Add environment vertices.
    pub fn with_environment(mut self, environment: impl IntoIterator<Item = Vertex>) -> Self {
        for vertex in environment {
            self.environment.insert(vertex);
        }
        self
    }

    /// Input vertices.
    pub fn inputs(&self) -> &VertexCollection {
        &self.inputs
    }

    /// Output vertices.
    pub fn outputs(&self) -> &VertexCollection {
        &self.outputs
    }

    /// Environment vertices.
    pub fn environment(&self) -> &VertexCollection {
        &self.environment
    }
}

impl Default for VertexInterface {
    fn default() -> Self {
        Self::new([], [])
    }
}
