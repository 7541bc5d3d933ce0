//! Vertex Descriptors
//!
//! A vertex is one named, typed port of a node. Vertices are plain values:
//! they are declared once with a node's interface and cloned whenever the
//! interface is copied.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::data_type::{DataType, DataTypeName, Literal};

/// Which side of a node a vertex lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VertexKind {
    /// Consumes data.
    Input,
    /// Produces data.
    Output,
    /// Reads values from the environment the graph runs in.
    Environment,
}

/// A named, typed port on a node.
///
/// Equality considers the kind, name and data type only. The description
/// and the default value are metadata and do not distinguish vertices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vertex {
    kind: VertexKind,
    name: String,
    data_type: DataTypeName,
    #[serde(default)]
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<Literal>,
}

impl Vertex {
    /// Create a vertex with an explicit data type tag.
    pub fn new(
        kind: VertexKind,
        name: impl Into<String>,
        data_type: DataTypeName,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            data_type,
            description: description.into(),
            default: None,
        }
    }

    /// Create an input vertex carrying `T`.
    pub fn input<T: DataType>(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(VertexKind::Input, name, DataTypeName::of::<T>(), description)
    }

    /// Create an output vertex carrying `T`.
    pub fn output<T: DataType>(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(VertexKind::Output, name, DataTypeName::of::<T>(), description)
    }

    /// Create an environment vertex carrying `T`.
    pub fn environment<T: DataType>(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::new(VertexKind::Environment, name, DataTypeName::of::<T>(), description)
    }

    /// Attach a default value. Only meaningful for inputs.
    pub fn with_default(mut self, default: Literal) -> Self {
        self.default = Some(default);
        self
    }

    /// The vertex kind.
    pub fn kind(&self) -> VertexKind {
        self.kind
    }

    /// The vertex name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The data type carried by this vertex.
    pub fn data_type(&self) -> &DataTypeName {
        &self.data_type
    }

    /// Human readable description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Default value descriptor, if one was declared.
    pub fn default_literal(&self) -> Option<&Literal> {
        self.default.as_ref()
    }

    /// Same vertex with a different kind. Used when a node vertex is
    /// exposed on the boundary of its graph.
    pub(crate) fn with_kind(mut self, kind: VertexKind) -> Self {
        self.kind = kind;
        self
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.name == other.name && self.data_type == other.data_type
    }
}

impl Eq for Vertex {}

impl PartialOrd for Vertex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Name first, then data type. Kind only breaks the remaining tie so the
// ordering agrees with equality.
impl Ord for Vertex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.data_type.cmp(&other.data_type))
            .then_with(|| self.kind.cmp(&other.kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_metadata() {
        let a = Vertex::input::<f32>("Gain", "linear gain");
        let b = Vertex::input::<f32>("Gain", "").with_default(Literal::Float(1.0));
        assert_eq!(a, b);
    }

    #[test]
    fn kind_and_type_distinguish_vertices() {
        let input = Vertex::input::<f32>("Value", "");
        let output = Vertex::output::<f32>("Value", "");
        let int_input = Vertex::input::<i32>("Value", "");
        assert_ne!(input, output);
        assert_ne!(input, int_input);
    }

    #[test]
    fn ordering_is_by_name_then_type() {
        let mut vertices = vec![
            Vertex::input::<i32>("b", ""),
            Vertex::input::<f32>("b", ""),
            Vertex::input::<f32>("a", ""),
        ];
        vertices.sort();
        let keys: Vec<_> = vertices
            .iter()
            .map(|v| (v.name().to_string(), v.data_type().to_string()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("a".to_string(), "Float".to_string()),
                ("b".to_string(), "Float".to_string()),
                ("b".to_string(), "Int32".to_string()),
            ]
        );
    }

    #[test]
    fn clone_is_a_deep_copy() {
        let original =
            Vertex::input::<String>("Label", "text").with_default(Literal::String("x".into()));
        let copy = original.clone();
        assert_eq!(copy, original);
        assert_eq!(copy.default_literal(), Some(&Literal::String("x".into())));
        assert_eq!(copy.description(), "text");
    }
}
