//! Vertex Interface Data
//!
//! Where a [`VertexInterface`](super::VertexInterface) declares ports,
//! [`VertexInterfaceData`] holds the live bindings of one instantiated
//! node: every declared vertex paired with an optional data reference.
//!
//! # Error policy
//!
//! Lookups by name never panic. Binding an unknown vertex, or a reference of
//! the wrong data type, logs a warning, leaves the data untouched and
//! returns a [`BindError`]. Only the typed accessors panic, because asking
//! for a typed reference to an unbound vertex is a programming error.
//!
//! # Snapshots
//!
//! Rebinding needs to know which bindings actually changed. [`snapshot`]
//! records the identity of every bound reference; [`changed_since`] diffs
//! the current state against an earlier snapshot.
//!
//! [`snapshot`]: VertexInterfaceData::snapshot
//! [`changed_since`]: VertexInterfaceData::changed_since

use std::collections::BTreeMap;

use tracing::warn;

use super::data_type::{DataType, DataTypeName, Literal};
use super::descriptor::{Vertex, VertexKind};
use super::interface::{VertexCollection, VertexInterface};
use super::reference::{
    AnyDataReference, DataReadReference, DataReferenceAccessType, DataReferenceId,
    DataWriteReference,
};
use crate::error::BindError;
use crate::operator::OperatorSettings;

/// Name to reference map used for bulk binding.
pub type DataReferenceCollection = BTreeMap<String, AnyDataReference>;

/// A vertex paired with its optional data reference.
#[derive(Debug, Clone)]
pub struct Binding {
    vertex: Vertex,
    data: Option<AnyDataReference>,
}

impl Binding {
    fn unbound(vertex: Vertex) -> Self {
        Self { vertex, data: None }
    }

    /// The declared vertex.
    pub fn vertex(&self) -> &Vertex {
        &self.vertex
    }

    /// The bound reference, if any.
    pub fn data(&self) -> Option<&AnyDataReference> {
        self.data.as_ref()
    }

    /// Whether a reference is bound.
    pub fn is_bound(&self) -> bool {
        self.data.is_some()
    }

    /// Access type of the bound reference, `None` when unbound.
    pub fn access_type(&self) -> DataReferenceAccessType {
        self.data
            .as_ref()
            .map_or(DataReferenceAccessType::None, AnyDataReference::access_type)
    }

    fn state(&self) -> Option<(DataReferenceId, DataReferenceAccessType)> {
        self.data.as_ref().map(|d| (d.id(), d.access_type()))
    }
}

/// Bound state of every vertex at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingSnapshot {
    states: BTreeMap<String, Option<(DataReferenceId, DataReferenceAccessType)>>,
}

impl BindingSnapshot {
    /// Whether `name` was bound when the snapshot was taken.
    pub fn is_bound(&self, name: &str) -> bool {
        matches!(self.states.get(name), Some(Some(_)))
    }
}

/// Live bindings for one vertex collection.
#[derive(Debug, Clone)]
pub struct VertexInterfaceData {
    kind: VertexKind,
    bindings: BTreeMap<String, Binding>,
}

impl VertexInterfaceData {
    /// Create unbound interface data for every vertex of `collection`.
    pub fn new(collection: &VertexCollection) -> Self {
        Self {
            kind: collection.kind(),
            bindings: collection
                .iter()
                .map(|v| (v.name().to_string(), Binding::unbound(v.clone())))
                .collect(),
        }
    }

    /// Kind of the vertices held here.
    pub fn kind(&self) -> VertexKind {
        self.kind
    }

    /// Bind `data` to the vertex called `name`.
    ///
    /// Unknown names and data type mismatches are logged and leave the
    /// binding unchanged.
    pub fn bind_vertex(&mut self, name: &str, data: AnyDataReference) -> Result<(), BindError> {
        let Some(binding) = self.bindings.get_mut(name) else {
            warn!(vertex = name, "cannot bind vertex: vertex not found");
            return Err(BindError::VertexNotFound {
                name: name.to_string(),
            });
        };

        if binding.vertex.data_type() != data.data_type() {
            warn!(
                vertex = name,
                expected = %binding.vertex.data_type(),
                actual = %data.data_type(),
                "cannot bind vertex: data type mismatch"
            );
            return Err(BindError::DataTypeMismatch {
                name: name.to_string(),
                expected: binding.vertex.data_type().clone(),
                actual: data.data_type().clone(),
            });
        }

        binding.data = Some(data);
        Ok(())
    }

    /// Bind every vertex whose name appears in `references`.
    ///
    /// Names absent from `references` are skipped silently. Type
    /// mismatches are logged and skipped.
    pub fn bind(&mut self, references: &DataReferenceCollection) {
        for (name, binding) in &mut self.bindings {
            if let Some(data) = references.get(name) {
                if binding.vertex.data_type() == data.data_type() {
                    binding.data = Some(data.clone());
                } else {
                    warn!(
                        vertex = %name,
                        expected = %binding.vertex.data_type(),
                        actual = %data.data_type(),
                        "skipping vertex during bulk bind: data type mismatch"
                    );
                }
            }
        }
    }

    /// Bind every vertex that is bound in `other` to the same reference.
    pub fn bind_from(&mut self, other: &VertexInterfaceData) {
        self.bind(&other.references());
    }

    /// Remove the reference bound to `name`, returning it.
    pub fn unbind_vertex(&mut self, name: &str) -> Option<AnyDataReference> {
        self.bindings.get_mut(name).and_then(|b| b.data.take())
    }

    /// Look up a binding by name.
    pub fn binding(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    /// Bindings in vertex name order.
    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.values()
    }

    /// The reference bound to `name`, if the vertex exists and is bound.
    pub fn data_reference(&self, name: &str) -> Option<&AnyDataReference> {
        self.bindings.get(name).and_then(|b| b.data.as_ref())
    }

    /// All bound references keyed by vertex name.
    pub fn references(&self) -> DataReferenceCollection {
        self.bindings
            .iter()
            .filter_map(|(name, b)| b.data.clone().map(|d| (name.clone(), d)))
            .collect()
    }

    /// Whether the named vertex exists and is bound.
    pub fn is_vertex_bound(&self, name: &str) -> bool {
        self.bindings.get(name).is_some_and(Binding::is_bound)
    }

    /// Whether every vertex is bound.
    pub fn are_all_vertices_bound(&self) -> bool {
        self.bindings.values().all(Binding::is_bound)
    }

    /// Typed read reference bound to `name`.
    pub fn try_data_read_reference<T: DataType>(
        &self,
        name: &str,
    ) -> Result<DataReadReference<T>, BindError> {
        let data = self.bound(name)?;
        data.as_read::<T>().ok_or_else(|| BindError::AccessMismatch {
            name: name.to_string(),
            requested: T::NAME,
        })
    }

    /// Typed write reference bound to `name`.
    pub fn try_data_write_reference<T: DataType>(
        &self,
        name: &str,
    ) -> Result<DataWriteReference<T>, BindError> {
        let data = self.bound(name)?;
        data.as_write::<T>().ok_or_else(|| BindError::AccessMismatch {
            name: name.to_string(),
            requested: "write reference",
        })
    }

    /// Typed read reference bound to `name`.
    ///
    /// # Panics
    ///
    /// Panics if the vertex is missing, unbound or does not hold a `T`.
    pub fn data_read_reference<T: DataType>(&self, name: &str) -> DataReadReference<T> {
        match self.try_data_read_reference(name) {
            Ok(reference) => reference,
            Err(err) => panic!("invalid typed read access: {err}"),
        }
    }

    /// Typed write reference bound to `name`.
    ///
    /// # Panics
    ///
    /// Panics if the vertex is missing, unbound, read-only or does not hold
    /// a `T`.
    pub fn data_write_reference<T: DataType>(&self, name: &str) -> DataWriteReference<T> {
        match self.try_data_write_reference(name) {
            Ok(reference) => reference,
            Err(err) => panic!("invalid typed write access: {err}"),
        }
    }

    /// The bound read reference, or a new one built from the vertex
    /// default. The new reference is not bound; the caller decides whether
    /// to bind it.
    pub fn get_or_create_default_data_read_reference<T: DataType>(
        &self,
        name: &str,
        settings: &OperatorSettings,
    ) -> Result<DataReadReference<T>, BindError> {
        let binding = self.default_candidate::<T>(name)?;
        match &binding.data {
            Some(_) => self.try_data_read_reference(name),
            None => Ok(DataReadReference::new(default_value::<T>(binding, settings))),
        }
    }

    /// The bound write reference, or a new one built from the vertex
    /// default.
    pub fn get_or_create_default_data_write_reference<T: DataType>(
        &self,
        name: &str,
        settings: &OperatorSettings,
    ) -> Result<DataWriteReference<T>, BindError> {
        let binding = self.default_candidate::<T>(name)?;
        match &binding.data {
            Some(_) => self.try_data_write_reference(name),
            None => Ok(DataWriteReference::new(default_value::<T>(binding, settings))),
        }
    }

    /// Record the current bound state of every vertex.
    pub fn snapshot(&self) -> BindingSnapshot {
        BindingSnapshot {
            states: self
                .bindings
                .iter()
                .map(|(name, b)| (name.clone(), b.state()))
                .collect(),
        }
    }

    /// Names of the vertices whose binding differs from `before`.
    pub fn changed_since(&self, before: &BindingSnapshot) -> Vec<String> {
        self.bindings
            .iter()
            .filter(|(name, b)| before.states.get(*name).copied().flatten() != b.state())
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn bound(&self, name: &str) -> Result<&AnyDataReference, BindError> {
        let binding = self.bindings.get(name).ok_or_else(|| BindError::VertexNotFound {
            name: name.to_string(),
        })?;
        binding.data.as_ref().ok_or_else(|| BindError::Unbound {
            name: name.to_string(),
        })
    }

    fn default_candidate<T: DataType>(&self, name: &str) -> Result<&Binding, BindError> {
        if self.kind != VertexKind::Input {
            return Err(BindError::NotAnInput {
                name: name.to_string(),
            });
        }
        let binding = self.bindings.get(name).ok_or_else(|| BindError::VertexNotFound {
            name: name.to_string(),
        })?;
        let requested = DataTypeName::of::<T>();
        if binding.vertex.data_type() != &requested {
            return Err(BindError::DataTypeMismatch {
                name: name.to_string(),
                expected: binding.vertex.data_type().clone(),
                actual: requested,
            });
        }
        Ok(binding)
    }
}

fn default_value<T: DataType>(binding: &Binding, settings: &OperatorSettings) -> T {
    let literal = binding.vertex.default_literal().unwrap_or(&Literal::None);
    T::from_literal(literal, settings)
}

/// Input and output bindings of one operator or graph.
#[derive(Debug, Clone)]
pub struct OperatorVertexData {
    /// Input bindings.
    pub inputs: VertexInterfaceData,
    /// Output bindings.
    pub outputs: VertexInterfaceData,
}

impl OperatorVertexData {
    /// Unbound data for every input and output of `interface`.
    pub fn new(interface: &VertexInterface) -> Self {
        Self {
            inputs: VertexInterfaceData::new(interface.inputs()),
            outputs: VertexInterfaceData::new(interface.outputs()),
        }
    }
}
