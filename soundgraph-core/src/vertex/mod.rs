//! Vertex Model
//!
//! Vertices are the typed, named ports of graph nodes. This module holds
//! both halves of the port model:
//!
//! - Declaration: [`Vertex`], [`VertexCollection`] and [`VertexInterface`]
//!   describe which ports a node has and what data type each carries.
//! - Instantiation: [`VertexInterfaceData`] pairs every declared vertex with
//!   an optional [`AnyDataReference`], the live binding an operator reads
//!   from or writes to.
//!
//! Data references are type-erased. Each carries a [`DataTypeName`] tag
//! which is compared against the vertex's declared type whenever it is
//! bound, so the graph can hold heterogeneous nodes while the typed
//! accessors stay sound.

mod data;
mod data_type;
mod descriptor;
mod interface;
mod reference;

pub use data::{
    Binding, BindingSnapshot, DataReferenceCollection, OperatorVertexData, VertexInterfaceData,
};
pub use data_type::{AudioBuffer, DataType, DataTypeName, Literal, Trigger};
pub use descriptor::{Vertex, VertexKind};
pub use interface::{VertexCollection, VertexInterface};
pub use reference::{
    AnyDataReference, DataReadReference, DataReferenceAccessType, DataReferenceId,
    DataWriteReference,
};
