//! Passthrough Operator
//!
//! Forwards its input reference to its output without copying data. The
//! output shares the input's allocation, so a chain of passthroughs
//! exposes the very reference bound at the head of the chain.

use std::any::Any;
use std::marker::PhantomData;

use tracing::warn;

use super::settings::OperatorSettings;
use super::traits::Operator;
use crate::vertex::{
    AnyDataReference, DataReferenceCollection, DataType, Vertex, VertexInterface,
    VertexInterfaceData,
};

/// Reference-forwarding operator for data type `T`.
pub struct PassthroughOperator<T: DataType> {
    settings: OperatorSettings,
    input: Option<AnyDataReference>,
    _data: PhantomData<fn() -> T>,
}

impl<T: DataType> PassthroughOperator<T> {
    /// Name of the input vertex.
    pub const INPUT: &'static str = "In";
    /// Name of the output vertex.
    pub const OUTPUT: &'static str = "Out";

    /// Create an unbound passthrough.
    pub fn new(settings: &OperatorSettings) -> Self {
        Self {
            settings: settings.clone(),
            input: None,
            _data: PhantomData,
        }
    }

    /// Interface of every passthrough for `T`.
    pub fn vertex_interface() -> VertexInterface {
        VertexInterface::new(
            [Vertex::input::<T>(Self::INPUT, "Value to forward")],
            [Vertex::output::<T>(Self::OUTPUT, "The forwarded value")],
        )
    }
}

impl<T: DataType> Operator for PassthroughOperator<T> {
    fn bind_inputs(&mut self, inputs: &mut VertexInterfaceData) {
        if let Some(bound) = inputs.data_reference(Self::INPUT) {
            self.input = Some(bound.clone());
            return;
        }

        match inputs.get_or_create_default_data_read_reference::<T>(Self::INPUT, &self.settings) {
            Ok(default) => {
                let default = AnyDataReference::from(default);
                if inputs.bind_vertex(Self::INPUT, default.clone()).is_ok() {
                    self.input = Some(default);
                }
            }
            Err(err) => warn!(%err, "passthrough input cannot be defaulted"),
        }
    }

    fn bind_outputs(&mut self, outputs: &mut VertexInterfaceData) {
        if let Some(input) = &self.input {
            // Output is read-only even when the input is writable.
            let _ = outputs.bind_vertex(Self::OUTPUT, input.to_read());
        }
    }

    fn inputs(&self) -> DataReferenceCollection {
        self.input
            .iter()
            .map(|r| (Self::INPUT.to_string(), r.clone()))
            .collect()
    }

    fn outputs(&self) -> DataReferenceCollection {
        self.input
            .iter()
            .map(|r| (Self::OUTPUT.to_string(), r.to_read()))
            .collect()
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
