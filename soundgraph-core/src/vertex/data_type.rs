//! Data Types
//!
//! Every vertex declares the data type it carries as a [`DataTypeName`] tag.
//! Rust types that may flow through the graph implement [`DataType`], which
//! ties the type to its tag and knows how to build a default value from a
//! vertex's [`Literal`] default.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::operator::OperatorSettings;

/// Tag identifying the semantic type carried by a vertex or data reference.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DataTypeName(Cow<'static, str>);

impl DataTypeName {
    /// Create a tag from a static string.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Create a tag from an owned string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// The tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Tag of the Rust type `T`.
    pub fn of<T: DataType>() -> Self {
        Self::from_static(T::NAME)
    }
}

impl fmt::Display for DataTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for DataTypeName {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

/// Default-value descriptor attached to input vertices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Literal {
    /// No explicit default; the data type's own default is used.
    #[default]
    None,
    /// Boolean literal.
    Bool(bool),
    /// Integer literal.
    Int(i32),
    /// Floating point literal.
    Float(f32),
    /// String literal.
    String(String),
}

/// A Rust type that can be carried by graph vertices.
pub trait DataType: Send + Sync + 'static {
    /// Tag used by vertices that carry this type.
    const NAME: &'static str;

    /// Build a value from a vertex default and the operator settings.
    fn from_literal(literal: &Literal, settings: &OperatorSettings) -> Self;
}

impl DataType for bool {
    const NAME: &'static str = "Bool";

    fn from_literal(literal: &Literal, _settings: &OperatorSettings) -> Self {
        match literal {
            Literal::Bool(v) => *v,
            Literal::Int(v) => *v != 0,
            Literal::Float(v) => *v != 0.0,
            Literal::String(_) | Literal::None => false,
        }
    }
}

impl DataType for i32 {
    const NAME: &'static str = "Int32";

    fn from_literal(literal: &Literal, _settings: &OperatorSettings) -> Self {
        match literal {
            Literal::Bool(v) => i32::from(*v),
            Literal::Int(v) => *v,
            Literal::Float(v) => *v as i32,
            Literal::String(_) | Literal::None => 0,
        }
    }
}

impl DataType for f32 {
    const NAME: &'static str = "Float";

    fn from_literal(literal: &Literal, _settings: &OperatorSettings) -> Self {
        match literal {
            Literal::Bool(v) => f32::from(u8::from(*v)),
            Literal::Int(v) => *v as f32,
            Literal::Float(v) => *v,
            Literal::String(_) | Literal::None => 0.0,
        }
    }
}

impl DataType for String {
    const NAME: &'static str = "String";

    fn from_literal(literal: &Literal, _settings: &OperatorSettings) -> Self {
        match literal {
            Literal::String(v) => v.clone(),
            Literal::Bool(v) => v.to_string(),
            Literal::Int(v) => v.to_string(),
            Literal::Float(v) => v.to_string(),
            Literal::None => String::new(),
        }
    }
}

/// One block of mono audio samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioBuffer {
    samples: Vec<f32>,
}

impl AudioBuffer {
    /// Create a silent buffer with `len` frames.
    pub fn silent(len: usize) -> Self {
        Self {
            samples: vec![0.0; len],
        }
    }

    /// Number of frames in the buffer.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the buffer holds no frames.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Read access to the samples.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Write access to the samples.
    pub fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.samples
    }
}

impl DataType for AudioBuffer {
    const NAME: &'static str = "Audio";

    // A literal cannot describe audio; the buffer is always silence.
    fn from_literal(_literal: &Literal, settings: &OperatorSettings) -> Self {
        Self::silent(settings.block_size)
    }
}

/// Sample-accurate trigger events within one block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trigger {
    frames: Vec<usize>,
}

impl Trigger {
    /// Fire the trigger at `frame` within the current block.
    pub fn trigger_frame(&mut self, frame: usize) {
        self.frames.push(frame);
    }

    /// Frames at which the trigger fired this block.
    pub fn frames(&self) -> &[usize] {
        &self.frames
    }

    /// Whether the trigger fired this block.
    pub fn is_triggered(&self) -> bool {
        !self.frames.is_empty()
    }

    /// Clear all events, typically at the start of a block.
    pub fn advance_block(&mut self) {
        self.frames.clear();
    }
}

impl DataType for Trigger {
    const NAME: &'static str = "Trigger";

    fn from_literal(literal: &Literal, _settings: &OperatorSettings) -> Self {
        let mut trigger = Self::default();
        if matches!(literal, Literal::Bool(true)) {
            trigger.trigger_frame(0);
        }
        trigger
    }
}
