//! Data References
//!
//! A data reference is a shared handle to a value flowing through the graph.
//! The value itself lives in an `Arc<RwLock<T>>`; the graph only ever passes
//! handles around, so an output that fans out to several inputs shares one
//! allocation with all of them.
//!
//! # Typed and type-erased handles
//!
//! - [`DataReadReference<T>`] and [`DataWriteReference<T>`] are typed handles
//!   used by operators.
//! - [`AnyDataReference`] erases `T` and carries the [`DataTypeName`] tag
//!   instead, so heterogeneous references can sit in one interface. The tag
//!   is checked at every bind boundary.
//!
//! # Identity
//!
//! Two references are the same reference when they point at the same
//! allocation. [`DataReferenceId`] captures that identity; rebinding diffs
//! compare ids, never values.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::data_type::{DataType, DataTypeName};

/// How a bound reference may be accessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataReferenceAccessType {
    /// Nothing is bound.
    None,
    /// Shared, read-only access.
    Read,
    /// The single writer of the data.
    Write,
}

/// Identity of the allocation behind a data reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DataReferenceId(usize);

impl DataReferenceId {
    fn of<T: ?Sized>(data: &Arc<T>) -> Self {
        Self(Arc::as_ptr(data).cast::<()>() as usize)
    }
}

/// Read-only handle to a value of type `T`.
pub struct DataReadReference<T: DataType> {
    data: Arc<RwLock<T>>,
}

impl<T: DataType> DataReadReference<T> {
    /// Allocate a new value and return a read handle to it.
    pub fn new(value: T) -> Self {
        Self {
            data: Arc::new(RwLock::new(value)),
        }
    }

    /// Lock the value for reading.
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.data.read()
    }

    /// Identity of the underlying allocation.
    pub fn id(&self) -> DataReferenceId {
        DataReferenceId::of(&self.data)
    }
}

impl<T: DataType> Clone for DataReadReference<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T: DataType + fmt::Debug> fmt::Debug for DataReadReference<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataReadReference")
            .field("data_type", &T::NAME)
            .field("value", &*self.read())
            .finish()
    }
}

/// Writable handle to a value of type `T`.
///
/// There must be one writer at a time. This is a convention carried by the
/// access type tag and is not enforced at runtime.
pub struct DataWriteReference<T: DataType> {
    data: Arc<RwLock<T>>,
}

impl<T: DataType> DataWriteReference<T> {
    /// Allocate a new value and return a write handle to it.
    pub fn new(value: T) -> Self {
        Self {
            data: Arc::new(RwLock::new(value)),
        }
    }

    /// Lock the value for reading.
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.data.read()
    }

    /// Lock the value for writing.
    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.data.write()
    }

    /// A read handle sharing this allocation.
    pub fn to_read(&self) -> DataReadReference<T> {
        DataReadReference {
            data: Arc::clone(&self.data),
        }
    }

    /// Identity of the underlying allocation.
    pub fn id(&self) -> DataReferenceId {
        DataReferenceId::of(&self.data)
    }
}

impl<T: DataType> Clone for DataWriteReference<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T: DataType + fmt::Debug> fmt::Debug for DataWriteReference<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataWriteReference")
            .field("data_type", &T::NAME)
            .field("value", &*self.read())
            .finish()
    }
}

/// Type-erased data reference tagged with its data type and access type.
#[derive(Clone)]
pub struct AnyDataReference {
    data_type: DataTypeName,
    access: DataReferenceAccessType,
    data: Arc<dyn Any + Send + Sync>,
}

impl AnyDataReference {
    /// Allocate `value` and return a read-only reference to it.
    pub fn read<T: DataType>(value: T) -> Self {
        DataReadReference::new(value).into()
    }

    /// Allocate `value` and return a writable reference to it.
    pub fn write<T: DataType>(value: T) -> Self {
        DataWriteReference::new(value).into()
    }

    /// Data type of the referenced value.
    pub fn data_type(&self) -> &DataTypeName {
        &self.data_type
    }

    /// Access granted by this reference.
    pub fn access_type(&self) -> DataReferenceAccessType {
        self.access
    }

    /// Identity of the underlying allocation.
    pub fn id(&self) -> DataReferenceId {
        DataReferenceId::of(&self.data)
    }

    /// Same allocation, downgraded to read-only access.
    pub fn to_read(&self) -> Self {
        Self {
            data_type: self.data_type.clone(),
            access: DataReferenceAccessType::Read,
            data: Arc::clone(&self.data),
        }
    }

    /// Whether `T` is the Rust type behind this reference.
    pub fn is<T: DataType>(&self) -> bool {
        self.data.is::<RwLock<T>>()
    }

    /// Typed read handle, or `None` if `T` is not the referenced type.
    pub fn as_read<T: DataType>(&self) -> Option<DataReadReference<T>> {
        Arc::clone(&self.data)
            .downcast::<RwLock<T>>()
            .ok()
            .map(|data| DataReadReference { data })
    }

    /// Typed write handle, or `None` if `T` is not the referenced type or
    /// this reference is read-only.
    pub fn as_write<T: DataType>(&self) -> Option<DataWriteReference<T>> {
        if self.access != DataReferenceAccessType::Write {
            return None;
        }
        Arc::clone(&self.data)
            .downcast::<RwLock<T>>()
            .ok()
            .map(|data| DataWriteReference { data })
    }
}

impl<T: DataType> From<DataReadReference<T>> for AnyDataReference {
    fn from(reference: DataReadReference<T>) -> Self {
        Self {
            data_type: DataTypeName::of::<T>(),
            access: DataReferenceAccessType::Read,
            data: reference.data,
        }
    }
}

impl<T: DataType> From<DataWriteReference<T>> for AnyDataReference {
    fn from(reference: DataWriteReference<T>) -> Self {
        Self {
            data_type: DataTypeName::of::<T>(),
            access: DataReferenceAccessType::Write,
            data: reference.data,
        }
    }
}

impl fmt::Debug for AnyDataReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyDataReference")
            .field("data_type", &self.data_type)
            .field("access", &self.access)
            .field("id", &self.id())
            .finish()
    }
}
