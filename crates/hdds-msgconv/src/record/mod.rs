// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Record instances.
//!
//! A [`Record`] owns exactly one [`FieldValue`] per field of its
//! [`TypeDescriptor`], in declared order. Its type is fixed at construction.
//! Default instances are built by
//! [`TypeRegistry::instantiate`](crate::registry::TypeRegistry::instantiate),
//! which resolves nested record types.

mod value;

pub use value::{Duration, FieldValue, Time};

use crate::types::TypeDescriptor;
use std::sync::Arc;

/// Typed record with a fixed field set.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    descriptor: Arc<TypeDescriptor>,
    values: Vec<FieldValue>,
}

impl Record {
    /// Assemble a record from values given in declared field order.
    ///
    /// Returns `None` when the number of values does not match the
    /// descriptor.
    pub fn from_values(descriptor: Arc<TypeDescriptor>, values: Vec<FieldValue>) -> Option<Self> {
        if values.len() != descriptor.len() {
            return None;
        }
        Some(Self { descriptor, values })
    }

    /// Values are produced from the descriptor's own fields, one per field.
    pub(crate) fn from_defaults(descriptor: Arc<TypeDescriptor>, values: Vec<FieldValue>) -> Self {
        debug_assert_eq!(values.len(), descriptor.len());
        Self { descriptor, values }
    }

    /// Get the type descriptor.
    pub fn descriptor(&self) -> &Arc<TypeDescriptor> {
        &self.descriptor
    }

    /// Get the type name.
    pub fn type_name(&self) -> &str {
        self.descriptor.name()
    }

    /// Get a field value by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        let idx = self.descriptor.field_index(name)?;
        self.values.get(idx)
    }

    /// Get a mutable field value by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut FieldValue> {
        let idx = self.descriptor.field_index(name)?;
        self.values.get_mut(idx)
    }

    /// Set a field value by name. Returns `false` for unknown fields.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) -> bool {
        match self.get_mut(name) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Field value at a declared position.
    pub fn value_at(&self, index: usize) -> Option<&FieldValue> {
        self.values.get(index)
    }

    pub fn value_at_mut(&mut self, index: usize) -> Option<&mut FieldValue> {
        self.values.get_mut(index)
    }

    /// Iterate `(field name, value)` pairs in declared order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.descriptor
            .fields()
            .iter()
            .map(|f| f.name.as_str())
            .zip(self.values.iter())
    }

    /// Into inner values.
    pub fn into_values(self) -> Vec<FieldValue> {
        self.values
    }
}
