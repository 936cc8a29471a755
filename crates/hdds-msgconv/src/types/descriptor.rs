// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors for record and service types.

use super::field_type::FieldType;
use super::name::is_header_type;
use std::sync::Arc;

/// Field descriptor for record members.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Field name.
    pub name: String,
    /// Declared (qualified) type string.
    pub type_string: String,
    /// Classified type.
    pub field_type: FieldType,
}

impl FieldDescriptor {
    /// Create a field descriptor, classifying its type string.
    pub fn new(name: impl Into<String>, type_string: impl Into<String>) -> Self {
        let type_string = type_string.into();
        let field_type = FieldType::classify(&type_string);
        Self {
            name: name.into(),
            type_string,
            field_type,
        }
    }
}

/// Constant declared in a definition (`int32 MAX=10`).
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantDescriptor {
    pub name: String,
    pub type_string: String,
    /// Literal value as written.
    pub value: String,
}

/// Resolved schema metadata for a record type.
///
/// Field order is the declared order and never changes after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    name: String,
    fields: Vec<FieldDescriptor>,
    constants: Vec<ConstantDescriptor>,
}

impl TypeDescriptor {
    /// Create a type descriptor.
    pub fn new(
        name: impl Into<String>,
        fields: Vec<FieldDescriptor>,
        constants: Vec<ConstantDescriptor>,
    ) -> Self {
        Self {
            name: name.into(),
            fields,
            constants,
        }
    }

    /// Normalized `package/Type` name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declared order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn constants(&self) -> &[ConstantDescriptor] {
        &self.constants
    }

    /// Get field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Get field index by name.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Iterate `(name, type string)` pairs in declared order.
    pub fn slots(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|f| (f.name.as_str(), f.type_string.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether this type follows the header convention.
    pub fn is_header(&self) -> bool {
        is_header_type(&self.name)
    }
}

/// Request/response pair of a service type.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDescriptor {
    name: String,
    request: Arc<TypeDescriptor>,
    response: Arc<TypeDescriptor>,
}

impl ServiceDescriptor {
    pub fn new(
        name: impl Into<String>,
        request: Arc<TypeDescriptor>,
        response: Arc<TypeDescriptor>,
    ) -> Self {
        Self {
            name: name.into(),
            request,
            response,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn request(&self) -> &Arc<TypeDescriptor> {
        &self.request
    }

    pub fn response(&self) -> &Arc<TypeDescriptor> {
        &self.response
    }
}

/// Builder for creating TypeDescriptor instances.
#[derive(Debug)]
pub struct TypeDescriptorBuilder {
    name: String,
    fields: Vec<FieldDescriptor>,
    constants: Vec<ConstantDescriptor>,
}

impl TypeDescriptorBuilder {
    /// Create a new builder for a record type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            constants: Vec::new(),
        }
    }

    /// Add a field by type string.
    pub fn field(mut self, name: impl Into<String>, type_string: impl Into<String>) -> Self {
        self.fields.push(FieldDescriptor::new(name, type_string));
        self
    }

    /// Add a constant.
    pub fn constant(
        mut self,
        name: impl Into<String>,
        type_string: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.constants.push(ConstantDescriptor {
            name: name.into(),
            type_string: type_string.into(),
            value: value.into(),
        });
        self
    }

    /// Build the TypeDescriptor.
    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor::new(self.name, self.fields, self.constants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PrimitiveKind;

    #[test]
    fn test_descriptor_preserves_order() {
        let desc = TypeDescriptorBuilder::new("geometry_msgs/Point")
            .field("x", "float64")
            .field("y", "float64")
            .field("z", "float64")
            .build();

        let names: Vec<_> = desc.slots().map(|(name, _)| name).collect();
        assert_eq!(names, ["x", "y", "z"]);
        assert_eq!(desc.field_index("z"), Some(2));
        assert!(desc.field("w").is_none());
        assert_eq!(
            desc.field("x").map(|f| &f.field_type),
            Some(&FieldType::Primitive(PrimitiveKind::F64))
        );
        assert!(!desc.is_header());
    }

    #[test]
    fn test_header_detection() {
        let desc = TypeDescriptorBuilder::new("std_msgs/Header")
            .field("seq", "uint32")
            .field("stamp", "time")
            .field("frame_id", "string")
            .build();
        assert!(desc.is_header());
        assert_eq!(desc.len(), 3);
    }

    #[test]
    fn test_constants() {
        let desc = TypeDescriptorBuilder::new("my_msgs/Mode")
            .constant("IDLE", "uint8", "0")
            .constant("RUN", "uint8", "1")
            .field("mode", "uint8")
            .build();
        assert_eq!(desc.constants().len(), 2);
        assert_eq!(desc.constants()[1].value, "1");
        assert_eq!(desc.len(), 1);
    }
}
