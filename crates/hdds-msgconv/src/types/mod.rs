// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema types: names, classified field types, descriptors and the
//! definition parser that produces them.

mod descriptor;
mod field_type;
mod name;
mod parser;
mod primitive;

pub use descriptor::{
    ConstantDescriptor, FieldDescriptor, ServiceDescriptor, TypeDescriptor, TypeDescriptorBuilder,
};
pub use field_type::{ArrayBound, FieldType};
pub use name::{is_header_type, normalize, qualify, TypeName, HEADER_TYPES};
pub use parser::{parse_message, parse_service, DefinitionError, SERVICE_SEPARATOR};
pub use primitive::{is_builtin_name, PrimitiveKind, TimeKind};
