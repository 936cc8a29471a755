// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Record <-> JSON conversion.
//!
//! Both directions dispatch on the classified [`FieldType`](crate::types::FieldType)
//! of each field, in the same priority order: binary arrays, time-like
//! values, primitives, sequences, nested records.

mod deserialize;
mod path;
mod serialize;

pub use deserialize::Deserializer;
pub use path::FieldPath;
pub use serialize::{serialize_record, serialize_value};
