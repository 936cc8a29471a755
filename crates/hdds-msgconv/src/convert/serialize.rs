// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Record -> JSON.
//!
//! Each field is encoded according to its declared [`FieldType`]:
//!
//! | Declared type      | JSON                          |
//! |--------------------|-------------------------------|
//! | `uint8[]`/`char[]` | base64 string                 |
//! | `time`/`duration`  | `{"secs": .., "nsecs": ..}`   |
//! | primitive          | bool / number / string        |
//! | `T[]`              | array (empty stays empty)     |
//! | `pkg/Type`         | object in declared field order|

use crate::error::{ConversionError, Result};
use crate::record::{FieldValue, Record};
use crate::types::FieldType;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::{json, Map, Value};

/// Serialize a record into a JSON object.
pub fn serialize_record(record: &Record) -> Value {
    let mut map = Map::with_capacity(record.descriptor().len());
    for (field, (_, value)) in record.descriptor().fields().iter().zip(record.fields()) {
        map.insert(field.name.clone(), serialize_field(value, &field.field_type));
    }
    Value::Object(map)
}

/// Serialize a value that must carry a record type.
///
/// Anything but [`FieldValue::Record`] has no type to drive the encoding
/// and is rejected with [`ConversionError::InvalidMessage`].
pub fn serialize_value(value: &FieldValue) -> Result<Value> {
    match value {
        FieldValue::Record(record) => Ok(serialize_record(record)),
        other => Err(ConversionError::InvalidMessage {
            kind: other.kind_name().to_string(),
        }),
    }
}

fn serialize_field(value: &FieldValue, field_type: &FieldType) -> Value {
    match (field_type, value) {
        (FieldType::Binary { .. }, FieldValue::Bytes(bytes)) => Value::String(STANDARD.encode(bytes)),
        (FieldType::Binary { .. }, FieldValue::Sequence(items)) => match sequence_bytes(items) {
            Some(bytes) => Value::String(STANDARD.encode(bytes)),
            None => plain(value),
        },
        (FieldType::Time(_), FieldValue::Time(t)) => json!({ "secs": t.secs, "nsecs": t.nsecs }),
        (FieldType::Time(_), FieldValue::Duration(d)) => json!({ "secs": d.secs, "nsecs": d.nsecs }),
        (FieldType::Sequence { element, .. }, FieldValue::Sequence(items)) => Value::Array(
            items
                .iter()
                .map(|item| serialize_field(item, element))
                .collect(),
        ),
        (FieldType::Record(_), FieldValue::Record(record)) => serialize_record(record),
        // Primitives, lenient binary passthrough and values stored under a
        // different shape than declared.
        _ => plain(value),
    }
}

/// Byte values of an integer sequence, if every element fits in a `u8`.
fn sequence_bytes(items: &[FieldValue]) -> Option<Vec<u8>> {
    items
        .iter()
        .map(|item| match item {
            FieldValue::Int(n) => u8::try_from(*n).ok(),
            FieldValue::UInt(n) => u8::try_from(*n).ok(),
            _ => None,
        })
        .collect()
}

/// Encode a value by its own shape.
fn plain(value: &FieldValue) -> Value {
    match value {
        FieldValue::Bool(b) => Value::Bool(*b),
        FieldValue::Int(n) => json!(*n),
        FieldValue::UInt(n) => json!(*n),
        // NaN and infinities have no JSON form
        FieldValue::Float(f) => serde_json::Number::from_f64(*f).map_or(Value::Null, Value::Number),
        FieldValue::String(s) => Value::String(s.clone()),
        FieldValue::Bytes(bytes) => Value::String(STANDARD.encode(bytes)),
        FieldValue::Time(t) => json!({ "secs": t.secs, "nsecs": t.nsecs }),
        FieldValue::Duration(d) => json!({ "secs": d.secs, "nsecs": d.nsecs }),
        FieldValue::Record(record) => serialize_record(record),
        FieldValue::Sequence(items) => Value::Array(items.iter().map(plain).collect()),
        FieldValue::Opaque(raw) => raw.clone(),
    }
}
