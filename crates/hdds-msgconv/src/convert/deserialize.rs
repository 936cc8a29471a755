// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! JSON -> record.
//!
//! Conversion writes into existing slots: a record field keeps its current
//! value unless the input names it, so a JSON object may update any subset
//! of a record's fields. Errors abort the call; fields assigned before the
//! error keep their new values.
//!
//! Accepted JSON per declared primitive:
//!
//! | JSON     | Schema types                                   |
//! |----------|------------------------------------------------|
//! | boolean  | `bool`                                         |
//! | integer  | every integer width, `float32`, `float64`      |
//! | float    | `float32`, `float64`                           |
//! | string   | `string` (non-ASCII characters are dropped)    |

use crate::clock::Clock;
use crate::convert::FieldPath;
use crate::error::{ConversionError, Result, ValueKind};
use crate::record::{Duration, FieldValue, Record, Time};
use crate::registry::TypeRegistry;
use crate::types::{FieldType, PrimitiveKind, TimeKind};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Field of a header-convention record that is always server-stamped.
const HEADER_STAMP_FIELD: &str = "stamp";

/// Literal resolving to the live clock in `time` fields.
const NOW_LITERAL: &str = "now";

/// Recursive-descent JSON reader for one root record.
pub struct Deserializer<'a> {
    registry: &'a TypeRegistry,
    clock: &'a dyn Clock,
    root: String,
}

impl<'a> Deserializer<'a> {
    /// Create a reader reporting errors against `root` (a type name).
    pub fn new(registry: &'a TypeRegistry, clock: &'a dyn Clock, root: impl Into<String>) -> Self {
        Self {
            registry,
            clock,
            root: root.into(),
        }
    }

    /// Apply a JSON object onto `target`.
    pub fn populate(&self, value: &Value, target: &mut Record) -> Result<()> {
        let root = FieldPath::root();
        let map = self.expect_object(value, target.type_name(), &root)?;
        self.record(map, target, &root)
    }

    fn record(&self, map: &Map<String, Value>, target: &mut Record, path: &FieldPath) -> Result<()> {
        let descriptor = Arc::clone(target.descriptor());
        let header = descriptor.is_header();
        if header {
            if let Some(stamp) = target.get_mut(HEADER_STAMP_FIELD) {
                *stamp = FieldValue::Time(self.clock.now());
            }
        }

        for (key, item) in map {
            if header && key == HEADER_STAMP_FIELD {
                continue;
            }
            let field_path = path.child(key);
            let nonexistent = || ConversionError::NonexistentField {
                root: self.root.clone(),
                path: field_path.clone(),
            };
            let index = descriptor.field_index(key).ok_or_else(nonexistent)?;
            let slot = target.value_at_mut(index).ok_or_else(nonexistent)?;
            self.into_slot(item, &descriptor.fields()[index].field_type, slot, &field_path)?;
        }
        Ok(())
    }

    /// Convert `value` into `slot`, using the slot's current content as the
    /// seed where the rules allow it.
    fn into_slot(
        &self,
        value: &Value,
        field_type: &FieldType,
        slot: &mut FieldValue,
        path: &FieldPath,
    ) -> Result<()> {
        match field_type {
            FieldType::Binary { .. } => *slot = binary(value),
            FieldType::Time(kind) => self.time(value, *kind, slot),
            FieldType::Primitive(kind) => *slot = self.primitive(value, *kind, path)?,
            FieldType::Sequence { element, .. } => {
                let items = value
                    .as_array()
                    .ok_or_else(|| self.mismatch(path, field_type, value))?;
                let mut converted = Vec::with_capacity(items.len());
                for item in items {
                    let mut fresh = self.registry.default_value(element)?;
                    self.into_slot(item, element, &mut fresh, path)?;
                    converted.push(fresh);
                }
                *slot = FieldValue::Sequence(converted);
            }
            FieldType::Record(name) => {
                let map = self.expect_object(value, name, path)?;
                if !matches!(slot, FieldValue::Record(_)) {
                    *slot = FieldValue::Record(self.registry.instantiate(name)?);
                }
                if let FieldValue::Record(nested) = slot {
                    self.record(map, nested, path)?;
                }
            }
        }
        Ok(())
    }

    fn time(&self, value: &Value, kind: TimeKind, slot: &mut FieldValue) {
        if kind == TimeKind::Time && value.as_str() == Some(NOW_LITERAL) {
            *slot = FieldValue::Time(self.clock.now());
            return;
        }

        let seeded = matches!(
            (kind, &*slot),
            (TimeKind::Time, FieldValue::Time(_)) | (TimeKind::Duration, FieldValue::Duration(_))
        );
        if !seeded {
            *slot = match kind {
                TimeKind::Time => FieldValue::Time(Time::default()),
                TimeKind::Duration => FieldValue::Duration(Duration::default()),
            };
        }

        // Anything but an object leaves the seed as is; so do members that
        // are missing or out of range.
        let Some(map) = value.as_object() else {
            return;
        };
        match slot {
            FieldValue::Time(t) => {
                if let Some(secs) = member::<u32>(map, "secs") {
                    t.secs = secs;
                }
                if let Some(nsecs) = member::<u32>(map, "nsecs") {
                    t.nsecs = nsecs;
                }
            }
            FieldValue::Duration(d) => {
                if let Some(secs) = member::<i32>(map, "secs") {
                    d.secs = secs;
                }
                if let Some(nsecs) = member::<i32>(map, "nsecs") {
                    d.nsecs = nsecs;
                }
            }
            _ => {}
        }
    }

    fn primitive(&self, value: &Value, kind: PrimitiveKind, path: &FieldPath) -> Result<FieldValue> {
        let converted = match value {
            Value::Bool(b) if kind == PrimitiveKind::Bool => FieldValue::Bool(*b),
            Value::Number(n) if kind.is_float() => FieldValue::Float(n.as_f64().unwrap_or_default()),
            // Wrapping casts, no range check
            Value::Number(n) if kind.is_integer() && !n.is_f64() => match (n.as_i64(), n.as_u64()) {
                (Some(v), _) if kind.is_signed() => FieldValue::Int(v),
                (_, Some(v)) if !kind.is_signed() => FieldValue::UInt(v),
                (Some(v), None) => FieldValue::UInt(v as u64),
                (None, Some(v)) => FieldValue::Int(v as i64),
                _ => return Err(self.mismatch(path, &FieldType::Primitive(kind), value)),
            },
            Value::String(s) if kind.is_string() => FieldValue::String(to_ascii(s)),
            _ => return Err(self.mismatch(path, &FieldType::Primitive(kind), value)),
        };
        Ok(converted)
    }

    fn expect_object<'v>(
        &self,
        value: &'v Value,
        expected: &str,
        path: &FieldPath,
    ) -> Result<&'v Map<String, Value>> {
        value.as_object().ok_or_else(|| ConversionError::FieldTypeMismatch {
            root: self.root.clone(),
            path: path.clone(),
            expected: expected.to_string(),
            actual: ValueKind::of(value),
        })
    }

    fn mismatch(&self, path: &FieldPath, expected: &FieldType, value: &Value) -> ConversionError {
        ConversionError::FieldTypeMismatch {
            root: self.root.clone(),
            path: path.clone(),
            expected: expected.to_string(),
            actual: ValueKind::of(value),
        }
    }
}

/// Binary input never fails: undecodable shapes are kept verbatim.
fn binary(value: &Value) -> FieldValue {
    match value {
        Value::String(text) => match STANDARD.decode(text) {
            Ok(bytes) => FieldValue::Bytes(bytes),
            Err(e) => {
                log::trace!("keeping non-base64 binary input as is: {}", e);
                FieldValue::Opaque(value.clone())
            }
        },
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_u64().and_then(|b| u8::try_from(b).ok()))
            .collect::<Option<Vec<u8>>>()
            .map_or_else(|| FieldValue::Opaque(value.clone()), FieldValue::Bytes),
        other => FieldValue::Opaque(other.clone()),
    }
}

fn member<T: TryFrom<i64>>(map: &Map<String, Value>, key: &str) -> Option<T> {
    map.get(key)?.as_i64().and_then(|v| T::try_from(v).ok())
}

fn to_ascii(text: &str) -> String {
    text.chars().filter(char::is_ascii).collect()
}
