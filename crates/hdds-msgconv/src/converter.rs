// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Message converter facade used by transport layers.

use crate::clock::{Clock, SystemClock};
use crate::convert::{serialize_record, serialize_value, Deserializer};
use crate::error::Result;
use crate::record::{FieldValue, Record};
use crate::registry::TypeRegistry;
use crate::types::{ServiceDescriptor, TypeDescriptor};
use serde_json::Value;
use std::sync::Arc;

/// Converts between JSON values and typed records.
///
/// Cloning is cheap; clones share the registry and clock.
///
/// # Example
///
/// ```rust
/// use hdds_msgconv::registry::MemoryProvider;
/// use hdds_msgconv::{MessageConverter, TypeRegistry};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let registry = TypeRegistry::new(Arc::new(MemoryProvider::with_builtins()));
/// let converter = MessageConverter::new(Arc::new(registry));
///
/// let point = converter
///     .deserialize(&json!({"x": 1.0, "y": 2.0}), "geometry_msgs/Point")
///     .unwrap();
/// assert_eq!(
///     converter.serialize(&point),
///     json!({"x": 1.0, "y": 2.0, "z": 0.0})
/// );
/// ```
#[derive(Clone)]
pub struct MessageConverter {
    registry: Arc<TypeRegistry>,
    clock: Arc<dyn Clock>,
}

impl MessageConverter {
    /// Create a converter stamping with the wall clock.
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self {
            registry,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used for `"now"` and header stamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Resolve a message type through the registry.
    pub fn resolve_message_type(&self, typestring: &str) -> Result<Arc<TypeDescriptor>> {
        self.registry.resolve_message_type(typestring)
    }

    /// Resolve a service type through the registry.
    pub fn resolve_service_type(&self, typestring: &str) -> Result<Arc<ServiceDescriptor>> {
        self.registry.resolve_service_type(typestring)
    }

    /// Record -> JSON object.
    pub fn serialize(&self, record: &Record) -> Value {
        serialize_record(record)
    }

    /// Field value -> JSON; only record values can be serialized.
    pub fn serialize_value(&self, value: &FieldValue) -> Result<Value> {
        serialize_value(value)
    }

    /// JSON -> new record of `typestring`, starting from the type's defaults.
    pub fn deserialize(&self, value: &Value, typestring: &str) -> Result<Record> {
        let descriptor = self.registry.resolve_message_type(typestring)?;
        self.deserialize_as(value, &descriptor)
    }

    /// JSON -> service request record.
    pub fn deserialize_request(&self, value: &Value, service: &str) -> Result<Record> {
        let service = self.registry.resolve_service_type(service)?;
        self.deserialize_as(value, service.request())
    }

    /// JSON -> service response record.
    pub fn deserialize_response(&self, value: &Value, service: &str) -> Result<Record> {
        let service = self.registry.resolve_service_type(service)?;
        self.deserialize_as(value, service.response())
    }

    /// Apply a JSON object onto an existing record.
    ///
    /// Only the fields named in `value` change.
    pub fn populate(&self, value: &Value, target: &mut Record) -> Result<()> {
        Deserializer::new(&self.registry, self.clock.as_ref(), target.type_name())
            .populate(value, target)
    }

    fn deserialize_as(&self, value: &Value, descriptor: &Arc<TypeDescriptor>) -> Result<Record> {
        let mut record = self.registry.instantiate_descriptor(descriptor)?;
        self.populate(value, &mut record)?;
        Ok(record)
    }
}

impl std::fmt::Debug for MessageConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageConverter")
            .field("cached_messages", &self.registry.cached_message_types().len())
            .field("cached_services", &self.registry.cached_service_types().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::error::ConversionError;
    use crate::record::Time;
    use crate::registry::MemoryProvider;
    use serde_json::json;

    fn converter() -> MessageConverter {
        let provider = MemoryProvider::with_builtins()
            .with_service(
                "demo_srvs/AddTwoInts",
                "int64 a\nint64 b\n---\nint64 sum\n",
            )
            .unwrap();
        MessageConverter::new(Arc::new(TypeRegistry::new(Arc::new(provider))))
            .with_clock(Arc::new(FixedClock(Time::new(5, 6))))
    }

    #[test]
    fn test_round_trip_pose() {
        let conv = converter();
        let input = json!({
            "header": {"seq": 3, "frame_id": "map"},
            "pose": {
                "position": {"x": 1.0, "y": -2.5, "z": 0.0},
                "orientation": {"x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0},
            },
        });
        let rec = conv.deserialize(&input, "geometry_msgs/PoseStamped").unwrap();
        let out = conv.serialize(&rec);
        assert_eq!(out["header"]["stamp"], json!({"secs": 5, "nsecs": 6}));
        assert_eq!(out["pose"], input["pose"]);

        let again = conv.deserialize(&out, "geometry_msgs/PoseStamped").unwrap();
        assert_eq!(again, rec);
    }

    #[test]
    fn test_service_request_and_response() {
        let conv = converter();
        let req = conv
            .deserialize_request(&json!({"a": 1, "b": 2}), "demo_srvs/AddTwoInts")
            .unwrap();
        assert_eq!(req.type_name(), "demo_srvs/AddTwoIntsRequest");
        assert_eq!(req.get("b"), Some(&FieldValue::Int(2)));

        let resp = conv
            .deserialize_response(&json!({"sum": 3}), "demo_srvs/AddTwoInts")
            .unwrap();
        assert_eq!(conv.serialize(&resp), json!({"sum": 3}));

        let err = conv
            .deserialize_request(&json!({"sum": 3}), "demo_srvs/AddTwoInts")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Message type demo_srvs/AddTwoIntsRequest does not have a field sum"
        );
    }

    #[test]
    fn test_resolution_errors_surface() {
        let conv = converter();
        let err = conv.deserialize(&json!({}), "onlyonesegment").unwrap_err();
        assert!(matches!(err, ConversionError::InvalidTypeString { .. }));
        assert!(conv.serialize_value(&FieldValue::from("x")).is_err());
    }
}
