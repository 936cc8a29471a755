// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Conversion error taxonomy.
//!
//! Every failure is terminal for the call that detects it. Nothing in this
//! crate logs or swallows a [`ConversionError`]; translating it into a
//! user-facing reply is the transport layer's job.

use crate::convert::FieldPath;
use crate::registry::TypeFamily;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Boxed cause carried by the load errors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias for conversion and resolution calls.
pub type Result<T, E = ConversionError> = std::result::Result<T, E>;

/// Errors raised while resolving types or converting values.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("{typestring} is not a valid type string")]
    InvalidTypeString { typestring: String },

    #[error("Unable to load the manifest for package {package}. Caused by: {source}")]
    InvalidPackage {
        package: String,
        #[source]
        source: BoxError,
    },

    #[error("Unable to import {package}.{family} from package {package}. Caused by: {source}")]
    InvalidModule {
        package: String,
        family: TypeFamily,
        #[source]
        source: BoxError,
    },

    #[error("Unable to import {family} class {class} from package {package}. Caused by: {source}")]
    InvalidClass {
        package: String,
        family: TypeFamily,
        class: String,
        #[source]
        source: BoxError,
    },

    #[error("Message type {root} does not have a field {path}")]
    NonexistentField { root: String, path: FieldPath },

    #[error("{}", mismatch_message(.root, .path, .expected, .actual))]
    FieldTypeMismatch {
        root: String,
        path: FieldPath,
        expected: String,
        actual: ValueKind,
    },

    #[error("Unable to extract message values from {kind} instance")]
    InvalidMessage { kind: String },
}

impl ConversionError {
    /// Field path the error points at, for the kinds that carry one.
    pub fn path(&self) -> Option<&FieldPath> {
        match self {
            Self::NonexistentField { path, .. } | Self::FieldTypeMismatch { path, .. } => {
                Some(path)
            }
            _ => None,
        }
    }

    /// Whether the error comes from type resolution rather than from the payload.
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidTypeString { .. }
                | Self::InvalidPackage { .. }
                | Self::InvalidModule { .. }
                | Self::InvalidClass { .. }
        )
    }
}

fn mismatch_message(root: &str, path: &FieldPath, expected: &str, actual: &ValueKind) -> String {
    if path.is_empty() {
        format!(
            "Expected a JSON object for type {} but received a {}",
            root, actual
        )
    } else {
        format!(
            "{} message requires a {} for field {}, but got a {}",
            root, expected, path, actual
        )
    }
}

/// Runtime kind of a generic value, as reported in type mismatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Boolean,
    Integer,
    Float,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Classify a JSON value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(n) if n.is_f64() => Self::Float,
            Value::Number(_) => Self::Integer,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_kind() {
        assert_eq!(ValueKind::of(&json!(null)), ValueKind::Null);
        assert_eq!(ValueKind::of(&json!(true)), ValueKind::Boolean);
        assert_eq!(ValueKind::of(&json!(3)), ValueKind::Integer);
        assert_eq!(ValueKind::of(&json!(-3)), ValueKind::Integer);
        assert_eq!(ValueKind::of(&json!(3.5)), ValueKind::Float);
        assert_eq!(ValueKind::of(&json!("x")), ValueKind::String);
        assert_eq!(ValueKind::of(&json!([1])), ValueKind::Array);
        assert_eq!(ValueKind::of(&json!({})), ValueKind::Object);
    }

    #[test]
    fn test_mismatch_message_root_vs_field() {
        let root = ConversionError::FieldTypeMismatch {
            root: "geometry_msgs/Point".into(),
            path: FieldPath::root(),
            expected: "geometry_msgs/Point".into(),
            actual: ValueKind::Array,
        };
        assert_eq!(
            root.to_string(),
            "Expected a JSON object for type geometry_msgs/Point but received a array"
        );

        let nested = ConversionError::FieldTypeMismatch {
            root: "geometry_msgs/Pose".into(),
            path: FieldPath::root().child("position").child("x"),
            expected: "float64".into(),
            actual: ValueKind::String,
        };
        assert_eq!(
            nested.to_string(),
            "geometry_msgs/Pose message requires a float64 for field position.x, but got a string"
        );
    }

    #[test]
    fn test_load_errors_keep_cause() {
        let cause: BoxError = "no such directory".into();
        let err = ConversionError::InvalidPackage {
            package: "nav_msgs".into(),
            source: cause,
        };
        assert!(err.to_string().contains("nav_msgs"));
        assert!(err.to_string().ends_with("Caused by: no such directory"));
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("no such directory"));
        assert!(err.is_resolution_error());
    }
}
