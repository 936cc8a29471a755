// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! `package/Type` name resolution.

use crate::error::{ConversionError, Result};
use super::primitive::is_builtin_name;
use std::fmt;

/// Package that owns the conventional header type.
pub const HEADER_PACKAGE: &str = "std_msgs";

/// Type names following the header convention (stamp is server-side).
pub const HEADER_TYPES: [&str; 3] = ["Header", "std_msgs/Header", "roslib/Header"];

/// A validated `package/Type` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeName {
    package: String,
    name: String,
}

impl TypeName {
    /// Parse a type string, tolerating leading, trailing and doubled slashes.
    ///
    /// `"/pkg//Type/"` and `"pkg/Type"` parse to the same name. Anything that
    /// does not leave exactly two non-empty segments is rejected.
    pub fn parse(typestring: &str) -> Result<Self> {
        let mut segments = typestring.split('/').filter(|s| !s.is_empty());
        match (segments.next(), segments.next(), segments.next()) {
            (Some(package), Some(name), None) => Ok(Self {
                package: package.to_string(),
                name: name.to_string(),
            }),
            _ => Err(ConversionError::InvalidTypeString {
                typestring: typestring.to_string(),
            }),
        }
    }

    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Same package, different type name (e.g. `AddTwoIntsRequest`).
    pub fn sibling(&self, name: impl Into<String>) -> Self {
        Self::new(self.package.clone(), name)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.package, self.name)
    }
}

/// Normalize a type string to its `package/Type` form.
pub fn normalize(typestring: &str) -> Result<String> {
    TypeName::parse(typestring).map(|name| name.to_string())
}

/// Qualify a field type token declared inside `package`.
///
/// Builtins stay as they are, a bare `Header` refers to `std_msgs/Header`,
/// and any other bare name belongs to the declaring package. Array suffixes
/// are preserved.
pub fn qualify(type_token: &str, package: &str) -> String {
    let (base, suffix) = match type_token.find('[') {
        Some(idx) => type_token.split_at(idx),
        None => (type_token, ""),
    };

    if is_builtin_name(base) || base.contains('/') {
        return type_token.to_string();
    }
    if base == "Header" {
        return format!("{}/Header{}", HEADER_PACKAGE, suffix);
    }
    format!("{}/{}{}", package, base, suffix)
}

/// Whether `name` follows the header convention.
pub fn is_header_type(name: &str) -> bool {
    HEADER_TYPES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tolerates_extra_slashes() {
        let a = TypeName::parse("/pkg//Type/").unwrap();
        let b = TypeName::parse("pkg/Type").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "pkg/Type");
        assert_eq!(a.package(), "pkg");
        assert_eq!(a.name(), "Type");
    }

    #[test]
    fn test_parse_rejects_wrong_segment_count() {
        for bad in ["onlyonesegment", "", "/", "a/b/c", "std_msgs/msg/String"] {
            let err = TypeName::parse(bad).unwrap_err();
            assert!(matches!(err, ConversionError::InvalidTypeString { .. }), "{}", bad);
        }
        assert_eq!(
            normalize("onlyonesegment").unwrap_err().to_string(),
            "onlyonesegment is not a valid type string"
        );
    }

    #[test]
    fn test_qualify() {
        assert_eq!(qualify("float64", "geometry_msgs"), "float64");
        assert_eq!(qualify("time", "geometry_msgs"), "time");
        assert_eq!(qualify("uint8[]", "sensor_msgs"), "uint8[]");
        assert_eq!(qualify("Header", "geometry_msgs"), "std_msgs/Header");
        assert_eq!(qualify("Point", "geometry_msgs"), "geometry_msgs/Point");
        assert_eq!(qualify("Point[3]", "geometry_msgs"), "geometry_msgs/Point[3]");
        assert_eq!(qualify("std_msgs/String[]", "x"), "std_msgs/String[]");
    }

    #[test]
    fn test_header_convention() {
        assert!(is_header_type("std_msgs/Header"));
        assert!(is_header_type("roslib/Header"));
        assert!(!is_header_type("my_msgs/Header"));
    }
}
