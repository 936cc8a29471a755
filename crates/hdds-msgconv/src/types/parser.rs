// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Parser for `.msg` / `.srv` definition text.
//!
//! ```text
//! # comment
//! Header header          # field, bare Header -> std_msgs/Header
//! geometry_msgs/Point[] points
//! uint8 MODE_IDLE=0      # constant
//! string GREETING=hi # the rest of the line is the value
//! ```

use super::descriptor::{ServiceDescriptor, TypeDescriptor, TypeDescriptorBuilder};
use super::name::{qualify, TypeName};
use super::primitive::PrimitiveKind;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// Separator between request and response in a service definition.
pub const SERVICE_SEPARATOR: &str = "---";

/// Malformed definition text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {reason}")]
pub struct DefinitionError {
    /// 1-based line number.
    pub line: usize,
    pub reason: String,
}

enum Declaration<'a> {
    Field {
        type_token: &'a str,
        name: &'a str,
    },
    Constant {
        type_token: &'a str,
        name: &'a str,
        value: &'a str,
    },
}

/// Parse a message definition into a descriptor named `type_name`.
pub fn parse_message(type_name: &TypeName, text: &str) -> Result<TypeDescriptor, DefinitionError> {
    parse_lines(
        type_name,
        type_name.package(),
        text.lines().enumerate(),
    )
}

/// Parse a service definition into `<Name>Request` / `<Name>Response`.
pub fn parse_service(
    type_name: &TypeName,
    text: &str,
) -> Result<ServiceDescriptor, DefinitionError> {
    let lines: Vec<(usize, &str)> = text.lines().enumerate().collect();
    let split = lines
        .iter()
        .position(|(_, line)| line.trim() == SERVICE_SEPARATOR)
        .ok_or_else(|| DefinitionError {
            line: lines.len().max(1),
            reason: format!("missing '{}' separator", SERVICE_SEPARATOR),
        })?;

    let package = type_name.package();
    let request_name = type_name.sibling(format!("{}Request", type_name.name()));
    let response_name = type_name.sibling(format!("{}Response", type_name.name()));

    let request = parse_lines(&request_name, package, lines[..split].iter().copied())?;
    let response = parse_lines(&response_name, package, lines[split + 1..].iter().copied())?;

    Ok(ServiceDescriptor::new(
        type_name.to_string(),
        Arc::new(request),
        Arc::new(response),
    ))
}

fn parse_lines<'a>(
    type_name: &TypeName,
    package: &str,
    lines: impl Iterator<Item = (usize, &'a str)>,
) -> Result<TypeDescriptor, DefinitionError> {
    let mut builder = TypeDescriptorBuilder::new(type_name.to_string());
    let mut seen = HashSet::new();

    for (idx, raw) in lines {
        let line = idx + 1;
        let declaration = match parse_line(raw) {
            Ok(Some(decl)) => decl,
            Ok(None) => continue,
            Err(reason) => return Err(DefinitionError { line, reason }),
        };

        let name = match &declaration {
            Declaration::Field { name, .. } | Declaration::Constant { name, .. } => *name,
        };
        if !seen.insert(name) {
            return Err(DefinitionError {
                line,
                reason: format!("duplicate name '{}'", name),
            });
        }

        builder = match declaration {
            Declaration::Field { type_token, name } => {
                builder.field(name, qualify(type_token, package))
            }
            Declaration::Constant {
                type_token,
                name,
                value,
            } => builder.constant(name, type_token, value),
        };
    }

    Ok(builder.build())
}

fn parse_line(raw: &str) -> Result<Option<Declaration<'_>>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let (type_token, rest) = trimmed
        .split_once(char::is_whitespace)
        .ok_or_else(|| format!("missing name after type '{}'", trimmed))?;
    validate_type(type_token)?;

    let rest = rest.trim_start();
    let uncommented = strip_comment(rest);

    if let Some(eq) = uncommented.find('=') {
        let name = uncommented[..eq].trim();
        validate_name(name)?;
        // string constants keep '#' and everything else after '='
        let is_string = PrimitiveKind::from_name(type_token).is_some_and(|k| k.is_string());
        let value = if is_string {
            rest[eq + 1..].trim()
        } else {
            uncommented[eq + 1..].trim()
        };
        if value.is_empty() {
            return Err(format!("constant '{}' has no value", name));
        }
        return Ok(Some(Declaration::Constant {
            type_token,
            name,
            value,
        }));
    }

    let name = uncommented
        .split_whitespace()
        .next()
        .ok_or_else(|| format!("missing name after type '{}'", type_token))?;
    validate_name(name)?;
    Ok(Some(Declaration::Field { type_token, name }))
}

fn strip_comment(text: &str) -> &str {
    match text.find('#') {
        Some(idx) => &text[..idx],
        None => text,
    }
}

fn validate_type(token: &str) -> Result<(), String> {
    let valid = token
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '/' | '[' | ']' | '<' | '='));
    if valid && token.starts_with(|c: char| c.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(format!("invalid type '{}'", token))
    }
}

fn validate_name(name: &str) -> Result<(), String> {
    let mut chars = name.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(format!("invalid name '{}'", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldType;

    fn name(s: &str) -> TypeName {
        TypeName::parse(s).unwrap()
    }

    #[test]
    fn test_parse_message_fields_and_qualification() {
        let text = "\
# A stamped pose
Header header
Pose pose   # bare name, same package
float64[36] covariance
";
        let desc = parse_message(&name("geometry_msgs/PoseWithCovariance"), text).unwrap();
        assert_eq!(desc.name(), "geometry_msgs/PoseWithCovariance");
        let slots: Vec<_> = desc.slots().collect();
        assert_eq!(
            slots,
            [
                ("header", "std_msgs/Header"),
                ("pose", "geometry_msgs/Pose"),
                ("covariance", "float64[36]"),
            ]
        );
        assert!(matches!(
            desc.fields()[2].field_type,
            FieldType::Sequence { .. }
        ));
    }

    #[test]
    fn test_parse_constants() {
        let text = "\
uint8 IDLE=0
uint8 RUN = 1 # running
string GREETING=hello # world
string<=8 TAG=a#b # c
uint8 mode
";
        let desc = parse_message(&name("my_msgs/Mode"), text).unwrap();
        assert_eq!(desc.len(), 1);
        let constants = desc.constants();
        assert_eq!(constants.len(), 4);
        assert_eq!(constants[1].name, "RUN");
        assert_eq!(constants[1].value, "1");
        assert_eq!(constants[2].value, "hello # world");
        assert_eq!(constants[3].type_string, "string<=8");
        assert_eq!(constants[3].value, "a#b # c");
    }

    #[test]
    fn test_parse_errors_report_line() {
        let err = parse_message(&name("a/B"), "int32 x\nint32\n").unwrap_err();
        assert_eq!(err.line, 2);

        let err = parse_message(&name("a/B"), "int32 x\nfloat64 x\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.reason.contains("duplicate"));

        let err = parse_message(&name("a/B"), "int32 9lives\n").unwrap_err();
        assert!(err.reason.contains("invalid name"));

        let err = parse_message(&name("a/B"), "int$ x\n").unwrap_err();
        assert!(err.reason.contains("invalid type"));
    }

    #[test]
    fn test_parse_service() {
        let text = "int64 a\nint64 b\n---\nint64 sum\n";
        let srv = parse_service(&name("rospy_tutorials/AddTwoInts"), text).unwrap();
        assert_eq!(srv.name(), "rospy_tutorials/AddTwoInts");
        assert_eq!(srv.request().name(), "rospy_tutorials/AddTwoIntsRequest");
        assert_eq!(srv.request().len(), 2);
        assert_eq!(srv.response().name(), "rospy_tutorials/AddTwoIntsResponse");
        assert_eq!(srv.response().fields()[0].name, "sum");
    }

    #[test]
    fn test_parse_empty_service() {
        let srv = parse_service(&name("std_srvs/Empty"), "---\n").unwrap();
        assert!(srv.request().is_empty());
        assert!(srv.response().is_empty());

        let err = parse_service(&name("std_srvs/Broken"), "int32 a\n").unwrap_err();
        assert!(err.reason.contains("separator"));
    }
}
