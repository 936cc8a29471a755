// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field type classification.
//!
//! A schema type string is classified once, when its descriptor is built,
//! into a closed [`FieldType`]. The serializer and deserializer match on it
//! exhaustively and never re-inspect the string.

use super::primitive::{PrimitiveKind, TimeKind};
use std::fmt;

/// Length annotation of an array type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayBound {
    /// `T[]`
    Unbounded,
    /// `T[N]`
    Fixed(usize),
    /// `T[<=N]`
    Bounded(usize),
}

impl ArrayBound {
    fn parse(inner: &str) -> Self {
        let inner = inner.trim();
        if let Some(max) = inner.strip_prefix("<=").and_then(|m| m.trim().parse().ok()) {
            return Self::Bounded(max);
        }
        match inner.parse() {
            Ok(len) => Self::Fixed(len),
            Err(_) => Self::Unbounded,
        }
    }

    /// Fixed length, if any.
    pub fn fixed_len(&self) -> Option<usize> {
        match self {
            Self::Fixed(len) => Some(*len),
            _ => None,
        }
    }
}

impl fmt::Display for ArrayBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbounded => f.write_str("[]"),
            Self::Fixed(len) => write!(f, "[{}]", len),
            Self::Bounded(max) => write!(f, "[<={}]", max),
        }
    }
}

/// Classified schema type of a field or sequence element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// `uint8[...]` / `char[...]`, carried as base64 text.
    Binary {
        element: PrimitiveKind,
        bound: ArrayBound,
    },
    /// `time` / `duration`.
    Time(TimeKind),
    /// Scalar primitive.
    Primitive(PrimitiveKind),
    /// Any other array type.
    Sequence {
        element: Box<FieldType>,
        bound: ArrayBound,
    },
    /// Nested record, by normalized `package/Type` name.
    Record(String),
}

impl FieldType {
    /// Classify a schema type string.
    ///
    /// Binary arrays take priority over generic sequences; anything that is
    /// not builtin is a nested record.
    pub fn classify(type_string: &str) -> Self {
        let type_string = type_string.trim();

        if let Some((base, bound)) = split_array(type_string) {
            return match PrimitiveKind::from_name(base) {
                Some(element @ (PrimitiveKind::U8 | PrimitiveKind::Char)) => {
                    Self::Binary { element, bound }
                }
                _ => Self::Sequence {
                    element: Box::new(Self::classify(base)),
                    bound,
                },
            };
        }

        if let Some(kind) = TimeKind::from_name(type_string) {
            return Self::Time(kind);
        }
        if let Some(kind) = PrimitiveKind::from_name(type_string) {
            return Self::Primitive(kind);
        }
        Self::Record(type_string.to_string())
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence { .. } | Self::Binary { .. })
    }

    /// Nested record type name, if this is a record.
    pub fn record_name(&self) -> Option<&str> {
        match self {
            Self::Record(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary { element, bound } => write!(f, "{}{}", element, bound),
            Self::Time(kind) => write!(f, "{}", kind),
            Self::Primitive(kind) => write!(f, "{}", kind),
            Self::Sequence { element, bound } => write!(f, "{}{}", element, bound),
            Self::Record(name) => f.write_str(name),
        }
    }
}

/// Split `base[...]` into the base type and its bound.
fn split_array(type_string: &str) -> Option<(&str, ArrayBound)> {
    let open = type_string.find('[')?;
    let inner = type_string[open + 1..].strip_suffix(']')?;
    Some((type_string[..open].trim(), ArrayBound::parse(inner)))
}
