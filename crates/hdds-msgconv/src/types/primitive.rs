// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Primitive and time-like schema types.

use std::fmt;

/// Primitive type kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    /// Signed 8-bit (deprecated alias of int8).
    Byte,
    /// Unsigned 8-bit (deprecated alias of uint8).
    Char,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    String { max_length: Option<usize> },
}

impl PrimitiveKind {
    /// Parse a schema primitive name (`int32`, `string`, `string<=16`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "bool" => Self::Bool,
            "byte" => Self::Byte,
            "char" => Self::Char,
            "int8" => Self::I8,
            "uint8" => Self::U8,
            "int16" => Self::I16,
            "uint16" => Self::U16,
            "int32" => Self::I32,
            "uint32" => Self::U32,
            "int64" => Self::I64,
            "uint64" => Self::U64,
            "float32" => Self::F32,
            "float64" => Self::F64,
            "string" => Self::String { max_length: None },
            other => {
                let bound = other.strip_prefix("string<=")?;
                Self::String {
                    max_length: Some(bound.parse().ok()?),
                }
            }
        };
        Some(kind)
    }

    /// Whether the kind belongs to the integer family (including byte/char).
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::Byte
                | Self::Char
                | Self::I8
                | Self::U8
                | Self::I16
                | Self::U16
                | Self::I32
                | Self::U32
                | Self::I64
                | Self::U64
        )
    }

    /// Whether the kind is a signed integer.
    pub fn is_signed(&self) -> bool {
        matches!(
            self,
            Self::Byte | Self::I8 | Self::I16 | Self::I32 | Self::I64
        )
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::String { .. })
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::Byte => "byte",
            Self::Char => "char",
            Self::I8 => "int8",
            Self::U8 => "uint8",
            Self::I16 => "int16",
            Self::U16 => "uint16",
            Self::I32 => "int32",
            Self::U32 => "uint32",
            Self::I64 => "int64",
            Self::U64 => "uint64",
            Self::F32 => "float32",
            Self::F64 => "float64",
            Self::String { max_length: None } => "string",
            Self::String {
                max_length: Some(max),
            } => return write!(f, "string<={}", max),
        };
        f.write_str(name)
    }
}

/// Time-like builtin kinds, encoded as `{secs, nsecs}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeKind {
    Time,
    Duration,
}

impl TimeKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "time" => Some(Self::Time),
            "duration" => Some(Self::Duration),
            _ => None,
        }
    }
}

impl fmt::Display for TimeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Time => f.write_str("time"),
            Self::Duration => f.write_str("duration"),
        }
    }
}

/// Whether `name` is a builtin (primitive or time-like) type name.
pub fn is_builtin_name(name: &str) -> bool {
    PrimitiveKind::from_name(name).is_some() || TimeKind::from_name(name).is_some()
}
