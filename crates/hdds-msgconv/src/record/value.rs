// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field values held by a [`Record`].

use super::Record;
use serde_json::Value;

/// Point in time, seconds and nanoseconds since the epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time {
    pub secs: u32,
    pub nsecs: u32,
}

impl Time {
    pub fn new(secs: u32, nsecs: u32) -> Self {
        Self { secs, nsecs }
    }
}

/// Signed time span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration {
    pub secs: i32,
    pub nsecs: i32,
}

impl Duration {
    pub fn new(secs: i32, nsecs: i32) -> Self {
        Self { secs, nsecs }
    }
}

/// A value stored in a record field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    // Primitives
    Bool(bool),
    /// Any signed integer width.
    Int(i64),
    /// Any unsigned integer width.
    UInt(u64),
    /// float32 or float64.
    Float(f64),
    String(String),

    // Builtins
    Bytes(Vec<u8>),
    Time(Time),
    Duration(Duration),

    // Composites
    Record(Record),
    Sequence(Vec<FieldValue>),

    /// Generic value passed through unchanged (lenient binary input).
    Opaque(Value),
}

impl FieldValue {
    /// Short name of the value's shape, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::Time(_) => "time",
            Self::Duration(_) => "duration",
            Self::Record(_) => "record",
            Self::Sequence(_) => "sequence",
            Self::Opaque(_) => "opaque",
        }
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i64 (unsigned values that fit are accepted).
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::UInt(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Try to get as u64 (non-negative signed values are accepted).
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::UInt(v) => Some(*v),
            Self::Int(v) => u64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Try to get as f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<Time> {
        match self {
            Self::Time(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Self::Duration(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_record_mut(&mut self) -> Option<&mut Record> {
        match self {
            Self::Record(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as sequence.
    pub fn as_sequence(&self) -> Option<&[FieldValue]> {
        match self {
            Self::Sequence(v) => Some(v),
            _ => None,
        }
    }
}

// Conversion traits
impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

macro_rules! impl_from_int {
    ($variant:ident as $target:ty: $($ty:ty),*) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(v: $ty) -> Self {
                    Self::$variant(<$target>::from(v))
                }
            }
        )*
    };
}

impl_from_int!(Int as i64: i8, i16, i32, i64);
impl_from_int!(UInt as u64: u8, u16, u32, u64);

impl From<f32> for FieldValue {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<Time> for FieldValue {
    fn from(v: Time) -> Self {
        Self::Time(v)
    }
}

impl From<Duration> for FieldValue {
    fn from(v: Duration) -> Self {
        Self::Duration(v)
    }
}

impl From<Record> for FieldValue {
    fn from(v: Record) -> Self {
        Self::Record(v)
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(v: Vec<FieldValue>) -> Self {
        Self::Sequence(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_conversions() {
        let v = FieldValue::from(-5i16);
        assert_eq!(v, FieldValue::Int(-5));
        assert_eq!(v.as_i64(), Some(-5));
        assert_eq!(v.as_u64(), None);

        let v = FieldValue::from(200u8);
        assert_eq!(v, FieldValue::UInt(200));
        assert_eq!(v.as_i64(), Some(200));

        assert_eq!(FieldValue::UInt(u64::MAX).as_i64(), None);
    }

    #[test]
    fn test_float_and_string() {
        assert_eq!(FieldValue::from(1.5f32).as_f64(), Some(1.5));
        assert_eq!(FieldValue::from("base").as_str(), Some("base"));
        assert_eq!(FieldValue::from(true).as_bool(), Some(true));
        assert_eq!(FieldValue::from(1.0).as_bool(), None);
    }

    #[test]
    fn test_time_values() {
        let t = FieldValue::from(Time::new(10, 20));
        assert_eq!(t.as_time(), Some(Time::new(10, 20)));
        assert_eq!(t.as_duration(), None);
        assert_eq!(t.kind_name(), "time");

        let d = FieldValue::from(Duration::new(-1, 500));
        assert_eq!(d.as_duration().map(|d| d.secs), Some(-1));
    }

    #[test]
    fn test_sequence_value() {
        let v = FieldValue::from(vec![FieldValue::from(1u32), FieldValue::from(2u32)]);
        let seq = v.as_sequence().expect("sequence");
        assert_eq!(seq.len(), 2);
        assert_eq!(seq[1].as_u64(), Some(2));
    }
}
