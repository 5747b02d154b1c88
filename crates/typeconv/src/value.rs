// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dynamic value types.
//!
//! Every predicate and mapper works on [`DynamicValue`], the erased runtime
//! representation. Descriptors never need to know a static Rust type.

use std::collections::HashMap;

/// A dynamic value that can hold any checked or converted value.
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicValue {
    // Scalars
    Null,
    Undefined,
    Bool(bool),
    Int(i64),
    Float(f64),
    BigInt(i128),
    String(String),

    // Composites
    Sequence(Vec<DynamicValue>),
    Struct(HashMap<String, DynamicValue>),
    Map(Vec<(DynamicValue, DynamicValue)>),
    Set(Vec<DynamicValue>),
}

impl DynamicValue {
    /// Short name of the value's variant, used in logs and mapper errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Undefined => "undefined",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::BigInt(_) => "bigint",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Struct(_) => "struct",
            Self::Map(_) => "map",
            Self::Set(_) => "set",
        }
    }

    /// Check if value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check if value is undefined (an absent optional field).
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Check if value is numeric (`Int` or `Float`).
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as f64 (integers are widened).
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Try to get as i128.
    pub fn as_bigint(&self) -> Option<i128> {
        match self {
            Self::BigInt(v) => Some(*v),
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

    /// Try to get as sequence.
    pub fn as_sequence(&self) -> Option<&[DynamicValue]> {
        match self {
            Self::Sequence(v) => Some(v),
            _ => None,
        }
    }

    /// Consume into the sequence elements.
    pub fn into_sequence(self) -> Option<Vec<DynamicValue>> {
        match self {
            Self::Sequence(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get struct fields.
    pub fn as_struct(&self) -> Option<&HashMap<String, DynamicValue>> {
        match self {
            Self::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    /// Try to get struct field.
    pub fn get_field(&self, name: &str) -> Option<&DynamicValue> {
        match self {
            Self::Struct(fields) => fields.get(name),
            _ => None,
        }
    }

    /// Set struct field.
    pub fn set_field(&mut self, name: impl Into<String>, value: DynamicValue) -> bool {
        match self {
            Self::Struct(fields) => {
                fields.insert(name.into(), value);
                true
            }
            _ => false,
        }
    }

    /// Try to get map entries.
    pub fn as_map(&self) -> Option<&[(DynamicValue, DynamicValue)]> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Try to get set members.
    pub fn as_set(&self) -> Option<&[DynamicValue]> {
        match self {
            Self::Set(members) => Some(members),
            _ => None,
        }
    }

    /// Build a struct value from `(name, value)` pairs.
    pub fn record<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, DynamicValue)>,
        K: Into<String>,
    {
        Self::Struct(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

// Conversion traits
impl From<bool> for DynamicValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for DynamicValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for DynamicValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i128> for DynamicValue {
    fn from(v: i128) -> Self {
        Self::BigInt(v)
    }
}

impl From<f64> for DynamicValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for DynamicValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for DynamicValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl<T: Into<DynamicValue>> From<Vec<T>> for DynamicValue {
    fn from(v: Vec<T>) -> Self {
        Self::Sequence(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<DynamicValue>> From<Option<T>> for DynamicValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Undefined, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_values() {
        let v = DynamicValue::from(42);
        assert_eq!(v.as_i64(), Some(42));
        assert_eq!(v.as_f64(), Some(42.0));
        assert!(v.is_number());
        assert_eq!(v.as_str(), None);

        let v = DynamicValue::from("hello");
        assert_eq!(v.as_str(), Some("hello"));
        assert_eq!(v.kind_name(), "string");

        assert_eq!(DynamicValue::from(7i128).as_bigint(), Some(7));
        assert!(!DynamicValue::from(7i128).is_number());
    }

    #[test]
    fn test_option_maps_to_undefined() {
        assert!(DynamicValue::from(None::<i64>).is_undefined());
        assert_eq!(DynamicValue::from(Some(true)), DynamicValue::Bool(true));
    }

    #[test]
    fn test_struct_value() {
        let mut v = DynamicValue::record([("x", DynamicValue::from(10))]);
        assert!(v.set_field("y", 20.into()));

        assert_eq!(v.get_field("x").and_then(DynamicValue::as_i64), Some(10));
        assert_eq!(v.get_field("y").and_then(DynamicValue::as_i64), Some(20));
        assert!(v.get_field("z").is_none());

        let mut not_struct = DynamicValue::Null;
        assert!(!not_struct.set_field("x", 1.into()));
    }

    #[test]
    fn test_sequence_value() {
        let v = DynamicValue::from(vec![1, 2, 3]);
        let seq = v.as_sequence().expect("sequence");
        assert_eq!(seq.len(), 3);
        assert_eq!(seq[2].as_i64(), Some(3));
        assert_eq!(v.into_sequence().map(|s| s.len()), Some(3));
    }
}
