// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors for runtime type information.
//!
//! A [`TypeDescriptor`] is a named, optionally parameterized type with a
//! membership predicate. Parameters are [`TypeArg`]s: either another
//! descriptor or a [`Placeholder`] standing for "any instantiation" inside a
//! pattern. Descriptors are immutable once built and always shared through
//! `Arc`, so pointer identity is meaningful.

use crate::error::{Result, TypeError};
use crate::value::DynamicValue;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Membership predicate of a descriptor.
pub type CheckFn = Arc<dyn Fn(&DynamicValue) -> Result<bool> + Send + Sync>;

/// Metadata key marking a descriptor as an optional record field.
pub const META_OPTIONAL: &str = "optional";

static NEXT_PLACEHOLDER: AtomicU64 = AtomicU64::new(1);

/// Generic parameter marker.
///
/// Only meaningful inside pattern descriptors. It carries no predicate, so any
/// attempt to check a value through it fails with
/// [`TypeError::PlaceholderEvaluated`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placeholder(u64);

impl Placeholder {
    /// Create a fresh placeholder.
    pub fn new() -> Self {
        Self(NEXT_PLACEHOLDER.fetch_add(1, Ordering::Relaxed))
    }

    /// Process-unique identity of this placeholder.
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl Default for Placeholder {
    fn default() -> Self {
        Self::new()
    }
}

/// Shorthand for a fresh placeholder argument.
pub fn param() -> TypeArg {
    TypeArg::Param(Placeholder::new())
}

/// A parameter argument: a concrete descriptor or a placeholder.
#[derive(Clone)]
pub enum TypeArg {
    Type(Arc<TypeDescriptor>),
    Param(Placeholder),
}

impl TypeArg {
    /// Check if this argument is a placeholder.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Param(_))
    }

    /// Get the descriptor if this argument is concrete.
    pub fn as_type(&self) -> Option<&Arc<TypeDescriptor>> {
        match self {
            Self::Type(ty) => Some(ty),
            Self::Param(_) => None,
        }
    }

    /// Get the descriptor, refusing placeholders on behalf of `owner`.
    ///
    /// Predicates of parameterized families call this before evaluating a
    /// sub-descriptor.
    pub fn require_concrete(&self, owner: &str) -> Result<&Arc<TypeDescriptor>> {
        self.as_type().ok_or_else(|| TypeError::PlaceholderEvaluated {
            type_name: owner.to_string(),
        })
    }

    /// Check `value` through this argument.
    pub fn check(&self, owner: &str, value: &DynamicValue) -> Result<bool> {
        self.require_concrete(owner)?.check(value)
    }
}

impl From<Arc<TypeDescriptor>> for TypeArg {
    fn from(ty: Arc<TypeDescriptor>) -> Self {
        Self::Type(ty)
    }
}

impl From<&Arc<TypeDescriptor>> for TypeArg {
    fn from(ty: &Arc<TypeDescriptor>) -> Self {
        Self::Type(Arc::clone(ty))
    }
}

impl From<Placeholder> for TypeArg {
    fn from(p: Placeholder) -> Self {
        Self::Param(p)
    }
}

impl fmt::Debug for TypeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(ty) => fmt::Debug::fmt(ty, f),
            Self::Param(p) => write!(f, "Placeholder({})", p.0),
        }
    }
}

impl fmt::Display for TypeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(ty) => fmt::Display::fmt(ty, f),
            Self::Param(_) => f.write_str("?"),
        }
    }
}

/// Named member of a shape parameterization.
#[derive(Debug, Clone)]
pub struct Field {
    /// Field name.
    pub name: String,
    /// Field type.
    pub arg: TypeArg,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, arg: impl Into<TypeArg>) -> Self {
        Self {
            name: name.into(),
            arg: arg.into(),
        }
    }
}

/// Parameter list of a descriptor.
#[derive(Debug, Clone, Default)]
pub enum Params {
    /// Nullary descriptor.
    #[default]
    None,
    /// Ordered, tuple-like arguments.
    Positional(Vec<TypeArg>),
    /// Record-of-fields arguments, in declaration order.
    Shape(Vec<Field>),
}

impl Params {
    /// Check if there are no params at all (nullary).
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Number of arguments (0 for nullary).
    pub fn len(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Positional(args) => args.len(),
            Self::Shape(fields) => fields.len(),
        }
    }

    /// Returns `true` if there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Human-readable parameter kind, used in contract errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::None => "no params",
            Self::Positional(_) => "positional params",
            Self::Shape(_) => "shape params",
        }
    }

    /// Positional arguments (empty unless positional).
    pub fn args(&self) -> &[TypeArg] {
        match self {
            Self::Positional(args) => args,
            _ => &[],
        }
    }

    /// Shape fields (empty unless shape).
    pub fn fields(&self) -> &[Field] {
        match self {
            Self::Shape(fields) => fields,
            _ => &[],
        }
    }

    /// Get a positional argument by index.
    pub fn arg(&self, index: usize) -> Option<&TypeArg> {
        self.args().get(index)
    }

    /// Get a shape field by name.
    pub fn field(&self, name: &str) -> Option<&TypeArg> {
        self.fields().iter().find(|f| f.name == name).map(|f| &f.arg)
    }

    /// Iterate `(key, arg)` pairs in declaration order.
    pub fn iter(&self) -> ParamIter<'_> {
        ParamIter {
            params: self,
            index: 0,
        }
    }
}

/// Key of a parameter: positional index or field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKey<'a> {
    Index(usize),
    Field(&'a str),
}

impl fmt::Display for ParamKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Field(name) => f.write_str(name),
        }
    }
}

/// Iterator over the parameters of a descriptor.
pub struct ParamIter<'a> {
    params: &'a Params,
    index: usize,
}

impl<'a> Iterator for ParamIter<'a> {
    type Item = (ParamKey<'a>, &'a TypeArg);

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.index;
        let item = match self.params {
            Params::None => None,
            Params::Positional(args) => args.get(i).map(|arg| (ParamKey::Index(i), arg)),
            Params::Shape(fields) => fields
                .get(i)
                .map(|f| (ParamKey::Field(f.name.as_str()), &f.arg)),
        };
        if item.is_some() {
            self.index += 1;
        }
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.params.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ParamIter<'_> {}

/// Opaque descriptor metadata.
///
/// Ignored by comparison and by the registry; read by collaborators such as
/// the record predicate (see [`META_OPTIONAL`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    entries: HashMap<String, DynamicValue>,
}

impl Metadata {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<DynamicValue>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Look up an entry.
    pub fn get(&self, key: &str) -> Option<&DynamicValue> {
        self.entries.get(key)
    }

    /// Returns `true` if `key` is set to `Bool(true)`.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).and_then(DynamicValue::as_bool).unwrap_or(false)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entries are set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A complete type descriptor.
///
/// Built by [`define_type`](crate::define_type) or by instantiating a
/// [`TypeFamily`](crate::TypeFamily).
pub struct TypeDescriptor {
    name: String,
    params: Params,
    metadata: Metadata,
    check: CheckFn,
}

impl TypeDescriptor {
    pub(crate) fn new(
        name: impl Into<String>,
        params: Params,
        metadata: Metadata,
        check: CheckFn,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            metadata,
            check,
        }
    }

    /// Type name (the registry and comparison key).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter list.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Iterate `(key, arg)` parameter pairs.
    pub fn iter_params(&self) -> ParamIter<'_> {
        self.params.iter()
    }

    /// Descriptor metadata.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Check if this descriptor is flagged as an optional field.
    pub fn is_optional(&self) -> bool {
        self.metadata.flag(META_OPTIONAL)
    }

    /// Check if this descriptor has parameters.
    pub fn is_generic(&self) -> bool {
        !self.params.is_none()
    }

    /// Check if no placeholder appears anywhere in the parameter tree.
    pub fn is_concrete(&self) -> bool {
        self.iter_params().all(|(_, arg)| match arg {
            TypeArg::Type(ty) => ty.is_concrete(),
            TypeArg::Param(_) => false,
        })
    }

    /// Check whether `value` belongs to this type.
    ///
    /// Fails with [`TypeError::PlaceholderEvaluated`] when the predicate
    /// reaches a placeholder parameter.
    pub fn check(&self, value: &DynamicValue) -> Result<bool> {
        (self.check)(value)
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        match &self.params {
            Params::None => Ok(()),
            Params::Positional(args) => {
                f.write_str("<")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(">")
            }
            Params::Shape(fields) => {
                f.write_str("{")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, " {}: {}", field.name, field.arg)?;
                }
                f.write_str(" }")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accept_all() -> CheckFn {
        Arc::new(|_: &DynamicValue| -> Result<bool> { Ok(true) })
    }

    fn leaf(name: &str) -> Arc<TypeDescriptor> {
        node(name, Params::None)
    }

    fn node(name: &str, params: Params) -> Arc<TypeDescriptor> {
        Arc::new(TypeDescriptor::new(
            name,
            params,
            Metadata::new(),
            accept_all(),
        ))
    }

    #[test]
    fn test_placeholders_are_distinct() {
        let a = Placeholder::new();
        let b = Placeholder::new();
        assert_ne!(a, b);
        assert_ne!(a.id(), b.id());
        assert!(param().is_placeholder());
    }

    #[test]
    fn test_iter_positional_params() {
        let int = leaf("int");
        let pair = node(
            "pair",
            Params::Positional(vec![TypeArg::from(&int), param()]),
        );

        let keys: Vec<String> = pair.iter_params().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, ["0", "1"]);
        assert_eq!(pair.iter_params().len(), 2);
        assert!(pair.params().arg(1).is_some_and(TypeArg::is_placeholder));
        assert!(pair.params().fields().is_empty());
    }

    #[test]
    fn test_iter_shape_params() {
        let int = leaf("int");
        let point = node(
            "object",
            Params::Shape(vec![Field::new("x", &int), Field::new("y", &int)]),
        );

        let keys: Vec<ParamKey<'_>> = point.iter_params().map(|(k, _)| k).collect();
        assert_eq!(keys, [ParamKey::Field("x"), ParamKey::Field("y")]);
        assert!(point.params().field("y").is_some());
        assert!(point.params().field("z").is_none());
    }

    #[test]
    fn test_is_concrete_walks_tree() {
        let int = leaf("int");
        let inner = node("array", Params::Positional(vec![param()]));
        let outer = node("array", Params::Positional(vec![TypeArg::from(&inner)]));
        let concrete = node("array", Params::Positional(vec![TypeArg::from(&int)]));

        assert!(int.is_concrete());
        assert!(!inner.is_concrete());
        assert!(!outer.is_concrete());
        assert!(concrete.is_concrete());
    }

    #[test]
    fn test_display() {
        let int = leaf("int");
        let map = node("map", Params::Positional(vec![TypeArg::from(&int), param()]));
        assert_eq!(map.to_string(), "map<int, ?>");

        let obj = node(
            "object",
            Params::Shape(vec![Field::new("id", &int), Field::new("tags", &map)]),
        );
        assert_eq!(obj.to_string(), "object{ id: int, tags: map<int, ?> }");
    }

    #[test]
    fn test_metadata_flag() {
        let meta = Metadata::new().with(META_OPTIONAL, true);
        assert!(meta.flag(META_OPTIONAL));
        assert!(!meta.flag("missing"));
        assert_eq!(meta.len(), 1);
    }

    #[test]
    fn test_require_concrete_rejects_placeholder() {
        let err = param().require_concrete("array").unwrap_err();
        assert_eq!(
            err,
            TypeError::PlaceholderEvaluated {
                type_name: "array".into()
            }
        );
    }
}
