// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Descriptor factories.
//!
//! [`define_type`] builds one shared nullary descriptor. [`define_family`]
//! builds a [`TypeFamily`], a generator that instantiates a fresh
//! parameterized descriptor on every call:
//!
//! ```
//! use typeconv::{define_family, define_type, param, CheckFn, DynamicValue, Params};
//! use std::sync::Arc;
//!
//! let int = define_type("int", |v| Ok(v.as_i64().is_some()));
//! let list = define_family("list", |params: &Params| -> CheckFn {
//!     let element = params.arg(0).cloned();
//!     Arc::new(move |v: &DynamicValue| -> typeconv::Result<bool> {
//!         let Some(items) = v.as_sequence() else { return Ok(false) };
//!         let Some(element) = &element else { return Ok(false) };
//!         for item in items {
//!             if !element.check("list", item)? {
//!                 return Ok(false);
//!             }
//!         }
//!         Ok(true)
//!     })
//! });
//!
//! let ints = list.of(&int);
//! assert!(ints.check(&vec![1, 2].into()).unwrap());
//!
//! // Patterns may hold placeholders but cannot check values.
//! let any_list = list.of(param());
//! assert!(any_list.check(&vec![1].into()).is_err());
//! ```

use crate::descriptor::{CheckFn, Field, Metadata, Params, TypeArg, TypeDescriptor};
use crate::error::Result;
use crate::value::DynamicValue;
use std::fmt;
use std::sync::Arc;

/// Builds the predicate of a family instance from its parameters.
pub type Generator = Arc<dyn Fn(&Params) -> CheckFn + Send + Sync>;

/// Define a nullary descriptor.
pub fn define_type<F>(name: impl Into<String>, check: F) -> Arc<TypeDescriptor>
where
    F: Fn(&DynamicValue) -> Result<bool> + Send + Sync + 'static,
{
    define_type_with_meta(name, check, Metadata::new())
}

/// Define a nullary descriptor carrying metadata.
pub fn define_type_with_meta<F>(
    name: impl Into<String>,
    check: F,
    metadata: Metadata,
) -> Arc<TypeDescriptor>
where
    F: Fn(&DynamicValue) -> Result<bool> + Send + Sync + 'static,
{
    Arc::new(TypeDescriptor::new(
        name,
        Params::None,
        metadata,
        Arc::new(check),
    ))
}

/// Define a parameterized type family.
pub fn define_family<G>(name: impl Into<String>, generator: G) -> TypeFamily
where
    G: Fn(&Params) -> CheckFn + Send + Sync + 'static,
{
    define_family_with_meta(name, generator, Metadata::new())
}

/// Define a parameterized type family whose instances carry metadata.
pub fn define_family_with_meta<G>(
    name: impl Into<String>,
    generator: G,
    metadata: Metadata,
) -> TypeFamily
where
    G: Fn(&Params) -> CheckFn + Send + Sync + 'static,
{
    TypeFamily {
        name: name.into(),
        metadata,
        generator: Arc::new(generator),
    }
}

/// Generator of parameterized descriptors sharing one name.
///
/// Instances are never interned: two calls with the same arguments give two
/// distinct descriptors. Callers relying on the identity shortcut of
/// [`TypeRegistry::convert`](crate::TypeRegistry::convert) must reuse the
/// same instance.
#[derive(Clone)]
pub struct TypeFamily {
    name: String,
    metadata: Metadata,
    generator: Generator,
}

impl TypeFamily {
    /// Family name shared by all instances.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Metadata copied onto every instance.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Instantiate with explicit params.
    ///
    /// Repeated shape field names collapse into one field: the last
    /// declaration wins and keeps the position of the first.
    pub fn instantiate(&self, params: Params) -> Arc<TypeDescriptor> {
        let params = match params {
            Params::Shape(fields) => Params::Shape(dedup_fields(fields)),
            other => other,
        };
        let check = (self.generator)(&params);
        Arc::new(TypeDescriptor::new(
            self.name.clone(),
            params,
            self.metadata.clone(),
            check,
        ))
    }

    /// Instantiate with positional arguments.
    pub fn apply<I, A>(&self, args: I) -> Arc<TypeDescriptor>
    where
        I: IntoIterator<Item = A>,
        A: Into<TypeArg>,
    {
        self.instantiate(Params::Positional(
            args.into_iter().map(Into::into).collect(),
        ))
    }

    /// Instantiate with a single positional argument.
    pub fn of(&self, arg: impl Into<TypeArg>) -> Arc<TypeDescriptor> {
        self.instantiate(Params::Positional(vec![arg.into()]))
    }

    /// Instantiate with a record shape.
    pub fn shape<I, K, A>(&self, fields: I) -> Arc<TypeDescriptor>
    where
        I: IntoIterator<Item = (K, A)>,
        K: Into<String>,
        A: Into<TypeArg>,
    {
        self.instantiate(Params::Shape(
            fields
                .into_iter()
                .map(|(name, arg)| Field::new(name, arg))
                .collect(),
        ))
    }
}

fn dedup_fields(fields: Vec<Field>) -> Vec<Field> {
    let mut unique: Vec<Field> = Vec::with_capacity(fields.len());
    for field in fields {
        match unique.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => existing.arg = field.arg,
            None => unique.push(field),
        }
    }
    unique
}

impl fmt::Debug for TypeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeFamily")
            .field("name", &self.name)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}
