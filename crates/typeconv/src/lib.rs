// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime type descriptors and specificity-ranked value conversion
//!
//! Describes types at runtime (including parameterized types with
//! placeholder slots), scores how well a concrete type matches a generic
//! pattern, and dispatches conversions between types through a registry
//! that always picks the most specific registered mapping.
//!
//! # Features
//!
//! - **Descriptors**: Named types with a membership predicate, positional or
//!   shape parameters and free-form metadata
//! - **Placeholders**: Unique wildcard slots for generic patterns
//! - **Comparison**: `NoMatch` / `ConcreteMatch` / `GenericMatch` scoring
//! - **Registry**: Mapping lookup indexed by input name, most specific wins
//! - **Built-ins**: Catalog of common scalar and container types
//!
//! # Quick Start
//!
//! ```
//! use typeconv::{builtins, param, DynamicValue, TypeRegistry};
//!
//! let b = builtins();
//! let numbers = b.array.of(&b.number);
//!
//! let mut registry = TypeRegistry::new();
//! registry.register_fn(b.array.of(param()), b.array.of(param()), |value, _, _| {
//!     let mut items = value.into_sequence().unwrap_or_default();
//!     items.reverse();
//!     Ok(DynamicValue::Sequence(items))
//! });
//!
//! let out = registry
//!     .convert(&numbers, &b.array.of(&b.number), vec![1, 2, 3].into())
//!     .unwrap();
//! assert_eq!(out, DynamicValue::from(vec![3, 2, 1]));
//! ```
//!
//! # Configuration File
//!
//! ```toml
//! name = "wire-adapters"
//! warn_on_ambiguity = true
//! ```

pub mod builtins;
pub mod compare;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod family;
pub mod mapping;
pub mod registry;
pub mod value;

pub use builtins::{builtins, Builtins};
pub use compare::{compare, compare_types, resolve, Specificity};
pub use config::{ConfigError, RegistryConfig};
pub use descriptor::{
    param, CheckFn, Field, Metadata, ParamIter, ParamKey, Params, Placeholder, TypeArg,
    TypeDescriptor, META_OPTIONAL,
};
pub use error::{Result, TypeError};
pub use family::{
    define_family, define_family_with_meta, define_type, define_type_with_meta, Generator,
    TypeFamily,
};
pub use mapping::{Mapping, MapperFn};
pub use registry::{SharedTypeRegistry, TypeRegistry};
pub use value::DynamicValue;
