// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Built-in descriptor catalog.
//!
//! Leaf types for the scalar [`DynamicValue`] variants and the usual generic
//! containers. The catalog is built once; its nullary descriptors are shared
//! instances, so `convert(b.number, b.number, v)` takes the identity path.
//!
//! | Descriptor | Params | Accepts |
//! |------------|--------|---------|
//! | `null`, `undefined`, `boolean`, `bigint`, `string` | - | matching variant |
//! | `number` | - | `Int` or `Float` |
//! | `array` | `(T)` | `Sequence` of `T` |
//! | `tuple` | `(T1, .., Tn)` | `Sequence` of exactly n matching elements |
//! | `object` | shape | `Struct` with no unknown keys, every field matching |
//! | `option` | `(T)` | `Undefined` or `T` (flagged [`META_OPTIONAL`]) |
//! | `union` | `(T1, .., Tn)` | any `Ti` |
//! | `map` | `(K, V)` | `Map` with matching entries |
//! | `set` | `(T)` | `Set` of `T` |
//!
//! Every family refuses to check values while one of its parameters is a
//! placeholder ([`TypeError::PlaceholderEvaluated`]), and reports a family
//! instantiated with the wrong parameter layout as
//! [`TypeError::ContractViolation`].

use crate::descriptor::{CheckFn, Metadata, Params, TypeDescriptor, META_OPTIONAL};
use crate::error::{Result, TypeError};
use crate::family::{define_family, define_family_with_meta, define_type, TypeFamily};
use crate::value::DynamicValue;
use std::sync::{Arc, OnceLock};

static BUILTINS: OnceLock<Builtins> = OnceLock::new();

/// Shared built-in catalog.
pub fn builtins() -> &'static Builtins {
    BUILTINS.get_or_init(Builtins::new)
}

/// The built-in descriptors and families.
#[derive(Debug, Clone)]
pub struct Builtins {
    pub null: Arc<TypeDescriptor>,
    pub undefined: Arc<TypeDescriptor>,
    pub boolean: Arc<TypeDescriptor>,
    pub number: Arc<TypeDescriptor>,
    pub bigint: Arc<TypeDescriptor>,
    pub string: Arc<TypeDescriptor>,
    pub array: TypeFamily,
    pub tuple: TypeFamily,
    pub object: TypeFamily,
    pub option: TypeFamily,
    pub union: TypeFamily,
    pub map: TypeFamily,
    pub set: TypeFamily,
}

impl Builtins {
    /// Build a fresh catalog (distinct instances from [`builtins()`]).
    pub fn new() -> Self {
        Self {
            null: define_type("null", |v| Ok(v.is_null())),
            undefined: define_type("undefined", |v| Ok(v.is_undefined())),
            boolean: define_type("boolean", |v| Ok(v.as_bool().is_some())),
            number: define_type("number", |v| Ok(v.is_number())),
            bigint: define_type("bigint", |v| Ok(v.as_bigint().is_some())),
            string: define_type("string", |v| Ok(v.as_str().is_some())),
            array: define_family("array", array_check),
            tuple: define_family("tuple", tuple_check),
            object: define_family("object", object_check),
            option: define_family_with_meta(
                "option",
                option_check,
                Metadata::new().with(META_OPTIONAL, true),
            ),
            union: define_family("union", union_check),
            map: define_family("map", map_check),
            set: define_family("set", set_check),
        }
    }
}

impl Default for Builtins {
    fn default() -> Self {
        Self::new()
    }
}

type Args = Vec<Arc<TypeDescriptor>>;

/// Resolve positional params to concrete descriptors.
///
/// `arity` of `None` accepts any count.
fn positional(owner: &str, params: &Params, arity: Option<usize>) -> Result<Args> {
    let args = match params {
        Params::Positional(args) if arity.map_or(true, |n| n == args.len()) => args,
        _ => {
            return Err(TypeError::ContractViolation(format!(
                "`{owner}` instantiated with {} ({} given)",
                params.kind_name(),
                params.len()
            )))
        }
    };
    args.iter()
        .map(|arg| arg.require_concrete(owner).cloned())
        .collect()
}

/// Wrap a predicate over resolved params; resolution errors surface on check.
fn predicate<T, F>(resolved: Result<T>, check: F) -> CheckFn
where
    T: Send + Sync + 'static,
    F: Fn(&T, &DynamicValue) -> Result<bool> + Send + Sync + 'static,
{
    Arc::new(move |value: &DynamicValue| -> Result<bool> {
        match &resolved {
            Ok(args) => check(args, value),
            Err(err) => Err(err.clone()),
        }
    })
}

fn all_match<'a, I>(ty: &TypeDescriptor, values: I) -> Result<bool>
where
    I: IntoIterator<Item = &'a DynamicValue>,
{
    for value in values {
        if !ty.check(value)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn array_check(params: &Params) -> CheckFn {
    predicate(positional("array", params, Some(1)), |args: &Args, value| {
        match value.as_sequence() {
            Some(items) => all_match(&args[0], items),
            None => Ok(false),
        }
    })
}

fn tuple_check(params: &Params) -> CheckFn {
    predicate(positional("tuple", params, None), |args: &Args, value| {
        let Some(items) = value.as_sequence() else {
            return Ok(false);
        };
        if items.len() != args.len() {
            return Ok(false);
        }
        for (ty, item) in args.iter().zip(items) {
            if !ty.check(item)? {
                return Ok(false);
            }
        }
        Ok(true)
    })
}

fn object_check(params: &Params) -> CheckFn {
    let fields = match params {
        Params::Shape(fields) => fields
            .iter()
            .map(|f| -> Result<(String, Arc<TypeDescriptor>)> {
                Ok((f.name.clone(), f.arg.require_concrete("object")?.clone()))
            })
            .collect::<Result<Vec<_>>>(),
        _ => Err(TypeError::ContractViolation(format!(
            "`object` instantiated with {}",
            params.kind_name()
        ))),
    };

    predicate(fields, |fields: &Vec<(String, Arc<TypeDescriptor>)>, value| {
        let Some(record) = value.as_struct() else {
            return Ok(false);
        };
        if record
            .keys()
            .any(|key| !fields.iter().any(|(name, _)| name == key))
        {
            return Ok(false);
        }
        for (name, ty) in fields {
            let matched = match record.get(name) {
                Some(field) => ty.check(field)?,
                None => ty.check(&DynamicValue::Undefined)?,
            };
            if !matched {
                return Ok(false);
            }
        }
        Ok(true)
    })
}

fn option_check(params: &Params) -> CheckFn {
    predicate(positional("option", params, Some(1)), |args: &Args, value| {
        Ok(value.is_undefined() || args[0].check(value)?)
    })
}

fn union_check(params: &Params) -> CheckFn {
    predicate(positional("union", params, None), |args: &Args, value| {
        for ty in args {
            if ty.check(value)? {
                return Ok(true);
            }
        }
        Ok(false)
    })
}

fn map_check(params: &Params) -> CheckFn {
    predicate(positional("map", params, Some(2)), |args: &Args, value| {
        let Some(entries) = value.as_map() else {
            return Ok(false);
        };
        for (k, v) in entries {
            if !args[0].check(k)? || !args[1].check(v)? {
                return Ok(false);
            }
        }
        Ok(true)
    })
}

fn set_check(params: &Params) -> CheckFn {
    predicate(positional("set", params, Some(1)), |args: &Args, value| {
        match value.as_set() {
            Some(members) => all_match(&args[0], members),
            None => Ok(false),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{compare_types, Specificity};
    use crate::descriptor::{param, TypeArg};

    #[test]
    fn test_shared_catalog_is_stable() {
        assert!(Arc::ptr_eq(&builtins().number, &builtins().number));
        assert!(!Arc::ptr_eq(&builtins().number, &Builtins::new().number));
    }

    #[test]
    fn test_leaf_predicates() {
        let b = builtins();
        assert!(b.null.check(&DynamicValue::Null).unwrap());
        assert!(!b.null.check(&DynamicValue::Undefined).unwrap());
        assert!(b.undefined.check(&DynamicValue::Undefined).unwrap());
        assert!(b.boolean.check(&true.into()).unwrap());
        assert!(b.number.check(&1.into()).unwrap());
        assert!(b.number.check(&1.5.into()).unwrap());
        assert!(!b.number.check(&DynamicValue::BigInt(1)).unwrap());
        assert!(b.bigint.check(&DynamicValue::BigInt(1)).unwrap());
        assert!(b.string.check(&"s".into()).unwrap());
        assert!(!b.string.check(&DynamicValue::Null).unwrap());
    }

    #[test]
    fn test_array() {
        let b = builtins();
        let numbers = b.array.of(&b.number);
        assert!(numbers.check(&vec![1, 2, 3].into()).unwrap());
        assert!(numbers.check(&DynamicValue::Sequence(Vec::new())).unwrap());
        assert!(!numbers.check(&vec!["a"].into()).unwrap());
        assert!(!numbers.check(&1.into()).unwrap());
    }

    #[test]
    fn test_tuple() {
        let b = builtins();
        let pair = b.tuple.apply([&b.string, &b.number]);
        let ok = DynamicValue::Sequence(vec!["a".into(), 1.into()]);
        let swapped = DynamicValue::Sequence(vec![1.into(), "a".into()]);
        let short = DynamicValue::Sequence(vec!["a".into()]);
        assert!(pair.check(&ok).unwrap());
        assert!(!pair.check(&swapped).unwrap());
        assert!(!pair.check(&short).unwrap());
    }

    #[test]
    fn test_object_and_optional_fields() {
        let b = builtins();
        let user = b.object.shape([
            ("name", b.string.clone()),
            ("age", b.option.of(&b.number)),
        ]);

        let full = DynamicValue::record([
            ("name", DynamicValue::from("ada")),
            ("age", DynamicValue::from(36)),
        ]);
        let partial = DynamicValue::record([("name", DynamicValue::from("ada"))]);
        let missing = DynamicValue::record([("age", DynamicValue::from(36))]);
        let extra = DynamicValue::record([
            ("name", DynamicValue::from("ada")),
            ("admin", DynamicValue::from(true)),
        ]);

        assert!(user.check(&full).unwrap());
        assert!(user.check(&partial).unwrap());
        assert!(!user.check(&missing).unwrap());
        assert!(!user.check(&extra).unwrap());
        assert!(!user.check(&DynamicValue::Null).unwrap());

        let age = user.params().field("age").and_then(TypeArg::as_type).unwrap();
        assert!(age.is_optional());
    }

    #[test]
    fn test_union() {
        let b = builtins();
        let id = b.union.apply([&b.string, &b.number]);
        assert!(id.check(&"x".into()).unwrap());
        assert!(id.check(&3.into()).unwrap());
        assert!(!id.check(&true.into()).unwrap());
        assert!(!b.union.apply(Vec::<TypeArg>::new()).check(&1.into()).unwrap());
    }

    #[test]
    fn test_map_and_set() {
        let b = builtins();
        let index = b.map.apply([&b.string, &b.number]);
        let good = DynamicValue::Map(vec![("a".into(), 1.into())]);
        let bad = DynamicValue::Map(vec![(1.into(), 1.into())]);
        assert!(index.check(&good).unwrap());
        assert!(!index.check(&bad).unwrap());

        let tags = b.set.of(&b.string);
        assert!(tags.check(&DynamicValue::Set(vec!["a".into()])).unwrap());
        assert!(!tags.check(&DynamicValue::Set(vec![1.into()])).unwrap());
        assert!(!tags.check(&vec!["a"].into()).unwrap());
    }

    #[test]
    fn test_placeholder_params_refuse_check() {
        let b = builtins();
        let patterns = [
            b.array.of(param()),
            b.tuple.apply([TypeArg::from(&b.number), param()]),
            b.object.shape([("x", param())]),
            b.option.of(param()),
            b.union.apply([param()]),
            b.map.apply([TypeArg::from(&b.string), param()]),
            b.set.of(param()),
        ];
        for pattern in &patterns {
            let err = pattern.check(&DynamicValue::Null).unwrap_err();
            assert_eq!(
                err,
                TypeError::PlaceholderEvaluated {
                    type_name: pattern.name().to_string()
                },
                "{pattern}"
            );
        }
    }

    #[test]
    fn test_wrong_layout_is_contract_violation() {
        let b = builtins();
        let bad_array = b.array.apply([&b.number, &b.number]);
        let bad_object = b.object.of(&b.number);
        assert!(bad_array.check(&DynamicValue::Null).unwrap_err().is_contract_violation());
        assert!(bad_object.check(&DynamicValue::Null).unwrap_err().is_contract_violation());
    }

    #[test]
    fn test_catalog_patterns_compare() {
        let b = builtins();
        let target = b.map.apply([&b.string, &b.array.of(&b.number)]);
        let pattern = b.map.apply([TypeArg::from(&b.string), param()]);
        assert_eq!(
            compare_types(&target, &pattern),
            Ok(Specificity::GenericMatch)
        );
        assert_eq!(
            compare_types(&target, &b.set.of(&b.string)),
            Ok(Specificity::NoMatch)
        );
    }
}
