// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structural comparison of descriptors against patterns.
//!
//! [`compare`] scores how precisely a pattern describes a target:
//!
//! | Score | Meaning |
//! |-------|---------|
//! | [`Specificity::NoMatch`] | names differ somewhere in the tree |
//! | [`Specificity::ConcreteMatch`] | every position matched exactly |
//! | [`Specificity::GenericMatch`] | at least one position matched a placeholder |
//!
//! The ordering `NoMatch < ConcreteMatch < GenericMatch` lets the registry rank
//! candidates: among matches, lower is more specific.

use crate::descriptor::{Field, Params, TypeArg, TypeDescriptor};
use crate::error::{Result, TypeError};
use std::fmt;
use std::sync::Arc;

/// Ordinal result of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Specificity {
    NoMatch = 0,
    ConcreteMatch = 1,
    GenericMatch = 2,
}

impl Specificity {
    /// Check if this is a match of any kind.
    pub fn is_match(self) -> bool {
        self > Self::NoMatch
    }
}

impl fmt::Display for Specificity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NoMatch => "no match",
            Self::ConcreteMatch => "concrete match",
            Self::GenericMatch => "generic match",
        };
        f.write_str(s)
    }
}

/// Score `target` against `pattern`.
///
/// A placeholder on either side matches anything at that position. Name
/// mismatches anywhere in the tree give `NoMatch`. Parameter lists that
/// disagree in kind (none, positional, shape) or in positional arity are
/// reported as [`TypeError::ContractViolation`].
pub fn compare(target: &TypeArg, pattern: &TypeArg) -> Result<Specificity> {
    match (target, pattern) {
        (TypeArg::Param(_), _) | (_, TypeArg::Param(_)) => Ok(Specificity::GenericMatch),
        (TypeArg::Type(target), TypeArg::Type(pattern)) => compare_types(target, pattern),
    }
}

/// Score two descriptors (see [`compare`]).
pub fn compare_types(target: &TypeDescriptor, pattern: &TypeDescriptor) -> Result<Specificity> {
    if target.name() != pattern.name() {
        return Ok(Specificity::NoMatch);
    }

    match (target.params(), pattern.params()) {
        (Params::None, Params::None) => Ok(Specificity::ConcreteMatch),
        (Params::Positional(xs), Params::Positional(ys)) => {
            if xs.len() != ys.len() {
                return Err(TypeError::ContractViolation(format!(
                    "`{}` compared with {} params against {}",
                    target.name(),
                    xs.len(),
                    ys.len()
                )));
            }
            score_pairs(xs.iter().zip(ys).map(Some))
        }
        (Params::Shape(xs), Params::Shape(ys)) => {
            // Differing field sets are a plain mismatch.
            if xs.len() != ys.len() {
                return Ok(Specificity::NoMatch);
            }
            score_pairs(xs.iter().map(|x| pair_field(x, ys)))
        }
        (xs, ys) => Err(TypeError::ContractViolation(format!(
            "`{}` compared with {} against {}",
            target.name(),
            xs.kind_name(),
            ys.kind_name()
        ))),
    }
}

fn pair_field<'a>(field: &'a Field, pattern: &'a [Field]) -> Option<(&'a TypeArg, &'a TypeArg)> {
    pattern
        .iter()
        .find(|p| p.name == field.name)
        .map(|p| (&field.arg, &p.arg))
}

/// Fold paired arguments into the highest severity, stopping at the first
/// `NoMatch`. A `None` pair (unaligned shape field) is a `NoMatch`.
fn score_pairs<'a, I>(pairs: I) -> Result<Specificity>
where
    I: Iterator<Item = Option<(&'a TypeArg, &'a TypeArg)>>,
{
    let mut score = Specificity::ConcreteMatch;
    for pair in pairs {
        let Some((x, y)) = pair else {
            return Ok(Specificity::NoMatch);
        };
        let pair_score = if x.is_placeholder() {
            Specificity::GenericMatch
        } else {
            compare(x, y)?
        };
        if pair_score == Specificity::NoMatch {
            return Ok(Specificity::NoMatch);
        }
        score = score.max(pair_score);
    }
    Ok(score)
}

/// Assert that `arg` is fully concrete and return its descriptor.
///
/// Fails with [`TypeError::UnresolvedPlaceholder`] naming the path of the
/// first placeholder found (`$` is the root, then parameter keys).
pub fn resolve(arg: &TypeArg) -> Result<&Arc<TypeDescriptor>> {
    let mut path = Vec::new();
    resolve_at(arg, &mut path)
}

fn resolve_at<'a>(arg: &'a TypeArg, path: &mut Vec<String>) -> Result<&'a Arc<TypeDescriptor>> {
    let ty = match arg {
        TypeArg::Type(ty) => ty,
        TypeArg::Param(_) => {
            let mut rendered = String::from("$");
            for segment in path.iter() {
                rendered.push('.');
                rendered.push_str(segment);
            }
            return Err(TypeError::UnresolvedPlaceholder { path: rendered });
        }
    };

    for (key, sub) in ty.iter_params() {
        path.push(key.to_string());
        resolve_at(sub, path)?;
        path.pop();
    }

    Ok(ty)
}
