// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types shared by descriptors, the comparator and the registry.

use thiserror::Error;

/// Errors raised while checking, comparing or converting typed values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// No registered mapping accepts the requested input/output pair.
    #[error("no mapping found: {input} -> {output}")]
    NoMappingFound { input: String, output: String },

    /// A descriptor tree expected to be concrete still holds a placeholder.
    #[error("abstract type cannot be resolved: placeholder at {path}")]
    UnresolvedPlaceholder { path: String },

    /// A predicate was asked to check a value through a placeholder parameter.
    #[error("generic runtime type not allowed: `{type_name}` has a placeholder parameter")]
    PlaceholderEvaluated { type_name: String },

    /// Target and pattern parameter lists do not line up.
    ///
    /// This is a declaration bug (a mapping pattern that does not match the
    /// shape of the family it names), not a regular mismatch.
    #[error("assertion failed: {0}")]
    ContractViolation(String),

    /// A mapper rejected the value it was handed.
    #[error("mapper failed: {0}")]
    MapperFailed(String),
}

impl TypeError {
    /// Returns `true` for errors caused by malformed declarations.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::ContractViolation(_))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TypeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = TypeError::NoMappingFound {
            input: "array<number>".into(),
            output: "set<number>".into(),
        };
        assert_eq!(
            err.to_string(),
            "no mapping found: array<number> -> set<number>"
        );

        let err = TypeError::PlaceholderEvaluated {
            type_name: "array".into(),
        };
        assert!(err.to_string().contains("`array`"));
    }

    #[test]
    fn test_contract_violation_flag() {
        assert!(TypeError::ContractViolation("arity".into()).is_contract_violation());
        assert!(!TypeError::MapperFailed("boom".into()).is_contract_violation());
    }
}
