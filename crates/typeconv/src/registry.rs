// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Mapping registry with best-match selection.
//!
//! Mappings are indexed by the name of their input pattern. A lookup scores
//! every candidate under the input's name on both sides with
//! [`compare_types`], keeps those matching on both, ranks them by their
//! least specific side and returns the most specific one. Equal scores go to
//! the earliest registration.
//!
//! [`TypeRegistry`] follows a register-then-query lifecycle: registration
//! needs `&mut self`, queries only `&self`, so a fully built registry can be
//! shared behind an `Arc`. [`SharedTypeRegistry`] adds a lock for registries
//! that keep accepting mappings while being queried.

use crate::compare::{compare_types, Specificity};
use crate::config::RegistryConfig;
use crate::descriptor::TypeDescriptor;
use crate::error::{Result, TypeError};
use crate::mapping::{MapperFn, Mapping};
use crate::value::DynamicValue;
use parking_lot::{RwLock, RwLockReadGuard};
use std::collections::HashMap;
use std::sync::Arc;

/// Index of mappings keyed by input descriptor name.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    config: RegistryConfig,
    roots: HashMap<String, Vec<Mapping>>,
    len: usize,
}

impl TypeRegistry {
    /// Create an empty registry with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with the given configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            roots: HashMap::new(),
            len: 0,
        }
    }

    /// Registry configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Register a mapping under its input name.
    ///
    /// Registration order is kept and breaks ties between equally specific
    /// candidates.
    pub fn register(&mut self, mapping: Mapping) {
        tracing::debug!("[{}] register mapping {}", self.config.name, mapping);
        self.roots
            .entry(mapping.input().name().to_string())
            .or_default()
            .push(mapping);
        self.len += 1;
    }

    /// Register a mapping built from its parts.
    pub fn register_fn<F>(
        &mut self,
        input: Arc<TypeDescriptor>,
        output: Arc<TypeDescriptor>,
        mapper: F,
    ) where
        F: Fn(DynamicValue, &TypeDescriptor, &TypeDescriptor) -> Result<DynamicValue>
            + Send
            + Sync
            + 'static,
    {
        self.register(Mapping::new(input, output, mapper));
    }

    /// Mappings registered under `name`, in registration order.
    pub fn mappings_for(&self, name: &str) -> &[Mapping] {
        self.roots.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Input names with at least one mapping.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.roots.keys().map(String::as_str)
    }

    /// Total number of registered mappings.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Find the most specific mapping for `input -> output`.
    ///
    /// Returns `Ok(None)` when no candidate matches on both sides. Contract
    /// violations raised while scoring a candidate abort the lookup.
    pub fn find_mapping(
        &self,
        input: &TypeDescriptor,
        output: &TypeDescriptor,
    ) -> Result<Option<&Mapping>> {
        let Some(candidates) = self.roots.get(input.name()) else {
            tracing::trace!(
                "[{}] no mappings registered for `{}`",
                self.config.name,
                input.name()
            );
            return Ok(None);
        };

        let mut best: Option<(Specificity, &Mapping)> = None;
        let mut ties = 0usize;

        for mapping in candidates {
            let lhs = compare_types(input, mapping.input())?;
            let rhs = compare_types(output, mapping.output())?;

            if !lhs.is_match() || !rhs.is_match() {
                tracing::trace!(
                    "[{}] skip {} for {} -> {} (input: {}, output: {})",
                    self.config.name,
                    mapping,
                    input,
                    output,
                    lhs,
                    rhs
                );
                continue;
            }

            let score = lhs.max(rhs);
            match best {
                Some((best_score, _)) if score > best_score => {}
                Some((best_score, _)) if score == best_score => ties += 1,
                _ => {
                    best = Some((score, mapping));
                    ties = 0;
                }
            }
        }

        let Some((score, mapping)) = best else {
            return Ok(None);
        };

        if ties > 0 && self.config.warn_on_ambiguity {
            tracing::warn!(
                "[{}] {} -> {}: {} other candidate(s) tie at {}, using first registered {}",
                self.config.name,
                input,
                output,
                ties,
                score,
                mapping
            );
        }
        tracing::debug!(
            "[{}] {} -> {} resolved to {} ({})",
            self.config.name,
            input,
            output,
            mapping,
            score
        );

        Ok(Some(mapping))
    }

    /// Find the conversion function of the most specific mapping.
    pub fn match_mapper(
        &self,
        input: &TypeDescriptor,
        output: &TypeDescriptor,
    ) -> Result<Option<&MapperFn>> {
        Ok(self.find_mapping(input, output)?.map(Mapping::mapper))
    }

    /// Convert `value` from `input` to `output`.
    ///
    /// Same-instance descriptors return `value` untouched without any lookup.
    /// Results are not cached.
    pub fn convert(
        &self,
        input: &Arc<TypeDescriptor>,
        output: &Arc<TypeDescriptor>,
        value: DynamicValue,
    ) -> Result<DynamicValue> {
        if Arc::ptr_eq(input, output) {
            return Ok(value);
        }

        let mapping = self
            .find_mapping(input, output)?
            .ok_or_else(|| no_mapping(input, output))?;
        mapping.apply(value, input, output)
    }
}

fn no_mapping(input: &TypeDescriptor, output: &TypeDescriptor) -> TypeError {
    TypeError::NoMappingFound {
        input: input.to_string(),
        output: output.to_string(),
    }
}

/// Lock-protected registry handle for concurrent registration and lookup.
///
/// Mappers run after the lock is released, so a mapper may itself register
/// mappings or convert through the same handle.
#[derive(Debug, Clone, Default)]
pub struct SharedTypeRegistry {
    inner: Arc<RwLock<TypeRegistry>>,
}

impl SharedTypeRegistry {
    /// Wrap an existing registry.
    pub fn new(registry: TypeRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    /// Register a mapping.
    pub fn register(&self, mapping: Mapping) {
        self.inner.write().register(mapping);
    }

    /// Register a mapping built from its parts.
    pub fn register_fn<F>(
        &self,
        input: Arc<TypeDescriptor>,
        output: Arc<TypeDescriptor>,
        mapper: F,
    ) where
        F: Fn(DynamicValue, &TypeDescriptor, &TypeDescriptor) -> Result<DynamicValue>
            + Send
            + Sync
            + 'static,
    {
        self.register(Mapping::new(input, output, mapper));
    }

    /// Find the most specific mapping (cloned out of the lock).
    pub fn find_mapping(
        &self,
        input: &TypeDescriptor,
        output: &TypeDescriptor,
    ) -> Result<Option<Mapping>> {
        Ok(self.inner.read().find_mapping(input, output)?.cloned())
    }

    /// Convert `value` from `input` to `output`.
    pub fn convert(
        &self,
        input: &Arc<TypeDescriptor>,
        output: &Arc<TypeDescriptor>,
        value: DynamicValue,
    ) -> Result<DynamicValue> {
        if Arc::ptr_eq(input, output) {
            return Ok(value);
        }
        let registry = self.inner.read();
        let mapping = registry.find_mapping(input, output)?.cloned();
        drop(registry);

        mapping
            .ok_or_else(|| no_mapping(input, output))?
            .apply(value, input, output)
    }

    /// Read access to the underlying registry.
    pub fn read(&self) -> RwLockReadGuard<'_, TypeRegistry> {
        self.inner.read()
    }

    /// Total number of registered mappings.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

impl From<TypeRegistry> for SharedTypeRegistry {
    fn from(registry: TypeRegistry) -> Self {
        Self::new(registry)
    }
}
