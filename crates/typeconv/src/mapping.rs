// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Declared conversions between two descriptor patterns.

use crate::descriptor::TypeDescriptor;
use crate::error::Result;
use crate::value::DynamicValue;
use std::fmt;
use std::sync::Arc;

/// Conversion function: `(value, input, output) -> converted value`.
///
/// `input` and `output` are the concrete descriptors of the `convert` call,
/// not the (possibly generic) patterns the mapping was registered with.
pub type MapperFn = Arc<
    dyn Fn(DynamicValue, &TypeDescriptor, &TypeDescriptor) -> Result<DynamicValue> + Send + Sync,
>;

/// A registered conversion from `input` to `output`.
///
/// Either pattern may hold placeholders, making the mapping valid for any
/// instantiation of that slot.
#[derive(Clone)]
pub struct Mapping {
    input: Arc<TypeDescriptor>,
    output: Arc<TypeDescriptor>,
    mapper: MapperFn,
}

impl Mapping {
    /// Create a new mapping.
    pub fn new<F>(input: Arc<TypeDescriptor>, output: Arc<TypeDescriptor>, mapper: F) -> Self
    where
        F: Fn(DynamicValue, &TypeDescriptor, &TypeDescriptor) -> Result<DynamicValue>
            + Send
            + Sync
            + 'static,
    {
        Self {
            input,
            output,
            mapper: Arc::new(mapper),
        }
    }

    /// Input pattern.
    pub fn input(&self) -> &Arc<TypeDescriptor> {
        &self.input
    }

    /// Output pattern.
    pub fn output(&self) -> &Arc<TypeDescriptor> {
        &self.output
    }

    /// Conversion function.
    pub fn mapper(&self) -> &MapperFn {
        &self.mapper
    }

    /// Run the conversion.
    pub fn apply(
        &self,
        value: DynamicValue,
        input: &TypeDescriptor,
        output: &TypeDescriptor,
    ) -> Result<DynamicValue> {
        (self.mapper)(value, input, output)
    }
}

impl fmt::Debug for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapping")
            .field("input", &format_args!("{}", self.input))
            .field("output", &format_args!("{}", self.output))
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.input, self.output)
    }
}
