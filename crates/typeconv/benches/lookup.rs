// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Mapping Lookup Benchmark
//!
//! Measures `find_mapping` and `convert` against a registry holding many
//! candidates under the same input name, half concrete and half generic.

#![allow(clippy::uninlined_format_args)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use typeconv::{builtins, define_type, param, DynamicValue, TypeRegistry};

fn populated_registry(candidates: usize) -> TypeRegistry {
    let b = builtins();
    let mut registry = TypeRegistry::new();
    for i in 0..candidates {
        let element = define_type(format!("elem{}", i), |_| Ok(false));
        registry.register_fn(b.array.of(&element), b.array.of(&element), |v, _, _| Ok(v));
    }
    registry.register_fn(b.array.of(param()), b.array.of(param()), |v, _, _| Ok(v));
    registry
}

fn bench_find_mapping(c: &mut Criterion) {
    let b = builtins();
    let registry = populated_registry(64);
    let input = b.array.of(&b.number);
    let output = b.array.of(&b.number);

    c.bench_function("find_mapping_generic_fallback", |bench| {
        bench.iter(|| registry.find_mapping(black_box(&input), black_box(&output)));
    });
}

fn bench_convert(c: &mut Criterion) {
    let b = builtins();
    let registry = populated_registry(64);
    let input = b.array.of(&b.number);
    let output = b.array.of(&b.number);
    let value = DynamicValue::from(vec![1, 2, 3, 4]);

    c.bench_function("convert_generic_fallback", |bench| {
        bench.iter(|| registry.convert(black_box(&input), black_box(&output), value.clone()));
    });

    c.bench_function("convert_identity", |bench| {
        bench.iter(|| registry.convert(black_box(&input), black_box(&input), value.clone()));
    });
}

criterion_group!(benches, bench_find_mapping, bench_convert);
criterion_main!(benches);
