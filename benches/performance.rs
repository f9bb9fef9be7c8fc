// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Vesselframe Inc.

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vesselframe::geometry::Primitive;
use vesselframe::{
    build_solid, volume, DimensionField, Dimensions, ShapeKind, TessellationOptions,
    VesselAssembly,
};

fn bench_volume(c: &mut Criterion) {
    let mut group = c.benchmark_group("volume");

    for kind in ShapeKind::ALL {
        let dimensions = Dimensions::defaults(kind);
        group.bench_with_input(BenchmarkId::new("defaults", kind.name()), &dimensions, |b, d| {
            b.iter(|| volume(black_box(d)));
        });
    }

    group.finish();
}

fn bench_primitives(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitives");

    group.bench_function("sphere_32", |b| {
        b.iter(|| Primitive::sphere(black_box(0.25)).to_mesh(black_box(32)));
    });

    group.bench_function("sphere_64", |b| {
        b.iter(|| Primitive::sphere(black_box(0.25)).to_mesh(black_box(64)));
    });

    group.bench_function("hemisphere", |b| {
        b.iter(|| Primitive::hemisphere(black_box(0.25)).to_mesh(black_box(32)));
    });

    group.finish();
}

fn bench_solids(c: &mut Criterion) {
    let mut group = c.benchmark_group("solids");

    let head = Dimensions::defaults(ShapeKind::TorisphericalHead);
    group.bench_function("build_head", |b| {
        b.iter(|| build_solid(black_box(&head)));
    });

    let feet = Dimensions::defaults(ShapeKind::FeetWithFloorPlates);
    group.bench_function("build_feet", |b| {
        b.iter(|| build_solid(black_box(&feet)));
    });

    let shell = Dimensions::new(
        ShapeKind::Cylinder,
        [(DimensionField::OuterDiameter, 0.5), (DimensionField::Height, 1.0)],
    )
    .unwrap();
    let solid = build_solid(&shell);
    let options = TessellationOptions::default();
    group.bench_function("tessellate_shell", |b| {
        b.iter(|| solid.to_mesh(black_box(&options)));
    });

    group.finish();
}

fn bench_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("assembly");
    let assembly = VesselAssembly::default();

    group.bench_function("layout", |b| {
        b.iter(|| black_box(&assembly).layout());
    });

    group.bench_function("volumes", |b| {
        b.iter(|| black_box(&assembly).volumes());
    });

    group.bench_function("mesh", |b| {
        b.iter(|| black_box(&assembly).to_mesh(&TessellationOptions::default()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_volume,
    bench_primitives,
    bench_solids,
    bench_assembly
);
criterion_main!(benches);
