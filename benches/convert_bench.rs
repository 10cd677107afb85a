//! Benchmarks for name conversion and catalog resolution.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rpmname_lib::{CatalogNameConvertor, NameConvertor, StaticCatalog};
use std::hint::black_box;

/// Synthetic catalog of `n` python packages plus some noise.
fn create_catalog(n: usize) -> StaticCatalog {
    let mut names = Vec::with_capacity(n * 3);
    for i in 0..n {
        names.push(format!("python3-Pkg{}", i));
        names.push(format!("python-pkg{}", i));
        names.push(format!("lib{}", i));
    }
    StaticCatalog::new(names)
}

fn bench_convert(c: &mut Criterion) {
    let conv = NameConvertor::new("fedora");
    let names = ["Jinja2", "python3-foo", "foo-python3", "zope.interface", "pyfoo"];

    c.bench_function("rpm_name", |b| {
        b.iter(|| {
            for name in &names {
                black_box(conv.rpm_name(black_box(name), Some("2")));
            }
        })
    });
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_resolve");
    for size in [100, 1000, 10000] {
        let checked = CatalogNameConvertor::new(NameConvertor::new("fedora"), create_catalog(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let name = format!("pkg{}", size / 2);
            b.iter(|| black_box(checked.rpm_name(black_box(&name), Some("2")).ok()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_convert, bench_resolve);
criterion_main!(benches);
