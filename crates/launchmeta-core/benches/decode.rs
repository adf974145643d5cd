use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use launchmeta_core::{decode, decode_with, library_artifacts, DecodeOptions};
use std::hint::black_box;

/// A manifest shaped like the upstream per-version document, with `n` libraries.
fn synthetic_manifest(n: usize) -> String {
    let libraries: Vec<String> = (0..n)
        .map(|i| {
            format!(
                r#"{{"downloads":{{"artifact":{{"path":"org/example/lib{i}/1.{i}/lib{i}-1.{i}.jar","sha1":"{i:040x}","size":{size},"url":"https://libraries.example/org/example/lib{i}-1.{i}.jar"}}}},"name":"org.example:lib{i}:1.{i}","rules":[{{"action":"allow","os":{{"name":"linux"}}}}]}}"#,
                size = 1000 + i * 17
            )
        })
        .collect();
    format!(
        r#"{{"id":"1.21.5","downloads":{{"client":{{"url":"https://example/client.jar","size":28468344}}}},"libraries":[{}]}}"#,
        libraries.join(",")
    )
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for n in [10usize, 100, 1000] {
        let text = synthetic_manifest(n);
        group.bench_with_input(BenchmarkId::new("fast", n), &text, |b, text| {
            b.iter(|| decode(black_box(text)).expect("synthetic manifest decodes"));
        });
        group.bench_with_input(BenchmarkId::new("strict_quotes", n), &text, |b, text| {
            b.iter(|| {
                decode_with(black_box(text), &DecodeOptions::strict_quotes())
                    .expect("synthetic manifest decodes")
            });
        });
    }
    group.finish();
}

fn bench_libraries(c: &mut Criterion) {
    let manifest = decode(&synthetic_manifest(100)).expect("synthetic manifest decodes");
    c.bench_function("library_artifacts/100", |b| {
        b.iter(|| library_artifacts(black_box(&manifest)).len());
    });
}

criterion_group!(benches, bench_decode, bench_libraries);
criterion_main!(benches);
