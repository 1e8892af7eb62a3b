use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

fn make_config(entries: usize) -> String {
    let mut s = String::new();
    for i in 0..entries {
        if i % 10 == 0 {
            s.push_str(&format!("# section {}\n\n", i / 10));
        }
        s.push_str(&format!("key_{i} =  value number {i} with   spaces\n"));
    }
    s
}

pub fn parse_benchmarks(c: &mut Criterion) {
    let cases = [("small", make_config(8)), ("entries_1k", make_config(1000))];
    let mut group = c.benchmark_group("parse_config");
    for (name, text) in cases {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(format!("str::{name}"), |b| {
            b.iter(|| {
                let m = kvconf::parse_str(black_box(&text), &kvconf::Options::default()).unwrap();
                black_box(m)
            })
        });
        group.bench_function(format!("reader::{name}"), |b| {
            b.iter_batched(
                || text.clone().into_bytes(),
                |bytes| {
                    let m = kvconf::parse_reader(bytes.as_slice(), &kvconf::Options::default()).unwrap();
                    black_box(m)
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, parse_benchmarks);
criterion_main!(benches);
