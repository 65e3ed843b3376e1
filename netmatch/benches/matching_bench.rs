use criterion::{black_box, criterion_group, criterion_main, Criterion};
use netmatch::prelude::*;
use std::sync::Arc;

fn build_index() -> NetlistIndex {
    let mut builder = NetlistIndex::builder("top");
    for t in 0..200 {
        let name = if t == 0 { "top".to_string() } else { format!("blk{}", t) };
        let nets: Vec<String> = (0..256)
            .map(|n| format!("data[{}]", n))
            .chain((0..64).map(|n| format!("ctl_{}", n)))
            .collect();
        builder = builder.template(name, nets);
    }
    builder.build().expect("bench index")
}

fn bench_cold_query(c: &mut Criterion) {
    let index = Arc::new(build_index());
    let options = EngineOptions {
        cache_capacity: 0,
        ..EngineOptions::default()
    };
    let engine = MatchingEngine::with_options(index, options);

    c.bench_function("find_matches_cold_bus", |b| {
        b.iter(|| engine.find_matches(black_box(Some("blk.*")), black_box("data[0:63]"), true, false));
    });
    c.bench_function("find_matches_cold_regex", |b| {
        b.iter(|| engine.find_matches(black_box(Some("blk1.*")), black_box("^ctl_\\d$"), true, true));
    });
}

fn bench_warm_query(c: &mut Criterion) {
    let engine = MatchingEngine::new(Arc::new(build_index()));
    engine.find_matches(Some("blk.*"), "data[0:63]", true, false);

    c.bench_function("find_matches_warm", |b| {
        b.iter(|| engine.find(black_box(&Query::net("data[0:63]").in_template("blk.*").template_regex(true))));
    });
}

fn bench_expand(c: &mut Criterion) {
    c.bench_function("expand_bus_notation", |b| {
        b.iter(|| expand_bus_notation(black_box("bank[0:3]word[0:31]")));
    });
}

criterion_group!(benches, bench_cold_query, bench_warm_query, bench_expand);
criterion_main!(benches);
