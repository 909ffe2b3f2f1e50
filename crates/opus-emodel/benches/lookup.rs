use criterion::{black_box, criterion_group, criterion_main, Criterion};
use opus_emodel::validation;
use opus_emodel::{Bandwidth, BitrateMode, LossPattern, QueryService};
use serde_json::json;

fn typed_queries(c: &mut Criterion) {
    let service = QueryService::new();

    c.bench_function("typed list_metrics swb/vbr random", |b| {
        b.iter(|| {
            service.list_metrics(
                black_box(Bandwidth::SuperWideband),
                black_box(BitrateMode::Variable),
                Some(LossPattern::Random),
            )
        })
    });

    c.bench_function("typed metric_at_bitrate nb/cbr 9", |b| {
        b.iter(|| {
            service.metric_at_bitrate(
                black_box(Bandwidth::Narrowband),
                black_box(BitrateMode::Constant),
                black_box(9),
                None,
            )
        })
    });
}

fn raw_queries(c: &mut Criterion) {
    let bandwidth = json!("SWB");
    let mode = json!("vbr");
    let loss = json!("bursty");
    let bitrate = json!("25");

    c.bench_function("raw list_metrics", |b| {
        b.iter(|| validation::list_metrics(Some(&bandwidth), Some(&mode), Some(&loss)))
    });

    c.bench_function("raw metric_at_bitrate", |b| {
        b.iter(|| validation::metric_at_bitrate(Some(&bandwidth), Some(&mode), &bitrate, Some(&loss)))
    });

    c.bench_function("available_configurations", |b| {
        b.iter(validation::available_configurations)
    });
}

criterion_group!(benches, typed_queries, raw_queries);
criterion_main!(benches);
