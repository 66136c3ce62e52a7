use criterion::{Criterion, criterion_group, criterion_main};
use crosspreview_engine::{BackendChoice, RenderOptions, SwiftUiParser, render_with};
mod common;

fn bench_backends(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    group.sample_size(10);

    let source = common::generate_view_source(100);
    for choice in [BackendChoice::Structural, BackendChoice::Fallback] {
        let Ok(mut parser) = SwiftUiParser::new(choice) else {
            continue;
        };
        group.bench_function(choice.to_string(), |b| {
            b.iter(|| {
                let result = parser.parse(std::hint::black_box(&source));
                std::hint::black_box(result);
            });
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    group.sample_size(10);

    let options = RenderOptions::default();
    let mut parser = SwiftUiParser::auto();
    for (name, source) in [
        ("stacks", common::generate_view_source(100)),
        ("for_each", common::generate_for_each_source(500)),
    ] {
        let result = parser.parse(&source);
        let Some(root) = result.root() else {
            continue;
        };
        group.bench_function(name, |b| {
            b.iter(|| std::hint::black_box(render_with(std::hint::black_box(root), &options)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_backends, bench_render);
criterion_main!(benches);
