use std::hint::black_box;
use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};
use imsc_model::{DEFAULT_MAX_NESTING_DEPTH, ReaderOptions};
use imsc_reader::{convert, parse_element_tree, read_imsc};

const SAMPLE_TTML: &str = include_str!("../tests/test_data/real_world.ttml");

fn benchmark_read_imsc(c: &mut Criterion) {
    let mut group = c.benchmark_group("IMSC Reading");

    group.measurement_time(Duration::from_secs(20));
    group.sample_size(200);

    let default_options = ReaderOptions::default();

    group.bench_function("read_real_world_imsc", |b| {
        b.iter(|| {
            let parsed = read_imsc(black_box(SAMPLE_TTML), black_box(&default_options))
                .expect("样本解析失败");

            black_box(parsed);
        });
    });

    let tree = parse_element_tree(SAMPLE_TTML, DEFAULT_MAX_NESTING_DEPTH).expect("样本解析失败");

    group.bench_function("convert_prebuilt_tree", |b| {
        b.iter(|| {
            let parsed =
                convert(black_box(&tree), black_box(&default_options)).expect("样本转换失败");

            black_box(parsed);
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_read_imsc);

criterion_main!(benches);
