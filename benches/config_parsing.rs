//! Benchmarks for project file parsing.
//!
//! These benchmarks measure parsing of INI project files, from an empty file
//! up to files carrying many extra keys per section.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use yocto_setup::config;

/// Only the mandatory repositories.
const MINIMAL_CONFIG: &str = r#"
[yocto]
repo_yocto = https://git.yoctoproject.org/git/poky
branch = rocko
"#;

/// Every section filled in.
const FULL_CONFIG: &str = r#"
[globalconfig]
project = zynqberry-demo
work = v_yocto

[yocto]
repo_yocto = https://git.yoctoproject.org/git/poky
branch = rocko

[xilinx]
repo_xilinx = https://github.com/Xilinx/
branch = rel-v2018.1

[zynqberry]
repo_zynqberry = https://github.com/example/
branch = master

[notification]
api_key = 0123456789abcdef
channel_name = builds
"#;

/// A full project file with `extra` free-form keys added to every section.
fn generate_large_config(extra: usize) -> String {
    let mut content = String::from(FULL_CONFIG);
    for section in ["globalconfig", "yocto", "xilinx", "zynqberry", "notification"] {
        content.push_str(&format!("\n[{}]\n", section));
        for i in 0..extra {
            content.push_str(&format!("extra_key_{} = value {}\n", i, i));
        }
    }
    content
}

fn bench_config_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("config_parsing");

    group.bench_function("empty", |b| b.iter(|| config::parse(black_box(""))));
    group.bench_function("minimal", |b| {
        b.iter(|| config::parse(black_box(MINIMAL_CONFIG)))
    });
    group.bench_function("full", |b| b.iter(|| config::parse(black_box(FULL_CONFIG))));

    group.finish();
}

fn bench_config_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("config_scaling");

    for extra in [10, 50, 200] {
        let config = generate_large_config(extra);
        group.bench_with_input(BenchmarkId::new("extra_keys", extra), &config, |b, config| {
            b.iter(|| config::parse(black_box(config)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_config_parsing, bench_config_scaling);
criterion_main!(benches);
