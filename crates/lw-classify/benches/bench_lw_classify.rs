use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lw_classify::{classify, classify_with, config::default_classify_config};

fn bench_classify_samples(c: &mut Criterion) {
    let samples = vec![
        ("$proc = Get-Process | Where-Object CPU", "powershell"),
        ("ps aux | grep nginx && sudo kill -9 1234", "unix"),
        ("# Notes\n\nSome **bold** text and a [link](https://example.com)", "markdown"),
        ("- apples\n- pears\n- plums\n- quinces", "list"),
        ("fn main() {\n    let x = 1;\n    println!(\"{x}\");\n}", "code"),
        ("An ordinary paragraph about nothing in particular at all.", "plain"),
    ];

    c.bench_function("classify_1000_mixed", |b| {
        b.iter(|| {
            for _ in 0..166 {
                for (text, _label) in &samples {
                    black_box(classify(black_box(text)));
                }
            }
        })
    });
}

fn bench_classify_large(c: &mut Criterion) {
    let config = default_classify_config();
    let mut text = String::new();
    while text.len() < 64 * 1024 {
        text.push_str("Some filler prose that runs on. $x = Get-Item | Out-Null\n");
    }

    // The sample window keeps this flat regardless of input size.
    c.bench_function("classify_64kb_windowed", |b| {
        b.iter(|| black_box(classify_with(black_box(&text), &config)))
    });
}

criterion_group!(benches, bench_classify_samples, bench_classify_large);
criterion_main!(benches);
