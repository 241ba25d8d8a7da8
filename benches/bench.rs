use criterion::{criterion_group, criterion_main, Criterion};
use vktor::{Status, VktorParser};

fn make_large(json: &str) -> String {
    let mut large = String::from("{");
    for i in 0..10000 {
        if large.len() > 1 {
            large.push(',');
        }
        large.push_str(&format!(r#""{}":"#, i));
        large.push_str(json);
    }
    large.push('}');
    large
}

fn vktor_parse(json_bytes: &[u8]) {
    let mut parser = VktorParser::new(vktor::DEFAULT_MAX_DEPTH);
    parser.feed(json_bytes.to_vec());
    loop {
        match parser.parse().unwrap() {
            Status::Token => {}
            Status::NeedMore => panic!("benchmark input should never run dry"),
            Status::Complete => break,
        }
    }
}

fn vktor_benchmark(c: &mut Criterion) {
    let json = r#"{"a":1,"b":[true,false,null],"c":"hello, world","d":3.14159e10}"#;
    let json_bytes = json.as_bytes();

    let json_large = make_large(json);
    let json_large_bytes = json_large.as_bytes();

    c.bench_function("vktor", |b| {
        b.iter(|| {
            vktor_parse(json_bytes);
        })
    });

    c.bench_function("vktor_large", |b| {
        b.iter(|| {
            vktor_parse(json_large_bytes);
        })
    });

    c.bench_function("serde_large", |b| {
        b.iter(|| {
            let _: serde_json::Value = serde_json::from_str(&json_large).unwrap();
        })
    });
}

criterion_group!(benches, vktor_benchmark);
criterion_main!(benches);
