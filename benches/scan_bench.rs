use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use tf_launcher::core::discovery::APPLICATION_CLASS_MARKER;
use tf_launcher::core::java::parse_java_version;
use tf_launcher::infra::fs::{contains_bytes, file_contains};

fn jar_like_bytes(len: usize) -> Vec<u8> {
    let entry = b"PK\x03\x04com/android/tradefed/testtype/HostTest.class\x00";
    entry.iter().copied().cycle().take(len).collect()
}

fn bench_marker_search(c: &mut Criterion) {
    let haystack = jar_like_bytes(4 * 1024 * 1024);
    c.bench_function("contains_bytes_4mib_miss", |b| {
        b.iter(|| contains_bytes(black_box(&haystack), APPLICATION_CLASS_MARKER));
    });

    let temp_dir = tempfile::tempdir().unwrap();
    let jar = temp_dir.path().join("HostTest.jar");
    std::fs::write(&jar, &haystack).unwrap();
    c.bench_function("file_contains_4mib_miss", |b| {
        b.iter(|| file_contains(black_box(&jar), APPLICATION_CLASS_MARKER).unwrap());
    });
}

fn bench_version_parsing(c: &mut Criterion) {
    let output = "Picked up JAVA_TOOL_OPTIONS: -Dfile.encoding=UTF8\n\
                  openjdk version \"17.0.8\" 2023-07-18\n\
                  OpenJDK Runtime Environment (build 17.0.8+7)\n";
    c.bench_function("parse_java_version", |b| {
        b.iter(|| parse_java_version(black_box(output)));
    });
}

criterion_group!(benches, bench_marker_search, bench_version_parsing);
criterion_main!(benches);
