use criterion::{black_box, criterion_group, criterion_main, Criterion};

use aoc2023::*;

macro_rules! bench {
    ($c:expr, $path:path) => {{
        use $path::*;
        let s = EXAMPLE;
        $c.bench_function(concat!(stringify!($path), "::part1"), |b| {
            b.iter(|| black_box(part1(black_box(s))))
        });
        $c.bench_function(concat!(stringify!($path), "::part2"), |b| {
            b.iter(|| black_box(part2(black_box(s))))
        });
    }};
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench!(c, day02);
    bench!(c, day03);
    bench!(c, day04);
    bench!(c, day05);
    bench!(c, day06);
    bench!(c, day07);

    let almanac = day05::Almanac::parse(day05::EXAMPLE).unwrap();
    c.bench_function("day05::chain", |b| b.iter(|| black_box(almanac.chain())));
    c.bench_function("day05::lowest_by_ranges", |b| {
        b.iter(|| black_box(almanac.lowest_by_ranges()))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
