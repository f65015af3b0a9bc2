use criterion::{black_box, criterion_group, criterion_main, Criterion};
use curve::{FieldElement, Scalar};

fn bench_field_mul(c: &mut Criterion) {
    c.bench_function("field_mul", |bencher| {
        let a = FieldElement::from_canonical_limbs([
            0x243f6a8885a308d3,
            0x13198a2e03707344,
            0xa4093822299f31d0,
            0x082efa98ec4e6c89,
        ]);
        let b = FieldElement::from_canonical_limbs([
            0x452821e638d01377,
            0xbe5466cf34e90c6c,
            0xc0ac29b7c97c50dd,
            0x3f84d5b5b5470917,
        ]);
        bencher.iter(|| black_box(black_box(a) * black_box(b)))
    });
}

fn bench_field_invert(c: &mut Criterion) {
    c.bench_function("field_invert", |bencher| {
        let a = FieldElement::from_canonical_u64(0x123456789abcdef);
        bencher.iter(|| black_box(black_box(a).invert()))
    });
}

fn bench_field_sqrt(c: &mut Criterion) {
    c.bench_function("field_sqrt", |bencher| {
        let a = FieldElement::from_canonical_u64(9);
        bencher.iter(|| black_box(black_box(a).sqrt()))
    });
}

fn bench_scalar_mul(c: &mut Criterion) {
    c.bench_function("scalar_mul", |bencher| {
        let a = Scalar::from_canonical_limbs([
            0x9216d5d98979fb1b,
            0xd1310ba698dfb5ac,
            0x2ffd72dbd01adfb7,
            0xb8e1afed6a267e96,
        ]);
        let b = Scalar::from_canonical_u64(0xdeadbeef);
        bencher.iter(|| black_box(black_box(a) * black_box(b)))
    });
}

criterion_group!(
    benches,
    bench_field_mul,
    bench_field_invert,
    bench_field_sqrt,
    bench_scalar_mul
);
criterion_main!(benches);
