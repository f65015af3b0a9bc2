use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use schnorr::{Signature, SigningKey, VerifyingKey, batch_verify};

fn bench_sign(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let sk = SigningKey::random(&mut rng);
    let msg = b"benchmark message";
    let aux = [0x42u8; 32];

    c.bench_function("schnorr_sign", |bencher| {
        bencher.iter(|| {
            let sig = sk.sign(black_box(msg), black_box(&aux)).expect("sign");
            black_box(sig);
        })
    });
}

fn bench_verify(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let sk = SigningKey::random(&mut rng);
    let vk = VerifyingKey::from(&sk);
    let msg = b"benchmark message";
    let sig = sk.sign_with_rng(&mut rng, msg).expect("sign");

    c.bench_function("schnorr_verify", |bencher| {
        bencher.iter(|| {
            let ok = vk.verify(black_box(msg), black_box(&sig));
            black_box(ok).expect("verify");
        })
    });
}

fn bench_batch_verify(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);

    let signers: Vec<SigningKey> = (0..32).map(|_| SigningKey::random(&mut rng)).collect();
    let keys: Vec<VerifyingKey> = signers.iter().map(SigningKey::verifying_key).collect();
    let msgs: Vec<Vec<u8>> = (0..32u32).map(|i| i.to_be_bytes().to_vec()).collect();
    let msg_slices: Vec<&[u8]> = msgs.iter().map(Vec::as_slice).collect();
    let sigs: Vec<Signature> = signers
        .iter()
        .zip(&msg_slices)
        .map(|(sk, msg)| sk.sign_with_rng(&mut rng, msg).expect("sign"))
        .collect();

    c.bench_function("schnorr_batch_verify_32", |bencher| {
        bencher.iter(|| {
            batch_verify(
                &mut rng,
                black_box(&keys),
                black_box(&msg_slices),
                black_box(&sigs),
            )
            .expect("batch verify");
        })
    });
}

criterion_group!(benches, bench_sign, bench_verify, bench_batch_verify);
criterion_main!(benches);
