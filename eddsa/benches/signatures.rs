use criterion::{Criterion, black_box, criterion_group, criterion_main};
use curve::{BaseField, PrimeField};
use eddsa::{Message, SigningKey, VerifyingKey};
use mimc::Mimc;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn bench_sign(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let mimc = Mimc::<BaseField>::default();
    let sk: SigningKey = SigningKey::random(&mut rng);
    let msg = Message::new(BaseField::from_u64(0xdead_f00d));

    c.bench_function("eddsa_sign", |bencher| {
        bencher.iter(|| black_box(sk.sign(&mimc, black_box(&msg))))
    });
}

fn bench_verify(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let mimc = Mimc::<BaseField>::default();
    let sk: SigningKey = SigningKey::random(&mut rng);
    let vk = VerifyingKey::from(&sk);
    let msg = Message::new(BaseField::from_u64(0xdead_f00d));
    let sig = sk.sign(&mimc, &msg);

    c.bench_function("eddsa_verify", |bencher| {
        bencher.iter(|| black_box(vk.verify(&mimc, black_box(&msg), black_box(&sig))))
    });
}

fn bench_verifying_key_decode(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let sk: SigningKey = SigningKey::random(&mut rng);
    let bytes = sk.verifying_key().to_bytes();

    c.bench_function("eddsa_verifying_key_decode", |bencher| {
        bencher.iter(|| black_box(VerifyingKey::<curve::BabyJubjub>::from_bytes(black_box(&bytes))))
    });
}

criterion_group!(benches, bench_sign, bench_verify, bench_verifying_key_decode);
criterion_main!(benches);
