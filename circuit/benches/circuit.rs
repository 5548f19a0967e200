use criterion::{black_box, criterion_group, criterion_main, Criterion};
use circuit::{
    compile_verification_circuit, encode_witness, BabyJubjub, BaseField, Message, Mimc,
    SigningKey,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_compile(c: &mut Criterion) {
    c.bench_function("compile_verification_circuit", |bencher| {
        bencher.iter(|| black_box(compile_verification_circuit()))
    });
}

fn bench_solve_and_check(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let mimc = Mimc::<BaseField>::default();
    let sk = SigningKey::<BabyJubjub>::random(&mut rng);
    let pk = sk.verifying_key();
    let msg = Message::from_bytes(&[0xde, 0xad, 0xf0, 0x0d], &mimc);
    let sig = sk.sign(&mimc, &msg).to_bytes();

    let cs = compile_verification_circuit();
    let witness = encode_witness(&pk, &msg, &sig).expect("encodes");

    c.bench_function("encode_witness", |bencher| {
        bencher.iter(|| black_box(encode_witness(&pk, &msg, black_box(&sig))))
    });
    c.bench_function("solve_and_check", |bencher| {
        bencher.iter(|| black_box(cs.is_satisfied(black_box(&witness))))
    });
}

criterion_group!(benches, bench_compile, bench_solve_and_check);
criterion_main!(benches);
