use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use num_bigint::BigUint;
use sigma_zkp::{
    PedersenProver, Prover, SchnorrProver, SecureRng, SignatureVerifier, Signer, Verifier,
    random_below, rfc5114_generator, rfc5114_group,
};

fn secret() -> BigUint {
    random_below(&mut SecureRng::new(), rfc5114_group().unwrap().q()).unwrap()
}

fn bench_schnorr_round(c: &mut Criterion) {
    let mut rng = SecureRng::new();
    let (group, g) = (rfc5114_group().unwrap(), rfc5114_generator().unwrap());
    let mut prover = SchnorrProver::new(group, g, secret()).unwrap();
    let challenge = secret();

    c.bench_function("schnorr_commit_and_prove", |b| {
        b.iter(|| {
            let comm = prover.commit(black_box(&mut rng)).unwrap();
            let resp = prover.prove(black_box(&challenge)).unwrap();
            (comm, resp)
        })
    });
}

fn bench_schnorr_verification(c: &mut Criterion) {
    let mut rng = SecureRng::new();
    let (group, g) = (rfc5114_group().unwrap(), rfc5114_generator().unwrap());
    let mut prover = SchnorrProver::new(group, g, secret()).unwrap();
    let verifier = prover.verifier();
    let challenge = secret();
    let comm = prover.commit(&mut rng).unwrap();
    let resp = prover.prove(&challenge).unwrap();

    c.bench_function("schnorr_verification", |b| {
        b.iter(|| verifier.verify(black_box(&comm), black_box(&challenge), black_box(&resp)))
    });
}

fn bench_pedersen_signing(c: &mut Criterion) {
    let group = rfc5114_group().unwrap();
    let g = rfc5114_generator().unwrap();
    let h = group.pow(&g, &secret());
    let mut prover = PedersenProver::new(group, g, h, secret(), secret()).unwrap();
    let mut rng = SecureRng::new();
    let message = BigUint::from(42u32);

    c.bench_function("pedersen_sign", |b| {
        b.iter(|| prover.sign(black_box(&message), &mut rng).unwrap())
    });

    let verifier = prover.verifier();
    let signature = prover.sign(&message, &mut rng).unwrap();
    c.bench_function("pedersen_verify_signature", |b| {
        b.iter(|| verifier.verify_signature(black_box(&message), black_box(signature.values())))
    });
}

criterion_group!(
    benches,
    bench_schnorr_round,
    bench_schnorr_verification,
    bench_pedersen_signing
);
criterion_main!(benches);
