use ark_bls12_381::{Fr, G1Affine, G2Affine};
use ark_std::{
    rand::{rngs::StdRng, SeedableRng},
    UniformRand,
};
use blake2::Blake2b512;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dac::{
    keys::SecretKey,
    pseudonym::{generate_nym_keys, NymSignature},
};

macro_rules! bench_nym {
    ($group_affine:ident, $c: ident) => {
        let mut rng = StdRng::seed_from_u64(0u64);
        let h = $group_affine::rand(&mut rng);
        let sk = SecretKey::<Fr>::new(&mut rng);
        let message = [1u8; 64];

        $c.bench_function(
            &format!("Generate pseudonym in {}", stringify!($group_affine)),
            |b| b.iter(|| generate_nym_keys(&mut rng, black_box(&sk), black_box(&h))),
        );

        let (sk_nym, pk_nym) = generate_nym_keys(&mut rng, &sk, &h);
        $c.bench_function(&format!("Sign in {}", stringify!($group_affine)), |b| {
            b.iter(|| {
                NymSignature::new::<_, Blake2b512>(
                    &mut rng,
                    black_box(&pk_nym),
                    black_box(&sk_nym),
                    black_box(&sk),
                    black_box(&h),
                    black_box(&message),
                )
                .unwrap()
            })
        });

        let sig =
            NymSignature::new::<_, Blake2b512>(&mut rng, &pk_nym, &sk_nym, &sk, &h, &message)
                .unwrap();
        $c.bench_function(&format!("Verify in {}", stringify!($group_affine)), |b| {
            b.iter(|| {
                sig.verify::<Blake2b512>(black_box(&h), black_box(&pk_nym), black_box(&message))
                    .unwrap()
            })
        });
    };
}

fn nym_g1(c: &mut Criterion) {
    bench_nym!(G1Affine, c);
}

fn nym_g2(c: &mut Criterion) {
    bench_nym!(G2Affine, c);
}

criterion_group!(benches, nym_g1, nym_g2);
criterion_main!(benches);
