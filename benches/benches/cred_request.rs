use ark_bls12_381::{Bls12_381, Fr};
use ark_std::rand::{rngs::StdRng, SeedableRng};
use blake2::Blake2b512;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dac::{cred_request::LevelCredRequest, keys::SecretKey};

macro_rules! bench_level {
    ($level: expr, $c: ident) => {
        let mut rng = StdRng::seed_from_u64(0u64);
        let sk = SecretKey::<Fr>::new(&mut rng);
        let nonce = [7u8; 32];

        $c.bench_function(&format!("Make request at level {}", $level), |b| {
            b.iter(|| {
                LevelCredRequest::<Bls12_381>::make::<_, Blake2b512>(
                    &mut rng,
                    black_box(&sk),
                    black_box(&nonce),
                    $level,
                )
                .unwrap()
            })
        });

        let req =
            LevelCredRequest::<Bls12_381>::make::<_, Blake2b512>(&mut rng, &sk, &nonce, $level)
                .unwrap();
        $c.bench_function(&format!("Validate request at level {}", $level), |b| {
            b.iter(|| black_box(&req).validate::<Blake2b512>().unwrap())
        });

        let bytes = req.to_bytes().unwrap();
        $c.bench_function(&format!("Decode request at level {}", $level), |b| {
            b.iter(|| LevelCredRequest::<Bls12_381>::from_bytes(black_box(&bytes)).unwrap())
        });
    };
}

fn cred_request_g1(c: &mut Criterion) {
    bench_level!(1, c);
}

fn cred_request_g2(c: &mut Criterion) {
    bench_level!(2, c);
}

criterion_group!(benches, cred_request_g1, cred_request_g2);
criterion_main!(benches);
